use crate::s_types::{BuildReport, BuildStatus};
use comfy_table::{Cell, ContentArrangement, Row, Table};

fn paint_level(level: &str, uses_color: bool) -> String {
    if !uses_color {
        return level.to_string();
    }
    #[cfg(feature = "color")]
    {
        use nu_ansi_term::Color;
        match level {
            "error" => Color::Red.paint(level).to_string(),
            "warning" => Color::Yellow.paint(level).to_string(),
            "test" => Color::Purple.paint(level).to_string(),
            _ => Color::Green.paint(level).to_string(),
        }
    }
    #[cfg(not(feature = "color"))]
    {
        level.to_string()
    }
}

/// Renders one summary table per report, followed by a detail table of
/// everything the report lists.
pub fn render_reports(reports: &[BuildReport], uses_color: bool) -> String {
    let mut out = String::new();

    for (index, report) in reports.iter().enumerate() {
        let title = if report.platform.is_empty() {
            "(unknown platform)"
        } else {
            report.platform.as_str()
        };
        out.push_str(&format!("## {}. {}\n\n", index + 1, title));

        let mut summary = Table::new();
        summary.set_content_arrangement(ContentArrangement::Dynamic);
        summary.set_width(80);
        summary.add_row(Row::from(vec![
            Cell::new("Errors"),
            Cell::new(report.errors.len()),
        ]));
        summary.add_row(Row::from(vec![
            Cell::new("Warnings"),
            Cell::new(report.warnings.len()),
        ]));
        summary.add_row(Row::from(vec![
            Cell::new("Test failures"),
            Cell::new(report.unit_test_failures.len()),
        ]));
        out.push_str(&summary.to_string());
        out.push_str("\n\n");

        if report.is_clean() {
            out.push_str("Well done, nothing to report.\n\n");
            continue;
        }

        let mut details = Table::new();
        details.set_content_arrangement(ContentArrangement::Dynamic);
        details.set_width(100);
        details.set_header(vec!["Level", "Location", "Message"]);
        for error in &report.errors {
            details.add_row(Row::from(vec![
                Cell::new(paint_level("error", uses_color)),
                Cell::new(format!("{}:{}", error.file_name, error.line)),
                Cell::new(&error.text),
            ]));
        }
        for warning in &report.warnings {
            details.add_row(Row::from(vec![
                Cell::new(paint_level("warning", uses_color)),
                Cell::new(format!("{}:{}", warning.file_name, warning.line)),
                Cell::new(&warning.text),
            ]));
        }
        for failure in &report.unit_test_failures {
            let message = [failure.assertion_kind.as_deref(), failure.explanation.as_deref()]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<&str>>()
                .join("\n");
            details.add_row(Row::from(vec![
                Cell::new(paint_level("test", uses_color)),
                Cell::new(&failure.method),
                Cell::new(if message.is_empty() { "-".to_string() } else { message }),
            ]));
        }
        out.push_str(&details.to_string());
        out.push_str("\n\n");
    }

    out
}

/// One-line outcome for a freshly parsed log.
pub fn render_status_line(report: &BuildReport, status: &BuildStatus) -> String {
    format!(
        "{}: {} error(s), {} warning(s), {} test failure(s); build {}",
        if report.platform.is_empty() { "unknown" } else { report.platform.as_str() },
        report.errors.len(),
        report.warnings.len(),
        report.unit_test_failures.len(),
        status
    )
}

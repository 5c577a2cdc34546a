//! Strips terminal noise from raw build output so the line grammars only
//! ever see plain text.

use once_cell::sync::Lazy;
use regex::Regex;

/// SGR color sequences left behind once the escape byte itself is gone,
/// e.g. `[31m`, `[1;33m`, `[0;`.
static SGR_REGEX: Lazy<Option<Regex>> = Lazy::new(|| {
    match Regex::new(r"\[[0-9]+(m|;)[0-9]*(;[0-9]*)*m?") {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::error!("Failed to create color code regex: {}", e);
            None
        }
    }
});

/// Removes carriage returns, the ANSI escape character and SGR color codes.
///
/// The line structure of the input is preserved, and running it on text
/// that is already clean returns the text unchanged.
///
/// # Example
/// ```
/// use buildlog_sift::s_normalize::normalize;
///
/// let raw = "\u{1b}[31m❌ /repo/A.swift:1:1: boom\u{1b}[0m\r\n";
/// assert_eq!(normalize(raw), "❌ /repo/A.swift:1:1: boom\n");
/// ```
pub fn normalize(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| *c != '\r' && *c != '\u{1b}').collect();

    match SGR_REGEX.as_ref() {
        Some(regex) => regex.replace_all(&stripped, "").into_owned(),
        // an unmatched sequence simply stays in place
        None => stripped,
    }
}

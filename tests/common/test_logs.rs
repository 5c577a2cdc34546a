use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};

/// fastlane scan output for the iOS scheme, failing with exit status 65.
pub const IOS_LOG: &str = "\
[10:00:00]: Driving the lane 'ios test'
| scheme           | App iOS |
❌  /ci/App/Sources/Net.swift:10:2: error: cannot find 'session' in scope
⚠️  /ci/App/Sources/Shared.swift:3:4: variable 'x' was never used
⚠️  /ci/App/Pods/Lib/Legacy.m:8:1: 'UIWebView' is deprecated [-Wdeprecated-declarations]
⚠️  /ci/App/Sources/Ios.swift:7:1: 'keyWindow' was deprecated in iOS 13.0
    ✗ testSync(), XCTAssertTrue - sync never finished
[10:05:00]: Exit status: 65
";

/// fastlane scan output for the macOS scheme; the build succeeds.
pub const MAC_LOG: &str = "\
| scheme           | App macOS |
⚠️  /ci/App/Sources/Shared.swift:3:4: variable 'x' was never used
    ✗ testSync(), XCTAssertTrue - sync never finished
";

/// fastlane output without a single diagnostic.
pub const CLEAN_LOG: &str = "\
| scheme           | App tvOS |
[10:00:00]: Build succeeded
";

/// Suppresses every warning coming from CocoaPods sources.
pub const PODS_CONFIG_YAML: &str = "\
ignore:
  \"Pods/\":
    warnings: [\"*\"]
";

/// Writes `content` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> IoResult<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

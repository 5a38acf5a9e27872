//! Leading comment block and output location of a declaration file.

use chrono::{DateTime, Local};
use oasdecl_core::ApiInfo;
use std::path::{Path, PathBuf};

/// Tool name printed in banners and headers.
pub const TOOL_NAME: &str = "oasdecl";

/// Crate version printed in banners and headers.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header lines for the declaration file generated from `input` at `now`.
///
/// Generator details come first; API metadata follows after a blank line.
pub fn header_lines(input: &Path, info: Option<&ApiInfo>, now: DateTime<Local>) -> Vec<String> {
    let mut lines = vec![
        format!("Auto generated by {TOOL_NAME} (Version {TOOL_VERSION})"),
        format!("Date: {}", now.to_rfc2822()),
        format!("Input: {}", input.display()),
    ];

    if let Some(info) = info {
        let details = info.header_lines();
        if !details.is_empty() {
            lines.push(String::new());
            lines.extend(details);
        }
    }
    lines
}

/// Where the declaration file goes.
///
/// `<output_dir>/<title>/<version>/<file_name>` when the metadata names both,
/// `<output_dir>/<file_name>` otherwise.
pub fn output_path(output_dir: &Path, info: Option<&ApiInfo>, file_name: &str) -> PathBuf {
    let dir = match info.and_then(ApiInfo::output_subdir) {
        Some(subdir) => output_dir.join(subdir),
        None => output_dir.to_path_buf(),
    };
    dir.join(file_name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn info() -> ApiInfo {
        ApiInfo::from_value(&json!({
            "title": "Swagger Petstore",
            "version": "1.0.0",
            "license": { "name": "MIT" }
        }))
        .unwrap()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_header_lines_with_info() {
        let info = info();
        let lines = header_lines(Path::new("petstore.json"), Some(&info), fixed_time());

        assert_eq!(lines[0], format!("Auto generated by oasdecl (Version {TOOL_VERSION})"));
        assert_eq!(lines[1], format!("Date: {}", fixed_time().to_rfc2822()));
        assert_eq!(lines[2], "Input: petstore.json");
        assert_eq!(
            &lines[3..],
            ["", "Title: Swagger Petstore", "Version: 1.0.0", "License: MIT"]
        );
    }

    #[test]
    fn test_header_lines_without_info() {
        let lines = header_lines(Path::new("api.yaml"), None, fixed_time());
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| !line.is_empty()));
    }

    #[test]
    fn test_output_path() {
        let info = info();
        assert_eq!(
            output_path(Path::new("output"), Some(&info), "schemas.d.ts"),
            Path::new("output/swaggerpetstore/1.0.0/schemas.d.ts")
        );
        assert_eq!(
            output_path(Path::new("output"), None, "schemas.d.ts"),
            Path::new("output/schemas.d.ts")
        );

        let untitled = ApiInfo::from_value(&json!({ "version": "2" })).unwrap();
        assert_eq!(
            output_path(Path::new("types"), Some(&untitled), "api.d.ts"),
            Path::new("types/api.d.ts")
        );
    }
}

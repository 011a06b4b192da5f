//! Helm `Chart.yaml` version updates.
//!
//! The rewrite is line-oriented: only the top-level `version:` and
//! `appVersion:` values change, everything else is kept byte-for-byte.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Result, UtilityError};

/// A version requested for a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartVersion {
    /// Bare SemVer written to `version:`.
    pub chart: semver::Version,
    /// The version exactly as requested, written to `appVersion:`.
    pub app: String,
}

impl ChartVersion {
    /// Parses a requested version, with or without a leading `v`.
    ///
    /// Helm requires chart versions to be SemVer 2, so pre-release and build
    /// metadata are accepted here.
    pub fn parse(input: &str) -> Result<Self> {
        let app = input.trim();
        let bare = app.strip_prefix('v').unwrap_or(app);
        let chart = semver::Version::parse(bare)
            .map_err(|e| UtilityError::parse(format!("invalid chart version '{}': {}", app, e)))?;

        Ok(ChartVersion {
            chart,
            app: app.to_string(),
        })
    }
}

/// Returns `contents` with the chart's version fields replaced.
///
/// # Errors
/// * [`UtilityError::Chart`] - no top-level `version:` key
pub fn rewrite_chart(
    contents: &str,
    version: &ChartVersion,
    update_app_version: bool,
) -> Result<String> {
    let field = Regex::new(r"^(version|appVersion)(:[ \t]*)(\S*)(.*)$")
        .map_err(|e| UtilityError::chart(format!("invalid field pattern: {}", e)))?;

    let mut found_version = false;
    let mut found_app_version = false;
    let mut output = String::with_capacity(contents.len() + 16);

    for line in contents.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);

        let replacement = field.captures(body).and_then(|caps| {
            let value = match &caps[1] {
                "version" if !found_version => {
                    found_version = true;
                    version.chart.to_string()
                }
                "appVersion" if update_app_version && !found_app_version => {
                    found_app_version = true;
                    format!("\"{}\"", version.app)
                }
                _ => return None,
            };
            Some(format!("{}{}{}{}", &caps[1], &caps[2], value, &caps[4]))
        });

        match replacement {
            Some(new_body) => output.push_str(&new_body),
            None => output.push_str(body),
        }
        output.push_str(ending);
    }

    if !found_version {
        return Err(UtilityError::chart("no top-level 'version:' field"));
    }
    if update_app_version && !found_app_version {
        warn!("chart has no top-level 'appVersion:' field, leaving it unset");
    }

    Ok(output)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Updates the chart file at `path` in place with `requested`.
pub fn update_chart_file(
    path: impl AsRef<Path>,
    requested: &str,
    update_app_version: bool,
) -> Result<ChartVersion> {
    let path = path.as_ref();
    let version = ChartVersion::parse(requested)?;

    let contents = fs::read_to_string(path)?;
    let updated = rewrite_chart(&contents, &version, update_app_version)
        .map_err(|e| match e {
            UtilityError::Chart(msg) => UtilityError::chart(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
    fs::write(path, updated)?;

    debug!(path = %path.display(), version = %version.chart, "updated chart");
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"apiVersion: v2
name: inference
# chart release
version: 0.1.0 # bumped by ci
appVersion: "v0.1.0"
dependencies:
  - name: redis
    version: 17.0.0
"#;

    #[test]
    fn test_parse_accepts_prefixed_and_bare() {
        let prefixed = ChartVersion::parse("v1.2.3").unwrap();
        assert_eq!(prefixed.chart, semver::Version::new(1, 2, 3));
        assert_eq!(prefixed.app, "v1.2.3");

        let bare = ChartVersion::parse("1.2.3-rc.1").unwrap();
        assert_eq!(bare.chart.to_string(), "1.2.3-rc.1");
        assert_eq!(bare.app, "1.2.3-rc.1");
    }

    #[test]
    fn test_parse_rejects_non_semver() {
        for bad in ["", "v1.2", "latest", "v1.2.3.4"] {
            assert!(
                matches!(ChartVersion::parse(bad), Err(UtilityError::Parse(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rewrite_updates_top_level_fields_only() {
        let version = ChartVersion::parse("v1.4.0").unwrap();
        let updated = rewrite_chart(CHART, &version, true).unwrap();

        assert!(updated.contains("version: 1.4.0 # bumped by ci\n"));
        assert!(updated.contains("appVersion: \"v1.4.0\"\n"));
        assert!(updated.contains("    version: 17.0.0\n"));
        assert!(updated.contains("# chart release\n"));
        assert_eq!(updated.lines().count(), CHART.lines().count());
    }

    #[test]
    fn test_rewrite_can_leave_app_version() {
        let version = ChartVersion::parse("2.0.0").unwrap();
        let updated = rewrite_chart(CHART, &version, false).unwrap();

        assert!(updated.contains("version: 2.0.0 # bumped by ci\n"));
        assert!(updated.contains("appVersion: \"v0.1.0\"\n"));
    }

    #[test]
    fn test_rewrite_keeps_crlf_endings() {
        let chart = "name: demo\r\nversion: 0.0.1\r\n";
        let version = ChartVersion::parse("0.0.2").unwrap();
        let updated = rewrite_chart(chart, &version, true).unwrap();
        assert_eq!(updated, "name: demo\r\nversion: 0.0.2\r\n");
    }

    #[test]
    fn test_rewrite_without_version_field_fails() {
        let version = ChartVersion::parse("1.0.0").unwrap();
        let err = rewrite_chart("name: demo\n", &version, true).unwrap_err();
        assert!(matches!(err, UtilityError::Chart(_)));
    }

    #[test]
    fn test_update_chart_file_in_place() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Chart.yaml");
        fs::write(&path, CHART).unwrap();

        let version = update_chart_file(&path, "v0.2.0", true).unwrap();
        assert_eq!(version.chart.to_string(), "0.2.0");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("version: 0.2.0 # bumped by ci"));
        assert!(written.contains("appVersion: \"v0.2.0\""));
    }

    #[test]
    fn test_update_missing_chart_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = update_chart_file(dir.path().join("Chart.yaml"), "1.0.0", true).unwrap_err();
        assert!(matches!(err, UtilityError::Io(_)));
    }
}

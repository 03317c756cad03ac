//! Environment report
//!
//! Collects tool, package-manager and manifest facts for `graft info`.

use std::path::Path;

use crate::core::config::ProjectConfig;
use crate::managers;

/// A single labeled report line
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Entry label
    pub label: String,
    /// Entry value
    pub value: String,
}

/// Assembled environment report
#[derive(Debug, Default)]
pub struct InfoReport {
    /// Labeled facts
    pub entries: Vec<ReportEntry>,
    /// Non-fatal findings
    pub warnings: Vec<String>,
}

impl InfoReport {
    /// Add a labeled entry
    pub fn add(&mut self, label: &str, value: impl Into<String>) {
        self.entries.push(ReportEntry {
            label: label.to_string(),
            value: value.into(),
        });
    }

    /// Record a non-fatal finding
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Collect the environment report for a project directory
///
/// Never fails: anything that cannot be determined becomes a warning.
pub fn collect(project_dir: &Path) -> InfoReport {
    let mut report = InfoReport::default();

    report.add("graft", env!("CARGO_PKG_VERSION"));
    report.add("commit", env!("VERGEN_GIT_SHA"));
    report.add("target", env!("VERGEN_CARGO_TARGET_TRIPLE"));
    report.add("rustc", env!("VERGEN_RUSTC_SEMVER"));

    let manager = managers::kind_for(project_dir);
    match check_command_version(manager.binary()) {
        Some(version) => report.add(manager.binary(), version),
        None => report.warn(format!("{} was not found on PATH", manager.binary())),
    }

    if let Some(name) = project_package_name(project_dir) {
        report.add("project", name);
    }

    match ProjectConfig::load(project_dir) {
        Ok(config) => {
            report.add("source root", &config.source_root);
            if !config.projects.is_empty() {
                let names: Vec<&str> = config.projects.keys().map(String::as_str).collect();
                report.add("projects", names.join(", "));
            }
        }
        Err(error) => report.warn(error.to_string()),
    }

    report
}

/// Probe a command's `--version` output
fn check_command_version(command: &str) -> Option<String> {
    std::process::Command::new(command)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            extract_version(&format!("{stdout}{stderr}"))
        })
}

/// Extract a version number from command output
fn extract_version(output: &str) -> Option<String> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-[\w.]+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Project name from `package.json`, if one is present
fn project_package_name(project_dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(project_dir.join("package.json")).ok()?;
    let manifest: serde_json::Value = serde_json::from_str(&content).ok()?;
    manifest
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version_plain() {
        assert_eq!(extract_version("10.2.4"), Some("10.2.4".to_string()));
    }

    #[test]
    fn test_extract_version_with_prefix_and_noise() {
        assert_eq!(
            extract_version("yarn version v1.22.19 (build abc)"),
            Some("1.22.19".to_string())
        );
    }

    #[test]
    fn test_extract_version_none() {
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    fn test_project_package_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "acme-api", "version": "0.0.1" }"#,
        )
        .unwrap();
        assert_eq!(
            project_package_name(dir.path()),
            Some("acme-api".to_string())
        );
    }

    #[test]
    fn test_project_package_name_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(project_package_name(dir.path()), None);
    }

    #[test]
    fn test_report_accumulates_entries_and_warnings() {
        let mut report = InfoReport::default();
        report.add("graft", "0.1.0");
        report.warn("npm was not found on PATH");
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].label, "graft");
        assert_eq!(report.warnings.len(), 1);
    }
}

//! Schematic collection execution
//!
//! A collection is the set of code generators ("schematics") shipped by
//! an installed package. Executing a schematic delegates to the external
//! `schematics` runner with the collection-qualified name, the rendered
//! option flags and any raw pass-through flags.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::SchematicError;

/// A named option passed to a schematic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicOption {
    name: String,
    value: String,
}

impl SchematicOption {
    /// Create an option
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }

    /// Render as a command-line flag, normalizing the name to kebab-case
    pub fn to_flag(&self) -> String {
        format!("--{}={}", kebab_case(&self.name), self.value)
    }
}

/// Normalize a camelCase option name to kebab-case
fn kebab_case(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            normalized.push('-');
            normalized.push(c.to_ascii_lowercase());
        } else {
            normalized.push(c);
        }
    }
    normalized
}

/// A loaded schematic collection
pub trait Collection {
    /// Collection name
    fn name(&self) -> &str;

    /// Execute a named schematic with options and raw pass-through flags
    fn execute(
        &self,
        schematic: &str,
        options: &[SchematicOption],
        extra_flags: Option<&str>,
    ) -> Result<(), SchematicError>;
}

/// Creates collections by name
pub trait CollectionSource {
    /// Load the collection shipped by an installed package
    fn create(&self, name: &str) -> Box<dyn Collection>;
}

/// Runs schematics through the external `schematics` executable
#[derive(Debug, Clone)]
pub struct SchematicRunner {
    project_dir: PathBuf,
}

impl SchematicRunner {
    /// Create a runner bound to a project directory
    pub fn new(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
        }
    }
}

impl CollectionSource for SchematicRunner {
    fn create(&self, name: &str) -> Box<dyn Collection> {
        Box::new(RunnerCollection {
            name: name.to_string(),
            project_dir: self.project_dir.clone(),
        })
    }
}

/// A collection executed through the schematics runner
struct RunnerCollection {
    name: String,
    project_dir: PathBuf,
}

impl Collection for RunnerCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        schematic: &str,
        options: &[SchematicOption],
        extra_flags: Option<&str>,
    ) -> Result<(), SchematicError> {
        let mut command = Command::new("schematics");
        command
            .arg(format!("{}:{schematic}", self.name))
            .current_dir(&self.project_dir);

        for option in options {
            command.arg(option.to_flag());
        }
        if let Some(flags) = extra_flags {
            command.args(flags.split_whitespace());
        }

        debug!(collection = %self.name, schematic, "running schematic");

        let output = command.output().map_err(|e| SchematicError::Io {
            command: "schematics".to_string(),
            error: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(SchematicError::ExecutionFailed {
                message: last_stderr_line(&output.stderr),
            });
        }
        Ok(())
    }
}

fn last_stderr_line(stderr: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stderr);
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_renders_as_kebab_case_flag() {
        let option = SchematicOption::new("sourceRoot", "apps/api/src");
        assert_eq!(option.to_flag(), "--source-root=apps/api/src");
    }

    #[test]
    fn test_plain_option_name_is_untouched() {
        let option = SchematicOption::new("name", "users");
        assert_eq!(option.to_flag(), "--name=users");
    }

    #[test]
    fn test_kebab_case_handles_multiple_humps() {
        assert_eq!(kebab_case("dryRunReport"), "dry-run-report");
        assert_eq!(kebab_case("plain"), "plain");
    }

    #[test]
    fn test_execution_failure_carries_last_stderr_line() {
        assert_eq!(
            last_stderr_line(b"working...\nError: template not found\n"),
            Some("Error: template not found".to_string())
        );
    }
}

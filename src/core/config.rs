//! Project configuration (`graft.toml`)
//!
//! The manifest describes where generated code should land: a default
//! source root plus optional per-project roots for multi-project
//! workspaces.
//!
//! ```toml
//! source-root = "src"
//!
//! [projects.api]
//! source-root = "apps/api/src"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Manifest file name
pub const CONFIG_FILE: &str = "graft.toml";

/// Suffix marking the default entry in a project selection prompt
pub const DEFAULT_LABEL: &str = " [ Default ]";

fn default_source_root() -> String {
    "src".to_string()
}

/// A single project entry in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Base directory of this project's sources
    #[serde(rename = "source-root")]
    pub source_root: String,
}

/// Top-level project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Default source root used when no project is singled out
    #[serde(rename = "source-root", default = "default_source_root")]
    pub source_root: String,

    /// Declared projects, keyed by name
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectEntry>,
}

impl ProjectConfig {
    /// Load the manifest from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Source root of a named project, falling back to the default when
    /// the project is not declared
    pub fn source_root_or_default(&self, project: &str) -> &str {
        self.projects
            .get(project)
            .map_or(self.source_root.as_str(), |entry| entry.source_root.as_str())
    }

    /// Whether the target project is ambiguous and worth prompting for
    pub fn is_ambiguous(&self) -> bool {
        self.projects.len() > 1
    }

    /// Build the selection prompt entries, default first and labeled
    ///
    /// The default entry is the project whose source root equals the
    /// top-level default; when none matches, the bare default source
    /// root stands in for it.
    pub fn project_choices(&self) -> Vec<String> {
        let default_name = self
            .projects
            .iter()
            .find(|(_, entry)| entry.source_root == self.source_root)
            .map_or_else(|| self.source_root.clone(), |(name, _)| name.clone());

        let mut entries = vec![format!("{default_name}{DEFAULT_LABEL}")];
        entries.extend(
            self.projects
                .keys()
                .filter(|name| **name != default_name)
                .cloned(),
        );
        entries
    }

    /// Resolve a prompt answer to a source-root override
    ///
    /// The answer may still carry the default label. Returns `None` when
    /// the answer names the default source root itself or an undeclared
    /// project, meaning the default stays in effect.
    pub fn resolve_choice(&self, answer: &str) -> Option<&str> {
        let name = answer.replace(DEFAULT_LABEL, "");
        if name == self.source_root {
            return None;
        }
        self.projects
            .get(&name)
            .map(|entry| entry.source_root.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source_root: &str) -> ProjectEntry {
        ProjectEntry {
            source_root: source_root.to_string(),
        }
    }

    fn two_project_config() -> ProjectConfig {
        ProjectConfig {
            source_root: "src".to_string(),
            projects: BTreeMap::from([
                ("api".to_string(), entry("apps/api/src")),
                ("web".to_string(), entry("apps/web/src")),
            ]),
        }
    }

    #[test]
    fn test_parse_manifest_with_defaults() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config.source_root, "src");
        assert!(config.projects.is_empty());
        assert!(!config.is_ambiguous());
    }

    #[test]
    fn test_parse_manifest_with_projects() {
        let config: ProjectConfig = toml::from_str(
            r#"
            source-root = "lib"

            [projects.api]
            source-root = "apps/api/src"
            "#,
        )
        .unwrap();
        assert_eq!(config.source_root, "lib");
        assert_eq!(config.source_root_or_default("api"), "apps/api/src");
    }

    #[test]
    fn test_unknown_project_falls_back_to_default() {
        let config = two_project_config();
        assert_eq!(config.source_root_or_default("nope"), "src");
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProjectConfig::load(dir.path());
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "source-root = [").unwrap();
        let result = ProjectConfig::load(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_choices_list_default_first_with_label() {
        let config = two_project_config();
        let choices = config.project_choices();
        assert_eq!(choices[0], "src [ Default ]");
        assert_eq!(choices[1..], ["api".to_string(), "web".to_string()]);
    }

    #[test]
    fn test_choices_promote_matching_project_to_default() {
        let mut config = two_project_config();
        config
            .projects
            .insert("main".to_string(), entry("src"));
        let choices = config.project_choices();
        assert_eq!(choices[0], "main [ Default ]");
        assert!(!choices[1..].contains(&"main".to_string()));
    }

    #[test]
    fn test_resolve_choice_overrides_with_project_root() {
        let config = two_project_config();
        assert_eq!(config.resolve_choice("web"), Some("apps/web/src"));
    }

    #[test]
    fn test_resolve_choice_keeps_default_when_picked() {
        let config = two_project_config();
        assert_eq!(config.resolve_choice("src [ Default ]"), None);
    }

    #[test]
    fn test_resolve_choice_on_labeled_default_project() {
        // A project that happens to own the default source root still
        // resolves through the project table.
        let mut config = two_project_config();
        config.projects.insert("main".to_string(), entry("src"));
        assert_eq!(config.resolve_choice("main [ Default ]"), Some("src"));
    }
}

//! Package manager abstraction
//!
//! Installation is delegated to whichever package manager the project
//! already uses. Detection looks at the project's lockfiles and falls
//! back to npm; the selected tool is run as a child process.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::ManagerError;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerKind {
    /// npm
    Npm,
    /// Yarn
    Yarn,
    /// pnpm
    Pnpm,
}

impl ManagerKind {
    /// Binary name on PATH
    pub fn binary(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Lockfile that identifies this manager
    pub fn lockfile(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Arguments that install production dependencies
    fn add_args(self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["install", "--save"],
            Self::Yarn => &["add"],
            Self::Pnpm => &["add", "--save-prod"],
        }
    }
}

impl std::fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Outcome of a successful install
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Manager that performed the install
    pub manager: String,
    /// `name@tag` pairs handed to the manager
    pub installed: Vec<String>,
}

/// Installs dependencies into a project
pub trait PackageManager {
    /// Human-readable manager name
    fn name(&self) -> &str;

    /// Install the given packages as production dependencies at `tag`
    fn add_production(&self, packages: &[String], tag: &str)
        -> Result<InstallReport, ManagerError>;
}

/// A package manager invoked as a child process
#[derive(Debug, Clone)]
pub struct CommandLineManager {
    kind: ManagerKind,
    project_dir: PathBuf,
}

impl CommandLineManager {
    /// Create a manager bound to a project directory
    pub fn new(kind: ManagerKind, project_dir: &Path) -> Self {
        Self {
            kind,
            project_dir: project_dir.to_path_buf(),
        }
    }

    /// The detected manager kind
    pub fn kind(&self) -> ManagerKind {
        self.kind
    }
}

impl PackageManager for CommandLineManager {
    fn name(&self) -> &str {
        self.kind.binary()
    }

    fn add_production(
        &self,
        packages: &[String],
        tag: &str,
    ) -> Result<InstallReport, ManagerError> {
        let installed: Vec<String> = packages.iter().map(|name| format!("{name}@{tag}")).collect();

        debug!(manager = self.kind.binary(), packages = ?installed, "running install");

        let output = Command::new(self.kind.binary())
            .args(self.kind.add_args())
            .args(&installed)
            .current_dir(&self.project_dir)
            .output()
            .map_err(|e| ManagerError::Io {
                command: self.kind.binary().to_string(),
                error: e.to_string(),
            })?;

        if !output.status.success() {
            let detail = last_stderr_line(&output.stderr)
                .unwrap_or_else(|| format!("exit status {}", output.status));
            return Err(ManagerError::CommandFailed {
                command: format!("{} {}", self.kind.binary(), self.kind.add_args().join(" ")),
                detail,
            });
        }

        Ok(InstallReport {
            manager: self.kind.binary().to_string(),
            installed,
        })
    }
}

/// Manager kind implied by a project's lockfiles
///
/// A yarn or pnpm lockfile wins; anything else means npm.
pub fn kind_for(project_dir: &Path) -> ManagerKind {
    if project_dir.join(ManagerKind::Yarn.lockfile()).exists() {
        ManagerKind::Yarn
    } else if project_dir.join(ManagerKind::Pnpm.lockfile()).exists() {
        ManagerKind::Pnpm
    } else {
        ManagerKind::Npm
    }
}

/// Detect the active package manager for a project
///
/// Fails only when the selected tool's binary cannot be located on PATH.
/// Detection is not retried; a missing binary is fatal to the caller.
pub fn detect(project_dir: &Path) -> Result<CommandLineManager, ManagerError> {
    let kind = kind_for(project_dir);

    if which::which(kind.binary()).is_err() {
        return Err(ManagerError::NotFound {
            name: kind.binary().to_string(),
        });
    }

    debug!(manager = kind.binary(), "detected package manager");
    Ok(CommandLineManager::new(kind, project_dir))
}

fn last_stderr_line(stderr: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stderr);
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod add;
pub mod info;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a library to the project and run its add schematic
    Add {
        /// Library specifier (name, @scope/name, optionally @version)
        library: String,

        /// Target project whose source root receives the generated code
        #[arg(short, long)]
        project: Option<String>,

        /// Extra flags passed through to the schematic after `--`
        #[arg(last = true)]
        extra_flags: Vec<String>,
    },

    /// Show environment and project information
    Info,
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Add {
                library,
                project,
                extra_flags,
            } => {
                let current_dir = std::env::current_dir()?;
                add::execute(&current_dir, &library, project, extra_flags).await
            }
            Self::Info => {
                let current_dir = std::env::current_dir()?;
                info::execute(&current_dir).await
            }
        }
    }
}

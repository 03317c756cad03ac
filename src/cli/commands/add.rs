//! CLI implementation for `graft add`
//!
//! Builds the named input pairs for the add operation, wires in the
//! concrete collaborators and reports the outcome.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use crate::cli::output::{create_spinner, print_detail, print_success};
use crate::core::add::{add_library, AddContext, ProjectSelector};
use crate::core::config::{ProjectConfig, CONFIG_FILE, DEFAULT_LABEL};
use crate::core::input::Input;
use crate::error::SelectionError;
use crate::managers;
use crate::schematics::SchematicRunner;

/// Execute the add command
pub async fn execute(
    path: &Path,
    library: &str,
    project: Option<String>,
    extra_flags: Vec<String>,
) -> Result<()> {
    // Check if manifest exists
    let manifest_path = path.join(CONFIG_FILE);
    if !manifest_path.exists() {
        anyhow::bail!(
            "No {CONFIG_FILE} found in {}. Create one to describe your project layout.",
            path.display()
        );
    }

    let config = ProjectConfig::load(path)?;
    let manager = managers::detect(path)?;
    let runner = SchematicRunner::new(path);

    let inputs = vec![
        Input::text("library", library),
        match project {
            Some(name) => Input::text("project", name),
            None => Input::absent("project"),
        },
    ];
    let options: Vec<Input> = Vec::new();

    let spinner = create_spinner(&format!("Adding {library}"));
    let selector = TerminalSelector {
        spinner: spinner.clone(),
    };

    let ctx = AddContext {
        manager: &manager,
        collections: &runner,
        selector: &selector,
        config: &config,
    };

    let result = add_library(&ctx, &inputs, &options, &extra_flags).await;
    spinner.finish_and_clear();
    let report = result.with_context(|| format!("Failed to add library '{library}'"))?;

    print_success(&format!("Added {} @ {}", report.package_name, report.tag));
    print_detail(&format!("installed with {}", report.install.manager));
    print_detail(&format!("generated into {}", report.source_root));

    Ok(())
}

/// Interactive project chooser speaking on stderr
struct TerminalSelector {
    spinner: ProgressBar,
}

impl ProjectSelector for TerminalSelector {
    fn select(&self, choices: &[String]) -> Result<String, SelectionError> {
        // Keep the spinner from repainting over the prompt.
        self.spinner.suspend(|| prompt_for_project(choices))
    }
}

/// Ask the user to pick one of the listed projects
///
/// Accepts the entry number, the entry text, or the bare project name.
/// An empty answer picks the default entry.
fn prompt_for_project(choices: &[String]) -> Result<String, SelectionError> {
    if !io::stdin().is_terminal() {
        return Err(SelectionError::NotInteractive);
    }

    eprintln!("Several projects are declared in this workspace:");
    for (index, choice) in choices.iter().enumerate() {
        eprintln!("  {}) {choice}", index + 1);
    }
    eprint!("Which project should receive the library? [1] ");
    io::stderr()
        .flush()
        .map_err(|e| SelectionError::Io(e.to_string()))?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|e| SelectionError::Io(e.to_string()))?;
    let answer = answer.trim();

    if answer.is_empty() {
        return choices
            .first()
            .cloned()
            .ok_or_else(|| SelectionError::UnknownChoice {
                answer: answer.to_string(),
            });
    }

    if let Ok(index) = answer.parse::<usize>() {
        if (1..=choices.len()).contains(&index) {
            return Ok(choices[index - 1].clone());
        }
    }

    choices
        .iter()
        .find(|choice| *choice == answer || choice.replace(DEFAULT_LABEL, "") == answer)
        .cloned()
        .ok_or_else(|| SelectionError::UnknownChoice {
            answer: answer.to_string(),
        })
}

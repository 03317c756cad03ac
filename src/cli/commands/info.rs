//! CLI implementation for `graft info`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{print_warning, status};
use crate::core::info;

/// Execute the info command
pub async fn execute(path: &Path) -> Result<()> {
    let report = info::collect(path);

    for entry in &report.entries {
        println!("{} {}: {}", status::INFO, entry.label, entry.value);
    }
    for warning in &report.warnings {
        print_warning(warning);
    }

    Ok(())
}

//! Add orchestration
//!
//! Sequences a library addition: locate the `library` input, install the
//! package, resolve the target source root, run the library's add
//! schematic. The steps are strictly sequential and a failed step
//! short-circuits the rest. A completed install is left in place when
//! generation fails afterwards; reinstalling on retry is idempotent.

use tracing::debug;

use crate::core::config::ProjectConfig;
use crate::core::input::{self, Input};
use crate::core::specifier::Specifier;
use crate::error::{AddError, SelectionError};
use crate::managers::{InstallReport, PackageManager};
use crate::schematics::{CollectionSource, SchematicOption};

/// Schematic every collection is expected to ship for the add operation
pub const ADD_SCHEMATIC: &str = "graft-add";

/// Picks a project from selection prompt entries
///
/// The interactive implementation lives in the CLI layer; tests supply a
/// deterministic one.
pub trait ProjectSelector {
    /// Choose one of the offered entries; the default entry comes first
    fn select(&self, choices: &[String]) -> Result<String, SelectionError>;
}

/// Collaborators the add operation runs against
pub struct AddContext<'a> {
    /// Installs packages
    pub manager: &'a dyn PackageManager,
    /// Loads schematic collections
    pub collections: &'a dyn CollectionSource,
    /// Disambiguates the target project when several are declared
    pub selector: &'a dyn ProjectSelector,
    /// Project configuration
    pub config: &'a ProjectConfig,
}

/// Outcome of a completed add operation
#[derive(Debug, Clone)]
pub struct AddReport {
    /// Package that was installed
    pub package_name: String,
    /// Tag it was installed at
    pub tag: String,
    /// Install outcome from the package manager
    pub install: InstallReport,
    /// Source root the schematic generated into
    pub source_root: String,
}

/// Add a library to the project
///
/// `inputs` carries the named arguments (`library`, `project`), `options`
/// any pre-computed options; the resolved `sourceRoot` option is derived
/// internally before generation. `extra_flags` are joined with single
/// spaces and forwarded to the schematic verbatim.
pub async fn add_library(
    ctx: &AddContext<'_>,
    inputs: &[Input],
    options: &[Input],
    extra_flags: &[String],
) -> Result<AddReport, AddError> {
    let library = input::find_text(inputs, "library").ok_or_else(|| AddError::MissingInput {
        name: "library".to_string(),
    })?;

    let spec = Specifier::parse(library);
    debug!(package = %spec.package_name, tag = %spec.tag, "installing library");

    let install = ctx
        .manager
        .add_production(std::slice::from_ref(&spec.collection_name), &spec.tag)?;

    let source_root = resolve_source_root(ctx, inputs, options)?;

    let collection = ctx.collections.create(&spec.collection_name);
    let schematic_options = vec![SchematicOption::new("sourceRoot", source_root.clone())];
    let extra = if extra_flags.is_empty() {
        None
    } else {
        Some(extra_flags.join(" "))
    };

    debug!(collection = %spec.collection_name, source_root = %source_root, "running add schematic");
    collection.execute(ADD_SCHEMATIC, &schematic_options, extra.as_deref())?;

    Ok(AddReport {
        package_name: spec.package_name,
        tag: spec.tag,
        install,
        source_root,
    })
}

/// Resolve the source root generation should target
///
/// An explicit `project` input wins. Without one, a configuration that
/// declares several projects is ambiguous and the selector is asked,
/// with the default entry listed first; the choice overrides the default
/// unless the default itself is picked.
fn resolve_source_root(
    ctx: &AddContext<'_>,
    inputs: &[Input],
    options: &[Input],
) -> Result<String, AddError> {
    let config = ctx.config;
    let project = input::find_text(inputs, "project")
        .or_else(|| input::find_text(options, "project"))
        .filter(|name| !name.is_empty());

    let mut source_root = match project {
        Some(name) => config.source_root_or_default(name).to_string(),
        None => config.source_root.clone(),
    };

    if project.is_none() && config.is_ambiguous() {
        let choices = config.project_choices();
        let answer = ctx.selector.select(&choices)?;
        if let Some(root) = config.resolve_choice(&answer) {
            source_root = root.to_string();
        }
    }

    Ok(source_root)
}

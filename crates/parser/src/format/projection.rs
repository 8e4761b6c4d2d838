//! Metadata projection: derives the uniform [`ModuleMetadata`] view from a
//! parsed, typed manifest.

use super::{package_size, ParseError, ParserOptions};
use crate::access::PackageAccess;
use crate::warnings::Warnings;
use models::scorm::{ScormEdition, ScormManifest};
use models::{ModuleKind, ModuleMetadata, PackageManifest, SequencingLevel};

/// Projects any non-SCORM-2004 manifest. `sequencing_level` is `none` by
/// definition for those standards.
pub fn project<M: PackageManifest>(
    access: &dyn PackageAccess,
    manifest: &M,
    options: &ParserOptions,
    warnings: &mut Warnings,
) -> Result<ModuleMetadata, ParseError> {
    finish(access, manifest, options, warnings, SequencingLevel::None)
}

/// Projects a SCORM manifest, classifying its sequencing usage.
pub fn project_scorm(
    access: &dyn PackageAccess,
    manifest: &ScormManifest,
    options: &ParserOptions,
    warnings: &mut Warnings,
) -> Result<ModuleMetadata, ParseError> {
    finish(
        access,
        manifest,
        options,
        warnings,
        sequencing_level(manifest),
    )
}

/// The four-level classification of a manifest's sequencing declaration.
pub fn sequencing_level(manifest: &ScormManifest) -> SequencingLevel {
    if manifest.edition != ScormEdition::V2004 {
        return SequencingLevel::None;
    }
    let blocks = manifest.sequencing_blocks();
    if blocks.is_empty() {
        SequencingLevel::None
    } else if blocks
        .iter()
        .any(|block| block.has_rollup_rules() || block.has_objective_mappings())
    {
        SequencingLevel::Full
    } else if blocks.len() > 1 {
        SequencingLevel::Multi
    } else {
        SequencingLevel::Minimal
    }
}

fn finish<M: PackageManifest + ?Sized>(
    access: &dyn PackageAccess,
    manifest: &M,
    options: &ParserOptions,
    warnings: &mut Warnings,
    sequencing_level: SequencingLevel,
) -> Result<ModuleMetadata, ParseError> {
    let kind = manifest.module_kind();
    let launch_url = manifest
        .launch_url()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ParseError::missing_field("launch URL", access.root_path()))?;

    let xapi_enabled = matches!(kind, ModuleKind::Cmi5 | ModuleKind::Xapi)
        || access.has_xapi_support()?;

    Ok(ModuleMetadata {
        kind,
        title: manifest.title().to_string(),
        description: manifest.description().to_string(),
        identifier: manifest.identifier().to_string(),
        version: manifest.version().to_string(),
        launch_url,
        duration: manifest.duration(),
        size_on_disk: package_size(access, options, warnings),
        xapi_enabled,
        sequencing_level,
    })
}

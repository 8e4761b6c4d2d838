//! SCORM 2004 parsing: the shared content-packaging machinery plus
//! sequencing capture and optional schema validation.

use super::scorm::{self, MANIFEST_NAME};
use super::{locate_manifest, projection, ParseError, Parser, ParserOptions};
use crate::access::{self, PackageAccess};
use crate::deserialize::xml;
use crate::warnings::Warnings;
use models::scorm::{ScormEdition, ScormManifest};
use models::ModuleMetadata;

pub struct Scorm2004Parser;

impl Parser for Scorm2004Parser {
    fn parse(
        &self,
        access: &dyn PackageAccess,
        options: &ParserOptions,
        warnings: &mut Warnings,
    ) -> Result<ModuleMetadata, ParseError> {
        let manifest_path = locate_manifest(access, MANIFEST_NAME)?;
        if options.validate_schema {
            validate_schema(access, &manifest_path)?;
        }
        let manifest =
            scorm::parse_manifest(access, &manifest_path, ScormEdition::V2004, warnings)?;
        scorm::require_title_and_launch(&manifest, &manifest_path)?;
        projection::project_scorm(access, &manifest, options, warnings)
    }
}

/// The format-specific entry point, without projection.
pub fn parse_manifest(
    access: &dyn PackageAccess,
    warnings: &mut Warnings,
) -> Result<ScormManifest, ParseError> {
    let manifest_path = locate_manifest(access, MANIFEST_NAME)?;
    scorm::parse_manifest(access, &manifest_path, ScormEdition::V2004, warnings)
}

/// Structural schema validation: the manifest root must be a `<manifest>`
/// element, and every schema file its `xsi:schemaLocation` pairs name must
/// be bundled in the package. Any violation is fatal.
fn validate_schema(access: &dyn PackageAccess, manifest_path: &str) -> Result<(), ParseError> {
    let bytes = access::read_all(access, manifest_path)?;
    let text = xml::decode(&bytes);
    let document = xml::document(&text).map_err(|cause| ParseError::SchemaValidation {
        path: manifest_path.to_string(),
        reason: cause.to_string(),
    })?;
    let root = document.root_element();
    if !xml::named(root, "manifest") {
        return Err(ParseError::SchemaValidation {
            path: manifest_path.to_string(),
            reason: format!(
                "root element is '{}', expected 'manifest'",
                root.tag_name().name()
            ),
        });
    }

    // xsi:schemaLocation holds namespace/location pairs; the locations are
    // the schema files the package claims to bundle.
    let Some(schema_location) = xml::attribute(root, "schemaLocation") else {
        return Ok(());
    };
    let locations: Vec<&str> = schema_location
        .split_whitespace()
        .skip(1)
        .step_by(2)
        .filter(|location| !location.starts_with("http://") && !location.starts_with("https://"))
        .collect();
    for location in locations {
        if !access.exists(location)? {
            return Err(ParseError::SchemaValidation {
                path: manifest_path.to_string(),
                reason: format!("declared schema file '{location}' is not bundled"),
            });
        }
    }
    Ok(())
}

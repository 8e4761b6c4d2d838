//! SCORM 1.2 parsing.

use super::scorm::{self, MANIFEST_NAME};
use super::{locate_manifest, projection, ParseError, Parser, ParserOptions};
use crate::access::PackageAccess;
use crate::warnings::Warnings;
use models::scorm::{ScormEdition, ScormManifest};
use models::ModuleMetadata;

pub struct Scorm12Parser;

impl Parser for Scorm12Parser {
    fn parse(
        &self,
        access: &dyn PackageAccess,
        options: &ParserOptions,
        warnings: &mut Warnings,
    ) -> Result<ModuleMetadata, ParseError> {
        let manifest_path = locate_manifest(access, MANIFEST_NAME)?;
        let manifest =
            scorm::parse_manifest(access, &manifest_path, ScormEdition::V1_2, warnings)?;
        scorm::require_title_and_launch(&manifest, &manifest_path)?;
        projection::project_scorm(access, &manifest, options, warnings)
    }
}

/// The format-specific entry point: locates and parses `imsmanifest.xml`
/// without projecting.
pub fn parse_manifest(
    access: &dyn PackageAccess,
    warnings: &mut Warnings,
) -> Result<ScormManifest, ParseError> {
    let manifest_path = locate_manifest(access, MANIFEST_NAME)?;
    scorm::parse_manifest(access, &manifest_path, ScormEdition::V1_2, warnings)
}

//! The five format parsers, the shared error taxonomy, and the dispatcher
//! that binds detection, parsing and projection into one entry point.

pub mod aicc;
pub mod cmi5;
pub mod projection;
pub mod scorm;
pub mod scorm12;
pub mod scorm2004;
pub mod xapi;

use crate::access::{AccessError, PackageAccess};
use crate::deserialize::find_file_ignore_case;
use crate::deserialize::tabular::TableError;
use crate::deserialize::xml::XmlError;
use crate::detect::{self, DetectionError};
use crate::warnings::{Warning, Warnings};
use models::{ModuleKind, ModuleMetadata, SIZE_UNKNOWN};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Error type returned by all parse operations.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No parser matches the package layout.
    #[error(transparent)]
    Detection(#[from] DetectionError),

    /// The format's manifest file is not present.
    #[error("manifest '{name}' was not found under '{root}'")]
    MissingManifest { name: &'static str, root: String },

    /// The manifest body failed to parse.
    #[error("failed to parse manifest '{path}': {cause}")]
    ManifestParse {
        path: String,
        #[source]
        cause: ManifestFormatError,
    },

    /// Schema validation rejected a SCORM 2004 manifest.
    #[error("schema validation failed for '{path}': {reason}")]
    SchemaValidation { path: String, reason: String },

    /// A format-mandated field is absent or empty.
    #[error("required field '{field}' is missing or empty in '{path}'")]
    MissingRequiredField { field: &'static str, path: String },

    /// Underlying access-layer failure.
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// The concrete decode failure behind a [`ParseError::ManifestParse`].
#[derive(Debug, thiserror::Error)]
pub enum ManifestFormatError {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl ParseError {
    pub(crate) fn manifest_parse(
        path: impl Into<String>,
        cause: impl Into<ManifestFormatError>,
    ) -> Self {
        ParseError::ManifestParse {
            path: path.into(),
            cause: cause.into(),
        }
    }

    pub(crate) fn missing_field(field: &'static str, path: impl Into<String>) -> Self {
        ParseError::MissingRequiredField {
            field,
            path: path.into(),
        }
    }
}

/// Options controlling a parse. Passed by value to the dispatcher; there is
/// no process-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Validate SCORM 2004 manifests against their bundled schema set
    /// before deserializing.
    pub validate_schema: bool,
    /// Account the package's total uncompressed size. When off,
    /// `size_on_disk` reports unknown.
    pub calculate_size: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            validate_schema: false,
            calculate_size: true,
        }
    }
}

/// A successful parse: the projected metadata plus every recovered anomaly.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub metadata: ModuleMetadata,
    pub warnings: Vec<Warning>,
}

/// Parser is an object-safe trait implemented once per packaging standard.
pub trait Parser {
    /// Parses the package and projects the uniform metadata view.
    fn parse(
        &self,
        access: &dyn PackageAccess,
        options: &ParserOptions,
        warnings: &mut Warnings,
    ) -> Result<ModuleMetadata, ParseError>;
}

fn parser_for(kind: ModuleKind) -> Box<dyn Parser> {
    match kind {
        ModuleKind::Scorm12 => Box::new(scorm12::Scorm12Parser),
        ModuleKind::Scorm2004 => Box::new(scorm2004::Scorm2004Parser),
        ModuleKind::Aicc => Box::new(aicc::AiccParser),
        ModuleKind::Cmi5 => Box::new(cmi5::Cmi5Parser),
        ModuleKind::Xapi => Box::new(xapi::XapiParser),
    }
}

/// Detects the package's standard, runs the matching parser, and returns
/// the projected metadata together with the warning list.
#[tracing::instrument(level = "debug", skip_all, fields(root = %access.root_path()))]
pub fn parse_detailed(
    access: &dyn PackageAccess,
    options: &ParserOptions,
) -> Result<Parsed, ParseError> {
    let mut warnings = Warnings::new();
    let kind = detect::detect(access, &mut warnings)?;
    tracing::debug!(kind = %kind, "detected module type");
    let parser = parser_for(kind);
    let metadata = parser.parse(access, options, &mut warnings)?;
    tracing::info!(
        kind = %metadata.kind,
        title = %metadata.title,
        warnings = warnings.len(),
        "finished parsing package"
    );
    Ok(Parsed {
        metadata,
        warnings: warnings.into_vec(),
    })
}

/// The embedding contract: one call from package access to the uniform
/// metadata view.
pub fn parse(
    access: &dyn PackageAccess,
    options: &ParserOptions,
) -> Result<ModuleMetadata, ParseError> {
    parse_detailed(access, options).map(|parsed| parsed.metadata)
}

/// Finds a manifest by case-insensitive search over the root listing.
pub(crate) fn locate_manifest(
    access: &dyn PackageAccess,
    name: &'static str,
) -> Result<String, ParseError> {
    let listing = access.list("")?;
    find_file_ignore_case(&listing, name)
        .map(str::to_string)
        .ok_or_else(|| ParseError::MissingManifest {
            name,
            root: access.root_path(),
        })
}

/// Total uncompressed size, or the unknown sentinel when accounting is
/// disabled or the access layer cannot answer.
pub(crate) fn package_size(
    access: &dyn PackageAccess,
    options: &ParserOptions,
    warnings: &mut Warnings,
) -> i64 {
    if !options.calculate_size {
        return SIZE_UNKNOWN;
    }
    match access.total_size() {
        Ok(size) => i64::try_from(size).unwrap_or(i64::MAX),
        Err(cause) => {
            warnings.push(
                access.root_path(),
                format_args!("size accounting failed: {cause}"),
            );
            SIZE_UNKNOWN
        }
    }
}

//! Typed data model for e-learning content packages.
//!
//! The model is shared by all five format parsers (SCORM 1.2, SCORM 2004,
//! AICC, cmi5, xAPI/TinCan) and is what downstream pipelines consume: IEEE
//! LOM metadata, IMS Content Packaging trees, IMS Simple Sequencing rules,
//! ADL extensions, and the vendor-neutral [`ModuleMetadata`] projection.
//!
//! Parsed trees are plain owned values. Cross-references between items and
//! resources are expressed by string identifier and resolved through index
//! maps built once at the end of parsing, never by pointer sharing.

pub mod aicc;
pub mod cmi5;
pub mod lang;
pub mod lom;
mod manifest;
mod metadata;
pub mod scorm;
pub mod tincan;

pub use self::lang::{LangString, SingleLangString, SourceValuePair, UnboundLangString};
pub use self::manifest::PackageManifest;
pub use self::metadata::{ModuleKind, ModuleMetadata, SequencingLevel, SIZE_UNKNOWN};

/// Matches two keywords the way controlled-vocabulary sources spell them:
/// Unicode case folding, so `Expositive`, `EXPOSITIVE` and `expositive` are
/// all the same token.
pub fn keyword_eq(a: &str, b: &str) -> bool {
    caseless::default_caseless_match_str(a, b)
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use strum::{EnumIter, IntoStaticStr};

/// The packaging standard a module implements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ModuleKind {
    Scorm12,
    Scorm2004,
    Aicc,
    Cmi5,
    Xapi,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            ModuleKind::Scorm12 => "SCORM 1.2",
            ModuleKind::Scorm2004 => "SCORM 2004",
            ModuleKind::Aicc => "AICC",
            ModuleKind::Cmi5 => "cmi5",
            ModuleKind::Xapi => "xAPI",
        };
        f.write_str(name)
    }
}

/// How elaborate a SCORM 2004 package's sequencing declaration is. Always
/// `None` for the other four standards.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SequencingLevel {
    /// No `<imsss:sequencing>` element anywhere in the manifest.
    #[default]
    None,
    /// A single sequencing block carrying only default flow controls.
    Minimal,
    /// Multiple sequencing blocks, but no rollup rules and no objective
    /// mappings.
    Multi,
    /// At least one rollup rule or cross-activity objective mapping.
    Full,
}

impl fmt::Display for SequencingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(<&'static str>::from(*self))
    }
}

/// The uniform, format-neutral description of a parsed package. Built once
/// per parse by the metadata projection and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMetadata {
    pub kind: ModuleKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Relative path of the first executable resource.
    pub launch_url: String,
    /// LOM technical duration; zero when the package does not declare one.
    #[serde(default, with = "humantime_serde")]
    pub duration: Duration,
    /// Sum of uncompressed file bytes, or -1 when size accounting failed or
    /// was disabled.
    pub size_on_disk: i64,
    pub xapi_enabled: bool,
    pub sequencing_level: SequencingLevel,
}

/// Sentinel for an unknown package size.
pub const SIZE_UNKNOWN: i64 = -1;

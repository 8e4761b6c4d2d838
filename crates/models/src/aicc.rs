//! The AICC packaging model: an INI course descriptor plus CSV tables that
//! share a basename (`.crs`, `.des`, `.au`, `.cst`, optionally `.pre` and
//! `.ort`).

use crate::manifest::PackageManifest;
use crate::metadata::ModuleKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A row of a schema-unknown AICC table (`.pre`, `.ort`). Keys are stored
/// lowercased so lookups are case-insensitive.
pub type RawRecord = IndexMap<String, String>;

/// A whole parsed AICC file set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiccPackage {
    pub course: Course,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptors: Vec<Descriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignable_units: Vec<AssignableUnit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub course_structure: Vec<CourseStructureRow>,
    /// `.pre` rows, preserved as-is; the schema varies by tool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites_table: Vec<RawRecord>,
    /// `.ort` rows, preserved as-is.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives_relation_table: Vec<RawRecord>,
}

impl AiccPackage {
    /// The launch URL: the first assignable unit's web-launch field.
    pub fn resolve_launch_url(&self) -> Option<&str> {
        self.assignable_units.first().and_then(|au| au.launch_url())
    }
}

impl PackageManifest for AiccPackage {
    fn module_kind(&self) -> ModuleKind {
        ModuleKind::Aicc
    }

    fn title(&self) -> &str {
        &self.course.course_title
    }

    fn description(&self) -> &str {
        self.course.description.as_deref().unwrap_or("")
    }

    fn identifier(&self) -> &str {
        self.course.course_id.as_deref().unwrap_or("")
    }

    fn version(&self) -> &str {
        self.course.version.as_deref().unwrap_or("")
    }

    fn launch_url(&self) -> Option<String> {
        self.resolve_launch_url().map(str::to_string)
    }
}

/// The `.crs` INI projected onto a record. Field names follow the AICC CMI
/// guidelines; matching against INI keys is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// `[Course_Data].Course_Title` (some tools write it under `[Course]`).
    #[serde(default)]
    pub course_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_aus: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_blocks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// `[Course_Behavior].Max_Normal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_normal: Option<u32>,
    /// `[Course_Description]` free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One `.des` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub system_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One `.au` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignableUnit {
    pub system_id: String,
    /// The launchable file; AICC calls the column `File_Name`.
    #[serde(default)]
    pub file_name: String,
    /// Launch parameters, sometimes holding the URL instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_launch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub au_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time_allowed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub au_password: Option<String>,
}

impl AssignableUnit {
    /// `File_Name` when present, `Web_Launch` otherwise.
    pub fn launch_url(&self) -> Option<&str> {
        Some(self.file_name.as_str())
            .filter(|f| !f.is_empty())
            .or_else(|| self.web_launch.as_deref().filter(|w| !w.is_empty()))
    }
}

/// One `.cst` row: a block name followed by its members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStructureRow {
    pub block: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn launch_prefers_file_name_over_web_launch() {
        let au = AssignableUnit {
            system_id: "A1".to_string(),
            file_name: "start.html".to_string(),
            web_launch: Some("alt.html".to_string()),
            ..Default::default()
        };
        assert_eq!(Some("start.html"), au.launch_url());

        let au = AssignableUnit {
            system_id: "A1".to_string(),
            file_name: String::new(),
            web_launch: Some("alt.html".to_string()),
            ..Default::default()
        };
        assert_eq!(Some("alt.html"), au.launch_url());
    }
}

//! ADL namespace extensions layered over IMS Content Packaging: the
//! `adlcp`, `adlseq` and `adlnav` additions SCORM makes to plain CP trees.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// `adlcp:timeLimitAction`: what the SCO should do when its time limit is
/// exceeded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum TimeLimitAction {
    #[strum(serialize = "exit,message")]
    #[serde(rename = "exit,message")]
    ExitMessage,
    #[strum(serialize = "exit,no message")]
    #[serde(rename = "exit,no message")]
    ExitNoMessage,
    #[strum(serialize = "continue,message")]
    #[serde(rename = "continue,message")]
    ContinueMessage,
    #[strum(serialize = "continue,no message")]
    #[serde(rename = "continue,no message")]
    ContinueNoMessage,
}

/// `adlcp:completionThreshold` (SCORM 2004 4th edition attributes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionThreshold {
    #[serde(default)]
    pub completed_by_measure: bool,
    #[serde(default = "default_measure")]
    pub min_progress_measure: f64,
    #[serde(default = "default_measure")]
    pub progress_weight: f64,
}

impl Default for CompletionThreshold {
    fn default() -> Self {
        CompletionThreshold {
            completed_by_measure: false,
            min_progress_measure: 1.0,
            progress_weight: 1.0,
        }
    }
}

/// One `adlcp:map` entry within `adlcp:data`: a shared-data bucket binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMap {
    pub target_id: String,
    #[serde(default = "default_true")]
    pub read_shared_data: bool,
    #[serde(default = "default_true")]
    pub write_shared_data: bool,
}

impl DataMap {
    pub fn new(target_id: impl Into<String>) -> Self {
        DataMap {
            target_id: target_id.into(),
            read_shared_data: true,
            write_shared_data: true,
        }
    }
}

/// `adlnav:presentation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_interface: Option<NavigationInterface>,
}

/// `adlnav:navigationInterface`: which LMS-provided UI devices to hide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationInterface {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_lms_ui: Vec<HideLmsUi>,
}

/// `adlnav:hideLMSUI` values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum HideLmsUi {
    Previous,
    #[strum(serialize = "continue")]
    #[serde(rename = "continue")]
    Continue,
    Exit,
    ExitAll,
    Abandon,
    AbandonAll,
    SuspendAll,
}

fn default_true() -> bool {
    true
}

fn default_measure() -> f64 {
    1.0
}

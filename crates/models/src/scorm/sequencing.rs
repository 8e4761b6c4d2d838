//! IMS Simple Sequencing, as attached to SCORM 2004 items and organizations.
//!
//! The parser captures these rules; it does not evaluate them. Defaults
//! follow the IMS SS information model: where an attribute is omitted the
//! field carries the schema default, so a deserialized tree is directly
//! comparable against one built in code.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString, IntoStaticStr};

/// An `<imsss:sequencing>` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequencing {
    /// `ID` attribute, referenced by `IDRef` from other sequencing blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_mode: Option<ControlMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequencing_rules: Option<SequencingRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_conditions: Option<LimitConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_rules: Option<RollupRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Objectives>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomization_controls: Option<RandomizationControls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_controls: Option<DeliveryControls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_considerations: Option<RollupConsiderations>,
}

impl Sequencing {
    /// True when the block declares at least one rollup rule.
    pub fn has_rollup_rules(&self) -> bool {
        self.rollup_rules
            .as_ref()
            .map(|r| !r.rules.is_empty())
            .unwrap_or(false)
    }

    /// True when any objective maps onto a shared global objective.
    pub fn has_objective_mappings(&self) -> bool {
        let Some(objectives) = self.objectives.as_ref() else {
            return false;
        };
        objectives
            .primary_objective
            .iter()
            .chain(objectives.objectives.iter())
            .any(|o| !o.mappings.is_empty())
    }
}

/// `<imsss:controlMode>` flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlMode {
    #[serde(default = "default_true")]
    pub choice: bool,
    #[serde(default = "default_true")]
    pub choice_exit: bool,
    #[serde(default)]
    pub flow: bool,
    #[serde(default)]
    pub forward_only: bool,
    #[serde(default = "default_true")]
    pub use_current_attempt_objective_info: bool,
    #[serde(default = "default_true")]
    pub use_current_attempt_progress_info: bool,
}

impl Default for ControlMode {
    fn default() -> Self {
        ControlMode {
            choice: true,
            choice_exit: true,
            flow: false,
            forward_only: false,
            use_current_attempt_objective_info: true,
            use_current_attempt_progress_info: true,
        }
    }
}

/// `<imsss:sequencingRules>`: the three rule sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencingRules {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_condition_rules: Vec<SequencingRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_condition_rules: Vec<SequencingRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exit_condition_rules: Vec<SequencingRule>,
}

impl SequencingRules {
    pub fn is_empty(&self) -> bool {
        self.pre_condition_rules.is_empty()
            && self.post_condition_rules.is_empty()
            && self.exit_condition_rules.is_empty()
    }
}

/// One pre/post/exit condition rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencingRule {
    #[serde(default)]
    pub conditions: RuleConditions,
    pub action: RuleAction,
}

/// `<imsss:ruleConditions>`: a combinator plus individual conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConditions {
    #[serde(default)]
    pub condition_combination: ConditionCombination,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<RuleCondition>,
}

/// How multiple conditions combine.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum ConditionCombination {
    #[default]
    All,
    Any,
}

/// One `<imsss:ruleCondition>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_threshold: Option<f64>,
    #[serde(default)]
    pub operator: ConditionOperator,
    #[serde(default)]
    pub condition: SequencingRuleCondition,
}

/// The `operator` attribute on rule and rollup conditions.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum ConditionOperator {
    #[default]
    NoOp,
    Not,
}

/// The condition vocabulary for sequencing rules.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum SequencingRuleCondition {
    Satisfied,
    ObjectiveStatusKnown,
    ObjectiveMeasureKnown,
    ObjectiveMeasureGreaterThan,
    ObjectiveMeasureLessThan,
    Completed,
    ActivityProgressKnown,
    Attempted,
    AttemptLimitExceeded,
    TimeLimitExceeded,
    OutsideAvailableTimeRange,
    #[default]
    Always,
}

/// The action vocabulary across pre, post, and exit rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum RuleAction {
    // Pre-condition actions.
    Skip,
    Disabled,
    HiddenFromChoice,
    StopForwardTraversal,
    // Post-condition actions.
    ExitParent,
    ExitAll,
    Retry,
    RetryAll,
    #[strum(serialize = "continue")]
    #[serde(rename = "continue")]
    Continue,
    Previous,
    // Exit-condition action.
    Exit,
}

/// `<imsss:limitConditions>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitConditions {
    /// `xs:nonNegativeInteger`; arbitrary precision by contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_limit: Option<BigUint>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub attempt_absolute_duration_limit: Option<Duration>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub attempt_experienced_duration_limit: Option<Duration>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_absolute_duration_limit: Option<Duration>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_experienced_duration_limit: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_time_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time_limit: Option<String>,
}

/// `<imsss:rollupRules>` with its container-level attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupRules {
    #[serde(default = "default_true")]
    pub rollup_objective_satisfied: bool,
    #[serde(default = "default_true")]
    pub rollup_progress_completion: bool,
    #[serde(default = "default_weight")]
    pub objective_measure_weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RollupRule>,
}

impl Default for RollupRules {
    fn default() -> Self {
        RollupRules {
            rollup_objective_satisfied: true,
            rollup_progress_completion: true,
            objective_measure_weight: 1.0,
            rules: Vec::new(),
        }
    }
}

/// One `<imsss:rollupRule>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupRule {
    #[serde(default)]
    pub child_activity_set: ChildActivitySet,
    /// Minimum for `at_least_count`; `xs:nonNegativeInteger`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_count: Option<BigUint>,
    /// Minimum for `at_least_percent`, in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_percent: Option<f64>,
    #[serde(default)]
    pub conditions: RollupConditions,
    pub action: RollupAction,
}

/// Which child activities a rollup rule considers.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum ChildActivitySet {
    #[default]
    All,
    Any,
    None,
    AtLeastCount,
    AtLeastPercent,
}

/// `<imsss:rollupConditions>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupConditions {
    #[serde(default)]
    pub condition_combination: ConditionCombination,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<RollupCondition>,
}

/// One `<imsss:rollupCondition>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupCondition {
    #[serde(default)]
    pub operator: ConditionOperator,
    #[serde(default)]
    pub condition: RollupRuleCondition,
}

/// The condition vocabulary for rollup rules.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum RollupRuleCondition {
    #[default]
    Satisfied,
    ObjectiveStatusKnown,
    ObjectiveMeasureKnown,
    Completed,
    ActivityProgressKnown,
    Attempted,
    AttemptLimitExceeded,
    TimeLimitExceeded,
    OutsideAvailableTimeRange,
}

/// The rollup action vocabulary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum RollupAction {
    Satisfied,
    NotSatisfied,
    Completed,
    Incomplete,
}

/// `<imsss:objectives>`: one primary plus any number of additional
/// objectives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objectives {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_objective: Option<Objective>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<Objective>,
}

/// A single objective with its global mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub satisfied_by_measure: bool,
    #[serde(default = "default_measure")]
    pub minimum_normalized_measure: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ObjectiveMapping>,
}

impl Default for Objective {
    fn default() -> Self {
        Objective {
            id: None,
            satisfied_by_measure: false,
            minimum_normalized_measure: 1.0,
            mappings: Vec::new(),
        }
    }
}

/// `<imsss:mapInfo>`: the binding between a local objective and a shared
/// global objective, with per-field read/write permissions. Reads default to
/// permitted, writes to denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveMapping {
    pub target_objective_id: String,
    #[serde(default = "default_true")]
    pub read_satisfied_status: bool,
    #[serde(default = "default_true")]
    pub read_normalized_measure: bool,
    #[serde(default = "default_true")]
    pub read_completion_status: bool,
    #[serde(default = "default_true")]
    pub read_progress_measure: bool,
    #[serde(default)]
    pub write_satisfied_status: bool,
    #[serde(default)]
    pub write_normalized_measure: bool,
    #[serde(default)]
    pub write_completion_status: bool,
    #[serde(default)]
    pub write_progress_measure: bool,
}

impl ObjectiveMapping {
    pub fn new(target_objective_id: impl Into<String>) -> Self {
        ObjectiveMapping {
            target_objective_id: target_objective_id.into(),
            read_satisfied_status: true,
            read_normalized_measure: true,
            read_completion_status: true,
            read_progress_measure: true,
            write_satisfied_status: false,
            write_normalized_measure: false,
            write_completion_status: false,
            write_progress_measure: false,
        }
    }
}

/// `<imsss:randomizationControls>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomizationControls {
    #[serde(default)]
    pub randomization_timing: RandomizationTiming,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_count: Option<BigUint>,
    #[serde(default)]
    pub reorder_children: bool,
    #[serde(default)]
    pub selection_timing: RandomizationTiming,
}

/// When selection/randomization happens.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum RandomizationTiming {
    #[default]
    Never,
    Once,
    OnEachNewAttempt,
}

/// `<imsss:deliveryControls>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryControls {
    #[serde(default = "default_true")]
    pub tracked: bool,
    #[serde(default)]
    pub completion_set_by_content: bool,
    #[serde(default)]
    pub objective_set_by_content: bool,
}

impl Default for DeliveryControls {
    fn default() -> Self {
        DeliveryControls {
            tracked: true,
            completion_set_by_content: false,
            objective_set_by_content: false,
        }
    }
}

/// `<adlseq:rollupConsiderations>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupConsiderations {
    #[serde(default)]
    pub required_for_satisfied: RollupConsideration,
    #[serde(default)]
    pub required_for_not_satisfied: RollupConsideration,
    #[serde(default)]
    pub required_for_completed: RollupConsideration,
    #[serde(default)]
    pub required_for_incomplete: RollupConsideration,
    #[serde(default = "default_true")]
    pub measure_satisfaction_if_active: bool,
}

impl Default for RollupConsiderations {
    fn default() -> Self {
        RollupConsiderations {
            required_for_satisfied: RollupConsideration::default(),
            required_for_not_satisfied: RollupConsideration::default(),
            required_for_completed: RollupConsideration::default(),
            required_for_incomplete: RollupConsideration::default(),
            measure_satisfaction_if_active: true,
        }
    }
}

/// When a child is required to contribute to rollup.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum RollupConsideration {
    #[default]
    Always,
    IfAttempted,
    IfNotSkipped,
    IfNotSuspended,
}

fn default_true() -> bool {
    true
}

fn default_weight() -> f64 {
    1.0
}

fn default_measure() -> f64 {
    1.0
}

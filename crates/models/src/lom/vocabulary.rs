//! Controlled vocabularies of IEEE 1484.12.1 (LOMv1.0).
//!
//! Every enum here accepts its canonical spelling case-insensitively.
//! Authoring tools routinely invent tokens outside the declared set, so most
//! vocabularies carry an `Unknown` sentinel that parse sites map unmatched
//! values onto (with a warning). `YesNo` deliberately has no sentinel: a
//! value outside its set is a parse-level anomaly, not an extension.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

/// Vocabularies that admit out-of-vocabulary tokens via a sentinel variant.
pub trait UnknownSentinel {
    const UNKNOWN: Self;
}

macro_rules! unknown_sentinel {
    ($($t:ty),* $(,)?) => {
        $(impl UnknownSentinel for $t {
            const UNKNOWN: Self = Self::Unknown;
        })*
    };
}

/// 1.7 general/structure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Structure {
    Atomic,
    Collection,
    Networked,
    Hierarchical,
    Linear,
    #[strum(disabled)]
    Unknown,
}

/// 1.8 general/aggregationLevel, the values `1` through `4`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum AggregationLevel {
    #[strum(serialize = "1")]
    Level1,
    #[strum(serialize = "2")]
    Level2,
    #[strum(serialize = "3")]
    Level3,
    #[strum(serialize = "4")]
    Level4,
    #[strum(disabled)]
    Unknown,
}

/// 2.2 lifeCycle/status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Status {
    Draft,
    Final,
    Revised,
    Unavailable,
    #[strum(disabled)]
    Unknown,
}

/// 2.3.1 lifeCycle/contribute/role. Note that `unknown` is itself a declared
/// LOMv1.0 token here, so the sentinel doubles as a legitimate value.
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
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Role {
    Author,
    Publisher,
    Initiator,
    Terminator,
    Validator,
    Editor,
    #[strum(serialize = "graphical designer", serialize = "graphicaldesigner")]
    GraphicalDesigner,
    #[strum(serialize = "technical implementer", serialize = "technicalimplementer")]
    TechnicalImplementer,
    #[strum(serialize = "content provider", serialize = "contentprovider")]
    ContentProvider,
    #[strum(serialize = "technical validator", serialize = "technicalvalidator")]
    TechnicalValidator,
    #[strum(serialize = "educational validator", serialize = "educationalvalidator")]
    EducationalValidator,
    #[strum(serialize = "script writer", serialize = "scriptwriter")]
    ScriptWriter,
    #[strum(serialize = "instructional designer", serialize = "instructionaldesigner")]
    InstructionalDesigner,
    #[strum(serialize = "subject matter expert", serialize = "subjectmatterexpert")]
    SubjectMatterExpert,
    #[default]
    Unknown,
}

/// 3.2.1 metaMetadata/contribute/role.
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
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum MetaRole {
    Creator,
    Validator,
    #[strum(disabled)]
    #[default]
    Unknown,
}

/// 4.4.1.1 technical/requirement/orComposite/type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum RequirementType {
    #[strum(serialize = "operating system", serialize = "operatingsystem")]
    OperatingSystem,
    #[strum(serialize = "browser")]
    Browser,
    #[strum(disabled)]
    Unknown,
}

/// 4.4.1.2 technical/requirement/orComposite/name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum RequirementName {
    #[strum(serialize = "pc-dos", serialize = "pcdos")]
    PcDos,
    #[strum(serialize = "ms-windows", serialize = "mswindows")]
    MsWindows,
    #[strum(serialize = "macos")]
    MacOs,
    #[strum(serialize = "unix")]
    Unix,
    #[strum(serialize = "multi-os", serialize = "multios")]
    MultiOs,
    #[strum(serialize = "none")]
    None,
    #[strum(serialize = "any")]
    Any,
    #[strum(serialize = "netscape communicator", serialize = "netscapecommunicator")]
    NetscapeCommunicator,
    #[strum(serialize = "ms-internet explorer", serialize = "msinternetexplorer")]
    MsInternetExplorer,
    #[strum(serialize = "opera")]
    Opera,
    #[strum(serialize = "amaya")]
    Amaya,
    #[strum(disabled)]
    Unknown,
}

/// 5.1 educational/interactivityType.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum InteractivityType {
    Active,
    Expositive,
    Mixed,
    #[strum(disabled)]
    Unknown,
}

/// 5.2 educational/learningResourceType.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum LearningResourceType {
    Exercise,
    Simulation,
    Questionnaire,
    Diagram,
    Figure,
    Graph,
    Index,
    Slide,
    Table,
    #[strum(serialize = "narrative text", serialize = "narrativetext")]
    NarrativeText,
    Exam,
    Experiment,
    #[strum(serialize = "problem statement", serialize = "problemstatement")]
    ProblemStatement,
    #[strum(serialize = "self assessment", serialize = "selfassessment")]
    SelfAssessment,
    Lecture,
    #[strum(disabled)]
    Unknown,
}

/// The very-low-to-very-high scale shared by 5.3 interactivityLevel and
/// 5.4 semanticDensity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum LevelScale {
    #[strum(serialize = "very low", serialize = "verylow")]
    VeryLow,
    #[strum(serialize = "low")]
    Low,
    #[strum(serialize = "medium")]
    Medium,
    #[strum(serialize = "high")]
    High,
    #[strum(serialize = "very high", serialize = "veryhigh")]
    VeryHigh,
    #[strum(disabled)]
    Unknown,
}

/// 5.5 educational/intendedEndUserRole.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum IntendedEndUserRole {
    Teacher,
    Author,
    Learner,
    Manager,
    #[strum(disabled)]
    Unknown,
}

/// 5.6 educational/context.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum Context {
    #[strum(serialize = "school")]
    School,
    #[strum(serialize = "higher education", serialize = "highereducation")]
    HigherEducation,
    #[strum(serialize = "training")]
    Training,
    #[strum(serialize = "other")]
    Other,
    #[strum(disabled)]
    Unknown,
}

/// 5.8 educational/difficulty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[strum(serialize = "very easy", serialize = "veryeasy")]
    VeryEasy,
    #[strum(serialize = "easy")]
    Easy,
    #[strum(serialize = "medium")]
    Medium,
    #[strum(serialize = "difficult")]
    Difficult,
    #[strum(serialize = "very difficult", serialize = "verydifficult")]
    VeryDifficult,
    #[strum(disabled)]
    Unknown,
}

/// 9.1 classification/purpose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum Purpose {
    #[strum(serialize = "discipline")]
    Discipline,
    #[strum(serialize = "idea")]
    Idea,
    #[strum(serialize = "prerequisite")]
    Prerequisite,
    #[strum(serialize = "educational objective", serialize = "educationalobjective")]
    EducationalObjective,
    #[strum(
        serialize = "accessibility restrictions",
        serialize = "accessibilityrestrictions"
    )]
    AccessibilityRestrictions,
    #[strum(serialize = "educational level", serialize = "educationallevel")]
    EducationalLevel,
    #[strum(serialize = "skill level", serialize = "skilllevel")]
    SkillLevel,
    #[strum(serialize = "security level", serialize = "securitylevel")]
    SecurityLevel,
    #[strum(serialize = "competency")]
    Competency,
    #[strum(disabled)]
    Unknown,
}

/// 7.1 relation/kind. Tokens are Dublin Core style, written lowercase and
/// unhyphenated in LOMv1.0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum RelationKind {
    #[strum(serialize = "ispartof")]
    IsPartOf,
    #[strum(serialize = "haspart")]
    HasPart,
    #[strum(serialize = "isversionof")]
    IsVersionOf,
    #[strum(serialize = "hasversion")]
    HasVersion,
    #[strum(serialize = "isformatof")]
    IsFormatOf,
    #[strum(serialize = "hasformat")]
    HasFormat,
    #[strum(serialize = "references")]
    References,
    #[strum(serialize = "isreferencedby")]
    IsReferencedBy,
    #[strum(serialize = "isbasedon")]
    IsBasedOn,
    #[strum(serialize = "isbasisfor")]
    IsBasisFor,
    #[strum(serialize = "requires")]
    Requires,
    #[strum(serialize = "isrequiredby")]
    IsRequiredBy,
    #[strum(disabled)]
    Unknown,
}

/// The two-valued vocabulary behind 6.1 rights/cost and
/// 6.2 copyrightAndOtherRestrictions. Accepts boolean spellings as well;
/// anything else is a hard parse failure rather than `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl FromStr for YesNo {
    type Err = UnrecognizedToken;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Ok(YesNo::Yes),
            "no" | "false" | "0" => Ok(YesNo::No),
            _ => Err(UnrecognizedToken(raw.to_string())),
        }
    }
}

/// Returned when a closed vocabulary without a sentinel rejects a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized vocabulary token: '{0}'")]
pub struct UnrecognizedToken(pub String);

unknown_sentinel!(
    Structure,
    AggregationLevel,
    Status,
    Role,
    MetaRole,
    RequirementType,
    RequirementName,
    InteractivityType,
    LearningResourceType,
    LevelScale,
    IntendedEndUserRole,
    Context,
    Difficulty,
    Purpose,
    RelationKind,
);

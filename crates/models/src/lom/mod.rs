//! IEEE Learning Object Metadata (IEEE 1484.12.1).
//!
//! The nine top-level groups, their nested records, and the LOMv1.0
//! controlled vocabularies. SCORM packages attach LOM trees to the manifest,
//! to organizations and items, and to resources and individual files, either
//! inline or through an external file reference.

mod vocabulary;

pub use self::vocabulary::{
    AggregationLevel, Context, Difficulty, IntendedEndUserRole, InteractivityType,
    LearningResourceType, LevelScale, MetaRole, Purpose, RelationKind, RequirementName,
    RequirementType, Role, Status, Structure, UnknownSentinel, UnrecognizedToken, YesNo,
};

use crate::lang::{LangString, SingleLangString, SourceValuePair, UnboundLangString};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A complete LOM instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lom {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub lifecycle: Lifecycle,
    #[serde(default)]
    pub meta_metadata: MetaMetadata,
    #[serde(default)]
    pub technical: Technical,
    #[serde(default)]
    pub educational: Educational,
    #[serde(default)]
    pub rights: Rights,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifications: Vec<Classification>,
}

impl Lom {
    /// First general title string, if any.
    pub fn title(&self) -> Option<&str> {
        self.general
            .title
            .as_ref()
            .map(|t| t.value.as_str())
            .filter(|t| !t.is_empty())
    }

    /// First general description string, if any.
    pub fn description(&self) -> Option<&str> {
        self.general
            .descriptions
            .first()
            .map(|d| d.value.as_str())
            .filter(|d| !d.is_empty())
    }

    /// Declared technical duration, zero when absent.
    pub fn duration(&self) -> Duration {
        self.technical
            .duration
            .as_ref()
            .map(|d| d.duration)
            .unwrap_or(Duration::ZERO)
    }
}

/// A catalog/entry identifier, used in `general` and `metaMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LomIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

/// Group 1: general.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct General {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<LomIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<SingleLangString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<SingleLangString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coverage: UnboundLangString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<SourceValuePair<Structure>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_level: Option<SourceValuePair<AggregationLevel>>,
}

/// Group 2: lifeCycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<SingleLangString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SourceValuePair<Status>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Contribute<Role>>,
}

/// A contribute entry; `R` is the role vocabulary, which differs between
/// `lifeCycle` and `metaMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribute<R> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SourceValuePair<R>>,
    /// vCard blocks, one per entity element, kept verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<LomDate>,
}

/// Group 3: metaMetadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<LomIdentifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Contribute<MetaRole>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata_schemas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Group 4: technical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
    /// Size in bytes; `xs:nonNegativeInteger`, so arbitrary precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<BigUint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<Requirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_remarks: Option<SingleLangString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_platform_requirements: Option<SingleLangString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<LomDuration>,
}

/// 4.4 technical/requirement: a disjunction of alternatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub or_composites: Vec<OrComposite>,
}

/// 4.4.1 one alternative within a requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrComposite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceValuePair<RequirementType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SourceValuePair<RequirementName>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_version: Option<String>,
}

/// Group 5: educational.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Educational {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactivity_type: Option<SourceValuePair<InteractivityType>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_resource_types: Vec<SourceValuePair<LearningResourceType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactivity_level: Option<SourceValuePair<LevelScale>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_density: Option<SourceValuePair<LevelScale>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intended_end_user_roles: Vec<SourceValuePair<IntendedEndUserRole>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<SourceValuePair<Context>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub typical_age_ranges: UnboundLangString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<SourceValuePair<Difficulty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_learning_time: Option<LomDuration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

/// Group 6: rights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<SourceValuePair<YesNo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright_and_other_restrictions: Option<SourceValuePair<YesNo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SingleLangString>,
}

/// Group 7: relation (repeatable).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceValuePair<RelationKind>>,
    #[serde(default)]
    pub resource: RelationResource,
}

/// 7.2 relation/resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationResource {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<LomIdentifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: UnboundLangString,
}

/// Group 8: annotation (repeatable).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<LomDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SingleLangString>,
}

/// Group 9: classification (repeatable).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<SourceValuePair<Purpose>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxon_paths: Vec<TaxonPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SingleLangString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<SingleLangString>,
}

/// 9.2 classification/taxonPath.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SingleLangString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxons: Vec<Taxon>,
}

/// 9.2.2 one node on a taxon path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<SingleLangString>,
}

/// A dateTime leaf: the machine-readable value plus an optional description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LomDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SingleLangString>,
}

/// A duration leaf: an ISO-8601 span plus an optional description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LomDuration {
    #[serde(default, with = "humantime_serde")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SingleLangString>,
}

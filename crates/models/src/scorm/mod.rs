//! IMS Content Packaging trees as used by the SCORM family, plus the ADL
//! extensions and the IMS Simple Sequencing model.
//!
//! One tree type serves both SCORM editions; [`ScormEdition`] keeps
//! `module_kind` honest. Items reference resources by string identifier and
//! are resolved through [`Resources::by_identifier`], whose index is built
//! once after parsing completes.

pub mod adl;
pub mod sequencing;

pub use self::adl::{
    CompletionThreshold, DataMap, HideLmsUi, NavigationInterface, Presentation, TimeLimitAction,
};
pub use self::sequencing::Sequencing;

use crate::lom::Lom;
use crate::manifest::PackageManifest;
use crate::metadata::ModuleKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use strum::{Display, EnumString, IntoStaticStr};

/// Which SCORM edition a content-packaging tree was parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScormEdition {
    #[serde(rename = "1.2")]
    V1_2,
    #[serde(rename = "2004")]
    V2004,
}

/// A parsed `imsmanifest.xml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScormManifest {
    pub edition: ScormEdition,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataElement>,
    #[serde(default)]
    pub organizations: Organizations,
    #[serde(default)]
    pub resources: Resources,
    /// Vendor-specific attributes found on the manifest root, keyed by their
    /// qualified name. Kept verbatim for downstream consumers.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl ScormManifest {
    /// Walks default organization → first launchable item → referenced
    /// resource, composing `xml:base` prefixes along the way.
    pub fn resolve_launch_url(&self) -> Option<String> {
        let organization = self.organizations.default_organization()?;
        let item = organization.first_launchable_item()?;
        let reference = item.identifier_ref.as_deref()?;
        let resource = self.resources.by_identifier(reference)?;
        let href = resource.href.as_deref().filter(|h| !h.is_empty())?;
        Some(join_relative(
            [
                self.xml_base.as_deref(),
                self.resources.xml_base.as_deref(),
                resource.xml_base.as_deref(),
            ],
            href,
        ))
    }

    /// Every sequencing block in the organization trees, in document order.
    pub fn sequencing_blocks(&self) -> Vec<&Sequencing> {
        let mut blocks = Vec::new();
        for organization in &self.organizations.organizations {
            if let Some(s) = organization.sequencing.as_ref() {
                blocks.push(s);
            }
            for item in &organization.items {
                item.collect_sequencing(&mut blocks);
            }
        }
        blocks
    }
}

impl PackageManifest for ScormManifest {
    fn module_kind(&self) -> ModuleKind {
        match self.edition {
            ScormEdition::V1_2 => ModuleKind::Scorm12,
            ScormEdition::V2004 => ModuleKind::Scorm2004,
        }
    }

    fn title(&self) -> &str {
        self.organizations
            .default_organization()
            .map(|o| o.title.as_str())
            .filter(|t| !t.is_empty())
            .or_else(|| self.metadata.as_ref().and_then(|m| m.lom.as_ref()?.title()))
            .unwrap_or("")
    }

    fn description(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.lom.as_ref()?.description())
            .unwrap_or("")
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn version(&self) -> &str {
        self.version.as_deref().unwrap_or("")
    }

    fn launch_url(&self) -> Option<String> {
        self.resolve_launch_url()
    }

    fn duration(&self) -> Duration {
        self.metadata
            .as_ref()
            .and_then(|m| m.lom.as_ref())
            .map(|l| l.duration())
            .unwrap_or(Duration::ZERO)
    }
}

/// A `<metadata>` element: schema declaration plus LOM, inline or loaded
/// from the external file named by `adlcp:location`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Relative path of an external metadata file, when referenced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lom: Option<Lom>,
}

/// The `<organizations>` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizations {
    /// The `default` attribute. Real packages typo this; resolution falls
    /// back to the first organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Organization>,
}

impl Organizations {
    /// The organization named by `default`, or the first one when the
    /// reference does not resolve.
    pub fn default_organization(&self) -> Option<&Organization> {
        self.default
            .as_deref()
            .and_then(|id| self.by_identifier(id))
            .or_else(|| self.organizations.first())
    }

    pub fn by_identifier(&self, identifier: &str) -> Option<&Organization> {
        self.organizations
            .iter()
            .find(|o| o.identifier == identifier)
    }
}

/// One `<organization>`: an identifier, a title, and an item tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub identifier: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequencing: Option<Sequencing>,
}

impl Organization {
    /// Depth-first search for the first item carrying an `identifierref`.
    pub fn first_launchable_item(&self) -> Option<&Item> {
        fn walk(items: &[Item]) -> Option<&Item> {
            for item in items {
                if item.identifier_ref.is_some() {
                    return Some(item);
                }
                if let Some(found) = walk(&item.items) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.items)
    }
}

/// One `<item>`, recursive to unbounded depth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_ref: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataElement>,
    /// SCORM 2004 only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequencing: Option<Sequencing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_action: Option<TimeLimitAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_from_lms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_threshold: Option<CompletionThreshold>,
    /// `adlcp:data` shared-data maps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<Presentation>,
    /// SCORM 1.2 `adlcp:prerequisites` expression, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<String>,
    /// SCORM 1.2 `adlcp:maxtimeallowed`, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time_allowed: Option<String>,
    /// SCORM 1.2 `adlcp:masteryscore`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_score: Option<f64>,
}

impl Item {
    fn collect_sequencing<'a>(&'a self, blocks: &mut Vec<&'a Sequencing>) {
        if let Some(s) = self.sequencing.as_ref() {
            blocks.push(s);
        }
        for child in &self.items {
            child.collect_sequencing(blocks);
        }
    }
}

/// The `<resources>` container with its identifier index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_base: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(skip)]
    index: BTreeMap<String, usize>,
}

/// The index is a derived cache, not manifest content; equality ignores it
/// so a freshly parsed container compares equal to a hand-built one.
impl PartialEq for Resources {
    fn eq(&self, other: &Self) -> bool {
        self.xml_base == other.xml_base && self.resources == other.resources
    }
}

impl Resources {
    pub fn new(xml_base: Option<String>, resources: Vec<Resource>) -> Self {
        Resources {
            xml_base,
            resources,
            index: BTreeMap::new(),
        }
    }

    /// Rebuilds the identifier index. Called once when parsing finishes;
    /// lookups fall back to a scan if it was never built.
    pub fn rebuild_index(&mut self) {
        self.index = self
            .resources
            .iter()
            .enumerate()
            .map(|(position, r)| (r.identifier.clone(), position))
            .collect();
    }

    pub fn by_identifier(&self, identifier: &str) -> Option<&Resource> {
        if self.index.is_empty() {
            self.resources.iter().find(|r| r.identifier == identifier)
        } else {
            self.index
                .get(identifier)
                .and_then(|&position| self.resources.get(position))
        }
    }

    /// Every file href in the container, for existence probing.
    pub fn file_hrefs(&self) -> Vec<String> {
        self.resources
            .iter()
            .flat_map(|r| r.files.iter().map(|f| f.href.clone()))
            .collect()
    }
}

/// One `<resource>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub identifier: String,
    /// The `type` attribute, conventionally `webcontent`.
    #[serde(default)]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorm_type: Option<ScormType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

/// `adlcp:scormType` (`scormtype` in 1.2).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ScormType {
    Sco,
    Asset,
}

/// One `<file>` entry. `exists` is the only model field populated after
/// construction: the parser fills it from a batched existence probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

/// A `<dependency>` pointer to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub identifier_ref: String,
}

/// Joins `xml:base` prefixes with an href, collapsing duplicate slashes at
/// the seams.
pub fn join_relative<'a>(bases: impl IntoIterator<Item = Option<&'a str>>, href: &str) -> String {
    let mut joined = String::new();
    for base in bases.into_iter().flatten() {
        if base.is_empty() {
            continue;
        }
        if !joined.is_empty() && !joined.ends_with('/') {
            joined.push('/');
        }
        joined.push_str(base.trim_start_matches('/'));
    }
    if joined.is_empty() {
        return href.to_string();
    }
    if !joined.ends_with('/') {
        joined.push('/');
    }
    joined.push_str(href.trim_start_matches('/'));
    joined
}

fn default_true() -> bool {
    true
}

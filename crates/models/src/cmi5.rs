//! The cmi5 course structure (`cmi5.xml`). cmi5 is an xAPI profile, so a
//! cmi5 package is xAPI-enabled by definition.

use crate::lang::UnboundLangString;
use crate::manifest::PackageManifest;
use crate::metadata::ModuleKind;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// A parsed `cmi5.xml` course structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cmi5Manifest {
    pub course: Cmi5Course,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<Cmi5Objective>,
    /// Blocks and assignable units in document order. The schema lets the
    /// two interleave freely as siblings, and AU ordering is significant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Cmi5Child>,
}

impl Cmi5Manifest {
    /// The first assignable unit in document order, descending into blocks
    /// as they are encountered.
    pub fn first_assignable_unit(&self) -> Option<&AssignableUnit> {
        first_assignable_unit(&self.children)
    }
}

fn first_assignable_unit(children: &[Cmi5Child]) -> Option<&AssignableUnit> {
    for child in children {
        match child {
            Cmi5Child::AssignableUnit(au) => return Some(au),
            Cmi5Child::Block(block) => {
                if let Some(au) = first_assignable_unit(&block.children) {
                    return Some(au);
                }
            }
        }
    }
    None
}

impl PackageManifest for Cmi5Manifest {
    fn module_kind(&self) -> ModuleKind {
        ModuleKind::Cmi5
    }

    fn title(&self) -> &str {
        self.course
            .title
            .first()
            .map(|t| t.value.as_str())
            .unwrap_or("")
    }

    fn description(&self) -> &str {
        self.course
            .description
            .first()
            .map(|d| d.value.as_str())
            .unwrap_or("")
    }

    fn identifier(&self) -> &str {
        &self.course.id
    }

    fn version(&self) -> &str {
        ""
    }

    fn launch_url(&self) -> Option<String> {
        self.first_assignable_unit()
            .map(|au| au.url.clone())
            .filter(|u| !u.is_empty())
    }
}

/// The `<course>` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cmi5Course {
    /// The course activity IRI.
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: UnboundLangString,
}

/// A shared `<objective>` declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cmi5Objective {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: UnboundLangString,
}

/// One child of the course structure root or of a `<block>`: the schema is
/// a repeatable choice of the two, so relative order is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cmi5Child {
    Block(Block),
    AssignableUnit(AssignableUnit),
}

/// A `<block>` grouping, recursive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Cmi5Child>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objective_refs: Vec<String>,
}

/// An `<au>`: the LMS-tracked unit of launchable content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignableUnit {
    /// The AU activity IRI.
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: UnboundLangString,
    /// The launch URL, relative to the package root or absolute.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub launch_method: LaunchMethod,
    #[serde(default)]
    pub move_on: MoveOn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitlement_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objective_refs: Vec<String>,
}

/// The `launchMethod` attribute.
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
#[strum(ascii_case_insensitive, serialize_all = "PascalCase")]
pub enum LaunchMethod {
    #[default]
    AnyWindow,
    OwnWindow,
}

/// The `moveOn` criterion: when the LMS may consider the AU finished.
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
#[strum(ascii_case_insensitive, serialize_all = "PascalCase")]
pub enum MoveOn {
    #[default]
    NotApplicable,
    Passed,
    Completed,
    CompletedAndPassed,
    CompletedOrPassed,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lang::LangString;

    fn au(id: &str, url: &str) -> AssignableUnit {
        AssignableUnit {
            id: id.to_string(),
            url: url.to_string(),
            ..Default::default()
        }
    }

    fn manifest_with(children: Vec<Cmi5Child>) -> Cmi5Manifest {
        Cmi5Manifest {
            course: Cmi5Course {
                id: "https://example.com/course".to_string(),
                title: vec![LangString::tagged("en-US", "T")],
                ..Default::default()
            },
            objectives: Vec::new(),
            children,
        }
    }

    #[test]
    fn first_au_descends_into_a_leading_block() {
        let manifest = manifest_with(vec![
            Cmi5Child::Block(Block {
                id: "b1".to_string(),
                children: vec![Cmi5Child::AssignableUnit(au("au-nested", "nested.html"))],
                ..Default::default()
            }),
            Cmi5Child::AssignableUnit(au("au-top", "top.html")),
        ]);
        assert_eq!(
            "au-nested",
            manifest.first_assignable_unit().unwrap().id.as_str()
        );
        assert_eq!(Some("nested.html".to_string()), manifest.launch_url());
    }

    #[test]
    fn document_order_wins_when_an_au_precedes_a_block() {
        let manifest = manifest_with(vec![
            Cmi5Child::AssignableUnit(au("au-top", "top.html")),
            Cmi5Child::Block(Block {
                id: "b1".to_string(),
                children: vec![Cmi5Child::AssignableUnit(au("au-nested", "nested.html"))],
                ..Default::default()
            }),
        ]);
        assert_eq!(
            "au-top",
            manifest.first_assignable_unit().unwrap().id.as_str()
        );
        assert_eq!(Some("top.html".to_string()), manifest.launch_url());
    }

    #[test]
    fn empty_blocks_are_skipped() {
        let manifest = manifest_with(vec![
            Cmi5Child::Block(Block {
                id: "empty".to_string(),
                ..Default::default()
            }),
            Cmi5Child::AssignableUnit(au("au-1", "one.html")),
        ]);
        assert_eq!(
            "au-1",
            manifest.first_assignable_unit().unwrap().id.as_str()
        );
    }
}

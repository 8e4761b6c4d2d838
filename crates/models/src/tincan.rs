//! The TinCan packaging manifest (`tincan.xml`): a flat activity
//! collection, one of which describes the course itself.

use crate::lang::UnboundLangString;
use crate::manifest::PackageManifest;
use crate::metadata::ModuleKind;
use serde::{Deserialize, Serialize};

/// A parsed `tincan.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TincanManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<Activity>,
}

impl TincanManifest {
    /// The activity that stands for the whole course: the first whose type
    /// IRI ends in `course`, or the first activity when none declares it.
    pub fn course_activity(&self) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|a| a.is_course())
            .or_else(|| self.activities.first())
    }
}

impl PackageManifest for TincanManifest {
    fn module_kind(&self) -> ModuleKind {
        ModuleKind::Xapi
    }

    fn title(&self) -> &str {
        self.course_activity()
            .and_then(|a| a.names.first())
            .map(|n| n.value.as_str())
            .unwrap_or("")
    }

    fn description(&self) -> &str {
        self.course_activity()
            .and_then(|a| a.descriptions.first())
            .map(|d| d.value.as_str())
            .unwrap_or("")
    }

    fn identifier(&self) -> &str {
        self.course_activity().map(|a| a.id.as_str()).unwrap_or("")
    }

    fn version(&self) -> &str {
        ""
    }

    fn launch_url(&self) -> Option<String> {
        self.course_activity()
            .and_then(|a| a.launch.as_deref())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
    }
}

/// One `<activity>` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    /// The activity type IRI, e.g.
    /// `http://adlnet.gov/expapi/activities/course`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: UnboundLangString,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: UnboundLangString,
    /// Relative launch path, when the activity is launchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch: Option<String>,
}

impl Activity {
    pub fn is_course(&self) -> bool {
        self.activity_type
            .as_deref()
            .map(|t| {
                t.rsplit('/')
                    .next()
                    .is_some_and(|tail| tail.eq_ignore_ascii_case("course"))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lang::LangString;

    #[test]
    fn course_typed_activity_wins_over_document_order() {
        let manifest = TincanManifest {
            activities: vec![
                Activity {
                    id: "a1".to_string(),
                    activity_type: Some("http://adlnet.gov/expapi/activities/module".to_string()),
                    ..Default::default()
                },
                Activity {
                    id: "a2".to_string(),
                    activity_type: Some("http://adlnet.gov/expapi/activities/course".to_string()),
                    names: vec![LangString::new("The Course")],
                    launch: Some("index.html".to_string()),
                    ..Default::default()
                },
            ],
        };
        assert_eq!("a2", manifest.course_activity().unwrap().id.as_str());
        assert_eq!("The Course", manifest.title());
    }

    #[test]
    fn first_activity_is_the_fallback() {
        let manifest = TincanManifest {
            activities: vec![Activity {
                id: "only".to_string(),
                ..Default::default()
            }],
        };
        assert_eq!("only", manifest.course_activity().unwrap().id.as_str());
    }
}

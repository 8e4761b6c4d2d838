//! Language-tagged string shapes shared across LOM, cmi5 and TinCan trees.

use serde::{Deserialize, Serialize};

/// A string with an optional language tag, e.g. `("en-US", "Golf Basics")`.
/// Most LOM leaves are language-tagged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LangString {
    /// BCP 47 tag as written in the source document. Authoring tools omit it
    /// often enough that it cannot be required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub value: String,
}

impl LangString {
    pub fn new(value: impl Into<String>) -> Self {
        LangString {
            language: None,
            value: value.into(),
        }
    }

    pub fn tagged(language: impl Into<String>, value: impl Into<String>) -> Self {
        LangString {
            language: Some(language.into()),
            value: value.into(),
        }
    }
}

/// An element that may appear many times, in document order.
pub type UnboundLangString = Vec<LangString>;

/// An element that appears exactly once.
pub type SingleLangString = LangString;

/// The LOM `source`/`value` pair used for every controlled-vocabulary leaf.
/// `T` is a closed enum such as [`crate::lom::InteractivityType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceValuePair<T> {
    /// The vocabulary source, conventionally `LOMv1.0`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    pub value: T,
}

impl<T> SourceValuePair<T> {
    pub fn new(source: impl Into<String>, value: T) -> Self {
        SourceValuePair {
            source: source.into(),
            value,
        }
    }
}

//! Recovered-anomaly accounting. Parsers push a warning for every anomaly
//! they survive (unknown vocabulary token, malformed numeric, missing
//! external metadata file); the list rides along with the parse result and
//! each entry is also logged as it is recorded.

use serde::Serialize;
use std::fmt;

/// One recovered anomaly, tied to the file and field path it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    /// File path, optionally extended with an element or attribute path,
    /// e.g. `imsmanifest.xml#organizations/organization[0]/item[2]`.
    pub path: String,
    pub message: String,
}

/// An append-only collection of [`Warning`]s.
#[derive(Debug, Default)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl fmt::Display) {
        let warning = Warning {
            path: path.into(),
            message: message.to_string(),
        };
        tracing::warn!(path = %warning.path, "{}", warning.message);
        self.items.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.items
    }
}

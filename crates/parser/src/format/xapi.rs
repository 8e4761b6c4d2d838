//! xAPI/TinCan parsing (`tincan.xml`).

use super::{locate_manifest, projection, ParseError, Parser, ParserOptions};
use crate::access::{self, PackageAccess};
use crate::deserialize::xml;
use crate::warnings::Warnings;
use models::lang::LangString;
use models::tincan::{Activity, TincanManifest};
use models::{ModuleMetadata, PackageManifest};
use roxmltree::Node;

pub const MANIFEST_NAME: &str = "tincan.xml";

pub struct XapiParser;

impl Parser for XapiParser {
    fn parse(
        &self,
        access: &dyn PackageAccess,
        options: &ParserOptions,
        warnings: &mut Warnings,
    ) -> Result<ModuleMetadata, ParseError> {
        let manifest = parse_manifest(access, warnings)?;
        projection::project(access, &manifest, options, warnings)
    }
}

/// Locates `tincan.xml` case-insensitively and parses the activity
/// collection.
pub fn parse_manifest(
    access: &dyn PackageAccess,
    _warnings: &mut Warnings,
) -> Result<TincanManifest, ParseError> {
    let manifest_path = locate_manifest(access, MANIFEST_NAME)?;
    let bytes = access::read_all(access, &manifest_path)?;
    let text = xml::decode(&bytes);
    let document =
        xml::document(&text).map_err(|cause| ParseError::manifest_parse(&manifest_path, cause))?;
    let root = document.root_element();

    let manifest = TincanManifest {
        activities: xml::child(root, "activities")
            .map(|activities| xml::children(activities, "activity").map(read_activity).collect())
            .unwrap_or_default(),
    };

    if manifest.activities.is_empty() {
        return Err(ParseError::missing_field("activities", manifest_path));
    }
    if manifest.title().is_empty() {
        return Err(ParseError::missing_field("activity name", manifest_path));
    }
    if manifest.launch_url().is_none() {
        return Err(ParseError::missing_field("launch URL", manifest_path));
    }
    Ok(manifest)
}

fn read_activity(node: Node) -> Activity {
    Activity {
        id: xml::attribute(node, "id").unwrap_or_default().to_string(),
        activity_type: xml::attribute(node, "type").map(str::to_string),
        names: tagged_texts(node, "name"),
        descriptions: tagged_texts(node, "description"),
        launch: xml::child_text(node, "launch"),
    }
}

/// `<name>`/`<description>` elements repeat per language, the tag riding on
/// a `lang` attribute.
fn tagged_texts(node: Node, name: &str) -> Vec<LangString> {
    xml::children(node, name)
        .filter_map(|entry| {
            let value = xml::text(entry)?;
            Some(LangString {
                language: xml::attribute(entry, "lang").map(str::to_string),
                value,
            })
        })
        .collect()
}

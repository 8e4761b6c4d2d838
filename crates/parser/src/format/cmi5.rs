//! cmi5 parsing (`cmi5.xml`). The course-structure namespace is recognized
//! but not required; authoring tools omit or typo it.

use super::{projection, ParseError, Parser, ParserOptions};
use crate::access::{self, PackageAccess};
use crate::deserialize::xml;
use crate::warnings::Warnings;
use models::cmi5::{
    AssignableUnit, Block, Cmi5Child, Cmi5Course, Cmi5Manifest, Cmi5Objective, LaunchMethod,
    MoveOn,
};
use models::lang::LangString;
use models::{ModuleMetadata, PackageManifest};
use roxmltree::Node;
use std::str::FromStr;

pub const MANIFEST_NAME: &str = "cmi5.xml";

pub struct Cmi5Parser;

impl Parser for Cmi5Parser {
    fn parse(
        &self,
        access: &dyn PackageAccess,
        options: &ParserOptions,
        warnings: &mut Warnings,
    ) -> Result<ModuleMetadata, ParseError> {
        let manifest = parse_manifest(access, warnings)?;
        // cmi5 is an xAPI profile; the projection reports xapi_enabled for
        // the kind regardless of sentinel files.
        projection::project(access, &manifest, options, warnings)
    }
}

/// Parses `cmi5.xml` (exact name, per the profile) into the typed course
/// structure.
pub fn parse_manifest(
    access: &dyn PackageAccess,
    warnings: &mut Warnings,
) -> Result<Cmi5Manifest, ParseError> {
    if !access.exists(MANIFEST_NAME)? {
        return Err(ParseError::MissingManifest {
            name: MANIFEST_NAME,
            root: access.root_path(),
        });
    }
    let bytes = access::read_all(access, MANIFEST_NAME)?;
    let text = xml::decode(&bytes);
    let document =
        xml::document(&text).map_err(|cause| ParseError::manifest_parse(MANIFEST_NAME, cause))?;
    let root = document.root_element();

    let course = xml::child(root, "course")
        .map(|course| Cmi5Course {
            id: xml::attribute(course, "id").unwrap_or_default().to_string(),
            title: read_text_block(course, "title"),
            description: read_text_block(course, "description"),
        })
        .unwrap_or_default();

    let manifest = Cmi5Manifest {
        course,
        objectives: xml::child(root, "objectives")
            .map(|objectives| {
                xml::children(objectives, "objective")
                    .map(|objective| Cmi5Objective {
                        id: xml::attribute(objective, "id")
                            .unwrap_or_default()
                            .to_string(),
                        title: read_text_block(objective, "title"),
                        description: read_text_block(objective, "description"),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        children: read_children(root, warnings),
    };

    if manifest.title().is_empty() {
        return Err(ParseError::missing_field("course title", MANIFEST_NAME));
    }
    if manifest.launch_url().is_none() {
        return Err(ParseError::missing_field("launch URL", MANIFEST_NAME));
    }
    Ok(manifest)
}

/// Blocks and AUs are a repeatable choice under the root and under each
/// block; one pass over the element children keeps their relative order.
fn read_children(node: Node, warnings: &mut Warnings) -> Vec<Cmi5Child> {
    xml::elements(node)
        .filter_map(|child| {
            if xml::named(child, "block") {
                Some(Cmi5Child::Block(read_block(child, warnings)))
            } else if xml::named(child, "au") {
                Some(Cmi5Child::AssignableUnit(read_assignable_unit(
                    child, warnings,
                )))
            } else {
                None
            }
        })
        .collect()
}

/// `<title>`/`<description>` hold one `<langstring>` per language.
fn read_text_block(node: Node, name: &str) -> Vec<LangString> {
    xml::child(node, name)
        .map(|block| {
            xml::children(block, "langstring")
                .filter_map(|entry| {
                    let value = xml::text(entry)?;
                    Some(LangString {
                        language: xml::attribute(entry, "lang").map(str::to_string),
                        value,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn read_block(node: Node, warnings: &mut Warnings) -> Block {
    Block {
        id: xml::attribute(node, "id").unwrap_or_default().to_string(),
        title: read_text_block(node, "title"),
        description: read_text_block(node, "description"),
        children: read_children(node, warnings),
        objective_refs: objective_refs(node),
    }
}

fn read_assignable_unit(node: Node, warnings: &mut Warnings) -> AssignableUnit {
    let id = xml::attribute(node, "id").unwrap_or_default().to_string();
    let path = format!("{MANIFEST_NAME}#au[{id}]");

    let launch_method = match xml::attribute(node, "launchMethod") {
        None => LaunchMethod::AnyWindow,
        Some(raw) => LaunchMethod::from_str(raw.trim()).unwrap_or_else(|_| {
            warnings.push(
                format!("{path}@launchMethod"),
                format_args!("unrecognized launch method '{raw}', using AnyWindow"),
            );
            LaunchMethod::AnyWindow
        }),
    };
    let move_on = match xml::attribute(node, "moveOn") {
        None => MoveOn::NotApplicable,
        Some(raw) => MoveOn::from_str(raw.trim()).unwrap_or_else(|_| {
            warnings.push(
                format!("{path}@moveOn"),
                format_args!("unrecognized moveOn criterion '{raw}', using NotApplicable"),
            );
            MoveOn::NotApplicable
        }),
    };

    AssignableUnit {
        id,
        title: read_text_block(node, "title"),
        description: read_text_block(node, "description"),
        url: xml::child_text(node, "url").unwrap_or_default(),
        launch_method,
        move_on,
        mastery_score: xml::attribute_f64(node, "masteryScore", &path, warnings),
        launch_parameters: xml::child_text(node, "launchParameters"),
        entitlement_key: xml::child_text(node, "entitlementKey"),
        activity_type: xml::attribute(node, "activityType").map(str::to_string),
        objective_refs: objective_refs(node),
    }
}

fn objective_refs(node: Node) -> Vec<String> {
    xml::child(node, "objectives")
        .map(|objectives| {
            xml::children(objectives, "objective")
                .filter_map(|objective| xml::attribute(objective, "idref").map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

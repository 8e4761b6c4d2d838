//! Shared SCORM machinery: the IMS Content Packaging tree, external LOM
//! loading, and the batched file-existence probe. Both edition parsers
//! drive these free functions; there is no parser inheritance.

pub mod lom;
pub mod sequencing;

use crate::access::{self, PackageAccess};
use crate::deserialize::xml;
use crate::format::ParseError;
use crate::warnings::Warnings;
use models::scorm::{
    join_relative, CompletionThreshold, DataMap, Dependency, File, HideLmsUi, Item,
    MetadataElement, NavigationInterface, Organization, Organizations, Presentation, Resource,
    Resources, ScormEdition, ScormManifest, ScormType, TimeLimitAction,
};
use models::PackageManifest;
use roxmltree::Node;
use std::str::FromStr;

pub const MANIFEST_NAME: &str = "imsmanifest.xml";

/// Parses `imsmanifest.xml` into a typed tree, loads referenced external
/// metadata files, and populates file-existence flags with one batched
/// probe per `<resources>` container.
pub fn parse_manifest(
    access: &dyn PackageAccess,
    manifest_path: &str,
    edition: ScormEdition,
    warnings: &mut Warnings,
) -> Result<ScormManifest, ParseError> {
    let bytes = access::read_all(access, manifest_path)?;
    let text = xml::decode(&bytes);
    let document =
        xml::document(&text).map_err(|cause| ParseError::manifest_parse(manifest_path, cause))?;
    let root = document.root_element();

    let mut manifest = read_manifest(root, manifest_path, edition, warnings);
    load_external_metadata(access, &mut manifest, manifest_path, warnings)?;
    probe_file_existence(access, &mut manifest)?;
    manifest.resources.rebuild_index();
    Ok(manifest)
}

/// Fails unless the manifest carries a non-empty title and a resolvable
/// launch URL.
pub fn require_title_and_launch(
    manifest: &ScormManifest,
    manifest_path: &str,
) -> Result<(), ParseError> {
    if manifest.title().is_empty() {
        return Err(ParseError::missing_field("title", manifest_path));
    }
    if manifest
        .resolve_launch_url()
        .filter(|url| !url.is_empty())
        .is_none()
    {
        return Err(ParseError::missing_field("launch URL", manifest_path));
    }
    Ok(())
}

fn read_manifest(
    root: Node,
    path: &str,
    edition: ScormEdition,
    warnings: &mut Warnings,
) -> ScormManifest {
    if !xml::named(root, "manifest") {
        warnings.push(
            path,
            format_args!(
                "root element is '{}', expected 'manifest'",
                root.tag_name().name()
            ),
        );
    }

    // Namespace declarations are not attributes in roxmltree, so anything
    // left after the standard names is a vendor extension.
    let mut extensions = serde_json::Map::new();
    for attribute in root.attributes() {
        let known = ["identifier", "version", "base", "schemaLocation"]
            .iter()
            .any(|name| caseless::default_caseless_match_str(attribute.name(), name));
        if !known {
            extensions.insert(
                attribute.name().to_string(),
                serde_json::Value::String(attribute.value().to_string()),
            );
        }
    }

    ScormManifest {
        edition,
        identifier: xml::attribute(root, "identifier")
            .unwrap_or_default()
            .to_string(),
        version: xml::attribute(root, "version").map(str::to_string),
        xml_base: xml::attribute(root, "base").map(str::to_string),
        metadata: xml::child(root, "metadata").map(|node| read_metadata(node, path, warnings)),
        organizations: xml::child(root, "organizations")
            .map(|node| read_organizations(node, path, edition, warnings))
            .unwrap_or_default(),
        resources: xml::child(root, "resources")
            .map(|node| read_resources(node, path, warnings))
            .unwrap_or_default(),
        extensions,
    }
}

fn read_metadata(node: Node, path: &str, warnings: &mut Warnings) -> MetadataElement {
    MetadataElement {
        schema: xml::child_text(node, "schema"),
        schema_version: xml::child_text(node, "schemaversion"),
        location: xml::child_text(node, "location"),
        lom: xml::child(node, "lom")
            .map(|lom_node| lom::read_lom_with_warnings(lom_node, path, warnings)),
    }
}

fn read_organizations(
    node: Node,
    path: &str,
    edition: ScormEdition,
    warnings: &mut Warnings,
) -> Organizations {
    Organizations {
        default: xml::attribute(node, "default").map(str::to_string),
        organizations: xml::children(node, "organization")
            .map(|organization| read_organization(organization, path, edition, warnings))
            .collect(),
    }
}

fn read_organization(
    node: Node,
    path: &str,
    edition: ScormEdition,
    warnings: &mut Warnings,
) -> Organization {
    Organization {
        identifier: xml::attribute(node, "identifier")
            .unwrap_or_default()
            .to_string(),
        title: xml::child_text(node, "title").unwrap_or_default(),
        items: xml::children(node, "item")
            .map(|item| read_item(item, path, edition, warnings))
            .collect(),
        metadata: xml::child(node, "metadata")
            .map(|metadata| read_metadata(metadata, path, warnings)),
        sequencing: match edition {
            ScormEdition::V2004 => xml::child(node, "sequencing")
                .map(|sequencing| sequencing::read_sequencing(sequencing, path, warnings)),
            ScormEdition::V1_2 => None,
        },
    }
}

fn read_item(node: Node, path: &str, edition: ScormEdition, warnings: &mut Warnings) -> Item {
    let identifier = xml::attribute(node, "identifier")
        .unwrap_or_default()
        .to_string();
    let item_path = format!("{path}#item[{identifier}]");

    Item {
        identifier,
        identifier_ref: xml::attribute(node, "identifierref")
            .map(str::to_string)
            .filter(|r| !r.is_empty()),
        title: xml::child_text(node, "title").unwrap_or_default(),
        is_visible: xml::attribute_bool(node, "isvisible", true, &item_path, warnings),
        parameters: xml::attribute(node, "parameters").map(str::to_string),
        items: xml::children(node, "item")
            .map(|child| read_item(child, path, edition, warnings))
            .collect(),
        metadata: xml::child(node, "metadata")
            .map(|metadata| read_metadata(metadata, path, warnings)),
        sequencing: match edition {
            ScormEdition::V2004 => xml::child(node, "sequencing")
                .map(|sequencing| sequencing::read_sequencing(sequencing, &item_path, warnings)),
            ScormEdition::V1_2 => None,
        },
        time_limit_action: read_time_limit_action(node, &item_path, warnings),
        data_from_lms: xml::child_text(node, "dataFromLMS"),
        completion_threshold: xml::child(node, "completionThreshold")
            .map(|threshold| read_completion_threshold(threshold, &item_path, warnings)),
        data: xml::child(node, "data")
            .map(|data| read_data_maps(data, &item_path, warnings))
            .unwrap_or_default(),
        presentation: xml::child(node, "presentation")
            .map(|presentation| read_presentation(presentation, &item_path, warnings)),
        prerequisites: xml::child_text(node, "prerequisites"),
        max_time_allowed: xml::child_text(node, "maxtimeallowed"),
        mastery_score: read_mastery_score(node, &item_path, warnings),
    }
}

fn read_time_limit_action(
    node: Node,
    path: &str,
    warnings: &mut Warnings,
) -> Option<TimeLimitAction> {
    let raw = xml::child_text(node, "timeLimitAction")?;
    match TimeLimitAction::from_str(raw.trim()) {
        Ok(action) => Some(action),
        Err(_) => {
            warnings.push(
                format!("{path}/timeLimitAction"),
                format_args!("unrecognized time limit action '{raw}'"),
            );
            None
        }
    }
}

fn read_mastery_score(node: Node, path: &str, warnings: &mut Warnings) -> Option<f64> {
    let raw = xml::child_text(node, "masteryscore")?;
    match raw.trim().parse::<f64>() {
        Ok(score) => Some(score),
        Err(_) => {
            warnings.push(
                format!("{path}/masteryscore"),
                format_args!("invalid mastery score '{raw}'"),
            );
            None
        }
    }
}

fn read_completion_threshold(
    node: Node,
    path: &str,
    warnings: &mut Warnings,
) -> CompletionThreshold {
    CompletionThreshold {
        completed_by_measure: xml::attribute_bool(
            node,
            "completedByMeasure",
            false,
            path,
            warnings,
        ),
        min_progress_measure: xml::attribute_f64(node, "minProgressMeasure", path, warnings)
            .unwrap_or(1.0),
        progress_weight: xml::attribute_f64(node, "progressWeight", path, warnings).unwrap_or(1.0),
    }
}

fn read_data_maps(node: Node, path: &str, warnings: &mut Warnings) -> Vec<DataMap> {
    xml::children(node, "map")
        .filter_map(|map| match xml::attribute(map, "targetID") {
            Some(target) if !target.is_empty() => Some(DataMap {
                target_id: target.to_string(),
                read_shared_data: xml::attribute_bool(map, "readSharedData", true, path, warnings),
                write_shared_data: xml::attribute_bool(
                    map,
                    "writeSharedData",
                    true,
                    path,
                    warnings,
                ),
            }),
            _ => {
                warnings.push(
                    format!("{path}/data/map"),
                    "data map without a targetID, dropping",
                );
                None
            }
        })
        .collect()
}

fn read_presentation(node: Node, path: &str, warnings: &mut Warnings) -> Presentation {
    let navigation_interface = xml::child(node, "navigationInterface").map(|interface| {
        NavigationInterface {
            hide_lms_ui: xml::children(interface, "hideLMSUI")
                .filter_map(|hide| {
                    let raw = xml::text(hide)?;
                    match HideLmsUi::from_str(raw.trim()) {
                        Ok(device) => Some(device),
                        Err(_) => {
                            warnings.push(
                                format!("{path}/presentation/hideLMSUI"),
                                format_args!("unrecognized UI device '{raw}'"),
                            );
                            None
                        }
                    }
                })
                .collect(),
        }
    });
    Presentation {
        navigation_interface,
    }
}

fn read_resources(node: Node, path: &str, warnings: &mut Warnings) -> Resources {
    Resources::new(
        xml::attribute(node, "base").map(str::to_string),
        xml::children(node, "resource")
            .map(|resource| read_resource(resource, path, warnings))
            .collect(),
    )
}

fn read_resource(node: Node, path: &str, warnings: &mut Warnings) -> Resource {
    let identifier = xml::attribute(node, "identifier")
        .unwrap_or_default()
        .to_string();
    let resource_path = format!("{path}#resource[{identifier}]");

    let scorm_type = xml::attribute(node, "scormtype").and_then(|raw| {
        match ScormType::from_str(raw.trim()) {
            Ok(scorm_type) => Some(scorm_type),
            Err(_) => {
                warnings.push(
                    format!("{resource_path}@scormType"),
                    format_args!("unrecognized scormType '{raw}'"),
                );
                None
            }
        }
    });

    Resource {
        identifier,
        resource_type: xml::attribute(node, "type").unwrap_or_default().to_string(),
        scorm_type,
        href: xml::attribute(node, "href")
            .map(str::to_string)
            .filter(|href| !href.is_empty()),
        xml_base: xml::attribute(node, "base").map(str::to_string),
        metadata: xml::child(node, "metadata")
            .map(|metadata| read_metadata(metadata, path, warnings)),
        files: xml::children(node, "file")
            .filter_map(|file| {
                let href = xml::attribute(file, "href")?.to_string();
                Some(File {
                    href,
                    metadata: xml::child(file, "metadata")
                        .map(|metadata| read_metadata(metadata, path, warnings)),
                    exists: None,
                })
            })
            .collect(),
        dependencies: xml::children(node, "dependency")
            .filter_map(|dependency| {
                xml::attribute(dependency, "identifierref").map(|reference| Dependency {
                    identifier_ref: reference.to_string(),
                })
            })
            .collect(),
    }
}

/// Loads every externally referenced metadata file (`adlcp:location`) into
/// its `MetadataElement`. A missing or unreadable file is a warning.
fn load_external_metadata(
    access: &dyn PackageAccess,
    manifest: &mut ScormManifest,
    manifest_path: &str,
    warnings: &mut Warnings,
) -> Result<(), ParseError> {
    let mut pending: Vec<&mut MetadataElement> = Vec::new();
    if let Some(metadata) = manifest.metadata.as_mut() {
        pending.push(metadata);
    }
    for organization in &mut manifest.organizations.organizations {
        if let Some(metadata) = organization.metadata.as_mut() {
            pending.push(metadata);
        }
        for item in &mut organization.items {
            collect_item_metadata(item, &mut pending);
        }
    }
    for resource in &mut manifest.resources.resources {
        if let Some(metadata) = resource.metadata.as_mut() {
            pending.push(metadata);
        }
        for file in &mut resource.files {
            if let Some(metadata) = file.metadata.as_mut() {
                pending.push(metadata);
            }
        }
    }

    for metadata in pending {
        let Some(location) = metadata.location.clone().filter(|l| !l.is_empty()) else {
            continue;
        };
        if metadata.lom.is_some() {
            continue;
        }
        match access::read_all(access, &location) {
            Ok(bytes) => {
                let text = xml::decode(&bytes);
                match xml::document(&text) {
                    Ok(document) => {
                        let root = document.root_element();
                        let lom_node = if xml::named(root, "lom") {
                            Some(root)
                        } else {
                            xml::child(root, "lom")
                        };
                        match lom_node {
                            Some(node) => {
                                metadata.lom =
                                    Some(lom::read_lom_with_warnings(node, &location, warnings))
                            }
                            None => warnings.push(
                                &location,
                                "external metadata file has no <lom> element",
                            ),
                        }
                    }
                    Err(cause) => warnings.push(
                        &location,
                        format_args!("external metadata file is malformed: {cause}"),
                    ),
                }
            }
            Err(cause) => warnings.push(
                manifest_path,
                format_args!("external metadata file '{location}' could not be read: {cause}"),
            ),
        }
    }
    Ok(())
}

fn collect_item_metadata<'a>(item: &'a mut Item, pending: &mut Vec<&'a mut MetadataElement>) {
    if let Some(metadata) = item.metadata.as_mut() {
        pending.push(metadata);
    }
    for child in &mut item.items {
        collect_item_metadata(child, pending);
    }
}

/// One `exists_batch` per `<resources>` container, fanned back out onto the
/// individual file entries.
fn probe_file_existence(
    access: &dyn PackageAccess,
    manifest: &mut ScormManifest,
) -> Result<(), ParseError> {
    let manifest_base = manifest.xml_base.clone();
    let resources_base = manifest.resources.xml_base.clone();

    let mut probe_paths = Vec::new();
    for resource in &manifest.resources.resources {
        for file in &resource.files {
            probe_paths.push(join_relative(
                [
                    manifest_base.as_deref(),
                    resources_base.as_deref(),
                    resource.xml_base.as_deref(),
                ],
                &file.href,
            ));
        }
    }
    if probe_paths.is_empty() {
        return Ok(());
    }

    let verdicts = access.exists_batch(&probe_paths)?;
    let mut position = 0usize;
    for resource in &mut manifest.resources.resources {
        for file in &mut resource.files {
            file.exists = verdicts.get(&probe_paths[position]).copied();
            position += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::deserialize::xml::document;

    fn read(text: &str, edition: ScormEdition) -> (ScormManifest, Warnings) {
        let doc = document(text).unwrap();
        let mut warnings = Warnings::new();
        let manifest = read_manifest(doc.root_element(), "imsmanifest.xml", edition, &mut warnings);
        (manifest, warnings)
    }

    const ADL_ITEM: &str = r#"<?xml version="1.0"?>
    <manifest identifier="m" version="1.0"
        xmlns:adlcp="http://www.adlnet.org/xsd/adlcp_v1p3"
        xmlns:adlnav="http://www.adlnet.org/xsd/adlnav_v1p3"
        vendor:build="20260801" xmlns:vendor="urn:example:vendor">
      <organizations default="org">
        <organization identifier="org">
          <title>ADL Extensions</title>
          <item identifier="i1" identifierref="r1" parameters="?lesson=1">
            <title>Lesson</title>
            <adlcp:timeLimitAction>exit,message</adlcp:timeLimitAction>
            <adlcp:dataFromLMS>bookmark=0</adlcp:dataFromLMS>
            <adlcp:completionThreshold completedByMeasure="true" minProgressMeasure="0.75"/>
            <adlcp:data>
              <adlcp:map targetID="com.example.notes" writeSharedData="false"/>
            </adlcp:data>
            <adlnav:presentation>
              <adlnav:navigationInterface>
                <adlnav:hideLMSUI>continue</adlnav:hideLMSUI>
                <adlnav:hideLMSUI>previous</adlnav:hideLMSUI>
              </adlnav:navigationInterface>
            </adlnav:presentation>
          </item>
        </organization>
      </organizations>
      <resources>
        <resource identifier="r1" type="webcontent" adlcp:scormType="sco" href="sco.html">
          <file href="sco.html"/>
          <dependency identifierref="shared"/>
        </resource>
        <resource identifier="shared" type="webcontent">
          <file href="common.js"/>
        </resource>
      </resources>
    </manifest>"#;

    #[test]
    fn adl_item_extensions_are_captured() {
        let (manifest, warnings) = read(ADL_ITEM, ScormEdition::V2004);
        assert!(warnings.is_empty());
        let item = &manifest.organizations.organizations[0].items[0];

        assert_eq!(Some(TimeLimitAction::ExitMessage), item.time_limit_action);
        assert_eq!(Some("bookmark=0"), item.data_from_lms.as_deref());
        assert_eq!(Some("?lesson=1"), item.parameters.as_deref());

        let threshold = item.completion_threshold.as_ref().unwrap();
        assert!(threshold.completed_by_measure);
        assert_eq!(0.75, threshold.min_progress_measure);
        assert_eq!(1.0, threshold.progress_weight);

        assert_eq!(1, item.data.len());
        assert_eq!("com.example.notes", item.data[0].target_id);
        assert!(item.data[0].read_shared_data);
        assert!(!item.data[0].write_shared_data);

        let hidden = &item
            .presentation
            .as_ref()
            .unwrap()
            .navigation_interface
            .as_ref()
            .unwrap()
            .hide_lms_ui;
        assert_eq!(vec![HideLmsUi::Continue, HideLmsUi::Previous], *hidden);
    }

    #[test]
    fn vendor_attributes_land_in_the_extension_bag() {
        let (manifest, _) = read(ADL_ITEM, ScormEdition::V2004);
        assert_eq!(
            Some("20260801"),
            manifest.extensions.get("build").and_then(|v| v.as_str())
        );
        assert!(!manifest.extensions.contains_key("identifier"));
    }

    #[test]
    fn dependencies_and_secondary_resources_survive() {
        let (manifest, _) = read(ADL_ITEM, ScormEdition::V2004);
        let resource = &manifest.resources.resources[0];
        assert_eq!("shared", resource.dependencies[0].identifier_ref);
        assert_eq!(Some(ScormType::Sco), resource.scorm_type);
        assert_eq!(None, manifest.resources.resources[1].scorm_type);
    }

    #[test]
    fn scorm12_item_attributes_are_kept_verbatim() {
        let text = r#"<manifest identifier="m"
            xmlns:adlcp="http://www.adlnet.org/xsd/adlcp_rootv1p2">
          <organizations default="o">
            <organization identifier="o">
              <title>Old School</title>
              <item identifier="i" identifierref="r" isvisible="false">
                <title>SCO</title>
                <adlcp:prerequisites type="aicc_script">a1 &amp; a2</adlcp:prerequisites>
                <adlcp:maxtimeallowed>00:30:00</adlcp:maxtimeallowed>
                <adlcp:masteryscore>80</adlcp:masteryscore>
              </item>
            </organization>
          </organizations>
          <resources>
            <resource identifier="r" type="webcontent" adlcp:scormtype="sco" href="a.html"/>
          </resources>
        </manifest>"#;
        let (manifest, warnings) = read(text, ScormEdition::V1_2);
        assert!(warnings.is_empty());
        let item = &manifest.organizations.organizations[0].items[0];
        assert!(!item.is_visible);
        assert_eq!(Some("a1 & a2"), item.prerequisites.as_deref());
        assert_eq!(Some("00:30:00"), item.max_time_allowed.as_deref());
        assert_eq!(Some(80.0), item.mastery_score);
        assert_eq!(None, item.sequencing);
    }

    #[test]
    fn malformed_manifest_root_warns_but_parses() {
        let (manifest, warnings) = read("<mannifest identifier='m'/>", ScormEdition::V1_2);
        assert_eq!("m", manifest.identifier);
        assert_eq!(1, warnings.len());
    }
}

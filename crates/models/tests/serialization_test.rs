//! JSON serialization checks for the typed trees: downstream report
//! renderers consume these shapes, so field names and defaults are part of
//! the contract.

use models::lang::LangString;
use models::scorm::sequencing::{Objective, ObjectiveMapping, Objectives, Sequencing};
use models::scorm::{
    Item, Organization, Organizations, Resource, Resources, ScormEdition, ScormManifest, ScormType,
};
use models::{ModuleKind, ModuleMetadata, SequencingLevel};
use std::time::Duration;

fn sample_manifest() -> ScormManifest {
    ScormManifest {
        edition: ScormEdition::V2004,
        identifier: "com.example.sample".to_string(),
        version: Some("1.0".to_string()),
        xml_base: None,
        metadata: None,
        organizations: Organizations {
            default: Some("org".to_string()),
            organizations: vec![Organization {
                identifier: "org".to_string(),
                title: "Sample".to_string(),
                items: vec![Item {
                    identifier: "item-1".to_string(),
                    identifier_ref: Some("res-1".to_string()),
                    title: "Only Item".to_string(),
                    is_visible: true,
                    sequencing: Some(Sequencing {
                        objectives: Some(Objectives {
                            primary_objective: Some(Objective {
                                id: Some("primary".to_string()),
                                mappings: vec![ObjectiveMapping::new("com.example.global")],
                                ..Default::default()
                            }),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }],
        },
        resources: Resources::new(
            None,
            vec![Resource {
                identifier: "res-1".to_string(),
                resource_type: "webcontent".to_string(),
                scorm_type: Some(ScormType::Sco),
                href: Some("index.html".to_string()),
                ..Default::default()
            }],
        ),
        extensions: serde_json::Map::new(),
    }
}

#[test]
fn manifest_tree_round_trips_through_json() {
    let manifest = sample_manifest();
    let json = serde_json::to_string(&manifest).unwrap();
    let back: ScormManifest = serde_json::from_str(&json).unwrap();
    assert_eq!(manifest, back);
}

#[test]
fn camel_case_field_names_are_the_wire_contract() {
    let value = serde_json::to_value(sample_manifest()).unwrap();
    assert_eq!("2004", value["edition"]);
    assert_eq!("org", value["organizations"]["default"]);
    let item = &value["organizations"]["organizations"][0]["items"][0];
    assert_eq!("res-1", item["identifierRef"]);
    assert_eq!(
        "com.example.global",
        item["sequencing"]["objectives"]["primaryObjective"]["mappings"][0]["targetObjectiveId"]
    );
}

#[test]
fn omitted_mapping_permissions_deserialize_to_schema_defaults() {
    let mapping: ObjectiveMapping =
        serde_json::from_str(r#"{"targetObjectiveId": "com.example.global"}"#).unwrap();
    assert!(mapping.read_satisfied_status);
    assert!(mapping.read_progress_measure);
    assert!(!mapping.write_satisfied_status);
    assert!(!mapping.write_progress_measure);
}

#[test]
fn module_metadata_serializes_durations_humanely() {
    let metadata = ModuleMetadata {
        kind: ModuleKind::Scorm2004,
        title: "Sample".to_string(),
        description: String::new(),
        identifier: "com.example.sample".to_string(),
        version: "1.0".to_string(),
        launch_url: "index.html".to_string(),
        duration: Duration::from_secs(5400),
        size_on_disk: 1024,
        xapi_enabled: false,
        sequencing_level: SequencingLevel::Full,
    };
    let value = serde_json::to_value(&metadata).unwrap();
    assert_eq!("1h 30m", value["duration"]);
    assert_eq!("full", value["sequencingLevel"]);
    // Empty descriptions are omitted from the wire form but come back as
    // empty, not null.
    assert!(value.get("description").is_none());
    let back: ModuleMetadata = serde_json::from_value(value).unwrap();
    assert_eq!(metadata, back);
}

#[test]
fn lang_strings_keep_their_tags() {
    let tagged = LangString::tagged("en-US", "Hello");
    let value = serde_json::to_value(&tagged).unwrap();
    assert_eq!("en-US", value["language"]);
    assert_eq!("Hello", value["value"]);

    let untagged: LangString = serde_json::from_str(r#"{"value": "Hi"}"#).unwrap();
    assert_eq!(None, untagged.language);
}

mod testutil;

use models::scorm::sequencing::RollupRuleCondition;
use models::{ModuleKind, SequencingLevel};
use parser::{parse_detailed, ParseError, ParserOptions, Warnings};
use testutil::{zip_fixture, CountingAccess, SCORM2004_FULL_SEQUENCING};

fn sequenced_fixture() -> Vec<(&'static str, &'static str)> {
    vec![
        ("imsmanifest.xml", SCORM2004_FULL_SEQUENCING),
        ("one.html", "<html>1</html>"),
        ("two.html", "<html>2</html>"),
    ]
}

#[test]
fn full_sequencing_classification_and_typed_tree() {
    let access = zip_fixture(&sequenced_fixture());
    let parsed = parse_detailed(&access, &ParserOptions::default()).unwrap();
    assert_eq!(ModuleKind::Scorm2004, parsed.metadata.kind);
    assert_eq!(SequencingLevel::Full, parsed.metadata.sequencing_level);
    assert_eq!("one.html", parsed.metadata.launch_url);

    let mut warnings = Warnings::new();
    let manifest =
        parser::format::scorm2004::parse_manifest(&access, &mut warnings).unwrap();
    let organization = &manifest.organizations.organizations[0];
    let sequencing = organization.items[1].sequencing.as_ref().unwrap();

    let rollup = sequencing.rollup_rules.as_ref().unwrap();
    assert_eq!(1, rollup.rules.len());
    assert_eq!(
        RollupRuleCondition::Completed,
        rollup.rules[0].conditions.conditions[0].condition
    );

    let primary = sequencing
        .objectives
        .as_ref()
        .unwrap()
        .primary_objective
        .as_ref()
        .unwrap();
    assert_eq!(Some("course_score"), primary.id.as_deref());
    let mapping = &primary.mappings[0];
    assert_eq!("com.x.course_score", mapping.target_objective_id);
    assert!(!mapping.read_satisfied_status);
    assert!(mapping.read_normalized_measure);
    // Unset permissions keep their schema defaults.
    assert!(mapping.read_completion_status);
    assert!(!mapping.write_satisfied_status);
}

#[test]
fn sequencing_level_none_without_any_sequencing_block() {
    let manifest = SCORM2004_FULL_SEQUENCING;
    let start = manifest.find("<imsss:sequencing>").unwrap();
    let end = manifest.find("</imsss:sequencing>").unwrap() + "</imsss:sequencing>".len();
    let stripped = format!("{}{}", &manifest[..start], &manifest[end..]);

    let access = zip_fixture(&[
        ("imsmanifest.xml", stripped.as_str()),
        ("one.html", "x"),
        ("two.html", "y"),
    ]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!(SequencingLevel::None, metadata.sequencing_level);
}

#[test]
fn flow_controls_only_is_minimal_and_two_blocks_are_multi() {
    let one_block = SCORM2004_FULL_SEQUENCING.replace(
        r#"<imsss:sequencing>
          <imsss:rollupRules>
            <imsss:rollupRule>
              <imsss:rollupConditions>
                <imsss:rollupCondition condition="completed"/>
              </imsss:rollupConditions>
              <imsss:rollupAction action="satisfied"/>
            </imsss:rollupRule>
          </imsss:rollupRules>
          <imsss:objectives>
            <imsss:primaryObjective objectiveID="course_score">
              <imsss:mapInfo targetObjectiveID="com.x.course_score"
                  readSatisfiedStatus="false" readNormalizedMeasure="true"/>
            </imsss:primaryObjective>
          </imsss:objectives>
        </imsss:sequencing>"#,
        r#"<imsss:sequencing>
          <imsss:controlMode flow="true"/>
        </imsss:sequencing>"#,
    );
    let access = zip_fixture(&[
        ("imsmanifest.xml", one_block.as_str()),
        ("one.html", "x"),
        ("two.html", "y"),
    ]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!(SequencingLevel::Minimal, metadata.sequencing_level);

    let two_blocks = one_block.replace(
        r#"<item identifier="act-1" identifierref="res-1">
        <title>Module One</title>
      </item>"#,
        r#"<item identifier="act-1" identifierref="res-1">
        <title>Module One</title>
        <imsss:sequencing>
          <imsss:controlMode choice="false"/>
        </imsss:sequencing>
      </item>"#,
    );
    let access = zip_fixture(&[
        ("imsmanifest.xml", two_blocks.as_str()),
        ("one.html", "x"),
        ("two.html", "y"),
    ]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!(SequencingLevel::Multi, metadata.sequencing_level);
}

#[test]
fn existence_probe_is_batched_once() {
    let access = CountingAccess::new(zip_fixture(&sequenced_fixture()));
    parse_detailed(&access, &ParserOptions::default()).unwrap();
    assert_eq!(
        1,
        access
            .batch_calls
            .load(std::sync::atomic::Ordering::SeqCst)
    );
    // Per-file probes must not happen; the only allowed `exists` calls are
    // the detector's single cmi5 probe, which SCORM short-circuits anyway.
    assert_eq!(
        0,
        access
            .exists_calls
            .load(std::sync::atomic::Ordering::SeqCst)
    );
}

#[test]
fn schema_validation_requires_bundled_schemas() {
    let with_location = SCORM2004_FULL_SEQUENCING.replace(
        r#"xmlns:imsss="http://www.imsglobal.org/xsd/imsss">"#,
        r#"xmlns:imsss="http://www.imsglobal.org/xsd/imsss"
    xsi:schemaLocation="http://www.imsglobal.org/xsd/imscp_v1p1 imscp_v1p1.xsd"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    let options = ParserOptions {
        validate_schema: true,
        ..Default::default()
    };

    let missing_schema = zip_fixture(&[
        ("imsmanifest.xml", with_location.as_str()),
        ("one.html", "x"),
        ("two.html", "y"),
    ]);
    let error = parse_detailed(&missing_schema, &options).unwrap_err();
    assert!(matches!(error, ParseError::SchemaValidation { .. }));

    let bundled = zip_fixture(&[
        ("imsmanifest.xml", with_location.as_str()),
        ("imscp_v1p1.xsd", "<xs:schema/>"),
        ("one.html", "x"),
        ("two.html", "y"),
    ]);
    assert!(parse_detailed(&bundled, &options).is_ok());

    // Validation off: the missing schema file is irrelevant.
    let relaxed = zip_fixture(&[
        ("imsmanifest.xml", with_location.as_str()),
        ("one.html", "x"),
        ("two.html", "y"),
    ]);
    assert!(parse_detailed(&relaxed, &ParserOptions::default()).is_ok());
}

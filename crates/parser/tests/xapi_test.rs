mod testutil;

use models::{ModuleKind, SequencingLevel};
use parser::{parse_detailed, ParseError, ParserOptions, Warnings};
use testutil::{dir_fixture, zip_fixture, TINCAN_MANIFEST};

#[test]
fn course_typed_activity_supplies_the_metadata() {
    let access = zip_fixture(&[
        ("tincan.xml", TINCAN_MANIFEST),
        ("index_lms.html", "<html></html>"),
    ]);
    let parsed = parse_detailed(&access, &ParserOptions::default()).unwrap();
    let metadata = &parsed.metadata;
    assert_eq!(ModuleKind::Xapi, metadata.kind);
    assert_eq!("Golf for Beginners", metadata.title);
    assert_eq!("A TinCan packaged course", metadata.description);
    assert_eq!("index_lms.html", metadata.launch_url);
    assert_eq!("http://example.com/activities/golf-course", metadata.identifier);
    assert!(metadata.xapi_enabled);
    assert_eq!(SequencingLevel::None, metadata.sequencing_level);
}

#[test]
fn first_activity_is_used_when_none_declares_course() {
    let untyped = TINCAN_MANIFEST
        .replace("type=\"http://adlnet.gov/expapi/activities/course\"", "")
        .replace(
            "type=\"http://adlnet.gov/expapi/activities/assessment\"",
            "",
        )
        .replace(
            "<name>Quiz</name>",
            "<name>Quiz</name><launch>quiz.html</launch>",
        );
    let access = zip_fixture(&[("tincan.xml", untyped.as_str())]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!("Quiz", metadata.title);
    assert_eq!("quiz.html", metadata.launch_url);
}

#[test]
fn manifest_name_matches_any_case() {
    let (_dir, access) = dir_fixture(&[("TINCAN.XML", TINCAN_MANIFEST)]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!(ModuleKind::Xapi, metadata.kind);
}

#[test]
fn empty_activity_collection_fails() {
    let empty = r#"<tincan xmlns="http://projecttincan.com/tincan.xsd">
        <activities/>
    </tincan>"#;
    let access = zip_fixture(&[("tincan.xml", empty)]);
    let error = parse_detailed(&access, &ParserOptions::default()).unwrap_err();
    assert!(matches!(
        error,
        ParseError::MissingRequiredField {
            field: "activities",
            ..
        }
    ));
}

#[test]
fn chosen_activity_must_have_a_launch() {
    let launchless = TINCAN_MANIFEST.replace("<launch lang=\"en-us\">index_lms.html</launch>", "");
    let access = zip_fixture(&[("tincan.xml", launchless.as_str())]);
    let error = parse_detailed(&access, &ParserOptions::default()).unwrap_err();
    assert!(matches!(
        error,
        ParseError::MissingRequiredField {
            field: "launch URL",
            ..
        }
    ));
}

#[test]
fn language_tags_survive_into_the_model() {
    let access = zip_fixture(&[("tincan.xml", TINCAN_MANIFEST)]);
    let mut warnings = Warnings::new();
    let manifest = parser::format::xapi::parse_manifest(&access, &mut warnings).unwrap();
    let course = manifest.course_activity().unwrap();
    assert_eq!(Some("en-US"), course.names[0].language.as_deref());
    assert_eq!(Some("index_lms.html"), course.launch.as_deref());
}

mod testutil;

use models::cmi5::{LaunchMethod, MoveOn};
use models::{ModuleKind, SequencingLevel};
use parser::{parse_detailed, ParseError, ParserOptions, Warnings};
use testutil::{zip_fixture, CMI5_MANIFEST};

#[test]
fn cmi5_packages_are_always_xapi_enabled() {
    let access = zip_fixture(&[
        ("cmi5.xml", CMI5_MANIFEST),
        ("launch.html", "<html></html>"),
    ]);
    let parsed = parse_detailed(&access, &ParserOptions::default()).unwrap();
    let metadata = &parsed.metadata;
    assert_eq!(ModuleKind::Cmi5, metadata.kind);
    assert_eq!("T", metadata.title);
    assert_eq!("launch.html", metadata.launch_url);
    assert!(metadata.xapi_enabled);
    assert_eq!(SequencingLevel::None, metadata.sequencing_level);
    assert_eq!("https://example.com/course/golf", metadata.identifier);
}

#[test]
fn au_attributes_are_typed() {
    let access = zip_fixture(&[("cmi5.xml", CMI5_MANIFEST)]);
    let mut warnings = Warnings::new();
    let manifest = parser::format::cmi5::parse_manifest(&access, &mut warnings).unwrap();
    let au = manifest.first_assignable_unit().unwrap();
    assert_eq!(MoveOn::Passed, au.move_on);
    assert_eq!(LaunchMethod::AnyWindow, au.launch_method);
    assert_eq!(Some(0.8), au.mastery_score);
    assert_eq!(Some("en-US"), au.title[0].language.as_deref());
}

#[test]
fn nested_blocks_supply_the_first_au() {
    let nested = CMI5_MANIFEST.replace(
        r#"<au id="https://example.com/course/golf/au1" moveOn="Passed" masteryScore="0.8">"#,
        r#"<block id="b1"><au id="https://example.com/course/golf/au1" moveOn="Passed" masteryScore="0.8">"#,
    );
    let nested = nested.replace("</au>", "</au></block>");
    let access = zip_fixture(&[("cmi5.xml", nested.as_str())]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!("launch.html", metadata.launch_url);
}

#[test]
fn interleaved_block_and_au_siblings_keep_document_order() {
    let interleaved = r#"<?xml version="1.0" encoding="UTF-8"?>
<courseStructure xmlns="https://w3id.org/xapi/profiles/cmi5/v1/CourseStructure.xsd">
  <course id="https://example.com/course/golf">
    <title><langstring lang="en-US">T</langstring></title>
  </course>
  <au id="https://example.com/course/golf/au-top">
    <title><langstring>Top</langstring></title>
    <url>top.html</url>
  </au>
  <block id="b1">
    <title><langstring>Block</langstring></title>
    <au id="https://example.com/course/golf/au-nested">
      <title><langstring>Nested</langstring></title>
      <url>nested.html</url>
    </au>
  </block>
</courseStructure>
"#;
    let access = zip_fixture(&[("cmi5.xml", interleaved)]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!("top.html", metadata.launch_url);

    let mut warnings = Warnings::new();
    let manifest = parser::format::cmi5::parse_manifest(&access, &mut warnings).unwrap();
    assert_eq!(
        "https://example.com/course/golf/au-top",
        manifest.first_assignable_unit().unwrap().id.as_str()
    );
}

#[test]
fn unrecognized_move_on_warns_and_defaults() {
    let sloppy = CMI5_MANIFEST.replace("moveOn=\"Passed\"", "moveOn=\"WhenBored\"");
    let access = zip_fixture(&[("cmi5.xml", sloppy.as_str())]);
    let parsed = parse_detailed(&access, &ParserOptions::default()).unwrap();
    assert_eq!(1, parsed.warnings.len());

    let mut warnings = Warnings::new();
    let manifest = parser::format::cmi5::parse_manifest(&access, &mut warnings).unwrap();
    assert_eq!(
        MoveOn::NotApplicable,
        manifest.first_assignable_unit().unwrap().move_on
    );
}

#[test]
fn missing_course_title_fails() {
    let untitled = CMI5_MANIFEST.replace(
        "<title><langstring lang=\"en-US\">T</langstring></title>",
        "",
    );
    let access = zip_fixture(&[("cmi5.xml", untitled.as_str())]);
    let error = parse_detailed(&access, &ParserOptions::default()).unwrap_err();
    assert!(matches!(
        error,
        ParseError::MissingRequiredField {
            field: "course title",
            ..
        }
    ));
}

#[test]
fn missing_au_url_fails() {
    let no_url = CMI5_MANIFEST.replace("<url>launch.html</url>", "");
    let access = zip_fixture(&[("cmi5.xml", no_url.as_str())]);
    let error = parse_detailed(&access, &ParserOptions::default()).unwrap_err();
    assert!(matches!(
        error,
        ParseError::MissingRequiredField {
            field: "launch URL",
            ..
        }
    ));
}

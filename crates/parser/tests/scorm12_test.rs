mod testutil;

use models::{ModuleKind, SequencingLevel};
use parser::{parse_detailed, ParseError, ParserOptions, Warnings};
use std::time::Duration;
use testutil::{dir_fixture, zip_fixture, SCORM12_MANIFEST};

#[test]
fn happy_path_from_a_zip() {
    let access = zip_fixture(&[
        ("imsmanifest.xml", SCORM12_MANIFEST),
        ("index.html", "<html></html>"),
    ]);
    let parsed = parse_detailed(&access, &ParserOptions::default()).unwrap();
    let metadata = &parsed.metadata;

    assert_eq!(ModuleKind::Scorm12, metadata.kind);
    assert_eq!("Golf Explained", metadata.title);
    assert_eq!("com.example.golf", metadata.identifier);
    assert_eq!("1.1", metadata.version);
    assert_eq!("index.html", metadata.launch_url);
    assert_eq!(Duration::ZERO, metadata.duration);
    assert!(!metadata.xapi_enabled);
    assert_eq!(SequencingLevel::None, metadata.sequencing_level);
    assert!(metadata.size_on_disk > 0);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn default_organization_typo_falls_back_to_the_only_organization() {
    let manifest = SCORM12_MANIFEST.replace("default=\"org-id\"", "default=\"typo-id\"");
    let access = zip_fixture(&[
        ("imsmanifest.xml", manifest.as_str()),
        ("index.html", "<html></html>"),
    ]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!("index.html", metadata.launch_url);
    assert_eq!("Golf Explained", metadata.title);
}

#[test]
fn element_case_variance_parses_identically() {
    let shouty = SCORM12_MANIFEST
        .replace("<organizations", "<ORGANIZATIONS")
        .replace("</organizations>", "</ORGANIZATIONS>")
        .replace("<organization ", "<ORGANIZATION ")
        .replace("</organization>", "</ORGANIZATION>")
        .replace("identifierref", "IDENTIFIERREF");
    let plain = zip_fixture(&[("imsmanifest.xml", SCORM12_MANIFEST)]);
    let loud = zip_fixture(&[("imsmanifest.xml", shouty.as_str())]);
    let options = ParserOptions::default();
    assert_eq!(
        parse_detailed(&plain, &options).unwrap().metadata,
        parse_detailed(&loud, &options).unwrap().metadata
    );
}

#[test]
fn manifest_name_is_located_case_insensitively() {
    let (_dir, access) = dir_fixture(&[("IMSMANIFEST.XML", SCORM12_MANIFEST)]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!(ModuleKind::Scorm12, metadata.kind);
}

#[test]
fn missing_title_is_a_required_field_error() {
    let manifest = SCORM12_MANIFEST.replace("<title>Golf Explained</title>", "<title></title>");
    let access = zip_fixture(&[("imsmanifest.xml", manifest.as_str())]);
    let error = parse_detailed(&access, &ParserOptions::default()).unwrap_err();
    assert!(matches!(
        error,
        ParseError::MissingRequiredField { field: "title", .. }
    ));
}

#[test]
fn unresolvable_launch_is_a_required_field_error() {
    let manifest = SCORM12_MANIFEST.replace("identifierref=\"res-id\"", "");
    let access = zip_fixture(&[("imsmanifest.xml", manifest.as_str())]);
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
fn missing_external_metadata_is_a_warning_not_a_failure() {
    let manifest = SCORM12_MANIFEST.replace(
        "<schemaversion>1.2</schemaversion>",
        "<schemaversion>1.2</schemaversion>\n    <adlcp:location>lom/course.xml</adlcp:location>",
    );
    let access = zip_fixture(&[("imsmanifest.xml", manifest.as_str())]);
    let parsed = parse_detailed(&access, &ParserOptions::default()).unwrap();
    assert_eq!(1, parsed.warnings.len());
    assert!(parsed.warnings[0].message.contains("lom/course.xml"));
}

#[test]
fn external_lom_supplies_duration_and_description() {
    let manifest = SCORM12_MANIFEST.replace(
        "<schemaversion>1.2</schemaversion>",
        "<schemaversion>1.2</schemaversion>\n    <adlcp:location>course_lom.xml</adlcp:location>",
    );
    let lom = r#"<lom xmlns="http://www.imsglobal.org/xsd/imsmd_rootv1p2p1">
        <general>
          <description><langstring lang="en">From the LOM file</langstring></description>
        </general>
        <technical>
          <duration><datetime>PT1H30M</datetime></duration>
        </technical>
      </lom>"#;
    let access = zip_fixture(&[
        ("imsmanifest.xml", manifest.as_str()),
        ("course_lom.xml", lom),
        ("index.html", "<html></html>"),
    ]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!("From the LOM file", metadata.description);
    assert_eq!(Duration::from_secs(5400), metadata.duration);
}

#[test]
fn xapi_sentinel_flags_the_module() {
    let access = zip_fixture(&[
        ("imsmanifest.xml", SCORM12_MANIFEST),
        ("index.html", "<html></html>"),
        ("scripts/xAPI.js", "// wrapper"),
    ]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert!(metadata.xapi_enabled);
}

#[test]
fn file_existence_flags_are_populated() {
    let mut warnings = Warnings::new();
    let access = zip_fixture(&[
        ("imsmanifest.xml", SCORM12_MANIFEST),
        ("index.html", "<html></html>"),
    ]);
    let manifest = parser::format::scorm12::parse_manifest(&access, &mut warnings).unwrap();
    let file = &manifest.resources.resources[0].files[0];
    assert_eq!(Some(true), file.exists);

    let access = zip_fixture(&[("imsmanifest.xml", SCORM12_MANIFEST)]);
    let manifest = parser::format::scorm12::parse_manifest(&access, &mut warnings).unwrap();
    let file = &manifest.resources.resources[0].files[0];
    assert_eq!(Some(false), file.exists);
}

#[test]
fn xml_base_prefixes_the_launch_url() {
    let manifest = SCORM12_MANIFEST.replace(
        "<resources>",
        r#"<resources xml:base="content/">"#,
    );
    let access = zip_fixture(&[
        ("imsmanifest.xml", manifest.as_str()),
        ("content/index.html", "<html></html>"),
    ]);
    let metadata = parse_detailed(&access, &ParserOptions::default())
        .unwrap()
        .metadata;
    assert_eq!("content/index.html", metadata.launch_url);
}

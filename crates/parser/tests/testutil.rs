//! Shared fixture builders for the end-to-end parser tests.

// Each integration test binary compiles this module separately and uses a
// different slice of it, so unused-item warnings here are expected noise.
#![allow(dead_code)]

use indexmap::IndexMap;
use parser::{AccessError, ArchiveAccess, DirectoryAccess, PackageAccess};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Materializes `files` under a temp directory and opens it for access.
/// Keep the [`TempDir`] alive for as long as the access is used.
pub fn dir_fixture(files: &[(&str, &str)]) -> (TempDir, DirectoryAccess) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (path, body) in files {
        let target = dir.path().join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dirs");
        }
        fs::write(target, body.as_bytes()).expect("failed to write fixture file");
    }
    let access = DirectoryAccess::new(dir.path()).expect("failed to open fixture dir");
    (dir, access)
}

/// Builds an in-memory ZIP archive holding `files`.
pub fn zip_fixture(files: &[(&str, &str)]) -> ArchiveAccess<Cursor<Vec<u8>>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, body) in files {
        writer
            .start_file(*path, FileOptions::default())
            .expect("failed to start zip entry");
        writer
            .write_all(body.as_bytes())
            .expect("failed to write zip entry");
    }
    let cursor = writer.finish().expect("failed to finish zip");
    ArchiveAccess::new(cursor, "fixture.zip".to_string()).expect("failed to open fixture zip")
}

/// Wraps another access and counts `exists` / `exists_batch` calls, for the
/// probe-batching assertions.
pub struct CountingAccess<A> {
    inner: A,
    pub exists_calls: AtomicUsize,
    pub batch_calls: AtomicUsize,
}

impl<A> CountingAccess<A> {
    pub fn new(inner: A) -> Self {
        CountingAccess {
            inner,
            exists_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
        }
    }
}

impl<A: PackageAccess> PackageAccess for CountingAccess<A> {
    fn exists(&self, path: &str) -> Result<bool, AccessError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(path)
    }

    fn exists_batch(&self, paths: &[String]) -> Result<IndexMap<String, bool>, AccessError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists_batch(paths)
    }

    fn read(&self, path: &str) -> Result<Box<dyn Read + Send>, AccessError> {
        self.inner.read(path)
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, AccessError> {
        self.inner.list(prefix)
    }

    fn total_size(&self) -> Result<u64, AccessError> {
        self.inner.total_size()
    }

    fn root_path(&self) -> String {
        self.inner.root_path()
    }
}

/// A minimal, valid SCORM 1.2 manifest: one organization, one item, one
/// resource launching `index.html`.
pub const SCORM12_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest identifier="com.example.golf" version="1.1"
    xmlns="http://www.imsproject.org/xsd/imscp_rootv1p1p2"
    xmlns:adlcp="http://www.adlnet.org/xsd/adlcp_rootv1p2">
  <metadata>
    <schema>ADL SCORM</schema>
    <schemaversion>1.2</schemaversion>
  </metadata>
  <organizations default="org-id">
    <organization identifier="org-id">
      <title>Golf Explained</title>
      <item identifier="item-1" identifierref="res-id">
        <title>Playing the Game</title>
      </item>
    </organization>
  </organizations>
  <resources>
    <resource identifier="res-id" type="webcontent" adlcp:scormtype="sco" href="index.html">
      <file href="index.html"/>
    </resource>
  </resources>
</manifest>
"#;

/// A SCORM 2004 manifest whose second activity carries a primary objective
/// mapping and a rollup rule.
pub const SCORM2004_FULL_SEQUENCING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest identifier="com.example.sequenced" version="1.0"
    xmlns="http://www.imsglobal.org/xsd/imscp_v1p1"
    xmlns:adlcp="http://www.adlnet.org/xsd/adlcp_v1p3"
    xmlns:imsss="http://www.imsglobal.org/xsd/imsss">
  <metadata>
    <schema>ADL SCORM</schema>
    <schemaversion>2004 4th Edition</schemaversion>
  </metadata>
  <organizations default="org">
    <organization identifier="org">
      <title>Sequenced Course</title>
      <item identifier="act-1" identifierref="res-1">
        <title>Module One</title>
      </item>
      <item identifier="act-2" identifierref="res-2">
        <title>Module Two</title>
        <imsss:sequencing>
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
        </imsss:sequencing>
      </item>
    </organization>
  </organizations>
  <resources>
    <resource identifier="res-1" type="webcontent" adlcp:scormType="sco" href="one.html">
      <file href="one.html"/>
    </resource>
    <resource identifier="res-2" type="webcontent" adlcp:scormType="sco" href="two.html">
      <file href="two.html"/>
    </resource>
  </resources>
</manifest>
"#;

/// The minimum viable AICC file set.
pub const AICC_CRS: &str = "\
[Course]
Course_Creator=ACME
Course_ID=GOLF-AICC
Total_AUs=1
Version=1.0

[Course_Data]
Course_Title=Hello

[Course_Behavior]
Max_Normal=99
";

pub const AICC_DES: &str = "\
\"System_ID\",\"Developer_ID\",\"Title\",\"Description\"
\"A1\",\"DEV-1\",\"Hello\",\"An assignable unit\"
";

pub const AICC_AU: &str = "\
\"System_ID\",\"Command_Line\",\"File_Name\",\"Core_Vendor\",\"Type\",\"Max_Score\",\"Mastery_Score\",\"Web_Launch\",\"AU_Password\"
\"A1\",\"\",\"start.html\",\"\",\"\",\"100\",\"80\",\"\",\"\"
";

pub const AICC_CST: &str = "\
\"Block\",\"Member\"
\"ROOT\",\"A1\"
";

/// A one-AU cmi5 course structure.
pub const CMI5_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<courseStructure xmlns="https://w3id.org/xapi/profiles/cmi5/v1/CourseStructure.xsd">
  <course id="https://example.com/course/golf">
    <title><langstring lang="en-US">T</langstring></title>
    <description><langstring lang="en-US">A cmi5 course</langstring></description>
  </course>
  <au id="https://example.com/course/golf/au1" moveOn="Passed" masteryScore="0.8">
    <title><langstring lang="en-US">First AU</langstring></title>
    <description><langstring lang="en-US">Launches the content</langstring></description>
    <url>launch.html</url>
  </au>
</courseStructure>
"#;

/// A two-activity TinCan manifest; the second activity is the course.
pub const TINCAN_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<tincan xmlns="http://projecttincan.com/tincan.xsd">
  <activities>
    <activity id="http://example.com/activities/quiz"
        type="http://adlnet.gov/expapi/activities/assessment">
      <name>Quiz</name>
    </activity>
    <activity id="http://example.com/activities/golf-course"
        type="http://adlnet.gov/expapi/activities/course">
      <name lang="en-US">Golf for Beginners</name>
      <description lang="en-US">A TinCan packaged course</description>
      <launch lang="en-us">index_lms.html</launch>
    </activity>
  </activities>
</tincan>
"#;

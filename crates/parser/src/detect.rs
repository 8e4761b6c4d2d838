//! Package-type detection.
//!
//! Probes the access layer in a fixed priority order and stops at the first
//! match. Probes only use existence checks, listings, and one bounded peek
//! at `imsmanifest.xml` to tell the two SCORM editions apart; no file is
//! ever fully read here.

use crate::access::{self, PackageAccess};
use crate::deserialize::find_file_ignore_case;
use crate::format::ParseError;
use crate::warnings::Warnings;
use models::ModuleKind;
use std::fmt;

/// How much of `imsmanifest.xml` the edition probe may read. Namespace
/// declarations sit on the root element, well inside this window.
const NAMESPACE_PEEK_LIMIT: usize = 64 * 1024;

/// Substrings that mark a manifest as SCORM 2004 rather than 1.2.
const SCORM_2004_MARKERS: [&str; 4] = [
    "adlcp_v1p3",
    "adlseq",
    "adlnav",
    "imsglobal.org/xsd/imsss",
];

/// No probe matched: records everything that was attempted, and what the
/// package root actually contains.
#[derive(Debug)]
pub struct DetectionError {
    pub root: String,
    pub probes: Vec<ProbeOutcome>,
    pub root_listing: Vec<String>,
}

/// One attempted probe and what it observed.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub probe: &'static str,
    pub observed: String,
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no known packaging standard under '{}':", self.root)?;
        for outcome in &self.probes {
            write!(f, " [{}: {}]", outcome.probe, outcome.observed)?;
        }
        write!(f, "; root contains: {:?}", self.root_listing)
    }
}

impl std::error::Error for DetectionError {}

/// Decides which standard a package implements.
///
/// Priority order: `imsmanifest.xml` (SCORM, edition by namespace peek),
/// `cmi5.xml`, `tincan.xml` (case-insensitive), then any `.crs` file
/// (AICC). An AICC match without at least one `.des`/`.au`/`.cst` sibling
/// still classifies, with a warning.
#[tracing::instrument(level = "debug", skip_all, fields(root = %access.root_path()))]
pub fn detect(
    access: &dyn PackageAccess,
    warnings: &mut Warnings,
) -> Result<ModuleKind, ParseError> {
    let listing = access.list("")?;
    let root_files: Vec<&str> = listing
        .iter()
        .map(String::as_str)
        .filter(|path| !path.contains('/'))
        .collect();
    let mut probes = Vec::new();

    // 1. SCORM: imsmanifest.xml, edition decided by a bounded namespace peek.
    let root_owned: Vec<String> = root_files.iter().map(|s| s.to_string()).collect();
    if let Some(manifest) = find_file_ignore_case(&root_owned, "imsmanifest.xml") {
        let prefix = access::peek(access, manifest, NAMESPACE_PEEK_LIMIT)?;
        let prefix = String::from_utf8_lossy(&prefix);
        let is_2004 = SCORM_2004_MARKERS
            .iter()
            .any(|marker| prefix.contains(marker));
        let kind = if is_2004 {
            ModuleKind::Scorm2004
        } else {
            ModuleKind::Scorm12
        };
        tracing::debug!(manifest = manifest, kind = %kind, "matched SCORM layout");
        return Ok(kind);
    }
    probes.push(ProbeOutcome {
        probe: "imsmanifest.xml",
        observed: "absent".to_string(),
    });

    // 2. cmi5: exact manifest name.
    if access.exists("cmi5.xml")? {
        tracing::debug!("matched cmi5 layout");
        return Ok(ModuleKind::Cmi5);
    }
    probes.push(ProbeOutcome {
        probe: "cmi5.xml",
        observed: "absent".to_string(),
    });

    // 3. TinCan: tincan.xml, any case.
    if find_file_ignore_case(&root_owned, "tincan.xml").is_some() {
        tracing::debug!("matched TinCan layout");
        return Ok(ModuleKind::Xapi);
    }
    probes.push(ProbeOutcome {
        probe: "tincan.xml",
        observed: "absent".to_string(),
    });

    // 4. AICC: any .crs at the root, companions expected but not required.
    if let Some(course_file) = root_files
        .iter()
        .find(|path| has_extension(path, "crs"))
    {
        let has_companion = ["des", "au", "cst"]
            .iter()
            .any(|ext| root_files.iter().any(|path| has_extension(path, ext)));
        if !has_companion {
            warnings.push(
                *course_file,
                "AICC course file has no .des/.au/.cst sibling; classifying as AICC anyway",
            );
        }
        tracing::debug!(course_file = course_file, "matched AICC layout");
        return Ok(ModuleKind::Aicc);
    }
    probes.push(ProbeOutcome {
        probe: "*.crs",
        observed: "absent".to_string(),
    });

    Err(DetectionError {
        root: access.root_path(),
        probes,
        root_listing: listing,
    }
    .into())
}

fn has_extension(path: &str, extension: &str) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, e)| e.eq_ignore_ascii_case(extension))
}

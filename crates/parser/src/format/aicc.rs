//! AICC parsing: the `.crs` INI descriptor plus the CSV tables that travel
//! with it.

use super::{projection, ParseError, Parser, ParserOptions};
use crate::access::{self, PackageAccess};
use crate::deserialize::tabular::{self, Record};
use crate::deserialize::ini::IniDocument;
use crate::warnings::Warnings;
use models::aicc::{AiccPackage, AssignableUnit, Course, CourseStructureRow, Descriptor};
use models::{ModuleMetadata, PackageManifest};

pub struct AiccParser;

impl Parser for AiccParser {
    fn parse(
        &self,
        access: &dyn PackageAccess,
        options: &ParserOptions,
        warnings: &mut Warnings,
    ) -> Result<ModuleMetadata, ParseError> {
        let package = parse_manifest(access, warnings)?;
        projection::project(access, &package, options, warnings)
    }
}

/// Locates the AICC file set by extension across the package root and
/// parses it. `.crs`, `.des`, `.au` and `.cst` are mandatory; `.pre` and
/// `.ort` are preserved as raw tables when present.
pub fn parse_manifest(
    access: &dyn PackageAccess,
    warnings: &mut Warnings,
) -> Result<AiccPackage, ParseError> {
    let listing = access.list("")?;
    let root_files: Vec<String> = listing
        .into_iter()
        .filter(|path| !path.contains('/'))
        .collect();

    let crs_path = require_extension(&root_files, "crs", access)?;
    let des_path = require_extension(&root_files, "des", access)?;
    let au_path = require_extension(&root_files, "au", access)?;
    let cst_path = require_extension(&root_files, "cst", access)?;

    let course = read_course(access, &crs_path, warnings)?;
    let descriptors = read_descriptors(access, &des_path)?;
    let assignable_units = read_assignable_units(access, &au_path, warnings)?;
    let course_structure = read_course_structure(access, &cst_path)?;

    let prerequisites_table = match find_extension(&root_files, "pre") {
        Some(path) => read_table(access, &path)?,
        None => Vec::new(),
    };
    let objectives_relation_table = match find_extension(&root_files, "ort") {
        Some(path) => read_table(access, &path)?,
        None => Vec::new(),
    };

    let package = AiccPackage {
        course,
        descriptors,
        assignable_units,
        course_structure,
        prerequisites_table,
        objectives_relation_table,
    };

    if package.title().is_empty() {
        return Err(ParseError::missing_field("Course_Title", crs_path));
    }
    if package.resolve_launch_url().is_none() {
        return Err(ParseError::missing_field("launch URL", au_path));
    }
    Ok(package)
}

fn find_extension(root_files: &[String], extension: &str) -> Option<String> {
    root_files
        .iter()
        .find(|path| {
            path.rsplit_once('.')
                .is_some_and(|(_, e)| e.eq_ignore_ascii_case(extension))
        })
        .cloned()
}

fn require_extension(
    root_files: &[String],
    extension: &'static str,
    access: &dyn PackageAccess,
) -> Result<String, ParseError> {
    find_extension(root_files, extension).ok_or_else(|| ParseError::MissingManifest {
        name: match extension {
            "crs" => "*.crs",
            "des" => "*.des",
            "au" => "*.au",
            _ => "*.cst",
        },
        root: access.root_path(),
    })
}

fn read_course(
    access: &dyn PackageAccess,
    path: &str,
    warnings: &mut Warnings,
) -> Result<Course, ParseError> {
    let bytes = access::read_all(access, path)?;
    let ini = IniDocument::parse(&bytes);
    // Title and identity live under [Course_Data] per the guidelines, but
    // several tools write them under [Course]; both are recognized.
    let sections = ["course_data", "course"];

    let description = ini
        .section("course_description")
        .map(|section| {
            let text = section.text();
            if text.is_empty() {
                section.get("description").unwrap_or_default().to_string()
            } else {
                text
            }
        })
        .filter(|d| !d.is_empty());

    Ok(Course {
        course_title: ini
            .get_first(&sections, "course_title")
            .unwrap_or_default()
            .to_string(),
        course_id: ini.get_first(&sections, "course_id").map(str::to_string),
        course_creator: ini
            .get_first(&sections, "course_creator")
            .map(str::to_string),
        course_system: ini
            .get_first(&sections, "course_system")
            .map(str::to_string),
        level: ini.get_first(&sections, "level").map(str::to_string),
        total_aus: lenient_u32(ini.get_first(&sections, "total_aus"), path, "Total_AUs", warnings),
        total_blocks: lenient_u32(
            ini.get_first(&sections, "total_blocks"),
            path,
            "Total_Blocks",
            warnings,
        ),
        version: ini.get_first(&sections, "version").map(str::to_string),
        max_normal: lenient_u32(
            ini.get("course_behavior", "max_normal"),
            path,
            "Max_Normal",
            warnings,
        ),
        description,
    })
}

fn lenient_u32(
    raw: Option<&str>,
    path: &str,
    key: &str,
    warnings: &mut Warnings,
) -> Option<u32> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(
                format!("{path}#{key}"),
                format_args!("invalid integer '{raw}', ignoring"),
            );
            None
        }
    }
}

fn lenient_f64(raw: Option<&String>, path: &str, key: &str, warnings: &mut Warnings) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(
                format!("{path}#{key}"),
                format_args!("invalid decimal '{raw}', ignoring"),
            );
            None
        }
    }
}

fn read_descriptors(
    access: &dyn PackageAccess,
    path: &str,
) -> Result<Vec<Descriptor>, ParseError> {
    let records = read_table(access, path)?;
    Ok(records
        .into_iter()
        .map(|record| Descriptor {
            system_id: field(&record, "system_id"),
            developer_id: optional_field(&record, "developer_id"),
            title: field(&record, "title"),
            description: optional_field(&record, "description"),
        })
        .collect())
}

fn read_assignable_units(
    access: &dyn PackageAccess,
    path: &str,
    warnings: &mut Warnings,
) -> Result<Vec<AssignableUnit>, ParseError> {
    let records = read_table(access, path)?;
    Ok(records
        .into_iter()
        .map(|record| AssignableUnit {
            system_id: field(&record, "system_id"),
            file_name: record
                .get("file_name")
                .or_else(|| record.get("url"))
                .cloned()
                .unwrap_or_default(),
            web_launch: optional_field(&record, "web_launch"),
            command_line: optional_field(&record, "command_line"),
            au_type: optional_field(&record, "type"),
            max_score: lenient_f64(record.get("max_score"), path, "Max_Score", warnings),
            mastery_score: lenient_f64(record.get("mastery_score"), path, "Mastery_Score", warnings),
            max_time_allowed: optional_field(&record, "max_time_allowed"),
            time_limit_action: optional_field(&record, "time_limit_action"),
            system_vendor: optional_field(&record, "system_vendor"),
            core_vendor: optional_field(&record, "core_vendor"),
            au_password: optional_field(&record, "au_password"),
        })
        .collect())
}

fn read_course_structure(
    access: &dyn PackageAccess,
    path: &str,
) -> Result<Vec<CourseStructureRow>, ParseError> {
    let bytes = access::read_all(access, path)?;
    let rows =
        tabular::read_rows(&bytes).map_err(|cause| ParseError::manifest_parse(path, cause))?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let mut cells = row.into_iter();
            let block = cells.next()?;
            Some(CourseStructureRow {
                block,
                members: cells.filter(|member| !member.is_empty()).collect(),
            })
        })
        .collect())
}

fn read_table(access: &dyn PackageAccess, path: &str) -> Result<Vec<Record>, ParseError> {
    let bytes = access::read_all(access, path)?;
    tabular::read_records(&bytes).map_err(|cause| ParseError::manifest_parse(path, cause))
}

fn field(record: &Record, key: &str) -> String {
    record.get(key).cloned().unwrap_or_default()
}

fn optional_field(record: &Record, key: &str) -> Option<String> {
    record.get(key).filter(|value| !value.is_empty()).cloned()
}

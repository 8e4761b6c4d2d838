//! LOM subtree reading. Handles both the old IMS binding
//! (`<langstring lang="en">`) and the IEEE binding (`<string language="en">`,
//! plain-text vocabulary values), since packages in the wild mix them
//! freely.

use crate::deserialize::xml;
use crate::warnings::Warnings;
use models::lang::{LangString, SingleLangString, SourceValuePair};
use models::lom::{
    Annotation, Classification, Contribute, Educational, General, Lifecycle, Lom, LomDate,
    LomDuration, LomIdentifier, MetaMetadata, OrComposite, Relation, RelationResource, Requirement,
    Rights, Taxon, TaxonPath, Technical, UnknownSentinel, YesNo,
};
use num_bigint::BigUint;
use roxmltree::Node;
use std::str::FromStr;

/// Reads a `<lom>` element into the typed model. Never fails: anomalies
/// degrade to warnings pushed during vocabulary and numeric reads.
pub fn read_lom(node: Node, path: &str) -> Lom {
    // Vocabulary warnings inside LOM trees are frequent enough in real
    // packages that they are logged but not accumulated per-field here;
    // the caller-level warning list captures structural problems.
    let mut warnings = Warnings::new();
    read_lom_with_warnings(node, path, &mut warnings)
}

pub fn read_lom_with_warnings(node: Node, path: &str, warnings: &mut Warnings) -> Lom {
    Lom {
        general: xml::child(node, "general")
            .map(|general| read_general(general, path, warnings))
            .unwrap_or_default(),
        lifecycle: xml::child(node, "lifecycle")
            .map(|lifecycle| read_lifecycle(lifecycle, path, warnings))
            .unwrap_or_default(),
        meta_metadata: xml::child(node, "metametadata")
            .map(|meta| read_meta_metadata(meta, path, warnings))
            .unwrap_or_default(),
        technical: xml::child(node, "technical")
            .map(|technical| read_technical(technical, path, warnings))
            .unwrap_or_default(),
        educational: xml::child(node, "educational")
            .map(|educational| read_educational(educational, path, warnings))
            .unwrap_or_default(),
        rights: xml::child(node, "rights")
            .map(|rights| read_rights(rights, path, warnings))
            .unwrap_or_default(),
        relations: xml::children(node, "relation")
            .map(|relation| read_relation(relation, path, warnings))
            .collect(),
        annotations: xml::children(node, "annotation")
            .map(read_annotation)
            .collect(),
        classifications: xml::children(node, "classification")
            .map(|classification| read_classification(classification, path, warnings))
            .collect(),
    }
}

/// All language-tagged strings under `node`: `<langstring>` or `<string>`
/// children, or the node's own text as an untagged fallback.
fn lang_strings(node: Node) -> Vec<LangString> {
    let mut strings: Vec<LangString> = xml::elements(node)
        .filter(|child| xml::named(*child, "langstring") || xml::named(*child, "string"))
        .filter_map(|child| {
            let value = xml::text(child)?;
            Some(LangString {
                language: xml::attribute(child, "lang")
                    .or_else(|| xml::attribute(child, "language"))
                    .map(str::to_string),
                value,
            })
        })
        .collect();
    if strings.is_empty() {
        if let Some(value) = xml::text(node) {
            strings.push(LangString {
                language: None,
                value,
            });
        }
    }
    strings
}

fn first_lang_string(node: Node) -> Option<SingleLangString> {
    lang_strings(node).into_iter().next()
}

fn child_lang_string(node: Node, name: &str) -> Option<SingleLangString> {
    xml::child(node, name).and_then(first_lang_string)
}

fn child_lang_strings(node: Node, name: &str) -> Vec<LangString> {
    xml::children(node, name).flat_map(lang_strings).collect()
}

/// The plain-text payload of a vocabulary leaf, whichever binding wrote it.
fn vocabulary_token(node: Node) -> Option<String> {
    first_lang_string(node).map(|s| s.value)
}

/// A `source`/`value` pair whose value vocabulary admits unknown tokens.
fn vocabulary_pair<T>(node: Node, path: &str, warnings: &mut Warnings) -> Option<SourceValuePair<T>>
where
    T: FromStr + UnknownSentinel,
{
    let source = xml::child(node, "source")
        .and_then(vocabulary_token)
        .unwrap_or_default();
    let raw = xml::child(node, "value").and_then(vocabulary_token)?;
    let value = match T::from_str(raw.trim()) {
        Ok(value) => value,
        Err(_) => {
            warnings.push(path, format_args!("unknown vocabulary value '{raw}'"));
            T::UNKNOWN
        }
    };
    Some(SourceValuePair { source, value })
}

fn child_vocabulary<T>(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> Option<SourceValuePair<T>>
where
    T: FromStr + UnknownSentinel,
{
    let child = xml::child(node, name)?;
    vocabulary_pair(child, &format!("{path}/{name}"), warnings)
}

/// Like [`child_vocabulary`], but for the two-valued `YesNo`, which must
/// not admit unknown tokens; violations warn and drop the field.
fn child_yes_no(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> Option<SourceValuePair<YesNo>> {
    let child = xml::child(node, name)?;
    let source = xml::child(child, "source")
        .and_then(vocabulary_token)
        .unwrap_or_default();
    let raw = xml::child(child, "value").and_then(vocabulary_token)?;
    match YesNo::from_str(&raw) {
        Ok(value) => Some(SourceValuePair { source, value }),
        Err(_) => {
            warnings.push(
                format!("{path}/{name}"),
                format_args!("value '{raw}' is not yes/no"),
            );
            None
        }
    }
}

fn read_identifier(node: Node) -> LomIdentifier {
    LomIdentifier {
        catalog: xml::child_text(node, "catalog"),
        entry: xml::child(node, "entry")
            .and_then(first_lang_string)
            .map(|s| s.value),
    }
}

fn read_general(node: Node, path: &str, warnings: &mut Warnings) -> General {
    General {
        identifiers: xml::children(node, "identifier")
            .map(read_identifier)
            .collect(),
        title: child_lang_string(node, "title"),
        languages: xml::children(node, "language")
            .filter_map(|language| xml::text(language))
            .collect(),
        descriptions: child_lang_strings(node, "description"),
        keywords: xml::children(node, "keyword")
            .filter_map(first_lang_string)
            .collect(),
        coverage: child_lang_strings(node, "coverage"),
        structure: child_vocabulary(node, "structure", path, warnings),
        aggregation_level: child_vocabulary(node, "aggregationlevel", path, warnings),
    }
}

fn read_lifecycle(node: Node, path: &str, warnings: &mut Warnings) -> Lifecycle {
    Lifecycle {
        version: child_lang_string(node, "version"),
        status: child_vocabulary(node, "status", path, warnings),
        contributors: xml::children(node, "contribute")
            .map(|contribute| read_contribute(contribute, path, warnings))
            .collect(),
    }
}

fn read_contribute<R>(node: Node, path: &str, warnings: &mut Warnings) -> Contribute<R>
where
    R: FromStr + UnknownSentinel,
{
    Contribute {
        role: child_vocabulary(node, "role", path, warnings),
        entities: xml::children(node, "centity")
            .chain(xml::children(node, "entity"))
            .filter_map(|entity| xml::child_text(entity, "vcard").or_else(|| xml::text(entity)))
            .collect(),
        date: xml::child(node, "date").map(read_date),
    }
}

fn read_date(node: Node) -> LomDate {
    LomDate {
        date_time: xml::child_text(node, "datetime"),
        description: child_lang_string(node, "description"),
    }
}

fn read_meta_metadata(node: Node, path: &str, warnings: &mut Warnings) -> MetaMetadata {
    MetaMetadata {
        identifiers: xml::children(node, "identifier")
            .map(read_identifier)
            .collect(),
        contributors: xml::children(node, "contribute")
            .map(|contribute| read_contribute(contribute, path, warnings))
            .collect(),
        metadata_schemas: xml::children(node, "metadatascheme")
            .chain(xml::children(node, "metadataschema"))
            .filter_map(|schema| xml::text(schema))
            .collect(),
        language: xml::child_text(node, "language"),
    }
}

fn read_technical(node: Node, path: &str, warnings: &mut Warnings) -> Technical {
    let size = xml::child_text(node, "size").and_then(|raw| {
        match BigUint::from_str(raw.trim()) {
            Ok(size) => Some(size),
            Err(_) => {
                warnings.push(
                    format!("{path}/technical/size"),
                    format_args!("invalid size '{raw}'"),
                );
                None
            }
        }
    });

    Technical {
        formats: xml::children(node, "format")
            .filter_map(|format| xml::text(format))
            .collect(),
        size,
        locations: xml::children(node, "location")
            .filter_map(|location| xml::text(location))
            .collect(),
        requirements: xml::children(node, "requirement")
            .map(|requirement| read_requirement(requirement, path, warnings))
            .collect(),
        installation_remarks: child_lang_string(node, "installationremarks"),
        other_platform_requirements: child_lang_string(node, "otherplatformrequirements"),
        duration: xml::child(node, "duration")
            .map(|duration| read_duration(duration, &format!("{path}/technical/duration"), warnings)),
    }
}

fn read_requirement(node: Node, path: &str, warnings: &mut Warnings) -> Requirement {
    let mut or_composites: Vec<OrComposite> = xml::children(node, "orcomposite")
        .map(|composite| read_or_composite(composite, path, warnings))
        .collect();
    // The old binding puts type/name directly on the requirement.
    if or_composites.is_empty() && xml::child(node, "type").is_some() {
        or_composites.push(read_or_composite(node, path, warnings));
    }
    Requirement { or_composites }
}

fn read_or_composite(node: Node, path: &str, warnings: &mut Warnings) -> OrComposite {
    OrComposite {
        kind: child_vocabulary(node, "type", path, warnings),
        name: child_vocabulary(node, "name", path, warnings),
        minimum_version: xml::child_text(node, "minimumversion"),
        maximum_version: xml::child_text(node, "maximumversion"),
    }
}

fn read_duration(node: Node, path: &str, warnings: &mut Warnings) -> LomDuration {
    // IEEE binding nests the span in <duration>, the IMS binding in
    // <datetime>; single-text elements carry it directly.
    let raw = xml::child_text(node, "duration")
        .or_else(|| xml::child_text(node, "datetime"))
        .or_else(|| xml::text(node));
    LomDuration {
        duration: raw
            .map(|raw| xml::lenient_duration(&raw, path, warnings))
            .unwrap_or_default(),
        description: child_lang_string(node, "description"),
    }
}

fn read_educational(node: Node, path: &str, warnings: &mut Warnings) -> Educational {
    Educational {
        interactivity_type: child_vocabulary(node, "interactivitytype", path, warnings),
        learning_resource_types: xml::children(node, "learningresourcetype")
            .filter_map(|entry| vocabulary_pair(entry, path, warnings))
            .collect(),
        interactivity_level: child_vocabulary(node, "interactivitylevel", path, warnings),
        semantic_density: child_vocabulary(node, "semanticdensity", path, warnings),
        intended_end_user_roles: xml::children(node, "intendedenduserrole")
            .filter_map(|entry| vocabulary_pair(entry, path, warnings))
            .collect(),
        contexts: xml::children(node, "context")
            .filter_map(|entry| vocabulary_pair(entry, path, warnings))
            .collect(),
        typical_age_ranges: child_lang_strings(node, "typicalagerange"),
        difficulty: child_vocabulary(node, "difficulty", path, warnings),
        typical_learning_time: xml::child(node, "typicallearningtime").map(|duration| {
            read_duration(
                duration,
                &format!("{path}/educational/typicalLearningTime"),
                warnings,
            )
        }),
        descriptions: child_lang_strings(node, "description"),
        languages: xml::children(node, "language")
            .filter_map(|language| xml::text(language))
            .collect(),
    }
}

fn read_rights(node: Node, path: &str, warnings: &mut Warnings) -> Rights {
    Rights {
        cost: child_yes_no(node, "cost", path, warnings),
        copyright_and_other_restrictions: child_yes_no(
            node,
            "copyrightandotherrestrictions",
            path,
            warnings,
        ),
        description: child_lang_string(node, "description"),
    }
}

fn read_relation(node: Node, path: &str, warnings: &mut Warnings) -> Relation {
    Relation {
        kind: child_vocabulary(node, "kind", path, warnings),
        resource: xml::child(node, "resource")
            .map(|resource| RelationResource {
                identifiers: xml::children(resource, "identifier")
                    .map(read_identifier)
                    .collect(),
                descriptions: child_lang_strings(resource, "description"),
            })
            .unwrap_or_default(),
    }
}

fn read_annotation(node: Node) -> Annotation {
    Annotation {
        entity: xml::child(node, "entity")
            .or_else(|| xml::child(node, "person"))
            .and_then(|entity| xml::child_text(entity, "vcard").or_else(|| xml::text(entity))),
        date: xml::child(node, "date").map(read_date),
        description: child_lang_string(node, "description"),
    }
}

fn read_classification(node: Node, path: &str, warnings: &mut Warnings) -> Classification {
    Classification {
        purpose: child_vocabulary(node, "purpose", path, warnings),
        taxon_paths: xml::children(node, "taxonpath")
            .map(|taxon_path| TaxonPath {
                source: child_lang_string(taxon_path, "source"),
                taxons: xml::children(taxon_path, "taxon")
                    .map(|taxon| Taxon {
                        id: xml::child_text(taxon, "id"),
                        entry: child_lang_string(taxon, "entry"),
                    })
                    .collect(),
            })
            .collect(),
        description: child_lang_string(node, "description"),
        keywords: xml::children(node, "keyword")
            .filter_map(first_lang_string)
            .collect(),
    }
}

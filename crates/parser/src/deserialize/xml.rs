//! XML decoding and tree access.
//!
//! Manifests arrive namespace-qualified, unqualified, or with inconsistent
//! letter case depending on the authoring tool, so every lookup here matches
//! on the local name, case-insensitively. External entities are never
//! resolved and DTD content cannot expand unboundedly; nothing in this
//! module touches the network.

use super::text::trim_indentation;
use crate::warnings::Warnings;
use num_bigint::BigUint;
use roxmltree::{Document, Node, ParsingOptions};
use std::str::FromStr;
use std::time::Duration;
use unicode_bom::Bom;

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(#[from] roxmltree::Error),
}

/// Decodes raw bytes into text: BOM first, then the encoding declared in the
/// XML declaration, UTF-8 otherwise. Undecodable sequences are replaced
/// rather than fatal.
pub fn decode(bytes: &[u8]) -> String {
    let bom = Bom::from(bytes);
    let encoding = match bom {
        Bom::Utf8 => Some(encoding_rs::UTF_8),
        Bom::Utf16Be => Some(encoding_rs::UTF_16BE),
        Bom::Utf16Le => Some(encoding_rs::UTF_16LE),
        _ => declared_encoding(bytes),
    };
    let encoding = encoding.unwrap_or(encoding_rs::UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    // A leading BOM character survives decoding; roxmltree rejects it.
    text.trim_start_matches('\u{feff}').to_string()
}

/// Sniffs `encoding="..."` out of the XML declaration, which is ASCII by
/// construction.
fn declared_encoding(bytes: &[u8]) -> Option<&'static encoding_rs::Encoding> {
    let prefix = &bytes[..bytes.len().min(256)];
    let prefix = std::str::from_utf8(prefix).unwrap_or_default();
    let declaration = prefix.split("?>").next()?;
    let after = declaration.split("encoding").nth(1)?;
    let quoted = after.trim_start().trim_start_matches('=').trim_start();
    let quote = quoted.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let label = quoted[1..].split(quote).next()?;
    encoding_rs::Encoding::for_label(label.as_bytes())
}

/// Parses decoded text into a document. DTD blocks are tolerated (roxmltree
/// bounds internal entity expansion and never fetches external ones).
pub fn document(text: &str) -> Result<Document<'_>, XmlError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Whether the node's local name matches `name`, ignoring case and any
/// namespace prefix.
pub fn named(node: Node, name: &str) -> bool {
    caseless::default_caseless_match_str(node.tag_name().name(), name)
}

/// First child element with the given local name.
pub fn child<'a, 'd>(node: Node<'a, 'd>, name: &str) -> Option<Node<'a, 'd>> {
    node.children()
        .filter(|c| c.is_element())
        .find(|c| named(*c, name))
}

/// All child elements with the given local name, in document order.
pub fn children<'a, 'd: 'a, 'n: 'a>(
    node: Node<'a, 'd>,
    name: &'n str,
) -> impl Iterator<Item = Node<'a, 'd>> + 'a {
    node.children()
        .filter(|c| c.is_element())
        .filter(move |c| named(*c, name))
}

/// All child elements regardless of name.
pub fn elements<'a, 'd>(node: Node<'a, 'd>) -> impl Iterator<Item = Node<'a, 'd>> + 'a {
    node.children().filter(|c| c.is_element())
}

/// Attribute lookup by local name, ignoring case and namespace.
pub fn attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| caseless::default_caseless_match_str(a.name(), name))
        .map(|a| a.value())
}

/// The node's own text content, passed through the indentation trimmer.
/// `None` when the trimmed result is empty.
pub fn text(node: Node) -> Option<String> {
    let mut gathered = String::new();
    for child in node.children() {
        if child.is_text() {
            if let Some(t) = child.text() {
                gathered.push_str(t);
            }
        }
    }
    Some(trim_indentation(&gathered)).filter(|t| !t.is_empty())
}

/// Text of the first child element with the given local name.
pub fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name).and_then(text)
}

/// Lenient boolean: `true/false/1/0/yes/no`, any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Boolean attribute with a field default. A present-but-malformed value
/// warns and yields the default.
pub fn attribute_bool(
    node: Node,
    name: &str,
    default: bool,
    path: &str,
    warnings: &mut Warnings,
) -> bool {
    match attribute(node, name) {
        None => default,
        Some(raw) => parse_bool(raw).unwrap_or_else(|| {
            warnings.push(
                format!("{path}@{name}"),
                format_args!("invalid boolean '{raw}', using {default}"),
            );
            default
        }),
    }
}

/// Decimal attribute with a field default; malformed values warn.
pub fn attribute_f64(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> Option<f64> {
    let raw = attribute(node, name)?;
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(
                format!("{path}@{name}"),
                format_args!("invalid decimal '{raw}', ignoring"),
            );
            None
        }
    }
}

/// `xs:nonNegativeInteger` attribute; arbitrary precision, malformed values
/// warn and are dropped.
pub fn attribute_uint(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> Option<BigUint> {
    let raw = attribute(node, name)?;
    match BigUint::from_str(raw.trim()) {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(
                format!("{path}@{name}"),
                format_args!("invalid non-negative integer '{raw}', ignoring"),
            );
            None
        }
    }
}

/// Parses an ISO-8601 span (`PT1H30M`, `P1DT2H`, fractional seconds
/// allowed). Calendar components use the usual fixed approximations
/// (a year is 365 days, a month 30).
pub fn parse_iso8601_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let rest = raw.strip_prefix('P').or_else(|| raw.strip_prefix('p'))?;
    if rest.is_empty() {
        return None;
    }

    let mut seconds = 0f64;
    let mut in_time = false;
    let mut number = String::new();
    for c in rest.chars() {
        match c {
            'T' | 't' => {
                if !number.is_empty() {
                    return None;
                }
                in_time = true;
            }
            '0'..='9' | '.' | ',' => number.push(if c == ',' { '.' } else { c }),
            unit => {
                let value: f64 = number.parse().ok()?;
                number.clear();
                let factor = match (unit.to_ascii_uppercase(), in_time) {
                    ('Y', false) => 365.0 * 86_400.0,
                    ('M', false) => 30.0 * 86_400.0,
                    ('W', false) => 7.0 * 86_400.0,
                    ('D', false) => 86_400.0,
                    ('H', true) => 3_600.0,
                    ('M', true) => 60.0,
                    ('S', true) => 1.0,
                    _ => return None,
                };
                seconds += value * factor;
            }
        }
    }
    if !number.is_empty() {
        return None;
    }
    Some(Duration::from_secs_f64(seconds))
}

/// Duration leaf with the zero default mandated for unparseable values;
/// warns on malformed input.
pub fn lenient_duration(raw: &str, path: &str, warnings: &mut Warnings) -> Duration {
    match parse_iso8601_duration(raw) {
        Some(duration) => duration,
        None => {
            warnings.push(
                path,
                format_args!("unparseable ISO-8601 duration '{raw}', using zero"),
            );
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookups_ignore_namespace_and_case() {
        let text = r#"<m:Manifest xmlns:m="urn:x" Identifier="course-1">
            <m:ORGANIZATIONS default="org"/>
        </m:Manifest>"#;
        let doc = document(text).unwrap();
        let root = doc.root_element();
        assert!(named(root, "manifest"));
        assert_eq!(Some("course-1"), attribute(root, "identifier"));
        let organizations = child(root, "organizations").unwrap();
        assert_eq!(Some("org"), attribute(organizations, "default"));
    }

    #[test]
    fn text_nodes_run_through_the_trimmer() {
        let text = "<title>\n      Golf\n        Explained\n    </title>";
        let doc = document(text).unwrap();
        assert_eq!(
            Some("Golf\n  Explained".to_string()),
            super::text(doc.root_element())
        );
    }

    #[test]
    fn boolean_spellings() {
        for raw in ["true", "TRUE", "1", "Yes"] {
            assert_eq!(Some(true), parse_bool(raw));
        }
        for raw in ["false", "0", "no", "No"] {
            assert_eq!(Some(false), parse_bool(raw));
        }
        assert_eq!(None, parse_bool("{"));
    }

    #[test]
    fn malformed_numeric_attribute_warns_and_defaults() {
        let text = r#"<objective minNormalizedMeasure="{"/>"#;
        let doc = document(text).unwrap();
        let mut warnings = Warnings::new();
        let value = attribute_f64(
            doc.root_element(),
            "minNormalizedMeasure",
            "manifest.xml#objective",
            &mut warnings,
        );
        assert_eq!(None, value);
        assert_eq!(1, warnings.len());
    }

    #[test]
    fn iso_durations() {
        assert_eq!(
            Some(Duration::from_secs(5400)),
            parse_iso8601_duration("PT1H30M")
        );
        assert_eq!(
            Some(Duration::from_secs(86_400 + 2 * 3_600)),
            parse_iso8601_duration("P1DT2H")
        );
        assert_eq!(
            Some(Duration::from_millis(1500)),
            parse_iso8601_duration("PT1.5S")
        );
        assert_eq!(None, parse_iso8601_duration("90 minutes"));
        assert_eq!(None, parse_iso8601_duration("P"));
    }

    #[test]
    fn utf16_with_bom_decodes() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<a/>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!("<a/>", decode(&bytes));
    }

    #[test]
    fn declared_encoding_is_honored() {
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><t>caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</t>");
        let text = decode(&bytes);
        assert!(text.contains("café"));
    }
}

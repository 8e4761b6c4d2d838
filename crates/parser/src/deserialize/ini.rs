//! Sectioned INI reading for AICC course descriptors.
//!
//! AICC tools emit these files in ISO-8859-1 about as often as UTF-8, key
//! case varies by vendor, and `[Course_Description]` holds free text rather
//! than key/value pairs. Lookups are therefore case-insensitive and lines
//! without a `=` are kept as section text instead of being dropped.

use indexmap::IndexMap;

/// One `[Section]`: key/value entries plus any bare text lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniSection {
    entries: IndexMap<String, String>,
    text: Vec<String>,
}

impl IniSection {
    /// Case-insensitive key lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize(key)).map(String::as_str)
    }

    /// Like [`IniSection::get`], but empty values count as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Bare lines of the section, joined.
    pub fn text(&self) -> String {
        self.text.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.text.is_empty()
    }
}

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    sections: IndexMap<String, IniSection>,
}

impl IniDocument {
    /// Decodes and parses. UTF-8 is attempted first; anything else is read
    /// as ISO-8859-1 (via the WHATWG `latin1` mapping).
    pub fn parse(bytes: &[u8]) -> Self {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        };
        Self::parse_text(&text)
    }

    pub fn parse_text(text: &str) -> Self {
        let mut sections: IndexMap<String, IniSection> = IndexMap::new();
        let mut current = String::new();
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = normalize(name);
                sections.entry(current.clone()).or_default();
                continue;
            }
            let section = sections.entry(current.clone()).or_default();
            match line.split_once('=') {
                Some((key, value)) => {
                    // Missing values are recorded as empty, not dropped.
                    section
                        .entries
                        .insert(normalize(key.trim()), value.trim().to_string());
                }
                None => section.text.push(line.to_string()),
            }
        }
        IniDocument { sections }
    }

    /// Case-insensitive section lookup.
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(&normalize(name))
    }

    /// `section.key`, case-insensitive on both.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Searches several sections for the first non-empty value of `key`.
    pub fn get_first<'a>(&'a self, sections: &[&str], key: &str) -> Option<&'a str> {
        sections
            .iter()
            .filter_map(|name| self.section(name))
            .find_map(|section| section.get_non_empty(key))
    }
}

fn normalize(token: &str) -> String {
    token.to_lowercase()
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "\
[Course]
Course_Creator=ACME Author
Course_ID=GOLF-101
Course_Title=Golf Basics
Level=1
Empty_Key=

[Course_Behavior]
Max_Normal=99

[Course_Description]
An introduction to golf.
Covers etiquette and scoring.
";

    #[test]
    fn sections_and_keys_are_case_insensitive() {
        let ini = IniDocument::parse_text(SAMPLE);
        assert_eq!(Some("Golf Basics"), ini.get("COURSE", "course_title"));
        assert_eq!(Some("99"), ini.get("course_behavior", "MAX_NORMAL"));
    }

    #[test]
    fn missing_values_are_empty_not_dropped() {
        let ini = IniDocument::parse_text(SAMPLE);
        assert_eq!(Some(""), ini.get("Course", "Empty_Key"));
        assert_eq!(None, ini.get("Course", "Absent_Key"));
    }

    #[test]
    fn bare_lines_accumulate_as_section_text() {
        let ini = IniDocument::parse_text(SAMPLE);
        let description = ini.section("Course_Description").unwrap().text();
        assert_eq!(
            "An introduction to golf.\nCovers etiquette and scoring.",
            description
        );
    }

    #[test]
    fn latin1_bytes_decode() {
        let mut bytes = b"[Course]\nCourse_Title=Caf".to_vec();
        bytes.push(0xE9);
        let ini = IniDocument::parse(&bytes);
        assert_eq!(Some("Café"), ini.get("Course", "Course_Title"));
    }
}

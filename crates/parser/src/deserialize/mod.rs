//! Deserialization utilities shared by the format parsers: XML, INI and CSV
//! readers plus the lenient coercers that absorb real-world authoring-tool
//! sloppiness.

pub mod ini;
pub mod tabular;
pub mod text;
pub mod xml;

/// Finds `name` in a listing by case-insensitive comparison, returning the
/// entry's actual spelling. Listings come from
/// [`crate::access::PackageAccess::list`]; only whole paths match, so a
/// root-level search will not be fooled by nested files of the same name.
pub fn find_file_ignore_case<'a>(listing: &'a [String], name: &str) -> Option<&'a str> {
    listing
        .iter()
        .map(String::as_str)
        .find(|candidate| caseless::default_caseless_match_str(candidate, name))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_ignores_case_but_returns_actual_spelling() {
        let listing = vec![
            "content/index.html".to_string(),
            "TinCan.XML".to_string(),
            "deep/tincan.xml".to_string(),
        ];
        assert_eq!(
            Some("TinCan.XML"),
            find_file_ignore_case(&listing, "tincan.xml")
        );
        assert_eq!(None, find_file_ignore_case(&listing, "cmi5.xml"));
    }
}

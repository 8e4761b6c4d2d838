//! Whitespace normalization for XML text nodes.

/// Strips the minimum common leading whitespace shared by all non-blank
/// lines, then trims the result. Relative indentation inside the block is
/// preserved, so the output is stable under uniformly indenting every
/// non-empty line or appending trailing newlines.
pub fn trim_indentation(raw: &str) -> String {
    let common_indent = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut normalized = String::with_capacity(raw.len());
    for (position, line) in raw.lines().enumerate() {
        if position > 0 {
            normalized.push('\n');
        }
        if line.trim().is_empty() {
            continue;
        }
        let mut cut = 0;
        for c in line.chars() {
            if cut >= common_indent || !c.is_whitespace() {
                break;
            }
            cut += c.len_utf8();
        }
        normalized.push_str(&line[cut..]);
    }
    normalized.trim().to_string()
}

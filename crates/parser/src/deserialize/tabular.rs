//! CSV reading for the AICC table files (`.des`, `.au`, `.cst`, `.pre`,
//! `.ort`): comma-separated, double-quoted, header row mandatory.

use indexmap::IndexMap;

/// One row keyed by lowercased header name, so projections match columns
/// case-insensitively. Unknown headers survive untouched.
pub type Record = IndexMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("missing header row")]
    MissingHeader,

    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}

/// Reads all rows into records. Rows whose every cell is blank are dropped.
/// Short rows leave their trailing columns absent; extra cells beyond the
/// header are ignored.
pub fn read_records(bytes: &[u8]) -> Result<Vec<Record>, TableError> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(TableError::MissingHeader);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut record = Record::new();
        for (position, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if let Some(cell) = row.get(position) {
                record.insert(header.clone(), cell.trim().to_string());
            }
        }
        records.push(record);
    }
    Ok(records)
}

/// Positional read for tables whose column count varies by row (`.cst`): the
/// header is skipped, blank rows dropped, and each row returned as its
/// non-empty trailing cells trimmed.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, TableError> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    if reader.headers()?.is_empty() {
        return Err(TableError::MissingHeader);
    }

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(row.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn headers_are_lowercased_and_blank_rows_dropped() {
        let csv = "System_ID,Type,Command_Line,File_Name\n\
                   \"A1\",\"AU\",\"\",\"start.html\"\n\
                   ,,,\n\
                   \"A2\",\"AU\",\"\",\"next.html\"\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(2, records.len());
        assert_eq!(Some("start.html"), records[0].get("file_name").map(String::as_str));
        assert_eq!(Some("A2"), records[1].get("system_id").map(String::as_str));
    }

    #[test]
    fn short_rows_leave_missing_columns_absent() {
        let csv = "block,member\nROOT\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(Some("ROOT"), records[0].get("block").map(String::as_str));
        assert_eq!(None, records[0].get("member"));
    }

    #[test]
    fn positional_rows_preserve_member_lists() {
        let csv = "block,member\n\"ROOT\",\"A1\",\"A2\"\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(vec![vec!["ROOT", "A1", "A2"]], rows);
    }
}

//! Reading licensed export files.
//!
//! Exports arrive as `*.json` (an array of objects) or `*.csv` (header row)
//! and use loosely agreed field names. Everything is read into untyped
//! records here; field mapping happens in [`crate::normalize`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde_json::{Map, Value};

use crate::error::ReviewsError;

/// One export row or object, keyed by its original field names.
pub type RawRecord = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub path: PathBuf,
    /// File name without its extension; used as the fallback source name.
    pub stem: String,
    pub records: Vec<RawRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Json,
    Csv,
}

fn export_format(path: &Path) -> Option<ExportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(ExportFormat::Json),
        "csv" => Some(ExportFormat::Csv),
        _ => None,
    }
}

/// Read every export in `dir`, sorted by file name.
///
/// A missing directory yields no files. Other entries are ignored.
///
/// # Errors
///
/// Returns [`ReviewsError::Io`] if the directory or a file cannot be read,
/// [`ReviewsError::Json`] or [`ReviewsError::Csv`] if a file is malformed.
pub fn read_exports(dir: &Path) -> Result<Vec<ExportFile>, ReviewsError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(dir = %dir.display(), "exports directory not found; nothing to read");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(ReviewsError::Io {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReviewsError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && export_format(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    paths.into_iter().map(|path| read_export(&path)).collect()
}

fn read_export(path: &Path) -> Result<ExportFile, ReviewsError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReviewsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let records = match export_format(path) {
        Some(ExportFormat::Json) => parse_json_export(&content).map_err(|e| ReviewsError::Json {
            path: path.to_path_buf(),
            source: e,
        })?,
        Some(ExportFormat::Csv) => parse_csv_export(&content).map_err(|e| ReviewsError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?,
        None => Vec::new(),
    };

    tracing::debug!(path = %path.display(), records = records.len(), "read export");

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ExportFile {
        path: path.to_path_buf(),
        stem,
        records,
    })
}

/// Objects from a JSON array. A document that is not an array holds no
/// records; non-object array elements are skipped.
///
/// # Errors
///
/// Returns the parse error for invalid JSON.
pub fn parse_json_export(content: &str) -> Result<Vec<RawRecord>, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        tracing::warn!("JSON export is not an array; ignoring it");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}

/// Rows of a CSV export keyed by trimmed header names.
///
/// Rows may be shorter or longer than the header; missing cells read as
/// empty strings and columns with an empty header are dropped.
///
/// # Errors
///
/// Returns the reader error for malformed CSV.
pub fn parse_csv_export(content: &str) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut record = RawRecord::new();
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let cell = row.get(idx).unwrap_or_default();
            record.insert(header.to_string(), Value::String(cell.to_string()));
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_handles_quotes_commas_and_short_rows() {
        let content = "broker, rating ,text,,date\n\
                       exness,5,\"Fast, \"\"reliable\"\" withdrawals\",x,2026-02-01\n\
                       xm-group,4\n";
        let records = parse_csv_export(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["rating"], "5");
        assert_eq!(records[0]["text"], r#"Fast, "reliable" withdrawals"#);
        assert!(!records[0].contains_key(""));
        assert_eq!(records[1]["broker"], "xm-group");
        assert_eq!(records[1]["text"], "");
        assert_eq!(records[1]["date"], "");
    }

    #[test]
    fn json_non_array_is_ignored() {
        assert!(parse_json_export(r#"{"reviews": []}"#).unwrap().is_empty());
    }

    #[test]
    fn json_array_keeps_objects_only() {
        let records = parse_json_export(r#"[{"broker": "exness"}, 3, "x"]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["broker"], "exness");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_json_export("[{").is_err());
    }

    #[test]
    fn missing_directory_reads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = read_exports(&dir.path().join("exports")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn exports_are_read_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-trustpilot.CSV"), "broker,text\nexness,ok\n").unwrap();
        std::fs::write(dir.path().join("a-partner.json"), r#"[{"broker":"libertex"}]"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = read_exports(dir.path()).unwrap();
        let stems: Vec<&str> = files.iter().map(|f| f.stem.as_str()).collect();
        assert_eq!(stems, vec!["a-partner", "b-trustpilot"]);
        assert_eq!(files[1].records[0]["broker"], "exness");
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "not json").unwrap();
        let err = read_exports(dir.path()).unwrap_err();
        assert!(matches!(err, ReviewsError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}

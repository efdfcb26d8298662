use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Trim};

use crate::config::constants::MISSING_MARKERS;
use crate::utils::errors::{IntensityError, Result};

/// Fail with `NotFound` unless `path` names an existing file.
pub fn require_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IntensityError::not_found(what, path))
    }
}

pub fn open_source(path: &Path, what: &str) -> Result<File> {
    require_file(path, what)?;
    Ok(File::open(path)?)
}

/// Reader for a headed CSV source; header whitespace is trimmed (" Value " -> "Value").
pub fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader)
}

/// Parse a numeric cell, stripping thousands separators.
///
/// Empty cells and the StatCan suppression markers are `None`; anything else
/// that does not parse is a `Parse` error.
pub fn parse_number(raw: &str, source_name: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        return Ok(None);
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != ' ').collect();
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|e| IntensityError::parse(source_name, raw, e.to_string()))
}

/// Like [`parse_number`] but a missing value counts as zero.
pub fn parse_number_or_zero(raw: &str, source_name: &str) -> Result<f64> {
    Ok(parse_number(raw, source_name)?.unwrap_or(0.0))
}

/// Position of a named column, compared after trimming and ignoring case.
pub fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

pub fn required_column(headers: &csv::StringRecord, name: &str, source_name: &str) -> Result<usize> {
    column_index(headers, name).ok_or_else(|| {
        IntensityError::parse(source_name, name, "required column is missing from the header")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_number_strips_separators() {
        assert_eq!(parse_number("1,234,567", "t").unwrap(), Some(1234567.0));
        assert_eq!(parse_number(" 12.5 ", "t").unwrap(), Some(12.5));
        assert_eq!(parse_number("-3", "t").unwrap(), Some(-3.0));
    }

    #[test]
    fn test_parse_number_missing_markers() {
        assert_eq!(parse_number("", "t").unwrap(), None);
        assert_eq!(parse_number("..", "t").unwrap(), None);
        assert_eq!(parse_number("x", "t").unwrap(), None);
        assert_eq!(parse_number_or_zero("  ", "t").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert!(matches!(
            parse_number("12 MW", "plants.csv"),
            Err(IntensityError::Parse { .. })
        ));
    }

    #[test]
    fn test_open_source_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        match open_source(&path, "wind breakdown") {
            Err(IntensityError::NotFound { what, attempted }) => {
                assert_eq!(what, "wind breakdown");
                assert_eq!(attempted, vec![path]);
            }
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_csv_reader_trims_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Scenario, Value \nA,\"1,000\"").unwrap();
        let mut reader = csv_reader(open_source(&path, "t").unwrap());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(column_index(&headers, "Value"), Some(1));
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(parse_number(&record[1], "t").unwrap(), Some(1000.0));
    }
}

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::decompression::DecompressionReader;
use crate::record::Record;

/// Failure to produce a record sequence from a file
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened, read, or decompressed
    Read { path: PathBuf, source: io::Error },
    /// The content is not a JSON array of `{"a": int, "b": int}` objects
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read { path, source } => {
                write!(f, "failed to read file {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "failed to parse records from {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Read { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}

/// Decode a JSON array of records.
///
/// A top-level `null` is an empty sequence and a `null` element is a zero record.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    let records: Option<Vec<Option<Record>>> = serde_json::from_slice(bytes)?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Read the whole file at `path` (gzip and zstd are decompressed) and decode its records
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, LoadError> {
    let path = path.as_ref();
    let read_error = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = DecompressionReader::open(path).map_err(read_error)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(read_error)?;

    parse_records(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_records_in_order() {
        let file = temp_with(r#"[{"a":1,"b":2},{"a":3,"b":4},{"a":5,"b":6}]"#);
        let records = load_records(file.path()).unwrap();

        assert_eq!(
            records,
            vec![Record::new(1, 2), Record::new(3, 4), Record::new(5, 6)]
        );
    }

    #[test]
    fn test_load_empty_array() {
        let file = temp_with("[]");
        assert!(load_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_with_whitespace() {
        let file = temp_with("\n[\n  {\"a\": -1, \"b\": 1}\n]\n");
        assert_eq!(load_records(file.path()).unwrap(), vec![Record::new(-1, 1)]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_records("/nonexistent/dir/records.json").unwrap_err();

        assert!(!err.is_parse_error());
        let message = err.to_string();
        assert!(message.starts_with("failed to read file /nonexistent/dir/records.json"));
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(dir.path()).unwrap_err();
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_object_instead_of_array_is_parse_error() {
        let file = temp_with(r#"{"a":1,"b":2}"#);
        let err = load_records(file.path()).unwrap_err();

        assert!(err.is_parse_error());
        assert!(err.to_string().contains("failed to parse records from"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let file = temp_with(r#"[{"a":1,"b":2},"#);
        assert!(load_records(file.path()).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_top_level_null_is_empty() {
        let file = temp_with("null");
        assert!(load_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_null_fields_and_elements_are_zero() {
        let file = temp_with(r#"[{"a":null,"b":2},null,{"A":3,"B":4}]"#);
        assert_eq!(
            load_records(file.path()).unwrap(),
            vec![Record::new(0, 2), Record::default(), Record::new(3, 4)]
        );
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        let file = temp_with("");
        assert!(load_records(file.path()).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let file = temp_with(r#"[{"a":"one","b":2}]"#);
        assert!(load_records(file.path()).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_error_source_is_exposed() {
        use std::error::Error;

        let file = temp_with("not json");
        let err = load_records(file.path()).unwrap_err();
        assert!(err.source().is_some());
    }
}

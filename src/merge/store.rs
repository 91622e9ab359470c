//! Reading and writing the persisted configuration.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{CandidatePattern, ConfigurationDocument};
use crate::utils::file::{file_exists, write_atomic};

/// Loads a FoxyProxy document.
///
/// Returns `Ok(None)` when the file does not exist. A file that is not JSON,
/// or lacks a `data` list whose first entry carries an `include` list, is a
/// [`AppError::Parse`] and no structural repair is attempted.
pub fn load_document(path: &Path) -> Result<Option<ConfigurationDocument>> {
    if !file_exists(path) {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    parse_document(&content, path).map(Some)
}

/// Parses and validates document text; `origin` is used in error messages.
pub fn parse_document(content: &str, origin: &Path) -> Result<ConfigurationDocument> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::parse(origin, format!("invalid JSON: {}", e)))?;

    let data = match value.get("data") {
        Some(Value::Array(data)) if !data.is_empty() => data,
        _ => {
            return Err(AppError::parse(
                origin,
                "configuration is missing the 'data' list or it is empty",
            ))
        }
    };
    if !matches!(data[0].get("include"), Some(Value::Array(_))) {
        return Err(AppError::parse(
            origin,
            "first proxy entry is missing the 'include' list",
        ));
    }

    serde_json::from_value(value).map_err(|e| AppError::parse(origin, e.to_string()))
}

/// Writes the document with two-space indentation, non-ASCII kept literal.
pub fn save_document(path: &Path, document: &ConfigurationDocument) -> Result<()> {
    let body = to_json_with_indent(document, b"  ").map_err(|e| AppError::Write {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write_atomic(path, body.as_bytes()).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Configuration saved to '{}'", path.display());
    Ok(())
}

/// Writes a bare pattern array, the format of a standalone gfwlist export.
pub fn export_patterns(path: &Path, patterns: &[CandidatePattern]) -> Result<()> {
    let body = to_json_with_indent(&patterns, b"    ").map_err(|e| AppError::Write {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write_atomic(path, body.as_bytes()).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("{} patterns exported to '{}'", patterns.len(), path.display());
    Ok(())
}

/// Reads a bare pattern array written by [`export_patterns`].
pub fn load_pattern_list(path: &Path) -> Result<Vec<CandidatePattern>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| AppError::parse(path, e.to_string()))
}

fn to_json_with_indent<T: Serialize + ?Sized>(
    value: &T,
    indent: &[u8],
) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert!(load_document(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn test_round_trip_keeps_unicode_literal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("FoxyProxy.json");
        let mut doc = ConfigurationDocument::default();
        doc.data[0].include.insert(CandidatePattern::wildcard("例子.测试"));
        save_document(&path, &doc).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("例子.测试"));
        assert!(text.starts_with("{\n  \"mode\": \"pattern\""));

        let loaded = load_document(&path).unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_invalid_documents() {
        let origin = Path::new("cfg.json");
        for bad in [
            "not json",
            r#"{"mode": "pattern"}"#,
            r#"{"data": []}"#,
            r#"{"data": [{"title": "auto"}]}"#,
            r#"{"data": [{"include": {}}]}"#,
        ] {
            let err = parse_document(bad, origin).unwrap_err();
            assert!(matches!(err, AppError::Parse { .. }), "accepted: {}", bad);
        }
    }

    #[test]
    fn test_minimal_document_accepted() {
        let doc = parse_document(r#"{"data": [{"include": []}]}"#, Path::new("x")).unwrap();
        assert!(doc.data[0].include.is_empty());
        assert!(doc.data[0].exclude.is_empty());
    }

    #[test]
    fn test_pattern_export_uses_four_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        let patterns = vec![CandidatePattern::wildcard("foo.com")];
        export_patterns(&path, &patterns).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {\n        \"type\": \"wildcard\""));
        assert_eq!(load_pattern_list(&path).unwrap(), patterns);
    }

    #[test]
    fn test_write_error_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = save_document(&path, &ConfigurationDocument::default()).unwrap_err();
        assert!(matches!(err, AppError::Write { .. }));
    }
}

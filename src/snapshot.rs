//! Snapshot Files
//!
//! Export/import file format for a repository's label set. Exports are
//! timestamped and written once; the import path only ever looks at the
//! `labels` array.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::github::Label;

/// Fixed relative directory snapshots are written to and read from
pub const EXPORT_DIR: &str = "exports";

/// Exported snapshot of a repository's label set
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Source repository in "owner/repo" format
    pub repository: String,

    /// Export timestamp (RFC 3339, UTC)
    #[serde(rename = "exportedAt")]
    pub exported_at: DateTime<Utc>,

    /// Labels at export time
    pub labels: Vec<Label>,
}

/// Shape expected when reading a snapshot back; extra fields are ignored
#[derive(Debug, Deserialize)]
struct ImportFile {
    labels: Vec<Label>,
}

/// Write a snapshot to `<dir>/<repo>.json`
///
/// # Returns
/// Path of the written file
pub fn write_snapshot(dir: &Path, owner: &str, repo: &str, labels: Vec<Label>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let snapshot = Snapshot {
        repository: format!("{}/{}", owner, repo),
        exported_at: Utc::now(),
        labels,
    };

    let path = dir.join(format!("{}.json", repo));
    fs::write(&path, serde_json::to_string_pretty(&snapshot)?)?;

    Ok(path)
}

/// Read the labels array from `<dir>/<file>`
///
/// # Errors
/// A missing file or a document without a `labels` array is a terminal error.
pub fn read_labels(dir: &Path, file: &str) -> Result<Vec<Label>> {
    let path = dir.join(file);

    if !path.exists() {
        return Err(Error::snapshot(format!(
            "Snapshot file not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(&path)?;
    let parsed: ImportFile = serde_json::from_str(&content).map_err(|e| {
        Error::snapshot(format!("Malformed snapshot {}: {}", path.display(), e))
    })?;

    Ok(parsed.labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_labels() -> Vec<Label> {
        vec![
            Label {
                id: 1,
                name: "bug".to_string(),
                color: "d73a4a".to_string(),
                description: Some("Something isn't working".to_string()),
                default: true,
            },
            Label {
                id: 2,
                name: "needs triage".to_string(),
                color: "ededed".to_string(),
                description: None,
                default: false,
            },
        ]
    }

    #[test]
    fn test_write_snapshot_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(dir.path(), "owner", "repo", sample_labels()).unwrap();

        assert_eq!(path.file_name().unwrap(), "repo.json");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["repository"], "owner/repo");
        assert!(value["exportedAt"].is_string());
        assert_eq!(value["labels"].as_array().unwrap().len(), 2);
        // ids never leave the process
        assert!(value["labels"][0].get("id").is_none());
        assert_eq!(value["labels"][0]["default"], serde_json::json!(true));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "owner", "repo", sample_labels()).unwrap();

        let labels = read_labels(dir.path(), "repo.json").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].name, "bug");
        assert!(labels[0].default);
        assert_eq!(labels[1].description, None);
    }

    #[test]
    fn test_read_accepts_bare_labels_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("labels.json"),
            r#"{"labels":[{"name":"bug","color":"ff0000"}]}"#,
        )
        .unwrap();

        let labels = read_labels(dir.path(), "labels.json").unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].id, 0);
        assert!(!labels[0].default);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_labels(dir.path(), "nope.json").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_read_malformed_shape() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), r#"{"repository":"o/r"}"#).unwrap();

        let err = read_labels(dir.path(), "bad.json").unwrap_err();
        assert!(err.to_string().contains("Malformed snapshot"));
    }
}

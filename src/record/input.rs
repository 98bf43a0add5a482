//! Reading submission snapshots from JSON or YAML files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RecordSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Format from a file extension; anything but `.json` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Yaml,
        }
    }
}

/// Load every snapshot in `path`. The file holds one array of records.
pub fn load_snapshots(path: &Path) -> Result<Vec<RecordSnapshot>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read submissions from {}", path.display()))?;

    parse_snapshots(&content, SnapshotFormat::from_path(path))
        .with_context(|| format!("Invalid submissions file {}", path.display()))
}

pub fn parse_snapshots(content: &str, format: SnapshotFormat) -> Result<Vec<RecordSnapshot>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let snapshots = match format {
        SnapshotFormat::Json => {
            serde_json::from_str(content).context("Failed to parse submissions JSON")?
        }
        SnapshotFormat::Yaml => {
            serde_yaml::from_str(content).context("Failed to parse submissions YAML")?
        }
    };
    Ok(snapshots)
}

//! JSON snapshot loading
//!
//! The CLI works offline over snapshot files exported from the hosted
//! backend: patent collections, decoded bulk-upload rows, and sealed
//! timeline chains.

use anyhow::{Context, Result};
use docket_record::Patent;
use docket_service::ImportRow;
use docket_store::SealedEvent;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A patent collection exported from the backend
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// All patents in the export
    #[serde(default)]
    pub patents: Vec<Patent>,
}

/// Load a patent snapshot
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("decoding snapshot {}", path.display()))
}

/// Load decoded bulk-upload rows
pub fn load_rows(path: &Path) -> Result<Vec<ImportRow>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading rows {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("decoding rows {}", path.display()))
}

/// Load sealed timeline chains
pub fn load_sealed(path: &Path) -> Result<Vec<SealedEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading log {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("decoding log {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_record::TrackingId;
    use std::io::Write;
    use std::str::FromStr;

    #[test]
    fn snapshot_roundtrip_through_file() {
        let patent = Patent::new(TrackingId::from_str("P-900").unwrap(), "Widget", "Acme");
        let snapshot = Snapshot {
            patents: vec![patent],
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&snapshot).unwrap().as_bytes())
            .unwrap();

        let loaded = load_snapshot(file.path()).unwrap();
        assert_eq!(loaded.patents.len(), 1);
        assert_eq!(loaded.patents[0].tracking_id.as_str(), "P-900");
    }

    #[test]
    fn empty_object_defaults_to_no_patents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        let loaded = load_snapshot(file.path()).unwrap();
        assert!(loaded.patents.is_empty());
    }

    #[test]
    fn rows_decode_from_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"tracking_id":"P-901","title":"T","applicant":"A"}]"#)
            .unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tracking_id, "P-901");
    }
}

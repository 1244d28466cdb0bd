//! Per-cycle observation of a single document

use std::path::PathBuf;
use std::time::SystemTime;

/// What a scan cycle saw for one document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub fingerprint: String,
}

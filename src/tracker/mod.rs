//! In-memory change tracking across scan cycles
//!
//! The tracker keeps one entry per document seen in the last completed cycle
//! and classifies every document of the next cycle against it. Only a real
//! content change reaches the [`DateUpdater`]; saves that merely bump the
//! modification time are recorded and otherwise ignored.

use crate::clock::Clock;
use crate::error::ScanError;
use crate::scanner::{self, DocumentSnapshot, DocumentWalker};
use crate::stamper::{DateUpdater, UpdateOutcome};
use chrono::{DateTime, Local};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Last observed state of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedDocument {
    pub modified: SystemTime,
    pub fingerprint: String,
}

impl From<DocumentSnapshot> for TrackedDocument {
    fn from(doc: DocumentSnapshot) -> Self {
        Self {
            modified: doc.modified,
            fingerprint: doc.fingerprint,
        }
    }
}

/// Map of document path to its state at the end of the last cycle
#[derive(Debug, Clone, Default)]
pub struct TrackingTable {
    entries: HashMap<PathBuf, TrackedDocument>,
}

impl TrackingTable {
    pub fn get(&self, path: &Path) -> Option<&TrackedDocument> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn insert(&mut self, path: PathBuf, doc: TrackedDocument) {
        self.entries.insert(path, doc);
    }

    pub fn remove(&mut self, path: &Path) -> Option<TrackedDocument> {
        self.entries.remove(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked paths in sorted order
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self.entries.keys().map(PathBuf::as_path).collect();
        paths.sort();
        paths
    }
}

/// How a document differs from its tracked state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    New,
    ContentChanged,
    TouchedOnly,
    Unchanged,
    Deleted,
}

/// Compare a fresh snapshot with the tracked entry, if any
pub fn classify(tracked: Option<&TrackedDocument>, doc: &DocumentSnapshot) -> Change {
    match tracked {
        None => Change::New,
        Some(prev) if prev.fingerprint != doc.fingerprint => Change::ContentChanged,
        Some(prev) if prev.modified != doc.modified => Change::TouchedOnly,
        Some(_) => Change::Unchanged,
    }
}

/// Counts of what one scan cycle observed and did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub new: usize,
    pub content_changed: usize,
    pub touched_only: usize,
    pub unchanged: usize,
    pub deleted: usize,
    /// Dates rewritten
    pub updated: usize,
    /// Dates left alone because the file name is dated in the past
    pub skipped: usize,
    pub missing_front_matter: usize,
    /// Updates that failed with an I/O error
    pub failed: usize,
}

impl CycleReport {
    fn record(&mut self, change: Change) {
        match change {
            Change::New => self.new += 1,
            Change::ContentChanged => self.content_changed += 1,
            Change::TouchedOnly => self.touched_only += 1,
            Change::Unchanged => self.unchanged += 1,
            Change::Deleted => self.deleted += 1,
        }
    }

    fn record_outcome(&mut self, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Updated { .. } => self.updated += 1,
            UpdateOutcome::Skipped { .. } => self.skipped += 1,
            UpdateOutcome::MissingFrontMatter => self.missing_front_matter += 1,
        }
    }

    /// Nothing appeared, disappeared or changed
    pub fn is_quiet(&self) -> bool {
        self.new == 0 && self.content_changed == 0 && self.touched_only == 0 && self.deleted == 0
    }
}

/// Owns the walker and the tracking table
pub struct Tracker {
    walker: DocumentWalker,
    table: TrackingTable,
}

impl Tracker {
    pub fn new(walker: DocumentWalker) -> Self {
        Self {
            walker,
            table: TrackingTable::default(),
        }
    }

    pub fn walker(&self) -> &DocumentWalker {
        &self.walker
    }

    pub fn table(&self) -> &TrackingTable {
        &self.table
    }

    /// Record every document present at startup without touching any of them
    pub fn initialize(&mut self) -> Result<usize, ScanError> {
        for doc in self.walker.walk()? {
            tracing::info!(
                "Initialized: {} (last modified: {})",
                doc.path.display(),
                display_time(doc.modified)
            );
            self.table.insert(doc.path.clone(), doc.into());
        }
        Ok(self.table.len())
    }

    /// Run one scan cycle, stamping every document whose content changed
    pub fn scan_cycle<C: Clock>(&mut self, updater: &DateUpdater<C>) -> CycleReport {
        let mut report = CycleReport::default();

        let documents = match self.walker.walk() {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!("{}; treating all tracked documents as removed", e);
                Vec::new()
            }
        };

        let mut seen = HashSet::with_capacity(documents.len());
        for doc in documents {
            seen.insert(doc.path.clone());
            let change = classify(self.table.get(&doc.path), &doc);
            report.record(change);

            match change {
                Change::New => {
                    tracing::info!("New file detected: {}", doc.path.display());
                    self.table.insert(doc.path.clone(), doc.into());
                }
                Change::ContentChanged => {
                    tracing::info!("Detected content change in: {}", doc.path.display());
                    self.handle_content_change(doc, updater, &mut report);
                }
                Change::TouchedOnly => {
                    tracing::info!(
                        "Save detected but no content change in: {}",
                        doc.path.display()
                    );
                    if let Some(entry) = self.table.entries.get_mut(&doc.path) {
                        entry.modified = doc.modified;
                    }
                }
                Change::Unchanged | Change::Deleted => {}
            }
        }

        let gone: Vec<PathBuf> = self
            .table
            .paths()
            .into_iter()
            .filter(|path| !seen.contains(*path))
            .map(Path::to_path_buf)
            .collect();
        for path in gone {
            self.table.remove(&path);
            report.record(Change::Deleted);
            tracing::info!("File deleted: {}", path.display());
        }

        report
    }

    fn handle_content_change<C: Clock>(
        &mut self,
        doc: DocumentSnapshot,
        updater: &DateUpdater<C>,
        report: &mut CycleReport,
    ) {
        match updater.update(&doc.path) {
            Ok(outcome) => report.record_outcome(&outcome),
            Err(e) => {
                tracing::warn!("{}", e);
                report.failed += 1;
            }
        }

        // The updater may have rewritten the file, so fingerprint it again
        match scanner::snapshot(&doc.path) {
            Ok(after) => {
                self.table.insert(
                    doc.path,
                    TrackedDocument {
                        modified: doc.modified,
                        fingerprint: after.fingerprint,
                    },
                );
                tracing::debug!("Updated tracking information for next save");
            }
            Err(e) => {
                tracing::warn!("{}; dropping it from tracking", e);
                self.table.remove(&doc.path);
            }
        }
    }
}

fn display_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string()
}

//! Directory walking and content fingerprinting for the watched posts tree

mod document;

pub use document::DocumentSnapshot;

use crate::error::ScanError;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct DocumentWalker {
    pub(crate) root: PathBuf,
    pub(crate) extensions: Vec<String>,
}

impl DocumentWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }

    /// Replace the recognized extensions. A leading dot is accepted and ignored.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fail unless the root exists and is a directory
    pub fn ensure_root(&self) -> Result<(), ScanError> {
        if !self.root.exists() {
            return Err(ScanError::DirectoryNotFound(self.root.display().to_string()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.display().to_string()));
        }
        Ok(())
    }

    /// Walk the root and snapshot every document currently readable.
    ///
    /// Files that cannot be read are left out of the result, so the tracker
    /// sees them as absent for this cycle.
    pub fn walk(&self) -> Result<Vec<DocumentSnapshot>, ScanError> {
        self.ensure_root()?;

        let mut documents = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Usually a directory removed between listing and descent
                    tracing::debug!("Skipping unreadable entry under {:?}: {}", self.root, e);
                    continue;
                }
            };

            // Links to files count as documents; linked directories are not descended
            let path = entry.path();
            let file_type = entry.file_type();
            if !(file_type.is_file() || (file_type.is_symlink() && path.is_file())) {
                continue;
            }

            if !self.is_document(path) {
                continue;
            }

            match snapshot(path) {
                Ok(doc) => documents.push(doc),
                Err(e) => tracing::debug!("{}", e),
            }
        }

        tracing::debug!("Found {} documents under {:?}", documents.len(), self.root);
        Ok(documents)
    }

    /// Check whether the file name ends in a recognized extension
    pub(crate) fn is_document(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        self.extensions.iter().any(|ext| {
            name.len() > ext.len()
                && name.ends_with(ext.as_str())
                && name[..name.len() - ext.len()].ends_with('.')
        })
    }
}

/// Observe one document: modification time and fingerprint of its bytes
pub fn snapshot(path: &Path) -> Result<DocumentSnapshot, ScanError> {
    let read_failed = |e: std::io::Error| ScanError::FileReadFailed {
        file: path.display().to_string(),
        reason: e.to_string(),
    };

    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(read_failed)?;
    let bytes = fs::read(path).map_err(read_failed)?;

    Ok(DocumentSnapshot {
        path: path.to_path_buf(),
        modified,
        fingerprint: fingerprint(&bytes),
    })
}

/// SHA-256 hex digest of the full file contents
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

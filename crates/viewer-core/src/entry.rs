//! Media entry model shared by the placeholder and the enumerated list.

use std::{fs, io};

use tracing::{debug, warn};

/// One attachment available for viewing.
///
/// Entries are shared as `Arc<MediaEntry>`; the last owner dropping the
/// entry releases it, which removes the decrypted plaintext export for
/// encrypted content.
#[derive(Debug, PartialEq, Eq)]
pub struct MediaEntry {
    path: String,
    name: String,
    size_bytes: u64,
    timestamp: i64,
    is_encrypted: bool,
    original_path: String,
}

impl MediaEntry {
    /// Construct an entry from fully-resolved fields.
    pub fn new(
        path: String,
        name: String,
        size_bytes: u64,
        timestamp: i64,
        is_encrypted: bool,
        original_path: String,
    ) -> Self {
        Self {
            path,
            name,
            size_bytes,
            timestamp,
            is_encrypted,
            original_path,
        }
    }

    /// Construct the provisional entry shown while enumeration is pending.
    ///
    /// The name is derived from `path` and the size is unknown (`0`). A
    /// malformed path yields an empty name rather than an error.
    pub fn placeholder(
        path: String,
        timestamp: i64,
        is_encrypted: bool,
        original_path: String,
    ) -> Self {
        let name = name_from_path(&path);
        Self::new(path, name, 0, timestamp, is_encrypted, original_path)
    }

    /// Resolved filesystem location usable for display.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Display filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte length, `0` when unknown.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Creation/capture time of the content, seconds since Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Whether the source content is encrypted at rest.
    pub fn is_encrypted(&self) -> bool {
        self.is_encrypted
    }

    /// Source-of-truth path before any decryption export.
    pub fn original_path(&self) -> &str {
        &self.original_path
    }

    fn has_plain_export(&self) -> bool {
        self.is_encrypted && !self.path.is_empty() && self.path != self.original_path
    }
}

impl Drop for MediaEntry {
    fn drop(&mut self) {
        if !self.has_plain_export() {
            return;
        }

        // The export is idempotent per record, so another released owner of
        // the same file may already have removed it.
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path, "removed plaintext export"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path, error = %err, "failed removing plaintext export")
            }
        }
    }
}

/// Derive a display filename from a path string.
///
/// Returns the component after the last path separator; an empty or
/// separator-terminated path yields an empty name.
pub fn name_from_path(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_owned()
}

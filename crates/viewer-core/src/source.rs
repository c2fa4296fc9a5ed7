use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while fetching conversation content records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The content store could not produce records for the conversation.
    #[error("conversation content store unavailable: {0}")]
    Unavailable(String),
}

/// Raw media record as stored in the conversation content list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaRecord {
    /// Whether the record is a voice recording (excluded from the viewer).
    pub is_voice_recording: bool,
    /// Whether the file content is encrypted at rest.
    pub is_encrypted: bool,
    /// Stored file path; for encrypted content this is the ciphertext path.
    pub file_path: String,
    /// Display filename recorded with the content.
    pub name: String,
    /// Content size in bytes.
    pub size_bytes: u64,
    /// Creation timestamp, seconds since Unix epoch.
    pub created_at: i64,
}

/// Conversation content store collaborator.
///
/// Both operations may block on disk I/O and must only be called from a
/// background context.
pub trait MediaSource: Send + Sync {
    /// Media records for the conversation, in store order.
    fn media_records(&self) -> Result<Vec<MediaRecord>, SourceError>;

    /// Export a decrypted plaintext copy of an encrypted record and return
    /// its path.
    ///
    /// Returns an empty string when the export fails; idempotent per record.
    fn export_plain_file(&self, record: &MediaRecord) -> String;
}

//! Runtime wiring for the conversation media list shown by the file viewer.
//!
//! [`MediaListViewer`] publishes the browsable media list through a
//! single-writer `watch` cell. The interactive context installs a
//! provisional placeholder entry synchronously; the full list is enumerated
//! once on the blocking pool after the conversation is resolved, and
//! reconciled against the placeholder before being published.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};
use viewer_core::{MediaEntry, MediaSource, ReconcileDecision, enumerate_media, reconcile};

/// Published media list snapshot: entries in store order.
pub type MediaList = Vec<Arc<MediaEntry>>;

/// Filename/timestamp pair for the file currently on screen.
///
/// Set by the viewer UI while the user browses; not derived from the list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayedFile {
    /// Display filename of the file on screen.
    pub name: String,
    /// Creation timestamp of the file on screen, seconds since Unix epoch.
    pub timestamp: i64,
}

struct ViewerShared {
    list_tx: watch::Sender<MediaList>,
    placeholder: Mutex<Option<Arc<MediaEntry>>>,
    load_started: AtomicBool,
}

impl ViewerShared {
    fn placeholder_path(&self) -> Option<String> {
        self.placeholder
            .lock()
            .expect("placeholder lock poisoned while reading path")
            .as_ref()
            .map(|entry| entry.path().to_owned())
            .filter(|path| !path.is_empty())
    }

    fn load_and_reconcile(&self, conversation_id: &str, source: &dyn MediaSource) {
        info!(%conversation_id, "loading media contents for conversation");
        let placeholder_path = self.placeholder_path();

        let enumeration = match enumerate_media(source, placeholder_path.as_deref()) {
            Ok(enumeration) => enumeration,
            Err(err) => {
                warn!(
                    %conversation_id,
                    error = %err,
                    "media enumeration failed, keeping current list"
                );
                return;
            }
        };
        info!(
            %conversation_id,
            entry_count = enumeration.entries.len(),
            "media records processed"
        );

        match reconcile(
            placeholder_path.as_deref(),
            enumeration.placeholder_confirmed,
        ) {
            ReconcileDecision::PublishCandidate => {
                self.list_tx.send_replace(enumeration.entries);
            }
            ReconcileDecision::KeepPlaceholder { missing_path } => {
                warn!(
                    path = %missing_path,
                    "placeholder file not found in processed media, keeping placeholder list"
                );
            }
        }
    }
}

/// Media list state for one conversation's file viewer.
///
/// One instance handles exactly one conversation. Dropping the viewer (and
/// every subscriber) releases all entries, which removes their decrypted
/// plaintext exports.
pub struct MediaListViewer {
    shared: Arc<ViewerShared>,
    displayed: Mutex<DisplayedFile>,
}

impl MediaListViewer {
    /// Create a viewer with an empty published list.
    pub fn new() -> Self {
        let (list_tx, _) = watch::channel(MediaList::new());
        Self {
            shared: Arc::new(ViewerShared {
                list_tx,
                placeholder: Mutex::new(None),
                load_started: AtomicBool::new(false),
            }),
            displayed: Mutex::new(DisplayedFile::default()),
        }
    }

    /// Subscribe to published media list snapshots.
    pub fn subscribe(&self) -> watch::Receiver<MediaList> {
        self.shared.list_tx.subscribe()
    }

    /// Install the provisional entry for the file the user opened directly.
    ///
    /// Synchronous and I/O-free: derives the display name from `path`,
    /// remembers the entry for reconciliation, and publishes a singleton
    /// list containing only it.
    pub fn init_placeholder(
        &self,
        path: String,
        timestamp: i64,
        is_encrypted: bool,
        original_path: String,
    ) {
        let entry = Arc::new(MediaEntry::placeholder(
            path,
            timestamp,
            is_encrypted,
            original_path,
        ));
        info!(
            name = entry.name(),
            "placeholder entry created, shown while conversation media are being loaded"
        );

        *self
            .shared
            .placeholder
            .lock()
            .expect("placeholder lock poisoned while installing entry") = Some(Arc::clone(&entry));
        self.shared.list_tx.send_replace(vec![entry]);
    }

    /// Enumerate the conversation's media once the conversation is resolved.
    ///
    /// Runs on the blocking pool of `runtime_handle`; the published list is
    /// replaced only when reconciliation accepts the candidate. Returns
    /// `None` when a load was already started for this viewer.
    pub fn start_media_load(
        &self,
        conversation_id: String,
        source: Arc<dyn MediaSource>,
        runtime_handle: &tokio::runtime::Handle,
    ) -> Option<tokio::task::JoinHandle<()>> {
        if self.shared.load_started.swap(true, Ordering::SeqCst) {
            warn!(%conversation_id, "media load already started for this viewer");
            return None;
        }

        let shared = Arc::clone(&self.shared);
        Some(runtime_handle.spawn_blocking(move || {
            shared.load_and_reconcile(&conversation_id, source.as_ref());
        }))
    }

    /// Record the file currently shown by the viewer UI.
    pub fn set_displayed_file(&self, name: String, timestamp: i64) {
        *self
            .displayed
            .lock()
            .expect("displayed file lock poisoned while writing") =
            DisplayedFile { name, timestamp };
    }

    /// Filename/timestamp pair of the file currently shown.
    pub fn displayed_file(&self) -> DisplayedFile {
        self.displayed
            .lock()
            .expect("displayed file lock poisoned while reading")
            .clone()
    }
}

impl Default for MediaListViewer {
    fn default() -> Self {
        Self::new()
    }
}

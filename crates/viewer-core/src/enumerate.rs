//! Enumeration filter pipeline that turns raw content records into the
//! candidate media list.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    entry::MediaEntry,
    source::{MediaSource, SourceError},
};

/// Candidate media list produced by one enumeration pass.
#[derive(Debug)]
pub struct Enumeration {
    /// Accepted entries, in store order.
    pub entries: Vec<Arc<MediaEntry>>,
    /// Whether any processed record resolved to the placeholder's path.
    ///
    /// Always `false` when no placeholder path was supplied.
    pub placeholder_confirmed: bool,
}

/// Walk the conversation's media records and build the candidate list.
///
/// Voice recordings are skipped entirely. Encrypted records are resolved to
/// their plaintext export path. Records with an empty resolved path or an
/// empty name produce no entry, but still count toward placeholder
/// confirmation when their path matches.
pub fn enumerate_media(
    source: &dyn MediaSource,
    placeholder_path: Option<&str>,
) -> Result<Enumeration, SourceError> {
    let records = source.media_records()?;
    info!(record_count = records.len(), "media records fetched");

    let placeholder_path = placeholder_path.filter(|path| !path.is_empty());
    let mut entries = Vec::with_capacity(records.len());
    let mut placeholder_confirmed = false;

    for record in &records {
        if record.is_voice_recording {
            continue;
        }

        let original_path = record.file_path.clone();
        let path = if record.is_encrypted {
            debug!(file_path = %record.file_path, "content is encrypted, requesting plain file path");
            source.export_plain_file(record)
        } else {
            original_path.clone()
        };

        if !path.is_empty() && !record.name.is_empty() {
            entries.push(Arc::new(MediaEntry::new(
                path.clone(),
                record.name.clone(),
                record.size_bytes,
                record.created_at,
                record.is_encrypted,
                original_path,
            )));
        }

        if !placeholder_confirmed
            && let Some(placeholder_path) = placeholder_path
            && path == placeholder_path
        {
            placeholder_confirmed = true;
        }
    }

    Ok(Enumeration {
        entries,
        placeholder_confirmed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MediaRecord;

    struct StubSource {
        records: Vec<MediaRecord>,
        export_overrides: Vec<(String, String)>,
    }

    impl StubSource {
        fn new(records: Vec<MediaRecord>) -> Self {
            Self {
                records,
                export_overrides: Vec::new(),
            }
        }

        fn with_export(mut self, file_path: &str, export_path: &str) -> Self {
            self.export_overrides
                .push((file_path.to_owned(), export_path.to_owned()));
            self
        }
    }

    impl MediaSource for StubSource {
        fn media_records(&self) -> Result<Vec<MediaRecord>, SourceError> {
            Ok(self.records.clone())
        }

        fn export_plain_file(&self, record: &MediaRecord) -> String {
            self.export_overrides
                .iter()
                .find(|(file_path, _)| *file_path == record.file_path)
                .map(|(_, export_path)| export_path.clone())
                .unwrap_or_default()
        }
    }

    fn record(name: &str, path: &str) -> MediaRecord {
        MediaRecord {
            is_voice_recording: false,
            is_encrypted: false,
            file_path: path.to_owned(),
            name: name.to_owned(),
            size_bytes: 1_024,
            created_at: 1_700_000_000,
        }
    }

    fn voice_record() -> MediaRecord {
        MediaRecord {
            is_voice_recording: true,
            is_encrypted: false,
            file_path: "/p/voice.wav".to_owned(),
            name: "voice.wav".to_owned(),
            size_bytes: 2_048,
            created_at: 1_700_000_000,
        }
    }

    fn encrypted_record(name: &str, path: &str) -> MediaRecord {
        MediaRecord {
            is_voice_recording: false,
            is_encrypted: true,
            file_path: path.to_owned(),
            name: name.to_owned(),
            size_bytes: 4_096,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn skips_voice_recordings() {
        let source = StubSource::new(vec![voice_record(), record("a.jpg", "/p/a.jpg")]);
        let enumeration = enumerate_media(&source, None).expect("enumeration should work");

        assert_eq!(enumeration.entries.len(), 1);
        assert_eq!(enumeration.entries[0].name(), "a.jpg");
    }

    #[test]
    fn skips_records_with_empty_path_or_name() {
        let source = StubSource::new(vec![
            record("", "/p/unnamed.jpg"),
            record("pathless.jpg", ""),
            record("a.jpg", "/p/a.jpg"),
        ]);
        let enumeration = enumerate_media(&source, None).expect("enumeration should work");

        assert_eq!(enumeration.entries.len(), 1);
        assert_eq!(enumeration.entries[0].path(), "/p/a.jpg");
    }

    #[test]
    fn resolves_encrypted_records_through_plain_export() {
        let source = StubSource::new(vec![encrypted_record("c.mp4", "/vfs/c.mp4.enc")])
            .with_export("/vfs/c.mp4.enc", "/tmp/exports/c.mp4");
        let enumeration = enumerate_media(&source, None).expect("enumeration should work");

        assert_eq!(enumeration.entries.len(), 1);
        let entry = &enumeration.entries[0];
        assert_eq!(entry.path(), "/tmp/exports/c.mp4");
        assert_eq!(entry.original_path(), "/vfs/c.mp4.enc");
        assert!(entry.is_encrypted());
    }

    #[test]
    fn skips_encrypted_record_when_export_fails() {
        let source = StubSource::new(vec![
            record("a.jpg", "/p/a.jpg"),
            encrypted_record("c.mp4", "/vfs/c.mp4.enc"),
            record("b.png", "/p/b.png"),
        ]);
        let enumeration = enumerate_media(&source, None).expect("enumeration should work");

        assert_eq!(enumeration.entries.len(), 2);
        assert_eq!(enumeration.entries[0].name(), "a.jpg");
        assert_eq!(enumeration.entries[1].name(), "b.png");
    }

    #[test]
    fn confirms_placeholder_by_resolved_path() {
        let source = StubSource::new(vec![
            record("a.jpg", "/p/a.jpg"),
            record("b.png", "/p/b.png"),
        ]);
        let enumeration =
            enumerate_media(&source, Some("/p/b.png")).expect("enumeration should work");

        assert!(enumeration.placeholder_confirmed);
    }

    #[test]
    fn confirms_placeholder_even_for_skipped_record() {
        // A record can fail the name filter while still matching the
        // placeholder path.
        let source = StubSource::new(vec![record("", "/p/a.jpg")]);
        let enumeration =
            enumerate_media(&source, Some("/p/a.jpg")).expect("enumeration should work");

        assert!(enumeration.entries.is_empty());
        assert!(enumeration.placeholder_confirmed);
    }

    #[test]
    fn does_not_confirm_from_voice_recordings() {
        let source = StubSource::new(vec![voice_record()]);
        let enumeration =
            enumerate_media(&source, Some("/p/voice.wav")).expect("enumeration should work");

        assert!(!enumeration.placeholder_confirmed);
    }

    #[test]
    fn leaves_placeholder_unconfirmed_when_path_is_missing() {
        let source = StubSource::new(vec![record("a.jpg", "/p/a.jpg")]);
        let enumeration =
            enumerate_media(&source, Some("/p/missing.jpg")).expect("enumeration should work");

        assert!(!enumeration.placeholder_confirmed);
    }

    #[test]
    fn keeps_store_order_and_is_repeatable() {
        let source = StubSource::new(vec![
            record("b.png", "/p/b.png"),
            voice_record(),
            record("a.jpg", "/p/a.jpg"),
        ]);

        let first = enumerate_media(&source, None).expect("first pass should work");
        let second = enumerate_media(&source, None).expect("second pass should work");

        let names = |enumeration: &Enumeration| {
            enumeration
                .entries
                .iter()
                .map(|entry| entry.name().to_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), vec!["b.png", "a.jpg"]);
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn propagates_store_failure() {
        struct FailingSource;
        impl MediaSource for FailingSource {
            fn media_records(&self) -> Result<Vec<MediaRecord>, SourceError> {
                Err(SourceError::Unavailable("store is offline".to_owned()))
            }
            fn export_plain_file(&self, _record: &MediaRecord) -> String {
                String::new()
            }
        }

        let err = enumerate_media(&FailingSource, None)
            .expect_err("store failure should propagate");
        assert_eq!(err, SourceError::Unavailable("store is offline".to_owned()));
    }
}

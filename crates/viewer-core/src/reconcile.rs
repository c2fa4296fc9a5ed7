//! Decision comparing the freshly enumerated list against the placeholder.

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Publish the candidate list, superseding any placeholder singleton.
    PublishCandidate,
    /// Keep the current placeholder list; the placeholder's file was not
    /// found among the candidates.
    KeepPlaceholder {
        /// The placeholder path missing from the candidate list.
        missing_path: String,
    },
}

/// Decide whether the candidate list is safe to publish.
///
/// The candidate wins when the placeholder's file was confirmed present, or
/// when no placeholder with a non-empty path exists. Otherwise the
/// placeholder view is retained so the file the user is looking at never
/// disappears.
pub fn reconcile(placeholder_path: Option<&str>, confirmed: bool) -> ReconcileDecision {
    match placeholder_path.filter(|path| !path.is_empty()) {
        Some(path) if !confirmed => ReconcileDecision::KeepPlaceholder {
            missing_path: path.to_owned(),
        },
        _ => ReconcileDecision::PublishCandidate,
    }
}

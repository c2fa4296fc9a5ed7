//! Smoke binary: runs the media list viewer against a demo on-disk
//! conversation and prints the published list before and after enumeration.

mod config;
mod logging;

use std::{fs, path::Path, sync::Arc};

use anyhow::Context;
use tracing::{info, warn};
use viewer_core::{MediaRecord, MediaSource, SourceError};
use viewer_runtime::MediaListViewer;

use crate::config::SmokeConfig;

/// Demo conversation source backed by files under the demo directory.
struct DemoSource {
    records: Vec<MediaRecord>,
}

impl MediaSource for DemoSource {
    fn media_records(&self) -> Result<Vec<MediaRecord>, SourceError> {
        Ok(self.records.clone())
    }

    fn export_plain_file(&self, record: &MediaRecord) -> String {
        let plain_path = format!("{}.plain", record.file_path.trim_end_matches(".enc"));
        match fs::copy(&record.file_path, &plain_path) {
            Ok(_) => plain_path,
            Err(err) => {
                warn!(file_path = %record.file_path, error = %err, "plain export failed");
                String::new()
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = SmokeConfig::from_env().context("failed parsing smoke configuration")?;
    info!(demo_dir = %config.demo_dir.display(), "building demo conversation");

    let records = build_demo_conversation(&config)?;
    let placeholder = records
        .iter()
        .filter(|record| !record.is_voice_recording && !record.is_encrypted)
        .nth(config.placeholder_index)
        .cloned()
        .context("placeholder index points past the demo files")?;
    let source = Arc::new(DemoSource { records });

    let viewer = MediaListViewer::new();
    let list_rx = viewer.subscribe();

    viewer.init_placeholder(
        placeholder.file_path.clone(),
        placeholder.created_at,
        false,
        placeholder.file_path.clone(),
    );
    viewer.set_displayed_file(placeholder.name.clone(), placeholder.created_at);
    print_list("placeholder state", &list_rx.borrow());

    let handle = viewer
        .start_media_load(
            "demo-conversation".to_owned(),
            source,
            &tokio::runtime::Handle::current(),
        )
        .context("media load should start exactly once")?;
    handle.await.context("media load task failed")?;

    print_list("reconciled state", &list_rx.borrow());
    let displayed = viewer.displayed_file();
    println!("currently displayed: {} ({})", displayed.name, displayed.timestamp);

    Ok(())
}

fn build_demo_conversation(config: &SmokeConfig) -> anyhow::Result<Vec<MediaRecord>> {
    fs::create_dir_all(&config.demo_dir).with_context(|| {
        format!(
            "failed creating demo directory {}",
            config.demo_dir.display()
        )
    })?;

    let mut records = Vec::new();
    for index in 0..config.demo_entries {
        let name = format!("demo-{index}.jpg");
        records.push(demo_record(&config.demo_dir, &name, false)?);
    }

    // One voice note and one encrypted file exercise the filter rules.
    records.push(MediaRecord {
        is_voice_recording: true,
        is_encrypted: false,
        file_path: config
            .demo_dir
            .join("voice-note.wav")
            .to_string_lossy()
            .to_string(),
        name: "voice-note.wav".to_owned(),
        size_bytes: 0,
        created_at: 1_700_000_000,
    });
    records.push(demo_record(&config.demo_dir, "secret.pdf.enc", true)?);

    Ok(records)
}

fn demo_record(demo_dir: &Path, name: &str, is_encrypted: bool) -> anyhow::Result<MediaRecord> {
    let path = demo_dir.join(name);
    let bytes = format!("demo bytes for {name}");
    fs::write(&path, &bytes)
        .with_context(|| format!("failed writing demo file {}", path.display()))?;

    Ok(MediaRecord {
        is_voice_recording: false,
        is_encrypted,
        file_path: path.to_string_lossy().to_string(),
        name: name.trim_end_matches(".enc").to_owned(),
        size_bytes: bytes.len() as u64,
        created_at: 1_700_000_000,
    })
}

fn print_list(label: &str, list: &viewer_runtime::MediaList) {
    println!("{label}: {} entries", list.len());
    for entry in list {
        println!(
            "  {} ({} bytes, encrypted: {}) -> {}",
            entry.name(),
            entry.size_bytes(),
            entry.is_encrypted(),
            entry.path()
        );
    }
}

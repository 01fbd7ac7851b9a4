//! Append-only request audit log.
//!
//! `AuditLog` is a cheap, cloneable handle. `record` stamps a line and hands
//! it to a background writer task; the caller never waits on the file and
//! never sees a write failure. Failures go to `tracing` instead.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::mpsc};

#[derive(Clone, Debug)]
pub struct AuditLog {
    tx: Option<mpsc::UnboundedSender<String>>,
}

impl AuditLog {
    /// Start a writer task appending to `path`. Must be called inside a
    /// tokio runtime.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(write_lines(path, rx));
        Self { tx: Some(tx) }
    }

    /// Handle that drops every line.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Queue `line` for the log, prefixed with the current UTC time.
    pub fn record(&self, line: impl AsRef<str>) {
        let Some(tx) = &self.tx else {
            return;
        };
        let entry = format_entry(&timestamp(), line.as_ref());
        if tx.send(entry).is_err() {
            tracing::error!("audit log writer has stopped, dropping entry");
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn format_entry(timestamp: &str, line: &str) -> String {
    format!("{timestamp} - {line}\n")
}

async fn write_lines(path: PathBuf, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(entry) = rx.recv().await {
        if let Err(err) = append(&path, &entry).await {
            tracing::error!(path = %path.display(), error = %err, "logging error");
        }
    }
}

async fn append(path: &Path, entry: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(entry.as_bytes()).await?;
    file.flush().await
}

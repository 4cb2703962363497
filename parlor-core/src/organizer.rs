//! Image shuffling: scan a folder for JPG/PNG files, move or copy them into
//! another folder, or delete them recursively.
//!
//! Per-file failures never abort a run: they are logged, counted, and the
//! remaining files are still processed. Progress is reported over an optional
//! channel so a front-end can animate it without the engine knowing about
//! screens. Every completed operation can be appended to a plain-text
//! operation log.

use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Extensions treated as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".png"];
/// Default operation log file name.
pub const LOG_FILE: &str = "operation_log.txt";

#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("source folder does not exist: {0}")]
    MissingSource(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Move,
    Copy,
}

impl TransferMode {
    pub fn label(&self) -> &'static str {
        match self {
            TransferMode::Move => "Move",
            TransferMode::Copy => "Copy",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            TransferMode::Move => "Moved",
            TransferMode::Copy => "Copied",
        }
    }
}

/// Progress notifications emitted while a transfer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { total: usize },
    FileDone { name: String, index: usize, total: usize },
    FileFailed { name: String, error: String },
}

/// Outcome of one move/copy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    pub mode: TransferMode,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Names of the files that made it, in processing order.
    pub processed: Vec<String>,
    pub jpg: usize,
    pub png: usize,
    pub failed: usize,
    pub total: usize,
}

/// Outcome of one recursive delete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub folder: PathBuf,
    pub deleted: Vec<PathBuf>,
    pub failed: usize,
    pub total: usize,
}

impl DeleteReport {
    pub fn remaining(&self) -> usize {
        self.total - self.deleted.len()
    }
}

fn is_image_name(name: &str) -> bool {
    let lowered = name.trim().to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}

fn send(progress: &Option<UnboundedSender<ProgressEvent>>, event: ProgressEvent) {
    if let Some(tx) = progress {
        let _ = tx.send(event);
    }
}

/// Image file names directly inside `dir`, sorted for stable processing.
pub async fn scan_images(dir: impl AsRef<Path>) -> Result<Vec<String>, OrganizerError> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
    while let Some(entry) = entries.next_entry().await? {
        let is_file = match entry.file_type().await {
            Ok(kind) => kind.is_file(),
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !is_file {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_image_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Moves or copies every image in `src` into `dest`, creating `dest` when
/// missing. Per-file failures are counted and skipped.
pub async fn transfer(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    mode: TransferMode,
    progress: Option<UnboundedSender<ProgressEvent>>,
) -> Result<TransferReport, OrganizerError> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    match tokio::fs::metadata(src).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(OrganizerError::MissingSource(src.to_path_buf())),
    }
    tokio::fs::create_dir_all(dest).await?;

    let names = scan_images(src).await?;
    let total = names.len();
    send(&progress, ProgressEvent::Started { total });

    let mut report = TransferReport {
        mode,
        source: src.to_path_buf(),
        destination: dest.to_path_buf(),
        processed: Vec::new(),
        jpg: 0,
        png: 0,
        failed: 0,
        total,
    };

    for (i, name) in names.iter().enumerate() {
        let from = src.join(name);
        let to = dest.join(name);
        let result = match mode {
            TransferMode::Copy => tokio::fs::copy(&from, &to).await.map(|_| ()),
            TransferMode::Move => move_file(&from, &to).await,
        };
        match result {
            Ok(()) => {
                if name.trim().to_lowercase().ends_with(".jpg") {
                    report.jpg += 1;
                } else {
                    report.png += 1;
                }
                report.processed.push(name.clone());
                send(
                    &progress,
                    ProgressEvent::FileDone {
                        name: name.clone(),
                        index: i + 1,
                        total,
                    },
                );
            }
            Err(e) => {
                warn!(file = %from.display(), error = %e, "transfer failed, continuing");
                report.failed += 1;
                send(
                    &progress,
                    ProgressEvent::FileFailed {
                        name: name.clone(),
                        error: e.to_string(),
                    },
                );
            }
        }
    }

    Ok(report)
}

/// Rename first; fall back to copy+remove so moves work across devices.
async fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    tokio::fs::copy(from, to).await?;
    tokio::fs::remove_file(from).await
}

/// Deletes every image under `dir`, descending into subdirectories.
pub async fn delete_images(dir: impl AsRef<Path>) -> Result<DeleteReport, OrganizerError> {
    let dir = dir.as_ref();
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(OrganizerError::MissingSource(dir.to_path_buf())),
    }

    // Explicit work list instead of recursion; unreadable directories are
    // skipped, not fatal.
    let mut targets = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&current).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %current.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let path = entry.path();
                    match entry.file_type().await {
                        Ok(kind) if kind.is_dir() => pending.push(path),
                        Ok(kind) if kind.is_file() => {
                            if is_image_name(&entry.file_name().to_string_lossy()) {
                                targets.push(path);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "skipping unreadable entry")
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(path = %current.display(), error = %e, "directory walk interrupted");
                    break;
                }
            }
        }
    }
    targets.sort();

    let mut report = DeleteReport {
        folder: dir.to_path_buf(),
        deleted: Vec::new(),
        failed: 0,
        total: targets.len(),
    };
    for target in targets {
        match tokio::fs::remove_file(&target).await {
            Ok(()) => report.deleted.push(target),
            Err(e) => {
                warn!(file = %target.display(), error = %e, "delete failed, continuing");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

/// Append-only plain-text record of completed operations.
#[derive(Debug, Clone)]
pub struct OperationLog {
    path: PathBuf,
}

impl OperationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional log location: `operation_log.txt` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(LOG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a timestamped block for a transfer. Best-effort: failures are
    /// logged, never surfaced.
    pub async fn record_transfer(&self, report: &TransferReport) {
        let mut block = format!(
            "\n--- {} Operation at {} ---\n",
            report.mode.label(),
            timestamp()
        );
        block.push_str(&format!(
            "Source: {}\nDestination: {}\n",
            report.source.display(),
            report.destination.display()
        ));
        for name in &report.processed {
            block.push_str(&format!("[{}] {}\n", report.mode.past_tense(), name));
        }
        self.append(&block).await;
    }

    /// Appends a timestamped block for a recursive delete.
    pub async fn record_delete(&self, report: &DeleteReport) {
        let mut block = format!("\n--- Delete Operation at {} ---\n", timestamp());
        block.push_str(&format!("Folder: {}\n", report.folder.display()));
        for path in &report.deleted {
            block.push_str(&format!("[Deleted] {}\n", path.display()));
        }
        self.append(&block).await;
    }

    /// Truncates the log.
    pub async fn clear(&self) {
        if let Err(e) = tokio::fs::write(&self.path, "").await {
            warn!(path = %self.path.display(), error = %e, "could not clear operation log");
        }
    }

    /// The whole log, or `None` when it does not exist yet.
    pub async fn read(&self) -> Option<String> {
        tokio::fs::read_to_string(&self.path).await.ok()
    }

    async fn append(&self, block: &str) {
        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.path)
                .await?;
            file.write_all(block.as_bytes()).await
        }
        .await;
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "operation log append failed");
        }
    }
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

//! Transcript persistence: saving and reloading a chat as pretty JSON.
//!
//! Transcripts carry a version number so old files are rejected loudly
//! instead of deserializing into nonsense. [`peek_metadata`] reads the header
//! fields without touching the entries, which keeps listing saved chats cheap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Bump when the on-disk layout changes incompatibly.
pub const TRANSCRIPT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unsupported transcript version {found} (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Bot,
    System,
}

impl Speaker {
    /// Short display label front-ends prefix lines with.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Bot => "Parlor",
            Speaker::System => "*",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn now(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A whole saved chat: header fields plus the ordered entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub version: u32,
    pub session_id: Uuid,
    pub user_name: String,
    pub saved_at: DateTime<Utc>,
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new(session_id: Uuid, user_name: impl Into<String>) -> Self {
        Self {
            version: TRANSCRIPT_VERSION,
            session_id,
            user_name: user_name.into(),
            saved_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::now(speaker, text));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the transcript as pretty-printed JSON, stamping `saved_at`.
    pub async fn save_json(&mut self, path: impl AsRef<Path>) -> Result<(), TranscriptError> {
        self.saved_at = Utc::now();
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Reads a transcript back, rejecting unknown versions.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let transcript: Transcript = serde_json::from_str(&raw)?;
        if transcript.version != TRANSCRIPT_VERSION {
            return Err(TranscriptError::VersionMismatch {
                found: transcript.version,
                expected: TRANSCRIPT_VERSION,
            });
        }
        Ok(transcript)
    }
}

/// Header fields of a saved transcript, without the entries.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptMetadata {
    pub version: u32,
    pub session_id: Uuid,
    pub user_name: String,
    pub saved_at: DateTime<Utc>,
}

/// Reads only the header fields of a saved transcript. Unknown or newer
/// versions are reported the same way as in [`Transcript::load_json`].
pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<TranscriptMetadata, TranscriptError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let metadata: TranscriptMetadata = serde_json::from_str(&raw)?;
    if metadata.version != TRANSCRIPT_VERSION {
        return Err(TranscriptError::VersionMismatch {
            found: metadata.version,
            expected: TRANSCRIPT_VERSION,
        });
    }
    Ok(metadata)
}

//! Persistence across sessions: content files survive restarts and
//! transcripts round-trip through JSON.

use parlor_core::content::DEFAULT_JOKES;
use parlor_core::transcript::{peek_metadata, Speaker, Transcript, TranscriptError};
use parlor_core::{ChatSession, SessionConfig};
use tempfile::TempDir;
use uuid::Uuid;

#[tokio::test]
async fn test_content_survives_session_restart() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig::new().with_data_dir(dir.path()).with_seed(1);

    {
        let mut session = ChatSession::new(config.clone()).await;
        assert!(session.add_joke("Persisted punchline").await);
    }

    let session = ChatSession::new(config).await;
    assert_eq!(session.jokes().len(), DEFAULT_JOKES.len() + 1);
    assert!(session.jokes().iter().any(|j| j == "Persisted punchline"));
}

#[tokio::test]
async fn test_jokes_file_is_appended_not_rewritten() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig::new().with_data_dir(dir.path()).with_seed(1);

    let mut session = ChatSession::new(config).await;
    session.add_joke("First").await;
    session.add_joke("Second").await;

    let raw = std::fs::read_to_string(dir.path().join("jokes.txt")).unwrap();
    // Seeded defaults stay at the top; appends land at the end in order.
    assert!(raw.starts_with(DEFAULT_JOKES[0]));
    assert!(raw.ends_with("First\nSecond"));
}

#[tokio::test]
async fn test_transcript_round_trip_through_session() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig::new()
        .with_data_dir(dir.path())
        .with_user_name("Sam")
        .with_seed(4);
    let mut session = ChatSession::new(config).await;

    let mut transcript = Transcript::new(session.id(), session.user_name());
    for input in ["hello", "riddles", "skip"] {
        transcript.push(Speaker::User, input);
        let reply = session.say(input);
        transcript.push(Speaker::Bot, reply.text);
    }

    let path = dir.path().join("chat.json");
    transcript.save_json(&path).await.unwrap();

    let loaded = Transcript::load_json(&path).await.unwrap();
    assert_eq!(loaded.session_id, session.id());
    assert_eq!(loaded.entries.len(), 6);
    assert_eq!(loaded.entries[0].text, "hello");
    assert_eq!(loaded.entries[1].text, "Hi!");

    let metadata = peek_metadata(&path).await.unwrap();
    assert_eq!(metadata.user_name, "Sam");
    assert_eq!(metadata.session_id, session.id());
}

#[tokio::test]
async fn test_corrupt_transcript_is_a_serde_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    match Transcript::load_json(&path).await {
        Err(TranscriptError::Serde(_)) => {}
        other => panic!("expected serde error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_peek_does_not_require_entries_to_parse_fully() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chat.json");
    let mut transcript = Transcript::new(Uuid::new_v4(), "Sam");
    transcript.push(Speaker::Bot, "only line");
    transcript.save_json(&path).await.unwrap();

    let metadata = peek_metadata(&path).await.unwrap();
    assert_eq!(metadata.version, transcript.version);
}

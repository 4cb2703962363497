//! Session worker task.
//!
//! The UI never touches the `ChatSession` directly. One background task owns
//! the session and the running transcript, receives [`WorkerRequest`]s over an
//! mpsc channel, and posts [`WorkerReply`]s back. Requests are processed
//! strictly in arrival order, so at most one dispatch runs at a time.

use std::path::PathBuf;

use parlor_core::transcript::{Speaker, Transcript};
use parlor_core::{ChatSession, ReplyResult, RIDDLE_HINT};
use tokio::sync::mpsc;

/// Capacity of both worker channels.
pub const CHANNEL_CAPACITY: usize = 16;

/// Requests the UI sends to the session worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerRequest {
    /// Run one line of user input through the reply engine.
    Say(String),
    /// Append a new joke to the store and its backing file.
    AddJoke(String),
    /// Append a new fact to the store and its backing file.
    AddFact(String),
    /// Draw a random joke directly, bypassing the reply engine.
    RandomJoke,
    /// Draw a random fact directly, bypassing the reply engine.
    RandomFact,
    /// Save the transcript accumulated so far.
    SaveTranscript(PathBuf),
}

/// What kind of content an `AddJoke`/`AddFact` request carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Joke,
    Fact,
}

impl ContentKind {
    /// Plural label for status messages.
    pub fn plural(&self) -> &'static str {
        match self {
            ContentKind::Joke => "jokes",
            ContentKind::Fact => "facts",
        }
    }
}

/// Replies the worker posts back to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerReply {
    /// Result of a dispatched line.
    Reply(ReplyResult),
    /// A directly drawn joke.
    Joke(String),
    /// A directly drawn fact.
    Fact(String),
    /// Outcome of an add-content request; `accepted` is false for blank text.
    ContentAdded { kind: ContentKind, accepted: bool },
    /// Transcript written successfully.
    Saved(PathBuf),
    /// Transcript write failed.
    SaveFailed(String),
}

/// Spawn the worker task and hand back its channel endpoints.
///
/// The task exits when the request sender is dropped or the UI stops
/// receiving replies.
pub fn spawn_worker(
    session: ChatSession,
) -> (mpsc::Sender<WorkerRequest>, mpsc::Receiver<WorkerReply>) {
    let (request_tx, mut request_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (reply_tx, reply_rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut session = session;
        let mut transcript = Transcript::new(session.id(), session.user_name());

        while let Some(request) = request_rx.recv().await {
            let reply = handle_request(&mut session, &mut transcript, request).await;
            if reply_tx.send(reply).await.is_err() {
                break;
            }
        }
    });

    (request_tx, reply_rx)
}

/// Process a single request against the owned session and transcript.
async fn handle_request(
    session: &mut ChatSession,
    transcript: &mut Transcript,
    request: WorkerRequest,
) -> WorkerReply {
    match request {
        WorkerRequest::Say(line) => {
            transcript.push(Speaker::User, &line);
            let reply = session.say(&line);
            transcript.push(Speaker::Bot, &reply.text);
            if reply.riddle_asked {
                transcript.push(Speaker::System, RIDDLE_HINT);
            }
            WorkerReply::Reply(reply)
        }
        WorkerRequest::AddJoke(text) => {
            let accepted = session.add_joke(&text).await;
            WorkerReply::ContentAdded {
                kind: ContentKind::Joke,
                accepted,
            }
        }
        WorkerRequest::AddFact(text) => {
            let accepted = session.add_fact(&text).await;
            WorkerReply::ContentAdded {
                kind: ContentKind::Fact,
                accepted,
            }
        }
        WorkerRequest::RandomJoke => {
            let joke = session.random_joke();
            transcript.push(Speaker::Bot, &joke);
            WorkerReply::Joke(joke)
        }
        WorkerRequest::RandomFact => {
            let fact = session.random_fact();
            transcript.push(Speaker::Bot, &fact);
            WorkerReply::Fact(fact)
        }
        WorkerRequest::SaveTranscript(path) => match transcript.save_json(&path).await {
            Ok(()) => WorkerReply::Saved(path),
            Err(e) => WorkerReply::SaveFailed(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::{ContentStore, SessionConfig};

    fn seeded_session() -> ChatSession {
        let config = SessionConfig::new().with_seed(7);
        ChatSession::with_store(config, ContentStore::in_memory())
    }

    #[tokio::test]
    async fn test_say_round_trip_through_worker() {
        let (tx, mut rx) = spawn_worker(seeded_session());

        tx.send(WorkerRequest::Say("hello".to_string()))
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            WorkerReply::Reply(reply) => assert_eq!(reply.text, "Hi!"),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_requests_are_answered_in_order() {
        let (tx, mut rx) = spawn_worker(seeded_session());

        tx.send(WorkerRequest::Say("riddles".to_string()))
            .await
            .unwrap();
        tx.send(WorkerRequest::Say("skip".to_string()))
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            WorkerReply::Reply(reply) => assert!(reply.riddle_asked),
            other => panic!("unexpected reply: {other:?}"),
        }
        // The skip must see the riddle the first request installed.
        match rx.recv().await.unwrap() {
            WorkerReply::Reply(reply) => {
                assert!(reply.text.starts_with("Riddle skipped..."));
                assert!(reply.clear_riddle);
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_joke_rejects_blank_text() {
        let (tx, mut rx) = spawn_worker(seeded_session());

        tx.send(WorkerRequest::AddJoke("   ".to_string()))
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            WorkerReply::ContentAdded {
                kind: ContentKind::Joke,
                accepted: false,
            }
        );
    }

    #[tokio::test]
    async fn test_transcript_save_records_exchange() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chat.json");
        let (tx, mut rx) = spawn_worker(seeded_session());

        tx.send(WorkerRequest::Say("hello".to_string()))
            .await
            .unwrap();
        rx.recv().await.unwrap();
        tx.send(WorkerRequest::SaveTranscript(path.clone()))
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap(), WorkerReply::Saved(path.clone()));

        let saved = Transcript::load_json(&path).await.unwrap();
        assert_eq!(saved.entries.len(), 2);
        assert_eq!(saved.entries[0].speaker, Speaker::User);
        assert_eq!(saved.entries[0].text, "hello");
    }
}

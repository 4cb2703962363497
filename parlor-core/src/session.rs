//! Chat sessions: one owner for the riddle state, the content store, and the
//! random source.
//!
//! All session state lives in the [`ChatSession`] value the caller holds;
//! there is no process-wide state. Front-ends funnel every user line through
//! [`ChatSession::say`], which also applies the clear-riddle side of the reply
//! contract so no caller can forget it.

use crate::content::ContentStore;
use crate::reply::{self, ReplyResult};
use crate::riddle::RiddleState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Builder-style session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding the jokes/facts backing files.
    pub data_dir: PathBuf,
    /// Display name front-ends use for the human side of the transcript.
    pub user_name: String,
    /// Fixed RNG seed for reproducible sessions; entropy when absent.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            user_name: "User".to_string(),
            seed: None,
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One chat session. Owns every piece of mutable state a dispatch touches,
/// so holding `&mut ChatSession` is what serializes dispatches.
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    config: SessionConfig,
    state: RiddleState,
    store: ContentStore,
    rng: StdRng,
    turns: u64,
}

impl ChatSession {
    /// Creates a session, loading (or seeding) the backing files under the
    /// configured data directory. Infallible: store loading absorbs I/O
    /// problems and falls back to built-in content.
    pub async fn new(config: SessionConfig) -> Self {
        let store = ContentStore::load(&config.data_dir).await;
        Self::with_store(config, store)
    }

    /// Creates a session around an existing store. Used by tests and tools
    /// that want an in-memory store.
    pub fn with_store(config: SessionConfig, store: ContentStore) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            id: Uuid::new_v4(),
            config,
            state: RiddleState::default(),
            store,
            rng,
            turns: 0,
        }
    }

    /// Dispatches one user line and applies the clear-riddle contract.
    pub fn say(&mut self, input: &str) -> ReplyResult {
        let result = reply::dispatch(input, &mut self.state, &self.store, &mut self.rng);
        if result.clear_riddle {
            self.state.clear();
        }
        self.turns += 1;
        result
    }

    /// Appends a joke to the store and its backing file. Returns false for
    /// blank input.
    pub async fn add_joke(&mut self, text: &str) -> bool {
        self.store.add_joke(text).await
    }

    /// Appends a fact to the store and its backing file. Returns false for
    /// blank input.
    pub async fn add_fact(&mut self, text: &str) -> bool {
        self.store.add_fact(text).await
    }

    /// A random joke outside the dispatch path, for menu-style front-end
    /// actions.
    pub fn random_joke(&mut self) -> String {
        self.store.random_joke(&mut self.rng).to_string()
    }

    /// A random fact outside the dispatch path.
    pub fn random_fact(&mut self) -> String {
        self.store.random_fact(&mut self.rng).to_string()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_name(&self) -> &str {
        &self.config.user_name
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn riddle_active(&self) -> bool {
        self.state.is_active()
    }

    /// Question text of the riddle in flight, if any.
    pub fn current_question(&self) -> Option<&str> {
        self.state.current().map(|r| r.question.as_str())
    }

    /// Number of dispatches this session has run.
    pub fn turn_count(&self) -> u64 {
        self.turns
    }

    pub fn jokes(&self) -> &[String] {
        self.store.jokes()
    }

    pub fn facts(&self) -> &[String] {
        self.store.facts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> ChatSession {
        ChatSession::with_store(
            SessionConfig::new().with_seed(seed),
            ContentStore::in_memory(),
        )
    }

    #[test]
    fn test_say_applies_clear_contract() {
        let mut session = session(7);
        let asked = session.say("riddles");
        assert!(asked.riddle_asked);
        assert!(session.riddle_active());

        let skipped = session.say("skip");
        assert!(skipped.clear_riddle);
        assert!(!session.riddle_active());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_correct_answer_clears_state() {
        let mut session = session(7);
        session.say("riddles");
        let question = session.current_question().unwrap().to_string();
        let answer = crate::riddle::riddle_pool()
            .iter()
            .find(|r| r.question == question)
            .unwrap()
            .answer
            .clone();

        let result = session.say(&answer);
        assert!(result.clear_riddle);
        assert!(!session.riddle_active());
    }

    #[test]
    fn test_turn_count_increments() {
        let mut session = session(1);
        assert_eq!(session.turn_count(), 0);
        session.say("hello");
        session.say("joke");
        assert_eq!(session.turn_count(), 2);
    }

    #[test]
    fn test_seeded_sessions_are_deterministic() {
        let mut a = session(42);
        let mut b = session(42);
        for _ in 0..5 {
            assert_eq!(a.say("tell me a joke").text, b.say("tell me a joke").text);
        }
    }

    #[tokio::test]
    async fn test_add_joke_rejects_blank() {
        let mut session = session(3);
        assert!(!session.add_joke("   ").await);
        assert!(session.add_joke("A brand new joke").await);
        assert!(session.jokes().iter().any(|j| j == "A brand new joke"));
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = session(1);
        let b = session(1);
        assert_ne!(a.id(), b.id());
    }
}

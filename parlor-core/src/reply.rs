//! Reply dispatch: one user line in, one reply out.
//!
//! Matching is first-match-wins over a fixed branch order, case-insensitive on
//! trimmed input. While a riddle is in flight the riddle branch consumes every
//! message, so greetings and keywords are deliberately unreachable until the
//! round ends. The engine never fails: every string input maps to some reply.

use crate::content::ContentStore;
use crate::riddle::{riddle_pool, RiddleState};
use lazy_static::lazy_static;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// What one dispatch produced. Callers clear the riddle state whenever
/// `clear_riddle` is set, and show [`RIDDLE_HINT`] whenever `riddle_asked` is
/// set; both are UI policy driven by the flags, not engine behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyResult {
    pub text: String,
    pub clear_riddle: bool,
    pub riddle_asked: bool,
}

impl ReplyResult {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            clear_riddle: false,
            riddle_asked: false,
        }
    }

    fn clearing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            clear_riddle: true,
            riddle_asked: false,
        }
    }

    fn asking(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            clear_riddle: false,
            riddle_asked: true,
        }
    }
}

/// Secondary line front-ends show after a riddle is asked.
pub const RIDDLE_HINT: &str =
    "(Type your answer directly in the input box. Type 'skip' to see the answer.)";

const CORRECT_REPLY: &str = "Congrats! That's correct!";
const RETRY_REPLY: &str = "Not quite. Try again or type 'skip' to get the answer.";
const NO_RIDDLE_REPLY: &str = "No active riddle to skip. Try 'Riddles' to get one.";
const FALLBACK_REPLY: &str =
    "I didn't get that. Try: 'hello', 'how are you', 'riddles', 'jokes', or 'facts'.";
const HOW_ARE_YOU_REPLY: &str = "I'm fine, thanks! How can I help you today?";

const FAREWELLS: [&str; 2] = ["bye", "goodbye"];
const HOW_ARE_PATTERNS: [&str; 3] = ["how are", "how's it going", "how are you doing"];
const RIDDLE_REQUESTS: [&str; 5] = [
    "riddle",
    "riddles",
    "ask riddle",
    "give me a riddle",
    "please give me a riddle",
];

lazy_static! {
    static ref GREETINGS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("hello", "Hi!");
        map.insert("hi", "Hello!");
        map.insert("hey", "Hey there!");
        map.insert("how are you", HOW_ARE_YOU_REPLY);
        map.insert("what's up", "All good here - ready to chat!");
        map.insert("bye", "Goodbye! Have a great day!");
        map.insert("goodbye", "See you later!");
        map.insert("thanks", "You're welcome!");
        map.insert("thank you", "Anytime!");
        map.insert("how are you doing?", "I'm doing well");
        map.insert("good morning", "A very wonderful morning to you and your family");
        map.insert("good afternoon", "Good afternoon User");
        map.insert("good evening", "Same to you!");
        map.insert("good night", "Good night... take care");
        map
    };
}

/// Maps one line of user text to a [`ReplyResult`], consulting and updating
/// the riddle state and drawing random content through `rng`.
pub fn dispatch<R: Rng>(
    input: &str,
    state: &mut RiddleState,
    store: &ContentStore,
    rng: &mut R,
) -> ReplyResult {
    let text = input.trim().to_lowercase();
    debug!(input = %text, riddle_active = state.is_active(), "dispatching");

    // A riddle in flight consumes everything until the round ends.
    if let Some(riddle) = state.current() {
        let expected = riddle.expected_answer();
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let matched = !normalized.is_empty()
            && (expected == normalized
                || expected.contains(&normalized)
                || normalized.contains(&expected));
        if matched {
            return ReplyResult::clearing(CORRECT_REPLY);
        }
        if normalized == "skip" {
            return ReplyResult::clearing(format!(
                "Riddle skipped... The correct answer is: {expected}"
            ));
        }
        return ReplyResult::plain(RETRY_REPLY);
    }

    if let Some(reply) = GREETINGS.get(text.as_str()) {
        if FAREWELLS.contains(&text.as_str()) {
            return ReplyResult::clearing(*reply);
        }
        return ReplyResult::plain(*reply);
    }

    if HOW_ARE_PATTERNS.iter().any(|pattern| text.contains(pattern)) {
        return ReplyResult::plain(HOW_ARE_YOU_REPLY);
    }

    if RIDDLE_REQUESTS.contains(&text.as_str()) {
        let pool = riddle_pool();
        let riddle = pool[rng.gen_range(0..pool.len())].clone();
        let question = riddle.question.clone();
        state.ask(riddle);
        return ReplyResult::asking(question);
    }

    if text == "skip" {
        return ReplyResult::plain(NO_RIDDLE_REPLY);
    }

    if text.contains("joke") {
        return ReplyResult::plain(store.random_joke(rng));
    }

    if text.contains("fact") || text.contains("did you know") {
        return ReplyResult::plain(store.random_fact(rng));
    }

    ReplyResult::plain(FALLBACK_REPLY)
}

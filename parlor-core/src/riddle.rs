//! Riddles and the riddle-round state machine.
//!
//! A session is either idle or has exactly one riddle in flight. The two-state
//! enum makes the "active but no current riddle" shape unrepresentable, so
//! callers never have to guard against a stale question.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A question/answer pair. Immutable once selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    pub question: String,
    pub answer: String,
}

impl Riddle {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// The answer as compared against user input: trimmed and lowercased.
    pub fn expected_answer(&self) -> String {
        self.answer.trim().to_lowercase()
    }
}

/// Whether a riddle round is in flight.
///
/// Transitions: `Idle` -> `Asked` when a riddle is requested, `Asked` -> `Idle`
/// on a correct answer, a skip, or a farewell phrase. Nothing else moves it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiddleState {
    #[default]
    Idle,
    Asked(Riddle),
}

impl RiddleState {
    pub fn is_active(&self) -> bool {
        matches!(self, RiddleState::Asked(_))
    }

    /// The riddle in flight, if any.
    pub fn current(&self) -> Option<&Riddle> {
        match self {
            RiddleState::Idle => None,
            RiddleState::Asked(riddle) => Some(riddle),
        }
    }

    /// Puts a riddle in flight, replacing any previous one.
    pub fn ask(&mut self, riddle: Riddle) {
        *self = RiddleState::Asked(riddle);
    }

    /// Ends the round.
    pub fn clear(&mut self) {
        *self = RiddleState::Idle;
    }
}

lazy_static! {
    static ref RIDDLE_POOL: [Riddle; 3] = [
        Riddle::new(
            "I speak without a mouth and hear without ears. I have nobody, \
             but I come alive with wind. What am I?",
            "echo",
        ),
        Riddle::new(
            "I come from a mine and get surrounded by wood always. Everyone \
             uses me. What am I?",
            "pencil lead",
        ),
        Riddle::new("What has keys but can't open locks?", "piano"),
    ];
}

/// The built-in riddle pool the engine draws from.
pub fn riddle_pool() -> &'static [Riddle] {
    &*RIDDLE_POOL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = RiddleState::default();
        assert_eq!(state, RiddleState::Idle);
        assert!(!state.is_active());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_ask_and_clear() {
        let mut state = RiddleState::default();
        state.ask(Riddle::new("Q", "a"));
        assert!(state.is_active());
        assert_eq!(state.current().map(|r| r.question.as_str()), Some("Q"));

        state.clear();
        assert!(!state.is_active());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_expected_answer_normalizes() {
        let riddle = Riddle::new("Q", "  Echo ");
        assert_eq!(riddle.expected_answer(), "echo");
    }

    #[test]
    fn test_pool_has_three_riddles() {
        let pool = riddle_pool();
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|r| !r.question.is_empty() && !r.answer.is_empty()));
    }
}

//! End-to-end conversation flow through a real session with file-backed
//! content.

use parlor_core::content::{DEFAULT_FACTS, DEFAULT_JOKES};
use parlor_core::riddle::riddle_pool;
use parlor_core::{ChatSession, SessionConfig};
use tempfile::TempDir;

async fn setup(seed: u64) -> (ChatSession, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let config = SessionConfig::new()
        .with_data_dir(dir.path())
        .with_user_name("QA")
        .with_seed(seed);
    let session = ChatSession::new(config).await;
    (session, dir)
}

#[tokio::test]
async fn test_full_conversation_flow() {
    let (mut session, _dir) = setup(99).await;

    // Small talk first.
    let reply = session.say("hello");
    assert_eq!(reply.text, "Hi!");
    assert!(!reply.riddle_asked);

    // Ask for a riddle and check the question came from the pool.
    let asked = session.say("Riddles");
    assert!(asked.riddle_asked);
    assert!(session.riddle_active());
    let riddle = riddle_pool()
        .iter()
        .find(|r| r.question == asked.text)
        .expect("question should come from the pool");

    // A wrong answer keeps the round alive and consumes other keywords.
    let wrong = session.say("definitely not it");
    assert_eq!(
        wrong.text,
        "Not quite. Try again or type 'skip' to get the answer."
    );
    assert!(session.riddle_active());
    let swallowed = session.say("tell me a joke");
    assert_eq!(swallowed.text, wrong.text);

    // Skipping reveals the normalized answer and ends the round.
    let skipped = session.say("skip");
    assert_eq!(
        skipped.text,
        format!(
            "Riddle skipped... The correct answer is: {}",
            riddle.expected_answer()
        )
    );
    assert!(skipped.clear_riddle);
    assert!(!session.riddle_active());

    // Keywords work again once the round is over.
    let joke = session.say("tell me a joke");
    assert!(session.jokes().iter().any(|j| *j == joke.text));
    let fact = session.say("did you know");
    assert!(session.facts().iter().any(|f| *f == fact.text));

    // Farewell carries the clear flag per the reply contract.
    let bye = session.say("bye");
    assert_eq!(bye.text, "Goodbye! Have a great day!");
    assert!(bye.clear_riddle);

    assert_eq!(session.turn_count(), 8);
}

#[tokio::test]
async fn test_answering_riddle_correctly() {
    let (mut session, _dir) = setup(5).await;

    let asked = session.say("give me a riddle");
    let answer = riddle_pool()
        .iter()
        .find(|r| r.question == asked.text)
        .expect("question should come from the pool")
        .answer
        .to_uppercase();

    // Case-insensitive match.
    let correct = session.say(&answer);
    assert_eq!(correct.text, "Congrats! That's correct!");
    assert!(correct.clear_riddle);
    assert!(!session.riddle_active());
}

#[tokio::test]
async fn test_first_run_seeds_default_content() {
    let (session, dir) = setup(1).await;

    assert_eq!(session.jokes(), &DEFAULT_JOKES[..]);
    assert_eq!(session.facts(), &DEFAULT_FACTS[..]);
    assert!(dir.path().join("jokes.txt").exists());
    assert!(dir.path().join("facts.txt").exists());
}

#[tokio::test]
async fn test_added_content_is_served() {
    let (mut session, _dir) = setup(2).await;

    assert!(session.add_fact("Ferris is a crab").await);
    assert!(session.facts().iter().any(|f| f == "Ferris is a crab"));
    let reply = session.say("fact");
    assert!(session.facts().iter().any(|f| *f == reply.text));
}

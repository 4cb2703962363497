//! Run a scripted conversation and save it as a transcript JSON.

use parlor_core::content::ContentStore;
use parlor_core::transcript::{Speaker, Transcript};
use parlor_core::{ChatSession, SessionConfig, RIDDLE_HINT};

const SCRIPT: [&str; 8] = [
    "hello",
    "how are you",
    "riddles",
    "hmm, no idea",
    "skip",
    "tell me a joke",
    "did you know",
    "bye",
];

#[tokio::main]
async fn main() {
    let config = SessionConfig::new().with_user_name("Demo").with_seed(2024);
    let mut session = ChatSession::with_store(config, ContentStore::in_memory());
    let mut transcript = Transcript::new(session.id(), session.user_name());

    println!("=== Scripted Conversation ===\n");
    for input in SCRIPT {
        println!("{}: {input}", session.user_name());
        transcript.push(Speaker::User, input);

        let reply = session.say(input);
        println!("Parlor: {}", reply.text);
        transcript.push(Speaker::Bot, reply.text.clone());

        if reply.riddle_asked {
            println!("Parlor: {RIDDLE_HINT}");
            transcript.push(Speaker::System, RIDDLE_HINT);
        }
        println!();
    }

    let path = std::env::temp_dir().join("parlor_demo_transcript.json");
    match transcript.save_json(&path).await {
        Ok(()) => println!("Saved {} entries to {}", transcript.len(), path.display()),
        Err(e) => eprintln!("Transcript save failed: {e}"),
    }
}

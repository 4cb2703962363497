//! # Parlor Core
//!
//! The engine behind a small rule-based chat companion, plus the two parlor
//! games that ship alongside it: a hangman state machine and an image
//! organizer. Everything here is UI-free; front-ends own the rendering and
//! drive the engine through [`ChatSession`].
//!
//! ## Components
//!
//! - [`reply`]: first-match-wins dispatch of one user line to one reply
//! - [`riddle`]: the riddle pool and the idle/asked round state
//! - [`content`]: file-backed joke and fact lists with built-in defaults
//! - [`session`]: the owning object a front-end holds and talks to
//! - [`transcript`]: saving and reloading chats as versioned JSON
//! - [`hangman`]: the word-guessing game engine
//! - [`organizer`]: JPG/PNG move/copy/delete with progress reporting
//!
//! ## Quick Start
//!
//! ```ignore
//! use parlor_core::{ChatSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SessionConfig::new().with_data_dir("./data");
//!     let mut session = ChatSession::new(config).await;
//!
//!     let reply = session.say("riddles");
//!     println!("{}", reply.text);
//!     assert!(reply.riddle_asked);
//! }
//! ```

pub mod content;
pub mod hangman;
pub mod organizer;
pub mod reply;
pub mod riddle;
pub mod session;
pub mod transcript;

pub use content::ContentStore;
pub use reply::{dispatch, ReplyResult, RIDDLE_HINT};
pub use riddle::{Riddle, RiddleState};
pub use session::{ChatSession, SessionConfig};
pub use transcript::{Speaker, Transcript, TranscriptEntry, TranscriptError};

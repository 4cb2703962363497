//! Headless mode for the chat companion.
//!
//! A line-oriented stdin/stdout interface for piping and automated testing.
//! Lines starting with `#` are commands; everything else is sent to the bot.

use std::io::{self, BufRead};

use parlor_core::transcript::{Speaker, Transcript};
use parlor_core::{ChatSession, SessionConfig, RIDDLE_HINT};

use crate::speech::Voice;

/// Run the chat loop against stdin until EOF or `#quit`.
pub async fn run(config: SessionConfig) -> io::Result<()> {
    let mut session = ChatSession::new(config).await;
    let mut transcript = Transcript::new(session.id(), session.user_name());
    let voice = Voice::from_env();

    println!("=== Parlor (headless) ===");
    println!("User: {}", session.user_name());
    println!("Data dir: {}", session.data_dir().display());
    println!(
        "Jokes: {}  Facts: {}",
        session.jokes().len(),
        session.facts().len()
    );
    println!();
    print_commands();
    println!();
    println!("Say something (one line per message):");
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("exit") => {
                    println!("Goodbye!");
                    break;
                }
                Some("save") => {
                    if let Some(path) = parts.get(1) {
                        match transcript.save_json(path).await {
                            Ok(()) => println!("[SAVED] Transcript written to {path}"),
                            Err(e) => println!("[ERROR] Save failed: {e}"),
                        }
                    } else {
                        println!("[ERROR] Usage: #save <path>");
                    }
                }
                Some("status") => {
                    println!("[STATUS]");
                    println!("  Session: {}", session.id());
                    println!("  User: {}", session.user_name());
                    println!("  Turns: {}", session.turn_count());
                    println!("  Riddle active: {}", session.riddle_active());
                    if let Some(question) = session.current_question() {
                        println!("  Question: {question}");
                    }
                    println!(
                        "  Jokes: {}  Facts: {}",
                        session.jokes().len(),
                        session.facts().len()
                    );
                }
                Some("help") => {
                    println!("[HELP]");
                    print_commands();
                    println!("  (anything else is sent to the bot)");
                }
                _ => {
                    println!("[ERROR] Unknown command. Type #help for help.");
                }
            }
            continue;
        }

        transcript.push(Speaker::User, line);
        let reply = session.say(line);
        transcript.push(Speaker::Bot, &reply.text);

        println!("Parlor: {}", reply.text);
        voice.speak(&reply.text);
        if reply.riddle_asked {
            transcript.push(Speaker::System, RIDDLE_HINT);
            println!("{RIDDLE_HINT}");
        }
        println!();
    }

    Ok(())
}

fn print_commands() {
    println!("Commands:");
    println!("  #quit         - Exit");
    println!("  #save <path>  - Save the transcript as JSON");
    println!("  #status       - Show session status");
    println!("  #help         - Show this help");
}

/// Build a session config from environment variables and command-line flags.
/// Flags win over the environment.
pub fn parse_session_config(args: &[String]) -> SessionConfig {
    apply_flags(config_from_env(), args)
}

fn config_from_env() -> SessionConfig {
    let mut config = SessionConfig::new();

    if let Ok(dir) = std::env::var("PARLOR_DATA_DIR") {
        if !dir.trim().is_empty() {
            config = config.with_data_dir(dir);
        }
    }
    if let Ok(name) = std::env::var("PARLOR_USER") {
        if !name.trim().is_empty() {
            config = config.with_user_name(name);
        }
    }

    config
}

fn apply_flags(mut config: SessionConfig, args: &[String]) -> SessionConfig {
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => {
                if let Some(dir) = args.get(i + 1) {
                    config = config.with_data_dir(dir.clone());
                    i += 1;
                }
            }
            "--name" => {
                if let Some(name) = args.get(i + 1) {
                    config = config.with_user_name(name.clone());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = apply_flags(
            SessionConfig::new(),
            &args(&["parlor", "--data-dir", "/tmp/parlor", "--name", "Ada"]),
        );
        assert_eq!(config.data_dir, Path::new("/tmp/parlor"));
        assert_eq!(config.user_name, "Ada");
    }

    #[test]
    fn test_missing_flag_values_are_ignored() {
        let config = apply_flags(SessionConfig::new(), &args(&["parlor", "--name"]));
        assert_eq!(config.user_name, "User");
    }
}

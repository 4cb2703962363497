//! Parlor terminal chat application.
//!
//! A vim-style terminal interface for chatting with a rule-based companion
//! that tells riddles, jokes, and facts.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for piping
//! and automated testing:
//!
//! ```bash
//! cargo run -p parlor -- --headless --name "Ada"
//! ```

mod app;
mod events;
mod headless;
mod speech;
mod ui;
mod worker;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parlor_core::ChatSession;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use speech::Voice;
use ui::render::render;
use worker::spawn_worker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = headless::parse_session_config(&args);

    if args.iter().any(|a| a == "--headless") {
        // Stderr logging is safe here; under the raw-mode TUI it would
        // corrupt the screen, so only the headless path installs it.
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
        return headless::run(config).await.map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let user_name = config.user_name.clone();
    let session = ChatSession::new(config).await;
    let (request_tx, reply_rx) = spawn_worker(session);
    let app = App::new(request_tx, reply_rx, user_name, Voice::from_env());

    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Fold in whatever the worker produced since the last draw
        while let Ok(reply) = app.try_recv_reply() {
            app.apply_worker_reply(reply);
        }

        // Poll with a timeout so the thinking animation keeps moving
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::Submitted(line) => {
                    app.send_chat_message(line);
                    app.enter_normal_mode();
                }
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("Parlor - terminal chat companion");
    println!();
    println!("USAGE:");
    println!("  parlor [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help         Show this help message");
    println!("  --headless         Run in headless mode (line-oriented, no TUI)");
    println!("  --data-dir <DIR>   Directory for jokes.txt / facts.txt (default: .)");
    println!("  --name <NAME>      Display name for your side of the chat (default: User)");
    println!();
    println!("ENVIRONMENT:");
    println!("  PARLOR_DATA_DIR    Same as --data-dir");
    println!("  PARLOR_USER        Same as --name");
    println!("  PARLOR_VOICE       Speech command for spoken replies (e.g. espeak)");
    println!("  RUST_LOG           Log filter in headless mode (e.g. parlor_core=debug)");
    println!();
    println!("EXAMPLES:");
    println!("  parlor                                 # Interactive TUI mode");
    println!("  parlor --headless                      # Headless with defaults");
    println!("  parlor --headless --name Ada --data-dir ~/.parlor");
}

//! Move or copy the images of one folder into another, with progress output
//! and an operation log, from the command line.
//!
//! Usage: organize <source> <destination> [move|copy]

use parlor_core::organizer::{self, OperationLog, ProgressEvent, TransferMode};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (src, dest) = match (args.first(), args.get(1)) {
        (Some(src), Some(dest)) => (src.clone(), dest.clone()),
        _ => {
            eprintln!("Usage: organize <source> <destination> [move|copy]");
            std::process::exit(2);
        }
    };
    let mode = match args.get(2).map(String::as_str) {
        Some("move") => TransferMode::Move,
        Some("copy") | None => TransferMode::Copy,
        Some(other) => {
            eprintln!("Unknown mode '{other}', expected 'move' or 'copy'");
            std::process::exit(2);
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ProgressEvent::Started { total } => println!("Found {total} image(s)"),
                ProgressEvent::FileDone { name, index, total } => {
                    println!("[{index}/{total}] {name}")
                }
                ProgressEvent::FileFailed { name, error } => {
                    println!("[failed] {name}: {error}")
                }
            }
        }
    });

    match organizer::transfer(&src, &dest, mode, Some(tx)).await {
        Ok(report) => {
            printer.await.ok();
            println!(
                "{}: {}/{} files ({} jpg, {} png, {} failed)",
                mode.label(),
                report.processed.len(),
                report.total,
                report.jpg,
                report.png,
                report.failed
            );
            OperationLog::in_dir(&dest).record_transfer(&report).await;
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

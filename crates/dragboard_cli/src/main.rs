//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `dragboard_core` linkage.
//! - Walk one scripted board session against the in-memory host and print
//!   the result, so store and drag/drop wiring can be checked without a UI.

use dragboard_core::{Board, FormFields, MemoryRenderHost, ProjectStatus, SharedRenderHost};
use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

fn main() -> ExitCode {
    println!("dragboard_core ping={}", dragboard_core::ping());
    println!("dragboard_core version={}", dragboard_core::core_version());

    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    let memory = Arc::new(Mutex::new(MemoryRenderHost::new()));
    let host: SharedRenderHost = memory.clone();
    let store = dragboard_core::ProjectStore::global();
    let mut board = Board::mount(store, host)?;

    let mut submitted = Vec::new();
    for fields in [
        FormFields::new("Landing page", "Redesign the landing page", "3"),
        FormFields::new("Billing", "Move invoices to the new provider", "1"),
        FormFields::new("Typo", "fix", "2"),
    ] {
        board.input.fill(fields);
        match board.input.submit() {
            Ok(project) => submitted.push(project),
            Err(err) => println!("submit rejected: {err}"),
        }
    }

    if let Some(first) = submitted.first() {
        let outcome = board.drag_to(&first.id, ProjectStatus::Finished)?;
        println!("drag {} -> finished: {outcome:?}", first.id);
    }

    let outline = memory
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .render_outline();
    print!("{outline}");
    println!(
        "{}",
        serde_json::to_string_pretty(store.snapshot().projects())?
    );
    Ok(())
}

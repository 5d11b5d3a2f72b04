//! Interactive watch mode handler.
//!
//! Bootstraps the client, renders the gallery, then runs a single
//! `tokio::select!` loop over the poll timer, the pending narrative
//! deadline, in-flight vote completions, and user input lines (read on
//! a separate thread so the terminal never blocks polling).

use std::time::Duration;

use colored::Colorize;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::api::HttpGalleryApi;
use crate::commands::watch_commands::{help_text, parse_watch_command, WatchCommand};
use crate::config::Config;
use crate::controller::{Controller, VoteOutcome};
use crate::error::Result;
use crate::session::SessionStore;
use crate::view;

/// Start interactive watch mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
///
/// # Errors
///
/// Returns an error when the HTTP client or session store cannot be
/// constructed. Backend failures after startup are rendered, not
/// propagated; the loop keeps running on stale data.
pub async fn run_watch(config: Config) -> Result<()> {
    tracing::info!("Starting watch mode");

    let api = HttpGalleryApi::new(&config.server)?;
    let store = SessionStore::new(config.client.session_file.as_deref())?;
    let mut controller = Controller::new(api, store);

    print_welcome_banner(&config);

    controller.bootstrap().await;
    print!("{}", view::render_gallery(controller.state(), &config.server));
    print!("{}", view::render_stats(controller.state()));
    println!();

    let lines = spawn_input_thread();
    watch_loop(&mut controller, &config, lines).await
}

/// The watch event loop.
///
/// All state mutation happens here, one event at a time; leaving the
/// loop tears down the poll timer, any pending narrative step, and any
/// in-flight vote futures together.
async fn watch_loop(
    controller: &mut Controller,
    config: &Config,
    mut lines: mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    let mut interval = poll_interval(Duration::from_secs(config.client.poll_interval_secs));
    // The first tick completes immediately; consume it so the first
    // timed refresh happens one full interval after bootstrap.
    interval.tick().await;

    let mut votes: FuturesUnordered<BoxFuture<'static, VoteOutcome>> = FuturesUnordered::new();

    loop {
        tokio::select! {
            biased;

            // --- Vote completions ---
            Some(outcome) = votes.next(), if !votes.is_empty() => {
                if let Err(e) = controller.complete_vote(outcome).await {
                    eprintln!("{}", super::display_error(&e).red());
                }
            }

            // --- Narrative deadline (armed only mid-sequence) ---
            _ = narrative_sleep(controller.narrative_deadline()) => {
                controller.advance_narrative();
                if let Some(overlay) = view::render_overlay(controller.state()) {
                    println!("\n{}", overlay);
                }
            }

            // --- Poll timer ---
            _ = interval.tick() => {
                controller.refresh().await;
                print!("\n{}", view::render_gallery(controller.state(), &config.server));
            }

            // --- User input ---
            line = lines.recv() => {
                match line {
                    Some(line) => {
                        if !handle_line(controller, config, &line, &mut votes).await {
                            break;
                        }
                    }
                    // Input thread ended (Ctrl-C / Ctrl-D).
                    None => break,
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Handle one input line.
///
/// Returns `false` when the loop should exit.
async fn handle_line(
    controller: &mut Controller,
    config: &Config,
    line: &str,
    votes: &mut FuturesUnordered<BoxFuture<'static, VoteOutcome>>,
) -> bool {
    match parse_watch_command(line) {
        Ok(WatchCommand::Vote(display_number)) => {
            match controller.state().picture_id_at(display_number) {
                Some(picture_id) => match controller.begin_vote(picture_id) {
                    Ok(pending) => {
                        votes.push(pending);
                        println!(
                            "{}",
                            format!("Voting for Picture #{}...", display_number).cyan()
                        );
                    }
                    Err(e) => eprintln!("{}", super::display_error(&e).red()),
                },
                None => eprintln!(
                    "{}",
                    format!("No picture #{} in the gallery", display_number).red()
                ),
            }
            true
        }
        Ok(WatchCommand::Refresh) => {
            controller.refresh().await;
            print!("\n{}", view::render_gallery(controller.state(), &config.server));
            print!("{}", view::render_stats(controller.state()));
            true
        }
        Ok(WatchCommand::Stats) => {
            print!("\n{}", view::render_stats(controller.state()));
            print!("{}", view::render_top_three(controller.state()));
            true
        }
        Ok(WatchCommand::Help) => {
            println!("{}", help_text());
            true
        }
        Ok(WatchCommand::Quit) => false,
        Ok(WatchCommand::Empty) => true,
        Err(e) => {
            eprintln!("{}", e.to_string().yellow());
            true
        }
    }
}

/// Poll timer for the refresh cycle.
///
/// A slow cycle delays the next tick rather than bursting to catch up,
/// so refreshes never overlap.
fn poll_interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Sleep until the narrative deadline, or forever when none is armed.
async fn narrative_sleep(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Read input lines on a dedicated thread, forwarding them over a
/// channel. Dropping the receiver, or Ctrl-C / Ctrl-D, ends the thread;
/// the closed channel tells the loop to exit.
fn spawn_input_thread() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("picvote> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }
    });

    rx
}

/// Display welcome banner at the start of watch mode
///
/// Shows the server in use, the refresh cadence, and basic
/// instructions.
fn print_welcome_banner(config: &Config) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║               Picvote Gallery Watch - Welcome!               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Server:  {}", config.server.base());
    println!("Refresh: every {}s", config.client.poll_interval_secs);
    println!("\nType 'help' for available commands, 'quit' to leave\n");
}

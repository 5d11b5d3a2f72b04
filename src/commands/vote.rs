//! One-shot vote.
//!
//! Resolves the session (creating one if needed), submits a vote for
//! the given picture id, and plays the post-vote feedback sequence
//! with real delays before exiting.

use colored::Colorize;

use crate::api::HttpGalleryApi;
use crate::config::Config;
use crate::controller::Controller;
use crate::error::Result;
use crate::session::SessionStore;
use crate::view;

/// Vote for a picture by its id
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `picture_id` - Backend id of the picture to vote for
///
/// # Errors
///
/// Returns an error when the session cannot be resolved or the vote is
/// refused or rejected. The server's rejection message is printed
/// before the error propagates.
pub async fn run_vote(config: &Config, picture_id: u64) -> Result<()> {
    tracing::info!("Voting for picture {}", picture_id);

    let api = HttpGalleryApi::new(&config.server)?;
    let store = SessionStore::new(config.client.session_file.as_deref())?;
    let mut controller = Controller::new(api, store);

    // A one-shot vote cannot proceed without a session, so unlike watch
    // mode a failed resolution is fatal here.
    controller.resolve_session().await?;
    controller.refresh().await;

    let pending = controller.begin_vote(picture_id)?;
    println!("{}", format!("Voting for picture {}...", picture_id).cyan());
    let outcome = pending.await;

    if let Err(e) = controller.complete_vote(outcome).await {
        eprintln!("{}", super::display_error(&e).red());
        return Err(e);
    }

    play_narrative(&mut controller).await;
    Ok(())
}

/// Play the feedback sequence to completion: counts settle, thank-you
/// at +1, leaderboard at +3, dismissed at +7.
pub(crate) async fn play_narrative(controller: &mut Controller) {
    while let Some(deadline) = controller.narrative_deadline() {
        tokio::time::sleep_until(deadline).await;
        controller.advance_narrative();
        if let Some(overlay) = view::render_overlay(controller.state()) {
            println!("\n{}", overlay);
        }
    }
}

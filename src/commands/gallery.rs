//! One-shot gallery listing.
//!
//! Fetches the picture list and prints it as a table or JSON, then
//! exits. No session is needed for read-only queries.

use crate::api::{GalleryApi, HttpGalleryApi, Picture};
use crate::config::Config;
use crate::error::{PicvoteError, Result};
use crate::state::{AppEvent, AppState};
use crate::view;

/// Print the current picture gallery
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `json` - Output pretty-printed JSON instead of a table
///
/// # Errors
///
/// Returns an error when the fetch fails; one-shot queries have no
/// stale snapshot to fall back on.
pub async fn run_gallery(config: &Config, json: bool) -> Result<()> {
    tracing::info!("Fetching picture gallery");

    let api = HttpGalleryApi::new(&config.server)?;
    let pictures = api.pictures().await?;

    if json {
        output_pictures_json(&pictures)?;
        return Ok(());
    }

    let mut state = AppState::new();
    state.apply(AppEvent::PicturesReplaced { pictures });
    state.apply(AppEvent::BootstrapFinished);
    print!("{}", view::render_gallery(&state, &config.server));
    Ok(())
}

/// Output pictures in JSON format
///
/// # Errors
///
/// Returns `PicvoteError::Serialization` if serialization fails
fn output_pictures_json(pictures: &[Picture]) -> Result<()> {
    let json = serde_json::to_string_pretty(pictures).map_err(PicvoteError::Serialization)?;
    println!("{}", json);
    Ok(())
}

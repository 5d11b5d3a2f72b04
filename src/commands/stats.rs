//! One-shot stats snapshot.
//!
//! Fetches the stats and the picture list (the latter so leaderboard
//! entries can be shown by their gallery position) and prints the
//! summary plus the top three.

use crate::api::{GalleryApi, HttpGalleryApi, Stats};
use crate::config::Config;
use crate::error::{PicvoteError, Result};
use crate::state::{AppEvent, AppState};
use crate::view;

/// Print the current voting stats and top three
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `json` - Output pretty-printed JSON instead of tables
///
/// # Errors
///
/// Returns an error when the stats fetch fails. A failed picture fetch
/// only degrades the display (entries fall back to filenames), so it is
/// logged and otherwise ignored.
pub async fn run_stats(config: &Config, json: bool) -> Result<()> {
    tracing::info!("Fetching voting stats");

    let api = HttpGalleryApi::new(&config.server)?;
    let stats = api.stats().await?;

    if json {
        output_stats_json(&stats)?;
        return Ok(());
    }

    let mut state = AppState::new();
    match api.pictures().await {
        Ok(pictures) => state.apply(AppEvent::PicturesReplaced { pictures }),
        Err(e) => tracing::warn!("Failed to fetch pictures for display numbers: {}", e),
    }
    state.apply(AppEvent::StatsReplaced { stats });
    state.apply(AppEvent::BootstrapFinished);

    print!("{}", view::render_stats(&state));
    print!("{}", view::render_top_three(&state));
    Ok(())
}

/// Output stats in JSON format
///
/// # Errors
///
/// Returns `PicvoteError::Serialization` if serialization fails
fn output_stats_json(stats: &Stats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(PicvoteError::Serialization)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_stats;

    #[test]
    fn test_stats_json_round_trips() {
        let stats = sample_stats();
        let json = serde_json::to_string_pretty(&stats).unwrap();
        let parsed: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_votes, stats.total_votes);
        assert_eq!(parsed.top_three, stats.top_three);
    }

    #[test]
    fn test_stats_json_uses_camel_case_keys() {
        let stats = sample_stats();
        let json = serde_json::to_string_pretty(&stats).unwrap();
        assert!(json.contains("totalVotes"));
        assert!(json.contains("mostPopular"));
        assert!(json.contains("topThree"));
    }

    #[test]
    fn test_output_stats_json_returns_ok() {
        assert!(output_stats_json(&sample_stats()).is_ok());
    }
}

//! Terminal rendering for gallery, stats, and vote overlays
//!
//! Every renderer is a pure function from a state snapshot to a
//! `String`, so output is assertable in tests; command handlers decide
//! when to print. Tables use `prettytable`, accents use `colored`.

use std::fmt::Write as _;

use colored::Colorize;
use prettytable::{row, Table};

use crate::config::ServerConfig;
use crate::state::AppState;

/// Asset name substituted when a picture carries no filename.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.jpg";

/// Full URL of a picture's image.
///
/// Images are served filename-keyed under the configured path prefix.
/// An empty filename falls back to [`PLACEHOLDER_IMAGE`].
///
/// # Examples
///
/// ```
/// use picvote::config::ServerConfig;
/// use picvote::view::image_url;
///
/// let server = ServerConfig::default();
/// assert_eq!(
///     image_url(&server, "harley.jpg"),
///     "http://localhost:5000/images/harley.jpg"
/// );
/// ```
pub fn image_url(server: &ServerConfig, filename: &str) -> String {
    let name = if filename.is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        filename
    };
    format!("{}{}/{}", server.base(), server.images_path, name)
}

/// A picture's share of the total vote, formatted with one decimal
/// digit ("25.0"). A zero total yields "0.0" rather than dividing.
pub fn vote_share(votes: u64, total_votes: u64) -> String {
    if total_votes == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", votes as f64 / total_votes as f64 * 100.0)
}

/// User-facing label for a stats entry.
///
/// Stats entries are matched back to gallery positions by filename;
/// when no gallery picture matches, the raw filename is shown instead.
fn picture_label(state: &AppState, filename: &str) -> String {
    match state.display_number_by_filename(filename) {
        Some(n) => format!("Picture #{}", n),
        None => filename.to_string(),
    }
}

/// Render the picture gallery as a table.
///
/// Shows the display number, filename, vote count (annotated while a
/// vote is in flight), and image URL for each picture. An empty gallery
/// renders a notice instead of an empty table, and the initial load
/// renders a loading notice.
pub fn render_gallery(state: &AppState, server: &ServerConfig) -> String {
    if state.loading {
        return format!("{}\n", "Loading pictures...".cyan());
    }
    if state.pictures.is_empty() {
        return format!("{}\n", "No pictures found. Is the server running?".yellow());
    }

    let mut table = Table::new();
    table.add_row(row!["#", "Picture", "Votes", "Image"]);

    for (index, picture) in state.pictures.iter().enumerate() {
        let votes = if state.is_voting(picture.id) {
            format!("{} (voting...)", picture.votes)
        } else {
            picture.votes.to_string()
        };

        table.add_row(row![
            index + 1,
            picture.filename,
            votes,
            image_url(server, &picture.filename)
        ]);
    }

    table.to_string()
}

/// Render the stats summary.
///
/// The section is empty until at least one vote exists; before that a
/// short hint is shown instead. The leader is named by display number
/// when it can be matched to the current gallery.
pub fn render_stats(state: &AppState) -> String {
    if state.stats.total_votes == 0 {
        return format!("{}\n", "No votes yet. Be the first to vote!".yellow());
    }

    let mut out = String::new();
    let _ = writeln!(out, "Total votes:    {}", state.stats.total_votes);
    let _ = writeln!(out, "Total pictures: {}", state.pictures.len());

    if let Some(leader) = &state.stats.most_popular {
        let _ = writeln!(
            out,
            "Current leader: {} with {} votes",
            picture_label(state, &leader.filename).green(),
            leader.votes
        );
    }

    out
}

/// Render the top-three ranking as a table with medal labels and vote
/// shares. Empty when no votes exist.
pub fn render_top_three(state: &AppState) -> String {
    if state.stats.total_votes == 0 || state.stats.top_three.is_empty() {
        return String::new();
    }

    const MEDALS: [&str; 3] = ["Gold", "Silver", "Bronze"];

    let mut table = Table::new();
    table.add_row(row!["Rank", "Picture", "Votes", "Share"]);

    for (index, entry) in state.stats.top_three.iter().take(3).enumerate() {
        table.add_row(row![
            MEDALS[index],
            picture_label(state, &entry.filename),
            entry.votes,
            format!("{}%", vote_share(entry.votes, state.stats.total_votes))
        ]);
    }

    table.to_string()
}

/// Render the overlay for the current narrative phase, if one is
/// showing.
///
/// Returns the thank-you banner between 1 and 3 time units after a
/// successful vote and the leaderboard banner between 3 and 7; `None`
/// outside those windows (including the settling first unit, where the
/// gallery's in-flight annotation is the only feedback).
pub fn render_overlay(state: &AppState) -> Option<String> {
    if let Some(picture_id) = state.thank_you_for() {
        let label = match state.display_number(picture_id) {
            Some(n) => format!("Picture #{}", n),
            None => format!("picture {}", picture_id),
        };
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Thank you for voting!".green().bold());
        let _ = writeln!(out, "=====================");
        let _ = writeln!(out, "Your vote for {} has been recorded.", label);
        return Some(out);
    }

    if state.leaderboard_visible() {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Current Leaderboard".cyan().bold());
        let _ = writeln!(out, "===================");
        out.push_str(&render_top_three(state));
        let stats = render_stats(state);
        if !stats.is_empty() {
            out.push_str(&stats);
        }
        return Some(out);
    }

    None
}

/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes five top-level command modules:

- `watch`   — Interactive gallery watch with live refresh and voting
- `gallery` — One-shot picture list
- `stats`   — One-shot stats snapshot
- `vote`    — One-shot vote with narrative playback
- `session` — Stored-session inspection and reset

These handlers are intentionally small and use the library components:
the API client, the controller, and the view renderers.
*/

use crate::error::PicvoteError;

// Interactive watch mode
pub mod watch;

// Input command parser for watch mode
pub mod watch_commands;

// One-shot gallery listing
pub mod gallery;

// One-shot stats snapshot
pub mod stats;

// One-shot vote
pub mod vote;

// Session management
pub mod session;

/// User-facing rendering of a command failure.
///
/// Structured errors collapse to their display message at this
/// boundary; transport errors get the generic retry notice instead of
/// a connection dump.
pub(crate) fn display_error(e: &anyhow::Error) -> String {
    match e.downcast_ref::<PicvoteError>() {
        Some(picvote_err) => picvote_err.user_message(),
        None => e.to_string(),
    }
}

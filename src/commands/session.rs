//! Session management commands.
//!
//! The voting session lives in a small JSON file; these commands show
//! or delete it without touching the backend.

use colored::Colorize;

use crate::cli::SessionAction;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionStore;

/// Handle session subcommands
///
/// # Arguments
///
/// * `config` - Global configuration (for an explicit session path)
/// * `action` - `Show` or `Reset`
///
/// # Errors
///
/// Returns an error when the store path cannot be resolved, the stored
/// file is malformed (`show`), or removal fails (`reset`).
pub fn handle_session(config: &Config, action: SessionAction) -> Result<()> {
    let store = SessionStore::new(config.client.session_file.as_deref())?;

    match action {
        SessionAction::Show => match store.load()? {
            Some(record) => {
                println!("Session id: {}", record.session_id.cyan());
                println!(
                    "Created:    {}",
                    record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                println!("Stored in:  {}", store.path().display());
            }
            None => {
                println!(
                    "{}",
                    "No stored session. One is created on the next vote or watch run.".yellow()
                );
            }
        },
        SessionAction::Reset => {
            store.clear()?;
            println!("{}", "Stored session cleared.".green());
        }
    }

    Ok(())
}

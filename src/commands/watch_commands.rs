//! Input command parser for interactive watch mode
//!
//! This module parses the line commands that can be entered while
//! watching the gallery. Watch commands allow users to:
//! - Vote for a picture by its display number
//! - Force an immediate data refresh
//! - Show the current stats and top three
//! - Display help information
//! - Leave watch mode
//!
//! Commands are plain words (no prefix) and are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing watch commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType 'help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType 'help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Commands accepted from the watch-mode input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    /// Vote for a picture by its 1-based gallery display number
    Vote(usize),

    /// Refetch pictures and stats immediately, without waiting for
    /// the next poll tick
    Refresh,

    /// Show the current stats summary and top three
    Stats,

    /// Display help information
    Help,

    /// Leave watch mode
    Quit,

    /// Blank input; ignored by the loop
    Empty,
}

/// Parse a watch-mode input line into a command
///
/// Commands are case-insensitive and may have short aliases.
///
/// # Arguments
///
/// * `input` - The input line to parse
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for unrecognized input.
/// Returns `CommandError::MissingArgument` when `vote` has no number.
/// Returns `CommandError::UnsupportedArgument` when `vote` is given a
/// non-numeric or zero argument (display numbers start at 1).
///
/// # Examples
///
/// ```
/// use picvote::commands::watch_commands::{parse_watch_command, WatchCommand};
///
/// let cmd = parse_watch_command("vote 2").unwrap();
/// assert_eq!(cmd, WatchCommand::Vote(2));
///
/// let cmd = parse_watch_command("refresh").unwrap();
/// assert_eq!(cmd, WatchCommand::Refresh);
///
/// // Invalid command returns an error
/// assert!(parse_watch_command("dance").is_err());
/// ```
pub fn parse_watch_command(input: &str) -> Result<WatchCommand, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(WatchCommand::Empty);
    }

    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "refresh" | "r" => Ok(WatchCommand::Refresh),
        "stats" | "s" => Ok(WatchCommand::Stats),
        "help" | "h" | "?" => Ok(WatchCommand::Help),
        "quit" | "exit" | "q" => Ok(WatchCommand::Quit),

        "vote" | "v" => Err(CommandError::MissingArgument {
            command: "vote".to_string(),
            usage: "vote <picture number>".to_string(),
        }),
        input if input.starts_with("vote ") || input.starts_with("v ") => {
            let arg = match input.split_once(' ') {
                Some((_, rest)) => rest.trim(),
                None => "",
            };
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => Ok(WatchCommand::Vote(n)),
                _ => Err(CommandError::UnsupportedArgument {
                    command: "vote".to_string(),
                    arg: arg.to_string(),
                }),
            }
        }

        other => {
            let cmd = other.split_whitespace().next().unwrap_or(other);
            Err(CommandError::UnknownCommand(cmd.to_string()))
        }
    }
}

/// Watch-mode help text
///
/// # Examples
///
/// ```
/// use picvote::commands::watch_commands::help_text;
///
/// assert!(help_text().contains("vote <n>"));
/// ```
pub fn help_text() -> &'static str {
    r#"
Watch Mode Commands
===================

VOTING:
  vote <n>        - Vote for picture #n (the number in the gallery table)
  v <n>           - Shorthand for vote

DATA:
  refresh         - Refetch pictures and stats now
  r               - Shorthand for refresh
  stats           - Show the current stats and top three
  s               - Shorthand for stats

INFORMATION:
  help            - Show this help message
  h, ?            - Same as help

LEAVING:
  quit            - Leave watch mode
  exit, q         - Same as quit

NOTES:
  - Commands are case-insensitive
  - The gallery refreshes automatically on the configured interval
  - After a successful vote a short feedback sequence plays: the new
    counts settle in, a thank-you appears, then the leaderboard
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vote_with_number() {
        let cmd = parse_watch_command("vote 2").unwrap();
        assert_eq!(cmd, WatchCommand::Vote(2));
    }

    #[test]
    fn test_parse_vote_shorthand() {
        let cmd = parse_watch_command("v 10").unwrap();
        assert_eq!(cmd, WatchCommand::Vote(10));
    }

    #[test]
    fn test_parse_vote_without_number_returns_error() {
        let result = parse_watch_command("vote");
        assert!(result.is_err());
        if let Err(CommandError::MissingArgument { command, usage }) = result {
            assert_eq!(command, "vote");
            assert_eq!(usage, "vote <picture number>");
        } else {
            panic!("Expected MissingArgument error");
        }
    }

    #[test]
    fn test_parse_vote_non_numeric_returns_error() {
        let result = parse_watch_command("vote abc");
        assert!(result.is_err());
        if let Err(CommandError::UnsupportedArgument { command, arg }) = result {
            assert_eq!(command, "vote");
            assert_eq!(arg, "abc");
        } else {
            panic!("Expected UnsupportedArgument error");
        }
    }

    #[test]
    fn test_parse_vote_zero_returns_error() {
        // Display numbers are 1-based
        let result = parse_watch_command("vote 0");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_refresh() {
        assert_eq!(parse_watch_command("refresh").unwrap(), WatchCommand::Refresh);
        assert_eq!(parse_watch_command("r").unwrap(), WatchCommand::Refresh);
    }

    #[test]
    fn test_parse_stats() {
        assert_eq!(parse_watch_command("stats").unwrap(), WatchCommand::Stats);
        assert_eq!(parse_watch_command("s").unwrap(), WatchCommand::Stats);
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(parse_watch_command("help").unwrap(), WatchCommand::Help);
        assert_eq!(parse_watch_command("h").unwrap(), WatchCommand::Help);
        assert_eq!(parse_watch_command("?").unwrap(), WatchCommand::Help);
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_watch_command("quit").unwrap(), WatchCommand::Quit);
        assert_eq!(parse_watch_command("exit").unwrap(), WatchCommand::Quit);
        assert_eq!(parse_watch_command("q").unwrap(), WatchCommand::Quit);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse_watch_command("VOTE 3").unwrap(), WatchCommand::Vote(3));
        assert_eq!(parse_watch_command("Refresh").unwrap(), WatchCommand::Refresh);
        assert_eq!(parse_watch_command("QUIT").unwrap(), WatchCommand::Quit);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let cmd = parse_watch_command("  vote 1  ").unwrap();
        assert_eq!(cmd, WatchCommand::Vote(1));
    }

    #[test]
    fn test_parse_empty_returns_empty() {
        assert_eq!(parse_watch_command("").unwrap(), WatchCommand::Empty);
        assert_eq!(parse_watch_command("   ").unwrap(), WatchCommand::Empty);
    }

    #[test]
    fn test_parse_unknown_command_returns_error() {
        let result = parse_watch_command("dance");
        assert!(result.is_err());
        if let Err(CommandError::UnknownCommand(cmd)) = result {
            assert_eq!(cmd, "dance");
        } else {
            panic!("Expected UnknownCommand error");
        }
    }

    #[test]
    fn test_parse_unknown_command_reports_first_word() {
        let result = parse_watch_command("open the pod bay doors");
        assert!(result.is_err());
        if let Err(CommandError::UnknownCommand(cmd)) = result {
            assert_eq!(cmd, "open");
        } else {
            panic!("Expected UnknownCommand error");
        }
    }

    #[test]
    fn test_help_text_mentions_every_command() {
        let help = help_text();
        assert!(help.contains("vote <n>"));
        assert!(help.contains("refresh"));
        assert!(help.contains("stats"));
        assert!(help.contains("help"));
        assert!(help.contains("quit"));
    }
}

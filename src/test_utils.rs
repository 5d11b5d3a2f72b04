//! Test utilities for picvote
//!
//! This module provides common test fixtures: temporary directories,
//! sample gallery data, and assertion helpers.

use crate::api::{Picture, Stats};
use crate::config::Config;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Sample three-picture gallery
///
/// Ids are 1..=3 in display order with votes 5, 3, 0.
pub fn sample_pictures() -> Vec<Picture> {
    vec![
        Picture {
            id: 1,
            filename: "harley-couch.jpg".to_string(),
            votes: 5,
        },
        Picture {
            id: 2,
            filename: "harley-sunny.jpg".to_string(),
            votes: 3,
        },
        Picture {
            id: 3,
            filename: "harley-nap.jpg".to_string(),
            votes: 0,
        },
    ]
}

/// Stats snapshot consistent with `sample_pictures`
pub fn sample_stats() -> Stats {
    let pictures = sample_pictures();
    Stats {
        total_votes: 8,
        most_popular: Some(pictures[0].clone()),
        top_three: pictures,
    }
}

/// Create a test configuration with default values
pub fn test_config() -> Config {
    Config::default()
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
server:
  base_url: "http://localhost:5000"
  images_path: "/images"
  timeout_seconds: 5
client:
  poll_interval_secs: 30
"#
    .to_string()
}

/// Assert that an error's display contains the expected substring
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the
/// expected message
pub fn assert_error_contains<T>(result: crate::error::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PicvoteError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_sample_pictures_are_in_display_order() {
        let pictures = sample_pictures();
        assert_eq!(pictures.len(), 3);
        assert_eq!(pictures[0].id, 1);
        assert_eq!(pictures[2].filename, "harley-nap.jpg");
    }

    #[test]
    fn test_sample_stats_consistent_with_pictures() {
        let stats = sample_stats();
        let total: u64 = sample_pictures().iter().map(|p| p.votes).sum();
        assert_eq!(stats.total_votes, total);
        assert_eq!(stats.most_popular.unwrap().id, 1);
    }

    #[test]
    fn test_test_config() {
        let config = test_config();
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_test_config_yaml() {
        let yaml = test_config_yaml();
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.timeout_seconds, 5);
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: crate::error::Result<()> =
            Err(PicvoteError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: crate::error::Result<()> = Ok(());
        assert_error_contains(result, "error");
    }
}

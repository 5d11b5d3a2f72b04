//! Picvote - Terminal client library for the picture voting service
//!
//! This library provides the core functionality for the Picvote client,
//! including the backend API client, the application state reducer, the
//! controller driving refresh and vote feedback, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Backend REST client and payload types
//! - `controller`: Session bootstrap, polling refresh, vote lifecycle
//! - `state`: Application state and its event reducer
//! - `view`: Pure terminal renderers for gallery, stats, and overlays
//! - `session`: Persisted voting session store
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `metrics`: Vote and refresh instrumentation
//!
//! # Example
//!
//! ```no_run
//! use picvote::api::{GalleryApi, HttpGalleryApi};
//! use picvote::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = HttpGalleryApi::new(&ServerConfig::default())?;
//!     let pictures = api.pictures().await?;
//!     println!("{} pictures in the gallery", pictures.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod session;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use api::{GalleryApi, HttpGalleryApi, Picture, Stats};
pub use config::Config;
pub use controller::Controller;
pub use error::{PicvoteError, Result};
pub use state::{AppEvent, AppState, NarrativePhase};

#[cfg(test)]
pub mod test_utils;

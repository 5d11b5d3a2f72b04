//! Base types and traits for the voting backend API
//!
//! This module defines the wire types shared by all backend
//! implementations and the `GalleryApi` trait that the client
//! controller is written against.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A picture in the voting gallery
///
/// Identity (`id`, `filename`) is immutable; `votes` is owned by the
/// backend and only ever read by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Picture {
    /// Backend identifier, used for vote submission
    pub id: u64,

    /// Image filename, used to build image URLs and to match stats
    /// entries back to gallery positions
    pub filename: String,

    /// Current vote tally
    #[serde(default)]
    pub votes: u64,
}

/// Aggregate vote statistics computed by the backend
///
/// The client treats this snapshot as read-only and refetches it rather
/// than deriving any of its fields locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Total votes across all pictures
    #[serde(default)]
    pub total_votes: u64,

    /// Current leader, absent when no votes exist
    #[serde(default)]
    pub most_popular: Option<Picture>,

    /// Up to three pictures ranked by votes, descending
    #[serde(default)]
    pub top_three: Vec<Picture>,
}

/// Response body from the session endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Opaque session identifier issued by the backend
    pub session_id: String,
}

/// Request body for vote submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Session identifier the vote is cast under
    pub session_id: String,
}

/// Error body returned by the backend on rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable reason for the rejection
    #[serde(default)]
    pub error: String,
}

/// Interface to the voting backend
///
/// One method per REST endpoint. Implementations must be `Send + Sync`
/// so the controller can share them across spawned vote requests.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    /// Request a new session identifier from the backend
    async fn create_session(&self) -> Result<String>;

    /// Fetch the full picture list
    async fn pictures(&self) -> Result<Vec<Picture>>;

    /// Fetch the aggregate statistics snapshot
    async fn stats(&self) -> Result<Stats>;

    /// Submit a vote for a picture on behalf of a session
    ///
    /// A non-success response surfaces as `PicvoteError::Rejected` with
    /// the server's own message when the body carries one.
    async fn vote(&self, picture_id: u64, session_id: &str) -> Result<()>;
}

//! HTTP implementation of the voting backend API
//!
//! This module implements the `GalleryApi` trait over reqwest against a
//! live backend server. Responses are parsed into the wire types from
//! `api::base`; rejected requests preserve the server's error message.

use crate::api::base::{ApiErrorBody, GalleryApi, Picture, SessionResponse, Stats, VoteRequest};
use crate::config::ServerConfig;
use crate::error::{PicvoteError, Result};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the voting backend
///
/// # Examples
///
/// ```no_run
/// use picvote::api::{GalleryApi, HttpGalleryApi};
/// use picvote::config::ServerConfig;
///
/// # async fn example() -> picvote::error::Result<()> {
/// let api = HttpGalleryApi::new(&ServerConfig::default())?;
/// let pictures = api.pictures().await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpGalleryApi {
    client: Client,
    base_url: String,
}

impl HttpGalleryApi {
    /// Create a new backend client from server configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration containing base URL and timeout
    ///
    /// # Returns
    ///
    /// Returns a new HttpGalleryApi instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("picvote/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PicvoteError::Api(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("Initialized backend client: base_url={}", config.base());

        Ok(Self {
            client,
            base_url: config.base().to_string(),
        })
    }

    /// Base URL this client was configured with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a non-success response into a `Rejected` error
    ///
    /// Preserves the server's `{"error": ...}` message when the body
    /// carries one, otherwise uses the given fallback.
    async fn rejection(response: reqwest::Response, fallback: &str) -> PicvoteError {
        let status = response.status().as_u16();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if !body.error.is_empty() => body.error,
            _ => fallback.to_string(),
        };
        PicvoteError::Rejected { status, message }
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryApi {
    async fn create_session(&self) -> Result<String> {
        let url = self.endpoint("/api/session");
        tracing::debug!("Requesting session: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Session request failed: {}", e);
            PicvoteError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::rejection(response, "Failed to initialize session").await;
            tracing::error!("Session request rejected: {}", err);
            return Err(err.into());
        }

        let body: SessionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse session response: {}", e);
            PicvoteError::Api(format!("Failed to parse session response: {}", e))
        })?;

        if body.session_id.is_empty() {
            return Err(PicvoteError::Api("Empty session id in response".to_string()).into());
        }

        Ok(body.session_id)
    }

    async fn pictures(&self) -> Result<Vec<Picture>> {
        let url = self.endpoint("/api/pictures");
        tracing::debug!("Fetching pictures: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Pictures request failed: {}", e);
            PicvoteError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::rejection(response, "Failed to fetch pictures").await;
            tracing::error!("Pictures request rejected: {}", err);
            return Err(err.into());
        }

        let pictures: Vec<Picture> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse pictures response: {}", e);
            PicvoteError::Api(format!("Failed to parse pictures response: {}", e))
        })?;

        tracing::debug!("Fetched {} pictures", pictures.len());
        Ok(pictures)
    }

    async fn stats(&self) -> Result<Stats> {
        let url = self.endpoint("/api/stats");
        tracing::debug!("Fetching stats: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Stats request failed: {}", e);
            PicvoteError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::rejection(response, "Failed to fetch stats").await;
            tracing::error!("Stats request rejected: {}", err);
            return Err(err.into());
        }

        let stats: Stats = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse stats response: {}", e);
            PicvoteError::Api(format!("Failed to parse stats response: {}", e))
        })?;

        Ok(stats)
    }

    async fn vote(&self, picture_id: u64, session_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("/api/vote/{}", picture_id));
        tracing::debug!("Submitting vote: {}", url);

        let request = VoteRequest {
            session_id: session_id.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Vote request failed: {}", e);
                PicvoteError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::rejection(response, "Failed to record vote").await;
            tracing::warn!("Vote rejected for picture {}: {}", picture_id, err);
            return Err(err.into());
        }

        // Success bodies are advisory; the caller refetches authoritative
        // tallies rather than trusting any count echoed back here.
        tracing::debug!("Vote recorded for picture {}", picture_id);
        Ok(())
    }
}

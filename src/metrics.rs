//! Performance metrics for vote submission and polling
//!
//! This module provides metrics collection for the client's network
//! activity: vote submissions with completion status, refresh cycles by
//! endpoint and outcome, and session creations.
//!
//! # Metrics
//!
//! - `votes_submitted_total`: Counter of vote requests issued
//! - `vote_duration_seconds`: Histogram of vote round-trip duration
//! - `vote_completions_total`: Counter of completions by status
//! - `vote_errors_total`: Counter of errors by type
//! - `votes_in_flight`: Gauge of currently in-flight vote requests
//! - `refreshes_total`: Counter of refresh fetches by endpoint and outcome
//! - `sessions_created_total`: Counter of backend sessions created
//!
//! # Examples
//!
//! ```
//! use picvote::metrics::VoteMetrics;
//!
//! let metrics = VoteMetrics::new(3);
//! metrics.record_completion("success");
//! ```

use metrics::{decrement_gauge, histogram, increment_counter, increment_gauge};
use std::cell::Cell;
use std::time::Instant;

/// Metrics collection for a single vote submission
///
/// Tracks one vote request from issue to completion. Uses interior
/// mutability (Cell) to allow recording through immutable references,
/// making it easy to use in async contexts.
///
/// # Thread Safety
///
/// `VoteMetrics` is not Sync due to the Cell. It is designed to be
/// created and used within a single task scope, which is the typical
/// usage pattern.
#[derive(Debug)]
pub struct VoteMetrics {
    /// Backend id of the picture being voted for
    picture_id: u64,

    /// When the request was issued
    start: Instant,

    /// Whether metrics have been recorded to prevent double-recording
    recorded: Cell<bool>,
}

impl VoteMetrics {
    /// Creates a new metrics tracker for a vote submission
    ///
    /// Increments the in-flight gauge and the submission counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use picvote::metrics::VoteMetrics;
    ///
    /// let metrics = VoteMetrics::new(7);
    /// assert_eq!(metrics.picture_id(), 7);
    /// ```
    pub fn new(picture_id: u64) -> Self {
        increment_counter!("votes_submitted_total", "picture" => picture_id.to_string());
        increment_gauge!("votes_in_flight", 1.0);

        Self {
            picture_id,
            start: Instant::now(),
            recorded: Cell::new(false),
        }
    }

    /// Records completion of the vote request
    ///
    /// # Arguments
    ///
    /// * `status` - Completion status ("success", "rejected", etc)
    ///
    /// # Examples
    ///
    /// ```
    /// use picvote::metrics::VoteMetrics;
    ///
    /// let metrics = VoteMetrics::new(1);
    /// metrics.record_completion("success");
    /// ```
    pub fn record_completion(&self, status: &str) {
        if self.recorded.get() {
            return;
        }
        self.recorded.set(true);

        let duration = self.start.elapsed();

        histogram!(
            "vote_duration_seconds",
            duration.as_secs_f64(),
            "status" => status.to_string()
        );

        increment_counter!(
            "vote_completions_total",
            "status" => status.to_string()
        );

        decrement_gauge!("votes_in_flight", 1.0);
    }

    /// Records an error during vote submission
    ///
    /// # Arguments
    ///
    /// * `error_type` - Description of the error type (e.g., "transport",
    ///   "no_session")
    ///
    /// # Examples
    ///
    /// ```
    /// use picvote::metrics::VoteMetrics;
    ///
    /// let metrics = VoteMetrics::new(1);
    /// metrics.record_error("transport");
    /// ```
    pub fn record_error(&self, error_type: &str) {
        if self.recorded.get() {
            return;
        }
        self.recorded.set(true);

        increment_counter!(
            "vote_errors_total",
            "error_type" => error_type.to_string()
        );

        decrement_gauge!("votes_in_flight", 1.0);
    }

    /// Returns the picture id this tracker was created for
    pub fn picture_id(&self) -> u64 {
        self.picture_id
    }

    /// Returns elapsed time since the request was issued
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for VoteMetrics {
    /// Ensures cleanup on drop
    ///
    /// If metrics were not explicitly recorded (via `record_completion`
    /// or `record_error`), the in-flight gauge is still decremented so
    /// abandoned requests do not leak gauge values.
    fn drop(&mut self) {
        if !self.recorded.get() {
            decrement_gauge!("votes_in_flight", 1.0);
        }
    }
}

/// Records the outcome of one refresh fetch
///
/// # Arguments
///
/// * `endpoint` - Which endpoint was fetched ("pictures" or "stats")
/// * `outcome` - "success" or "failure"
pub fn record_refresh(endpoint: &str, outcome: &str) {
    increment_counter!(
        "refreshes_total",
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome.to_string()
    );
}

/// Records creation of a new backend session
pub fn record_session_created() {
    increment_counter!("sessions_created_total");
}

/// Initializes the metrics exporter for Prometheus
///
/// When the `prometheus` feature is enabled, this function sets up the
/// Prometheus metrics exporter on the standard endpoint. When disabled,
/// it's a no-op.
///
/// # Examples
///
/// ```
/// use picvote::metrics::init_metrics_exporter;
///
/// // Initialize metrics (only does something with prometheus feature)
/// init_metrics_exporter();
/// ```
pub fn init_metrics_exporter() {
    #[cfg(feature = "prometheus")]
    {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let _ = builder.install().map_err(|e| {
            tracing::warn!("Failed to install Prometheus exporter: {}", e);
        });
    }
}

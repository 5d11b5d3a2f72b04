//! Client controller with session bootstrap, polling refresh, and the
//! timed vote narrative
//!
//! This module implements the orchestration layer of the client:
//! - Resolves the voting session (stored or freshly created)
//! - Refreshes pictures and stats, wholesale-replacing local copies
//! - Submits votes and drives the post-vote feedback sequence
//!
//! The controller owns the `AppState` and applies every change through
//! its reducer. It also owns the single pending narrative deadline, so
//! dropping the controller cancels all timed behavior in one place.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::api::GalleryApi;
use crate::error::{PicvoteError, Result};
use crate::metrics::VoteMetrics;
use crate::session::{SessionRecord, SessionStore};
use crate::state::{AppEvent, AppState};

/// Notice shown when a vote is attempted before a session exists.
pub const NO_SESSION_NOTICE: &str = "Session not initialized. Please restart the client.";

/// Completion of one vote request, fed back into the controller.
#[derive(Debug)]
pub struct VoteOutcome {
    /// Backend id of the picture the vote was for.
    pub picture_id: u64,
    /// What the backend said.
    pub result: Result<()>,
}

/// The client controller.
///
/// Owns the application state, the session store, and the backend
/// handle. Vote requests are returned as detached futures so a caller's
/// event loop can run several (for different pictures) concurrently and
/// feed completions back through [`Controller::complete_vote`].
///
/// # Examples
///
/// ```no_run
/// use picvote::api::HttpGalleryApi;
/// use picvote::config::ServerConfig;
/// use picvote::controller::Controller;
/// use picvote::session::SessionStore;
///
/// # async fn example() -> picvote::error::Result<()> {
/// let api = HttpGalleryApi::new(&ServerConfig::default())?;
/// let store = SessionStore::new(None)?;
/// let mut controller = Controller::new(api, store);
/// controller.bootstrap().await;
/// # Ok(())
/// # }
/// ```
pub struct Controller {
    api: Arc<dyn GalleryApi>,
    store: SessionStore,
    state: AppState,
    narrative_deadline: Option<tokio::time::Instant>,
    vote_metrics: HashMap<u64, VoteMetrics>,
}

impl Controller {
    /// Creates a new controller.
    ///
    /// # Arguments
    ///
    /// * `api` - Backend implementation to use
    /// * `store` - Session persistence
    pub fn new(api: impl GalleryApi + 'static, store: SessionStore) -> Self {
        Self {
            api: Arc::new(api),
            store,
            state: AppState::new(),
            narrative_deadline: None,
            vote_metrics: HashMap::new(),
        }
    }

    /// Creates a new controller with a boxed backend.
    ///
    /// Useful when the backend type is not known at compile time.
    pub fn new_boxed(api: Box<dyn GalleryApi>, store: SessionStore) -> Self {
        Self {
            api: Arc::from(api),
            store,
            state: AppState::new(),
            narrative_deadline: None,
            vote_metrics: HashMap::new(),
        }
    }

    /// Current application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Resolve the voting session, creating one only when needed.
    ///
    /// A stored session is reused as-is; the client never expires one.
    /// When the store is unreadable a fresh session is requested and the
    /// store rewritten. A failed persist keeps the in-memory id, so
    /// voting still works for the rest of the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns error when no session exists and the backend request for
    /// a new one fails. The session is left unset in that case.
    pub async fn resolve_session(&mut self) -> Result<()> {
        if self.state.session_id.is_some() {
            return Ok(());
        }

        match self.store.load() {
            Ok(Some(record)) => {
                debug!("Reusing stored session from {}", record.created_at);
                self.state.apply(AppEvent::SessionResolved {
                    session_id: record.session_id,
                });
                return Ok(());
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Session store unreadable, requesting a new session: {}", e);
            }
        }

        let session_id = self.api.create_session().await?;
        crate::metrics::record_session_created();
        info!("Created new voting session");

        if let Err(e) = self.store.save(&SessionRecord::new(session_id.clone())) {
            error!("Failed to persist session: {}", e);
        }

        self.state.apply(AppEvent::SessionResolved { session_id });
        Ok(())
    }

    /// Fetch pictures and stats, wholesale-replacing the local copies.
    ///
    /// The two endpoints fail independently: a pictures failure still
    /// attempts stats, and a failed fetch leaves the previous snapshot
    /// in place. There is no retry; the next cycle is the only recovery.
    pub async fn refresh(&mut self) {
        match self.api.pictures().await {
            Ok(pictures) => {
                crate::metrics::record_refresh("pictures", "success");
                self.state.apply(AppEvent::PicturesReplaced { pictures });
            }
            Err(e) => {
                crate::metrics::record_refresh("pictures", "failure");
                error!("Failed to fetch pictures: {}", e);
            }
        }

        match self.api.stats().await {
            Ok(stats) => {
                crate::metrics::record_refresh("stats", "success");
                self.state.apply(AppEvent::StatsReplaced { stats });
            }
            Err(e) => {
                crate::metrics::record_refresh("stats", "failure");
                error!("Failed to fetch stats: {}", e);
            }
        }
    }

    /// Startup sequence: resolve the session, load the first snapshot,
    /// clear the loading flag.
    ///
    /// Session failure is not fatal here — the gallery still loads and
    /// voting surfaces its own notice — so this never errors.
    pub async fn bootstrap(&mut self) {
        if let Err(e) = self.resolve_session().await {
            error!("Session bootstrap failed: {}", e);
        }
        self.refresh().await;
        self.state.apply(AppEvent::BootstrapFinished);
    }

    /// Begin a vote for a picture.
    ///
    /// Preconditions are checked synchronously: without a resolved
    /// session, or with a vote already in flight for this picture, the
    /// call errors and no network request is made. On success the
    /// picture's in-flight marker is set and a detached future for the
    /// backend call is returned; the caller awaits it (alone or in a
    /// `FuturesUnordered` alongside others) and feeds the outcome to
    /// [`Controller::complete_vote`].
    pub fn begin_vote(&mut self, picture_id: u64) -> Result<BoxFuture<'static, VoteOutcome>> {
        let session_id = match &self.state.session_id {
            Some(id) => id.clone(),
            None => {
                warn!("Vote attempted without a session");
                return Err(PicvoteError::Session(NO_SESSION_NOTICE.to_string()).into());
            }
        };

        if self.state.is_voting(picture_id) {
            return Err(PicvoteError::Vote(format!(
                "A vote for picture {} is already in flight",
                picture_id
            ))
            .into());
        }

        self.vote_metrics
            .insert(picture_id, VoteMetrics::new(picture_id));
        self.state.apply(AppEvent::VoteStarted { picture_id });

        let api = Arc::clone(&self.api);
        Ok(async move {
            let result = api.vote(picture_id, &session_id).await;
            VoteOutcome { picture_id, result }
        }
        .boxed())
    }

    /// Feed a vote completion back into the controller.
    ///
    /// On acceptance the gallery and stats are refetched immediately
    /// (not waiting for the next poll tick) and the narrative sequence
    /// starts for the voted picture. On failure the in-flight marker
    /// clears at once, no overlay ever appears, and the error is
    /// returned for display.
    pub async fn complete_vote(&mut self, outcome: VoteOutcome) -> Result<()> {
        match outcome.result {
            Ok(()) => {
                if let Some(m) = self.vote_metrics.remove(&outcome.picture_id) {
                    m.record_completion("success");
                }
                info!("Vote recorded for picture {}", outcome.picture_id);

                self.refresh().await;
                self.state.apply(AppEvent::VoteSucceeded {
                    picture_id: outcome.picture_id,
                });
                self.arm_narrative();
                Ok(())
            }
            Err(e) => {
                if let Some(m) = self.vote_metrics.remove(&outcome.picture_id) {
                    m.record_error(error_kind(&e));
                }
                warn!("Vote failed for picture {}: {}", outcome.picture_id, e);
                self.state.apply(AppEvent::VoteFailed {
                    picture_id: outcome.picture_id,
                });
                Err(e)
            }
        }
    }

    /// Deadline of the pending narrative step, when one is armed.
    ///
    /// The caller's event loop sleeps until this instant and then calls
    /// [`Controller::advance_narrative`]. There is at most one deadline:
    /// a newer vote replaces it rather than adding another.
    pub fn narrative_deadline(&self) -> Option<tokio::time::Instant> {
        self.narrative_deadline
    }

    /// Advance the narrative one phase and re-arm the deadline.
    pub fn advance_narrative(&mut self) {
        self.state.apply(AppEvent::NarrativeAdvanced);
        self.arm_narrative();
    }

    fn arm_narrative(&mut self) {
        self.narrative_deadline = self
            .state
            .narrative
            .as_ref()
            .map(|n| tokio::time::Instant::now() + n.phase.dwell());
    }
}

/// Metric label for a failed vote.
fn error_kind(e: &anyhow::Error) -> &'static str {
    match e.downcast_ref::<PicvoteError>() {
        Some(PicvoteError::Rejected { .. }) => "rejected",
        Some(PicvoteError::Http(_)) => "transport",
        Some(PicvoteError::Api(_)) => "malformed",
        _ => "other",
    }
}

//! Application state for picvote
//!
//! All mutable view state lives in one `AppState` struct, and every
//! update is expressed as an explicit event applied by a single
//! transition function. The reducer performs no I/O and takes no clock,
//! which makes vote flows deterministically replayable in tests; timing
//! lives in the controller's single pending deadline.

use std::collections::HashSet;
use std::time::Duration;

use crate::api::{Picture, Stats};

// ---------------------------------------------------------------------------
// Narrative phases
// ---------------------------------------------------------------------------

/// Phase of the post-vote feedback sequence.
///
/// After the backend accepts a vote the client walks through a fixed,
/// non-configurable script: one time unit of settling while the vote
/// spinner is still showing, two time units of thank-you overlay, four
/// time units of leaderboard overlay, then back to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativePhase {
    /// Vote accepted; the in-flight marker is still showing.
    Settling,
    /// Thank-you overlay visible.
    ThankYou,
    /// Leaderboard overlay visible.
    Leaderboard,
}

impl NarrativePhase {
    /// How long the narrative dwells in this phase before advancing.
    pub fn dwell(self) -> Duration {
        match self {
            NarrativePhase::Settling => Duration::from_secs(1),
            NarrativePhase::ThankYou => Duration::from_secs(2),
            NarrativePhase::Leaderboard => Duration::from_secs(4),
        }
    }

    /// The phase that follows this one, or `None` when the sequence ends.
    pub fn next(self) -> Option<NarrativePhase> {
        match self {
            NarrativePhase::Settling => Some(NarrativePhase::ThankYou),
            NarrativePhase::ThankYou => Some(NarrativePhase::Leaderboard),
            NarrativePhase::Leaderboard => None,
        }
    }
}

/// The single-slot record of the most recent successful vote's feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteNarrative {
    /// Backend id of the picture the narrative describes.
    pub picture_id: u64,
    /// Current phase of the sequence.
    pub phase: NarrativePhase,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A state transition input.
///
/// Everything that can change the view state — network results, vote
/// lifecycle steps, the narrative timer firing — arrives as one of
/// these.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A session identifier became available.
    SessionResolved { session_id: String },
    /// A fresh picture list replaced the local copy.
    PicturesReplaced { pictures: Vec<Picture> },
    /// A fresh stats snapshot replaced the local copy.
    StatsReplaced { stats: Stats },
    /// The initial bootstrap finished (successfully or not).
    BootstrapFinished,
    /// A vote request was issued for a picture.
    VoteStarted { picture_id: u64 },
    /// The backend accepted a vote.
    VoteSucceeded { picture_id: u64 },
    /// A vote failed or was rejected; no narrative plays.
    VoteFailed { picture_id: u64 },
    /// The pending narrative deadline fired.
    NarrativeAdvanced,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete client-side view state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Resolved session identifier, `None` until bootstrap provides one.
    pub session_id: Option<String>,
    /// Current gallery, wholesale-replaced on each refresh.
    pub pictures: Vec<Picture>,
    /// Latest stats snapshot.
    pub stats: Stats,
    /// Ids of pictures with a vote request in flight.
    pub voting: HashSet<u64>,
    /// True until the initial bootstrap completes.
    pub loading: bool,
    /// Feedback sequence for the most recent successful vote.
    pub narrative: Option<VoteNarrative>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session_id: None,
            pictures: Vec::new(),
            stats: Stats::default(),
            voting: HashSet::new(),
            loading: true,
            narrative: None,
        }
    }

    /// Apply one event to the state.
    ///
    /// This is the only mutation path. A successful vote replaces any
    /// in-flight narrative (feedback always describes the most recent
    /// vote); the replaced sequence's remaining steps never fire, so the
    /// in-flight marker it would have cleared is cleared here instead.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::SessionResolved { session_id } => {
                self.session_id = Some(session_id);
            }
            AppEvent::PicturesReplaced { pictures } => {
                self.pictures = pictures;
            }
            AppEvent::StatsReplaced { stats } => {
                self.stats = stats;
            }
            AppEvent::BootstrapFinished => {
                self.loading = false;
            }
            AppEvent::VoteStarted { picture_id } => {
                self.voting.insert(picture_id);
            }
            AppEvent::VoteSucceeded { picture_id } => {
                if let Some(replaced) = self.narrative.take() {
                    self.voting.remove(&replaced.picture_id);
                }
                self.narrative = Some(VoteNarrative {
                    picture_id,
                    phase: NarrativePhase::Settling,
                });
            }
            AppEvent::VoteFailed { picture_id } => {
                self.voting.remove(&picture_id);
            }
            AppEvent::NarrativeAdvanced => {
                if let Some(narrative) = self.narrative.take() {
                    if narrative.phase == NarrativePhase::Settling {
                        self.voting.remove(&narrative.picture_id);
                    }
                    self.narrative = narrative.phase.next().map(|phase| VoteNarrative {
                        picture_id: narrative.picture_id,
                        phase,
                    });
                }
            }
        }
    }

    /// Whether a vote request is in flight for the picture.
    pub fn is_voting(&self, picture_id: u64) -> bool {
        self.voting.contains(&picture_id)
    }

    /// The picture the thank-you overlay describes, when visible.
    pub fn thank_you_for(&self) -> Option<u64> {
        match &self.narrative {
            Some(n) if n.phase == NarrativePhase::ThankYou => Some(n.picture_id),
            _ => None,
        }
    }

    /// Whether the leaderboard overlay is visible.
    pub fn leaderboard_visible(&self) -> bool {
        matches!(
            &self.narrative,
            Some(n) if n.phase == NarrativePhase::Leaderboard
        )
    }

    /// Look up a picture by backend id.
    pub fn picture(&self, picture_id: u64) -> Option<&Picture> {
        self.pictures.iter().find(|p| p.id == picture_id)
    }

    /// Backend id of the picture at a 1-based display number.
    pub fn picture_id_at(&self, display_number: usize) -> Option<u64> {
        if display_number == 0 {
            return None;
        }
        self.pictures.get(display_number - 1).map(|p| p.id)
    }

    /// 1-based display number for a picture id.
    ///
    /// Pictures are presented by their position in the current gallery
    /// ordering, not by backend id.
    pub fn display_number(&self, picture_id: u64) -> Option<usize> {
        self.pictures
            .iter()
            .position(|p| p.id == picture_id)
            .map(|i| i + 1)
    }

    /// 1-based display number for a filename.
    ///
    /// Stats entries are picture-like but carry no guarantee of sharing
    /// ids with the gallery, so the leaderboard matches them back to
    /// gallery positions by filename.
    pub fn display_number_by_filename(&self, filename: &str) -> Option<usize> {
        self.pictures
            .iter()
            .position(|p| p.filename == filename)
            .map(|i| i + 1)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

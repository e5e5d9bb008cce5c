//! Per-candidate accept/reject predicate
//!
//! The retrieval engine calls the predicate once per discovered candidate,
//! possibly from several discovery workers at once, so it only reads the
//! immutable state captured at construction time.

use crate::utils::dates::DateStamp;
use serde::{Deserialize, Serialize};

/// Live-broadcast status tags reported by the retrieval engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveStatus {
    /// Plain upload, fully archived.
    NotLive,
    /// Ended live broadcast whose archive is available.
    WasLive,
    /// Broadcast currently on air.
    IsLive,
    /// Scheduled, not started yet.
    IsUpcoming,
}

impl LiveStatus {
    /// Whether the broadcast is complete and safe to fetch.
    pub fn is_completed_broadcast(self) -> bool {
        matches!(self, LiveStatus::NotLive | LiveStatus::WasLive)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LiveStatus::NotLive => "not_live",
            LiveStatus::WasLive => "was_live",
            LiveStatus::IsLive => "is_live",
            LiveStatus::IsUpcoming => "is_upcoming",
        }
    }
}

/// The slice of candidate metadata the filter consults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Publication date in the fixed-width `YYYYMMDD` form, when known.
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub live_status: Option<LiveStatus>,
}

/// Accept/reject predicate over [`Candidate`]s.
///
/// Built once per run and handed to the retrieval engine; `check` returns
/// `None` to accept or a human-readable skip reason to reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateFilter {
    not_before: Option<DateStamp>,
    completed_broadcasts_only: bool,
}

impl CandidateFilter {
    pub fn new(not_before: Option<DateStamp>, completed_broadcasts_only: bool) -> Self {
        Self {
            not_before,
            completed_broadcasts_only,
        }
    }

    /// Evaluate one candidate. First matching rule decides:
    /// live-status restriction, then the publication-date boundary.
    ///
    /// A candidate with no status tag passes the live check: the engine
    /// omits the tag entirely for plain uploads.
    pub fn check(&self, candidate: &Candidate) -> Option<String> {
        if self.completed_broadcasts_only {
            if let Some(status) = candidate.live_status {
                if !status.is_completed_broadcast() {
                    return Some(format!(
                        "SKIP: not a completed broadcast (live_status={})",
                        status.as_str()
                    ));
                }
            }
        }

        if let Some(boundary) = &self.not_before {
            if let Some(upload_date) = &candidate.upload_date {
                // Fixed-width zero-padded dates, so string order is date order.
                if upload_date.as_str() < boundary.as_str() {
                    return Some(format!(
                        "SKIP: too old (upload_date={} < {})",
                        upload_date, boundary
                    ));
                }
            }
        }

        None
    }

    /// The same predicate as an owned closure, for engines that take a
    /// plain function value.
    pub fn into_fn(self) -> impl Fn(&Candidate) -> Option<String> + Send + Sync {
        move |candidate| self.check(candidate)
    }
}

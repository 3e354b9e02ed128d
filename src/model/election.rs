use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::ElectionId;

/// A time interval used to gate operations, with both endpoints inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Well-formed iff the window opens before it closes. Validated once at
    /// election creation, never revalidated later.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Phases of the election lifecycle, derived from the current time against
/// the stored windows. Never stored; closure is purely a consequence of time
/// passing the voting window's end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionPhase {
    /// Before the whitelist window opens.
    PreWhitelist,
    /// Registration is open.
    Whitelisting,
    /// Between the whitelist and voting windows.
    Interim,
    /// Voting is open.
    Voting,
    /// The voting window has passed.
    Closed,
}

/// Core election record, owned by the platform registry and mutated only
/// through its operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    /// Unique monotonic id, assigned at creation and never reused.
    pub id: ElectionId,
    /// Display name.
    pub name: String,
    /// When self-registration is permitted.
    pub whitelist_window: TimeWindow,
    /// When voting is permitted.
    pub voting_window: TimeWindow,
    /// Set at creation. Only candidate addition reads it; no operation
    /// currently clears it.
    pub active: bool,
    /// Number of candidates added so far; candidate ids are 1..=count.
    pub candidate_count: u32,
    /// Number of successful whitelist registrations.
    pub voter_count: u64,
}

impl Election {
    /// Derive the lifecycle phase at `now`. Endpoints are inclusive; where
    /// back-to-back windows make both registration and voting possible at the
    /// shared instant, the voting phase wins.
    pub fn phase(&self, now: DateTime<Utc>) -> ElectionPhase {
        if now > self.voting_window.end {
            ElectionPhase::Closed
        } else if self.voting_window.contains(now) {
            ElectionPhase::Voting
        } else if self.whitelist_window.contains(now) {
            ElectionPhase::Whitelisting
        } else if now < self.whitelist_window.start {
            ElectionPhase::PreWhitelist
        } else {
            ElectionPhase::Interim
        }
    }
}

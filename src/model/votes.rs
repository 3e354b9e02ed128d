use std::collections::HashSet;

use crate::model::common::{Address, ElectionId};

/// Per-(election, address) has-voted flags, enforcing single-vote semantics.
///
/// Idempotency guard only: callers check `has_voted` before recording. The
/// flag is set exactly once and never cleared.
#[derive(Debug, Default)]
pub struct VoteLedger {
    voted: HashSet<(ElectionId, Address)>,
}

impl VoteLedger {
    pub fn has_voted(&self, election_id: ElectionId, address: &str) -> bool {
        self.voted.contains(&(election_id, address.to_string()))
    }

    pub fn record(&mut self, election_id: ElectionId, address: Address) {
        self.voted.insert((election_id, address));
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::common::{CandidateId, ElectionId};

/// A candidate standing in one election.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Sequential per-election id, starting at 1.
    pub id: CandidateId,
    /// Display name.
    pub name: String,
    /// Reference to the candidate's image, opaque to the platform.
    pub image_url: String,
    /// Number of votes cast for this candidate so far.
    pub vote_count: u64,
}

/// Per-election ordered candidate lists with vote tallies, keyed by
/// (election, candidate).
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    candidates: HashMap<(ElectionId, CandidateId), Candidate>,
}

impl CandidateRegistry {
    /// Store a new candidate under the id the registry owner allocated.
    pub fn add(
        &mut self,
        election_id: ElectionId,
        candidate_id: CandidateId,
        name: String,
        image_url: String,
    ) -> Candidate {
        let candidate = Candidate {
            id: candidate_id,
            name,
            image_url,
            vote_count: 0,
        };
        self.candidates
            .insert((election_id, candidate_id), candidate.clone());
        candidate
    }

    pub fn contains(&self, election_id: ElectionId, candidate_id: CandidateId) -> bool {
        self.candidates.contains_key(&(election_id, candidate_id))
    }

    /// The stored record, or a zero-valued one if absent. Reads have
    /// sparse-map semantics: a missing key is a default record, not an error.
    pub fn get(&self, election_id: ElectionId, candidate_id: CandidateId) -> Candidate {
        self.candidates
            .get(&(election_id, candidate_id))
            .cloned()
            .unwrap_or_default()
    }

    /// Increment the tally for a candidate already checked to exist.
    pub fn tally(&mut self, election_id: ElectionId, candidate_id: CandidateId) {
        if let Some(candidate) = self.candidates.get_mut(&(election_id, candidate_id)) {
            candidate.vote_count += 1;
        }
    }

    /// All candidates of an election in ascending id order, ids 1..=count.
    /// A fresh snapshot, not a live view.
    pub fn list(&self, election_id: ElectionId, count: CandidateId) -> Vec<Candidate> {
        (1..=count).map(|id| self.get(election_id, id)).collect()
    }
}

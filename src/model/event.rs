use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::common::{Address, CandidateId, ElectionId};

/// Notifications emitted by committed operations.
///
/// Delivery to external listeners is someone else's job; the platform
/// appends each one to an inspectable log and writes it to the structured
/// log at emit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ElectionCreatorAdded {
        address: Address,
    },
    ElectionCreatorRemoved {
        address: Address,
    },
    DepositMade {
        election_id: ElectionId,
        amount: u64,
        fee: u64,
    },
    ElectionCreated {
        election_id: ElectionId,
        name: String,
    },
    CandidateAdded {
        election_id: ElectionId,
        candidate_id: CandidateId,
        name: String,
        image_url: String,
    },
    Whitelisted {
        election_id: ElectionId,
        address: Address,
    },
    VoteCasted {
        election_id: ElectionId,
        address: Address,
        candidate_id: CandidateId,
    },
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElectionCreatorAdded { address } => {
                write!(f, "creator approved: {address}")
            }
            Self::ElectionCreatorRemoved { address } => {
                write!(f, "creator removed: {address}")
            }
            Self::DepositMade {
                election_id,
                amount,
                fee,
            } => write!(
                f,
                "deposit of {amount} (fee {fee}) into election {election_id}"
            ),
            Self::ElectionCreated { election_id, name } => {
                write!(f, "election {election_id} created: {name}")
            }
            Self::CandidateAdded {
                election_id,
                candidate_id,
                name,
                ..
            } => write!(
                f,
                "candidate {candidate_id} ({name}) added to election {election_id}"
            ),
            Self::Whitelisted {
                election_id,
                address,
            } => write!(f, "{address} whitelisted for election {election_id}"),
            Self::VoteCasted {
                election_id,
                address,
                candidate_id,
            } => write!(
                f,
                "{address} voted for candidate {candidate_id} in election {election_id}"
            ),
        }
    }
}

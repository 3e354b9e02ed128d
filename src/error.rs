use log::warn;
use rocket::{http::Status, response::Responder};
use thiserror::Error;

use crate::model::common::{Address, CandidateId, ElectionId, RegistrationNumber};

pub type Result<T> = std::result::Result<T, Error>;

/// Every way an operation can be rejected. A rejection aborts the whole
/// operation with no state change; retry is the caller's responsibility.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),
    #[error("Election {0}: {1}")]
    InvalidPhase(ElectionId, String),
    #[error("Address {1} is not whitelisted for election {0}")]
    NotWhitelisted(ElectionId, Address),
    #[error("Address {1} is already whitelisted for election {0}")]
    AlreadyWhitelisted(ElectionId, Address),
    #[error("Registration number {1} is already bound for election {0}")]
    RegistrationNumberTaken(ElectionId, RegistrationNumber),
    #[error("Address {1} has already voted in election {0}")]
    AlreadyVoted(ElectionId, Address),
    #[error("No candidate {1} in election {0}")]
    InvalidCandidate(ElectionId, CandidateId),
    #[error("Insufficient execution reserve for election {0}: balance {1}")]
    InsufficientReserve(ElectionId, u64),
    #[error("Invalid deposit amount: {0}")]
    InvalidAmount(u64),
    #[error("Election {0} not found")]
    ElectionNotFound(ElectionId),
    #[error("Address {0} is already an approved election creator")]
    AlreadyCreator(Address),
    #[error("Address {0} is not an approved election creator")]
    UnknownCreator(Address),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        warn!("Rejected: {self}");
        Err(match self {
            Self::Unauthorized(_) | Self::NotWhitelisted(_, _) => Status::Unauthorized,
            Self::ElectionNotFound(_) | Self::UnknownCreator(_) => Status::NotFound,
            Self::AlreadyWhitelisted(_, _)
            | Self::RegistrationNumberTaken(_, _)
            | Self::AlreadyVoted(_, _)
            | Self::AlreadyCreator(_) => Status::Conflict,
            Self::InvalidTimeWindow(_) | Self::InvalidAmount(_) | Self::InvalidCandidate(_, _) => {
                Status::UnprocessableEntity
            }
            Self::InvalidPhase(_, _) => Status::BadRequest,
            Self::InsufficientReserve(_, _) => Status::PaymentRequired,
        })
    }
}

/// Callers are identified by their ledger address, carried verbatim.
pub type Address = String;
/// Our election IDs are integers, allocated sequentially from 1.
pub type ElectionId = u32;
/// Our candidate IDs are integers, sequential per election from 1.
pub type CandidateId = u32;
/// An external identifier issued off-platform, bound at most once per election.
pub type RegistrationNumber = u64;

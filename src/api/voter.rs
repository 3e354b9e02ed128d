use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    auth::Caller,
    common::{CandidateId, ElectionId, RegistrationNumber},
    platform::Platform,
};

pub fn routes() -> Vec<Route> {
    routes![whitelist, cast_vote]
}

/// Self-register for an election during its whitelist window.
#[post("/elections/<election_id>/whitelist", data = "<request>", format = "json")]
async fn whitelist(
    caller: Caller,
    election_id: ElectionId,
    request: Json<WhitelistRequest>,
    platform: &State<Platform>,
) -> Result<()> {
    platform.whitelist(&caller.0, election_id, request.0.registration_number)
}

/// Cast a vote during the voting window.
#[post("/elections/<election_id>/votes", data = "<spec>", format = "json")]
async fn cast_vote(
    caller: Caller,
    election_id: ElectionId,
    spec: Json<VoteSpec>,
    platform: &State<Platform>,
) -> Result<()> {
    platform.vote(&caller.0, election_id, spec.0.candidate_id)
}

#[derive(Debug, Serialize, Deserialize)]
struct WhitelistRequest {
    registration_number: RegistrationNumber,
}

#[derive(Debug, Serialize, Deserialize)]
struct VoteSpec {
    candidate_id: CandidateId,
}

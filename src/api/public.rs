use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::model::{
    candidate::Candidate,
    common::{Address, CandidateId, ElectionId, RegistrationNumber},
    election::{Election, ElectionPhase, TimeWindow},
    event::Event,
    platform::Platform,
};

pub fn routes() -> Vec<Route> {
    routes![
        get_elections,
        get_election,
        get_candidates,
        get_candidate,
        get_registration,
        get_voter_count,
        get_reserve,
        get_events,
    ]
}

/// Public view of an election: the stored record plus its derived phase and
/// remaining execution reserve.
#[derive(Debug, Serialize, Deserialize)]
pub struct ElectionDescription {
    pub id: ElectionId,
    pub name: String,
    pub whitelist_window: TimeWindow,
    pub voting_window: TimeWindow,
    pub active: bool,
    pub candidate_count: u32,
    pub voter_count: u64,
    pub reserve_balance: u64,
    pub phase: ElectionPhase,
}

pub(super) fn describe(election: Election, platform: &Platform) -> ElectionDescription {
    let phase = election.phase(platform.now());
    let reserve_balance = platform.reserve_of(election.id);
    ElectionDescription {
        id: election.id,
        name: election.name,
        whitelist_window: election.whitelist_window,
        voting_window: election.voting_window,
        active: election.active,
        candidate_count: election.candidate_count,
        voter_count: election.voter_count,
        reserve_balance,
        phase,
    }
}

#[get("/elections")]
async fn get_elections(platform: &State<Platform>) -> Json<Vec<ElectionDescription>> {
    Json(
        platform
            .elections()
            .into_iter()
            .map(|election| describe(election, platform))
            .collect(),
    )
}

#[get("/elections/<election_id>")]
async fn get_election(
    election_id: ElectionId,
    platform: &State<Platform>,
) -> Option<Json<ElectionDescription>> {
    platform
        .election(election_id)
        .map(|election| Json(describe(election, platform)))
}

#[get("/elections/<election_id>/candidates")]
async fn get_candidates(
    election_id: ElectionId,
    platform: &State<Platform>,
) -> Json<Vec<Candidate>> {
    Json(platform.candidates(election_id))
}

/// Sparse-map read: absent candidates come back as a zero-valued record
/// rather than an error.
#[get("/elections/<election_id>/candidates/<candidate_id>")]
async fn get_candidate(
    election_id: ElectionId,
    candidate_id: CandidateId,
    platform: &State<Platform>,
) -> Json<Candidate> {
    Json(platform.candidate(election_id, candidate_id))
}

#[get("/elections/<election_id>/registrations/<registration_number>")]
async fn get_registration(
    election_id: ElectionId,
    registration_number: RegistrationNumber,
    platform: &State<Platform>,
) -> Json<Option<Address>> {
    Json(platform.wallet_for(election_id, registration_number))
}

#[get("/elections/<election_id>/voters/count")]
async fn get_voter_count(
    election_id: ElectionId,
    platform: &State<Platform>,
) -> Option<Json<u64>> {
    platform.registered_voters(election_id).map(Json)
}

/// Remaining execution reserve; zero for unfunded (or unknown) elections.
#[get("/elections/<election_id>/reserve")]
async fn get_reserve(election_id: ElectionId, platform: &State<Platform>) -> Json<u64> {
    Json(platform.reserve_of(election_id))
}

/// The append-only notification log, oldest first.
#[get("/events")]
async fn get_events(platform: &State<Platform>) -> Json<Vec<Event>> {
    Json(platform.events())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;

    use crate::testing::{self, CREATOR, OWNER, VOTER};

    use super::*;

    fn window(start: i64, end: i64) -> TimeWindow {
        TimeWindow {
            start: Utc.timestamp_opt(start, 0).unwrap(),
            end: Utc.timestamp_opt(end, 0).unwrap(),
        }
    }

    async fn seed(client: &Client) -> ElectionId {
        let platform = testing::platform(client);
        let id = platform
            .create_election(
                CREATOR,
                "Test".to_string(),
                window(0, 100),
                window(100, 200),
            )
            .unwrap()
            .id;
        platform.deposit(CREATOR, id, 200_000).unwrap();
        platform
            .add_candidate(OWNER, id, "Ada".to_string(), "ada.png".to_string())
            .unwrap();
        platform
            .add_candidate(OWNER, id, "Grace".to_string(), "grace.png".to_string())
            .unwrap();
        id
    }

    #[rocket::async_test]
    async fn list_and_fetch_elections() {
        let (client, clock) = testing::client().await;
        let id = seed(&client).await;

        clock.set(150);
        let response = client.get(uri!(get_elections)).dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let elections: Vec<ElectionDescription> = response.into_json().await.unwrap();
        assert_eq!(elections.len(), 1);

        let response = client.get(uri!(get_election(id))).dispatch().await;
        let description: ElectionDescription = response.into_json().await.unwrap();
        assert_eq!(description.id, id);
        assert_eq!(description.candidate_count, 2);
        assert_eq!(description.reserve_balance, 190_000);
        assert_eq!(description.phase, ElectionPhase::Voting);

        let response = client.get(uri!(get_election(99))).dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn candidates_list_in_id_order() {
        let (client, _clock) = testing::client().await;
        let id = seed(&client).await;

        let response = client.get(uri!(get_candidates(id))).dispatch().await;
        let candidates: Vec<Candidate> = response.into_json().await.unwrap();
        assert_eq!(
            candidates.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Ada", "Grace"]
        );
    }

    #[rocket::async_test]
    async fn absent_candidate_is_zero_valued_not_an_error() {
        let (client, _clock) = testing::client().await;
        let id = seed(&client).await;

        let response = client.get(uri!(get_candidate(id, 9))).dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let candidate: Candidate = response.into_json().await.unwrap();
        assert_eq!(candidate, Candidate::default());
    }

    #[rocket::async_test]
    async fn registration_lookup() {
        let (client, clock) = testing::client().await;
        let id = seed(&client).await;
        clock.set(50);
        testing::platform(&client).whitelist(VOTER, id, 7).unwrap();

        let response = client.get(uri!(get_registration(id, 7))).dispatch().await;
        let wallet: Option<Address> = response.into_json().await.unwrap();
        assert_eq!(wallet, Some(VOTER.to_string()));

        let response = client.get(uri!(get_registration(id, 8))).dispatch().await;
        let wallet: Option<Address> = response.into_json().await.unwrap();
        assert_eq!(wallet, None);

        let response = client.get(uri!(get_voter_count(id))).dispatch().await;
        let count: u64 = response.into_json().await.unwrap();
        assert_eq!(count, 1);
    }

    #[rocket::async_test]
    async fn reserve_and_events_are_visible() {
        let (client, _clock) = testing::client().await;
        let id = seed(&client).await;

        let response = client.get(uri!(get_reserve(id))).dispatch().await;
        let balance: u64 = response.into_json().await.unwrap();
        assert_eq!(balance, 190_000);

        let response = client.get(uri!(get_events)).dispatch().await;
        let events: Vec<Event> = response.into_json().await.unwrap();
        // Creator approval, creation, deposit, two candidates.
        assert_eq!(events.len(), 5);
        assert!(matches!(events[1], Event::ElectionCreated { .. }));
    }
}

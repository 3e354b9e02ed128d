use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    auth::Caller,
    candidate::Candidate,
    common::{Address, ElectionId},
    platform::Platform,
};

pub fn routes() -> Vec<Route> {
    routes![add_creator, remove_creator, add_candidate]
}

/// Approve an address as an election creator. Owner only.
#[post("/creators", data = "<address>", format = "json")]
async fn add_creator(
    caller: Caller,
    address: Json<Address>,
    platform: &State<Platform>,
) -> Result<()> {
    platform.add_creator(&caller.0, address.0)
}

/// Revoke an approved election creator. Owner only.
#[delete("/creators", data = "<address>", format = "json")]
async fn remove_creator(
    caller: Caller,
    address: Json<Address>,
    platform: &State<Platform>,
) -> Result<()> {
    platform.remove_creator(&caller.0, address.0)
}

/// Add a candidate to an active election. Owner only.
#[post("/elections/<election_id>/candidates", data = "<spec>", format = "json")]
async fn add_candidate(
    caller: Caller,
    election_id: ElectionId,
    spec: Json<CandidateSpec>,
    platform: &State<Platform>,
) -> Result<Json<Candidate>> {
    let candidate =
        platform.add_candidate(&caller.0, election_id, spec.0.name, spec.0.image_url)?;
    Ok(Json(candidate))
}

/// A candidate to add to an election.
#[derive(Debug, Serialize, Deserialize)]
struct CandidateSpec {
    name: String,
    image_url: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use rocket::http::{ContentType, Status};
    use rocket::serde::json::json;

    use crate::model::election::TimeWindow;
    use crate::testing::{self, CREATOR, OWNER};

    use super::*;

    #[rocket::async_test]
    async fn creators_are_managed_by_the_owner() {
        let (client, _clock) = testing::client().await;

        let response = client
            .post(uri!(add_creator))
            .header(ContentType::JSON)
            .header(testing::as_caller(OWNER))
            .body(json!("0xalice").to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        assert!(testing::platform(&client).is_creator("0xalice"));

        // Adding twice conflicts.
        let response = client
            .post(uri!(add_creator))
            .header(ContentType::JSON)
            .header(testing::as_caller(OWNER))
            .body(json!("0xalice").to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Conflict);

        let response = client
            .delete(uri!(remove_creator))
            .header(ContentType::JSON)
            .header(testing::as_caller(OWNER))
            .body(json!("0xalice").to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        assert!(!testing::platform(&client).is_creator("0xalice"));

        // Removing an unknown creator is a 404.
        let response = client
            .delete(uri!(remove_creator))
            .header(ContentType::JSON)
            .header(testing::as_caller(OWNER))
            .body(json!("0xalice").to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn non_owner_cannot_manage_creators() {
        let (client, _clock) = testing::client().await;

        let response = client
            .post(uri!(add_creator))
            .header(ContentType::JSON)
            .header(testing::as_caller("0xalice"))
            .body(json!("0xalice").to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);

        // No caller header at all.
        let response = client
            .post(uri!(add_creator))
            .header(ContentType::JSON)
            .body(json!("0xalice").to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);
    }

    #[rocket::async_test]
    async fn owner_adds_candidates() {
        let (client, _clock) = testing::client().await;
        let election = testing::platform(&client)
            .create_election(
                CREATOR,
                "Test".to_string(),
                TimeWindow {
                    start: Utc.timestamp_opt(0, 0).unwrap(),
                    end: Utc.timestamp_opt(100, 0).unwrap(),
                },
                TimeWindow {
                    start: Utc.timestamp_opt(100, 0).unwrap(),
                    end: Utc.timestamp_opt(200, 0).unwrap(),
                },
            )
            .unwrap();

        let response = client
            .post(uri!(add_candidate(election.id)))
            .header(ContentType::JSON)
            .header(testing::as_caller(OWNER))
            .body(json!({"name": "Ada", "image_url": "ada.png"}).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let candidate: Candidate = response.into_json().await.unwrap();
        assert_eq!(candidate.id, 1);
        assert_eq!(candidate.vote_count, 0);

        // Only the owner may add candidates.
        let response = client
            .post(uri!(add_candidate(election.id)))
            .header(ContentType::JSON)
            .header(testing::as_caller(CREATOR))
            .body(json!({"name": "Grace", "image_url": "grace.png"}).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);

        // Unknown elections are a 404.
        let response = client
            .post(uri!(add_candidate(99)))
            .header(ContentType::JSON)
            .header(testing::as_caller(OWNER))
            .body(json!({"name": "Ada", "image_url": "ada.png"}).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);
    }
}

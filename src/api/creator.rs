use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    auth::Caller,
    common::ElectionId,
    election::TimeWindow,
    platform::Platform,
};

use super::public::{describe, ElectionDescription};

pub fn routes() -> Vec<Route> {
    routes![create_election, deposit]
}

/// Create a new election. Approved creators only.
#[post("/elections", data = "<spec>", format = "json")]
async fn create_election(
    caller: Caller,
    spec: Json<ElectionSpec>,
    platform: &State<Platform>,
) -> Result<Json<ElectionDescription>> {
    let spec = spec.0;
    let election = platform.create_election(
        &caller.0,
        spec.name,
        spec.whitelist_window,
        spec.voting_window,
    )?;
    Ok(Json(describe(election, platform)))
}

/// Fund an election's execution reserve. Approved creators only; the election
/// id may be one the creator is about to create.
#[post("/elections/<election_id>/deposit", data = "<request>", format = "json")]
async fn deposit(
    caller: Caller,
    election_id: ElectionId,
    request: Json<DepositRequest>,
    platform: &State<Platform>,
) -> Result<Json<DepositReceipt>> {
    let amount = request.0.amount;
    let (fee, balance) = platform.deposit(&caller.0, election_id, amount)?;
    Ok(Json(DepositReceipt {
        election_id,
        amount,
        fee,
        balance,
    }))
}

/// An election to create: a name and its two time windows.
#[derive(Debug, Serialize, Deserialize)]
pub struct ElectionSpec {
    pub name: String,
    pub whitelist_window: TimeWindow,
    pub voting_window: TimeWindow,
}

#[derive(Debug, Serialize, Deserialize)]
struct DepositRequest {
    amount: u64,
}

/// What a deposit did: the gross amount, the skimmed fee, and the resulting
/// reserve balance.
#[derive(Debug, Serialize, Deserialize)]
struct DepositReceipt {
    election_id: ElectionId,
    amount: u64,
    fee: u64,
    balance: u64,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rocket::http::{ContentType, Status};
    use rocket::serde::json::{json, serde_json};

    use crate::model::election::ElectionPhase;
    use crate::testing::{self, CREATOR, VOTER};

    use super::*;

    fn window(start: i64, end: i64) -> TimeWindow {
        TimeWindow {
            start: Utc.timestamp_opt(start, 0).unwrap(),
            end: Utc.timestamp_opt(end, 0).unwrap(),
        }
    }

    fn spec() -> ElectionSpec {
        ElectionSpec {
            name: "Student Union President".to_string(),
            whitelist_window: window(0, 100),
            voting_window: window(100, 200),
        }
    }

    #[rocket::async_test]
    async fn creator_creates_an_election() {
        let (client, _clock) = testing::client().await;

        let response = client
            .post(uri!(create_election))
            .header(ContentType::JSON)
            .header(testing::as_caller(CREATOR))
            .body(serde_json::to_string(&spec()).unwrap())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let description: ElectionDescription = response.into_json().await.unwrap();
        assert_eq!(description.id, 1);
        assert_eq!(description.name, "Student Union President");
        assert!(description.active);
        assert_eq!(description.candidate_count, 0);
        assert_eq!(description.voter_count, 0);
        assert_eq!(description.reserve_balance, 0);
        // The test clock starts at t=0, inside the whitelist window.
        assert_eq!(description.phase, ElectionPhase::Whitelisting);
    }

    #[rocket::async_test]
    async fn non_creator_cannot_create() {
        let (client, _clock) = testing::client().await;

        let response = client
            .post(uri!(create_election))
            .header(ContentType::JSON)
            .header(testing::as_caller(VOTER))
            .body(serde_json::to_string(&spec()).unwrap())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);
    }

    #[rocket::async_test]
    async fn malformed_windows_are_rejected() {
        let (client, _clock) = testing::client().await;
        let bad = ElectionSpec {
            voting_window: window(200, 200),
            ..spec()
        };

        let response = client
            .post(uri!(create_election))
            .header(ContentType::JSON)
            .header(testing::as_caller(CREATOR))
            .body(serde_json::to_string(&bad).unwrap())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);
    }

    #[rocket::async_test]
    async fn deposit_returns_a_receipt() {
        let (client, _clock) = testing::client().await;

        let response = client
            .post(uri!(deposit(1)))
            .header(ContentType::JSON)
            .header(testing::as_caller(CREATOR))
            .body(json!({"amount": 1000}).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let receipt: DepositReceipt = response.into_json().await.unwrap();
        assert_eq!(receipt.amount, 1000);
        assert_eq!(receipt.fee, 50);
        assert_eq!(receipt.balance, 950);
        assert_eq!(testing::platform(&client).reserve_of(1), 950);
    }

    #[rocket::async_test]
    async fn zero_deposit_is_rejected() {
        let (client, _clock) = testing::client().await;

        let response = client
            .post(uri!(deposit(1)))
            .header(ContentType::JSON)
            .header(testing::as_caller(CREATOR))
            .body(json!({"amount": 0}).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);
    }
}

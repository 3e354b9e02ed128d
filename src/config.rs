use std::sync::Arc;

use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::clock::SystemClock;
use crate::model::common::Address;
use crate::model::platform::Platform;
use crate::model::reserve::ReservePolicy;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Ledger address of the platform owner.
    owner_address: Address,
    /// Percentage fee skimmed from every reserve deposit.
    fee_rate_percent: u64,
    /// Reserve units consumed by each cast vote.
    vote_unit_cost: u64,
    /// A vote only proceeds while the election's reserve strictly exceeds
    /// this.
    reserve_threshold: u64,
}

impl Config {
    pub fn owner_address(&self) -> &str {
        &self.owner_address
    }

    pub fn policy(&self) -> ReservePolicy {
        ReservePolicy {
            fee_rate_percent: self.fee_rate_percent,
            vote_unit_cost: self.vote_unit_cost,
            reserve_threshold: self.reserve_threshold,
        }
    }
}

/// A fairing that loads the platform config, validates the reserve policy,
/// and places a ready [`Platform`] into managed state.
pub struct PlatformFairing;

#[rocket::async_trait]
impl Fairing for PlatformFairing {
    fn info(&self) -> Info {
        Info {
            name: "Platform",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load platform config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // The deposit path relies on the fee never exceeding the amount.
        let policy = config.policy();
        if policy.fee_rate_percent > 100 {
            error!(
                "Invalid reserve policy: fee rate {}% exceeds 100%",
                policy.fee_rate_percent
            );
            return Err(rocket);
        }
        // The debit path relies on this to never drive a balance negative.
        if policy.reserve_threshold < policy.vote_unit_cost {
            error!(
                "Invalid reserve policy: threshold {} is below the per-vote unit cost {}",
                policy.reserve_threshold, policy.vote_unit_cost
            );
            return Err(rocket);
        }

        info!("Loaded platform config; owner is {}", config.owner_address());
        let platform = Platform::new(
            config.owner_address().to_string(),
            policy,
            Arc::new(SystemClock),
        );

        // Manage the state.
        rocket = rocket.manage(config).manage(platform);
        Ok(rocket)
    }
}

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::common::ElectionId;

/// Business-policy constants for the execution-cost reserve.
///
/// Configurable rather than baked in; the defaults are the values the
/// platform has always billed at.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReservePolicy {
    /// Percentage of every deposit skimmed as the platform fee.
    pub fee_rate_percent: u64,
    /// Reserve units consumed by each cast vote.
    pub vote_unit_cost: u64,
    /// A vote only proceeds while the balance strictly exceeds this.
    pub reserve_threshold: u64,
}

impl Default for ReservePolicy {
    fn default() -> Self {
        Self {
            fee_rate_percent: 5,
            vote_unit_cost: 30_000,
            reserve_threshold: 30_000,
        }
    }
}

/// Per-election prepaid execution-cost balances, plus the platform's
/// accumulated fee take.
#[derive(Debug, Default)]
pub struct ReserveAccount {
    balances: HashMap<ElectionId, u64>,
    fees_collected: u64,
}

impl ReserveAccount {
    /// Credit `amount` net of the platform fee (integer percentage, truncated
    /// toward zero). The election does not need to exist yet; creators may
    /// pre-fund an id they are about to create. Returns (fee, new balance).
    ///
    /// The fee is computed in 128 bits so large amounts cannot overflow, and
    /// a deposit that would overflow a running total is rejected whole.
    pub fn deposit(
        &mut self,
        election_id: ElectionId,
        amount: u64,
        policy: &ReservePolicy,
    ) -> Result<(u64, u64)> {
        if amount == 0 {
            return Err(Error::InvalidAmount(amount));
        }
        // The config fairing caps the rate at 100%, so the fee fits in u64
        // and never exceeds the amount.
        let fee = (amount as u128 * policy.fee_rate_percent as u128 / 100) as u64;
        let balance = self.balances.entry(election_id).or_default();
        let next_balance = balance
            .checked_add(amount - fee)
            .ok_or(Error::InvalidAmount(amount))?;
        let next_fees = self
            .fees_collected
            .checked_add(fee)
            .ok_or(Error::InvalidAmount(amount))?;
        *balance = next_balance;
        self.fees_collected = next_fees;
        Ok((fee, *balance))
    }

    /// Debit one vote's worth of execution cost. The balance must strictly
    /// exceed the threshold beforehand, which (given threshold >= unit cost,
    /// enforced at config load) keeps it non-negative afterwards.
    pub fn debit(&mut self, election_id: ElectionId, policy: &ReservePolicy) -> Result<u64> {
        let balance = self.balances.entry(election_id).or_default();
        if *balance <= policy.reserve_threshold {
            return Err(Error::InsufficientReserve(election_id, *balance));
        }
        *balance -= policy.vote_unit_cost;
        Ok(*balance)
    }

    pub fn balance_of(&self, election_id: ElectionId) -> u64 {
        self.balances.get(&election_id).copied().unwrap_or(0)
    }

    pub fn fees_collected(&self) -> u64 {
        self.fees_collected
    }
}

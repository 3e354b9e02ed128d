use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::model::common::{Address, ElectionId, RegistrationNumber};

/// Per-election registration-number bindings and eligibility flags.
///
/// A registration number binds to at most one address, ever; an address is
/// whitelisted at most once. There is no unbinding and no transfer.
#[derive(Debug, Default)]
pub struct WhitelistLedger {
    eligible: HashSet<(ElectionId, Address)>,
    bindings: HashMap<(ElectionId, RegistrationNumber), Address>,
}

impl WhitelistLedger {
    /// Bind `registration_number` to `caller` and mark them eligible.
    /// The caller must pass the temporal gate before invoking this.
    pub fn register(
        &mut self,
        election_id: ElectionId,
        caller: &str,
        registration_number: RegistrationNumber,
    ) -> Result<()> {
        if self.is_eligible(election_id, caller) {
            return Err(Error::AlreadyWhitelisted(election_id, caller.to_string()));
        }
        if self.bindings.contains_key(&(election_id, registration_number)) {
            return Err(Error::RegistrationNumberTaken(
                election_id,
                registration_number,
            ));
        }
        self.bindings
            .insert((election_id, registration_number), caller.to_string());
        self.eligible.insert((election_id, caller.to_string()));
        Ok(())
    }

    pub fn is_eligible(&self, election_id: ElectionId, address: &str) -> bool {
        self.eligible
            .contains(&(election_id, address.to_string()))
    }

    /// The address bound to a registration number, if any.
    pub fn wallet_for(
        &self,
        election_id: ElectionId,
        registration_number: RegistrationNumber,
    ) -> Option<&Address> {
        self.bindings.get(&(election_id, registration_number))
    }
}

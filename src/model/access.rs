use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::common::Address;

/// Tracks the platform owner and the set of approved election creators.
///
/// The owner is fixed at initialisation; creators come and go via the
/// owner-gated add/remove operations. Pure authorization lookup, no other
/// state.
#[derive(Debug)]
pub struct AccessRegistry {
    owner: Address,
    creators: HashSet<Address>,
}

impl AccessRegistry {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            creators: HashSet::new(),
        }
    }

    pub fn is_owner(&self, address: &str) -> bool {
        self.owner == address
    }

    pub fn is_creator(&self, address: &str) -> bool {
        self.creators.contains(address)
    }

    /// Fail with `Unauthorized` unless `caller` is the platform owner.
    pub fn ensure_owner(&self, caller: &str) -> Result<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(Error::Unauthorized(format!(
                "{caller} is not the platform owner"
            )))
        }
    }

    /// Fail with `Unauthorized` unless `caller` is an approved creator.
    pub fn ensure_creator(&self, caller: &str) -> Result<()> {
        if self.is_creator(caller) {
            Ok(())
        } else {
            Err(Error::Unauthorized(format!(
                "{caller} is not an approved election creator"
            )))
        }
    }

    pub fn add_creator(&mut self, address: Address) -> Result<()> {
        if !self.creators.insert(address.clone()) {
            return Err(Error::AlreadyCreator(address));
        }
        Ok(())
    }

    pub fn remove_creator(&mut self, address: &str) -> Result<()> {
        if !self.creators.remove(address) {
            return Err(Error::UnknownCreator(address.to_string()));
        }
        Ok(())
    }
}

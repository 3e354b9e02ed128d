use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::info;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::model::{
    access::AccessRegistry,
    candidate::{Candidate, CandidateRegistry},
    common::{Address, CandidateId, ElectionId, RegistrationNumber},
    election::{Election, TimeWindow},
    event::Event,
    reserve::{ReserveAccount, ReservePolicy},
    votes::VoteLedger,
    whitelist::WhitelistLedger,
};

/// The election platform state machine.
///
/// Every operation takes the single state lock for its full duration,
/// re-validates its preconditions against the latest committed state, and
/// either commits all of its effects or none of them. That reproduces the
/// all-or-nothing, one-at-a-time transaction semantics of the ledger the
/// platform settles on: no interleaving can let a second racing call pass a
/// check the first call's commit has already invalidated.
pub struct Platform {
    policy: ReservePolicy,
    clock: Arc<dyn Clock>,
    state: Mutex<LedgerState>,
}

/// All mutable platform state, guarded as one unit.
#[derive(Debug)]
struct LedgerState {
    access: AccessRegistry,
    next_election_id: ElectionId,
    elections: BTreeMap<ElectionId, Election>,
    candidates: CandidateRegistry,
    whitelist: WhitelistLedger,
    votes: VoteLedger,
    reserve: ReserveAccount,
    events: Vec<Event>,
}

impl LedgerState {
    fn new(owner: Address) -> Self {
        Self {
            access: AccessRegistry::new(owner),
            next_election_id: 1,
            elections: BTreeMap::new(),
            candidates: CandidateRegistry::default(),
            whitelist: WhitelistLedger::default(),
            votes: VoteLedger::default(),
            reserve: ReserveAccount::default(),
            events: Vec::new(),
        }
    }

    /// Record a committed notification and log it.
    fn emit(&mut self, event: Event) {
        info!("{event}");
        self.events.push(event);
    }

    fn election(&self, election_id: ElectionId) -> Result<&Election> {
        self.elections
            .get(&election_id)
            .ok_or(Error::ElectionNotFound(election_id))
    }

    fn election_mut(&mut self, election_id: ElectionId) -> Result<&mut Election> {
        self.elections
            .get_mut(&election_id)
            .ok_or(Error::ElectionNotFound(election_id))
    }
}

impl Platform {
    pub fn new(owner: Address, policy: ReservePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            state: Mutex::new(LedgerState::new(owner)),
        }
    }

    /// The platform's current time, as reported by the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        // No operation panics while holding the lock: every fallible step
        // returns an error before mutating, so poisoning means a bug and the
        // partial state behind it must not be served.
        self.state.lock().expect("platform state lock poisoned")
    }

    // Role management ------------------------------------------------------

    /// Approve `address` as an election creator. Owner only.
    pub fn add_creator(&self, caller: &str, address: Address) -> Result<()> {
        let mut state = self.lock();
        state.access.ensure_owner(caller)?;
        state.access.add_creator(address.clone())?;
        state.emit(Event::ElectionCreatorAdded { address });
        Ok(())
    }

    /// Revoke an approved creator. Owner only.
    pub fn remove_creator(&self, caller: &str, address: Address) -> Result<()> {
        let mut state = self.lock();
        state.access.ensure_owner(caller)?;
        state.access.remove_creator(&address)?;
        state.emit(Event::ElectionCreatorRemoved { address });
        Ok(())
    }

    pub fn is_creator(&self, address: &str) -> bool {
        self.lock().access.is_creator(address)
    }

    // Creator operations ---------------------------------------------------

    /// Credit the election's execution reserve with `amount`, net of the
    /// platform fee. The election id does not have to exist yet; creators may
    /// pre-fund before calling `create_election`. Returns (fee, new balance).
    pub fn deposit(
        &self,
        caller: &str,
        election_id: ElectionId,
        amount: u64,
    ) -> Result<(u64, u64)> {
        let mut state = self.lock();
        state.access.ensure_creator(caller)?;
        let (fee, balance) = state.reserve.deposit(election_id, amount, &self.policy)?;
        state.emit(Event::DepositMade {
            election_id,
            amount,
            fee,
        });
        Ok((fee, balance))
    }

    /// Allocate a new election under the next sequential id.
    pub fn create_election(
        &self,
        caller: &str,
        name: String,
        whitelist_window: TimeWindow,
        voting_window: TimeWindow,
    ) -> Result<Election> {
        let mut state = self.lock();
        state.access.ensure_creator(caller)?;
        if !whitelist_window.is_valid() {
            return Err(Error::InvalidTimeWindow(
                "whitelist window must start before it ends".to_string(),
            ));
        }
        if !voting_window.is_valid() {
            return Err(Error::InvalidTimeWindow(
                "voting window must start before it ends".to_string(),
            ));
        }

        let id = state.next_election_id;
        state.next_election_id += 1;
        let election = Election {
            id,
            name: name.clone(),
            whitelist_window,
            voting_window,
            active: true,
            candidate_count: 0,
            voter_count: 0,
        };
        state.elections.insert(id, election.clone());
        state.emit(Event::ElectionCreated {
            election_id: id,
            name,
        });
        Ok(election)
    }

    // Owner operations -----------------------------------------------------

    /// Add a candidate to an active election. Owner only. The candidate takes
    /// the next sequential id for that election.
    pub fn add_candidate(
        &self,
        caller: &str,
        election_id: ElectionId,
        name: String,
        image_url: String,
    ) -> Result<Candidate> {
        let mut state = self.lock();
        state.access.ensure_owner(caller)?;
        let candidate_id = {
            let election = state.election(election_id)?;
            if !election.active {
                return Err(Error::ElectionNotFound(election_id));
            }
            election.candidate_count + 1
        };

        let candidate = state
            .candidates
            .add(election_id, candidate_id, name, image_url);
        state.election_mut(election_id)?.candidate_count = candidate_id;
        state.emit(Event::CandidateAdded {
            election_id,
            candidate_id,
            name: candidate.name.clone(),
            image_url: candidate.image_url.clone(),
        });
        Ok(candidate)
    }

    // Voter operations -----------------------------------------------------

    /// Self-register for an election during its whitelist window, binding the
    /// registration number to the caller permanently.
    pub fn whitelist(
        &self,
        caller: &str,
        election_id: ElectionId,
        registration_number: RegistrationNumber,
    ) -> Result<()> {
        let now = self.clock.now();
        let mut state = self.lock();
        {
            let election = state.election(election_id)?;
            if !election.whitelist_window.contains(now) {
                return Err(Error::InvalidPhase(
                    election_id,
                    "the whitelist window is not open".to_string(),
                ));
            }
        }
        state
            .whitelist
            .register(election_id, caller, registration_number)?;
        state.election_mut(election_id)?.voter_count += 1;
        state.emit(Event::Whitelisted {
            election_id,
            address: caller.to_string(),
        });
        Ok(())
    }

    /// Cast a vote. Checked in order: whitelisted, voting window open, not
    /// yet voted, candidate valid, reserve above threshold. The has-voted
    /// flag, the tally increment, and the reserve debit then commit as one
    /// unit under the same lock.
    pub fn vote(
        &self,
        caller: &str,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<()> {
        let now = self.clock.now();
        let mut state = self.lock();

        if !state.whitelist.is_eligible(election_id, caller) {
            return Err(Error::NotWhitelisted(election_id, caller.to_string()));
        }
        {
            let election = state.election(election_id)?;
            if !election.voting_window.contains(now) {
                return Err(Error::InvalidPhase(
                    election_id,
                    "the voting window is not open".to_string(),
                ));
            }
        }
        if state.votes.has_voted(election_id, caller) {
            return Err(Error::AlreadyVoted(election_id, caller.to_string()));
        }
        // Candidate ids are exactly 1..=candidate_count, so existence in the
        // registry is the range check.
        if !state.candidates.contains(election_id, candidate_id) {
            return Err(Error::InvalidCandidate(election_id, candidate_id));
        }

        // The debit is the last fallible step; everything after it cannot
        // fail, so a rejection leaves the ledger untouched.
        state.reserve.debit(election_id, &self.policy)?;
        state.votes.record(election_id, caller.to_string());
        state.candidates.tally(election_id, candidate_id);
        state.emit(Event::VoteCasted {
            election_id,
            address: caller.to_string(),
            candidate_id,
        });
        Ok(())
    }

    // Read-only surface ----------------------------------------------------

    pub fn election(&self, election_id: ElectionId) -> Option<Election> {
        self.lock().elections.get(&election_id).cloned()
    }

    pub fn elections(&self) -> Vec<Election> {
        self.lock().elections.values().cloned().collect()
    }

    /// Sparse-map read: a zero-valued record if the candidate is absent.
    pub fn candidate(&self, election_id: ElectionId, candidate_id: CandidateId) -> Candidate {
        self.lock().candidates.get(election_id, candidate_id)
    }

    pub fn candidates(&self, election_id: ElectionId) -> Vec<Candidate> {
        let state = self.lock();
        let count = state
            .elections
            .get(&election_id)
            .map(|e| e.candidate_count)
            .unwrap_or(0);
        state.candidates.list(election_id, count)
    }

    pub fn wallet_for(
        &self,
        election_id: ElectionId,
        registration_number: RegistrationNumber,
    ) -> Option<Address> {
        self.lock()
            .whitelist
            .wallet_for(election_id, registration_number)
            .cloned()
    }

    pub fn has_voted(&self, election_id: ElectionId, address: &str) -> bool {
        self.lock().votes.has_voted(election_id, address)
    }

    pub fn registered_voters(&self, election_id: ElectionId) -> Option<u64> {
        self.lock().elections.get(&election_id).map(|e| e.voter_count)
    }

    pub fn reserve_of(&self, election_id: ElectionId) -> u64 {
        self.lock().reserve.balance_of(election_id)
    }

    pub fn fees_collected(&self) -> u64 {
        self.lock().reserve.fees_collected()
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }
}

use shared::types::Amount;
use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovConfig {
    pub registry: Address,
    /// Seconds a proposal stays open for voting
    pub voting_period: u64,
    /// Shares a proposer must hold in the startup
    pub min_proposal_shares: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub startup_id: u64,
    pub description: String,
    pub proposer: Address,
    pub votes_for: Amount,
    pub votes_against: Amount,
    pub deadline: u64,
    pub executed: bool,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalStatus {
    Open = 0,
    Passed = 1,
    Rejected = 2,
    Executed = 3,
}

impl Proposal {
    pub fn is_approved(&self) -> bool {
        self.votes_for > self.votes_against
    }

    pub fn status(&self, now: u64) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if now <= self.deadline {
            ProposalStatus::Open
        } else if self.is_approved() {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Rejected
        }
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    ProposalCounter,
    Proposal(u64),
    /// (proposal_id, voter) -> vote marker
    Voter(u64, Address),
}

#![no_std]

use shared::{
    access,
    constants::{DEFAULT_MIN_PROPOSAL_SHARES, DEFAULT_VOTING_PERIOD},
    errors::Error,
    events::{CONFIG_UPDATED, PROPOSAL_CREATED, PROPOSAL_EXECUTED, VOTE_CAST},
    interfaces::{fetch_balance, fetch_startup, ShareRegistryClient},
    types::Amount,
};
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, String};

mod storage;
mod types;

#[cfg(test)]
mod tests;

pub use types::{GovConfig, Proposal, ProposalStatus};

use storage::*;

contractmeta!(
    key = "name",
    val = "Startup Governance Contract"
);

#[contract]
pub struct Governance;

#[contractimpl]
impl Governance {
    /// Initialize with the registry that share balances are read from
    pub fn initialize(env: Env, owner: Address, registry: Address) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        access::init_owner(&env, &owner)?;

        set_config(
            &env,
            &GovConfig {
                registry,
                voting_period: DEFAULT_VOTING_PERIOD,
                min_proposal_shares: DEFAULT_MIN_PROPOSAL_SHARES,
            },
        );
        Ok(())
    }

    /// Owner-only. Affects proposals created afterwards; open proposals
    /// keep their deadline.
    pub fn update_config(
        env: Env,
        voting_period: u64,
        min_proposal_shares: Amount,
    ) -> Result<(), Error> {
        access::require_owner(&env)?;
        if voting_period == 0 || min_proposal_shares <= 0 {
            return Err(Error::InvalidConfig);
        }

        let mut config = get_config(&env)?;
        config.voting_period = voting_period;
        config.min_proposal_shares = min_proposal_shares;
        set_config(&env, &config);

        env.events()
            .publish((CONFIG_UPDATED,), (voting_period, min_proposal_shares));
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<GovConfig, Error> {
        get_config(&env)
    }

    /// Open a proposal on a startup. The proposer must hold at least
    /// `min_proposal_shares` of it.
    pub fn create_proposal(
        env: Env,
        proposer: Address,
        startup_id: u64,
        description: String,
    ) -> Result<u64, Error> {
        proposer.require_auth();
        let config = get_config(&env)?;

        if description.len() == 0 {
            return Err(Error::EmptyDescription);
        }

        let registry = ShareRegistryClient::new(&env, &config.registry);
        fetch_startup(&registry, startup_id)?;
        let balance = fetch_balance(&registry, startup_id, &proposer)?;
        if balance < config.min_proposal_shares {
            log!(&env, "insufficient shares to propose", balance);
            return Err(Error::InsufficientSharesToPropose);
        }

        let id = next_proposal_id(&env)?;
        let deadline = env
            .ledger()
            .timestamp()
            .checked_add(config.voting_period)
            .ok_or(Error::ArithmeticOverflow)?;

        set_proposal(
            &env,
            &Proposal {
                id,
                startup_id,
                description,
                proposer: proposer.clone(),
                votes_for: 0,
                votes_against: 0,
                deadline,
                executed: false,
            },
        );

        env.events()
            .publish((PROPOSAL_CREATED, id), (startup_id, proposer, deadline));

        Ok(id)
    }

    /// Cast a vote weighted by the voter's current share balance.
    ///
    /// The weight is read at vote time, not snapshotted at proposal creation,
    /// so shares moved between votes can be counted again by the receiver.
    pub fn vote(env: Env, voter: Address, proposal_id: u64, support: bool) -> Result<(), Error> {
        voter.require_auth();
        let config = get_config(&env)?;

        let mut proposal = get_proposal(&env, proposal_id)?;
        if env.ledger().timestamp() > proposal.deadline {
            return Err(Error::VotingEnded);
        }
        if has_voted(&env, proposal_id, &voter) {
            return Err(Error::AlreadyVoted);
        }

        let registry = ShareRegistryClient::new(&env, &config.registry);
        let weight = fetch_balance(&registry, proposal.startup_id, &voter)?;
        if weight <= 0 {
            return Err(Error::NoVotingPower);
        }

        if support {
            proposal.votes_for = proposal
                .votes_for
                .checked_add(weight)
                .ok_or(Error::ArithmeticOverflow)?;
        } else {
            proposal.votes_against = proposal
                .votes_against
                .checked_add(weight)
                .ok_or(Error::ArithmeticOverflow)?;
        }
        set_voted(&env, proposal_id, &voter);
        set_proposal(&env, &proposal);

        env.events()
            .publish((VOTE_CAST, proposal_id), (voter, support, weight));

        Ok(())
    }

    /// Close a passed proposal after its deadline. Anyone may call this.
    pub fn execute_proposal(env: Env, proposal_id: u64) -> Result<(), Error> {
        get_config(&env)?;
        let mut proposal = get_proposal(&env, proposal_id)?;

        if env.ledger().timestamp() <= proposal.deadline {
            return Err(Error::VotingNotEnded);
        }
        if proposal.executed {
            return Err(Error::AlreadyExecuted);
        }
        if !proposal.is_approved() {
            return Err(Error::NotApproved);
        }

        proposal.executed = true;
        set_proposal(&env, &proposal);

        env.events().publish(
            (PROPOSAL_EXECUTED, proposal_id),
            (proposal.votes_for, proposal.votes_against),
        );

        Ok(())
    }

    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<Proposal, Error> {
        get_proposal(&env, proposal_id)
    }

    pub fn get_proposal_status(env: Env, proposal_id: u64) -> Result<ProposalStatus, Error> {
        let proposal = get_proposal(&env, proposal_id)?;
        Ok(proposal.status(env.ledger().timestamp()))
    }

    pub fn has_voted(env: Env, proposal_id: u64, voter: Address) -> bool {
        has_voted(&env, proposal_id, &voter)
    }

    pub fn proposal_count(env: Env) -> u64 {
        proposal_count(&env)
    }
}

#![cfg(test)]

use crate::{Governance, GovernanceClient, ProposalStatus};
use share_registry::{ShareRegistry, ShareRegistryClient};
use shared::{constants::DEFAULT_VOTING_PERIOD, errors::Error};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

const START: u64 = 10_000;

struct Setup<'a> {
    env: Env,
    registry: ShareRegistryClient<'a>,
    gov: GovernanceClient<'a>,
    founder: Address,
    startup_id: u64,
}

fn setup() -> Setup<'static> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let owner = Address::generate(&env);
    let founder = Address::generate(&env);

    let registry_id = env.register_contract(None, ShareRegistry);
    let registry = ShareRegistryClient::new(&env, &registry_id);
    registry.initialize(&owner);

    let gov = GovernanceClient::new(&env, &env.register_contract(None, Governance));
    gov.initialize(&owner, &registry_id);

    let startup_id = registry.register_startup(
        &founder,
        &String::from_str(&env, "Acme"),
        &String::from_str(&env, "Fractional widgets"),
        &1_000_000,
        &1_000_000,
    );

    Setup {
        env,
        registry,
        gov,
        founder,
        startup_id,
    }
}

fn holder(s: &Setup, shares: i128) -> Address {
    let holder = Address::generate(&s.env);
    s.registry
        .issue_shares(&s.founder, &s.startup_id, &holder, &shares);
    holder
}

fn propose(s: &Setup, proposer: &Address) -> u64 {
    s.gov.create_proposal(
        proposer,
        &s.startup_id,
        &String::from_str(&s.env, "Raise the next round"),
    )
}

fn warp(env: &Env, timestamp: u64) {
    env.ledger().set_timestamp(timestamp);
}

#[test]
fn test_create_proposal() {
    let s = setup();
    let alice = holder(&s, 100);

    let id = propose(&s, &alice);
    assert_eq!(id, 0);
    assert_eq!(s.gov.proposal_count(), 1);

    let proposal = s.gov.get_proposal(&id);
    assert_eq!(proposal.startup_id, s.startup_id);
    assert_eq!(proposal.proposer, alice);
    assert_eq!(proposal.deadline, START + DEFAULT_VOTING_PERIOD);
    assert_eq!(proposal.votes_for, 0);
    assert!(!proposal.executed);
    assert_eq!(s.gov.get_proposal_status(&id), ProposalStatus::Open);

    assert_eq!(propose(&s, &alice), 1);
}

#[test]
fn test_create_proposal_without_shares() {
    let s = setup();
    let nobody = Address::generate(&s.env);

    let result = s.gov.try_create_proposal(
        &nobody,
        &s.startup_id,
        &String::from_str(&s.env, "Raise the next round"),
    );
    assert_eq!(result, Err(Ok(Error::InsufficientSharesToPropose)));
    assert_eq!(
        Error::InsufficientSharesToPropose.reason(),
        "insufficient shares to propose"
    );
    assert_eq!(s.gov.proposal_count(), 0);
}

#[test]
fn test_create_proposal_validation() {
    let s = setup();
    let alice = holder(&s, 100);

    let result =
        s.gov
            .try_create_proposal(&alice, &s.startup_id, &String::from_str(&s.env, ""));
    assert_eq!(result, Err(Ok(Error::EmptyDescription)));

    let result = s
        .gov
        .try_create_proposal(&alice, &99, &String::from_str(&s.env, "desc"));
    assert_eq!(result, Err(Ok(Error::StartupNotFound)));
}

#[test]
fn test_min_proposal_shares_threshold() {
    let s = setup();
    let alice = holder(&s, 10);
    s.gov.update_config(&DEFAULT_VOTING_PERIOD, &11);

    let result = s.gov.try_create_proposal(
        &alice,
        &s.startup_id,
        &String::from_str(&s.env, "desc"),
    );
    assert_eq!(result, Err(Ok(Error::InsufficientSharesToPropose)));

    s.registry.issue_shares(&s.founder, &s.startup_id, &alice, &1);
    propose(&s, &alice);
}

#[test]
fn test_votes_are_weighted_by_balance() {
    let s = setup();
    let alice = holder(&s, 300);
    let bob = holder(&s, 200);
    let id = propose(&s, &alice);

    s.gov.vote(&alice, &id, &true);
    s.gov.vote(&bob, &id, &false);

    let proposal = s.gov.get_proposal(&id);
    assert_eq!(proposal.votes_for, 300);
    assert_eq!(proposal.votes_against, 200);
    assert!(s.gov.has_voted(&id, &alice));
    assert!(s.gov.has_voted(&id, &bob));
}

#[test]
fn test_vote_rejections() {
    let s = setup();
    let alice = holder(&s, 300);
    let nobody = Address::generate(&s.env);
    let id = propose(&s, &alice);

    s.gov.vote(&alice, &id, &true);
    assert_eq!(
        s.gov.try_vote(&alice, &id, &false),
        Err(Ok(Error::AlreadyVoted))
    );
    assert_eq!(
        s.gov.try_vote(&nobody, &id, &true),
        Err(Ok(Error::NoVotingPower))
    );
    assert_eq!(
        s.gov.try_vote(&alice, &42, &true),
        Err(Ok(Error::ProposalNotFound))
    );
    assert_eq!(s.gov.get_proposal(&id).votes_for, 300);
}

#[test]
fn test_voting_lifecycle() {
    let s = setup();
    let alice = holder(&s, 300);
    let bob = holder(&s, 200);
    let id = propose(&s, &alice);
    let deadline = s.gov.get_proposal(&id).deadline;

    s.gov.vote(&alice, &id, &true);

    // Deadline itself is still inside the voting window
    warp(&s.env, deadline);
    assert_eq!(
        s.gov.try_execute_proposal(&id),
        Err(Ok(Error::VotingNotEnded))
    );

    warp(&s.env, deadline + 1);
    assert_eq!(s.gov.try_vote(&bob, &id, &false), Err(Ok(Error::VotingEnded)));
    assert_eq!(s.gov.get_proposal_status(&id), ProposalStatus::Passed);

    s.gov.execute_proposal(&id);
    assert!(s.gov.get_proposal(&id).executed);
    assert_eq!(s.gov.get_proposal_status(&id), ProposalStatus::Executed);
}

#[test]
fn test_execute_is_idempotent() {
    let s = setup();
    let alice = holder(&s, 300);
    let id = propose(&s, &alice);
    s.gov.vote(&alice, &id, &true);

    let deadline = s.gov.get_proposal(&id).deadline;
    warp(&s.env, deadline + 1);
    s.gov.execute_proposal(&id);
    let before = s.gov.get_proposal(&id);

    for _ in 0..3 {
        assert_eq!(
            s.gov.try_execute_proposal(&id),
            Err(Ok(Error::AlreadyExecuted))
        );
    }
    assert_eq!(s.gov.get_proposal(&id), before);
}

#[test]
fn test_tied_or_losing_proposal_not_approved() {
    let s = setup();
    let alice = holder(&s, 200);
    let bob = holder(&s, 200);
    let id = propose(&s, &alice);

    s.gov.vote(&alice, &id, &true);
    s.gov.vote(&bob, &id, &false);

    warp(&s.env, s.gov.get_proposal(&id).deadline + 1);
    assert_eq!(s.gov.get_proposal_status(&id), ProposalStatus::Rejected);
    assert_eq!(
        s.gov.try_execute_proposal(&id),
        Err(Ok(Error::NotApproved))
    );
    assert!(!s.gov.get_proposal(&id).executed);
}

#[test]
fn test_vote_weight_is_read_live() {
    let s = setup();
    let alice = holder(&s, 300);
    let bob = Address::generate(&s.env);
    let id = propose(&s, &alice);

    s.gov.vote(&alice, &id, &true);
    s.registry.transfer_shares(&alice, &s.startup_id, &bob, &300);
    s.gov.vote(&bob, &id, &false);

    let proposal = s.gov.get_proposal(&id);
    assert_eq!(proposal.votes_for, 300);
    assert_eq!(proposal.votes_against, 300);
}

#[test]
fn test_update_config() {
    let s = setup();

    assert_eq!(s.gov.try_update_config(&0, &1), Err(Ok(Error::InvalidConfig)));
    assert_eq!(
        s.gov.try_update_config(&3600, &0),
        Err(Ok(Error::InvalidConfig))
    );

    s.gov.update_config(&3600, &5);
    let config = s.gov.get_config();
    assert_eq!(config.voting_period, 3600);
    assert_eq!(config.min_proposal_shares, 5);

    let alice = holder(&s, 5);
    let id = propose(&s, &alice);
    assert_eq!(s.gov.get_proposal(&id).deadline, START + 3600);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn test_initialize_twice() {
    let s = setup();
    s.gov
        .initialize(&Address::generate(&s.env), &s.registry.address);
}

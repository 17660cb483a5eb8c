#![cfg(test)]

use crate::{ShareRegistry, ShareRegistryClient};
use shared::errors::Error;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

const TOTAL_SHARES: i128 = 1_000_000;
const INITIAL_VALUATION: i128 = 1_000_000;

fn setup() -> (Env, ShareRegistryClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1000);

    let owner = Address::generate(&env);
    let founder = Address::generate(&env);
    let client = ShareRegistryClient::new(&env, &env.register_contract(None, ShareRegistry));
    client.initialize(&owner);

    (env, client, owner, founder)
}

fn register(env: &Env, client: &ShareRegistryClient, founder: &Address) -> u64 {
    client.register_startup(
        founder,
        &String::from_str(env, "Acme"),
        &String::from_str(env, "Fractional widgets"),
        &TOTAL_SHARES,
        &INITIAL_VALUATION,
    )
}

fn assert_share_invariant(client: &ShareRegistryClient, startup_id: u64, holders: &[&Address]) {
    let startup = client.get_startup_details(&startup_id);
    let held: i128 = holders
        .iter()
        .map(|holder| client.balance_of(&startup_id, holder))
        .sum();
    assert_eq!(startup.available_shares + held, startup.total_shares);
}

#[test]
fn test_register_startup() {
    let (env, client, _, founder) = setup();

    let id = register(&env, &client, &founder);
    assert_eq!(id, 1);

    let startup = client.get_startup_details(&id);
    assert_eq!(startup.name, String::from_str(&env, "Acme"));
    assert_eq!(startup.total_shares, TOTAL_SHARES);
    assert_eq!(startup.available_shares, TOTAL_SHARES);
    assert_eq!(startup.valuation, INITIAL_VALUATION);
    assert_eq!(startup.founder, founder);
    assert!(!startup.is_validated);
    assert_eq!(startup.created_at, 1000);
    assert_eq!(client.startup_count(), 1);

    let second = register(&env, &client, &founder);
    assert_eq!(second, 2);
}

#[test]
fn test_register_rejects_malformed_input() {
    let (env, client, _, founder) = setup();
    let desc = String::from_str(&env, "desc");

    let result = client.try_register_startup(
        &founder,
        &String::from_str(&env, ""),
        &desc,
        &TOTAL_SHARES,
        &INITIAL_VALUATION,
    );
    assert_eq!(result, Err(Ok(Error::EmptyName)));

    let name = String::from_str(&env, "Acme");
    let result = client.try_register_startup(&founder, &name, &desc, &0, &INITIAL_VALUATION);
    assert_eq!(result, Err(Ok(Error::InvalidShareCount)));

    let result = client.try_register_startup(&founder, &name, &desc, &TOTAL_SHARES, &0);
    assert_eq!(result, Err(Ok(Error::InvalidValuation)));

    assert_eq!(client.startup_count(), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn test_initialize_twice() {
    let (env, client, _, _) = setup();
    client.initialize(&Address::generate(&env));
}

#[test]
fn test_register_before_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let client = ShareRegistryClient::new(&env, &env.register_contract(None, ShareRegistry));

    let result = client.try_register_startup(
        &Address::generate(&env),
        &String::from_str(&env, "Acme"),
        &String::from_str(&env, "desc"),
        &TOTAL_SHARES,
        &INITIAL_VALUATION,
    );
    assert_eq!(result, Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_validator_can_validate() {
    let (env, client, _, founder) = setup();
    let validator = Address::generate(&env);
    let id = register(&env, &client, &founder);

    client.add_validator(&validator);
    assert!(client.is_validator(&validator));

    client.validate_startup(&validator, &id, &true);
    assert!(client.get_startup_details(&id).is_validated);

    client.validate_startup(&validator, &id, &false);
    assert!(!client.get_startup_details(&id).is_validated);
}

#[test]
fn test_non_validator_cannot_validate() {
    let (env, client, _, founder) = setup();
    let validator = Address::generate(&env);
    let id = register(&env, &client, &founder);

    let result = client.try_validate_startup(&founder, &id, &true);
    assert_eq!(result, Err(Ok(Error::NotValidator)));

    client.add_validator(&validator);
    client.remove_validator(&validator);
    let result = client.try_validate_startup(&validator, &id, &true);
    assert_eq!(result, Err(Ok(Error::NotValidator)));
    assert!(!client.get_startup_details(&id).is_validated);
}

#[test]
fn test_founder_issues_shares() {
    let (env, client, _, founder) = setup();
    let investor = Address::generate(&env);
    let id = register(&env, &client, &founder);

    client.issue_shares(&founder, &id, &investor, &100);

    assert_eq!(client.balance_of(&id, &investor), 100);
    assert_eq!(client.get_startup_details(&id).available_shares, TOTAL_SHARES - 100);
    assert_eq!(client.get_issued_shares(&id), 100);
    assert_share_invariant(&client, id, &[&investor]);
}

#[test]
fn test_trusted_issuer_issues_shares() {
    let (env, client, _, founder) = setup();
    let issuer = Address::generate(&env);
    let investor = Address::generate(&env);
    let id = register(&env, &client, &founder);

    let result = client.try_issue_shares(&issuer, &id, &investor, &100);
    assert_eq!(result, Err(Ok(Error::NotIssuer)));

    client.add_trusted_issuer(&issuer);
    assert!(client.is_trusted_issuer(&issuer));
    client.issue_shares(&issuer, &id, &investor, &100);
    assert_eq!(client.balance_of(&id, &investor), 100);

    client.remove_trusted_issuer(&issuer);
    let result = client.try_issue_shares(&issuer, &id, &investor, &100);
    assert_eq!(result, Err(Ok(Error::NotIssuer)));
}

#[test]
fn test_issue_exactly_available_then_one_more() {
    let (env, client, _, founder) = setup();
    let investor = Address::generate(&env);
    let id = register(&env, &client, &founder);

    client.issue_shares(&founder, &id, &investor, &(TOTAL_SHARES - 10));
    client.issue_shares(&founder, &id, &investor, &10);
    assert_eq!(client.get_startup_details(&id).available_shares, 0);

    let result = client.try_issue_shares(&founder, &id, &investor, &1);
    assert_eq!(result, Err(Ok(Error::InsufficientShares)));
    assert_share_invariant(&client, id, &[&investor]);
}

#[test]
fn test_issue_rejects_non_positive_amount() {
    let (env, client, _, founder) = setup();
    let investor = Address::generate(&env);
    let id = register(&env, &client, &founder);

    assert_eq!(
        client.try_issue_shares(&founder, &id, &investor, &0),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(
        client.try_issue_shares(&founder, &id, &investor, &-5),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_transfer_preserves_combined_balance() {
    let (env, client, _, founder) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let id = register(&env, &client, &founder);

    client.issue_shares(&founder, &id, &alice, &500);
    client.transfer_shares(&alice, &id, &bob, &200);

    assert_eq!(client.balance_of(&id, &alice), 300);
    assert_eq!(client.balance_of(&id, &bob), 200);
    assert_eq!(
        client.balance_of(&id, &alice) + client.balance_of(&id, &bob),
        500
    );
    assert_share_invariant(&client, id, &[&alice, &bob]);

    // Self transfer changes nothing
    client.transfer_shares(&bob, &id, &bob, &200);
    assert_eq!(client.balance_of(&id, &bob), 200);
}

#[test]
fn test_transfer_more_than_balance() {
    let (env, client, _, founder) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let id = register(&env, &client, &founder);

    client.issue_shares(&founder, &id, &alice, &50);
    let result = client.try_transfer_shares(&alice, &id, &bob, &51);
    assert_eq!(result, Err(Ok(Error::InsufficientBalance)));

    assert_eq!(client.balance_of(&id, &alice), 50);
    assert_eq!(client.balance_of(&id, &bob), 0);
}

#[test]
fn test_snapshot_freezes_balances() {
    let (env, client, _, founder) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let carol = Address::generate(&env);
    let id = register(&env, &client, &founder);

    client.issue_shares(&founder, &id, &alice, &500);
    client.issue_shares(&founder, &id, &bob, &500);
    let first = client.snapshot(&founder, &id);
    assert_eq!(first, 1);

    client.transfer_shares(&alice, &id, &carol, &300);
    client.issue_shares(&founder, &id, &carol, &1_000);
    assert_eq!(client.balance_of_at(&id, &alice, &first), 500);
    assert_eq!(client.balance_of_at(&id, &bob, &first), 500);
    assert_eq!(client.balance_of_at(&id, &carol, &first), 0);

    let second = client.snapshot(&founder, &id);
    client.transfer_shares(&carol, &id, &bob, &1_300);
    assert_eq!(client.balance_of_at(&id, &carol, &second), 1_300);
    assert_eq!(client.balance_of_at(&id, &bob, &second), 500);
    assert_eq!(client.balance_of_at(&id, &carol, &first), 0);
    assert_eq!(client.balance_of_at(&id, &alice, &second), 200);
    assert_eq!(client.balance_of(&id, &bob), 1_800);
    assert_share_invariant(&client, id, &[&alice, &bob, &carol]);
}

#[test]
fn test_snapshot_authority_and_bounds() {
    let (env, client, _, founder) = setup();
    let stranger = Address::generate(&env);
    let id = register(&env, &client, &founder);

    let result = client.try_snapshot(&stranger, &id);
    assert_eq!(result, Err(Ok(Error::NotIssuer)));
    assert_eq!(
        client.try_snapshot(&founder, &999),
        Err(Ok(Error::StartupNotFound))
    );

    assert_eq!(
        client.try_balance_of_at(&id, &stranger, &1),
        Err(Ok(Error::InvalidInput))
    );
    client.snapshot(&founder, &id);
    assert_eq!(client.balance_of_at(&id, &stranger, &1), 0);
    assert_eq!(
        client.try_balance_of_at(&id, &stranger, &0),
        Err(Ok(Error::InvalidInput))
    );
}

#[test]
fn test_founder_updates_valuation() {
    let (env, client, _, founder) = setup();
    let id = register(&env, &client, &founder);

    client.update_valuation(&founder, &id, &2_000_000);
    assert_eq!(client.get_startup_valuation(&id), 2_000_000);

    let result = client.try_update_valuation(&founder, &id, &0);
    assert_eq!(result, Err(Ok(Error::InvalidValuation)));
    assert_eq!(client.get_startup_valuation(&id), 2_000_000);
}

#[test]
fn test_valuation_updater_capability() {
    let (env, client, _, founder) = setup();
    let stranger = Address::generate(&env);
    let updater = Address::generate(&env);
    let id = register(&env, &client, &founder);

    let result = client.try_update_valuation(&stranger, &id, &2_000_000);
    assert_eq!(result, Err(Ok(Error::NotValuationUpdater)));

    client.set_valuation_updater(&updater);
    assert_eq!(client.get_valuation_updater(), Some(updater.clone()));
    client.update_valuation(&updater, &id, &1_500_000);
    assert_eq!(client.get_startup_valuation(&id), 1_500_000);
}

#[test]
fn test_unknown_startup_reads_fail() {
    let (env, client, _, _) = setup();
    let holder = Address::generate(&env);

    assert_eq!(
        client.try_get_startup_details(&999),
        Err(Ok(Error::StartupNotFound))
    );
    assert_eq!(
        client.try_get_startup_valuation(&999),
        Err(Ok(Error::StartupNotFound))
    );
    assert_eq!(
        client.try_balance_of(&999, &holder),
        Err(Ok(Error::StartupNotFound))
    );
}

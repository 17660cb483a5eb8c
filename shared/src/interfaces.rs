//! Cross-contract interfaces. Contracts reach each other only through these
//! generated clients, never by linking another contract crate.

use crate::errors::Error;
use crate::types::{Amount, RoundData, Startup};
use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env, Symbol};

/// The subset of the share registry other contracts are allowed to touch.
#[contractclient(name = "ShareRegistryClient")]
pub trait ShareRegistryInterface {
    fn get_startup_details(env: Env, startup_id: u64) -> Result<Startup, Error>;

    fn balance_of(env: Env, startup_id: u64, holder: Address) -> Result<Amount, Error>;

    fn balance_of_at(
        env: Env,
        startup_id: u64,
        holder: Address,
        snapshot_id: u64,
    ) -> Result<Amount, Error>;

    fn snapshot(env: Env, caller: Address, startup_id: u64) -> Result<u64, Error>;

    fn issue_shares(
        env: Env,
        issuer: Address,
        startup_id: u64,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), Error>;

    fn update_valuation(
        env: Env,
        caller: Address,
        startup_id: u64,
        new_valuation: Amount,
    ) -> Result<(), Error>;
}

/// External price source polled by the valuation oracle.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    fn decimals(env: Env) -> u32;

    fn latest_round(env: Env) -> RoundData;
}

/// Entry point of the off-ledger compute network. Assigns the request id;
/// results come back later through the consumer's `fulfill`.
#[contractclient(name = "FunctionsRouterClient")]
pub trait FunctionsRouterInterface {
    fn send_request(
        env: Env,
        subscription_id: u64,
        network_id: BytesN<32>,
        source: Symbol,
        args: Bytes,
        callback_gas_limit: u32,
    ) -> BytesN<32>;
}

/// Load a startup through the registry, surfacing the registry's own error
pub fn fetch_startup(registry: &ShareRegistryClient, startup_id: u64) -> Result<Startup, Error> {
    match registry.try_get_startup_details(&startup_id) {
        Ok(Ok(startup)) => Ok(startup),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::StartupNotFound),
    }
}

pub fn fetch_balance(
    registry: &ShareRegistryClient,
    startup_id: u64,
    holder: &Address,
) -> Result<Amount, Error> {
    match registry.try_balance_of(&startup_id, holder) {
        Ok(Ok(balance)) => Ok(balance),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::StartupNotFound),
    }
}

pub fn fetch_balance_at(
    registry: &ShareRegistryClient,
    startup_id: u64,
    holder: &Address,
    snapshot_id: u64,
) -> Result<Amount, Error> {
    match registry.try_balance_of_at(&startup_id, holder, &snapshot_id) {
        Ok(Ok(balance)) => Ok(balance),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::StartupNotFound),
    }
}

/// Take a balance snapshot with `caller` (normally the calling contract) as
/// the authority
pub fn take_snapshot(
    registry: &ShareRegistryClient,
    caller: &Address,
    startup_id: u64,
) -> Result<u64, Error> {
    match registry.try_snapshot(caller, &startup_id) {
        Ok(Ok(snapshot_id)) => Ok(snapshot_id),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::NotIssuer),
    }
}

/// Issue shares with `issuer` (normally the calling contract) as the authority
pub fn issue_shares(
    registry: &ShareRegistryClient,
    issuer: &Address,
    startup_id: u64,
    recipient: &Address,
    amount: Amount,
) -> Result<(), Error> {
    match registry.try_issue_shares(issuer, &startup_id, recipient, &amount) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::NotIssuer),
    }
}

pub fn push_valuation(
    registry: &ShareRegistryClient,
    caller: &Address,
    startup_id: u64,
    new_valuation: Amount,
) -> Result<(), Error> {
    match registry.try_update_valuation(caller, &startup_id, &new_valuation) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::NotValuationUpdater),
    }
}

use shared::errors::Error;
use shared::types::{Amount, Startup};
use soroban_sdk::{contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Last assigned startup id
    StartupCounter,
    Startup(u64),
    /// (startup_id, holder) -> share balance
    Balance(u64, Address),
    /// Holder of the trusted valuation-updater capability
    ValuationUpdater,
    /// Last snapshot id taken for a startup
    SnapshotCounter(u64),
    /// (startup_id, holder) -> Vec<Checkpoint>, ascending by snapshot id
    Checkpoints(u64, Address),
}

/// Balance a holder had when `snapshot_id` was taken.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    pub snapshot_id: u64,
    pub balance: Amount,
}

/// Allocate the next startup id, starting at 1
pub fn next_startup_id(env: &Env) -> Result<u64, Error> {
    let id = startup_count(env)
        .checked_add(1)
        .ok_or(Error::ArithmeticOverflow)?;
    env.storage().instance().set(&DataKey::StartupCounter, &id);
    Ok(id)
}

pub fn startup_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::StartupCounter)
        .unwrap_or(0)
}

pub fn set_startup(env: &Env, startup: &Startup) {
    env.storage()
        .persistent()
        .set(&DataKey::Startup(startup.id), startup);
}

pub fn get_startup(env: &Env, startup_id: u64) -> Result<Startup, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Startup(startup_id))
        .ok_or(Error::StartupNotFound)
}

pub fn get_balance(env: &Env, startup_id: u64, holder: &Address) -> Amount {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(startup_id, holder.clone()))
        .unwrap_or(0)
}

/// Zero balances are removed rather than stored. The previous balance is
/// checkpointed first if a snapshot was taken since the last change.
pub fn set_balance(env: &Env, startup_id: u64, holder: &Address, balance: Amount) {
    write_checkpoint(env, startup_id, holder);
    let key = DataKey::Balance(startup_id, holder.clone());
    if balance == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
    }
}

pub fn get_valuation_updater(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::ValuationUpdater)
}

pub fn set_valuation_updater(env: &Env, updater: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::ValuationUpdater, updater);
}

pub fn current_snapshot(env: &Env, startup_id: u64) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::SnapshotCounter(startup_id))
        .unwrap_or(0)
}

/// Allocate the next snapshot id for a startup, starting at 1
pub fn next_snapshot_id(env: &Env, startup_id: u64) -> Result<u64, Error> {
    let id = current_snapshot(env, startup_id)
        .checked_add(1)
        .ok_or(Error::ArithmeticOverflow)?;
    env.storage()
        .persistent()
        .set(&DataKey::SnapshotCounter(startup_id), &id);
    Ok(id)
}

fn get_checkpoints(env: &Env, startup_id: u64, holder: &Address) -> Vec<Checkpoint> {
    env.storage()
        .persistent()
        .get(&DataKey::Checkpoints(startup_id, holder.clone()))
        .unwrap_or(Vec::new(env))
}

fn write_checkpoint(env: &Env, startup_id: u64, holder: &Address) {
    let snapshot_id = current_snapshot(env, startup_id);
    if snapshot_id == 0 {
        return;
    }

    let mut checkpoints = get_checkpoints(env, startup_id, holder);
    if let Some(last) = checkpoints.last() {
        if last.snapshot_id >= snapshot_id {
            return;
        }
    }
    checkpoints.push_back(Checkpoint {
        snapshot_id,
        balance: get_balance(env, startup_id, holder),
    });
    env.storage()
        .persistent()
        .set(&DataKey::Checkpoints(startup_id, holder.clone()), &checkpoints);
}

/// Balance at `snapshot_id`: the first checkpoint at or after it, or the live
/// balance when nothing changed since.
pub fn get_balance_at(env: &Env, startup_id: u64, holder: &Address, snapshot_id: u64) -> Amount {
    get_checkpoints(env, startup_id, holder)
        .iter()
        .find(|checkpoint| checkpoint.snapshot_id >= snapshot_id)
        .map(|checkpoint| checkpoint.balance)
        .unwrap_or_else(|| get_balance(env, startup_id, holder))
}

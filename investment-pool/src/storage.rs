use crate::types::{DataKey, Distribution, InvestmentRecord, InvestmentTotals, PoolConfig};
use shared::errors::Error;
use soroban_sdk::{Address, Env, Vec};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<PoolConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn get_history(env: &Env, startup_id: u64, investor: &Address) -> Vec<InvestmentRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::History(startup_id, investor.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn append_record(env: &Env, record: &InvestmentRecord) {
    let mut history = get_history(env, record.startup_id, &record.investor);
    history.push_back(record.clone());
    env.storage().persistent().set(
        &DataKey::History(record.startup_id, record.investor.clone()),
        &history,
    );
}

pub fn get_totals(env: &Env, startup_id: u64) -> InvestmentTotals {
    env.storage()
        .persistent()
        .get(&DataKey::Totals(startup_id))
        .unwrap_or_default()
}

pub fn set_totals(env: &Env, startup_id: u64, totals: &InvestmentTotals) {
    env.storage()
        .persistent()
        .set(&DataKey::Totals(startup_id), totals);
}

pub fn distribution_count(env: &Env, startup_id: u64) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::DistributionCounter(startup_id))
        .unwrap_or(0)
}

/// Allocate the next distribution id for a startup, starting at 0
pub fn next_distribution_id(env: &Env, startup_id: u64) -> Result<u64, Error> {
    let id = distribution_count(env, startup_id);
    let next = id.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
    env.storage()
        .persistent()
        .set(&DataKey::DistributionCounter(startup_id), &next);
    Ok(id)
}

pub fn set_distribution(env: &Env, distribution: &Distribution) {
    env.storage().persistent().set(
        &DataKey::Distribution(distribution.startup_id, distribution.distribution_id),
        distribution,
    );
}

pub fn get_distribution(
    env: &Env,
    startup_id: u64,
    distribution_id: u64,
) -> Result<Distribution, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Distribution(startup_id, distribution_id))
        .ok_or(Error::DistributionNotFound)
}

pub fn has_claimed(env: &Env, startup_id: u64, distribution_id: u64, holder: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Claimed(startup_id, distribution_id, holder.clone()))
}

pub fn set_claimed(env: &Env, startup_id: u64, distribution_id: u64, holder: &Address) {
    env.storage().persistent().set(
        &DataKey::Claimed(startup_id, distribution_id, holder.clone()),
        &true,
    );
}

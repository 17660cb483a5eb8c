use crate::types::{AdapterConfig, DataKey, ValuationFeed};
use shared::errors::Error;
use soroban_sdk::Env;

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &AdapterConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<AdapterConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_feed(env: &Env, startup_id: u64, feed: &ValuationFeed) {
    env.storage()
        .persistent()
        .set(&DataKey::Feed(startup_id), feed);
}

pub fn get_feed(env: &Env, startup_id: u64) -> Result<ValuationFeed, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Feed(startup_id))
        .ok_or(Error::FeedUnavailable)
}

use shared::types::Amount;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdapterConfig {
    pub registry: Address,
    /// Minimum seconds between two valuation writes for a startup
    pub update_interval: u64,
    /// Extra age tolerated on feed data beyond `update_interval`
    pub grace_period: u64,
    /// Largest accepted move relative to the last price, in percent
    pub max_change_pct: u32,
}

/// Price feed bound to a startup.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValuationFeed {
    pub feed: Address,
    pub decimals: u32,
    pub is_active: bool,
    /// Last accepted answer, seeded when the feed is set
    pub last_price: Amount,
    /// Zero until the first successful update
    pub last_update_timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Feed(u64),
}

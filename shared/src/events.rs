use soroban_sdk::{symbol_short, Symbol};

// Registry events
pub const STARTUP_REGISTERED: Symbol = symbol_short!("registerd");
pub const STARTUP_VALIDATED: Symbol = symbol_short!("validated");
pub const SHARES_ISSUED: Symbol = symbol_short!("issued");
pub const SHARES_TRANSFERRED: Symbol = symbol_short!("transfer");
pub const VALUATION_UPDATED: Symbol = symbol_short!("val_upd");
pub const UPDATER_SET: Symbol = symbol_short!("upd_set");
pub const SNAPSHOT_TAKEN: Symbol = symbol_short!("snapshot");

// Investment pool events
pub const INVESTMENT_MADE: Symbol = symbol_short!("invest");
pub const PROFIT_DISTRIBUTED: Symbol = symbol_short!("profit");
pub const PROFIT_CLAIMED: Symbol = symbol_short!("claimed");

// Governance events
pub const PROPOSAL_CREATED: Symbol = symbol_short!("prop_new");
pub const VOTE_CAST: Symbol = symbol_short!("voted");
pub const PROPOSAL_EXECUTED: Symbol = symbol_short!("prop_exec");

// Valuation oracle events
pub const FEED_SET: Symbol = symbol_short!("feed_set");
pub const FEED_STATUS: Symbol = symbol_short!("feed_stat");
pub const CONTRACT_PAUSED: Symbol = symbol_short!("paused");
pub const CONTRACT_UNPAUSED: Symbol = symbol_short!("unpaused");

// Data oracle events
pub const REQUEST_CREATED: Symbol = symbol_short!("req_new");
pub const REQUEST_FULFILLED: Symbol = symbol_short!("req_ok");
pub const REQUEST_FAILED: Symbol = symbol_short!("req_fail");
pub const REQUEST_EXPIRED: Symbol = symbol_short!("req_exp");
pub const METRICS_VALIDATED: Symbol = symbol_short!("m_valid");
pub const VERIFICATION_COMPLETED: Symbol = symbol_short!("verified");

// Access control / configuration
pub const ROLE_GRANTED: Symbol = symbol_short!("role_add");
pub const ROLE_REVOKED: Symbol = symbol_short!("role_rem");
pub const CONFIG_UPDATED: Symbol = symbol_short!("config");

/// Basis point denominator for fee math
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Upper bound on the investment fee (10%)
pub const MAX_FEE_BPS: u32 = 1_000;

/// Default voting window for proposals (7 days)
pub const DEFAULT_VOTING_PERIOD: u64 = 7 * 24 * 60 * 60;

/// Default minimum share balance required to open a proposal
pub const DEFAULT_MIN_PROPOSAL_SHARES: i128 = 1;

/// Default cooldown between valuation updates (1 day)
pub const DEFAULT_UPDATE_INTERVAL: u64 = 24 * 60 * 60;

/// Default tolerance on feed data age beyond the update interval (1 hour)
pub const DEFAULT_GRACE_PERIOD: u64 = 60 * 60;

/// Default maximum relative valuation move per update, in percent
pub const DEFAULT_MAX_CHANGE_PCT: u32 = 30;

/// Highest number of decimals accepted from a price feed
pub const MAX_FEED_DECIMALS: u32 = 18;

/// Default gas budget handed to the compute network for a callback
pub const DEFAULT_CALLBACK_GAS_LIMIT: u32 = 300_000;

/// Default re-request interval for periodic metrics oracles (1 day)
pub const DEFAULT_METRICS_REQUEST_INTERVAL: u64 = 24 * 60 * 60;

/// Age after which a pending oracle request may be expired (1 day)
pub const REQUEST_TIMEOUT: u64 = 24 * 60 * 60;

/// Upper bound on an advisory confidence score
pub const MAX_CONFIDENCE_SCORE: u32 = 100;

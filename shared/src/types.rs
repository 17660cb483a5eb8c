use soroban_sdk::{contracttype, Address, BytesN, String, Symbol, Vec};

/// Token amounts and share counts, in base units
pub type Amount = i128;

/// Correlation id assigned by the compute network router
pub type RequestId = BytesN<32>;

/// A registered fundraising subject.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Startup {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub total_shares: Amount,
    pub available_shares: Amount,
    pub valuation: Amount,
    pub founder: Address,
    pub is_validated: bool,
    pub created_at: u64,
}

impl Startup {
    /// Shares held by investors (total minus the unissued remainder)
    pub fn issued_shares(&self) -> Amount {
        self.total_shares - self.available_shares
    }
}

/// Latest answer published by a price feed
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub answer: i128,
    pub updated_at: u64,
}

/// Role classes checked before any state mutation
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Validator = 0,
    TrustedIssuer = 1,
    MetricsProvider = 2,
    MetricsValidator = 3,
    Verifier = 4,
}

/// What an oracle record is keyed by.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Subject {
    Startup(u64),
    Account(Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RequestState {
    Pending = 0,
    Fulfilled = 1,
    Failed = 2,
    Expired = 3,
}

/// A pending or resolved request to the off-ledger compute network.
///
/// `stage` is the index of the source the request was issued against; only
/// multi-stage oracles use values other than zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleRequest {
    pub subject: Subject,
    pub requester: Address,
    pub created_at: u64,
    pub stage: u32,
    pub state: RequestState,
}

/// Connection settings for the compute network.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleConfig {
    pub router: Address,
    pub subscription_id: u64,
    pub network_id: BytesN<32>,
    pub callback_gas_limit: u32,
    pub min_request_interval: u64,
    /// Source program identifiers, indexed by stage
    pub sources: Vec<Symbol>,
}

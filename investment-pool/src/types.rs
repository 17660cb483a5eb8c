use shared::types::Amount;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub registry: Address,
    pub payment_token: Address,
    pub fee_collector: Address,
    pub fee_bps: u32,
    pub min_investment: Amount,
}

/// One completed investment. Appended per (startup, investor), never edited.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentRecord {
    pub startup_id: u64,
    pub investor: Address,
    pub amount: Amount,
    pub fee: Amount,
    pub net_amount: Amount,
    pub shares: Amount,
    pub timestamp: u64,
}

/// Running sums per startup; `gross == net + fees` always holds
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InvestmentTotals {
    pub gross: Amount,
    pub net: Amount,
    pub fees: Amount,
    pub count: u32,
}

/// Escrowed profit waiting to be pulled by holders. Entitlements follow the
/// registry balances frozen under `snapshot_id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Distribution {
    pub startup_id: u64,
    pub distribution_id: u64,
    pub total_amount: Amount,
    pub per_share_amount: Amount,
    pub issued_shares: Amount,
    pub snapshot_id: u64,
    pub claimed_amount: Amount,
    pub created_at: u64,
}

impl Distribution {
    pub fn remaining(&self) -> Amount {
        self.total_amount - self.claimed_amount
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    /// (startup_id, investor) -> Vec<InvestmentRecord>
    History(u64, Address),
    Totals(u64),
    DistributionCounter(u64),
    Distribution(u64, u64),
    /// (startup_id, distribution_id, holder) -> claimed marker
    Claimed(u64, u64, Address),
}

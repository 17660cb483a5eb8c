#![no_std]

use shared::{
    access,
    constants::MAX_FEE_BPS,
    errors::Error,
    events::{CONFIG_UPDATED, INVESTMENT_MADE, PROFIT_CLAIMED, PROFIT_DISTRIBUTED},
    interfaces::{
        fetch_balance, fetch_balance_at, fetch_startup, issue_shares, take_snapshot,
        ShareRegistryClient,
    },
    pausable,
    types::Amount,
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, token::TokenClient, Address, Env, Vec,
};

mod math;
mod storage;
mod types;


pub use types::{Distribution, InvestmentRecord, InvestmentTotals, PoolConfig};

use storage::*;

contractmeta!(
    key = "name",
    val = "Investment Pool Contract"
);

#[contract]
pub struct InvestmentPool;

#[contractimpl]
impl InvestmentPool {
    /// Initialize the pool
    ///
    /// # Arguments
    /// * `owner` - Address allowed to change fees and limits
    /// * `registry` - Share registry this pool issues shares through
    /// * `payment_token` - Token investments and profits are paid in
    /// * `fee_collector` - Receives the platform fee
    /// * `fee_bps` - Fee in basis points, at most 1000
    /// * `min_investment` - Smallest accepted payment
    pub fn initialize(
        env: Env,
        owner: Address,
        registry: Address,
        payment_token: Address,
        fee_collector: Address,
        fee_bps: u32,
        min_investment: Amount,
    ) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        if fee_bps > MAX_FEE_BPS {
            return Err(Error::FeeTooHigh);
        }
        if min_investment < 0 {
            return Err(Error::InvalidAmount);
        }

        access::init_owner(&env, &owner)?;
        set_config(
            &env,
            &PoolConfig {
                registry,
                payment_token,
                fee_collector,
                fee_bps,
                min_investment,
            },
        );
        Ok(())
    }

    // ==================== Configuration ====================

    pub fn set_fee_bps(env: Env, fee_bps: u32) -> Result<(), Error> {
        access::require_owner(&env)?;
        if fee_bps > MAX_FEE_BPS {
            return Err(Error::FeeTooHigh);
        }
        let mut config = get_config(&env)?;
        config.fee_bps = fee_bps;
        set_config(&env, &config);
        env.events()
            .publish((CONFIG_UPDATED,), (config.fee_bps, config.min_investment));
        Ok(())
    }

    pub fn set_min_investment(env: Env, min_investment: Amount) -> Result<(), Error> {
        access::require_owner(&env)?;
        if min_investment < 0 {
            return Err(Error::InvalidAmount);
        }
        let mut config = get_config(&env)?;
        config.min_investment = min_investment;
        set_config(&env, &config);
        env.events()
            .publish((CONFIG_UPDATED,), (config.fee_bps, config.min_investment));
        Ok(())
    }

    pub fn set_fee_collector(env: Env, fee_collector: Address) -> Result<(), Error> {
        access::require_owner(&env)?;
        let mut config = get_config(&env)?;
        config.fee_collector = fee_collector;
        set_config(&env, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, Error> {
        get_config(&env)
    }

    /// Stop new investments (owner only). Distributions and claims continue.
    pub fn pause(env: Env) -> Result<(), Error> {
        pausable::pause(&env)
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        pausable::unpause(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }

    // ==================== Investment ====================

    /// Buy shares of a validated startup at its current valuation.
    ///
    /// Shares are issued and the investment recorded before any tokens move;
    /// the net amount then goes to the founder and the fee to the collector.
    /// Returns the number of shares granted.
    pub fn invest(
        env: Env,
        investor: Address,
        startup_id: u64,
        payment_amount: Amount,
    ) -> Result<Amount, Error> {
        pausable::require_not_paused(&env)?;
        investor.require_auth();
        let config = get_config(&env)?;

        let registry = ShareRegistryClient::new(&env, &config.registry);
        let startup = fetch_startup(&registry, startup_id)?;

        if !startup.is_validated {
            return Err(Error::StartupNotValidated);
        }
        if payment_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if payment_amount < config.min_investment {
            return Err(Error::BelowMinInvestment);
        }

        let quote = math::quote(
            payment_amount,
            config.fee_bps,
            startup.total_shares,
            startup.valuation,
        )?;
        if quote.shares == 0 {
            return Err(Error::ZeroShares);
        }
        if quote.shares > startup.available_shares {
            log!(
                &env,
                "not enough shares available",
                quote.shares,
                startup.available_shares
            );
            return Err(Error::InsufficientShares);
        }

        // Ledger writes first
        issue_shares(
            &registry,
            &env.current_contract_address(),
            startup_id,
            &investor,
            quote.shares,
        )?;

        let now = env.ledger().timestamp();
        append_record(
            &env,
            &InvestmentRecord {
                startup_id,
                investor: investor.clone(),
                amount: payment_amount,
                fee: quote.fee,
                net_amount: quote.net,
                shares: quote.shares,
                timestamp: now,
            },
        );

        let mut totals = get_totals(&env, startup_id);
        totals.gross = totals
            .gross
            .checked_add(payment_amount)
            .ok_or(Error::ArithmeticOverflow)?;
        totals.net = totals
            .net
            .checked_add(quote.net)
            .ok_or(Error::ArithmeticOverflow)?;
        totals.fees = totals
            .fees
            .checked_add(quote.fee)
            .ok_or(Error::ArithmeticOverflow)?;
        totals.count = totals.count.saturating_add(1);
        set_totals(&env, startup_id, &totals);

        env.events().publish(
            (INVESTMENT_MADE, startup_id),
            (investor.clone(), quote.shares, payment_amount),
        );

        // Value transfers last
        let token = TokenClient::new(&env, &config.payment_token);
        token.transfer(&investor, &startup.founder, &quote.net);
        if quote.fee > 0 {
            token.transfer(&investor, &config.fee_collector, &quote.fee);
        }

        Ok(quote.shares)
    }

    // ==================== Profit distribution ====================

    /// Escrow `amount` of profit for pro-rata claims by the current holders.
    ///
    /// `per_share_amount = amount / issued_shares`, truncated. Balances are
    /// snapshotted in the registry so later issues and transfers do not change
    /// who is owed. Holders pull their part with [`InvestmentPool::claim`].
    /// Returns the distribution id.
    pub fn distribute_profit(
        env: Env,
        founder: Address,
        startup_id: u64,
        amount: Amount,
    ) -> Result<u64, Error> {
        founder.require_auth();
        let config = get_config(&env)?;

        let registry = ShareRegistryClient::new(&env, &config.registry);
        let startup = fetch_startup(&registry, startup_id)?;
        if startup.founder != founder {
            return Err(Error::NotFounder);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let issued_shares = startup.issued_shares();
        if issued_shares == 0 {
            return Err(Error::NoIssuedShares);
        }
        let per_share_amount = amount / issued_shares;
        if per_share_amount == 0 {
            return Err(Error::DistributionTooSmall);
        }

        let snapshot_id = take_snapshot(&registry, &env.current_contract_address(), startup_id)?;
        let distribution_id = next_distribution_id(&env, startup_id)?;
        let now = env.ledger().timestamp();
        set_distribution(
            &env,
            &Distribution {
                startup_id,
                distribution_id,
                total_amount: amount,
                per_share_amount,
                issued_shares,
                snapshot_id,
                claimed_amount: 0,
                created_at: now,
            },
        );

        env.events().publish(
            (PROFIT_DISTRIBUTED, startup_id),
            (distribution_id, amount, now),
        );

        let token = TokenClient::new(&env, &config.payment_token);
        token.transfer(&founder, &env.current_contract_address(), &amount);

        Ok(distribution_id)
    }

    /// Pull a holder's share of a distribution. One claim per holder.
    ///
    /// The payout uses the holder's balance when the distribution was made.
    pub fn claim(
        env: Env,
        holder: Address,
        startup_id: u64,
        distribution_id: u64,
    ) -> Result<Amount, Error> {
        holder.require_auth();
        let config = get_config(&env)?;

        let mut distribution = get_distribution(&env, startup_id, distribution_id)?;
        if has_claimed(&env, startup_id, distribution_id, &holder) {
            return Err(Error::AlreadyClaimed);
        }

        let registry = ShareRegistryClient::new(&env, &config.registry);
        let balance =
            fetch_balance_at(&registry, startup_id, &holder, distribution.snapshot_id)?;
        let payout = math::payout(balance, distribution.per_share_amount)?;
        if payout == 0 {
            return Err(Error::NothingToClaim);
        }
        if payout > distribution.remaining() {
            return Err(Error::EscrowExhausted);
        }

        set_claimed(&env, startup_id, distribution_id, &holder);
        distribution.claimed_amount += payout;
        set_distribution(&env, &distribution);

        env.events().publish(
            (PROFIT_CLAIMED, startup_id),
            (distribution_id, holder.clone(), payout),
        );

        let token = TokenClient::new(&env, &config.payment_token);
        token.transfer(&env.current_contract_address(), &holder, &payout);

        Ok(payout)
    }

    // ==================== Reads ====================

    pub fn get_investor_shares(env: Env, startup_id: u64, investor: Address) -> Result<Amount, Error> {
        let config = get_config(&env)?;
        let registry = ShareRegistryClient::new(&env, &config.registry);
        fetch_balance(&registry, startup_id, &investor)
    }

    pub fn get_investment_history(env: Env, startup_id: u64, investor: Address) -> Vec<InvestmentRecord> {
        get_history(&env, startup_id, &investor)
    }

    /// Gross amount invested in a startup through this pool
    pub fn get_total_investment(env: Env, startup_id: u64) -> Amount {
        get_totals(&env, startup_id).gross
    }

    pub fn get_investment_totals(env: Env, startup_id: u64) -> InvestmentTotals {
        get_totals(&env, startup_id)
    }

    pub fn get_distribution(
        env: Env,
        startup_id: u64,
        distribution_id: u64,
    ) -> Result<Distribution, Error> {
        get_distribution(&env, startup_id, distribution_id)
    }

    pub fn distribution_count(env: Env, startup_id: u64) -> u64 {
        distribution_count(&env, startup_id)
    }

    pub fn has_claimed(env: Env, startup_id: u64, distribution_id: u64, holder: Address) -> bool {
        has_claimed(&env, startup_id, distribution_id, &holder)
    }

    /// What `holder` would receive by claiming now
    pub fn get_claimable(
        env: Env,
        startup_id: u64,
        distribution_id: u64,
        holder: Address,
    ) -> Result<Amount, Error> {
        let config = get_config(&env)?;
        let distribution = get_distribution(&env, startup_id, distribution_id)?;
        if has_claimed(&env, startup_id, distribution_id, &holder) {
            return Ok(0);
        }
        let registry = ShareRegistryClient::new(&env, &config.registry);
        let balance =
            fetch_balance_at(&registry, startup_id, &holder, distribution.snapshot_id)?;
        let payout = math::payout(balance, distribution.per_share_amount)?;
        Ok(payout.min(distribution.remaining()))
    }
}

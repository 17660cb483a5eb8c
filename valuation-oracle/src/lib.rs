#![no_std]

use shared::{
    access,
    constants::{
        DEFAULT_GRACE_PERIOD, DEFAULT_MAX_CHANGE_PCT, DEFAULT_UPDATE_INTERVAL, MAX_FEED_DECIMALS,
    },
    errors::Error,
    events::{CONFIG_UPDATED, FEED_SET, FEED_STATUS, VALUATION_UPDATED},
    interfaces::{fetch_startup, push_valuation, PriceFeedClient, ShareRegistryClient},
    pausable,
    types::{Amount, RoundData},
};
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

mod storage;
mod types;
mod validation;


pub use types::{AdapterConfig, ValuationFeed};

use storage::*;

contractmeta!(
    key = "name",
    val = "Valuation Oracle Adapter"
);

/// Pulls a startup's valuation from its price feed into the share registry
/// once the update guards pass. Must hold the registry's valuation-updater
/// capability.
#[contract]
pub struct ValuationOracle;

fn read_round(env: &Env, feed: &Address) -> Result<RoundData, Error> {
    match PriceFeedClient::new(env, feed).try_latest_round() {
        Ok(Ok(round)) => Ok(round),
        _ => Err(Error::InvalidFeed),
    }
}

#[contractimpl]
impl ValuationOracle {
    pub fn initialize(env: Env, owner: Address, registry: Address) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        access::init_owner(&env, &owner)?;

        set_config(
            &env,
            &AdapterConfig {
                registry,
                update_interval: DEFAULT_UPDATE_INTERVAL,
                grace_period: DEFAULT_GRACE_PERIOD,
                max_change_pct: DEFAULT_MAX_CHANGE_PCT,
            },
        );
        Ok(())
    }

    pub fn update_config(
        env: Env,
        update_interval: u64,
        grace_period: u64,
        max_change_pct: u32,
    ) -> Result<(), Error> {
        access::require_owner(&env)?;
        if max_change_pct == 0 {
            return Err(Error::InvalidConfig);
        }

        let mut config = get_config(&env)?;
        config.update_interval = update_interval;
        config.grace_period = grace_period;
        config.max_change_pct = max_change_pct;
        set_config(&env, &config);

        env.events().publish(
            (CONFIG_UPDATED,),
            (update_interval, grace_period, max_change_pct),
        );
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<AdapterConfig, Error> {
        get_config(&env)
    }

    /// Bind a price feed to a startup (owner only).
    ///
    /// The feed must report at most 18 decimals and a positive answer; that
    /// answer becomes the reference price for the first magnitude check.
    /// Replacing a feed resets the cooldown.
    pub fn set_price_feed(env: Env, startup_id: u64, feed: Address) -> Result<(), Error> {
        access::require_owner(&env)?;
        let config = get_config(&env)?;

        if feed == env.current_contract_address() {
            return Err(Error::InvalidFeed);
        }

        let registry = ShareRegistryClient::new(&env, &config.registry);
        fetch_startup(&registry, startup_id)?;

        let decimals = match PriceFeedClient::new(&env, &feed).try_decimals() {
            Ok(Ok(decimals)) if decimals <= MAX_FEED_DECIMALS => decimals,
            _ => return Err(Error::InvalidFeed),
        };
        let round = read_round(&env, &feed)?;
        if round.answer <= 0 {
            return Err(Error::InvalidFeed);
        }

        set_feed(
            &env,
            startup_id,
            &ValuationFeed {
                feed: feed.clone(),
                decimals,
                is_active: true,
                last_price: round.answer,
                last_update_timestamp: 0,
            },
        );

        env.events()
            .publish((FEED_SET, startup_id), (feed, decimals, round.answer));
        Ok(())
    }

    pub fn set_feed_status(env: Env, startup_id: u64, active: bool) -> Result<(), Error> {
        access::require_owner(&env)?;
        let mut feed = get_feed(&env, startup_id)?;
        feed.is_active = active;
        set_feed(&env, startup_id, &feed);

        env.events().publish((FEED_STATUS, startup_id), active);
        Ok(())
    }

    /// Write the feed's latest answer into the registry as the startup's new
    /// valuation. Anyone may trigger it; the guards decide whether it lands.
    pub fn update_valuation(env: Env, startup_id: u64) -> Result<Amount, Error> {
        pausable::require_not_paused(&env)?;
        let config = get_config(&env)?;

        let mut feed = get_feed(&env, startup_id)?;
        if !feed.is_active {
            return Err(Error::FeedUnavailable);
        }

        let now = env.ledger().timestamp();
        validation::validate_interval(&config, &feed, now)?;

        let round = read_round(&env, &feed.feed)?;
        validation::validate_round(&config, &round, now)?;
        if let Err(err) =
            validation::validate_change(feed.last_price, round.answer, config.max_change_pct)
        {
            log!(&env, "valuation move rejected", feed.last_price, round.answer);
            return Err(err);
        }

        let registry = ShareRegistryClient::new(&env, &config.registry);
        push_valuation(
            &registry,
            &env.current_contract_address(),
            startup_id,
            round.answer,
        )?;

        let old_price = feed.last_price;
        feed.last_price = round.answer;
        feed.last_update_timestamp = now;
        set_feed(&env, startup_id, &feed);

        env.events().publish(
            (VALUATION_UPDATED, startup_id),
            (old_price, round.answer, now),
        );

        Ok(round.answer)
    }

    /// Current answer of the startup's feed, without any guard applied
    pub fn get_latest_valuation(env: Env, startup_id: u64) -> Result<Amount, Error> {
        let feed = get_feed(&env, startup_id)?;
        Ok(read_round(&env, &feed.feed)?.answer)
    }

    pub fn get_feed(env: Env, startup_id: u64) -> Result<ValuationFeed, Error> {
        get_feed(&env, startup_id)
    }

    pub fn pause(env: Env) -> Result<(), Error> {
        pausable::pause(&env)
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        pausable::unpause(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }
}

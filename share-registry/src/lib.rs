#![no_std]

use shared::{
    access,
    errors::Error,
    events::{
        SHARES_ISSUED, SHARES_TRANSFERRED, SNAPSHOT_TAKEN, STARTUP_REGISTERED, STARTUP_VALIDATED,
        UPDATER_SET, VALUATION_UPDATED,
    },
    types::{Amount, Role, Startup},
};
use soroban_sdk::{contract, contractimpl, contractmeta, Address, Env, String};

mod storage;
mod validation;

#[cfg(test)]
mod tests;

use storage::*;

contractmeta!(
    key = "name",
    val = "Share Registry Contract"
);

#[contract]
pub struct ShareRegistry;

#[contractimpl]
impl ShareRegistry {
    /// Initialize the registry with its owner
    pub fn initialize(env: Env, owner: Address) -> Result<(), Error> {
        owner.require_auth();
        access::init_owner(&env, &owner)
    }

    /// Register a new startup
    ///
    /// # Arguments
    /// * `founder` - Address of the founder, who authorizes the call
    /// * `name` - Display name, must not be empty
    /// * `description` - Free-form description
    /// * `total_shares` - Fixed share count, must be positive
    /// * `initial_valuation` - Valuation in base units, must be positive
    pub fn register_startup(
        env: Env,
        founder: Address,
        name: String,
        description: String,
        total_shares: Amount,
        initial_valuation: Amount,
    ) -> Result<u64, Error> {
        access::get_owner(&env)?;
        founder.require_auth();

        if name.len() == 0 {
            return Err(Error::EmptyName);
        }
        if total_shares <= 0 {
            return Err(Error::InvalidShareCount);
        }
        if initial_valuation <= 0 {
            return Err(Error::InvalidValuation);
        }

        let id = next_startup_id(&env)?;
        let startup = Startup {
            id,
            name: name.clone(),
            description,
            total_shares,
            available_shares: total_shares,
            valuation: initial_valuation,
            founder: founder.clone(),
            is_validated: false,
            created_at: env.ledger().timestamp(),
        };
        set_startup(&env, &startup);

        env.events().publish(
            (STARTUP_REGISTERED, id),
            (founder, name, total_shares, initial_valuation),
        );

        Ok(id)
    }

    // ==================== Roles ====================

    pub fn add_validator(env: Env, validator: Address) -> Result<(), Error> {
        access::grant_role(&env, Role::Validator, &validator)
    }

    pub fn remove_validator(env: Env, validator: Address) -> Result<(), Error> {
        access::revoke_role(&env, Role::Validator, &validator)
    }

    pub fn add_trusted_issuer(env: Env, issuer: Address) -> Result<(), Error> {
        access::grant_role(&env, Role::TrustedIssuer, &issuer)
    }

    pub fn remove_trusted_issuer(env: Env, issuer: Address) -> Result<(), Error> {
        access::revoke_role(&env, Role::TrustedIssuer, &issuer)
    }

    /// Grant the valuation-updater capability (owner only). There is at most
    /// one updater; setting a new one replaces the previous holder.
    pub fn set_valuation_updater(env: Env, updater: Address) -> Result<(), Error> {
        access::require_owner(&env)?;
        storage::set_valuation_updater(&env, &updater);
        env.events().publish((UPDATER_SET,), updater);
        Ok(())
    }

    /// Mark a startup eligible (or ineligible) for investment.
    ///
    /// Any single validator decides; there is no quorum.
    pub fn validate_startup(
        env: Env,
        validator: Address,
        startup_id: u64,
        approve: bool,
    ) -> Result<(), Error> {
        validator.require_auth();
        validation::validate_validator(&env, &validator)?;

        let mut startup = get_startup(&env, startup_id)?;
        startup.is_validated = approve;
        set_startup(&env, &startup);

        env.events()
            .publish((STARTUP_VALIDATED, startup_id), (validator, approve));

        Ok(())
    }

    // ==================== Shares ====================

    /// Issue unallocated shares to `recipient`
    ///
    /// # Arguments
    /// * `issuer` - Founder of the startup or a trusted issuer
    /// * `startup_id` - Startup identifier
    /// * `recipient` - Address credited with the shares
    /// * `amount` - Number of shares, at most the available remainder
    pub fn issue_shares(
        env: Env,
        issuer: Address,
        startup_id: u64,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), Error> {
        issuer.require_auth();

        let mut startup = get_startup(&env, startup_id)?;
        validation::validate_issuer(&env, &startup, &issuer)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if amount > startup.available_shares {
            return Err(Error::InsufficientShares);
        }

        let balance = get_balance(&env, startup_id, &recipient)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        startup.available_shares -= amount;
        set_startup(&env, &startup);
        set_balance(&env, startup_id, &recipient, balance);

        env.events()
            .publish((SHARES_ISSUED, startup_id), (issuer, recipient, amount));

        Ok(())
    }

    /// Move shares between holders
    pub fn transfer_shares(
        env: Env,
        from: Address,
        startup_id: u64,
        to: Address,
        amount: Amount,
    ) -> Result<(), Error> {
        from.require_auth();
        get_startup(&env, startup_id)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let from_balance = get_balance(&env, startup_id, &from);
        if amount > from_balance {
            return Err(Error::InsufficientBalance);
        }

        if from != to {
            let to_balance = get_balance(&env, startup_id, &to)
                .checked_add(amount)
                .ok_or(Error::ArithmeticOverflow)?;
            set_balance(&env, startup_id, &from, from_balance - amount);
            set_balance(&env, startup_id, &to, to_balance);
        }

        env.events()
            .publish((SHARES_TRANSFERRED, startup_id), (from, to, amount));

        Ok(())
    }

    /// Freeze the current balances of a startup's holders under a new
    /// snapshot id. Same authority as issuing shares.
    pub fn snapshot(env: Env, caller: Address, startup_id: u64) -> Result<u64, Error> {
        caller.require_auth();

        let startup = get_startup(&env, startup_id)?;
        validation::validate_issuer(&env, &startup, &caller)?;

        let snapshot_id = next_snapshot_id(&env, startup_id)?;
        env.events()
            .publish((SNAPSHOT_TAKEN, startup_id), (caller, snapshot_id));

        Ok(snapshot_id)
    }

    // ==================== Valuation ====================

    /// Set a new valuation. Callable by the founder, or by the valuation
    /// oracle holding the updater capability.
    pub fn update_valuation(
        env: Env,
        caller: Address,
        startup_id: u64,
        new_valuation: Amount,
    ) -> Result<(), Error> {
        caller.require_auth();

        let mut startup = get_startup(&env, startup_id)?;
        validation::validate_valuation_caller(&env, &startup, &caller)?;

        if new_valuation <= 0 {
            return Err(Error::InvalidValuation);
        }

        let old_valuation = startup.valuation;
        startup.valuation = new_valuation;
        set_startup(&env, &startup);

        env.events().publish(
            (VALUATION_UPDATED, startup_id),
            (old_valuation, new_valuation),
        );

        Ok(())
    }

    // ==================== Reads ====================

    pub fn get_startup_details(env: Env, startup_id: u64) -> Result<Startup, Error> {
        get_startup(&env, startup_id)
    }

    pub fn get_startup_valuation(env: Env, startup_id: u64) -> Result<Amount, Error> {
        Ok(get_startup(&env, startup_id)?.valuation)
    }

    /// Share balance of `holder`; fails only on an unknown startup
    pub fn balance_of(env: Env, startup_id: u64, holder: Address) -> Result<Amount, Error> {
        get_startup(&env, startup_id)?;
        Ok(get_balance(&env, startup_id, &holder))
    }

    /// Share balance of `holder` when `snapshot_id` was taken
    pub fn balance_of_at(
        env: Env,
        startup_id: u64,
        holder: Address,
        snapshot_id: u64,
    ) -> Result<Amount, Error> {
        get_startup(&env, startup_id)?;
        if snapshot_id == 0 || snapshot_id > current_snapshot(&env, startup_id) {
            return Err(Error::InvalidInput);
        }
        Ok(get_balance_at(&env, startup_id, &holder, snapshot_id))
    }

    pub fn get_issued_shares(env: Env, startup_id: u64) -> Result<Amount, Error> {
        Ok(get_startup(&env, startup_id)?.issued_shares())
    }

    pub fn startup_count(env: Env) -> u64 {
        startup_count(&env)
    }

    pub fn is_validator(env: Env, account: Address) -> bool {
        access::has_role(&env, Role::Validator, &account)
    }

    pub fn is_trusted_issuer(env: Env, account: Address) -> bool {
        access::has_role(&env, Role::TrustedIssuer, &account)
    }

    pub fn get_valuation_updater(env: Env) -> Option<Address> {
        storage::get_valuation_updater(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, Error> {
        access::get_owner(&env)
    }
}

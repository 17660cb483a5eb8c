use shared::access::has_role;
use shared::errors::Error;
use shared::types::{Role, Startup};
use soroban_sdk::{Address, Env};

use crate::storage::get_valuation_updater;

/// Founder or any trusted issuer may issue shares
pub fn validate_issuer(env: &Env, startup: &Startup, issuer: &Address) -> Result<(), Error> {
    if startup.founder == *issuer || has_role(env, Role::TrustedIssuer, issuer) {
        Ok(())
    } else {
        Err(Error::NotIssuer)
    }
}

/// Founder directly, or the valuation oracle acting under the updater capability
pub fn validate_valuation_caller(
    env: &Env,
    startup: &Startup,
    caller: &Address,
) -> Result<(), Error> {
    if startup.founder == *caller {
        return Ok(());
    }
    match get_valuation_updater(env) {
        Some(updater) if updater == *caller => Ok(()),
        _ => Err(Error::NotValuationUpdater),
    }
}

pub fn validate_validator(env: &Env, validator: &Address) -> Result<(), Error> {
    if has_role(env, Role::Validator, validator) {
        Ok(())
    } else {
        Err(Error::NotValidator)
    }
}

use crate::access::require_owner;
use crate::errors::Error;
use crate::events::{CONTRACT_PAUSED, CONTRACT_UNPAUSED};
use soroban_sdk::{contracttype, Env};

#[contracttype]
#[derive(Clone)]
enum PauseKey {
    Paused,
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&PauseKey::Paused)
        .unwrap_or(false)
}

/// Fails with [`Error::Paused`] while the switch is on
pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if is_paused(env) {
        return Err(Error::Paused);
    }
    Ok(())
}

/// Owner-only. Pausing an already paused contract is a no-op.
pub fn pause(env: &Env) -> Result<(), Error> {
    let owner = require_owner(env)?;
    env.storage().instance().set(&PauseKey::Paused, &true);
    env.events()
        .publish((CONTRACT_PAUSED,), (owner, env.ledger().timestamp()));
    Ok(())
}

pub fn unpause(env: &Env) -> Result<(), Error> {
    let owner = require_owner(env)?;
    env.storage().instance().set(&PauseKey::Paused, &false);
    env.events()
        .publish((CONTRACT_UNPAUSED,), (owner, env.ledger().timestamp()));
    Ok(())
}

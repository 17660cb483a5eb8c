//! Owner and role bookkeeping shared by every contract.
//!
//! Role membership is stored as one persistent entry per (role, member) pair
//! so that membership checks never load a whole list.

use crate::errors::Error;
use crate::events::{ROLE_GRANTED, ROLE_REVOKED};
use crate::types::Role;
use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum AccessKey {
    ContractOwner,
    RoleMember(Role, Address),
}

/// Store the contract owner. Fails if an owner was already recorded.
pub fn init_owner(env: &Env, owner: &Address) -> Result<(), Error> {
    if has_owner(env) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&AccessKey::ContractOwner, owner);
    Ok(())
}

pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&AccessKey::ContractOwner)
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&AccessKey::ContractOwner)
        .ok_or(Error::NotInitialized)
}

/// Load the owner and require its authorization
pub fn require_owner(env: &Env) -> Result<Address, Error> {
    let owner = get_owner(env)?;
    owner.require_auth();
    Ok(owner)
}

pub fn has_role(env: &Env, role: Role, member: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&AccessKey::RoleMember(role, member.clone()))
}

/// Require `member` to authorize the call and to hold `role`
pub fn require_role(env: &Env, role: Role, member: &Address) -> Result<(), Error> {
    member.require_auth();
    if !has_role(env, role, member) {
        return Err(Error::MissingRole);
    }
    Ok(())
}

/// Owner-only role grant
pub fn grant_role(env: &Env, role: Role, member: &Address) -> Result<(), Error> {
    require_owner(env)?;
    env.storage()
        .persistent()
        .set(&AccessKey::RoleMember(role, member.clone()), &true);
    env.events()
        .publish((ROLE_GRANTED, role as u32), member.clone());
    Ok(())
}

/// Owner-only role revocation; revoking an absent member is a no-op
pub fn revoke_role(env: &Env, role: Role, member: &Address) -> Result<(), Error> {
    require_owner(env)?;
    env.storage()
        .persistent()
        .remove(&AccessKey::RoleMember(role, member.clone()));
    env.events()
        .publish((ROLE_REVOKED, role as u32), member.clone());
    Ok(())
}

use crate::types::{DataKey, VerificationStatus};
use shared::errors::Error;
use shared::types::RequestId;
use soroban_sdk::{Address, Env};

pub fn get_status(env: &Env, user: &Address) -> Result<VerificationStatus, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Status(user.clone()))
        .ok_or(Error::NoDataAvailable)
}

pub fn set_status(env: &Env, user: &Address, status: &VerificationStatus) {
    env.storage()
        .persistent()
        .set(&DataKey::Status(user.clone()), status);
}

pub fn get_active(env: &Env, user: &Address) -> Option<RequestId> {
    env.storage().persistent().get(&DataKey::Active(user.clone()))
}

pub fn set_active(env: &Env, user: &Address, request_id: &RequestId) {
    env.storage()
        .persistent()
        .set(&DataKey::Active(user.clone()), request_id);
}

pub fn clear_active(env: &Env, user: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Active(user.clone()));
}

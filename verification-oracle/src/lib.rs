#![no_std]

use shared::{
    access,
    errors::Error,
    events::VERIFICATION_COMPLETED,
    oracle::{self, Resolution},
    types::{OracleConfig, OracleRequest, RequestId, Role, Subject},
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, vec, xdr::ToXdr, Address, Bytes, BytesN, Env,
    String, Symbol, Vec,
};

mod storage;
mod types;

#[cfg(test)]
mod tests;

pub use types::{CredentialPayload, VerificationStatus};

use storage::*;
use types::{AML_FAILED, KYC_FAILED, STAGE_AML, STAGE_CREDENTIAL, STAGE_KYC};

contractmeta!(
    key = "name",
    val = "Identity Verification Oracle"
);

/// Identity verification as a chain of three oracle requests: document check,
/// risk-list screening, then credential issuance. Each successful stage issues
/// the next one; a negative answer ends the chain with a failure marker.
///
/// The router answers by authorizing a `fulfill` call, not by invoking this
/// contract from inside its own frame, since follow-up stages call back into
/// the router.
#[contract]
pub struct VerificationOracle;

fn account(subject: &Subject) -> Result<Address, Error> {
    match subject {
        Subject::Account(user) => Ok(user.clone()),
        Subject::Startup(_) => Err(Error::InvalidInput),
    }
}

fn finish(env: &Env, subject: &Subject, user: &Address, mut status: VerificationStatus) {
    status.is_valid = true;
    status.updated_at = env.ledger().timestamp();
    set_status(env, user, &status);
    clear_active(env, user);
    oracle::append_snapshot(env, subject, status.clone());

    env.events().publish(
        (VERIFICATION_COMPLETED, user.clone()),
        (status.kyc_passed, status.aml_passed, status.source),
    );
}

#[contractimpl]
impl VerificationOracle {
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        router: Address,
        subscription_id: u64,
        network_id: BytesN<32>,
        kyc_source: Symbol,
        aml_source: Symbol,
        credential_source: Symbol,
    ) -> Result<(), Error> {
        owner.require_auth();
        access::init_owner(&env, &owner)?;
        oracle::init_config(
            &env,
            &router,
            subscription_id,
            &network_id,
            &vec![&env, kyc_source, aml_source, credential_source],
            0,
        )
    }

    pub fn update_config(
        env: Env,
        subscription_id: u64,
        network_id: BytesN<32>,
        callback_gas_limit: u32,
        kyc_source: Symbol,
        aml_source: Symbol,
        credential_source: Symbol,
    ) -> Result<(), Error> {
        oracle::update_config(
            &env,
            subscription_id,
            &network_id,
            callback_gas_limit,
            &vec![&env, kyc_source, aml_source, credential_source],
        )
    }

    pub fn set_min_request_interval(env: Env, interval: u64) -> Result<(), Error> {
        oracle::set_min_request_interval(&env, interval)
    }

    pub fn add_verifier(env: Env, verifier: Address) -> Result<(), Error> {
        access::grant_role(&env, Role::Verifier, &verifier)
    }

    pub fn remove_verifier(env: Env, verifier: Address) -> Result<(), Error> {
        access::revoke_role(&env, Role::Verifier, &verifier)
    }

    pub fn is_verifier(env: Env, account: Address) -> bool {
        access::has_role(&env, Role::Verifier, &account)
    }

    /// Start (or restart) verification of `user`. Callbacks belonging to an
    /// earlier chain for the same user are accepted but no longer applied.
    pub fn request_verification(
        env: Env,
        verifier: Address,
        user: Address,
        document_hash: String,
    ) -> Result<RequestId, Error> {
        access::require_role(&env, Role::Verifier, &verifier)?;
        if document_hash.len() == 0 {
            return Err(Error::InvalidInput);
        }

        let args = (user.clone(), document_hash).to_xdr(&env);
        let request_id = oracle::request(&env, &Subject::Account(user.clone()), &verifier, &args)?;

        let empty = String::from_str(&env, "");
        set_status(
            &env,
            &user,
            &VerificationStatus {
                kyc_passed: false,
                aml_passed: false,
                credential_hash: empty.clone(),
                source: empty,
                is_valid: false,
                updated_at: env.ledger().timestamp(),
            },
        );
        set_active(&env, &user, &request_id);

        Ok(request_id)
    }

    /// Router callback. The payload type depends on the stage: `bool` for the
    /// KYC and AML checks, [`CredentialPayload`] for the last one.
    pub fn fulfill(env: Env, request_id: RequestId, response: Bytes, err: Bytes) -> Result<(), Error> {
        let resolution = oracle::resolve(&env, &request_id, &err)?;
        let request = resolution.request().clone();
        let user = account(&request.subject)?;

        if get_active(&env, &user) != Some(request_id.clone()) {
            log!(&env, "callback for superseded verification", user);
            return Ok(());
        }
        if let Resolution::Failed(_) = resolution {
            // Chain stops; the status stays incomplete
            clear_active(&env, &user);
            return Ok(());
        }

        let mut status = get_status(&env, &user)?;
        status.updated_at = env.ledger().timestamp();

        match request.stage {
            STAGE_KYC | STAGE_AML => {
                let passed: bool = oracle::decode(&env, &response)?;
                if !passed {
                    status.source = String::from_str(
                        &env,
                        if request.stage == STAGE_KYC { KYC_FAILED } else { AML_FAILED },
                    );
                    finish(&env, &request.subject, &user, status);
                    return Ok(());
                }

                if request.stage == STAGE_KYC {
                    status.kyc_passed = true;
                } else {
                    status.aml_passed = true;
                }
                set_status(&env, &user, &status);

                let next = oracle::request_stage(
                    &env,
                    &request.subject,
                    &request.requester,
                    request.stage + 1,
                    &user.clone().to_xdr(&env),
                )?;
                set_active(&env, &user, &next);
            }
            STAGE_CREDENTIAL => {
                let payload: CredentialPayload = oracle::decode(&env, &response)?;
                status.credential_hash = payload.credential_hash;
                status.source = payload.source;
                finish(&env, &request.subject, &user, status);
            }
            _ => return Err(Error::InvalidConfig),
        }

        Ok(())
    }

    pub fn expire_request(env: Env, request_id: RequestId) -> Result<(), Error> {
        oracle::expire(&env, &request_id)
    }

    /// Current status, including an unfinished chain
    pub fn get_verification_status(env: Env, user: Address) -> Result<VerificationStatus, Error> {
        get_status(&env, &user)
    }

    /// Most recent finished verification
    pub fn get_latest(env: Env, user: Address) -> Result<VerificationStatus, Error> {
        oracle::latest_snapshot(&env, &Subject::Account(user))
    }

    pub fn get_history(env: Env, user: Address) -> Vec<VerificationStatus> {
        oracle::history(&env, &Subject::Account(user))
    }

    pub fn get_request(env: Env, request_id: RequestId) -> Result<OracleRequest, Error> {
        oracle::get_request(&env, &request_id)
    }

    pub fn get_config(env: Env) -> Result<OracleConfig, Error> {
        oracle::get_config(&env)
    }
}

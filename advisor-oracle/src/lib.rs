#![no_std]

use shared::{
    access,
    constants::MAX_CONFIDENCE_SCORE,
    errors::Error,
    oracle::{self, Resolution},
    types::{OracleConfig, OracleRequest, RequestId, Subject},
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, contracttype, vec, xdr::ToXdr, Address, Bytes, BytesN,
    Env, String, Symbol, Vec,
};


/// Wire format of a fulfilled advisory request
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdvicePayload {
    pub recommendation: String,
    pub confidence_score: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Advice {
    pub recommendation: String,
    pub confidence_score: u32,
    pub timestamp: u64,
}

contractmeta!(
    key = "name",
    val = "Startup Advisor Oracle"
);

#[contract]
pub struct AdvisorOracle;

#[contractimpl]
impl AdvisorOracle {
    /// Connect to the compute network. Advice has no re-request cooldown
    /// until the owner sets one.
    pub fn initialize(
        env: Env,
        owner: Address,
        router: Address,
        subscription_id: u64,
        network_id: BytesN<32>,
        source: Symbol,
    ) -> Result<(), Error> {
        owner.require_auth();
        access::init_owner(&env, &owner)?;
        oracle::init_config(
            &env,
            &router,
            subscription_id,
            &network_id,
            &vec![&env, source],
            0,
        )
    }

    pub fn update_config(
        env: Env,
        subscription_id: u64,
        network_id: BytesN<32>,
        callback_gas_limit: u32,
        source: Symbol,
    ) -> Result<(), Error> {
        oracle::update_config(
            &env,
            subscription_id,
            &network_id,
            callback_gas_limit,
            &vec![&env, source],
        )
    }

    pub fn set_min_request_interval(env: Env, interval: u64) -> Result<(), Error> {
        oracle::set_min_request_interval(&env, interval)
    }

    /// Ask the network for an investment recommendation on a startup
    pub fn request_advice(env: Env, requester: Address, startup_id: u64) -> Result<RequestId, Error> {
        requester.require_auth();
        let args = startup_id.to_xdr(&env);
        oracle::request(&env, &Subject::Startup(startup_id), &requester, &args)
    }

    /// Router callback. `response` is an XDR-encoded [`AdvicePayload`].
    pub fn fulfill(env: Env, request_id: RequestId, response: Bytes, err: Bytes) -> Result<(), Error> {
        let Resolution::Fulfilled(request) = oracle::resolve(&env, &request_id, &err)? else {
            return Ok(());
        };

        let payload: AdvicePayload = oracle::decode(&env, &response)?;
        if payload.confidence_score > MAX_CONFIDENCE_SCORE {
            return Err(Error::MalformedPayload);
        }

        oracle::append_snapshot(
            &env,
            &request.subject,
            Advice {
                recommendation: payload.recommendation,
                confidence_score: payload.confidence_score,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    pub fn expire_request(env: Env, request_id: RequestId) -> Result<(), Error> {
        oracle::expire(&env, &request_id)
    }

    pub fn get_latest_advice(env: Env, startup_id: u64) -> Result<Advice, Error> {
        oracle::latest_snapshot(&env, &Subject::Startup(startup_id))
    }

    pub fn get_all_advice(env: Env, startup_id: u64) -> Vec<Advice> {
        oracle::history(&env, &Subject::Startup(startup_id))
    }

    pub fn get_request(env: Env, request_id: RequestId) -> Result<OracleRequest, Error> {
        oracle::get_request(&env, &request_id)
    }

    pub fn get_config(env: Env) -> Result<OracleConfig, Error> {
        oracle::get_config(&env)
    }
}

#![no_std]

use shared::{
    access,
    constants::DEFAULT_METRICS_REQUEST_INTERVAL,
    errors::Error,
    oracle::{self, Resolution},
    types::{OracleConfig, OracleRequest, RequestId, Subject},
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, contracttype, vec, xdr::ToXdr, Address, Bytes, BytesN,
    Env, Symbol, Vec,
};


/// Number of values in a financial metrics payload
pub const METRIC_COUNT: u32 = 4;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinancialMetrics {
    pub revenue: i128,
    pub user_growth: i128,
    pub market_size: i128,
    pub burn_rate: i128,
    pub timestamp: u64,
}

impl FinancialMetrics {
    /// Build a snapshot from `[revenue, user_growth, market_size, burn_rate]`
    fn from_values(values: &Vec<i128>, timestamp: u64) -> Result<Self, Error> {
        if values.len() != METRIC_COUNT || values.iter().any(|v| v < 0) {
            return Err(Error::MalformedPayload);
        }
        let value = |i: u32| values.get(i).ok_or(Error::MalformedPayload);
        Ok(FinancialMetrics {
            revenue: value(0)?,
            user_growth: value(1)?,
            market_size: value(2)?,
            burn_rate: value(3)?,
            timestamp,
        })
    }
}

contractmeta!(
    key = "name",
    val = "Financial Metrics Oracle"
);

#[contract]
pub struct FinancialOracle;

#[contractimpl]
impl FinancialOracle {
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
            DEFAULT_METRICS_REQUEST_INTERVAL,
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

    /// At most one request per startup per `min_request_interval`
    pub fn request_financial_metrics(
        env: Env,
        requester: Address,
        startup_id: u64,
    ) -> Result<RequestId, Error> {
        requester.require_auth();
        let args = startup_id.to_xdr(&env);
        oracle::request(&env, &Subject::Startup(startup_id), &requester, &args)
    }

    /// Router callback; `response` is an XDR-encoded `Vec<i128>` of four
    /// non-negative values.
    pub fn fulfill(env: Env, request_id: RequestId, response: Bytes, err: Bytes) -> Result<(), Error> {
        let Resolution::Fulfilled(request) = oracle::resolve(&env, &request_id, &err)? else {
            return Ok(());
        };

        let values: Vec<i128> = oracle::decode(&env, &response)?;
        let metrics = FinancialMetrics::from_values(&values, env.ledger().timestamp())?;
        oracle::append_snapshot(&env, &request.subject, metrics);
        Ok(())
    }

    pub fn expire_request(env: Env, request_id: RequestId) -> Result<(), Error> {
        oracle::expire(&env, &request_id)
    }

    pub fn get_latest_metrics(env: Env, startup_id: u64) -> Result<FinancialMetrics, Error> {
        oracle::latest_snapshot(&env, &Subject::Startup(startup_id))
    }

    pub fn get_historical_metrics(env: Env, startup_id: u64) -> Vec<FinancialMetrics> {
        oracle::history(&env, &Subject::Startup(startup_id))
    }

    pub fn get_request(env: Env, request_id: RequestId) -> Result<OracleRequest, Error> {
        oracle::get_request(&env, &request_id)
    }

    pub fn get_config(env: Env) -> Result<OracleConfig, Error> {
        oracle::get_config(&env)
    }
}

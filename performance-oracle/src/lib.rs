#![no_std]

use shared::{
    access,
    constants::DEFAULT_METRICS_REQUEST_INTERVAL,
    errors::Error,
    events::METRICS_VALIDATED,
    oracle::{self, Resolution},
    types::{OracleConfig, OracleRequest, RequestId, Role, Subject},
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, contracttype, vec, xdr::ToXdr, Address, Bytes, BytesN,
    Env, String, Symbol, Vec,
};


/// Number of values in a performance metrics payload
pub const METRIC_COUNT: u32 = 5;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PerformanceMetrics {
    pub active_users: i128,
    pub monthly_revenue: i128,
    pub customer_growth: i128,
    pub retention_rate: i128,
    pub unit_economics: i128,
    pub timestamp: u64,
    pub validated: bool,
}

impl PerformanceMetrics {
    fn from_values(values: &Vec<i128>, timestamp: u64) -> Result<Self, Error> {
        if values.len() != METRIC_COUNT || values.iter().any(|v| v < 0) {
            return Err(Error::MalformedPayload);
        }
        let value = |i: u32| values.get(i).ok_or(Error::MalformedPayload);
        Ok(PerformanceMetrics {
            active_users: value(0)?,
            monthly_revenue: value(1)?,
            customer_growth: value(2)?,
            retention_rate: value(3)?,
            unit_economics: value(4)?,
            timestamp,
            validated: false,
        })
    }
}

contractmeta!(
    key = "name",
    val = "Performance Metrics Oracle"
);

/// Operating metrics reported by authorized providers and countersigned by
/// metrics validators.
#[contract]
pub struct PerformanceOracle;

#[contractimpl]
impl PerformanceOracle {
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

    // ==================== Roles ====================

    pub fn add_provider(env: Env, provider: Address) -> Result<(), Error> {
        access::grant_role(&env, Role::MetricsProvider, &provider)
    }

    pub fn remove_provider(env: Env, provider: Address) -> Result<(), Error> {
        access::revoke_role(&env, Role::MetricsProvider, &provider)
    }

    pub fn add_validator(env: Env, validator: Address) -> Result<(), Error> {
        access::grant_role(&env, Role::MetricsValidator, &validator)
    }

    pub fn remove_validator(env: Env, validator: Address) -> Result<(), Error> {
        access::revoke_role(&env, Role::MetricsValidator, &validator)
    }

    pub fn is_provider(env: Env, account: Address) -> bool {
        access::has_role(&env, Role::MetricsProvider, &account)
    }

    pub fn is_validator(env: Env, account: Address) -> bool {
        access::has_role(&env, Role::MetricsValidator, &account)
    }

    // ==================== Requests ====================

    /// Request metrics for a startup from the named upstream data source.
    /// Provider role only.
    pub fn request_performance_metrics(
        env: Env,
        provider: Address,
        startup_id: u64,
        data_source: String,
    ) -> Result<RequestId, Error> {
        access::require_role(&env, Role::MetricsProvider, &provider)?;
        if data_source.len() == 0 {
            return Err(Error::InvalidInput);
        }

        let args = (startup_id, data_source).to_xdr(&env);
        oracle::request(&env, &Subject::Startup(startup_id), &provider, &args)
    }

    /// Router callback; `response` is an XDR-encoded `Vec<i128>` of five
    /// non-negative values.
    pub fn fulfill(env: Env, request_id: RequestId, response: Bytes, err: Bytes) -> Result<(), Error> {
        let Resolution::Fulfilled(request) = oracle::resolve(&env, &request_id, &err)? else {
            return Ok(());
        };

        let values: Vec<i128> = oracle::decode(&env, &response)?;
        let metrics = PerformanceMetrics::from_values(&values, env.ledger().timestamp())?;
        oracle::append_snapshot(&env, &request.subject, metrics);
        Ok(())
    }

    pub fn expire_request(env: Env, request_id: RequestId) -> Result<(), Error> {
        oracle::expire(&env, &request_id)
    }

    /// Mark the snapshot recorded at `timestamp` as validated
    pub fn validate_metrics(
        env: Env,
        validator: Address,
        startup_id: u64,
        timestamp: u64,
    ) -> Result<(), Error> {
        access::require_role(&env, Role::MetricsValidator, &validator)?;

        let subject = Subject::Startup(startup_id);
        let mut history: Vec<PerformanceMetrics> = oracle::history(&env, &subject);
        let (index, mut metrics) = (0..history.len())
            .filter_map(|i| history.get(i).map(|m| (i, m)))
            .find(|(_, m)| m.timestamp == timestamp)
            .ok_or(Error::NoDataAvailable)?;
        if metrics.validated {
            return Err(Error::AlreadyValidated);
        }
        metrics.validated = true;
        history.set(index, metrics);
        oracle::set_history(&env, &subject, &history);

        env.events()
            .publish((METRICS_VALIDATED, startup_id), (timestamp, validator));
        Ok(())
    }

    pub fn get_latest_metrics(env: Env, startup_id: u64) -> Result<PerformanceMetrics, Error> {
        oracle::latest_snapshot(&env, &Subject::Startup(startup_id))
    }

    pub fn get_historical_metrics(env: Env, startup_id: u64) -> Vec<PerformanceMetrics> {
        oracle::history(&env, &Subject::Startup(startup_id))
    }

    pub fn get_request(env: Env, request_id: RequestId) -> Result<OracleRequest, Error> {
        oracle::get_request(&env, &request_id)
    }

    pub fn get_config(env: Env) -> Result<OracleConfig, Error> {
        oracle::get_config(&env)
    }
}

//! Two-phase request/fulfill protocol shared by every external data oracle.
//!
//! `request` obtains a correlation id from the compute network router and
//! records a pending entry; `resolve` is the later, separately committed
//! callback matched by that id. Nothing blocks in between. Each oracle
//! contract decodes its own payload type and appends typed snapshots through
//! the history helpers here.

use crate::access::require_owner;
use crate::constants::{DEFAULT_CALLBACK_GAS_LIMIT, REQUEST_TIMEOUT};
use crate::errors::Error;
use crate::events::{
    CONFIG_UPDATED, REQUEST_CREATED, REQUEST_EXPIRED, REQUEST_FAILED, REQUEST_FULFILLED,
};
use crate::interfaces::FunctionsRouterClient;
use crate::types::{OracleConfig, OracleRequest, RequestId, RequestState, Subject};
use soroban_sdk::{
    contracttype, log, xdr::FromXdr, Address, Bytes, BytesN, Env, IntoVal, Symbol, TryFromVal,
    Val, Vec,
};

#[contracttype]
#[derive(Clone)]
enum OracleKey {
    Config,
    Request(RequestId),
    LastRequested(Subject),
    History(Subject),
}

/// Outcome of a callback that matched a pending request
pub enum Resolution {
    /// Success payload present; the caller decodes it and records a snapshot
    Fulfilled(OracleRequest),
    /// The network reported an error; nothing is recorded
    Failed(OracleRequest),
}

impl Resolution {
    pub fn request(&self) -> &OracleRequest {
        match self {
            Resolution::Fulfilled(request) | Resolution::Failed(request) => request,
        }
    }
}

// ==================== Configuration ====================

pub fn init_config(
    env: &Env,
    router: &Address,
    subscription_id: u64,
    network_id: &BytesN<32>,
    sources: &Vec<Symbol>,
    min_request_interval: u64,
) -> Result<(), Error> {
    if env.storage().instance().has(&OracleKey::Config) {
        return Err(Error::AlreadyInitialized);
    }
    if sources.is_empty() {
        return Err(Error::InvalidConfig);
    }

    let config = OracleConfig {
        router: router.clone(),
        subscription_id,
        network_id: network_id.clone(),
        callback_gas_limit: DEFAULT_CALLBACK_GAS_LIMIT,
        min_request_interval,
        sources: sources.clone(),
    };
    env.storage().instance().set(&OracleKey::Config, &config);
    Ok(())
}

pub fn get_config(env: &Env) -> Result<OracleConfig, Error> {
    env.storage()
        .instance()
        .get(&OracleKey::Config)
        .ok_or(Error::NotInitialized)
}

/// Owner-only. The router is fixed at initialization; the number of sources
/// must stay the same since stages index into it.
pub fn update_config(
    env: &Env,
    subscription_id: u64,
    network_id: &BytesN<32>,
    callback_gas_limit: u32,
    sources: &Vec<Symbol>,
) -> Result<(), Error> {
    require_owner(env)?;
    let mut config = get_config(env)?;

    if callback_gas_limit == 0 || sources.len() != config.sources.len() {
        return Err(Error::InvalidConfig);
    }

    config.subscription_id = subscription_id;
    config.network_id = network_id.clone();
    config.callback_gas_limit = callback_gas_limit;
    config.sources = sources.clone();
    env.storage().instance().set(&OracleKey::Config, &config);

    env.events()
        .publish((CONFIG_UPDATED,), (subscription_id, callback_gas_limit));
    Ok(())
}

pub fn set_min_request_interval(env: &Env, interval: u64) -> Result<(), Error> {
    require_owner(env)?;
    let mut config = get_config(env)?;
    config.min_request_interval = interval;
    env.storage().instance().set(&OracleKey::Config, &config);
    Ok(())
}

// ==================== Requests ====================

/// Rate-limited entry point for a fresh request on `subject` (stage 0).
/// Role checks are the caller's responsibility.
pub fn request(
    env: &Env,
    subject: &Subject,
    requester: &Address,
    args: &Bytes,
) -> Result<RequestId, Error> {
    let config = get_config(env)?;
    let now = env.ledger().timestamp();

    let last_key = OracleKey::LastRequested(subject.clone());
    if let Some(last) = env.storage().persistent().get::<_, u64>(&last_key) {
        if now.saturating_sub(last) < config.min_request_interval {
            log!(env, "request rejected, subject requested at", last);
            return Err(Error::RequestTooSoon);
        }
    }
    env.storage().persistent().set(&last_key, &now);

    dispatch(env, &config, subject, requester, 0, args)
}

/// Issue a follow-up request for `stage` without the re-request guard. Used
/// by multi-stage oracles from inside a fulfillment.
pub fn request_stage(
    env: &Env,
    subject: &Subject,
    requester: &Address,
    stage: u32,
    args: &Bytes,
) -> Result<RequestId, Error> {
    let config = get_config(env)?;
    dispatch(env, &config, subject, requester, stage, args)
}

fn dispatch(
    env: &Env,
    config: &OracleConfig,
    subject: &Subject,
    requester: &Address,
    stage: u32,
    args: &Bytes,
) -> Result<RequestId, Error> {
    let source = config.sources.get(stage).ok_or(Error::InvalidConfig)?;

    let router = FunctionsRouterClient::new(env, &config.router);
    let request_id = router.send_request(
        &config.subscription_id,
        &config.network_id,
        &source,
        args,
        &config.callback_gas_limit,
    );

    let key = OracleKey::Request(request_id.clone());
    if env.storage().persistent().has(&key) {
        // The router must never hand out an id twice
        return Err(Error::InvalidInput);
    }

    let record = OracleRequest {
        subject: subject.clone(),
        requester: requester.clone(),
        created_at: env.ledger().timestamp(),
        stage,
        state: RequestState::Pending,
    };
    env.storage().persistent().set(&key, &record);

    env.events().publish(
        (REQUEST_CREATED, request_id.clone()),
        (
            subject.clone(),
            source,
            config.subscription_id,
            config.callback_gas_limit,
        ),
    );

    Ok(request_id)
}

pub fn get_request(env: &Env, request_id: &RequestId) -> Result<OracleRequest, Error> {
    env.storage()
        .persistent()
        .get(&OracleKey::Request(request_id.clone()))
        .ok_or(Error::UnknownRequest)
}

fn set_request(env: &Env, request_id: &RequestId, request: &OracleRequest) {
    env.storage()
        .persistent()
        .set(&OracleKey::Request(request_id.clone()), request);
}

/// Match a callback to its pending request. Only the configured router may
/// call this; unknown or already resolved ids are rejected.
pub fn resolve(env: &Env, request_id: &RequestId, err: &Bytes) -> Result<Resolution, Error> {
    let config = get_config(env)?;
    config.router.require_auth();

    let mut request = get_request(env, request_id)?;
    if request.state != RequestState::Pending {
        return Err(Error::RequestResolved);
    }

    if !err.is_empty() {
        request.state = RequestState::Failed;
        set_request(env, request_id, &request);
        log!(env, "oracle request failed", request_id.clone());
        env.events()
            .publish((REQUEST_FAILED, request_id.clone()), err.clone());
        return Ok(Resolution::Failed(request));
    }

    request.state = RequestState::Fulfilled;
    set_request(env, request_id, &request);
    env.events().publish(
        (REQUEST_FULFILLED, request_id.clone()),
        request.subject.clone(),
    );
    Ok(Resolution::Fulfilled(request))
}

/// Close a request the network never answered. Anyone may call this once
/// [`REQUEST_TIMEOUT`] has passed since the request was created.
pub fn expire(env: &Env, request_id: &RequestId) -> Result<(), Error> {
    let mut request = get_request(env, request_id)?;
    if request.state != RequestState::Pending {
        return Err(Error::RequestResolved);
    }

    let now = env.ledger().timestamp();
    if now < request.created_at.saturating_add(REQUEST_TIMEOUT) {
        return Err(Error::RequestNotExpired);
    }

    request.state = RequestState::Expired;
    set_request(env, request_id, &request);
    env.events()
        .publish((REQUEST_EXPIRED, request_id.clone()), request.subject);
    Ok(())
}

/// Decode an XDR-encoded success payload into the oracle's payload type
pub fn decode<T>(env: &Env, payload: &Bytes) -> Result<T, Error>
where
    T: TryFromVal<Env, Val>,
{
    if payload.is_empty() {
        return Err(Error::MalformedPayload);
    }
    T::from_xdr(env, payload).map_err(|_| Error::MalformedPayload)
}

// ==================== Snapshot history ====================

pub fn history<T>(env: &Env, subject: &Subject) -> Vec<T>
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    env.storage()
        .persistent()
        .get(&OracleKey::History(subject.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn set_history<T>(env: &Env, subject: &Subject, history: &Vec<T>)
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    env.storage()
        .persistent()
        .set(&OracleKey::History(subject.clone()), history);
}

/// Append a snapshot; the latest pointer is always the last entry
pub fn append_snapshot<T>(env: &Env, subject: &Subject, snapshot: T)
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    let mut entries: Vec<T> = history(env, subject);
    entries.push_back(snapshot);
    set_history(env, subject, &entries);
}

pub fn latest_snapshot<T>(env: &Env, subject: &Subject) -> Result<T, Error>
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    history::<T>(env, subject)
        .last()
        .ok_or(Error::NoDataAvailable)
}

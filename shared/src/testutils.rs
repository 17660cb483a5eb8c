//! Test doubles for the external collaborators: a price feed and the compute
//! network router. Only built with the `testutils` feature.

use crate::types::RoundData;
use soroban_sdk::{contract, contractimpl, contracttype, Bytes, BytesN, Env, Symbol};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Decimals,
    Round,
    Counter,
    LastRequest,
    LastSource,
    LastArgs,
}

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn set_decimals(env: Env, decimals: u32) {
        env.storage().instance().set(&MockKey::Decimals, &decimals);
    }

    /// Publish a new answer stamped with the current ledger time
    pub fn set_answer(env: Env, answer: i128) {
        let round = RoundData {
            answer,
            updated_at: env.ledger().timestamp(),
        };
        env.storage().instance().set(&MockKey::Round, &round);
    }

    pub fn set_round(env: Env, answer: i128, updated_at: u64) {
        let round = RoundData { answer, updated_at };
        env.storage().instance().set(&MockKey::Round, &round);
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::Decimals)
            .unwrap_or(8)
    }

    pub fn latest_round(env: Env) -> RoundData {
        env.storage()
            .instance()
            .get(&MockKey::Round)
            .unwrap_or(RoundData {
                answer: 0,
                updated_at: 0,
            })
    }
}

/// Hands out sequential request ids and remembers the last request so tests
/// can answer it through the consumer's `fulfill`.
#[contract]
pub struct MockFunctionsRouter;

#[contractimpl]
impl MockFunctionsRouter {
    pub fn send_request(
        env: Env,
        _subscription_id: u64,
        _network_id: BytesN<32>,
        source: Symbol,
        args: Bytes,
        _callback_gas_limit: u32,
    ) -> BytesN<32> {
        let counter: u64 = env
            .storage()
            .instance()
            .get(&MockKey::Counter)
            .unwrap_or(0)
            + 1;
        env.storage().instance().set(&MockKey::Counter, &counter);

        let mut raw = [0u8; 32];
        raw[0] = 0xf1;
        raw[24..].copy_from_slice(&counter.to_be_bytes());
        let request_id = BytesN::from_array(&env, &raw);

        env.storage().instance().set(&MockKey::LastRequest, &request_id);
        env.storage().instance().set(&MockKey::LastSource, &source);
        env.storage().instance().set(&MockKey::LastArgs, &args);
        request_id
    }

    pub fn last_request_id(env: Env) -> Option<BytesN<32>> {
        env.storage().instance().get(&MockKey::LastRequest)
    }

    pub fn last_source(env: Env) -> Option<Symbol> {
        env.storage().instance().get(&MockKey::LastSource)
    }

    pub fn last_args(env: Env) -> Option<Bytes> {
        env.storage().instance().get(&MockKey::LastArgs)
    }

    pub fn request_count(env: Env) -> u64 {
        env.storage().instance().get(&MockKey::Counter).unwrap_or(0)
    }
}

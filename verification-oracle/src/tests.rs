#![cfg(test)]

use crate::{CredentialPayload, VerificationOracle, VerificationOracleClient};
use shared::{
    errors::Error,
    testutils::{MockFunctionsRouter, MockFunctionsRouterClient},
    types::{RequestId, RequestState},
};
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Ledger},
    xdr::ToXdr,
    Address, Bytes, BytesN, Env, String,
};

struct Setup<'a> {
    env: Env,
    client: VerificationOracleClient<'a>,
    router: MockFunctionsRouterClient<'a>,
    verifier: Address,
    user: Address,
}

fn setup() -> Setup<'static> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(5_000);

    let verifier = Address::generate(&env);
    let user = Address::generate(&env);
    let router = MockFunctionsRouterClient::new(
        &env,
        &env.register_contract(None, MockFunctionsRouter),
    );
    let client =
        VerificationOracleClient::new(&env, &env.register_contract(None, VerificationOracle));
    client.initialize(
        &Address::generate(&env),
        &router.address,
        &1,
        &BytesN::from_array(&env, &[1; 32]),
        &symbol_short!("kyc"),
        &symbol_short!("aml"),
        &symbol_short!("cred"),
    );
    client.add_verifier(&verifier);

    Setup {
        env,
        client,
        router,
        verifier,
        user,
    }
}

fn start(s: &Setup) -> RequestId {
    s.client.request_verification(
        &s.verifier,
        &s.user,
        &String::from_str(&s.env, "documentHash123"),
    )
}

fn answer(s: &Setup, request_id: &RequestId, passed: bool) {
    s.client
        .fulfill(request_id, &passed.to_xdr(&s.env), &Bytes::new(&s.env));
}

fn next_request(s: &Setup) -> RequestId {
    s.router.last_request_id().unwrap()
}

fn text(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

#[test]
fn test_full_verification_flow() {
    let s = setup();

    let kyc = start(&s);
    assert_eq!(s.router.last_source(), Some(symbol_short!("kyc")));
    let status = s.client.get_verification_status(&s.user);
    assert!(!status.kyc_passed);
    assert!(!status.is_valid);

    answer(&s, &kyc, true);
    let aml = next_request(&s);
    assert_ne!(aml, kyc);
    assert_eq!(s.router.last_source(), Some(symbol_short!("aml")));
    assert_eq!(s.client.get_request(&aml).stage, 1);
    assert!(s.client.get_verification_status(&s.user).kyc_passed);

    answer(&s, &aml, true);
    let cred = next_request(&s);
    assert_eq!(s.router.last_source(), Some(symbol_short!("cred")));

    let payload = CredentialPayload {
        credential_hash: text(&s.env, "0x1234567890abcdef"),
        source: text(&s.env, "Mock Verification Service"),
    };
    s.client
        .fulfill(&cred, &payload.to_xdr(&s.env), &Bytes::new(&s.env));

    let status = s.client.get_verification_status(&s.user);
    assert!(status.kyc_passed);
    assert!(status.aml_passed);
    assert_eq!(status.credential_hash, text(&s.env, "0x1234567890abcdef"));
    assert_eq!(status.source, text(&s.env, "Mock Verification Service"));
    assert!(status.is_valid);

    assert_eq!(s.client.get_latest(&s.user), status);
    assert_eq!(s.client.get_history(&s.user).len(), 1);
    assert_eq!(s.router.request_count(), 3);
}

#[test]
fn test_kyc_failure_ends_chain() {
    let s = setup();

    let kyc = start(&s);
    answer(&s, &kyc, false);

    let status = s.client.get_verification_status(&s.user);
    assert!(!status.kyc_passed);
    assert!(!status.aml_passed);
    assert_eq!(status.credential_hash, text(&s.env, ""));
    assert_eq!(status.source, text(&s.env, "KYC Failed"));
    assert!(status.is_valid);

    assert_eq!(s.router.request_count(), 1);
    assert_eq!(s.client.get_history(&s.user).len(), 1);
}

#[test]
fn test_aml_failure_ends_chain() {
    let s = setup();

    let kyc = start(&s);
    answer(&s, &kyc, true);
    let aml = next_request(&s);
    answer(&s, &aml, false);

    let status = s.client.get_verification_status(&s.user);
    assert!(status.kyc_passed);
    assert!(!status.aml_passed);
    assert_eq!(status.credential_hash, text(&s.env, ""));
    assert_eq!(status.source, text(&s.env, "AML Check Failed"));
    assert!(status.is_valid);
    assert_eq!(s.router.request_count(), 2);
}

#[test]
fn test_router_error_stops_chain() {
    let s = setup();

    let kyc = start(&s);
    s.client.fulfill(
        &kyc,
        &Bytes::new(&s.env),
        &Bytes::from_slice(&s.env, b"document service down"),
    );

    assert_eq!(s.client.get_request(&kyc).state, RequestState::Failed);
    assert!(!s.client.get_verification_status(&s.user).is_valid);
    assert_eq!(
        s.client.try_get_latest(&s.user),
        Err(Ok(Error::NoDataAvailable))
    );
    assert_eq!(s.router.request_count(), 1);
}

#[test]
fn test_restart_ignores_superseded_callbacks() {
    let s = setup();

    let first = start(&s);
    let second = start(&s);

    // The old chain resolves but no longer moves the status
    answer(&s, &first, true);
    assert_eq!(s.client.get_request(&first).state, RequestState::Fulfilled);
    assert!(!s.client.get_verification_status(&s.user).kyc_passed);
    assert_eq!(s.router.request_count(), 2);

    answer(&s, &second, true);
    assert!(s.client.get_verification_status(&s.user).kyc_passed);
    assert_eq!(s.router.request_count(), 3);
}

#[test]
fn test_only_verifiers_request() {
    let s = setup();
    let stranger = Address::generate(&s.env);

    let result = s.client.try_request_verification(
        &stranger,
        &s.user,
        &text(&s.env, "documentHash123"),
    );
    assert_eq!(result, Err(Ok(Error::MissingRole)));

    let result = s
        .client
        .try_request_verification(&s.verifier, &s.user, &text(&s.env, ""));
    assert_eq!(result, Err(Ok(Error::InvalidInput)));

    assert_eq!(
        s.client.try_get_verification_status(&s.user),
        Err(Ok(Error::NoDataAvailable))
    );
}

#[test]
fn test_update_config_requires_three_sources() {
    let s = setup();
    let network_id = BytesN::from_array(&s.env, &[2; 32]);

    s.client.update_config(
        &2,
        &network_id,
        &400_000,
        &symbol_short!("kyc2"),
        &symbol_short!("aml2"),
        &symbol_short!("cred2"),
    );
    assert_eq!(s.client.get_config().sources.len(), 3);

    let kyc = start(&s);
    assert_eq!(s.router.last_source(), Some(symbol_short!("kyc2")));
    answer(&s, &kyc, true);
    assert_eq!(s.router.last_source(), Some(symbol_short!("aml2")));
}

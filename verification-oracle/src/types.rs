use soroban_sdk::{contracttype, Address, String};

/// Stage indexes into the configured sources
pub const STAGE_KYC: u32 = 0;
pub const STAGE_AML: u32 = 1;
pub const STAGE_CREDENTIAL: u32 = 2;

pub const KYC_FAILED: &str = "KYC Failed";
pub const AML_FAILED: &str = "AML Check Failed";

/// Payload of the final stage
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialPayload {
    pub credential_hash: String,
    pub source: String,
}

/// Progress of a user's verification. `is_valid` is set once the chain has
/// reached a terminal outcome, whether passed or failed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationStatus {
    pub kyc_passed: bool,
    pub aml_passed: bool,
    pub credential_hash: String,
    pub source: String,
    pub is_valid: bool,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Status(Address),
    /// Request id of the stage currently in flight for a user
    Active(Address),
}

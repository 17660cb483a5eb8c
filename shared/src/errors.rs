use soroban_sdk::contracterror;

/// Broad classes of failure. The numeric range of an [`Error`] code encodes
/// its class, so callers outside the ledger can classify a rejection from the
/// code alone.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Lifecycle,
    Authorization,
    Validation,
    State,
    Resource,
    Oracle,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // Authorization errors
    NotValidator = 101,
    NotIssuer = 102,
    NotFounder = 103,
    NotValuationUpdater = 104,
    InsufficientSharesToPropose = 105,
    NoVotingPower = 106,
    MissingRole = 107,

    // Validation errors
    InvalidInput = 200,
    EmptyName = 201,
    InvalidShareCount = 202,
    InvalidValuation = 203,
    InvalidAmount = 204,
    StartupNotFound = 205,
    BelowMinInvestment = 206,
    FeeTooHigh = 207,
    ZeroShares = 208,
    ProposalNotFound = 209,
    EmptyDescription = 210,
    InvalidFeed = 211,
    DistributionNotFound = 212,
    DistributionTooSmall = 213,
    InvalidConfig = 215,
    ArithmeticOverflow = 216,

    // State errors
    StartupNotValidated = 300,
    VotingEnded = 301,
    VotingNotEnded = 302,
    AlreadyVoted = 303,
    AlreadyExecuted = 304,
    NotApproved = 305,
    AlreadyClaimed = 306,
    Paused = 307,
    RequestTooSoon = 308,
    NoIssuedShares = 309,
    AlreadyValidated = 310,
    RequestNotExpired = 311,

    // Resource errors
    InsufficientShares = 400,
    InsufficientBalance = 401,
    NothingToClaim = 402,
    EscrowExhausted = 403,

    // Oracle errors
    FeedUnavailable = 500,
    UpdateTooSoon = 502,
    StalePrice = 503,
    InvalidPrice = 504,
    ExcessiveChange = 505,
    UnknownRequest = 506,
    RequestResolved = 507,
    MalformedPayload = 508,
    NoDataAvailable = 509,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            0..=99 => ErrorKind::Lifecycle,
            100..=199 => ErrorKind::Authorization,
            200..=299 => ErrorKind::Validation,
            300..=399 => ErrorKind::State,
            400..=499 => ErrorKind::Resource,
            _ => ErrorKind::Oracle,
        }
    }

    /// Stable reason string surfaced to clients for translation.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::NotInitialized => "contract not initialized",
            Error::AlreadyInitialized => "contract already initialized",
            Error::NotValidator => "not authorized validator",
            Error::NotIssuer => "only founder or trusted issuer can issue shares",
            Error::NotFounder => "only founder",
            Error::NotValuationUpdater => "only founder or valuation updater can update valuation",
            Error::InsufficientSharesToPropose => "insufficient shares to propose",
            Error::NoVotingPower => "no shares owned",
            Error::MissingRole => "missing role",
            Error::InvalidInput => "invalid input",
            Error::EmptyName => "name cannot be empty",
            Error::InvalidShareCount => "total shares must be positive",
            Error::InvalidValuation => "valuation must be positive",
            Error::InvalidAmount => "amount must be positive",
            Error::StartupNotFound => "startup does not exist",
            Error::BelowMinInvestment => "investment below minimum",
            Error::FeeTooHigh => "fee too high",
            Error::ZeroShares => "investment too small for one share",
            Error::ProposalNotFound => "proposal does not exist",
            Error::EmptyDescription => "description cannot be empty",
            Error::InvalidFeed => "invalid price feed",
            Error::DistributionNotFound => "distribution does not exist",
            Error::DistributionTooSmall => "distribution too small for issued shares",
            Error::InvalidConfig => "invalid configuration",
            Error::ArithmeticOverflow => "arithmetic overflow",
            Error::StartupNotValidated => "startup not validated",
            Error::VotingEnded => "voting period ended",
            Error::VotingNotEnded => "voting period not ended",
            Error::AlreadyVoted => "already voted",
            Error::AlreadyExecuted => "already executed",
            Error::NotApproved => "proposal not approved",
            Error::AlreadyClaimed => "already claimed",
            Error::Paused => "contract paused",
            Error::RequestTooSoon => "update too soon",
            Error::NoIssuedShares => "no issued shares",
            Error::AlreadyValidated => "metrics already validated",
            Error::RequestNotExpired => "request not expired",
            Error::InsufficientShares => "not enough shares available",
            Error::InsufficientBalance => "insufficient share balance",
            Error::NothingToClaim => "nothing to claim",
            Error::EscrowExhausted => "distribution escrow exhausted",
            Error::FeedUnavailable => "price feed not set/disabled",
            Error::UpdateTooSoon => "update too soon",
            Error::StalePrice => "stale price data",
            Error::InvalidPrice => "invalid price",
            Error::ExcessiveChange => "excessive valuation change",
            Error::UnknownRequest => "unknown request",
            Error::RequestResolved => "request already resolved",
            Error::MalformedPayload => "malformed response payload",
            Error::NoDataAvailable => "no data available",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_kinds() {
        assert_eq!(Error::AlreadyInitialized.kind(), ErrorKind::Lifecycle);
        assert_eq!(Error::InsufficientSharesToPropose.kind(), ErrorKind::Authorization);
        assert_eq!(Error::EmptyName.kind(), ErrorKind::Validation);
        assert_eq!(Error::StartupNotFound.kind(), ErrorKind::Validation);
        assert_eq!(Error::AlreadyExecuted.kind(), ErrorKind::State);
        assert_eq!(Error::RequestTooSoon.kind(), ErrorKind::State);
        assert_eq!(Error::InsufficientShares.kind(), ErrorKind::Resource);
        assert_eq!(Error::ExcessiveChange.kind(), ErrorKind::Oracle);
        assert_eq!(Error::NoDataAvailable.kind(), ErrorKind::Oracle);
    }

    #[test]
    fn test_reasons_are_stable() {
        assert_eq!(Error::VotingEnded.reason(), "voting period ended");
        assert_eq!(Error::VotingNotEnded.reason(), "voting period not ended");
        assert_eq!(Error::AlreadyExecuted.reason(), "already executed");
        assert_eq!(Error::InsufficientShares.reason(), "not enough shares available");
        assert_eq!(Error::StalePrice.reason(), "stale price data");
        assert_eq!(Error::FeedUnavailable.reason(), "price feed not set/disabled");
    }
}

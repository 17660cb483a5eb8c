use shared::constants::BPS_DENOMINATOR;
use shared::errors::Error;
use shared::types::Amount;

/// Split of a payment into fee, founder proceeds and shares granted
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    pub fee: Amount,
    pub net: Amount,
    pub shares: Amount,
}

/// `fee = payment * fee_bps / 10000`, `net = payment - fee`,
/// `shares = net * total_shares / valuation`. Every division truncates.
pub fn quote(
    payment: Amount,
    fee_bps: u32,
    total_shares: Amount,
    valuation: Amount,
) -> Result<Quote, Error> {
    if valuation <= 0 {
        return Err(Error::InvalidValuation);
    }

    let fee = payment
        .checked_mul(fee_bps as i128)
        .ok_or(Error::ArithmeticOverflow)?
        / BPS_DENOMINATOR;
    let net = payment - fee;
    let shares = net
        .checked_mul(total_shares)
        .ok_or(Error::ArithmeticOverflow)?
        / valuation;

    Ok(Quote { fee, net, shares })
}

/// Payout owed to a holder of `balance` shares
pub fn payout(balance: Amount, per_share_amount: Amount) -> Result<Amount, Error> {
    balance
        .checked_mul(per_share_amount)
        .ok_or(Error::ArithmeticOverflow)
}

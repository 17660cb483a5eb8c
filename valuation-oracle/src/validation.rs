use shared::errors::Error;
use shared::types::{Amount, RoundData};

use crate::types::{AdapterConfig, ValuationFeed};

/// Cooldown since the last accepted update. The first update is always allowed.
pub fn validate_interval(config: &AdapterConfig, feed: &ValuationFeed, now: u64) -> Result<(), Error> {
    if feed.last_update_timestamp != 0
        && now.saturating_sub(feed.last_update_timestamp) < config.update_interval
    {
        return Err(Error::UpdateTooSoon);
    }
    Ok(())
}

/// Freshness and sign of the feed's latest round
pub fn validate_round(config: &AdapterConfig, round: &RoundData, now: u64) -> Result<(), Error> {
    let max_age = config.update_interval.saturating_add(config.grace_period);
    if now.saturating_sub(round.updated_at) > max_age {
        return Err(Error::StalePrice);
    }
    if round.answer <= 0 {
        return Err(Error::InvalidPrice);
    }
    Ok(())
}

/// `|new - last| * 100 > last * max_change_pct` is rejected; a move of
/// exactly `max_change_pct` passes.
pub fn validate_change(last_price: Amount, new_price: Amount, max_change_pct: u32) -> Result<(), Error> {
    if last_price <= 0 {
        return Ok(());
    }
    let diff = new_price
        .checked_sub(last_price)
        .ok_or(Error::ArithmeticOverflow)?
        .checked_abs()
        .ok_or(Error::ArithmeticOverflow)?;
    let moved = diff.checked_mul(100).ok_or(Error::ArithmeticOverflow)?;
    let allowed = last_price
        .checked_mul(max_change_pct as i128)
        .ok_or(Error::ArithmeticOverflow)?;
    if moved > allowed {
        return Err(Error::ExcessiveChange);
    }
    Ok(())
}

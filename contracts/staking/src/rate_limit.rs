//! Per-depositor withdrawal rate limiting.
//!
//! A window is a cliff, not a rolling average: once its age reaches
//! `RATE_LIMIT_PERIOD` the cumulative resets wholesale and the triggering
//! withdrawal becomes the new total. Within an un-expired window the
//! cumulative may only grow, and never past the daily cap.

use cosmwasm_std::{Addr, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{RateLimitWindow, RATE_LIMIT_PERIOD, RATE_WINDOWS};

/// Record `amount` against the depositor's current window, enforcing the
/// cap. Persists the updated window on success.
pub fn check_rate_limit(
    storage: &mut dyn Storage,
    now: u64,
    depositor: &Addr,
    amount: Uint128,
    cap: Uint128,
) -> Result<RateLimitWindow, ContractError> {
    let mut window = RATE_WINDOWS
        .may_load(storage, depositor)?
        .unwrap_or(RateLimitWindow {
            window_start: now,
            used: Uint128::zero(),
        });

    if now - window.window_start >= RATE_LIMIT_PERIOD {
        window = RateLimitWindow {
            window_start: now,
            used: Uint128::zero(),
        };
    }

    let new_used = window
        .used
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow {
            context: "rate-limit accumulation".to_string(),
        })?;
    if new_used > cap {
        return Err(ContractError::RateLimitExceeded {
            cap,
            used: window.used,
            requested: amount,
        });
    }

    window.used = new_used;
    RATE_WINDOWS.save(storage, depositor, &window)?;

    Ok(window)
}

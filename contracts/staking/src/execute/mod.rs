//! Execute handlers for the Quorumgate staking pool contract.
//!
//! - `stake` - stake, withdraw, claim and emergency-exit handlers
//! - `bridge` - cross-chain position relay
//! - `admin` - reward rate, pause, ownership and bridge configuration

mod admin;
mod bridge;
mod stake;

pub use admin::*;
pub use bridge::*;
pub use stake::*;

use cosmwasm_std::{Addr, DepsMut, Env, Uint128};
use cw20::Cw20QueryMsg;

use crate::error::ContractError;
use crate::state::{BalanceCheck, PENDING_BALANCE_CHECK};

/// Query this contract's own CW20 balance.
pub(crate) fn own_balance(
    deps: &DepsMut,
    env: &Env,
    token: &Addr,
) -> Result<Uint128, ContractError> {
    let resp: cw20::BalanceResponse = deps.querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;
    Ok(resp.balance)
}

/// Snapshot the balance this contract must hold after the dispatched token
/// movement: current plus `delta` for a pull, current minus `delta` for a
/// payout. The `reply` handler enforces it.
pub(crate) fn expect_balance_change(
    deps: &mut DepsMut,
    env: &Env,
    token: &Addr,
    delta: Uint128,
    inbound: bool,
) -> Result<(), ContractError> {
    let current = own_balance(deps, env, token)?;
    let expected = if inbound {
        current.checked_add(delta)
    } else {
        current.checked_sub(delta)
    }
    .map_err(|_| ContractError::Overflow {
        context: "pool balance".to_string(),
    })?;

    PENDING_BALANCE_CHECK.save(
        deps.storage,
        &BalanceCheck {
            token: token.clone(),
            account: env.contract.address.clone(),
            expected,
        },
    )?;
    Ok(())
}

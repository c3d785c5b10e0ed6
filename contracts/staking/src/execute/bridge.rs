//! Cross-chain position relay through the bridge collaborator.

use cosmwasm_std::{
    to_json_binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::guard::acquire_guard;

use crate::error::ContractError;
use crate::execute::expect_balance_change;
use crate::msg::BridgeExecuteMsg;
use crate::rewards::{accrue, settle_position};
use crate::state::{CONFIG, POSITIONS, REPLY_BRIDGE_OUT, REWARD_STATE, SUPPORTED_CHAINS};

/// Relay `amount` of the caller's staked position to `recipient` on
/// `target_chain`.
///
/// The position and `total_staked` are decremented before any external
/// call; the bridge is then granted an allowance of exactly `amount` and
/// invoked through its fixed-signature entry point, which pulls the tokens
/// itself. The reply verifies the pool's balance dropped by exactly
/// `amount`.
pub fn execute_bridge_stake(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient: String,
    target_chain: u64,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::PoolPaused);
    }

    let bridge = config
        .bridge
        .clone()
        .ok_or(ContractError::BridgeNotConfigured)?;

    if !SUPPORTED_CHAINS
        .may_load(deps.storage, target_chain)?
        .unwrap_or(false)
    {
        return Err(ContractError::ChainNotSupported {
            chain_id: target_chain,
        });
    }

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let mut position = POSITIONS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::NothingStaked)?;

    if amount > position.amount {
        return Err(ContractError::InsufficientStake {
            available: position.amount,
            requested: amount,
        });
    }

    let now = env.block.time.seconds();
    let unlock_at = position.staked_at + config.min_stake_time;
    if now < unlock_at {
        return Err(ContractError::TimelockActive {
            remaining_seconds: unlock_at - now,
        });
    }

    let mut state = REWARD_STATE.load(deps.storage)?;
    accrue(&mut state, now)?;
    settle_position(&state, &mut position)?;

    position.amount = position
        .amount
        .checked_sub(amount)
        .map_err(|_| ContractError::Overflow {
            context: "position balance".to_string(),
        })?;
    state.total_staked =
        state
            .total_staked
            .checked_sub(amount)
            .map_err(|_| ContractError::Overflow {
                context: "total staked".to_string(),
            })?;

    REWARD_STATE.save(deps.storage, &state)?;
    POSITIONS.save(deps.storage, &info.sender, &position)?;

    expect_balance_change(&mut deps, &env, &config.token, amount, false)?;

    // The bridge pulls via this exact allowance; anything left over after
    // the relay would fail the balance check.
    let allowance_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::IncreaseAllowance {
            spender: bridge.to_string(),
            amount,
            expires: None,
        })?,
        funds: vec![],
    });

    let relay_msg = SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: bridge.to_string(),
            msg: to_json_binary(&BridgeExecuteMsg::InitiateTransfer {
                token: config.token.to_string(),
                amount,
                recipient: recipient.clone(),
                target_chain,
            })?,
            funds: vec![],
        }),
        REPLY_BRIDGE_OUT,
    );

    Ok(Response::new()
        .add_message(allowance_msg)
        .add_submessage(relay_msg)
        .add_attribute("action", "bridge_stake")
        .add_attribute("staker", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("recipient", recipient)
        .add_attribute("target_chain", target_chain.to_string())
        .add_attribute("bridge", bridge)
        .add_attribute("bridged_at", now.to_string()))
}

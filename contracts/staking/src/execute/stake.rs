//! Staking lifecycle handlers: stake, withdraw, claim, emergency exit.
//!
//! Every handler settles rewards before touching balances, finalizes its
//! own state before dispatching the token movement, and leaves the balance
//! delta to be verified in `reply`. The invariant
//! `sum(Position.amount) == RewardState.total_staked` holds at every
//! observable point.

use cosmwasm_std::{
    to_json_binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::guard::acquire_guard;

use crate::error::ContractError;
use crate::execute::expect_balance_change;
use crate::rate_limit::check_rate_limit;
use crate::rewards::{accrue, settle_position};
use crate::state::{
    Position, CONFIG, POSITIONS, REPLY_PAYOUT, REPLY_STAKE_PULL, REWARD_STATE,
};

fn overflow(context: &str) -> ContractError {
    ContractError::Overflow {
        context: context.to_string(),
    }
}

// ============================================================================
// Stake
// ============================================================================

/// Stake `amount`, pulled from the caller via CW20 allowance.
///
/// The stake timestamp is refreshed on every deposit, so an additional
/// stake re-arms the withdrawal timelock for the entire balance, not just
/// the increment.
pub fn execute_stake(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::PoolPaused);
    }

    if amount < config.min_stake {
        return Err(ContractError::BelowMinimumStake {
            min_amount: config.min_stake,
        });
    }
    if amount > config.max_stake {
        return Err(ContractError::AboveMaximumStake {
            max_amount: config.max_stake,
        });
    }

    let now = env.block.time.seconds();
    let mut state = REWARD_STATE.load(deps.storage)?;
    accrue(&mut state, now)?;

    // A fresh position snapshots the current accumulator so it earns
    // nothing for time before it existed.
    let mut position = POSITIONS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(Position {
            amount: Uint128::zero(),
            staked_at: now,
            reward_snapshot: state.acc_reward_per_share,
            accrued: Uint128::zero(),
        });
    settle_position(&state, &mut position)?;

    position.amount = position
        .amount
        .checked_add(amount)
        .map_err(|_| overflow("position balance"))?;
    position.staked_at = now;
    state.total_staked = state
        .total_staked
        .checked_add(amount)
        .map_err(|_| overflow("total staked"))?;

    REWARD_STATE.save(deps.storage, &state)?;
    POSITIONS.save(deps.storage, &info.sender, &position)?;

    expect_balance_change(&mut deps, &env, &config.token, amount, true)?;

    let pull_msg = SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                owner: info.sender.to_string(),
                recipient: env.contract.address.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
        REPLY_STAKE_PULL,
    );

    Ok(Response::new()
        .add_submessage(pull_msg)
        .add_attribute("action", "stake")
        .add_attribute("staker", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("position_balance", position.amount)
        .add_attribute("total_staked", state.total_staked)
        .add_attribute("staked_at", now.to_string()))
}

// ============================================================================
// Withdraw
// ============================================================================

/// Withdraw `amount` of the staked balance after the timelock, within the
/// daily rate limit.
pub fn execute_withdraw(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::PoolPaused);
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

    check_rate_limit(
        deps.storage,
        now,
        &info.sender,
        amount,
        config.daily_withdraw_limit,
    )?;

    let mut state = REWARD_STATE.load(deps.storage)?;
    accrue(&mut state, now)?;
    settle_position(&state, &mut position)?;

    // Effects before the outbound transfer.
    position.amount = position
        .amount
        .checked_sub(amount)
        .map_err(|_| overflow("position balance"))?;
    state.total_staked = state
        .total_staked
        .checked_sub(amount)
        .map_err(|_| overflow("total staked"))?;

    REWARD_STATE.save(deps.storage, &state)?;
    POSITIONS.save(deps.storage, &info.sender, &position)?;

    expect_balance_change(&mut deps, &env, &config.token, amount, false)?;

    let payout_msg = SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: info.sender.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
        REPLY_PAYOUT,
    );

    Ok(Response::new()
        .add_submessage(payout_msg)
        .add_attribute("action", "withdraw")
        .add_attribute("staker", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("position_balance", position.amount)
        .add_attribute("total_staked", state.total_staked)
        .add_attribute("withdrawn_at", now.to_string()))
}

// ============================================================================
// ClaimReward
// ============================================================================

/// Pay out all settled and pending rewards from the pool's own reserve.
pub fn execute_claim_reward(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::PoolPaused);
    }

    let mut position = POSITIONS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::NothingStaked)?;

    let now = env.block.time.seconds();
    let mut state = REWARD_STATE.load(deps.storage)?;
    accrue(&mut state, now)?;
    settle_position(&state, &mut position)?;

    let reward = position.accrued;
    if reward.is_zero() {
        return Err(ContractError::NoReward);
    }

    // Zeroed before the outbound transfer.
    position.accrued = Uint128::zero();

    REWARD_STATE.save(deps.storage, &state)?;
    POSITIONS.save(deps.storage, &info.sender, &position)?;

    expect_balance_change(&mut deps, &env, &config.token, reward, false)?;

    let payout_msg = SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: info.sender.to_string(),
                amount: reward,
            })?,
            funds: vec![],
        }),
        REPLY_PAYOUT,
    );

    Ok(Response::new()
        .add_submessage(payout_msg)
        .add_attribute("action", "claim_reward")
        .add_attribute("staker", info.sender)
        .add_attribute("reward", reward)
        .add_attribute("claimed_at", now.to_string()))
}

// ============================================================================
// EmergencyWithdraw
// ============================================================================

/// Return the caller's entire staked balance while the pool is paused.
/// Pending rewards are not settled and not paid; the position is zeroed.
pub fn execute_emergency_withdraw(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if !config.paused {
        return Err(ContractError::NotPaused);
    }

    let position = POSITIONS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::NothingStaked)?;
    let amount = position.amount;
    if amount.is_zero() {
        return Err(ContractError::NothingStaked);
    }

    let now = env.block.time.seconds();
    let mut state = REWARD_STATE.load(deps.storage)?;
    accrue(&mut state, now)?;
    state.total_staked = state
        .total_staked
        .checked_sub(amount)
        .map_err(|_| overflow("total staked"))?;

    REWARD_STATE.save(deps.storage, &state)?;
    POSITIONS.remove(deps.storage, &info.sender);

    expect_balance_change(&mut deps, &env, &config.token, amount, false)?;

    let payout_msg = SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: info.sender.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
        REPLY_PAYOUT,
    );

    Ok(Response::new()
        .add_submessage(payout_msg)
        .add_attribute("action", "emergency_withdraw")
        .add_attribute("staker", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("withdrawn_at", now.to_string()))
}

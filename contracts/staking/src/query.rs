//! Query handlers for the Quorumgate staking pool contract.

use cosmwasm_std::{Deps, Env, Order, StdError, StdResult, Uint128};

use common::ownership::PENDING_OWNER;

use crate::msg::{
    ConfigResponse, PendingOwnerResponse, PendingRewardResponse, RateLimitUsageResponse,
    RewardStateResponse, StakeInfoResponse, StatusResponse, SupportedChainsResponse,
};
use crate::rewards::{pending_for, projected_acc};
use crate::state::{
    CONFIG, POSITIONS, RATE_LIMIT_PERIOD, RATE_WINDOWS, REWARD_STATE, SUPPORTED_CHAINS,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        paused: config.paused,
        token: config.token,
        min_stake_time: config.min_stake_time,
        min_stake: config.min_stake,
        max_stake: config.max_stake,
        daily_withdraw_limit: config.daily_withdraw_limit,
        bridge: config.bridge,
    })
}

pub fn query_status(deps: Deps) -> StdResult<StatusResponse> {
    let config = CONFIG.load(deps.storage)?;
    let state = REWARD_STATE.load(deps.storage)?;
    Ok(StatusResponse {
        paused: config.paused,
        total_staked: state.total_staked,
        reward_rate: state.reward_rate,
    })
}

pub fn query_stake_info(deps: Deps, address: String) -> StdResult<StakeInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    let addr = deps.api.addr_validate(&address)?;
    let position = POSITIONS.may_load(deps.storage, &addr)?.unwrap_or_default();
    Ok(StakeInfoResponse {
        address: addr,
        amount: position.amount,
        staked_at: position.staked_at,
        unlock_at: position.staked_at + config.min_stake_time,
        accrued: position.accrued,
    })
}

/// Settled reward plus the projection as of "now". Read-only: nothing is
/// mutated, the accumulator is recomputed on the fly.
pub fn query_pending_reward(deps: Deps, env: Env, address: String) -> StdResult<PendingRewardResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let position = POSITIONS.may_load(deps.storage, &addr)?.unwrap_or_default();
    let state = REWARD_STATE.load(deps.storage)?;

    let acc = projected_acc(&state, env.block.time.seconds())
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    let unsettled =
        pending_for(acc, &position).map_err(|e| StdError::generic_err(e.to_string()))?;
    let pending_reward = position
        .accrued
        .checked_add(unsettled)
        .map_err(|e| StdError::generic_err(e.to_string()))?;

    Ok(PendingRewardResponse {
        address: addr,
        pending_reward,
    })
}

pub fn query_reward_state(deps: Deps) -> StdResult<RewardStateResponse> {
    let state = REWARD_STATE.load(deps.storage)?;
    Ok(RewardStateResponse {
        total_staked: state.total_staked,
        reward_rate: state.reward_rate,
        last_update: state.last_update,
        acc_reward_per_share: state.acc_reward_per_share,
    })
}

pub fn query_rate_limit_usage(
    deps: Deps,
    env: Env,
    address: String,
) -> StdResult<RateLimitUsageResponse> {
    let config = CONFIG.load(deps.storage)?;
    let addr = deps.api.addr_validate(&address)?;
    let now = env.block.time.seconds();

    let window = RATE_WINDOWS.may_load(deps.storage, &addr)?;
    let (used, window_start) = match window {
        Some(w) if now - w.window_start < RATE_LIMIT_PERIOD => (w.used, w.window_start),
        // Expired or absent: the next withdrawal opens a fresh window.
        _ => (Uint128::zero(), now),
    };

    Ok(RateLimitUsageResponse {
        address: addr,
        used,
        window_start,
        remaining: config.daily_withdraw_limit.saturating_sub(used),
    })
}

pub fn query_supported_chains(deps: Deps) -> StdResult<SupportedChainsResponse> {
    let chain_ids = SUPPORTED_CHAINS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(SupportedChainsResponse { chain_ids })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

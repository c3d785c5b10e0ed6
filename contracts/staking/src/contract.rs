//! Quorumgate Staking Pool Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `rewards` - lazy accrual engine
//! - `rate_limit` - per-depositor withdrawal window
//!
//! Token movements are dispatched as submessages with `reply_on_success`;
//! the `reply` entry point verifies the balance delta and releases the
//! reentrancy latch, so any non-conforming token aborts the whole call.

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128, Uint256,
};
use cw2::set_contract_version;
use cw20::Cw20QueryMsg;

use common::guard::release_guard;

use crate::error::ContractError;
use crate::execute::{
    ensure_cw20, execute_accept_owner, execute_add_supported_chain, execute_bridge_stake,
    execute_cancel_owner_proposal, execute_claim_reward, execute_emergency_withdraw,
    execute_pause, execute_propose_owner, execute_set_bridge, execute_stake, execute_unpause,
    execute_update_reward_rate, execute_withdraw,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_pending_owner, query_pending_reward, query_rate_limit_usage,
    query_reward_state, query_stake_info, query_status, query_supported_chains,
};
use crate::state::{
    Config, RewardState, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, PENDING_BALANCE_CHECK,
    REPLY_BRIDGE_OUT, REPLY_PAYOUT, REPLY_STAKE_PULL, REWARD_STATE,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let token = deps.api.addr_validate(&msg.token)?;
    ensure_cw20(&deps, &token)?;

    if msg.min_stake > msg.max_stake {
        return Err(ContractError::InvalidStakeBounds {
            min: msg.min_stake,
            max: msg.max_stake,
        });
    }
    if msg.min_stake.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = Config {
        owner,
        paused: false,
        token: token.clone(),
        min_stake_time: msg.min_stake_time,
        min_stake: msg.min_stake,
        max_stake: msg.max_stake,
        daily_withdraw_limit: msg.daily_withdraw_limit,
        bridge: None,
    };
    CONFIG.save(deps.storage, &config)?;

    REWARD_STATE.save(
        deps.storage,
        &RewardState {
            total_staked: Uint128::zero(),
            reward_rate: msg.reward_rate,
            last_update: env.block.time.seconds(),
            acc_reward_per_share: Uint256::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token", token)
        .add_attribute("reward_rate", msg.reward_rate)
        .add_attribute("min_stake_time", msg.min_stake_time.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Staking lifecycle
        ExecuteMsg::Stake { amount } => execute_stake(deps, env, info, amount),
        ExecuteMsg::Withdraw { amount } => execute_withdraw(deps, env, info, amount),
        ExecuteMsg::ClaimReward {} => execute_claim_reward(deps, env, info),
        ExecuteMsg::EmergencyWithdraw {} => execute_emergency_withdraw(deps, env, info),
        ExecuteMsg::BridgeStake {
            amount,
            recipient,
            target_chain,
        } => execute_bridge_stake(deps, env, info, amount, recipient, target_chain),

        // Admin operations
        ExecuteMsg::UpdateRewardRate { reward_rate } => {
            execute_update_reward_rate(deps, env, info, reward_rate)
        }
        ExecuteMsg::SetBridge { bridge } => execute_set_bridge(deps, info, bridge),
        ExecuteMsg::AddSupportedChain { chain_id } => {
            execute_add_supported_chain(deps, info, chain_id)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Balance-delta verification for dispatched token movements.
///
/// An `Err` here reverts the entire transaction, original handler
/// included, which is exactly the atomicity the design requires.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_STAKE_PULL | REPLY_PAYOUT | REPLY_BRIDGE_OUT => {
            let check = PENDING_BALANCE_CHECK
                .may_load(deps.storage)?
                .ok_or(ContractError::MissingBalanceCheck)?;

            let resp: cw20::BalanceResponse = deps.querier.query_wasm_smart(
                &check.token,
                &Cw20QueryMsg::Balance {
                    address: check.account.to_string(),
                },
            )?;
            let actual: Uint128 = resp.balance;

            if actual != check.expected {
                return Err(ContractError::BalanceMismatch {
                    expected: check.expected,
                    actual,
                });
            }

            PENDING_BALANCE_CHECK.remove(deps.storage);
            release_guard(deps.storage);

            Ok(Response::new()
                .add_attribute("action", "verify_balance")
                .add_attribute("token", check.token)
                .add_attribute("balance", actual))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Status {} => to_json_binary(&query_status(deps)?),
        QueryMsg::StakeInfo { address } => to_json_binary(&query_stake_info(deps, address)?),
        QueryMsg::PendingReward { address } => {
            to_json_binary(&query_pending_reward(deps, env, address)?)
        }
        QueryMsg::RewardState {} => to_json_binary(&query_reward_state(deps)?),
        QueryMsg::RateLimitUsage { address } => {
            to_json_binary(&query_rate_limit_usage(deps, env, address)?)
        }
        QueryMsg::SupportedChains {} => to_json_binary(&query_supported_chains(deps)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

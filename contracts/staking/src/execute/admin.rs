//! Admin operations: reward rate, bridge configuration, pause, chains,
//! ownership handoff.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use common::ownership;

use crate::error::ContractError;
use crate::rewards::accrue;
use crate::state::{CONFIG, REWARD_STATE, SUPPORTED_CHAINS};

// ============================================================================
// Reward Rate
// ============================================================================

/// Change the reward emission rate. The accumulator is settled at the old
/// rate up to now, so the change never applies retroactively.
pub fn execute_update_reward_rate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    reward_rate: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let mut state = REWARD_STATE.load(deps.storage)?;
    accrue(&mut state, env.block.time.seconds())?;
    let old_rate = state.reward_rate;
    state.reward_rate = reward_rate;
    REWARD_STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "update_reward_rate")
        .add_attribute("old_rate", old_rate)
        .add_attribute("new_rate", reward_rate)
        .add_attribute("updated_at", env.block.time.seconds().to_string()))
}

// ============================================================================
// Bridge Configuration
// ============================================================================

/// Set the bridge collaborator used by `BridgeStake`. The address must be
/// a contract.
pub fn execute_set_bridge(
    deps: DepsMut,
    info: MessageInfo,
    bridge: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let bridge_addr = deps.api.addr_validate(&bridge)?;
    config.bridge = Some(bridge_addr.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_bridge")
        .add_attribute("bridge", bridge_addr))
}

/// Add a bridge destination chain to the supported set. Append-only.
pub fn execute_add_supported_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    if SUPPORTED_CHAINS
        .may_load(deps.storage, chain_id)?
        .unwrap_or(false)
    {
        return Err(ContractError::ChainAlreadySupported { chain_id });
    }

    SUPPORTED_CHAINS.save(deps.storage, chain_id, &true)?;

    Ok(Response::new()
        .add_attribute("action", "add_supported_chain")
        .add_attribute("chain_id", chain_id.to_string()))
}

// ============================================================================
// Pause / Unpause
// ============================================================================

/// Pause the pool; only `EmergencyWithdraw` and admin operations remain
/// available while set.
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "pause"))
}

/// Resume the pool.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

// ============================================================================
// Ownership Handoff
// ============================================================================

/// Propose a successor owner.
pub fn execute_propose_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let proposed = ownership::propose_owner(deps.storage, deps.api, &new_owner)?;

    Ok(Response::new()
        .add_attribute("action", "propose_owner")
        .add_attribute("pending_owner", proposed))
}

/// Accept a pending proposal; callable only by the proposed address.
pub fn execute_accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let new_owner = ownership::accept_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    let previous_owner = config.owner;
    config.owner = new_owner.clone();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "accept_owner")
        .add_attribute("previous_owner", previous_owner)
        .add_attribute("owner", new_owner))
}

/// Withdraw an outstanding ownership proposal.
pub fn execute_cancel_owner_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    ownership::cancel_proposal(deps.storage);

    Ok(Response::new().add_attribute("action", "cancel_owner_proposal"))
}

/// Probe a CW20 token address; used during instantiation.
pub(crate) fn ensure_cw20(deps: &DepsMut, token: &cosmwasm_std::Addr) -> Result<(), ContractError> {
    deps.querier
        .query_wasm_smart::<TokenInfoResponse>(token, &Cw20QueryMsg::TokenInfo {})
        .map_err(|_| ContractError::InvalidTokenContract {
            token: token.to_string(),
        })?;
    Ok(())
}

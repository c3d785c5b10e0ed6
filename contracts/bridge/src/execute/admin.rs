//! Admin operations: pause/unpause, chain management, ownership handoff.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use common::ownership;

use crate::error::ContractError;
use crate::state::{CONFIG, SUPPORTED_CHAINS};

// ============================================================================
// Pause / Unpause
// ============================================================================

/// Pause the bridge; initiate/attest/finalize are disabled while set.
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "pause"))
}

/// Resume the bridge.
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
// Chain Management
// ============================================================================

/// Add a destination chain to the supported set. The set is append-only.
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

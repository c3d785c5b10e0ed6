//! Validator registry management.
//!
//! The active validator count is kept inside `[threshold, MAX_VALIDATORS]`
//! once the contract is instantiated: an add that would exceed the maximum
//! and a remove that would drop below the threshold are both rejected.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{CONFIG, MAX_VALIDATORS, VALIDATORS, VALIDATOR_COUNT};

/// Grant the validator role to an address.
pub fn execute_add_validator(
    deps: DepsMut,
    info: MessageInfo,
    validator: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let validator_addr = deps.api.addr_validate(&validator)?;

    if VALIDATORS
        .may_load(deps.storage, &validator_addr)?
        .unwrap_or(false)
    {
        return Err(ContractError::ValidatorAlreadyRegistered);
    }

    let count = VALIDATOR_COUNT.load(deps.storage)?;
    if count >= MAX_VALIDATORS {
        return Err(ContractError::TooManyValidators {
            max: MAX_VALIDATORS,
        });
    }

    VALIDATORS.save(deps.storage, &validator_addr, &true)?;
    VALIDATOR_COUNT.save(deps.storage, &(count + 1))?;

    Ok(Response::new()
        .add_attribute("action", "add_validator")
        .add_attribute("validator", validator_addr)
        .add_attribute("validator_count", (count + 1).to_string()))
}

/// Revoke the validator role from an address.
pub fn execute_remove_validator(
    deps: DepsMut,
    info: MessageInfo,
    validator: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let validator_addr = deps.api.addr_validate(&validator)?;

    if !VALIDATORS
        .may_load(deps.storage, &validator_addr)?
        .unwrap_or(false)
    {
        return Err(ContractError::ValidatorNotRegistered);
    }

    let count = VALIDATOR_COUNT.load(deps.storage)?;
    // The remaining set must still be able to reach quorum.
    if count <= config.threshold {
        return Err(ContractError::ValidatorSetTooSmall {
            remaining: count - 1,
            threshold: config.threshold,
        });
    }

    VALIDATORS.remove(deps.storage, &validator_addr);
    VALIDATOR_COUNT.save(deps.storage, &(count - 1))?;

    Ok(Response::new()
        .add_attribute("action", "remove_validator")
        .add_attribute("validator", validator_addr)
        .add_attribute("validator_count", (count - 1).to_string()))
}

//! Quorumgate Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//!
//! Token movements are dispatched as submessages with `reply_on_success`;
//! the `reply` entry point verifies the balance delta and releases the
//! reentrancy latch, so any non-conforming token aborts the whole call.

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20::Cw20QueryMsg;

use common::guard::release_guard;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_owner, execute_add_supported_chain, execute_add_validator, execute_attest,
    execute_cancel_owner_proposal, execute_finalize_transfer, execute_initiate_transfer,
    execute_pause, execute_propose_owner, execute_remove_validator, execute_unpause,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_compute_transfer_id, query_config, query_has_attested, query_is_chain_supported,
    query_pending_owner, query_stats, query_status, query_supported_chains,
    query_transfer_request, query_validators,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, MAX_VALIDATORS,
    PENDING_BALANCE_CHECK, REPLY_PULL_FUNDS, REPLY_RELEASE_FUNDS, STATS, VALIDATORS,
    VALIDATOR_COUNT,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;

    if msg.validators.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "At least one validator required".to_string(),
        });
    }
    if msg.validators.len() as u32 > MAX_VALIDATORS {
        return Err(ContractError::TooManyValidators {
            max: MAX_VALIDATORS,
        });
    }
    if msg.threshold == 0 || msg.threshold > msg.validators.len() as u32 {
        return Err(ContractError::InvalidThreshold {
            got: msg.threshold,
            validators: msg.validators.len() as u32,
        });
    }
    if msg.min_transfer > msg.max_transfer {
        return Err(ContractError::InvalidTransferBounds {
            min: msg.min_transfer,
            max: msg.max_transfer,
        });
    }

    let config = Config {
        owner,
        paused: false,
        source_chain_id: msg.source_chain_id,
        threshold: msg.threshold,
        min_transfer: msg.min_transfer,
        max_transfer: msg.max_transfer,
    };
    CONFIG.save(deps.storage, &config)?;

    let mut validator_count = 0u32;
    for validator_str in msg.validators {
        let validator = deps.api.addr_validate(&validator_str)?;
        if VALIDATORS.may_load(deps.storage, &validator)?.is_some() {
            return Err(ContractError::ValidatorAlreadyRegistered);
        }
        VALIDATORS.save(deps.storage, &validator, &true)?;
        validator_count += 1;
    }
    VALIDATOR_COUNT.save(deps.storage, &validator_count)?;

    STATS.save(
        deps.storage,
        &Stats {
            total_initiated: 0,
            total_finalized: 0,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("source_chain_id", msg.source_chain_id.to_string())
        .add_attribute("threshold", msg.threshold.to_string())
        .add_attribute("validator_count", validator_count.to_string()))
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
        // Transfer lifecycle
        ExecuteMsg::InitiateTransfer {
            token,
            amount,
            recipient,
            target_chain,
        } => execute_initiate_transfer(deps, env, info, token, amount, recipient, target_chain),
        ExecuteMsg::Attest { transfer_id } => execute_attest(deps, env, info, transfer_id),
        ExecuteMsg::FinalizeTransfer {
            transfer_id,
            token,
            recipient,
            amount,
        } => execute_finalize_transfer(deps, env, info, transfer_id, token, recipient, amount),

        // Validator management
        ExecuteMsg::AddValidator { validator } => execute_add_validator(deps, info, validator),
        ExecuteMsg::RemoveValidator { validator } => {
            execute_remove_validator(deps, info, validator)
        }

        // Chain management
        ExecuteMsg::AddSupportedChain { chain_id } => {
            execute_add_supported_chain(deps, info, chain_id)
        }

        // Admin operations
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
        REPLY_PULL_FUNDS | REPLY_RELEASE_FUNDS => {
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
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Status {} => to_json_binary(&query_status(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::TransferRequest { transfer_id } => {
            to_json_binary(&query_transfer_request(deps, transfer_id)?)
        }
        QueryMsg::HasAttested {
            transfer_id,
            validator,
        } => to_json_binary(&query_has_attested(deps, transfer_id, validator)?),
        QueryMsg::Validators {} => to_json_binary(&query_validators(deps)?),
        QueryMsg::SupportedChains {} => to_json_binary(&query_supported_chains(deps)?),
        QueryMsg::IsChainSupported { chain_id } => {
            to_json_binary(&query_is_chain_supported(deps, chain_id)?)
        }
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::ComputeTransferId {
            token,
            initiator,
            recipient,
            amount,
            target_chain,
        } => to_json_binary(&query_compute_transfer_id(
            deps,
            token,
            initiator,
            recipient,
            amount,
            target_chain,
        )?),
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

//! Transfer lifecycle handlers: initiate, attest, finalize.
//!
//! The request state machine per transfer id is
//! Initiated → Attesting → Finalizable → Finalized (terminal). Both token
//! movements are dispatched as submessages so the `reply` handler can
//! verify the balance delta before the transaction is allowed to commit.

use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, SubMsg, Uint128,
    WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use common::guard::acquire_guard;

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_transfer_id, encode_address};
use crate::state::{
    BalanceCheck, TransferRequest, ATTESTATIONS, CONFIG, PENDING_BALANCE_CHECK, REPLY_PULL_FUNDS,
    REPLY_RELEASE_FUNDS, STATS, SUPPORTED_CHAINS, TRANSFERS, TRANSFER_LOCK_PERIOD, VALIDATORS,
};

/// Convert a `Binary` transfer id into the fixed 32-byte form.
pub fn parse_transfer_id(id: &Binary) -> Result<[u8; 32], ContractError> {
    id.to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidTransferIdLength { got: id.len() })
}

fn ensure_validator(deps: &DepsMut, sender: &cosmwasm_std::Addr) -> Result<(), ContractError> {
    if !VALIDATORS
        .may_load(deps.storage, sender)?
        .unwrap_or(false)
    {
        return Err(ContractError::NotValidator);
    }
    Ok(())
}

/// Query this contract's own CW20 balance.
fn own_balance(
    deps: &DepsMut,
    env: &Env,
    token: &cosmwasm_std::Addr,
) -> Result<Uint128, ContractError> {
    let resp: cw20::BalanceResponse = deps.querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;
    Ok(resp.balance)
}

// ============================================================================
// InitiateTransfer
// ============================================================================

/// Lock `amount` of `token` from the caller and record a content-addressed
/// transfer request. The pull is a submessage; its reply verifies the
/// bridge's balance grew by exactly `amount`.
pub fn execute_initiate_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    recipient: String,
    target_chain: u64,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    if !SUPPORTED_CHAINS
        .may_load(deps.storage, target_chain)?
        .unwrap_or(false)
    {
        return Err(ContractError::ChainNotSupported {
            chain_id: target_chain,
        });
    }

    if amount < config.min_transfer {
        return Err(ContractError::BelowMinimumAmount {
            min_amount: config.min_transfer,
        });
    }
    if amount > config.max_transfer {
        return Err(ContractError::AboveMaximumAmount {
            max_amount: config.max_transfer,
        });
    }

    if recipient.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "Recipient cannot be empty".to_string(),
        });
    }

    let token_addr = deps.api.addr_validate(&token)?;

    // Probe the token: a non-CW20 address fails the TokenInfo query.
    deps.querier
        .query_wasm_smart::<TokenInfoResponse>(&token_addr, &Cw20QueryMsg::TokenInfo {})
        .map_err(|_| ContractError::InvalidTokenContract {
            token: token_addr.to_string(),
        })?;

    let transfer_id = compute_transfer_id(
        &encode_address(deps.as_ref(), &token_addr)?,
        &encode_address(deps.as_ref(), &info.sender)?,
        &recipient,
        amount.u128(),
        target_chain,
    );

    // Replay safety: identical fields produce an identical id.
    if TRANSFERS.may_load(deps.storage, &transfer_id)?.is_some() {
        return Err(ContractError::TransferAlreadyExists {
            transfer_id: bytes32_to_hex(&transfer_id),
        });
    }

    let created_at = env.block.time.seconds();
    let request = TransferRequest {
        token: token_addr.clone(),
        initiator: info.sender.clone(),
        recipient: recipient.clone(),
        amount,
        target_chain,
        attestations: 0,
        processed: false,
        created_at,
    };
    TRANSFERS.save(deps.storage, &transfer_id, &request)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_initiated += 1;
    STATS.save(deps.storage, &stats)?;

    // Snapshot for the reply-side delta check.
    let balance_before = own_balance(&deps, &env, &token_addr)?;
    let expected = balance_before
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow {
            context: "bridge balance".to_string(),
        })?;
    PENDING_BALANCE_CHECK.save(
        deps.storage,
        &BalanceCheck {
            token: token_addr.clone(),
            account: env.contract.address.clone(),
            expected,
        },
    )?;

    let pull_msg = SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                owner: info.sender.to_string(),
                recipient: env.contract.address.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
        REPLY_PULL_FUNDS,
    );

    Ok(Response::new()
        .add_submessage(pull_msg)
        .add_attribute("action", "initiate_transfer")
        .add_attribute("transfer_id", bytes32_to_hex(&transfer_id))
        .add_attribute("token", token_addr)
        .add_attribute("initiator", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount)
        .add_attribute("target_chain", target_chain.to_string())
        .add_attribute("created_at", created_at.to_string()))
}

// ============================================================================
// Attest
// ============================================================================

/// Record one validator's attestation. At most one per (id, validator).
pub fn execute_attest(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    transfer_id: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    ensure_validator(&deps, &info.sender)?;

    let id = parse_transfer_id(&transfer_id)?;
    let mut request =
        TRANSFERS
            .may_load(deps.storage, &id)?
            .ok_or_else(|| ContractError::TransferNotFound {
                transfer_id: bytes32_to_hex(&id),
            })?;

    if request.processed {
        return Err(ContractError::AlreadyFinalized);
    }

    if ATTESTATIONS
        .may_load(deps.storage, (&id, &info.sender))?
        .unwrap_or(false)
    {
        return Err(ContractError::AlreadyAttested);
    }

    request.attestations =
        request
            .attestations
            .checked_add(1)
            .ok_or_else(|| ContractError::Overflow {
                context: "attestation count".to_string(),
            })?;
    ATTESTATIONS.save(deps.storage, (&id, &info.sender), &true)?;
    TRANSFERS.save(deps.storage, &id, &request)?;

    Ok(Response::new()
        .add_attribute("action", "attest")
        .add_attribute("transfer_id", bytes32_to_hex(&id))
        .add_attribute("validator", info.sender)
        .add_attribute("attestations", request.attestations.to_string()))
}

// ============================================================================
// FinalizeTransfer
// ============================================================================

/// Release the locked tokens once the quorum and the lock period are both
/// satisfied. The record is marked processed before the outbound transfer
/// is dispatched; a failed transfer or delta mismatch rolls the flag back
/// with everything else.
pub fn execute_finalize_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    transfer_id: Binary,
    token: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    ensure_validator(&deps, &info.sender)?;

    let id = parse_transfer_id(&transfer_id)?;
    let mut request =
        TRANSFERS
            .may_load(deps.storage, &id)?
            .ok_or_else(|| ContractError::TransferNotFound {
                transfer_id: bytes32_to_hex(&id),
            })?;

    if request.processed {
        return Err(ContractError::AlreadyFinalized);
    }

    // The caller restates the payout parameters; they must match the record.
    let token_addr = deps.api.addr_validate(&token)?;
    if token_addr != request.token || recipient != request.recipient || amount != request.amount {
        return Err(ContractError::TransferMismatch);
    }

    if request.attestations < config.threshold {
        return Err(ContractError::InsufficientAttestations {
            got: request.attestations,
            required: config.threshold,
        });
    }

    let now = env.block.time.seconds();
    let finalizable_at = request.created_at + TRANSFER_LOCK_PERIOD;
    if now < finalizable_at {
        return Err(ContractError::TimelockActive {
            remaining_seconds: finalizable_at - now,
        });
    }

    // Checks-effects-interactions: flip the flag before any external call
    // so a reentrant second finalize sees a processed record.
    request.processed = true;
    TRANSFERS.save(deps.storage, &id, &request)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_finalized += 1;
    STATS.save(deps.storage, &stats)?;

    let recipient_addr = deps.api.addr_validate(&recipient)?;

    let balance_before = own_balance(&deps, &env, &token_addr)?;
    let expected = balance_before
        .checked_sub(amount)
        .map_err(|_| ContractError::Overflow {
            context: "bridge balance".to_string(),
        })?;
    PENDING_BALANCE_CHECK.save(
        deps.storage,
        &BalanceCheck {
            token: token_addr.clone(),
            account: env.contract.address.clone(),
            expected,
        },
    )?;

    let release_msg = SubMsg::reply_on_success(
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient_addr.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
        REPLY_RELEASE_FUNDS,
    );

    Ok(Response::new()
        .add_submessage(release_msg)
        .add_attribute("action", "finalize_transfer")
        .add_attribute("transfer_id", bytes32_to_hex(&id))
        .add_attribute("recipient", recipient_addr)
        .add_attribute("amount", amount)
        .add_attribute("finalized_at", now.to_string()))
}

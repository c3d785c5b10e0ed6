//! Query handlers for the Quorumgate bridge contract.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult, Uint128};

use common::ownership::PENDING_OWNER;

use crate::hash::{compute_transfer_id, encode_address};
use crate::msg::{
    ComputeTransferIdResponse, ConfigResponse, HasAttestedResponse, IsChainSupportedResponse,
    PendingOwnerResponse, StatsResponse, StatusResponse, SupportedChainsResponse,
    TransferRequestResponse, ValidatorsResponse,
};
use crate::state::{
    ATTESTATIONS, CONFIG, STATS, SUPPORTED_CHAINS, TRANSFERS, TRANSFER_LOCK_PERIOD, VALIDATORS,
    VALIDATOR_COUNT,
};

fn parse_id(transfer_id: &Binary) -> StdResult<[u8; 32]> {
    transfer_id.to_vec().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid transfer id length: expected 32 bytes, got {}",
            transfer_id.len()
        ))
    })
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        paused: config.paused,
        source_chain_id: config.source_chain_id,
        threshold: config.threshold,
        min_transfer: config.min_transfer,
        max_transfer: config.max_transfer,
    })
}

pub fn query_status(deps: Deps) -> StdResult<StatusResponse> {
    let config = CONFIG.load(deps.storage)?;
    let validator_count = VALIDATOR_COUNT.load(deps.storage)?;
    let supported_chains = SUPPORTED_CHAINS
        .keys(deps.storage, None, None, Order::Ascending)
        .count() as u32;
    Ok(StatusResponse {
        paused: config.paused,
        validator_count,
        threshold: config.threshold,
        supported_chains,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_initiated: stats.total_initiated,
        total_finalized: stats.total_finalized,
    })
}

pub fn query_transfer_request(deps: Deps, transfer_id: Binary) -> StdResult<TransferRequestResponse> {
    let id = parse_id(&transfer_id)?;
    let request = TRANSFERS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| StdError::generic_err("Transfer not found"))?;
    Ok(TransferRequestResponse {
        transfer_id,
        token: request.token,
        initiator: request.initiator,
        recipient: request.recipient,
        amount: request.amount,
        target_chain: request.target_chain,
        attestations: request.attestations,
        processed: request.processed,
        created_at: request.created_at,
        finalizable_at: request.created_at + TRANSFER_LOCK_PERIOD,
    })
}

pub fn query_has_attested(
    deps: Deps,
    transfer_id: Binary,
    validator: String,
) -> StdResult<HasAttestedResponse> {
    let id = parse_id(&transfer_id)?;
    let validator_addr = deps.api.addr_validate(&validator)?;
    let attested = ATTESTATIONS
        .may_load(deps.storage, (&id, &validator_addr))?
        .unwrap_or(false);
    Ok(HasAttestedResponse { attested })
}

pub fn query_validators(deps: Deps) -> StdResult<ValidatorsResponse> {
    let config = CONFIG.load(deps.storage)?;
    let validators = VALIDATORS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ValidatorsResponse {
        validators,
        threshold: config.threshold,
    })
}

pub fn query_supported_chains(deps: Deps) -> StdResult<SupportedChainsResponse> {
    let chain_ids = SUPPORTED_CHAINS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(SupportedChainsResponse { chain_ids })
}

pub fn query_is_chain_supported(deps: Deps, chain_id: u64) -> StdResult<IsChainSupportedResponse> {
    let supported = SUPPORTED_CHAINS
        .may_load(deps.storage, chain_id)?
        .unwrap_or(false);
    Ok(IsChainSupportedResponse {
        chain_id,
        supported,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

/// Pure projection of the content-addressed id; run off-chain before
/// attesting to confirm the id matches the observed request.
pub fn query_compute_transfer_id(
    deps: Deps,
    token: String,
    initiator: String,
    recipient: String,
    amount: Uint128,
    target_chain: u64,
) -> StdResult<ComputeTransferIdResponse> {
    let token_addr = deps.api.addr_validate(&token)?;
    let initiator_addr = deps.api.addr_validate(&initiator)?;
    let id = compute_transfer_id(
        &encode_address(deps, &token_addr)?,
        &encode_address(deps, &initiator_addr)?,
        &recipient,
        amount.u128(),
        target_chain,
    );
    Ok(ComputeTransferIdResponse {
        transfer_id: Binary::from(id.as_slice()),
    })
}

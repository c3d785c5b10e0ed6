//! Message types for the Quorumgate bridge contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for contract management
    pub owner: String,
    /// Identifier of the chain this instance runs on
    pub source_chain_id: u64,
    /// Number of validator attestations required to finalize
    pub threshold: u32,
    /// Initial validator addresses
    pub validators: Vec<String>,
    /// Minimum transfer amount (in smallest unit)
    pub min_transfer: Uint128,
    /// Maximum transfer amount per request
    pub max_transfer: Uint128,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Transfer Lifecycle
    // ========================================================================
    /// Initiate an outbound transfer. Pulls `amount` of `token` from the
    /// caller via CW20 allowance and records a content-addressed request.
    ///
    /// Authorization: anyone (caller must have approved this contract)
    InitiateTransfer {
        /// CW20 token contract address
        token: String,
        /// Amount to lock
        amount: Uint128,
        /// Recipient on the destination chain (opaque string)
        recipient: String,
        /// Destination chain identifier
        target_chain: u64,
    },

    /// Attest to a recorded transfer. Each validator may attest at most
    /// once per transfer id.
    ///
    /// Authorization: active validators only
    Attest {
        /// The 32-byte transfer id
        transfer_id: Binary,
    },

    /// Finalize a transfer once the attestation quorum is reached and the
    /// lock period has elapsed. The parameters must match the recorded
    /// request exactly.
    ///
    /// Authorization: active validators only
    FinalizeTransfer {
        /// The 32-byte transfer id
        transfer_id: Binary,
        /// CW20 token contract address (must match the record)
        token: String,
        /// Payout recipient on this chain (must match the record)
        recipient: String,
        /// Amount to release (must match the record)
        amount: Uint128,
    },

    // ========================================================================
    // Validator Management
    // ========================================================================
    /// Add a validator
    ///
    /// Authorization: owner only
    AddValidator {
        /// Address to grant the validator role
        validator: String,
    },

    /// Remove a validator. Rejected if the remaining count would drop
    /// below the attestation threshold.
    ///
    /// Authorization: owner only
    RemoveValidator {
        /// Address to revoke the validator role
        validator: String,
    },

    // ========================================================================
    // Chain Management
    // ========================================================================
    /// Add a supported destination chain (append-only set)
    ///
    /// Authorization: owner only
    AddSupportedChain { chain_id: u64 },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Pause the bridge (disables initiate/attest/finalize)
    Pause {},
    /// Resume the bridge
    Unpause {},
    /// Propose a new owner (two-phase handoff)
    ProposeOwner { new_owner: String },
    /// Accept a pending ownership proposal (pending owner only)
    AcceptOwner {},
    /// Cancel a pending ownership proposal
    CancelOwnerProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Status summary
    #[returns(StatusResponse)]
    Status {},

    /// Lifetime counters
    #[returns(StatsResponse)]
    Stats {},

    /// A recorded transfer request
    #[returns(TransferRequestResponse)]
    TransferRequest { transfer_id: Binary },

    /// Whether a validator has attested to a transfer
    #[returns(HasAttestedResponse)]
    HasAttested {
        transfer_id: Binary,
        validator: String,
    },

    /// Active validator set and threshold
    #[returns(ValidatorsResponse)]
    Validators {},

    /// All supported destination chains
    #[returns(SupportedChainsResponse)]
    SupportedChains {},

    /// Whether a single chain is supported
    #[returns(IsChainSupportedResponse)]
    IsChainSupported { chain_id: u64 },

    /// Pending ownership proposal, if any
    #[returns(PendingOwnerResponse)]
    PendingOwner {},

    /// Compute the content-addressed id for a hypothetical transfer
    #[returns(ComputeTransferIdResponse)]
    ComputeTransferId {
        token: String,
        initiator: String,
        recipient: String,
        amount: Uint128,
        target_chain: u64,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub paused: bool,
    pub source_chain_id: u64,
    pub threshold: u32,
    pub min_transfer: Uint128,
    pub max_transfer: Uint128,
}

#[cw_serde]
pub struct StatusResponse {
    pub paused: bool,
    pub validator_count: u32,
    pub threshold: u32,
    pub supported_chains: u32,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_initiated: u64,
    pub total_finalized: u64,
}

#[cw_serde]
pub struct TransferRequestResponse {
    pub transfer_id: Binary,
    pub token: Addr,
    pub initiator: Addr,
    pub recipient: String,
    pub amount: Uint128,
    pub target_chain: u64,
    pub attestations: u32,
    pub processed: bool,
    pub created_at: u64,
    /// Earliest block time at which finalization is permitted
    pub finalizable_at: u64,
}

#[cw_serde]
pub struct HasAttestedResponse {
    pub attested: bool,
}

#[cw_serde]
pub struct ValidatorsResponse {
    pub validators: Vec<Addr>,
    pub threshold: u32,
}

#[cw_serde]
pub struct SupportedChainsResponse {
    pub chain_ids: Vec<u64>,
}

#[cw_serde]
pub struct IsChainSupportedResponse {
    pub chain_id: u64,
    pub supported: bool,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}

#[cw_serde]
pub struct ComputeTransferIdResponse {
    pub transfer_id: Binary,
}

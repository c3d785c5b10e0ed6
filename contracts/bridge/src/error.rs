//! Error types for the Quorumgate bridge contract.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use common::guard::GuardError;
use common::ownership::OwnershipError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not an active validator")]
    NotValidator,

    #[error("Unauthorized: only the pending owner can accept")]
    UnauthorizedPendingOwner,

    // ========================================================================
    // Validator Registry Errors
    // ========================================================================

    #[error("Validator already registered")]
    ValidatorAlreadyRegistered,

    #[error("Validator not registered")]
    ValidatorNotRegistered,

    #[error("Validator limit reached: maximum is {max}")]
    TooManyValidators { max: u32 },

    #[error("Cannot remove validator: {remaining} remaining would drop below threshold {threshold}")]
    ValidatorSetTooSmall { remaining: u32, threshold: u32 },

    #[error("Invalid threshold: got {got} with {validators} validators")]
    InvalidThreshold { got: u32, validators: u32 },

    // ========================================================================
    // Bounds Errors
    // ========================================================================

    #[error("Minimum transfer amount is {min_amount}")]
    BelowMinimumAmount { min_amount: Uint128 },

    #[error("Maximum transfer amount is {max_amount}")]
    AboveMaximumAmount { max_amount: Uint128 },

    #[error("Invalid transfer bounds: min {min} exceeds max {max}")]
    InvalidTransferBounds { min: Uint128, max: Uint128 },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    // ========================================================================
    // State Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Reentrant call")]
    ReentrantCall,

    #[error("Chain not supported: {chain_id}")]
    ChainNotSupported { chain_id: u64 },

    #[error("Chain already supported: {chain_id}")]
    ChainAlreadySupported { chain_id: u64 },

    #[error("Transfer not found: {transfer_id}")]
    TransferNotFound { transfer_id: String },

    #[error("Transfer already exists: {transfer_id}")]
    TransferAlreadyExists { transfer_id: String },

    #[error("Transfer already finalized")]
    AlreadyFinalized,

    #[error("Validator has already attested to this transfer")]
    AlreadyAttested,

    #[error("Insufficient attestations: got {got}, need {required}")]
    InsufficientAttestations { got: u32, required: u32 },

    #[error("Transfer timelock active: {remaining_seconds} seconds remaining")]
    TimelockActive { remaining_seconds: u64 },

    #[error("Finalization parameters do not match the recorded transfer")]
    TransferMismatch,

    #[error("No pending owner")]
    NoPendingOwner,

    // ========================================================================
    // Integrity Errors
    // ========================================================================

    #[error("Token is not a CW20 contract: {token}")]
    InvalidTokenContract { token: String },

    #[error("Balance verification failed: expected {expected}, got {actual}")]
    BalanceMismatch { expected: Uint128, actual: Uint128 },

    #[error("No balance check pending for reply")]
    MissingBalanceCheck,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    #[error("Invalid transfer id length: expected 32 bytes, got {got}")]
    InvalidTransferIdLength { got: usize },

    // ========================================================================
    // Overflow Errors
    // ========================================================================

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },
}

impl From<GuardError> for ContractError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Std(e) => ContractError::Std(e),
            GuardError::ReentrantCall => ContractError::ReentrantCall,
        }
    }
}

impl From<OwnershipError> for ContractError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::Std(e) => ContractError::Std(e),
            OwnershipError::NoPendingOwner => ContractError::NoPendingOwner,
            OwnershipError::NotPendingOwner => ContractError::UnauthorizedPendingOwner,
        }
    }
}

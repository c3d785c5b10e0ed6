//! Error types for the Quorumgate staking pool contract.

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

    #[error("Unauthorized: only the pending owner can accept")]
    UnauthorizedPendingOwner,

    // ========================================================================
    // Bounds Errors
    // ========================================================================

    #[error("Minimum stake amount is {min_amount}")]
    BelowMinimumStake { min_amount: Uint128 },

    #[error("Maximum stake amount is {max_amount}")]
    AboveMaximumStake { max_amount: Uint128 },

    #[error("Invalid stake bounds: min {min} exceeds max {max}")]
    InvalidStakeBounds { min: Uint128, max: Uint128 },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Insufficient stake: have {available}, requested {requested}")]
    InsufficientStake {
        available: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // State Errors
    // ========================================================================

    #[error("Pool is paused")]
    PoolPaused,

    #[error("Pool is not paused: emergency withdrawal is only available while paused")]
    NotPaused,

    #[error("Reentrant call")]
    ReentrantCall,

    #[error("Stake timelock active: {remaining_seconds} seconds remaining")]
    TimelockActive { remaining_seconds: u64 },

    #[error("Daily withdrawal limit exceeded: cap {cap}, used {used}, requested {requested}")]
    RateLimitExceeded {
        cap: Uint128,
        used: Uint128,
        requested: Uint128,
    },

    #[error("Nothing staked")]
    NothingStaked,

    #[error("No reward to claim")]
    NoReward,

    #[error("No bridge configured")]
    BridgeNotConfigured,

    #[error("Chain not supported: {chain_id}")]
    ChainNotSupported { chain_id: u64 },

    #[error("Chain already supported: {chain_id}")]
    ChainAlreadySupported { chain_id: u64 },

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

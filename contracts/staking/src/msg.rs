//! Message types for the Quorumgate staking pool contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128, Uint256};

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
    /// CW20 token staked and paid out by this pool
    pub token: String,
    /// Initial reward units emitted per second
    pub reward_rate: Uint128,
    /// Minimum duration a position must stay staked before withdrawal
    pub min_stake_time: u64,
    /// Minimum stake per call (in smallest unit)
    pub min_stake: Uint128,
    /// Maximum stake per call (in smallest unit)
    pub max_stake: Uint128,
    /// Per-depositor withdrawal cap per 24-hour window
    pub daily_withdraw_limit: Uint128,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Staking Lifecycle
    // ========================================================================
    /// Stake `amount` of the pool token. Pulled from the caller via CW20
    /// allowance. Refreshes the withdrawal timelock for the whole position.
    ///
    /// Authorization: anyone (caller must have approved this contract)
    Stake { amount: Uint128 },

    /// Withdraw part or all of the staked balance. Subject to the stake
    /// timelock and the per-depositor daily rate limit.
    Withdraw { amount: Uint128 },

    /// Claim all settled and pending rewards.
    ClaimReward {},

    /// Withdraw the entire staked balance while the pool is paused.
    /// Unclaimed rewards are forfeited.
    EmergencyWithdraw {},

    /// Relay part of the staked position cross-chain through the
    /// configured bridge collaborator.
    BridgeStake {
        /// Amount of the position to relay
        amount: Uint128,
        /// Recipient on the destination chain (opaque string)
        recipient: String,
        /// Destination chain identifier
        target_chain: u64,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Update the reward emission rate; the accumulator is settled at the
    /// old rate first
    ///
    /// Authorization: owner only
    UpdateRewardRate { reward_rate: Uint128 },
    /// Set the bridge collaborator used by `BridgeStake`
    SetBridge { bridge: String },
    /// Add a supported bridge destination chain (append-only set)
    AddSupportedChain { chain_id: u64 },
    /// Pause the pool (disables everything except emergency withdrawal)
    Pause {},
    /// Resume the pool
    Unpause {},
    /// Propose a new owner (two-phase handoff)
    ProposeOwner { new_owner: String },
    /// Accept a pending ownership proposal (pending owner only)
    AcceptOwner {},
    /// Cancel a pending ownership proposal
    CancelOwnerProposal {},
}

/// The bridge collaborator's fixed-signature entry point, statically
/// encoded during `BridgeStake`.
#[cw_serde]
pub enum BridgeExecuteMsg {
    InitiateTransfer {
        token: String,
        amount: Uint128,
        recipient: String,
        target_chain: u64,
    },
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

    /// A depositor's position
    #[returns(StakeInfoResponse)]
    StakeInfo { address: String },

    /// Total reward claimable as of now (settled plus projected)
    #[returns(PendingRewardResponse)]
    PendingReward { address: String },

    /// Global accrual state
    #[returns(RewardStateResponse)]
    RewardState {},

    /// A depositor's rate-limit window as of now
    #[returns(RateLimitUsageResponse)]
    RateLimitUsage { address: String },

    /// All supported bridge destination chains
    #[returns(SupportedChainsResponse)]
    SupportedChains {},

    /// Pending ownership proposal, if any
    #[returns(PendingOwnerResponse)]
    PendingOwner {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub paused: bool,
    pub token: Addr,
    pub min_stake_time: u64,
    pub min_stake: Uint128,
    pub max_stake: Uint128,
    pub daily_withdraw_limit: Uint128,
    pub bridge: Option<Addr>,
}

#[cw_serde]
pub struct StatusResponse {
    pub paused: bool,
    pub total_staked: Uint128,
    pub reward_rate: Uint128,
}

#[cw_serde]
pub struct StakeInfoResponse {
    pub address: Addr,
    pub amount: Uint128,
    pub staked_at: u64,
    /// Earliest block time at which withdrawal is permitted
    pub unlock_at: u64,
    /// Settled but unclaimed reward (excludes the unsettled projection)
    pub accrued: Uint128,
}

#[cw_serde]
pub struct PendingRewardResponse {
    pub address: Addr,
    /// Settled reward plus the projection since the last settlement
    pub pending_reward: Uint128,
}

#[cw_serde]
pub struct RewardStateResponse {
    pub total_staked: Uint128,
    pub reward_rate: Uint128,
    pub last_update: u64,
    pub acc_reward_per_share: Uint256,
}

#[cw_serde]
pub struct RateLimitUsageResponse {
    pub address: Addr,
    /// Cumulative withdrawals in the current window; zero if the window
    /// has expired as of now
    pub used: Uint128,
    pub window_start: u64,
    /// Headroom left under the daily cap as of now
    pub remaining: Uint128,
}

#[cw_serde]
pub struct SupportedChainsResponse {
    pub chain_ids: Vec<u64>,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}

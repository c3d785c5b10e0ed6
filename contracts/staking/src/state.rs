//! State definitions for the Quorumgate staking pool contract.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128, Uint256};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration.
///
/// The staked token, the stake bounds, the minimum stake duration and the
/// daily withdrawal cap are fixed at instantiation; the pause flag and the
/// bridge collaborator are owner-mutable.
#[cw_serde]
pub struct Config {
    /// Owner address for contract management
    pub owner: Addr,
    /// Whether the pool is currently paused
    pub paused: bool,
    /// CW20 token staked and paid out by this pool
    pub token: Addr,
    /// Minimum duration a position must stay staked before withdrawal
    pub min_stake_time: u64,
    /// Minimum stake per call (in smallest unit)
    pub min_stake: Uint128,
    /// Maximum stake per call (in smallest unit)
    pub max_stake: Uint128,
    /// Per-depositor withdrawal cap per rate-limit period
    pub daily_withdraw_limit: Uint128,
    /// Bridge collaborator for cross-chain position relay, if configured
    pub bridge: Option<Addr>,
}

/// Global reward accrual state, updated lazily on every staking operation.
#[cw_serde]
pub struct RewardState {
    /// Sum of all staked position balances
    pub total_staked: Uint128,
    /// Reward units emitted per second, shared across the pool
    pub reward_rate: Uint128,
    /// Block time of the last accumulator advance (monotonic)
    pub last_update: u64,
    /// Reward per staked unit, scaled by `REWARD_SCALE` (monotonic)
    pub acc_reward_per_share: Uint256,
}

/// A depositor's staked position.
#[cw_serde]
#[derive(Default)]
pub struct Position {
    /// Staked balance
    pub amount: Uint128,
    /// Block time of the most recent stake; anchor for the withdrawal
    /// timelock. Refreshed on every additional deposit, which re-arms the
    /// lock for the entire balance.
    pub staked_at: u64,
    /// Accumulator value at the last settlement for this position
    pub reward_snapshot: Uint256,
    /// Settled but unclaimed reward
    pub accrued: Uint128,
}

/// Per-depositor withdrawal window. The reset is a cliff, not a rolling
/// average: once the window is older than the period, the next withdrawal
/// starts a fresh cumulative.
#[cw_serde]
pub struct RateLimitWindow {
    /// Block time the current window opened
    pub window_start: u64,
    /// Cumulative withdrawals inside the current window
    pub used: Uint128,
}

/// Snapshot taken before a token movement is dispatched; the reply handler
/// compares the post-call balance against `expected`.
#[cw_serde]
pub struct BalanceCheck {
    /// CW20 token whose balance is being verified
    pub token: Addr,
    /// Account whose balance is being verified (always this contract)
    pub account: Addr,
    /// Exact balance the account must hold after the call
    pub expected: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:quorumgate-staking";
/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rate-limit window length (24 hours)
pub const RATE_LIMIT_PERIOD: u64 = 86_400;

/// Fixed-point scale for the reward accumulator
pub const REWARD_SCALE: u128 = 1_000_000_000_000_000_000;

/// Reply id: inbound pull (TransferFrom) during Stake
pub const REPLY_STAKE_PULL: u64 = 1;
/// Reply id: outbound payout (Transfer) during Withdraw/ClaimReward/EmergencyWithdraw
pub const REPLY_PAYOUT: u64 = 2;
/// Reply id: bridge relay during BridgeStake
pub const REPLY_BRIDGE_OUT: u64 = 3;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Global reward accrual state
pub const REWARD_STATE: Item<RewardState> = Item::new("reward_state");

/// Staked positions
/// Key: depositor address, Value: Position
pub const POSITIONS: Map<&Addr, Position> = Map::new("positions");

/// Withdrawal rate-limit windows
/// Key: depositor address, Value: RateLimitWindow
pub const RATE_WINDOWS: Map<&Addr, RateLimitWindow> = Map::new("rate_windows");

/// Supported bridge destination chains (append-only)
/// Key: chain id, Value: always true
pub const SUPPORTED_CHAINS: Map<u64, bool> = Map::new("supported_chains");

/// Balance snapshot awaiting verification in `reply`; at most one exists at
/// a time because the reentrancy latch serializes token-moving operations
pub const PENDING_BALANCE_CHECK: Item<BalanceCheck> = Item::new("pending_balance_check");

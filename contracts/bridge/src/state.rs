//! State definitions for the Quorumgate bridge contract.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration.
///
/// `source_chain_id`, `threshold` and the transfer bounds are fixed at
/// instantiation; everything else is owner-mutable through its own handler.
#[cw_serde]
pub struct Config {
    /// Owner address for contract management
    pub owner: Addr,
    /// Whether the bridge is currently paused
    pub paused: bool,
    /// Identifier of the chain this instance runs on
    pub source_chain_id: u64,
    /// Number of validator attestations required to finalize a transfer
    pub threshold: u32,
    /// Minimum transfer amount (in smallest unit)
    pub min_transfer: Uint128,
    /// Maximum transfer amount per request (in smallest unit)
    pub max_transfer: Uint128,
}

/// A recorded transfer request, keyed by its content-addressed 32-byte id.
#[cw_serde]
pub struct TransferRequest {
    /// CW20 token being bridged
    pub token: Addr,
    /// Address that initiated the transfer and funded the lock
    pub initiator: Addr,
    /// Recipient on the destination chain (opaque string)
    pub recipient: String,
    /// Amount locked
    pub amount: Uint128,
    /// Destination chain identifier
    pub target_chain: u64,
    /// Number of validator attestations recorded so far
    pub attestations: u32,
    /// Whether the transfer has been finalized (one-way)
    pub processed: bool,
    /// Block time of creation; anchor for the finalization timelock
    pub created_at: u64,
}

/// Bridge statistics.
#[cw_serde]
pub struct Stats {
    /// Total number of initiated transfer requests
    pub total_initiated: u64,
    /// Total number of finalized transfers
    pub total_finalized: u64,
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
pub const CONTRACT_NAME: &str = "crates.io:quorumgate-bridge";
/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on the active validator set
pub const MAX_VALIDATORS: u32 = 20;

/// Mandatory delay between initiation and finalization (1 hour)
pub const TRANSFER_LOCK_PERIOD: u64 = 3_600;

/// Reply id: inbound pull (TransferFrom) during InitiateTransfer
pub const REPLY_PULL_FUNDS: u64 = 1;
/// Reply id: outbound payout (Transfer) during FinalizeTransfer
pub const REPLY_RELEASE_FUNDS: u64 = 2;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Active validator addresses
/// Key: validator address, Value: whether active
pub const VALIDATORS: Map<&Addr, bool> = Map::new("validators");

/// Number of active validators
pub const VALIDATOR_COUNT: Item<u32> = Item::new("validator_count");

/// Supported destination chains (append-only)
/// Key: chain id, Value: always true
pub const SUPPORTED_CHAINS: Map<u64, bool> = Map::new("supported_chains");

/// Transfer requests indexed by content-addressed id
/// Key: 32-byte id as &[u8], Value: TransferRequest
pub const TRANSFERS: Map<&[u8], TransferRequest> = Map::new("transfers");

/// Per-validator attestation record, at most one per (id, validator)
/// Key: (32-byte id as &[u8], validator address), Value: true
pub const ATTESTATIONS: Map<(&[u8], &Addr), bool> = Map::new("attestations");

/// Balance snapshot awaiting verification in `reply`; at most one exists at
/// a time because the reentrancy latch serializes token-moving operations
pub const PENDING_BALANCE_CHECK: Item<BalanceCheck> = Item::new("pending_balance_check");

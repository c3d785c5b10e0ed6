//! Quorumgate Staking Pool Contract - Time-Based Reward Accrual
//!
//! Depositors stake a single configured CW20 token and earn a continuous,
//! rate-based reward computed through a lazy per-unit accumulator.
//! Withdrawals are gated by a minimum stake duration and a per-depositor
//! daily rate limit; a staked position can also be relayed cross-chain
//! through the validator-attested bridge contract.
//!
//! # Security
//! - Checks-effects-interactions: balances are decremented before any
//!   outbound transfer is dispatched
//! - Balance-delta verification on every token movement
//! - Reentrancy latch held across external calls
//! - Emergency pause with depositor exit

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod rate_limit;
pub mod rewards;
pub mod state;

pub use crate::error::ContractError;

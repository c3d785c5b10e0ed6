//! Quorumgate Bridge Contract - Validator-Attested Cross-Chain Transfers
//!
//! This contract releases funds only after a quorum of independent
//! validators attests to a transfer.
//!
//! # Flow
//! 1. An initiator locks CW20 tokens with `InitiateTransfer` (pulled via
//!    allowance); the request is recorded under a content-addressed id
//! 2. Active validators each call `Attest` on the transfer id
//! 3. Once the attestation count reaches the quorum threshold and the
//!    1-hour lock period has elapsed, a validator calls `FinalizeTransfer`
//!    to release the tokens
//!
//! # Security
//! - Multi-validator attestation quorum
//! - Content-addressed transfer ids prevent replay
//! - Checks-effects-interactions: a request is marked processed before the
//!   outbound transfer is dispatched
//! - Balance-delta verification on every token movement
//! - Reentrancy latch held across external calls
//! - Emergency pause functionality

pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;

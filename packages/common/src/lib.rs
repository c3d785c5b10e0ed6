//! Common - Shared Security Primitives for Quorumgate Contracts
//!
//! This package provides the cross-cutting pieces used by both the bridge
//! and the staking pool contracts:
//! - `guard`: reentrancy latch held across external token calls
//! - `ownership`: two-phase owner handoff (propose/accept/cancel)

pub mod guard;
pub mod ownership;

pub use guard::{acquire_guard, release_guard, GuardError};
pub use ownership::{OwnershipError, PENDING_OWNER};

//! Execute handlers for the Quorumgate bridge contract.
//!
//! - `transfer` - initiate, attest and finalize handlers
//! - `validators` - validator registry management
//! - `admin` - pause, ownership handoff and chain management

mod admin;
mod transfer;
mod validators;

pub use admin::*;
pub use transfer::*;
pub use validators::*;

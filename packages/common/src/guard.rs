//! Reentrancy latch.
//!
//! A binary flag acquired at the start of every entry point that moves
//! tokens, and released explicitly only on the success path — for handlers
//! that dispatch submessages, in the `reply` handler after the balance
//! delta has been verified. The latch therefore stays held for the whole
//! window in which control is outside the contract; a collaborator that
//! calls back in during that window fails acquisition, which aborts and
//! rolls back the entire transaction, latch included. No release exists on
//! failure paths: the platform's all-or-nothing message semantics restore
//! the latch together with everything else.

use cosmwasm_std::{StdError, Storage};
use cw_storage_plus::Item;
use thiserror::Error;

const GUARD: Item<bool> = Item::new("reentrancy_guard");

#[derive(Error, Debug, PartialEq)]
pub enum GuardError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Reentrant call")]
    ReentrantCall,
}

/// Acquire the latch. Fails if it is already held.
pub fn acquire_guard(storage: &mut dyn Storage) -> Result<(), GuardError> {
    if GUARD.may_load(storage)?.unwrap_or(false) {
        return Err(GuardError::ReentrantCall);
    }
    GUARD.save(storage, &true)?;
    Ok(())
}

/// Release the latch. Called only on the success path.
pub fn release_guard(storage: &mut dyn Storage) {
    GUARD.remove(storage);
}

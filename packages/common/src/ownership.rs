//! Two-phase ownership handoff.
//!
//! The current owner proposes a successor; only that address may accept,
//! which swaps the owner and clears the pending slot atomically. A
//! single-step assignment could hand the contract to an unreachable
//! address; the acceptance step makes that impossible.

use cosmwasm_std::{Addr, Api, StdError, Storage};
use cw_storage_plus::Item;
use thiserror::Error;

pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

#[derive(Error, Debug, PartialEq)]
pub enum OwnershipError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("No pending owner")]
    NoPendingOwner,

    #[error("Unauthorized: only the pending owner can accept")]
    NotPendingOwner,
}

/// Record a proposed successor. Caller must have verified the sender is the
/// current owner.
pub fn propose_owner(
    storage: &mut dyn Storage,
    api: &dyn Api,
    new_owner: &str,
) -> Result<Addr, OwnershipError> {
    let addr = api.addr_validate(new_owner)?;
    PENDING_OWNER.save(storage, &addr)?;
    Ok(addr)
}

/// Complete the handoff. Returns the new owner; the caller stores it in its
/// own config. The pending slot is cleared before returning.
pub fn accept_owner(storage: &mut dyn Storage, sender: &Addr) -> Result<Addr, OwnershipError> {
    let pending = PENDING_OWNER
        .may_load(storage)?
        .ok_or(OwnershipError::NoPendingOwner)?;
    if sender != pending {
        return Err(OwnershipError::NotPendingOwner);
    }
    PENDING_OWNER.remove(storage);
    Ok(pending)
}

/// Withdraw an outstanding proposal.
pub fn cancel_proposal(storage: &mut dyn Storage) {
    PENDING_OWNER.remove(storage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, MockStorage};

    #[test]
    fn propose_accept_cycle() {
        let mut deps = mock_dependencies();
        let proposed =
            propose_owner(&mut deps.storage, &deps.api, "new_owner").unwrap();

        let accepted = accept_owner(&mut deps.storage, &proposed).unwrap();
        assert_eq!(accepted, proposed);

        // Slot is cleared; a second accept finds nothing.
        assert_eq!(
            accept_owner(&mut deps.storage, &proposed).unwrap_err(),
            OwnershipError::NoPendingOwner
        );
    }

    #[test]
    fn only_pending_owner_can_accept() {
        let mut deps = mock_dependencies();
        propose_owner(&mut deps.storage, &deps.api, "new_owner").unwrap();

        let intruder = Addr::unchecked("intruder");
        assert_eq!(
            accept_owner(&mut deps.storage, &intruder).unwrap_err(),
            OwnershipError::NotPendingOwner
        );
    }

    #[test]
    fn cancel_clears_pending() {
        let mut deps = mock_dependencies();
        let proposed =
            propose_owner(&mut deps.storage, &deps.api, "new_owner").unwrap();
        cancel_proposal(&mut deps.storage);
        assert_eq!(
            accept_owner(&mut deps.storage, &proposed).unwrap_err(),
            OwnershipError::NoPendingOwner
        );
    }

    #[test]
    fn accept_without_proposal_fails() {
        let mut storage = MockStorage::new();
        let anyone = Addr::unchecked("anyone");
        assert_eq!(
            accept_owner(&mut storage, &anyone).unwrap_err(),
            OwnershipError::NoPendingOwner
        );
    }
}

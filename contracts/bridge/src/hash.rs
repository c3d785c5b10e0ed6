//! Content-addressed transfer identity.
//!
//! A transfer id is the keccak256 digest of a fixed 160-byte canonical
//! layout over the fields that uniquely determine a transfer. Two requests
//! with identical fields collide by construction, which is what makes the
//! id replay-safe: the ledger rejects an id it has already seen.
//!
//! # Byte Layout (160 bytes total)
//! - Bytes 0-31:    token (canonical address, left-padded to 32 bytes)
//! - Bytes 32-63:   initiator (canonical address, left-padded to 32 bytes)
//! - Bytes 64-95:   keccak256(recipient UTF-8 bytes)
//! - Bytes 96-127:  amount (u128, big-endian, left-padded)
//! - Bytes 128-159: target chain id (u64, big-endian, left-padded)

use cosmwasm_std::{Addr, Deps, StdResult};
use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the canonical transfer id for a request.
pub fn compute_transfer_id(
    token: &[u8; 32],
    initiator: &[u8; 32],
    recipient: &str,
    amount: u128,
    target_chain: u64,
) -> [u8; 32] {
    let mut data = [0u8; 160];

    data[0..32].copy_from_slice(token);
    data[32..64].copy_from_slice(initiator);

    // Recipient is an opaque destination-chain string; hashing it keeps the
    // layout fixed-size regardless of the destination address format.
    data[64..96].copy_from_slice(&keccak256(recipient.as_bytes()));

    // amount left-padded to 32 bytes, big-endian
    data[96 + 16..128].copy_from_slice(&amount.to_be_bytes());

    // target chain id left-padded to 32 bytes, big-endian
    data[128 + 24..160].copy_from_slice(&target_chain.to_be_bytes());

    keccak256(&data)
}

/// Encode an address as 32 bytes: the canonical form left-padded, or its
/// keccak256 digest when the host's canonical form is longer than 32
/// bytes (the same reduction applied to recipient strings).
pub fn encode_address(deps: Deps, addr: &Addr) -> StdResult<[u8; 32]> {
    let canonical = deps.api.addr_canonicalize(addr.as_str())?;
    let bytes = canonical.as_slice();

    if bytes.len() > 32 {
        return Ok(keccak256(bytes));
    }

    let mut result = [0u8; 32];
    let start = 32 - bytes.len();
    result[start..].copy_from_slice(bytes);

    Ok(result)
}

/// Convert a 32-byte id to a 0x-prefixed hex string (for attributes).
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

//! Keccak hashing and universal address encoding
//!
//! Cross-chain values (accounts, tokens, bridge addresses) travel as 32-byte
//! words. A local address is projected from its string form: up to 32 bytes
//! it is left-padded the way EVM chains pad their 20-byte addresses, longer
//! forms are keccak-hashed down to the word width. The projection is a pure
//! function of the address, so both sides of a route derive the same word.

use cosmwasm_std::Addr;
use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Project identifier bytes onto the 32-byte word width
pub fn universal_key(bytes: &[u8]) -> [u8; 32] {
    if bytes.len() <= 32 {
        let mut result = [0u8; 32];
        result[32 - bytes.len()..].copy_from_slice(bytes);
        result
    } else {
        keccak256(bytes)
    }
}

/// Encode a local address as a 32-byte universal word
pub fn encode_account(addr: &Addr) -> [u8; 32] {
    universal_key(addr.as_str().as_bytes())
}

/// Universal key of a local token contract. This is the value a remote bridge
/// registers as the destination token for assets flowing to this chain.
pub fn token_key(token: &Addr) -> [u8; 32] {
    encode_account(token)
}

/// Convert a 32-byte word to a 0x-prefixed hex string (for attributes)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Convert a 20-byte address to a 0x-prefixed hex string
pub fn bytes20_to_hex(bytes: &[u8; 20]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a hex string (with or without 0x prefix) into a 32-byte array
pub fn hex_to_bytes32(input: &str) -> Result<[u8; 32], &'static str> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    if stripped.len() != 64 {
        return Err("invalid hex length: expected 64 characters");
    }
    let raw = hex::decode(stripped).map_err(|_| "invalid hex character")?;
    let mut result = [0u8; 32];
    result.copy_from_slice(&raw);
    Ok(result)
}

/// Parse a hex string (with or without 0x prefix) into a 20-byte address
pub fn hex_to_bytes20(input: &str) -> Result<[u8; 20], &'static str> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    if stripped.len() != 40 {
        return Err("invalid hex length: expected 40 characters");
    }
    let raw = hex::decode(stripped).map_err(|_| "invalid hex character")?;
    let mut result = [0u8; 20];
    result.copy_from_slice(&raw);
    Ok(result)
}

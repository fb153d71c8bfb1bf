//! Attestation verification: ECDSA recovery of the notary identity
//!
//! Signatures are 65 bytes `r || s || v` over the raw proof hash, with
//! `v` in {27, 28}. Of the two mathematically valid `(s, v)` pairs per
//! signature only the low-`s` form is accepted, so a given proof hash admits
//! exactly one signature shape per key.

use cosmwasm_std::Api;

use crate::error::ContractError;
use crate::hash::keccak256;

/// secp256k1 group order halved; any `s` above this is the malleable twin
const SECP256K1_HALF_N: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b,
    0x20, 0xa0,
];

/// Recover the 20-byte signer identity of a 65-byte signature over
/// `proof_hash`.
///
/// Fails with `InvalidSignature` on any malformed, high-`s`, or
/// unrecoverable signature. Matching the recovered identity against the
/// registered notary is the caller's job.
pub fn recover_signer(
    api: &dyn Api,
    proof_hash: &[u8; 32],
    signature: &[u8],
) -> Result<[u8; 20], ContractError> {
    if signature.len() != 65 {
        return Err(ContractError::InvalidSignature);
    }

    let recovery_param = match signature[64] {
        27 => 0,
        28 => 1,
        _ => return Err(ContractError::InvalidSignature),
    };

    let s: &[u8] = &signature[32..64];
    if s > SECP256K1_HALF_N.as_slice() {
        return Err(ContractError::InvalidSignature);
    }

    let pubkey = api
        .secp256k1_recover_pubkey(proof_hash, &signature[..64], recovery_param)
        .map_err(|_| ContractError::InvalidSignature)?;

    // 65-byte uncompressed key with 0x04 prefix; identity is the trailing
    // 20 bytes of the keccak of the coordinates
    if pubkey.len() != 65 {
        return Err(ContractError::InvalidSignature);
    }
    let digest = keccak256(&pubkey[1..]);
    let mut identity = [0u8; 20];
    identity.copy_from_slice(&digest[12..]);
    Ok(identity)
}

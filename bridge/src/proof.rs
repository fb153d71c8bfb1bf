//! Proof codec: the fixed-width tuple the notary signs
//!
//! A proof is exactly 256 bytes: eight 32-byte big-endian words
//! `[chain_id, status, tx_hash, block_number, block_hash, tx_index,
//! receipt_hash, amount]`. The leading word is the origin chain id (where the
//! deposit transaction executed). keccak256 of these bytes is the proof hash,
//! which is what the notary signs and what the consumed-proof set records.

use cosmwasm_std::Uint128;

use crate::error::ContractError;
use crate::hash::keccak256;
use crate::receipt::{u128_word, u64_word};

/// Encoded proof size in bytes
pub const PROOF_SIZE: usize = 8 * 32;

/// Provenance of a deposit, as attested by the notary
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiptProof {
    /// Chain id of the origin chain (where the deposit executed)
    pub chain_id: u64,
    /// Execution status of the deposit transaction
    pub status: u64,
    /// Hash of the deposit transaction
    pub tx_hash: [u8; 32],
    /// Block number containing the transaction
    pub block_number: u64,
    /// Hash of that block
    pub block_hash: [u8; 32],
    /// Index of the transaction within the block
    pub tx_index: u64,
    /// keccak256 of the canonical receipt encoding
    pub receipt_hash: [u8; 32],
    /// Transferred amount
    pub amount: Uint128,
}

impl ReceiptProof {
    /// Canonical 256-byte encoding
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PROOF_SIZE);
        out.extend_from_slice(&u64_word(self.chain_id));
        out.extend_from_slice(&u64_word(self.status));
        out.extend_from_slice(&self.tx_hash);
        out.extend_from_slice(&u64_word(self.block_number));
        out.extend_from_slice(&self.block_hash);
        out.extend_from_slice(&u64_word(self.tx_index));
        out.extend_from_slice(&self.receipt_hash);
        out.extend_from_slice(&u128_word(self.amount.u128()));
        out
    }

    /// keccak256 of the canonical encoding; this is what gets signed
    pub fn hash(&self) -> [u8; 32] {
        keccak256(&self.encode())
    }

    /// Strict decode; rejects any input that is not exactly 256 bytes or
    /// whose numeric words overflow their native width.
    pub fn decode(raw: &[u8]) -> Result<Self, ContractError> {
        if raw.len() != PROOF_SIZE {
            return Err(ContractError::InvalidProofLength { got: raw.len() });
        }

        let word = |i: usize| -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&raw[i * 32..(i + 1) * 32]);
            out
        };

        Ok(ReceiptProof {
            chain_id: word_to_u64(&word(0), "chain id")?,
            status: word_to_u64(&word(1), "status")?,
            tx_hash: word(2),
            block_number: word_to_u64(&word(3), "block number")?,
            block_hash: word(4),
            tx_index: word_to_u64(&word(5), "tx index")?,
            receipt_hash: word(6),
            amount: word_to_uint128(&word(7), "amount")?,
        })
    }
}

fn word_to_u64(word: &[u8; 32], what: &str) -> Result<u64, ContractError> {
    if word[..24].iter().any(|b| *b != 0) {
        return Err(ContractError::InvalidProof {
            reason: format!("{what} exceeds 64 bits"),
        });
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(raw))
}

fn word_to_uint128(word: &[u8; 32], what: &str) -> Result<Uint128, ContractError> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(ContractError::InvalidProof {
            reason: format!("{what} exceeds 128 bits"),
        });
    }
    let mut raw = [0u8; 16];
    raw.copy_from_slice(&word[16..]);
    Ok(Uint128::from(u128::from_be_bytes(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_proof() -> ReceiptProof {
        ReceiptProof {
            chain_id: 31337,
            status: 1,
            tx_hash: [0x01; 32],
            block_number: 1_234_567,
            block_hash: [0x02; 32],
            tx_index: 3,
            receipt_hash: [0x03; 32],
            amount: Uint128::new(10_000_000_000_000_000_000),
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let proof = sample_proof();
        let encoded = proof.encode();
        assert_eq!(encoded.len(), PROOF_SIZE);
        let decoded = ReceiptProof::decode(&encoded).unwrap();
        assert_eq!(decoded, proof);
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn every_field_changes_the_hash() {
        let base = sample_proof();
        let variants = [
            ReceiptProof { chain_id: 1, ..base.clone() },
            ReceiptProof { status: 0, ..base.clone() },
            ReceiptProof { tx_hash: [0xff; 32], ..base.clone() },
            ReceiptProof { block_number: 0, ..base.clone() },
            ReceiptProof { block_hash: [0xff; 32], ..base.clone() },
            ReceiptProof { tx_index: 4, ..base.clone() },
            ReceiptProof { receipt_hash: [0xff; 32], ..base.clone() },
            ReceiptProof { amount: Uint128::one(), ..base.clone() },
        ];
        for variant in variants {
            assert_ne!(base.hash(), variant.hash());
        }
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            ReceiptProof::decode(&[0u8; 255]).unwrap_err(),
            ContractError::InvalidProofLength { got: 255 }
        );
        assert_eq!(
            ReceiptProof::decode(&[0u8; 257]).unwrap_err(),
            ContractError::InvalidProofLength { got: 257 }
        );
    }

    #[test]
    fn decode_rejects_overflowing_chain_id() {
        let mut raw = sample_proof().encode();
        raw[0] = 0x01; // top byte of the chain id word
        assert!(ReceiptProof::decode(&raw).is_err());
    }
}

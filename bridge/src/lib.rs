//! Inception Bridge Contract - Cross-Chain Token Bridge Core
//!
//! This contract moves cw20 tokens between this chain and remote bridge
//! instances using notary-attested transaction receipts.
//!
//! # Outgoing Flow (Deposit)
//! 1. User sends cw20 tokens to this contract with a `Deposit` hook payload
//! 2. The contract burns the tokens (or forwards them into a lockbox) and
//!    emits a `Deposited` record with a fresh nonce
//! 3. The off-chain notary observes the record, fetches the transaction
//!    receipt, and signs a proof binding it to the origin chain
//!
//! # Incoming Flow (Withdraw)
//! 1. Anyone submits (proof, receipt, signature, recipient)
//! 2. The contract re-derives the receipt hash, checks the proof against it,
//!    recovers the notary from the signature, and consumes the proof hash
//! 3. Tokens are minted (or released from a lockbox) to the recipient
//!
//! # Security
//! - Single-notary ECDSA attestation with low-s canonicalization
//! - Consumed-proof set for exactly-once redemption
//! - Dual sliding-window rate limits per token and direction
//! - Route and destination registries gating both flows
//! - Emergency pause and timelocked two-step ownership

pub mod attestation;
pub mod caps;
pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
pub mod proof;
mod query;
pub mod receipt;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::keccak256;
pub use crate::proof::ReceiptProof;
pub use crate::receipt::{DepositedLog, LogEntry, TokenMetadata, TransactionReceipt};

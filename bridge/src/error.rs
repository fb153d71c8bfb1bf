//! Error types for the Inception Bridge contract

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending owner change")]
    NoPendingOwner,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Null address not allowed")]
    NullAddress,

    #[error("Invalid chain id: {chain_id}")]
    InvalidChain { chain_id: u64 },

    #[error("Bridge already added for chain {chain_id}")]
    BridgeAlreadyAdded { chain_id: u64 },

    #[error("No bridge registered for chain {chain_id}")]
    BridgeNotExist { chain_id: u64 },

    #[error("No destination chain route for chain {chain_id}")]
    UnknownDestinationChain { chain_id: u64 },

    #[error("Destination already exists for token {token} on chain {chain_id}")]
    DestinationAlreadyExists { token: String, chain_id: u64 },

    #[error("Unknown destination for token {token} on chain {chain_id}")]
    UnknownDestination { token: String, chain_id: u64 },

    #[error("Source bridge is not a registered route for chain {chain_id}")]
    UnknownBridge { chain_id: u64 },

    #[error("Lockbox already set for token {token}")]
    LockboxAlreadySet { token: String },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    // ========================================================================
    // Integrity Errors
    // ========================================================================

    #[error("Invalid receipt encoding: {reason}")]
    InvalidReceipt { reason: String },

    #[error("Invalid proof length: expected 256 bytes, got {got}")]
    InvalidProofLength { got: usize },

    #[error("Invalid proof encoding: {reason}")]
    InvalidProof { reason: String },

    #[error("Receipt hash in proof does not match the submitted receipt")]
    ReceiptHashMismatch,

    #[error("Amount mismatch: proof carries {proof_amount}, receipt carries {receipt_amount}")]
    AmountMismatch {
        proof_amount: Uint128,
        receipt_amount: Uint128,
    },

    #[error("Receipt is bound to chain {actual}, this bridge serves chain {expected}")]
    ReceiptWrongChain { expected: u64, actual: u64 },

    #[error("Deposit log emitted by an invalid contract address")]
    InvalidContractAddress,

    #[error("Deposit log carries an invalid source token address")]
    InvalidFromTokenAddress,

    #[error("Recipient does not match the receiver bound in the deposit log")]
    ReceiverMismatch,

    // ========================================================================
    // Authentication Errors
    // ========================================================================

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signature was not produced by the registered notary")]
    WrongSignature,

    // ========================================================================
    // Replay Errors
    // ========================================================================

    #[error("Withdrawal proof already used")]
    WithdrawalProofUsed,

    // ========================================================================
    // Rate Limit Errors
    // ========================================================================

    #[error("Short cap exceeded: cap is {cap}, charge would total {attempted}")]
    ShortCapExceeded { cap: Uint128, attempted: Uint128 },

    #[error("Long cap exceeded: cap is {cap}, charge would total {attempted}")]
    LongCapExceeded { cap: Uint128, attempted: Uint128 },
}

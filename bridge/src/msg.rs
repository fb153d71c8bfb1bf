//! Message types for the Inception Bridge contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::state::CapDirection;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for contract management
    pub owner: String,
    /// 20-byte hex identity of the attesting notary key
    pub notary: String,
    /// This chain's bridge-protocol chain id (must be nonzero)
    pub chain_id: u64,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Hook payload carried inside a cw20 `Send`
#[cw_serde]
pub enum ReceiveMsg {
    /// Deposit the sent tokens for bridging
    Deposit {
        /// Destination chain id (must have a registered route)
        dest_chain_id: u64,
        /// Recipient on the destination chain (32-byte universal account)
        recipient: Binary,
    },
}

/// Interface of a lockbox custodian, the lock/unlock alternative to
/// mint/burn. The bridge sends this to the registered custodian on
/// withdrawal; deposits reach the custodian as plain cw20 transfers.
#[cw_serde]
pub enum LockboxExecuteMsg {
    /// Release previously locked tokens to a recipient
    Release {
        token: String,
        recipient: String,
        amount: Uint128,
    },
}

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Transfers
    // ========================================================================
    /// Deposit cw20 tokens for bridging (cw20 receiver interface; the
    /// embedded message must be `ReceiveMsg::Deposit`)
    Receive(Cw20ReceiveMsg),

    /// Redeem a notary-attested deposit from another chain
    Withdraw {
        /// Canonical 256-byte proof encoding
        proof: Binary,
        /// Canonical RLP receipt encoding
        receipt: Binary,
        /// 65-byte notary signature over the proof hash
        signature: Binary,
        /// Recipient on this chain; must match the receiver bound in the
        /// receipt's deposit log
        recipient: String,
    },

    // ========================================================================
    // Bridge Registry (owner only)
    // ========================================================================
    /// Register the remote bridge serving a destination chain
    AddBridge {
        /// Remote bridge address (20-byte hex)
        bridge: String,
        /// Destination chain id
        chain_id: u64,
    },

    /// Remove a chain route (invalidates its destinations)
    RemoveBridge { chain_id: u64 },

    /// Map a local token to its representation on a routed chain
    AddDestination {
        /// Local cw20 token address
        token: String,
        /// Destination chain id
        chain_id: u64,
        /// Remote token key (32-byte hex)
        dest_token: String,
    },

    /// Remove a token destination mapping
    RemoveDestination {
        token: String,
        chain_id: u64,
        dest_token: String,
    },

    // ========================================================================
    // Capacity Ledger (owner only)
    // ========================================================================
    /// Set the short-window cap for a token (zero = always exceeded)
    SetShortCap { token: String, value: Uint128 },

    /// Set the long-window cap for a token (zero = always exceeded)
    SetLongCap { token: String, value: Uint128 },

    /// Set the short window duration in seconds (zero = never resets)
    SetShortCapDuration { value: u64 },

    /// Set the long window duration in seconds (zero = never resets)
    SetLongCapDuration { value: u64 },

    // ========================================================================
    // Administration (owner only)
    // ========================================================================
    /// Replace the attesting notary identity (20-byte hex, never null)
    SetNotary { notary: String },

    /// Register the lockbox custodian for a lock/unlock token. Set-once;
    /// tokens without a lockbox use mint/burn semantics.
    SetLockbox { token: String, lockbox: String },

    /// Pause all transfers
    Pause {},

    /// Resume transfers
    Unpause {},

    /// Propose a new owner (starts the timelock)
    ProposeOwner { new_owner: String },

    /// Accept the pending owner role (after the timelock)
    AcceptOwner {},

    /// Cancel a pending owner proposal
    CancelOwnerProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Route for a destination chain
    #[returns(RouteResponse)]
    Route { chain_id: u64 },

    /// All registered routes
    #[returns(RoutesResponse)]
    Routes {},

    /// Destination token for (local token, chain)
    #[returns(DestinationResponse)]
    Destination { token: String, chain_id: u64 },

    /// All registered destinations
    #[returns(DestinationsResponse)]
    Destinations {},

    /// Lockbox custodian for a token (if any)
    #[returns(LockboxResponse)]
    Lockbox { token: String },

    /// Caps and window durations for a token
    #[returns(CapConfigResponse)]
    CapConfig { token: String },

    /// Current-stamp usage for (token, direction)
    #[returns(CapUsageResponse)]
    CapUsage {
        token: String,
        direction: CapDirection,
    },

    /// Whether a proof hash has been consumed
    #[returns(ProofUsedResponse)]
    IsProofUsed {
        /// 32-byte hex proof hash
        proof_hash: String,
    },

    /// Universal 32-byte key of a local token (what a remote bridge
    /// registers as the destination token for assets flowing here)
    #[returns(TokenKeyResponse)]
    TokenKey { token: String },

    /// Pending owner proposal (if any)
    #[returns(PendingOwnerResponse)]
    PendingOwner {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: String,
    /// Notary identity as 0x-prefixed hex
    pub notary: String,
    pub chain_id: u64,
    pub paused: bool,
    /// Last emitted deposit nonce
    pub nonce: u64,
}

#[cw_serde]
pub struct RouteInfo {
    pub chain_id: u64,
    /// Remote bridge address as 0x-prefixed hex
    pub bridge: String,
}

#[cw_serde]
pub struct RouteResponse {
    pub route: Option<RouteInfo>,
}

#[cw_serde]
pub struct RoutesResponse {
    pub routes: Vec<RouteInfo>,
}

#[cw_serde]
pub struct DestinationInfo {
    pub token: String,
    pub chain_id: u64,
    /// Remote token key as 0x-prefixed hex
    pub dest_token: String,
}

#[cw_serde]
pub struct DestinationResponse {
    pub destination: Option<DestinationInfo>,
}

#[cw_serde]
pub struct DestinationsResponse {
    pub destinations: Vec<DestinationInfo>,
}

#[cw_serde]
pub struct LockboxResponse {
    pub lockbox: Option<String>,
}

#[cw_serde]
pub struct CapConfigResponse {
    pub short_cap: Uint128,
    pub long_cap: Uint128,
    pub short_duration: u64,
    pub long_duration: u64,
}

#[cw_serde]
pub struct CapUsageResponse {
    pub short_stamp: u64,
    pub short_used: Uint128,
    pub long_stamp: u64,
    pub long_used: Uint128,
}

#[cw_serde]
pub struct ProofUsedResponse {
    pub used: bool,
}

#[cw_serde]
pub struct TokenKeyResponse {
    /// 32-byte universal key as 0x-prefixed hex
    pub key: String,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub new_owner: Option<String>,
    pub execute_after_seconds: Option<u64>,
}

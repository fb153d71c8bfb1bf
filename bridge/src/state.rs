//! State definitions for the Inception Bridge contract
//!
//! Administrative state (routes, destinations, caps, notary) is mutated only
//! by the owner and read on every deposit/withdraw. Consumed proof hashes are
//! written only by successful withdrawals and never deleted.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Owner address for contract management
    pub owner: Addr,
    /// EVM-style identity of the attesting notary key (keccak of its pubkey)
    pub notary: [u8; 20],
    /// This chain's bridge-protocol chain id (never zero)
    pub chain_id: u64,
    /// Whether the bridge is currently paused
    pub paused: bool,
}

/// Pending owner change proposal
#[cw_serde]
pub struct PendingOwner {
    /// Proposed new owner address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

// ============================================================================
// Capacity Ledger
// ============================================================================

/// Direction of a capacity charge. Deposit and withdraw flow accumulate
/// in independent counters for the same token.
#[cw_serde]
#[derive(Copy)]
pub enum CapDirection {
    Deposit,
    Withdraw,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:inception-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "1.0.0";

/// 7 days in seconds for owner change timelock
pub const OWNER_TIMELOCK_DURATION: u64 = 604_800;

/// Default short capacity window duration (1 hour)
pub const DEFAULT_SHORT_CAP_DURATION: u64 = 3_600;

/// Default long capacity window duration (24 hours)
pub const DEFAULT_LONG_CAP_DURATION: u64 = 86_400;

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending owner proposal (if any)
pub const PENDING_OWNER: Item<PendingOwner> = Item::new("pending_owner");

/// Monotonic deposit counter; the first deposit emits nonce 1
pub const NONCE: Item<u64> = Item::new("nonce");

/// Bridge routes: destination chain id -> remote bridge address
pub const ROUTES: Map<u64, [u8; 20]> = Map::new("routes");

/// Token destinations: (local token, destination chain id) -> remote token key
/// A (token, chain) pair maps to at most one remote token at a time.
pub const DESTINATIONS: Map<(&str, u64), [u8; 32]> = Map::new("destinations");

/// Reverse index: 32-byte universal key of a local token -> local token
/// address. Maintained by destination registration; used to resolve the
/// `to_token` word embedded in an incoming receipt.
pub const TOKEN_KEYS: Map<&[u8], String> = Map::new("token_keys");

/// Lockbox custodians: token -> custodian address, set-once per token.
/// Tokens without a lockbox use mint/burn semantics.
pub const LOCKBOXES: Map<&str, Addr> = Map::new("lockboxes");

/// Consumed proof hashes, append-only
pub const USED_PROOFS: Map<&[u8], bool> = Map::new("used_proofs");

// ============================================================================
// Capacity Ledger Storage
// ============================================================================

/// Short window cap per token (missing or zero = always exceeded)
pub const SHORT_CAPS: Map<&str, Uint128> = Map::new("short_caps");

/// Long window cap per token (missing or zero = always exceeded)
pub const LONG_CAPS: Map<&str, Uint128> = Map::new("long_caps");

/// Short window duration in seconds (zero = one permanent window)
pub const SHORT_CAP_DURATION: Item<u64> = Item::new("short_cap_duration");

/// Long window duration in seconds (zero = one permanent window)
pub const LONG_CAP_DURATION: Item<u64> = Item::new("long_cap_duration");

/// Deposit-direction usage per (token, short stamp)
pub const SHORT_USAGE_DEPOSIT: Map<(&str, u64), Uint128> = Map::new("short_usage_deposit");

/// Withdraw-direction usage per (token, short stamp)
pub const SHORT_USAGE_WITHDRAW: Map<(&str, u64), Uint128> = Map::new("short_usage_withdraw");

/// Deposit-direction usage per (token, long stamp)
pub const LONG_USAGE_DEPOSIT: Map<(&str, u64), Uint128> = Map::new("long_usage_deposit");

/// Withdraw-direction usage per (token, long stamp)
pub const LONG_USAGE_WITHDRAW: Map<(&str, u64), Uint128> = Map::new("long_usage_withdraw");

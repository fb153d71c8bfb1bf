//! Query handlers for the Inception Bridge contract

use cosmwasm_std::{Deps, Env, Order, StdError, StdResult};

use crate::caps;
use crate::hash::{bytes20_to_hex, bytes32_to_hex, hex_to_bytes32, token_key};
use crate::msg::{
    CapConfigResponse, CapUsageResponse, ConfigResponse, DestinationInfo, DestinationResponse,
    DestinationsResponse, LockboxResponse, PendingOwnerResponse, ProofUsedResponse, RouteInfo,
    RouteResponse, RoutesResponse, TokenKeyResponse,
};
use crate::state::{
    CapDirection, CONFIG, DESTINATIONS, LOCKBOXES, LONG_CAPS, LONG_CAP_DURATION, NONCE,
    PENDING_OWNER, ROUTES, SHORT_CAPS, SHORT_CAP_DURATION, USED_PROOFS,
};

/// Query handler for contract configuration
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let nonce = NONCE.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner.to_string(),
        notary: bytes20_to_hex(&config.notary),
        chain_id: config.chain_id,
        paused: config.paused,
        nonce,
    })
}

/// Query handler for a single chain route
pub fn query_route(deps: Deps, chain_id: u64) -> StdResult<RouteResponse> {
    let route = ROUTES
        .may_load(deps.storage, chain_id)?
        .map(|bridge| RouteInfo {
            chain_id,
            bridge: bytes20_to_hex(&bridge),
        });
    Ok(RouteResponse { route })
}

/// Query handler for all registered routes
pub fn query_routes(deps: Deps) -> StdResult<RoutesResponse> {
    let routes = ROUTES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (chain_id, bridge) = item?;
            Ok(RouteInfo {
                chain_id,
                bridge: bytes20_to_hex(&bridge),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(RoutesResponse { routes })
}

/// Query handler for a single token destination
pub fn query_destination(deps: Deps, token: String, chain_id: u64) -> StdResult<DestinationResponse> {
    let token = deps.api.addr_validate(&token)?;
    let destination = DESTINATIONS
        .may_load(deps.storage, (token.as_str(), chain_id))?
        .map(|dest_token| DestinationInfo {
            token: token.to_string(),
            chain_id,
            dest_token: bytes32_to_hex(&dest_token),
        });
    Ok(DestinationResponse { destination })
}

/// Query handler for all registered destinations
pub fn query_destinations(deps: Deps) -> StdResult<DestinationsResponse> {
    let destinations = DESTINATIONS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let ((token, chain_id), dest_token) = item?;
            Ok(DestinationInfo {
                token,
                chain_id,
                dest_token: bytes32_to_hex(&dest_token),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(DestinationsResponse { destinations })
}

/// Query handler for a token's lockbox custodian
pub fn query_lockbox(deps: Deps, token: String) -> StdResult<LockboxResponse> {
    let token = deps.api.addr_validate(&token)?;
    let lockbox = LOCKBOXES
        .may_load(deps.storage, token.as_str())?
        .map(|addr| addr.to_string());
    Ok(LockboxResponse { lockbox })
}

/// Query handler for a token's caps and the window durations
pub fn query_cap_config(deps: Deps, token: String) -> StdResult<CapConfigResponse> {
    let token = deps.api.addr_validate(&token)?;
    Ok(CapConfigResponse {
        short_cap: SHORT_CAPS
            .may_load(deps.storage, token.as_str())?
            .unwrap_or_default(),
        long_cap: LONG_CAPS
            .may_load(deps.storage, token.as_str())?
            .unwrap_or_default(),
        short_duration: SHORT_CAP_DURATION.load(deps.storage)?,
        long_duration: LONG_CAP_DURATION.load(deps.storage)?,
    })
}

/// Query handler for current-stamp usage of (token, direction)
pub fn query_cap_usage(
    deps: Deps,
    env: Env,
    token: String,
    direction: CapDirection,
) -> StdResult<CapUsageResponse> {
    let token = deps.api.addr_validate(&token)?;
    let now = env.block.time;
    let (short_stamp, short_used) = caps::short_usage(deps.storage, token.as_str(), direction, now)?;
    let (long_stamp, long_used) = caps::long_usage(deps.storage, token.as_str(), direction, now)?;
    Ok(CapUsageResponse {
        short_stamp,
        short_used,
        long_stamp,
        long_used,
    })
}

/// Query handler for proof consumption
pub fn query_is_proof_used(deps: Deps, proof_hash: String) -> StdResult<ProofUsedResponse> {
    let hash = hex_to_bytes32(&proof_hash).map_err(StdError::generic_err)?;
    Ok(ProofUsedResponse {
        used: USED_PROOFS.has(deps.storage, &hash),
    })
}

/// Query handler for a local token's universal 32-byte key
pub fn query_token_key(deps: Deps, token: String) -> StdResult<TokenKeyResponse> {
    let token = deps.api.addr_validate(&token)?;
    let key = token_key(&token);
    Ok(TokenKeyResponse {
        key: bytes32_to_hex(&key),
    })
}

/// Query handler for the pending owner proposal
pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    let pending = PENDING_OWNER.may_load(deps.storage)?;
    Ok(PendingOwnerResponse {
        new_owner: pending.as_ref().map(|p| p.new_address.to_string()),
        execute_after_seconds: pending.map(|p| p.execute_after.seconds()),
    })
}

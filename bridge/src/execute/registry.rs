//! Bridge registry handlers (routes and token destinations)
//!
//! Routes map a destination chain id to the remote bridge serving it.
//! Destinations map a local token to its representation on a routed chain.
//! All four handlers are owner-only.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::hash::{bytes20_to_hex, bytes32_to_hex, hex_to_bytes20, hex_to_bytes32, token_key};
use crate::state::{CONFIG, DESTINATIONS, ROUTES, TOKEN_KEYS};

/// Execute handler for registering a chain route
pub fn execute_add_bridge(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    bridge: String,
    chain_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    if chain_id == 0 {
        return Err(ContractError::InvalidChain { chain_id });
    }

    let bridge = hex_to_bytes20(&bridge).map_err(|reason| ContractError::InvalidAddress {
        reason: reason.to_string(),
    })?;
    if bridge == [0u8; 20] {
        return Err(ContractError::NullAddress);
    }

    if ROUTES.has(deps.storage, chain_id) {
        return Err(ContractError::BridgeAlreadyAdded { chain_id });
    }
    ROUTES.save(deps.storage, chain_id, &bridge)?;

    Ok(Response::new()
        .add_attribute("method", "add_bridge")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("bridge", bytes20_to_hex(&bridge)))
}

/// Execute handler for removing a chain route
pub fn execute_remove_bridge(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    chain_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let bridge = ROUTES
        .may_load(deps.storage, chain_id)?
        .ok_or(ContractError::BridgeNotExist { chain_id })?;
    ROUTES.remove(deps.storage, chain_id);

    Ok(Response::new()
        .add_attribute("method", "remove_bridge")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("bridge", bytes20_to_hex(&bridge)))
}

/// Execute handler for mapping a local token onto a routed chain
pub fn execute_add_destination(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token: String,
    chain_id: u64,
    dest_token: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let token = deps.api.addr_validate(&token)?;
    let dest_token = hex_to_bytes32(&dest_token).map_err(|reason| {
        ContractError::InvalidAddress {
            reason: reason.to_string(),
        }
    })?;
    if dest_token == [0u8; 32] {
        return Err(ContractError::NullAddress);
    }

    if !ROUTES.has(deps.storage, chain_id) {
        return Err(ContractError::UnknownDestinationChain { chain_id });
    }
    if DESTINATIONS.has(deps.storage, (token.as_str(), chain_id)) {
        return Err(ContractError::DestinationAlreadyExists {
            token: token.to_string(),
            chain_id,
        });
    }
    DESTINATIONS.save(deps.storage, (token.as_str(), chain_id), &dest_token)?;

    // Reverse index so incoming receipts can resolve their target token
    let key = token_key(&token);
    TOKEN_KEYS.save(deps.storage, &key, &token.to_string())?;

    Ok(Response::new()
        .add_attribute("method", "add_destination")
        .add_attribute("token", token.as_str())
        .add_attribute("token_key", bytes32_to_hex(&key))
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("dest_token", bytes32_to_hex(&dest_token)))
}

/// Execute handler for removing a token destination mapping
pub fn execute_remove_destination(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token: String,
    chain_id: u64,
    dest_token: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let token = deps.api.addr_validate(&token)?;
    let dest_token = hex_to_bytes32(&dest_token).map_err(|reason| {
        ContractError::InvalidAddress {
            reason: reason.to_string(),
        }
    })?;

    if !ROUTES.has(deps.storage, chain_id) {
        return Err(ContractError::UnknownDestinationChain { chain_id });
    }
    let registered = DESTINATIONS.may_load(deps.storage, (token.as_str(), chain_id))?;
    if registered != Some(dest_token) {
        return Err(ContractError::UnknownDestination {
            token: token.to_string(),
            chain_id,
        });
    }
    DESTINATIONS.remove(deps.storage, (token.as_str(), chain_id));

    Ok(Response::new()
        .add_attribute("method", "remove_destination")
        .add_attribute("token", token.as_str())
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("dest_token", bytes32_to_hex(&dest_token)))
}

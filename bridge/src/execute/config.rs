//! Configuration handlers: caps, notary, lockboxes, pause

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::hash::{bytes20_to_hex, hex_to_bytes20};
use crate::state::{
    Config, CONFIG, LOCKBOXES, LONG_CAPS, LONG_CAP_DURATION, SHORT_CAPS, SHORT_CAP_DURATION,
};

fn assert_owner(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Execute handler for setting a token's short-window cap
pub fn execute_set_short_cap(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token: String,
    value: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    let token = deps.api.addr_validate(&token)?;
    let old = SHORT_CAPS
        .may_load(deps.storage, token.as_str())?
        .unwrap_or_default();
    SHORT_CAPS.save(deps.storage, token.as_str(), &value)?;

    Ok(Response::new()
        .add_attribute("method", "set_short_cap")
        .add_attribute("token", token.as_str())
        .add_attribute("old_value", old)
        .add_attribute("new_value", value))
}

/// Execute handler for setting a token's long-window cap
pub fn execute_set_long_cap(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token: String,
    value: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    let token = deps.api.addr_validate(&token)?;
    let old = LONG_CAPS
        .may_load(deps.storage, token.as_str())?
        .unwrap_or_default();
    LONG_CAPS.save(deps.storage, token.as_str(), &value)?;

    Ok(Response::new()
        .add_attribute("method", "set_long_cap")
        .add_attribute("token", token.as_str())
        .add_attribute("old_value", old)
        .add_attribute("new_value", value))
}

/// Execute handler for setting the short window duration
pub fn execute_set_short_cap_duration(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    value: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    let old = SHORT_CAP_DURATION.load(deps.storage)?;
    SHORT_CAP_DURATION.save(deps.storage, &value)?;

    Ok(Response::new()
        .add_attribute("method", "set_short_cap_duration")
        .add_attribute("old_value", old.to_string())
        .add_attribute("new_value", value.to_string()))
}

/// Execute handler for setting the long window duration
pub fn execute_set_long_cap_duration(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    value: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    let old = LONG_CAP_DURATION.load(deps.storage)?;
    LONG_CAP_DURATION.save(deps.storage, &value)?;

    Ok(Response::new()
        .add_attribute("method", "set_long_cap_duration")
        .add_attribute("old_value", old.to_string())
        .add_attribute("new_value", value.to_string()))
}

/// Execute handler for replacing the notary identity
pub fn execute_set_notary(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    notary: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    let notary = hex_to_bytes20(&notary).map_err(|reason| ContractError::InvalidAddress {
        reason: reason.to_string(),
    })?;
    if notary == [0u8; 20] {
        return Err(ContractError::NullAddress);
    }

    let old = config.notary;
    config.notary = notary;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_notary")
        .add_attribute("old_notary", bytes20_to_hex(&old))
        .add_attribute("new_notary", bytes20_to_hex(&notary)))
}

/// Execute handler for registering a token's lockbox custodian (set-once)
pub fn execute_set_lockbox(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token: String,
    lockbox: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    let token = deps.api.addr_validate(&token)?;
    let lockbox = deps.api.addr_validate(&lockbox)?;

    if LOCKBOXES.has(deps.storage, token.as_str()) {
        return Err(ContractError::LockboxAlreadySet {
            token: token.to_string(),
        });
    }
    LOCKBOXES.save(deps.storage, token.as_str(), &lockbox)?;

    Ok(Response::new()
        .add_attribute("method", "set_lockbox")
        .add_attribute("token", token.as_str())
        .add_attribute("lockbox", lockbox))
}

/// Execute handler for pausing all transfers
pub fn execute_pause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "pause")
        .add_attribute("actor", info.sender))
}

/// Execute handler for resuming transfers
pub fn execute_unpause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "unpause")
        .add_attribute("actor", info.sender))
}

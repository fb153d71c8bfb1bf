//! Owner transfer handlers (two-step with timelock)

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{PendingOwner, CONFIG, OWNER_TIMELOCK_DURATION, PENDING_OWNER};

/// Execute handler for proposing a new owner
pub fn execute_propose_owner(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let new_address = deps.api.addr_validate(&new_owner)?;
    let execute_after = env.block.time.plus_seconds(OWNER_TIMELOCK_DURATION);
    PENDING_OWNER.save(
        deps.storage,
        &PendingOwner {
            new_address: new_address.clone(),
            execute_after,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "propose_owner")
        .add_attribute("new_owner", new_address)
        .add_attribute("execute_after", execute_after.seconds().to_string()))
}

/// Execute handler for accepting a pending owner proposal
pub fn execute_accept_owner(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending.new_address {
        return Err(ContractError::UnauthorizedPendingOwner);
    }
    if env.block.time < pending.execute_after {
        return Err(ContractError::TimelockNotExpired {
            remaining_seconds: pending.execute_after.seconds() - env.block.time.seconds(),
        });
    }

    let mut config = CONFIG.load(deps.storage)?;
    let old_owner = config.owner.clone();
    config.owner = pending.new_address;
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_owner")
        .add_attribute("old_owner", old_owner)
        .add_attribute("new_owner", config.owner))
}

/// Execute handler for cancelling a pending owner proposal
pub fn execute_cancel_owner_proposal(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "cancel_owner_proposal")
        .add_attribute("cancelled_owner", pending.new_address))
}

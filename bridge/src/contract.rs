//! Contract entry points for the Inception Bridge

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_owner, execute_add_bridge, execute_add_destination,
    execute_cancel_owner_proposal, execute_pause, execute_propose_owner, execute_receive,
    execute_remove_bridge, execute_remove_destination, execute_set_lockbox, execute_set_long_cap,
    execute_set_long_cap_duration, execute_set_notary, execute_set_short_cap,
    execute_set_short_cap_duration, execute_unpause, execute_withdraw,
};
use crate::hash::hex_to_bytes20;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_cap_config, query_cap_usage, query_config, query_destination, query_destinations,
    query_is_proof_used, query_lockbox, query_pending_owner, query_route, query_routes,
    query_token_key,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_LONG_CAP_DURATION,
    DEFAULT_SHORT_CAP_DURATION, LONG_CAP_DURATION, NONCE, SHORT_CAP_DURATION,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;

    let notary = hex_to_bytes20(&msg.notary).map_err(|reason| ContractError::InvalidAddress {
        reason: reason.to_string(),
    })?;
    if notary == [0u8; 20] {
        return Err(ContractError::NullAddress);
    }
    if msg.chain_id == 0 {
        return Err(ContractError::InvalidChain {
            chain_id: msg.chain_id,
        });
    }

    CONFIG.save(
        deps.storage,
        &Config {
            owner: owner.clone(),
            notary,
            chain_id: msg.chain_id,
            paused: false,
        },
    )?;
    NONCE.save(deps.storage, &0)?;
    SHORT_CAP_DURATION.save(deps.storage, &DEFAULT_SHORT_CAP_DURATION)?;
    LONG_CAP_DURATION.save(deps.storage, &DEFAULT_LONG_CAP_DURATION)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("notary", msg.notary)
        .add_attribute("chain_id", msg.chain_id.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Receive(receive_msg) => execute_receive(deps, env, info, receive_msg),
        ExecuteMsg::Withdraw {
            proof,
            receipt,
            signature,
            recipient,
        } => execute_withdraw(
            deps,
            env,
            info,
            proof.as_slice(),
            receipt.as_slice(),
            signature.as_slice(),
            recipient,
        ),
        ExecuteMsg::AddBridge { bridge, chain_id } => {
            execute_add_bridge(deps, env, info, bridge, chain_id)
        }
        ExecuteMsg::RemoveBridge { chain_id } => execute_remove_bridge(deps, env, info, chain_id),
        ExecuteMsg::AddDestination {
            token,
            chain_id,
            dest_token,
        } => execute_add_destination(deps, env, info, token, chain_id, dest_token),
        ExecuteMsg::RemoveDestination {
            token,
            chain_id,
            dest_token,
        } => execute_remove_destination(deps, env, info, token, chain_id, dest_token),
        ExecuteMsg::SetShortCap { token, value } => {
            execute_set_short_cap(deps, env, info, token, value)
        }
        ExecuteMsg::SetLongCap { token, value } => {
            execute_set_long_cap(deps, env, info, token, value)
        }
        ExecuteMsg::SetShortCapDuration { value } => {
            execute_set_short_cap_duration(deps, env, info, value)
        }
        ExecuteMsg::SetLongCapDuration { value } => {
            execute_set_long_cap_duration(deps, env, info, value)
        }
        ExecuteMsg::SetNotary { notary } => execute_set_notary(deps, env, info, notary),
        ExecuteMsg::SetLockbox { token, lockbox } => {
            execute_set_lockbox(deps, env, info, token, lockbox)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, env, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, env, info),
        ExecuteMsg::ProposeOwner { new_owner } => {
            execute_propose_owner(deps, env, info, new_owner)
        }
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, env, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, env, info),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Route { chain_id } => to_json_binary(&query_route(deps, chain_id)?),
        QueryMsg::Routes {} => to_json_binary(&query_routes(deps)?),
        QueryMsg::Destination { token, chain_id } => {
            to_json_binary(&query_destination(deps, token, chain_id)?)
        }
        QueryMsg::Destinations {} => to_json_binary(&query_destinations(deps)?),
        QueryMsg::Lockbox { token } => to_json_binary(&query_lockbox(deps, token)?),
        QueryMsg::CapConfig { token } => to_json_binary(&query_cap_config(deps, token)?),
        QueryMsg::CapUsage { token, direction } => {
            to_json_binary(&query_cap_usage(deps, env, token, direction)?)
        }
        QueryMsg::IsProofUsed { proof_hash } => {
            to_json_binary(&query_is_proof_used(deps, proof_hash)?)
        }
        QueryMsg::TokenKey { token } => to_json_binary(&query_token_key(deps, token)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("method", "migrate"))
}

//! Deposit handler (cw20 receive hook)
//!
//! Tokens reach the bridge through a cw20 `Send` carrying a
//! `ReceiveMsg::Deposit` payload. The bridge debits the sent tokens (burn, or
//! forward into the registered lockbox), charges the deposit-direction caps,
//! and emits the `Deposited` record the off-chain notary acts on.

use cosmwasm_std::{
    from_json, to_json_binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, Cw20ReceiveMsg, TokenInfoResponse};

use crate::caps;
use crate::error::ContractError;
use crate::hash::{bytes20_to_hex, bytes32_to_hex};
use crate::msg::ReceiveMsg;
use crate::state::{CapDirection, CONFIG, DESTINATIONS, LOCKBOXES, NONCE, ROUTES};

/// Execute handler for the cw20 receive hook
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    receive_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    match from_json(&receive_msg.msg)? {
        ReceiveMsg::Deposit {
            dest_chain_id,
            recipient,
        } => execute_deposit(deps, env, info, receive_msg, dest_chain_id, recipient.to_vec()),
    }
}

fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    receive_msg: Cw20ReceiveMsg,
    dest_chain_id: u64,
    recipient: Vec<u8>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    // The calling contract is the token being deposited
    let token = info.sender;
    let sender = deps.api.addr_validate(&receive_msg.sender)?;
    let amount = receive_msg.amount;

    let dest_bridge = ROUTES
        .may_load(deps.storage, dest_chain_id)?
        .ok_or(ContractError::UnknownDestinationChain {
            chain_id: dest_chain_id,
        })?;

    // An unmapped token reads the same as an unrouted chain: there is no
    // destination to send to
    let dest_token = DESTINATIONS
        .may_load(deps.storage, (token.as_str(), dest_chain_id))?
        .ok_or(ContractError::UnknownDestinationChain {
            chain_id: dest_chain_id,
        })?;

    let recipient: [u8; 32] = recipient
        .try_into()
        .map_err(|_| ContractError::InvalidAddress {
            reason: "recipient must be a 32-byte universal account".to_string(),
        })?;
    if recipient == [0u8; 32] {
        return Err(ContractError::NullAddress);
    }

    caps::charge(
        deps.storage,
        token.as_str(),
        CapDirection::Deposit,
        amount,
        env.block.time,
    )?;

    let nonce = NONCE.load(deps.storage)? + 1;
    NONCE.save(deps.storage, &nonce)?;

    // Custody: forward into the lockbox if one is registered, burn otherwise
    let (custody, debit_msg): (&str, CosmosMsg) =
        match LOCKBOXES.may_load(deps.storage, token.as_str())? {
            Some(lockbox) => (
                "lockbox",
                WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                        recipient: lockbox.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                }
                .into(),
            ),
            None => (
                "burn",
                WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::Burn { amount })?,
                    funds: vec![],
                }
                .into(),
            ),
        };

    // Metadata snapshot travels with the record; zero origin marks this
    // bridge as the asset's home
    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(token.clone(), &Cw20QueryMsg::TokenInfo {})?;

    Ok(Response::new()
        .add_message(debit_msg)
        .add_attribute("method", "deposit")
        .add_attribute("destination_chain", dest_chain_id.to_string())
        .add_attribute("destination_bridge", bytes20_to_hex(&dest_bridge))
        .add_attribute("sender", sender)
        .add_attribute("receiver", bytes32_to_hex(&recipient))
        .add_attribute("from_token", token.as_str())
        .add_attribute("to_token", bytes32_to_hex(&dest_token))
        .add_attribute("amount", amount)
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("metadata_name", truncate_32(&token_info.name))
        .add_attribute("metadata_symbol", truncate_32(&token_info.symbol))
        .add_attribute("metadata_origin_chain", "0")
        .add_attribute("metadata_origin_address", bytes32_to_hex(&[0u8; 32]))
        .add_attribute("custody", custody))
}

/// 32-byte truncation on a char boundary, matching the width the record's
/// metadata words carry
fn truncate_32(value: &str) -> String {
    let mut end = value.len().min(32);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}

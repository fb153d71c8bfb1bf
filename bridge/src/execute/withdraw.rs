//! Withdraw handler
//!
//! Redeems a notary-attested deposit originating on another chain. The
//! submitted (proof, receipt, signature) tuple is checked for internal
//! consistency, attestation, replay, and registry membership before any
//! tokens move. All credit messages are dispatched after state is final, so
//! no external contract runs against half-updated bridge state.

use cosmwasm_std::{to_json_binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::attestation::recover_signer;
use crate::caps;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, encode_account};
use crate::msg::LockboxExecuteMsg;
use crate::proof::ReceiptProof;
use crate::receipt::{DepositedLog, TransactionReceipt};
use crate::state::{CapDirection, CONFIG, DESTINATIONS, LOCKBOXES, ROUTES, TOKEN_KEYS, USED_PROOFS};

/// Execute handler for redeeming an attested deposit
pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    proof_raw: &[u8],
    receipt_raw: &[u8],
    signature: &[u8],
    recipient: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let receipt = TransactionReceipt::decode(receipt_raw)?;
    let proof = ReceiptProof::decode(proof_raw)?;

    if receipt.hash() != proof.receipt_hash {
        return Err(ContractError::ReceiptHashMismatch);
    }

    let log = DepositedLog::find_in(&receipt)?;
    if log.from_token == [0u8; 32] {
        return Err(ContractError::InvalidFromTokenAddress);
    }
    if proof.amount != log.amount {
        return Err(ContractError::AmountMismatch {
            proof_amount: proof.amount,
            receipt_amount: log.amount,
        });
    }
    if log.destination_chain != config.chain_id {
        return Err(ContractError::ReceiptWrongChain {
            expected: config.chain_id,
            actual: log.destination_chain,
        });
    }

    let proof_hash = proof.hash();
    let signer = recover_signer(deps.api, &proof_hash, signature)?;
    if signer != config.notary {
        return Err(ContractError::WrongSignature);
    }

    if USED_PROOFS.has(deps.storage, &proof_hash) {
        return Err(ContractError::WithdrawalProofUsed);
    }
    USED_PROOFS.save(deps.storage, &proof_hash, &true)?;

    // The proof's leading word is the origin chain; the log's emitter must
    // be the bridge routed for it
    let route = ROUTES
        .may_load(deps.storage, proof.chain_id)?
        .ok_or(ContractError::UnknownBridge {
            chain_id: proof.chain_id,
        })?;
    if route != log.source_bridge {
        return Err(ContractError::UnknownBridge {
            chain_id: proof.chain_id,
        });
    }

    // The credited token is the local one whose universal key the deposit
    // names as its target, and its registered destination on the origin
    // chain must be the token that was debited there
    let token = TOKEN_KEYS
        .may_load(deps.storage, &log.to_token)?
        .ok_or_else(|| ContractError::UnknownDestination {
            token: bytes32_to_hex(&log.to_token),
            chain_id: proof.chain_id,
        })?;
    let registered = DESTINATIONS.may_load(deps.storage, (token.as_str(), proof.chain_id))?;
    if registered != Some(log.from_token) {
        return Err(ContractError::UnknownDestination {
            token,
            chain_id: proof.chain_id,
        });
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    if encode_account(&recipient) != log.receiver {
        return Err(ContractError::ReceiverMismatch);
    }

    caps::charge(
        deps.storage,
        &token,
        CapDirection::Withdraw,
        log.amount,
        env.block.time,
    )?;

    // Credit: release from the lockbox if one is registered, mint otherwise
    let credit_msg: CosmosMsg = match LOCKBOXES.may_load(deps.storage, &token)? {
        Some(lockbox) => WasmMsg::Execute {
            contract_addr: lockbox.to_string(),
            msg: to_json_binary(&LockboxExecuteMsg::Release {
                token: token.clone(),
                recipient: recipient.to_string(),
                amount: log.amount,
            })?,
            funds: vec![],
        }
        .into(),
        None => WasmMsg::Execute {
            contract_addr: token.clone(),
            msg: to_json_binary(&Cw20ExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount: log.amount,
            })?,
            funds: vec![],
        }
        .into(),
    };

    Ok(Response::new()
        .add_message(credit_msg)
        .add_attribute("method", "withdraw")
        .add_attribute("proof_hash", bytes32_to_hex(&proof_hash))
        .add_attribute("receipt_hash", bytes32_to_hex(&proof.receipt_hash))
        .add_attribute("origin_chain", proof.chain_id.to_string())
        .add_attribute("sender", bytes32_to_hex(&log.sender))
        .add_attribute("recipient", recipient)
        .add_attribute("from_token", bytes32_to_hex(&log.from_token))
        .add_attribute("to_token", token)
        .add_attribute("amount", log.amount)
        .add_attribute("nonce", log.nonce.to_string()))
}

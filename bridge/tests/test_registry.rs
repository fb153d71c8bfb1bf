//! Integration tests for the bridge registry and administration surface.
//!
//! Covers chain routes, token destinations, lockbox registration, notary
//! rotation, pause, and the timelocked two-step owner transfer.

use cosmwasm_std::Addr;
use cw_multi_test::{App, ContractWrapper, Executor};

use bridge::msg::{
    ConfigResponse, DestinationResponse, ExecuteMsg, InstantiateMsg, LockboxResponse,
    PendingOwnerResponse, QueryMsg, RouteResponse, RoutesResponse, TokenKeyResponse,
};
use bridge::state::OWNER_TIMELOCK_DURATION;

const LOCAL_CHAIN: u64 = 1000;
const REMOTE_CHAIN: u64 = 2000;
const NOTARY_HEX: &str = "0x1111111111111111111111111111111111111111";
const REMOTE_BRIDGE_HEX: &str = "0x4242424242424242424242424242424242424242";
const REMOTE_TOKEN_HEX: &str =
    "0x4646464646464646464646464646464646464646464646464646464646464646";

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    );
    Box::new(contract)
}

fn setup() -> (App, Addr) {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");

    let code_id = app.store_code(contract_bridge());
    let contract_addr = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                owner: admin.to_string(),
                notary: NOTARY_HEX.to_string(),
                chain_id: LOCAL_CHAIN,
            },
            &[],
            "inception-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    (app, contract_addr)
}

fn attribute(res: &cw_multi_test::AppResponse, key: &str) -> String {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap()
}

// ============================================================================
// Route Tests
// ============================================================================

#[test]
fn test_add_bridge() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    let res = app
        .execute_contract(
            admin,
            contract_addr.clone(),
            &ExecuteMsg::AddBridge {
                bridge: REMOTE_BRIDGE_HEX.to_string(),
                chain_id: REMOTE_CHAIN,
            },
            &[],
        )
        .unwrap();
    assert_eq!(attribute(&res, "chain_id"), REMOTE_CHAIN.to_string());
    assert_eq!(attribute(&res, "bridge"), REMOTE_BRIDGE_HEX);

    let route: RouteResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::Route {
                chain_id: REMOTE_CHAIN,
            },
        )
        .unwrap();
    assert_eq!(route.route.unwrap().bridge, REMOTE_BRIDGE_HEX);
}

#[test]
fn test_add_bridge_requires_owner() {
    let (mut app, contract_addr) = setup();
    let stranger = Addr::unchecked("terra1stranger");

    let res = app.execute_contract(
        stranger,
        contract_addr,
        &ExecuteMsg::AddBridge {
            bridge: REMOTE_BRIDGE_HEX.to_string(),
            chain_id: REMOTE_CHAIN,
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"));
}

#[test]
fn test_add_bridge_rejects_duplicate_route() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddBridge {
            bridge: REMOTE_BRIDGE_HEX.to_string(),
            chain_id: REMOTE_CHAIN,
        },
        &[],
    )
    .unwrap();

    // same chain again, even with a different bridge
    let res = app.execute_contract(
        admin,
        contract_addr,
        &ExecuteMsg::AddBridge {
            bridge: "0x4343434343434343434343434343434343434343".to_string(),
            chain_id: REMOTE_CHAIN,
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Bridge already added"));
}

#[test]
fn test_add_bridge_rejects_invalid_chain_and_null_address() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    let res = app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddBridge {
            bridge: REMOTE_BRIDGE_HEX.to_string(),
            chain_id: 0,
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid chain id"));

    let res = app.execute_contract(
        admin,
        contract_addr,
        &ExecuteMsg::AddBridge {
            bridge: format!("0x{}", "00".repeat(20)),
            chain_id: REMOTE_CHAIN,
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Null address"));
}

#[test]
fn test_add_bridge_allows_local_chain_route() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    // two bridges can share a chain id, so a route for our own chain is valid
    let res = app
        .execute_contract(
            admin,
            contract_addr.clone(),
            &ExecuteMsg::AddBridge {
                bridge: REMOTE_BRIDGE_HEX.to_string(),
                chain_id: LOCAL_CHAIN,
            },
            &[],
        )
        .unwrap();
    assert_eq!(attribute(&res, "chain_id"), LOCAL_CHAIN.to_string());

    let route: RouteResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::Route {
                chain_id: LOCAL_CHAIN,
            },
        )
        .unwrap();
    assert_eq!(route.route.unwrap().bridge, REMOTE_BRIDGE_HEX);
}

#[test]
fn test_remove_bridge() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddBridge {
            bridge: REMOTE_BRIDGE_HEX.to_string(),
            chain_id: REMOTE_CHAIN,
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::RemoveBridge {
            chain_id: REMOTE_CHAIN,
        },
        &[],
    )
    .unwrap();

    let routes: RoutesResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Routes {})
        .unwrap();
    assert!(routes.routes.is_empty());

    // removing again fails
    let res = app.execute_contract(
        admin,
        contract_addr,
        &ExecuteMsg::RemoveBridge {
            chain_id: REMOTE_CHAIN,
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("No bridge registered"));
}

// ============================================================================
// Destination Tests
// ============================================================================

#[test]
fn test_add_destination_requires_route() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    let res = app.execute_contract(
        admin,
        contract_addr,
        &ExecuteMsg::AddDestination {
            token: "terra1token".to_string(),
            chain_id: REMOTE_CHAIN,
            dest_token: REMOTE_TOKEN_HEX.to_string(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("No destination chain route"));
}

#[test]
fn test_destination_lifecycle() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddBridge {
            bridge: REMOTE_BRIDGE_HEX.to_string(),
            chain_id: REMOTE_CHAIN,
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddDestination {
            token: "terra1token".to_string(),
            chain_id: REMOTE_CHAIN,
            dest_token: REMOTE_TOKEN_HEX.to_string(),
        },
        &[],
    )
    .unwrap();

    let dest: DestinationResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::Destination {
                token: "terra1token".to_string(),
                chain_id: REMOTE_CHAIN,
            },
        )
        .unwrap();
    assert_eq!(dest.destination.unwrap().dest_token, REMOTE_TOKEN_HEX);

    // a (token, chain) pair maps to at most one remote token
    let res = app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddDestination {
            token: "terra1token".to_string(),
            chain_id: REMOTE_CHAIN,
            dest_token: format!("0x{}", "47".repeat(32)),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Destination already exists"));

    // removal must name the registered remote token
    let res = app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::RemoveDestination {
            token: "terra1token".to_string(),
            chain_id: REMOTE_CHAIN,
            dest_token: format!("0x{}", "47".repeat(32)),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unknown destination"));

    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::RemoveDestination {
            token: "terra1token".to_string(),
            chain_id: REMOTE_CHAIN,
            dest_token: REMOTE_TOKEN_HEX.to_string(),
        },
        &[],
    )
    .unwrap();

    let dest: DestinationResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::Destination {
                token: "terra1token".to_string(),
                chain_id: REMOTE_CHAIN,
            },
        )
        .unwrap();
    assert!(dest.destination.is_none());

    // re-adding after removal is allowed
    app.execute_contract(
        admin,
        contract_addr,
        &ExecuteMsg::AddDestination {
            token: "terra1token".to_string(),
            chain_id: REMOTE_CHAIN,
            dest_token: REMOTE_TOKEN_HEX.to_string(),
        },
        &[],
    )
    .unwrap();
}

#[test]
fn test_token_key_is_stable() {
    let (app, contract_addr) = setup();

    let first: TokenKeyResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::TokenKey {
                token: "terra1token".to_string(),
            },
        )
        .unwrap();
    let second: TokenKeyResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::TokenKey {
                token: "terra1token".to_string(),
            },
        )
        .unwrap();
    assert_eq!(first.key, second.key);
    assert_eq!(first.key.len(), 66); // 0x + 32 bytes

    let other: TokenKeyResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::TokenKey {
                token: "terra1other".to_string(),
            },
        )
        .unwrap();
    assert_ne!(first.key, other.key);
}

// ============================================================================
// Lockbox / Notary / Pause Tests
// ============================================================================

#[test]
fn test_set_lockbox_is_set_once() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::SetLockbox {
            token: "terra1token".to_string(),
            lockbox: "terra1lockbox".to_string(),
        },
        &[],
    )
    .unwrap();

    let lockbox: LockboxResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::Lockbox {
                token: "terra1token".to_string(),
            },
        )
        .unwrap();
    assert_eq!(lockbox.lockbox.unwrap(), "terra1lockbox");

    let res = app.execute_contract(
        admin,
        contract_addr,
        &ExecuteMsg::SetLockbox {
            token: "terra1token".to_string(),
            lockbox: "terra1otherbox".to_string(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Lockbox already set"));
}

#[test]
fn test_set_notary() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");
    let new_notary = "0x2222222222222222222222222222222222222222";

    let res = app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::SetNotary {
            notary: format!("0x{}", "00".repeat(20)),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Null address"));

    app.execute_contract(
        admin,
        contract_addr.clone(),
        &ExecuteMsg::SetNotary {
            notary: new_notary.to_string(),
        },
        &[],
    )
    .unwrap();

    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.notary, new_notary);
}

#[test]
fn test_pause_and_unpause() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");
    let stranger = Addr::unchecked("terra1stranger");

    let res = app.execute_contract(stranger, contract_addr.clone(), &ExecuteMsg::Pause {}, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"));

    app.execute_contract(admin.clone(), contract_addr.clone(), &ExecuteMsg::Pause {}, &[])
        .unwrap();
    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Config {})
        .unwrap();
    assert!(config.paused);

    app.execute_contract(admin, contract_addr.clone(), &ExecuteMsg::Unpause {}, &[])
        .unwrap();
    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Config {})
        .unwrap();
    assert!(!config.paused);
}

// ============================================================================
// Owner Transfer Tests
// ============================================================================

#[test]
fn test_owner_transfer_honors_timelock() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");
    let new_owner = Addr::unchecked("terra1newowner");

    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ProposeOwner {
            new_owner: new_owner.to_string(),
        },
        &[],
    )
    .unwrap();

    let pending: PendingOwnerResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::PendingOwner {})
        .unwrap();
    assert_eq!(pending.new_owner.unwrap(), new_owner.to_string());

    // only the proposed owner may accept
    let res = app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AcceptOwner {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("only pending owner"));

    // too early
    let res = app.execute_contract(
        new_owner.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AcceptOwner {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Timelock not expired"));

    app.update_block(|block| {
        block.time = block.time.plus_seconds(OWNER_TIMELOCK_DURATION);
        block.height += 1;
    });
    app.execute_contract(
        new_owner.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AcceptOwner {},
        &[],
    )
    .unwrap();

    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.owner, new_owner.to_string());

    // the previous owner lost its privileges
    let res = app.execute_contract(admin, contract_addr, &ExecuteMsg::Pause {}, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"));
}

#[test]
fn test_owner_proposal_can_be_cancelled() {
    let (mut app, contract_addr) = setup();
    let admin = Addr::unchecked("terra1admin");
    let new_owner = Addr::unchecked("terra1newowner");

    let res = app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::CancelOwnerProposal {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("No pending owner"));

    app.execute_contract(
        admin.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ProposeOwner {
            new_owner: new_owner.to_string(),
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        admin,
        contract_addr.clone(),
        &ExecuteMsg::CancelOwnerProposal {},
        &[],
    )
    .unwrap();

    app.update_block(|block| {
        block.time = block.time.plus_seconds(OWNER_TIMELOCK_DURATION);
        block.height += 1;
    });
    let res = app.execute_contract(new_owner, contract_addr, &ExecuteMsg::AcceptOwner {}, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("No pending owner"));
}

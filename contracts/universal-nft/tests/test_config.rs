//! Integration tests for bridge configuration.
//!
//! Tests authority gating, TSS key rotation, supported chain management, the
//! pause flag and the two-step authority hand-over.

use cosmwasm_std::{Addr, Binary};
use cw_multi_test::{App, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;

use universal_nft::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, PendingAuthorityResponse, QueryMsg,
    SupportedChainsResponse,
};
use universal_nft::ContractError;

const HOME_CHAIN: u64 = 1;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        universal_nft::contract::execute,
        universal_nft::contract::instantiate,
        universal_nft::contract::query,
    );
    Box::new(contract)
}

fn tss_public_key(seed: u8) -> Binary {
    let key = SigningKey::from_slice(&[seed; 32]).unwrap();
    Binary::from(key.verifying_key().to_encoded_point(true).as_bytes().to_vec())
}

fn setup() -> (App, Addr) {
    let mut app = App::default();
    let authority = Addr::unchecked("authority");

    let code_id = app.store_code(contract_bridge());
    let contract_addr = app
        .instantiate_contract(
            code_id,
            authority.clone(),
            &InstantiateMsg {
                authority: authority.to_string(),
                tss_public_key: tss_public_key(0x11),
                home_chain_id: HOME_CHAIN,
                supported_chains: vec![56],
            },
            &[],
            "universal-nft",
            Some(authority.to_string()),
        )
        .unwrap();

    (app, contract_addr)
}

fn query_config(app: &App, contract_addr: &Addr) -> ConfigResponse {
    app.wrap()
        .query_wasm_smart(contract_addr, &QueryMsg::Config {})
        .unwrap()
}

fn query_chains(app: &App, contract_addr: &Addr) -> Vec<u64> {
    let res: SupportedChainsResponse = app
        .wrap()
        .query_wasm_smart(contract_addr, &QueryMsg::SupportedChains {})
        .unwrap();
    res.chains
}

// ============================================================================
// Authority Gating
// ============================================================================

#[test]
fn test_config_changes_require_authority() {
    let (mut app, contract_addr) = setup();
    let stranger = Addr::unchecked("stranger");

    let msgs = vec![
        ExecuteMsg::SetTssKey {
            public_key: tss_public_key(0x22),
        },
        ExecuteMsg::AddSupportedChain { chain_id: 137 },
        ExecuteMsg::RemoveSupportedChain { chain_id: 56 },
        ExecuteMsg::SetPaused { paused: true },
        ExecuteMsg::ProposeAuthority {
            new_authority: "stranger".to_string(),
        },
        ExecuteMsg::RevertTransfer { asset_id: 1 },
        ExecuteMsg::ConfirmTransfer { asset_id: 1 },
    ];

    for msg in msgs {
        let res = app.execute_contract(stranger.clone(), contract_addr.clone(), &msg, &[]);
        assert_eq!(
            res.unwrap_err().root_cause().to_string(),
            ContractError::Unauthorized.to_string()
        );
    }

    let config = query_config(&app, &contract_addr);
    assert_eq!(config.key_version, 1);
    assert!(!config.paused);
    assert_eq!(query_chains(&app, &contract_addr), vec![56]);
}

// ============================================================================
// TSS Key Rotation
// ============================================================================

#[test]
fn test_set_tss_key_bumps_version() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");
    let new_key = tss_public_key(0x22);

    app.execute_contract(
        authority.clone(),
        contract_addr.clone(),
        &ExecuteMsg::SetTssKey {
            public_key: new_key.clone(),
        },
        &[],
    )
    .unwrap();

    let config = query_config(&app, &contract_addr);
    assert_eq!(config.tss_public_key, new_key);
    assert_eq!(config.key_version, 2);
}

#[test]
fn test_set_tss_key_rejects_malformed_key() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");

    let res = app.execute_contract(
        authority,
        contract_addr.clone(),
        &ExecuteMsg::SetTssKey {
            public_key: Binary::from(vec![0x04; 33]),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Invalid TSS public key"));

    let config = query_config(&app, &contract_addr);
    assert_eq!(config.tss_public_key, tss_public_key(0x11));
    assert_eq!(config.key_version, 1);
}

// ============================================================================
// Supported Chains
// ============================================================================

#[test]
fn test_add_and_remove_supported_chain() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");

    app.execute_contract(
        authority.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddSupportedChain { chain_id: 137 },
        &[],
    )
    .unwrap();
    assert_eq!(query_chains(&app, &contract_addr), vec![56, 137]);

    // Adding again is a no-op
    app.execute_contract(
        authority.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AddSupportedChain { chain_id: 137 },
        &[],
    )
    .unwrap();
    assert_eq!(query_chains(&app, &contract_addr), vec![56, 137]);

    app.execute_contract(
        authority,
        contract_addr.clone(),
        &ExecuteMsg::RemoveSupportedChain { chain_id: 56 },
        &[],
    )
    .unwrap();
    assert_eq!(query_chains(&app, &contract_addr), vec![137]);
}

#[test]
fn test_add_supported_chain_rejects_zero_and_home() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");

    for chain_id in [0, HOME_CHAIN] {
        let res = app.execute_contract(
            authority.clone(),
            contract_addr.clone(),
            &ExecuteMsg::AddSupportedChain { chain_id },
            &[],
        );
        assert_eq!(
            res.unwrap_err().root_cause().to_string(),
            ContractError::InvalidChainId { chain_id }.to_string()
        );
    }
}

#[test]
fn test_remove_unknown_chain_fails() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");

    let res = app.execute_contract(
        authority,
        contract_addr,
        &ExecuteMsg::RemoveSupportedChain { chain_id: 999 },
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::UnsupportedChain { chain_id: 999 }.to_string()
    );
}

// ============================================================================
// Pause
// ============================================================================

#[test]
fn test_set_paused_toggles_flag() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");

    app.execute_contract(
        authority.clone(),
        contract_addr.clone(),
        &ExecuteMsg::SetPaused { paused: true },
        &[],
    )
    .unwrap();
    assert!(query_config(&app, &contract_addr).paused);

    app.execute_contract(
        authority,
        contract_addr.clone(),
        &ExecuteMsg::SetPaused { paused: false },
        &[],
    )
    .unwrap();
    assert!(!query_config(&app, &contract_addr).paused);
}

// ============================================================================
// Authority Hand-over
// ============================================================================

#[test]
fn test_authority_handover() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");
    let successor = Addr::unchecked("successor");

    app.execute_contract(
        authority.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ProposeAuthority {
            new_authority: successor.to_string(),
        },
        &[],
    )
    .unwrap();

    let pending: Option<PendingAuthorityResponse> = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::PendingAuthority {})
        .unwrap();
    assert_eq!(pending.unwrap().new_authority, successor);

    // Only the proposed address can accept
    let res = app.execute_contract(
        Addr::unchecked("stranger"),
        contract_addr.clone(),
        &ExecuteMsg::AcceptAuthority {},
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::UnauthorizedPendingAuthority.to_string()
    );

    app.execute_contract(
        successor.clone(),
        contract_addr.clone(),
        &ExecuteMsg::AcceptAuthority {},
        &[],
    )
    .unwrap();
    assert_eq!(query_config(&app, &contract_addr).authority, successor);

    // The old authority lost its rights
    let res = app.execute_contract(
        authority,
        contract_addr.clone(),
        &ExecuteMsg::SetPaused { paused: true },
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::Unauthorized.to_string()
    );

    let pending: Option<PendingAuthorityResponse> = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::PendingAuthority {})
        .unwrap();
    assert!(pending.is_none());
}

#[test]
fn test_cancel_authority_proposal() {
    let (mut app, contract_addr) = setup();
    let authority = Addr::unchecked("authority");

    let res = app.execute_contract(
        authority.clone(),
        contract_addr.clone(),
        &ExecuteMsg::CancelAuthorityProposal {},
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::NoPendingAuthority.to_string()
    );

    app.execute_contract(
        authority.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ProposeAuthority {
            new_authority: "successor".to_string(),
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        authority,
        contract_addr.clone(),
        &ExecuteMsg::CancelAuthorityProposal {},
        &[],
    )
    .unwrap();

    let res = app.execute_contract(
        Addr::unchecked("successor"),
        contract_addr,
        &ExecuteMsg::AcceptAuthority {},
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::NoPendingAuthority.to_string()
    );
}

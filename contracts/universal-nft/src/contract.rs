//! Universal NFT Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_authority, execute_add_supported_chain, execute_cancel_authority_proposal,
    execute_confirm_transfer, execute_initiate_transfer, execute_mint, execute_propose_authority,
    execute_receive_transfer, execute_remove_supported_chain, execute_revert_transfer,
    execute_set_paused, execute_set_tss_key,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_asset, query_assets, query_compute_inbound_message, query_config, query_get_owner,
    query_nonce_used, query_outbound_message, query_pending_authority, query_receipt,
    query_stats, query_supported_chains, query_transfer, query_transfers,
    query_verify_ownership,
};
use crate::signature::validate_public_key;
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, NEXT_ASSET_ID, NEXT_RECEIPT_ID,
    NEXT_TRANSFER_ID, STATS, SUPPORTED_CHAINS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if CONFIG.may_load(deps.storage)?.is_some() {
        return Err(ContractError::AlreadyInitialized);
    }

    let authority = deps.api.addr_validate(&msg.authority)?;
    validate_public_key(&msg.tss_public_key)?;
    if msg.home_chain_id == 0 {
        return Err(ContractError::InvalidChainId {
            chain_id: msg.home_chain_id,
        });
    }

    if let Some(chain_id) = msg
        .supported_chains
        .iter()
        .find(|id| **id == 0 || **id == msg.home_chain_id)
    {
        return Err(ContractError::InvalidChainId {
            chain_id: *chain_id,
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        authority,
        tss_public_key: msg.tss_public_key,
        key_version: 1,
        home_chain_id: msg.home_chain_id,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    for chain_id in &msg.supported_chains {
        SUPPORTED_CHAINS.save(deps.storage, *chain_id, &true)?;
    }

    STATS.save(deps.storage, &Stats::default())?;

    // Sequences start at 1
    NEXT_ASSET_ID.save(deps.storage, &1u64)?;
    NEXT_TRANSFER_ID.save(deps.storage, &1u64)?;
    NEXT_RECEIPT_ID.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("authority", config.authority)
        .add_attribute("home_chain_id", config.home_chain_id.to_string())
        .add_attribute("key_version", config.key_version.to_string())
        .add_attribute(
            "supported_chains",
            msg.supported_chains
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        ))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Asset registry
        ExecuteMsg::Mint {
            owner,
            metadata,
            cross_chain_enabled,
        } => execute_mint(deps, env, info, owner, metadata, cross_chain_enabled),

        // Outgoing transfers
        ExecuteMsg::InitiateTransfer {
            asset_id,
            destination_chain,
            destination_address,
            nonce,
        } => execute_initiate_transfer(
            deps,
            env,
            info,
            asset_id,
            destination_chain,
            destination_address,
            nonce,
        ),
        ExecuteMsg::RevertTransfer { asset_id } => execute_revert_transfer(deps, info, asset_id),
        ExecuteMsg::ConfirmTransfer { asset_id } => {
            execute_confirm_transfer(deps, info, asset_id)
        }

        // Incoming transfers
        ExecuteMsg::ReceiveTransfer {
            source_chain,
            source_tx_ref,
            nonce,
            recipient,
            payload,
            signature,
        } => execute_receive_transfer(
            deps,
            env,
            info,
            source_chain,
            source_tx_ref,
            nonce,
            recipient,
            payload,
            signature,
        ),

        // Configuration
        ExecuteMsg::SetTssKey { public_key } => execute_set_tss_key(deps, info, public_key),
        ExecuteMsg::AddSupportedChain { chain_id } => {
            execute_add_supported_chain(deps, info, chain_id)
        }
        ExecuteMsg::RemoveSupportedChain { chain_id } => {
            execute_remove_supported_chain(deps, info, chain_id)
        }
        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),

        // Authority transfer
        ExecuteMsg::ProposeAuthority { new_authority } => {
            execute_propose_authority(deps, env, info, new_authority)
        }
        ExecuteMsg::AcceptAuthority {} => execute_accept_authority(deps, info),
        ExecuteMsg::CancelAuthorityProposal {} => execute_cancel_authority_proposal(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core queries
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::SupportedChains {} => to_json_binary(&query_supported_chains(deps)?),
        QueryMsg::PendingAuthority {} => to_json_binary(&query_pending_authority(deps)?),

        // Asset queries
        QueryMsg::GetOwner { asset_id } => to_json_binary(&query_get_owner(deps, asset_id)?),
        QueryMsg::VerifyOwnership { asset_id, owner } => {
            to_json_binary(&query_verify_ownership(deps, asset_id, owner)?)
        }
        QueryMsg::Asset { asset_id } => to_json_binary(&query_asset(deps, asset_id)?),
        QueryMsg::Assets { start_after, limit } => {
            to_json_binary(&query_assets(deps, start_after, limit)?)
        }

        // Transfer and receipt queries
        QueryMsg::Transfer { transfer_id } => {
            to_json_binary(&query_transfer(deps, transfer_id)?)
        }
        QueryMsg::Transfers { start_after, limit } => {
            to_json_binary(&query_transfers(deps, start_after, limit)?)
        }
        QueryMsg::Receipt { receipt_id } => to_json_binary(&query_receipt(deps, receipt_id)?),
        QueryMsg::NonceUsed { chain_id, nonce } => {
            to_json_binary(&query_nonce_used(deps, chain_id, nonce)?)
        }

        // Message queries
        QueryMsg::OutboundMessage { transfer_id } => {
            to_json_binary(&query_outbound_message(deps, transfer_id)?)
        }
        QueryMsg::ComputeInboundMessage {
            source_chain,
            source_tx_ref,
            nonce,
            recipient,
            payload,
        } => to_json_binary(&query_compute_inbound_message(
            source_chain,
            source_tx_ref,
            nonce,
            recipient,
            payload,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::from_json;

    use crate::msg::{ConfigResponse, StatsResponse, SupportedChainsResponse};

    fn compressed_key() -> Binary {
        let mut key = vec![0x02];
        key.extend_from_slice(&[0x11; 32]);
        Binary::from(key)
    }

    fn instantiate_msg() -> InstantiateMsg {
        InstantiateMsg {
            authority: "authority".to_string(),
            tss_public_key: compressed_key(),
            home_chain_id: 1,
            supported_chains: vec![56, 137],
        }
    }

    #[test]
    fn test_instantiate_sets_initial_state() {
        let mut deps = mock_dependencies();
        let info = mock_info("creator", &[]);

        let res = instantiate(deps.as_mut(), mock_env(), info, instantiate_msg()).unwrap();
        assert_eq!(res.attributes[0].value, "instantiate");

        let config: ConfigResponse =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
        assert_eq!(config.authority.as_str(), "authority");
        assert_eq!(config.key_version, 1);
        assert_eq!(config.home_chain_id, 1);
        assert!(!config.paused);

        let chains: SupportedChainsResponse = from_json(
            query(deps.as_ref(), mock_env(), QueryMsg::SupportedChains {}).unwrap(),
        )
        .unwrap();
        assert_eq!(chains.chains, vec![56, 137]);

        let stats: StatsResponse =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::Stats {}).unwrap()).unwrap();
        assert_eq!(stats.total_minted, 0);
        assert_eq!(stats.total_received, 0);
    }

    #[test]
    fn test_instantiate_twice_fails() {
        let mut deps = mock_dependencies();
        let info = mock_info("creator", &[]);

        instantiate(deps.as_mut(), mock_env(), info.clone(), instantiate_msg()).unwrap();
        let err = instantiate(deps.as_mut(), mock_env(), info, instantiate_msg()).unwrap_err();
        assert_eq!(err, ContractError::AlreadyInitialized);
    }

    #[test]
    fn test_instantiate_rejects_zero_home_chain() {
        let mut deps = mock_dependencies();
        let mut msg = instantiate_msg();
        msg.home_chain_id = 0;

        let err = instantiate(deps.as_mut(), mock_env(), mock_info("creator", &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidChainId { chain_id: 0 });
    }

    #[test]
    fn test_instantiate_rejects_home_as_remote() {
        let mut deps = mock_dependencies();
        let mut msg = instantiate_msg();
        msg.supported_chains = vec![56, 1];

        let err = instantiate(deps.as_mut(), mock_env(), mock_info("creator", &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidChainId { chain_id: 1 });
    }

    #[test]
    fn test_instantiate_rejects_bad_key() {
        let mut deps = mock_dependencies();
        let mut msg = instantiate_msg();
        msg.tss_public_key = Binary::from(vec![0x02; 20]);

        let err = instantiate(deps.as_mut(), mock_env(), mock_info("creator", &[]), msg)
            .unwrap_err();
        assert!(matches!(err, ContractError::InvalidPublicKey { .. }));
    }
}

//! Configuration management handlers.
//!
//! This module handles:
//! - TSS key rotation
//! - Supported chain management (add/remove)
//! - Pause flag

use common::to_hex;
use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response};

use super::load_config_as_authority;
use crate::error::ContractError;
use crate::signature::validate_public_key;
use crate::state::{CONFIG, SUPPORTED_CHAINS};

// ============================================================================
// TSS Key
// ============================================================================

/// Replace the trusted TSS key. Signatures made for the old key stop
/// verifying immediately.
pub fn execute_set_tss_key(
    deps: DepsMut,
    info: MessageInfo,
    public_key: Binary,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_authority(deps.storage, &info.sender)?;
    validate_public_key(&public_key)?;

    config.tss_public_key = public_key;
    config.key_version += 1;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_tss_key")
        .add_attribute("key_version", config.key_version.to_string())
        .add_attribute("tss_public_key", to_hex(&config.tss_public_key)))
}

// ============================================================================
// Supported Chains
// ============================================================================

/// Add a supported remote chain.
pub fn execute_add_supported_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
) -> Result<Response, ContractError> {
    let config = load_config_as_authority(deps.storage, &info.sender)?;

    if chain_id == 0 || chain_id == config.home_chain_id {
        return Err(ContractError::InvalidChainId { chain_id });
    }

    SUPPORTED_CHAINS.save(deps.storage, chain_id, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_supported_chain")
        .add_attribute("chain_id", chain_id.to_string()))
}

/// Remove a supported remote chain. In-flight transfers to it stay locked
/// until reverted by the authority.
pub fn execute_remove_supported_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
) -> Result<Response, ContractError> {
    load_config_as_authority(deps.storage, &info.sender)?;

    if !SUPPORTED_CHAINS.has(deps.storage, chain_id) {
        return Err(ContractError::UnsupportedChain { chain_id });
    }
    SUPPORTED_CHAINS.remove(deps.storage, chain_id);

    Ok(Response::new()
        .add_attribute("method", "remove_supported_chain")
        .add_attribute("chain_id", chain_id.to_string()))
}

// ============================================================================
// Pause
// ============================================================================

/// Set or clear the global pause flag.
pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_authority(deps.storage, &info.sender)?;

    config.paused = paused;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_paused")
        .add_attribute("paused", paused.to_string()))
}

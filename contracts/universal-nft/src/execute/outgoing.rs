//! Outbound transfer handlers (lock, revert, confirm).
//!
//! Locking an asset emits the canonical outbound message for the relay. The
//! contract never signs; it only prepares deterministic bytes.

use common::{encode_outbound_message, to_hex, TransferPayload};
use cosmwasm_std::{to_json_binary, Binary, DepsMut, Env, MessageInfo, Response, Storage};

use super::{load_config_as_authority, next_id};
use crate::error::ContractError;
use crate::msg::InitiateTransferResponse;
use crate::state::{
    AssetRecord, LockState, TransferRecord, TransferStatus, ASSETS, CONFIG, MAX_REF_LEN,
    NEXT_TRANSFER_ID, STATS, SUPPORTED_CHAINS, TRANSFERS, USED_NONCES,
};

// ============================================================================
// InitiateTransfer - Owner
// ============================================================================

/// Lock an asset for transfer to `destination_chain`.
///
/// Checks run in a fixed order and all of them pass before the first write:
/// pause flag, destination chain, asset state and ownership, nonce.
pub fn execute_initiate_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset_id: u64,
    destination_chain: u64,
    destination_address: Binary,
    nonce: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }

    if !SUPPORTED_CHAINS.has(deps.storage, destination_chain) {
        return Err(ContractError::UnsupportedChain {
            chain_id: destination_chain,
        });
    }
    if destination_address.is_empty() || destination_address.len() > MAX_REF_LEN {
        return Err(ContractError::InvalidAddress {
            reason: format!(
                "destination address must be 1 to {} bytes, got {}",
                MAX_REF_LEN,
                destination_address.len()
            ),
        });
    }

    let mut asset = ASSETS
        .may_load(deps.storage, asset_id)?
        .ok_or(ContractError::NotFound { asset_id })?;
    if !asset.cross_chain_enabled {
        return Err(ContractError::TransferDisabled);
    }
    let owner = match &asset.state {
        LockState::Locked { .. } => return Err(ContractError::AlreadyLocked),
        LockState::Free { owner } => owner.clone(),
    };
    if info.sender != owner {
        return Err(ContractError::NotOwner);
    }

    let nonce_key = (config.home_chain_id, nonce);
    if USED_NONCES.has(deps.storage, nonce_key) {
        return Err(ContractError::NonceReused {
            chain_id: config.home_chain_id,
            nonce,
        });
    }

    // All preconditions hold; apply effects
    let message = encode_outbound_message(
        destination_chain,
        &destination_address,
        asset_id,
        &transfer_payload(&asset),
        nonce,
        config.home_chain_id,
    );

    let transfer_id = next_id(deps.storage, &NEXT_TRANSFER_ID)?;
    asset.state = LockState::Locked { transfer_id };
    ASSETS.save(deps.storage, asset_id, &asset)?;
    USED_NONCES.save(deps.storage, nonce_key, &true)?;

    let transfer = TransferRecord {
        transfer_id,
        asset_id,
        sender: owner.clone(),
        destination_chain,
        destination_address: destination_address.clone(),
        nonce,
        status: TransferStatus::Initiated,
        created_at: env.block.time,
        message: Binary::from(message.clone()),
    };
    TRANSFERS.save(deps.storage, transfer_id, &transfer)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_transfers += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .set_data(to_json_binary(&InitiateTransferResponse {
            transfer_id,
            message: Binary::from(message.clone()),
        })?)
        .add_attribute("method", "initiate_transfer")
        .add_attribute("transfer_id", transfer_id.to_string())
        .add_attribute("asset_id", asset_id.to_string())
        .add_attribute("sender", owner)
        .add_attribute("destination_chain", destination_chain.to_string())
        .add_attribute("destination_address", to_hex(&destination_address))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("home_chain_id", config.home_chain_id.to_string())
        .add_attribute("message", to_hex(&message)))
}

// ============================================================================
// RevertTransfer - Authority
// ============================================================================

/// Release a locked asset back to the owner that locked it.
///
/// Only pending transfers can be reverted. The outbound nonce stays consumed.
pub fn execute_revert_transfer(
    deps: DepsMut,
    info: MessageInfo,
    asset_id: u64,
) -> Result<Response, ContractError> {
    load_config_as_authority(deps.storage, &info.sender)?;

    let (mut asset, mut transfer) = load_pending_transfer(deps.storage, asset_id)?;

    asset.state = LockState::Free {
        owner: transfer.sender.clone(),
    };
    transfer.status = TransferStatus::Reverted;
    ASSETS.save(deps.storage, asset_id, &asset)?;
    TRANSFERS.save(deps.storage, transfer.transfer_id, &transfer)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_reverted += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_attribute("method", "revert_transfer")
        .add_attribute("asset_id", asset_id.to_string())
        .add_attribute("transfer_id", transfer.transfer_id.to_string())
        .add_attribute("owner", transfer.sender)
        .add_attribute("reverted_by", info.sender))
}

// ============================================================================
// ConfirmTransfer - Authority
// ============================================================================

/// Mark a pending transfer as delivered. The asset stays locked in custody
/// and can only come back through an unlocking receipt.
pub fn execute_confirm_transfer(
    deps: DepsMut,
    info: MessageInfo,
    asset_id: u64,
) -> Result<Response, ContractError> {
    load_config_as_authority(deps.storage, &info.sender)?;

    let (_, mut transfer) = load_pending_transfer(deps.storage, asset_id)?;

    transfer.status = TransferStatus::Confirmed;
    TRANSFERS.save(deps.storage, transfer.transfer_id, &transfer)?;

    Ok(Response::new()
        .add_attribute("method", "confirm_transfer")
        .add_attribute("asset_id", asset_id.to_string())
        .add_attribute("transfer_id", transfer.transfer_id.to_string()))
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Payload describing `asset` on the wire.
pub(crate) fn transfer_payload(asset: &AssetRecord) -> TransferPayload {
    TransferPayload {
        origin_chain: asset.origin_chain,
        origin_asset_id: asset.origin_asset_id,
        metadata: asset.metadata.clone(),
    }
}

/// Load a locked asset together with its `Initiated` transfer.
fn load_pending_transfer(
    storage: &dyn Storage,
    asset_id: u64,
) -> Result<(AssetRecord, TransferRecord), ContractError> {
    let asset = ASSETS
        .may_load(storage, asset_id)?
        .ok_or(ContractError::NotFound { asset_id })?;

    let transfer_id = match asset.state {
        LockState::Locked { transfer_id } => transfer_id,
        LockState::Free { .. } => return Err(ContractError::NotLocked),
    };
    let transfer = TRANSFERS.load(storage, transfer_id)?;
    if transfer.status != TransferStatus::Initiated {
        return Err(ContractError::TransferNotPending);
    }

    Ok((asset, transfer))
}

//! Query handlers for the Universal NFT bridge contract.
//!
//! This module contains all query message handlers for retrieving contract state.

use common::{encode_inbound_message, keccak256, TransferPayload};
use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    AssetResponse, AssetsResponse, ConfigResponse, MessageResponse, NonceUsedResponse,
    OwnerResponse, PendingAuthorityResponse, ReceiptResponse, StatsResponse,
    SupportedChainsResponse, TransferResponse, TransfersResponse, VerifyOwnershipResponse,
};
use crate::state::{
    AssetRecord, TransferRecord, ASSETS, CONFIG, PENDING_AUTHORITY, RECEIPTS, STATS,
    SUPPORTED_CHAINS, TRANSFERS, USED_NONCES,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        authority: config.authority,
        tss_public_key: config.tss_public_key,
        key_version: config.key_version,
        home_chain_id: config.home_chain_id,
        paused: config.paused,
    })
}

/// Query bridge statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_minted: stats.total_minted,
        total_transfers: stats.total_transfers,
        total_received: stats.total_received,
        total_reverted: stats.total_reverted,
    })
}

/// Query all supported remote chains in ascending order.
pub fn query_supported_chains(deps: Deps) -> StdResult<SupportedChainsResponse> {
    let chains = SUPPORTED_CHAINS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<u64>>>()?;
    Ok(SupportedChainsResponse { chains })
}

pub fn query_pending_authority(deps: Deps) -> StdResult<Option<PendingAuthorityResponse>> {
    let pending = PENDING_AUTHORITY.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAuthorityResponse {
        new_authority: p.new_authority,
        proposed_at: p.proposed_at,
    }))
}

// ============================================================================
// Asset Queries
// ============================================================================

/// Current owner of an asset. Locked assets have no host-chain owner.
pub fn query_get_owner(deps: Deps, asset_id: u64) -> StdResult<OwnerResponse> {
    let asset = load_asset(deps, asset_id)?;
    Ok(OwnerResponse {
        asset_id,
        owner: asset.state.owner().cloned(),
    })
}

pub fn query_verify_ownership(
    deps: Deps,
    asset_id: u64,
    owner: String,
) -> StdResult<VerifyOwnershipResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let asset = load_asset(deps, asset_id)?;
    Ok(VerifyOwnershipResponse {
        asset_id,
        is_owner: asset.state.owner() == Some(&owner),
        cross_chain_enabled: asset.cross_chain_enabled,
        locked: asset.state.is_locked(),
    })
}

pub fn query_asset(deps: Deps, asset_id: u64) -> StdResult<AssetResponse> {
    load_asset(deps, asset_id).map(asset_response)
}

/// Query paginated list of assets.
pub fn query_assets(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<AssetsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let assets = ASSETS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, asset)| asset_response(asset)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AssetsResponse { assets })
}

// ============================================================================
// Transfer and Receipt Queries
// ============================================================================

pub fn query_transfer(deps: Deps, transfer_id: u64) -> StdResult<TransferResponse> {
    TRANSFERS
        .load(deps.storage, transfer_id)
        .map(transfer_response)
}

/// Query paginated list of outbound transfers.
pub fn query_transfers(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<TransfersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let transfers = TRANSFERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, transfer)| transfer_response(transfer)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TransfersResponse { transfers })
}

pub fn query_receipt(deps: Deps, receipt_id: u64) -> StdResult<ReceiptResponse> {
    let receipt = RECEIPTS.load(deps.storage, receipt_id)?;
    Ok(ReceiptResponse {
        receipt_id: receipt.receipt_id,
        source_chain: receipt.source_chain,
        source_tx_ref: receipt.source_tx_ref,
        nonce: receipt.nonce,
        recipient: receipt.recipient,
        asset_id: receipt.asset_id,
        unlocked: receipt.unlocked,
        key_version: receipt.key_version,
        verified: receipt.verified,
        created_at: receipt.created_at,
    })
}

/// Check whether a (chain, nonce) pair has been consumed.
pub fn query_nonce_used(deps: Deps, chain_id: u64, nonce: u64) -> StdResult<NonceUsedResponse> {
    Ok(NonceUsedResponse {
        chain_id,
        nonce,
        used: USED_NONCES.has(deps.storage, (chain_id, nonce)),
    })
}

// ============================================================================
// Message Queries (relay helpers)
// ============================================================================

/// Stored outbound message of a transfer, with its keccak256 digest.
pub fn query_outbound_message(deps: Deps, transfer_id: u64) -> StdResult<MessageResponse> {
    let transfer = TRANSFERS.load(deps.storage, transfer_id)?;
    Ok(message_response(transfer.message.to_vec()))
}

/// Build the inbound message a signer must sign for `ReceiveTransfer`.
///
/// Pure function of its inputs; does not read contract state.
pub fn query_compute_inbound_message(
    source_chain: u64,
    source_tx_ref: Binary,
    nonce: u64,
    recipient: String,
    payload: TransferPayload,
) -> StdResult<MessageResponse> {
    let message = encode_inbound_message(source_chain, &source_tx_ref, &payload, nonce, &recipient);
    Ok(message_response(message))
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn load_asset(deps: Deps, asset_id: u64) -> StdResult<AssetRecord> {
    ASSETS
        .may_load(deps.storage, asset_id)?
        .ok_or_else(|| StdError::not_found(format!("asset {}", asset_id)))
}

fn asset_response(asset: AssetRecord) -> AssetResponse {
    AssetResponse {
        asset_id: asset.asset_id,
        state: asset.state,
        cross_chain_enabled: asset.cross_chain_enabled,
        origin_chain: asset.origin_chain,
        origin_asset_id: asset.origin_asset_id,
        metadata: asset.metadata,
        created_at: asset.created_at,
    }
}

fn transfer_response(transfer: TransferRecord) -> TransferResponse {
    TransferResponse {
        transfer_id: transfer.transfer_id,
        asset_id: transfer.asset_id,
        sender: transfer.sender,
        destination_chain: transfer.destination_chain,
        destination_address: transfer.destination_address,
        nonce: transfer.nonce,
        status: transfer.status,
        created_at: transfer.created_at,
    }
}

fn message_response(message: Vec<u8>) -> MessageResponse {
    let digest = keccak256(&message);
    MessageResponse {
        message: Binary::from(message),
        digest: Binary::from(digest.to_vec()),
    }
}

//! Inbound transfer handler (verify, then mint or unlock).
//!
//! Ordering is the core correctness property of the bridge:
//! 1. cheap gating (pause flag, supported source chain)
//! 2. TSS signature over the canonical inbound message
//! 3. nonce check-and-set, committed in the same transaction as the
//!    mint/unlock
//!
//! A bad signature never consumes the nonce, so a corrected resubmission
//! with the same nonce still goes through.

use common::{encode_inbound_message, to_hex, TransferPayload};
use cosmwasm_std::{to_json_binary, Addr, Binary, DepsMut, Env, MessageInfo, Response, Storage};

use super::next_id;
use crate::error::ContractError;
use crate::msg::ReceiveTransferResponse;
use crate::signature::verify_tss_signature;
use crate::state::{
    AssetRecord, Config, LockState, ReceiptRecord, TransferStatus, ASSETS, CONFIG, MAX_REF_LEN,
    NEXT_ASSET_ID, NEXT_RECEIPT_ID, RECEIPTS, STATS, SUPPORTED_CHAINS, TRANSFERS, USED_NONCES,
};

/// Process a TSS-signed transfer message from `source_chain`.
#[allow(clippy::too_many_arguments)]
pub fn execute_receive_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    source_chain: u64,
    source_tx_ref: Binary,
    nonce: u64,
    recipient: String,
    payload: TransferPayload,
    signature: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    if !SUPPORTED_CHAINS.has(deps.storage, source_chain) {
        return Err(ContractError::UnsupportedChain {
            chain_id: source_chain,
        });
    }
    if source_tx_ref.is_empty() || source_tx_ref.len() > MAX_REF_LEN {
        return Err(ContractError::InvalidTxRef {
            reason: format!(
                "source tx reference must be 1 to {} bytes, got {}",
                MAX_REF_LEN,
                source_tx_ref.len()
            ),
        });
    }

    let message = encode_inbound_message(source_chain, &source_tx_ref, &payload, nonce, &recipient);
    verify_tss_signature(deps.api, &message, &signature, &config.tss_public_key)?;

    let recipient = deps.api.addr_validate(&recipient)?;

    let nonce_key = (source_chain, nonce);
    if USED_NONCES.has(deps.storage, nonce_key) {
        return Err(ContractError::NonceReused {
            chain_id: source_chain,
            nonce,
        });
    }

    // Verified and fresh: consume the nonce together with the state change
    USED_NONCES.save(deps.storage, nonce_key, &true)?;

    let returning = find_returning_asset(deps.storage, &config, source_chain, &payload)?;
    let (asset_id, unlocked) = match returning {
        Some(mut asset) => {
            asset.state = LockState::Free {
                owner: recipient.clone(),
            };
            ASSETS.save(deps.storage, asset.asset_id, &asset)?;
            (asset.asset_id, true)
        }
        None => {
            let asset_id = mint_bridged_asset(deps.storage, &env, &config, &recipient, payload)?;
            (asset_id, false)
        }
    };

    let receipt_id = next_id(deps.storage, &NEXT_RECEIPT_ID)?;
    let receipt = ReceiptRecord {
        receipt_id,
        source_chain,
        source_tx_ref: source_tx_ref.clone(),
        nonce,
        recipient: recipient.clone(),
        asset_id,
        unlocked,
        key_version: config.key_version,
        verified: true,
        created_at: env.block.time,
    };
    RECEIPTS.save(deps.storage, receipt_id, &receipt)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_received += 1;
    if !unlocked {
        stats.total_minted += 1;
    }
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .set_data(to_json_binary(&ReceiveTransferResponse {
            receipt_id,
            asset_id,
            unlocked,
        })?)
        .add_attribute("method", "receive_transfer")
        .add_attribute("receipt_id", receipt_id.to_string())
        .add_attribute("asset_id", asset_id.to_string())
        .add_attribute("unlocked", unlocked.to_string())
        .add_attribute("source_chain", source_chain.to_string())
        .add_attribute("source_tx_ref", to_hex(&source_tx_ref))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("recipient", recipient)
        .add_attribute("relayer", info.sender)
        .add_attribute("key_version", config.key_version.to_string()))
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Find a home-chain asset that is locked awaiting return from `source_chain`.
///
/// The payload must name this chain as origin, and the asset's pending or
/// confirmed transfer must have targeted the chain the message comes from.
fn find_returning_asset(
    storage: &dyn Storage,
    config: &Config,
    source_chain: u64,
    payload: &TransferPayload,
) -> Result<Option<AssetRecord>, ContractError> {
    if payload.origin_chain != config.home_chain_id {
        return Ok(None);
    }
    let Some(asset) = ASSETS.may_load(storage, payload.origin_asset_id)? else {
        return Ok(None);
    };
    // Local id space also holds bridged-in records; only a home asset qualifies
    if asset.origin_chain != config.home_chain_id {
        return Ok(None);
    }
    let transfer_id = match asset.state {
        LockState::Locked { transfer_id } => transfer_id,
        LockState::Free { .. } => return Ok(None),
    };

    let transfer = TRANSFERS.load(storage, transfer_id)?;
    let awaiting_return = transfer.destination_chain == source_chain
        && matches!(
            transfer.status,
            TransferStatus::Initiated | TransferStatus::Confirmed
        );

    Ok(awaiting_return.then_some(asset))
}

/// Mint a new record for an asset arriving from another chain.
///
/// A home-origin payload that matched no waiting asset becomes a new home
/// asset. On the home chain the origin id is always the local id.
fn mint_bridged_asset(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
    recipient: &Addr,
    payload: TransferPayload,
) -> Result<u64, ContractError> {
    let asset_id = next_id(storage, &NEXT_ASSET_ID)?;
    let origin_asset_id = if payload.origin_chain == config.home_chain_id {
        asset_id
    } else {
        payload.origin_asset_id
    };
    let record = AssetRecord {
        asset_id,
        state: LockState::Free {
            owner: recipient.clone(),
        },
        cross_chain_enabled: true,
        origin_chain: payload.origin_chain,
        origin_asset_id,
        metadata: payload.metadata,
        created_at: env.block.time,
    };
    ASSETS.save(storage, asset_id, &record)?;
    Ok(asset_id)
}

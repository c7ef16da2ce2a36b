//! State definitions for the Universal NFT bridge contract
//!
//! This module defines the configuration singleton, the asset registry, the
//! nonce ledger and the append-only transfer/receipt logs.

use common::AssetMetadata;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Identity permitted to reconfigure the bridge
    pub authority: Addr,
    /// Trusted TSS public key (SEC1 secp256k1, compressed or uncompressed)
    pub tss_public_key: Binary,
    /// Bumped on every key rotation; informational only
    pub key_version: u32,
    /// Identifier of the chain this contract runs on
    pub home_chain_id: u64,
    /// Global kill-switch for cross-chain operations
    pub paused: bool,
}

/// Pending authority hand-over
#[cw_serde]
pub struct PendingAuthority {
    pub new_authority: Addr,
    pub proposed_at: Timestamp,
}

/// Bridge statistics. Never used for correctness decisions.
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_minted: u64,
    pub total_transfers: u64,
    pub total_received: u64,
    pub total_reverted: u64,
}

// ============================================================================
// Asset Registry
// ============================================================================

/// Lock state of an asset.
///
/// A locked asset has no host-chain owner; the original owner is kept on the
/// transfer record that locked it.
#[cw_serde]
pub enum LockState {
    /// The owner may transfer or bridge the asset
    Free { owner: Addr },
    /// Pending an outbound transfer, or custodied after a confirmed one
    Locked { transfer_id: u64 },
}

impl LockState {
    pub fn owner(&self) -> Option<&Addr> {
        match self {
            LockState::Free { owner } => Some(owner),
            LockState::Locked { .. } => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked { .. })
    }
}

/// One record per asset ever minted or bridged in. Never deleted.
#[cw_serde]
pub struct AssetRecord {
    pub asset_id: u64,
    pub state: LockState,
    pub cross_chain_enabled: bool,
    /// Chain where the asset was first minted
    pub origin_chain: u64,
    /// Asset id on the origin chain
    pub origin_asset_id: u64,
    pub metadata: AssetMetadata,
    pub created_at: Timestamp,
}

// ============================================================================
// Transfer and Receipt Logs
// ============================================================================

/// Outbound transfer status, advanced only by authority reconciliation
#[cw_serde]
pub enum TransferStatus {
    Initiated,
    Confirmed,
    Reverted,
}

/// Outbound transfer record (append-only, one per attempt)
#[cw_serde]
pub struct TransferRecord {
    pub transfer_id: u64,
    pub asset_id: u64,
    /// Owner at the time the asset was locked; restored on revert
    pub sender: Addr,
    pub destination_chain: u64,
    pub destination_address: Binary,
    pub nonce: u64,
    pub status: TransferStatus,
    pub created_at: Timestamp,
    /// Canonical unsigned outbound message
    pub message: Binary,
}

/// Inbound receipt record (append-only, immutable)
#[cw_serde]
pub struct ReceiptRecord {
    pub receipt_id: u64,
    pub source_chain: u64,
    pub source_tx_ref: Binary,
    pub nonce: u64,
    pub recipient: Addr,
    pub asset_id: u64,
    /// True when an existing locked asset was released instead of minted
    pub unlocked: bool,
    /// TSS key version that verified the message
    pub key_version: u32,
    pub verified: bool,
    pub created_at: Timestamp,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:universal-nft";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum length of a destination address or source transaction reference
pub const MAX_REF_LEN: usize = 64;

// ============================================================================
// Storage
// ============================================================================

/// Configuration singleton
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending authority proposal (if any)
pub const PENDING_AUTHORITY: Item<PendingAuthority> = Item::new("pending_authority");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Supported remote chains
/// Key: chain id, Value: always true (presence is membership)
pub const SUPPORTED_CHAINS: Map<u64, bool> = Map::new("supported_chains");

/// Asset registry
/// Key: asset id, Value: AssetRecord
pub const ASSETS: Map<u64, AssetRecord> = Map::new("assets");

/// Next asset id to assign (starts at 1)
pub const NEXT_ASSET_ID: Item<u64> = Item::new("next_asset_id");

/// Nonce ledger: consumed (chain id, nonce) pairs. Entries are never removed.
pub const USED_NONCES: Map<(u64, u64), bool> = Map::new("used_nonces");

/// Outbound transfer log
/// Key: transfer id (sequence), Value: TransferRecord
pub const TRANSFERS: Map<u64, TransferRecord> = Map::new("transfers");

/// Next transfer id (starts at 1)
pub const NEXT_TRANSFER_ID: Item<u64> = Item::new("next_transfer_id");

/// Inbound receipt log
/// Key: receipt id (sequence), Value: ReceiptRecord
pub const RECEIPTS: Map<u64, ReceiptRecord> = Map::new("receipts");

/// Next receipt id (starts at 1)
pub const NEXT_RECEIPT_ID: Item<u64> = Item::new("next_receipt_id");

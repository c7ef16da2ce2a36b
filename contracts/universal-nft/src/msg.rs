//! Message types for the Universal NFT bridge contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use common::{AssetMetadata, TransferPayload};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp};

use crate::state::{LockState, TransferStatus};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message (initialize)
#[cw_serde]
pub struct InstantiateMsg {
    /// Authority address for configuration and reconciliation
    pub authority: String,
    /// Trusted TSS public key (33-byte compressed or 65-byte uncompressed secp256k1)
    pub tss_public_key: Binary,
    /// Identifier of this chain
    pub home_chain_id: u64,
    /// Initially supported remote chains
    pub supported_chains: Vec<u64>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Asset Registry
    // ========================================================================
    /// Mint a new asset on this chain
    ///
    /// Authorization: Anyone (minting policy is external)
    Mint {
        owner: String,
        metadata: AssetMetadata,
        cross_chain_enabled: bool,
    },

    // ========================================================================
    // Outbound Transfers (Lock)
    // ========================================================================
    /// Lock an asset and emit the canonical transfer message
    ///
    /// Authorization: Asset owner
    InitiateTransfer {
        asset_id: u64,
        destination_chain: u64,
        /// Recipient on the destination chain (1 to 64 raw bytes)
        destination_address: Binary,
        /// Caller-chosen nonce, unique per home chain
        nonce: u64,
    },

    /// Release a locked asset back to its original owner after an
    /// off-chain failure
    ///
    /// Authorization: Authority only
    RevertTransfer { asset_id: u64 },

    /// Mark a pending outbound transfer as delivered. The asset stays locked.
    ///
    /// Authorization: Authority only
    ConfirmTransfer { asset_id: u64 },

    // ========================================================================
    // Inbound Transfers (Mint / Unlock)
    // ========================================================================
    /// Process a TSS-signed message from a remote chain
    ///
    /// Authorization: Anyone (the relay); the signature is the credential
    ReceiveTransfer {
        source_chain: u64,
        /// Transaction reference on the source chain (1 to 64 bytes)
        source_tx_ref: Binary,
        nonce: u64,
        recipient: String,
        payload: TransferPayload,
        /// 64-byte compact secp256k1 signature over keccak256(inbound message)
        signature: Binary,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    /// Replace the trusted TSS key (atomic, no grace period)
    SetTssKey { public_key: Binary },

    /// Add a supported remote chain
    AddSupportedChain { chain_id: u64 },

    /// Remove a supported remote chain
    RemoveSupportedChain { chain_id: u64 },

    /// Set or clear the global pause flag
    SetPaused { paused: bool },

    // ========================================================================
    // Authority Transfer
    // ========================================================================
    /// Propose a new authority
    ProposeAuthority { new_authority: String },

    /// Accept the pending authority role
    AcceptAuthority {},

    /// Cancel the pending authority proposal
    CancelAuthorityProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatsResponse)]
    Stats {},

    #[returns(SupportedChainsResponse)]
    SupportedChains {},

    #[returns(Option<PendingAuthorityResponse>)]
    PendingAuthority {},

    /// Current owner of an asset; `None` while locked
    #[returns(OwnerResponse)]
    GetOwner { asset_id: u64 },

    #[returns(VerifyOwnershipResponse)]
    VerifyOwnership { asset_id: u64, owner: String },

    #[returns(AssetResponse)]
    Asset { asset_id: u64 },

    #[returns(AssetsResponse)]
    Assets {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(TransferResponse)]
    Transfer { transfer_id: u64 },

    #[returns(TransfersResponse)]
    Transfers {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(ReceiptResponse)]
    Receipt { receipt_id: u64 },

    #[returns(NonceUsedResponse)]
    NonceUsed { chain_id: u64, nonce: u64 },

    /// Canonical outbound message of a recorded transfer
    #[returns(MessageResponse)]
    OutboundMessage { transfer_id: u64 },

    /// Inbound message bytes and digest a signer must sign
    #[returns(MessageResponse)]
    ComputeInboundMessage {
        source_chain: u64,
        source_tx_ref: Binary,
        nonce: u64,
        recipient: String,
        payload: TransferPayload,
    },
}

// ============================================================================
// Execute Response Data
// ============================================================================

#[cw_serde]
pub struct MintResponse {
    pub asset_id: u64,
}

#[cw_serde]
pub struct InitiateTransferResponse {
    pub transfer_id: u64,
    /// Unsigned canonical outbound message
    pub message: Binary,
}

#[cw_serde]
pub struct ReceiveTransferResponse {
    pub receipt_id: u64,
    pub asset_id: u64,
    pub unlocked: bool,
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub authority: Addr,
    pub tss_public_key: Binary,
    pub key_version: u32,
    pub home_chain_id: u64,
    pub paused: bool,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_minted: u64,
    pub total_transfers: u64,
    pub total_received: u64,
    pub total_reverted: u64,
}

#[cw_serde]
pub struct SupportedChainsResponse {
    pub chains: Vec<u64>,
}

#[cw_serde]
pub struct PendingAuthorityResponse {
    pub new_authority: Addr,
    pub proposed_at: Timestamp,
}

#[cw_serde]
pub struct OwnerResponse {
    pub asset_id: u64,
    pub owner: Option<Addr>,
}

#[cw_serde]
pub struct VerifyOwnershipResponse {
    pub asset_id: u64,
    pub is_owner: bool,
    pub cross_chain_enabled: bool,
    pub locked: bool,
}

#[cw_serde]
pub struct AssetResponse {
    pub asset_id: u64,
    pub state: LockState,
    pub cross_chain_enabled: bool,
    pub origin_chain: u64,
    pub origin_asset_id: u64,
    pub metadata: AssetMetadata,
    pub created_at: Timestamp,
}

#[cw_serde]
pub struct AssetsResponse {
    pub assets: Vec<AssetResponse>,
}

#[cw_serde]
pub struct TransferResponse {
    pub transfer_id: u64,
    pub asset_id: u64,
    pub sender: Addr,
    pub destination_chain: u64,
    pub destination_address: Binary,
    pub nonce: u64,
    pub status: TransferStatus,
    pub created_at: Timestamp,
}

#[cw_serde]
pub struct TransfersResponse {
    pub transfers: Vec<TransferResponse>,
}

#[cw_serde]
pub struct ReceiptResponse {
    pub receipt_id: u64,
    pub source_chain: u64,
    pub source_tx_ref: Binary,
    pub nonce: u64,
    pub recipient: Addr,
    pub asset_id: u64,
    pub unlocked: bool,
    pub key_version: u32,
    pub verified: bool,
    pub created_at: Timestamp,
}

#[cw_serde]
pub struct NonceUsedResponse {
    pub chain_id: u64,
    pub nonce: u64,
    pub used: bool,
}

#[cw_serde]
pub struct MessageResponse {
    pub message: Binary,
    /// keccak256 of `message`
    pub digest: Binary,
}

//! Error types for the Universal NFT bridge contract
//!
//! Every error is terminal for the call that raised it. The host discards all
//! storage writes of a failed call, and handlers check every precondition
//! before their first write.

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the authority can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the pending authority can accept")]
    UnauthorizedPendingAuthority,

    #[error("No pending authority change")]
    NoPendingAuthority,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Contract already initialized")]
    AlreadyInitialized,

    #[error("Invalid chain ID: {chain_id}")]
    InvalidChainId { chain_id: u64 },

    #[error("Chain not supported: {chain_id}")]
    UnsupportedChain { chain_id: u64 },

    #[error("Invalid TSS public key: {reason}")]
    InvalidPublicKey { reason: String },

    #[error("Bridge is paused")]
    Paused,

    // ========================================================================
    // Asset Errors
    // ========================================================================

    #[error("Asset not found: {asset_id}")]
    NotFound { asset_id: u64 },

    #[error("Caller is not the asset owner")]
    NotOwner,

    #[error("Cross-chain transfers not enabled for this asset")]
    TransferDisabled,

    #[error("Asset is locked for a cross-chain transfer")]
    AlreadyLocked,

    #[error("Asset is not locked")]
    NotLocked,

    #[error("Transfer is not pending")]
    TransferNotPending,

    // ========================================================================
    // Message Errors
    // ========================================================================

    #[error("Nonce already used: chain {chain_id}, nonce {nonce}")]
    NonceReused { chain_id: u64, nonce: u64 },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid source transaction reference: {reason}")]
    InvalidTxRef { reason: String },
}

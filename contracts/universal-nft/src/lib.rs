//! Universal NFT Bridge Contract - Cross-Chain NFT Custody and Minting
//!
//! This contract keeps the registry of non-fungible assets on one chain and
//! moves them to and from other chains, trusting a single threshold (TSS)
//! signing key held by an off-chain network.
//!
//! # Outgoing Flow (Lock)
//! 1. Owner calls `InitiateTransfer`; the asset is locked in place
//! 2. The contract emits the canonical outbound message for the relay
//! 3. The TSS network signs it and delivers it to the destination chain
//! 4. The authority reconciles with `ConfirmTransfer` or `RevertTransfer`
//!
//! # Incoming Flow (Mint / Unlock)
//! 1. A relay submits `ReceiveTransfer` with the TSS signature
//! 2. The signature is checked over the canonical inbound message
//! 3. The `(source_chain, nonce)` pair is consumed
//! 4. A returning home asset is unlocked, anything else is minted
//!
//! # Security
//! - Single trusted TSS key, rotatable by the authority
//! - Nonce ledger against replay
//! - Emergency pause for cross-chain operations

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod signature;
pub mod state;

pub use crate::error::ContractError;
pub use crate::signature::{validate_public_key, verify_tss_signature};

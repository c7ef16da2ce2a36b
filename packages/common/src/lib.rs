//! Common - Shared Types and Codec for the Universal NFT Bridge
//!
//! This package provides the wire types and the canonical byte layout shared
//! by the bridge contract and by the off-chain relay/TSS signer. Both sides
//! must produce identical bytes or signatures never verify.

pub mod codec;
pub mod payload;

pub use codec::{
    encode_inbound_message, encode_outbound_message, encode_payload, keccak256, to_hex,
};
pub use payload::{AssetMetadata, TransferPayload};

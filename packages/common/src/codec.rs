//! Canonical message codec for cross-chain NFT transfers
//!
//! The outbound message is what the home chain emits for the relay; the
//! inbound message is what the TSS signs and the destination chain verifies.
//! Any implementation of the signer must reproduce these bytes exactly.
//!
//! # Encoding rules
//! - Chain ids, asset ids and nonces: `u64`, 8 bytes, big-endian
//! - Variable-width fields: `u32` big-endian length prefix, then the raw bytes
//!
//! # Payload layout
//! ```text
//! origin_chain (8) | origin_asset_id (8) | lp(name) | lp(symbol) | lp(uri) | lp(attributes)
//! ```
//!
//! # Outbound layout
//! ```text
//! destination_chain (8) | lp(destination_address) | asset_id (8) | lp(payload) | nonce (8) | home_chain_id (8)
//! ```
//!
//! # Inbound layout
//! ```text
//! source_chain (8) | lp(source_tx_ref) | lp(payload) | nonce (8) | lp(recipient)
//! ```

use tiny_keccak::{Hasher, Keccak};

use crate::payload::TransferPayload;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Encode the asset payload.
pub fn encode_payload(payload: &TransferPayload) -> Vec<u8> {
    let metadata = &payload.metadata;
    let mut out = Vec::with_capacity(
        16 + 16
            + metadata.name.len()
            + metadata.symbol.len()
            + metadata.uri.len()
            + metadata.attributes.len(),
    );
    put_u64(&mut out, payload.origin_chain);
    put_u64(&mut out, payload.origin_asset_id);
    put_bytes(&mut out, metadata.name.as_bytes());
    put_bytes(&mut out, metadata.symbol.as_bytes());
    put_bytes(&mut out, metadata.uri.as_bytes());
    put_bytes(&mut out, metadata.attributes.as_slice());
    out
}

/// Encode the unsigned outbound message emitted when an asset is locked.
pub fn encode_outbound_message(
    destination_chain: u64,
    destination_address: &[u8],
    asset_id: u64,
    payload: &TransferPayload,
    nonce: u64,
    home_chain_id: u64,
) -> Vec<u8> {
    let payload_bytes = encode_payload(payload);
    let mut out = Vec::with_capacity(32 + 8 + destination_address.len() + payload_bytes.len());
    put_u64(&mut out, destination_chain);
    put_bytes(&mut out, destination_address);
    put_u64(&mut out, asset_id);
    put_bytes(&mut out, &payload_bytes);
    put_u64(&mut out, nonce);
    put_u64(&mut out, home_chain_id);
    out
}

/// Encode the inbound message whose keccak256 digest the TSS key signs.
pub fn encode_inbound_message(
    source_chain: u64,
    source_tx_ref: &[u8],
    payload: &TransferPayload,
    nonce: u64,
    recipient: &str,
) -> Vec<u8> {
    let payload_bytes = encode_payload(payload);
    let mut out = Vec::with_capacity(
        16 + 12 + source_tx_ref.len() + payload_bytes.len() + recipient.len(),
    );
    put_u64(&mut out, source_chain);
    put_bytes(&mut out, source_tx_ref);
    put_bytes(&mut out, &payload_bytes);
    put_u64(&mut out, nonce);
    put_bytes(&mut out, recipient.as_bytes());
    out
}

/// Render bytes as a 0x-prefixed hex string (for attributes/logging)
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ============================================================================
// Internal helpers
// ============================================================================

fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    // Field sizes are bounded by the host message size, far below u32::MAX
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::AssetMetadata;
    use cosmwasm_std::Binary;

    fn sample_payload() -> TransferPayload {
        TransferPayload {
            origin_chain: 1,
            origin_asset_id: 42,
            metadata: AssetMetadata {
                name: "Ape".to_string(),
                symbol: "APE".to_string(),
                uri: "ipfs://x".to_string(),
                attributes: Binary::from(vec![0xAA, 0xBB]),
            },
        }
    }

    #[test]
    fn test_keccak256_basic() {
        // keccak256("hello") = 0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8
        let result = keccak256(b"hello");
        assert_eq!(
            to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_payload_layout() {
        let bytes = encode_payload(&sample_payload());

        assert_eq!(&bytes[0..8], &1u64.to_be_bytes());
        assert_eq!(&bytes[8..16], &42u64.to_be_bytes());
        // lp("Ape")
        assert_eq!(&bytes[16..20], &3u32.to_be_bytes());
        assert_eq!(&bytes[20..23], b"Ape");
        // lp("APE")
        assert_eq!(&bytes[23..27], &3u32.to_be_bytes());
        assert_eq!(&bytes[27..30], b"APE");
        // lp("ipfs://x")
        assert_eq!(&bytes[30..34], &8u32.to_be_bytes());
        assert_eq!(&bytes[34..42], b"ipfs://x");
        // lp(attributes)
        assert_eq!(&bytes[42..46], &2u32.to_be_bytes());
        assert_eq!(&bytes[46..48], &[0xAA, 0xBB]);
        assert_eq!(bytes.len(), 48);
    }

    #[test]
    fn test_empty_metadata_still_length_prefixed() {
        let payload = TransferPayload {
            origin_chain: 7,
            origin_asset_id: 8,
            metadata: AssetMetadata::default(),
        };
        let bytes = encode_payload(&payload);
        // 16 bytes of ids + four zero length prefixes
        assert_eq!(bytes.len(), 16 + 4 * 4);
        assert!(bytes[16..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_outbound_layout() {
        let payload = sample_payload();
        let payload_bytes = encode_payload(&payload);
        let msg = encode_outbound_message(56, &[0x11; 20], 42, &payload, 7, 1);

        assert_eq!(&msg[0..8], &56u64.to_be_bytes());
        assert_eq!(&msg[8..12], &20u32.to_be_bytes());
        assert_eq!(&msg[12..32], &[0x11; 20]);
        assert_eq!(&msg[32..40], &42u64.to_be_bytes());
        assert_eq!(&msg[40..44], &(payload_bytes.len() as u32).to_be_bytes());

        let after_payload = 44 + payload_bytes.len();
        assert_eq!(&msg[44..after_payload], payload_bytes.as_slice());
        assert_eq!(&msg[after_payload..after_payload + 8], &7u64.to_be_bytes());
        assert_eq!(&msg[after_payload + 8..], &1u64.to_be_bytes());
    }

    #[test]
    fn test_inbound_layout() {
        let payload = sample_payload();
        let payload_bytes = encode_payload(&payload);
        let msg = encode_inbound_message(1, b"txref", &payload, 7, "cosmwasm1recipient");

        assert_eq!(&msg[0..8], &1u64.to_be_bytes());
        assert_eq!(&msg[8..12], &5u32.to_be_bytes());
        assert_eq!(&msg[12..17], b"txref");
        assert_eq!(&msg[17..21], &(payload_bytes.len() as u32).to_be_bytes());

        let after_payload = 21 + payload_bytes.len();
        assert_eq!(&msg[21..after_payload], payload_bytes.as_slice());
        assert_eq!(&msg[after_payload..after_payload + 8], &7u64.to_be_bytes());
        assert_eq!(
            &msg[after_payload + 8..after_payload + 12],
            &18u32.to_be_bytes()
        );
        assert_eq!(&msg[after_payload + 12..], b"cosmwasm1recipient");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let payload = sample_payload();
        let a = encode_inbound_message(1, b"tx", &payload, 9, "addr");
        let b = encode_inbound_message(1, b"tx", &payload.clone(), 9, "addr");
        assert_eq!(a, b);
        assert_eq!(keccak256(&a), keccak256(&b));
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        // Shifting a byte between adjacent fields must change the encoding
        let mut left = sample_payload();
        left.metadata.name = "ab".to_string();
        left.metadata.symbol = "c".to_string();

        let mut right = sample_payload();
        right.metadata.name = "a".to_string();
        right.metadata.symbol = "bc".to_string();

        assert_ne!(encode_payload(&left), encode_payload(&right));
    }

    #[test]
    fn test_nonce_changes_digest() {
        let payload = sample_payload();
        let a = encode_inbound_message(1, b"tx", &payload, 1, "addr");
        let b = encode_inbound_message(1, b"tx", &payload, 2, "addr");
        assert_ne!(keccak256(&a), keccak256(&b));
    }
}

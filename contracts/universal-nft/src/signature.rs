//! TSS signature verification
//!
//! The TSS group key is an ordinary secp256k1 key from the verifier's point
//! of view. Signatures are 64-byte compact `r || s` over the keccak256 digest
//! of the canonical inbound message.

use common::keccak256;
use cosmwasm_std::Api;

use crate::error::ContractError;

/// Length of a compressed SEC1 public key
pub const COMPRESSED_KEY_LEN: usize = 33;

/// Length of an uncompressed SEC1 public key
pub const UNCOMPRESSED_KEY_LEN: usize = 65;

/// Check that a public key is a well-formed SEC1 encoding.
///
/// Curve membership is checked by the host at verification time.
pub fn validate_public_key(public_key: &[u8]) -> Result<(), ContractError> {
    match (public_key.len(), public_key.first().copied()) {
        (COMPRESSED_KEY_LEN, Some(0x02 | 0x03)) => Ok(()),
        (UNCOMPRESSED_KEY_LEN, Some(0x04)) => Ok(()),
        (COMPRESSED_KEY_LEN | UNCOMPRESSED_KEY_LEN, _) => Err(ContractError::InvalidPublicKey {
            reason: "unexpected SEC1 prefix byte".to_string(),
        }),
        (len, _) => Err(ContractError::InvalidPublicKey {
            reason: format!("expected 33 or 65 bytes, got {}", len),
        }),
    }
}

/// Verify a TSS signature over `message` against `public_key`.
///
/// Any malformed input and any mismatch both yield `InvalidSignature`.
pub fn verify_tss_signature(
    api: &dyn Api,
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
) -> Result<(), ContractError> {
    let digest = keccak256(message);
    match api.secp256k1_verify(&digest, signature, public_key) {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(ContractError::InvalidSignature),
    }
}

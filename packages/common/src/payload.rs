//! Asset payload types carried across chains.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

/// Opaque NFT metadata. The bridge carries it but never interprets it.
#[cw_serde]
#[derive(Default)]
pub struct AssetMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Free-form attributes agreed out-of-band by metadata services
    pub attributes: Binary,
}

/// Asset payload as it travels between chains.
///
/// `origin_chain` and `origin_asset_id` identify the asset on the chain where
/// it was first minted, so a round trip can unlock the original instead of
/// minting a copy.
#[cw_serde]
pub struct TransferPayload {
    /// Chain where the asset was first minted
    pub origin_chain: u64,
    /// Asset id on the origin chain
    pub origin_asset_id: u64,
    /// Opaque metadata
    pub metadata: AssetMetadata,
}

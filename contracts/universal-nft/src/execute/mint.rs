//! Asset registry mint handler.

use common::AssetMetadata;
use cosmwasm_std::{to_json_binary, DepsMut, Env, MessageInfo, Response};

use super::next_id;
use crate::error::ContractError;
use crate::msg::MintResponse;
use crate::state::{AssetRecord, LockState, ASSETS, CONFIG, NEXT_ASSET_ID, STATS};

/// Mint a new home-chain asset in the `Free` state.
///
/// Minting has no cross-chain side effects and is allowed while paused.
pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    metadata: AssetMetadata,
    cross_chain_enabled: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let owner = deps.api.addr_validate(&owner)?;

    let asset_id = next_id(deps.storage, &NEXT_ASSET_ID)?;
    let record = AssetRecord {
        asset_id,
        state: LockState::Free {
            owner: owner.clone(),
        },
        cross_chain_enabled,
        origin_chain: config.home_chain_id,
        origin_asset_id: asset_id,
        metadata,
        created_at: env.block.time,
    };
    ASSETS.save(deps.storage, asset_id, &record)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_minted += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .set_data(to_json_binary(&MintResponse { asset_id })?)
        .add_attribute("method", "mint")
        .add_attribute("asset_id", asset_id.to_string())
        .add_attribute("owner", owner)
        .add_attribute("minter", info.sender)
        .add_attribute("cross_chain_enabled", cross_chain_enabled.to_string()))
}

//! Authority hand-over handlers (propose/accept/cancel).

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use super::load_config_as_authority;
use crate::error::ContractError;
use crate::state::{PendingAuthority, CONFIG, PENDING_AUTHORITY};

/// Propose a new authority. Replaces any earlier proposal.
pub fn execute_propose_authority(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_authority: String,
) -> Result<Response, ContractError> {
    load_config_as_authority(deps.storage, &info.sender)?;

    let new_authority = deps.api.addr_validate(&new_authority)?;
    let pending = PendingAuthority {
        new_authority: new_authority.clone(),
        proposed_at: env.block.time,
    };
    PENDING_AUTHORITY.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_attribute("method", "propose_authority")
        .add_attribute("new_authority", new_authority))
}

/// Accept the pending authority role.
pub fn execute_accept_authority(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_AUTHORITY
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingAuthority)?;

    if info.sender != pending.new_authority {
        return Err(ContractError::UnauthorizedPendingAuthority);
    }

    let mut config = CONFIG.load(deps.storage)?;
    let old_authority = config.authority;
    config.authority = pending.new_authority;
    CONFIG.save(deps.storage, &config)?;
    PENDING_AUTHORITY.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_authority")
        .add_attribute("old_authority", old_authority)
        .add_attribute("new_authority", config.authority))
}

/// Cancel the pending authority proposal.
pub fn execute_cancel_authority_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    load_config_as_authority(deps.storage, &info.sender)?;

    if PENDING_AUTHORITY.may_load(deps.storage)?.is_none() {
        return Err(ContractError::NoPendingAuthority);
    }
    PENDING_AUTHORITY.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_authority_proposal"))
}

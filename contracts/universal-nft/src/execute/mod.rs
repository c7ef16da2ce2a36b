//! Execute handlers for the Universal NFT bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `mint` - Asset registry minting
//! - `outgoing` - Lock, revert and confirm for outbound transfers
//! - `incoming` - Signature-verified mint/unlock for inbound transfers
//! - `config` - TSS key, supported chains and pause flag
//! - `admin` - Authority hand-over

mod admin;
mod config;
mod incoming;
mod mint;
mod outgoing;

pub use admin::*;
pub use config::*;
pub use incoming::*;
pub use mint::*;
pub use outgoing::*;

use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::{Config, CONFIG};

/// Load the config and require `sender` to be the authority.
pub(crate) fn load_config_as_authority(
    storage: &dyn Storage,
    sender: &Addr,
) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.authority {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

/// Load a sequence counter and advance it, returning the id to use now.
pub(crate) fn next_id(
    storage: &mut dyn Storage,
    counter: &cw_storage_plus::Item<u64>,
) -> Result<u64, ContractError> {
    let id = counter.load(storage)?;
    counter.save(storage, &(id + 1))?;
    Ok(id)
}

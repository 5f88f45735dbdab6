use cosmwasm_std::{Api, StdResult, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{Royalty, ROYALTY};

/// 万分比分母
pub const BIPS_DENOMINATOR: u64 = 10_000;

/// 校验并保存版税：接收地址不能为空，bips 不超过 10000
pub fn set_royalty(storage: &mut dyn Storage, api: &dyn Api, receiver: &str, bips: u64) -> Result<Royalty, ContractError> {
    if receiver.trim().is_empty() {
        return Err(ContractError::InvalidRoyalty { reason: "receiver is the zero address".to_string() });
    }
    if bips > BIPS_DENOMINATOR {
        return Err(ContractError::InvalidRoyalty { reason: format!("bips {bips} must be <= {BIPS_DENOMINATOR}") });
    }
    let royalty = Royalty { receiver: api.addr_validate(receiver)?, bips };
    ROYALTY.save(storage, &royalty)?;
    Ok(royalty)
}

/// 应付版税：floor(sale_price × bips / 10000)
pub fn royalty_amount(royalty: &Royalty, sale_price: Uint128) -> Uint128 {
    sale_price.multiply_ratio(royalty.bips, BIPS_DENOMINATOR)
}

pub fn load(storage: &dyn Storage) -> StdResult<Royalty> {
    ROYALTY.load(storage)
}

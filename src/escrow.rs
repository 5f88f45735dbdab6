//! 托管账本：奖品从铸造到揭示期间由本合约持有。
//! 每次托管/释放都返回一条发往奖品合约的 WasmMsg，并同步更新托管计数。

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Storage, WasmMsg};

use crate::msg::PrizeExecuteMsg;
use crate::state::ESCROW_BALANCES;

/// 在奖品合约上以指定 id 铸造给 custodian（本合约）
pub fn escrow_prize(storage: &mut dyn Storage, prize: &Addr, token_id: u64, custodian: &Addr) -> StdResult<CosmosMsg> {
    ESCROW_BALANCES.update(storage, prize, |balance| -> StdResult<u64> {
        Ok(balance.unwrap_or(0) + 1)
    })?;
    prize_msg(prize, &PrizeExecuteMsg::Mint { token_id, owner: custodian.to_string() })
}

/// 将托管中的奖品转给 recipient
pub fn release_prize(storage: &mut dyn Storage, prize: &Addr, token_id: u64, recipient: &Addr) -> StdResult<CosmosMsg> {
    ESCROW_BALANCES.update(storage, prize, |balance| -> StdResult<u64> {
        Ok(balance.unwrap_or(0).saturating_sub(1))
    })?;
    prize_msg(prize, &PrizeExecuteMsg::TransferNft { recipient: recipient.to_string(), token_id })
}

pub fn escrow_balance(storage: &dyn Storage, prize: &Addr) -> StdResult<u64> {
    Ok(ESCROW_BALANCES.may_load(storage, prize)?.unwrap_or(0))
}

fn prize_msg(prize: &Addr, msg: &PrizeExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: prize.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}

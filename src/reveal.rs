//! 揭示：燃烧盲盒并把其中托管的奖品逐个释放给接收者，
//! 持有者/授权地址可自行揭示，拥有者可批量强制揭示。

use cosmwasm_std::{attr, Addr, CosmosMsg, DepsMut, MessageInfo, Response, Storage};
use nft_ledger::ledger;

use crate::contract::must_owner;
use crate::error::ContractError;
use crate::escrow::release_prize;
use crate::sale::join_ids;
use crate::state::CRATE_CONTENTS;

/// 揭示：调用者须为 from、from 的全局操作员，或该盲盒的所有者/授权地址；
/// 盲盒须归 from 所有，to 不能为空地址。奖品按内容顺序转给 to，然后销毁盲盒。
pub fn exec_reveal_from(deps: DepsMut, info: MessageInfo, from: String, to: String, token_id: u64) -> Result<Response, ContractError> {
    let from = deps.api.addr_validate(&from)?;
    let owner = ledger::owner_of(deps.storage, token_id)?;

    let authorized = info.sender == from
        || ledger::is_operator(deps.storage, &from, &info.sender)
        || ledger::is_approved_or_owner(deps.storage, &info.sender, token_id)?;
    if !authorized {
        return Err(ContractError::NotAuthorized);
    }
    if owner != from {
        return Err(ContractError::WrongOwner);
    }
    if to.trim().is_empty() {
        return Err(ContractError::ZeroRecipient);
    }
    let to = deps.api.addr_validate(&to)?;

    let (messages, released) = release_crate(deps.storage, token_id, &to)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attributes(vec![
            attr("action", "reveal"),
            attr("caller", info.sender),
            attr("from", from),
            attr("to", to),
            attr("token_id", token_id.to_string()),
            attr("prizes", released.to_string()),
        ]))
}

/// 仅拥有者：批量揭示给各自当前持有人；不存在、重复或已揭示的 id 直接跳过
pub fn exec_force_reveal(deps: DepsMut, info: MessageInfo, token_ids: Vec<u64>) -> Result<Response, ContractError> {
    must_owner(&deps, &info.sender)?;

    let mut messages = vec![];
    let mut revealed = vec![];
    for token_id in token_ids {
        let Some(token) = ledger::may_load(deps.storage, token_id)? else {
            continue;
        };
        let (released, _) = release_crate(deps.storage, token_id, &token.owner)?;
        messages.extend(released);
        revealed.push(token_id);
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attributes(vec![
            attr("action", "force_reveal"),
            attr("revealed", join_ids(&revealed)),
        ]))
}

/// 释放盲盒内所有奖品并销毁盲盒，返回转移消息与奖品数量
fn release_crate(storage: &mut dyn Storage, token_id: u64, recipient: &Addr) -> Result<(Vec<CosmosMsg>, usize), ContractError> {
    let contents = CRATE_CONTENTS.may_load(storage, token_id)?.unwrap_or_default();
    let mut messages = Vec::with_capacity(contents.len());
    for entry in &contents {
        messages.push(release_prize(storage, &entry.token, entry.token_id, recipient)?);
    }
    CRATE_CONTENTS.remove(storage, token_id);
    ledger::burn(storage, token_id)?;
    Ok((messages, contents.len()))
}

use cosmwasm_std::{Addr, Empty, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// 最小化的 Token 信息：所有者与单次授权地址
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TokenInfo {
    pub owner: Addr,
    pub approved: Option<Addr>,
}

pub const TOKENS: Map<u64, TokenInfo> = Map::new("tokens");
/// （owner, token_id）→ 用于按所有者枚举
pub const OWNED: Map<(&Addr, u64), Empty> = Map::new("owned");
pub const BALANCES: Map<&Addr, u64> = Map::new("balances");
/// （owner, operator）→ 全局操作员
pub const OPERATORS: Map<(&Addr, &Addr), Empty> = Map::new("operators");
pub const NUM_TOKENS: Item<u64> = Item::new("num_tokens");
/// 下一个顺序 token_id（燃烧后不复用）
pub const NEXT_TOKEN_ID: Item<u64> = Item::new("next_token_id");

/// 以下一个顺序 id 铸造给 owner，返回新 id
pub fn mint_next(storage: &mut dyn Storage, owner: &Addr) -> StdResult<u64> {
    let token_id = NEXT_TOKEN_ID.may_load(storage)?.unwrap_or(0);
    insert(storage, owner, token_id)?;
    NEXT_TOKEN_ID.save(storage, &(token_id + 1))?;
    Ok(token_id)
}

/// 以指定 id 铸造；id 已存在时拒绝
pub fn mint_with_id(storage: &mut dyn Storage, owner: &Addr, token_id: u64) -> Result<(), LedgerError> {
    if TOKENS.has(storage, token_id) {
        return Err(LedgerError::Claimed { token_id });
    }
    insert(storage, owner, token_id)?;
    Ok(())
}

fn insert(storage: &mut dyn Storage, owner: &Addr, token_id: u64) -> StdResult<()> {
    TOKENS.save(storage, token_id, &TokenInfo { owner: owner.clone(), approved: None })?;
    OWNED.save(storage, (owner, token_id), &Empty {})?;
    adjust_balance(storage, owner, true)?;
    let count = NUM_TOKENS.may_load(storage)?.unwrap_or(0);
    NUM_TOKENS.save(storage, &(count + 1))
}

/// 销毁 token，返回销毁前的信息
pub fn burn(storage: &mut dyn Storage, token_id: u64) -> Result<TokenInfo, LedgerError> {
    let info = load(storage, token_id)?;
    TOKENS.remove(storage, token_id);
    OWNED.remove(storage, (&info.owner, token_id));
    adjust_balance(storage, &info.owner, false)?;
    let remaining = NUM_TOKENS.may_load(storage)?.unwrap_or(0).saturating_sub(1);
    NUM_TOKENS.save(storage, &remaining)?;
    Ok(info)
}

fn adjust_balance(storage: &mut dyn Storage, owner: &Addr, increase: bool) -> StdResult<()> {
    let current = BALANCES.may_load(storage, owner)?.unwrap_or(0);
    let next = if increase { current + 1 } else { current.saturating_sub(1) };
    if next == 0 {
        BALANCES.remove(storage, owner);
    } else {
        BALANCES.save(storage, owner, &next)?;
    }
    Ok(())
}

pub fn load(storage: &dyn Storage, token_id: u64) -> Result<TokenInfo, LedgerError> {
    TOKENS
        .may_load(storage, token_id)?
        .ok_or(LedgerError::NotFound { token_id })
}

pub fn may_load(storage: &dyn Storage, token_id: u64) -> StdResult<Option<TokenInfo>> {
    TOKENS.may_load(storage, token_id)
}

pub fn owner_of(storage: &dyn Storage, token_id: u64) -> Result<Addr, LedgerError> {
    Ok(load(storage, token_id)?.owner)
}

pub fn is_operator(storage: &dyn Storage, owner: &Addr, operator: &Addr) -> bool {
    OPERATORS.has(storage, (owner, operator))
}

/// spender 是否为 token 的所有者、单次授权地址或所有者的全局操作员
pub fn is_approved_or_owner(storage: &dyn Storage, spender: &Addr, token_id: u64) -> Result<bool, LedgerError> {
    let info = load(storage, token_id)?;
    Ok(can_send(storage, &info, spender))
}

fn can_send(storage: &dyn Storage, info: &TokenInfo, spender: &Addr) -> bool {
    info.owner == *spender
        || info.approved.as_ref() == Some(spender)
        || is_operator(storage, &info.owner, spender)
}

/// 转移 NFT：要求调用者为所有者/授权地址/全局操作员，转移后清除单次授权
pub fn transfer(storage: &mut dyn Storage, sender: &Addr, recipient: &Addr, token_id: u64) -> Result<TokenInfo, LedgerError> {
    let mut info = load(storage, token_id)?;
    if !can_send(storage, &info, sender) {
        return Err(LedgerError::NotOwnerNorApproved);
    }
    let previous = info.owner.clone();
    OWNED.remove(storage, (&previous, token_id));
    adjust_balance(storage, &previous, false)?;

    info.owner = recipient.clone();
    info.approved = None;
    TOKENS.save(storage, token_id, &info)?;
    OWNED.save(storage, (recipient, token_id), &Empty {})?;
    adjust_balance(storage, recipient, true)?;
    Ok(info)
}

/// 设置单次授权（所有者或全局操作员可调用）；spender 为 None 时撤销
pub fn set_approval(storage: &mut dyn Storage, sender: &Addr, spender: Option<&Addr>, token_id: u64) -> Result<(), LedgerError> {
    let mut info = load(storage, token_id)?;
    if info.owner != *sender && !is_operator(storage, &info.owner, sender) {
        return Err(LedgerError::NotOwnerNorApproved);
    }
    info.approved = spender.cloned();
    TOKENS.save(storage, token_id, &info)?;
    Ok(())
}

/// 撤销单次授权：仅当当前授权地址为 spender 时清除，否则为空操作
pub fn revoke(storage: &mut dyn Storage, sender: &Addr, spender: &Addr, token_id: u64) -> Result<(), LedgerError> {
    let mut info = load(storage, token_id)?;
    if info.owner != *sender && !is_operator(storage, &info.owner, sender) {
        return Err(LedgerError::NotOwnerNorApproved);
    }
    if info.approved.as_ref() == Some(spender) {
        info.approved = None;
        TOKENS.save(storage, token_id, &info)?;
    }
    Ok(())
}

pub fn set_operator(storage: &mut dyn Storage, owner: &Addr, operator: &Addr, approved: bool) -> StdResult<()> {
    if approved {
        OPERATORS.save(storage, (owner, operator), &Empty {})
    } else {
        OPERATORS.remove(storage, (owner, operator));
        Ok(())
    }
}

pub fn balance_of(storage: &dyn Storage, owner: &Addr) -> StdResult<u64> {
    Ok(BALANCES.may_load(storage, owner)?.unwrap_or(0))
}

pub fn num_tokens(storage: &dyn Storage) -> StdResult<u64> {
    Ok(NUM_TOKENS.may_load(storage)?.unwrap_or(0))
}

/// 按所有者分页枚举 token_id（升序）
pub fn tokens_of(storage: &dyn Storage, owner: &Addr, start_after: Option<u64>, limit: Option<u32>) -> StdResult<Vec<u64>> {
    let take = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    OWNED
        .prefix(owner)
        .keys(storage, start_after.map(Bound::exclusive), None, Order::Ascending)
        .take(take)
        .collect()
}

/// 全局分页枚举现存 token_id（升序）
pub fn all_tokens(storage: &dyn Storage, start_after: Option<u64>, limit: Option<u32>) -> StdResult<Vec<u64>> {
    let take = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    TOKENS
        .keys(storage, start_after.map(Bound::exclusive), None, Order::Ascending)
        .take(take)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{MockApi, MockStorage};

    #[test]
    fn mint_transfer_burn_keeps_indexes_consistent() {
        let api = MockApi::default();
        let mut storage = MockStorage::new();
        let alice = api.addr_make("alice");
        let bob = api.addr_make("bob");

        assert_eq!(mint_next(&mut storage, &alice).unwrap(), 0);
        assert_eq!(mint_next(&mut storage, &alice).unwrap(), 1);
        assert_eq!(balance_of(&storage, &alice).unwrap(), 2);
        assert_eq!(num_tokens(&storage).unwrap(), 2);

        transfer(&mut storage, &alice, &bob, 1).unwrap();
        assert_eq!(tokens_of(&storage, &alice, None, None).unwrap(), vec![0]);
        assert_eq!(tokens_of(&storage, &bob, None, None).unwrap(), vec![1]);

        burn(&mut storage, 0).unwrap();
        assert_eq!(owner_of(&storage, 0).unwrap_err(), LedgerError::NotFound { token_id: 0 });
        assert_eq!(balance_of(&storage, &alice).unwrap(), 0);
        assert_eq!(num_tokens(&storage).unwrap(), 1);
        assert_eq!(all_tokens(&storage, None, None).unwrap(), vec![1]);

        // 燃烧后的 id 不复用
        assert_eq!(mint_next(&mut storage, &alice).unwrap(), 2);
    }

    #[test]
    fn approvals_gate_transfers() {
        let api = MockApi::default();
        let mut storage = MockStorage::new();
        let alice = api.addr_make("alice");
        let bob = api.addr_make("bob");
        let carol = api.addr_make("carol");

        mint_next(&mut storage, &alice).unwrap();
        assert_eq!(transfer(&mut storage, &bob, &carol, 0).unwrap_err(), LedgerError::NotOwnerNorApproved);

        set_approval(&mut storage, &alice, Some(&bob), 0).unwrap();
        assert!(is_approved_or_owner(&storage, &bob, 0).unwrap());
        transfer(&mut storage, &bob, &carol, 0).unwrap();
        // 转移后清除单次授权
        assert_eq!(load(&storage, 0).unwrap().approved, None);

        set_operator(&mut storage, &carol, &alice, true).unwrap();
        transfer(&mut storage, &alice, &bob, 0).unwrap();
        assert_eq!(owner_of(&storage, 0).unwrap(), bob);
        assert!(!is_approved_or_owner(&storage, &alice, 0).unwrap());
    }

    #[test]
    fn revoke_only_clears_matching_spender() {
        let api = MockApi::default();
        let mut storage = MockStorage::new();
        let alice = api.addr_make("alice");
        let bob = api.addr_make("bob");
        let carol = api.addr_make("carol");

        mint_next(&mut storage, &alice).unwrap();
        set_approval(&mut storage, &alice, Some(&bob), 0).unwrap();
        assert_eq!(revoke(&mut storage, &bob, &bob, 0).unwrap_err(), LedgerError::NotOwnerNorApproved);

        revoke(&mut storage, &alice, &carol, 0).unwrap();
        assert_eq!(load(&storage, 0).unwrap().approved, Some(bob.clone()));
        revoke(&mut storage, &alice, &bob, 0).unwrap();
        assert_eq!(load(&storage, 0).unwrap().approved, None);
    }

    #[test]
    fn mint_with_id_rejects_duplicates() {
        let api = MockApi::default();
        let mut storage = MockStorage::new();
        let alice = api.addr_make("alice");

        mint_with_id(&mut storage, &alice, 7).unwrap();
        assert_eq!(mint_with_id(&mut storage, &alice, 7).unwrap_err(), LedgerError::Claimed { token_id: 7 });
        assert_eq!(tokens_of(&storage, &alice, None, None).unwrap(), vec![7]);
    }
}

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::LedgerError;

/// 角色：admin 管理角色，minter 铸造，reveal 揭示相关设置，royalty 版税设置
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Role {
    Admin,
    Minter,
    Reveal,
    Royalty,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Minter, Role::Reveal, Role::Royalty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Minter => "minter",
            Role::Reveal => "reveal",
            Role::Royalty => "royalty",
        }
    }
}

/// （role, account）→ 已授予
pub const ROLES: Map<(&str, &Addr), Empty> = Map::new("roles");

pub fn has_role(storage: &dyn Storage, role: Role, account: &Addr) -> bool {
    ROLES.has(storage, (role.as_str(), account))
}

/// 断言 account 持有 role
pub fn ensure_role(storage: &dyn Storage, role: Role, account: &Addr) -> Result<(), LedgerError> {
    if has_role(storage, role, account) {
        Ok(())
    } else {
        Err(LedgerError::MissingRole { role })
    }
}

pub fn grant_role(storage: &mut dyn Storage, role: Role, account: &Addr) -> StdResult<()> {
    ROLES.save(storage, (role.as_str(), account), &Empty {})
}

pub fn revoke_role(storage: &mut dyn Storage, role: Role, account: &Addr) {
    ROLES.remove(storage, (role.as_str(), account));
}

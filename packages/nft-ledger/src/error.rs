use cosmwasm_std::StdError;
use thiserror::Error;

use crate::roles::Role;

/// 账本错误定义
#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Token {token_id} does not exist")]
    NotFound { token_id: u64 },

    #[error("Token {token_id} already claimed")]
    Claimed { token_id: u64 },

    #[error("Caller is not owner nor approved")]
    NotOwnerNorApproved,

    #[error("Missing role: {role:?}")]
    MissingRole { role: Role },
}

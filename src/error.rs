use cosmwasm_std::{OverflowError, StdError};
use nft_ledger::LedgerError;
use thiserror::Error;

/// loot-crate 合约错误定义
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Crate count must be greater than zero")]
    InvalidCount,

    #[error("Invalid crate contents: {reason}")]
    InvalidContents { reason: String },

    #[error("Amount {count} exceeds purchase limit {limit}")]
    LimitExceeded { count: u64, limit: u64 },

    #[error("Insufficient supply: {requested} requested, {remaining} remaining")]
    SupplyExhausted { requested: u64, remaining: u64 },

    #[error("Insufficient payment: cost {cost} exceeds max cost {max_cost}")]
    PriceSlippage { cost: String, max_cost: String },

    #[error("Reveal caller is not owner nor approved")]
    NotAuthorized,

    #[error("Reveal from incorrect owner")]
    WrongOwner,

    #[error("Reveal to the zero address")]
    ZeroRecipient,

    #[error("Cannot migrate from {stored} to {expected}")]
    InvalidMigration { stored: String, expected: String },
}

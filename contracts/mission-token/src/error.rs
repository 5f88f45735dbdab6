use cosmwasm_std::StdError;
use nft_ledger::LedgerError;
use thiserror::Error;

/// mission-token 合约错误定义
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("Max supply must be greater than zero")]
    InvalidMaxSupply,

    #[error("Max supply {max_supply} reached")]
    MaxSupplyReached { max_supply: u64 },

    #[error("Invalid royalty: {reason}")]
    InvalidRoyalty { reason: String },

    #[error("Starting index block is already set")]
    AlreadyCommitted,

    #[error("Starting index block must be set")]
    BlockNotCommitted,

    #[error("Starting index is already set")]
    AlreadyFinal,

    #[error("Reveal parameters are locked once the starting index block is set")]
    RevealLocked,

    #[error("Cannot migrate from {stored} to {expected}")]
    InvalidMigration { stored: String, expected: String },
}

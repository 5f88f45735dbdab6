//! nft-ledger
//!
//! Storage-backed NFT primitives shared by the loot crate contracts:
//! - Sequential or caller-chosen u64 token ids, owner and single-token approval
//! - Operator (approve-all) table, per-owner enumeration and balances
//! - A role table (`admin` / `minter` / `reveal` / `royalty`)
//!
//! 合约内 NFT 账本：
//! - 顺序或指定 u64 token_id，记录所有者与单个授权地址
//! - 全局操作员授权、按所有者枚举与余额
//! - 角色表（admin / minter / reveal / royalty）
pub mod error;
pub mod ledger;
pub mod roles;

pub use crate::error::LedgerError;
pub use crate::ledger::TokenInfo;
pub use crate::roles::Role;

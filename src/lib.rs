//! loot-crate
//!
//! A CosmWasm loot crate collection supporting:
//! - Crates that bundle escrowed prize NFTs, minted with deterministic prize ids
//! - Capped CW20 sale with per-call limit and max-cost slippage bound
//! - Owner reservation drawing on the same sale budget
//! - Burn-to-reveal releasing prizes to any recipient, plus owner bulk reveal
//!
//! CosmWasm 盲盒（loot crate）合约，功能包括：
//! - 每个盲盒托管固定组成的奖品 NFT，奖品 id 按声明顺序确定性分配
//! - 使用 CW20 代币按单价销售，受总量上限、单次上限与滑点上限约束
//! - 拥有者预留铸造，与销售共用同一额度
//! - 销毁盲盒并将奖品发送给指定地址；拥有者可批量强制揭示
pub mod allocation;
pub mod contract;
pub mod error;
pub mod escrow;
pub mod msg;
pub mod reveal;
pub mod sale;
pub mod state;

pub use crate::error::ContractError;
pub use crate::contract::{instantiate, execute, query, migrate};

//! mission-token
//!
//! A CosmWasm NFT used as a loot crate prize, supporting:
//! - Role-gated minting of caller-chosen token ids up to a fixed max supply
//! - A fair reveal starting index committed to a block by supply or time
//! - Royalty record (receiver + basis points) and base URI metadata
//!
//! 任务 NFT 合约（作为盲盒奖品），功能包括：
//! - 持有 minter 角色的地址按指定 id 铸造，总量不超过上限
//! - 达到总量或揭示时间后锁定区块，据此计算公平揭示起始序号
//! - 版税记录（接收地址 + 万分比）与 base URI 元数据
pub mod contract;
pub mod error;
pub mod msg;
pub mod reveal_index;
pub mod royalty;
pub mod state;

pub use crate::error::ContractError;
pub use crate::contract::{instantiate, execute, query, migrate};

use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 合约配置（max_supply 实例化后不可变）
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub name: String,
    pub symbol: String,
    pub max_supply: u64,
    pub base_uri: Option<String>,
}

/// 被锁定用于计算起始序号的区块
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct CommittedBlock {
    pub chain_id: String,
    pub height: u64,
    pub time: Timestamp,
}

/// 公平揭示状态：committed 与 starting_index 各自只写一次
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RevealState {
    /// 揭示时间（秒）；区块时间达到后下一次铸造锁定区块
    pub reveal_timestamp: u64,
    pub provenance_hash: String,
    pub committed: Option<CommittedBlock>,
    /// 0 表示未设置
    pub starting_index: u64,
}

/// 版税：receiver 按 bips / 10000 抽成
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Royalty {
    pub receiver: Addr,
    pub bips: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const REVEAL: Item<RevealState> = Item::new("reveal");
pub const ROYALTY: Item<Royalty> = Item::new("royalty");
/// 单个 token 的元数据地址覆盖，优先于 base_uri 拼接
pub const TOKEN_URIS: Map<u64, String> = Map::new("token_uris");

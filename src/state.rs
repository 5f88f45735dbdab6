use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 全局配置（只存一份）：拥有者、销售上限与计数、单次购买上限、单价、支付代币、收款地址、元数据前缀
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    pub max_sales: u64,
    pub sales: u64,
    pub purchase_limit: u64,
    pub price: Uint128,
    pub payment_token: Addr,
    /// None 时收入留在本合约
    pub recipient: Option<Addr>,
    pub base_uri: Option<String>,
}

/// 每个盲盒包含的奖品类型与数量（实例化后不可变，顺序决定内容下标布局）
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PrizeSpec {
    pub token: Addr,
    pub amount: u64,
}

/// 盲盒内容条目：奖品合约与其 token_id
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ContentEntry {
    pub token: Addr,
    pub token_id: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const SALE_CONTENTS: Item<Vec<PrizeSpec>> = Item::new("sale_contents");
/// 与 SALE_CONTENTS 一一对应：每种奖品下一个未分配的 token_id
pub const ALLOCATION_COUNTERS: Item<Vec<u64>> = Item::new("allocation_counters");
/// 盲盒 token_id → 内容（揭示时删除）
pub const CRATE_CONTENTS: Map<u64, Vec<ContentEntry>> = Map::new("crate_contents");
/// 奖品合约 → 本合约托管中的数量
pub const ESCROW_BALANCES: Map<&Addr, u64> = Map::new("escrow_balances");

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

/// 实例化参数：销售上限、单次购买上限、支付代币（CW20）、单价、收款地址与每个盲盒的奖品组成
#[cw_serde]
pub struct InstantiateMsg {
    pub max_sales: u64,
    pub purchase_limit: u64,
    pub payment_token: String,
    pub price: Uint128,
    pub recipient: Option<String>,
    pub contents: Vec<PrizeSpecMsg>,
    pub base_uri: Option<String>,
}

/// 奖品组成：奖品合约地址与每个盲盒包含的数量
#[cw_serde]
pub struct PrizeSpecMsg {
    pub token: String,
    pub amount: u64,
}

/// 执行消息入口（Execute）：销售、预留、揭示、参数更新以及盲盒 NFT 操作
#[cw_serde]
pub enum ExecuteMsg {
    /// 仅拥有者：免费铸造 count 个盲盒给 to（计入销售上限）
    Reserve { to: String, count: u64 },
    /// 支付 count × price 购买盲盒；max_cost 为滑点上限
    Purchase { to: String, count: u64, max_cost: Uint128 },
    /// 销毁 from 持有的盲盒，将奖品发送给 to
    RevealFrom { from: String, to: String, token_id: u64 },
    /// 仅拥有者：将列表中仍存在的盲盒揭示给各自持有人
    ForceReveal { token_ids: Vec<u64> },
    // admin controls
    SetMaxSales { max_sales: u64 },
    SetPurchaseLimit { purchase_limit: u64 },
    SetPrice { price: Uint128 },
    SetRecipient { recipient: Option<String> },
    SetBaseUri { base_uri: Option<String> },
    TransferOwnership { new_owner: String },
    // CW721-like
    TransferNft { recipient: String, token_id: u64 },
    Approve { spender: String, token_id: u64 },
    Revoke { spender: String, token_id: u64 },
    ApproveAll { operator: String },
    RevokeAll { operator: String },
}

/// 发给奖品合约的消息（与 mission-token 的 ExecuteMsg 同形）
#[cw_serde]
pub enum PrizeExecuteMsg {
    Mint { token_id: u64, owner: String },
    TransferNft { recipient: String, token_id: u64 },
}

/// 查询消息入口（Query）
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(LengthResponse)]
    SaleContentsLength {},
    #[returns(SaleContentResponse)]
    SaleContents { index: u64 },
    #[returns(LengthResponse)]
    CrateContentsLength { token_id: u64 },
    #[returns(CrateContentResponse)]
    CrateContents { token_id: u64, index: u64 },
    #[returns(AllocationCountersResponse)]
    AllocationCounters {},
    #[returns(EscrowBalanceResponse)]
    EscrowBalance { token: String },
    // CW721-like
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
    #[returns(NftInfoResponse)]
    NftInfo { token_id: u64 },
    #[returns(ApprovalResponse)]
    Approval { token_id: u64 },
    #[returns(IsApprovedForAllResponse)]
    IsApprovedForAll { owner: String, operator: String },
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(BalanceResponse)]
    BalanceOf { owner: String },
    #[returns(TokenUriResponse)]
    TokenUri { token_id: u64 },
    #[returns(TokensResponse)]
    AllTokens { start_after: Option<u64>, limit: Option<u32> },
    #[returns(TokensResponse)]
    Tokens { owner: String, start_after: Option<u64>, limit: Option<u32> },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: String,
    pub max_sales: u64,
    pub sales: u64,
    pub purchase_limit: u64,
    pub price: Uint128,
    pub payment_token: String,
    pub recipient: Option<String>,
    pub base_uri: Option<String>,
}

/// 迁移参数：当前无需参数
#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct LengthResponse { pub length: u64 }

#[cw_serde]
pub struct SaleContentResponse { pub token: String, pub amount: u64 }

#[cw_serde]
pub struct CrateContentResponse { pub token: String, pub token_id: u64 }

#[cw_serde]
pub struct AllocationCountersResponse { pub counters: Vec<SaleCounter> }

#[cw_serde]
pub struct SaleCounter { pub token: String, pub next_token_id: u64 }

#[cw_serde]
pub struct EscrowBalanceResponse { pub balance: u64 }

#[cw_serde]
pub struct OwnerOfResponse { pub owner: String }

#[cw_serde]
pub struct NftInfoResponse { pub owner: String, pub approved: Option<String> }

#[cw_serde]
pub struct ApprovalResponse { pub spender: Option<String> }

#[cw_serde]
pub struct IsApprovedForAllResponse { pub approved: bool }

#[cw_serde]
pub struct NumTokensResponse { pub count: u64 }

#[cw_serde]
pub struct BalanceResponse { pub balance: u64 }

#[cw_serde]
pub struct TokenUriResponse { pub token_uri: String }

#[cw_serde]
pub struct TokensResponse { pub tokens: Vec<u64> }

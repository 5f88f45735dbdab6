use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use nft_ledger::Role;

/// 实例化参数：名称、符号、总量上限、揭示时间（秒）与可选 base URI
#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub max_supply: u64,
    pub reveal_timestamp: u64,
    pub base_uri: Option<String>,
}

/// 执行消息入口（Execute）
#[cw_serde]
pub enum ExecuteMsg {
    /// 仅 minter：以指定 id 铸造给 owner（盲盒合约托管奖品时使用）
    Mint { token_id: u64, owner: String },
    // CW721-like
    TransferNft { recipient: String, token_id: u64 },
    Approve { spender: String, token_id: u64 },
    Revoke { spender: String, token_id: u64 },
    ApproveAll { operator: String },
    RevokeAll { operator: String },
    // roles
    GrantRole { role: Role, account: String },
    RevokeRole { role: Role, account: String },
    // reveal
    SetProvenanceHash { provenance_hash: String },
    SetRevealTimestamp { reveal_timestamp: u64 },
    EmergencySetStartingIndexBlock {},
    /// 任何人可调用：区块锁定后计算起始序号
    SetStartingIndex {},
    SetBaseUri { base_uri: Option<String> },
    /// 为已存在的 token 设置独立元数据地址，之后修改 base_uri 不影响它
    SetTokenUri { token_id: u64, token_uri: String },
    // royalty
    SetRoyalty { receiver: String, bips: u64 },
}

/// 查询消息入口（Query）
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractInfoResponse)]
    ContractInfo {},
    #[returns(RevealStateResponse)]
    RevealState {},
    #[returns(StartingIndexBlockResponse)]
    RevealStartingIndexBlock {},
    #[returns(StartingIndexResponse)]
    RevealStartingIndex {},
    #[returns(HasRoleResponse)]
    HasRole { role: Role, account: String },
    #[returns(RoyaltyResponse)]
    Royalty {},
    #[returns(RoyaltyInfoResponse)]
    RoyaltyInfo { token_id: u64, sale_price: Uint128 },
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

/// 揭示阶段：Unset → BlockCommitted → IndexFinal
#[cw_serde]
#[derive(Copy, Eq)]
pub enum RevealPhase {
    Unset,
    BlockCommitted,
    IndexFinal,
}

#[cw_serde]
pub struct ContractInfoResponse {
    pub name: String,
    pub symbol: String,
    pub max_supply: u64,
    pub base_uri: Option<String>,
}

#[cw_serde]
pub struct RevealStateResponse {
    pub phase: RevealPhase,
    pub reveal_timestamp: u64,
    pub provenance_hash: String,
    pub starting_index_block: u64,
    pub starting_index: u64,
}

/// 0 表示尚未锁定
#[cw_serde]
pub struct StartingIndexBlockResponse { pub height: u64 }

/// 0 表示尚未计算
#[cw_serde]
pub struct StartingIndexResponse { pub starting_index: u64 }

#[cw_serde]
pub struct HasRoleResponse { pub has_role: bool }

#[cw_serde]
pub struct RoyaltyResponse { pub receiver: String, pub bips: u64 }

#[cw_serde]
pub struct RoyaltyInfoResponse { pub receiver: String, pub royalty_amount: Uint128 }

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

/// 迁移参数：当前无需参数
#[cw_serde]
pub struct MigrateMsg {}

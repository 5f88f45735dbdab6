#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{attr, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult, Uint128};
use cw2::{get_contract_version, set_contract_version};
use nft_ledger::ledger;

use crate::error::ContractError;
use crate::escrow::escrow_balance;
use crate::msg::{
    AllocationCountersResponse, ApprovalResponse, BalanceResponse, ConfigResponse, CrateContentResponse, EscrowBalanceResponse, ExecuteMsg,
    InstantiateMsg, IsApprovedForAllResponse, LengthResponse, MigrateMsg, NftInfoResponse, NumTokensResponse, OwnerOfResponse, PrizeSpecMsg,
    QueryMsg, SaleContentResponse, SaleCounter, TokenUriResponse, TokensResponse,
};
use crate::reveal::{exec_force_reveal, exec_reveal_from};
use crate::sale::{exec_purchase, exec_reserve};
use crate::state::{Config, PrizeSpec, ALLOCATION_COUNTERS, CONFIG, CRATE_CONTENTS, SALE_CONTENTS};

/// 合约名称与版本（用于迁移安全校验）
const CONTRACT_NAME: &str = "crates.io:loot-crate";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化合约：设置拥有者、销售参数与奖品组成，所有分配计数器从 0 开始
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(deps: DepsMut, _env: Env, info: MessageInfo, msg: InstantiateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let contents = validate_contents(&deps, &msg.contents)?;
    let recipient = msg.recipient.as_deref().map(|r| deps.api.addr_validate(r)).transpose()?;

    let config = Config {
        owner: info.sender.clone(),
        max_sales: msg.max_sales,
        sales: 0,
        purchase_limit: msg.purchase_limit,
        price: msg.price,
        payment_token: deps.api.addr_validate(&msg.payment_token)?,
        recipient,
        base_uri: msg.base_uri,
    };
    CONFIG.save(deps.storage, &config)?;
    ALLOCATION_COUNTERS.save(deps.storage, &vec![0; contents.len()])?;
    SALE_CONTENTS.save(deps.storage, &contents)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("owner", info.sender),
        attr("max_sales", msg.max_sales.to_string()),
        attr("purchase_limit", msg.purchase_limit.to_string()),
        attr("price", msg.price),
        attr("prize_types", contents.len().to_string()),
    ]))
}

/// 奖品组成不能为空，每项数量须大于 0，单个盲盒的奖品总数不能溢出 u64
fn validate_contents(deps: &DepsMut, contents: &[PrizeSpecMsg]) -> Result<Vec<PrizeSpec>, ContractError> {
    if contents.is_empty() {
        return Err(ContractError::InvalidContents { reason: "no prize types".to_string() });
    }
    if contents.iter().try_fold(0u64, |total, c| total.checked_add(c.amount)).is_none() {
        return Err(ContractError::InvalidContents { reason: "per-crate prize total overflows".to_string() });
    }
    contents
        .iter()
        .map(|c| {
            if c.amount == 0 {
                return Err(ContractError::InvalidContents { reason: format!("zero amount for {}", c.token) });
            }
            Ok(PrizeSpec { token: deps.api.addr_validate(&c.token)?, amount: c.amount })
        })
        .collect()
}

/// 执行入口：根据消息分派到具体执行函数
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(deps: DepsMut, env: Env, info: MessageInfo, msg: ExecuteMsg) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Reserve { to, count } => exec_reserve(deps, env, info, to, count),
        ExecuteMsg::Purchase { to, count, max_cost } => exec_purchase(deps, env, info, to, count, max_cost),
        ExecuteMsg::RevealFrom { from, to, token_id } => exec_reveal_from(deps, info, from, to, token_id),
        ExecuteMsg::ForceReveal { token_ids } => exec_force_reveal(deps, info, token_ids),
        ExecuteMsg::SetMaxSales { max_sales } => exec_set_max_sales(deps, info, max_sales),
        ExecuteMsg::SetPurchaseLimit { purchase_limit } => exec_set_purchase_limit(deps, info, purchase_limit),
        ExecuteMsg::SetPrice { price } => exec_set_price(deps, info, price),
        ExecuteMsg::SetRecipient { recipient } => exec_set_recipient(deps, info, recipient),
        ExecuteMsg::SetBaseUri { base_uri } => exec_set_base_uri(deps, info, base_uri),
        ExecuteMsg::TransferOwnership { new_owner } => exec_transfer_ownership(deps, info, new_owner),
        // CW721-like
        ExecuteMsg::TransferNft { recipient, token_id } => exec_transfer(deps, info, recipient, token_id),
        ExecuteMsg::Approve { spender, token_id } => exec_approve(deps, info, spender, token_id),
        ExecuteMsg::Revoke { spender, token_id } => exec_revoke(deps, info, spender, token_id),
        ExecuteMsg::ApproveAll { operator } => exec_set_operator(deps, info, operator, true),
        ExecuteMsg::RevokeAll { operator } => exec_set_operator(deps, info, operator, false),
    }
}

/// 断言调用者为拥有者，返回最新配置
pub(crate) fn must_owner(deps: &DepsMut, sender: &Addr) -> Result<Config, ContractError> {
    let cfg: Config = CONFIG.load(deps.storage)?;
    if cfg.owner != *sender {
        return Err(ContractError::Unauthorized);
    }
    Ok(cfg)
}

/// 仅拥有者：更新销售上限（可低于已售数量，此后无法再售出）
fn exec_set_max_sales(deps: DepsMut, info: MessageInfo, max_sales: u64) -> Result<Response, ContractError> {
    let mut cfg = must_owner(&deps, &info.sender)?;
    cfg.max_sales = max_sales;
    CONFIG.save(deps.storage, &cfg)?;
    Ok(Response::new().add_attributes(vec![attr("action", "set_max_sales"), attr("max_sales", max_sales.to_string())]))
}

fn exec_set_purchase_limit(deps: DepsMut, info: MessageInfo, purchase_limit: u64) -> Result<Response, ContractError> {
    let mut cfg = must_owner(&deps, &info.sender)?;
    cfg.purchase_limit = purchase_limit;
    CONFIG.save(deps.storage, &cfg)?;
    Ok(Response::new().add_attributes(vec![attr("action", "set_purchase_limit"), attr("purchase_limit", purchase_limit.to_string())]))
}

fn exec_set_price(deps: DepsMut, info: MessageInfo, price: Uint128) -> Result<Response, ContractError> {
    let mut cfg = must_owner(&deps, &info.sender)?;
    cfg.price = price;
    CONFIG.save(deps.storage, &cfg)?;
    Ok(Response::new().add_attributes(vec![attr("action", "set_price"), attr("price", price)]))
}

/// 仅拥有者：设置收款地址；None 表示收入留在本合约
fn exec_set_recipient(deps: DepsMut, info: MessageInfo, recipient: Option<String>) -> Result<Response, ContractError> {
    let mut cfg = must_owner(&deps, &info.sender)?;
    cfg.recipient = recipient.as_deref().map(|r| deps.api.addr_validate(r)).transpose()?;
    CONFIG.save(deps.storage, &cfg)?;
    let shown = cfg.recipient.as_ref().map(|r| r.to_string()).unwrap_or_default();
    Ok(Response::new().add_attributes(vec![attr("action", "set_recipient"), attr("recipient", shown)]))
}

fn exec_set_base_uri(deps: DepsMut, info: MessageInfo, base_uri: Option<String>) -> Result<Response, ContractError> {
    let mut cfg = must_owner(&deps, &info.sender)?;
    cfg.base_uri = base_uri;
    CONFIG.save(deps.storage, &cfg)?;
    Ok(Response::new().add_attribute("action", "set_base_uri"))
}

/// 仅拥有者：转移合约所有权
fn exec_transfer_ownership(deps: DepsMut, info: MessageInfo, new_owner: String) -> Result<Response, ContractError> {
    let mut cfg = must_owner(&deps, &info.sender)?;
    cfg.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &cfg)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "transfer_ownership"),
        attr("previous_owner", info.sender),
        attr("new_owner", cfg.owner),
    ]))
}

/// 转移盲盒：所有者、单次授权地址或全局操作员可调用，内容随盲盒一起转移
fn exec_transfer(deps: DepsMut, info: MessageInfo, recipient: String, token_id: u64) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    ledger::transfer(deps.storage, &info.sender, &recipient, token_id)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "transfer_nft"),
        attr("sender", info.sender),
        attr("token_id", token_id.to_string()),
        attr("to", recipient),
    ]))
}

/// 授权某地址对单个盲盒的转移/揭示权限
fn exec_approve(deps: DepsMut, info: MessageInfo, spender: String, token_id: u64) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    ledger::set_approval(deps.storage, &info.sender, Some(&spender), token_id)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "approve"),
        attr("token_id", token_id.to_string()),
        attr("spender", spender),
    ]))
}

/// 撤销单个盲盒的授权
fn exec_revoke(deps: DepsMut, info: MessageInfo, spender: String, token_id: u64) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    ledger::revoke(deps.storage, &info.sender, &spender, token_id)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "revoke"),
        attr("token_id", token_id.to_string()),
        attr("spender", spender),
    ]))
}

/// 设置或取消全局操作员
fn exec_set_operator(deps: DepsMut, info: MessageInfo, operator: String, approved: bool) -> Result<Response, ContractError> {
    let operator = deps.api.addr_validate(&operator)?;
    ledger::set_operator(deps.storage, &info.sender, &operator, approved)?;
    let action = if approved { "approve_all" } else { "revoke_all" };
    Ok(Response::new().add_attributes(vec![attr("action", action), attr("owner", info.sender), attr("operator", operator)]))
}

/// 查询入口：根据查询消息返回对应的序列化结果
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::SaleContentsLength {} => to_json_binary(&LengthResponse { length: SALE_CONTENTS.load(deps.storage)?.len() as u64 }),
        QueryMsg::SaleContents { index } => to_json_binary(&query_sale_contents(deps, index)?),
        QueryMsg::CrateContentsLength { token_id } => to_json_binary(&query_crate_contents_length(deps, token_id)?),
        QueryMsg::CrateContents { token_id, index } => to_json_binary(&query_crate_contents(deps, token_id, index)?),
        QueryMsg::AllocationCounters {} => to_json_binary(&query_allocation_counters(deps)?),
        QueryMsg::EscrowBalance { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&EscrowBalanceResponse { balance: escrow_balance(deps.storage, &token)? })
        }
        QueryMsg::OwnerOf { token_id } => to_json_binary(&OwnerOfResponse { owner: owner_of(deps, token_id)?.to_string() }),
        QueryMsg::NftInfo { token_id } => to_json_binary(&query_nft_info(deps, token_id)?),
        QueryMsg::Approval { token_id } => to_json_binary(&ApprovalResponse {
            spender: query_nft_info(deps, token_id)?.approved,
        }),
        QueryMsg::IsApprovedForAll { owner, operator } => {
            let owner = deps.api.addr_validate(&owner)?;
            let operator = deps.api.addr_validate(&operator)?;
            to_json_binary(&IsApprovedForAllResponse { approved: ledger::is_operator(deps.storage, &owner, &operator) })
        }
        QueryMsg::NumTokens {} => to_json_binary(&NumTokensResponse { count: ledger::num_tokens(deps.storage)? }),
        QueryMsg::BalanceOf { owner } => {
            let owner = deps.api.addr_validate(&owner)?;
            to_json_binary(&BalanceResponse { balance: ledger::balance_of(deps.storage, &owner)? })
        }
        QueryMsg::TokenUri { token_id } => to_json_binary(&query_token_uri(deps, token_id)?),
        QueryMsg::AllTokens { start_after, limit } => to_json_binary(&TokensResponse {
            tokens: ledger::all_tokens(deps.storage, start_after, limit)?,
        }),
        QueryMsg::Tokens { owner, start_after, limit } => {
            let owner = deps.api.addr_validate(&owner)?;
            to_json_binary(&TokensResponse { tokens: ledger::tokens_of(deps.storage, &owner, start_after, limit)? })
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let cfg = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: cfg.owner.to_string(),
        max_sales: cfg.max_sales,
        sales: cfg.sales,
        purchase_limit: cfg.purchase_limit,
        price: cfg.price,
        payment_token: cfg.payment_token.to_string(),
        recipient: cfg.recipient.map(|r| r.to_string()),
        base_uri: cfg.base_uri,
    })
}

fn query_sale_contents(deps: Deps, index: u64) -> StdResult<SaleContentResponse> {
    let contents = SALE_CONTENTS.load(deps.storage)?;
    let spec = contents
        .get(index as usize)
        .ok_or_else(|| StdError::generic_err(format!("sale contents index {index} out of range")))?;
    Ok(SaleContentResponse { token: spec.token.to_string(), amount: spec.amount })
}

/// 已揭示或不存在的盲盒内容长度为 0
fn query_crate_contents_length(deps: Deps, token_id: u64) -> StdResult<LengthResponse> {
    let length = CRATE_CONTENTS.may_load(deps.storage, token_id)?.map(|c| c.len() as u64).unwrap_or(0);
    Ok(LengthResponse { length })
}

fn query_crate_contents(deps: Deps, token_id: u64, index: u64) -> StdResult<CrateContentResponse> {
    let contents = CRATE_CONTENTS.may_load(deps.storage, token_id)?.unwrap_or_default();
    let entry = contents
        .get(index as usize)
        .ok_or_else(|| StdError::generic_err(format!("crate {token_id} has no content at index {index}")))?;
    Ok(CrateContentResponse { token: entry.token.to_string(), token_id: entry.token_id })
}

fn query_allocation_counters(deps: Deps) -> StdResult<AllocationCountersResponse> {
    let specs = SALE_CONTENTS.load(deps.storage)?;
    let counters = ALLOCATION_COUNTERS.load(deps.storage)?;
    Ok(AllocationCountersResponse {
        counters: specs
            .iter()
            .zip(counters)
            .map(|(spec, next_token_id)| SaleCounter { token: spec.token.to_string(), next_token_id })
            .collect(),
    })
}

fn owner_of(deps: Deps, token_id: u64) -> StdResult<Addr> {
    ledger::owner_of(deps.storage, token_id).map_err(|e| StdError::generic_err(e.to_string()))
}

fn query_nft_info(deps: Deps, token_id: u64) -> StdResult<NftInfoResponse> {
    let info = ledger::load(deps.storage, token_id).map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(NftInfoResponse { owner: info.owner.to_string(), approved: info.approved.map(|a| a.to_string()) })
}

/// 元数据地址：base_uri + token_id；未设置前缀时为空字符串
fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<TokenUriResponse> {
    owner_of(deps, token_id)?;
    let cfg = CONFIG.load(deps.storage)?;
    let token_uri = cfg.base_uri.map(|base| format!("{base}{token_id}")).unwrap_or_default();
    Ok(TokenUriResponse { token_uri })
}

/// 迁移：仅允许同名合约升级并刷新版本号
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidMigration { stored: stored.contract, expected: CONTRACT_NAME.to_string() });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{attr, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult, Uint128};
use cw2::{get_contract_version, set_contract_version};
use nft_ledger::{ledger, roles, Role};

use crate::error::ContractError;
use crate::msg::{
    ApprovalResponse, BalanceResponse, ContractInfoResponse, ExecuteMsg, HasRoleResponse, InstantiateMsg, IsApprovedForAllResponse,
    MigrateMsg, NftInfoResponse, NumTokensResponse, OwnerOfResponse, QueryMsg, RevealStateResponse, RoyaltyInfoResponse, RoyaltyResponse,
    StartingIndexBlockResponse, StartingIndexResponse, TokenUriResponse, TokensResponse,
};
use crate::reveal_index;
use crate::royalty;
use crate::state::{Config, RevealState, Royalty, CONFIG, REVEAL, ROYALTY, TOKEN_URIS};

/// 合约名称与版本（用于迁移安全校验）
const CONTRACT_NAME: &str = "crates.io:mission-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化合约：实例化者获得全部角色并成为默认版税接收者（0 bips）
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(deps: DepsMut, _env: Env, info: MessageInfo, msg: InstantiateMsg) -> Result<Response, ContractError> {
    if msg.max_supply == 0 {
        return Err(ContractError::InvalidMaxSupply);
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &Config { name: msg.name.clone(), symbol: msg.symbol.clone(), max_supply: msg.max_supply, base_uri: msg.base_uri },
    )?;
    REVEAL.save(
        deps.storage,
        &RevealState { reveal_timestamp: msg.reveal_timestamp, provenance_hash: String::new(), committed: None, starting_index: 0 },
    )?;
    ROYALTY.save(deps.storage, &Royalty { receiver: info.sender.clone(), bips: 0 })?;
    for role in Role::ALL {
        roles::grant_role(deps.storage, role, &info.sender)?;
    }

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("admin", info.sender),
        attr("name", msg.name),
        attr("symbol", msg.symbol),
        attr("max_supply", msg.max_supply.to_string()),
        attr("reveal_timestamp", msg.reveal_timestamp.to_string()),
    ]))
}

/// 执行入口：根据消息分派到具体执行函数
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(deps: DepsMut, env: Env, info: MessageInfo, msg: ExecuteMsg) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { token_id, owner } => exec_mint(deps, env, info, token_id, owner),
        ExecuteMsg::TransferNft { recipient, token_id } => exec_transfer(deps, info, recipient, token_id),
        ExecuteMsg::Approve { spender, token_id } => exec_approve(deps, info, spender, token_id),
        ExecuteMsg::Revoke { spender, token_id } => exec_revoke(deps, info, spender, token_id),
        ExecuteMsg::ApproveAll { operator } => exec_set_operator(deps, info, operator, true),
        ExecuteMsg::RevokeAll { operator } => exec_set_operator(deps, info, operator, false),
        ExecuteMsg::GrantRole { role, account } => exec_set_role(deps, info, role, account, true),
        ExecuteMsg::RevokeRole { role, account } => exec_set_role(deps, info, role, account, false),
        ExecuteMsg::SetProvenanceHash { provenance_hash } => exec_set_provenance_hash(deps, info, provenance_hash),
        ExecuteMsg::SetRevealTimestamp { reveal_timestamp } => exec_set_reveal_timestamp(deps, info, reveal_timestamp),
        ExecuteMsg::EmergencySetStartingIndexBlock {} => exec_emergency_commit(deps, env, info),
        ExecuteMsg::SetStartingIndex {} => exec_set_starting_index(deps, info),
        ExecuteMsg::SetBaseUri { base_uri } => exec_set_base_uri(deps, info, base_uri),
        ExecuteMsg::SetTokenUri { token_id, token_uri } => exec_set_token_uri(deps, info, token_id, token_uri),
        ExecuteMsg::SetRoyalty { receiver, bips } => exec_set_royalty(deps, info, receiver, bips),
    }
}

/// 仅 minter：以指定 id 铸造；达到总量上限后拒绝，铸造后检查是否锁定揭示区块
fn exec_mint(deps: DepsMut, env: Env, info: MessageInfo, token_id: u64, owner: String) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Minter, &info.sender)?;
    let owner = deps.api.addr_validate(&owner)?;
    let cfg = CONFIG.load(deps.storage)?;

    let minted = ledger::num_tokens(deps.storage)?;
    if minted >= cfg.max_supply {
        return Err(ContractError::MaxSupplyReached { max_supply: cfg.max_supply });
    }
    ledger::mint_with_id(deps.storage, &owner, token_id)?;
    let committed = reveal_index::maybe_commit(deps.storage, &env, minted + 1, cfg.max_supply)?;

    let mut res = Response::new().add_attributes(vec![
        attr("action", "mint"),
        attr("minter", info.sender),
        attr("owner", owner),
        attr("token_id", token_id.to_string()),
    ]);
    if committed {
        res = res.add_attribute("starting_index_block", env.block.height.to_string());
    }
    Ok(res)
}

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

fn exec_approve(deps: DepsMut, info: MessageInfo, spender: String, token_id: u64) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    ledger::set_approval(deps.storage, &info.sender, Some(&spender), token_id)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "approve"),
        attr("token_id", token_id.to_string()),
        attr("spender", spender),
    ]))
}

fn exec_revoke(deps: DepsMut, info: MessageInfo, spender: String, token_id: u64) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    ledger::revoke(deps.storage, &info.sender, &spender, token_id)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "revoke"),
        attr("token_id", token_id.to_string()),
        attr("spender", spender),
    ]))
}

fn exec_set_operator(deps: DepsMut, info: MessageInfo, operator: String, approved: bool) -> Result<Response, ContractError> {
    let operator = deps.api.addr_validate(&operator)?;
    ledger::set_operator(deps.storage, &info.sender, &operator, approved)?;
    let action = if approved { "approve_all" } else { "revoke_all" };
    Ok(Response::new().add_attributes(vec![attr("action", action), attr("owner", info.sender), attr("operator", operator)]))
}

/// 仅 admin：授予或撤销角色
fn exec_set_role(deps: DepsMut, info: MessageInfo, role: Role, account: String, grant: bool) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Admin, &info.sender)?;
    let account = deps.api.addr_validate(&account)?;
    if grant {
        roles::grant_role(deps.storage, role, &account)?;
    } else {
        roles::revoke_role(deps.storage, role, &account);
    }
    let action = if grant { "grant_role" } else { "revoke_role" };
    Ok(Response::new().add_attributes(vec![attr("action", action), attr("role", role.as_str()), attr("account", account)]))
}

fn exec_set_provenance_hash(deps: DepsMut, info: MessageInfo, provenance_hash: String) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Reveal, &info.sender)?;
    let state = reveal_index::update_unlocked(deps.storage, |s| s.provenance_hash = provenance_hash)?;
    Ok(Response::new().add_attributes(vec![attr("action", "set_provenance_hash"), attr("provenance_hash", state.provenance_hash)]))
}

fn exec_set_reveal_timestamp(deps: DepsMut, info: MessageInfo, reveal_timestamp: u64) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Reveal, &info.sender)?;
    reveal_index::update_unlocked(deps.storage, |s| s.reveal_timestamp = reveal_timestamp)?;
    Ok(Response::new().add_attributes(vec![attr("action", "set_reveal_timestamp"), attr("reveal_timestamp", reveal_timestamp.to_string())]))
}

fn exec_emergency_commit(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Reveal, &info.sender)?;
    let height = reveal_index::emergency_commit(deps.storage, &env)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "emergency_set_starting_index_block"),
        attr("starting_index_block", height.to_string()),
    ]))
}

/// 任何人可调用：根据锁定区块计算起始序号
fn exec_set_starting_index(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let cfg = CONFIG.load(deps.storage)?;
    let (starting_index, hash) = reveal_index::finalize(deps.storage, cfg.max_supply)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "set_starting_index"),
        attr("caller", info.sender),
        attr("block_hash", hex::encode(hash)),
        attr("starting_index", starting_index.to_string()),
    ]))
}

fn exec_set_base_uri(deps: DepsMut, info: MessageInfo, base_uri: Option<String>) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Reveal, &info.sender)?;
    let mut cfg = CONFIG.load(deps.storage)?;
    cfg.base_uri = base_uri;
    CONFIG.save(deps.storage, &cfg)?;
    Ok(Response::new().add_attribute("action", "set_base_uri"))
}

/// 仅 reveal 角色：token 必须已铸造
fn exec_set_token_uri(deps: DepsMut, info: MessageInfo, token_id: u64, token_uri: String) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Reveal, &info.sender)?;
    ledger::load(deps.storage, token_id)?;
    TOKEN_URIS.save(deps.storage, token_id, &token_uri)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "set_token_uri"),
        attr("token_id", token_id.to_string()),
        attr("token_uri", token_uri),
    ]))
}

fn exec_set_royalty(deps: DepsMut, info: MessageInfo, receiver: String, bips: u64) -> Result<Response, ContractError> {
    roles::ensure_role(deps.storage, Role::Royalty, &info.sender)?;
    let royalty = royalty::set_royalty(deps.storage, deps.api, &receiver, bips)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "set_royalty"),
        attr("receiver", royalty.receiver),
        attr("bips", royalty.bips.to_string()),
    ]))
}

/// 查询入口：根据查询消息返回对应的序列化结果
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ContractInfo {} => {
            let cfg = CONFIG.load(deps.storage)?;
            to_json_binary(&ContractInfoResponse { name: cfg.name, symbol: cfg.symbol, max_supply: cfg.max_supply, base_uri: cfg.base_uri })
        }
        QueryMsg::RevealState {} => to_json_binary(&query_reveal_state(deps)?),
        QueryMsg::RevealStartingIndexBlock {} => to_json_binary(&StartingIndexBlockResponse {
            height: query_reveal_state(deps)?.starting_index_block,
        }),
        QueryMsg::RevealStartingIndex {} => to_json_binary(&StartingIndexResponse { starting_index: REVEAL.load(deps.storage)?.starting_index }),
        QueryMsg::HasRole { role, account } => {
            let account = deps.api.addr_validate(&account)?;
            to_json_binary(&HasRoleResponse { has_role: roles::has_role(deps.storage, role, &account) })
        }
        QueryMsg::Royalty {} => {
            let royalty = royalty::load(deps.storage)?;
            to_json_binary(&RoyaltyResponse { receiver: royalty.receiver.to_string(), bips: royalty.bips })
        }
        QueryMsg::RoyaltyInfo { token_id: _, sale_price } => to_json_binary(&query_royalty_info(deps, sale_price)?),
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

fn query_reveal_state(deps: Deps) -> StdResult<RevealStateResponse> {
    let state = REVEAL.load(deps.storage)?;
    Ok(RevealStateResponse {
        phase: reveal_index::phase(&state),
        reveal_timestamp: state.reveal_timestamp,
        provenance_hash: state.provenance_hash.clone(),
        starting_index_block: state.committed.as_ref().map(|b| b.height).unwrap_or(0),
        starting_index: state.starting_index,
    })
}

/// 版税与 token 是否存在无关
fn query_royalty_info(deps: Deps, sale_price: Uint128) -> StdResult<RoyaltyInfoResponse> {
    let royalty = royalty::load(deps.storage)?;
    Ok(RoyaltyInfoResponse { receiver: royalty.receiver.to_string(), royalty_amount: royalty::royalty_amount(&royalty, sale_price) })
}

fn owner_of(deps: Deps, token_id: u64) -> StdResult<Addr> {
    ledger::owner_of(deps.storage, token_id).map_err(|e| StdError::generic_err(e.to_string()))
}

fn query_nft_info(deps: Deps, token_id: u64) -> StdResult<NftInfoResponse> {
    let info = ledger::load(deps.storage, token_id).map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(NftInfoResponse { owner: info.owner.to_string(), approved: info.approved.map(|a| a.to_string()) })
}

/// 元数据地址：优先使用单独设置的地址，否则为 base_uri + token_id；都未设置时为空字符串
fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<TokenUriResponse> {
    owner_of(deps, token_id)?;
    if let Some(token_uri) = TOKEN_URIS.may_load(deps.storage, token_id)? {
        return Ok(TokenUriResponse { token_uri });
    }
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

#![allow(dead_code)]

use cosmwasm_std::{
    from_json, testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier}, Addr, Env, MemoryStorage, OwnedDeps, Response,
};
use mission_token::{
    contract::{execute, instantiate, query},
    error::ContractError,
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg, RevealStateResponse},
};
use nft_ledger::Role;
use serde::de::DeserializeOwned;

pub type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

/// 测试常量
pub const DEPLOYER: &str = "deployer";
pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const CAROL: &str = "carol";
pub const DAVE: &str = "dave";
pub const MINTER: &str = "minter";
pub const REVEALER: &str = "revealer";
pub const ROYALTY: &str = "royalty";
pub const NAME: &str = "MockMissionToken";
pub const SYMBOL: &str = "MP";

/// 测试地址（合法 bech32）
pub fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

/// 创建测试环境
pub fn setup_test_env() -> (MockDeps, Env) {
    (mock_dependencies(), mock_env())
}

/// 初始化合约并为 minter / revealer / royalty 授予各自角色
pub fn instantiate_contract(deps: &mut MockDeps, env: &Env, max_supply: u64, reveal_timestamp: u64) -> Result<Response, ContractError> {
    let msg = InstantiateMsg {
        name: NAME.to_string(),
        symbol: SYMBOL.to_string(),
        max_supply,
        reveal_timestamp,
        base_uri: None,
    };
    let res = instantiate(deps.as_mut(), env.clone(), message_info(&addr(DEPLOYER), &[]), msg)?;
    for (role, account) in [(Role::Minter, MINTER), (Role::Reveal, REVEALER), (Role::Royalty, ROYALTY)] {
        exec_as(deps, env, DEPLOYER, ExecuteMsg::GrantRole { role, account: addr(account).to_string() })?;
    }
    Ok(res)
}

/// 揭示时间在当前区块 30 秒之后
pub fn reveal_time(env: &Env) -> u64 {
    env.block.time.seconds() + 30
}

/// 以 sender 身份执行消息
pub fn exec_as(deps: &mut MockDeps, env: &Env, sender: &str, msg: ExecuteMsg) -> Result<Response, ContractError> {
    execute(deps.as_mut(), env.clone(), message_info(&addr(sender), &[]), msg)
}

pub fn mint(deps: &mut MockDeps, env: &Env, token_id: u64, owner: &str) -> Result<Response, ContractError> {
    exec_as(deps, env, MINTER, ExecuteMsg::Mint { token_id, owner: addr(owner).to_string() })
}

/// 连续铸造 [first, first + count)
pub fn mint_range(deps: &mut MockDeps, env: &Env, first: u64, count: u64, owner: &str) {
    for token_id in first..first + count {
        mint(deps, env, token_id, owner).unwrap();
    }
}

pub fn query_as<T: DeserializeOwned>(deps: &MockDeps, msg: QueryMsg) -> T {
    from_json(query(deps.as_ref(), mock_env(), msg).unwrap()).unwrap()
}

pub fn reveal_state(deps: &MockDeps) -> RevealStateResponse {
    query_as(deps, QueryMsg::RevealState {})
}

pub fn attribute(res: &Response, key: &str) -> String {
    res.attributes.iter().find(|a| a.key == key).map(|a| a.value.clone()).unwrap_or_default()
}

#![allow(dead_code)]

use cosmwasm_std::{
    from_json, testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier}, Addr, CosmosMsg, Env, MemoryStorage, OwnedDeps,
    Response, StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use loot_crate::{
    contract::{execute, instantiate, query},
    error::ContractError,
    msg::{
        ConfigResponse, CrateContentResponse, EscrowBalanceResponse, ExecuteMsg, InstantiateMsg, LengthResponse, OwnerOfResponse,
        PrizeExecuteMsg, PrizeSpecMsg, QueryMsg,
    },
};

pub type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

/// 测试常量
pub const OWNER: &str = "owner";
pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const CAROL: &str = "carol";
pub const DAVE: &str = "dave";
pub const MINTER: &str = "minter";
pub const PAYMENT: &str = "payment";
pub const MAX_SALES: u64 = 100;
pub const PURCHASE_LIMIT: u64 = 10;
pub const PRICE: u128 = 25;

/// 测试地址（合法 bech32）
pub fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

pub fn prize(index: usize) -> Addr {
    addr(&format!("prize{index}"))
}

/// 创建测试环境
pub fn setup_test_env() -> (MockDeps, Env) {
    (mock_dependencies(), mock_env())
}

/// 初始化合约：上限 100、单次 10、单价 25、无收款地址，奖品组成为 amounts
pub fn instantiate_contract(deps: &mut MockDeps, env: &Env, amounts: &[u64]) -> Result<Response, ContractError> {
    let msg = InstantiateMsg {
        max_sales: MAX_SALES,
        purchase_limit: PURCHASE_LIMIT,
        payment_token: addr(PAYMENT).to_string(),
        price: Uint128::new(PRICE),
        recipient: None,
        contents: amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| PrizeSpecMsg { token: prize(i).to_string(), amount: *amount })
            .collect(),
        base_uri: None,
    };
    instantiate(deps.as_mut(), env.clone(), message_info(&addr(OWNER), &[]), msg)
}

/// 以 sender 身份执行消息
pub fn exec_as(deps: &mut MockDeps, env: &Env, sender: &str, msg: ExecuteMsg) -> Result<Response, ContractError> {
    execute(deps.as_mut(), env.clone(), message_info(&addr(sender), &[]), msg)
}

pub fn reserve(deps: &mut MockDeps, env: &Env, to: &str, count: u64) -> Response {
    exec_as(deps, env, OWNER, ExecuteMsg::Reserve { to: addr(to).to_string(), count }).unwrap()
}

pub fn purchase_msg(to: &str, count: u64, max_cost: u128) -> ExecuteMsg {
    ExecuteMsg::Purchase { to: addr(to).to_string(), count, max_cost: Uint128::new(max_cost) }
}

pub fn reveal_msg(from: &str, to: &str, token_id: u64) -> ExecuteMsg {
    ExecuteMsg::RevealFrom { from: addr(from).to_string(), to: addr(to).to_string(), token_id }
}

/// 响应中发往奖品合约的消息（合约地址, 消息）
pub fn prize_messages(res: &Response) -> Vec<(Addr, PrizeExecuteMsg)> {
    wasm_executes(res)
        .into_iter()
        .filter(|(contract, _)| *contract != addr(PAYMENT))
        .map(|(contract, msg)| (contract, from_json(msg).unwrap()))
        .collect()
}

/// 响应中发往支付代币的消息
pub fn payment_messages(res: &Response) -> Vec<Cw20ExecuteMsg> {
    wasm_executes(res)
        .into_iter()
        .filter(|(contract, _)| *contract == addr(PAYMENT))
        .map(|(_, msg)| from_json(msg).unwrap())
        .collect()
}

fn wasm_executes(res: &Response) -> Vec<(Addr, cosmwasm_std::Binary)> {
    res.messages
        .iter()
        .filter_map(|sub| match &sub.msg {
            CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, msg, .. }) => Some((Addr::unchecked(contract_addr), msg.clone())),
            _ => None,
        })
        .collect()
}

pub fn attribute(res: &Response, key: &str) -> String {
    res.attributes.iter().find(|a| a.key == key).map(|a| a.value.clone()).unwrap_or_default()
}

/// 查询配置
pub fn query_config(deps: &MockDeps) -> ConfigResponse {
    from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap()
}

/// 查询盲盒所有者（不存在时返回错误）
pub fn query_owner_of(deps: &MockDeps, token_id: u64) -> StdResult<OwnerOfResponse> {
    query(deps.as_ref(), mock_env(), QueryMsg::OwnerOf { token_id }).and_then(|bin| from_json(bin))
}

pub fn crate_contents_length(deps: &MockDeps, token_id: u64) -> u64 {
    let res: LengthResponse = from_json(query(deps.as_ref(), mock_env(), QueryMsg::CrateContentsLength { token_id }).unwrap()).unwrap();
    res.length
}

pub fn crate_contents(deps: &MockDeps, token_id: u64, index: u64) -> CrateContentResponse {
    from_json(query(deps.as_ref(), mock_env(), QueryMsg::CrateContents { token_id, index }).unwrap()).unwrap()
}

pub fn escrow_balance(deps: &MockDeps, token: &Addr) -> u64 {
    let res: EscrowBalanceResponse =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::EscrowBalance { token: token.to_string() }).unwrap()).unwrap();
    res.balance
}

/// 期望的内容条目：组成 [3,2,1] 下第 index 个内容
pub fn expected_content(token_id: u64, index: u64) -> (Addr, u64) {
    if index <= 2 {
        (prize(0), token_id * 3 + index)
    } else if index <= 4 {
        (prize(1), token_id * 2 + index - 3)
    } else {
        (prize(2), token_id)
    }
}

/// 组成 [3,2,1] 下某个盲盒揭示时应发出的转移消息
pub fn expected_release(token_id: u64, recipient: &str) -> Vec<(Addr, PrizeExecuteMsg)> {
    (0..6)
        .map(|index| {
            let (token, prize_id) = expected_content(token_id, index);
            (token, PrizeExecuteMsg::TransferNft { recipient: addr(recipient).to_string(), token_id: prize_id })
        })
        .collect()
}

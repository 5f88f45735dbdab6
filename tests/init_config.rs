mod common;

use cosmwasm_std::{from_json, testing::mock_env, Uint128};
use loot_crate::{
    contract::query,
    error::ContractError,
    msg::{ExecuteMsg, LengthResponse, QueryMsg, SaleContentResponse},
};
use common::*;

#[test]
fn test_instantiate_starting_values() {
    let (mut deps, env) = setup_test_env();
    let res = instantiate_contract(&mut deps, &env, &[2, 1, 1]).unwrap();
    assert_eq!(attribute(&res, "action"), "instantiate");
    assert_eq!(attribute(&res, "prize_types"), "3");

    let cfg = query_config(&deps);
    assert_eq!(cfg.owner, addr(OWNER).to_string());
    assert_eq!(cfg.max_sales, 100);
    assert_eq!(cfg.sales, 0);
    assert_eq!(cfg.purchase_limit, 10);
    assert_eq!(cfg.price, Uint128::new(25));
    assert_eq!(cfg.payment_token, addr(PAYMENT).to_string());
    assert_eq!(cfg.recipient, None);

    let len: LengthResponse = from_json(query(deps.as_ref(), mock_env(), QueryMsg::SaleContentsLength {}).unwrap()).unwrap();
    assert_eq!(len.length, 3);

    for (index, amount) in [2u64, 1, 1].iter().enumerate() {
        let content: SaleContentResponse =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::SaleContents { index: index as u64 }).unwrap()).unwrap();
        assert_eq!(content.token, prize(index).to_string());
        assert_eq!(content.amount, *amount);
    }
    assert!(query(deps.as_ref(), mock_env(), QueryMsg::SaleContents { index: 3 }).is_err());
}

#[test]
fn test_instantiate_rejects_invalid_contents() {
    let (mut deps, env) = setup_test_env();
    let err = instantiate_contract(&mut deps, &env, &[]).unwrap_err();
    assert!(matches!(err, ContractError::InvalidContents { .. }));

    let (mut deps, env) = setup_test_env();
    let err = instantiate_contract(&mut deps, &env, &[2, 0, 1]).unwrap_err();
    assert!(matches!(err, ContractError::InvalidContents { .. }));
}

#[test]
fn test_owner_setters() {
    let (mut deps, env) = setup_test_env();
    instantiate_contract(&mut deps, &env, &[1]).unwrap();

    exec_as(&mut deps, &env, OWNER, ExecuteMsg::SetMaxSales { max_sales: 7 }).unwrap();
    exec_as(&mut deps, &env, OWNER, ExecuteMsg::SetPurchaseLimit { purchase_limit: 3 }).unwrap();
    exec_as(&mut deps, &env, OWNER, ExecuteMsg::SetPrice { price: Uint128::new(40) }).unwrap();
    exec_as(&mut deps, &env, OWNER, ExecuteMsg::SetRecipient { recipient: Some(addr(CAROL).to_string()) }).unwrap();

    let cfg = query_config(&deps);
    assert_eq!(cfg.max_sales, 7);
    assert_eq!(cfg.purchase_limit, 3);
    assert_eq!(cfg.price, Uint128::new(40));
    assert_eq!(cfg.recipient, Some(addr(CAROL).to_string()));

    // 清空收款地址：收入回到合约自身
    exec_as(&mut deps, &env, OWNER, ExecuteMsg::SetRecipient { recipient: None }).unwrap();
    assert_eq!(query_config(&deps).recipient, None);
}

#[test]
fn test_transfer_ownership_moves_privileges() {
    let (mut deps, env) = setup_test_env();
    instantiate_contract(&mut deps, &env, &[1]).unwrap();

    exec_as(&mut deps, &env, OWNER, ExecuteMsg::TransferOwnership { new_owner: addr(MINTER).to_string() }).unwrap();
    assert_eq!(query_config(&deps).owner, addr(MINTER).to_string());

    let err = exec_as(&mut deps, &env, OWNER, ExecuteMsg::SetMaxSales { max_sales: 1 }).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized);

    exec_as(&mut deps, &env, MINTER, ExecuteMsg::SetMaxSales { max_sales: 1 }).unwrap();
    assert_eq!(query_config(&deps).max_sales, 1);
}

#[test]
fn test_base_uri_applies_to_existing_tokens() {
    let (mut deps, env) = setup_test_env();
    instantiate_contract(&mut deps, &env, &[1]).unwrap();
    reserve(&mut deps, &env, ALICE, 4);

    let uri = |deps: &MockDeps, token_id: u64| -> Option<String> {
        query(deps.as_ref(), mock_env(), QueryMsg::TokenUri { token_id })
            .and_then(|bin| from_json::<loot_crate::msg::TokenUriResponse>(bin))
            .map(|r| r.token_uri)
            .ok()
    };

    assert_eq!(uri(&deps, 0), Some(String::new()));
    assert_eq!(uri(&deps, 4), None);

    exec_as(&mut deps, &env, OWNER, ExecuteMsg::SetBaseUri { base_uri: Some("http://my-site.com/base/".to_string()) }).unwrap();
    assert_eq!(uri(&deps, 0), Some("http://my-site.com/base/0".to_string()));
    assert_eq!(uri(&deps, 3), Some("http://my-site.com/base/3".to_string()));
    assert_eq!(uri(&deps, 8), None);
}

//! 销售引擎：付费购买与拥有者预留共用同一套供应量校验与内容分配，
//! 购买时通过 CW20 TransferFrom 收取 price × count 的款项。

use cosmwasm_std::{attr, to_json_binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::allocation::{allocate, Allocation};
use crate::contract::must_owner;
use crate::error::ContractError;
use crate::state::{Config, CONFIG};

/// 校验数量与剩余供应（购买与预留共用同一个 sales/max_sales 额度）
fn check_supply(cfg: &Config, count: u64) -> Result<(), ContractError> {
    let remaining = cfg.max_sales.saturating_sub(cfg.sales);
    if count > remaining {
        return Err(ContractError::SupplyExhausted { requested: count, remaining });
    }
    Ok(())
}

/// 购买：依次校验数量 → 单次上限 → 剩余供应 → 价格滑点，然后收款并分配盲盒
pub fn exec_purchase(deps: DepsMut, env: Env, info: MessageInfo, to: String, count: u64, max_cost: Uint128) -> Result<Response, ContractError> {
    let mut cfg = CONFIG.load(deps.storage)?;
    let to = deps.api.addr_validate(&to)?;

    if count == 0 {
        return Err(ContractError::InvalidCount);
    }
    if count > cfg.purchase_limit {
        return Err(ContractError::LimitExceeded { count, limit: cfg.purchase_limit });
    }
    check_supply(&cfg, count)?;

    let cost = cfg.price.checked_mul(Uint128::from(count))?;
    if cost > max_cost {
        return Err(ContractError::PriceSlippage { cost: cost.to_string(), max_cost: max_cost.to_string() });
    }

    // 未设置收款地址时收入留在本合约
    let payee = cfg.recipient.clone().unwrap_or_else(|| env.contract.address.clone());
    let mut payment: Vec<CosmosMsg> = vec![];
    if !cost.is_zero() {
        payment.push(
            WasmMsg::Execute {
                contract_addr: cfg.payment_token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: info.sender.to_string(),
                    recipient: payee.to_string(),
                    amount: cost,
                })?,
                funds: vec![],
            }
            .into(),
        );
    }

    let Allocation { crate_ids, messages } = allocate(deps.storage, &env.contract.address, &to, count)?;
    cfg.sales += count;
    CONFIG.save(deps.storage, &cfg)?;

    Ok(Response::new()
        .add_messages(payment)
        .add_messages(messages)
        .add_attributes(vec![
            attr("action", "purchase"),
            attr("purchaser", info.sender),
            attr("to", to),
            attr("count", count.to_string()),
            attr("cost", cost),
            attr("payee", payee),
            attr("token_ids", join_ids(&crate_ids)),
        ]))
}

/// 仅拥有者：免费铸造盲盒，同样计入 sales 并受 max_sales 约束，不受单次购买上限约束
pub fn exec_reserve(deps: DepsMut, env: Env, info: MessageInfo, to: String, count: u64) -> Result<Response, ContractError> {
    let mut cfg = must_owner(&deps, &info.sender)?;
    let to = deps.api.addr_validate(&to)?;

    if count == 0 {
        return Err(ContractError::InvalidCount);
    }
    check_supply(&cfg, count)?;

    let Allocation { crate_ids, messages } = allocate(deps.storage, &env.contract.address, &to, count)?;
    cfg.sales += count;
    CONFIG.save(deps.storage, &cfg)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attributes(vec![
            attr("action", "reserve"),
            attr("to", to),
            attr("count", count.to_string()),
            attr("token_ids", join_ids(&crate_ids)),
        ]))
}

pub(crate) fn join_ids(ids: &[u64]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

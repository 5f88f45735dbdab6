//! 盲盒内容分配：每铸造一个盲盒，按奖品声明顺序为其铸造 amount 个奖品到托管，
//! 奖品 id 取自各自的分配计数器，保证跨调用、跨入口（购买/预留）的分配确定且互不重叠。

use cosmwasm_std::{Addr, CosmosMsg, Storage, Uint64};
use nft_ledger::ledger;

use crate::error::ContractError;
use crate::escrow::escrow_prize;
use crate::state::{ContentEntry, ALLOCATION_COUNTERS, CRATE_CONTENTS, SALE_CONTENTS};

/// 一次分配的结果：新盲盒 id 与需要发往奖品合约的铸造消息
pub struct Allocation {
    pub crate_ids: Vec<u64>,
    pub messages: Vec<CosmosMsg>,
}

/// 为 to 创建 count 个盲盒；奖品铸造给 custodian（本合约）。
/// 计数器溢出时返回 Overflow 错误。
pub fn allocate(storage: &mut dyn Storage, custodian: &Addr, to: &Addr, count: u64) -> Result<Allocation, ContractError> {
    let specs = SALE_CONTENTS.load(storage)?;
    let mut counters = ALLOCATION_COUNTERS.load(storage)?;

    let mut crate_ids = vec![];
    let mut messages = vec![];

    for _ in 0..count {
        let mut contents = vec![];
        for (spec, counter) in specs.iter().zip(counters.iter_mut()) {
            let first = *counter;
            let next = Uint64::new(first).checked_add(Uint64::new(spec.amount))?.u64();
            for token_id in first..next {
                messages.push(escrow_prize(storage, &spec.token, token_id, custodian)?);
                contents.push(ContentEntry { token: spec.token.clone(), token_id });
            }
            *counter = next;
        }

        let crate_id = ledger::mint_next(storage, to)?;
        CRATE_CONTENTS.save(storage, crate_id, &contents)?;
        crate_ids.push(crate_id);
    }

    ALLOCATION_COUNTERS.save(storage, &counters)?;
    Ok(Allocation { crate_ids, messages })
}

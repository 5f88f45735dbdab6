use cosmwasm_std::{Env, StdResult, Storage, Timestamp};
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::msg::RevealPhase;
use crate::state::{CommittedBlock, RevealState, REVEAL};

pub fn phase(state: &RevealState) -> RevealPhase {
    match (&state.committed, state.starting_index) {
        (None, _) => RevealPhase::Unset,
        (Some(_), 0) => RevealPhase::BlockCommitted,
        (Some(_), _) => RevealPhase::IndexFinal,
    }
}

/// 区块标识：sha256(chain_id ‖ height 大端 ‖ time 纳秒大端)
pub fn block_hash(chain_id: &str, height: u64, time: Timestamp) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(chain_id.as_bytes());
    hasher.update(height.to_be_bytes());
    hasher.update(time.nanos().to_be_bytes());
    hasher.finalize().into()
}

/// 将哈希视为 256 位大端整数对 max_supply 取模；结果 0 替换为 1
pub fn starting_index_from_hash(hash: &[u8; 32], max_supply: u64) -> u64 {
    let modulus = u128::from(max_supply.max(1));
    let index = hash.iter().fold(0u128, |acc, byte| (acc * 256 + u128::from(*byte)) % modulus) as u64;
    if index == 0 {
        1
    } else {
        index
    }
}

fn commit(state: &mut RevealState, env: &Env) {
    state.committed = Some(CommittedBlock {
        chain_id: env.block.chain_id.clone(),
        height: env.block.height,
        time: env.block.time,
    });
}

/// 每次铸造后调用：已铸造数量达到上限，或区块时间不早于揭示时间时锁定当前区块。
/// 已锁定时不做任何修改，返回是否在本次锁定。
pub fn maybe_commit(storage: &mut dyn Storage, env: &Env, minted: u64, max_supply: u64) -> StdResult<bool> {
    let mut state = REVEAL.load(storage)?;
    if state.committed.is_some() {
        return Ok(false);
    }
    if minted < max_supply && env.block.time.seconds() < state.reveal_timestamp {
        return Ok(false);
    }
    commit(&mut state, env);
    REVEAL.save(storage, &state)?;
    Ok(true)
}

/// 紧急锁定当前区块，仅在 Unset 阶段有效
pub fn emergency_commit(storage: &mut dyn Storage, env: &Env) -> Result<u64, ContractError> {
    let mut state = REVEAL.load(storage)?;
    if state.committed.is_some() {
        return Err(ContractError::AlreadyCommitted);
    }
    commit(&mut state, env);
    REVEAL.save(storage, &state)?;
    Ok(env.block.height)
}

/// 根据锁定的区块计算起始序号，返回序号与所用哈希
pub fn finalize(storage: &mut dyn Storage, max_supply: u64) -> Result<(u64, [u8; 32]), ContractError> {
    let mut state = REVEAL.load(storage)?;
    let hash = match (phase(&state), &state.committed) {
        (RevealPhase::IndexFinal, _) => return Err(ContractError::AlreadyFinal),
        (_, None) => return Err(ContractError::BlockNotCommitted),
        (_, Some(block)) => block_hash(&block.chain_id, block.height, block.time),
    };
    state.starting_index = starting_index_from_hash(&hash, max_supply);
    REVEAL.save(storage, &state)?;
    Ok((state.starting_index, hash))
}

/// 锁定区块之前才能修改的揭示参数
pub fn update_unlocked(storage: &mut dyn Storage, f: impl FnOnce(&mut RevealState)) -> Result<RevealState, ContractError> {
    let mut state = REVEAL.load(storage)?;
    if state.committed.is_some() {
        return Err(ContractError::RevealLocked);
    }
    f(&mut state);
    REVEAL.save(storage, &state)?;
    Ok(state)
}

//! Lazy reward accrual engine.
//!
//! The pool keeps one global accumulator, `acc_reward_per_share`, which is
//! the reward earned per staked unit since instantiation, scaled by
//! `REWARD_SCALE`. On every staking-affecting call the accumulator is
//! advanced for the elapsed time, then the acting depositor's position is
//! settled against it. No per-second bookkeeping exists anywhere.
//!
//! Integer division truncates toward zero; the rounding loss per
//! settlement is below one scaled unit and is accepted.

use cosmwasm_std::{Uint128, Uint256};

use crate::error::ContractError;
use crate::state::{Position, RewardState, REWARD_SCALE};

fn overflow(context: &str) -> ContractError {
    ContractError::Overflow {
        context: context.to_string(),
    }
}

/// Advance the global accumulator to `now`.
///
/// `last_update` moves forward unconditionally, even when nothing is
/// staked, so a dormant period never accrues retroactively once staking
/// resumes.
pub fn accrue(state: &mut RewardState, now: u64) -> Result<(), ContractError> {
    if now > state.last_update && !state.total_staked.is_zero() {
        let elapsed = now - state.last_update;
        let earned = Uint256::from(elapsed)
            .checked_mul(Uint256::from(state.reward_rate))
            .map_err(|_| overflow("reward accrual"))?
            .checked_mul(Uint256::from(REWARD_SCALE))
            .map_err(|_| overflow("reward accrual"))?
            .checked_div(Uint256::from(state.total_staked))
            .map_err(|_| overflow("reward accrual"))?;
        state.acc_reward_per_share = state
            .acc_reward_per_share
            .checked_add(earned)
            .map_err(|_| overflow("reward accumulator"))?;
    }
    state.last_update = now;
    Ok(())
}

/// Reward earned by a position since its last settlement, against the
/// given accumulator value.
pub fn pending_for(acc: Uint256, position: &Position) -> Result<Uint128, ContractError> {
    let delta = acc
        .checked_sub(position.reward_snapshot)
        .map_err(|_| overflow("reward snapshot"))?;
    let pending = Uint256::from(position.amount)
        .checked_mul(delta)
        .map_err(|_| overflow("pending reward"))?
        .checked_div(Uint256::from(REWARD_SCALE))
        .map_err(|_| overflow("pending reward"))?;
    Uint128::try_from(pending).map_err(|_| overflow("pending reward"))
}

/// Settle a position against the current accumulator: move the unsettled
/// reward into `accrued` and refresh the snapshot.
pub fn settle_position(
    state: &RewardState,
    position: &mut Position,
) -> Result<Uint128, ContractError> {
    let pending = pending_for(state.acc_reward_per_share, position)?;
    position.accrued = position
        .accrued
        .checked_add(pending)
        .map_err(|_| overflow("accrued reward"))?;
    position.reward_snapshot = state.acc_reward_per_share;
    Ok(pending)
}

/// Recompute the accumulator as of `now` without mutating state, for the
/// `PendingReward` query.
pub fn projected_acc(state: &RewardState, now: u64) -> Result<Uint256, ContractError> {
    let mut projected = state.clone();
    accrue(&mut projected, now)?;
    Ok(projected.acc_reward_per_share)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(total: u128, rate: u128, last_update: u64) -> RewardState {
        RewardState {
            total_staked: Uint128::new(total),
            reward_rate: Uint128::new(rate),
            last_update,
            acc_reward_per_share: Uint256::zero(),
        }
    }

    fn position(amount: u128) -> Position {
        Position {
            amount: Uint128::new(amount),
            staked_at: 0,
            reward_snapshot: Uint256::zero(),
            accrued: Uint128::zero(),
        }
    }

    #[test]
    fn single_staker_earns_elapsed_times_rate() {
        // rate = 1 unit/second, 1000 staked, 100 seconds.
        let mut state = state(1_000, 1, 0);
        accrue(&mut state, 100).unwrap();

        let mut pos = position(1_000);
        let pending = settle_position(&state, &mut pos).unwrap();
        assert_eq!(pending, Uint128::new(100));
        assert_eq!(pos.accrued, Uint128::new(100));
        assert_eq!(pos.reward_snapshot, state.acc_reward_per_share);
    }

    #[test]
    fn settlement_is_not_double_counted() {
        let mut state = state(1_000, 1, 0);
        accrue(&mut state, 100).unwrap();

        let mut pos = position(1_000);
        settle_position(&state, &mut pos).unwrap();
        // A second settlement at the same accumulator adds nothing.
        let pending = settle_position(&state, &mut pos).unwrap();
        assert_eq!(pending, Uint128::zero());
        assert_eq!(pos.accrued, Uint128::new(100));
    }

    #[test]
    fn reward_splits_proportionally_to_stake() {
        let mut state = state(4_000, 8, 0);
        accrue(&mut state, 50).unwrap();

        // 1/4 and 3/4 of the pool over 50 seconds at 8/second.
        let mut small = position(1_000);
        let mut large = position(3_000);
        assert_eq!(
            settle_position(&state, &mut small).unwrap(),
            Uint128::new(100)
        );
        assert_eq!(
            settle_position(&state, &mut large).unwrap(),
            Uint128::new(300)
        );
    }

    #[test]
    fn dormant_period_accrues_nothing() {
        let mut state = state(0, 1, 0);
        accrue(&mut state, 1_000).unwrap();
        assert_eq!(state.acc_reward_per_share, Uint256::zero());
        // last_update still advanced, so the dormant time is never
        // credited once staking resumes.
        assert_eq!(state.last_update, 1_000);

        state.total_staked = Uint128::new(500);
        accrue(&mut state, 1_010).unwrap();
        let mut pos = position(500);
        assert_eq!(settle_position(&state, &mut pos).unwrap(), Uint128::new(10));
    }

    #[test]
    fn accumulator_and_last_update_are_monotonic() {
        let mut state = state(1_000, 3, 0);
        let mut prev_acc = state.acc_reward_per_share;
        let mut prev_update = state.last_update;
        for now in [10u64, 10, 25, 25, 400] {
            accrue(&mut state, now).unwrap();
            assert!(state.acc_reward_per_share >= prev_acc);
            assert!(state.last_update >= prev_update);
            prev_acc = state.acc_reward_per_share;
            prev_update = state.last_update;
        }
    }

    #[test]
    fn truncation_loss_is_bounded() {
        // 3 staked at rate 1 for 1 second: acc = 1e18 / 3, truncated.
        let mut state = state(3, 1, 0);
        accrue(&mut state, 1).unwrap();

        let mut pos = position(3);
        let pending = settle_position(&state, &mut pos).unwrap();
        // 3 * (1e18 / 3) / 1e18 = 0 with truncation; loss stays below one
        // whole reward unit.
        assert!(pending <= Uint128::new(1));
    }
}

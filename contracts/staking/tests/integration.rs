//! Staking pool integration tests.
//!
//! Covers staking, timelocked and rate-limited withdrawals, continuous
//! reward accrual, emergency exit, and the cross-chain relay of a staked
//! position through a real bridge contract instance.

use cosmwasm_std::{
    to_json_binary, Addr, DepsMut, Env, MessageInfo, Response, Uint128, WasmMsg,
};
use cw_multi_test::{App, ContractWrapper, Executor};

use staking::msg::{
    ExecuteMsg, InstantiateMsg, PendingRewardResponse, QueryMsg, RateLimitUsageResponse,
    StakeInfoResponse, StatusResponse,
};

const MIN_STAKE_TIME: u64 = 3_600;
const DAY: u64 = 86_400;
const DAILY_LIMIT: u128 = 100_000;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_staking() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        staking::contract::execute,
        staking::contract::instantiate,
        staking::contract::query,
    )
    .with_reply(staking::contract::reply);
    Box::new(contract)
}

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    )
    .with_reply(bridge::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

/// cw20-base double that delivers one unit less than requested on every
/// `TransferFrom` while still reporting success.
fn contract_cw20_skimming_pull() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    fn execute(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: cw20_base::msg::ExecuteMsg,
    ) -> Result<Response, cw20_base::ContractError> {
        let msg = match msg {
            cw20_base::msg::ExecuteMsg::TransferFrom {
                owner,
                recipient,
                amount,
            } => cw20_base::msg::ExecuteMsg::TransferFrom {
                owner,
                recipient,
                amount: amount - Uint128::one(),
            },
            other => other,
        };
        cw20_base::contract::execute(deps, env, info, msg)
    }
    Box::new(ContractWrapper::new(
        execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

/// cw20-base double whose `TransferFrom` calls back into the recipient —
/// the pool pulling the stake — before the operation commits.
fn contract_cw20_reentrant() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    fn execute(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: cw20_base::msg::ExecuteMsg,
    ) -> Result<Response, cw20_base::ContractError> {
        match msg {
            cw20_base::msg::ExecuteMsg::TransferFrom {
                owner,
                recipient,
                amount,
            } => {
                let callback = WasmMsg::Execute {
                    contract_addr: recipient.clone(),
                    msg: to_json_binary(&staking::msg::ExecuteMsg::ClaimReward {})?,
                    funds: vec![],
                };
                let res = cw20_base::contract::execute(
                    deps,
                    env,
                    info,
                    cw20_base::msg::ExecuteMsg::TransferFrom {
                        owner,
                        recipient,
                        amount,
                    },
                )?;
                Ok(res.add_message(callback))
            }
            other => cw20_base::contract::execute(deps, env, info, other),
        }
    }
    Box::new(ContractWrapper::new(
        execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

struct TestEnv {
    app: App,
    pool: Addr,
    token: Addr,
    owner: Addr,
    user: Addr,
}

/// Pool with reward rate 1 unit/second and a funded reward reserve.
fn setup() -> TestEnv {
    setup_with_token(contract_cw20())
}

fn setup_with_token(token_code: Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>>) -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("owner");
    let user = Addr::unchecked("user");

    let cw20_code_id = app.store_code(token_code);
    let token = app
        .instantiate_contract(
            cw20_code_id,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Test Token".to_string(),
                symbol: "TST".to_string(),
                decimals: 6,
                initial_balances: vec![
                    cw20::Cw20Coin {
                        address: user.to_string(),
                        amount: Uint128::new(1_000_000),
                    },
                    cw20::Cw20Coin {
                        address: owner.to_string(),
                        amount: Uint128::new(1_000_000),
                    },
                ],
                mint: None,
                marketing: None,
            },
            &[],
            "test-token",
            None,
        )
        .unwrap();

    let staking_code_id = app.store_code(contract_staking());
    let pool = app
        .instantiate_contract(
            staking_code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                token: token.to_string(),
                reward_rate: Uint128::new(1),
                min_stake_time: MIN_STAKE_TIME,
                min_stake: Uint128::new(100),
                max_stake: Uint128::new(500_000),
                daily_withdraw_limit: Uint128::new(DAILY_LIMIT),
            },
            &[],
            "quorumgate-staking",
            Some(owner.to_string()),
        )
        .unwrap();

    // Reward reserve, funded out-of-band by the operator.
    app.execute_contract(
        owner.clone(),
        token.clone(),
        &cw20::Cw20ExecuteMsg::Transfer {
            recipient: pool.to_string(),
            amount: Uint128::new(500_000),
        },
        &[],
    )
    .unwrap();

    // Pool pulls stakes via allowance.
    app.execute_contract(
        user.clone(),
        token.clone(),
        &cw20::Cw20ExecuteMsg::IncreaseAllowance {
            spender: pool.to_string(),
            amount: Uint128::new(1_000_000),
            expires: None,
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        pool,
        token,
        owner,
        user,
    }
}

fn cw20_balance(app: &App, token: &Addr, account: &Addr) -> Uint128 {
    let resp: cw20::BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &cw20_base::msg::QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    resp.balance
}

fn stake(env: &mut TestEnv, amount: u128) {
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::Stake {
                amount: Uint128::new(amount),
            },
            &[],
        )
        .unwrap();
}

fn pending_reward(env: &TestEnv, address: &Addr) -> Uint128 {
    let resp: PendingRewardResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.pool,
            &QueryMsg::PendingReward {
                address: address.to_string(),
            },
        )
        .unwrap();
    resp.pending_reward
}

fn stake_info(env: &TestEnv, address: &Addr) -> StakeInfoResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.pool,
            &QueryMsg::StakeInfo {
                address: address.to_string(),
            },
        )
        .unwrap()
}

fn advance(env: &mut TestEnv, seconds: u64) {
    env.app
        .update_block(|b| b.time = b.time.plus_seconds(seconds));
}

// ============================================================================
// Staking & Withdrawal
// ============================================================================

#[test]
fn test_stake_pulls_funds_and_tracks_position() {
    let mut env = setup();
    let pool_before = cw20_balance(&env.app, &env.token, &env.pool);

    stake(&mut env, 10_000);

    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.user),
        Uint128::new(990_000)
    );
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.pool),
        pool_before + Uint128::new(10_000)
    );

    let info = stake_info(&env, &env.user);
    assert_eq!(info.amount, Uint128::new(10_000));
    assert_eq!(info.unlock_at, info.staked_at + MIN_STAKE_TIME);

    let status: StatusResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.pool, &QueryMsg::Status {})
        .unwrap();
    assert_eq!(status.total_staked, Uint128::new(10_000));
}

#[test]
fn test_stake_bounds_enforced() {
    let mut env = setup();

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Stake {
            amount: Uint128::new(99),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Minimum stake"));

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Stake {
            amount: Uint128::new(500_001),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Maximum stake"));
}

#[test]
fn test_withdraw_respects_timelock() {
    let mut env = setup();
    stake(&mut env, 10_000);

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Withdraw {
            amount: Uint128::new(10_000),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("timelock active"));

    advance(&mut env, MIN_STAKE_TIME);
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::Withdraw {
                amount: Uint128::new(10_000),
            },
            &[],
        )
        .unwrap();

    // Stake X then withdraw X returns the depositor to the pre-stake
    // token balance (rewards not claimed yet).
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.user),
        Uint128::new(1_000_000)
    );
    let status: StatusResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.pool, &QueryMsg::Status {})
        .unwrap();
    assert_eq!(status.total_staked, Uint128::zero());
}

#[test]
fn test_additional_stake_rearms_timelock_for_whole_balance() {
    let mut env = setup();
    stake(&mut env, 10_000);
    advance(&mut env, MIN_STAKE_TIME);

    // A second deposit refreshes staked_at, locking the full 20_000.
    stake(&mut env, 10_000);
    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Withdraw {
            amount: Uint128::new(1_000),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("timelock active"));
}

#[test]
fn test_withdraw_more_than_staked_rejected() {
    let mut env = setup();
    stake(&mut env, 10_000);
    advance(&mut env, MIN_STAKE_TIME);

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Withdraw {
            amount: Uint128::new(10_001),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Insufficient stake"));
}

// ============================================================================
// Rate Limiting
// ============================================================================

#[test]
fn test_daily_withdrawal_limit_with_cliff_reset() {
    let mut env = setup();
    stake(&mut env, 200_000);
    advance(&mut env, MIN_STAKE_TIME);

    // 60,000 fits under the 100,000 cap.
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::Withdraw {
                amount: Uint128::new(60_000),
            },
            &[],
        )
        .unwrap();

    // 50,000 more inside the same window does not.
    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Withdraw {
            amount: Uint128::new(50_000),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("limit exceeded"));

    let usage: RateLimitUsageResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.pool,
            &QueryMsg::RateLimitUsage {
                address: env.user.to_string(),
            },
        )
        .unwrap();
    assert_eq!(usage.used, Uint128::new(60_000));
    assert_eq!(usage.remaining, Uint128::new(40_000));

    // After the window expires the same 50,000 succeeds, and the
    // cumulative restarts from it alone.
    advance(&mut env, DAY);
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::Withdraw {
                amount: Uint128::new(50_000),
            },
            &[],
        )
        .unwrap();

    let usage: RateLimitUsageResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.pool,
            &QueryMsg::RateLimitUsage {
                address: env.user.to_string(),
            },
        )
        .unwrap();
    assert_eq!(usage.used, Uint128::new(50_000));
}

// ============================================================================
// Reward Accrual
// ============================================================================

#[test]
fn test_single_staker_reward_after_100_seconds() {
    let mut env = setup();
    stake(&mut env, 1_000);

    advance(&mut env, 100);
    // rate = 1 unit/second, sole staker: the whole emission is theirs.
    assert_eq!(pending_reward(&env, &env.user), Uint128::new(100));
}

#[test]
fn test_settlement_trigger_does_not_change_reward() {
    // The same 100 seconds is worth the same 100 units whether a claim or
    // a second stake performs the settlement.
    let mut env = setup();
    stake(&mut env, 1_000);
    advance(&mut env, 100);

    stake(&mut env, 1_000);
    let info = stake_info(&env, &env.user);
    assert_eq!(info.accrued, Uint128::new(100));
    assert_eq!(pending_reward(&env, &env.user), Uint128::new(100));
}

#[test]
fn test_claim_reward_pays_and_resets() {
    let mut env = setup();
    stake(&mut env, 1_000);
    advance(&mut env, 100);

    let before = cw20_balance(&env.app, &env.token, &env.user);
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::ClaimReward {},
            &[],
        )
        .unwrap();
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.user),
        before + Uint128::new(100)
    );
    assert_eq!(pending_reward(&env, &env.user), Uint128::zero());

    // Nothing further accrued in the same block.
    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::ClaimReward {},
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("No reward"));
}

#[test]
fn test_reward_rate_update_settles_at_old_rate() {
    let mut env = setup();
    stake(&mut env, 1_000);
    advance(&mut env, 100);

    // 100 s at rate 1, then 100 s at rate 5.
    env.app
        .execute_contract(
            env.owner.clone(),
            env.pool.clone(),
            &ExecuteMsg::UpdateRewardRate {
                reward_rate: Uint128::new(5),
            },
            &[],
        )
        .unwrap();
    advance(&mut env, 100);

    assert_eq!(pending_reward(&env, &env.user), Uint128::new(600));
}

#[test]
fn test_total_staked_matches_sum_of_positions() {
    let mut env = setup();
    let other = Addr::unchecked("other");

    env.app
        .execute_contract(
            env.owner.clone(),
            env.token.clone(),
            &cw20::Cw20ExecuteMsg::Transfer {
                recipient: other.to_string(),
                amount: Uint128::new(50_000),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            other.clone(),
            env.token.clone(),
            &cw20::Cw20ExecuteMsg::IncreaseAllowance {
                spender: env.pool.to_string(),
                amount: Uint128::new(50_000),
                expires: None,
            },
            &[],
        )
        .unwrap();

    stake(&mut env, 10_000);
    env.app
        .execute_contract(
            other.clone(),
            env.pool.clone(),
            &ExecuteMsg::Stake {
                amount: Uint128::new(30_000),
            },
            &[],
        )
        .unwrap();
    advance(&mut env, MIN_STAKE_TIME);
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::Withdraw {
                amount: Uint128::new(4_000),
            },
            &[],
        )
        .unwrap();

    let status: StatusResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.pool, &QueryMsg::Status {})
        .unwrap();
    let sum = stake_info(&env, &env.user).amount + stake_info(&env, &other).amount;
    assert_eq!(status.total_staked, sum);
    assert_eq!(status.total_staked, Uint128::new(36_000));
}

// ============================================================================
// Pause & Emergency Exit
// ============================================================================

#[test]
fn test_pause_gates_everything_but_emergency_exit() {
    let mut env = setup();
    stake(&mut env, 10_000);
    advance(&mut env, 100);

    env.app
        .execute_contract(env.owner.clone(), env.pool.clone(), &ExecuteMsg::Pause {}, &[])
        .unwrap();

    for msg in [
        ExecuteMsg::Stake {
            amount: Uint128::new(1_000),
        },
        ExecuteMsg::Withdraw {
            amount: Uint128::new(1_000),
        },
        ExecuteMsg::ClaimReward {},
    ] {
        let res = env
            .app
            .execute_contract(env.user.clone(), env.pool.clone(), &msg, &[]);
        assert!(res.unwrap_err().root_cause().to_string().contains("paused"));
    }

    // Emergency exit returns the stake and silently forfeits the 100
    // pending reward units.
    let before = cw20_balance(&env.app, &env.token, &env.user);
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::EmergencyWithdraw {},
            &[],
        )
        .unwrap();
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.user),
        before + Uint128::new(10_000)
    );
    assert_eq!(stake_info(&env, &env.user).amount, Uint128::zero());
    assert_eq!(pending_reward(&env, &env.user), Uint128::zero());

    let status: StatusResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.pool, &QueryMsg::Status {})
        .unwrap();
    assert_eq!(status.total_staked, Uint128::zero());
}

#[test]
fn test_emergency_withdraw_requires_pause() {
    let mut env = setup();
    stake(&mut env, 10_000);

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::EmergencyWithdraw {},
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("only available while paused"));
}

// ============================================================================
// Cross-Chain Relay
// ============================================================================

#[test]
fn test_bridge_stake_relays_position_through_bridge() {
    let mut env = setup();
    let validator = Addr::unchecked("validator1");

    let bridge_code_id = env.app.store_code(contract_bridge());
    let bridge_addr = env
        .app
        .instantiate_contract(
            bridge_code_id,
            env.owner.clone(),
            &bridge::msg::InstantiateMsg {
                owner: env.owner.to_string(),
                source_chain_id: 1,
                threshold: 1,
                validators: vec![validator.to_string()],
                min_transfer: Uint128::new(1_000),
                max_transfer: Uint128::new(1_000_000),
            },
            &[],
            "quorumgate-bridge",
            Some(env.owner.to_string()),
        )
        .unwrap();
    env.app
        .execute_contract(
            env.owner.clone(),
            bridge_addr.clone(),
            &bridge::msg::ExecuteMsg::AddSupportedChain { chain_id: 97 },
            &[],
        )
        .unwrap();

    env.app
        .execute_contract(
            env.owner.clone(),
            env.pool.clone(),
            &ExecuteMsg::SetBridge {
                bridge: bridge_addr.to_string(),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            env.owner.clone(),
            env.pool.clone(),
            &ExecuteMsg::AddSupportedChain { chain_id: 97 },
            &[],
        )
        .unwrap();

    stake(&mut env, 5_000);
    advance(&mut env, MIN_STAKE_TIME);

    let pool_before = cw20_balance(&env.app, &env.token, &env.pool);
    env.app
        .execute_contract(
            env.user.clone(),
            env.pool.clone(),
            &ExecuteMsg::BridgeStake {
                amount: Uint128::new(2_000),
                recipient: "destaccount".to_string(),
                target_chain: 97,
            },
            &[],
        )
        .unwrap();

    // The pool handed exactly 2,000 to the bridge's custody.
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.pool),
        pool_before - Uint128::new(2_000)
    );
    assert_eq!(
        cw20_balance(&env.app, &env.token, &bridge_addr),
        Uint128::new(2_000)
    );
    assert_eq!(stake_info(&env, &env.user).amount, Uint128::new(3_000));

    // The bridge recorded the request under the pool as initiator.
    let id: bridge::msg::ComputeTransferIdResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &bridge_addr,
            &bridge::msg::QueryMsg::ComputeTransferId {
                token: env.token.to_string(),
                initiator: env.pool.to_string(),
                recipient: "destaccount".to_string(),
                amount: Uint128::new(2_000),
                target_chain: 97,
            },
        )
        .unwrap();
    let request: bridge::msg::TransferRequestResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &bridge_addr,
            &bridge::msg::QueryMsg::TransferRequest {
                transfer_id: id.transfer_id,
            },
        )
        .unwrap();
    assert_eq!(request.initiator, env.pool);
    assert_eq!(request.amount, Uint128::new(2_000));
    assert!(!request.processed);
}

#[test]
fn test_bridge_stake_preconditions() {
    let mut env = setup();
    stake(&mut env, 5_000);
    advance(&mut env, MIN_STAKE_TIME);

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::BridgeStake {
            amount: Uint128::new(2_000),
            recipient: "destaccount".to_string(),
            target_chain: 97,
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("No bridge configured"));

    env.app
        .execute_contract(
            env.owner.clone(),
            env.pool.clone(),
            &ExecuteMsg::SetBridge {
                bridge: env.pool.to_string(),
            },
            &[],
        )
        .unwrap();
    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::BridgeStake {
            amount: Uint128::new(2_000),
            recipient: "destaccount".to_string(),
            target_chain: 97,
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("not supported"));
}

// ============================================================================
// Token Integrity & Reentrancy
// ============================================================================

#[test]
fn test_nonconforming_token_aborts_stake_without_residue() {
    // The token delivers less than requested; the delta check in `reply`
    // must fail the whole stake, including the position already written.
    let mut env = setup_with_token(contract_cw20_skimming_pull());

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Stake {
            amount: Uint128::new(10_000),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Balance verification failed"));

    assert_eq!(stake_info(&env, &env.user).amount, Uint128::zero());
    let status: StatusResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.pool, &QueryMsg::Status {})
        .unwrap();
    assert_eq!(status.total_staked, Uint128::zero());
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.user),
        Uint128::new(1_000_000)
    );
    // The pool keeps only the reward reserve funded during setup.
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.pool),
        Uint128::new(500_000)
    );
}

#[test]
fn test_reentrant_callback_bounces_off_latch() {
    // A token that calls back into the pool mid-pull finds the latch held
    // and the whole stake unwinds.
    let mut env = setup_with_token(contract_cw20_reentrant());

    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Stake {
            amount: Uint128::new(10_000),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Reentrant call"));

    assert_eq!(stake_info(&env, &env.user).amount, Uint128::zero());
    assert_eq!(
        cw20_balance(&env.app, &env.token, &env.user),
        Uint128::new(1_000_000)
    );

    // The latch itself was rolled back; a stake against a conforming path
    // is not permanently locked out. Lifecycle handlers still work.
    let res = env.app.execute_contract(
        env.user.clone(),
        env.pool.clone(),
        &ExecuteMsg::Withdraw {
            amount: Uint128::new(1),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Nothing staked"));
}

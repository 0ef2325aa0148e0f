#![cfg(test)]
use super::*;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, vec, Address, Env, Vec};
use veline_core::constants::{MAX_LOCK_SECONDS, MIN_LOCK_SECONDS, SECONDS_PER_YEAR};

fn setup<'a>(
    env: &'a Env,
) -> (
    LockContractClient<'a>,
    token::Client<'a>,
    token::StellarAssetClient<'a>,
) {
    let deployer = Address::generate(env);
    let token_admin = Address::generate(env);
    let token_id = env.register_stellar_asset_contract_v2(token_admin).address();

    let contract_id = env.register(LockContract, ());
    let client = LockContractClient::new(env, &contract_id);
    client.initialize(&deployer, &token_id);

    (
        client,
        token::Client::new(env, &token_id),
        token::StellarAssetClient::new(env, &token_id),
    )
}

fn funded_user(env: &Env, minter: &token::StellarAssetClient, amount: i128) -> Address {
    let user = Address::generate(env);
    minter.mint(&user, &amount);
    user
}

#[test]
fn test_lock_weights() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, token, minter) = setup(&env);
    let full_year = funded_user(&env, &minter, 1000);
    let half_year = funded_user(&env, &minter, 1000);

    let record = client.lock(&full_year, &1000, &SECONDS_PER_YEAR);
    assert_eq!(record.weight, 1000);
    assert_eq!(record.locked_amount, 1000);
    assert_eq!(record.lock_start, 0);

    let record = client.lock(&half_year, &1000, &(SECONDS_PER_YEAR / 2));
    assert_eq!(record.weight, 500);

    assert_eq!(token.balance(&full_year), 0);
    assert_eq!(token.balance(&client.address), 2000);
    assert_eq!(client.total_locked(), 2000);
    assert_eq!(client.total_weight(), 1500);
    assert_eq!(client.total_participants(), 2);
    assert_eq!(
        client.users_locked(&0, &10),
        vec![&env, full_year.clone(), half_year.clone()]
    );

    assert_eq!(client.balance_of(&full_year), 1000);
    env.ledger().set_timestamp(SECONDS_PER_YEAR / 4);
    assert_eq!(client.balance_of(&full_year), 750);
    assert_eq!(client.balance_of(&half_year), 250);

    env.ledger().set_timestamp(SECONDS_PER_YEAR / 2);
    assert_eq!(client.balance_of(&half_year), 0);
    env.ledger().set_timestamp(SECONDS_PER_YEAR);
    assert_eq!(client.balance_of(&full_year), 0);

    assert_eq!(client.balance_of(&Address::generate(&env)), 0);
}

#[test]
fn test_crank_brings_totals_up_to_date() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);
    let bob = funded_user(&env, &minter, 2000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    client.lock(&bob, &2000, &(2 * SECONDS_PER_YEAR));
    assert_eq!(client.total_weight(), 5000);

    env.ledger().set_timestamp(SECONDS_PER_YEAR / 2);
    assert_eq!(client.balance_of(&alice), 500);
    assert_eq!(client.balance_of(&bob), 3000);
    // Stored aggregate lags until the accounts are cranked.
    assert_eq!(client.total_weight(), 5000);

    client.recompute_weight(&alice);
    assert_eq!(client.total_weight(), 4500);
    client.recompute_weight(&bob);
    assert_eq!(client.total_weight(), 3500);
    assert_eq!(
        client.total_weight(),
        client.balance_of(&alice) + client.balance_of(&bob)
    );

    let record = client.get_account(&alice).unwrap();
    assert_eq!(record.weight, 500);
    assert_eq!(record.last_update, SECONDS_PER_YEAR / 2);

    // Past the end the crank zeroes the weight.
    env.ledger().set_timestamp(SECONDS_PER_YEAR + 1);
    client.recompute_weight(&alice);
    client.recompute_weight(&bob);
    assert_eq!(client.get_account(&alice).unwrap().weight, 0);
    assert_eq!(
        client.total_weight(),
        client.balance_of(&alice) + client.balance_of(&bob)
    );
}

#[test]
fn test_participant_index_pages() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);

    let mut lockers = Vec::new(&env);
    for _ in 0..5 {
        let user = funded_user(&env, &minter, 1000);
        client.lock(&user, &1000, &SECONDS_PER_YEAR);
        lockers.push_back(user);
    }
    assert_eq!(client.total_participants(), 5);

    assert_eq!(client.users_locked(&0, &5), lockers);
    assert_eq!(client.users_locked(&0, &100), lockers);
    assert_eq!(
        client.users_locked(&0, &2),
        vec![&env, lockers.get_unchecked(0), lockers.get_unchecked(1)]
    );
    assert_eq!(
        client.users_locked(&2, &2),
        vec![&env, lockers.get_unchecked(2), lockers.get_unchecked(3)]
    );
    assert_eq!(client.users_locked(&4, &2), vec![&env, lockers.get_unchecked(4)]);
    assert_eq!(client.users_locked(&5, &2).len(), 0);
    assert_eq!(client.users_locked(&u64::MAX, &u32::MAX).len(), 0);

    // A lock after an unlock keeps the original slot.
    let first = lockers.get_unchecked(0);
    env.ledger().set_timestamp(SECONDS_PER_YEAR + 1);
    client.unlock(&first);
    client.lock(&first, &1000, &SECONDS_PER_YEAR);
    let late = funded_user(&env, &minter, 1000);
    client.lock(&late, &1000, &SECONDS_PER_YEAR);

    let mut expected = lockers.clone();
    expected.push_back(late);
    assert_eq!(client.users_locked(&0, &10), expected);
    assert_eq!(client.total_participants(), 6);
}

#[test]
fn test_unlock_releases_stored_totals_exactly() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);
    let bob = funded_user(&env, &minter, 3000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    client.lock(&bob, &3000, &(2 * SECONDS_PER_YEAR));

    env.ledger().set_timestamp(SECONDS_PER_YEAR / 2);
    client.recompute_weight(&alice);

    env.ledger().set_timestamp(SECONDS_PER_YEAR + 1);
    client.unlock(&alice);
    assert_eq!(client.total_locked(), 3000);
    // Alice's stored 500 leaves; Bob's stored 6000 stays until cranked.
    assert_eq!(client.total_weight(), 6000);

    client.recompute_weight(&alice);
    assert_eq!(client.total_weight(), 6000);
    client.recompute_weight(&bob);
    assert_eq!(client.total_weight(), client.balance_of(&bob));
}

#[test]
fn test_crank_is_idempotent_within_an_instant() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);

    env.ledger().set_timestamp(500);
    client.lock(&alice, &1000, &SECONDS_PER_YEAR);

    env.ledger().set_timestamp(SECONDS_PER_YEAR / 2);
    let first = client.recompute_weight(&alice);
    let second = client.recompute_weight(&alice);
    assert_eq!(first, second);
    assert_eq!(client.total_weight(), first.weight);
}

#[test]
fn test_extend_duration() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);

    // Same instant as the lock: the new duration still takes effect.
    let record = client.extend_duration(&alice, &(2 * SECONDS_PER_YEAR));
    assert_eq!(record.lock_duration, 2 * SECONDS_PER_YEAR);
    assert_eq!(record.weight, 2000);
    assert_eq!(client.total_weight(), 2000);

    assert!(client.try_extend_duration(&alice, &(2 * SECONDS_PER_YEAR)).is_err());
    assert!(client.try_extend_duration(&alice, &SECONDS_PER_YEAR).is_err());
    assert!(client.try_extend_duration(&alice, &(MAX_LOCK_SECONDS + 1)).is_err());
    assert_eq!(client.get_account(&alice).unwrap().lock_duration, 2 * SECONDS_PER_YEAR);

    env.ledger().set_timestamp(SECONDS_PER_YEAR);
    let record = client.extend_duration(&alice, &(3 * SECONDS_PER_YEAR));
    assert_eq!(record.weight, 2000);
    assert_eq!(record.last_update, SECONDS_PER_YEAR);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn test_extend_duration_must_increase() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    client.extend_duration(&alice, &SECONDS_PER_YEAR);
}

#[test]
fn test_extend_amount() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, token, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 2000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    let record = client.extend_amount(&alice, &500);
    assert_eq!(record.locked_amount, 1500);
    assert_eq!(record.weight, 1500);
    assert_eq!(client.total_locked(), 1500);
    assert_eq!(client.total_weight(), 1500);
    assert_eq!(token.balance(&client.address), 1500);
    assert_eq!(token.balance(&alice), 500);

    assert!(client.try_extend_amount(&alice, &0).is_err());
    assert_eq!(client.get_account(&alice).unwrap().locked_amount, 1500);

    env.ledger().set_timestamp(SECONDS_PER_YEAR / 2);
    let record = client.extend_amount(&alice, &500);
    assert_eq!(record.locked_amount, 2000);
    assert_eq!(record.weight, 1000);
    assert_eq!(client.total_weight(), 1000);
}

#[test]
#[should_panic(expected = "Error(Contract, #6)")]
fn test_extend_amount_after_expiry() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 2000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    env.ledger().set_timestamp(SECONDS_PER_YEAR + 1);
    client.extend_amount(&alice, &500);
}

#[test]
#[should_panic(expected = "Error(Contract, #15)")]
fn test_extend_without_lock() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 2000);

    client.extend_amount(&alice, &500);
}

#[test]
fn test_unlock_and_relock() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, token, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);

    env.ledger().set_timestamp(SECONDS_PER_YEAR);
    assert!(client.try_unlock(&alice).is_err());
    assert_eq!(token.balance(&alice), 0);

    env.ledger().set_timestamp(SECONDS_PER_YEAR + 1);
    assert_eq!(client.unlock(&alice), 1000);
    assert_eq!(token.balance(&alice), 1000);
    assert_eq!(token.balance(&client.address), 0);
    assert_eq!(client.total_locked(), 0);
    assert_eq!(client.total_weight(), 0);

    let record = client.get_account(&alice).unwrap();
    assert_eq!(record.locked_amount, 0);
    assert_eq!(record.weight, 0);
    assert_eq!(record.lock_duration, 0);
    assert!(client.try_unlock(&alice).is_err());

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    assert_eq!(client.total_participants(), 1);
    assert_eq!(client.users_locked(&0, &10), vec![&env, alice.clone()]);
    assert!(client.is_locked_ever(&alice));
    assert_eq!(client.total_weight(), 1000);
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn test_unlock_before_expiry() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    client.unlock(&alice);
}

#[test]
#[should_panic(expected = "Error(Contract, #16)")]
fn test_double_lock() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 2000);

    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
    client.lock(&alice, &1000, &SECONDS_PER_YEAR);
}

#[test]
fn test_lock_bounds() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, token, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1000);

    assert!(client.try_lock(&alice, &1000, &(MIN_LOCK_SECONDS - 1)).is_err());
    assert!(client.try_lock(&alice, &1000, &(MAX_LOCK_SECONDS + 1)).is_err());
    assert!(client.try_lock(&alice, &2000, &SECONDS_PER_YEAR).is_err());
    assert_eq!(token.balance(&alice), 1000);
    assert_eq!(client.total_locked(), 0);
    assert_eq!(client.total_participants(), 0);
    assert!(!client.is_locked_ever(&alice));

    let record = client.lock(&alice, &1000, &MAX_LOCK_SECONDS);
    assert_eq!(record.weight, 4000);
}

#[test]
#[should_panic(expected = "Error(Contract, #11)")]
fn test_zero_weight_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, minter) = setup(&env);
    let alice = funded_user(&env, &minter, 1);

    client.lock(&alice, &1, &MIN_LOCK_SECONDS);
}

#[test]
#[should_panic(expected = "Error(Contract, #5)")]
fn test_crank_unknown_account() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, _) = setup(&env);

    client.recompute_weight(&Address::generate(&env));
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn test_initialize_once() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, token, _) = setup(&env);

    client.initialize(&client.deployer(), &token.address);
}

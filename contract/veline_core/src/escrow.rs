//! Vote-escrow ledger.
//!
//! An account locks principal for a duration and receives a weight
//! proportional to `amount × time_remaining / SECONDS_PER_YEAR`. Weight decays
//! linearly to zero at the lock end but is only recomputed when the account
//! is touched: by the permissionless [`recompute_weight`] crank, by the
//! extend operations, or on the fly by the read path [`balance_of`].
//!
//! [`EscrowTotals::total_weight`] is the sum of the *stored* weights, so it
//! only equals the sum of live weights right after every active account has
//! been cranked.

use soroban_sdk::{contracttype, log, panic_with_error, token, Address, Env, Vec};

use crate::constants::{MAX_LOCK_SECONDS, MIN_LOCK_SECONDS, SECONDS_PER_YEAR};
use crate::{events, storage, Error};

#[contracttype]
#[derive(Clone)]
pub enum EscrowKey {
    Asset,
    Totals,
    Account(Address),
    Participant(u64),
    EverLocked(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowAccount {
    pub owner: Address,
    pub locked_amount: u64,
    pub lock_start: u64,
    pub lock_duration: u64,
    pub weight: u128,
    pub last_update: u64,
    pub used_weight: u128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EscrowTotals {
    pub total_locked: u64,
    pub total_weight: u128,
    pub total_participants: u64,
}

impl EscrowAccount {
    fn empty(owner: Address) -> Self {
        EscrowAccount {
            owner,
            locked_amount: 0,
            lock_start: 0,
            lock_duration: 0,
            weight: 0,
            last_update: 0,
            used_weight: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.locked_amount > 0
    }

    pub fn lock_end(&self) -> u64 {
        self.lock_start.saturating_add(self.lock_duration)
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now > self.lock_end()
    }

    /// Weight the account would have at `now`, without touching storage.
    pub fn weight_at(&self, now: u64) -> u128 {
        if self.is_expired(now) {
            return 0;
        }
        weight_for(self.locked_amount, self.lock_end() - now)
    }

    pub fn unused_weight(&self) -> u128 {
        self.weight.saturating_sub(self.used_weight)
    }
}

/// `floor(amount × time_remaining / SECONDS_PER_YEAR)`.
///
/// Both factors are `u64`, so the product always fits in `u128`.
pub fn weight_for(amount: u64, time_remaining: u64) -> u128 {
    let product = amount as u128 * time_remaining as u128;
    product / SECONDS_PER_YEAR as u128
}

pub fn init(env: &Env, asset: &Address) {
    if env.storage().instance().has(&EscrowKey::Asset) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    env.storage().instance().set(&EscrowKey::Asset, asset);
    env.storage()
        .instance()
        .set(&EscrowKey::Totals, &EscrowTotals::default());
    storage::extend_instance(env);
}

pub fn asset(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&EscrowKey::Asset)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn totals(env: &Env) -> EscrowTotals {
    env.storage()
        .instance()
        .get(&EscrowKey::Totals)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn account(env: &Env, owner: &Address) -> Option<EscrowAccount> {
    env.storage()
        .persistent()
        .get(&EscrowKey::Account(owner.clone()))
}

/// First-time lockers in the order they first locked, one entry per index.
/// Returns at most `limit` addresses starting at `start`.
pub fn participants(env: &Env, start: u64, limit: u32) -> Vec<Address> {
    let end = totals(env)
        .total_participants
        .min(start.saturating_add(limit as u64));
    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(participant) = env
            .storage()
            .persistent()
            .get(&EscrowKey::Participant(index))
        {
            page.push_back(participant);
        }
    }
    page
}

pub fn is_locked_ever(env: &Env, owner: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&EscrowKey::EverLocked(owner.clone()))
        .unwrap_or(false)
}

/// Loads `owner`'s record and the totals, lets `f` edit both in place and
/// writes both back in the same invocation.
fn with_account<R>(
    env: &Env,
    owner: &Address,
    f: impl FnOnce(&mut EscrowAccount, &mut EscrowTotals) -> R,
) -> R {
    let mut record = account(env, owner).unwrap_or_else(|| EscrowAccount::empty(owner.clone()));
    let mut totals = totals(env);

    let result = f(&mut record, &mut totals);

    storage::set_persistent(env, &EscrowKey::Account(owner.clone()), &record);
    env.storage().instance().set(&EscrowKey::Totals, &totals);
    storage::extend_instance(env);
    result
}

fn load_active(env: &Env, owner: &Address) -> EscrowAccount {
    match account(env, owner) {
        Some(record) if record.is_active() => record,
        _ => panic_with_error!(env, Error::NotLocked),
    }
}

/// Swaps the stored weight for the weight at `now` in both the record and
/// the totals. Skipped when the record was already refreshed at `now`,
/// unless `force` is set because the inputs changed.
fn refresh(
    env: &Env,
    record: &mut EscrowAccount,
    totals: &mut EscrowTotals,
    now: u64,
    force: bool,
) {
    if !force && record.last_update == now {
        return;
    }
    totals.total_weight = totals
        .total_weight
        .checked_sub(record.weight)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
    record.weight = record.weight_at(now);
    totals.total_weight += record.weight;
    record.last_update = now;
}

fn pull(env: &Env, from: &Address, amount: u64) {
    token::Client::new(env, &asset(env)).transfer(
        from,
        &env.current_contract_address(),
        &(amount as i128),
    );
}

pub fn lock(env: &Env, owner: &Address, amount: u64, duration: u64) -> EscrowAccount {
    let now = env.ledger().timestamp();

    if account(env, owner).map_or(false, |record| record.is_active()) {
        panic_with_error!(env, Error::AlreadyLocked);
    }
    if !(MIN_LOCK_SECONDS..=MAX_LOCK_SECONDS).contains(&duration) {
        panic_with_error!(env, Error::OutOfRange);
    }
    let weight = weight_for(amount, duration);
    if weight == 0 {
        panic_with_error!(env, Error::ZeroWeight);
    }

    pull(env, owner, amount);

    let first_lock = !is_locked_ever(env, owner);
    let (record, participant_index) = with_account(env, owner, |record, totals| {
        *record = EscrowAccount {
            owner: owner.clone(),
            locked_amount: amount,
            lock_start: now,
            lock_duration: duration,
            weight,
            last_update: now,
            used_weight: 0,
        };
        totals.total_locked = totals
            .total_locked
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
        totals.total_weight += weight;
        let participant_index = totals.total_participants;
        if first_lock {
            totals.total_participants += 1;
        }
        (record.clone(), participant_index)
    });

    if first_lock {
        storage::set_persistent(env, &EscrowKey::Participant(participant_index), owner);
        storage::set_persistent(env, &EscrowKey::EverLocked(owner.clone()), &true);
    }

    log!(env, "escrow locked", owner.clone(), amount, duration);
    events::emit_locked(
        env,
        events::LockedEvent {
            owner: owner.clone(),
            amount,
            duration,
        },
    );
    record
}

pub fn extend_duration(env: &Env, owner: &Address, new_duration: u64) -> EscrowAccount {
    let now = env.ledger().timestamp();
    let current = load_active(env, owner);
    if current.is_expired(now) {
        panic_with_error!(env, Error::Expired);
    }
    if new_duration <= current.lock_duration || new_duration > MAX_LOCK_SECONDS {
        panic_with_error!(env, Error::OutOfRange);
    }

    let record = with_account(env, owner, |record, totals| {
        record.lock_duration = new_duration;
        refresh(env, record, totals, now, true);
        record.clone()
    });

    events::emit_weight_updated(env, &record);
    events::emit_duration_extended(
        env,
        events::DurationExtendedEvent {
            owner: owner.clone(),
            duration: new_duration,
        },
    );
    record
}

pub fn extend_amount(env: &Env, owner: &Address, added: u64) -> EscrowAccount {
    let now = env.ledger().timestamp();
    if added == 0 {
        panic_with_error!(env, Error::OutOfRange);
    }
    let current = load_active(env, owner);
    if current.is_expired(now) {
        panic_with_error!(env, Error::Expired);
    }

    pull(env, owner, added);

    let record = with_account(env, owner, |record, totals| {
        record.locked_amount = record
            .locked_amount
            .checked_add(added)
            .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
        totals.total_locked = totals
            .total_locked
            .checked_add(added)
            .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
        refresh(env, record, totals, now, true);
        record.clone()
    });

    events::emit_weight_updated(env, &record);
    events::emit_amount_extended(
        env,
        events::AmountExtendedEvent {
            owner: owner.clone(),
            amount: added,
        },
    );
    record
}

/// Permissionless crank: anyone may refresh anyone's stored weight.
pub fn recompute_weight(env: &Env, owner: &Address) -> EscrowAccount {
    let now = env.ledger().timestamp();
    if account(env, owner).is_none() {
        panic_with_error!(env, Error::NotFound);
    }

    let record = with_account(env, owner, |record, totals| {
        refresh(env, record, totals, now, false);
        record.clone()
    });

    log!(env, "escrow weight refreshed", owner.clone(), now);
    events::emit_weight_updated(env, &record);
    record
}

/// Releases the principal once the lock has ended. Returns the released
/// amount.
pub fn unlock(env: &Env, owner: &Address) -> u64 {
    let now = env.ledger().timestamp();
    let current = load_active(env, owner);
    if !current.is_expired(now) {
        panic_with_error!(env, Error::NotYetExpired);
    }

    let released = with_account(env, owner, |record, totals| {
        let released = record.locked_amount;
        // Totals include every stored record; an underflow means corrupt bookkeeping.
        totals.total_locked = totals
            .total_locked
            .checked_sub(released)
            .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
        totals.total_weight = totals
            .total_weight
            .checked_sub(record.weight)
            .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
        *record = EscrowAccount::empty(owner.clone());
        released
    });

    token::Client::new(env, &asset(env)).transfer(
        &env.current_contract_address(),
        owner,
        &(released as i128),
    );

    log!(env, "escrow unlocked", owner.clone(), released);
    events::emit_unlocked(
        env,
        events::UnlockedEvent {
            owner: owner.clone(),
            amount: released,
        },
    );
    released
}

/// Live weight minus what has already been spent, floored at zero.
pub fn balance_of(env: &Env, owner: &Address) -> u128 {
    let now = env.ledger().timestamp();
    match account(env, owner) {
        Some(record) => record.weight_at(now).saturating_sub(record.used_weight),
        None => 0,
    }
}

/// Spends `cost` of the account's stored, unused weight. The caller is
/// expected to have refreshed the record at the current instant.
pub fn consume_weight(env: &Env, owner: &Address, cost: u128) -> EscrowAccount {
    let current = load_active(env, owner);
    if current.unused_weight() < cost {
        panic_with_error!(env, Error::InsufficientWeight);
    }

    with_account(env, owner, |record, _| {
        record.used_weight += cost;
        record.clone()
    })
}

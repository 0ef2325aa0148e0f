use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::access::Role;
use crate::EscrowAccount;

#[contracttype]
#[derive(Clone)]
pub struct RoleGrantedEvent {
    pub role: Role,
    pub member: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct LockedEvent {
    pub owner: Address,
    pub amount: u64,
    pub duration: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct DurationExtendedEvent {
    pub owner: Address,
    pub duration: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct AmountExtendedEvent {
    pub owner: Address,
    pub amount: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct WeightUpdatedEvent {
    pub owner: Address,
    pub record: EscrowAccount,
}

#[contracttype]
#[derive(Clone)]
pub struct UnlockedEvent {
    pub owner: Address,
    pub amount: u64,
}

pub fn emit_role_granted(env: &Env, event: RoleGrantedEvent) {
    env.events()
        .publish((Symbol::new(env, "role_granted"),), event);
}

pub fn emit_locked(env: &Env, event: LockedEvent) {
    env.events().publish((Symbol::new(env, "locked"),), event);
}

pub fn emit_duration_extended(env: &Env, event: DurationExtendedEvent) {
    env.events()
        .publish((Symbol::new(env, "lock_extended"),), event);
}

pub fn emit_amount_extended(env: &Env, event: AmountExtendedEvent) {
    env.events()
        .publish((Symbol::new(env, "amount_extended"),), event);
}

pub fn emit_weight_updated(env: &Env, record: &EscrowAccount) {
    env.events().publish(
        (Symbol::new(env, "weight_updated"),),
        WeightUpdatedEvent {
            owner: record.owner.clone(),
            record: record.clone(),
        },
    );
}

pub fn emit_unlocked(env: &Env, event: UnlockedEvent) {
    env.events().publish((Symbol::new(env, "unlocked"),), event);
}

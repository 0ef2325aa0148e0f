use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::{escrow, events, storage, EscrowAccount, Error};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    CampaignOwner,
    ScholarshipLeader,
}

#[contracttype]
#[derive(Clone)]
pub enum AccessKey {
    Deployer,
    Member(Role, Address),
}

pub fn init_deployer(env: &Env, deployer: &Address) {
    if env.storage().instance().has(&AccessKey::Deployer) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    env.storage().instance().set(&AccessKey::Deployer, deployer);
    storage::extend_instance(env);
}

pub fn deployer(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&AccessKey::Deployer)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn is_deployer(env: &Env, identity: &Address) -> bool {
    env.storage()
        .instance()
        .get::<_, Address>(&AccessKey::Deployer)
        .map_or(false, |deployer| deployer == *identity)
}

/// Requires the deployer's signature and returns its address.
pub fn require_deployer(env: &Env) -> Address {
    let deployer = deployer(env);
    deployer.require_auth();
    deployer
}

pub fn has_role(env: &Env, role: Role, identity: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&AccessKey::Member(role, identity.clone()))
        .unwrap_or(false)
}

pub fn grant(env: &Env, role: Role, identity: &Address) {
    if has_role(env, role, identity) {
        panic_with_error!(env, Error::AlreadyExists);
    }
    storage::set_persistent(env, &AccessKey::Member(role, identity.clone()), &true);
    events::emit_role_granted(
        env,
        events::RoleGrantedEvent {
            role,
            member: identity.clone(),
        },
    );
}

/// The caller signs and must either hold `role` or be the deployer.
pub fn require_role_or_deployer(env: &Env, role: Role, caller: &Address) {
    caller.require_auth();
    if !has_role(env, role, caller) && !is_deployer(env, caller) {
        panic_with_error!(env, Error::Unauthorized);
    }
}

pub fn require_owner_or_deployer(env: &Env, caller: &Address) {
    require_role_or_deployer(env, Role::CampaignOwner, caller);
}

pub fn require_leader(env: &Env, caller: &Address) {
    require_role_or_deployer(env, Role::ScholarshipLeader, caller);
}

pub fn require_escrow_participant(env: &Env, account: &Address) -> EscrowAccount {
    match escrow::account(env, account) {
        Some(record) if record.is_active() => record,
        _ => panic_with_error!(env, Error::NotLocked),
    }
}

#![no_std]

//! Stand-alone vote-escrow: lock the configured asset for 7 days to 4 years
//! and earn a weight that decays linearly until the lock ends.

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};
use veline_core::{access, escrow, EscrowAccount, EscrowTotals};

#[contract]
pub struct LockContract;

#[contractimpl]
impl LockContract {
    /// Initialize the escrow with the asset it will hold in custody
    pub fn initialize(e: Env, deployer: Address, asset: Address) {
        deployer.require_auth();
        access::init_deployer(&e, &deployer);
        escrow::init(&e, &asset);
    }

    /// Lock `amount` of the escrow asset for `duration` seconds
    pub fn lock(e: Env, account: Address, amount: u64, duration: u64) -> EscrowAccount {
        account.require_auth();
        escrow::lock(&e, &account, amount, duration)
    }

    pub fn extend_duration(e: Env, account: Address, new_duration: u64) -> EscrowAccount {
        account.require_auth();
        escrow::extend_duration(&e, &account, new_duration)
    }

    pub fn extend_amount(e: Env, account: Address, amount: u64) -> EscrowAccount {
        account.require_auth();
        escrow::extend_amount(&e, &account, amount)
    }

    /// Refresh the stored weight of any account. Anyone may call this.
    pub fn recompute_weight(e: Env, account: Address) -> EscrowAccount {
        escrow::recompute_weight(&e, &account)
    }

    /// Withdraw the principal after the lock has ended
    pub fn unlock(e: Env, account: Address) -> u64 {
        account.require_auth();
        escrow::unlock(&e, &account)
    }

    /// View functions
    pub fn balance_of(e: Env, account: Address) -> u128 {
        escrow::balance_of(&e, &account)
    }

    pub fn get_account(e: Env, account: Address) -> Option<EscrowAccount> {
        escrow::account(&e, &account)
    }

    /// First-time lockers in lock order, `limit` at a time from `start`
    pub fn users_locked(e: Env, start: u64, limit: u32) -> Vec<Address> {
        escrow::participants(&e, start, limit)
    }

    pub fn is_locked_ever(e: Env, account: Address) -> bool {
        escrow::is_locked_ever(&e, &account)
    }

    pub fn totals(e: Env) -> EscrowTotals {
        escrow::totals(&e)
    }

    pub fn total_locked(e: Env) -> u64 {
        escrow::totals(&e).total_locked
    }

    pub fn total_weight(e: Env) -> u128 {
        escrow::totals(&e).total_weight
    }

    pub fn total_participants(e: Env) -> u64 {
        escrow::totals(&e).total_participants
    }

    pub fn asset(e: Env) -> Address {
        escrow::asset(&e)
    }

    pub fn deployer(e: Env) -> Address {
        access::deployer(&e)
    }
}

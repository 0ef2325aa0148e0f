#![no_std]

mod events;
mod storage_types;


use soroban_sdk::{contract, contractimpl, log, panic_with_error, token, Address, Env, Vec};
use veline_core::access::{self, Role};
use veline_core::{claims, escrow, storage, EscrowAccount, EscrowTotals, Error};

pub use storage_types::{DataKey, Scholarship};

#[contract]
pub struct ScholarshipContract;

#[contractimpl]
impl ScholarshipContract {
    /// Initialize the contract with the deployer and the asset accepted for locking
    pub fn initialize(env: Env, deployer: Address, lock_asset: Address) {
        deployer.require_auth();
        access::init_deployer(&env, &deployer);
        escrow::init(&env, &lock_asset);
        env.storage().instance().set(&DataKey::ScholarshipCount, &0u64);
        storage::extend_instance(&env);
    }

    /// Register the caller as a scholarship leader
    pub fn register_leader(env: Env, leader: Address) {
        leader.require_auth();
        access::grant(&env, Role::ScholarshipLeader, &leader);
    }

    /// Create a scholarship paying one unit of `asset` per slot. The creator
    /// funds every slot up front.
    pub fn create_scholarship(
        env: Env,
        creator: Address,
        asset: Address,
        slot_count: u64,
        weight_cost: u128,
    ) -> u64 {
        access::require_leader(&env, &creator);
        if slot_count == 0 || weight_cost == 0 {
            panic_with_error!(&env, Error::OutOfRange);
        }
        if asset == escrow::asset(&env) {
            panic_with_error!(&env, Error::InvalidAsset);
        }
        // The payout balance check below is per asset.
        if env
            .storage()
            .persistent()
            .has(&DataKey::AssetScholarship(asset.clone()))
        {
            panic_with_error!(&env, Error::AlreadyExists);
        }

        token::Client::new(&env, &asset).transfer(
            &creator,
            &env.current_contract_address(),
            &(slot_count as i128),
        );

        let scholarship_id = Self::scholarship_count(env.clone());
        let scholarship = Scholarship {
            id: scholarship_id,
            remaining_slots: slot_count,
            weight_cost,
            asset: asset.clone(),
            creator: creator.clone(),
        };
        storage::set_persistent(&env, &DataKey::Scholarship(scholarship_id), &scholarship);
        storage::set_persistent(
            &env,
            &DataKey::AssetScholarship(asset.clone()),
            &scholarship_id,
        );

        let next_id = scholarship_id
            .checked_add(1)
            .unwrap_or_else(|| panic_with_error!(&env, Error::ArithmeticOverflow));
        env.storage()
            .instance()
            .set(&DataKey::ScholarshipCount, &next_id);
        storage::extend_instance(&env);

        log!(&env, "scholarship created", scholarship_id, slot_count);
        events::emit_scholarship_created(
            &env,
            events::ScholarshipCreatedEvent {
                scholarship_id,
                creator,
                asset,
                slot_count,
                weight_cost,
            },
        );

        scholarship_id
    }

    /// Pay one unit of the scholarship asset to `claimant`, spending
    /// `weight_cost` of its escrow weight. Each claimant is paid at most once
    /// per scholarship.
    pub fn claim_scholarship(env: Env, claimant: Address, scholarship_id: u64) {
        claimant.require_auth();

        let mut scholarship = Self::get_scholarship(env.clone(), scholarship_id);
        access::require_escrow_participant(&env, &claimant);

        let claim_key = claims::claim_key(&env, scholarship_id, &claimant);
        claims::ensure_unclaimed(&env, &claim_key);

        let record = escrow::recompute_weight(&env, &claimant);
        if record.unused_weight() < scholarship.weight_cost {
            panic_with_error!(&env, Error::InsufficientWeight);
        }
        if scholarship.remaining_slots < 1 {
            panic_with_error!(&env, Error::NoSlotsRemaining);
        }

        let payout = token::Client::new(&env, &scholarship.asset);
        let held = payout.balance(&env.current_contract_address());
        if held != scholarship.remaining_slots as i128 {
            panic_with_error!(&env, Error::BalanceMismatch);
        }

        scholarship.remaining_slots -= 1;
        storage::set_persistent(&env, &DataKey::Scholarship(scholarship_id), &scholarship);
        escrow::consume_weight(&env, &claimant, scholarship.weight_cost);
        claims::consume(&env, &claim_key);

        payout.transfer(&env.current_contract_address(), &claimant, &1);

        log!(
            &env,
            "scholarship paid",
            scholarship_id,
            scholarship.remaining_slots
        );
        events::emit_scholarship_paid(
            &env,
            events::ScholarshipPaidEvent {
                scholarship_id,
                claimant,
                remaining_slots: scholarship.remaining_slots,
                weight_spent: scholarship.weight_cost,
            },
        );
    }

    pub fn lock(env: Env, account: Address, amount: u64, duration: u64) -> EscrowAccount {
        account.require_auth();
        escrow::lock(&env, &account, amount, duration)
    }

    pub fn extend_duration(env: Env, account: Address, new_duration: u64) -> EscrowAccount {
        account.require_auth();
        escrow::extend_duration(&env, &account, new_duration)
    }

    pub fn extend_amount(env: Env, account: Address, amount: u64) -> EscrowAccount {
        account.require_auth();
        escrow::extend_amount(&env, &account, amount)
    }

    pub fn recompute_weight(env: Env, account: Address) -> EscrowAccount {
        escrow::recompute_weight(&env, &account)
    }

    pub fn unlock(env: Env, account: Address) -> u64 {
        account.require_auth();
        escrow::unlock(&env, &account)
    }

    /// Unspent escrow weight at the current ledger time
    pub fn balance_of(env: Env, account: Address) -> u128 {
        escrow::balance_of(&env, &account)
    }

    pub fn get_account(env: Env, account: Address) -> Option<EscrowAccount> {
        escrow::account(&env, &account)
    }

    pub fn users_locked(env: Env, start: u64, limit: u32) -> Vec<Address> {
        escrow::participants(&env, start, limit)
    }

    pub fn is_locked_ever(env: Env, account: Address) -> bool {
        escrow::is_locked_ever(&env, &account)
    }

    pub fn totals(env: Env) -> EscrowTotals {
        escrow::totals(&env)
    }

    pub fn get_scholarship(env: Env, scholarship_id: u64) -> Scholarship {
        env.storage()
            .persistent()
            .get(&DataKey::Scholarship(scholarship_id))
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound))
    }

    pub fn scholarship_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::ScholarshipCount)
            .unwrap_or(0)
    }

    pub fn is_leader(env: Env, leader: Address) -> bool {
        access::has_role(&env, Role::ScholarshipLeader, &leader)
            || access::is_deployer(&env, &leader)
    }

    pub fn is_paid(env: Env, scholarship_id: u64, claimant: Address) -> bool {
        claims::is_consumed(&env, &claims::claim_key(&env, scholarship_id, &claimant))
    }

    pub fn deployer(env: Env) -> Address {
        access::deployer(&env)
    }
}

#![no_std]
use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, token, Address, BytesN, Env, Vec,
};
use veline_core::access::{self, Role};
use veline_core::{claims, merkle, storage, Error};

mod events;
mod storage_types;


pub use crate::storage_types::{Campaign, DataKey};

#[contract]
pub struct CampaignContract;

#[contractimpl]
impl CampaignContract {
    pub fn initialize(env: Env, deployer: Address) {
        deployer.require_auth();
        access::init_deployer(&env, &deployer);
        env.storage().instance().set(&DataKey::CampaignCount, &0u64);
        storage::extend_instance(&env);
    }

    /// Sets the asset paid out by every campaign. Deployer only, once.
    pub fn register_payout_asset(env: Env, asset: Address) {
        access::require_deployer(&env);
        if env.storage().instance().has(&DataKey::PayoutAsset) {
            panic_with_error!(&env, Error::AlreadyExists);
        }
        env.storage().instance().set(&DataKey::PayoutAsset, &asset);
        storage::extend_instance(&env);
    }

    pub fn authorize_owner(env: Env, owner: Address) {
        access::require_deployer(&env);
        access::grant(&env, Role::CampaignOwner, &owner);
    }

    pub fn create_campaign(
        env: Env,
        owner: Address,
        root: BytesN<32>,
        proof_anchor: Vec<BytesN<32>>,
        duration: u64,
    ) -> u64 {
        access::require_owner_or_deployer(&env, &owner);
        if duration == 0 {
            panic_with_error!(&env, Error::OutOfRange);
        }

        let now = env.ledger().timestamp();
        let expiry = now
            .checked_add(duration)
            .unwrap_or_else(|| panic_with_error!(&env, Error::ArithmeticOverflow));

        let campaign_id = Self::campaign_count(env.clone()) + 1;
        if env.storage().persistent().has(&DataKey::Campaign(campaign_id)) {
            panic_with_error!(&env, Error::AlreadyExists);
        }

        let campaign = Campaign {
            id: campaign_id,
            root: root.clone(),
            proof_anchor: proof_anchor.clone(),
            owner: owner.clone(),
            expiry,
        };
        storage::set_persistent(&env, &DataKey::Campaign(campaign_id), &campaign);

        let mut owned = Self::campaigns_of(env.clone(), owner.clone());
        owned.push_back(campaign_id);
        storage::set_persistent(&env, &DataKey::OwnerCampaigns(owner.clone()), &owned);

        env.storage().instance().set(&DataKey::CampaignCount, &campaign_id);
        storage::extend_instance(&env);

        log!(&env, "campaign created", campaign_id, expiry);
        events::emit_campaign_created(
            &env,
            events::CampaignCreatedEvent {
                campaign_id,
                root,
                proof_anchor,
                owner,
                expiry,
            },
        );

        campaign_id
    }

    /// Pays `amount` to `claimant` if `(claimant, amount)` is a leaf under the
    /// campaign root. An empty `proof` falls back to the campaign's stored
    /// proof anchor.
    pub fn claim(
        env: Env,
        claimant: Address,
        amount: u64,
        campaign_id: u64,
        proof: Vec<BytesN<32>>,
    ) {
        claimant.require_auth();

        let campaign = Self::get_campaign(env.clone(), campaign_id);
        let asset = Self::payout_asset(env.clone());
        if env.ledger().timestamp() > campaign.expiry {
            panic_with_error!(&env, Error::Expired);
        }

        let claim_key = claims::claim_key(&env, campaign_id, &claimant);
        claims::ensure_unclaimed(&env, &claim_key);

        let proof = if proof.is_empty() {
            campaign.proof_anchor
        } else {
            proof
        };
        let leaf = merkle::leaf_hash(&env, &claimant, amount);
        if !merkle::verify(&env, &leaf, &proof, &campaign.root) {
            panic_with_error!(&env, Error::InvalidProof);
        }

        // Consumed before the transfer leaves custody.
        claims::consume(&env, &claim_key);

        token::Client::new(&env, &asset).transfer(
            &env.current_contract_address(),
            &claimant,
            &(amount as i128),
        );

        log!(&env, "campaign claim paid", campaign_id, amount);
        events::emit_mint(
            &env,
            events::MintEvent {
                claimant,
                amount,
                campaign_id,
            },
        );
    }

    pub fn check_eligible(env: Env, claimant: Address, amount: u64, campaign_id: u64) -> bool {
        let campaign: Campaign = match env
            .storage()
            .persistent()
            .get(&DataKey::Campaign(campaign_id))
        {
            Some(campaign) => campaign,
            None => return false,
        };
        if campaign.proof_anchor.is_empty() {
            return false;
        }
        let leaf = merkle::leaf_hash(&env, &claimant, amount);
        merkle::verify(&env, &leaf, &campaign.proof_anchor, &campaign.root)
    }

    pub fn owner_of(env: Env, campaign_id: u64) -> Option<Address> {
        env.storage()
            .persistent()
            .get::<_, Campaign>(&DataKey::Campaign(campaign_id))
            .map(|campaign| campaign.owner)
    }

    pub fn get_campaign(env: Env, campaign_id: u64) -> Campaign {
        env.storage()
            .persistent()
            .get(&DataKey::Campaign(campaign_id))
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound))
    }

    pub fn campaigns_of(env: Env, owner: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::OwnerCampaigns(owner))
            .unwrap_or_else(|| Vec::new(&env))
    }

    pub fn campaign_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0)
    }

    pub fn is_claimed(env: Env, campaign_id: u64, claimant: Address) -> bool {
        claims::is_consumed(&env, &claims::claim_key(&env, campaign_id, &claimant))
    }

    pub fn is_owner(env: Env, owner: Address) -> bool {
        access::has_role(&env, Role::CampaignOwner, &owner)
    }

    pub fn deployer(env: Env) -> Address {
        access::deployer(&env)
    }

    pub fn payout_asset(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::PayoutAsset)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotInitialized))
    }
}

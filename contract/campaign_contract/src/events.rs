use soroban_sdk::{contracttype, Address, BytesN, Env, Symbol, Vec};

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: u64,
    pub root: BytesN<32>,
    pub proof_anchor: Vec<BytesN<32>>,
    pub owner: Address,
    pub expiry: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct MintEvent {
    pub claimant: Address,
    pub amount: u64,
    pub campaign_id: u64,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_created"),), event);
}

pub fn emit_mint(env: &Env, event: MintEvent) {
    env.events().publish((Symbol::new(env, "minted"),), event);
}

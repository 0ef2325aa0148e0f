use soroban_sdk::{contracttype, Address, BytesN, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    PayoutAsset,
    CampaignCount,
    Campaign(u64),
    OwnerCampaigns(Address), // Owner -> campaign ids, in creation order
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub root: BytesN<32>,
    // Stored proof used by `check_eligible` and by claims that send no proof.
    pub proof_anchor: Vec<BytesN<32>>,
    pub owner: Address,
    pub expiry: u64,
}

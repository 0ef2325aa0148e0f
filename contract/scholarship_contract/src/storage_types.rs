use soroban_sdk::{contracttype, Address};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    ScholarshipCount,
    Scholarship(u64),
    AssetScholarship(Address),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Scholarship {
    pub id: u64,
    pub remaining_slots: u64,
    pub weight_cost: u128,
    pub asset: Address,
    pub creator: Address,
}

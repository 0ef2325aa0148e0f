use soroban_sdk::{contracttype, Address, Env, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct ScholarshipCreatedEvent {
    pub scholarship_id: u64,
    pub creator: Address,
    pub asset: Address,
    pub slot_count: u64,
    pub weight_cost: u128,
}

#[contracttype]
#[derive(Clone)]
pub struct ScholarshipPaidEvent {
    pub scholarship_id: u64,
    pub claimant: Address,
    pub remaining_slots: u64,
    pub weight_spent: u128,
}

pub fn emit_scholarship_created(env: &Env, event: ScholarshipCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "scholarship_created"),), event);
}

pub fn emit_scholarship_paid(env: &Env, event: ScholarshipPaidEvent) {
    env.events()
        .publish((Symbol::new(env, "scholarship_paid"),), event);
}

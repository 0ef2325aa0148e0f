//! At-most-once claim bookkeeping.
//!
//! A claim is identified by `sha256(be64(id) ‖ xdr(claimant))`. Once a key is
//! consumed it stays consumed; there is no path that clears it.

use soroban_sdk::{contracttype, panic_with_error, xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::{storage, Error};

#[contracttype]
#[derive(Clone)]
pub enum ClaimKey {
    Consumed(BytesN<32>),
}

pub fn claim_key(env: &Env, id: u64, claimant: &Address) -> BytesN<32> {
    let mut payload = Bytes::from_array(env, &id.to_be_bytes());
    payload.append(&claimant.clone().to_xdr(env));
    env.crypto().sha256(&payload).to_bytes()
}

pub fn is_consumed(env: &Env, key: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .get(&ClaimKey::Consumed(key.clone()))
        .unwrap_or(false)
}

pub fn ensure_unclaimed(env: &Env, key: &BytesN<32>) {
    if is_consumed(env, key) {
        panic_with_error!(env, Error::AlreadyClaimed);
    }
}

pub fn consume(env: &Env, key: &BytesN<32>) {
    ensure_unclaimed(env, key);
    storage::set_persistent(env, &ClaimKey::Consumed(key.clone()), &true);
}

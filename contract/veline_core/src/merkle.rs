//! Merkle allow-list membership checks.
//!
//! Pairs are hashed in sorted order, `sha256(min(a, b) ‖ max(a, b))`, so a
//! proof is the plain list of sibling hashes from the leaf up to the root
//! with no left/right flags. Off-chain tree builders must use the same rule.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

pub fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let a = a.to_array();
    let b = b.to_array();
    let mut data = [0u8; 64];
    if a < b {
        data[..32].copy_from_slice(&a);
        data[32..].copy_from_slice(&b);
    } else {
        data[..32].copy_from_slice(&b);
        data[32..].copy_from_slice(&a);
    }
    env.crypto().sha256(&Bytes::from_array(env, &data)).to_bytes()
}

/// Leaf committed to by an allow-list entry: `sha256(xdr(claimant) ‖ be64(amount))`.
pub fn leaf_hash(env: &Env, claimant: &Address, amount: u64) -> BytesN<32> {
    let mut payload = claimant.clone().to_xdr(env);
    payload.extend_from_array(&amount.to_be_bytes());
    env.crypto().sha256(&payload).to_bytes()
}

pub fn verify(env: &Env, leaf: &BytesN<32>, proof: &Vec<BytesN<32>>, root: &BytesN<32>) -> bool {
    let mut computed = leaf.clone();
    for node in proof.iter() {
        computed = hash_pair(env, &computed, &node);
    }
    computed == *root
}

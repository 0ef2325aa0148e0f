//! TTL bookkeeping for instance and persistent entries.
//!
//! Keys written by this crate live in the calling contract's storage next to
//! the contract's own keys. A key is encoded from its variant name and
//! fields, so variant names must stay unique across every key enum a single
//! contract stores.

use soroban_sdk::{Env, IntoVal, Val};

use crate::constants::{
    INSTANCE_TTL, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL, PERSISTENT_TTL_THRESHOLD,
};

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL);
}

pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL);
}

/// Writes a persistent entry and keeps it alive for another `PERSISTENT_TTL`.
pub fn set_persistent<K, V>(env: &Env, key: &K, value: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    extend_persistent(env, key);
}

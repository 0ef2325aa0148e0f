use soroban_sdk::{BytesN, Env, Vec};

use crate::merkle::hash_pair;

/// Off-chain style Merkle tree builder using the same sorted-pair rule as
/// [`crate::merkle::verify`]. An unpaired node is promoted to the next layer
/// unchanged.
pub struct MerkleTree {
    env: Env,
    layers: Vec<Vec<BytesN<32>>>,
}

impl MerkleTree {
    pub fn new(env: &Env, leaves: Vec<BytesN<32>>) -> Self {
        assert!(!leaves.is_empty(), "tree needs at least one leaf");
        let mut layers = Vec::new(env);
        let mut layer = leaves;
        while layer.len() > 1 {
            let mut next = Vec::new(env);
            let mut i = 0;
            while i < layer.len() {
                let left = layer.get_unchecked(i);
                if i + 1 < layer.len() {
                    next.push_back(hash_pair(env, &left, &layer.get_unchecked(i + 1)));
                } else {
                    next.push_back(left);
                }
                i += 2;
            }
            layers.push_back(layer);
            layer = next;
        }
        layers.push_back(layer);
        MerkleTree {
            env: env.clone(),
            layers,
        }
    }

    pub fn root(&self) -> BytesN<32> {
        self.layers
            .last_unchecked()
            .get_unchecked(0)
    }

    pub fn proof(&self, index: u32) -> Vec<BytesN<32>> {
        let mut proof = Vec::new(&self.env);
        let mut idx = index;
        for depth in 0..self.layers.len() - 1 {
            let layer = self.layers.get_unchecked(depth);
            let sibling = idx ^ 1;
            if sibling < layer.len() {
                proof.push_back(layer.get_unchecked(sibling));
            }
            idx /= 2;
        }
        proof
    }
}

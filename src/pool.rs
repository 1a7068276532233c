use alloc::vec::Vec;
use wrapping_arithmetic::wrappit;
use super::{SeedError, DEFAULT_POOL_SIZE, SEED_INIT_A, SEED_INIT_B, SEED_MIX_MULT_L, SEED_MIX_MULT_R, SEED_MULT_A, SEED_MULT_B, SEED_XSHIFT};

// The entropy pool follows the seed_seq_fe design by Melissa O'Neill:
// a small array of 32-bit words where every input word is hashed into
// every pool word, so flipping any input bit avalanches across the pool.

/// Multiplicative hash with an evolving constant.
/// Each call perturbs the constant, so equal inputs hash differently by position.
struct HashMix {
    hash_const: u32,
    mult: u32,
}

impl HashMix {
    #[inline]
    fn new(init: u32, mult: u32) -> Self {
        HashMix { hash_const: init, mult }
    }

    #[wrappit] #[inline]
    fn hash(&mut self, value: u32) -> u32 {
        let value = value ^ self.hash_const;
        self.hash_const *= self.mult;
        let value = value * self.hash_const;
        value ^ (value >> SEED_XSHIFT)
    }
}

/// Combines two pool words into one.
#[wrappit] #[inline]
fn mix(x: u32, y: u32) -> u32 {
    let result = SEED_MIX_MULT_L * x - SEED_MIX_MULT_R * y;
    result ^ (result >> SEED_XSHIFT)
}

/// Fixed-size pool of 32-bit words mixed from caller entropy.
/// The pool is a pure function of the entropy words and the pool size.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntropyPool {
    words: Vec<u32>,
}

impl EntropyPool {
    /// Hashes `entropy` into a pool of `pool_size` words.
    /// Pool sizes below `DEFAULT_POOL_SIZE` are rejected.
    pub fn mix(entropy: &[u32], pool_size: usize) -> Result<Self, SeedError> {
        if pool_size < DEFAULT_POOL_SIZE {
            return Err(SeedError::InvalidPoolSize { pool_size, minimum: DEFAULT_POOL_SIZE });
        }
        let mut words = Vec::with_capacity(pool_size);
        let mut hash = HashMix::new(SEED_INIT_A, SEED_MULT_A);

        // Fill the pool with the first words of entropy, hashing zeros past its end.
        for i in 0 .. pool_size {
            words.push(hash.hash(entropy.get(i).copied().unwrap_or(0)));
        }

        // Mix every pool word into every other.
        for src in 0 .. pool_size {
            for dst in 0 .. pool_size {
                if src != dst {
                    words[dst] = mix(words[dst], hash.hash(words[src]));
                }
            }
        }

        // Fold in any entropy that did not fit in the pool.
        for &word in entropy.iter().skip(pool_size) {
            for dst in 0 .. pool_size {
                words[dst] = mix(words[dst], hash.hash(word));
            }
        }

        Ok(EntropyPool { words })
    }

    /// Number of words in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a mixed pool.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the mixed pool words.
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Fills `dest` with output words expanded from the pool.
    /// The pool is cycled as needed and is not modified,
    /// so every call with the same length yields the same words.
    pub fn fill_state(&self, dest: &mut [u32]) {
        let mut hash = HashMix::new(SEED_INIT_B, SEED_MULT_B);
        for (x, &word) in dest.iter_mut().zip(self.words.iter().cycle()) {
            *x = hash.hash(word);
        }
    }

    /// Returns `n` output words expanded from the pool.
    pub fn generate_state(&self, n: usize) -> Vec<u32> {
        let mut state = alloc::vec![0u32; n];
        self.fill_state(&mut state);
        state
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use alloc::vec;

    const ENTROPY: [u32; 4] = [0xb76a074c, 0x23c70376, 0x7710e1d7, 0x56f73ae9];

    #[test] pub fn expands_reference_entropy() {
        let pool = EntropyPool::mix(&ENTROPY, 4).unwrap();
        assert_eq!(4, pool.len());
        assert_eq!(
            pool.generate_state(8),
            vec![0xf431cc88, 0xb5bb44b2, 0xb2e89874, 0xe3977bac, 0x9d0ba2f2, 0xb18b61e2, 0xf72adfa6, 0x2480e33b]
        );
        // Output of a shorter request is a prefix of a longer one.
        assert_eq!(pool.generate_state(3), pool.generate_state(8)[.. 3].to_vec());
        assert_eq!(pool.generate_state(4), pool.generate_state(4));
        assert!(pool.generate_state(0).is_empty());
    }

    #[test] pub fn short_and_long_entropy() {
        let pool = EntropyPool::mix(&[0], 4).unwrap();
        assert_eq!(pool.generate_state(4), vec![0xb0f478be, 0xdb2cd7e7, 0x2c71ba49, 0xabf4641a]);
        let pool = EntropyPool::mix(&[1, 2, 3, 4, 5, 6], 8).unwrap();
        assert_eq!(8, pool.len());
        assert_eq!(pool.generate_state(4), vec![0xf81f1711, 0xaeeb94a7, 0xd538fccf, 0x88ccc9a3]);
    }

    #[test] pub fn rejects_small_pools() {
        assert_eq!(
            EntropyPool::mix(&ENTROPY, 3),
            Err(SeedError::InvalidPoolSize { pool_size: 3, minimum: 4 })
        );
        assert!(EntropyPool::mix(&ENTROPY, 0).is_err());
    }

    #[test] pub fn every_input_word_reaches_every_pool_word() {
        let base = EntropyPool::mix(&[1, 2, 3, 4, 5, 6], 4).unwrap();
        for i in 0 .. 6 {
            let mut entropy = [1, 2, 3, 4, 5, 6];
            entropy[i] ^= 1;
            let flipped = EntropyPool::mix(&entropy, 4).unwrap();
            for (a, b) in base.words().iter().zip(flipped.words().iter()) {
                assert_ne!(a, b);
            }
        }
    }
}

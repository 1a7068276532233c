use alloc::vec::Vec;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use super::{EntropyPool, SeedError, DEFAULT_POOL_SIZE};

/// Everything needed to rebuild a `SeedSequence`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeedSequenceConfig {
    /// Root entropy as 32-bit words.
    pub entropy: Vec<u32>,
    /// Number of words in the entropy pool, at least `DEFAULT_POOL_SIZE`.
    pub pool_size: usize,
    /// Child indices leading from the root to this sequence.
    pub spawn_key: Vec<u32>,
    /// Number of children already spawned; the next child gets this index.
    /// At most 2**32, after which every child index has been handed out.
    pub n_children_spawned: u64,
}

impl Default for SeedSequenceConfig {
    fn default() -> Self {
        SeedSequenceConfig {
            entropy: Vec::new(),
            pool_size: DEFAULT_POOL_SIZE,
            spawn_key: Vec::new(),
            n_children_spawned: 0,
        }
    }
}

/// Deterministic expander of caller entropy into generator seeds.
/// Children derived with `spawn` seed statistically independent streams.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeedSequence {
    entropy: Vec<u32>,
    spawn_key: Vec<u32>,
    pool_size: usize,
    n_children_spawned: u64,
    pool: EntropyPool,
}

/// Entropy is padded with zeros to the pool size before the spawn key is appended,
/// so a short root entropy cannot be confused with a child's key words.
fn assembled_entropy(entropy: &[u32], spawn_key: &[u32], pool_size: usize) -> Vec<u32> {
    let run_size = if !spawn_key.is_empty() && entropy.len() < pool_size { pool_size } else { entropy.len() };
    let mut words = Vec::with_capacity(run_size + spawn_key.len());
    words.extend_from_slice(entropy);
    words.resize(run_size, 0);
    words.extend_from_slice(spawn_key);
    words
}

impl SeedSequence {

    /// Creates a root seed sequence from entropy words.
    pub fn new(entropy: &[u32], pool_size: usize) -> Result<Self, SeedError> {
        Self::from_config(SeedSequenceConfig { entropy: entropy.to_vec(), pool_size, ..Default::default() })
    }

    /// Creates a seed sequence from a full configuration, e.g. one saved with `config`.
    pub fn from_config(config: SeedSequenceConfig) -> Result<Self, SeedError> {
        let SeedSequenceConfig { entropy, pool_size, spawn_key, n_children_spawned } = config;
        if entropy.is_empty() {
            return Err(SeedError::EmptyEntropy);
        }
        let pool = EntropyPool::mix(&assembled_entropy(&entropy, &spawn_key, pool_size), pool_size)?;
        log::trace!("seed sequence: {} entropy words, pool size {}, spawn key {:?}", entropy.len(), pool_size, spawn_key);
        Ok(SeedSequence { entropy, spawn_key, pool_size, n_children_spawned, pool })
    }

    /// Creates a root seed sequence from an integer seed.
    /// The integer is split into 32-bit words, least significant first.
    pub fn from_u128(seed: u128, pool_size: usize) -> Result<Self, SeedError> {
        let mut words = Vec::new();
        let mut x = seed;
        loop {
            words.push(x as u32);
            x >>= 32;
            if x == 0 { break; }
        }
        Self::new(&words, pool_size)
    }

    /// Creates a root seed sequence from signed words, each of which must fit in 32 bits unsigned.
    pub fn from_signed(entropy: &[i64], pool_size: usize) -> Result<Self, SeedError> {
        let words = entropy.iter().enumerate()
            .map(|(index, &value)| u32::try_from(value).map_err(|_| SeedError::InvalidEntropy { index, value }))
            .collect::<Result<Vec<u32>, SeedError>>()?;
        Self::new(&words, pool_size)
    }

    /// Returns the configuration that rebuilds this sequence, including the spawn counter.
    pub fn config(&self) -> SeedSequenceConfig {
        SeedSequenceConfig {
            entropy: self.entropy.clone(),
            pool_size: self.pool_size,
            spawn_key: self.spawn_key.clone(),
            n_children_spawned: self.n_children_spawned,
        }
    }

    #[inline]
    pub fn entropy(&self) -> &[u32] {
        &self.entropy
    }

    /// Path of child indices from the root. Empty for a root sequence.
    #[inline]
    pub fn spawn_key(&self) -> &[u32] {
        &self.spawn_key
    }

    #[inline]
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    #[inline]
    pub fn n_children_spawned(&self) -> u64 {
        self.n_children_spawned
    }

    #[inline]
    pub fn pool(&self) -> &EntropyPool {
        &self.pool
    }

    /// Returns `n` 32-bit words of seed material.
    #[inline]
    pub fn generate_state(&self, n: usize) -> Vec<u32> {
        self.pool.generate_state(n)
    }

    /// Returns `n` 64-bit words of seed material.
    /// Each is built from two consecutive 32-bit words, low word first.
    pub fn generate_state_u64(&self, n: usize) -> Vec<u64> {
        self.pool.generate_state(n * 2)
            .chunks_exact(2)
            .map(|w| (w[0] as u64) | ((w[1] as u64) << 32))
            .collect()
    }

    /// Builds the child with the given index without advancing the spawn counter.
    /// `spawn` hands out the same children in index order.
    pub fn spawn_child(&self, index: u32) -> Result<SeedSequence, SeedError> {
        let mut spawn_key = Vec::with_capacity(self.spawn_key.len() + 1);
        spawn_key.extend_from_slice(&self.spawn_key);
        spawn_key.push(index);
        Self::from_config(SeedSequenceConfig {
            entropy: self.entropy.clone(),
            pool_size: self.pool_size,
            spawn_key,
            n_children_spawned: 0,
        })
    }

    /// Spawns `n` children with fresh indices.
    /// Repeated calls never reuse an index. On error no children are spawned.
    pub fn spawn(&mut self, n: usize) -> Result<Vec<SeedSequence>, SeedError> {
        let first = self.n_children_spawned;
        let end = u64::try_from(n).ok()
            .and_then(|n| first.checked_add(n))
            .filter(|&end| end <= 1 << 32)
            .ok_or(SeedError::ExhaustedChildIndex { spawned: first, requested: n })?;
        // Every index in first..end fits in 32 bits.
        let children = (first .. end).map(|i| self.spawn_child(i as u32)).collect::<Result<Vec<_>, _>>()?;
        log::debug!("spawned children {}..{} of seed sequence {:?}", first, end, self.spawn_key);
        self.n_children_spawned = end;
        Ok(children)
    }
}

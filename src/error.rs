//! Errors raised while building seed sequences and restoring generators.
//!
//! Everything past construction is a total function over fixed-width integers,
//! so these are the only failures the crate reports. A rejected construction
//! never leaves a partially initialized value behind.

use core::fmt;

/// Failure to construct a seed sequence, spawn from it, or restore a generator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedError {
    /// Entropy contained no words at all.
    EmptyEntropy,
    /// An entropy word was negative or did not fit in 32 bits.
    InvalidEntropy {
        /// Position of the offending word in the caller's entropy.
        index: usize,
        /// The rejected value.
        value: i64,
    },
    /// Pool size was below the minimum of the mixing algorithm.
    InvalidPoolSize { pool_size: usize, minimum: usize },
    /// Spawning would push a child index past the 32-bit spawn key range.
    ExhaustedChildIndex { spawned: u64, requested: usize },
    /// A generator state was restored with an even LCG increment.
    EvenIncrement { inc: u128 },
    /// A Xoshiro256++ state was all zero, which it can never leave.
    ZeroState,
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::EmptyEntropy => write!(f, "entropy must contain at least one word"),
            SeedError::InvalidEntropy { index, value } => {
                write!(f, "entropy word {index} is {value}, expected an integer in 0..=4294967295")
            }
            SeedError::InvalidPoolSize { pool_size, minimum } => {
                write!(f, "pool size {pool_size} is smaller than the minimum {minimum}")
            }
            SeedError::ExhaustedChildIndex { spawned, requested } => {
                write!(f, "cannot spawn {requested} more children after {spawned}: child index exceeds 32 bits")
            }
            SeedError::EvenIncrement { inc } => {
                write!(f, "LCG increment {inc:#x} is even")
            }
            SeedError::ZeroState => write!(f, "generator state must not be all zero"),
        }
    }
}

impl core::error::Error for SeedError {}

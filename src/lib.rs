#![no_std]

extern crate alloc;

pub mod error;
pub mod lcg;
pub mod pcg64dxsm;
pub mod pool;
pub mod seed;
pub mod uniform;
pub mod xoshiro;

pub use error::*;
pub use pcg64dxsm::*;
pub use pool::*;
pub use seed::*;
pub use uniform::*;
pub use xoshiro::*;
pub use rand_core::*;

// PCG multipliers from O'Neill, M. E., PCG: A Family of Simple Fast
// Space-Efficient Statistically Good Algorithms for Random Number Generation (2014),
// as used by NumPy's PCG64 and PCG64DXSM bit generators.

/// 128-bit LCG multiplier used while seeding.
pub const PCG_DEFAULT_MULTIPLIER_128: u128 = 0x2360ed051fc65da44385df649fccf645;

/// 64-bit "cheap" multiplier used to advance between outputs and in the DXSM permutation.
pub const PCG_CHEAP_MULTIPLIER_128: u64 = 0xda942042e4dd58b5;

/// Golden ratio scaled to 2**128. PCG64DXSM jumps are multiples of this distance.
pub const PCG_JUMP_STEP_128: u128 = 0x9e3779b97f4a7c15f39cc0605cedc835;

// Seed sequence hash constants from O'Neill's seed_seq_fe design (2015),
// in the form adopted by NumPy's SeedSequence.

/// Minimum and default number of 32-bit words in the entropy pool.
pub const DEFAULT_POOL_SIZE: usize = 4;

pub const SEED_INIT_A: u32 = 0x43b0d7e5;
pub const SEED_MULT_A: u32 = 0x931e8875;
pub const SEED_INIT_B: u32 = 0x8b51f9dd;
pub const SEED_MULT_B: u32 = 0x58f38ded;
pub const SEED_MIX_MULT_L: u32 = 0xca01f9dd;
pub const SEED_MIX_MULT_R: u32 = 0x4973f715;
pub const SEED_XSHIFT: u32 = 16;

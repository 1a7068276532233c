use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use super::{SeedError, SeedSequence, PCG_CHEAP_MULTIPLIER_128, PCG_DEFAULT_MULTIPLIER_128, PCG_JUMP_STEP_128};

// PCG64DXSM features
// -128-bit LCG with a 64-bit "cheap" multiplier
// -DXSM (double xorshift multiply) output permutation on the pre-advance state
// -64-bit output, 256-bit state
// -bit-for-bit compatible with NumPy's PCG64DXSM when seeded from the same SeedSequence

/// Complete generator state, for persisting and resuming a stream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pcg64DxsmState {
    /// LCG state.
    pub state: u128,
    /// LCG increment. Always odd.
    pub inc: u128,
    /// Whether `uinteger` holds the unused high half of the last 64-bit output.
    pub has_uint32: bool,
    /// Buffered 32-bit output.
    pub uinteger: u32,
}

/// PCG64DXSM non-cryptographic RNG. 64-bit output, 256-bit state.
/// Serialized as a `Pcg64DxsmState`; deserializing goes through `restore`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Pcg64DxsmState", into = "Pcg64DxsmState"))]
#[derive(Clone, Eq, PartialEq)]
pub struct Pcg64Dxsm {
    /// LCG state.
    state: u128,
    /// LCG increment.
    inc: u128,
    has_uint32: bool,
    uinteger: u32,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for Pcg64Dxsm {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Pcg64Dxsm {{}}")
    }
}

impl Pcg64Dxsm {

    /// Advances LCG state using the full 128-bit multiplier. Only used while seeding.
    #[wrappit] #[inline]
    fn step_default(&mut self) {
        self.state = self.state * PCG_DEFAULT_MULTIPLIER_128 + self.inc;
    }

    /// Advances to the next state.
    #[wrappit] #[inline]
    pub fn step(&mut self) {
        self.state = self.state * (PCG_CHEAP_MULTIPLIER_128 as u128) + self.inc;
    }

    /// Returns the output for the current state without advancing.
    #[wrappit] #[inline]
    pub fn output(&self) -> u64 {
        let hi = (self.state >> 64) as u64;
        // Forcing the low half odd makes the final multiply invertible.
        let lo = (self.state as u64) | 1;
        let hi = hi ^ (hi >> 32);
        let hi = hi * PCG_CHEAP_MULTIPLIER_128;
        let hi = hi ^ (hi >> 48);
        hi * lo
    }

    /// Generates the next 64-bit random number.
    /// Output is taken from the current state, which is then advanced once.
    #[inline]
    pub fn next(&mut self) -> u64 {
        let x = self.output();
        self.step();
        x
    }

    /// Creates a new PCG64DXSM RNG from an initial state and a stream selector.
    /// The high bit of `init_seq` is discarded when it is shifted into the odd increment.
    #[wrappit]
    pub fn new(init_state: u128, init_seq: u128) -> Self {
        let mut pcg = Pcg64Dxsm { state: 0, inc: (init_seq << 1) | 1, has_uint32: false, uinteger: 0 };
        pcg.step_default();
        pcg.state += init_state;
        pcg.step_default();
        pcg
    }

    /// Creates a new PCG64DXSM RNG seeded with four 64-bit words from the sequence.
    pub fn from_seed_sequence(seq: &SeedSequence) -> Self {
        let words = seq.generate_state_u64(4);
        let init_state = ((words[0] as u128) << 64) | words[1] as u128;
        let init_seq = ((words[2] as u128) << 64) | words[3] as u128;
        log::trace!("seeding PCG64DXSM from seed sequence with spawn key {:?}", seq.spawn_key());
        Self::new(init_state, init_seq)
    }

    /// Jumps forward (or backward, as steps wrap around) by `delta` outputs.
    /// Discards any buffered 32-bit output.
    pub fn advance(&mut self, delta: u128) {
        self.state = crate::lcg::get_state(PCG_CHEAP_MULTIPLIER_128 as u128, self.inc, self.state, delta);
        self.has_uint32 = false;
        self.uinteger = 0;
    }

    /// Returns a copy advanced by `jumps` times (golden ratio * 2**128) steps.
    /// Jumped copies of one generator produce non-overlapping streams in practice.
    pub fn jumped(&self, jumps: u128) -> Self {
        let mut pcg = self.clone();
        pcg.advance(PCG_JUMP_STEP_128.wrapping_mul(jumps));
        pcg
    }

    /// Captures the complete state.
    #[inline]
    pub fn save(&self) -> Pcg64DxsmState {
        Pcg64DxsmState { state: self.state, inc: self.inc, has_uint32: self.has_uint32, uinteger: self.uinteger }
    }

    /// Resumes a generator from a saved state. The increment must be odd.
    pub fn restore(saved: Pcg64DxsmState) -> Result<Self, SeedError> {
        if saved.inc & 1 == 0 {
            return Err(SeedError::EvenIncrement { inc: saved.inc });
        }
        Ok(Pcg64Dxsm { state: saved.state, inc: saved.inc, has_uint32: saved.has_uint32, uinteger: saved.uinteger })
    }
}

impl From<&SeedSequence> for Pcg64Dxsm {
    fn from(seq: &SeedSequence) -> Self {
        Pcg64Dxsm::from_seed_sequence(seq)
    }
}

impl TryFrom<Pcg64DxsmState> for Pcg64Dxsm {
    type Error = SeedError;

    fn try_from(saved: Pcg64DxsmState) -> Result<Self, SeedError> {
        Pcg64Dxsm::restore(saved)
    }
}

impl From<Pcg64Dxsm> for Pcg64DxsmState {
    fn from(pcg: Pcg64Dxsm) -> Self {
        pcg.save()
    }
}

use super::{RngCore, Error, SeedableRng};

impl RngCore for Pcg64Dxsm {
    /// 32-bit outputs come in pairs from one 64-bit output, low half first.
    fn next_u32(&mut self) -> u32 {
        if self.has_uint32 {
            self.has_uint32 = false;
            return self.uinteger;
        }
        let x = self.next();
        self.has_uint32 = true;
        self.uinteger = (x >> 32) as u32;
        x as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next();
            let j = bytes.min(i + 8);
            // Always use Little-Endian.
            dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Pcg64Dxsm {
    type Seed = [u8; 32];

    /// Creates a new PCG64DXSM RNG from a seed.
    /// The first 16 bytes are the initial state and the last 16 the stream selector.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut init_state = [0u8; 16];
        let mut init_seq = [0u8; 16];
        init_state.copy_from_slice(&seed[0 .. 16]);
        init_seq.copy_from_slice(&seed[16 .. 32]);
        // Always use Little-Endian.
        Pcg64Dxsm::new(u128::from_le_bytes(init_state), u128::from_le_bytes(init_seq))
    }
}

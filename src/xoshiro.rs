use super::{RngCore, Error, SeedableRng, SeedError, SeedSequence};
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

// Xoshiro256++ by David Blackman and Sebastiano Vigna,
// Scrambled Linear Pseudorandom Number Generators (2018).
// Seeded from a SeedSequence the same way as PCG64DXSM, with a two-step warmup.

/// Jump polynomial advancing the state by 2**128 steps.
const JUMP: [u64; 4] = [0x180ec6d33cfd0aba, 0xd5a61266f0c9392c, 0xa9582618e03fc9aa, 0x39abdc4529b1661c];

/// Xoshiro256++ non-cryptographic RNG. 64-bit output, 256-bit state.
/// Serialized as its four state words; deserializing goes through `from_state`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[u64; 4]", into = "[u64; 4]"))]
#[derive(Clone, Eq, PartialEq)]
pub struct Xoshiro256PlusPlus {
    s: [u64; 4],
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for Xoshiro256PlusPlus {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Xoshiro256PlusPlus {{}}")
    }
}

impl Xoshiro256PlusPlus {

    /// Advances to the next state.
    #[inline]
    fn step(&mut self) {
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
    }

    /// Returns the current 64-bit output.
    #[inline]
    fn get(&self) -> u64 {
        self.s[0].wrapping_add(self.s[3]).rotate_left(23).wrapping_add(self.s[0])
    }

    /// Generates the next 64-bit random number.
    #[inline]
    pub fn next(&mut self) -> u64 {
        let x = self.get();
        self.step();
        x
    }

    /// Creates a new Xoshiro256++ RNG from raw state words.
    /// An all-zero state is rejected, as the generator would never leave it.
    pub fn from_state(s: [u64; 4]) -> Result<Self, SeedError> {
        if s == [0; 4] {
            return Err(SeedError::ZeroState);
        }
        Ok(Xoshiro256PlusPlus { s })
    }

    /// Seeds from four words, replacing an all-zero state with `seed_from_u64(0)`.
    fn from_words(s: [u64; 4]) -> Self {
        match Self::from_state(s) {
            Ok(xoshiro) => xoshiro,
            Err(_) => Self::seed_from_u64(0),
        }
    }

    /// Four 64-bit seed words from the sequence.
    fn seed_words(seq: &SeedSequence) -> [u64; 4] {
        let words = seq.generate_state_u64(4);
        [words[0], words[1], words[2], words[3]]
    }

    /// Creates a new Xoshiro256++ RNG seeded with four 64-bit words from the sequence.
    pub fn from_seed_sequence(seq: &SeedSequence) -> Self {
        let mut xoshiro = Self::from_words(Self::seed_words(seq));
        xoshiro.step();
        xoshiro.step();
        xoshiro
    }

    /// Returns stream `index` of the sequence.
    /// Stream 0 equals `from_seed_sequence`; other streams are `index` jumps of 2**128 steps apart.
    /// Each jump costs 256 state steps, so building stream `index` takes time linear in `index`:
    /// about a million jumps per second, or over an hour near `u32::MAX`.
    pub fn stream(seq: &SeedSequence, index: u32) -> Self {
        let mut xoshiro = Self::from_words(Self::seed_words(seq));
        if index > 0 {
            xoshiro.step();
            xoshiro.step();
            for _ in 0 .. index {
                xoshiro.jump();
            }
        }
        xoshiro.step();
        xoshiro.step();
        log::trace!("xoshiro256++ stream {} of seed sequence with spawn key {:?}", index, seq.spawn_key());
        xoshiro
    }

    /// Jumps forward by 2**128 steps.
    pub fn jump(&mut self) {
        let mut s = [0u64; 4];
        for &word in JUMP.iter() {
            for bit in 0 .. 64 {
                if word & (1 << bit) != 0 {
                    for (x, y) in s.iter_mut().zip(self.s.iter()) {
                        *x ^= *y;
                    }
                }
                self.step();
            }
        }
        self.s = s;
    }

    /// Returns the raw state words.
    #[inline]
    pub fn state(&self) -> [u64; 4] {
        self.s
    }
}

impl From<&SeedSequence> for Xoshiro256PlusPlus {
    fn from(seq: &SeedSequence) -> Self {
        Xoshiro256PlusPlus::from_seed_sequence(seq)
    }
}

impl TryFrom<[u64; 4]> for Xoshiro256PlusPlus {
    type Error = SeedError;

    fn try_from(s: [u64; 4]) -> Result<Self, SeedError> {
        Xoshiro256PlusPlus::from_state(s)
    }
}

impl From<Xoshiro256PlusPlus> for [u64; 4] {
    fn from(xoshiro: Xoshiro256PlusPlus) -> Self {
        xoshiro.s
    }
}

impl RngCore for Xoshiro256PlusPlus {
    fn next_u32(&mut self) -> u32 {
        // High bits are the strongest.
        (self.next() >> 32) as u32
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

impl SeedableRng for Xoshiro256PlusPlus {
    type Seed = [u8; 32];

    /// Creates a new Xoshiro256++ RNG from a seed.
    /// An all-zero seed, which would stick at zero, is replaced with `seed_from_u64(0)`.
    fn from_seed(seed: Self::Seed) -> Self {
        if seed.iter().all(|&x| x == 0) {
            return Self::seed_from_u64(0);
        }
        let mut s = [0u64; 4];
        for (x, chunk) in s.iter_mut().zip(seed.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            // Always use Little-Endian.
            *x = u64::from_le_bytes(word);
        }
        Xoshiro256PlusPlus { s }
    }
}


#[cfg(all(test, feature = "serde"))] mod serde_tests {
    use super::*;

    #[test] pub fn state_round_trip() {
        let seq = SeedSequence::new(&[7, 8, 9], 4).unwrap();
        let mut xoshiro = Xoshiro256PlusPlus::from_seed_sequence(&seq);
        xoshiro.next_u64();
        let json = serde_json::to_string(&xoshiro).unwrap();
        assert_eq!(json, serde_json::to_string(&xoshiro.state()).unwrap());
        let mut resumed: Xoshiro256PlusPlus = serde_json::from_str(&json).unwrap();
        for _ in 0 .. 100 {
            assert_eq!(xoshiro.next_u64(), resumed.next_u64());
        }
    }

    #[test] pub fn zero_state_is_rejected() {
        assert!(serde_json::from_str::<Xoshiro256PlusPlus>("[0,0,0,0]").is_err());
        assert_eq!([0, 0, 1, 0], serde_json::from_str::<Xoshiro256PlusPlus>("[0,0,1,0]").unwrap().state());
    }
}

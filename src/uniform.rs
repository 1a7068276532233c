use super::RngCore;

/// 2**-53, the spacing of doubles in [0.5, 1).
const UINT53_TO_DOUBLE: f64 = 1.0 / 9007199254740992.0;

/// 2**-24, the spacing of floats in [0.5, 1).
const UINT24_TO_FLOAT: f32 = 1.0 / 16777216.0;

/// Maps a 64-bit word to a double in [0, 1) using its top 53 bits.
/// Every output is a multiple of 2**-53, so the result is exact and never 1.0.
#[inline]
pub fn to_unit_double(raw: u64) -> f64 {
    (raw >> 11) as f64 * UINT53_TO_DOUBLE
}

/// Maps a 32-bit word to a float in [0, 1) using its top 24 bits.
#[inline]
pub fn to_unit_float(raw: u32) -> f32 {
    (raw >> 8) as f32 * UINT24_TO_FLOAT
}

/// Uniform variates drawn from any raw word source.
pub trait Uniform: RngCore {
    /// Returns a double in [0, 1) from one 64-bit output.
    #[inline]
    fn next_unit_double(&mut self) -> f64 {
        to_unit_double(self.next_u64())
    }

    /// Returns a float in [0, 1) from one 32-bit output.
    #[inline]
    fn next_unit_float(&mut self) -> f32 {
        to_unit_float(self.next_u32())
    }

    /// Fills `dest` with doubles in [0, 1), one 64-bit output each, in order.
    fn fill_unit_doubles(&mut self, dest: &mut [f64]) {
        for x in dest.iter_mut() {
            *x = self.next_unit_double();
        }
    }
}

impl<R: RngCore + ?Sized> Uniform for R {}

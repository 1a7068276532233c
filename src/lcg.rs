use wrapping_arithmetic::wrappit;

// Arbitrary-stride jumps for 128-bit LCGs, used to advance PCG state
// without generating the skipped outputs.

/// LCG iteration is state <- state * m + p.
/// Returns state after the specified number of iterations from the origin state.
/// Iterations wrap around modulo 2**128, so this also jumps backward.
#[wrappit]
pub fn get_state(m: u128, p: u128, origin: u128, iterations: u128) -> u128 {
    // Algorithm from Brown, F. B., "Random Number Generation with Arbitrary Stride",
    // Transactions of the American Nuclear Society, 1994.
    let mut jump_m = m;
    let mut jump_p = p;
    let mut state = origin;
    let mut ordinal = iterations;

    while ordinal > 0 {
        if ordinal & 1 == 1 {
            state = state * jump_m + jump_p;
        }
        jump_p = (jump_m + 1) * jump_p;
        jump_m *= jump_m;
        ordinal >>= 1;
    }
    state
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    #[test] pub fn run_tests() {

        let mut r: u128 = 0;
        let mut rnd = || -> u128 { r = r.wrapping_mul(PCG_DEFAULT_MULTIPLIER_128).wrapping_add(0xffff); r };

        for _ in 0 .. 1<<10 {

            let m = match rnd() % 2 { 0 => PCG_DEFAULT_MULTIPLIER_128, _ => PCG_CHEAP_MULTIPLIER_128 as u128 };
            let p = rnd() | 1;
            let origin = rnd();

            assert_eq!(origin, get_state(m, p, origin, 0));
            assert_eq!(origin.wrapping_mul(m).wrapping_add(p), get_state(m, p, origin, 1));

            // Jumps compose.
            let a = rnd();
            let b = rnd();
            assert_eq!(get_state(m, p, origin, a.wrapping_add(b)), get_state(m, p, get_state(m, p, origin, a), b));

            // Jumping back by the full period complement returns to the origin.
            let there = get_state(m, p, origin, a);
            assert_eq!(origin, get_state(m, p, there, a.wrapping_neg()));

            // Short jumps match stepping one at a time.
            let n = rnd() & 0xff;
            let mut state = origin;
            for _ in 0 .. n { state = state.wrapping_mul(m).wrapping_add(p); }
            assert_eq!(state, get_state(m, p, origin, n));
        }
    }
}

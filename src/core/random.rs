/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Derive a non-zero xorshift state for stream `index` of `seed`.
#[inline]
pub fn stream_seed(seed: u32, index: u32) -> u32 {
    let mixed = seed ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9);
    if mixed == 0 { 0x1234_5678 } else { mixed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift_never_sticks_at_zero_for_nonzero_seed() {
        let mut state = stream_seed(12345, 0);
        for _ in 0..1000 {
            assert_ne!(xorshift32(&mut state), 0);
        }
    }

    #[test]
    fn streams_differ() {
        assert_ne!(stream_seed(7, 0), stream_seed(7, 1));
    }
}

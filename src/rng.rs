//! Small xorshift PRNG for game food placement and animation sparks.
//!
//! No distribution quality requirements here; the only consumer is visual
//! randomness, so a 32-bit xorshift is plenty and costs no flash.

/// Xorshift32 generator. State must never be zero.
pub struct Rng(u32);

impl Rng {
    /// Creates a generator from a seed; a zero seed is remapped to a
    /// fixed non-zero constant (xorshift has a zero fixpoint).
    pub const fn new(seed: u32) -> Self {
        Self(if seed == 0 { 0x6C07_8965 } else { seed })
    }

    /// Next raw 32-bit value.
    pub fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    /// Uniform-ish value in `0..max`. `max` must be non-zero.
    pub fn range(&mut self, max: u32) -> u32 {
        self.next() % max
    }

    /// Uniform-ish value in `min..max`.
    pub fn range_between(&mut self, min: u32, max: u32) -> u32 {
        min + self.range(max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next(), 0);
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Rng::new(0xDEAD_BEEF);
        for _ in 0..1000 {
            assert!(rng.range(8) < 8);
            let v = rng.range_between(256, 768);
            assert!((256..768).contains(&v));
        }
    }
}

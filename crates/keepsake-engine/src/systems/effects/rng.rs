//! Deterministic RNG for the effects system.

/// SplitMix64 generator. Any seed, including zero, gives a full-period
/// stream, and the same seed replays the same fireworks.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    pub fn new(seed: u64) -> Self {
        Rng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Integer in `[0, upper_bound)`, or 0 for an empty range.
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        match upper_bound {
            0 => 0,
            n => ((self.next_u64() >> 32) * n as u64 >> 32) as u32,
        }
    }

    /// Float in `[0, 1)` from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

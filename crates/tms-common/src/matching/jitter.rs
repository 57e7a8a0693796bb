use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the small score perturbation applied to every scored carrier.
///
/// Production uses [`RandomJitter`]; tests pin it with [`NoJitter`] or
/// [`FixedJitter`] so the rest of the scoring stays deterministic.
pub trait JitterSource {
    /// Integer in `[low, high]` (inclusive).
    fn next_in_range(&mut self, low: i32, high: i32) -> i32;
}

/// Always zero (or the closest in-range value when zero is out of range).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        clamp_into(0, low, high)
    }
}

/// Returns the same value on every draw, clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub i32);

impl JitterSource for FixedJitter {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        clamp_into(self.0, low, high)
    }
}

/// Uniform draws from a `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JitterSource for RandomJitter {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

fn clamp_into(value: i32, low: i32, high: i32) -> i32 {
    if low > high {
        return low;
    }
    value.clamp(low, high)
}

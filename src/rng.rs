use rand::{Rng, SeedableRng};

/// The engine's only source of randomness. One sequential stream, consumed
/// in the deterministic order dictated by pipeline and processor execution;
/// substituting a scripted source makes a whole turn reproducible.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    fn next_bounded(&mut self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

/// Roll a percentage chance against the random source.
pub fn roll_percent(rng: &mut dyn RandomSource, chance: u8) -> bool {
    rng.next_bounded(100) < chance as u32
}

/// Production source backed by the thread-local generator.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_bounded(&mut self, bound: u32) -> u32 {
        rand::rng().random_range(0..bound)
    }

    fn next_f64(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Seeded source for reproducible battles.
pub struct SeededRandom {
    inner: rand::rngs::StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_bounded(&mut self, bound: u32) -> u32 {
        self.inner.random_range(0..bound)
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

/// Scripted source for tests: every draw is taken from a fixed list of
/// outcomes. `next_bounded` reduces the scripted value modulo the bound, so
/// scripts written as percentages keep working for smaller bounds.
///
/// Panics when the script runs dry; the panic names the draw index so the
/// failing test can be extended.
pub struct ScriptedRandom {
    outcomes: Vec<u32>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(outcomes: Vec<u32>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// A script long enough for a typical turn, with every roll at 50.
    /// Percentage chances above 50 succeed, crits (1 in 16) fail, and the
    /// damage random factor lands mid-range.
    pub fn midline(len: usize) -> Self {
        Self::new(vec![50; len])
    }

    fn next_value(&mut self) -> u32 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRandom exhausted at draw {}; extend the script",
                self.index
            );
        }
        let value = self.outcomes[self.index];
        self.index += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn next_bounded(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "next_bounded called with zero bound");
        self.next_value() % bound
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_value() % 100) as f64 / 100.0
    }
}

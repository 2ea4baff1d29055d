use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::RandomSource;

/// RNG операционной системы: для настоящего розыгрыша.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        thread_rng().gen_range(0..len)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Один и тот же seed даёт одну и ту же последовательность победителей.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }
}

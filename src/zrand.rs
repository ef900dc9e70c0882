use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// AddressPicker chooses which of `n` candidate addresses encodes the next symbol.
///
/// Every index in `[0, n)` must be equally likely: the strength figures assume each
/// candidate address is as probable as any other.
pub trait AddressPicker {
    fn pick(&mut self, n: usize) -> usize;
}

/// RandMode controls random generator behaviour. May be predictable for testing or truly random for encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandMode {
    Predictable,
    RandomUniform,
}

/// ZRand is the default picker.
///
/// Neither mode is cryptographically secure. An attacker who can predict the generator
/// can narrow the keyspace far below what the strength analysis reports.
pub struct ZRand {
    rng: Box<dyn RngCore>,
    rand_mode: RandMode,
}

impl ZRand {
    pub fn new_uniform() -> ZRand {
        ZRand {
            rng: Box::new(rand::thread_rng()),
            rand_mode: RandMode::RandomUniform,
        }
    }

    pub fn new_predictable(seed: u64) -> ZRand {
        ZRand {
            rng: Box::new(StdRng::seed_from_u64(seed)),
            rand_mode: RandMode::Predictable,
        }
    }

    /// Seeded when a seed is given, thread-random otherwise
    pub fn from_seed(seed: Option<u64>) -> ZRand {
        match seed {
            Some(seed) => ZRand::new_predictable(seed),
            None => ZRand::new_uniform(),
        }
    }

    pub fn mode(&self) -> RandMode {
        self.rand_mode
    }
}

impl AddressPicker for ZRand {
    fn pick(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

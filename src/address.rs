use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_mt::Mt;

/// Selects the pseudo-random algorithm used to draw virtual addresses. Only the seeding
/// convention is shared between the two; their sample sequences differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Generator {
    /// 32-bit Mersenne Twister keyed and sampled the same way as CPython's `random` module.
    Mt19937,
    /// The `rand` crate's `StdRng`, seeded with `seed_from_u64`.
    Std,
}

/// The generator state for a single trial.
enum TrialRng {
    Mt19937(Mt),
    Std(StdRng),
}

impl TrialRng {
    fn seeded(generator: Generator, seed: u64) -> Self {
        match generator {
            Generator::Mt19937 => TrialRng::Mt19937(Mt::new_with_key(seed_key(seed))),
            Generator::Std => TrialRng::Std(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw a uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        match self {
            TrialRng::Mt19937(mt) => {
                // 53-bit resolution from two 32-bit outputs
                let a = (mt.next_u32() >> 5) as f64;
                let b = (mt.next_u32() >> 6) as f64;
                (a * 67108864.0 + b) * (1.0 / 9007199254740992.0)
            }
            TrialRng::Std(rng) => rng.gen::<f64>(),
        }
    }
}

/// Split an integer seed into the little-endian 32-bit key words expected by `init_by_array`.
/// A zero seed still produces a single zero word.
fn seed_key(seed: u64) -> Vec<u32> {
    let mut key = vec![seed as u32];
    let high = (seed >> 32) as u32;
    if high != 0 {
        key.push(high);
    }
    key
}

/// `AddressStream` is an endless source of virtual addresses for one trial. Each call to `next`
/// advances the generator by exactly one unit draw, so the address handed out for position `p`
/// depends only on the seed and on `p`.
pub struct AddressStream {
    rng: TrialRng,
    address_space_size: u64,
    pub draws: u64,
}

impl AddressStream {
    /// Create a stream for the trial identified by `seed`.
    ///
    /// # Arguments
    ///
    /// * `generator` - pseudo-random algorithm to draw from.
    /// * `seed` - the trial index; reseeding with the same value replays the same addresses.
    /// * `address_space_size` - exclusive upper bound of every generated address.
    ///
    pub fn seeded(generator: Generator, seed: u64, address_space_size: u64) -> Self {
        Self {
            rng: TrialRng::seeded(generator, seed),
            address_space_size,
            draws: 0,
        }
    }

    /// Draw the next unit sample without scaling it to the address space.
    pub fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        self.rng.next_unit()
    }
}

impl Iterator for AddressStream {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        // truncation toward zero keeps the address strictly below the bound
        Some((self.address_space_size as f64 * self.next_unit()) as u64)
    }
}

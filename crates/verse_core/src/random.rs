use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::domain::VerseRecord;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen::<f64>(),
            Err(poisoned) => poisoned.into_inner().gen::<f64>(),
        }
    }
}

/// `floor(draw * len)`, clamped so out-of-range or NaN draws still land on
/// an element.
pub fn pick_index(len: usize, draw: f64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let scaled = (draw * len as f64).floor();
    // `as` saturates: NaN and negatives become 0.
    Some((scaled as usize).min(len - 1))
}

pub fn pick_random(records: &[VerseRecord], draw: f64) -> Option<&VerseRecord> {
    pick_index(records.len(), draw).map(|index| &records[index])
}

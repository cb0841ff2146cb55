//! Seeded train/held-out partitioning.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

/// Row indices of each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with `seed` and hold out `ceil(n * test_fraction)` rows.
///
/// The same `(n, test_fraction, seed)` always yields the same partition.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Split {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.min(n);
    let train = indices.split_off(n_test);
    debug!(train = train.len(), test = indices.len(), seed, "split rows");
    Split {
        train,
        test: indices,
    }
}

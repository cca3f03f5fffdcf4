//! Random long-only weight vectors on the unit simplex.
//!
//! Each weight is drawn from the open interval (0, 1) and the vector is then
//! divided by its sum. This is not uniform in simplex measure (it favours the
//! centre), but every entry is strictly positive and the entries sum to 1.

use rand::Rng;
use rand::distributions::Open01;

use crate::error::{Error, Result};

/// Population size used when none is configured.
pub const DEFAULT_POPULATION_SIZE: usize = 1000;

/// One weight per asset, index-aligned with the registry.
pub type WeightVector = Vec<f64>;

/// Draw one normalized weight vector of length `n`.
pub fn random_weights<R: Rng + ?Sized>(n: usize, rng: &mut R) -> WeightVector {
    let raw: Vec<f64> = (0..n).map(|_| rng.sample(Open01)).collect();
    normalize(raw)
}

/// Divide by the sum, substituting `1/n` when the sum is unusable.
pub(crate) fn normalize(mut w: Vec<f64>) -> WeightVector {
    if w.is_empty() {
        return w;
    }

    let sum: f64 = w.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        log::warn!("degenerate weight draw (sum={sum}), using equal weights");
        return equal_weights(w.len());
    }

    for x in &mut w {
        *x /= sum;
    }
    w
}

/// The uniform allocation `1/n`.
pub fn equal_weights(n: usize) -> WeightVector {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Draw `count` weight vectors for `n_assets` assets.
pub fn generate_population<R: Rng + ?Sized>(
    n_assets: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<WeightVector>> {
    check_shape(n_assets, count)?;
    Ok((0..count).map(|_| random_weights(n_assets, rng)).collect())
}

/// Draw `count` weight vectors in parallel.
///
/// Candidate `i` is drawn from its own generator seeded with `seed` and `i`,
/// so the output depends only on `seed`, not on the thread count.
#[cfg(feature = "parallel")]
pub fn par_generate_population(
    n_assets: usize,
    count: usize,
    seed: u64,
) -> Result<Vec<WeightVector>> {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rayon::prelude::*;

    check_shape(n_assets, count)?;
    Ok((0..count)
        .into_par_iter()
        .map(|i| {
            let stream = (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let mut rng = StdRng::seed_from_u64(seed ^ stream);
            random_weights(n_assets, &mut rng)
        })
        .collect())
}

fn check_shape(n_assets: usize, count: usize) -> Result<()> {
    if n_assets == 0 {
        return Err(Error::EmptyRegistry);
    }
    if count == 0 {
        return Err(Error::EmptyPopulation);
    }
    Ok(())
}

//! The perturbation seed: one realized distributional shift.

use rand::Rng;

use crate::core::CalibrationError;

/// An immutable handle on one realized random perturbation of a nominal
/// distribution, parameterized by sample size `n` and perturbation
/// strength `delta`.
///
/// The latent perturbation is drawn exactly once at construction and held
/// fixed for the seed's lifetime: a shared random reweighting of the `n`
/// observation slots across `m = max(1, round(n / delta^2))` latent atoms.
/// Fewer atoms (larger `delta`) mean the realized sample moments deviate
/// further from the nominal parameters, and the deviation is common to all
/// draws from the seed. The induced variance of a smooth estimator is
/// `(1 + delta^2)` times its ordinary sampling variance, which is the
/// relationship the calibration layer inverts.
///
/// `delta = 0` is the unperturbed limit: draws are plain iid Gaussian
/// samples.
///
/// # Example
///
/// ```rust,ignore
/// use drcalib::PerturbationSeed;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let seed = PerturbationSeed::new(500, 2.0, &mut rng)?;
/// let x = seed.draw(&mut rng, 0.0, 1.0)?;
/// let z = seed.draw(&mut rng, 10.0, 3.0)?; // same realized shift as x
/// ```
#[derive(Debug, Clone)]
pub struct PerturbationSeed {
    n: usize,
    delta: f64,
    /// Occupancy counts of the `n` slots over the latent atoms; empty in
    /// the `delta = 0` limit. Sums to `n`.
    counts: Vec<usize>,
}

impl PerturbationSeed {
    /// Create a seed for samples of size `n` with perturbation strength
    /// `delta`, drawing the latent perturbation from `rng`.
    ///
    /// Fails with `InvalidArgument` if `n == 0` or `delta` is negative or
    /// non-finite.
    pub fn new<R: Rng + ?Sized>(
        n: usize,
        delta: f64,
        rng: &mut R,
    ) -> Result<Self, CalibrationError> {
        if n == 0 {
            return Err(CalibrationError::InvalidArgument {
                reason: "sample size n must be positive".to_string(),
            });
        }
        if !delta.is_finite() || delta < 0.0 {
            return Err(CalibrationError::InvalidArgument {
                reason: format!("perturbation strength delta must be a non-negative finite number, got {delta}"),
            });
        }

        let counts = if delta == 0.0 {
            Vec::new()
        } else {
            // Pools beyond n * 4096 atoms are almost surely collision-free
            // and therefore indistinguishable from the iid limit.
            let cap = n.saturating_mul(4096);
            let atoms = ((n as f64 / (delta * delta)).round() as usize)
                .max(1)
                .min(cap);
            let mut counts = vec![0usize; atoms];
            for _ in 0..n {
                counts[rng.gen_range(0..atoms)] += 1;
            }
            counts
        };

        Ok(Self { n, delta, counts })
    }

    /// Sample size every draw produces.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Perturbation strength this seed was created with.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of latent atoms behind the realized perturbation (`n` in the
    /// unperturbed limit).
    pub fn atoms(&self) -> usize {
        if self.counts.is_empty() {
            self.n
        } else {
            self.counts.len()
        }
    }

    pub(crate) fn counts(&self) -> &[usize] {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_counts_sum_to_n() {
        let mut rng = StdRng::seed_from_u64(3);
        let seed = PerturbationSeed::new(100, 2.0, &mut rng).unwrap();
        assert_eq!(seed.counts().iter().sum::<usize>(), 100);
        assert_eq!(seed.atoms(), 25);
    }

    #[test]
    fn test_zero_delta_has_no_latent_structure() {
        let mut rng = StdRng::seed_from_u64(3);
        let seed = PerturbationSeed::new(50, 0.0, &mut rng).unwrap();
        assert!(seed.counts().is_empty());
        assert_eq!(seed.atoms(), 50);
    }

    #[test]
    fn test_large_delta_collapses_to_one_atom() {
        let mut rng = StdRng::seed_from_u64(3);
        let seed = PerturbationSeed::new(10, 100.0, &mut rng).unwrap();
        assert_eq!(seed.atoms(), 1);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            PerturbationSeed::new(0, 1.0, &mut rng),
            Err(CalibrationError::InvalidArgument { .. })
        ));
        assert!(matches!(
            PerturbationSeed::new(10, -0.5, &mut rng),
            Err(CalibrationError::InvalidArgument { .. })
        ));
        assert!(matches!(
            PerturbationSeed::new(10, f64::NAN, &mut rng),
            Err(CalibrationError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_clone_shares_realized_perturbation() {
        let mut rng = StdRng::seed_from_u64(9);
        let seed = PerturbationSeed::new(80, 3.0, &mut rng).unwrap();
        let copy = seed.clone();
        assert_eq!(seed.counts(), copy.counts());
    }
}

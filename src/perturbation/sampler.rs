//! Drawing perturbed Gaussian samples against a seed.

use faer::Col;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::core::CalibrationError;
use crate::perturbation::seed::PerturbationSeed;

impl PerturbationSeed {
    /// Draw a length-`n` sample from a nominal `N(mean, sd^2)` whose
    /// realized moments are shifted by this seed's latent perturbation.
    ///
    /// Each call draws fresh Gaussian atoms (ordinary sampling noise) and
    /// replicates them according to the seed's fixed occupancy counts, so
    /// repeated calls share the identical realized perturbation while
    /// remaining independent in their sampling noise. With `delta = 0` the
    /// output is an ordinary iid Gaussian sample.
    ///
    /// Fails with `InvalidArgument` if `sd <= 0` or either parameter is
    /// non-finite. The seed itself is never mutated.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mean: f64,
        sd: f64,
    ) -> Result<Col<f64>, CalibrationError> {
        if !mean.is_finite() {
            return Err(CalibrationError::InvalidArgument {
                reason: format!("nominal mean must be finite, got {mean}"),
            });
        }
        if !sd.is_finite() || sd <= 0.0 {
            return Err(CalibrationError::InvalidArgument {
                reason: format!("nominal sd must be a positive finite number, got {sd}"),
            });
        }

        let dist = Normal::new(mean, sd).map_err(|_| CalibrationError::InvalidArgument {
            reason: format!("invalid Gaussian parameters: mean {mean}, sd {sd}"),
        })?;

        if self.delta() == 0.0 {
            return Ok(Col::from_fn(self.n(), |_| dist.sample(rng)));
        }

        let mut out = Col::zeros(self.n());
        let mut pos = 0;
        for &count in self.counts() {
            if count == 0 {
                continue;
            }
            let atom = dist.sample(rng);
            for _ in 0..count {
                out[pos] = atom;
                pos += 1;
            }
        }
        Ok(out)
    }
}

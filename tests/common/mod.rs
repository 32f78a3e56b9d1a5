//! Common test utilities and perturbed-data generators.

use drcalib::prelude::*;
use rand::rngs::StdRng;

/// Scenario parameters for the model-disagreement simulations.
#[allow(dead_code)]
pub struct DisagreementScenario {
    pub n: usize,
    pub delta: f64,
    pub tau: f64,
    pub gamma: f64,
    pub noise_sd: f64,
    pub n_extras: usize,
}

#[allow(dead_code)]
impl Default for DisagreementScenario {
    fn default() -> Self {
        Self {
            n: 300,
            delta: 3.0,
            tau: 1.0,
            gamma: 1.0,
            noise_sd: 0.5,
            n_extras: 5,
        }
    }
}

/// Generate one jointly perturbed dataset.
///
/// All covariates and the noise are drawn from the same seed, so every
/// variable carries the same realized distributional shift. The response is
/// `y = tau * x1 + gamma * (x2 + ... ) + e`.
#[allow(dead_code)]
pub fn perturbed_dataset(
    scenario: &DisagreementScenario,
    rng: &mut StdRng,
) -> Result<Dataset, CalibrationError> {
    let seed = PerturbationSeed::new(scenario.n, scenario.delta, rng)?;

    let x1 = seed.draw(rng, 0.0, 1.0)?;
    let extras: Vec<_> = (0..scenario.n_extras)
        .map(|_| seed.draw(rng, 0.0, 1.0))
        .collect::<Result<_, _>>()?;
    let noise = seed.draw(rng, 0.0, scenario.noise_sd)?;

    let y: Vec<f64> = (0..scenario.n)
        .map(|i| {
            let extras_sum: f64 = extras.iter().map(|x| x[i]).sum();
            scenario.tau * x1[i] + scenario.gamma * extras_sum + noise[i]
        })
        .collect();

    let mut data = Dataset::new();
    data.push_column("x1", (0..scenario.n).map(|i| x1[i]).collect())?;
    for (j, x) in extras.iter().enumerate() {
        data.push_column(
            format!("x{}", j + 2),
            (0..scenario.n).map(|i| x[i]).collect(),
        )?;
    }
    data.push_column("y", y)?;
    Ok(data)
}

/// Candidate specifications for the disagreement scenario: each omits
/// exactly one of the extra covariates, and all contain the target `x1`.
#[allow(dead_code)]
pub fn leave_one_out_specs(n_extras: usize) -> Vec<ModelSpec> {
    (0..n_extras)
        .map(|omitted| {
            let mut predictors = vec!["x1".to_string()];
            for j in 0..n_extras {
                if j != omitted {
                    predictors.push(format!("x{}", j + 2));
                }
            }
            ModelSpec::new("y", predictors)
        })
        .collect()
}

/// Sample Pearson correlation of two equal-length sequences.
#[allow(dead_code)]
pub fn sample_correlation(x: &faer::Col<f64>, y: &faer::Col<f64>) -> f64 {
    let n = x.nrows();
    let x_mean: f64 = (0..n).map(|i| x[i]).sum::<f64>() / n as f64;
    let y_mean: f64 = (0..n).map(|i| y[i]).sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for i in 0..n {
        let dx = x[i] - x_mean;
        let dy = y[i] - y_mean;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }
    sxy / (sxx * syy).sqrt()
}

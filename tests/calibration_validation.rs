//! Validation of the calibration arithmetic against hand-computed
//! reference values.
//!
//! Mode A reference (k = 3 candidates, points 1.0/1.2/0.9, all SE 0.1):
//!   point     = 31/30
//!   v_between = 7/300, v_within = 1/100
//!   v_excess  = 1/75
//!   delta_hat = sqrt((1/75) / (1/100)) = 2/sqrt(3)
//!   combined  = 1/100 + 1/75 = 7/300,  se = sqrt(7/300)
//!   t         = (31/30) / sqrt(7/300) = 6.7647
//!   p         = 2 * (1 - F_t3(6.7647)) = 0.006607
//!
//! Mode B reference (target 1..5, one auxiliary with sample mean 1.0,
//! population mean 0.8, sample variance 0.1):
//!   ratio     = 0.04 / 0.1 = 0.4
//!   delta^2   = 5 * 0.4 - 1 = 1
//!   excess    = 1 * var(target)/n = 2.5/5 = 0.5
//!   combined  = 0.5 + 0.5 = 1, se = 1
//!   t         = 3,  p = 2 * (1 - F_t1(3)) = 0.204833

mod common;

use approx::assert_relative_eq;
use drcalib::inference::{estimate_from_disagreement, AuxiliaryMoment, Calibrator};
use drcalib::prelude::*;
use faer::Col;

fn synthetic_estimate(point: f64, se: f64) -> CandidateEstimate {
    CandidateEstimate {
        point,
        sampling_se: se,
        spec: ModelSpec::new("y", ["x"]),
        target: "x".to_string(),
        condition: ConditionSeverity::WellConditioned,
    }
}

#[test]
fn test_mode_a_reference_values() {
    let estimates = [
        synthetic_estimate(1.0, 0.1),
        synthetic_estimate(1.2, 0.1),
        synthetic_estimate(0.9, 0.1),
    ];
    let result = Calibrator::new().calibrate_estimates(&estimates).unwrap();

    assert_relative_eq!(result.estimate, 31.0 / 30.0, epsilon = 1e-12);
    assert_relative_eq!(result.std_error, (7.0f64 / 300.0).sqrt(), epsilon = 1e-12);
    assert_relative_eq!(result.delta_hat, 2.0 / 3.0f64.sqrt(), epsilon = 1e-12);
    assert_eq!(result.dof, 3);
    assert_relative_eq!(
        result.t_statistic,
        (31.0 / 30.0) / (7.0f64 / 300.0).sqrt(),
        epsilon = 1e-12
    );
    assert!((result.p_value - 0.006607).abs() < 5e-4);
}

#[test]
fn test_mode_a_strength_only() {
    let estimates = [
        synthetic_estimate(1.0, 0.1),
        synthetic_estimate(1.2, 0.1),
        synthetic_estimate(0.9, 0.1),
    ];
    let strength = estimate_from_disagreement(&estimates).unwrap();
    assert_relative_eq!(strength.excess_variance, 1.0 / 75.0, epsilon = 1e-12);
    assert_eq!(strength.dof, 3);
}

#[test]
fn test_mode_b_reference_values() {
    let target = Col::from_fn(5, |i| (i + 1) as f64);
    let aux = [AuxiliaryMoment::new(
        "z1",
        vec![0.8, 1.2, 1.0, 1.4, 0.6],
        0.8,
    )];
    let result = Calibrator::new().calibrate_with_moments(&target, &aux).unwrap();

    assert_relative_eq!(result.estimate, 3.0, epsilon = 1e-12);
    assert_relative_eq!(result.std_error, 1.0, epsilon = 1e-10);
    assert_relative_eq!(result.delta_hat, 1.0, epsilon = 1e-10);
    assert_relative_eq!(result.t_statistic, 3.0, epsilon = 1e-10);
    assert_eq!(result.dof, 1);
    assert_eq!(result.mode, CalibrationMode::BackgroundMoments);
    // With 1 degree of freedom the t reference is Cauchy:
    // p = 1 - 2*atan(3)/pi.
    assert!((result.p_value - 0.204833).abs() < 1e-4);
}

#[test]
fn test_excess_variance_never_negative() {
    // Tight cluster of points with huge sampling errors: the moment
    // estimate of the excess variance would be negative without the clamp.
    let estimates = [
        synthetic_estimate(1.00, 2.0),
        synthetic_estimate(1.01, 2.0),
        synthetic_estimate(0.99, 2.0),
        synthetic_estimate(1.02, 2.0),
    ];
    let strength = estimate_from_disagreement(&estimates).unwrap();
    assert_eq!(strength.excess_variance, 0.0);
    assert_eq!(strength.delta_hat, 0.0);

    // Calibration then reduces to the plain sampling variance.
    let result = Calibrator::new().calibrate_estimates(&estimates).unwrap();
    assert_relative_eq!(result.std_error, 2.0, epsilon = 1e-12);
}

#[test]
fn test_calibrate_models_end_to_end_deterministic() {
    use common::{leave_one_out_specs, perturbed_dataset, DisagreementScenario};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let scenario = DisagreementScenario {
        n: 200,
        delta: 2.0,
        ..Default::default()
    };
    let specs = leave_one_out_specs(scenario.n_extras);

    let run = || {
        let mut rng = StdRng::seed_from_u64(2024);
        let data = perturbed_dataset(&scenario, &mut rng).unwrap();
        calibrate_models(&specs, &data, "x1").unwrap()
    };

    let a = run();
    let b = run();

    assert_eq!(a.estimate, b.estimate);
    assert_eq!(a.std_error, b.std_error);
    assert_eq!(a.p_value, b.p_value);
    assert_eq!(a.delta_hat, b.delta_hat);
    assert_eq!(a.dof, specs.len());
    assert_eq!(a.mode, CalibrationMode::ModelDisagreement);
    assert!(a.std_error > 0.0);
}

#[test]
fn test_confidence_level_controls_interval_width() {
    let estimates = [
        synthetic_estimate(1.0, 0.1),
        synthetic_estimate(1.3, 0.1),
        synthetic_estimate(0.8, 0.1),
    ];

    let narrow = Calibrator::builder()
        .confidence_level(0.8)
        .build()
        .calibrate_estimates(&estimates)
        .unwrap();
    let wide = Calibrator::builder()
        .confidence_level(0.99)
        .build()
        .calibrate_estimates(&estimates)
        .unwrap();

    let narrow_width = narrow.conf_interval.1 - narrow.conf_interval.0;
    let wide_width = wide.conf_interval.1 - wide.conf_interval.0;
    assert!(narrow_width < wide_width);
}

//! End-to-end prediction through the bundled model artifacts.

use std::path::{Path, PathBuf};

use medinsure::app::pipeline::run_estimate;
use medinsure::domain::{Profile, Region, Sex, Smoker};
use medinsure::error::PredictError;
use medinsure::service::PredictionService;
use proptest::prelude::*;

fn artifact(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("models").join(name)
}

fn gbt() -> PredictionService {
    let svc = PredictionService::load(&artifact("insurance_gbt.json"));
    assert!(svc.is_ready(), "{svc:?}");
    svc
}

fn linear() -> PredictionService {
    let svc = PredictionService::load(&artifact("insurance_linear.json"));
    assert!(svc.is_ready(), "{svc:?}");
    svc
}

fn baseline() -> Profile {
    Profile {
        age: 30,
        sex: Sex::Male,
        bmi: 25.0,
        dependents: 0,
        smoker: Smoker::No,
        region: Region::Southwest,
    }
}

#[test]
fn smokers_cost_materially_more() {
    for svc in [gbt(), linear()] {
        let non = svc.predict(&baseline()).unwrap().annual_cost;
        let smoker = svc
            .predict(&Profile {
                smoker: Smoker::Yes,
                ..baseline()
            })
            .unwrap()
            .annual_cost;
        assert!(smoker > non + 5000.0, "smoker={smoker} non-smoker={non}");
    }
}

#[test]
fn bundled_gbt_baseline_value() {
    // 1500 base + 4200 (non-smoker, <42.5) + 350 (age 30..55) - 200 (no children)
    // + 120 (not southeast) + 110 (male)
    assert_eq!(gbt().predict(&baseline()).unwrap().annual_cost, 6080.0);
}

#[test]
fn boundary_profiles_are_accepted() {
    let svc = gbt();
    let cases = [
        Profile { age: 18, ..baseline() },
        Profile { age: 100, ..baseline() },
        Profile { bmi: 15.0, ..baseline() },
        Profile { bmi: 40.0, ..baseline() },
        Profile { dependents: 0, ..baseline() },
        Profile { dependents: 5, ..baseline() },
    ];
    for p in cases {
        assert!(svc.predict(&p).is_ok(), "{p:?}");
    }
}

#[test]
fn out_of_domain_profiles_are_invalid_input() {
    let svc = gbt();
    let cases = [
        Profile { age: 17, ..baseline() },
        Profile { bmi: 14.9, ..baseline() },
        Profile { dependents: 6, ..baseline() },
    ];
    for p in cases {
        assert!(
            matches!(svc.predict(&p), Err(PredictError::InvalidInput { .. })),
            "{p:?}"
        );
    }
}

#[test]
fn missing_artifact_makes_every_call_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let svc = PredictionService::load(&dir.path().join("absent.json"));
    for _ in 0..3 {
        assert!(matches!(
            svc.predict(&baseline()),
            Err(PredictError::ModelUnavailable(_))
        ));
    }
}

#[test]
fn corrupt_artifact_makes_every_call_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.json");
    std::fs::write(&path, b"\x00\x01 not json").unwrap();
    let svc = PredictionService::load(&path);
    assert!(matches!(
        svc.predict(&baseline()),
        Err(PredictError::ModelUnavailable(_))
    ));
    assert!(matches!(svc.model_info(), Err(PredictError::ModelUnavailable(_))));
}

#[test]
fn artifact_trained_on_other_columns_fails_at_inference() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swapped.json");
    let json = std::fs::read_to_string(artifact("insurance_linear.json"))
        .unwrap()
        .replace("\"bmi\",\n    \"children\"", "\"children\",\n    \"bmi\"");
    std::fs::write(&path, json).unwrap();

    let svc = PredictionService::load(&path);
    assert!(svc.is_ready());
    assert!(matches!(
        svc.predict(&baseline()),
        Err(PredictError::InferenceError(_))
    ));
}

#[test]
fn estimate_includes_illustrative_breakdown_on_request() {
    let estimate = run_estimate(&gbt(), &baseline(), true).unwrap();
    let breakdown = estimate.breakdown.unwrap();
    assert!(breakdown.illustrative);
    assert_eq!(breakdown.factors.len(), 6);

    let without = run_estimate(&gbt(), &baseline(), false).unwrap();
    assert!(without.breakdown.is_none());
    assert_eq!(without.prediction, estimate.prediction);
}

fn any_profile() -> impl Strategy<Value = Profile> {
    (
        18u32..=100,
        any::<bool>(),
        150u32..=400,
        0u32..=5,
        any::<bool>(),
        0usize..4,
    )
        .prop_map(|(age, male, bmi_tenths, dependents, smokes, region)| Profile {
            age,
            sex: if male { Sex::Male } else { Sex::Female },
            bmi: f64::from(bmi_tenths) / 10.0,
            dependents,
            smoker: if smokes { Smoker::Yes } else { Smoker::No },
            region: Region::ALL[region],
        })
}

proptest! {
    #[test]
    fn valid_profiles_give_finite_non_negative_costs(p in any_profile()) {
        for svc in [gbt(), linear()] {
            let cost = svc.predict(&p).unwrap().annual_cost;
            prop_assert!(cost.is_finite());
            prop_assert!(cost >= 0.0);
        }
    }

    #[test]
    fn prediction_is_deterministic(p in any_profile()) {
        let svc = gbt();
        let first = svc.predict(&p).unwrap();
        let second = svc.predict(&p).unwrap();
        prop_assert_eq!(first, second);
    }
}

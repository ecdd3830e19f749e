//! The prediction service: validated access to a trained model.
//!
//! A service is built once at startup and then only read. It either holds a
//! model or the reason the model could not be loaded; in the latter case every
//! `predict` call reports `ModelUnavailable` instead of failing the process.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{PredictionResult, Profile};
use crate::error::PredictError;
use crate::features::FeatureRecord;
use crate::models::{ModelInfo, Regressor, load_model};

#[derive(Clone)]
enum ModelState {
    Ready(Arc<dyn Regressor>),
    Unavailable(String),
}

#[derive(Clone)]
pub struct PredictionService {
    state: ModelState,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            ModelState::Ready(m) => format!("ready({})", m.describe().name),
            ModelState::Unavailable(reason) => format!("unavailable({reason})"),
        };
        f.debug_struct("PredictionService")
            .field("model", &state)
            .finish()
    }
}

impl PredictionService {
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self {
            state: ModelState::Ready(model),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable(reason.into()),
        }
    }

    /// Load the artifact at `path`, keeping the failure if there is one.
    pub fn load(path: &Path) -> Self {
        match load_model(path) {
            Ok(model) => {
                tracing::info!(path = %path.display(), model = model.name(), "model loaded");
                Self::new(Arc::new(model))
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "model failed to load");
                let reason = match err {
                    PredictError::ModelUnavailable(reason) => reason,
                    other => other.to_string(),
                };
                Self::unavailable(reason)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn model_info(&self) -> Result<ModelInfo, PredictError> {
        Ok(self.model()?.describe())
    }

    fn model(&self) -> Result<&Arc<dyn Regressor>, PredictError> {
        match &self.state {
            ModelState::Ready(m) => Ok(m),
            ModelState::Unavailable(reason) => Err(PredictError::ModelUnavailable(reason.clone())),
        }
    }

    /// Estimate the annual cost for `profile`.
    pub fn predict(&self, profile: &Profile) -> Result<PredictionResult, PredictError> {
        let record = FeatureRecord::from_profile(profile)?;
        let model = self.model()?;

        let row = record.encode();
        let expected = model.feature_names();
        if expected.len() != row.names().len()
            || expected.iter().zip(row.names()).any(|(a, b)| a.as_str() != *b)
        {
            return Err(PredictError::InferenceError(format!(
                "model expects columns [{}], record has [{}]",
                expected.join(", "),
                row.names().join(", ")
            )));
        }

        let raw = model.infer(row.values())?;
        if !raw.is_finite() {
            return Err(PredictError::InferenceError(format!(
                "model returned a non-finite value ({raw})"
            )));
        }
        if raw < 0.0 {
            tracing::debug!(raw, "negative model output floored to zero");
        }
        let annual_cost = raw.max(0.0);
        tracing::debug!(record = ?record.columns(), annual_cost, "prediction");

        Ok(PredictionResult { annual_cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Smoker;
    use crate::features::ENCODED_COLUMNS;

    struct Fixed {
        features: Vec<String>,
        output: Result<f64, PredictError>,
    }

    impl Fixed {
        fn new(output: Result<f64, PredictError>) -> Self {
            Self {
                features: ENCODED_COLUMNS.iter().map(|s| s.to_string()).collect(),
                output,
            }
        }
    }

    impl Regressor for Fixed {
        fn feature_names(&self) -> &[String] {
            &self.features
        }

        fn infer(&self, _row: &[f64]) -> Result<f64, PredictError> {
            self.output.clone()
        }

        fn describe(&self) -> ModelInfo {
            ModelInfo {
                name: "fixed".to_string(),
                kind: "test",
                features: self.features.clone(),
                detail: String::new(),
            }
        }
    }

    #[test]
    fn invalid_input_never_reaches_the_model() {
        let svc = PredictionService::new(Arc::new(Fixed::new(Err(
            PredictError::InferenceError("should not be called".into()),
        ))));
        let p = Profile {
            age: 17,
            ..Profile::default()
        };
        assert!(matches!(
            svc.predict(&p),
            Err(PredictError::InvalidInput { field: "age", .. })
        ));
    }

    #[test]
    fn unavailable_service_fails_every_call() {
        let svc = PredictionService::unavailable("artifact missing");
        for smoker in Smoker::ALL {
            let p = Profile {
                smoker,
                ..Profile::default()
            };
            assert_eq!(
                svc.predict(&p),
                Err(PredictError::ModelUnavailable("artifact missing".into()))
            );
        }
        assert!(!svc.is_ready());
    }

    #[test]
    fn model_failure_is_inference_error() {
        let svc = PredictionService::new(Arc::new(Fixed::new(Err(
            PredictError::InferenceError("boom".into()),
        ))));
        assert_eq!(
            svc.predict(&Profile::default()),
            Err(PredictError::InferenceError("boom".into()))
        );
    }

    #[test]
    fn non_finite_output_is_inference_error() {
        let svc = PredictionService::new(Arc::new(Fixed::new(Ok(f64::NAN))));
        assert!(matches!(
            svc.predict(&Profile::default()),
            Err(PredictError::InferenceError(_))
        ));
    }

    #[test]
    fn negative_output_is_floored() {
        let svc = PredictionService::new(Arc::new(Fixed::new(Ok(-250.0))));
        assert_eq!(svc.predict(&Profile::default()).unwrap().annual_cost, 0.0);
    }

    #[test]
    fn column_mismatch_is_inference_error() {
        let mut model = Fixed::new(Ok(1.0));
        model.features.swap(2, 3);
        let svc = PredictionService::new(Arc::new(model));
        match svc.predict(&Profile::default()) {
            Err(PredictError::InferenceError(msg)) => assert!(msg.contains("children, bmi"), "{msg}"),
            other => panic!("expected InferenceError, got {other:?}"),
        }
    }
}

//! Linear regression over the encoded row.
//!
//! `y = intercept + Σ coefficient_i * x_i`

use nalgebra::DVector;

use crate::error::PredictError;

#[derive(Debug, Clone)]
pub struct LinearModel {
    intercept: f64,
    coefficients: DVector<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: &[f64]) -> Result<Self, String> {
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err("linear model has non-finite parameters".to_string());
        }
        Ok(Self {
            intercept,
            coefficients: DVector::from_row_slice(coefficients),
        })
    }

    pub fn n_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64, PredictError> {
        if row.len() != self.coefficients.len() {
            return Err(PredictError::InferenceError(format!(
                "linear model expects {} features, got {}",
                self.coefficients.len(),
                row.len()
            )));
        }
        let x = DVector::from_row_slice(row);
        Ok(self.intercept + self.coefficients.dot(&x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicts_affine_combination() {
        let m = LinearModel::new(2.0, &[3.0, -1.0]).unwrap();
        let y = m.predict(&[1.0, 4.0]).unwrap();
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_width_is_an_inference_error() {
        let m = LinearModel::new(0.0, &[1.0, 1.0]).unwrap();
        assert!(matches!(
            m.predict(&[1.0]),
            Err(PredictError::InferenceError(_))
        ));
    }

    #[test]
    fn rejects_non_finite_parameters() {
        assert!(LinearModel::new(f64::NAN, &[1.0]).is_err());
        assert!(LinearModel::new(0.0, &[f64::INFINITY]).is_err());
    }
}

use super::{CategoricalField, PredictionRequest, features};
use crate::{
    Error, Result,
    artifacts::{Artifacts, CategoricalEncoders, Regressor, StandardScaler},
};
use tracing::debug;
use validator::Validate;

/// Applies the encode → scale → predict pipeline to one request at a time.
pub struct HousePricePredictor {
    regressor: Box<dyn Regressor>,
    scaler: StandardScaler,
    encoders: CategoricalEncoders,
}

impl HousePricePredictor {
    pub fn new(
        regressor: Box<dyn Regressor>,
        scaler: StandardScaler,
        encoders: CategoricalEncoders,
    ) -> Self {
        Self {
            regressor,
            scaler,
            encoders,
        }
    }

    pub fn from_artifacts(artifacts: Artifacts) -> Self {
        Self::new(artifacts.regressor, artifacts.scaler, artifacts.encoders)
    }

    pub fn predict(&self, request: &PredictionRequest) -> Result<f64> {
        request.validate()?;

        let encoded = features::encode(request, &self.encoders)?;
        for field in &encoded.fallbacks {
            debug!(
                "Unknown {} value '{}', using default category",
                field,
                field.value(request)
            );
        }

        let scaled = self.scaler.transform(&encoded.values)?;
        let price = self.regressor.predict(&scaled)?;

        if !price.is_finite() {
            return Err(Error::prediction(format!(
                "model returned a non-finite value: {}",
                price
            )));
        }
        Ok(price)
    }

    /// Known values of a categorical field, ascending.
    pub fn known_values(&self, field: CategoricalField) -> Result<Vec<String>> {
        let encoder = self.encoders.get(field)?;
        let mut values = encoder.classes().to_vec();
        values.sort();
        values.dedup();
        Ok(values)
    }

    pub fn cities(&self) -> Result<Vec<String>> {
        self.known_values(CategoricalField::City)
    }

    pub fn furnishing_options(&self) -> Result<Vec<String>> {
        self.known_values(CategoricalField::Furnishingstatus)
    }
}

pub mod features;
mod predictor;
mod types;

pub use features::{
    CategoricalField, EncodedFeatures, FEATURE_COUNT, FEATURE_NAMES, REFERENCE_YEAR,
};
pub use predictor::HousePricePredictor;
pub use types::PredictionRequest;

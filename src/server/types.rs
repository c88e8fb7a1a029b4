use crate::house::PredictionRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub features_used: PredictionRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

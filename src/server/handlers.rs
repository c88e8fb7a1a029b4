use super::types::{ErrorResponse, PredictionResponse};
use crate::{
    Error,
    house::{HousePricePredictor, PredictionRequest},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<HousePricePredictor>,
}

impl AppState {
    pub fn new(predictor: HousePricePredictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, detail: String) -> ApiError {
    (status, Json(ErrorResponse { detail }))
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected prediction request body: {}", rejection.body_text());
        api_error(
            StatusCode::BAD_REQUEST,
            Error::InvalidBody(rejection.body_text()).to_string(),
        )
    })?;

    info!(
        "Received prediction request for {} sq ft in {}",
        request.area, request.city
    );

    match state.predictor.predict(&request) {
        Ok(predicted_price) => {
            info!("Predicted price: {:.2}", predicted_price);
            Ok(Json(PredictionResponse {
                predicted_price,
                features_used: request,
            }))
        }
        Err(e @ Error::Validation(_)) => {
            warn!("Prediction request failed validation: {}", e);
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            warn!("Prediction failed: {}", e);
            Err(api_error(
                StatusCode::BAD_REQUEST,
                format!("Prediction error: {}", e),
            ))
        }
    }
}

pub async fn cities(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    state.predictor.cities().map(Json).map_err(|e| {
        error!("Failed to list cities: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error retrieving cities: {}", e),
        )
    })
}

pub async fn furnishing_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    state.predictor.furnishing_options().map(Json).map_err(|e| {
        error!("Failed to list furnishing options: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error retrieving options: {}", e),
        )
    })
}

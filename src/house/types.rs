use serde::{Deserialize, Serialize};
use validator::Validate;

/// One property to price. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictionRequest {
    /// Area in square feet.
    #[validate(range(min = 1, message = "area must be greater than 0"))]
    pub area: i64,
    #[validate(range(min = 1, message = "bedrooms must be greater than 0"))]
    pub bedrooms: i64,
    #[validate(range(min = 1, message = "bathrooms must be greater than 0"))]
    pub bathrooms: i64,
    #[validate(range(min = 1, message = "stories must be greater than 0"))]
    pub stories: i64,
    /// Main road access (yes/no).
    pub mainroad: String,
    pub guestroom: String,
    pub basement: String,
    pub hotwaterheating: String,
    pub airconditioning: String,
    #[validate(range(min = 0, message = "parking must not be negative"))]
    pub parking: i64,
    /// furnished, semi-furnished or unfurnished.
    pub furnishingstatus: String,
    pub city: String,
    #[validate(range(
        exclusive_min = 1800,
        exclusive_max = 2025,
        message = "year_built must be after 1800 and before 2025"
    ))]
    pub year_built: i64,
}

#[cfg(test)]
pub(crate) fn sample_request() -> PredictionRequest {
    PredictionRequest {
        area: 7420,
        bedrooms: 4,
        bathrooms: 2,
        stories: 3,
        mainroad: "yes".to_string(),
        guestroom: "no".to_string(),
        basement: "no".to_string(),
        hotwaterheating: "no".to_string(),
        airconditioning: "yes".to_string(),
        parking: 2,
        furnishingstatus: "furnished".to_string(),
        city: "Seattle".to_string(),
        year_built: 2014,
    }
}

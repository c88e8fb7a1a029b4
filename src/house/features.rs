use super::PredictionRequest;
use crate::{Error, Result, artifacts::CategoricalEncoders};
use std::{fmt, str::FromStr};

/// Year the `age` feature is measured against.
pub const REFERENCE_YEAR: i64 = 2025;

/// Column order the scaler and model were fitted on.
pub const FEATURE_NAMES: [&str; 14] = [
    "area",
    "bedrooms",
    "bathrooms",
    "stories",
    "mainroad",
    "guestroom",
    "basement",
    "hotwaterheating",
    "airconditioning",
    "parking",
    "furnishingstatus",
    "city",
    "age",
    "renovated",
];

pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoricalField {
    Mainroad,
    Guestroom,
    Basement,
    Hotwaterheating,
    Airconditioning,
    Furnishingstatus,
    City,
}

impl CategoricalField {
    pub const ALL: [Self; 7] = [
        Self::Mainroad,
        Self::Guestroom,
        Self::Basement,
        Self::Hotwaterheating,
        Self::Airconditioning,
        Self::Furnishingstatus,
        Self::City,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainroad => "mainroad",
            Self::Guestroom => "guestroom",
            Self::Basement => "basement",
            Self::Hotwaterheating => "hotwaterheating",
            Self::Airconditioning => "airconditioning",
            Self::Furnishingstatus => "furnishingstatus",
            Self::City => "city",
        }
    }

    pub fn value<'a>(&self, request: &'a PredictionRequest) -> &'a str {
        match self {
            Self::Mainroad => &request.mainroad,
            Self::Guestroom => &request.guestroom,
            Self::Basement => &request.basement,
            Self::Hotwaterheating => &request.hotwaterheating,
            Self::Airconditioning => &request.airconditioning,
            Self::Furnishingstatus => &request.furnishingstatus,
            Self::City => &request.city,
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoricalField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::EncoderNotFound {
                field: s.to_string(),
            })
    }
}

/// Unscaled model input for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatures {
    pub values: Vec<f64>,
    /// Fields whose value was unknown to the encoder and replaced by its first class.
    pub fallbacks: Vec<CategoricalField>,
}

pub fn encode(
    request: &PredictionRequest,
    encoders: &CategoricalEncoders,
) -> Result<EncodedFeatures> {
    let mut fallbacks = Vec::new();
    let mut encode_field = |field: CategoricalField| -> Result<f64> {
        let (code, fell_back) = encoders
            .get(field)?
            .transform_or_default(field.value(request));
        if fell_back {
            fallbacks.push(field);
        }
        Ok(code as f64)
    };

    let values = vec![
        request.area as f64,
        request.bedrooms as f64,
        request.bathrooms as f64,
        request.stories as f64,
        encode_field(CategoricalField::Mainroad)?,
        encode_field(CategoricalField::Guestroom)?,
        encode_field(CategoricalField::Basement)?,
        encode_field(CategoricalField::Hotwaterheating)?,
        encode_field(CategoricalField::Airconditioning)?,
        request.parking as f64,
        encode_field(CategoricalField::Furnishingstatus)?,
        encode_field(CategoricalField::City)?,
        (REFERENCE_YEAR - request.year_built) as f64,
        // renovated
        0.0,
    ];
    debug_assert_eq!(values.len(), FEATURE_COUNT);

    Ok(EncodedFeatures { values, fallbacks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house::types::sample_request;
    use pretty_assertions::assert_eq;

    const ENCODERS_JSON: &str = r#"{
        "mainroad": ["no", "yes"],
        "guestroom": ["no", "yes"],
        "basement": ["no", "yes"],
        "hotwaterheating": ["no", "yes"],
        "airconditioning": ["no", "yes"],
        "furnishingstatus": ["furnished", "semi-furnished", "unfurnished"],
        "city": ["Austin", "Boston", "Chicago", "Seattle"]
    }"#;

    fn encoders() -> CategoricalEncoders {
        CategoricalEncoders::from_json(ENCODERS_JSON).unwrap()
    }

    #[test]
    fn test_encode_sample_request() {
        let features = encode(&sample_request(), &encoders()).unwrap();
        assert_eq!(
            features.values,
            vec![
                7420.0, 4.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 3.0, 11.0, 0.0
            ]
        );
        assert!(features.fallbacks.is_empty());
    }

    #[test]
    fn test_encode_unknown_values_use_first_class() {
        let mut request = sample_request();
        request.city = "Atlantis".to_string();
        request.furnishingstatus = "partly".to_string();

        let features = encode(&request, &encoders()).unwrap();
        assert_eq!(features.values[10], 0.0);
        assert_eq!(features.values[11], 0.0);
        assert_eq!(
            features.fallbacks,
            vec![CategoricalField::Furnishingstatus, CategoricalField::City]
        );
    }

    #[test]
    fn test_encode_derives_age() {
        let mut request = sample_request();
        request.year_built = 1801;
        let features = encode(&request, &encoders()).unwrap();
        assert_eq!(features.values[12], 224.0);
    }

    #[test]
    fn test_encode_missing_encoder() {
        let err = encode(&sample_request(), &CategoricalEncoders::default()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown encoder field: mainroad");
    }

    #[test]
    fn test_field_names_round_trip_through_layout() {
        for field in CategoricalField::ALL {
            assert!(FEATURE_NAMES.contains(&field.as_str()));
            assert_eq!(field.as_str().parse::<CategoricalField>().unwrap(), field);
        }
        assert!("zipcode".parse::<CategoricalField>().is_err());
    }
}

use crate::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

/// Standardizes a feature vector: `(x - mean) / scale`, column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.is_empty() {
            return Err(Error::artifact("scaler has no features"));
        }
        if mean.len() != scale.len() {
            return Err(Error::artifact(format!(
                "scaler mean has {} values but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        if let Some(i) = mean.iter().chain(&scale).position(|v| !v.is_finite()) {
            return Err(Error::artifact(format!(
                "scaler contains a non-finite value at position {}",
                i
            )));
        }

        // Constant columns are stored with a zero scale; they pass through unscaled.
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self {
            mean,
            scale,
            feature_names: None,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ScalerArtifact = serde_json::from_str(json)?;
        let mut scaler = Self::new(artifact.mean, artifact.scale)?;

        if let Some(names) = artifact.feature_names {
            if names.len() != scaler.n_features() {
                return Err(Error::artifact(format!(
                    "scaler lists {} feature names for {} features",
                    names.len(),
                    scaler.n_features()
                )));
            }
            scaler.feature_names = Some(names);
        }

        Ok(scaler)
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features() {
            return Err(Error::FeatureMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transform_standardizes_each_column() {
        let scaler = StandardScaler::new(vec![10.0, 2.0], vec![5.0, 0.5]).unwrap();
        let scaled = scaler.transform(&[20.0, 1.0]).unwrap();
        assert_eq!(scaled, vec![2.0, -2.0]);
    }

    #[test]
    fn test_zero_scale_passes_column_through() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]).unwrap();
        let scaled = scaler.transform(&[3.0, 4.0]).unwrap();
        assert_eq!(scaled, vec![3.0, 4.0]);
    }

    #[test]
    fn test_transform_rejects_wrong_length() {
        let scaler = StandardScaler::new(vec![0.0; 3], vec![1.0; 3]).unwrap();
        let err = scaler.transform(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Feature count mismatch: expected 3, got 2"
        );
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0; 2]).is_err());
        assert!(StandardScaler::new(Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn test_new_rejects_non_finite_values() {
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_from_json_keeps_feature_names() {
        let json = r#"{"mean": [1.0, 2.0], "scale": [1.0, 1.0], "feature_names": ["a", "b"]}"#;
        let scaler = StandardScaler::from_json(json).unwrap();
        assert_eq!(
            scaler.feature_names(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_from_json_rejects_feature_name_count() {
        let json = r#"{"mean": [1.0, 2.0], "scale": [1.0, 1.0], "feature_names": ["a"]}"#;
        assert!(StandardScaler::from_json(json).is_err());
    }
}

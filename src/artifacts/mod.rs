mod encoder;
mod regressor;
mod scaler;

pub use encoder::{CategoricalEncoders, LabelEncoder};
pub use regressor::{
    Aggregation, LinearRegressor, ModelArtifact, RegressionTree, Regressor, TreeEnsemble,
    TreeNode, from_json as regressor_from_json,
};
pub use scaler::StandardScaler;

#[cfg(test)]
pub use regressor::MockRegressor;

use crate::{
    Error, Result,
    config::ArtifactsConfig,
    house::{FEATURE_COUNT, FEATURE_NAMES},
};
use std::path::Path;
use tracing::{debug, info};

/// The three trained objects the predictor needs, loaded once at startup.
pub struct Artifacts {
    pub regressor: Box<dyn Regressor>,
    pub scaler: StandardScaler,
    pub encoders: CategoricalEncoders,
}

impl Artifacts {
    /// Checks that the artifacts agree with each other and with the feature layout.
    pub fn validate(&self) -> Result<()> {
        self.encoders.ensure_complete()?;

        if self.scaler.n_features() != FEATURE_COUNT {
            return Err(Error::artifact(format!(
                "scaler expects {} features, the feature layout has {}",
                self.scaler.n_features(),
                FEATURE_COUNT
            )));
        }
        if let Some(names) = self.scaler.feature_names() {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(Error::artifact(format!(
                    "scaler feature names [{}] do not match the feature layout [{}]",
                    names.join(", "),
                    FEATURE_NAMES.join(", ")
                )));
            }
        }
        if self.regressor.n_features() != FEATURE_COUNT {
            return Err(Error::artifact(format!(
                "model expects {} features, the feature layout has {}",
                self.regressor.n_features(),
                FEATURE_COUNT
            )));
        }
        Ok(())
    }
}

async fn read_artifact(kind: &str, path: &Path) -> Result<String> {
    debug!("Reading {} artifact from: {}", kind, path.display());
    tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::artifact(format!(
            "failed to read {} from {}: {}",
            kind,
            path.display(),
            e
        ))
    })
}

fn parsing<T>(kind: &str, path: &Path, result: Result<T>) -> Result<T> {
    result.map_err(|e| e.in_artifact(format!("failed to load {} from {}", kind, path.display())))
}

pub async fn load(config: &ArtifactsConfig) -> Result<Artifacts> {
    let model_path = config.model_path();
    let scaler_path = config.scaler_path();
    let encoders_path = config.encoders_path();

    let model_json = read_artifact("model", &model_path).await?;
    let regressor = parsing("model", &model_path, regressor_from_json(&model_json))?;

    let scaler_json = read_artifact("scaler", &scaler_path).await?;
    let scaler = parsing(
        "scaler",
        &scaler_path,
        StandardScaler::from_json(&scaler_json),
    )?;

    let encoders_json = read_artifact("encoders", &encoders_path).await?;
    let encoders = parsing(
        "encoders",
        &encoders_path,
        CategoricalEncoders::from_json(&encoders_json),
    )?;

    let artifacts = Artifacts {
        regressor,
        scaler,
        encoders,
    };
    artifacts.validate()?;

    info!(
        "Loaded artifacts from {}: model with {} features, {} encoders",
        config.dir.display(),
        artifacts.regressor.n_features(),
        artifacts.encoders.len()
    );

    Ok(artifacts)
}

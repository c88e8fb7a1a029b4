use crate::{Error, Result, house::CategoricalField};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Known values of one categorical column, kept in ascending order.
/// The code of a value is its position in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(Error::artifact("encoder has no classes"));
        }
        if let Some(pair) = classes.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(Error::artifact(format!(
                "encoder classes must be strictly ascending, found '{}' before '{}'",
                pair[0], pair[1]
            )));
        }
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, value: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()
    }

    /// Encodes `value`, substituting the first known class when it was never
    /// seen during training. The flag reports whether the substitution happened.
    pub fn transform_or_default(&self, value: &str) -> (usize, bool) {
        match self.transform(value) {
            Some(code) => (code, false),
            None => (0, true),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoricalEncoders {
    encoders: HashMap<CategoricalField, LabelEncoder>,
}

impl CategoricalEncoders {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut encoders = HashMap::with_capacity(raw.len());

        for (name, classes) in raw {
            let Ok(field) = name.parse::<CategoricalField>() else {
                warn!("Ignoring encoder for unused column: {}", name);
                continue;
            };
            let encoder = LabelEncoder::new(classes)
                .map_err(|e| e.in_artifact(format!("encoder '{}'", name)))?;
            encoders.insert(field, encoder);
        }

        Ok(Self { encoders })
    }

    pub fn get(&self, field: CategoricalField) -> Result<&LabelEncoder> {
        self.encoders.get(&field).ok_or_else(|| Error::EncoderNotFound {
            field: field.to_string(),
        })
    }

    pub fn ensure_complete(&self) -> Result<()> {
        let missing: Vec<&str> = CategoricalField::ALL
            .iter()
            .filter(|field| !self.encoders.contains_key(*field))
            .map(|field| field.as_str())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::artifact(format!(
                "missing encoders for: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

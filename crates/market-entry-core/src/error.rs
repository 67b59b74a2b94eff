use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketEntryError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Not found: no {entity} for country '{country}'")]
    NotFound { entity: String, country: String },

    #[error("Fit failure: {metric} — {reason}")]
    FitFailure { metric: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MarketEntryError {
    pub(crate) fn not_found(entity: &str, country: &str) -> Self {
        MarketEntryError::NotFound {
            entity: entity.into(),
            country: country.into(),
        }
    }

    /// True when the error is a missing-country lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MarketEntryError::NotFound { .. })
    }
}

impl From<serde_json::Error> for MarketEntryError {
    fn from(e: serde_json::Error) -> Self {
        MarketEntryError::SerializationError(e.to_string())
    }
}

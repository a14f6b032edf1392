use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Record encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable, non-sensitive code surfaced to callers in place of the raw
    /// error text.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Store(_) => "STORE_ERROR",
            CoreError::Encoding(_) | CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_share_one_code() {
        let err = CoreError::from(StoreError::Unavailable("connection refused".into()));
        assert_eq!(err.code(), "STORE_ERROR");
        assert_eq!(err.to_string(), "Store unavailable: connection refused");
    }

    #[test]
    fn validation_error_display() {
        let err = CoreError::Validation("MAX_SLOTS must be at least 1".into());
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(
            err.to_string(),
            "Validation failed: MAX_SLOTS must be at least 1"
        );
    }
}

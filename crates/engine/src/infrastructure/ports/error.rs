//! Error types for port operations.

/// Class catalog operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The backing store cannot be reached right now.
    #[error("Class catalog unavailable: {0}")]
    Unavailable(String),

    /// Reading the catalog source failed.
    #[error("Failed to load class catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog source is not valid JSON of a supported shape.
    #[error("Class catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create an Unavailable error.
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }
}

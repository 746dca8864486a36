use thiserror::Error;

/// Errors raised while building or loading quiz reference data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question key cannot be empty")]
    EmptyQuestionKey,

    #[error("duplicate question key: {0}")]
    DuplicateQuestionKey(String),

    #[error("sequence `{sequence}` has no property for question `{key}`")]
    MissingProperty { sequence: String, key: String },

    #[error("sequence `{sequence}` defines property `{key}` with no matching question")]
    UnknownProperty { sequence: String, key: String },

    #[error("sequence `{sequence}` has a non-finite limit value")]
    NonFiniteLimit { sequence: String },

    #[error("sequence `{sequence}` must preview at least one term")]
    EmptyPreview { sequence: String },

    #[error("sequence `{sequence}` previews more than {max} terms")]
    PreviewTooLong { sequence: String, max: u32 },

    #[error("sequence `{sequence}` has a limit value that disagrees with its `convergent` answer")]
    LimitMismatch { sequence: String },

    #[error("question budget must be > 0")]
    InvalidBudget,

    #[error("unknown catalog variant: {0}")]
    UnknownVariant(String),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

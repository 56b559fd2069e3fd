use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranslateError>;

#[derive(Error, Debug)]
pub enum TranslateError {
    /// Malformed input tree: missing `id`/`type`, non-object child, wrong value type.
    #[error("malformed design node at `{path}`: {message}")]
    Structure { path: String, message: String },

    #[error("design tree exceeds maximum depth ({limit}) at `{path}`")]
    TooDeep { limit: usize, path: String },

    #[error("design tree has more than {limit} nodes")]
    TooManyNodes { limit: usize },

    #[error("no node with id `{id}`")]
    NodeNotFound { id: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("target already watched: {target_id}")]
    DuplicateTarget { target_id: String },

    #[error("target not watched: {target_id}")]
    TargetNotFound { target_id: String },
}

impl Error {
    #[must_use]
    pub fn duplicate_target(target_id: impl Into<String>) -> Self {
        Self::DuplicateTarget {
            target_id: target_id.into(),
        }
    }

    #[must_use]
    pub fn target_not_found(target_id: impl Into<String>) -> Self {
        Self::TargetNotFound {
            target_id: target_id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

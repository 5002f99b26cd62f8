use std::fmt;

use thiserror::Error;

use crate::validation::ValidationError;

/// Faults raised by the persistence layer. The underlying error is kept as-is.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),
}

/// The input field a validation failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Exercise,
    Date,
    Duration,
    Calories,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Exercise => "exercise",
            Field::Date => "date",
            Field::Duration => "duration",
            Field::Calories => "calories",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid {field}: {source}")]
    Invalid {
        field: Field,
        #[source]
        source: ValidationError,
    },
    #[error("user {0:?} not found")]
    UserNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    pub(crate) fn invalid(field: Field) -> impl FnOnce(ValidationError) -> SessionError {
        move |source| SessionError::Invalid { field, source }
    }

    /// The offending field, if this is an input error.
    pub fn field(&self) -> Option<Field> {
        match self {
            SessionError::Invalid { field, .. } => Some(*field),
            _ => None,
        }
    }
}

//! All kinds of errors in this crate.

use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("operation would place a cell outside [-{max}, {max}]")]
    OutOfDomain {
        /// the coordinate bound that was exceeded
        max: i64,
    },

    #[error("pattern is empty")]
    EmptyPattern,

    #[error("invalid rule string {0:?}")]
    ParseRuleError(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::api::ApiError;

/// Errors that escape the dispatcher.
///
/// Everything else (missing arguments, missing credential, upstream image
/// failures) is reported inside a [`crate::ToolReply`], never as an `Err`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper around [`reqwest::Error`] so the HTTP stack does not leak into the
/// public error types.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ReqwestError(#[from] reqwest::Error);

impl From<ReqwestError> for reqwest::Error {
    fn from(value: ReqwestError) -> Self {
        value.0
    }
}

/// Wrapper around [`reqwest_middleware::Error`].
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct MiddlewareError(#[from] reqwest_middleware::Error);

impl From<MiddlewareError> for reqwest_middleware::Error {
    fn from(value: MiddlewareError) -> Self {
        value.0
    }
}

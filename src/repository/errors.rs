use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The request never produced a usable response: network failure,
    /// non-2xx status or an undecodable body.
    #[error("Connection error: {0}")]
    Transport(String),

    /// The record store answered but reported a failure.
    #[error("{0}")]
    Application(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RepositoryError::Transport(format!("HTTP error, status: {status}")),
            None => {
                let mut message = err.to_string();
                let mut source = std::error::Error::source(&err);
                while let Some(cause) = source {
                    message.push_str(": ");
                    message.push_str(&cause.to_string());
                    source = cause.source();
                }
                RepositoryError::Transport(message)
            }
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnlockError {
    /// The identity backend rejected the supplied credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The identity backend could not be reached or failed internally.
    #[error("Verification failed: {0}")]
    Verification(String),
}

pub type Result<T> = std::result::Result<T, UnlockError>;

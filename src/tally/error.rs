use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    /// The remote store could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("item name cannot be empty")]
    InvalidName,

    /// A checked write lost its race too many times (checked-writes mode only).
    #[error("write conflict on '{0}': item changed concurrently")]
    WriteConflict(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;

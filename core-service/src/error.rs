use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Connector initialization failed: {0}")]
    InitializationFailed(#[from] core_runtime::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

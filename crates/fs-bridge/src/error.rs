#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mirror scope root must be absolute: {0}")]
    RelativeScopeRoot(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArViewError {
    #[error("Engine operation failed: {0}")]
    Engine(String),

    #[error("Camera operation failed: {0}")]
    Camera(String),

    #[error("Renderer operation failed: {0}")]
    Renderer(String),

    #[error("View hierarchy error: {0}")]
    View(String),

    #[error("Native engine libraries unavailable: {0}")]
    NativeUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ArViewError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Resource error: {0}")]
    Resource(#[from] core_resources::ResourceError),

    #[error("Network error: {0}")]
    Network(#[from] core_network::NetworkError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

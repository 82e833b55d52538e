use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("album not found: {id}")]
    AlbumNotFound { id: String },

    #[error("photo not found: {id}")]
    PhotoNotFound { id: String },

    /// The backing store refused a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] json::Error),

    #[error("image error: {0}")]
    Image(#[from] ::image::ImageError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("path cannot be turned into a file url: {path}")]
    InvalidPath { path: String },

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

pub mod config;
pub mod file;
pub mod gallery_error;
pub mod image;
pub mod model;
pub mod repository;
pub mod session;
pub mod store;
pub mod upload;
pub mod utils;

pub use gallery_error::{GalleryError, Result};
pub use repository::Gallery;

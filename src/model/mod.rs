pub mod album;
pub mod photo;

pub use album::{Album, ViewMode};
pub use photo::{Orientation, Photo};

use std::path::{Path, PathBuf};

use crate::gallery_error::Result;
use crate::model::Orientation;

/// Reads the pixel dimensions from the image header without decoding it.
pub fn dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(::image::image_dimensions(path)?)
}

/// Probes the image on the blocking pool and waits for its dimensions.
///
/// There is no timeout: a probe that never returns stalls the caller.
pub async fn load_orientation(path: PathBuf) -> Result<Orientation> {
    let (width, height) = tokio::task::spawn_blocking(move || dimensions(&path)).await??;

    Ok(Orientation::from_dimensions(width, height))
}

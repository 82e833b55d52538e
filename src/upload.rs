//! Uploading local image files into an album.
//!
//! Files are handled one at a time: each image's dimensions are probed
//! (the only await point) before the photo is stored, and the next file
//! is not touched until the previous one is recorded.

use std::path::PathBuf;

use crate::file::{file_url, is_image, title_from_file_name};
use crate::gallery_error::{GalleryError, Result};
use crate::image::load_orientation;
use crate::model::Photo;
use crate::repository::Gallery;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub added: usize,
    pub skipped: usize,
}

/// Adds every image in `files` to `album_id`, calling `on_progress(done, total)`
/// after each stored photo. Non-image files are skipped.
pub async fn upload_files<S, F>(
    gallery: &Gallery<S>,
    album_id: &str,
    files: Vec<PathBuf>,
    mut on_progress: F,
) -> Result<UploadReport>
where
    S: KeyValueStore,
    F: FnMut(usize, usize),
{
    if gallery.album(album_id)?.is_none() {
        return Err(GalleryError::AlbumNotFound { id: album_id.to_owned() });
    }

    let total = files.len();
    let mut report = UploadReport::default();

    for (i, path) in files.into_iter().enumerate() {
        if !is_image(&path) {
            tracing::info!(path = %path.display(), "not an image, skipping");
            report.skipped += 1;
            continue;
        }

        let title = title_from_file_name(&path);
        let url = file_url(&path)?;
        let orientation = match load_orientation(path.clone()).await {
            Ok(orientation) => Some(orientation),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read image dimensions");
                None
            }
        };

        let photo = Photo {
            id: gallery.next_photo_id(i)?,
            title,
            url,
            album_id: album_id.to_owned(),
            orientation,
        };
        gallery.add_photo(photo)?;
        report.added += 1;
        on_progress(report.added, total);
    }

    tracing::info!(album = album_id, added = report.added, skipped = report.skipped, "upload finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;
    use crate::store::InMemoryStore;
    use std::fs;
    use std::path::Path;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        ::image::RgbImage::new(width, height).save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn uploads_images_and_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let tall = write_png(dir.path(), "tall.png", 2, 4);
        let wide = write_png(dir.path(), "wide.png", 4, 2);
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, b"hello").unwrap();

        let gallery = Gallery::new(InMemoryStore::new());
        let album = gallery.create_album().unwrap();

        let mut progress = vec![];
        let report = upload_files(&gallery, &album.id, vec![tall, notes, wide], |done, total| {
            progress.push((done, total))
        })
        .await
        .unwrap();

        assert_eq!(report, UploadReport { added: 2, skipped: 1 });
        assert_eq!(progress, vec![(1, 3), (2, 3)]);

        let photos = gallery.album_photos(&album.id).unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].title, "tall");
        assert_eq!(photos[0].orientation, Some(Orientation::Portrait));
        assert_eq!(photos[1].orientation, Some(Orientation::Landscape));
        assert_ne!(photos[0].id, photos[1].id);

        let album = gallery.album(&album.id).unwrap().unwrap();
        assert_eq!(album.count, 2);
        assert_eq!(album.cover_url, photos[0].url);
    }

    #[tokio::test]
    async fn unreadable_image_is_stored_without_orientation() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.jpg");
        fs::write(&broken, b"not really a jpeg").unwrap();

        let gallery = Gallery::new(InMemoryStore::new());
        let album = gallery.create_album().unwrap();
        let report = upload_files(&gallery, &album.id, vec![broken], |_, _| {}).await.unwrap();

        assert_eq!(report.added, 1);
        let photos = gallery.album_photos(&album.id).unwrap();
        assert_eq!(photos[0].orientation, None);
        assert_eq!(photos[0].title, "broken");
    }

    #[tokio::test]
    async fn unknown_album_is_rejected_before_any_work() {
        let gallery = Gallery::new(InMemoryStore::new());
        let err = upload_files(&gallery, "album-x", vec![], |_, _| {}).await.unwrap_err();
        assert!(matches!(err, GalleryError::AlbumNotFound { .. }));
    }
}

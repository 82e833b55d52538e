use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::gallery_error::{GalleryError, Result};
use crate::model::photo::DEFAULT_PHOTO_TITLE;

/// Regular files directly inside `path`, sorted by name.
pub fn list_files<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let mut paths = vec!();
    for entry in fs::read_dir(path)? {
        match entry {
            Ok(e) if e.path().is_file() => paths.push(e.path()),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "failed to read a directory entry"),
        }
    }
    paths.sort();

    Ok(paths)
}

/// Judged by the MIME type guessed from the extension.
pub fn is_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false)
}

/// File name without its last extension, e.g. `beach.day.jpg` -> `beach.day`.
pub fn title_from_file_name(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let title = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => "",
    };

    if title.is_empty() {
        DEFAULT_PHOTO_TITLE.to_owned()
    } else {
        title.to_owned()
    }
}

/// Percent-encoded `file://` URL of the absolute location of `path`.
pub fn file_url(path: &Path) -> Result<String> {
    let absolute = fs::canonicalize(path)?;
    let url = Url::from_file_path(&absolute)
        .map_err(|_| GalleryError::InvalidPath { path: absolute.display().to_string() })?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_images_by_extension() {
        assert!(is_image(Path::new("a/cat.JPG")));
        assert!(is_image(Path::new("dog.png")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn title_drops_only_the_last_extension() {
        assert_eq!(title_from_file_name(Path::new("/x/beach.day.jpg")), "beach.day");
        assert_eq!(title_from_file_name(Path::new("sunset.png")), "sunset");
    }

    #[test]
    fn title_falls_back_when_nothing_precedes_extension() {
        assert_eq!(title_from_file_name(Path::new("noextension")), DEFAULT_PHOTO_TITLE);
        assert_eq!(title_from_file_name(Path::new(".png")), DEFAULT_PHOTO_TITLE);
    }

    #[test]
    fn lists_files_sorted_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.jpg"), b"b").unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let names: Vec<String> = list_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn file_url_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, b"a").unwrap();
        let url = file_url(&path).unwrap();
        assert!(url.starts_with("file:///"));
        assert!(url.ends_with("a.jpg"));
    }

    #[test]
    fn file_url_escapes_spaces_and_hashes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summer #1 trip.jpg");
        fs::write(&path, b"a").unwrap();

        let url = file_url(&path).unwrap();
        assert!(url.ends_with("summer%20%231%20trip.jpg"), "{}", url);

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.fragment(), None);
        assert_eq!(parsed.to_file_path().unwrap(), fs::canonicalize(&path).unwrap());
    }
}

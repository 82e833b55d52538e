//! Album and photo repository over an injected [`KeyValueStore`].
//!
//! Both collections are stored as whole JSON arrays. Every operation reads
//! the full collection, transforms it and writes it back; there is no
//! caching and no locking, so two writers sharing a store can overwrite
//! each other's changes.
//!
//! An album's `count` and `cover_url` are derived from the photo
//! collection. Every photo mutation routes through [`refresh_album`] so the
//! two fields cannot drift apart from the photos they describe.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::gallery_error::{GalleryError, Result};
use crate::model::album::PLACEHOLDER_COVER;
use crate::model::{Album, Photo, ViewMode};
use crate::store::{KeyValueStore, ALBUMS_KEY, PHOTOS_KEY};

/// What just happened to an album's photos.
#[derive(Debug, Clone, Copy)]
pub enum PhotoChange<'a> {
    Added(&'a Photo),
    Removed,
    /// No specific change; bring derived fields back in line.
    Resync,
}

/// Recomputes `count` and `cover_url` of `album` from `album_photos`, which
/// must be the album's photos in storage order.
///
/// An added photo becomes the cover only while the album has no real
/// cover. After a removal, once the cover no longer belongs to any
/// remaining photo, the first remaining photo takes over and an emptied
/// album falls back to the placeholder.
///
/// A resync never touches a real cover, so covers set through
/// [`Gallery::update_album`] survive it. It only fills a missing cover
/// from the first photo, or with the placeholder when there are none.
pub fn refresh_album(album: &Album, album_photos: &[Photo], change: PhotoChange<'_>) -> Album {
    let mut album = album.clone();
    album.count = album_photos.len();

    match change {
        PhotoChange::Added(photo) => {
            if !album.has_real_cover() {
                album.cover_url = photo.url.clone();
            }
        }
        PhotoChange::Removed => match album_photos.first() {
            None => album.cover_url = PLACEHOLDER_COVER.to_owned(),
            Some(first) => {
                if !album_photos.iter().any(|p| p.url == album.cover_url) {
                    album.cover_url = first.url.clone();
                }
            }
        },
        PhotoChange::Resync => {
            if !album.has_real_cover() {
                album.cover_url = match album_photos.first() {
                    Some(first) => first.url.clone(),
                    None => PLACEHOLDER_COVER.to_owned(),
                };
            }
        }
    }

    album
}

pub struct Gallery<S> {
    store: S,
}

impl<S: KeyValueStore> Gallery<S> {
    pub fn new(store: S) -> Self {
        Gallery { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = match self.store.get(key)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let values: Vec<json::Value> = match json::from_str(&raw) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(key, error = %err, "stored collection is unreadable, treating it as empty");
                return Ok(Vec::new());
            }
        };

        // one malformed record must not take the rest of the collection with it
        let records = values
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match json::from_value(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(key, index = i, error = %err, "skipping unreadable record");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let raw = json::to_string(records)?;
        self.store.set(key, &raw)
    }

    pub fn albums(&self) -> Result<Vec<Album>> {
        self.load(ALBUMS_KEY)
    }

    fn save_albums(&self, albums: &[Album]) -> Result<()> {
        self.save(ALBUMS_KEY, albums)
    }

    pub fn photos(&self) -> Result<Vec<Photo>> {
        self.load(PHOTOS_KEY)
    }

    fn save_photos(&self, photos: &[Photo]) -> Result<()> {
        self.save(PHOTOS_KEY, photos)
    }

    pub fn album(&self, id: &str) -> Result<Option<Album>> {
        Ok(self.albums()?.into_iter().find(|a| a.id == id))
    }

    /// Case-insensitive substring match on titles. An empty term matches all.
    pub fn search_albums(&self, term: &str) -> Result<Vec<Album>> {
        let needle = term.to_lowercase();
        let albums = self.albums()?
            .into_iter()
            .filter(|a| a.title.to_lowercase().contains(&needle))
            .collect();
        Ok(albums)
    }

    /// Appends a new album with the default title, placeholder cover and
    /// default spacing.
    pub fn create_album(&self) -> Result<Album> {
        let mut albums = self.albums()?;
        let base = format!("album-{}", now_millis());
        let id = unique_id(base, |candidate| albums.iter().any(|a| a.id == candidate));

        let album = Album::new(id);
        albums.push(album.clone());
        self.save_albums(&albums)?;

        tracing::info!(album = %album.id, "created album");
        Ok(album)
    }

    /// Replaces the stored album whose id matches `album.id`.
    pub fn update_album(&self, album: &Album) -> Result<()> {
        self.modify_album(&album.id, |stored| *stored = album.clone())
    }

    pub fn rename_album(&self, id: &str, title: &str) -> Result<Album> {
        self.modify_album(id, |album| album.title = title.to_owned())?;
        self.require_album(id)
    }

    pub fn update_album_spacing(&self, id: &str, spacing: f64) -> Result<Album> {
        self.modify_album(id, |album| album.spacing = Some(spacing))?;
        self.require_album(id)
    }

    pub fn update_album_photo_size(&self, id: &str, size: f64) -> Result<Album> {
        self.modify_album(id, |album| album.photo_size = Some(size))?;
        self.require_album(id)
    }

    pub fn update_album_view_mode(&self, id: &str, mode: ViewMode) -> Result<Album> {
        self.modify_album(id, |album| album.view_mode = Some(mode))?;
        self.require_album(id)
    }

    fn modify_album<F: FnOnce(&mut Album)>(&self, id: &str, f: F) -> Result<()> {
        let mut albums = self.albums()?;
        let album = albums
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| GalleryError::AlbumNotFound { id: id.to_owned() })?;
        f(album);
        self.save_albums(&albums)
    }

    fn require_album(&self, id: &str) -> Result<Album> {
        self.album(id)?
            .ok_or_else(|| GalleryError::AlbumNotFound { id: id.to_owned() })
    }

    /// Removes the album and every photo that references it.
    ///
    /// Returns `Ok(false)` when no album had this id; orphaned photos that
    /// still reference it are removed either way.
    pub fn delete_album(&self, id: &str) -> Result<bool> {
        let mut albums = self.albums()?;
        let before = albums.len();
        albums.retain(|a| a.id != id);
        let existed = albums.len() != before;
        self.save_albums(&albums)?;

        let mut photos = self.photos()?;
        let photos_before = photos.len();
        photos.retain(|p| p.album_id != id);
        self.save_photos(&photos)?;

        tracing::info!(album = id, existed, photos_removed = photos_before - photos.len(), "deleted album");
        Ok(existed)
    }

    pub fn album_photos(&self, album_id: &str) -> Result<Vec<Photo>> {
        let photos = self.photos()?
            .into_iter()
            .filter(|p| p.album_id == album_id)
            .collect();
        Ok(photos)
    }

    /// Appends `photo` and refreshes its album's count and cover.
    pub fn add_photo(&self, photo: Photo) -> Result<Album> {
        let mut albums = self.albums()?;
        let index = albums
            .iter()
            .position(|a| a.id == photo.album_id)
            .ok_or_else(|| GalleryError::AlbumNotFound { id: photo.album_id.clone() })?;

        let mut photos = self.photos()?;
        photos.push(photo.clone());
        self.save_photos(&photos)?;

        let album_photos: Vec<Photo> = photos
            .into_iter()
            .filter(|p| p.album_id == photo.album_id)
            .collect();
        albums[index] = refresh_album(&albums[index], &album_photos, PhotoChange::Added(&photo));
        self.save_albums(&albums)?;

        tracing::debug!(photo = %photo.id, album = %photo.album_id, "added photo");
        Ok(albums.swap_remove(index))
    }

    /// Removes a photo and refreshes its album's count and cover.
    ///
    /// Returns the removed photo. The owning album may already be gone, in
    /// which case only the photo collection changes.
    pub fn remove_photo(&self, photo_id: &str) -> Result<Photo> {
        let mut photos = self.photos()?;
        let index = photos
            .iter()
            .position(|p| p.id == photo_id)
            .ok_or_else(|| GalleryError::PhotoNotFound { id: photo_id.to_owned() })?;
        let removed = photos.remove(index);
        self.save_photos(&photos)?;

        let remaining: Vec<Photo> = photos
            .into_iter()
            .filter(|p| p.album_id == removed.album_id)
            .collect();

        let mut albums = self.albums()?;
        if let Some(album) = albums.iter_mut().find(|a| a.id == removed.album_id) {
            *album = refresh_album(album, &remaining, PhotoChange::Removed);
            self.save_albums(&albums)?;
        }

        tracing::debug!(photo = photo_id, album = %removed.album_id, "removed photo");
        Ok(removed)
    }

    /// Recomputes count and cover for every album. Returns how many albums
    /// were out of step with their photos.
    pub fn repair(&self) -> Result<usize> {
        let photos = self.photos()?;
        let mut albums = self.albums()?;
        let mut changed = 0;

        for album in albums.iter_mut() {
            let album_photos: Vec<Photo> = photos
                .iter()
                .filter(|p| p.album_id == album.id)
                .cloned()
                .collect();
            let refreshed = refresh_album(album, &album_photos, PhotoChange::Resync);
            if refreshed != *album {
                tracing::info!(album = %album.id, count = refreshed.count, "repaired album");
                *album = refreshed;
                changed += 1;
            }
        }

        if changed > 0 {
            self.save_albums(&albums)?;
        }
        Ok(changed)
    }

    /// A photo id not yet used in storage, in the `photo-<millis>-<index>` form.
    pub fn next_photo_id(&self, index: usize) -> Result<String> {
        let photos = self.photos()?;
        let base = format!("photo-{}-{}", now_millis(), index);
        Ok(unique_id(base, |candidate| photos.iter().any(|p| p.id == candidate)))
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn unique_id<F: Fn(&str) -> bool>(base: String, taken: F) -> String {
    if !taken(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

use crate::gallery_error::Result;
use crate::model::Album;
use crate::repository::Gallery;
use crate::store::KeyValueStore;

/// The view layer's copy of the album list.
///
/// The snapshot is never patched in place: every mutation goes through the
/// repository and is followed by a full reload.
pub struct GallerySession<'g, S> {
    gallery: &'g Gallery<S>,
    albums: Vec<Album>,
}

impl<'g, S: KeyValueStore> GallerySession<'g, S> {
    pub fn open(gallery: &'g Gallery<S>) -> Result<Self> {
        let albums = gallery.albums()?;
        Ok(GallerySession { gallery, albums })
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.albums = self.gallery.albums()?;
        Ok(())
    }

    pub fn create_album(&mut self) -> Result<Album> {
        let album = self.gallery.create_album()?;
        self.refresh()?;
        Ok(album)
    }

    pub fn delete_album(&mut self, id: &str) -> Result<bool> {
        let existed = self.gallery.delete_album(id)?;
        self.refresh()?;
        Ok(existed)
    }
}

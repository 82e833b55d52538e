use std::fmt;
use std::fmt::Formatter;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PHOTO_TITLE: &str = "Photo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub url: String,
    pub album_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(id={}, title={}, url={})", self.id, self.title, self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Taller than wide is portrait; square images are landscape.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_follows_pixel_dimensions() {
        assert_eq!(Orientation::from_dimensions(600, 800), Orientation::Portrait);
        assert_eq!(Orientation::from_dimensions(800, 600), Orientation::Landscape);
        assert_eq!(Orientation::from_dimensions(500, 500), Orientation::Landscape);
    }

    #[test]
    fn wire_format_uses_album_id_and_lowercase_orientation() {
        let photo = Photo {
            id: "photo-1-0".into(),
            title: "beach".into(),
            url: "file:///beach.jpg".into(),
            album_id: "album-1".into(),
            orientation: Some(Orientation::Portrait),
        };
        let value = json::to_value(&photo).unwrap();
        assert_eq!(value["albumId"], "album-1");
        assert_eq!(value["orientation"], "portrait");
    }
}

use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_COVER: &str = "https://source.unsplash.com/random/400x300/?abstract";
const PLACEHOLDER_HOST: &str = "unsplash.com";
pub const DEFAULT_TITLE: &str = "New album";
pub const DEFAULT_SPACING: f64 = 3.0;

/// A named collection of photos with a cover and display preferences.
///
/// Spacing and photo size are plain JSON numbers and may be fractional.
///
/// `count` and `cover_url` are derived from the photo collection and are
/// kept in step by the repository, never by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,
}

impl Album {
    pub fn new(id: String) -> Self {
        Album {
            id,
            title: DEFAULT_TITLE.to_owned(),
            cover_url: PLACEHOLDER_COVER.to_owned(),
            count: 0,
            spacing: Some(DEFAULT_SPACING),
            photo_size: None,
            view_mode: None,
        }
    }

    /// False while the album still shows the placeholder (or nothing).
    pub fn has_real_cover(&self) -> bool {
        !self.cover_url.is_empty() && !self.cover_url.contains(PLACEHOLDER_HOST)
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\" ({} photos)", self.id, self.title, self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    Masonry,
    List,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "masonry" => Ok(ViewMode::Masonry),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}

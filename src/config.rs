use std::path::PathBuf;

pub const STORE_ENV: &str = "GALLERY_STORE";
const DEFAULT_STORE_DIR: &str = ".gallery";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_dir: PathBuf,
}

impl Config {
    /// An explicit flag wins over the environment, which wins over the default.
    pub fn resolve(flag: Option<&str>, env: Option<String>) -> Self {
        let store_dir = flag
            .map(PathBuf::from)
            .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));

        Config { store_dir }
    }

    pub fn from_env(flag: Option<&str>) -> Self {
        Self::resolve(flag, std::env::var(STORE_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        let config = Config::resolve(Some("/tmp/a"), Some("/tmp/b".into()));
        assert_eq!(config.store_dir, PathBuf::from("/tmp/a"));
    }

    #[test]
    fn environment_beats_default() {
        let config = Config::resolve(None, Some("/tmp/b".into()));
        assert_eq!(config.store_dir, PathBuf::from("/tmp/b"));
    }

    #[test]
    fn empty_environment_falls_back_to_default() {
        assert_eq!(Config::resolve(None, Some(String::new())).store_dir, PathBuf::from(".gallery"));
        assert_eq!(Config::resolve(None, None).store_dir, PathBuf::from(".gallery"));
    }
}

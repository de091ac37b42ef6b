//! Application context shared by all request handlers (via Axum state).

use std::sync::Arc;

use tb_core::config::Config;
use tb_store::{AnnouncementStore, ImageStore};

/// Cheaply cloneable handle on the configuration and both stores.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// CSV-backed announcement records.
    pub announcements: Arc<AnnouncementStore>,
    /// Uploaded image files.
    pub images: Arc<ImageStore>,
}

impl AppContext {
    /// Open both stores at the locations named by `config`, creating the
    /// record file and image directory when they are missing.
    pub fn open(config: Config) -> tb_core::Result<Self> {
        let announcements = AnnouncementStore::open(&config.store.path)?;
        let images = ImageStore::open(
            config.server.images_dir(),
            config.server.images_url_prefix(),
        )?;

        Ok(Self {
            config: Arc::new(config),
            announcements: Arc::new(announcements),
            images: Arc::new(images),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_store_file_and_image_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.path = dir.path().join("anuncios.csv");
        config.server.static_dir = dir.path().join("static");

        let ctx = AppContext::open(config).unwrap();
        assert!(ctx.announcements.path().exists());
        assert!(dir.path().join("static").join("images").is_dir());
        assert_eq!(
            ctx.images.url_for("x.png"),
            "http://localhost:8000/static/images/x.png"
        );
    }
}

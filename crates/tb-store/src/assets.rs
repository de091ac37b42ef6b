//! Filesystem-level image asset storage.
//!
//! Images are stored flat under a single directory, keyed by the filename the
//! uploader supplied. Names are checked to be a single plain path component
//! so an upload can never escape the directory.

use std::path::{Component, Path, PathBuf};

use tb_core::{Error, Result};

/// Flat directory of uploaded image files.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    url_prefix: String,
}

impl ImageStore {
    /// Open the asset directory, creating it if needed.
    ///
    /// `url_prefix` is prepended verbatim to every filename returned by
    /// [`ImageStore::list_urls`], e.g. `http://localhost:8000/static/images/`.
    pub fn open(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::info!("Image directory at {}", dir.display());
        Ok(Self {
            dir,
            url_prefix: url_prefix.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` under `filename`, replacing any file of the same name.
    pub fn save(&self, filename: &str, data: &[u8]) -> Result<String> {
        let path = self.resolve(filename)?;
        std::fs::write(&path, data)?;
        tracing::info!(filename, bytes = data.len(), "Stored image");
        Ok(filename.to_string())
    }

    /// Names of every regular file in the directory, sorted.
    pub fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!("Skipping non UTF-8 image name {:?}", raw),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Public URL of every stored image.
    pub fn list_urls(&self) -> Result<Vec<String>> {
        Ok(self
            .list_names()?
            .iter()
            .map(|name| self.url_for(name))
            .collect())
    }

    /// Public URL of a single stored name.
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}{filename}", self.url_prefix)
    }

    /// Remove `filename`. A missing file is [`Error::NotFound`].
    pub fn delete(&self, filename: &str) -> Result<()> {
        let path = self.resolve(filename)?;
        if !path.is_file() {
            return Err(Error::not_found("image", filename));
        }
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(filename, "Deleted image");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::not_found("image", filename))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.dir.join(filename))
    }
}

/// Accept only a single, normal path component: no separators, no `.`/`..`,
/// no root or drive prefix, no NUL bytes.
pub fn validate_filename(filename: &str) -> Result<()> {
    let invalid = || Error::Validation(format!("invalid filename '{filename}'"));

    if filename.is_empty() || filename.contains(|c: char| matches!(c, '/' | '\\' | '\0')) {
        return Err(invalid());
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == filename => Ok(()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "http://localhost:8000/static/images/";

    fn setup() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::open(dir.path().join("images"), PREFIX).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_directory() {
        let (_dir, store) = setup();
        assert!(store.dir().is_dir());
        assert!(store.list_urls().unwrap().is_empty());
    }

    #[test]
    fn upload_list_delete_scenario() {
        let (_dir, store) = setup();

        assert_eq!(store.save("a.png", b"\x89PNG fake").unwrap(), "a.png");
        let urls = store.list_urls().unwrap();
        assert_eq!(urls, vec![format!("{PREFIX}a.png")]);
        assert!(urls[0].ends_with("a.png"));

        store.delete("a.png").unwrap();
        assert!(store.list_urls().unwrap().is_empty());

        let err = store.delete("a.png").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn upload_overwrites_same_name() {
        let (_dir, store) = setup();
        store.save("logo.jpg", b"first").unwrap();
        store.save("logo.jpg", b"second").unwrap();

        assert_eq!(store.list_names().unwrap(), vec!["logo.jpg"]);
        assert_eq!(std::fs::read(store.dir().join("logo.jpg")).unwrap(), b"second");
    }

    #[test]
    fn list_skips_directories_and_sorts() {
        let (_dir, store) = setup();
        store.save("b.png", b"b").unwrap();
        store.save("a.png", b"a").unwrap();
        std::fs::create_dir(store.dir().join("thumbs")).unwrap();

        assert_eq!(store.list_names().unwrap(), vec!["a.png", "b.png"]);
    }

    #[test]
    fn rejects_traversal_names() {
        let (dir, store) = setup();
        for bad in ["", ".", "..", "../escape.png", "sub/a.png", "/etc/passwd", "a\\b.png", "a\0.png"] {
            let err = store.save(bad, b"x").unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "accepted {bad:?}");
        }
        assert!(!dir.path().join("escape.png").exists());
        assert!(matches!(store.delete("../images"), Err(Error::Validation(_))));
    }

    #[test]
    fn accepts_plain_names() {
        for good in ["a.png", "photo 1.JPG", ".hidden.png", "año-2024.webp"] {
            assert!(validate_filename(good).is_ok(), "rejected {good:?}");
        }
    }

    #[test]
    fn delete_refuses_directories() {
        let (_dir, store) = setup();
        std::fs::create_dir(store.dir().join("folder")).unwrap();
        assert!(matches!(store.delete("folder"), Err(Error::NotFound { .. })));
    }
}

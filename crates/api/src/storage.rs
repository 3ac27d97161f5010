//! On-disk storage for uploaded images.
//!
//! Files are written under `STORAGE_DIR/<folder>/<uuid>.<ext>` and referred
//! to everywhere else by their public path (`<prefix>/<folder>/<file>`),
//! which is what the database stores and the static file service resolves.

use std::path::{Component, Path, PathBuf};

use festival_core::upload::image_extension;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::form::UploadedImage;

/// Upload folders, one per image-bearing resource.
pub const FOLDER_CATEGORIES: &str = "categories";
pub const FOLDER_CURATED: &str = "curated";
pub const FOLDER_EVENTS: &str = "events";
pub const FOLDER_WORKSHOPS: &str = "workshops";
pub const FOLDER_ABOUT: &str = "about";
pub const FOLDER_AWARDS: &str = "awards";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    public_prefix: String,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Confirm the storage root is an existing, writable directory.
    pub async fn health_check(&self) -> std::io::Result<()> {
        let metadata = tokio::fs::metadata(&self.root).await?;
        if !metadata.is_dir() {
            return Err(std::io::Error::other("storage root is not a directory"));
        }
        if metadata.permissions().readonly() {
            return Err(std::io::Error::other("storage root is read-only"));
        }
        Ok(())
    }

    /// Write one image and return its public path.
    pub async fn save(&self, folder: &str, image: &UploadedImage) -> AppResult<String> {
        let ext = image_extension(&image.content_type).ok_or_else(|| {
            AppError::BadRequest(format!("Unsupported image type '{}'", image.content_type))
        })?;
        let file_name = format!("{}.{ext}", Uuid::new_v4());

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(dir.join(&file_name), &image.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        tracing::debug!(folder, file_name = %file_name, size = image.bytes.len(), "Stored upload");
        Ok(format!("{}/{folder}/{file_name}", self.public_prefix))
    }

    /// Write the image if there is one.
    pub async fn save_optional(
        &self,
        folder: &str,
        image: Option<&UploadedImage>,
    ) -> AppResult<Option<String>> {
        match image {
            Some(image) => self.save(folder, image).await.map(Some),
            None => Ok(None),
        }
    }

    /// Write several images. If any write fails, the ones already written
    /// are removed before the error is returned.
    pub async fn save_all(&self, folder: &str, images: &[UploadedImage]) -> AppResult<Vec<String>> {
        let mut saved = Vec::with_capacity(images.len());
        for image in images {
            match self.save(folder, image).await {
                Ok(path) => saved.push(path),
                Err(e) => {
                    self.remove_all(&saved).await;
                    return Err(e);
                }
            }
        }
        Ok(saved)
    }

    /// Delete a stored file by public path. Missing files and paths outside
    /// the store are ignored; other failures are logged, never returned,
    /// since the row referencing the file has already changed.
    pub async fn remove(&self, public_path: &str) {
        let Some(path) = self.resolve(public_path) else {
            tracing::debug!(public_path, "Not a stored upload, skipping removal");
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(public_path, "Removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(public_path, error = %e, "Failed to remove upload"),
        }
    }

    pub async fn remove_all(&self, public_paths: &[String]) {
        for path in public_paths {
            self.remove(path).await;
        }
    }

    /// Map a public path back to a file under the storage root.
    fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let relative = public_path
            .strip_prefix(&self.public_prefix)?
            .strip_prefix('/')?;
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> UploadedImage {
        UploadedImage {
            file_name: "poster.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: bytes.to_vec().into(),
        }
    }

    #[tokio::test]
    async fn health_check_needs_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileStore::new(dir.path(), "/uploads").health_check().await.is_ok());

        let missing = FileStore::new(dir.path().join("gone"), "/uploads");
        assert!(missing.health_check().await.is_err());

        let file = dir.path().join("not-a-dir");
        tokio::fs::write(&file, b"x").await.unwrap();
        assert!(FileStore::new(&file, "/uploads").health_check().await.is_err());
    }

    #[tokio::test]
    async fn save_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "/uploads");

        let public = store.save(FOLDER_EVENTS, &png(b"data")).await.unwrap();
        assert!(public.starts_with("/uploads/events/"));
        assert!(public.ends_with(".png"));

        let on_disk = store.resolve(&public).unwrap();
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"data");

        store.remove(&public).await;
        assert!(!on_disk.exists());
        // Removing again is silent.
        store.remove(&public).await;
    }

    #[tokio::test]
    async fn save_all_returns_paths_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "/uploads");

        let paths = store
            .save_all(FOLDER_ABOUT, &[png(b"a"), png(b"b")])
            .await
            .unwrap();

        assert_eq!(paths.len(), 2);
        assert_ne!(paths[0], paths[1]);
        let second = store.resolve(&paths[1]).unwrap();
        assert_eq!(tokio::fs::read(second).await.unwrap(), b"b");
    }

    #[test]
    fn resolve_rejects_foreign_and_traversal_paths() {
        let store = FileStore::new("/srv/uploads", "/uploads");
        assert_eq!(
            store.resolve("/uploads/about/x.jpg"),
            Some(PathBuf::from("/srv/uploads/about/x.jpg"))
        );
        assert_eq!(store.resolve("https://cdn.example.com/x.jpg"), None);
        assert_eq!(store.resolve("/uploads/../etc/passwd"), None);
        assert_eq!(store.resolve("/uploadsx/a.jpg"), None);
    }
}

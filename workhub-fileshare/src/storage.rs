/// On-disk blob store
///
/// Uploaded files land in one flat upload directory under a generated name;
/// the original name only survives in the database record. The extension
/// allow-list is checked by the upload handler *before* anything is written,
/// so a rejected upload leaves neither a blob nor a record behind.

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Extensions the upload gate accepts
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pptx", "docx", "xlsx"];

/// Error type for blob storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts the extension of a file name, lowercased
///
/// Returns None when the name has no extension at all.
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Checks a file name against the allow-list
///
/// Returns the normalized extension for accepted names, None otherwise.
pub fn allowed_extension(file_name: &str) -> Option<String> {
    file_extension(file_name).filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Blob store rooted at the configured upload directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Checks that the upload directory exists or can be created
    ///
    /// Used by the health endpoint; mirrors the directory bootstrap that
    /// [`save`](Self::save) performs on every write.
    pub async fn ready(&self) -> bool {
        fs::create_dir_all(&self.root).await.is_ok()
    }

    /// Writes a blob and returns its store-relative reference
    ///
    /// The stored name is `<uuid>.<ext>`; callers must have validated the
    /// extension via [`allowed_extension`] first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created or the
    /// write fails
    pub async fn save(&self, extension: &str, contents: &[u8]) -> Result<String, StorageError> {
        fs::create_dir_all(&self.root).await?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.root.join(&stored_name);
        fs::write(&path, contents).await?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Stored uploaded blob");

        Ok(stored_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_accepted() {
        assert_eq!(allowed_extension("report.pptx"), Some("pptx".to_string()));
        assert_eq!(allowed_extension("notes.docx"), Some("docx".to_string()));
        assert_eq!(allowed_extension("sheet.xlsx"), Some("xlsx".to_string()));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert_eq!(allowed_extension("REPORT.PPTX"), Some("pptx".to_string()));
        assert_eq!(allowed_extension("notes.DocX"), Some("docx".to_string()));
    }

    #[test]
    fn test_disallowed_extensions_rejected() {
        for name in ["malware.exe", "photo.png", "archive.zip", "script.sh", "data.csv"] {
            assert_eq!(allowed_extension(name), None, "{} should be rejected", name);
        }
    }

    #[test]
    fn test_missing_extension_rejected() {
        assert_eq!(allowed_extension("README"), None);
        assert_eq!(allowed_extension(""), None);
    }

    #[test]
    fn test_only_last_extension_counts() {
        // "evil.pptx.exe" must not sneak through on its inner extension
        assert_eq!(allowed_extension("evil.pptx.exe"), None);
        assert_eq!(allowed_extension("archive.tar.xlsx"), Some("xlsx".to_string()));
    }

    #[tokio::test]
    async fn test_save_writes_blob() {
        let dir = std::env::temp_dir().join(format!("workhub-store-test-{}", Uuid::new_v4()));
        let store = FileStore::new(&dir);

        let stored = store.save("docx", b"hello").await.expect("save should succeed");
        assert!(stored.ends_with(".docx"));

        let on_disk = tokio::fs::read(dir.join(&stored)).await.expect("blob should exist");
        assert_eq!(on_disk, b"hello");

        tokio::fs::remove_dir_all(dir).await.ok();
    }

    #[tokio::test]
    async fn test_save_generates_unique_names() {
        let dir = std::env::temp_dir().join(format!("workhub-store-test-{}", Uuid::new_v4()));
        let store = FileStore::new(&dir);

        let a = store.save("pptx", b"a").await.unwrap();
        let b = store.save("pptx", b"b").await.unwrap();
        assert_ne!(a, b);

        tokio::fs::remove_dir_all(dir).await.ok();
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::storage::ApiError;

/// JsonConnection owns the data directory and the file-level read/write
/// rules shared by every collection
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Open a data directory, creating it if it doesn't exist
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, ApiError> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            info!("📁 Creating data directory: {}", base_path.display());
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Read a JSON array; a missing file is an empty collection
    pub fn load_collection<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, ApiError> {
        Ok(self.load_document(file_name)?.unwrap_or_default())
    }

    /// Read a single JSON document, `None` when the file doesn't exist
    pub fn load_document<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>, ApiError> {
        let path = self.file_path(file_name);
        if !path.exists() {
            debug!("📄 {} not found, treating as empty", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            warn!("⚠️ {} is empty", path.display());
            return Ok(None);
        }

        let parsed = serde_json::from_str(&content).map_err(|e| {
            ApiError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Some(parsed))
    }

    pub fn save_collection<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<(), ApiError> {
        self.save_document(file_name, &records)
    }

    /// Write a JSON document atomically using a temp file and rename
    pub fn save_document<T: Serialize + ?Sized>(&self, file_name: &str, document: &T) -> Result<(), ApiError> {
        let path = self.file_path(file_name);
        let temp_path = self.file_path(&format!("{}.tmp", file_name));

        let content = serde_json::to_string_pretty(document)?;
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path)?;

        debug!("💾 Saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_collection_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        let items: Vec<u32> = connection.load_collection("nothing.json").unwrap();

        assert!(items.is_empty());
    }

    #[test]
    fn test_save_and_load_collection() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path().join("nested")).unwrap();

        connection.save_collection("numbers.json", &[3, 1, 2]).unwrap();
        let items: Vec<u32> = connection.load_collection("numbers.json").unwrap();

        assert_eq!(items, vec![3, 1, 2]);
        assert!(!connection.file_path("numbers.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        fs::write(connection.file_path("broken.json"), "[1, 2,").unwrap();

        let result: Result<Vec<u32>, ApiError> = connection.load_collection("broken.json");

        assert!(matches!(result, Err(ApiError::Storage(_))));
    }
}

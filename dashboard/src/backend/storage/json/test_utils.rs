//! Test utilities with automatic cleanup.
//!
//! The data directory lives in a `TempDir` that is removed when the
//! environment is dropped, even if the test panics.

use std::path::PathBuf;
use std::sync::Arc;

use shared::MiniAssistant;
use tempfile::TempDir;

use super::api::JsonFileApi;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub api: Arc<JsonFileApi>,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let api = Arc::new(JsonFileApi::new(&base_path).expect("open data directory"));

        Self {
            _temp_dir: temp_dir,
            api,
            base_path,
        }
    }

    /// Write raw JSON into one of the collection files
    pub fn seed_file(&self, file_name: &str, json: &str) {
        std::fs::write(self.base_path.join(file_name), json).expect("seed data file");
    }
}

pub fn sample_assistant() -> MiniAssistant {
    MiniAssistant {
        id: 1,
        name: "Nova".to_string(),
        avatar: "🦉".to_string(),
        personality: "friendly".to_string(),
        color_theme: Some("blue".to_string()),
        greeting_message: Some("Hi! Ready when you are.".to_string()),
        is_active: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::api::EXPENSES_FILE;
    use crate::backend::storage::DashboardApi;

    #[tokio::test]
    async fn test_environment_cleanup() {
        let base_path;
        {
            let env = TestEnvironment::new();
            base_path = env.base_path.clone();
            env.seed_file(EXPENSES_FILE, r#"[{"id": 1, "description": "seeded"}]"#);
            assert_eq!(env.api.list_expenses().await.unwrap().len(), 1);
        }

        assert!(!base_path.exists());
    }
}

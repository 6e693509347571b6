use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 本機檔案系統存儲；相對路徑以 `base_path` 為根
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // 每次執行都整個覆寫
        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .write_file("out/output.txt", b"a much longer first run\n")
            .await
            .unwrap();
        storage.write_file("out/output.txt", b"short\n").await.unwrap();

        let data = storage.read_file("out/output.txt").await.unwrap();
        assert_eq!(data, b"short\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.read_file("missing.txt").await.is_err());
    }
}

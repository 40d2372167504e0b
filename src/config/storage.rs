use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn full_path(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).to_string_lossy().into_owned()
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("site").to_string_lossy().into_owned();
        let storage = LocalStorage::new(base);

        storage.write_file("index.html", b"<html></html>").await.unwrap();

        let written = std::fs::read_to_string(storage.full_path("index.html")).unwrap();
        assert_eq!(written, "<html></html>");
    }
}

use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Filesystem storage rooted at `base_path`. Absolute paths bypass the root.
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

    /// Where `path` lands on disk once joined with the storage root.
    pub fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.full_path(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

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

    #[test]
    fn test_write_then_read_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        tokio_test::block_on(async {
            storage
                .write_file("nested/out/slcsp.csv", b"zipcode,rate\n")
                .await
                .unwrap();
            let data = storage.read_file("nested/out/slcsp.csv").await.unwrap();
            assert_eq!(data, b"zipcode,rate\n");
        });
    }

    #[test]
    fn test_full_path_is_rooted_at_base_path() {
        let storage = LocalStorage::new("/srv/marketplace");

        assert_eq!(
            storage.full_path("output/slcsp.csv"),
            PathBuf::from("/srv/marketplace/output/slcsp.csv")
        );
        assert_eq!(
            storage.full_path("/tmp/slcsp.csv"),
            PathBuf::from("/tmp/slcsp.csv")
        );
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file("missing.csv").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::SlcspError::IoError(_)));
    }
}

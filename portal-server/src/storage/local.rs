use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{Storage, StorageError, check_key, join_url};

/// Mount point of the local upload directory
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Uploads kept in a local directory and served by this process
pub struct LocalStorage {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub async fn new(
        dir: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let path = self.dir.join(key);

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(key.to_string()),
                _ => StorageError::Io(e),
            })?;

        write_or_discard(file, &bytes, &path).await?;

        tracing::debug!("Stored {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn public_url(&self, key: &str) -> Result<String, StorageError> {
        check_key(key)?;
        let url = join_url(
            &self.public_base_url,
            &[UPLOADS_ROUTE.trim_start_matches('/'), key],
        )?;
        Ok(url.to_string())
    }
}

/// Write `bytes` to a freshly created file, removing it if the write fails
async fn write_or_discard<W>(mut writer: W, bytes: &[u8], path: &Path) -> Result<(), StorageError>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(bytes).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };
    drop(writer);

    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(path).await {
            tracing::warn!("Failed to remove partial upload {}: {}", path.display(), cleanup);
        }
        return Err(StorageError::Io(err));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Writer whose every write fails, like a full disk
    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::other("no space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_removes_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("1-partial.bin");
        std::fs::write(&path, b"half").unwrap();

        let result = write_or_discard(FullDisk, b"whole payload", &path).await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_put_writes_file_once() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path().join("uploads"), "http://localhost:8787/")
            .await
            .unwrap();

        storage.put("1-a.txt", b"hello".to_vec(), "text/plain").await.unwrap();
        let written = std::fs::read(storage.dir().join("1-a.txt")).unwrap();
        assert_eq!(written, b"hello");

        let err = storage
            .put("1-a.txt", b"again".to_vec(), "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_public_url() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path(), "http://localhost:8787")
            .await
            .unwrap();
        assert_eq!(
            storage.public_url("1-a.txt").unwrap(),
            "http://localhost:8787/uploads/1-a.txt"
        );
        assert!(storage.public_url("../x").is_err());
    }
}

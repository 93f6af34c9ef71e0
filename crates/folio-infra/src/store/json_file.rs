//! JSON file blog store - the whole collection lives in one pretty-printed
//! JSON array on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use folio_core::domain::BlogCollection;
use folio_core::error::StoreError;
use folio_core::ports::{BlogStore, Loaded};

const EMPTY_COLLECTION: &[u8] = b"[]";

/// File-backed blog store.
///
/// Saves go through a sibling temporary file that is flushed and then renamed
/// over the target, so readers only ever see a complete collection. The empty
/// collection written on first load is only created if no file exists yet, so
/// it can never replace a collection saved in the meantime.
///
/// A payload that does not parse is copied aside to
/// `<file>.corrupt-<content digest>` and served as an empty collection. The
/// same bytes are only ever copied once.
#[derive(Debug, Clone)]
pub struct JsonFileBlogStore {
    path: PathBuf,
}

impl JsonFileBlogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).await.map_err(io_error)
            }
            _ => Ok(()),
        }
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "blogs.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    async fn write_atomically(&self, bytes: &[u8]) -> Result<(), StoreError> {
        self.ensure_parent().await?;

        let tmp = self.sibling(&format!(".tmp-{}", Uuid::new_v4().simple()));
        let result = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_error(e));
        }
        Ok(())
    }

    /// Write `[]` to the target, failing with `AlreadyExists` if any file is
    /// already there.
    async fn create_empty(&self) -> std::io::Result<()> {
        write_new(&self.path, EMPTY_COLLECTION).await
    }

    async fn quarantine(&self, bytes: &[u8]) {
        let digest = hex::encode(Sha256::digest(bytes));
        let backup = self.sibling(&format!(".corrupt-{}", &digest[..16]));

        match write_new(&backup, bytes).await {
            Ok(()) => tracing::warn!(
                backup = %backup.display(),
                "Copied unreadable blog collection aside"
            ),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => tracing::debug!(
                backup = %backup.display(),
                "Unreadable blog collection already copied aside"
            ),
            Err(e) => tracing::error!(
                backup = %backup.display(),
                error = %e,
                "Failed to copy unreadable blog collection aside"
            ),
        }
    }
}

#[async_trait]
impl BlogStore for JsonFileBlogStore {
    async fn load(&self) -> Result<Loaded, StoreError> {
        let bytes = loop {
            match fs::read(&self.path).await {
                Ok(bytes) => break bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(io_error(e)),
            }

            self.ensure_parent().await?;
            match self.create_empty().await {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), "Created empty blog collection");
                    return Ok(Loaded::Initialized);
                }
                // Someone else created the file first; read theirs.
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(io_error(e)),
            }
        };

        match serde_json::from_slice::<BlogCollection>(&bytes) {
            Ok(collection) => {
                tracing::debug!(posts = collection.len(), "Loaded blog collection");
                Ok(Loaded::Existing(collection))
            }
            Err(e) => {
                if !bytes.iter().all(u8::is_ascii_whitespace) {
                    self.quarantine(&bytes).await;
                }
                Ok(Loaded::CorruptFallback {
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn save(&self, collection: &BlogCollection) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(collection)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.write_atomically(&bytes).await?;
        tracing::debug!(posts = collection.len(), "Saved blog collection");
        Ok(())
    }
}

async fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

fn io_error(e: std::io::Error) -> StoreError {
    StoreError::Io(e.to_string())
}

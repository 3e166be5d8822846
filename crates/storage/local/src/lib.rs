//! File-backed blob store: one pretty-printed JSON document per key under
//! `<root>/blobs/`, replaced atomically on every write.

use std::{
    fs::{self, File},
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
    time::SystemTime,
};

use folio_core::{key::sanitize_storage_key, traits::BlobStore};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LocalError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serde error: {0}")]
    Serde(String),
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let dir = root.join("blobs");
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(error = %e, path = %dir.display(), "failed to create blob directory");
        }
        Self { root }
    }

    fn blob_dir(&self) -> PathBuf {
        self.root.join("blobs")
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LocalError> {
        if key.is_empty() || sanitize_storage_key(key) != key {
            return Err(LocalError::InvalidKey(key.to_owned()));
        }
        Ok(self.blob_dir().join(format!("{key}.json")))
    }
}

impl BlobStore for LocalBlobStore {
    type Error = LocalError;

    fn get_json(&self, key: &str) -> Result<Option<Value>, Self::Error> {
        let path = self.path_for(key)?;
        let mut file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LocalError::Io(e.to_string())),
        };
        let mut s = String::new();
        file.read_to_string(&mut s)
            .map_err(|e| LocalError::Io(e.to_string()))?;
        let value = serde_json::from_str(&s).map_err(|e| LocalError::Serde(e.to_string()))?;
        Ok(Some(value))
    }

    fn put_json(&self, key: &str, value: &Value) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        let dir = self.blob_dir();
        fs::create_dir_all(&dir).map_err(|e| LocalError::Io(e.to_string()))?;
        let tmp = dir.join(format!(
            ".tmp-{}-{}-{}.json",
            key,
            std::process::id(),
            unique_suffix()
        ));
        let data =
            serde_json::to_vec_pretty(value).map_err(|e| LocalError::Serde(e.to_string()))?;
        write_atomic(&tmp, &path, &data)?;
        debug!(key, bytes = data.len(), path = %path.display(), "blob written");
        Ok(())
    }
}

fn write_atomic(tmp: &Path, final_path: &Path, data: &[u8]) -> Result<(), LocalError> {
    {
        let mut f = File::create(tmp).map_err(|e| LocalError::Io(e.to_string()))?;
        f.write_all(data)
            .map_err(|e| LocalError::Io(e.to_string()))?;
        f.sync_all().map_err(|e| LocalError::Io(e.to_string()))?;
    }
    if let Err(e) = fs::rename(tmp, final_path) {
        let _ = fs::remove_file(tmp);
        return Err(LocalError::Io(e.to_string()));
    }
    // fsync directory so the rename survives a crash
    if let Some(dir) = final_path.parent() {
        let dir_file = File::open(dir).map_err(|e| LocalError::Io(e.to_string()))?;
        dir_file
            .sync_all()
            .map_err(|e| LocalError::Io(e.to_string()))?;
    }
    Ok(())
}

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

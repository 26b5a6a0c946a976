// ── Persistence boundary ──
//
// The core reads and writes named JSON blobs through a flat key-value
// interface. Each blob carries a schema tag so a future field change can
// be detected instead of half-parsed.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CoreError;

/// Blob key for the incident collection.
pub const INCIDENTS_BLOB: &str = "rescue_incidents";
/// Blob key for the resource collection.
pub const RESOURCES_BLOB: &str = "rescue_resources";
/// Blob key for the last known reference position.
pub const POSITION_BLOB: &str = "rescue_position";

/// Current blob schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Flat string key-value storage. The core never sees paths or files.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Versioned envelope wrapped around every persisted blob.
#[derive(Debug, Serialize, serde::Deserialize)]
struct Envelope<T> {
    schema: u32,
    data: T,
}

/// Load and unwrap a blob. `Ok(None)` when the key has never been written;
/// `SchemaMismatch` when the blob was written by an incompatible version.
pub fn load_blob<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
) -> Result<Option<T>, CoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let envelope: Envelope<T> =
        serde_json::from_str(&raw).map_err(|e| CoreError::Persistence {
            message: format!("blob {key}: {e}"),
        })?;
    if envelope.schema != SCHEMA_VERSION {
        return Err(CoreError::SchemaMismatch {
            found: envelope.schema,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(Some(envelope.data))
}

/// Wrap and write a blob.
pub fn save_blob<T: Serialize>(
    store: &dyn BlobStore,
    key: &str,
    data: &T,
) -> Result<(), CoreError> {
    let envelope = Envelope {
        schema: SCHEMA_VERSION,
        data,
    };
    let raw = serde_json::to_string(&envelope).map_err(|e| CoreError::Persistence {
        message: format!("blob {key}: {e}"),
    })?;
    store.put(key, &raw)
}

// ── File-backed implementation ──────────────────────────────────────

/// One JSON file per key under a data directory. Writes go through a
/// temp file and rename so a crash never leaves a torn blob.
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CoreError::Persistence {
            message: format!("creating {}: {e}", dir.display()),
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::Persistence {
                message: format!("reading {}: {e}", path.display()),
            }),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| CoreError::Persistence {
            message: format!("writing {}: {e}", tmp.display()),
        })?;
        fs::rename(&tmp, &path).map_err(|e| CoreError::Persistence {
            message: format!("renaming {}: {e}", path.display()),
        })?;
        debug!(key, bytes = value.len(), "blob persisted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();
        let loaded: Option<Vec<u32>> = load_blob(&store, INCIDENTS_BLOB).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn roundtrip_through_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        save_blob(&store, RESOURCES_BLOB, &vec![1u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_blob(&store, RESOURCES_BLOB).unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        // Envelope carries the schema tag.
        let raw = store.get(RESOURCES_BLOB).unwrap().unwrap();
        assert!(raw.contains(r#""schema":1"#));
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();
        store
            .put(POSITION_BLOB, r#"{"schema":99,"data":[0.0,0.0]}"#)
            .unwrap();

        let result: Result<Option<(f64, f64)>, _> = load_blob(&store, POSITION_BLOB);
        assert!(matches!(
            result,
            Err(CoreError::SchemaMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn overwrite_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        save_blob(&store, POSITION_BLOB, &(1.0f64, 2.0f64)).unwrap();
        save_blob(&store, POSITION_BLOB, &(3.0f64, 4.0f64)).unwrap();

        let loaded: Option<(f64, f64)> = load_blob(&store, POSITION_BLOB).unwrap();
        assert_eq!(loaded, Some((3.0, 4.0)));
    }
}

use serde_json::Value;

/// Key-value document store holding opaque JSON values.
/// No async in core; callers should use spawn_blocking when invoking from async contexts.
pub trait BlobStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns `None` when nothing is stored under `key`.
    fn get_json(&self, key: &str) -> Result<Option<Value>, Self::Error>;

    /// Replaces the whole document stored under `key`.
    fn put_json(&self, key: &str, value: &Value) -> Result<(), Self::Error>;
}

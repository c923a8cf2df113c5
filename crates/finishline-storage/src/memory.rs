//! In-memory storage backend for tests and development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::traits::{ObjectStorage, StorageError, StorageResult};

/// Keeps objects in a process-local map. Not for production use.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch stored bytes, for test assertions.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().expect("storage lock").get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().expect("storage lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> StorageResult<String> {
        if key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        self.objects
            .lock()
            .expect("storage lock")
            .insert(key.to_string(), data);
        Ok(format!("memory://{}", key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects
            .lock()
            .expect("storage lock")
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().expect("storage lock").contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let storage = MemoryStorage::new();
        let url = storage
            .put("photos/x.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();
        assert_eq!(url, "memory://photos/x.jpg");
        assert_eq!(storage.get("photos/x.jpg"), Some(vec![1, 2, 3]));
        storage.delete("photos/x.jpg").await.unwrap();
        assert!(storage.is_empty());
    }
}

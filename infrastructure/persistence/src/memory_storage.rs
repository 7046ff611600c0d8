use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use business::domain::errors::StorageError;
use business::domain::storage::KeyValueStorage;

/// Process-local storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_overwrite_and_remove_values() {
        let storage = InMemoryStorage::new();

        storage.write("kk_cart", "[1]").unwrap();
        storage.write("kk_cart", "[]").unwrap();
        assert_eq!(storage.read("kk_cart").unwrap().as_deref(), Some("[]"));

        storage.remove("kk_cart").unwrap();
        assert!(storage.read("kk_cart").unwrap().is_none());
    }
}

//! Browser storage

use wasm_bindgen::JsValue;

use super::{Storage, StorageError};

/// `window.localStorage`, scoped to the page origin.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open the origin's local storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when there is no window or the
    /// browser refuses access (private mode, disabled storage).
    pub fn open() -> Result<Self, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;

        let inner = window
            .local_storage()
            .map_err(|error| js_error(&error, "localStorage access denied"))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;

        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|error| js_error(&error, "failed to read localStorage"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|error| js_error(&error, "failed to write localStorage"))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|error| js_error(&error, "failed to remove localStorage entry"))
    }
}

fn js_error(error: &JsValue, fallback: &str) -> StorageError {
    StorageError::Unavailable(error.as_string().unwrap_or_else(|| fallback.to_string()))
}

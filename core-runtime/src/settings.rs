//! Typed access to the host [`SettingsStore`].
//!
//! Callers declare their keys once, usually as an enum, and read/write
//! primitives through [`TypedSettings`] instead of scattering string
//! literals across the code base.
//!
//! ```ignore
//! enum Preference {
//!     SortOrder,
//!     ShowHidden,
//! }
//!
//! impl SettingsKey for Preference {
//!     fn key(&self) -> &str {
//!         match self {
//!             Preference::SortOrder => "sortOrder",
//!             Preference::ShowHidden => "showHidden",
//!         }
//!     }
//! }
//!
//! settings.set(&Preference::ShowHidden, true).await?;
//! let hidden: Option<bool> = settings.get(&Preference::ShowHidden).await?;
//! ```

use crate::error::Result;
use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::SettingsStore;
use std::sync::Arc;
use tracing::trace;

/// A value that identifies one entry in the settings store
pub trait SettingsKey {
    fn key(&self) -> &str;
}

impl SettingsKey for str {
    fn key(&self) -> &str {
        self
    }
}

impl SettingsKey for String {
    fn key(&self) -> &str {
        self.as_str()
    }
}

/// Primitive types the settings store can persist
#[async_trait]
pub trait SettingValue: Sized + Send {
    async fn write(self, store: &dyn SettingsStore, key: &str) -> BridgeResult<()>;

    async fn read(store: &dyn SettingsStore, key: &str) -> BridgeResult<Option<Self>>;
}

#[async_trait]
impl SettingValue for String {
    async fn write(self, store: &dyn SettingsStore, key: &str) -> BridgeResult<()> {
        store.set_string(key, &self).await
    }

    async fn read(store: &dyn SettingsStore, key: &str) -> BridgeResult<Option<Self>> {
        store.get_string(key).await
    }
}

#[async_trait]
impl SettingValue for bool {
    async fn write(self, store: &dyn SettingsStore, key: &str) -> BridgeResult<()> {
        store.set_bool(key, self).await
    }

    async fn read(store: &dyn SettingsStore, key: &str) -> BridgeResult<Option<Self>> {
        store.get_bool(key).await
    }
}

#[async_trait]
impl SettingValue for i64 {
    async fn write(self, store: &dyn SettingsStore, key: &str) -> BridgeResult<()> {
        store.set_i64(key, self).await
    }

    async fn read(store: &dyn SettingsStore, key: &str) -> BridgeResult<Option<Self>> {
        store.get_i64(key).await
    }
}

#[async_trait]
impl SettingValue for f64 {
    async fn write(self, store: &dyn SettingsStore, key: &str) -> BridgeResult<()> {
        store.set_f64(key, self).await
    }

    async fn read(store: &dyn SettingsStore, key: &str) -> BridgeResult<Option<Self>> {
        store.get_f64(key).await
    }
}

/// Settings store addressed by [`SettingsKey`]s
#[derive(Clone)]
pub struct TypedSettings {
    store: Arc<dyn SettingsStore>,
}

impl TypedSettings {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub async fn set<K, V>(&self, key: &K, value: V) -> Result<()>
    where
        K: SettingsKey + Sync + ?Sized,
        V: SettingValue,
    {
        trace!(key = key.key(), "Writing setting");
        value.write(self.store.as_ref(), key.key()).await?;
        Ok(())
    }

    pub async fn get<V, K>(&self, key: &K) -> Result<Option<V>>
    where
        K: SettingsKey + Sync + ?Sized,
        V: SettingValue,
    {
        Ok(V::read(self.store.as_ref(), key.key()).await?)
    }

    /// Read a value, falling back to `default` when the key is unset
    pub async fn get_or<V, K>(&self, key: &K, default: V) -> Result<V>
    where
        K: SettingsKey + Sync + ?Sized,
        V: SettingValue,
    {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    pub async fn remove<K>(&self, key: &K) -> Result<()>
    where
        K: SettingsKey + Sync + ?Sized,
    {
        self.store.delete(key.key()).await?;
        Ok(())
    }

    pub async fn contains<K>(&self, key: &K) -> Result<bool>
    where
        K: SettingsKey + Sync + ?Sized,
    {
        Ok(self.store.has_key(key.key()).await?)
    }
}

impl std::fmt::Debug for TypedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedSettings")
            .field("store", &"SettingsStore { ... }")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::BridgeError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Stored {
        Text(String),
        Flag(bool),
        Int(i64),
        Float(f64),
    }

    #[derive(Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, Stored>>,
    }

    impl MemoryStore {
        fn put(&self, key: &str, value: Stored) -> BridgeResult<()> {
            self.values.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        fn fetch(&self, key: &str) -> Option<Stored> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    fn mismatch(key: &str) -> BridgeError {
        BridgeError::OperationFailed(format!("Type mismatch for '{}'", key))
    }

    #[async_trait]
    impl SettingsStore for MemoryStore {
        async fn set_string(&self, key: &str, value: &str) -> BridgeResult<()> {
            self.put(key, Stored::Text(value.to_string()))
        }

        async fn get_string(&self, key: &str) -> BridgeResult<Option<String>> {
            match self.fetch(key) {
                Some(Stored::Text(v)) => Ok(Some(v)),
                Some(_) => Err(mismatch(key)),
                None => Ok(None),
            }
        }

        async fn set_bool(&self, key: &str, value: bool) -> BridgeResult<()> {
            self.put(key, Stored::Flag(value))
        }

        async fn get_bool(&self, key: &str) -> BridgeResult<Option<bool>> {
            match self.fetch(key) {
                Some(Stored::Flag(v)) => Ok(Some(v)),
                Some(_) => Err(mismatch(key)),
                None => Ok(None),
            }
        }

        async fn set_i64(&self, key: &str, value: i64) -> BridgeResult<()> {
            self.put(key, Stored::Int(value))
        }

        async fn get_i64(&self, key: &str) -> BridgeResult<Option<i64>> {
            match self.fetch(key) {
                Some(Stored::Int(v)) => Ok(Some(v)),
                Some(_) => Err(mismatch(key)),
                None => Ok(None),
            }
        }

        async fn set_f64(&self, key: &str, value: f64) -> BridgeResult<()> {
            self.put(key, Stored::Float(value))
        }

        async fn get_f64(&self, key: &str) -> BridgeResult<Option<f64>> {
            match self.fetch(key) {
                Some(Stored::Float(v)) => Ok(Some(v)),
                Some(_) => Err(mismatch(key)),
                None => Ok(None),
            }
        }

        async fn delete(&self, key: &str) -> BridgeResult<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }

        async fn has_key(&self, key: &str) -> BridgeResult<bool> {
            Ok(self.values.lock().unwrap().contains_key(key))
        }

        async fn list_keys(&self) -> BridgeResult<Vec<String>> {
            let mut keys: Vec<String> = self.values.lock().unwrap().keys().cloned().collect();
            keys.sort();
            Ok(keys)
        }

        async fn clear_all(&self) -> BridgeResult<()> {
            self.values.lock().unwrap().clear();
            Ok(())
        }
    }

    enum Preference {
        SortOrder,
        ShowHidden,
        LaunchCount,
    }

    impl SettingsKey for Preference {
        fn key(&self) -> &str {
            match self {
                Preference::SortOrder => "sortOrder",
                Preference::ShowHidden => "showHidden",
                Preference::LaunchCount => "launchCount",
            }
        }
    }

    fn settings() -> (TypedSettings, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (TypedSettings::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_enum_keys_map_to_raw_keys() {
        let (settings, store) = settings();

        settings
            .set(&Preference::SortOrder, "name".to_string())
            .await
            .unwrap();
        settings.set(&Preference::ShowHidden, true).await.unwrap();

        assert_eq!(
            store.list_keys().await.unwrap(),
            vec!["showHidden".to_string(), "sortOrder".to_string()]
        );
        assert_eq!(
            settings.get::<String, _>(&Preference::SortOrder).await.unwrap(),
            Some("name".to_string())
        );
        assert_eq!(
            settings.get::<bool, _>(&Preference::ShowHidden).await.unwrap(),
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_get_or_default_and_remove() {
        let (settings, _) = settings();

        assert_eq!(
            settings.get_or(&Preference::LaunchCount, 0i64).await.unwrap(),
            0
        );

        settings.set(&Preference::LaunchCount, 3i64).await.unwrap();
        assert!(settings.contains(&Preference::LaunchCount).await.unwrap());
        assert_eq!(
            settings.get_or(&Preference::LaunchCount, 0i64).await.unwrap(),
            3
        );

        settings.remove(&Preference::LaunchCount).await.unwrap();
        assert!(!settings.contains(&Preference::LaunchCount).await.unwrap());
    }

    #[tokio::test]
    async fn test_string_keys() {
        let (settings, _) = settings();

        settings.set("textScale", 1.5f64).await.unwrap();
        assert_eq!(settings.get::<f64, _>("textScale").await.unwrap(), Some(1.5));
    }

    #[tokio::test]
    async fn test_type_mismatch_surfaces_bridge_error() {
        let (settings, _) = settings();

        settings.set(&Preference::ShowHidden, true).await.unwrap();
        let err = settings
            .get::<i64, _>(&Preference::ShowHidden)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Type mismatch"));
    }
}

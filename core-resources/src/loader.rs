//! Local JSON Loader
//!
//! Reads a bundled resource fully and decodes it into a typed collection,
//! optionally through a wire type that is then converted into the domain
//! type. Decoding and conversion are separate stages; a decode failure is
//! always reported, never replaced by an empty collection.

use crate::envelope::ResourceEnvelope;
use crate::error::{ResourceError, Result};
use crate::locator::{ResourceId, ResourceLocator};
use core_runtime::decode::decode_json;
use core_runtime::logging::strip_path;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A type stored as its own bundled resource
pub trait Loadable: DeserializeOwned {
    /// Resource file name, without extension
    const RESOURCE: &'static str;

    const FOLDER: Option<&'static str> = None;

    fn resource_id() -> ResourceId {
        match Self::FOLDER {
            Some(folder) => ResourceId::in_folder(Self::RESOURCE, folder),
            None => ResourceId::new(Self::RESOURCE),
        }
    }
}

/// A type identified by a human-readable name
pub trait Named {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct LocalJsonLoader {
    locator: ResourceLocator,
}

impl LocalJsonLoader {
    pub fn new(locator: ResourceLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// Decode a flat JSON array of `T`
    pub fn load_all<T: DeserializeOwned>(&self, id: &ResourceId) -> Result<Vec<T>> {
        let items: Vec<T> = self.decode(id)?;
        debug!(resource = %id, count = items.len(), "Loaded resource");
        Ok(items)
    }

    /// Decode a JSON array of wire type `R` and convert each item into `T`
    pub fn load_all_mapped<R, T>(&self, id: &ResourceId) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let wire: Vec<R> = self.load_all(id)?;
        Ok(wire.into_iter().map(T::from).collect())
    }

    /// Like [`load_all_mapped`](Self::load_all_mapped) for fallible
    /// conversions; the first failing item aborts the load.
    pub fn try_load_all_mapped<R, T>(&self, id: &ResourceId) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
        T: TryFrom<R>,
        T::Error: std::fmt::Display,
    {
        let wire: Vec<R> = self.load_all(id)?;
        convert_all(wire)
    }

    pub fn load_envelope<T: DeserializeOwned>(
        &self,
        id: &ResourceId,
    ) -> Result<ResourceEnvelope<T>> {
        let envelope: ResourceEnvelope<T> = self.decode(id)?;
        debug!(
            resource = %id,
            version = %envelope.version,
            count = envelope.len(),
            "Loaded resource envelope"
        );
        Ok(envelope)
    }

    /// Load every item of a type that names its own resource
    pub fn load<T: Loadable>(&self) -> Result<Vec<T>> {
        self.load_all(&T::resource_id())
    }

    /// Load all items and return the first whose name matches
    pub fn find_named<T>(&self, id: &ResourceId, name: &str) -> Result<T>
    where
        T: DeserializeOwned + Named,
    {
        self.load_all::<T>(id)?
            .into_iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| ResourceError::NameNotFound {
                name: name.to_string(),
                resource: id.to_string(),
            })
    }

    fn decode<V: DeserializeOwned>(&self, id: &ResourceId) -> Result<V> {
        let (path, bytes) = self.read(id)?;

        decode_json(&bytes).map_err(|source| {
            warn!(
                resource = %id,
                file = strip_path(&path.to_string_lossy()),
                path = %source.path(),
                error = source.description(),
                "Failed to decode resource"
            );
            ResourceError::Decode {
                resource: id.to_string(),
                source,
            }
        })
    }

    fn read(&self, id: &ResourceId) -> Result<(PathBuf, Vec<u8>)> {
        let path = self.locator.locate(id);

        match std::fs::read(&path) {
            Ok(bytes) => Ok((path, bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(resource = %id, "Resource not found");
                Err(ResourceError::NotFound { path })
            }
            Err(source) => Err(ResourceError::Io { path, source }),
        }
    }
}

fn convert_all<R, T>(wire: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R>,
    T::Error: std::fmt::Display,
{
    wire.into_iter()
        .enumerate()
        .map(|(index, item)| {
            T::try_from(item).map_err(|e| ResourceError::Conversion {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Percent(u8);

    impl TryFrom<i64> for Percent {
        type Error = String;

        fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
            u8::try_from(value)
                .ok()
                .filter(|v| *v <= 100)
                .map(Percent)
                .ok_or_else(|| format!("{} is not a percentage", value))
        }
    }

    #[test]
    fn test_convert_all_succeeds() {
        let converted: Vec<Percent> = convert_all(vec![0, 50, 100]).unwrap();
        assert_eq!(converted, vec![Percent(0), Percent(50), Percent(100)]);
    }

    #[test]
    fn test_convert_all_reports_first_failure() {
        let err = convert_all::<i64, Percent>(vec![10, 200, -1]).unwrap_err();

        match err {
            ResourceError::Conversion { index, message } => {
                assert_eq!(index, 1);
                assert_eq!(message, "200 is not a percentage");
            }
            other => panic!("expected Conversion, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let loader = LocalJsonLoader::new(ResourceLocator::new("/nonexistent-bundle"));
        let err = loader
            .load_all::<i64>(&ResourceId::new("numbers"))
            .unwrap_err();

        match err {
            ResourceError::NotFound { path } => {
                assert_eq!(path, PathBuf::from("/nonexistent-bundle/numbers.json"))
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}

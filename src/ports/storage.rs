// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage backend trait definition.
//!
//! This module defines the `StorageBackend` trait, the port through which the
//! record store reaches a hierarchical byte store. The store only needs five
//! primitives: enumerate containers, create a container, read a file, write a
//! whole file and remove a container recursively.

use crate::domain::Result;

/// A hierarchical byte store made of named containers holding named files.
///
/// Container and file names handed to a backend have already been sanitized
/// by the caller; backends do not re-validate them.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. No locking is implied: concurrent
/// writes to the same file race and the last one wins.
///
/// # Examples
///
/// ```rust
/// use sale_factory::ports::StorageBackend;
/// use sale_factory::domain::Result;
///
/// struct NullStorage;
///
/// impl StorageBackend for NullStorage {
///     fn name(&self) -> &str {
///         "null"
///     }
///
///     fn list_containers(&self) -> Result<Vec<String>> {
///         Ok(vec![])
///     }
///
///     fn create_container(&self, _container: &str) -> Result<()> {
///         Ok(())
///     }
///
///     fn read_file(&self, _container: &str, _file: &str) -> Result<Option<Vec<u8>>> {
///         Ok(None)
///     }
///
///     fn write_file(&self, _container: &str, _file: &str, _data: &[u8]) -> Result<()> {
///         Ok(())
///     }
///
///     fn remove_container(&self, _container: &str) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let storage = NullStorage;
/// assert_eq!(storage.read_file("atlas-chain", "project.json").unwrap(), None);
/// ```
pub trait StorageBackend: Send + Sync {
    /// Returns a short name for logging and error messages, e.g. "filesystem".
    fn name(&self) -> &str;

    /// Returns the names of all containers under the storage root.
    ///
    /// Order is whatever the backend enumerates in. Entries that are not
    /// containers (plain files at the root) are left out.
    fn list_containers(&self) -> Result<Vec<String>>;

    /// Creates `container`, along with any missing parents. Succeeds if it
    /// already exists.
    fn create_container(&self, container: &str) -> Result<()>;

    /// Reads `file` from `container`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bytes))` - The file exists
    /// * `Ok(None)` - The file or its container does not exist
    /// * `Err(StoreError)` - The backend failed
    fn read_file(&self, container: &str, file: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the whole content of `file` in `container` with `data`.
    ///
    /// The container must already exist.
    fn write_file(&self, container: &str, file: &str, data: &[u8]) -> Result<()>;

    /// Removes `container` and everything in it. Succeeds if it does not exist.
    fn remove_container(&self, container: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoreError;

    // Backend that fails every mutating call
    struct ReadOnlyStorage;

    impl StorageBackend for ReadOnlyStorage {
        fn name(&self) -> &str {
            "read-only"
        }

        fn list_containers(&self) -> Result<Vec<String>> {
            Ok(vec!["atlas-chain".to_string()])
        }

        fn create_container(&self, _container: &str) -> Result<()> {
            Err(StoreError::StorageError {
                backend: self.name().to_string(),
                message: "read-only".to_string(),
                source: None,
            })
        }

        fn read_file(&self, _container: &str, _file: &str) -> Result<Option<Vec<u8>>> {
            Ok(Some(b"{}".to_vec()))
        }

        fn write_file(&self, _container: &str, _file: &str, _data: &[u8]) -> Result<()> {
            self.create_container("")
        }

        fn remove_container(&self, _container: &str) -> Result<()> {
            self.create_container("")
        }
    }

    #[test]
    fn test_storage_backend_name() {
        assert_eq!(ReadOnlyStorage.name(), "read-only");
    }

    #[test]
    fn test_storage_backend_errors_surface() {
        let storage = ReadOnlyStorage;
        assert!(storage.create_container("x").is_err());
        assert!(storage.write_file("x", "project.json", b"{}").is_err());
        assert!(storage.remove_container("x").is_err());
        assert_eq!(storage.list_containers().unwrap(), vec!["atlas-chain"]);
    }

    #[test]
    fn test_storage_backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn StorageBackend>>();
    }
}

//! Managed-asset backend: scanning a platform asset namespace and its
//! precompiled-bytecode index.
//!
//! Managed runtimes (mobile platforms and the like) split their storage:
//! named assets live in an opaque asset namespace, while loadable classes
//! are listed in a flat precompiled-bytecode index derived from the
//! application's own package archive. The two enumeration paths are
//! independent, so the backend consumes two collaborators — an
//! [`AssetStore`] and a [`BytecodeIndex`] — bundled into an explicit
//! [`AssetContext`] passed at construction. There is no ambient global
//! platform context.
//!
//! Every platform failure is translated into [`ScanError`] before it
//! leaves the scanner; callers never see the platform's native error
//! types.

use crate::core::class::{ClassLoader, LoadedClass};
use crate::core::error::ScanError;
use crate::core::filter::{ClassFilter, ResourceFilter};
use crate::core::location::Location;
use crate::core::resource::{BoxedResource, Resource};
use crate::core::traits::{MissingClassPolicy, ScanOptions, Scanner};

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The platform asset namespace: named byte blobs listed per directory.
pub trait AssetStore: fmt::Debug + Send + Sync {
    /// Lists the immediate children (files and directories) of `path`.
    /// Unknown paths yield an empty list.
    fn list(&self, path: &str) -> io::Result<Vec<String>>;

    /// Reads the asset at `path`.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// The platform's precompiled-bytecode index: a flat table of fully
/// qualified class names for the whole application archive.
pub trait BytecodeIndex: fmt::Debug + Send + Sync {
    /// Returns every fully qualified name in the index.
    fn class_names(&self) -> io::Result<Vec<String>>;
}

/// The explicit platform context a [`ManagedAssetScanner`] operates
/// against.
#[derive(Debug, Clone)]
pub struct AssetContext {
    /// The asset namespace.
    store: Arc<dyn AssetStore>,
    /// The bytecode index.
    index: Arc<dyn BytecodeIndex>,
}

impl AssetContext {
    /// Bundles an asset store and a bytecode index into a context.
    pub fn new(store: Arc<dyn AssetStore>, index: Arc<dyn BytecodeIndex>) -> Self {
        Self { store, index }
    }

    /// Returns the asset namespace.
    pub fn store(&self) -> &Arc<dyn AssetStore> {
        &self.store
    }

    /// Returns the bytecode index.
    pub fn index(&self) -> &Arc<dyn BytecodeIndex> {
        &self.index
    }
}

/// Scanner for managed asset stores.
pub struct ManagedAssetScanner {
    /// Platform context.
    context: AssetContext,
    /// Class-loading collaborator for `scan_for_classes`.
    loader: Arc<dyn ClassLoader>,
    /// Shared scan options.
    options: ScanOptions,
}

impl ManagedAssetScanner {
    /// Creates a scanner over the given platform context.
    pub fn new(context: AssetContext, loader: Arc<dyn ClassLoader>) -> Self {
        Self {
            context,
            loader,
            options: ScanOptions::default(),
        }
    }

    /// Sets the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }
}

impl Scanner for ManagedAssetScanner {
    fn scan_for_resources(
        &self,
        location: &Location,
        filter: &dyn ResourceFilter,
    ) -> Result<Vec<BoxedResource>, ScanError> {
        let path = location.path();
        let mut children = self
            .context
            .store
            .list(path)
            .map_err(|e| ScanError::io(location, e))?;
        children.sort();

        let mut resources: Vec<BoxedResource> = Vec::new();
        for name in children {
            if filter.is_match(&name) {
                resources.push(Box::new(AssetResource::new(
                    Arc::clone(&self.context.store),
                    path,
                    name,
                )));
            }
        }

        tracing::debug!(
            location = %location,
            count = resources.len(),
            "scanned asset resources"
        );
        Ok(resources)
    }

    fn scan_for_classes(
        &self,
        location: &Location,
        filter: &dyn ClassFilter,
    ) -> Result<Vec<LoadedClass>, ScanError> {
        // The index covers the whole application archive; the location
        // narrows it down by dotted-package prefix.
        let package = location.dotted_path();
        let mut names = self
            .context
            .index
            .class_names()
            .map_err(|e| ScanError::io(location, e))?;
        names.sort();

        let mut classes = Vec::new();
        for name in names {
            if !name.starts_with(&package) {
                continue;
            }
            match self.loader.load(&name) {
                Ok(class) => {
                    if filter.is_match(&class) {
                        tracing::trace!(class = %name, "found class");
                        classes.push(class);
                    }
                }
                Err(err) => match self.options.missing_class_policy() {
                    MissingClassPolicy::FailFast => {
                        return Err(ScanError::class_resolution(location, name, err));
                    }
                    MissingClassPolicy::SkipAndContinue => {
                        tracing::debug!(
                            class = %name,
                            error = %err,
                            "skipping unresolvable class"
                        );
                    }
                },
            }
        }

        Ok(classes)
    }
}

/// A resource in a managed asset store.
#[derive(Debug, Clone)]
pub struct AssetResource {
    /// Handle to the asset namespace.
    store: Arc<dyn AssetStore>,
    /// Full asset path, `/`-separated.
    location: String,
    /// Simple name.
    file_name: String,
}

impl AssetResource {
    /// Creates a resource for the asset `name` under `dir`.
    pub fn new(store: Arc<dyn AssetStore>, dir: &str, name: String) -> Self {
        let location = if dir.is_empty() {
            name.clone()
        } else {
            format!("{dir}/{name}")
        };
        Self {
            store,
            location,
            file_name: name,
        }
    }
}

impl Resource for AssetResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn load_as_bytes(&self) -> Result<Vec<u8>, ScanError> {
        self.store
            .read(&self.location)
            .map_err(|e| ScanError::resource_read(self.location.clone(), e))
    }
}

/// An in-memory asset store, keyed by full `/`-separated asset paths.
///
/// Fills the platform-store role in tests and in embeddings that register
/// their assets up front.
///
/// # Examples
///
/// ```rust
/// use rootscan::backends::asset::{AssetStore, InMemoryAssetStore};
///
/// let store = InMemoryAssetStore::new()
///     .with_asset("db/migration/V1__init.sql", b"create table one;".to_vec())
///     .with_asset("db/migration/nested/V2__more.sql", b"...".to_vec());
///
/// // Immediate children only; the nested directory shows up by name.
/// let children = store.list("db/migration").unwrap();
/// assert_eq!(children, vec!["V1__init.sql", "nested"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryAssetStore {
    /// Asset path → contents.
    assets: BTreeMap<String, Vec<u8>>,
}

impl InMemoryAssetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an asset.
    pub fn with_asset(mut self, path: impl Into<String>, contents: Vec<u8>) -> Self {
        self.assets.insert(path.into(), contents);
        self
    }

    /// Registers an asset after construction.
    pub fn insert(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.assets.insert(path.into(), contents);
    }
}

impl AssetStore for InMemoryAssetStore {
    fn list(&self, path: &str) -> io::Result<Vec<String>> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut children = BTreeSet::new();
        for key in self.assets.keys() {
            if let Some(remainder) = key.strip_prefix(&prefix) {
                if remainder.is_empty() {
                    continue;
                }
                let child = match remainder.find('/') {
                    Some(idx) => &remainder[..idx],
                    None => remainder,
                };
                children.insert(child.to_owned());
            }
        }
        Ok(children.into_iter().collect())
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.assets.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no asset at '{path}'"))
        })
    }
}

/// An in-memory bytecode index over a fixed list of fully qualified
/// names.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBytecodeIndex {
    /// Fully qualified names in the index.
    names: Vec<String>,
}

impl InMemoryBytecodeIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fully qualified name to the index.
    pub fn with_class(mut self, qualified_name: impl Into<String>) -> Self {
        self.names.push(qualified_name.into());
        self
    }
}

impl BytecodeIndex for InMemoryBytecodeIndex {
    fn class_names(&self) -> io::Result<Vec<String>> {
        Ok(self.names.clone())
    }
}

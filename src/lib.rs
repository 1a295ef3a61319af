//! # Rootscan
//!
//! Locate and filter resources (named byte blobs) and classes (loadable,
//! reflectable program units) beneath a logical root — a [`Location`] —
//! backed by a directory tree, a jar-like archive, or a managed runtime's
//! asset store and bytecode index.
//!
//! ## Overview
//!
//! Callers supply a root location and a filter predicate; the library
//! returns the matching set:
//!
//! - [`Location`] parses and normalizes a root descriptor such as
//!   `classpath:db/migration` or `filesystem:/opt/app/sql` — a pure value
//!   type with no I/O.
//! - Every backing store implements the same [`Scanner`] contract
//!   (`scan_for_resources` / `scan_for_classes`), each with a
//!   store-appropriate traversal algorithm.
//! - The [`ScanDispatcher`] picks exactly one backend per location, using
//!   a [`ClassPathResolver`](dispatch::ClassPathResolver) to decide which
//!   classpath entry owns a package.
//! - Discovered [`Resource`]s are lazy: contents are read on demand, and
//!   reads may fail independently of discovery.
//! - Class names are resolved through an externally supplied
//!   [`ClassLoader`]; an unresolvable name aborts the scan unless
//!   [`MissingClassPolicy::SkipAndContinue`] is opted into.
//!
//! Scans are synchronous: a call blocks for its full duration and returns
//! a fully materialized, deterministically ordered result set. Store
//! handles are scoped to the call; nothing is cached across invocations.
//!
//! ## Quick Start
//!
//! ```rust
//! use rootscan::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), ScanError> {
//!     let store = InMemoryAssetStore::new()
//!         .with_asset("db/migration/V1__init.sql", b"create table one;".to_vec());
//!     let index = InMemoryBytecodeIndex::new();
//!
//!     let dispatcher = ScanDispatcher::builder()
//!         .class_loader(Arc::new(MapClassLoader::new()))
//!         .asset_context(AssetContext::new(Arc::new(store), Arc::new(index)))
//!         .build()?;
//!
//!     let location = Location::parse("classpath:db/migration")?;
//!     let resources =
//!         dispatcher.scan_for_resources(&location, &|name: &str| name.ends_with(".sql"))?;
//!
//!     assert_eq!(resources.len(), 1);
//!     assert_eq!(
//!         resources[0].load_as_string(ResourceEncoding::Utf8)?,
//!         "create table one;"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into three layers:
//!
//! - **Core**: the `Location` addressing scheme, filter predicates, the
//!   resource abstraction, the class-loading collaborator contract, and
//!   structured errors
//! - **Backends**: filesystem, archive, and managed-asset scanners
//! - **Dispatch**: classpath-entry resolution and the scan dispatcher

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod backends;
pub mod core;
pub mod dispatch;

// Re-export commonly used types at the crate root
pub use crate::core::{
    BoxedResource, ClassFilter, ClassLoadError, ClassLoader, LoadedClass, Location, LocationError,
    MapClassLoader, MissingClassPolicy, Resource, ResourceEncoding, ResourceFilter, ScanError,
    ScanOptions, Scanner, StoreKind,
};

pub use crate::backends::{
    ArchiveScanner, AssetContext, AssetStore, BytecodeIndex, FileSystemScanner,
    InMemoryAssetStore, InMemoryBytecodeIndex, ManagedAssetScanner,
};
pub use crate::dispatch::{ClassPath, ClassPathEntry, ClassPathResolver, ScanDispatcher};

/// Prelude module for convenient imports.
///
/// ```rust
/// use rootscan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backends::{
        ArchiveScanner, AssetContext, AssetStore, BytecodeIndex, FileSystemScanner,
        InMemoryAssetStore, InMemoryBytecodeIndex, ManagedAssetScanner,
    };
    pub use crate::core::{
        BoxedResource, ClassFilter, ClassLoadError, ClassLoader, LoadedClass, Location,
        LocationError, MapClassLoader, MissingClassPolicy, Resource, ResourceEncoding,
        ResourceFilter, ScanError, ScanOptions, Scanner, StoreKind,
    };
    pub use crate::dispatch::{ClassPath, ClassPathEntry, ClassPathResolver, ScanDispatcher};
}

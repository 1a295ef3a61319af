//! Backing-store scanner implementations.
//!
//! This module contains implementations of the
//! [`Scanner`](crate::core::Scanner) contract for each supported backing
//! store:
//!
//! - [`filesystem`] - Recursive walk of a directory tree
//! - [`archive`] - Linear scan of a jar-like container's entry table
//! - [`asset`] - A managed runtime's asset namespace and bytecode index
//!
//! Each backend uses a store-appropriate traversal algorithm but yields the
//! same two result shapes (resources, classes), so the filter-driven
//! enumeration logic runs unmodified over all of them.
//!
//! ## Implementing a Custom Backend
//!
//! To scan another kind of backing store, implement the `Scanner` trait:
//!
//! ```rust,ignore
//! use rootscan::core::{
//!     BoxedResource, ClassFilter, LoadedClass, Location, ResourceFilter, ScanError, Scanner,
//! };
//!
//! pub struct MyScanner {
//!     // Your store's handles
//! }
//!
//! impl Scanner for MyScanner {
//!     fn scan_for_resources(
//!         &self,
//!         location: &Location,
//!         filter: &dyn ResourceFilter,
//!     ) -> Result<Vec<BoxedResource>, ScanError> {
//!         // Enumerate the store, filter by simple name
//!         todo!()
//!     }
//!
//!     fn scan_for_classes(
//!         &self,
//!         location: &Location,
//!         filter: &dyn ClassFilter,
//!     ) -> Result<Vec<LoadedClass>, ScanError> {
//!         // Enumerate class names, resolve through the loader, filter
//!         todo!()
//!     }
//! }
//! ```

pub mod archive;
pub mod asset;
pub mod filesystem;

// Re-exports
pub use archive::{ArchiveResource, ArchiveScanner};
pub use asset::{
    AssetContext, AssetResource, AssetStore, BytecodeIndex, InMemoryAssetStore,
    InMemoryBytecodeIndex, ManagedAssetScanner,
};
pub use filesystem::{FileSystemResource, FileSystemScanner};

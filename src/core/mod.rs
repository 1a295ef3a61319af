//! Core types and traits for the rootscan library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`location`] - The `Location` addressing scheme for scan roots
//! - [`filter`] - Caller-supplied resource and class predicates
//! - [`resource`] - The lazily readable resource abstraction
//! - [`class`] - Loaded classes and the class-loading collaborator
//! - [`traits`] - The `Scanner` contract and scan options
//! - [`error`] - Structured error types

pub mod class;
pub mod error;
pub mod filter;
pub mod location;
pub mod resource;
pub mod traits;

// Re-export commonly used types at the core level
pub use class::{ClassLoader, LoadedClass, MapClassLoader};
pub use error::{ClassLoadError, LocationError, ScanError};
pub use filter::{ClassFilter, GlobFilter, MatchAll, PrefixFilter, ResourceFilter, SuffixFilter};
pub use location::{Location, StoreKind, CLASSPATH_PREFIX, FILESYSTEM_PREFIX};
pub use resource::{BoxedResource, Resource, ResourceEncoding};
pub use traits::{BoxedScanner, MissingClassPolicy, ScanOptions, Scanner};

//! Backend selection for scan requests.
//!
//! - [`class_path`] - Resolving which classpath entry owns a location
//! - [`dispatcher`] - The [`ScanDispatcher`] routing scans to backends

pub mod class_path;
pub mod dispatcher;

// Re-export commonly used types at the dispatch level
pub use class_path::{ClassPath, ClassPathEntry, ClassPathResolver, ManagedAssetsResolver};
pub use dispatcher::{ScanDispatcher, ScanDispatcherBuilder};

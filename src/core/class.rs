//! Loaded classes and the class-loading collaborator contract.
//!
//! The scanner discovers fully qualified class names in a backing store and
//! resolves each through an externally supplied [`ClassLoader`]; it never
//! implements class loading itself. Resolution may fail independently of
//! discovery: a name present in the store's index is not necessarily
//! loadable.

use crate::core::error::ClassLoadError;

use std::any::Any;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A resolved, loadable program unit discovered by fully qualified name.
///
/// The identity of a loaded class is its fully qualified name. The attached
/// unit is whatever the loader resolved the name to, kept opaque behind
/// `Any` so filters can downcast and inspect it without the core knowing
/// the runtime's representation.
#[derive(Clone)]
pub struct LoadedClass {
    /// Fully qualified, dot-separated name.
    qualified_name: String,
    /// The loader-supplied program unit.
    unit: Arc<dyn Any + Send + Sync>,
}

impl LoadedClass {
    /// Creates a loaded class from a name and an already shared unit.
    pub fn new(qualified_name: impl Into<String>, unit: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            unit,
        }
    }

    /// Creates a loaded class wrapping `unit` directly.
    pub fn with_unit<T: Any + Send + Sync>(qualified_name: impl Into<String>, unit: T) -> Self {
        Self::new(qualified_name, Arc::new(unit))
    }

    /// Returns the fully qualified, dot-separated name.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the simple name, after the last `.`.
    pub fn simple_name(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(idx) => &self.qualified_name[idx + 1..],
            None => &self.qualified_name,
        }
    }

    /// Returns the package part of the name, empty for the default package.
    pub fn package(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(idx) => &self.qualified_name[..idx],
            None => "",
        }
    }

    /// Returns the loader-supplied program unit.
    pub fn unit(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.unit
    }

    /// Attempts to view the program unit as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.unit.downcast_ref::<T>()
    }
}

impl fmt::Debug for LoadedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedClass")
            .field("qualified_name", &self.qualified_name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for LoadedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

impl PartialEq for LoadedClass {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for LoadedClass {}

impl Hash for LoadedClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

impl PartialOrd for LoadedClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LoadedClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_name.cmp(&other.qualified_name)
    }
}

/// The class-loading collaborator: resolves a fully qualified name to a
/// loaded class, or fails.
///
/// Supplied by the caller or the embedding process. The scanner invokes it
/// once per discovered name and translates its error into
/// [`ScanError::ClassResolution`](crate::core::ScanError::ClassResolution).
pub trait ClassLoader: Send + Sync {
    /// Resolves `qualified_name` to a loaded class.
    ///
    /// # Errors
    ///
    /// Returns [`ClassLoadError`] if the name is not loadable.
    fn load(&self, qualified_name: &str) -> Result<LoadedClass, ClassLoadError>;
}

/// An in-memory class loader over a fixed name → class map.
///
/// Useful in tests and in embeddings that register their loadable units up
/// front instead of resolving them against a runtime.
///
/// # Examples
///
/// ```rust
/// use rootscan::core::{ClassLoader, MapClassLoader};
///
/// let loader = MapClassLoader::new()
///     .with_class("com.example.Migration")
///     .with_unit("com.example.Checksum", 42u32);
///
/// let class = loader.load("com.example.Checksum").unwrap();
/// assert_eq!(class.downcast_ref::<u32>(), Some(&42));
/// assert!(loader.load("com.example.Missing").is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MapClassLoader {
    classes: HashMap<String, LoadedClass>,
}

impl MapClassLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class with a unit-less `()` program unit.
    pub fn with_class(self, qualified_name: impl Into<String>) -> Self {
        self.with_unit(qualified_name, ())
    }

    /// Registers a class wrapping the given program unit.
    pub fn with_unit<T: Any + Send + Sync>(
        mut self,
        qualified_name: impl Into<String>,
        unit: T,
    ) -> Self {
        let name = qualified_name.into();
        self.classes
            .insert(name.clone(), LoadedClass::with_unit(name, unit));
        self
    }

    /// Registers a class after construction.
    pub fn register<T: Any + Send + Sync>(&mut self, qualified_name: impl Into<String>, unit: T) {
        let name = qualified_name.into();
        self.classes
            .insert(name.clone(), LoadedClass::with_unit(name, unit));
    }

    /// Returns the number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLoader for MapClassLoader {
    fn load(&self, qualified_name: &str) -> Result<LoadedClass, ClassLoadError> {
        self.classes.get(qualified_name).cloned().ok_or_else(|| {
            ClassLoadError::new(qualified_name, "class is not registered with this loader")
        })
    }
}

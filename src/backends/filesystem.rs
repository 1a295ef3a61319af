//! Filesystem backend: recursive scanning of a directory tree.
//!
//! Resources are every regular file under the location's directory, with
//! the filter applied to the simple file name. Classes are `.class` files
//! mapped back to fully qualified names and resolved through the
//! class-loading collaborator. Traversal is sorted so repeated scans of an
//! unchanged tree yield identical sequences.

use crate::core::class::{ClassLoader, LoadedClass};
use crate::core::error::ScanError;
use crate::core::filter::{ClassFilter, ResourceFilter};
use crate::core::location::Location;
use crate::core::resource::{BoxedResource, Resource};
use crate::core::traits::{MissingClassPolicy, ScanOptions, Scanner};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// File suffix identifying loadable class files.
const CLASS_SUFFIX: &str = ".class";

/// Scanner for directory trees.
///
/// For filesystem-kind locations the location path is the scan root. For
/// classpath-kind locations the scanner is constructed with the exploded
/// classpath entry that owns the package (via
/// [`with_class_path_root`](Self::with_class_path_root)); the scan root is
/// the entry root joined with the package path, and discovered class files
/// get the location's package as their name prefix.
pub struct FileSystemScanner {
    /// Class-loading collaborator for `scan_for_classes`.
    loader: Arc<dyn ClassLoader>,
    /// Root of the owning exploded classpath entry, for classpath-kind
    /// locations.
    class_path_root: Option<PathBuf>,
    /// Shared scan options.
    options: ScanOptions,
}

impl FileSystemScanner {
    /// Creates a filesystem scanner with default options.
    pub fn new(loader: Arc<dyn ClassLoader>) -> Self {
        Self {
            loader,
            class_path_root: None,
            options: ScanOptions::default(),
        }
    }

    /// Sets the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the exploded classpath entry root that owns classpath-kind
    /// locations scanned through this instance.
    pub fn with_class_path_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.class_path_root = Some(root.into());
        self
    }

    /// Resolves the directory a scan of `location` starts from.
    fn scan_root(&self, location: &Location) -> PathBuf {
        match (&self.class_path_root, location.is_class_path()) {
            (Some(root), true) => root.join(location.path()),
            _ => PathBuf::from(location.path()),
        }
    }

    /// The package prefix prepended to class names discovered under
    /// `location`.
    fn package_prefix(location: &Location) -> String {
        if !location.is_class_path() || location.path().is_empty() {
            return String::new();
        }
        format!("{}.", location.dotted_path())
    }
}

/// Maps a class file's path relative to the scan root back to a fully
/// qualified name: separators become dots, the suffix is stripped, and the
/// location's package prefix is prepended.
fn qualified_class_name(package_prefix: &str, relative: &Path) -> String {
    let slashed = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    let stem = slashed.strip_suffix(CLASS_SUFFIX).unwrap_or(&slashed);
    format!("{package_prefix}{}", stem.replace('/', "."))
}

impl Scanner for FileSystemScanner {
    fn scan_for_resources(
        &self,
        location: &Location,
        filter: &dyn ResourceFilter,
    ) -> Result<Vec<BoxedResource>, ScanError> {
        let root = self.scan_root(location);

        let mut resources: Vec<BoxedResource> = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| ScanError::io(location, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let simple_name = entry.file_name().to_string_lossy().into_owned();
            if filter.is_match(&simple_name) {
                resources.push(Box::new(FileSystemResource::new(&root, entry.into_path())));
            }
        }

        tracing::debug!(
            location = %location,
            count = resources.len(),
            "scanned filesystem resources"
        );
        Ok(resources)
    }

    fn scan_for_classes(
        &self,
        location: &Location,
        filter: &dyn ClassFilter,
    ) -> Result<Vec<LoadedClass>, ScanError> {
        let root = self.scan_root(location);
        let package_prefix = Self::package_prefix(location);

        let mut classes = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| ScanError::io(location, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !path
                .file_name()
                .map(|n| n.to_string_lossy().ends_with(CLASS_SUFFIX))
                .unwrap_or(false)
            {
                continue;
            }

            let relative = path.strip_prefix(&root).unwrap_or(path);
            let qualified_name = qualified_class_name(&package_prefix, relative);

            match self.loader.load(&qualified_name) {
                Ok(class) => {
                    if filter.is_match(&class) {
                        tracing::trace!(class = %qualified_name, "found class");
                        classes.push(class);
                    }
                }
                Err(err) => match self.options.missing_class_policy() {
                    MissingClassPolicy::FailFast => {
                        return Err(ScanError::class_resolution(location, qualified_name, err));
                    }
                    MissingClassPolicy::SkipAndContinue => {
                        tracing::debug!(
                            class = %qualified_name,
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

/// A resource on the filesystem.
#[derive(Debug, Clone)]
pub struct FileSystemResource {
    /// Path relative to the scan root, `/`-separated.
    location: String,
    /// Absolute-or-as-given path on disk.
    path: PathBuf,
    /// Simple file name.
    file_name: String,
}

impl FileSystemResource {
    /// Creates a resource for `path`, whose logical location is its path
    /// relative to `root`.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let mut location = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        if location.is_empty() {
            location = file_name.clone();
        }
        Self {
            location,
            path,
            file_name,
        }
    }

    /// Returns the location of this resource on disk.
    pub fn path_on_disk(&self) -> &Path {
        &self.path
    }
}

impl Resource for FileSystemResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn load_as_bytes(&self) -> Result<Vec<u8>, ScanError> {
        std::fs::read(&self.path)
            .map_err(|e| ScanError::resource_read(self.path.display().to_string(), e))
    }
}

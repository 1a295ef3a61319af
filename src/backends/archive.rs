//! Archive backend: prefix scanning of a jar-like container.
//!
//! Archives have no real hierarchy, only a flat entry table; a scan is a
//! linear pass over the entry names, keeping those prefixed by the
//! location path. Directory-marker entries are excluded from resource
//! enumeration. The archive handle is opened and released within each
//! call; resources re-open it on demand.

use crate::core::class::{ClassLoader, LoadedClass};
use crate::core::error::ScanError;
use crate::core::filter::{ClassFilter, ResourceFilter};
use crate::core::location::Location;
use crate::core::resource::{BoxedResource, Resource};
use crate::core::traits::{MissingClassPolicy, ScanOptions, Scanner};

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zip::ZipArchive;

/// Entry suffix identifying loadable class files.
const CLASS_SUFFIX: &str = ".class";

/// Scanner for jar-like archive files.
pub struct ArchiveScanner {
    /// Path of the archive on disk.
    archive: PathBuf,
    /// Class-loading collaborator for `scan_for_classes`.
    loader: Arc<dyn ClassLoader>,
    /// Shared scan options.
    options: ScanOptions,
}

impl ArchiveScanner {
    /// Creates a scanner over the archive at `archive`.
    pub fn new(archive: impl Into<PathBuf>, loader: Arc<dyn ClassLoader>) -> Self {
        Self {
            archive: archive.into(),
            loader,
            options: ScanOptions::default(),
        }
    }

    /// Sets the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the path of the archive this scanner reads.
    pub fn archive_path(&self) -> &Path {
        &self.archive
    }

    /// Collects the entry names under the location's prefix, sorted.
    fn entries_under(&self, location: &Location) -> Result<Vec<String>, ScanError> {
        let file = File::open(&self.archive).map_err(|e| ScanError::io(location, e))?;
        let archive = ZipArchive::new(file).map_err(|e| ScanError::archive(location, e))?;

        let prefix = entry_prefix(location.path());
        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with(&prefix))
            .map(str::to_owned)
            .collect();
        names.sort();
        Ok(names)
    }
}

/// The entry-name prefix that selects candidates for a location path.
fn entry_prefix(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("{path}/")
    }
}

/// Returns the simple name of an entry: everything after the last `/`.
fn simple_name(entry: &str) -> &str {
    entry.rsplit('/').next().unwrap_or(entry)
}

impl Scanner for ArchiveScanner {
    fn scan_for_resources(
        &self,
        location: &Location,
        filter: &dyn ResourceFilter,
    ) -> Result<Vec<BoxedResource>, ScanError> {
        let mut resources: Vec<BoxedResource> = Vec::new();
        for entry in self.entries_under(location)? {
            // Directory markers carry no contents.
            if entry.ends_with('/') {
                continue;
            }
            if filter.is_match(simple_name(&entry)) {
                resources.push(Box::new(ArchiveResource::new(self.archive.clone(), entry)));
            }
        }

        tracing::debug!(
            location = %location,
            archive = %self.archive.display(),
            count = resources.len(),
            "scanned archive resources"
        );
        Ok(resources)
    }

    fn scan_for_classes(
        &self,
        location: &Location,
        filter: &dyn ClassFilter,
    ) -> Result<Vec<LoadedClass>, ScanError> {
        let mut classes = Vec::new();
        for entry in self.entries_under(location)? {
            let Some(stem) = entry.strip_suffix(CLASS_SUFFIX) else {
                continue;
            };
            // Archive entries carry the full package path.
            let qualified_name = stem.replace('/', ".");

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

/// A resource inside a jar-like archive.
///
/// Holds the archive path and entry name only; the archive is re-opened
/// for each read so no handle outlives the call that needs it.
#[derive(Debug, Clone)]
pub struct ArchiveResource {
    /// Path of the archive on disk.
    archive: PathBuf,
    /// Full entry name inside the archive.
    entry: String,
    /// Simple name of the entry.
    file_name: String,
}

impl ArchiveResource {
    /// Creates a resource for `entry` inside `archive`.
    pub fn new(archive: PathBuf, entry: String) -> Self {
        let file_name = simple_name(&entry).to_owned();
        Self {
            archive,
            entry,
            file_name,
        }
    }

    /// The `archive!entry` form used to identify this resource in errors.
    fn qualified_path(&self) -> String {
        format!("{}!{}", self.archive.display(), self.entry)
    }
}

impl Resource for ArchiveResource {
    fn location(&self) -> &str {
        &self.entry
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn load_as_bytes(&self) -> Result<Vec<u8>, ScanError> {
        let file = File::open(&self.archive)
            .map_err(|e| ScanError::resource_read(self.qualified_path(), e))?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| ScanError::resource_read(self.qualified_path(), e))?;
        let mut entry = archive
            .by_name(&self.entry)
            .map_err(|e| ScanError::resource_read(self.qualified_path(), e))?;

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ScanError::resource_read(self.qualified_path(), e))?;
        Ok(bytes)
    }
}

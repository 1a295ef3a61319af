//! Classpath-entry resolution: deciding which backing store owns a
//! classpath-kind location.
//!
//! A classpath location names a package, not a store; at runtime some
//! classpath entry — an exploded directory, an archive, or the managed
//! runtime itself — owns that package. Resolution is an external
//! collaborator capability the dispatcher trusts: the core scanners never
//! reimplement it.

use crate::core::error::ScanError;
use crate::core::location::Location;

use std::fs::File;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// The concrete nature of the classpath entry that owns a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPathEntry {
    /// An exploded directory rooted at the given path.
    Directory(PathBuf),
    /// A jar-like archive file at the given path.
    Archive(PathBuf),
    /// The managed runtime's asset store and bytecode index.
    ManagedAssets,
}

/// Resolves a classpath-kind location to the entry that owns it.
pub trait ClassPathResolver: Send + Sync {
    /// Returns the classpath entry owning `location`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Unresolved`] if no entry owns the location,
    /// or a wrapped store error if probing an entry fails.
    fn resolve(&self, location: &Location) -> Result<ClassPathEntry, ScanError>;
}

/// A classpath made of an ordered list of entry roots: directories and
/// `.jar`/`.zip` archives.
///
/// Resolution walks the roots in order and picks the first entry that
/// owns the location's path — a directory containing it, or an archive
/// with at least one entry under it. Order disambiguates when several
/// entries carry the same package prefix.
///
/// # Examples
///
/// ```rust,no_run
/// use rootscan::dispatch::{ClassPath, ClassPathResolver};
/// use rootscan::core::Location;
///
/// let class_path = ClassPath::new()
///     .with_root("target/classes")
///     .with_root("lib/util-2.0.4.jar");
///
/// let location = Location::parse("classpath:db.migration").unwrap();
/// let entry = class_path.resolve(&location).unwrap();
/// # let _ = entry;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    /// Entry roots, in precedence order.
    roots: Vec<PathBuf>,
}

impl ClassPath {
    /// Creates an empty classpath.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Returns the entry roots in precedence order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Returns `true` if the archive at `root` carries entries under the
    /// location's path.
    fn archive_owns(root: &Path, location: &Location) -> Result<bool, ScanError> {
        let file = File::open(root).map_err(|e| ScanError::io(location, e))?;
        let archive = ZipArchive::new(file).map_err(|e| ScanError::archive(location, e))?;

        let path = location.path();
        if path.is_empty() {
            return Ok(archive.len() > 0);
        }
        let prefix = format!("{path}/");
        let owns = archive.file_names().any(|name| name.starts_with(&prefix));
        Ok(owns)
    }
}

fn is_archive(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jar") | Some("zip")
    )
}

impl ClassPathResolver for ClassPath {
    fn resolve(&self, location: &Location) -> Result<ClassPathEntry, ScanError> {
        for root in &self.roots {
            if root.is_dir() {
                if root.join(location.path()).is_dir() {
                    return Ok(ClassPathEntry::Directory(root.clone()));
                }
            } else if root.is_file() && is_archive(root) && Self::archive_owns(root, location)? {
                return Ok(ClassPathEntry::Archive(root.clone()));
            }
        }
        Err(ScanError::unresolved(location))
    }
}

/// A resolver for managed runtimes, where every classpath location is
/// served by the platform's asset store and bytecode index.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManagedAssetsResolver;

impl ClassPathResolver for ManagedAssetsResolver {
    fn resolve(&self, _location: &Location) -> Result<ClassPathEntry, ScanError> {
        Ok(ClassPathEntry::ManagedAssets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_jar(path: &Path, entries: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for entry in entries {
            zip.start_file(*entry, FileOptions::default()).unwrap();
            zip.write_all(b"contents").unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_directory_entry_wins_when_it_owns_the_path() {
        let dir = TempDir::new().unwrap();
        let exploded = dir.path().join("classes");
        fs::create_dir_all(exploded.join("db/migration")).unwrap();
        let jar = dir.path().join("other.jar");
        write_jar(&jar, &["db/migration/V1.sql"]);

        let class_path = ClassPath::new().with_root(&exploded).with_root(&jar);
        let location = Location::parse("classpath:db.migration").unwrap();

        assert_eq!(
            class_path.resolve(&location).unwrap(),
            ClassPathEntry::Directory(exploded)
        );
    }

    #[test]
    fn test_archive_entry_resolution() {
        let dir = TempDir::new().unwrap();
        let exploded = dir.path().join("classes");
        fs::create_dir_all(&exploded).unwrap();
        let jar = dir.path().join("migrations.jar");
        write_jar(&jar, &["db/migration/V1.sql"]);

        // The exploded directory exists but does not contain db/migration.
        let class_path = ClassPath::new().with_root(&exploded).with_root(&jar);
        let location = Location::parse("classpath:db.migration").unwrap();

        assert_eq!(
            class_path.resolve(&location).unwrap(),
            ClassPathEntry::Archive(jar)
        );
    }

    #[test]
    fn test_unowned_location_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("empty.jar");
        write_jar(&jar, &["other/thing.txt"]);

        let class_path = ClassPath::new().with_root(&jar);
        let location = Location::parse("classpath:db.migration").unwrap();

        let err = class_path.resolve(&location).unwrap_err();
        assert!(matches!(err, ScanError::Unresolved { .. }));
        assert_eq!(err.location(), Some("classpath:db/migration"));
    }

    #[test]
    fn test_corrupt_archive_probe_is_wrapped() {
        let dir = TempDir::new().unwrap();
        let fake = dir.path().join("broken.jar");
        fs::write(&fake, b"this is not a zip file").unwrap();

        let class_path = ClassPath::new().with_root(&fake);
        let location = Location::parse("classpath:db.migration").unwrap();

        let err = class_path.resolve(&location).unwrap_err();
        assert!(matches!(err, ScanError::Archive { .. }));
    }

    #[test]
    fn test_managed_assets_resolver() {
        let location = Location::parse("classpath:anything").unwrap();
        assert_eq!(
            ManagedAssetsResolver.resolve(&location).unwrap(),
            ClassPathEntry::ManagedAssets
        );
    }
}

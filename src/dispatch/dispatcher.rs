//! The scan dispatcher: one entry point routing each location to exactly
//! one backing-store scanner.

use crate::backends::archive::ArchiveScanner;
use crate::backends::asset::{AssetContext, ManagedAssetScanner};
use crate::backends::filesystem::FileSystemScanner;
use crate::core::class::{ClassLoader, LoadedClass};
use crate::core::error::ScanError;
use crate::core::filter::{ClassFilter, ResourceFilter};
use crate::core::location::Location;
use crate::core::resource::BoxedResource;
use crate::core::traits::{BoxedScanner, ScanOptions, Scanner};
use crate::dispatch::class_path::{
    ClassPath, ClassPathEntry, ClassPathResolver, ManagedAssetsResolver,
};

use std::fmt;
use std::sync::Arc;

/// Routes each scan to the backend that owns the location.
///
/// Filesystem-kind locations always use the filesystem backend.
/// Classpath-kind locations are resolved through the configured
/// [`ClassPathResolver`] to whichever backend matches the concrete nature
/// of the owning classpath entry: an exploded directory, an archive, or
/// the managed runtime's asset store.
///
/// # Examples
///
/// ```rust
/// use rootscan::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), ScanError> {
/// let store = InMemoryAssetStore::new()
///     .with_asset("db/migration/V1__init.sql", b"create table one;".to_vec());
/// let index = InMemoryBytecodeIndex::new();
///
/// let dispatcher = ScanDispatcher::builder()
///     .class_loader(Arc::new(MapClassLoader::new()))
///     .asset_context(AssetContext::new(Arc::new(store), Arc::new(index)))
///     .build()?;
///
/// let location = Location::parse("classpath:db/migration")?;
/// let resources =
///     dispatcher.scan_for_resources(&location, &|name: &str| name.ends_with(".sql"))?;
/// assert_eq!(resources.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct ScanDispatcher {
    /// Class-loading collaborator handed to every backend.
    loader: Arc<dyn ClassLoader>,
    /// Classpath-entry resolution collaborator.
    resolver: Arc<dyn ClassPathResolver>,
    /// Platform context for the managed-asset backend, when available.
    asset_context: Option<AssetContext>,
    /// Options handed to every backend.
    options: ScanOptions,
}

impl fmt::Debug for ScanDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanDispatcher")
            .field("has_asset_context", &self.asset_context.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ScanDispatcher {
    /// Starts building a dispatcher.
    pub fn builder() -> ScanDispatcherBuilder {
        ScanDispatcherBuilder::default()
    }

    /// Selects the backend for `location`.
    fn backend_for(&self, location: &Location) -> Result<BoxedScanner, ScanError> {
        if location.is_file_system() {
            return Ok(Box::new(
                FileSystemScanner::new(Arc::clone(&self.loader)).with_options(self.options),
            ));
        }

        match self.resolver.resolve(location)? {
            ClassPathEntry::Directory(root) => Ok(Box::new(
                FileSystemScanner::new(Arc::clone(&self.loader))
                    .with_class_path_root(root)
                    .with_options(self.options),
            )),
            ClassPathEntry::Archive(path) => Ok(Box::new(
                ArchiveScanner::new(path, Arc::clone(&self.loader)).with_options(self.options),
            )),
            ClassPathEntry::ManagedAssets => {
                let context = self.asset_context.clone().ok_or_else(|| {
                    ScanError::configuration(
                        "location resolves to managed assets but no asset context is configured",
                    )
                })?;
                Ok(Box::new(
                    ManagedAssetScanner::new(context, Arc::clone(&self.loader))
                        .with_options(self.options),
                ))
            }
        }
    }
}

impl Scanner for ScanDispatcher {
    fn scan_for_resources(
        &self,
        location: &Location,
        filter: &dyn ResourceFilter,
    ) -> Result<Vec<BoxedResource>, ScanError> {
        self.backend_for(location)?.scan_for_resources(location, filter)
    }

    fn scan_for_classes(
        &self,
        location: &Location,
        filter: &dyn ClassFilter,
    ) -> Result<Vec<LoadedClass>, ScanError> {
        self.backend_for(location)?.scan_for_classes(location, filter)
    }
}

/// Builder for [`ScanDispatcher`].
#[derive(Default)]
pub struct ScanDispatcherBuilder {
    loader: Option<Arc<dyn ClassLoader>>,
    resolver: Option<Arc<dyn ClassPathResolver>>,
    asset_context: Option<AssetContext>,
    options: ScanOptions,
}

impl ScanDispatcherBuilder {
    /// Sets the class-loading collaborator. Required.
    pub fn class_loader(mut self, loader: Arc<dyn ClassLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Sets the classpath-entry resolver.
    ///
    /// Defaults to [`ManagedAssetsResolver`] when an asset context is
    /// configured, otherwise to an empty [`ClassPath`] under which every
    /// classpath-kind location is unresolved.
    pub fn class_path_resolver(mut self, resolver: Arc<dyn ClassPathResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets the platform context for the managed-asset backend.
    pub fn asset_context(mut self, context: AssetContext) -> Self {
        self.asset_context = Some(context);
        self
    }

    /// Sets the options handed to every backend.
    pub fn options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the dispatcher.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] if no class loader was
    /// supplied.
    pub fn build(self) -> Result<ScanDispatcher, ScanError> {
        let loader = self
            .loader
            .ok_or_else(|| ScanError::configuration("a class loader is required"))?;
        let resolver = self.resolver.unwrap_or_else(|| {
            if self.asset_context.is_some() {
                Arc::new(ManagedAssetsResolver)
            } else {
                Arc::new(ClassPath::new())
            }
        });
        Ok(ScanDispatcher {
            loader,
            resolver,
            asset_context: self.asset_context,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::asset::{InMemoryAssetStore, InMemoryBytecodeIndex};
    use crate::core::class::MapClassLoader;
    use crate::core::filter::MatchAll;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn dispatcher_with_class_path(class_path: ClassPath, loader: MapClassLoader) -> ScanDispatcher {
        ScanDispatcher::builder()
            .class_loader(Arc::new(loader))
            .class_path_resolver(Arc::new(class_path))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_a_class_loader() {
        let err = ScanDispatcher::builder().build().unwrap_err();
        assert!(matches!(err, ScanError::Configuration { .. }));
    }

    #[test]
    fn test_dispatcher_debug_omits_collaborators() {
        let dispatcher = dispatcher_with_class_path(ClassPath::new(), MapClassLoader::new());
        let rendered = format!("{dispatcher:?}");
        assert!(rendered.starts_with("ScanDispatcher"));
        assert!(rendered.contains("has_asset_context: false"));
    }

    #[test]
    fn test_filesystem_location_uses_filesystem_backend() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("V1__init.sql"), "create table one;").unwrap();

        let dispatcher = dispatcher_with_class_path(ClassPath::new(), MapClassLoader::new());
        let location =
            Location::parse(&format!("filesystem:{}", dir.path().display())).unwrap();

        let resources = dispatcher.scan_for_resources(&location, &MatchAll).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].file_name(), "V1__init.sql");
    }

    #[test]
    fn test_classpath_location_routes_to_owning_directory() {
        let dir = TempDir::new().unwrap();
        let exploded = dir.path().join("classes");
        fs::create_dir_all(exploded.join("db/migration")).unwrap();
        fs::write(exploded.join("db/migration/V1__init.sql"), "one").unwrap();

        let class_path = ClassPath::new().with_root(&exploded);
        let dispatcher = dispatcher_with_class_path(class_path, MapClassLoader::new());
        let location = Location::parse("classpath:db.migration").unwrap();

        let resources = dispatcher.scan_for_resources(&location, &MatchAll).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].location(), "V1__init.sql");
    }

    #[test]
    fn test_classpath_location_routes_to_owning_archive() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("migrations.jar");
        let file = File::create(&jar).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("db/migration/V1__init.sql", FileOptions::default())
            .unwrap();
        zip.write_all(b"one").unwrap();
        zip.finish().unwrap();

        let class_path = ClassPath::new().with_root(&jar);
        let dispatcher = dispatcher_with_class_path(class_path, MapClassLoader::new());
        let location = Location::parse("classpath:db.migration").unwrap();

        let resources = dispatcher.scan_for_resources(&location, &MatchAll).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].location(), "db/migration/V1__init.sql");
    }

    #[test]
    fn test_unowned_classpath_location_fails() {
        let dispatcher = dispatcher_with_class_path(ClassPath::new(), MapClassLoader::new());
        let location = Location::parse("classpath:db.migration").unwrap();

        let err = dispatcher
            .scan_for_resources(&location, &MatchAll)
            .unwrap_err();
        assert!(matches!(err, ScanError::Unresolved { .. }));
    }

    #[test]
    fn test_managed_assets_requires_a_context() {
        let dispatcher = ScanDispatcher::builder()
            .class_loader(Arc::new(MapClassLoader::new()))
            .class_path_resolver(Arc::new(ManagedAssetsResolver))
            .build()
            .unwrap();
        let location = Location::parse("classpath:db/migration").unwrap();

        let err = dispatcher
            .scan_for_resources(&location, &MatchAll)
            .unwrap_err();
        assert!(matches!(err, ScanError::Configuration { .. }));
    }

    #[test]
    fn test_asset_context_enables_managed_backend_by_default() {
        let store = InMemoryAssetStore::new()
            .with_asset("db/migration/V1__init.sql", b"one".to_vec());
        let index = InMemoryBytecodeIndex::new().with_class("com.example.Foo");
        let loader = MapClassLoader::new().with_class("com.example.Foo");

        let dispatcher = ScanDispatcher::builder()
            .class_loader(Arc::new(loader))
            .asset_context(AssetContext::new(Arc::new(store), Arc::new(index)))
            .build()
            .unwrap();

        let resources = dispatcher
            .scan_for_resources(
                &Location::parse("classpath:db/migration").unwrap(),
                &MatchAll,
            )
            .unwrap();
        assert_eq!(resources.len(), 1);

        let classes = dispatcher
            .scan_for_classes(&Location::parse("classpath:com.example").unwrap(), &MatchAll)
            .unwrap();
        assert_eq!(classes[0].qualified_name(), "com.example.Foo");
    }
}

//! The polymorphic scanner contract and its options.
//!
//! Every backing-store backend implements [`Scanner`], letting the same
//! filter-driven enumeration run unmodified over a directory tree, an
//! archive, or a managed asset index. Calls are synchronous and return a
//! fully materialized, ordered result set; there is no streaming and no
//! cross-invocation caching.

use crate::core::class::LoadedClass;
use crate::core::error::ScanError;
use crate::core::filter::{ClassFilter, ResourceFilter};
use crate::core::location::Location;
use crate::core::resource::BoxedResource;

use serde::{Deserialize, Serialize};

/// The uniform contract implemented by every backing-store scanner.
///
/// Both operations are total over well-formed input but may fail with a
/// [`ScanError`] wrapping the underlying store or index error; a scanner
/// never silently swallows a store-access failure, and no partial result
/// set is returned on failure.
///
/// Results are ordered deterministically (lexicographic by logical path
/// for resources, by traversal order of the store's sorted index for
/// classes), so repeated scans of an unchanged store yield identical
/// sequences.
pub trait Scanner: Send + Sync {
    /// Scans for resources under `location` whose simple name passes
    /// `filter`.
    fn scan_for_resources(
        &self,
        location: &Location,
        filter: &dyn ResourceFilter,
    ) -> Result<Vec<BoxedResource>, ScanError>;

    /// Scans for classes under `location`, resolving each discovered name
    /// through the class-loading collaborator and keeping those whose
    /// loaded class passes `filter`.
    fn scan_for_classes(
        &self,
        location: &Location,
        filter: &dyn ClassFilter,
    ) -> Result<Vec<LoadedClass>, ScanError>;
}

/// A boxed scanner for type-erased storage.
pub type BoxedScanner = Box<dyn Scanner>;

/// Policy applied when a discovered class name cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingClassPolicy {
    /// Abort the whole scan with
    /// [`ScanError::ClassResolution`](crate::core::ScanError::ClassResolution).
    #[default]
    FailFast,
    /// Silently exclude the unresolvable name and continue. Opt-in for
    /// environments where partial classpaths are expected.
    SkipAndContinue,
}

/// Options shared by all backends.
///
/// # Examples
///
/// ```rust
/// use rootscan::core::{MissingClassPolicy, ScanOptions};
///
/// let options = ScanOptions::new()
///     .with_missing_class_policy(MissingClassPolicy::SkipAndContinue);
/// assert_eq!(options.missing_class_policy(), MissingClassPolicy::SkipAndContinue);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanOptions {
    /// What to do when a discovered class name is not loadable.
    #[serde(default)]
    missing_class_policy: MissingClassPolicy,
}

impl ScanOptions {
    /// Creates options with the default fail-fast policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the missing-class policy.
    pub fn with_missing_class_policy(mut self, policy: MissingClassPolicy) -> Self {
        self.missing_class_policy = policy;
        self
    }

    /// Returns the missing-class policy.
    pub fn missing_class_policy(&self) -> MissingClassPolicy {
        self.missing_class_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_fail_fast() {
        assert_eq!(
            ScanOptions::new().missing_class_policy(),
            MissingClassPolicy::FailFast
        );
    }

    #[test]
    fn test_options_builder() {
        let options =
            ScanOptions::new().with_missing_class_policy(MissingClassPolicy::SkipAndContinue);
        assert_eq!(
            options.missing_class_policy(),
            MissingClassPolicy::SkipAndContinue
        );
    }

    #[test]
    fn test_options_serde() {
        let options =
            ScanOptions::new().with_missing_class_policy(MissingClassPolicy::SkipAndContinue);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("skip-and-continue"));

        let back: ScanOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(back.missing_class_policy(), MissingClassPolicy::FailFast);
    }
}

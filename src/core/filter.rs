//! Filter predicates applied during enumeration.
//!
//! Filters are caller-supplied capability objects: stateless, side-effect
//! free, invoked synchronously once per candidate in enumeration order.
//! Resource filters see the candidate's simple name; class filters see the
//! loaded class itself, not its name.

use crate::core::class::LoadedClass;
use crate::core::error::ScanError;

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Decides whether a resource with the given simple name is part of the
/// result set.
pub trait ResourceFilter {
    /// Returns `true` if a resource named `simple_name` matches.
    fn is_match(&self, simple_name: &str) -> bool;
}

impl<F> ResourceFilter for F
where
    F: Fn(&str) -> bool,
{
    fn is_match(&self, simple_name: &str) -> bool {
        self(simple_name)
    }
}

/// Decides whether a loaded class is part of the result set.
pub trait ClassFilter {
    /// Returns `true` if the loaded class matches.
    fn is_match(&self, class: &LoadedClass) -> bool;
}

impl<F> ClassFilter for F
where
    F: Fn(&LoadedClass) -> bool,
{
    fn is_match(&self, class: &LoadedClass) -> bool {
        self(class)
    }
}

/// A filter that accepts every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl ResourceFilter for MatchAll {
    fn is_match(&self, _simple_name: &str) -> bool {
        true
    }
}

impl ClassFilter for MatchAll {
    fn is_match(&self, _class: &LoadedClass) -> bool {
        true
    }
}

/// Matches resource names ending with a fixed suffix.
#[derive(Debug, Clone)]
pub struct SuffixFilter {
    suffix: String,
}

impl SuffixFilter {
    /// Creates a filter matching names that end with `suffix`.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl ResourceFilter for SuffixFilter {
    fn is_match(&self, simple_name: &str) -> bool {
        simple_name.ends_with(&self.suffix)
    }
}

/// Matches resource names starting with a fixed prefix.
#[derive(Debug, Clone)]
pub struct PrefixFilter {
    prefix: String,
}

impl PrefixFilter {
    /// Creates a filter matching names that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ResourceFilter for PrefixFilter {
    fn is_match(&self, simple_name: &str) -> bool {
        simple_name.starts_with(&self.prefix)
    }
}

/// Matches resource names against a set of glob patterns.
///
/// # Examples
///
/// ```rust
/// use rootscan::core::{GlobFilter, ResourceFilter};
///
/// let filter = GlobFilter::new(&["V*.sql", "R__*.sql"]).unwrap();
/// assert!(filter.is_match("V1__init.sql"));
/// assert!(!filter.is_match("notes.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobFilter {
    set: GlobSet,
}

impl GlobFilter {
    /// Compiles the given glob patterns into a filter.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] if a pattern does not compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_ref()).map_err(|e| {
                ScanError::configuration(format!(
                    "invalid glob pattern '{}': {}",
                    pattern.as_ref(),
                    e
                ))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| ScanError::configuration(format!("unable to build glob set: {e}")))?;
        Ok(Self { set })
    }
}

impl ResourceFilter for GlobFilter {
    fn is_match(&self, simple_name: &str) -> bool {
        self.set.is_match(simple_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_filters() {
        let resource_filter = |name: &str| name.ends_with(".sql");
        assert!(ResourceFilter::is_match(&resource_filter, "V1__init.sql"));
        assert!(!ResourceFilter::is_match(&resource_filter, "readme.md"));

        let class_filter = |class: &LoadedClass| class.package() == "com.example";
        let class = LoadedClass::with_unit("com.example.Migration", ());
        assert!(ClassFilter::is_match(&class_filter, &class));
    }

    #[test]
    fn test_match_all() {
        assert!(ResourceFilter::is_match(&MatchAll, "anything"));
        let class = LoadedClass::with_unit("A", ());
        assert!(ClassFilter::is_match(&MatchAll, &class));
    }

    #[test]
    fn test_suffix_and_prefix() {
        assert!(SuffixFilter::new(".sql").is_match("V1.sql"));
        assert!(!SuffixFilter::new(".sql").is_match("V1.sql.bak"));
        assert!(PrefixFilter::new("V").is_match("V1.sql"));
        assert!(!PrefixFilter::new("V").is_match("R__repeat.sql"));
    }

    #[test]
    fn test_glob_filter() {
        let filter = GlobFilter::new(&["*.sql"]).unwrap();
        assert!(filter.is_match("V1__init.sql"));
        assert!(!filter.is_match("V1__init.sql.orig"));
    }

    #[test]
    fn test_invalid_glob_is_a_configuration_error() {
        let err = GlobFilter::new(&["a{b"]).unwrap_err();
        assert!(matches!(err, ScanError::Configuration { .. }));
    }
}

//! The `Location` addressing scheme for scan roots.
//!
//! A location is a pure value: parsing normalizes a descriptor string such
//! as `classpath:db/migration` or `filesystem:/opt/app/sql` into a kind
//! and a slash-separated path, with no I/O and no knowledge of which
//! backing store will eventually serve it.

use crate::core::error::LocationError;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The descriptor prefix for classpath locations.
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// The descriptor prefix for filesystem locations.
pub const FILESYSTEM_PREFIX: &str = "filesystem:";

/// The kind of backing store a location addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// A package root served by some classpath entry.
    ClassPath,
    /// A directory tree addressed by filesystem path.
    FileSystem,
}

impl StoreKind {
    /// Returns the descriptor prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::ClassPath => CLASSPATH_PREFIX,
            Self::FileSystem => FILESYSTEM_PREFIX,
        }
    }
}

/// A starting location to scan from.
///
/// Identity, ordering, and hashing are all defined over the normalized
/// descriptor, so `classpath:db.migration` and `classpath:db/migration`
/// are the same location.
///
/// # Examples
///
/// ```rust
/// use rootscan::core::Location;
///
/// let location = Location::parse("db.migration")?;
/// assert!(location.is_class_path());
/// assert_eq!(location.path(), "db/migration");
/// assert_eq!(location.descriptor(), "classpath:db/migration");
/// # Ok::<(), rootscan::core::LocationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Location {
    /// The kind of backing store addressed.
    kind: StoreKind,
    /// The normalized, slash-separated path part. Never ends with `/`.
    path: String,
}

impl Location {
    /// Parses and normalizes a location descriptor.
    ///
    /// Normalization trims surrounding whitespace, converts backslashes to
    /// forward slashes, and strips a single trailing slash. A descriptor
    /// without a `:` defaults to the `classpath:` kind. For classpath
    /// locations, dots are folded into slashes and a single leading slash
    /// is dropped; filesystem paths are kept verbatim, so
    /// `filesystem:util-2.0.4/db` keeps its dots and
    /// `filesystem:/db/migration` stays absolute.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::UnknownPrefix`] when the descriptor
    /// carries a prefix other than `classpath:` or `filesystem:`.
    pub fn parse(descriptor: &str) -> Result<Self, LocationError> {
        let normalized = descriptor.trim().replace('\\', "/");

        let (prefix, raw_path) = match normalized.find(':') {
            Some(index) => normalized.split_at(index + 1),
            None => (CLASSPATH_PREFIX, normalized.as_str()),
        };

        let (kind, mut path) = match prefix {
            CLASSPATH_PREFIX => {
                let mut folded = raw_path.replace('.', "/");
                if folded.starts_with('/') {
                    folded.remove(0);
                }
                (StoreKind::ClassPath, folded)
            }
            FILESYSTEM_PREFIX => (StoreKind::FileSystem, raw_path.to_string()),
            _ => {
                return Err(LocationError::UnknownPrefix {
                    descriptor: normalized,
                })
            }
        };

        if path.ends_with('/') {
            path.pop();
        }

        Ok(Self { kind, path })
    }

    /// Returns the kind of backing store this location addresses.
    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Returns `true` if this denotes a classpath location.
    pub fn is_class_path(&self) -> bool {
        self.kind == StoreKind::ClassPath
    }

    /// Returns `true` if this denotes a filesystem location.
    pub fn is_file_system(&self) -> bool {
        self.kind == StoreKind::FileSystem
    }

    /// Returns the normalized, slash-separated path part.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the descriptor prefix, `classpath:` or `filesystem:`.
    pub fn prefix(&self) -> &'static str {
        self.kind.prefix()
    }

    /// Returns the complete normalized descriptor.
    pub fn descriptor(&self) -> String {
        format!("{}{}", self.prefix(), self.path)
    }

    /// Returns the path with slashes rewritten to dots, the package form
    /// of a classpath location.
    pub fn dotted_path(&self) -> String {
        self.path.replace('/', ".")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.path)
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.path == other.path
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor().hash(state);
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.descriptor().cmp(&other.descriptor())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.descriptor())
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let descriptor = String::deserialize(deserializer)?;
        Self::parse(&descriptor).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(location: &Location) -> u64 {
        let mut hasher = DefaultHasher::new();
        location.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_default_prefix_is_classpath() {
        let location = Location::parse("db/migration").unwrap();
        assert_eq!(location.prefix(), "classpath:");
        assert!(location.is_class_path());
        assert!(!location.is_file_system());
        assert_eq!(location.path(), "db/migration");
        assert_eq!(location.descriptor(), "classpath:db/migration");
    }

    #[test]
    fn test_classpath_dots_fold_into_slashes() {
        let location = Location::parse("classpath:db.migration").unwrap();
        assert_eq!(location.path(), "db/migration");
        assert_eq!(location.descriptor(), "classpath:db/migration");
    }

    #[test]
    fn test_classpath_leading_slash_is_stripped() {
        let location = Location::parse("classpath:/db/migration").unwrap();
        assert_eq!(location.path(), "db/migration");
        assert_eq!(location.descriptor(), "classpath:db/migration");
    }

    #[test]
    fn test_filesystem_dots_are_preserved() {
        let location = Location::parse("filesystem:util-2.0.4/db/migration").unwrap();
        assert!(location.is_file_system());
        assert_eq!(location.path(), "util-2.0.4/db/migration");
        assert_eq!(location.descriptor(), "filesystem:util-2.0.4/db/migration");
    }

    #[test]
    fn test_filesystem_absolute_path_is_preserved() {
        let location = Location::parse("filesystem:/db/migration").unwrap();
        assert_eq!(location.path(), "/db/migration");
        assert_eq!(location.descriptor(), "filesystem:/db/migration");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let location = Location::parse("classpath:db/migration/").unwrap();
        assert_eq!(location.path(), "db/migration");

        let location = Location::parse("filesystem:/opt/sql/").unwrap();
        assert_eq!(location.path(), "/opt/sql");
    }

    #[test]
    fn test_backslashes_become_slashes() {
        let location = Location::parse("filesystem:C:\\data\\sql").unwrap();
        assert_eq!(location.path(), "C:/data/sql");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let location = Location::parse("  classpath:db/migration  ").unwrap();
        assert_eq!(location.descriptor(), "classpath:db/migration");
    }

    #[test]
    fn test_unknown_prefix_is_rejected() {
        let err = Location::parse("http:foo").unwrap_err();
        assert!(matches!(err, LocationError::UnknownPrefix { .. }));
        assert!(err.to_string().contains("http:foo"));
    }

    #[test]
    fn test_reparsing_a_descriptor_is_idempotent() {
        let first = Location::parse("classpath:db.migration").unwrap();
        let second = Location::parse(&first.descriptor()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.descriptor(), "classpath:db/migration");
    }

    #[test]
    fn test_equality_and_hash_follow_the_descriptor() {
        let dotted = Location::parse("classpath:db.migration").unwrap();
        let slashed = Location::parse("classpath:db/migration").unwrap();
        let other = Location::parse("filesystem:db/migration").unwrap();

        assert_eq!(dotted, slashed);
        assert_eq!(hash_of(&dotted), hash_of(&slashed));
        assert_ne!(dotted, other);
    }

    #[test]
    fn test_ordering_follows_the_descriptor() {
        let mut locations = vec![
            Location::parse("filesystem:/opt/sql").unwrap(),
            Location::parse("classpath:db/migration").unwrap(),
            Location::parse("classpath:com/example").unwrap(),
        ];
        locations.sort();

        let descriptors: Vec<String> = locations.iter().map(Location::descriptor).collect();
        assert_eq!(
            descriptors,
            vec![
                "classpath:com/example",
                "classpath:db/migration",
                "filesystem:/opt/sql",
            ]
        );
    }

    #[test]
    fn test_from_str_and_display() {
        let location: Location = "db.migration".parse().unwrap();
        assert_eq!(location.to_string(), "classpath:db/migration");
    }

    #[test]
    fn test_dotted_path() {
        let location = Location::parse("classpath:com/example/app").unwrap();
        assert_eq!(location.dotted_path(), "com.example.app");
    }

    #[test]
    fn test_serde_round_trip() {
        let location = Location::parse("classpath:db.migration").unwrap();
        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(json, "\"classpath:db/migration\"");

        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, location);

        let err = serde_json::from_str::<Location>("\"http:foo\"").unwrap_err();
        assert!(err.to_string().contains("unknown prefix"));
    }
}

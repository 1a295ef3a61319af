//! Error types for the rootscan library.
//!
//! The library never panics on the non-test path; every failure is returned
//! as a `Result` value. Backends never swallow a store-access error: each
//! native I/O, archive, or class-loading error is wrapped into [`ScanError`]
//! with the offending location before it crosses the scanner boundary.

use crate::core::location::Location;
use crate::core::resource::ResourceEncoding;

use std::fmt;
use thiserror::Error;

/// A malformed location descriptor.
///
/// Raised at parse time only; a successfully parsed [`Location`] can no
/// longer produce this error.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The descriptor carried a prefix other than `classpath:` or
    /// `filesystem:`.
    #[error("unknown prefix, should be either filesystem: or classpath: {descriptor}")]
    UnknownPrefix {
        /// The normalized descriptor that was rejected.
        descriptor: String,
    },
}

/// A fully qualified class name that could not be resolved by the
/// class-loading collaborator.
///
/// This is the error type the [`ClassLoader`](crate::core::ClassLoader)
/// contract returns; the scanner wraps it into
/// [`ScanError::ClassResolution`] together with the location being scanned.
#[derive(Debug, Error)]
#[error("unable to load class '{name}': {reason}")]
pub struct ClassLoadError {
    /// The fully qualified name that failed to resolve.
    name: String,
    /// Human-readable reason for the failure.
    reason: String,
    /// The underlying cause, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClassLoadError {
    /// Creates a new class-load error.
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Attaches an underlying cause.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the fully qualified name that failed to resolve.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The main error type for scan operations.
///
/// Every variant produced while enumerating a backing store carries the
/// descriptor of the offending location; resource-read variants carry the
/// path of the resource instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An I/O error occurred while enumerating a backing store.
    #[error("unable to scan location '{location}': {source}")]
    Io {
        /// Descriptor of the location being scanned.
        location: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An archive could not be opened or its entry table read.
    #[error("unable to scan archive for location '{location}': {source}")]
    Archive {
        /// Descriptor of the location being scanned.
        location: String,
        /// The underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// A class name discovered in the store could not be loaded.
    ///
    /// Under the default fail-fast policy this aborts the whole scan; see
    /// [`MissingClassPolicy`](crate::core::MissingClassPolicy).
    #[error("unable to resolve class '{class_name}' found under '{location}'")]
    ClassResolution {
        /// Descriptor of the location being scanned.
        location: String,
        /// The fully qualified name that was discovered but not loadable.
        class_name: String,
        /// The loader's error.
        #[source]
        source: ClassLoadError,
    },

    /// A discovered resource could not be materialized on demand.
    #[error("unable to load resource: {path}")]
    ResourceRead {
        /// Path of the resource that failed to read.
        path: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A resource's bytes were not valid text in the requested encoding.
    #[error("resource '{path}' is not valid {encoding} text")]
    Encoding {
        /// Path of the resource.
        path: String,
        /// The encoding that failed to decode.
        encoding: ResourceEncoding,
    },

    /// No configured classpath entry owns the requested location.
    #[error("no classpath entry owns location '{location}'")]
    Unresolved {
        /// Descriptor of the unowned location.
        location: String,
    },

    /// The scanner was assembled or invoked with an invalid configuration.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A malformed location descriptor.
    #[error(transparent)]
    Location(#[from] LocationError),
}

impl ScanError {
    /// Creates an `Io` error for the given location.
    pub fn io(location: &Location, source: std::io::Error) -> Self {
        Self::Io {
            location: location.descriptor(),
            source,
        }
    }

    /// Creates an `Archive` error for the given location.
    pub fn archive(location: &Location, source: zip::result::ZipError) -> Self {
        Self::Archive {
            location: location.descriptor(),
            source,
        }
    }

    /// Creates a `ClassResolution` error for the given location.
    pub fn class_resolution(
        location: &Location,
        class_name: impl Into<String>,
        source: ClassLoadError,
    ) -> Self {
        Self::ClassResolution {
            location: location.descriptor(),
            class_name: class_name.into(),
            source,
        }
    }

    /// Creates a `ResourceRead` error for the given resource path.
    pub fn resource_read(
        path: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ResourceRead {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Creates an `Encoding` error for the given resource path.
    pub fn encoding(path: impl Into<String>, encoding: ResourceEncoding) -> Self {
        Self::Encoding {
            path: path.into(),
            encoding,
        }
    }

    /// Creates an `Unresolved` error for the given location.
    pub fn unresolved(location: &Location) -> Self {
        Self::Unresolved {
            location: location.descriptor(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl fmt::Display) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Returns the descriptor of the offending location, if this error is
    /// associated with one.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Io { location, .. }
            | Self::Archive { location, .. }
            | Self::ClassResolution { location, .. }
            | Self::Unresolved { location } => Some(location),
            _ => None,
        }
    }

    /// Returns `true` if this error reports an unresolvable class.
    pub fn is_class_resolution(&self) -> bool {
        matches!(self, Self::ClassResolution { .. })
    }
}

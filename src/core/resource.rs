//! The resource abstraction: lazily readable items discovered under a
//! location.
//!
//! Discovery only inspects names and metadata; contents are materialized
//! on demand through [`Resource::load_as_bytes`] and
//! [`Resource::load_as_string`], both of which may fail independently of
//! discovery.

use crate::core::error::ScanError;

use std::fmt;

/// Text encodings supported by [`Resource::load_as_string`].
///
/// Encoding-table lookup is deliberately out of scope; this closed set
/// covers the formats resources are read as in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceEncoding {
    /// UTF-8.
    Utf8,
    /// ISO-8859-1 (Latin-1). Decoding never fails; every byte maps to a
    /// code point.
    Latin1,
}

impl ResourceEncoding {
    /// Decodes `bytes` in this encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Encoding`] if the bytes are not valid text in
    /// this encoding. `path` identifies the resource in the error.
    pub fn decode(self, path: &str, bytes: Vec<u8>) -> Result<String, ScanError> {
        match self {
            Self::Utf8 => {
                String::from_utf8(bytes).map_err(|_| ScanError::encoding(path, self))
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for ResourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => f.write_str("UTF-8"),
            Self::Latin1 => f.write_str("ISO-8859-1"),
        }
    }
}

/// One addressable item discovered under a location.
///
/// A resource belongs to exactly one backing store and one scan
/// invocation; it holds whatever handle its backend needs to materialize
/// the contents later, and does not cache them.
pub trait Resource: fmt::Debug {
    /// Returns the logical location of this resource: its store-relative
    /// path with `/` separators.
    fn location(&self) -> &str;

    /// Returns the simple name of this resource, without the path.
    fn file_name(&self) -> &str;

    /// Loads this resource as a byte array.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResourceRead`] if the backing store can no
    /// longer produce the contents.
    fn load_as_bytes(&self) -> Result<Vec<u8>, ScanError>;

    /// Loads this resource as a string in the given encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResourceRead`] if reading fails and
    /// [`ScanError::Encoding`] if the bytes do not decode.
    fn load_as_string(&self, encoding: ResourceEncoding) -> Result<String, ScanError> {
        let bytes = self.load_as_bytes()?;
        encoding.decode(self.location(), bytes)
    }
}

/// A boxed resource for type-erased result sets.
pub type BoxedResource = Box<dyn Resource>;

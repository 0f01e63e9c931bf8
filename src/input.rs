//! Input abstraction for different sources

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Owned configuration bytes, either handed in by the caller or read whole
/// from a file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Input {
    source: Vec<u8>,
    filename: Option<PathBuf>,
}

impl Input {
    /// Create from bytes
    pub fn from_bytes(source: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            filename: None,
        }
    }

    /// Create from string
    pub fn from_str(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Read a whole file into memory
    ///
    /// On failure nothing is returned, so no partially read buffer can be
    /// configured.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|err| Error::io(path, &err))?;
        debug!(path = %path.display(), bytes = source.len(), "read configuration file");
        Ok(Self {
            source,
            filename: Some(path.to_path_buf()),
        })
    }

    /// Set filename for error reporting
    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Get source bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.source
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Get length in bytes
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.source
    }
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Self::from_bytes(s.into_bytes())
    }
}

impl From<&[u8]> for Input {
    fn from(b: &[u8]) -> Self {
        Self::from_bytes(b)
    }
}

impl From<Vec<u8>> for Input {
    fn from(b: Vec<u8>) -> Self {
        Self::from_bytes(b)
    }
}

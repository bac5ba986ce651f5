// File selection and client-side validation.
//
// A `FileCandidate` is whatever the user picked. Only `validate` can turn it
// into a `SelectedFile`, so anything holding a `SelectedFile` is known to be
// within the size limit and to carry an allowed extension.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{ALLOWED_EXTENSIONS, MAX_FILE_SIZE};
use crate::error::IntakeError;

/// A file the user picked, not yet validated.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// File name including its extension
    pub name: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    /// Candidate whose size is the length of its contents.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }

    /// Pick a file from disk.
    ///
    /// The size comes from metadata. Contents are only read when the file is
    /// within the upload limit; an oversized candidate carries no bytes.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;

        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Cannot stat {}", path.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let size_bytes = metadata.len();
        let bytes = if size_bytes <= MAX_FILE_SIZE {
            tokio::fs::read(path)
                .await
                .with_context(|| format!("Cannot read {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            name,
            size_bytes,
            bytes,
        })
    }
}

/// A validated file, ready to upload.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    size_bytes: u64,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the file, handing its payload to the transport.
    pub fn into_parts(self) -> (String, u64, Vec<u8>) {
        (self.name, self.size_bytes, self.bytes)
    }
}

/// Lower-cased text after the last `.` in a file name.
///
/// Names without a dot have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Check a candidate against the upload rules.
///
/// Size is checked before the extension, so an oversized file with a bad
/// extension reports the size problem.
pub fn validate(candidate: FileCandidate) -> Result<SelectedFile, IntakeError> {
    if candidate.size_bytes > MAX_FILE_SIZE {
        return Err(IntakeError::FileTooLarge {
            size: candidate.size_bytes,
        });
    }

    let extension = extension_of(&candidate.name);
    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));
    if !allowed {
        return Err(IntakeError::UnsupportedType { extension });
    }

    Ok(SelectedFile {
        name: candidate.name,
        size_bytes: candidate.size_bytes,
        bytes: candidate.bytes,
    })
}

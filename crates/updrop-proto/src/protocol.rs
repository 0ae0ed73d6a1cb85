use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::upload::UploadError;

/// The single file currently chosen for upload.
///
/// Selecting a file from disk only stats it; the bytes are streamed from
/// `path` when the request is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// Where the file lives. Empty for in-memory files.
    pub path: PathBuf,
    /// Display name, also sent as the multipart filename.
    pub name: String,
    size: u64,
    memory: Option<Arc<[u8]>>,
}

impl SelectedFile {
    pub fn from_bytes(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let contents: Vec<u8> = contents.into();
        Self {
            path: PathBuf::new(),
            name: name.into(),
            size: contents.len() as u64,
            memory: Some(contents.into()),
        }
    }

    /// Select the regular file at `path` without reading it.
    pub fn open(path: &Path) -> Result<Self, UploadError> {
        let io_err = |source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let meta = std::fs::metadata(path).map_err(io_err)?;
        if !meta.is_file() {
            return Err(io_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
            memory: None,
        })
    }

    /// Size in bytes at selection time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Contents of a file built with `from_bytes`; `None` for files on disk.
    pub fn in_memory(&self) -> Option<&[u8]> {
        self.memory.as_deref()
    }
}

/// JSON body returned by the upload endpoint.
///
/// Every field is optional on the wire: failure replies usually carry only
/// `error`, and a missing `success` counts as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File size in kilobytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Server-assigned upload time, displayed verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    /// Server-provided failure reason, ignoring empty strings.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// "128 KB", "12.5 KB". Whole numbers print without a fraction.
    pub fn size_label(&self) -> String {
        match self.size {
            Some(kb) => format!("{} KB", kb),
            None => "unknown".to_string(),
        }
    }
}

/// HTTP status plus decoded body of one upload request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerReply {
    pub status: u16,
    pub body: UploadResponse,
}

impl ServerReply {
    pub fn status_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The upload counts only when both the status and the body agree.
    pub fn accepted(&self) -> bool {
        self.status_ok() && self.body.success
    }
}

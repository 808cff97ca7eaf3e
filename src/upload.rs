// Reading the uploaded file and staging it on disk for the provider

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns the first field named `file` (case-insensitive), skipping any other field.
pub async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<UploadedImage>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        let is_file = field
            .name()
            .is_some_and(|name| name.eq_ignore_ascii_case(FILE_FIELD));
        if !is_file {
            continue;
        }

        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await?;

        return Ok(Some(UploadedImage {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// Uploaded bytes written to a temporary file, deleted when dropped.
pub struct StagedImage {
    file: NamedTempFile,
}

impl StagedImage {
    pub async fn write(bytes: &[u8]) -> io::Result<Self> {
        let file = tempfile::Builder::new().prefix("upload-").tempfile()?;
        tokio::fs::write(file.path(), bytes).await?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

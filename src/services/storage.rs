use std::path::Path;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::config;

use super::ServiceError;

/// Metadata of a PDF written to the uploads directory
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file uploaded")]
    Missing,

    #[error("Only PDF files are allowed")]
    NotPdf,

    #[error("File size must be less than {0}MB")]
    TooLarge(usize),
}

/// Validate an incoming upload before anything touches the disk
pub fn validate_upload(content_type: Option<&str>, size: usize) -> Result<(), UploadError> {
    let uploads = &config::config().uploads;

    if size == 0 {
        return Err(UploadError::Missing);
    }

    match content_type {
        Some(mime) if mime == uploads.allowed_mime => {}
        _ => return Err(UploadError::NotPdf),
    }

    if size > uploads.max_file_size_bytes {
        return Err(UploadError::TooLarge(
            uploads.max_file_size_bytes / (1024 * 1024),
        ));
    }

    Ok(())
}

/// Unique on-disk name: `{uuid}_{original}`, with any path components of the
/// client-supplied name stripped.
fn stored_file_name(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.pdf");
    format!("{}_{}", Uuid::new_v4(), base)
}

/// Write the upload to the configured directory, creating it when needed.
/// The returned `file_path` is relative (stored in the database).
pub async fn store(original_name: &str, bytes: &[u8]) -> Result<StoredFile, ServiceError> {
    let dir = &config::config().uploads.directory;
    tokio::fs::create_dir_all(dir).await?;

    let file_name = stored_file_name(original_name);
    let file_path = format!("{}/{}", dir, file_name);
    tokio::fs::write(&file_path, bytes).await?;

    Ok(StoredFile {
        file_name,
        file_path,
        file_size: bytes.len() as i64,
    })
}

/// Read a stored file back for download
pub async fn read(file_path: &str) -> Result<Vec<u8>, ServiceError> {
    match tokio::fs::read(file_path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ServiceError::NotFound("File not found on disk".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Best-effort removal; a file already gone is logged, not fatal
pub async fn remove(file_path: &str) {
    if let Err(e) = tokio::fs::remove_file(file_path).await {
        warn!("Could not delete stored file {}: {}", file_path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_uploads() {
        assert_eq!(
            validate_upload(Some("image/png"), 1024),
            Err(UploadError::NotPdf)
        );
        assert_eq!(validate_upload(None, 1024), Err(UploadError::NotPdf));
    }

    #[test]
    fn rejects_oversized_and_empty_uploads() {
        let max = crate::config::config().uploads.max_file_size_bytes;
        assert_eq!(
            validate_upload(Some("application/pdf"), max + 1),
            Err(UploadError::TooLarge(max / (1024 * 1024)))
        );
        assert_eq!(
            validate_upload(Some("application/pdf"), 0),
            Err(UploadError::Missing)
        );
    }

    #[test]
    fn accepts_pdf_within_limit() {
        assert_eq!(validate_upload(Some("application/pdf"), 1024), Ok(()));
    }

    #[test]
    fn stored_name_keeps_basename_only() {
        let name = stored_file_name("../../etc/passwd.pdf");
        assert!(name.ends_with("_passwd.pdf"));
        assert!(!name.contains(".."));
        assert!(!name.contains('/'));
    }

    #[test]
    fn stored_names_are_unique() {
        assert_ne!(stored_file_name("a.pdf"), stored_file_name("a.pdf"));
    }
}

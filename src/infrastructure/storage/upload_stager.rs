use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::domain::UploadedDocument;

/// Creates request-scoped temp files for incoming uploads.
#[derive(Debug, Clone)]
pub struct UploadStager {
    upload_dir: PathBuf,
    max_bytes: u64,
}

impl UploadStager {
    pub fn new(upload_dir: PathBuf, max_bytes: u64) -> Result<Self, StagingError> {
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self {
            upload_dir,
            max_bytes,
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn begin(
        &self,
        declared_name: String,
        media_type: String,
    ) -> Result<StagedUpload, StagingError> {
        let (file, path) = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(&self.upload_dir)?
            .into_parts();

        tracing::debug!(path = %path.display(), %declared_name, "Staging upload");

        Ok(StagedUpload {
            file: tokio::fs::File::from_std(file),
            path,
            written: 0,
            max_bytes: self.max_bytes,
            declared_name,
            media_type,
        })
    }
}

/// An upload spooled to disk. The file is removed when this value drops,
/// whichever way the owning request ends.
#[derive(Debug)]
pub struct StagedUpload {
    file: tokio::fs::File,
    path: TempPath,
    written: u64,
    max_bytes: u64,
    declared_name: String,
    media_type: String,
}

impl StagedUpload {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StagingError> {
        let written = self.written + chunk.len() as u64;
        if written > self.max_bytes {
            return Err(StagingError::TooLarge {
                limit: self.max_bytes,
            });
        }
        self.file.write_all(chunk).await?;
        self.written = written;
        Ok(())
    }

    pub fn size_bytes(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the staged bytes into memory for extraction.
    pub async fn read_document(&mut self) -> Result<UploadedDocument, StagingError> {
        self.file.flush().await?;
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(UploadedDocument::new(
            bytes,
            self.media_type.clone(),
            self.declared_name.clone(),
        ))
    }

    /// Deletes the file now and reports failures instead of ignoring them on drop.
    pub fn discard(self) -> Result<(), StagingError> {
        let Self { file, path, .. } = self;
        drop(file);
        path.close()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("upload exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;
use walkdir::WalkDir;

use super::Loader;
use crate::errors::{Error, Result};
use crate::models::{Document, SOURCE_METADATA_KEY};

/// Extracts text from PDFs with the poppler `pdftotext` binary.
///
/// `path` may be a single file or a directory; directories are walked recursively and
/// every `*.pdf` file becomes one document.
#[derive(Debug, Clone)]
pub struct PdfToTextLoader {
    pdftotext_path: PathBuf,
    path: PathBuf,
}

impl PdfToTextLoader {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(pdftotext_path: P, path: Q) -> Self {
        Self {
            pdftotext_path: pdftotext_path.into(),
            path: path.into(),
        }
    }

    async fn load_file(&self, path: &Path) -> Result<Document> {
        debug!(path = %path.display(), "extracting pdf text");
        let output = Command::new(&self.pdftotext_path)
            .arg(path)
            .arg("-")
            .output()
            .await
            .map_err(|e| Error::launch_failed(e.to_string()))?;

        if !output.status.success() {
            return Err(Error::from_exit_status(
                output.status,
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(
            Document::new(String::from_utf8_lossy(&output.stdout))
                .with_metadata(SOURCE_METADATA_KEY, path.display().to_string()),
        )
    }

    async fn load_dir(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        // Unreadable entries are skipped, matching files that fail to convert are not
        for entry in WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let is_pdf = entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(".pdf");
            if is_pdf {
                docs.push(self.load_file(entry.path()).await?);
            }
        }
        Ok(docs)
    }
}

#[async_trait]
impl Loader for PdfToTextLoader {
    async fn load(&self) -> Result<Vec<Document>> {
        if tokio::fs::metadata(&self.pdftotext_path).await.is_err() {
            return Err(Error::PdfToTextNotFound);
        }

        let metadata = tokio::fs::metadata(&self.path).await?;
        if metadata.is_dir() {
            self.load_dir().await
        } else {
            Ok(vec![self.load_file(&self.path).await?])
        }
    }
}

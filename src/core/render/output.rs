//! Writing rendered documents to the output directory

use crate::core::hcl::Document;
use crate::domain::RenderWriteError;
use std::path::{Path, PathBuf};

/// File extension of rendered documents
pub const DOCUMENT_EXTENSION: &str = "tf";

/// Writes documents as `<output_directory>/<name>.tf`
///
/// In dry-run mode nothing touches the filesystem; the target path is still
/// computed and returned.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    output_directory: PathBuf,
    dry_run: bool,
}

impl DocumentWriter {
    pub fn new(output_directory: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            output_directory: output_directory.into(),
            dry_run,
        }
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Target path for a canonical resource name
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.output_directory
            .join(format!("{name}.{DOCUMENT_EXTENSION}"))
    }

    /// Write a rendered document named after its canonical resource name
    pub async fn write_document(
        &self,
        name: &str,
        document: &Document,
    ) -> Result<PathBuf, RenderWriteError> {
        let path = self.document_path(name);
        if name.is_empty() {
            return Err(RenderWriteError::new(
                path.display().to_string(),
                "monitor name has no characters usable in a resource name",
            ));
        }

        self.write_file(&path, &document.to_string()).await?;
        Ok(path)
    }

    /// Write arbitrary text to `file_name` inside the output directory
    pub async fn write_named(&self, file_name: &str, contents: &str) -> Result<PathBuf, RenderWriteError> {
        let path = self.output_directory.join(file_name);
        self.write_file(&path, contents).await?;
        Ok(path)
    }

    async fn write_file(&self, path: &Path, contents: &str) -> Result<(), RenderWriteError> {
        if self.dry_run {
            tracing::debug!(path = %path.display(), "Dry run: skipping write");
            return Ok(());
        }

        tokio::fs::write(path, contents)
            .await
            .map_err(|e| RenderWriteError::new(path.display().to_string(), e.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Document {
        let mut document = Document::new();
        document
            .body_mut()
            .append_new_block("resource", ["t", "n"])
            .body_mut()
            .set_attribute_value("name", "N");
        document
    }

    #[tokio::test]
    async fn test_write_document() {
        let dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(dir.path(), false);

        let path = writer.write_document("login_check", &sample()).await.unwrap();

        assert_eq!(path, dir.path().join("login_check.tf"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), sample().to_string());
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(dir.path(), true);

        let path = writer.write_document("login_check", &sample()).await.unwrap();

        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_directory_is_write_error() {
        let dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(dir.path().join("missing"), false);

        let err = writer.write_document("a", &sample()).await.unwrap_err();

        assert!(err.path.ends_with("a.tf"));
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(dir.path(), false);

        assert!(writer.write_document("", &sample()).await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

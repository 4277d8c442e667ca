// src/storage/pdf_text.rs
//! Text extraction from downloaded PDFs.

use crate::error::AppError;
use std::path::{Path, PathBuf};

/// The ability to turn a stored PDF into plain text, one text line per line.
#[async_trait::async_trait]
pub trait PdfTextSource: Send + Sync {
    async fn text_of(&self, pdf: &Path) -> Result<String, AppError>;
}

/// Parses PDFs in-process with the `pdf-extract` crate.
///
/// Parsing is CPU-bound and runs on the blocking pool. A panic inside the
/// parser is reported as an error for that file only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractText;

impl PdfExtractText {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PdfTextSource for PdfExtractText {
    async fn text_of(&self, pdf: &Path) -> Result<String, AppError> {
        log::debug!("Extracting text from {}", pdf.display());
        let bytes = tokio::fs::read(pdf).await?;

        let parsed = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await;

        match parsed {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(message)) => Err(AppError::Storage {
                path: pdf.to_path_buf(),
                message: format!("unreadable PDF: {}", message),
            }),
            Err(join_error) => Err(AppError::Storage {
                path: pdf.to_path_buf(),
                message: format!("PDF parser aborted: {}", join_error),
            }),
        }
    }
}

/// Runs poppler's `pdftotext` and reads its standard output.
#[derive(Debug, Clone)]
pub struct PdftotextCommand {
    program: PathBuf,
}

impl PdftotextCommand {
    pub fn new() -> Self {
        Self::with_program("pdftotext")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PdftotextCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PdfTextSource for PdftotextCommand {
    async fn text_of(&self, pdf: &Path) -> Result<String, AppError> {
        log::debug!("Extracting text from {}", pdf.display());

        let output = tokio::process::Command::new(&self.program)
            .arg("-enc")
            .arg("UTF-8")
            .arg(pdf)
            .arg("-")
            .output()
            .await?;

        if !output.status.success() {
            return Err(AppError::Storage {
                path: pdf.to_path_buf(),
                message: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

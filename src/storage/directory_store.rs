// src/storage/directory_store.rs
//! Stores bills as PDF files plus a JSON manifest in one directory.
//!
//! This module is the only place where file I/O operations occur.

use super::pdf_text::PdfTextSource;
use super::types::{FailedSave, Manifest, SaveOptions, SaveReport};
use crate::api::PortalTransport;
use crate::constants::MANIFEST_FILE_NAME;
use crate::error::AppError;
use crate::extraction::AmountExtractor;
use crate::model::BillRecord;
use crate::pipeline::BillSink;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

pub struct DirectoryStore {
    root: PathBuf,
    transport: Arc<dyn PortalTransport>,
    text_source: Box<dyn PdfTextSource>,
}

impl DirectoryStore {
    pub fn new(
        root: impl Into<PathBuf>,
        transport: Arc<dyn PortalTransport>,
        text_source: Box<dyn PdfTextSource>,
    ) -> Self {
        Self {
            root: root.into(),
            transport,
            text_source,
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE_NAME)
    }

    /// Reads the manifest, if a previous run wrote one.
    pub async fn load_manifest(&self) -> Result<Option<Manifest>, AppError> {
        let path = self.manifest_path();
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| AppError::Storage {
                path,
                message: format!("unreadable manifest: {}", e),
            })
    }

    /// Downloads one bill's PDF, writes it and fills in its amount.
    ///
    /// Returns the number of bytes written and whether an amount was found.
    async fn store_one(
        &self,
        bill: &mut BillRecord,
        path: &Path,
        extractor: &dyn AmountExtractor,
    ) -> Result<(usize, bool), AppError> {
        let bytes = self.transport.download(bill.file_url()).await?;
        write_atomically(path, &bytes).await?;
        log::info!("Wrote file: {}", path.display());

        let extracted = match self.text_source.text_of(path).await {
            Ok(text) => extractor.extract(bill, &text),
            Err(e) => {
                log::warn!(
                    "Could not read text of {}, keeping placeholder amount: {}",
                    path.display(),
                    e
                );
                false
            }
        };

        Ok((bytes.len(), extracted))
    }

    async fn write_manifest(&self, manifest: &Manifest) -> Result<(), AppError> {
        let path = self.manifest_path();
        let content = serde_json::to_string_pretty(manifest).map_err(|e| AppError::Storage {
            path: path.clone(),
            message: e.to_string(),
        })?;

        write_atomically(&path, content.as_bytes()).await?;
        log::debug!("Manifest updated: {}", path.display());
        Ok(())
    }
}

/// Writes next to `path` under a `.tmp` suffix, then renames into place.
///
/// `path` either keeps its previous content or holds all of `bytes`.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait::async_trait]
impl BillSink for DirectoryStore {
    async fn save_bills(
        &self,
        bills: Vec<BillRecord>,
        options: &SaveOptions,
        extractor: &dyn AmountExtractor,
    ) -> Result<SaveReport, AppError> {
        let start_time = Instant::now();
        tokio::fs::create_dir_all(&self.root).await?;

        let mut manifest = match self.load_manifest().await? {
            Some(mut existing) => {
                existing.options = options.clone();
                existing
            }
            None => Manifest::new(options.clone()),
        };
        let mut known: HashSet<String> = manifest
            .bills
            .iter()
            .map(|b| b.file_name().to_string())
            .collect();

        log::info!(
            "Saving {} bill(s) to {} ({} already known)",
            bills.len(),
            self.root.display(),
            known.len()
        );

        let mut report = SaveReport::new();
        for mut bill in bills {
            let file_name = bill.file_name().to_string();
            let path = self.root.join(&file_name);

            if known.contains(&file_name) {
                log::debug!("Already stored: {}", file_name);
                report = report.with_skipped(file_name);
                continue;
            }
            if tokio::fs::try_exists(&path).await? {
                log::warn!(
                    "{} exists but is not in the manifest, downloading it again",
                    file_name
                );
            }

            match self.store_one(&mut bill, &path, extractor).await {
                Ok((bytes, extracted)) => {
                    known.insert(file_name.clone());
                    manifest.bills.push(bill);
                    self.write_manifest(&manifest).await?;
                    report = report.with_saved(file_name, bytes, extracted);
                }
                Err(e) => {
                    log::error!("Failed to store {}: {}", file_name, e);
                    report = report.with_failed(FailedSave {
                        file_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        self.write_manifest(&manifest).await?;

        log::info!(
            "Save complete: {} saved, {} skipped, {} failed in {}ms",
            report.saved.len(),
            report.skipped.len(),
            report.failed.len(),
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }
}

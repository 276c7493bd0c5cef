//! Archive writer: serialize canonicalized entries into a durable container.
//!
//! The build is one logical transaction.  Every step — canonicalization,
//! name-table block, per-entry payload blocks, directory, superblock patch —
//! either completes, or the partially written container file is deleted
//! before the error is returned.  No corrupt artifact ever survives a failed
//! build.

use std::fs::{self, File};
use std::path::Path;

use crate::config::Config;
use crate::container::{payload_key, ContainerWriter, NAME_TABLE_KEY};
use crate::entry::{canonicalize, Entry};
use crate::error::Result;
use crate::progress::ProgressObserver;
use crate::table;

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Number of entries stored.
    pub entries: usize,
    /// Aggregate uncompressed payload size.
    pub original_bytes: u64,
    /// Final container file size.
    pub compressed_bytes: u64,
}

impl BuildReport {
    /// Compression ratio `1 - compressed/uncompressed`; 0 for empty payloads.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            1.0 - self.compressed_bytes as f64 / self.original_bytes as f64
        }
    }
}

pub struct ArchiveWriter {
    config: Config,
}

impl ArchiveWriter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the container at `config.container_path` from `entries`.
    ///
    /// Entries are canonicalized first (EmptyInput is raised before any file
    /// is created), then written in sorted index order: the compressed name
    /// table under `"filenames"`, one independently compressed block per
    /// payload under `"image_binaries/img_{i}"`.  On any failure the partial
    /// container is removed before the error propagates.
    pub fn write(
        &self,
        entries: Vec<Entry>,
        progress: &mut dyn ProgressObserver,
    ) -> Result<BuildReport> {
        let entries = canonicalize(entries, self.config.max_name_len)?;
        let path = self.config.container_path.clone();

        match self.write_entries(&entries, &path, progress) {
            Ok(report) => {
                tracing::info!(
                    entries = report.entries,
                    original_bytes = report.original_bytes,
                    compressed_bytes = report.compressed_bytes,
                    "container built"
                );
                Ok(report)
            }
            Err(e) => {
                // Leave no partial artifact behind.
                if path.exists() {
                    let _ = fs::remove_file(&path);
                }
                Err(e)
            }
        }
    }

    fn write_entries(
        &self,
        entries: &[Entry],
        path: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> Result<BuildReport> {
        let file = File::create(path)?;
        let mut container = ContainerWriter::new(file, self.config.codec)?;

        let name_table = table::encode_names(entries, self.config.max_name_len);
        container.put_block(NAME_TABLE_KEY, &name_table)?;

        let total = entries.len();
        let mut original_bytes = 0u64;
        for (index, entry) in entries.iter().enumerate() {
            container.put_block(&payload_key(index), &entry.payload)?;
            original_bytes += entry.payload.len() as u64;
            progress.on_entry(index, total, &entry.name);
        }

        let compressed_bytes = container.finalize()?;
        progress.on_complete(total);

        Ok(BuildReport {
            entries: total,
            original_bytes,
            compressed_bytes,
        })
    }
}

//! Source collector: turns a directory of files into archive entries.
//!
//! Per-file problems (wrong extension, unreadable, not actually an image)
//! are recovered locally — the file is skipped with a warning and the scan
//! continues.  A missing input directory or a scan that yields zero valid
//! images is a hard error; everything downstream assumes at least one entry.

use std::fs;
use std::io;

use crate::config::Config;
use crate::entry::Entry;
use crate::error::{Error, Result};

/// Extensions accepted as image candidates (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Scan `config.input_dir` and read every recognized image file.
///
/// Candidates are filtered by extension, then sniffed: the image header must
/// parse (`image::image_dimensions` reads only the header, not the pixel
/// data).  The returned entries carry raw file bytes and are in scan order;
/// canonicalization (truncation + sorting) happens in the writer path.
pub fn collect(config: &Config) -> Result<Vec<Entry>> {
    let dir = &config.input_dir;
    if !dir.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input directory {} does not exist", dir.display()),
        )));
    }

    let mut dirents: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    // Deterministic scan order regardless of filesystem enumeration.
    dirents.sort_by_key(|d| d.file_name());

    let mut entries = Vec::new();
    for dirent in dirents {
        let path = dirent.path();
        if !path.is_file() {
            continue;
        }
        let name = dirent.file_name().to_string_lossy().into_owned();

        let recognized = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
        if !recognized {
            tracing::debug!(file = %name, "skipped non-image file");
            continue;
        }

        if let Err(e) = image::image_dimensions(&path) {
            tracing::warn!(file = %name, error = %e, "skipped invalid image");
            continue;
        }

        let payload = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "skipped unreadable file");
                continue;
            }
        };

        tracing::info!(file = %name, kib = payload.len() / 1024, "recognized image");
        entries.push(Entry::new(name, payload));
    }

    if entries.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(entries)
}

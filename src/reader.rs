//! Archive reader: invert the writer exactly for any container it produced.
//!
//! Opening decodes the full name table; payloads are decoded lazily, one
//! block per entry, in strict index order.  A missing or undecodable block at
//! any index fails the whole pass — unlike the collector, the reader never
//! skips a bad entry.
//!
//! Extraction offers no cleanup on failure: files already written stay in
//! place.  This asymmetry with the writer's all-or-nothing guarantee is
//! intentional and preserved.

use std::fs::{self, File};
use std::path::Path;

use crate::config::Config;
use crate::container::{payload_key, ContainerReader, NAME_TABLE_KEY};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::progress::ProgressObserver;
use crate::table;

#[derive(Debug)]
pub struct ArchiveReader {
    container: ContainerReader<File>,
    names: Vec<String>,
    config: Config,
}

impl ArchiveReader {
    /// Open the container at `config.container_path` and decode its name
    /// table.
    ///
    /// Fails with [`Error::MissingArchive`] if the path does not resolve to a
    /// file, and [`Error::CorruptArchive`] if the superblock, directory, or
    /// name table does not decode (including a table size that is not a
    /// multiple of `config.max_name_len`).
    pub fn open(config: Config) -> Result<Self> {
        let path = &config.container_path;
        if !path.is_file() {
            return Err(Error::MissingArchive { path: path.clone() });
        }
        let mut container = ContainerReader::new(File::open(path)?)?;
        let raw_table = container.read_block(NAME_TABLE_KEY)?;
        let names = table::decode_names(&raw_table, config.max_name_len)?;
        tracing::debug!(entries = names.len(), path = %path.display(), "opened container");
        Ok(Self {
            container,
            names,
            config,
        })
    }

    /// Number of entries in the container.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entry names in stored (ascending) order, padding already stripped.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Decompress the payload block of entry `index`.
    pub fn read_payload(&mut self, index: usize) -> Result<Vec<u8>> {
        self.container.read_block(&payload_key(index))
    }

    /// Lazy iterator over all entries in index order.  Each call starts a
    /// fresh pass over the same container handle.
    pub fn entries(&mut self) -> Entries<'_> {
        Entries {
            reader: self,
            next: 0,
        }
    }

    /// Extract every entry into `output_dir`, creating it if absent.
    ///
    /// Duplicate names overwrite in position order (last write wins).  Names
    /// that are not a plain filename — empty, `.`/`..`, or containing a path
    /// separator — are rejected as corrupt before anything is written for
    /// them.  A failure partway through leaves already-written files in
    /// place.  Returns the number of files written.
    pub fn extract_to(
        &mut self,
        output_dir: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> Result<usize> {
        fs::create_dir_all(output_dir)?;

        let total = self.names.len();
        for index in 0..total {
            let name = self.names[index].clone();
            reject_unsafe_name(&name)?;
            let payload = self.read_payload(index)?;
            fs::write(output_dir.join(&name), &payload)?;
            progress.on_entry(index, total, &name);
        }
        progress.on_complete(total);
        Ok(total)
    }

    /// Extract into the configured output directory.
    pub fn extract(&mut self, progress: &mut dyn ProgressObserver) -> Result<usize> {
        let output_dir = self.config.output_dir.clone();
        self.extract_to(&output_dir, progress)
    }
}

/// Lazy entry sequence produced by [`ArchiveReader::entries`].
pub struct Entries<'a> {
    reader: &'a mut ArchiveReader,
    next: usize,
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.reader.names.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let name = self.reader.names[index].clone();
        Some(
            self.reader
                .read_payload(index)
                .map(|payload| Entry::new(name, payload)),
        )
    }
}

/// Entry names become relative path segments under the output root, so
/// anything that could traverse out of it is refused outright.
fn reject_unsafe_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(Error::corrupt(format!(
            "entry name {name:?} is not a safe file name"
        )));
    }
    Ok(())
}

//! Container engine — writer and reader for the physical file layout.
//!
//! # Writer
//! [`ContainerWriter`] reserves the superblock at offset 0, appends one
//! self-describing block per `put_block` call (header + key + compressed
//! payload), then on `finalize()` writes the JSON block directory and patches
//! the superblock in place.
//!
//! # Reader
//! [`ContainerReader`] validates the superblock, loads the directory, and
//! serves blocks by key with CRC32 verification and codec dispatch from the
//! block header.
//!
//! # Concurrency
//! Each build or extract operation owns its container handle exclusively for
//! its duration.  Concurrent writers or readers on the same path are
//! unsupported; no locking is performed and the result of concurrent access
//! is undefined.
//!
//! # Endianness
//! All binary I/O is strictly little-endian; see `block.rs` and
//! `superblock.rs` for field-level documentation.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::block::{decode_block, encode_block, BlockHeader, BLOCK_MAGIC};
use crate::codec::CodecId;
use crate::directory::{BlockDirectory, DirectoryRecord};
use crate::error::{Error, Result};
use crate::superblock::{Superblock, SUPERBLOCK_SIZE};

/// Key of the compressed name-table block.
pub const NAME_TABLE_KEY: &str = "filenames";
/// Key prefix of the per-entry payload blocks.
pub const PAYLOAD_GROUP: &str = "image_binaries";

/// Stable key of payload block `index`.
pub fn payload_key(index: usize) -> String {
    format!("{PAYLOAD_GROUP}/img_{index}")
}

// ── Writer ───────────────────────────────────────────────────────────────────

pub struct ContainerWriter<W: Write + Seek> {
    writer: W,
    superblock: Superblock,
    pub directory: BlockDirectory,
    codec: CodecId,
}

impl<W: Write + Seek> ContainerWriter<W> {
    pub fn new(mut writer: W, codec: CodecId) -> Result<Self> {
        writer.seek(SeekFrom::Start(0))?;
        writer.write_all(&[0u8; SUPERBLOCK_SIZE])?; // reserved; patched on finalize
        Ok(Self {
            writer,
            superblock: Superblock::new(),
            directory: BlockDirectory::default(),
            codec,
        })
    }

    /// Compress `raw` and append it as a block addressable by `key`.
    /// Returns the compressed payload size.
    pub fn put_block(&mut self, key: &str, raw: &[u8]) -> Result<u64> {
        let offset = self.writer.stream_position()?;
        let (header, payload) = encode_block(key, raw, self.codec)?;
        header.write(&mut self.writer)?;
        self.writer.write_all(key.as_bytes())?;
        self.writer.write_all(&payload)?;

        tracing::debug!(
            key,
            raw_size = header.raw_size,
            comp_size = header.comp_size,
            "wrote block"
        );
        self.directory.records.push(DirectoryRecord {
            key: key.to_owned(),
            offset,
            raw_size: header.raw_size,
            comp_size: header.comp_size,
        });
        Ok(header.comp_size)
    }

    /// Write the block directory, patch the superblock, and flush.
    /// Must be called exactly once.  Returns the total container size.
    pub fn finalize(&mut self) -> Result<u64> {
        let dir_bytes = self
            .directory
            .to_bytes()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        let directory_offset = self.writer.stream_position()?;
        self.writer.write_all(&dir_bytes)?;
        let total_size = self.writer.stream_position()?;

        self.superblock.directory_offset = directory_offset;
        self.superblock.directory_size = dir_bytes.len() as u64;
        self.writer.seek(SeekFrom::Start(0))?;
        self.superblock.write(&mut self.writer)?;
        self.writer.flush()?;
        Ok(total_size)
    }
}

// ── Reader ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ContainerReader<R: Read + Seek> {
    reader: R,
    pub superblock: Superblock,
    pub directory: BlockDirectory,
}

impl<R: Read + Seek> ContainerReader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let superblock = Superblock::read(&mut reader)?;
        if superblock.directory_offset == 0 {
            return Err(Error::corrupt("container was never finalized"));
        }
        reader.seek(SeekFrom::Start(superblock.directory_offset))?;
        let mut dir_bytes = vec![0u8; superblock.directory_size as usize];
        reader.read_exact(&mut dir_bytes)?;
        let directory = BlockDirectory::from_bytes(&dir_bytes)
            .map_err(|e| Error::corrupt(format!("block directory decode failed: {e}")))?;
        Ok(Self {
            reader,
            superblock,
            directory,
        })
    }

    pub fn has_block(&self, key: &str) -> bool {
        self.directory.find(key).is_some()
    }

    /// Read, checksum-verify, and decompress the block addressed by `key`.
    /// A missing key or any decode failure is a [`Error::CorruptArchive`].
    pub fn read_block(&mut self, key: &str) -> Result<Vec<u8>> {
        let offset = self
            .directory
            .find(key)
            .ok_or_else(|| Error::corrupt(format!("missing block {key:?}")))?
            .offset;

        self.reader.seek(SeekFrom::Start(offset))?;
        let header = BlockHeader::read(&mut self.reader)?;
        if header.magic != BLOCK_MAGIC {
            return Err(Error::corrupt(format!("bad block magic for {key:?}")));
        }
        let mut key_bytes = vec![0u8; header.key_len as usize];
        self.reader.read_exact(&mut key_bytes)?;
        if key_bytes != key.as_bytes() {
            return Err(Error::corrupt(format!("block key mismatch for {key:?}")));
        }
        let mut payload = vec![0u8; header.comp_size as usize];
        self.reader.read_exact(&mut payload)?;

        decode_block(&header, &payload)
            .map_err(|e| Error::corrupt(format!("block {key:?}: {e}")))
    }
}

//! `.ipak` — a seekable container for a directory of image files.
//!
//! Every entry's payload is compressed independently; the filename table is
//! one fixed-width, compressed block.  Build and extract are single-pass,
//! synchronous, and strictly index-ordered.
//!
//! ```no_run
//! use ipak::{collector, ArchiveReader, ArchiveWriter, Config, NullProgress};
//!
//! let config = Config::default();
//!
//! // Build
//! let entries = collector::collect(&config)?;
//! let report = ArchiveWriter::new(config.clone()).write(entries, &mut NullProgress)?;
//! println!("stored {} entries, ratio {:.1}%", report.entries, report.ratio() * 100.0);
//!
//! // Extract
//! let mut reader = ArchiveReader::open(config)?;
//! reader.extract(&mut NullProgress)?;
//! # Ok::<(), ipak::Error>(())
//! ```

pub mod block;
pub mod codec;
pub mod collector;
pub mod config;
pub mod container;
pub mod directory;
pub mod entry;
pub mod error;
pub mod progress;
pub mod reader;
pub mod superblock;
pub mod table;
pub mod writer;

pub use codec::{get_codec, Codec, CodecId};
pub use config::Config;
pub use entry::Entry;
pub use error::{Error, Result};
pub use progress::{NullProgress, ProgressObserver};
pub use reader::ArchiveReader;
pub use superblock::Superblock;
pub use writer::{ArchiveWriter, BuildReport};

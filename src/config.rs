use std::path::PathBuf;

use crate::codec::CodecId;

/// Configuration for one build or extract operation.
///
/// An explicit value passed into the collector, writer, and reader
/// constructors — never process-wide state — so multiple containers with
/// different settings can coexist in one process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for image files at build time.
    pub input_dir: PathBuf,
    /// Directory extracted files are written into.
    pub output_dir: PathBuf,
    /// Path of the single container file.
    pub container_path: PathBuf,
    /// Maximum encoded name length in bytes; also the name-table row width.
    pub max_name_len: usize,
    /// Codec used for every block written.  Reads dispatch on the block
    /// header instead, so any registered codec decodes transparently.
    pub codec: CodecId,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("data2"),
            container_path: PathBuf::from("images.ipak"),
            max_name_len: 256,
            codec: CodecId::Deflate,
        }
    }
}

//! Codec registry: the compression strategy behind every container block.
//!
//! # Identity rules
//! Every codec is identified by a one-byte id.  That id is written into every
//! block header on disk and is the authoritative identity at decode time.
//! Ids are permanent — a value is NEVER reused, even if a codec is retired.
//! A reader that encounters an id it cannot supply MUST fail immediately;
//! there is no fallback and no negotiation.
//!
//! # Effort
//! Codecs always run at their maximum deterministic effort.  The container
//! trades encode speed for ratio and reproducibility; there is no level knob.

use std::io::{self, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use thiserror::Error;

// ── Frozen codec ids ─────────────────────────────────────────────────────────

/// Payload stored verbatim.  Useful as a no-op stub in tests.
pub const ID_STORED: u8 = 0;
/// DEFLATE (zlib stream) at maximum effort — the default codec.
pub const ID_DEFLATE: u8 = 1;
/// Zstandard at maximum-ratio level — stronger alternative to DEFLATE.
pub const ID_ZSTD: u8 = 2;

/// Zstd level used for every block.  Matches `zstd`'s maximum-ratio preset.
const ZSTD_MAX_LEVEL: i32 = 19;

// ── CodecId enum ─────────────────────────────────────────────────────────────

/// Runtime codec discriminant.  The `u8` value is the on-disk identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecId {
    Stored,
    Deflate,
    Zstd,
}

impl CodecId {
    /// The frozen one-byte id written into block headers.
    #[inline]
    pub fn as_u8(self) -> u8 {
        match self {
            CodecId::Stored  => ID_STORED,
            CodecId::Deflate => ID_DEFLATE,
            CodecId::Zstd    => ID_ZSTD,
        }
    }

    /// Resolve an on-disk id.  Returns `None` for ids unknown to this build.
    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            ID_STORED  => Some(CodecId::Stored),
            ID_DEFLATE => Some(CodecId::Deflate),
            ID_ZSTD    => Some(CodecId::Zstd),
            _          => None,
        }
    }

    /// Human-readable name (for diagnostics only — never parsed back).
    pub fn name(self) -> &'static str {
        match self {
            CodecId::Stored  => "stored",
            CodecId::Deflate => "deflate",
            CodecId::Zstd    => "zstd",
        }
    }

    /// Parse from a CLI string.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stored"  => Some(CodecId::Stored),
            "deflate" => Some(CodecId::Deflate),
            "zstd"    => Some(CodecId::Zstd),
            _         => None,
        }
    }
}

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Compression error: {0}")]
    Compression(String),
    #[error("Decompression error: {0}")]
    Decompression(String),
    /// Emitted when a block header names a codec id this build cannot supply.
    /// Decoding MUST NOT continue.
    #[error("Unknown codec id {0} — cannot decode without it")]
    UnknownCodecId(u8),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ── Codec trait ──────────────────────────────────────────────────────────────

/// Compression strategy: `decompress(compress(x)) == x` for all byte strings.
pub trait Codec: Send + Sync {
    fn codec_id(&self) -> CodecId;
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;
}

// ── Built-in codec implementations ──────────────────────────────────────────

pub struct StoredCodec;
impl Codec for StoredCodec {
    fn codec_id(&self) -> CodecId { CodecId::Stored }
    fn compress(&self, data: &[u8])   -> Result<Vec<u8>, CodecError> { Ok(data.to_vec()) }
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> { Ok(data.to_vec()) }
}

pub struct DeflateCodec;
impl Codec for DeflateCodec {
    fn codec_id(&self) -> CodecId { CodecId::Deflate }
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::best());
        enc.write_all(data).map_err(|e| CodecError::Compression(e.to_string()))?;
        enc.finish().map_err(|e| CodecError::Compression(e.to_string()))
    }
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| CodecError::Decompression(e.to_string()))?;
        Ok(out)
    }
}

pub struct ZstdCodec;
impl Codec for ZstdCodec {
    fn codec_id(&self) -> CodecId { CodecId::Zstd }
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::encode_all(data, ZSTD_MAX_LEVEL).map_err(|e| CodecError::Compression(e.to_string()))
    }
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::decode_all(data).map_err(|e| CodecError::Decompression(e.to_string()))
    }
}

// ── Factory ──────────────────────────────────────────────────────────────────

/// Resolve a CodecId to a built-in codec.
pub fn get_codec(id: CodecId) -> Box<dyn Codec> {
    match id {
        CodecId::Stored  => Box::new(StoredCodec),
        CodecId::Deflate => Box::new(DeflateCodec),
        CodecId::Zstd    => Box::new(ZstdCodec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn id_mapping_is_stable() {
        for id in [CodecId::Stored, CodecId::Deflate, CodecId::Zstd] {
            assert_eq!(CodecId::from_u8(id.as_u8()), Some(id));
        }
        assert_eq!(CodecId::from_u8(0xFF), None);
    }

    #[test]
    fn stored_is_identity() {
        let codec = StoredCodec;
        let data = b"raw bytes \x00\xFF".to_vec();
        assert_eq!(codec.compress(&data).unwrap(), data);
        assert_eq!(codec.decompress(&data).unwrap(), data);
    }

    #[test]
    fn deflate_roundtrip_empty_payload() {
        let codec = DeflateCodec;
        let packed = codec.compress(b"").unwrap();
        assert_eq!(codec.decompress(&packed).unwrap(), b"");
    }

    proptest! {
        #[test]
        fn deflate_roundtrip(data: Vec<u8>) {
            let codec = DeflateCodec;
            let packed = codec.compress(&data).unwrap();
            prop_assert_eq!(codec.decompress(&packed).unwrap(), data);
        }

        #[test]
        fn zstd_roundtrip(data: Vec<u8>) {
            let codec = ZstdCodec;
            let packed = codec.compress(&data).unwrap();
            prop_assert_eq!(codec.decompress(&packed).unwrap(), data);
        }
    }
}

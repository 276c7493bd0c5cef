use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use crc32fast::Hasher;

use crate::codec::{get_codec, CodecError, CodecId};

pub const BLOCK_MAGIC: u32 = 0x4B42_5049; // "IPBK"

/// On-disk layout: header, then `key_len` bytes of UTF-8 key, then
/// `comp_size` bytes of compressed payload.  All integers little-endian.
#[derive(Debug, Clone)]
pub struct BlockHeader {
    pub magic: u32,
    pub key_len: u16,
    pub codec_id: u8,
    pub checksum: u32,
    pub raw_size: u64,
    pub comp_size: u64,
}

impl BlockHeader {
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.magic)?;
        writer.write_u16::<LittleEndian>(self.key_len)?;
        writer.write_u8(self.codec_id)?;
        writer.write_u32::<LittleEndian>(self.checksum)?;
        writer.write_u64::<LittleEndian>(self.raw_size)?;
        writer.write_u64::<LittleEndian>(self.comp_size)?;
        Ok(())
    }

    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        Ok(Self {
            magic: reader.read_u32::<LittleEndian>()?,
            key_len: reader.read_u16::<LittleEndian>()?,
            codec_id: reader.read_u8()?,
            checksum: reader.read_u32::<LittleEndian>()?,
            raw_size: reader.read_u64::<LittleEndian>()?,
            comp_size: reader.read_u64::<LittleEndian>()?,
        })
    }
}

/// Compress `data` with `codec_id` and produce the header describing it.
/// The CRC32 checksum covers the compressed payload.
pub fn encode_block(
    key: &str,
    data: &[u8],
    codec_id: CodecId,
) -> Result<(BlockHeader, Vec<u8>), CodecError> {
    let codec = get_codec(codec_id);
    let payload = codec.compress(data)?;
    let mut hasher = Hasher::new();
    hasher.update(&payload);
    let header = BlockHeader {
        magic: BLOCK_MAGIC,
        key_len: key.len() as u16,
        codec_id: codec_id.as_u8(),
        checksum: hasher.finalize(),
        raw_size: data.len() as u64,
        comp_size: payload.len() as u64,
    };
    Ok((header, payload))
}

/// Verify the checksum, resolve the codec from the header, and decompress.
/// The decompressed size must match `raw_size` exactly.
pub fn decode_block(header: &BlockHeader, payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut hasher = Hasher::new();
    hasher.update(payload);
    if hasher.finalize() != header.checksum {
        return Err(CodecError::Decompression("Checksum mismatch".to_string()));
    }
    let codec_id =
        CodecId::from_u8(header.codec_id).ok_or(CodecError::UnknownCodecId(header.codec_id))?;
    let raw = get_codec(codec_id).decompress(payload)?;
    if raw.len() as u64 != header.raw_size {
        return Err(CodecError::Decompression(format!(
            "Decoded size {} does not match declared size {}",
            raw.len(),
            header.raw_size
        )));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let data = b"block payload with binary bytes \x00\x01\xFE\xFF";
        let (header, payload) = encode_block("filenames", data, CodecId::Deflate).unwrap();
        assert_eq!(header.magic, BLOCK_MAGIC);
        assert_eq!(header.key_len, "filenames".len() as u16);
        assert_eq!(header.raw_size, data.len() as u64);
        assert_eq!(decode_block(&header, &payload).unwrap(), data);
    }

    #[test]
    fn corrupted_payload_fails_checksum() {
        let (header, mut payload) = encode_block("k", b"some data here", CodecId::Stored).unwrap();
        payload[0] ^= 0xFF;
        assert!(matches!(
            decode_block(&header, &payload),
            Err(CodecError::Decompression(_))
        ));
    }

    #[test]
    fn unknown_codec_id_is_rejected() {
        let (mut header, payload) = encode_block("k", b"data", CodecId::Stored).unwrap();
        header.codec_id = 0x7F;
        // Checksum still matches; the codec lookup must fail.
        assert!(matches!(
            decode_block(&header, &payload),
            Err(CodecError::UnknownCodecId(0x7F))
        ));
    }

    #[test]
    fn header_serialization_roundtrip() {
        let header = BlockHeader {
            magic: BLOCK_MAGIC,
            key_len: 21,
            codec_id: 1,
            checksum: 0xDEAD_BEEF,
            raw_size: 1024,
            comp_size: 300,
        };
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        let back = BlockHeader::read(&buf[..]).unwrap();
        assert_eq!(back.key_len, 21);
        assert_eq!(back.checksum, 0xDEAD_BEEF);
        assert_eq!(back.raw_size, 1024);
        assert_eq!(back.comp_size, 300);
    }
}

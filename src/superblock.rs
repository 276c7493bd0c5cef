use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use crate::error::{Error, Result};

pub const MAGIC: &[u8; 4] = b"ipak";
pub const VERSION: u32 = 1;
/// magic + version + directory offset + directory size.
pub const SUPERBLOCK_SIZE: usize = 4 + 4 + 8 + 8;

/// Fixed-size header at offset 0.  Reserved with zeroes at create time and
/// patched in place once the block directory has been written.
#[derive(Debug, Clone)]
pub struct Superblock {
    pub magic: [u8; 4],
    pub version: u32,
    pub directory_offset: u64,
    pub directory_size: u64,
}

impl Superblock {
    pub fn new() -> Self {
        Self {
            magic: *MAGIC,
            version: VERSION,
            directory_offset: 0,
            directory_size: 0,
        }
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u64::<LittleEndian>(self.directory_offset)?;
        writer.write_u64::<LittleEndian>(self.directory_size)?;
        Ok(())
    }

    pub fn read<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::corrupt("invalid magic number"));
        }
        let version = reader.read_u32::<LittleEndian>()?;
        if version != VERSION {
            return Err(Error::corrupt(format!("unsupported version: {version}")));
        }
        let directory_offset = reader.read_u64::<LittleEndian>()?;
        let directory_size = reader.read_u64::<LittleEndian>()?;
        Ok(Self {
            magic,
            version,
            directory_offset,
            directory_size,
        })
    }
}

impl Default for Superblock {
    fn default() -> Self {
        Self::new()
    }
}

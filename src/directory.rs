use serde::{Deserialize, Serialize};

/// Position of one block inside the container, addressed by its stable key.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DirectoryRecord {
    pub key: String,
    pub offset: u64,
    pub raw_size: u64,
    pub comp_size: u64,
}

/// The container's table of contents, serialized as one JSON blob after the
/// last block.  The superblock points at it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BlockDirectory {
    pub records: Vec<DirectoryRecord>,
}

impl BlockDirectory {
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn find(&self, key: &str) -> Option<&DirectoryRecord> {
        self.records.iter().find(|r| r.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip() {
        let dir = BlockDirectory {
            records: vec![
                DirectoryRecord {
                    key: "filenames".into(),
                    offset: 24,
                    raw_size: 512,
                    comp_size: 40,
                },
                DirectoryRecord {
                    key: "image_binaries/img_0".into(),
                    offset: 91,
                    raw_size: 2048,
                    comp_size: 1999,
                },
            ],
        };
        let bytes = dir.to_bytes().unwrap();
        let back = BlockDirectory::from_bytes(&bytes).unwrap();
        assert_eq!(back.records.len(), 2);
        assert_eq!(back.find("filenames").unwrap().offset, 24);
        assert!(back.find("image_binaries/img_1").is_none());
    }
}

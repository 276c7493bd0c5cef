use crate::error::{Error, Result};

/// One logical (name, payload) record in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Human-readable filename.  At most `max_name_len` bytes after
    /// canonicalization.
    pub name: String,
    /// Opaque file contents.
    pub payload: Vec<u8>,
}

impl Entry {
    pub fn new(name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Prepare collected entries for storage.
///
/// Fails with [`Error::EmptyInput`] on an empty list.  Names longer than
/// `max_name_len` bytes are irreversibly truncated (with a warning); the
/// whole list is then sorted by name, byte-wise ascending.  The sort is
/// stable, so duplicate names keep their input relative order.  Payloads are
/// untouched.
pub fn canonicalize(mut entries: Vec<Entry>, max_name_len: usize) -> Result<Vec<Entry>> {
    if entries.is_empty() {
        return Err(Error::EmptyInput);
    }
    for entry in &mut entries {
        if entry.name.len() > max_name_len {
            let truncated = truncate_name(&entry.name, max_name_len);
            tracing::warn!(
                name = %entry.name,
                max = max_name_len,
                "filename too long, truncating"
            );
            entry.name = truncated;
        }
    }
    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    Ok(entries)
}

/// Truncate to the largest `char` boundary not exceeding `max` bytes, so the
/// result is always valid UTF-8.  For ASCII names this is exactly the first
/// `max` bytes.
fn truncate_name(name: &str, max: usize) -> String {
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(canonicalize(Vec::new(), 256), Err(Error::EmptyInput)));
    }

    #[test]
    fn sorts_byte_wise_ascending() {
        let entries = vec![
            Entry::new("b.png", vec![2]),
            Entry::new("a.png", vec![1]),
            Entry::new("Z.png", vec![0]),
        ];
        let sorted = canonicalize(entries, 256).unwrap();
        // ASCII uppercase sorts before lowercase in byte order.
        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Z.png", "a.png", "b.png"]);
    }

    #[test]
    fn duplicate_names_keep_input_order() {
        let entries = vec![
            Entry::new("x.png", b"first".to_vec()),
            Entry::new("x.png", b"second".to_vec()),
        ];
        let sorted = canonicalize(entries, 256).unwrap();
        assert_eq!(sorted[0].payload, b"first");
        assert_eq!(sorted[1].payload, b"second");
    }

    #[test]
    fn long_ascii_name_truncates_to_exact_limit() {
        let name = "n".repeat(266);
        let entries = vec![Entry::new(name.clone(), Vec::new())];
        let out = canonicalize(entries, 256).unwrap();
        assert_eq!(out[0].name.len(), 256);
        assert_eq!(out[0].name, name[..256]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; a cut at byte 5 would split it.
        let name = "abcdé.png";
        let entries = vec![Entry::new(name, Vec::new())];
        let out = canonicalize(entries, 5).unwrap();
        assert_eq!(out[0].name, "abcd");
    }

    #[test]
    fn short_names_are_untouched() {
        let out = canonicalize(vec![Entry::new("ok.gif", vec![9])], 256).unwrap();
        assert_eq!(out[0].name, "ok.gif");
        assert_eq!(out[0].payload, vec![9]);
    }
}

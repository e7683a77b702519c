//! Leaf entry records.
//!
//! A leaf page stores its entries back to back starting at
//! [`Layout::entry_offset`](crate::common::Layout):
//! ```text
//! ┌──────────────┬──────────────────┬─────────────────────┐
//! │ key (i64)    │ value_len (u32)  │ value (value_len B) │ ...
//! └──────────────┴──────────────────┴─────────────────────┘
//! ```

use std::fmt;

use crate::common::config::KEY_SIZE;
use crate::common::{Error, Result};

const VALUE_LEN_SIZE: usize = 4;

/// One key/value record from a leaf page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: i64,
    pub value: Vec<u8>,
}

impl Entry {
    pub fn new(key: i64, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Bytes this record occupies on disk.
    pub fn encoded_len(&self) -> usize {
        KEY_SIZE + VALUE_LEN_SIZE + self.value.len()
    }

    /// Append the on-disk form of this record to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.key.to_le_bytes());
        buf.extend_from_slice(&(self.value.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.value);
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key={} len={} value=", self.key, self.value.len())?;
        match std::str::from_utf8(&self.value) {
            Ok(s) if !s.chars().any(char::is_control) => write!(f, "{:?}", s),
            _ => {
                write!(f, "0x")?;
                for b in &self.value {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

/// Sequential reader over a leaf payload.
struct EntryReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> EntryReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take exactly `len` bytes, or report how many were actually there.
    fn take(&mut self, index: usize, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::TruncatedEntry {
                index,
                expected_len: len,
                actual_len: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_entry(&mut self, index: usize) -> Result<Entry> {
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(self.take(index, KEY_SIZE)?);
        let key = i64::from_le_bytes(key);

        let mut len = [0u8; VALUE_LEN_SIZE];
        len.copy_from_slice(self.take(index, VALUE_LEN_SIZE)?);
        let value_len = u32::from_le_bytes(len);

        // Length is checked against the payload before anything is allocated.
        let value = self.take(index, value_len as usize)?.to_vec();
        Ok(Entry { key, value })
    }
}

/// Decode `count` entry records from the start of a leaf payload.
///
/// Fails with [`Error::TruncatedEntry`] as soon as a record declares more
/// bytes than remain; a short value is never padded or cut.
pub fn decode_entries(payload: &[u8], count: usize) -> Result<Vec<Entry>> {
    let mut reader = EntryReader::new(payload);
    // Every record takes at least 12 bytes, which bounds the reservation.
    let mut entries = Vec::with_capacity(count.min(payload.len() / (KEY_SIZE + VALUE_LEN_SIZE)));
    for index in 0..count {
        entries.push(reader.read_entry(index)?);
    }
    Ok(entries)
}

/// Encode entries into a contiguous payload.
pub fn encode_entries(entries: &[Entry]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(entries.iter().map(Entry::encoded_len).sum());
    for entry in entries {
        entry.encode_into(&mut buf);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entries() {
        let entries = vec![
            Entry::new(1, b"one".to_vec()),
            Entry::new(2, Vec::new()),
            Entry::new(-40, b"forty".to_vec()),
        ];
        let mut payload = encode_entries(&entries);
        // trailing free space is ignored
        payload.extend_from_slice(&[0u8; 32]);

        let decoded = decode_entries(&payload, 3).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_decode_zero_entries() {
        assert!(decode_entries(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_short_value_is_truncated_entry() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&5i64.to_le_bytes());
        payload.extend_from_slice(&10u32.to_le_bytes());
        payload.extend_from_slice(b"abc");

        let err = decode_entries(&payload, 1).unwrap_err();
        match err {
            Error::TruncatedEntry {
                index,
                expected_len,
                actual_len,
            } => {
                assert_eq!(index, 0);
                assert_eq!(expected_len, 10);
                assert_eq!(actual_len, 3);
            }
            other => panic!("Expected TruncatedEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_record_is_truncated_entry() {
        let payload = encode_entries(&[Entry::new(1, b"x".to_vec())]);

        let err = decode_entries(&payload, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedEntry {
                index: 1,
                expected_len: 8,
                actual_len: 0
            }
        ));
    }

    #[test]
    fn test_huge_declared_length_does_not_allocate() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1i64.to_le_bytes());
        payload.extend_from_slice(&u32::MAX.to_le_bytes());

        let err = decode_entries(&payload, 1).unwrap_err();
        assert!(matches!(err, Error::TruncatedEntry { actual_len: 0, .. }));
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(
            Entry::new(3, b"abc".to_vec()).to_string(),
            "key=3 len=3 value=\"abc\""
        );
        assert_eq!(
            Entry::new(4, vec![0x00, 0xff]).to_string(),
            "key=4 len=2 value=0x00ff"
        );
    }
}

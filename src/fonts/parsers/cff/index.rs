//! CFF INDEX: a counted array of variable-length objects.
//!
//! ```text
//! count    u16
//! offSize  u8            (1..=4, absent when count == 0)
//! offset   [count + 1]   offSize bytes each, 1-based
//! data     ...
//! ```
//!
//! Offsets are relative to the byte preceding the object data, so the first offset
//! is always 1.

use crate::error::{Error, Result};
use crate::fonts::parsers::reader::ByteReader;

#[derive(Debug, Clone)]
pub(crate) struct Index<'a> {
    data: &'a [u8],
    offsets: Vec<u32>,
}

impl<'a> Index<'a> {
    /// Read an INDEX at the reader position, leaving the reader just past it.
    pub fn read(r: &mut ByteReader<'a>, buf: &'a [u8]) -> Result<Self> {
        let start = r.pos();
        let count = r.read_u16()?;
        if count == 0 {
            return Ok(Self {
                data: &[],
                offsets: vec![1],
            });
        }

        let off_size = r.read_u8()?;
        if !(1..=4).contains(&off_size) {
            return Err(Error::parse(
                start + 2,
                format!("INDEX offSize {} outside 1..=4", off_size),
            ));
        }

        let mut offsets = Vec::with_capacity(count as usize + 1);
        for _ in 0..=count {
            offsets.push(r.read_uint(off_size)?);
        }

        if offsets[0] != 1 || offsets.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::parse(start, "INDEX offsets not ascending from 1"));
        }

        let data_len = (offsets[count as usize] - 1) as usize;
        let data_start = r.pos();
        let data = buf
            .get(data_start..data_start + data_len)
            .ok_or(Error::UnexpectedEof { offset: data_start })?;
        r.skip(data_len)?;

        Ok(Self { data, offsets })
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<&'a [u8]> {
        let start = *self.offsets.get(i)? as usize - 1;
        let end = *self.offsets.get(i + 1)? as usize - 1;
        self.data.get(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_two_objects() {
        // count=2, offSize=1, offsets 1 4 6, data "abcde"
        let buf = [0, 2, 1, 1, 4, 6, b'a', b'b', b'c', b'd', b'e', 0xFF];
        let mut r = ByteReader::new(&buf);
        let index = Index::read(&mut r, &buf).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0), Some(&b"abc"[..]));
        assert_eq!(index.get(1), Some(&b"de"[..]));
        assert_eq!(index.get(2), None);
        assert_eq!(r.pos(), 11);
    }

    #[test]
    fn test_empty_index_is_two_bytes() {
        let buf = [0, 0, 0xAA];
        let mut r = ByteReader::new(&buf);
        let index = Index::read(&mut r, &buf).unwrap();
        assert!(index.is_empty());
        assert_eq!(r.pos(), 2);
    }

    #[test]
    fn test_two_byte_offsets() {
        let buf = [0, 1, 2, 0, 1, 0, 3, b'h', b'i'];
        let mut r = ByteReader::new(&buf);
        let index = Index::read(&mut r, &buf).unwrap();
        assert_eq!(index.get(0), Some(&b"hi"[..]));
    }

    #[test]
    fn test_bad_off_size() {
        let buf = [0, 1, 5, 0, 0];
        let mut r = ByteReader::new(&buf);
        assert!(matches!(
            Index::read(&mut r, &buf),
            Err(Error::ParseError { offset: 2, .. })
        ));
    }

    #[test]
    fn test_truncated_data() {
        let buf = [0, 1, 1, 1, 9, b'x'];
        let mut r = ByteReader::new(&buf);
        assert!(Index::read(&mut r, &buf).is_err());
    }
}

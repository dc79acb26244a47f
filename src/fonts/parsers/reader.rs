//! Bounds-checked big-endian cursor over a font buffer.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Cursor over a byte slice. Offsets in errors are relative to the slice start.
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        if offset > data.len() {
            return Err(Error::UnexpectedEof { offset });
        }
        Ok(Self { data, pos: offset })
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::UnexpectedEof { offset });
        }
        self.pos = offset;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::UnexpectedEof { offset: self.pos })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    /// Unsigned integer of `size` bytes (1..=4), as used by CFF offsets.
    pub fn read_uint(&mut self, size: u8) -> Result<u32> {
        let at = self.pos;
        match size {
            1 => self.read_u8().map(u32::from),
            2 => self.read_u16().map(u32::from),
            3 => Ok(BigEndian::read_u24(self.read_bytes(3)?)),
            4 => self.read_u32(),
            _ => Err(Error::parse(at, format!("invalid offset size {}", size))),
        }
    }

    /// 16.16 fixed-point number: signed integer part, unsigned fraction.
    pub fn read_fixed(&mut self) -> Result<f64> {
        let mantissa = self.read_i16()?;
        let fraction = self.read_u16()?;
        Ok(f64::from(mantissa) + f64::from(fraction) / 65536.0)
    }

    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian() {
        let data = [0x01, 0x2C, 0xFF, 0xFE, 0x00, 0x01, 0x80, 0x00];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u16().unwrap(), 300);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_fixed().unwrap(), 1.5);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_read_uint_sizes() {
        let data = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(ByteReader::new(&data).read_uint(3).unwrap(), 0x010203);
        assert_eq!(ByteReader::new(&data).read_uint(4).unwrap(), 0x01020304);
        assert!(ByteReader::new(&data).read_uint(5).is_err());
    }

    #[test]
    fn test_eof_reports_offset() {
        let data = [0u8; 3];
        let mut r = ByteReader::new(&data);
        r.skip(2).unwrap();
        match r.read_u16() {
            Err(Error::UnexpectedEof { offset }) => assert_eq!(offset, 2),
            other => panic!("expected EOF, got {:?}", other),
        }
    }
}

//! Big-endian binary reading over font table data
//!
//! All OpenType table data is big-endian. The reader wraps a byte slice
//! with a cursor and fails with [`FontError::UnexpectedEof`] on any read
//! that would run past the end; callers recover by seeking, never by
//! retrying.

use crate::error::{FontError, Result};

macro_rules! impl_read {
    ($name:ident, $typ:ty) => {
        pub fn $name(&mut self) -> Result<$typ> {
            const SIZE: usize = std::mem::size_of::<$typ>();
            let bytes = self.read_array::<SIZE>()?;
            Ok(<$typ>::from_be_bytes(bytes))
        }
    };
}

/// Sequential and random-access reader of big-endian primitives.
#[derive(Debug, Clone)]
pub struct BigEndianReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BigEndianReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length of the underlying data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position from the start of the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Seek to an absolute position from the start of the data.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Advance the cursor by `n` bytes without reading.
    pub fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self
            .pos
            .checked_add(N)
            .ok_or(FontError::UnexpectedEof(self.pos))?;
        let array: [u8; N] = self
            .data
            .get(self.pos..end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(FontError::UnexpectedEof(self.pos))?;
        self.pos = end;
        Ok(array)
    }

    impl_read!(read_u8, u8);
    impl_read!(read_i8, i8);
    impl_read!(read_u16, u16);
    impl_read!(read_i16, i16);
    impl_read!(read_u32, u32);
    impl_read!(read_i32, i32);

    /// Read a 32-bit offset field.
    pub fn read_offset32(&mut self) -> Result<u32> {
        self.read_u32()
    }

    /// Read a four-byte table tag.
    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        self.read_array::<4>()
    }

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(FontError::UnexpectedEof(self.pos))?;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or(FontError::UnexpectedEof(self.pos))?;
        self.pos = end;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let data = [0x00, 0x01, 0xFF, 0xFE, 0x00, 0x00, 0x04, 0x00];
        let mut reader = BigEndianReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 1);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0x0400);
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_seek_and_skip() {
        let data = [0, 0, 0, 10, 0, 0, 0, 20];
        let mut reader = BigEndianReader::new(&data);
        reader.seek(4);
        assert_eq!(reader.read_u32().unwrap(), 20);
        reader.seek(0);
        reader.skip(4);
        assert_eq!(reader.read_u32().unwrap(), 20);
    }

    #[test]
    fn test_read_past_end_fails() {
        let data = [0x12, 0x34];
        let mut reader = BigEndianReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        match reader.read_u16() {
            Err(FontError::UnexpectedEof(offset)) => assert_eq!(offset, 2),
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_read_does_not_advance() {
        let data = [0xAB];
        let mut reader = BigEndianReader::new(&data);
        assert!(reader.read_u32().is_err());
        // Caller can seek back and read what is actually there.
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
    }

    #[test]
    fn test_read_tag_and_bytes() {
        let data = *b"kern\x01\x02\x03";
        let mut reader = BigEndianReader::new(&data);
        assert_eq!(&reader.read_tag().unwrap(), b"kern");
        assert_eq!(reader.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert!(reader.read_bytes(1).is_err());
    }
}

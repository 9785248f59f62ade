//! Bounds-checked little-endian buffer primitives.
//!
//! Every access checks `offset + width <= len` before touching memory and
//! reports the failing field on error. Offsets near `usize::MAX` saturate
//! instead of wrapping, so a hostile pointer can never alias the start of the
//! buffer.

use crate::errors::{ProtocolError, Result};

/// Borrow `len` bytes at `offset`.
pub fn slice_at(buf: &[u8], offset: usize, len: usize, field: Option<u16>) -> Result<&[u8]> {
    let end = offset.saturating_add(len);
    buf.get(offset..end).ok_or_else(|| ProtocolError::too_small(field, end, buf.len()))
}

/// Copy `N` bytes at `offset` into an array.
pub fn read_array<const N: usize>(buf: &[u8], offset: usize, field: Option<u16>) -> Result<[u8; N]> {
    let bytes = slice_at(buf, offset, N, field)?;
    bytes.first_chunk::<N>().copied().ok_or_else(|| ProtocolError::too_small(field, N, bytes.len()))
}

/// Read a little-endian `u16` at `offset`.
pub fn read_u16(buf: &[u8], offset: usize, field: Option<u16>) -> Result<u16> {
    read_array(buf, offset, field).map(u16::from_le_bytes)
}

/// Copy `bytes` into the buffer at `offset`.
///
/// Nothing is written when the destination range does not fit.
pub fn write_at(buf: &mut [u8], offset: usize, bytes: &[u8], field: Option<u16>) -> Result<()> {
    let len = buf.len();
    let end = offset.saturating_add(bytes.len());
    let dest = buf.get_mut(offset..end).ok_or_else(|| ProtocolError::too_small(field, end, len))?;
    dest.copy_from_slice(bytes);
    Ok(())
}

/// Write a little-endian `u16` at `offset`.
pub fn write_u16(buf: &mut [u8], offset: usize, value: u16, field: Option<u16>) -> Result<()> {
    write_at(buf, offset, &value.to_le_bytes(), field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_within_bounds() {
        let buf = [0x34, 0x12, 0xff];
        assert_eq!(read_u16(&buf, 0, None).unwrap(), 0x1234);
        assert_eq!(read_array::<1>(&buf, 2, None).unwrap(), [0xff]);
        assert_eq!(slice_at(&buf, 1, 2, None).unwrap(), &[0x12, 0xff]);
        assert_eq!(slice_at(&buf, 3, 0, None).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn read_past_end_reports_need() {
        let buf = [0u8; 3];
        assert_eq!(
            read_u16(&buf, 2, Some(4)),
            Err(ProtocolError::BufferTooSmall { field: Some(4), needed: 4, len: 3 })
        );
    }

    #[test]
    fn huge_offset_saturates() {
        let buf = [0u8; 8];
        let err = slice_at(&buf, usize::MAX, 2, None).unwrap_err();
        assert_eq!(err, ProtocolError::BufferTooSmall { field: None, needed: usize::MAX, len: 8 });
    }

    #[test]
    fn failed_write_leaves_buffer_untouched() {
        let mut buf = [0u8; 4];
        assert!(write_at(&mut buf, 3, &[1, 2], Some(0)).is_err());
        assert_eq!(buf, [0; 4]);

        write_u16(&mut buf, 2, 0xbeef, None).unwrap();
        assert_eq!(buf, [0, 0, 0xef, 0xbe]);
    }
}

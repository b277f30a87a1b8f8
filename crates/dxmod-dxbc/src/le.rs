//! Little-endian field access at fixed byte offsets.

use crate::fourcc::FourCC;
use crate::DxbcError;

/// Reads a little-endian `u32` at `offset`.
pub fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32, DxbcError> {
    let slice = field(bytes, offset, 4)?;
    Ok(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

/// Writes `value` as a little-endian `u32` at `offset`.
pub fn write_u32_le(bytes: &mut [u8], offset: usize, value: u32) -> Result<(), DxbcError> {
    let len = bytes.len();
    let end = offset
        .checked_add(4)
        .ok_or_else(|| DxbcError::out_of_bounds("offset overflows when writing u32"))?;
    let slice = bytes.get_mut(offset..end).ok_or_else(|| {
        DxbcError::out_of_bounds(format!(
            "need 4 bytes at {offset}..{end}, but buffer length is {len}"
        ))
    })?;
    slice.copy_from_slice(&value.to_le_bytes());
    Ok(())
}

pub(crate) fn read_fourcc(bytes: &[u8], offset: usize) -> Result<FourCC, DxbcError> {
    let slice = field(bytes, offset, 4)?;
    Ok(FourCC([slice[0], slice[1], slice[2], slice[3]]))
}

pub(crate) fn read_array_16(bytes: &[u8], offset: usize) -> Result<[u8; 16], DxbcError> {
    let mut out = [0u8; 16];
    out.copy_from_slice(field(bytes, offset, 16)?);
    Ok(out)
}

fn field(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], DxbcError> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| DxbcError::out_of_bounds(format!("offset overflows when reading {len} bytes")))?;
    bytes.get(offset..end).ok_or_else(|| {
        DxbcError::out_of_bounds(format!(
            "need {len} bytes at {offset}..{end}, but buffer length is {}",
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let mut buf = [0u8; 8];
        write_u32_le(&mut buf, 4, 0x1122_3344).unwrap();
        assert_eq!(buf, [0, 0, 0, 0, 0x44, 0x33, 0x22, 0x11]);
        assert_eq!(read_u32_le(&buf, 4).unwrap(), 0x1122_3344);
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut buf = [0u8; 6];
        assert!(matches!(read_u32_le(&buf, 3), Err(DxbcError::OutOfBounds { .. })));
        assert!(write_u32_le(&mut buf, usize::MAX - 1, 0).is_err());
    }
}

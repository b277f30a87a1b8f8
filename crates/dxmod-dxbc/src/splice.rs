//! In-place replacement of the shader bytecode chunk.

use crate::checksum::stamp_checksum;
use crate::dxbc::{DxbcFile, DXBC_HEADER_LEN};
use crate::error::DxbcError;
use crate::fourcc::FourCC;
use crate::le::{read_u32_le, write_u32_le};

/// Where the shader bytecode chunk sits inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLocation {
    /// Position of the chunk in the offset table.
    pub index: usize,
    /// Chunk tag (`SHDR` or `SHEX`).
    pub fourcc: FourCC,
    /// Byte offset of the chunk header.
    pub offset: usize,
    /// Payload size in bytes.
    pub size: usize,
}

impl ChunkLocation {
    /// Byte range of the payload within the container.
    pub fn payload_range(&self) -> core::ops::Range<usize> {
        self.offset + 8..self.offset + 8 + self.size
    }
}

/// Outcome of [`splice_shader_chunk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceReport {
    /// Payload size before the splice.
    pub old_size: usize,
    /// Payload size after the splice.
    pub new_size: usize,
    /// Offset-table indices of the chunks that were relocated.
    pub shifted_chunks: Vec<usize>,
    /// Checksum written into the header.
    pub checksum: [u8; 16],
}

/// Finds the shader bytecode chunk of a container.
///
/// Selection matches [`DxbcFile::find_first_shader_chunk`]: `SHEX` wins over
/// `SHDR` wherever each sits in the offset table. A container with no chunks,
/// or without either tag, is rejected.
pub fn locate_shader_chunk(container: &[u8]) -> Result<ChunkLocation, DxbcError> {
    let file = DxbcFile::parse(container)?;
    if file.header().chunk_count == 0 {
        return Err(DxbcError::missing_chunk("container has no chunks"));
    }
    file.shader_chunk_index()
        .and_then(|index| Some((index, file.chunk(index)?)))
        .map(|(index, chunk)| ChunkLocation {
            index,
            fourcc: chunk.fourcc,
            offset: chunk.offset,
            size: chunk.data.len(),
        })
        .ok_or_else(|| DxbcError::missing_chunk("container has no SHDR or SHEX chunk"))
}

/// Replaces the shader bytecode payload of `container` with `code`.
///
/// The container is rewritten in place: the chunk's size field is updated,
/// every chunk stored after the code chunk is relocated by the size delta,
/// the total size is recomputed, and a fresh checksum is stamped. Bytes past
/// the declared total size are discarded.
pub fn splice_shader_chunk(container: &mut Vec<u8>, code: &[u8]) -> Result<SpliceReport, DxbcError> {
    let location = locate_shader_chunk(container)?;
    let total_size = read_u32_le(container, 24)? as usize;
    container.truncate(total_size);

    let chunk_count = read_u32_le(container, 28)? as usize;
    let new_size = u32::try_from(code.len())
        .map_err(|_| DxbcError::out_of_bounds(format!("code chunk of {} bytes is too large", code.len())))?;

    container.splice(location.payload_range(), code.iter().copied());
    write_u32_le(container, location.offset + 4, new_size)?;

    let delta = code.len() as i64 - location.size as i64;
    let mut shifted_chunks = Vec::new();
    for i in 0..chunk_count {
        let entry = DXBC_HEADER_LEN + i * 4;
        let offset = read_u32_le(container, entry)?;
        if offset as usize > location.offset {
            let moved = u32::try_from(offset as i64 + delta).map_err(|_| {
                DxbcError::malformed_offsets(format!("chunk {i} offset {offset} cannot shift by {delta}"))
            })?;
            write_u32_le(container, entry, moved)?;
            shifted_chunks.push(i);
        }
    }

    let new_total = u32::try_from(container.len())
        .map_err(|_| DxbcError::out_of_bounds("container exceeds 4 GiB"))?;
    write_u32_le(container, 24, new_total)?;
    let checksum = stamp_checksum(container)?;

    tracing::debug!(
        chunk = %location.fourcc,
        old_size = location.size,
        new_size = code.len(),
        shifted = shifted_chunks.len(),
        "spliced shader chunk"
    );

    Ok(SpliceReport {
        old_size: location.size,
        new_size: code.len(),
        shifted_chunks,
        checksum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_container;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<u8> {
        build_container(&[
            (FourCC::ISGN, &[0x11; 8]),
            (FourCC::SHEX, &[0x22; 12]),
            (FourCC::OSGN, &[0x33; 8]),
            (FourCC::SFI0, &[0x44; 8]),
        ])
    }

    fn offsets(bytes: &[u8]) -> Vec<usize> {
        DxbcFile::parse(bytes).unwrap().chunks().map(|c| c.offset).collect()
    }

    #[test]
    fn growing_code_shifts_following_chunks() {
        let mut bytes = sample();
        let before = offsets(&bytes);
        let report = splice_shader_chunk(&mut bytes, &[0x55; 20]).unwrap();

        assert_eq!(report.old_size, 12);
        assert_eq!(report.new_size, 20);
        assert_eq!(report.shifted_chunks, vec![2, 3]);

        let after = offsets(&bytes);
        assert_eq!(after, vec![before[0], before[1], before[2] + 8, before[3] + 8]);

        let file = DxbcFile::parse(&bytes).unwrap();
        assert_eq!(file.header().total_size as usize, bytes.len());
        assert!(file.checksum_matches());
        assert_eq!(file.get_chunk(FourCC::SHEX).unwrap().data, &[0x55; 20]);
        assert_eq!(file.get_chunk(FourCC::OSGN).unwrap().data, &[0x33; 8]);
        assert_eq!(file.get_chunk(FourCC::SFI0).unwrap().data, &[0x44; 8]);
    }

    #[test]
    fn shrinking_code_shifts_backwards() {
        let mut bytes = sample();
        let before = offsets(&bytes);
        splice_shader_chunk(&mut bytes, &[0x66; 4]).unwrap();
        let after = offsets(&bytes);
        assert_eq!(after[2], before[2] - 8);
        assert_eq!(after[3], before[3] - 8);
    }

    #[test]
    fn chunks_before_code_are_untouched_when_stored_out_of_order() {
        // The offset table lists OSGN before SHDR, but its bytes live after it.
        let mut bytes = build_container(&[(FourCC::SHDR, &[1; 4]), (FourCC::OSGN, &[2; 4])]);
        bytes.swap(32, 36);
        bytes.swap(33, 37);
        bytes.swap(34, 38);
        bytes.swap(35, 39);
        let report = splice_shader_chunk(&mut bytes, &[3; 8]).unwrap();
        assert_eq!(report.shifted_chunks, vec![0]);
        let file = DxbcFile::parse(&bytes).unwrap();
        assert_eq!(file.get_chunk(FourCC::OSGN).unwrap().data, &[2; 4]);
    }

    #[test]
    fn shex_is_spliced_even_when_shdr_comes_first() {
        let mut bytes = build_container(&[
            (FourCC::SHDR, &[0x11; 8]),
            (FourCC::SHEX, &[0x22; 8]),
        ]);
        let file = DxbcFile::parse(&bytes).unwrap();
        let location = locate_shader_chunk(&bytes).unwrap();
        assert_eq!(location.index, 1);
        assert_eq!(location.fourcc, FourCC::SHEX);
        assert_eq!(location.offset, file.find_first_shader_chunk().unwrap().offset);

        splice_shader_chunk(&mut bytes, &[0x33; 12]).unwrap();
        let file = DxbcFile::parse(&bytes).unwrap();
        assert_eq!(file.get_chunk(FourCC::SHDR).unwrap().data, &[0x11; 8]);
        assert_eq!(file.get_chunk(FourCC::SHEX).unwrap().data, &[0x33; 12]);
    }

    #[test]
    fn missing_code_chunk_is_fatal() {
        let mut bytes = build_container(&[(FourCC::ISGN, &[0; 8])]);
        assert!(matches!(
            splice_shader_chunk(&mut bytes, &[]),
            Err(DxbcError::MissingChunk { .. })
        ));
    }

    #[test]
    fn empty_container_is_fatal() {
        let mut bytes = build_container(&[]);
        assert!(matches!(
            locate_shader_chunk(&bytes),
            Err(DxbcError::MissingChunk { .. })
        ));
        assert!(splice_shader_chunk(&mut bytes, &[0; 4]).is_err());
    }
}

use crate::checksum::container_checksum;
use crate::error::DxbcError;
use crate::fourcc::FourCC;
use crate::le::{read_array_16, read_fourcc, read_u32_le};
use crate::signature::{parse_signature_chunk_with_fourcc, SignatureChunk};
use core::fmt;

/// Size of the fixed header: magic, checksum, version, total size, chunk count.
pub const DXBC_HEADER_LEN: usize = 4 + 16 + 4 + 4 + 4;
// Real containers hold a handful of chunks; the cap keeps hostile offset tables cheap to reject.
const MAX_DXBC_CHUNK_COUNT: u32 = 4096;

/// The fixed header of a `DXBC` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxbcHeader {
    /// Always [`FourCC::DXBC`].
    pub magic: FourCC,
    /// Checksum stored in the header.
    pub checksum: [u8; 16],
    /// Version word; `1` for every container in the wild.
    pub version: u32,
    /// Declared total size in bytes.
    pub total_size: u32,
    /// Number of entries in the chunk offset table.
    pub chunk_count: u32,
}

/// A single chunk within a `DXBC` container.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct DxbcChunk<'a> {
    /// The chunk tag.
    pub fourcc: FourCC,
    /// Byte offset of the chunk header (tag + size) within the container.
    pub offset: usize,
    /// Raw chunk payload bytes.
    pub data: &'a [u8],
}

impl fmt::Debug for DxbcChunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DxbcChunk")
            .field("fourcc", &self.fourcc)
            .field("offset", &self.offset)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// A parsed, fully bounds-checked `DXBC` container.
#[derive(Debug, Clone)]
pub struct DxbcFile<'a> {
    bytes: &'a [u8],
    header: DxbcHeader,
    chunk_offsets: Vec<usize>,
}

impl<'a> DxbcFile<'a> {
    /// Parses a `DXBC` container from `bytes`.
    ///
    /// Bytes past the declared `total_size` are ignored. Every chunk header
    /// and payload must lie inside the container, after the offset table.
    pub fn parse(bytes: &'a [u8]) -> Result<DxbcFile<'a>, DxbcError> {
        if bytes.len() < DXBC_HEADER_LEN {
            return Err(DxbcError::malformed_header(format!(
                "need at least {DXBC_HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let magic = read_fourcc(bytes, 0)?;
        if magic != FourCC::DXBC {
            return Err(DxbcError::malformed_header(format!(
                "bad magic {magic:?}, expected {:?}",
                FourCC::DXBC
            )));
        }
        let checksum = read_array_16(bytes, 4)?;
        let version = read_u32_le(bytes, 20)?;
        let total_size = read_u32_le(bytes, 24)?;
        let chunk_count = read_u32_le(bytes, 28)?;

        if chunk_count > MAX_DXBC_CHUNK_COUNT {
            return Err(DxbcError::malformed_offsets(format!(
                "chunk_count {chunk_count} exceeds maximum {MAX_DXBC_CHUNK_COUNT}"
            )));
        }
        if (total_size as usize) < DXBC_HEADER_LEN {
            return Err(DxbcError::malformed_header(format!(
                "total_size {total_size} is smaller than header size {DXBC_HEADER_LEN}"
            )));
        }
        if total_size as usize > bytes.len() {
            return Err(DxbcError::out_of_bounds(format!(
                "total_size {total_size} exceeds buffer length {}",
                bytes.len()
            )));
        }
        let bytes = &bytes[..total_size as usize];

        // chunk_count is capped above, so this cannot overflow.
        let table_end = DXBC_HEADER_LEN + chunk_count as usize * 4;
        if table_end > bytes.len() {
            return Err(DxbcError::malformed_offsets(format!(
                "chunk offset table ends at {table_end}, but total_size is {}",
                bytes.len()
            )));
        }

        let mut chunk_offsets = Vec::with_capacity(chunk_count as usize);
        for i in 0..chunk_count as usize {
            let offset = read_u32_le(bytes, DXBC_HEADER_LEN + i * 4)? as usize;
            if offset < table_end {
                return Err(DxbcError::malformed_offsets(format!(
                    "chunk {i} offset {offset} points into the header or offset table (need >= {table_end})"
                )));
            }

            let header_end = offset.checked_add(8).ok_or_else(|| {
                DxbcError::malformed_offsets(format!("chunk {i} offset {offset} overflows"))
            })?;
            if header_end > bytes.len() {
                return Err(DxbcError::out_of_bounds(format!(
                    "chunk {i} header at {offset}..{header_end} is outside total_size {}",
                    bytes.len()
                )));
            }
            let fourcc = read_fourcc(bytes, offset)?;
            let size = read_u32_le(bytes, offset + 4)? as usize;
            let data_end = header_end.checked_add(size).ok_or_else(|| {
                DxbcError::malformed_offsets(format!("chunk {i} size {size} overflows"))
            })?;
            if data_end > bytes.len() {
                return Err(DxbcError::out_of_bounds(format!(
                    "chunk {i} ({fourcc}) data at {header_end}..{data_end} is outside total_size {}",
                    bytes.len()
                )));
            }
            chunk_offsets.push(offset);
        }

        Ok(DxbcFile {
            bytes,
            header: DxbcHeader {
                magic,
                checksum,
                version,
                total_size,
                chunk_count,
            },
            chunk_offsets,
        })
    }

    /// Returns the parsed header.
    pub fn header(&self) -> &DxbcHeader {
        &self.header
    }

    /// Returns the bytes covered by the declared `total_size`.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the chunk at position `index` of the offset table.
    pub fn chunk(&self, index: usize) -> Option<DxbcChunk<'a>> {
        let offset = *self.chunk_offsets.get(index)?;
        // Ranges were validated by `parse`.
        let fourcc = read_fourcc(self.bytes, offset).ok()?;
        let size = read_u32_le(self.bytes, offset + 4).ok()? as usize;
        let data = self.bytes.get(offset + 8..offset + 8 + size)?;
        Some(DxbcChunk {
            fourcc,
            offset,
            data,
        })
    }

    /// Iterates over all chunks in offset-table order.
    pub fn chunks(&self) -> impl Iterator<Item = DxbcChunk<'a>> + '_ {
        (0..self.chunk_offsets.len()).filter_map(move |i| self.chunk(i))
    }

    /// Returns the first chunk tagged `fourcc`, if any.
    pub fn get_chunk(&self, fourcc: FourCC) -> Option<DxbcChunk<'a>> {
        self.chunks().find(|chunk| chunk.fourcc == fourcc)
    }

    /// Returns the shader bytecode chunk, preferring `SHEX` over `SHDR`.
    pub fn find_first_shader_chunk(&self) -> Option<DxbcChunk<'a>> {
        self.shader_chunk_index().and_then(|index| self.chunk(index))
    }

    /// Offset-table position of the chunk `find_first_shader_chunk` returns.
    pub fn shader_chunk_index(&self) -> Option<usize> {
        let position = |fourcc: FourCC| {
            (0..self.chunk_offsets.len()).find(|&i| self.chunk(i).is_some_and(|chunk| chunk.fourcc == fourcc))
        };
        position(FourCC::SHEX).or_else(|| position(FourCC::SHDR))
    }

    /// Returns and parses the first signature chunk of the requested kind.
    ///
    /// `kind` may be any spelling of a signature tag; the other spellings of
    /// the same signature (`ISGN`/`ISG1`, `OSGN`/`OSG5`/`OSG1`, `PCSG`/`PSG1`)
    /// are tried in that order when the exact tag is absent.
    pub fn get_signature(&self, kind: FourCC) -> Option<Result<SignatureChunk, DxbcError>> {
        let family: &[FourCC] = match &kind.0 {
            b"ISGN" | b"ISG1" => &[FourCC::ISGN, FourCC::ISG1],
            b"OSGN" | b"OSG5" | b"OSG1" => &[FourCC::OSGN, FourCC::OSG5, FourCC::OSG1],
            b"PCSG" | b"PSG1" => &[FourCC::PCSG, FourCC::PSG1],
            _ => core::slice::from_ref(&kind),
        };

        let chunk = self
            .get_chunk(kind)
            .or_else(|| family.iter().find_map(|&tag| self.get_chunk(tag)))?;
        Some(
            parse_signature_chunk_with_fourcc(chunk.fourcc, chunk.data).map_err(|e| {
                DxbcError::invalid_chunk(format!("{} signature chunk: {}", chunk.fourcc, e.context()))
            }),
        )
    }

    /// Computes the checksum of the container as it currently stands.
    pub fn computed_checksum(&self) -> [u8; 16] {
        container_checksum(self.bytes)
    }

    /// Returns `true` if the stored checksum matches [`Self::computed_checksum`].
    pub fn checksum_matches(&self) -> bool {
        self.computed_checksum() == self.header.checksum
    }

    /// Returns a human-readable summary of the container and its chunks.
    pub fn debug_summary(&self) -> String {
        use core::fmt::Write as _;

        let mut out = String::new();
        let _ = write!(
            &mut out,
            "{} total_size={} chunk_count={} checksum={}",
            self.header.magic,
            self.header.total_size,
            self.header.chunk_count,
            if self.checksum_matches() { "ok" } else { "stale" }
        );
        for (idx, chunk) in self.chunks().enumerate() {
            let _ = write!(
                &mut out,
                "\n  [{idx:02}] {} @{:#x} {} bytes",
                chunk.fourcc,
                chunk.offset,
                chunk.data.len()
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_container;

    #[test]
    fn parses_chunks_in_table_order() {
        let bytes = build_container(&[(FourCC::ISGN, &[1, 2, 3, 4]), (FourCC::SHEX, &[9; 8])]);
        let file = DxbcFile::parse(&bytes).unwrap();

        assert_eq!(file.header().version, 1);
        assert_eq!(file.header().chunk_count, 2);
        let tags: Vec<_> = file.chunks().map(|c| c.fourcc).collect();
        assert_eq!(tags, vec![FourCC::ISGN, FourCC::SHEX]);
        assert_eq!(file.find_first_shader_chunk().unwrap().data, &[9; 8]);
        assert_eq!(file.chunk(0).unwrap().offset, DXBC_HEADER_LEN + 8);
    }

    #[test]
    fn trailing_bytes_past_total_size_are_ignored() {
        let mut bytes = build_container(&[(FourCC::SHDR, &[0; 4])]);
        let len = bytes.len();
        bytes.extend_from_slice(&[0xEE; 16]);
        let file = DxbcFile::parse(&bytes).unwrap();
        assert_eq!(file.bytes().len(), len);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = build_container(&[]);
        bytes[0] = b'X';
        assert!(matches!(
            DxbcFile::parse(&bytes),
            Err(DxbcError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn rejects_truncated_header() {
        assert!(matches!(
            DxbcFile::parse(b"DXBC"),
            Err(DxbcError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn rejects_offset_into_table() {
        let mut bytes = build_container(&[(FourCC::SHDR, &[0; 4])]);
        bytes[32..36].copy_from_slice(&8u32.to_le_bytes());
        assert!(matches!(
            DxbcFile::parse(&bytes),
            Err(DxbcError::MalformedOffsets { .. })
        ));
    }

    #[test]
    fn rejects_chunk_overrunning_total_size() {
        let mut bytes = build_container(&[(FourCC::SHDR, &[0; 4])]);
        let size_pos = DXBC_HEADER_LEN + 4 + 4;
        bytes[size_pos..size_pos + 4].copy_from_slice(&64u32.to_le_bytes());
        assert!(matches!(
            DxbcFile::parse(&bytes),
            Err(DxbcError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_huge_chunk_count() {
        let mut bytes = build_container(&[]);
        bytes[28..32].copy_from_slice(&(MAX_DXBC_CHUNK_COUNT + 1).to_le_bytes());
        assert!(matches!(
            DxbcFile::parse(&bytes),
            Err(DxbcError::MalformedOffsets { .. })
        ));
    }

    #[test]
    fn prefers_shex_over_earlier_shdr() {
        let bytes = build_container(&[(FourCC::SHDR, &[1; 4]), (FourCC::SHEX, &[2; 4])]);
        let file = DxbcFile::parse(&bytes).unwrap();
        assert_eq!(file.find_first_shader_chunk().unwrap().fourcc, FourCC::SHEX);
    }

    #[test]
    fn unstamped_container_reports_stale_checksum() {
        let mut bytes = build_container(&[(FourCC::SHDR, &[0; 4])]);
        assert!(!DxbcFile::parse(&bytes).unwrap().checksum_matches());
        crate::stamp_checksum(&mut bytes).unwrap();
        let file = DxbcFile::parse(&bytes).unwrap();
        assert!(file.checksum_matches());
        assert!(file.debug_summary().contains("checksum=ok"));
    }
}

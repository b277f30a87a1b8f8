//! Binary signature chunks.
//!
//! Every entry layout shares a 24-byte prefix:
//!
//! ```text
//! u32 semantic_name_offset
//! u32 semantic_index
//! u32 system_value_type
//! u32 component_type
//! u32 register
//! u8  mask
//! u8  read_write_mask
//! u16 reserved
//! ```
//!
//! `OSG5` appends a `u32 stream`; `ISG1`/`OSG1`/`PSG1` append `u32 stream`
//! and `u32 min_precision`.

use std::collections::HashMap;

use crate::fourcc::FourCC;
use crate::le::read_u32_le;
use crate::DxbcError;

const SIGNATURE_HEADER_LEN: usize = 8;
const NAME_TABLE_PADDING: u8 = 0xAB;

/// Entry layout of a signature chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignatureLayout {
    /// 24-byte entries (`ISGN`, `OSGN`, `PCSG`).
    Basic,
    /// 28-byte entries with a stream index (`OSG5`).
    Stream,
    /// 32-byte entries with stream and minimum precision (`ISG1`, `OSG1`, `PSG1`).
    MinPrecision,
}

impl SignatureLayout {
    /// Size of one entry in bytes.
    pub fn entry_len(self) -> usize {
        match self {
            Self::Basic => 24,
            Self::Stream => 28,
            Self::MinPrecision => 32,
        }
    }

    /// Layout implied by a chunk tag, if the tag names a signature.
    pub fn for_fourcc(fourcc: FourCC) -> Option<Self> {
        match &fourcc.0 {
            b"ISGN" | b"OSGN" | b"PCSG" => Some(Self::Basic),
            b"OSG5" => Some(Self::Stream),
            b"ISG1" | b"OSG1" | b"PSG1" => Some(Self::MinPrecision),
            _ => None,
        }
    }
}

/// A parsed signature chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureChunk {
    /// Layout the entries were decoded with.
    pub layout: SignatureLayout,
    /// Parsed entries, in table order.
    pub entries: Vec<SignatureEntry>,
}

/// A single signature entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureEntry {
    /// Semantic name (e.g. `"TEXCOORD"`).
    pub semantic_name: String,
    /// Semantic index.
    pub semantic_index: u32,
    /// System value id (`D3D_NAME`).
    pub system_value_type: u32,
    /// Register component type (`D3D_REGISTER_COMPONENT_TYPE`).
    pub component_type: u32,
    /// Register index; `0xFFFFFFFF` when the entry has no register.
    pub register: u32,
    /// Component presence mask.
    pub mask: u8,
    /// Read/write mask.
    pub read_write_mask: u8,
    /// Geometry shader stream; zero for layouts without the field.
    pub stream: u32,
    /// Minimum precision (`D3D_MIN_PRECISION`); zero for layouts without the field.
    pub min_precision: u32,
}

/// Parses a signature chunk payload whose tag is unknown.
///
/// The layouts are tried from smallest to largest; the first one whose table
/// and name offsets are consistent wins.
pub fn parse_signature_chunk(bytes: &[u8]) -> Result<SignatureChunk, DxbcError> {
    let mut errors = Vec::new();
    for layout in [
        SignatureLayout::Basic,
        SignatureLayout::MinPrecision,
        SignatureLayout::Stream,
    ] {
        match parse_with_layout(bytes, layout) {
            Ok(chunk) => return Ok(chunk),
            Err(err) => errors.push(format!("{} bytes: {}", layout.entry_len(), err.context())),
        }
    }
    Err(DxbcError::invalid_chunk(format!(
        "no signature layout fits ({})",
        errors.join("; ")
    )))
}

/// Parses a signature chunk payload using the layout implied by `fourcc`.
pub fn parse_signature_chunk_with_fourcc(
    fourcc: FourCC,
    bytes: &[u8],
) -> Result<SignatureChunk, DxbcError> {
    match SignatureLayout::for_fourcc(fourcc) {
        Some(layout) => parse_with_layout(bytes, layout),
        None => parse_signature_chunk(bytes),
    }
}

fn parse_with_layout(bytes: &[u8], layout: SignatureLayout) -> Result<SignatureChunk, DxbcError> {
    let entry_len = layout.entry_len();
    let count = read_field(bytes, 0, "param_count")? as usize;
    let table_start = read_field(bytes, 4, "param_offset")? as usize;

    if count == 0 {
        return Ok(SignatureChunk {
            layout,
            entries: Vec::new(),
        });
    }
    if table_start < SIGNATURE_HEADER_LEN || table_start % 4 != 0 {
        return Err(DxbcError::invalid_chunk(format!(
            "param_offset {table_start} is misplaced"
        )));
    }
    let table_end = count
        .checked_mul(entry_len)
        .and_then(|len| len.checked_add(table_start))
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| {
            DxbcError::invalid_chunk(format!(
                "{count} entries at {table_start} do not fit in {} bytes",
                bytes.len()
            ))
        })?;

    let mut entries = Vec::new();
    entries.try_reserve_exact(count).map_err(|_| {
        DxbcError::invalid_chunk(format!("signature entry count {count} is too large"))
    })?;

    for (i, start) in (table_start..table_end).step_by(entry_len).enumerate() {
        let name_offset = read_field(bytes, start, "semantic_name_offset")? as usize;
        if name_offset < table_end {
            return Err(DxbcError::invalid_chunk(format!(
                "entry {i} name offset {name_offset} points into the entry table"
            )));
        }
        let packed = read_field(bytes, start + 20, "mask")?;
        let (stream, min_precision) = match layout {
            SignatureLayout::Basic => (0, 0),
            SignatureLayout::Stream => (read_field(bytes, start + 24, "stream")?, 0),
            SignatureLayout::MinPrecision => (
                read_field(bytes, start + 24, "stream")?,
                read_field(bytes, start + 28, "min_precision")?,
            ),
        };

        entries.push(SignatureEntry {
            semantic_name: read_cstring(bytes, name_offset)
                .map_err(|e| DxbcError::invalid_chunk(format!("entry {i}: {}", e.context())))?
                .to_owned(),
            semantic_index: read_field(bytes, start + 4, "semantic_index")?,
            system_value_type: read_field(bytes, start + 8, "system_value_type")?,
            component_type: read_field(bytes, start + 12, "component_type")?,
            register: read_field(bytes, start + 16, "register")?,
            mask: (packed & 0xFF) as u8,
            read_write_mask: ((packed >> 8) & 0xFF) as u8,
            stream,
            min_precision,
        });
    }

    Ok(SignatureChunk { layout, entries })
}

/// Serializes `entries` into a signature chunk payload.
///
/// Semantic names are stored once each, in first-use order, directly after
/// the entry table. The payload is padded to a multiple of four bytes with
/// `0xAB`.
pub fn write_signature_chunk(entries: &[SignatureEntry], layout: SignatureLayout) -> Vec<u8> {
    let entry_len = layout.entry_len();
    let table_end = SIGNATURE_HEADER_LEN + entries.len() * entry_len;

    let mut names = Vec::<u8>::new();
    let mut name_offsets = HashMap::<&str, u32>::new();
    let mut offsets = Vec::with_capacity(entries.len());
    for entry in entries {
        let offset = *name_offsets
            .entry(entry.semantic_name.as_str())
            .or_insert_with(|| {
                let offset = (table_end + names.len()) as u32;
                names.extend_from_slice(entry.semantic_name.as_bytes());
                names.push(0);
                offset
            });
        offsets.push(offset);
    }

    let mut out = Vec::with_capacity(table_end + names.len() + 3);
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    out.extend_from_slice(&(SIGNATURE_HEADER_LEN as u32).to_le_bytes());
    for (entry, name_offset) in entries.iter().zip(offsets) {
        let packed = u32::from(entry.mask) | u32::from(entry.read_write_mask) << 8;
        for word in [
            name_offset,
            entry.semantic_index,
            entry.system_value_type,
            entry.component_type,
            entry.register,
            packed,
        ] {
            out.extend_from_slice(&word.to_le_bytes());
        }
        if layout >= SignatureLayout::Stream {
            out.extend_from_slice(&entry.stream.to_le_bytes());
        }
        if layout == SignatureLayout::MinPrecision {
            out.extend_from_slice(&entry.min_precision.to_le_bytes());
        }
    }
    out.extend_from_slice(&names);
    while out.len() % 4 != 0 {
        out.push(NAME_TABLE_PADDING);
    }
    out
}

fn read_field(bytes: &[u8], offset: usize, what: &str) -> Result<u32, DxbcError> {
    read_u32_le(bytes, offset).map_err(|e| DxbcError::invalid_chunk(format!("{what}: {}", e.context())))
}

fn read_cstring(bytes: &[u8], offset: usize) -> Result<&str, DxbcError> {
    let tail = bytes.get(offset..).ok_or_else(|| {
        DxbcError::invalid_chunk(format!(
            "semantic name offset {offset} is outside chunk length {}",
            bytes.len()
        ))
    })?;
    let nul = tail.iter().position(|&b| b == 0).ok_or_else(|| {
        DxbcError::invalid_chunk(format!("semantic name at {offset} is missing a terminator"))
    })?;
    core::str::from_utf8(&tail[..nul])
        .map_err(|_| DxbcError::invalid_chunk(format!("semantic name at {offset} is not UTF-8")))
}

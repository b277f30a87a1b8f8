//! Parser for the signature tables printed at the top of a disassembly:
//!
//! ```text
//! // Input signature:
//! //
//! // Name                 Index   Mask Register SysValue  Format   Used
//! // -------------------- ----- ------ -------- -------- ------- ------
//! // POSITION                 0   xyzw        0     NONE   float   xyzw
//! // TEXCOORD                 0   xy          1     NONE   float   xy
//! ```
//!
//! Columns are located from the dash line, so masks with gaps (`x z `) are
//! read correctly. A block ends at the first line that is not a table row.

use crate::fourcc::FourCC;
use crate::signature::{write_signature_chunk, SignatureEntry, SignatureLayout};

/// Which signature a comment block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// `// Input signature:`
    Input,
    /// `// Output signature:`
    Output,
    /// `// Patch Constant signature:`
    PatchConstant,
}

impl SignatureKind {
    fn from_header(line: &str) -> Option<Self> {
        let body = comment_body(line)?.trim();
        match body {
            "Input signature:" => Some(Self::Input),
            "Output signature:" => Some(Self::Output),
            "Patch Constant signature:" => Some(Self::PatchConstant),
            _ => None,
        }
    }

    fn from_absent_marker(line: &str) -> Option<Self> {
        let body = comment_body(line)?.trim();
        match body {
            "no Input" => Some(Self::Input),
            "no Output" => Some(Self::Output),
            "no Patch Constant" => Some(Self::PatchConstant),
            _ => None,
        }
    }
}

/// A signature rebuilt from its comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSignature {
    /// Which signature the block described.
    pub kind: SignatureKind,
    /// Smallest entry layout able to hold every row.
    pub layout: SignatureLayout,
    /// Rows, in listing order.
    pub entries: Vec<SignatureEntry>,
}

impl TextSignature {
    /// Chunk tag matching the signature kind and layout.
    pub fn fourcc(&self) -> FourCC {
        match (self.kind, self.layout) {
            (SignatureKind::Input, SignatureLayout::MinPrecision) => FourCC::ISG1,
            (SignatureKind::Input, _) => FourCC::ISGN,
            (SignatureKind::Output, SignatureLayout::Basic) => FourCC::OSGN,
            (SignatureKind::Output, SignatureLayout::Stream) => FourCC::OSG5,
            (SignatureKind::Output, SignatureLayout::MinPrecision) => FourCC::OSG1,
            (SignatureKind::PatchConstant, SignatureLayout::MinPrecision) => FourCC::PSG1,
            (SignatureKind::PatchConstant, _) => FourCC::PCSG,
        }
    }

    /// Serializes the signature into a chunk payload.
    pub fn to_chunk_bytes(&self) -> Vec<u8> {
        write_signature_chunk(&self.entries, self.layout)
    }
}

/// `(keyword, component type, min precision)`
static FORMATS: &[(&str, u32, u32)] = &[
    ("unknown", 0, 0),
    ("uint", 1, 0),
    ("int", 2, 0),
    ("float", 3, 0),
    ("min16f", 3, 1),
    ("min2_8f", 3, 2),
    ("min16i", 2, 4),
    ("min16u", 1, 5),
];

static SYSTEM_VALUES: &[(&str, u32)] = &[
    ("NONE", 0),
    ("POS", 1),
    ("CLIPDST", 2),
    ("CULLDST", 3),
    ("RTINDEX", 4),
    ("VPINDEX", 5),
    ("VERTID", 6),
    ("PRIMID", 7),
    ("INSTID", 8),
    ("FFACE", 9),
    ("SAMPLE", 10),
    ("QUADEDGE", 11),
    ("QUADINT", 12),
    ("TRIEDGE", 13),
    ("TRIINT", 14),
    ("LINEDET", 15),
    ("LINEDEN", 16),
    ("TARGET", 64),
    ("DEPTH", 65),
    ("COVERAGE", 66),
    ("DEPTHGE", 67),
    ("DEPTHLE", 68),
    ("STENCILREF", 69),
    ("INNERCOV", 70),
];

/// Looks up a signature `Format` keyword, returning `(component type, min precision)`.
pub fn format_keyword(keyword: &str) -> Option<(u32, u32)> {
    FORMATS
        .iter()
        .find(|(name, ..)| *name == keyword)
        .map(|&(_, ty, precision)| (ty, precision))
}

/// Looks up a signature `SysValue` keyword.
pub fn system_value_keyword(keyword: &str) -> Option<u32> {
    SYSTEM_VALUES
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|&(_, id)| id)
}

/// Extracts every signature block from a disassembly listing.
///
/// Blocks are returned in listing order; `// no Input`-style markers produce
/// an empty signature.
pub fn parse_signature_blocks(text: &str) -> Vec<TextSignature> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if let Some(kind) = SignatureKind::from_absent_marker(lines[i]) {
            out.push(TextSignature {
                kind,
                layout: SignatureLayout::Basic,
                entries: Vec::new(),
            });
            i += 1;
            continue;
        }
        let Some(kind) = SignatureKind::from_header(lines[i]) else {
            i += 1;
            continue;
        };

        i += 1;
        let Some(dash_pos) = lines[i..]
            .iter()
            .take(4)
            .position(|line| comment_body(line).is_some_and(is_dash_line))
        else {
            continue;
        };
        let dash_line = lines[i + dash_pos];
        let columns = dash_columns(dash_line);
        i += dash_pos + 1;

        let mut layout = SignatureLayout::Basic;
        let mut entries = Vec::new();
        while let Some(row) = lines.get(i).and_then(|line| parse_row(line, &columns, kind)) {
            let (entry, row_layout) = row;
            layout = layout.max(row_layout);
            entries.push(entry);
            i += 1;
        }
        if kind != SignatureKind::Output && layout == SignatureLayout::Stream {
            layout = SignatureLayout::MinPrecision;
        }
        tracing::trace!(?kind, ?layout, rows = entries.len(), "parsed signature block");
        out.push(TextSignature {
            kind,
            layout,
            entries,
        });
    }
    out
}

fn comment_body(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix("//")
}

fn is_dash_line(body: &str) -> bool {
    let body = body.trim();
    !body.is_empty() && body.chars().all(|c| c == '-' || c == ' ')
}

/// Byte ranges of each dash group, relative to the full line.
fn dash_columns(line: &str) -> Vec<(usize, usize)> {
    let mut columns = Vec::new();
    let mut start = None;
    for (pos, c) in line.char_indices() {
        match (c == '-', start) {
            (true, None) => start = Some(pos),
            (false, Some(s)) => {
                columns.push((s, pos));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        columns.push((s, line.len()));
    }
    columns
}

/// Text of column `index`: everything between the previous column's right
/// edge and this column's right edge.
fn column<'a>(line: &'a str, columns: &[(usize, usize)], index: usize) -> &'a str {
    let left = if index == 0 {
        columns[0].0
    } else {
        columns[index - 1].1
    };
    let right = if index + 1 == columns.len() {
        line.len()
    } else {
        columns[index].1
    };
    line.get(left.min(line.len())..right.min(line.len()))
        .unwrap_or_default()
}

fn component_mask(text: &str) -> Option<u8> {
    let mut mask = 0u8;
    for c in text.chars() {
        mask |= match c {
            'x' => 1,
            'y' => 2,
            'z' => 4,
            'w' => 8,
            ' ' => 0,
            _ => return None,
        };
    }
    Some(mask)
}

fn parse_row(
    line: &str,
    columns: &[(usize, usize)],
    kind: SignatureKind,
) -> Option<(SignatureEntry, SignatureLayout)> {
    if columns.len() < 7 {
        return None;
    }
    comment_body(line)?;
    let mut layout = SignatureLayout::Basic;

    // Long semantic names can spill past the first column.
    let name_field = line.get(columns[0].0..)?.split_whitespace().next()?;
    let (stream, name) = match name_field.split_once(':') {
        Some((prefix, name)) => {
            layout = SignatureLayout::Stream;
            (prefix.strip_prefix('m')?.parse().ok()?, name)
        }
        None => (0, name_field),
    };
    let index_field = column(line, columns, 1).trim();
    let index_text = if index_field.is_empty() {
        // The name overflowed into the index column.
        line.get(columns[0].0..)?.split_whitespace().nth(1)?
    } else {
        index_field.rsplit(' ').next()?
    };
    let semantic_index = index_text.parse().ok()?;

    // Single-component system outputs such as `oDepth` print `N/A` for the mask and the
    // register file name instead of a register number.
    let mask = match column(line, columns, 2).trim() {
        "N/A" => 0x1,
        letters => component_mask(letters)?,
    };
    let register = match column(line, columns, 3).trim() {
        "N/A" => u32::MAX,
        text if text.starts_with('o') => u32::MAX,
        text => text.parse().ok()?,
    };
    let system_value_type = system_value_keyword(column(line, columns, 4).trim())?;
    let (component_type, min_precision) = format_keyword(column(line, columns, 5).trim())?;
    if min_precision != 0 {
        layout = SignatureLayout::MinPrecision;
    }

    let used = column(line, columns, 6).trim();
    let used_mask = match used {
        "YES" => mask,
        "NO" | "" => 0,
        letters => component_mask(letters)?,
    };
    // Output tables print the written components; the chunk stores the never-written ones.
    let read_write_mask = match kind {
        SignatureKind::Output => mask & !used_mask,
        _ => used_mask,
    };

    Some((
        SignatureEntry {
            semantic_name: name.to_owned(),
            semantic_index,
            system_value_type,
            component_type,
            register,
            mask,
            read_write_mask,
            stream,
            min_precision,
        },
        layout,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = "\
//
// Input signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// POSITION                 0   xyzw        0     NONE   float   xyzw
// TEXCOORD                 1   xy          1     NONE   float   xy
// SV_IsFrontFace           0   x           2    FFACE    uint   x
//
//
// Output signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// SV_Target                0   xyzw        0   TARGET   float   xyzw
// SV_Depth                 0    N/A   oDepth    DEPTH   float    YES
//
ps_5_0
";

    #[test]
    fn parses_input_and_output_blocks() {
        let sigs = parse_signature_blocks(LISTING);
        assert_eq!(sigs.len(), 2);

        let input = &sigs[0];
        assert_eq!(input.kind, SignatureKind::Input);
        assert_eq!(input.fourcc(), FourCC::ISGN);
        assert_eq!(input.entries.len(), 3);
        assert_eq!(input.entries[1].semantic_name, "TEXCOORD");
        assert_eq!(input.entries[1].semantic_index, 1);
        assert_eq!(input.entries[1].mask, 0x3);
        assert_eq!(input.entries[1].read_write_mask, 0x3);
        assert_eq!(input.entries[2].system_value_type, 9);
        assert_eq!(input.entries[2].component_type, 1);
        assert_eq!(input.entries[2].register, 2);
    }

    #[test]
    fn output_rows_store_unwritten_components() {
        let sigs = parse_signature_blocks(LISTING);
        let output = &sigs[1];
        assert_eq!(output.fourcc(), FourCC::OSGN);
        assert_eq!(output.entries[0].system_value_type, 64);
        assert_eq!(output.entries[0].read_write_mask, 0);

        let depth = &output.entries[1];
        assert_eq!(depth.semantic_name, "SV_Depth");
        assert_eq!(depth.mask, 0x1);
        assert_eq!(depth.register, u32::MAX);
        assert_eq!(depth.system_value_type, 65);
        assert_eq!(depth.read_write_mask, 0);
    }

    #[test]
    fn gapped_mask_and_missing_register() {
        let text = "\
// Output signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// TEXCOORD                 0   x z       N/A     NONE   float   x z
";
        let sigs = parse_signature_blocks(text);
        let e = &sigs[0].entries[0];
        assert_eq!(e.mask, 0x5);
        assert_eq!(e.register, u32::MAX);
        assert_eq!(e.read_write_mask, 0);
    }

    #[test]
    fn stream_prefix_selects_osg5() {
        let text = "\
// Output signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// m1:SV_Position           0   xyzw        0      POS   float   xyzw
";
        let sigs = parse_signature_blocks(text);
        assert_eq!(sigs[0].layout, SignatureLayout::Stream);
        assert_eq!(sigs[0].fourcc(), FourCC::OSG5);
        assert_eq!(sigs[0].entries[0].stream, 1);
        assert_eq!(sigs[0].entries[0].semantic_name, "SV_Position");
    }

    #[test]
    fn min_precision_selects_wide_layout() {
        let text = "\
// Input signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// COLOR                    0   xyzw        0     NONE  min16f   xyzw
";
        let sigs = parse_signature_blocks(text);
        assert_eq!(sigs[0].fourcc(), FourCC::ISG1);
        assert_eq!(sigs[0].entries[0].min_precision, 1);
        assert_eq!(sigs[0].to_chunk_bytes().len() % 4, 0);
    }

    #[test]
    fn absent_marker_yields_empty_signature() {
        let sigs = parse_signature_blocks("// no Input\n//\n// Output signature:\n");
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].kind, SignatureKind::Input);
        assert!(sigs[0].entries.is_empty());
    }

    #[test]
    fn keyword_tables() {
        assert_eq!(format_keyword("min16u"), Some((1, 5)));
        assert_eq!(format_keyword("double"), None);
        assert_eq!(system_value_keyword("STENCILREF"), Some(69));
    }
}

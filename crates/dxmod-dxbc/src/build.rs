//! Manufacturing containers from scratch.

use bitflags::bitflags;

use crate::checksum::stamp_checksum;
use crate::dxbc::DXBC_HEADER_LEN;
use crate::fourcc::FourCC;

bitflags! {
    /// Optional-feature bits recorded in the `SFI0` chunk.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderFeatureFlags: u64 {
        /// Double-precision arithmetic.
        const DOUBLES = 0x1;
        /// Minimum-precision types.
        const MINIMUM_PRECISION = 0x10;
        /// Double-precision division, reciprocal and fused multiply-add.
        const DOUBLE_EXTENSIONS_11_1 = 0x20;
        /// Direct3D 11.1 shader extensions.
        const SHADER_EXTENSIONS_11_1 = 0x40;
    }
}

/// Builds the 8-byte `SFI0` payload for `flags`.
pub fn sfi0_chunk(flags: ShaderFeatureFlags) -> [u8; 8] {
    flags.bits().to_le_bytes()
}

/// Lays out a complete container holding `chunks` in the given order.
///
/// The version word is `1`, the total size and offset table are filled in,
/// and the checksum is stamped.
pub fn build_container(chunks: &[(FourCC, &[u8])]) -> Vec<u8> {
    let table_end = DXBC_HEADER_LEN + chunks.len() * 4;
    let payload: usize = chunks.iter().map(|(_, data)| 8 + data.len()).sum();

    let mut out = Vec::with_capacity(table_end + payload);
    out.extend_from_slice(&FourCC::DXBC.0);
    out.extend_from_slice(&[0u8; 16]);
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&((table_end + payload) as u32).to_le_bytes());
    out.extend_from_slice(&(chunks.len() as u32).to_le_bytes());

    let mut offset = table_end;
    for (_, data) in chunks {
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += 8 + data.len();
    }
    for (fourcc, data) in chunks {
        out.extend_from_slice(&fourcc.0);
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
    }

    // The buffer always holds at least a full header.
    let _ = stamp_checksum(&mut out);
    tracing::debug!(chunks = chunks.len(), len = out.len(), "built DXBC container");
    out
}

use crate::{FourCC, SignatureEntry};

/// Builds a structurally valid container whose checksum is left zeroed.
///
/// Most tests only need offsets and sizes to be consistent; use
/// [`crate::build_container`] when the checksum matters.
pub fn build_container(chunks: &[(FourCC, &[u8])]) -> Vec<u8> {
    let mut out = crate::build_container(chunks);
    out[4..20].fill(0);
    out
}

/// Packs shader tokens into a little-endian code chunk payload.
pub fn code_chunk_bytes(tokens: &[u32]) -> Vec<u8> {
    tokens.iter().flat_map(|t| t.to_le_bytes()).collect()
}

/// A float-typed signature entry with matching mask and read/write mask.
pub fn float_entry(name: &str, index: u32, register: u32, mask: u8) -> SignatureEntry {
    SignatureEntry {
        semantic_name: name.to_owned(),
        semantic_index: index,
        component_type: 3,
        register,
        mask,
        read_write_mask: mask,
        ..SignatureEntry::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DxbcFile;

    #[test]
    fn zeroed_checksum_container_still_parses() {
        let code = code_chunk_bytes(&[0x0005_0050, 2]);
        let bytes = build_container(&[(FourCC::SHEX, code.as_slice())]);
        let file = DxbcFile::parse(&bytes).unwrap();
        assert_eq!(file.header().checksum, [0; 16]);
        assert_eq!(file.find_first_shader_chunk().unwrap().data, &code[..]);
    }
}

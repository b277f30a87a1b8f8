use dxmod_dxbc::test_utils::{build_container, float_entry};
use dxmod_dxbc::{
    splice_shader_chunk, write_signature_chunk, DxbcError, DxbcFile, FourCC, SignatureLayout,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn signature_lookup_accepts_alternate_spellings() {
    let entries = [float_entry("TEXCOORD", 0, 1, 0x3)];
    let osg1 = write_signature_chunk(&entries, SignatureLayout::MinPrecision);
    let bytes = build_container(&[(FourCC::OSG1, osg1.as_slice()), (FourCC::SHEX, &[0; 8])]);
    let file = DxbcFile::parse(&bytes).unwrap();

    let sig = file.get_signature(FourCC::OSGN).unwrap().unwrap();
    assert_eq!(sig.layout, SignatureLayout::MinPrecision);
    assert_eq!(sig.entries, entries);
    assert!(file.get_signature(FourCC::ISGN).is_none());
}

#[test]
fn corrupt_signature_reports_chunk_tag() {
    let bytes = build_container(&[(FourCC::ISGN, &[1, 0, 0, 0, 8, 0, 0, 0])]);
    let file = DxbcFile::parse(&bytes).unwrap();
    let err = file.get_signature(FourCC::ISGN).unwrap().unwrap_err();
    assert!(matches!(err, DxbcError::InvalidChunk { .. }));
    assert!(err.context().starts_with("ISGN"), "{err}");
}

fn chunk_sizes() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..64, 1..6)
}

proptest! {
    #[test]
    fn splice_shifts_exactly_the_following_chunks(
        before in chunk_sizes(),
        after in chunk_sizes(),
        old_code in 0usize..32,
        new_code in 0usize..32,
    ) {
        let before: Vec<Vec<u8>> = before.iter().map(|&n| vec![0x11; n * 4]).collect();
        let after: Vec<Vec<u8>> = after.iter().map(|&n| vec![0x22; n * 4]).collect();
        let old = vec![0x33u8; old_code * 4];
        let new = vec![0x44u8; new_code * 4];

        let mut chunks: Vec<(FourCC, &[u8])> = before.iter().map(|d| (FourCC::ISGN, d.as_slice())).collect();
        chunks.push((FourCC::SHDR, old.as_slice()));
        chunks.extend(after.iter().map(|d| (FourCC::OSGN, d.as_slice())));
        let mut bytes = build_container(&chunks);

        let old_offsets: Vec<usize> = DxbcFile::parse(&bytes).unwrap().chunks().map(|c| c.offset).collect();
        splice_shader_chunk(&mut bytes, &new).unwrap();
        let file = DxbcFile::parse(&bytes).unwrap();
        let new_offsets: Vec<usize> = file.chunks().map(|c| c.offset).collect();

        let delta = new.len() as i64 - old.len() as i64;
        let code_index = before.len();
        for (i, (o, n)) in old_offsets.iter().zip(&new_offsets).enumerate() {
            let expected = if i > code_index { *o as i64 + delta } else { *o as i64 };
            prop_assert_eq!(*n as i64, expected);
        }

        let chunk_total: usize = file.chunks().map(|c| 8 + c.data.len()).sum();
        prop_assert_eq!(bytes.len(), 32 + 4 * chunks.len() + chunk_total);
        prop_assert_eq!(file.header().total_size as usize, bytes.len());
        prop_assert!(file.checksum_matches());
        prop_assert_eq!(file.find_first_shader_chunk().unwrap().data, &new[..]);
    }
}

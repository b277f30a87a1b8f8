use dxmod::dxbc::{DxbcFile, FourCC};
use dxmod::sm4::{assemble_program, render_program, MismatchLog, Sm4Program};
use dxmod::{assemble, assemble_new_container, disassemble};
use pretty_assertions::assert_eq;

const LISTING: &str = "\
//
// Input signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// POSITION                 0   xyzw        0     NONE   float   xyzw
// TEXCOORD                 0   xy          1     NONE   float   xy
//
//
// Output signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// SV_Position              0   xyzw        0      POS   float   xyzw
// TEXCOORD                 0   xy          1     NONE   float   xy
//
vs_4_0
dcl_constantbuffer cb0[4], immediateIndexed
dcl_input v0.xyzw
dcl_input v1.xy
dcl_output_siv o0.xyzw, position
dcl_output o1.xy
dcl_temps 1
mul r0.xyzw, v0.yyyy, cb0[1].xyzw
mad r0.xyzw, v0.xxxx, cb0[0].xyzw, r0.xyzw
mad r0.xyzw, v0.zzzz, cb0[2].xyzw, r0.xyzw
mad o0.xyzw, v0.wwww, cb0[3].xyzw, r0.xyzw
mul o1.xy, v1.xyxx, l(0.333333, 0.333333, 0.000000, 0.000000)
ret
";

#[test]
fn build_then_reconcile_then_reassemble() {
    let built = assemble_new_container(LISTING, None).unwrap();
    let file = DxbcFile::parse(&built).unwrap();
    assert!(file.checksum_matches());
    assert!(file.get_chunk(FourCC::SHDR).is_some());
    assert_eq!(file.get_signature(FourCC::OSGN).unwrap().unwrap().entries.len(), 2);

    // The compiler's real bits for 1/3 differ from what `0.333333` parses to.
    let mut words = assemble_program(LISTING, None).unwrap();
    let third = (1.0f32 / 3.0).to_bits();
    let payload = words.len() - 5;
    words[payload] = third;
    words[payload + 1] = third;
    let binary = assemble(&render(&words), &built, None).unwrap();

    let mut log = MismatchLog::new();
    let text = disassemble(&binary, LISTING, Some(&mut log)).unwrap();
    assert!(log.is_empty(), "{text}");
    assert!(!text.contains("0.333333,"));

    let rebuilt = assemble(&text, &binary, None).unwrap();
    assert_eq!(rebuilt, binary);
}

fn render(words: &[u32]) -> String {
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    render_program(&Sm4Program::parse_program_tokens(&bytes).unwrap()).unwrap()
}

use dxmod_dxbc::test_utils::{build_container, code_chunk_bytes};
use dxmod_dxbc::FourCC;
use dxmod_sm4::{assemble_program, disassemble, MismatchLog, MismatchSink};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn container(words: &[u32]) -> Vec<u8> {
    let code = code_chunk_bytes(words);
    build_container(&[(FourCC::SHEX, code.as_slice())])
}

/// `ps_5_0; mov r0.x, l(bits); ret`
fn scalar_move(bits: u32) -> Vec<u32> {
    vec![0x50, 8, 0x0500_0036, 0x0010_0012, 0, 0x0000_4001, bits, 0x0100_003e]
}

#[derive(Default)]
struct Counting {
    calls: usize,
}

impl MismatchSink for Counting {
    fn record(&mut self, _line: &str, _binary: &[u32], _reassembled: &[u32]) {
        self.calls += 1;
    }
}

#[test]
fn non_finite_spellings_are_resolved_against_the_binary() {
    let raw = "ps_5_0\nmov r0.x, l(1.#INF00)\nret\n";
    let out = disassemble(&container(&scalar_move(0x7f80_0000)), raw, None).unwrap();
    assert_eq!(out, raw);

    let raw = "ps_5_0\nmov r0.x, l(1.#QNAN0)\nret\n";
    let out = disassemble(&container(&scalar_move(0x7fc0_0001)), raw, None).unwrap();
    assert_eq!(out, "ps_5_0\nmov r0.x, l(0x7fc00001)\nret\n");
}

#[test]
fn custom_sink_sees_each_structural_mismatch() {
    let words = assemble_program("ps_5_0\nmov r0.y, r1.x\nadd r0.x, r1.x, r2.x\nret\n", None).unwrap();
    let raw = "ps_5_0\nmov r0.x, r1.x\nadd r0.x, r1.x, r2.y\nret\n";

    let mut sink = Counting::default();
    let out = disassemble(&container(&words), raw, Some(&mut sink)).unwrap();
    assert_eq!(sink.calls, 2);
    assert_eq!(out.matches("// mismatch").count(), 2);

    let mut log = MismatchLog::new();
    disassemble(&container(&words), &out, Some(&mut log)).unwrap();
    let lines: Vec<&str> = log.iter().map(|(line, _)| line).collect();
    assert_eq!(lines, vec!["add r0.x, r1.x, r2.y", "mov r0.x, r1.x"]);
}

#[test]
fn listing_longer_than_the_binary_is_passed_through() {
    let raw = "ps_5_0\nret\nret\n";
    let out = disassemble(&container(&[0x50, 3, 0x0100_003e]), raw, None).unwrap();
    assert_eq!(out, raw);
}

proptest! {
    #[test]
    fn reconciled_literals_reassemble_exactly(
        value in any::<f32>().prop_filter("finite", |v| v.is_finite()),
    ) {
        let words = scalar_move(value.to_bits());
        let raw = format!("ps_5_0\nmov r0.x, l({value:.6})\nret\n");
        let bytes = container(&words);

        let mut log = MismatchLog::new();
        let out = disassemble(&bytes, &raw, Some(&mut log)).unwrap();
        prop_assert!(log.is_empty(), "{}", out);
        prop_assert_eq!(assemble_program(&out, None).unwrap(), words);

        let again = disassemble(&bytes, &out, None).unwrap();
        prop_assert_eq!(again, out);
    }

    #[test]
    fn reconciled_doubles_reassemble_exactly(value in any::<f64>()) {
        let raw = "ps_5_0\ndmov r0.xy, d(1.000000l)\nret\n";
        let mut words = assemble_program(raw, None).unwrap();
        let payload = words.len() - 3;
        let bits = value.to_bits();
        words[payload] = bits as u32;
        words[payload + 1] = (bits >> 32) as u32;
        let bytes = container(&words);

        let out = disassemble(&bytes, raw, None).unwrap();
        prop_assert!(!out.contains("mismatch"), "{}", out);
        prop_assert_eq!(assemble_program(&out, None).unwrap(), words);
        prop_assert_eq!(disassemble(&bytes, &out, None).unwrap(), out);
    }
}

//! Reconciles a native disassembler listing with the binary it came from.
//!
//! Each statement of the listing is reassembled and compared with the
//! matching binary instruction. Literals whose decimal text lost precision are
//! rewritten so that the listing reassembles to the exact original words; any
//! other difference is left in place and flagged with a trailing
//! `// mismatch` comment.

use core::ops::Range;
use std::collections::BTreeMap;

use crate::error::DisasmError;
use crate::instruction::encode_statement;
use crate::literal::{f64_from_words, format_f32, format_f64};
use crate::operand::{Encoded, LiteralWidth};
use crate::program::{ShaderVersion, Sm4Program};
use crate::tokenize::{logical_lines, strip_comment};
use crate::walk::InstructionSpan;

const MISMATCH_MARKER: &str = " // mismatch";

/// Observer for statements whose reassembly differs from the binary outside
/// any literal.
pub trait MismatchSink {
    fn record(&mut self, line: &str, binary: &[u32], reassembled: &[u32]);
}

/// Both encodings of a mismatching statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub binary: Vec<u32>,
    pub reassembled: Vec<u32>,
}

/// Collects mismatches keyed by statement text.
#[derive(Debug, Default, Clone)]
pub struct MismatchLog {
    entries: BTreeMap<String, Mismatch>,
}

impl MismatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, line: &str) -> Option<&Mismatch> {
        self.entries.get(line)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mismatch)> {
        self.entries.iter().map(|(line, m)| (line.as_str(), m))
    }
}

impl MismatchSink for MismatchLog {
    fn record(&mut self, line: &str, binary: &[u32], reassembled: &[u32]) {
        self.entries.insert(
            line.to_owned(),
            Mismatch {
                binary: binary.to_vec(),
                reassembled: reassembled.to_vec(),
            },
        );
    }
}

/// Reconciles `raw_text` against the code chunk of `container`.
///
/// Comments and blank lines pass through, and the version line consumes no
/// instruction. Every other statement consumes one binary instruction. A
/// statement that does not parse is passed through untouched. Running the
/// result through this function again leaves it unchanged.
pub fn disassemble(
    container: &[u8],
    raw_text: &str,
    mut sink: Option<&mut dyn MismatchSink>,
) -> Result<String, DisasmError> {
    let program = Sm4Program::parse_from_dxbc_bytes(container)?;
    let spans = program.instructions().collect::<Result<Vec<_>, _>>()?;
    let mut pending = spans.iter();

    let mut out = String::with_capacity(raw_text.len());
    let mut seen_version = false;

    for line in logical_lines(raw_text) {
        let text = strip_diagnostic(&line.text);
        let statement = strip_comment(text).trim();

        let reconciled = if statement.is_empty() {
            text.to_owned()
        } else if !seen_version && ShaderVersion::parse(statement).is_some() {
            seen_version = true;
            text.to_owned()
        } else {
            match pending.next() {
                Some(span) => reconcile_statement(text, span, sink.as_deref_mut()),
                None => {
                    tracing::warn!(line = line.line, "statement has no binary instruction left");
                    text.to_owned()
                }
            }
        };
        out.push_str(&reconciled);
        out.push('\n');
    }

    let leftover = pending.len();
    if leftover != 0 {
        tracing::warn!(leftover, "binary instructions not covered by the listing");
    }
    Ok(out)
}

/// Removes a diagnostic appended by an earlier run.
fn strip_diagnostic(text: &str) -> &str {
    match text.find(MISMATCH_MARKER) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

fn reconcile_statement(
    text: &str,
    span: &InstructionSpan<'_>,
    sink: Option<&mut (dyn MismatchSink + '_)>,
) -> String {
    let binary = span.words;
    let encoded = match encode_statement(text) {
        Ok(encoded) => encoded,
        Err(err) => {
            tracing::debug!(at = span.at, %err, "passing statement through");
            return text.to_owned();
        }
    };
    if encoded.words == binary {
        return text.to_owned();
    }

    if let Some(patched) = patch_literals(text, &encoded, binary) {
        match encode_statement(&patched) {
            Ok(again) if again.words == binary => {
                tracing::debug!(at = span.at, "patched literal precision");
                return patched;
            }
            _ => {}
        }
    }

    tracing::warn!(at = span.at, statement = text.trim(), "reassembly differs from binary");
    if let Some(sink) = sink {
        sink.record(text.trim(), binary, &encoded.words);
    }
    format!("{text}{}", describe_mismatch(binary, &encoded.words))
}

fn describe_mismatch(binary: &[u32], reassembled: &[u32]) -> String {
    if binary.len() != reassembled.len() {
        return format!(
            "{MISMATCH_MARKER}: {} words in binary, {} reassembled",
            binary.len(),
            reassembled.len()
        );
    }
    let (at, (b, r)) = binary
        .iter()
        .zip(reassembled)
        .enumerate()
        .find(|(_, (b, r))| b != r)
        .unwrap_or((0, (&0, &0)));
    format!("{MISMATCH_MARKER} at word {at}: {b:#010x} in binary, {r:#010x} reassembled")
}

/// Rewrites the literals of `text` that disagree with `binary`.
///
/// Returns `None` when some differing word is not a literal payload word.
fn patch_literals(text: &str, encoded: &Encoded, binary: &[u32]) -> Option<String> {
    if encoded.words.len() != binary.len() {
        return None;
    }

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    for (idx, _) in encoded
        .words
        .iter()
        .zip(binary)
        .enumerate()
        .filter(|(_, (a, b))| a != b)
    {
        let site = encoded.sites.iter().find(|s| s.words().contains(&idx))?;
        let edit = match site.width {
            LiteralWidth::F32 => (site.span.clone(), format_f32(binary[site.word])),
            LiteralWidth::F64 => {
                let value = f64_from_words(binary[site.word], binary[site.word + 1]);
                match format_f64(value) {
                    Some(text) => (site.span.clone(), text),
                    None => (site.group.clone(), hex_double_group(encoded, &site.group, binary)),
                }
            }
        };
        if !edits.contains(&edit) {
            edits.push(edit);
        }
    }

    // A whole-group rewrite supersedes edits to its components.
    let groups: Vec<Range<usize>> = edits
        .iter()
        .filter(|(range, _)| text[range.clone()].starts_with("d("))
        .map(|(range, _)| range.clone())
        .collect();
    edits.retain(|(range, _)| {
        groups.contains(range) || !groups.iter().any(|g| g.start <= range.start && range.end <= g.end)
    });

    edits.sort_by_key(|(range, _)| core::cmp::Reverse(range.start));
    let mut patched = text.to_owned();
    for (range, replacement) in edits {
        patched.replace_range(range, &replacement);
    }
    Some(patched)
}

/// `d(0x........, ...)` holding every payload word of the group.
fn hex_double_group(encoded: &Encoded, group: &Range<usize>, binary: &[u32]) -> String {
    let words: Vec<String> = encoded
        .sites
        .iter()
        .filter(|s| s.width == LiteralWidth::F64 && s.group == *group)
        .flat_map(|s| s.words())
        .map(|w| format!("0x{:08x}", binary[w]))
        .collect();
    format!("d({})", words.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble_program;
    use dxmod_dxbc::test_utils::{build_container, code_chunk_bytes};
    use dxmod_dxbc::FourCC;
    use pretty_assertions::assert_eq;

    fn container(words: &[u32]) -> Vec<u8> {
        let code = code_chunk_bytes(words);
        build_container(&[(FourCC::SHEX, code.as_slice())])
    }

    fn body(text: &str) -> Vec<u32> {
        assemble_program(text, None).unwrap()[2..].to_vec()
    }

    #[test]
    fn exact_listing_passes_through() {
        let text = "// header\nps_5_0\ndcl_temps 1\nmov r0.x, l(1.000000)\nret\n";
        let words = assemble_program(text, None).unwrap();
        let out = disassemble(&container(&words), text, None).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn lossy_float_literal_is_rewritten() {
        // 0x3dcccccc is one ulp below the nearest float to 0.1.
        let words = vec![0x50, 8, 0x0500_0036, 0x0010_0012, 0, 0x0000_4001, 0x3dcc_cccc, 0x0100_003e];
        let raw = "ps_5_0\nmov r0.x, l(0.100000)\nret\n";

        let mut log = MismatchLog::new();
        let out = disassemble(&container(&words), raw, Some(&mut log)).unwrap();
        assert!(log.is_empty());
        assert!(!out.contains("0.100000"));
        assert!(!out.contains(MISMATCH_MARKER));
        assert_eq!(body(&out), &words[2..]);

        let again = disassemble(&container(&words), &out, None).unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn non_finite_double_rewrites_the_whole_group_in_hex() {
        let raw = "ps_5_0\ndmov r0.xyzw, d(1.000000l, 2.000000l)\nret\n";
        let mut words = assemble_program(raw, None).unwrap();
        let payload = words.len() - 5;
        // First double becomes a quiet NaN.
        words[payload] = 0;
        words[payload + 1] = 0x7ff8_0000;

        let out = disassemble(&container(&words), raw, None).unwrap();
        assert!(
            out.contains("d(0x00000000, 0x7ff80000, 0x00000000, 0x40000000)"),
            "{out}"
        );
        assert_eq!(body(&out), &words[2..]);
    }

    #[test]
    fn structural_difference_is_flagged_and_recorded() {
        let words = assemble_program("ps_5_0\nmov r0.y, r1.x\nret\n", None).unwrap();
        let raw = "ps_5_0\nmov r0.x, r1.x\nret\n";

        let mut log = MismatchLog::new();
        let out = disassemble(&container(&words), raw, Some(&mut log)).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("mov r0.x, r1.x // mismatch at word 1"), "{}", lines[1]);
        assert_eq!(lines[2], "ret");

        assert_eq!(log.len(), 1);
        let entry = log.get("mov r0.x, r1.x").unwrap();
        assert_eq!(entry.binary, words[2..7].to_vec());
        assert_ne!(entry.reassembled, entry.binary);

        // A second run strips the old diagnostic before adding a new one.
        let again = disassemble(&container(&words), &out, None).unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn unparseable_statement_consumes_one_instruction() {
        let words = assemble_program("ps_5_0\ndcl_temps 2\nmov r0.x, l(0.100000)\nret\n", None).unwrap();
        let raw = "ps_5_0\nfuture_dcl 2\nmov r0.x, l(0.100000)\nret\n";
        let out = disassemble(&container(&words), raw, None).unwrap();
        assert_eq!(out, raw);
    }

    #[test]
    fn multi_line_constant_buffer_rows_are_patched() {
        let raw = "\
vs_5_0
dcl_immediateConstantBuffer { { 0.100000, 0, 0, 0 },
                              { 0, 1.000000, 0, 0 } }
ret
";
        let mut words = assemble_program(raw, None).unwrap();
        assert_eq!(words[4], 0x3dcc_cccd);
        words[4] = 0x3dcc_cccc;

        let out = disassemble(&container(&words), raw, None).unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.lines().nth(2).unwrap().ends_with("{ 0, 1.000000, 0, 0 } }"));
        assert_eq!(body(&out), &words[2..]);
    }

    #[test]
    fn structural_errors_are_fatal() {
        let bytes = container(&[0x50, 4, 0x0500_0036, 0]);
        assert!(matches!(
            disassemble(&bytes, "ps_5_0\nmov r0.x, r1.x\n", None),
            Err(DisasmError::InstructionOutOfBounds { .. })
        ));
    }
}

//! Whole-program assembly and the two ways of getting the result into a
//! container: splicing it into an existing one, or building a new one.

use dxmod_dxbc::{
    build_container, parse_signature_blocks, sfi0_chunk, splice_shader_chunk, FourCC,
    SignatureKind, SignatureLayout, SpliceReport, TextSignature,
};

use crate::decl::GlobalFlags;
use crate::error::{AsmError, LineError};
use crate::instruction::encode_statement;
use crate::opcode::OPCODE_DCL_GLOBAL_FLAGS;
use crate::program::{decode_version_token, ShaderVersion};
use crate::token::opcode_control;
use crate::tokenize::{logical_lines, strip_comment};
use crate::walk::Instructions;

/// Assembles a listing into a token stream: version token, length token,
/// then one encoding per statement.
///
/// With `errors` set, statements that fail to parse are recorded there and
/// skipped; otherwise the first failure is returned. A missing or malformed
/// version line is always fatal.
pub fn assemble_program(
    text: &str,
    mut errors: Option<&mut Vec<LineError>>,
) -> Result<Vec<u32>, AsmError> {
    let mut words: Vec<u32> = Vec::new();

    for line in logical_lines(text) {
        let statement = strip_comment(&line.text).trim();
        if statement.is_empty() {
            continue;
        }

        if words.is_empty() {
            let version = ShaderVersion::parse(statement).ok_or(AsmError::MissingVersion)?;
            words.push(version.token());
            words.push(0);
            continue;
        }

        match encode_statement(&line.text) {
            Ok(encoded) => words.extend_from_slice(&encoded.words),
            Err(error) => {
                let error = LineError {
                    line: line.line,
                    text: line.text.clone(),
                    error,
                };
                match errors.as_deref_mut() {
                    Some(collected) => {
                        tracing::debug!(line = error.line, %error, "skipping statement");
                        collected.push(error);
                    }
                    None => return Err(error.into()),
                }
            }
        }
    }

    if words.is_empty() {
        return Err(AsmError::MissingVersion);
    }
    // The chunk size field counts bytes.
    let len = u32::try_from(words.len())
        .ok()
        .filter(|len| len.checked_mul(4).is_some())
        .ok_or(AsmError::ProgramTooLarge(words.len()))?;
    words[1] = len;
    Ok(words)
}

fn to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Assembles `text` and splices it over the code chunk of `container`.
pub fn assemble_into(
    text: &str,
    container: &mut Vec<u8>,
    errors: Option<&mut Vec<LineError>>,
) -> Result<SpliceReport, AsmError> {
    let words = assemble_program(text, errors)?;
    let report = splice_shader_chunk(container, &to_bytes(&words))?;
    tracing::debug!(
        old_size = report.old_size,
        new_size = report.new_size,
        shifted = report.shifted_chunks.len(),
        "spliced code chunk"
    );
    Ok(report)
}

/// Assembles `text` into a copy of `original` whose code chunk is replaced.
///
/// Every other chunk is carried over byte for byte.
pub fn assemble(
    text: &str,
    original: &[u8],
    errors: Option<&mut Vec<LineError>>,
) -> Result<Vec<u8>, AsmError> {
    let mut container = original.to_vec();
    assemble_into(text, &mut container, errors)?;
    Ok(container)
}

/// Global flags declared anywhere in an assembled program.
fn declared_global_flags(words: &[u32]) -> GlobalFlags {
    Instructions::new(words, 2)
        .map_while(Result::ok)
        .filter(|span| span.opcode() == OPCODE_DCL_GLOBAL_FLAGS)
        .fold(GlobalFlags::empty(), |acc, span| {
            acc | GlobalFlags::from_bits_truncate(opcode_control(span.words[0]))
        })
}

/// Builds a fresh container from a listing alone.
///
/// Chunks are written as: signatures (input, output, then patch constant),
/// the code chunk, and `SFI0` when the global flags request optional
/// features. Input and output signatures are always present; a listing with
/// no block for one gets an empty chunk.
pub fn assemble_new_container(
    text: &str,
    errors: Option<&mut Vec<LineError>>,
) -> Result<Vec<u8>, AsmError> {
    let words = assemble_program(text, errors)?;
    let (_, model) = decode_version_token(words[0]);

    let mut signatures = parse_signature_blocks(text);
    for kind in [SignatureKind::Input, SignatureKind::Output] {
        if !signatures.iter().any(|sig| sig.kind == kind) {
            signatures.push(TextSignature {
                kind,
                layout: SignatureLayout::Basic,
                entries: Vec::new(),
            });
        }
    }
    signatures.sort_by_key(|sig| match sig.kind {
        SignatureKind::Input => 0,
        SignatureKind::Output => 1,
        SignatureKind::PatchConstant => 2,
    });

    let mut chunks: Vec<(FourCC, Vec<u8>)> = signatures
        .iter()
        .map(|sig| (sig.fourcc(), sig.to_chunk_bytes()))
        .collect();
    chunks.push((model.code_chunk(), to_bytes(&words)));

    let features = declared_global_flags(&words).feature_flags();
    if !features.is_empty() {
        chunks.push((FourCC::SFI0, sfi0_chunk(features).to_vec()));
    }

    let refs: Vec<(FourCC, &[u8])> = chunks
        .iter()
        .map(|(fourcc, data)| (*fourcc, data.as_slice()))
        .collect();
    Ok(build_container(&refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Sm4Program;
    use dxmod_dxbc::test_utils::code_chunk_bytes;
    use dxmod_dxbc::DxbcFile;
    use pretty_assertions::assert_eq;

    const MOV_LISTING: &str = "\
// Generated listing
ps_4_0
dcl_temps 1
mov r0.x, l(1.000000)   // scalar literal
ret
";

    #[test]
    fn assembles_version_length_and_body() {
        let words = assemble_program(MOV_LISTING, None).unwrap();
        assert_eq!(
            words,
            vec![
                0x0000_0040,
                10,
                0x0200_0068,
                1,
                0x0500_0036,
                0x0010_0012,
                0,
                0x0000_4001,
                0x3f80_0000,
                0x0100_003e,
            ]
        );
    }

    #[test]
    fn joins_multi_line_immediate_constant_buffers() {
        let text = "\
vs_5_0
dcl_immediateConstantBuffer { { 1.000000, 0, 0, 0 },
                              { 0, 1.000000, 0, 0 } }
ret
";
        let words = assemble_program(text, None).unwrap();
        assert_eq!(
            &words[2..],
            &[0x1835, 10, 0x3f80_0000, 0, 0, 0, 0, 0x3f80_0000, 0, 0, 0x0100_003e]
        );
        assert_eq!(words[1] as usize, words.len());
    }

    #[test]
    fn version_line_is_required() {
        assert!(matches!(
            assemble_program("// only a comment\n\n", None),
            Err(AsmError::MissingVersion)
        ));
        assert!(matches!(
            assemble_program("dcl_temps 1\nps_5_0\n", None),
            Err(AsmError::MissingVersion)
        ));
    }

    #[test]
    fn collects_or_aborts_on_bad_statements() {
        let text = "ps_5_0\nbogus r0\nret\n";

        let mut errors = Vec::new();
        let words = assemble_program(text, Some(&mut errors)).unwrap();
        assert_eq!(words, vec![0x50, 3, 0x0100_003e]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert_eq!(errors[0].text, "bogus r0");

        match assemble_program(text, None) {
            Err(AsmError::Line(err)) => assert_eq!(err.line, 2),
            other => panic!("expected a line error, got {other:?}"),
        }
    }

    #[test]
    fn splices_into_the_original_container() {
        let code = code_chunk_bytes(&[0x40, 3, 0x0100_003e]);
        let trailer = [0xaa_u8; 12];
        let original = dxmod_dxbc::build_container(&[
            (FourCC::SHDR, code.as_slice()),
            (FourCC(*b"STAT"), &trailer[..]),
        ]);

        let out = assemble(MOV_LISTING, &original, None).unwrap();
        let file = DxbcFile::parse(&out).unwrap();
        assert!(file.checksum_matches());
        assert_eq!(file.get_chunk(FourCC(*b"STAT")).unwrap().data, &trailer[..]);

        let program = Sm4Program::parse_from_dxbc(&file).unwrap();
        assert_eq!(program.tokens, assemble_program(MOV_LISTING, None).unwrap());
    }

    #[test]
    fn splice_needs_a_code_chunk() {
        let original = dxmod_dxbc::build_container(&[(FourCC::ISGN, &[0u8; 8][..])]);
        assert!(matches!(
            assemble(MOV_LISTING, &original, None),
            Err(AsmError::Dxbc(_))
        ));
    }

    #[test]
    fn builds_a_new_container_with_signatures_and_features() {
        let text = "\
//
// Input signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// TEXCOORD                 0   xy          0     NONE   float   xy
//
//
// Output signature:
//
// Name                 Index   Mask Register SysValue  Format   Used
// -------------------- ----- ------ -------- -------- ------- ------
// SV_Target                0   xyzw        0   TARGET   float   xyzw
//
ps_5_0
dcl_globalFlags refactoringAllowed | enableDoublePrecisionFloatOps
ret
";
        let out = assemble_new_container(text, None).unwrap();
        let file = DxbcFile::parse(&out).unwrap();
        assert!(file.checksum_matches());

        let tags: Vec<FourCC> = file.chunks().map(|c| c.fourcc).collect();
        assert_eq!(tags, vec![FourCC::ISGN, FourCC::OSGN, FourCC::SHEX, FourCC::SFI0]);
        assert_eq!(file.get_chunk(FourCC::SFI0).unwrap().data, &[1, 0, 0, 0, 0, 0, 0, 0]);

        let program = Sm4Program::parse_from_dxbc(&file).unwrap();
        assert_eq!(program.body(), &[0x0100_186a, 0x0100_003e]);

        let input = file.get_signature(FourCC::ISGN).unwrap().unwrap();
        assert_eq!(input.entries.len(), 1);
        assert_eq!(input.entries[0].semantic_name, "TEXCOORD");
    }

    #[test]
    fn new_container_without_signature_blocks_gets_empty_ones() {
        let out = assemble_new_container("cs_4_0\nret\n", None).unwrap();
        let file = DxbcFile::parse(&out).unwrap();
        let tags: Vec<FourCC> = file.chunks().map(|c| c.fourcc).collect();
        assert_eq!(tags, vec![FourCC::ISGN, FourCC::OSGN, FourCC::SHDR]);
        assert!(file.get_signature(FourCC::OSGN).unwrap().unwrap().entries.is_empty());
    }
}

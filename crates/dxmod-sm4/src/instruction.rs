//! Instruction codec: one statement to its complete word encoding.

use crate::decl;
use crate::error::{ParseError, ParseErrorKind};
use crate::opcode::*;
use crate::operand::{encode_operand, Encoded};
use crate::tables::{self, keyword_value, Coverage, InstrClass, InstrDef, RESOURCE_DIMENSIONS, RETURN_TYPES};
use crate::token::{
    opcode_word, resource_dim_word, resource_return_type_word, sample_controls_word, EXTENDED_BIT,
    MAX_INSTRUCTION_LEN,
};
use crate::tokenize::{tokenize, Token};

/// Suffix flags folded into the control field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Suffixes {
    pub sat: bool,
    pub test_nonzero: bool,
    pub test_zero: bool,
    pub uint: bool,
    pub rcpfloat: bool,
    pub aoffimmi: bool,
    pub indexable: bool,
}

const SUFFIXES: &[&str] = &["_sat", "_nz", "_z", "_uint", "_rcpfloat", "_aoffimmi", "_indexable"];

impl Suffixes {
    /// Records `suffix`; false when it was already present.
    fn set(&mut self, suffix: &str) -> bool {
        let flag = match suffix {
            "_sat" => &mut self.sat,
            "_nz" => &mut self.test_nonzero,
            "_z" => &mut self.test_zero,
            "_uint" => &mut self.uint,
            "_rcpfloat" => &mut self.rcpfloat,
            "_aoffimmi" => &mut self.aoffimmi,
            "_indexable" => &mut self.indexable,
            _ => return false,
        };
        !core::mem::replace(flag, true)
    }

    /// Whether the `_sat`, `_z` and `_nz` suffixes are legal on `def`.
    fn allowed_on(&self, def: &InstrDef) -> bool {
        if self.sat && !def.sat {
            return false;
        }
        match (self.test_zero, self.test_nonzero) {
            (false, false) => true,
            (true, true) => false,
            _ => tables::CONDITIONAL_OPCODES.contains(&def.opcode),
        }
    }
}

/// A mnemonic token taken apart: base name, parenthesized groups and trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicParts<'a> {
    pub base: &'a str,
    pub groups: Vec<&'a str>,
    pub trailer: &'a str,
    /// Mask from an attached `[precise(..)]`.
    pub precise: Option<u32>,
}

/// Splits `resinfo_indexable(texture2d)(float,float,float,float)_uint`.
pub fn split_mnemonic(token: &str) -> Result<MnemonicParts<'_>, ParseErrorKind> {
    let (token, precise) = match token.find("[precise") {
        Some(pos) => (&token[..pos], Some(parse_precise(&token[pos..])?)),
        None => (token, None),
    };
    let Some(open) = token.find('(') else {
        return Ok(MnemonicParts {
            base: token,
            groups: Vec::new(),
            trailer: "",
            precise,
        });
    };
    let base = &token[..open];
    let mut groups = Vec::new();
    let mut rest = &token[open..];
    while let Some(after) = rest.strip_prefix('(') {
        let close = after.find(')').ok_or(ParseErrorKind::Unbalanced)?;
        groups.push(&after[..close]);
        rest = &after[close + 1..];
    }
    Ok(MnemonicParts {
        base,
        groups,
        trailer: rest,
        precise,
    })
}

/// Parses `[precise]` or `[precise(xy)]` into a component mask.
pub fn parse_precise(text: &str) -> Result<u32, ParseErrorKind> {
    let inner = text
        .strip_prefix("[precise")
        .and_then(|t| t.strip_suffix(']'))
        .ok_or(ParseErrorKind::UnknownKeyword)?;
    if inner.is_empty() {
        return Ok(0xf);
    }
    let letters = inner
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or(ParseErrorKind::UnknownKeyword)?;
    letters.chars().try_fold(0, |mask, c| {
        let bit = match c {
            'x' => 1,
            'y' => 2,
            'z' => 4,
            'w' => 8,
            _ => return Err(ParseErrorKind::InvalidSelection),
        };
        Ok(mask | bit)
    })
}

/// Strips suffixes until the remaining name is in a table.
pub fn resolve_mnemonic(name: &str) -> Option<(InstrDef, InstrClass, Suffixes)> {
    let mut suffixes = Suffixes::default();
    let mut name = name;
    loop {
        if let Some((def, class)) = tables::lookup_instruction(name) {
            return Some((def, class, suffixes));
        }
        let suffix = SUFFIXES.iter().find(|s| name.ends_with(*s))?;
        if !suffixes.set(suffix) {
            return None;
        }
        name = &name[..name.len() - suffix.len()];
    }
}

/// Encodes one statement (no version line, no comment-only lines).
pub fn encode_statement(line: &str) -> Result<Encoded, ParseError> {
    let mut tokens = tokenize(line)?;
    let mut precise = None;
    for pos in [0, 1] {
        if tokens.get(pos).is_some_and(|t| t.text.starts_with("[precise")) {
            let token = tokens.remove(pos);
            precise = Some(parse_precise(token.text).map_err(|k| ParseError::new(token.text, k))?);
            break;
        }
    }
    let Some((mnemonic, operands)) = tokens.split_first() else {
        return Err(ParseError::new(line.trim(), ParseErrorKind::Malformed("empty statement")));
    };

    if let Some(result) = decl::encode_special(line, mnemonic, operands) {
        return result;
    }
    encode_table_instruction(line, mnemonic, operands, precise)
}

fn encode_table_instruction(
    line: &str,
    mnemonic: &Token<'_>,
    operands: &[Token<'_>],
    precise: Option<u32>,
) -> Result<Encoded, ParseError> {
    let err = |kind| ParseError::new(mnemonic.text, kind);
    let parts = split_mnemonic(mnemonic.text).map_err(err)?;
    let full_name = format!("{}{}", parts.base, parts.trailer);
    let (def, class, suffixes) =
        resolve_mnemonic(&full_name).ok_or_else(|| err(ParseErrorKind::UnknownMnemonic))?;
    if !suffixes.allowed_on(&def) {
        return Err(err(ParseErrorKind::UnknownMnemonic));
    }
    if def.coverage == Coverage::Unverified {
        tracing::debug!(mnemonic = %mnemonic.text, "assembling unverified encoding");
    }

    let mut control = 0;
    if suffixes.sat {
        control |= CONTROL_SATURATE;
    }
    if suffixes.test_nonzero {
        control |= CONTROL_TEST_NONZERO;
    }
    match (suffixes.uint, suffixes.rcpfloat, def.opcode) {
        (false, false, _) => {}
        (true, false, OPCODE_RESINFO) => control |= CONTROL_RESINFO_UINT,
        (false, true, OPCODE_RESINFO) => control |= CONTROL_RESINFO_RCPFLOAT,
        (true, false, OPCODE_SAMPLE_INFO) => control |= CONTROL_SAMPLE_INFO_UINT,
        _ => return Err(err(ParseErrorKind::UnknownMnemonic)),
    }
    if let Some(mask) = parts.precise.or(precise) {
        control |= mask << CONTROL_PRECISE_SHIFT;
    }

    let extensions = load_class_extensions(&parts.groups, suffixes, class).map_err(err)?;

    if operands.len() != usize::from(def.operands) {
        return Err(ParseError::new(
            line.trim(),
            ParseErrorKind::OperandCount {
                expected: usize::from(def.operands),
                found: operands.len(),
            },
        ));
    }

    let mut out = Encoded::default();
    out.push(0);
    let chained = extensions.len();
    for (i, word) in extensions.into_iter().enumerate() {
        out.push(if i + 1 < chained { word | EXTENDED_BIT } else { word });
    }
    for (i, operand) in operands.iter().enumerate() {
        encode_operand(operand.text, operand.start, i < usize::from(def.dsts), &mut out)?;
    }
    finish(&mut out, def.opcode, control, chained > 0, line)?;
    Ok(out)
}

/// Builds the aoffimmi, resource-dimension and return-type words, in that order.
fn load_class_extensions(
    groups: &[&str],
    suffixes: Suffixes,
    class: InstrClass,
) -> Result<Vec<u32>, ParseErrorKind> {
    if (suffixes.aoffimmi || suffixes.indexable || !groups.is_empty()) && class != InstrClass::Load {
        return Err(ParseErrorKind::Malformed("address-offset or resource groups on a non-load instruction"));
    }
    let mut offsets = None;
    let mut dim = None;
    let mut ret = None;
    for group in groups {
        let items: Vec<&str> = group.split(',').map(str::trim).collect();
        if let Some(values) = parse_offsets(&items) {
            offsets = Some(values);
        } else if let Some(d) = keyword_value(RESOURCE_DIMENSIONS, items[0]) {
            let stride = match items.get(1) {
                Some(item) => item
                    .strip_prefix("stride=")
                    .and_then(|s| s.trim().parse().ok())
                    .ok_or(ParseErrorKind::UnknownKeyword)?,
                None => 0,
            };
            dim = Some(resource_dim_word(d, stride));
        } else if items.len() == 4 {
            let mut types = [0; 4];
            for (slot, item) in types.iter_mut().zip(&items) {
                *slot = keyword_value(RETURN_TYPES, item).ok_or(ParseErrorKind::UnknownKeyword)?;
            }
            ret = Some(resource_return_type_word(types));
        } else {
            return Err(ParseErrorKind::UnknownKeyword);
        }
    }
    if suffixes.aoffimmi != offsets.is_some() || (!suffixes.indexable && (dim.is_some() || ret.is_some())) {
        return Err(ParseErrorKind::Malformed("suffix and parenthesized groups disagree"));
    }
    Ok(offsets
        .map(sample_controls_word)
        .into_iter()
        .chain(dim)
        .chain(ret)
        .collect())
}

fn parse_offsets(items: &[&str]) -> Option<[i8; 3]> {
    let [u, v, w] = items else { return None };
    let parse = |s: &str| s.parse::<i8>().ok().filter(|v| (-8..=7).contains(v));
    Some([parse(u)?, parse(v)?, parse(w)?])
}

/// Writes the opcode word into slot 0 once the length is known.
pub(crate) fn finish(
    out: &mut Encoded,
    opcode: u32,
    control: u32,
    extended: bool,
    line: &str,
) -> Result<(), ParseError> {
    let len = out.words.len();
    if len > MAX_INSTRUCTION_LEN {
        return Err(ParseError::new(line.trim(), ParseErrorKind::TooLong(len)));
    }
    out.words[0] = opcode_word(opcode, control, len, extended);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(line: &str) -> Vec<u32> {
        encode_statement(line).unwrap().words
    }

    fn kind(line: &str) -> ParseErrorKind {
        encode_statement(line).unwrap_err().kind
    }

    #[test]
    fn mov_with_four_float_literal() {
        assert_eq!(
            words("mov r0.xyzw, l(1.000000, 2.000000, 3.000000, 4.000000)"),
            vec![0x0800_0036, 0x0010_00f2, 0, 0x0000_4002, 0x3f80_0000, 0x4000_0000, 0x4040_0000, 0x4080_0000]
        );
    }

    #[test]
    fn suffixes_fold_into_control_bits() {
        assert_eq!(words("mov_sat r0.x, r1.x")[0], 0x0500_2036);
        assert_eq!(words("if_nz r0.x")[0], 0x0304_001f);
        assert_eq!(words("if_z r0.x")[0], 0x0300_001f);
        assert_eq!(words("discard_nz r0.x")[0], 0x0304_000d);
        // `round_z` is a mnemonic, not `round` + `_z`.
        assert_eq!(words("round_z r0.x, r1.x")[0], 0x0500_0043);
        assert_eq!(words("ret"), vec![0x0100_003e]);
    }

    #[test]
    fn suffixes_only_attach_where_the_opcode_has_the_bit() {
        assert_eq!(words("breakc_z r0.x")[0], 0x0300_0003);
        assert_eq!(words("retc_nz r0.x")[0], 0x0304_003f);
        assert_eq!(words("dp3_sat r0.x, r1.xyzx, r2.xyzx")[0] & CONTROL_SATURATE, CONTROL_SATURATE);
        for line in [
            "mov_z r0.x, r1.x",
            "add_nz r0.x, r1.x, r2.x",
            "iadd_sat r0.x, r1.x, r2.x",
            "ret_sat",
            "if_sat r0.x",
            "if_z_nz r0.x",
            "mov_sat_sat r0.x, r1.x",
        ] {
            assert_eq!(kind(line), ParseErrorKind::UnknownMnemonic, "{line}");
        }
    }

    #[test]
    fn precise_mask_in_any_position() {
        let expected = 0x0700_0000 | 0x3 << 19;
        assert_eq!(words("add [precise(xy)] r0.xy, r1.xyxx, r2.xyxx")[0], expected);
        assert_eq!(words("[precise(xy)] add r0.xy, r1.xyxx, r2.xyxx")[0], expected);
        assert_eq!(words("add[precise(xy)] r0.xy, r1.xyxx, r2.xyxx")[0], expected);
        assert_eq!(words("mul [precise] r0.x, r0.x, r0.x")[0] >> 19 & 0xf, 0xf);
    }

    #[test]
    fn sample_indexable_carries_dimension_and_return_type() {
        assert_eq!(
            words("sample_indexable(texture2d)(float,float,float,float) r0.xyzw, v1.xyxx, t0.xyzw, s0"),
            vec![
                0x8b00_0045,
                0x8000_00c2,
                0x0015_5543,
                0x0010_00f2,
                0,
                0x0010_1046,
                1,
                0x0010_7e46,
                0,
                0x0010_6000,
                0
            ]
        );
    }

    #[test]
    fn aoffimmi_word_comes_first() {
        let w = words("sample_aoffimmi_indexable(-1,2,0)(texture2d)(float,float,float,float) r0.xyzw, v1.xyxx, t0.xyzw, s0");
        assert_eq!(&w[1..4], &[0x8000_5e01, 0x8000_00c2, 0x0015_5543]);
        assert_eq!(w[0] >> 24 & 0x7f, 12);

        let w = words("ld_aoffimmi(1,0,0) r0.xyzw, r1.xyzw, t0.xyzw");
        assert_eq!(&w[..2], &[0x8800_002d, 0x0000_0201]);
    }

    #[test]
    fn structured_and_resinfo_forms() {
        let w = words("ld_structured_indexable(structured_buffer, stride=16)(mixed,mixed,mixed,mixed) r0.x, l(0), l(4), t1.xxxx");
        assert_eq!(&w[..3], &[0x8000_00a7 | 11 << 24, 0x8000_8302, 0x0019_9983]);

        let w = words("resinfo_indexable(texture2d)(float,float,float,float)_uint r0.xy, l(0), t0.xyzw");
        assert_eq!(w[0] & 0x1800, CONTROL_RESINFO_UINT);
        assert_eq!(w[0] & 0x7ff, OPCODE_RESINFO);

        assert_eq!(words("resinfo_rcpfloat r0.xy, l(0), t0.xyzw")[0] & 0x1800, CONTROL_RESINFO_RCPFLOAT);
        assert_eq!(words("sample_info_uint r0.x, rasterizer.x")[0] & 0x1800, CONTROL_SAMPLE_INFO_UINT);
    }

    #[test]
    fn two_destination_instructions() {
        assert_eq!(
            words("udiv r0.x, r1.x, r2.x, r3.x"),
            vec![0x0900_004e, 0x0010_0012, 0, 0x0010_0012, 1, 0x0010_000a, 2, 0x0010_000a, 3]
        );
        assert_eq!(words("sincos null, r0.x, r1.x")[1], 0x0000_d000);
    }

    #[test]
    fn operand_count_is_exact() {
        assert_eq!(kind("mov r0.x"), ParseErrorKind::OperandCount { expected: 2, found: 1 });
        assert_eq!(
            kind("mov r0.x, r1.x, r2.x"),
            ParseErrorKind::OperandCount { expected: 2, found: 3 }
        );
        assert_eq!(kind("ret r0.x"), ParseErrorKind::OperandCount { expected: 0, found: 1 });
    }

    #[test]
    fn unknown_and_misplaced_suffixes() {
        assert_eq!(kind("frobnicate r0.x"), ParseErrorKind::UnknownMnemonic);
        assert_eq!(kind("mov_uint r0.x, r1.x"), ParseErrorKind::UnknownMnemonic);
        assert!(matches!(kind("mov_indexable(texture2d) r0.x, r1.x"), ParseErrorKind::Malformed(_)));
        assert!(matches!(kind("sample_aoffimmi r0, v0, t0, s0"), ParseErrorKind::Malformed(_)));
        assert_eq!(kind("sample_indexable(texture9d)(float,float,float,float) r0.x, v0.x, t0.x, s0"), ParseErrorKind::UnknownKeyword);
    }

    #[test]
    fn override_spelling_matches_canonical() {
        assert_eq!(words("emitthen_cut_stream m0"), words("emit_then_cut_stream m0"));
        assert_eq!(words("emit_stream m1"), vec![0x0300_0075, 0x0010_0000 | 16 << 12, 1]);
    }
}

//! Binary instructions back to assembly text.
//!
//! The text produced here is accepted by [`crate::instruction::encode_statement`]
//! and, for everything the assembler itself emits, encodes back to the same
//! words. Literal floats use the exact-round-trip formatters in
//! [`crate::literal`].

use core::fmt::Write as _;

use crate::decl::{GlobalFlags, SyncFlags};
use crate::error::{DecodeError, DecodeErrorKind, DisasmError};
use crate::literal::{f64_from_words, format_f32, format_f64};
use crate::opcode::*;
use crate::operand::register_prefix;
use crate::program::Sm4Program;
use crate::tables::{
    instruction_by_opcode, keyword_name, CONDITIONAL_OPCODES, special_register_by_type, InstrClass, Keywords,
    CONSTANT_BUFFER_ACCESS, INPUT_PRIMITIVES, INPUT_PRIMITIVE_PATCH_BASE, INTERPOLATION_MODES,
    MIN_PRECISIONS, OUTPUT_TOPOLOGIES, RESOURCE_DIMENSIONS, RETURN_TYPES, SAMPLER_MODES,
    SYSTEM_VALUE_NAMES, TESS_DOMAINS, TESS_OUTPUT_PRIMITIVES, TESS_PARTITIONINGS,
};
use crate::token::{
    is_extended, opcode_control, opcode_type, operand_modifier_fields, sample_controls_offsets,
    ComponentCount, OperandHeader, Selection, EXT_OPCODE_TYPE_MASK, EXT_RESOURCE_DIM,
    EXT_RESOURCE_RETURN_TYPE, EXT_SAMPLE_CONTROLS, INDEX_IMMEDIATE32,
    INDEX_IMMEDIATE32_PLUS_RELATIVE, INDEX_RELATIVE, MODIFIER_ABS, MODIFIER_NEG,
};

const COMPONENTS: [char; 4] = ['x', 'y', 'z', 'w'];

/// Renders a whole program: the version line, then one line per instruction.
///
/// Instructions without a text form are emitted as `//` comments holding
/// their raw words, so the listing stays aligned with the binary.
pub fn render_program(program: &Sm4Program) -> Result<String, DisasmError> {
    let mut out = program.version().to_string();
    out.push('\n');
    for span in program.instructions() {
        let span = span?;
        match decode_instruction(span.words) {
            Ok(text) => out.push_str(&text),
            Err(err) => {
                tracing::debug!(at = span.at, %err, "instruction has no text form");
                out.push_str("// ");
                out.push_str(&hex_words(span.words));
            }
        }
        out.push('\n');
    }
    Ok(out)
}

fn hex_words(words: &[u32]) -> String {
    words
        .iter()
        .map(|w| format!("0x{w:08x}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decodes one complete instruction.
pub fn decode_instruction(words: &[u32]) -> Result<String, DecodeError> {
    let mut r = InstrReader::new(words);
    let opcode_token = r.read_u32()?;
    let opcode = opcode_type(opcode_token);
    if opcode == OPCODE_CUSTOMDATA {
        return custom_data(words);
    }
    let value = opcode_control(opcode_token) >> CONTROL_SHIFT;

    let text = match opcode {
        OPCODE_SYNC => SyncFlags::from_bits(opcode_control(opcode_token))
            .map(SyncFlags::mnemonic)
            .ok_or_else(|| r.unknown("sync flags", value))?,
        OPCODE_DCL_TEMPS => r.values("dcl_temps", 1)?,
        OPCODE_DCL_MAX_OUTPUT_VERTEX_COUNT => r.values("dcl_maxout", 1)?,
        OPCODE_DCL_GS_INSTANCE_COUNT => r.values("dcl_gs_instance_count", 1)?,
        OPCODE_DCL_HS_FORK_PHASE_INSTANCE_COUNT => r.values("dcl_hs_fork_phase_instance_count", 1)?,
        OPCODE_DCL_HS_JOIN_PHASE_INSTANCE_COUNT => r.values("dcl_hs_join_phase_instance_count", 1)?,
        OPCODE_DCL_THREAD_GROUP => r.values("dcl_thread_group", 3)?,
        OPCODE_DCL_INPUT_CONTROL_POINT_COUNT => format!("dcl_input_control_point_count {value}"),
        OPCODE_DCL_OUTPUT_CONTROL_POINT_COUNT => format!("dcl_output_control_point_count {value}"),
        OPCODE_DCL_TESS_DOMAIN => r.keyword_line("dcl_tessellator_domain", TESS_DOMAINS, value)?,
        OPCODE_DCL_TESS_PARTITIONING => {
            r.keyword_line("dcl_tessellator_partitioning", TESS_PARTITIONINGS, value)?
        }
        OPCODE_DCL_TESS_OUTPUT_PRIMITIVE => {
            r.keyword_line("dcl_tessellator_output_primitive", TESS_OUTPUT_PRIMITIVES, value)?
        }
        OPCODE_DCL_GS_OUTPUT_TOPOLOGY => r.keyword_line("dcl_outputtopology", OUTPUT_TOPOLOGIES, value)?,
        OPCODE_DCL_GS_INPUT_PRIMITIVE => match value.checked_sub(INPUT_PRIMITIVE_PATCH_BASE) {
            Some(n @ 1..=32) => format!("dcl_inputprimitive patch{n}"),
            _ => r.keyword_line("dcl_inputprimitive", INPUT_PRIMITIVES, value)?,
        },
        OPCODE_DCL_GLOBAL_FLAGS => {
            let flags = GlobalFlags::from_bits(opcode_control(opcode_token))
                .and_then(GlobalFlags::to_text)
                .ok_or_else(|| r.unknown("global flags", value))?;
            format!("dcl_globalFlags {flags}")
        }
        OPCODE_DCL_CONSTANT_BUFFER => {
            let access = r.keyword(CONSTANT_BUFFER_ACCESS, value, "constant buffer access")?;
            format!("dcl_constantbuffer {}, {access}", r.operand(true)?)
        }
        OPCODE_DCL_SAMPLER => {
            let mode = r.keyword(SAMPLER_MODES, value, "sampler mode")?;
            format!("dcl_sampler {}, {mode}", r.operand(true)?)
        }
        OPCODE_DCL_INPUT => r.operand_then_values("dcl_input", 0)?,
        OPCODE_DCL_OUTPUT => r.operand_then_values("dcl_output", 0)?,
        OPCODE_DCL_STREAM => r.operand_then_values("dcl_stream", 0)?,
        OPCODE_DCL_HS_MAX_TESSFACTOR => r.operand_then_values("dcl_hs_max_tessfactor", 0)?,
        OPCODE_DCL_INDEX_RANGE => r.operand_then_values("dcl_indexrange", 1)?,
        OPCODE_DCL_RESOURCE_RAW => r.operand_then_values("dcl_resource_raw", 0)?,
        OPCODE_DCL_RESOURCE_STRUCTURED => r.operand_then_values("dcl_resource_structured", 1)?,
        OPCODE_DCL_TGSM_RAW => r.operand_then_values("dcl_tgsm_raw", 1)?,
        OPCODE_DCL_TGSM_STRUCTURED => r.operand_then_values("dcl_tgsm_structured", 2)?,
        OPCODE_DCL_INPUT_SGV => r.system_value("dcl_input_sgv", "")?,
        OPCODE_DCL_INPUT_SIV => r.system_value("dcl_input_siv", "")?,
        OPCODE_DCL_OUTPUT_SGV => r.system_value("dcl_output_sgv", "")?,
        OPCODE_DCL_OUTPUT_SIV => r.system_value("dcl_output_siv", "")?,
        OPCODE_DCL_INPUT_PS | OPCODE_DCL_INPUT_PS_SGV | OPCODE_DCL_INPUT_PS_SIV => {
            let mode = match value {
                0 => String::new(),
                _ => format!("{} ", r.keyword(INTERPOLATION_MODES, value, "interpolation mode")?),
            };
            match opcode {
                OPCODE_DCL_INPUT_PS => format!("dcl_input_ps {mode}{}", r.operand(true)?),
                OPCODE_DCL_INPUT_PS_SGV => r.system_value("dcl_input_ps_sgv", &mode)?,
                _ => r.system_value("dcl_input_ps_siv", &mode)?,
            }
        }
        OPCODE_DCL_INDEXABLE_TEMP => {
            let (register, size, components) = (r.read_u32()?, r.read_u32()?, r.read_u32()?);
            format!("dcl_indexableTemp x{register}[{size}], {components}")
        }
        OPCODE_DCL_RESOURCE => {
            let control = opcode_control(opcode_token);
            let dim = control >> CONTROL_RESOURCE_DIM_SHIFT & 0x1f;
            let samples = control >> CONTROL_SAMPLE_COUNT_SHIFT & 0x7f;
            let dim_name = r.keyword(RESOURCE_DIMENSIONS, dim, "resource dimension")?;
            let multisampled =
                dim == RESOURCE_DIMENSION_TEXTURE2DMS || dim == RESOURCE_DIMENSION_TEXTURE2DMSARRAY;
            let samples = if multisampled || samples != 0 {
                format!("({samples})")
            } else {
                String::new()
            };
            let operand = r.operand(true)?;
            let returns = r.return_types()?;
            format!("dcl_resource_{dim_name}{samples} ({returns}) {operand}")
        }
        OPCODE_DCL_UAV_TYPED | OPCODE_DCL_UAV_RAW | OPCODE_DCL_UAV_STRUCTURED => {
            let control = opcode_control(opcode_token);
            let mut flags = String::new();
            for (bit, suffix) in [
                (CONTROL_UAV_GLOBALLY_COHERENT, "_glc"),
                (CONTROL_UAV_RASTERIZER_ORDERED, "_rov"),
                (CONTROL_UAV_HAS_ORDER_PRESERVING_COUNTER, "_opc"),
            ] {
                if control & bit != 0 {
                    flags.push_str(suffix);
                }
            }
            match opcode {
                OPCODE_DCL_UAV_RAW => format!("dcl_uav_raw{flags} {}", r.operand(true)?),
                OPCODE_DCL_UAV_STRUCTURED => {
                    let operand = r.operand(true)?;
                    format!("dcl_uav_structured{flags} {operand}, {}", r.read_u32()?)
                }
                _ => {
                    let dim = control >> CONTROL_RESOURCE_DIM_SHIFT & 0x1f;
                    let dim_name = r.keyword(RESOURCE_DIMENSIONS, dim, "resource dimension")?;
                    let operand = r.operand(true)?;
                    let returns = r.return_types()?;
                    format!("dcl_uav_typed_{dim_name}{flags} ({returns}) {operand}")
                }
            }
        }
        _ => table_instruction(&mut r, opcode_token)?,
    };
    r.expect_eof()?;
    Ok(text)
}

fn table_instruction(r: &mut InstrReader<'_>, opcode_token: u32) -> Result<String, DecodeError> {
    let opcode = opcode_type(opcode_token);
    let (def, class) = instruction_by_opcode(opcode).ok_or_else(|| r.error(DecodeErrorKind::UnknownOpcode(opcode)))?;

    let mut name = String::from(def.name);
    let mut groups = String::new();
    if is_extended(opcode_token) {
        if class != InstrClass::Load {
            return Err(r.error(DecodeErrorKind::UnsupportedExtended(opcode_token)));
        }
        let mut aoffimmi = None;
        let mut indexable = String::new();
        loop {
            let word = r.read_u32()?;
            match word & EXT_OPCODE_TYPE_MASK {
                EXT_SAMPLE_CONTROLS => {
                    let [u, v, w] = sample_controls_offsets(word);
                    aoffimmi = Some(format!("({u},{v},{w})"));
                }
                EXT_RESOURCE_DIM => {
                    let dim = word >> 6 & 0x1f;
                    let stride = word >> 11 & 0xfff;
                    let dim_name = r.keyword(RESOURCE_DIMENSIONS, dim, "resource dimension")?;
                    match stride {
                        0 => write!(indexable, "({dim_name})"),
                        _ => write!(indexable, "({dim_name}, stride={stride})"),
                    }
                    .map_err(|_| r.error(DecodeErrorKind::Format))?;
                }
                EXT_RESOURCE_RETURN_TYPE => {
                    let types = return_type_names(word >> 6).ok_or_else(|| r.unknown("return type", word))?;
                    write!(indexable, "({types})").map_err(|_| r.error(DecodeErrorKind::Format))?;
                }
                _ => return Err(r.error(DecodeErrorKind::UnsupportedExtended(word))),
            }
            if !is_extended(word) {
                break;
            }
        }
        if let Some(offsets) = aoffimmi {
            name.push_str("_aoffimmi");
            groups.push_str(&offsets);
        }
        if !indexable.is_empty() {
            name.push_str("_indexable");
            groups.push_str(&indexable);
        }
    }

    let mut control = opcode_control(opcode_token);
    let mut suffixes = String::new();
    let mut take = |bit: u32, suffix: &str| {
        if control & bit == bit {
            control &= !bit;
            suffixes.push_str(suffix);
        }
    };
    match opcode {
        OPCODE_RESINFO => {
            take(CONTROL_RESINFO_UINT, "_uint");
            take(CONTROL_RESINFO_RCPFLOAT, "_rcpfloat");
        }
        OPCODE_SAMPLE_INFO => take(CONTROL_SAMPLE_INFO_UINT, "_uint"),
        _ => {}
    }
    if def.sat {
        take(CONTROL_SATURATE, "_sat");
    }
    if CONDITIONAL_OPCODES.contains(&opcode) {
        if control & CONTROL_TEST_NONZERO != 0 {
            control &= !CONTROL_TEST_NONZERO;
            suffixes.push_str("_nz");
        } else {
            suffixes.push_str("_z");
        }
    }
    let precise = control >> CONTROL_PRECISE_SHIFT & 0xf;
    control &= !(0xf << CONTROL_PRECISE_SHIFT);
    if control != 0 {
        return Err(r.unknown("control field", control >> CONTROL_SHIFT));
    }

    let mut text = format!("{name}{groups}{suffixes}");
    match precise {
        0 => {}
        0xf => text.push_str(" [precise]"),
        mask => {
            let letters: String = COMPONENTS
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & 1 << i != 0)
                .map(|(_, c)| c)
                .collect();
            write!(text, " [precise({letters})]").map_err(|_| r.error(DecodeErrorKind::Format))?;
        }
    }
    for i in 0..usize::from(def.operands) {
        text.push_str(if i == 0 { " " } else { ", " });
        text.push_str(&r.operand(i < usize::from(def.dsts))?);
    }
    Ok(text)
}

fn return_type_names(packed: u32) -> Option<String> {
    let names = (0..4)
        .map(|i| keyword_name(RETURN_TYPES, packed >> (4 * i) & 0xf))
        .collect::<Option<Vec<_>>>()?;
    Some(names.join(","))
}

/// 32-bit immediate: small integers print as integers, everything else as a float.
fn format_imm32(bits: u32) -> String {
    let signed = bits as i32;
    if (-0x10000..=0x10000).contains(&signed) {
        signed.to_string()
    } else {
        format_f32(bits)
    }
}

fn custom_data(words: &[u32]) -> Result<String, DecodeError> {
    let class = opcode_control(words[0]) >> CONTROL_SHIFT;
    match class {
        CUSTOMDATA_CLASS_ICB => {
            let values = words.get(2..).unwrap_or_default();
            if values.is_empty() || values.len() % 4 != 0 {
                return Err(DecodeError {
                    at: 2,
                    kind: DecodeErrorKind::UnexpectedEof,
                });
            }
            let rows: Vec<String> = values
                .chunks_exact(4)
                .map(|row| {
                    let row: Vec<String> = row.iter().map(|v| format_imm32(*v)).collect();
                    format!("{{ {} }}", row.join(", "))
                })
                .collect();
            Ok(format!("dcl_immediateConstantBuffer {{ {} }}", rows.join(",\n  ")))
        }
        CUSTOMDATA_CLASS_SHADER_MESSAGE => shader_message(words),
        _ => Ok(format!("undecipherable_customdata {{ {} }}", hex_words(words))),
    }
}

fn shader_message(words: &[u32]) -> Result<String, DecodeError> {
    let mut r = InstrReader::new(words);
    r.pos = 2;
    let id = r.read_u32()?;
    let mnemonic = match id {
        SHADER_MESSAGE_ID_PRINTF => "printf",
        SHADER_MESSAGE_ID_ERRORF => "errorf",
        other => return Err(r.unknown("shader message id", other)),
    };
    let format = r.read_u32()?;
    if format != SHADER_MESSAGE_FORMAT_PRINTF {
        return Err(r.unknown("shader message format", format));
    }
    let chars = r.read_u32()? as usize;
    let operand_count = r.read_u32()?;
    let operand_words = r.read_u32()? as usize;

    let operands_end = r.pos + operand_words;
    let mut text = String::from(mnemonic);
    let mut operands = Vec::new();
    for _ in 0..operand_count {
        operands.push(r.operand(false)?);
    }
    if r.pos != operands_end {
        return Err(r.error(DecodeErrorKind::TrailingWords(operands_end.abs_diff(r.pos))));
    }
    let bytes: Vec<u8> = words[r.pos..].iter().flat_map(|w| w.to_le_bytes()).collect();
    let message = bytes
        .get(..chars)
        .and_then(|b| core::str::from_utf8(b).ok())
        .ok_or_else(|| r.error(DecodeErrorKind::UnexpectedEof))?;
    write!(text, " \"{message}\"").map_err(|_| r.error(DecodeErrorKind::Format))?;
    for operand in operands {
        write!(text, ", {operand}").map_err(|_| r.error(DecodeErrorKind::Format))?;
    }
    Ok(text)
}

struct InstrReader<'a> {
    toks: &'a [u32],
    pos: usize,
}

impl<'a> InstrReader<'a> {
    fn new(toks: &'a [u32]) -> Self {
        Self { toks, pos: 0 }
    }

    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError { at: self.pos, kind }
    }

    fn unknown(&self, what: &'static str, value: u32) -> DecodeError {
        self.error(DecodeErrorKind::UnknownValue { what, value })
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let v = self
            .toks
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.error(DecodeErrorKind::UnexpectedEof))?;
        self.pos += 1;
        Ok(v)
    }

    fn expect_eof(&self) -> Result<(), DecodeError> {
        match self.toks.len() - self.pos.min(self.toks.len()) {
            0 => Ok(()),
            left => Err(self.error(DecodeErrorKind::TrailingWords(left))),
        }
    }

    fn keyword(&self, table: Keywords, value: u32, what: &'static str) -> Result<&'static str, DecodeError> {
        keyword_name(table, value).ok_or_else(|| self.unknown(what, value))
    }

    fn keyword_line(&self, mnemonic: &'static str, table: Keywords, value: u32) -> Result<String, DecodeError> {
        Ok(format!("{mnemonic} {}", self.keyword(table, value, mnemonic)?))
    }

    fn values(&mut self, mnemonic: &str, count: usize) -> Result<String, DecodeError> {
        let values = (0..count)
            .map(|_| self.read_u32().map(|v| v.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{mnemonic} {}", values.join(", ")))
    }

    fn operand_then_values(&mut self, mnemonic: &str, count: usize) -> Result<String, DecodeError> {
        let mut text = format!("{mnemonic} {}", self.operand(true)?);
        for _ in 0..count {
            let value = self.read_u32()?;
            write!(text, ", {value}").map_err(|_| self.error(DecodeErrorKind::Format))?;
        }
        Ok(text)
    }

    fn system_value(&mut self, mnemonic: &str, mode: &str) -> Result<String, DecodeError> {
        let operand = self.operand(true)?;
        let name = self.read_u32()?;
        let name = self.keyword(SYSTEM_VALUE_NAMES, name, "system value")?;
        Ok(format!("{mnemonic} {mode}{operand}, {name}"))
    }

    fn return_types(&mut self) -> Result<String, DecodeError> {
        let word = self.read_u32()?;
        return_type_names(word).ok_or_else(|| self.unknown("return type", word))
    }

    /// Decodes one operand; `special` operands print masks and omit the
    /// implied swizzle of declared constant buffers.
    fn operand(&mut self, special: bool) -> Result<String, DecodeError> {
        let word = self.read_u32()?;
        let header = OperandHeader::decode(word).ok_or_else(|| self.error(DecodeErrorKind::InvalidOperand(word)))?;
        let (mut modifier, mut precision) = (0, MIN_PRECISION_DEFAULT);
        if header.extended {
            let ext = self.read_u32()?;
            (modifier, precision) = operand_modifier_fields(ext)
                .filter(|_| !is_extended(ext))
                .ok_or_else(|| self.error(DecodeErrorKind::UnsupportedExtended(ext)))?;
        }

        let body = match header.ty {
            OPERAND_TYPE_IMMEDIATE32 => {
                let count = match header.components {
                    ComponentCount::One => 1,
                    ComponentCount::Four => 4,
                    ComponentCount::Zero => return Err(self.error(DecodeErrorKind::InvalidOperand(word))),
                };
                let values = (0..count)
                    .map(|_| self.read_u32().map(format_imm32))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("l({})", values.join(", "))
            }
            OPERAND_TYPE_IMMEDIATE64 => {
                let count = match header.components {
                    ComponentCount::One => 2,
                    ComponentCount::Four => 4,
                    ComponentCount::Zero => return Err(self.error(DecodeErrorKind::InvalidOperand(word))),
                };
                let raw = (0..count)
                    .map(|_| self.read_u32())
                    .collect::<Result<Vec<_>, _>>()?;
                let doubles = raw
                    .chunks_exact(2)
                    .map(|pair| format_f64(f64_from_words(pair[0], pair[1])))
                    .collect::<Option<Vec<_>>>();
                match doubles {
                    Some(doubles) => format!("d({})", doubles.join(", ")),
                    // Non-finite doubles have no text form; keep the raw words.
                    None => format!("d({})", hex_words(&raw)),
                }
            }
            ty => {
                let mut text = match special_register_by_type(ty) {
                    Some(reg) if header.index_reps.is_empty() => reg.name.to_owned(),
                    _ => {
                        let prefix = register_prefix(ty)
                            .ok_or_else(|| self.error(DecodeErrorKind::UnsupportedOperandType(ty)))?;
                        let mut text = prefix.to_owned();
                        self.indices(&header, &mut text)?;
                        text
                    }
                };
                text.push_str(&selection_suffix(&header, special));
                text
            }
        };

        let mut text = String::new();
        if modifier & MODIFIER_NEG != 0 {
            text.push('-');
        }
        if modifier & MODIFIER_ABS != 0 {
            write!(text, "|{body}|").map_err(|_| self.error(DecodeErrorKind::Format))?;
        } else {
            text.push_str(&body);
        }
        if precision != MIN_PRECISION_DEFAULT {
            let tag = keyword_name(MIN_PRECISIONS, precision).ok_or_else(|| self.unknown("minimum precision", precision))?;
            write!(text, " {{{tag}}}").map_err(|_| self.error(DecodeErrorKind::Format))?;
        }
        Ok(text)
    }

    fn indices(&mut self, header: &OperandHeader, text: &mut String) -> Result<(), DecodeError> {
        for (i, rep) in header.index_reps.as_slice().iter().enumerate() {
            let expr = match *rep {
                INDEX_IMMEDIATE32 => {
                    let value = self.read_u32()?;
                    if i == 0 {
                        write!(text, "{value}").map_err(|_| self.error(DecodeErrorKind::Format))?;
                        continue;
                    }
                    value.to_string()
                }
                INDEX_RELATIVE => self.operand(false)?,
                INDEX_IMMEDIATE32_PLUS_RELATIVE => {
                    let value = self.read_u32()?;
                    format!("{} + {value}", self.operand(false)?)
                }
                other => return Err(self.error(DecodeErrorKind::UnsupportedIndexRepresentation(other))),
            };
            write!(text, "[{expr}]").map_err(|_| self.error(DecodeErrorKind::Format))?;
        }
        Ok(())
    }
}

fn selection_suffix(header: &OperandHeader, special: bool) -> String {
    if header.components != ComponentCount::Four {
        return String::new();
    }
    let letters: String = match header.selection {
        Selection::Mask(mask) => COMPONENTS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & 1 << i != 0)
            .map(|(_, c)| *c)
            .collect(),
        // Declared constant buffers carry an implied `.xyzw` swizzle.
        Selection::Swizzle(_) if special => String::new(),
        Selection::Swizzle(s) => s.iter().map(|c| COMPONENTS[usize::from(*c & 3)]).collect(),
        Selection::Select1(c) => COMPONENTS[usize::from(c & 3)].to_string(),
    };
    if letters.is_empty() {
        letters
    } else {
        format!(".{letters}")
    }
}

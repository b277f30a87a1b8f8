//! Statements with their own grammar: declarations, `sync` barriers, shader
//! messages, immediate constant buffers and raw custom-data blocks.
//!
//! Each handler checks its operand count exactly and writes the opcode word
//! through [`finish`] once the length is known. Custom-data blocks carry their
//! length in the second word instead.

use bitflags::bitflags;
use dxmod_dxbc::ShaderFeatureFlags;

use crate::error::{ParseError, ParseErrorKind};
use crate::instruction::{finish, split_mnemonic, MnemonicParts};
use crate::literal::{is_hex_literal, parse_u32_literal};
use crate::opcode::*;
use crate::operand::{encode_operand, split_components, Encoded};
use crate::tables::{
    keyword_value, Keywords, CONSTANT_BUFFER_ACCESS, INPUT_PRIMITIVES, INPUT_PRIMITIVE_PATCH_BASE,
    INTERPOLATION_MODES, OUTPUT_TOPOLOGIES, RESOURCE_DIMENSIONS, RETURN_TYPES, SAMPLER_MODES,
    SYSTEM_VALUE_NAMES, TESS_DOMAINS, TESS_OUTPUT_PRIMITIVES, TESS_PARTITIONINGS,
};
use crate::token::{OPCODE_CONTROL_MASK, OPCODE_TYPE_MASK};
use crate::tokenize::Token;

bitflags! {
    /// Control bits of `dcl_globalFlags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GlobalFlags: u32 {
        const REFACTORING_ALLOWED = 1 << 11;
        const ENABLE_DOUBLE_PRECISION_FLOAT_OPS = 1 << 12;
        const FORCE_EARLY_DEPTH_STENCIL = 1 << 13;
        const ENABLE_RAW_AND_STRUCTURED_BUFFERS = 1 << 14;
        const SKIP_OPTIMIZATION = 1 << 15;
        const ENABLE_MINIMUM_PRECISION = 1 << 16;
        const ENABLE_11_1_DOUBLE_EXTENSIONS = 1 << 17;
        const ENABLE_11_1_SHADER_EXTENSIONS = 1 << 18;
    }
}

/// Spellings of the global flags, in listing order.
pub static GLOBAL_FLAG_NAMES: &[(&str, GlobalFlags)] = &[
    ("refactoringAllowed", GlobalFlags::REFACTORING_ALLOWED),
    ("enableDoublePrecisionFloatOps", GlobalFlags::ENABLE_DOUBLE_PRECISION_FLOAT_OPS),
    ("forceEarlyDepthStencil", GlobalFlags::FORCE_EARLY_DEPTH_STENCIL),
    ("enableRawAndStructuredBuffers", GlobalFlags::ENABLE_RAW_AND_STRUCTURED_BUFFERS),
    ("skipOptimization", GlobalFlags::SKIP_OPTIMIZATION),
    ("enableMinimumPrecision", GlobalFlags::ENABLE_MINIMUM_PRECISION),
    ("enable11_1DoubleExtensions", GlobalFlags::ENABLE_11_1_DOUBLE_EXTENSIONS),
    ("enable11_1ShaderExtensions", GlobalFlags::ENABLE_11_1_SHADER_EXTENSIONS),
];

impl GlobalFlags {
    /// The `SFI0` feature bits implied by these flags.
    pub fn feature_flags(self) -> ShaderFeatureFlags {
        let mut features = ShaderFeatureFlags::empty();
        if self.contains(Self::ENABLE_DOUBLE_PRECISION_FLOAT_OPS) {
            features |= ShaderFeatureFlags::DOUBLES;
        }
        if self.contains(Self::ENABLE_MINIMUM_PRECISION) {
            features |= ShaderFeatureFlags::MINIMUM_PRECISION;
        }
        if self.contains(Self::ENABLE_11_1_DOUBLE_EXTENSIONS) {
            features |= ShaderFeatureFlags::DOUBLE_EXTENSIONS_11_1;
        }
        if self.contains(Self::ENABLE_11_1_SHADER_EXTENSIONS) {
            features |= ShaderFeatureFlags::SHADER_EXTENSIONS_11_1;
        }
        features
    }

    /// `a | b | c`, or `None` if some bit has no spelling.
    pub fn to_text(self) -> Option<String> {
        let mut rest = self;
        let mut names = Vec::new();
        for (name, flag) in GLOBAL_FLAG_NAMES {
            if rest.contains(*flag) {
                names.push(*name);
                rest.remove(*flag);
            }
        }
        rest.is_empty().then(|| names.join(" | "))
    }
}

bitflags! {
    /// Control bits of `sync`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SyncFlags: u32 {
        /// `_t`
        const THREADS_IN_GROUP = 1 << 11;
        /// `_g`
        const THREAD_GROUP_SHARED_MEMORY = 1 << 12;
        /// `_ugroup`
        const UAV_MEMORY_GROUP = 1 << 13;
        /// `_uglobal`
        const UAV_MEMORY_GLOBAL = 1 << 14;
    }
}

/// Suffix words of `sync`, in listing order.
pub static SYNC_FLAG_NAMES: &[(&str, SyncFlags)] = &[
    ("uglobal", SyncFlags::UAV_MEMORY_GLOBAL),
    ("ugroup", SyncFlags::UAV_MEMORY_GROUP),
    ("g", SyncFlags::THREAD_GROUP_SHARED_MEMORY),
    ("t", SyncFlags::THREADS_IN_GROUP),
];

impl SyncFlags {
    /// The full mnemonic, e.g. `sync_uglobal_g_t`.
    pub fn mnemonic(self) -> String {
        let mut text = String::from("sync");
        for (name, flag) in SYNC_FLAG_NAMES {
            if self.contains(*flag) {
                text.push('_');
                text.push_str(name);
            }
        }
        text
    }
}

/// Interpolation words that may precede a pixel-shader input operand.
const INTERPOLATION_WORDS: &[&str] = &["constant", "linear", "centroid", "noperspective", "sample"];

/// Encodes `mnemonic` if it is one of the individually handled statements.
///
/// Returns `None` for anything the instruction tables should handle.
pub(crate) fn encode_special(
    line: &str,
    mnemonic: &Token<'_>,
    args: &[Token<'_>],
) -> Option<Result<Encoded, ParseError>> {
    let name = mnemonic.text;
    let base = name.split('(').next().unwrap_or(name);
    let result = match base {
        "printf" => shader_message(line, SHADER_MESSAGE_ID_PRINTF, args),
        "errorf" => shader_message(line, SHADER_MESSAGE_ID_ERRORF, args),
        "undecipherable_customdata" => raw_customdata(line, args),
        "dcl_immediateConstantBuffer" => immediate_constant_buffer(line, args),
        _ if base == "sync" || base.starts_with("sync_") => sync(line, mnemonic, args),
        _ if base.starts_with("dcl_") => return declaration(line, mnemonic, args),
        _ => return None,
    };
    Some(result)
}

fn declaration(
    line: &str,
    mnemonic: &Token<'_>,
    args: &[Token<'_>],
) -> Option<Result<Encoded, ParseError>> {
    let parts = match split_mnemonic(mnemonic.text) {
        Ok(parts) => parts,
        Err(kind) => return Some(Err(ParseError::new(mnemonic.text, kind))),
    };
    let base = parts.base;
    let stmt = Statement {
        line,
        mnemonic,
        args,
    };
    if !parts.trailer.is_empty() || (!parts.groups.is_empty() && !base.starts_with("dcl_resource_")) {
        return Some(Err(stmt.error(ParseErrorKind::UnknownMnemonic)));
    }

    let result = match base {
        "dcl_temps" => stmt.values(OPCODE_DCL_TEMPS, 1),
        "dcl_maxout" => stmt.values(OPCODE_DCL_MAX_OUTPUT_VERTEX_COUNT, 1),
        "dcl_gs_instance_count" => stmt.values(OPCODE_DCL_GS_INSTANCE_COUNT, 1),
        "dcl_hs_fork_phase_instance_count" => stmt.values(OPCODE_DCL_HS_FORK_PHASE_INSTANCE_COUNT, 1),
        "dcl_hs_join_phase_instance_count" => stmt.values(OPCODE_DCL_HS_JOIN_PHASE_INSTANCE_COUNT, 1),
        "dcl_thread_group" => stmt.values(OPCODE_DCL_THREAD_GROUP, 3),
        "dcl_input_control_point_count" => stmt.count_control(OPCODE_DCL_INPUT_CONTROL_POINT_COUNT),
        "dcl_output_control_point_count" => stmt.count_control(OPCODE_DCL_OUTPUT_CONTROL_POINT_COUNT),
        "dcl_tessellator_domain" => stmt.keyword_control(OPCODE_DCL_TESS_DOMAIN, TESS_DOMAINS),
        "dcl_tessellator_partitioning" => {
            stmt.keyword_control(OPCODE_DCL_TESS_PARTITIONING, TESS_PARTITIONINGS)
        }
        "dcl_tessellator_output_primitive" => {
            stmt.keyword_control(OPCODE_DCL_TESS_OUTPUT_PRIMITIVE, TESS_OUTPUT_PRIMITIVES)
        }
        "dcl_outputtopology" => stmt.keyword_control(OPCODE_DCL_GS_OUTPUT_TOPOLOGY, OUTPUT_TOPOLOGIES),
        "dcl_inputprimitive" => stmt.input_primitive(),
        "dcl_globalFlags" => stmt.global_flags(),
        "dcl_constantbuffer" => stmt.constant_buffer(),
        "dcl_sampler" => stmt.sampler(),
        "dcl_input" => stmt.operand_then_values(OPCODE_DCL_INPUT, 0),
        "dcl_output" => stmt.operand_then_values(OPCODE_DCL_OUTPUT, 0),
        "dcl_stream" => stmt.operand_then_values(OPCODE_DCL_STREAM, 0),
        "dcl_hs_max_tessfactor" => stmt.operand_then_values(OPCODE_DCL_HS_MAX_TESSFACTOR, 0),
        "dcl_indexrange" => stmt.operand_then_values(OPCODE_DCL_INDEX_RANGE, 1),
        "dcl_resource_raw" => stmt.operand_then_values(OPCODE_DCL_RESOURCE_RAW, 0),
        "dcl_resource_structured" => stmt.operand_then_values(OPCODE_DCL_RESOURCE_STRUCTURED, 1),
        "dcl_tgsm_raw" => stmt.operand_then_values(OPCODE_DCL_TGSM_RAW, 1),
        "dcl_tgsm_structured" => stmt.operand_then_values(OPCODE_DCL_TGSM_STRUCTURED, 2),
        "dcl_input_sgv" => stmt.system_value(OPCODE_DCL_INPUT_SGV, 0, 0),
        "dcl_input_siv" => stmt.system_value(OPCODE_DCL_INPUT_SIV, 0, 0),
        "dcl_output_sgv" => stmt.system_value(OPCODE_DCL_OUTPUT_SGV, 0, 0),
        "dcl_output_siv" => stmt.system_value(OPCODE_DCL_OUTPUT_SIV, 0, 0),
        "dcl_input_ps" | "dcl_input_ps_sgv" | "dcl_input_ps_siv" => stmt.input_ps(base),
        "dcl_indexableTemp" => stmt.indexable_temp(),
        _ if base.starts_with("dcl_resource_") => stmt.typed_resource(&parts),
        _ if base.starts_with("dcl_uav_") => stmt.uav(base),
        _ => return None,
    };
    Some(result)
}

struct Statement<'s, 'a> {
    line: &'s str,
    mnemonic: &'s Token<'a>,
    args: &'s [Token<'a>],
}

impl Statement<'_, '_> {
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.mnemonic.text, kind)
    }

    fn arity(&self, expected: usize) -> Result<(), ParseError> {
        arity(self.line, self.args, expected)
    }

    fn keyword(&self, table: Keywords, index: usize) -> Result<u32, ParseError> {
        let token = &self.args[index];
        keyword_value(table, token.text)
            .ok_or_else(|| ParseError::new(token.text, ParseErrorKind::UnknownKeyword))
    }

    fn operand(&self, index: usize, out: &mut Encoded) -> Result<(), ParseError> {
        let token = &self.args[index];
        encode_operand(token.text, token.start, true, out)
    }

    fn finish(&self, mut out: Encoded, opcode: u32, control: u32) -> Result<Encoded, ParseError> {
        finish(&mut out, opcode, control, false, self.line)?;
        Ok(out)
    }

    /// `dcl_temps 4`, `dcl_thread_group 8, 8, 1`.
    fn values(&self, opcode: u32, count: usize) -> Result<Encoded, ParseError> {
        self.arity(count)?;
        let mut out = Encoded::default();
        out.push(0);
        for token in self.args {
            out.push(parse_value(token)?);
        }
        self.finish(out, opcode, 0)
    }

    /// `dcl_input_control_point_count 3`: the count lives in the control field.
    fn count_control(&self, opcode: u32) -> Result<Encoded, ParseError> {
        self.arity(1)?;
        let value = parse_value(&self.args[0])?;
        self.control_only(opcode, value)
    }

    fn keyword_control(&self, opcode: u32, table: Keywords) -> Result<Encoded, ParseError> {
        self.arity(1)?;
        let value = self.keyword(table, 0)?;
        self.control_only(opcode, value)
    }

    fn control_only(&self, opcode: u32, value: u32) -> Result<Encoded, ParseError> {
        if value > OPCODE_CONTROL_MASK {
            return Err(self.error(ParseErrorKind::Malformed("value does not fit the control field")));
        }
        let mut out = Encoded::default();
        out.push(0);
        self.finish(out, opcode, value << CONTROL_SHIFT)
    }

    fn input_primitive(&self) -> Result<Encoded, ParseError> {
        self.arity(1)?;
        let token = &self.args[0];
        let value = match token.text.strip_prefix("patch") {
            Some(n) => n
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=32).contains(n))
                .map(|n| INPUT_PRIMITIVE_PATCH_BASE + n)
                .ok_or_else(|| ParseError::new(token.text, ParseErrorKind::UnknownKeyword))?,
            None => self.keyword(INPUT_PRIMITIVES, 0)?,
        };
        self.control_only(OPCODE_DCL_GS_INPUT_PRIMITIVE, value)
    }

    /// `dcl_globalFlags refactoringAllowed | enableDoublePrecisionFloatOps`.
    fn global_flags(&self) -> Result<Encoded, ParseError> {
        let mut flags = GlobalFlags::empty();
        for token in self.args.iter().filter(|t| t.text != "|") {
            let flag = token
                .text
                .split('|')
                .filter(|name| !name.is_empty())
                .try_fold(GlobalFlags::empty(), |acc, name| {
                    GLOBAL_FLAG_NAMES
                        .iter()
                        .find(|(n, _)| *n == name)
                        .map(|(_, flag)| acc | *flag)
                        .ok_or_else(|| ParseError::new(token.text, ParseErrorKind::UnknownKeyword))
                })?;
            flags |= flag;
        }
        let mut out = Encoded::default();
        out.push(0);
        self.finish(out, OPCODE_DCL_GLOBAL_FLAGS, flags.bits())
    }

    /// `dcl_constantbuffer cb0[4], immediateIndexed`; the access pattern is optional.
    fn constant_buffer(&self) -> Result<Encoded, ParseError> {
        if !(1..=2).contains(&self.args.len()) {
            self.arity(2)?;
        }
        let access = match self.args.len() {
            2 => self.keyword(CONSTANT_BUFFER_ACCESS, 1)?,
            _ => 0,
        };
        let mut out = Encoded::default();
        out.push(0);
        self.operand(0, &mut out)?;
        let control = if access != 0 { CONTROL_CB_DYNAMIC_INDEXED } else { 0 };
        self.finish(out, OPCODE_DCL_CONSTANT_BUFFER, control)
    }

    fn sampler(&self) -> Result<Encoded, ParseError> {
        self.arity(2)?;
        let mode = self.keyword(SAMPLER_MODES, 1)?;
        let mut out = Encoded::default();
        out.push(0);
        self.operand(0, &mut out)?;
        self.finish(out, OPCODE_DCL_SAMPLER, mode << CONTROL_SHIFT)
    }

    /// One declaration operand followed by `count` plain values.
    fn operand_then_values(&self, opcode: u32, count: usize) -> Result<Encoded, ParseError> {
        self.arity(1 + count)?;
        let mut out = Encoded::default();
        out.push(0);
        self.operand(0, &mut out)?;
        for token in &self.args[1..] {
            out.push(parse_value(token)?);
        }
        self.finish(out, opcode, 0)
    }

    /// `dcl_output_siv o0.xyzw, position`; `first` skips leading keywords.
    fn system_value(&self, opcode: u32, first: usize, control: u32) -> Result<Encoded, ParseError> {
        arity(self.line, &self.args[first..], 2)?;
        let name = self.keyword(SYSTEM_VALUE_NAMES, first + 1)?;
        let mut out = Encoded::default();
        out.push(0);
        self.operand(first, &mut out)?;
        out.push(name);
        self.finish(out, opcode, control)
    }

    /// `dcl_input_ps linear noperspective v1.xy`, plus the `_sgv`/`_siv` forms.
    fn input_ps(&self, base: &str) -> Result<Encoded, ParseError> {
        let words = self
            .args
            .iter()
            .take_while(|t| INTERPOLATION_WORDS.contains(&t.text))
            .count();
        let mode = match words {
            0 => 0,
            _ => {
                let joined = self.args[..words]
                    .iter()
                    .map(|t| t.text)
                    .collect::<Vec<_>>()
                    .join(" ");
                keyword_value(INTERPOLATION_MODES, &joined)
                    .ok_or_else(|| ParseError::new(self.args[0].text, ParseErrorKind::UnknownKeyword))?
            }
        };
        let control = mode << CONTROL_SHIFT;
        match base {
            "dcl_input_ps_sgv" => self.system_value(OPCODE_DCL_INPUT_PS_SGV, words, control),
            "dcl_input_ps_siv" => self.system_value(OPCODE_DCL_INPUT_PS_SIV, words, control),
            _ => {
                arity(self.line, &self.args[words..], 1)?;
                let mut out = Encoded::default();
                out.push(0);
                self.operand(words, &mut out)?;
                self.finish(out, OPCODE_DCL_INPUT_PS, control)
            }
        }
    }

    /// `dcl_indexableTemp x0[8], 4` encodes as register, size, components.
    fn indexable_temp(&self) -> Result<Encoded, ParseError> {
        self.arity(2)?;
        let token = &self.args[0];
        let malformed = || ParseError::new(token.text, ParseErrorKind::MalformedIndex);
        let (register, size) = token
            .text
            .strip_prefix('x')
            .and_then(|t| t.strip_suffix(']'))
            .and_then(|t| t.split_once('['))
            .ok_or_else(malformed)?;
        let register = register.parse::<u32>().map_err(|_| malformed())?;
        let size = size.trim().parse::<u32>().map_err(|_| malformed())?;
        let components = parse_value(&self.args[1])?;
        let mut out = Encoded::default();
        out.words.extend([0, register, size, components]);
        self.finish(out, OPCODE_DCL_INDEXABLE_TEMP, 0)
    }

    /// `dcl_resource_texture2dms(4) (float,float,float,float) t0`.
    fn typed_resource(&self, parts: &MnemonicParts<'_>) -> Result<Encoded, ParseError> {
        let dim_name = parts.base.trim_start_matches("dcl_resource_");
        let dim = keyword_value(RESOURCE_DIMENSIONS, dim_name)
            .ok_or_else(|| self.error(ParseErrorKind::UnknownMnemonic))?;
        let samples = match parts.groups.as_slice() {
            [] => 0,
            [count] => count
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n < 128)
                .ok_or_else(|| self.error(ParseErrorKind::Malformed("sample count")))?,
            _ => return Err(self.error(ParseErrorKind::UnknownMnemonic)),
        };
        self.arity(2)?;
        let returns = return_type_word(&self.args[0])?;
        let mut out = Encoded::default();
        out.push(0);
        self.operand(1, &mut out)?;
        out.push(returns);
        let control = dim << CONTROL_RESOURCE_DIM_SHIFT | samples << CONTROL_SAMPLE_COUNT_SHIFT;
        self.finish(out, OPCODE_DCL_RESOURCE, control)
    }

    /// `dcl_uav_typed_texture2d_glc (float,float,float,float) u0`, `dcl_uav_raw u0`,
    /// `dcl_uav_structured_opc u0, 16`.
    fn uav(&self, base: &str) -> Result<Encoded, ParseError> {
        let mut kind = base.trim_start_matches("dcl_uav_");
        let mut control = 0;
        loop {
            let (rest, flag) = if let Some(rest) = kind.strip_suffix("_glc") {
                (rest, CONTROL_UAV_GLOBALLY_COHERENT)
            } else if let Some(rest) = kind.strip_suffix("_rov") {
                (rest, CONTROL_UAV_RASTERIZER_ORDERED)
            } else if let Some(rest) = kind.strip_suffix("_opc") {
                (rest, CONTROL_UAV_HAS_ORDER_PRESERVING_COUNTER)
            } else {
                break;
            };
            kind = rest;
            control |= flag;
        }

        let mut out = Encoded::default();
        out.push(0);
        let opcode = match kind {
            "raw" => {
                self.arity(1)?;
                self.operand(0, &mut out)?;
                OPCODE_DCL_UAV_RAW
            }
            "structured" => {
                self.arity(2)?;
                self.operand(0, &mut out)?;
                out.push(parse_value(&self.args[1])?);
                OPCODE_DCL_UAV_STRUCTURED
            }
            _ => {
                let dim = kind
                    .strip_prefix("typed_")
                    .and_then(|d| keyword_value(RESOURCE_DIMENSIONS, d))
                    .ok_or_else(|| self.error(ParseErrorKind::UnknownMnemonic))?;
                self.arity(2)?;
                let returns = return_type_word(&self.args[0])?;
                self.operand(1, &mut out)?;
                out.push(returns);
                control |= dim << CONTROL_RESOURCE_DIM_SHIFT;
                OPCODE_DCL_UAV_TYPED
            }
        };
        self.finish(out, opcode, control)
    }
}

fn arity(line: &str, args: &[Token<'_>], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::new(
            line.trim(),
            ParseErrorKind::OperandCount {
                expected,
                found: args.len(),
            },
        ))
    }
}

fn parse_value(token: &Token<'_>) -> Result<u32, ParseError> {
    let text = token.text;
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse::<u32>().ok(),
    };
    value.ok_or_else(|| ParseError::new(text, ParseErrorKind::InvalidLiteral))
}

/// `(float,float,float,float)` packed four bits per component.
fn return_type_word(token: &Token<'_>) -> Result<u32, ParseError> {
    let err = |kind| ParseError::new(token.text, kind);
    let inner = token
        .text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| err(ParseErrorKind::Malformed("expected a return-type tuple")))?;
    let items: Vec<&str> = inner.split(',').map(str::trim).collect();
    if items.len() != 4 {
        return Err(err(ParseErrorKind::Malformed("expected four return types")));
    }
    items.iter().enumerate().try_fold(0, |word, (i, item)| {
        let ty = keyword_value(RETURN_TYPES, item).ok_or_else(|| err(ParseErrorKind::UnknownKeyword))?;
        Ok(word | ty << (4 * i))
    })
}

fn sync(line: &str, mnemonic: &Token<'_>, args: &[Token<'_>]) -> Result<Encoded, ParseError> {
    arity(line, args, 0)?;
    let flags = mnemonic
        .text
        .trim_start_matches("sync")
        .split('_')
        .filter(|word| !word.is_empty())
        .try_fold(SyncFlags::empty(), |acc, word| {
            SYNC_FLAG_NAMES
                .iter()
                .find(|(name, _)| *name == word)
                .map(|(_, flag)| acc | *flag)
                .ok_or_else(|| ParseError::new(mnemonic.text, ParseErrorKind::UnknownMnemonic))
        })?;
    let mut out = Encoded::default();
    out.push(0);
    finish(&mut out, OPCODE_SYNC, flags.bits(), false, line)?;
    Ok(out)
}

fn customdata_word(class: u32) -> u32 {
    OPCODE_CUSTOMDATA | class << CONTROL_SHIFT
}

/// `dcl_immediateConstantBuffer { { a, b, c, d }, ... }`, one row of four per `{}`.
fn immediate_constant_buffer(line: &str, args: &[Token<'_>]) -> Result<Encoded, ParseError> {
    arity(line, args, 1)?;
    let block = &args[0];
    let err = |kind| ParseError::new(block.text, kind);
    let inner = block
        .text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| err(ParseErrorKind::Unbalanced))?;
    let inner_start = block.start + 1;
    let is_filler = |gap: &str| gap.chars().all(|c| c.is_whitespace() || c == ',');

    let mut out = Encoded::default();
    out.words.extend([customdata_word(CUSTOMDATA_CLASS_ICB), 0]);
    let mut pos = 0;
    while let Some(found) = inner[pos..].find('{') {
        let open = pos + found;
        if !is_filler(&inner[pos..open]) {
            return Err(err(ParseErrorKind::InvalidLiteral));
        }
        let close = inner[open..]
            .find('}')
            .map(|c| open + c)
            .ok_or_else(|| err(ParseErrorKind::Unbalanced))?;
        let group = inner_start + open..inner_start + close + 1;
        let parts = split_components(&inner[open + 1..close], inner_start + open + 1);
        if parts.len() != 4 {
            return Err(err(ParseErrorKind::InvalidLiteral));
        }
        for (text, span) in parts {
            let bits = parse_u32_literal(text).ok_or_else(|| err(ParseErrorKind::InvalidLiteral))?;
            if !is_hex_literal(text) {
                out.push_f32_site(span, group.clone());
            }
            out.push(bits);
        }
        pos = close + 1;
    }
    if pos == 0 || !is_filler(&inner[pos..]) {
        return Err(err(ParseErrorKind::InvalidLiteral));
    }
    out.words[1] = out.words.len() as u32;
    Ok(out)
}

/// `printf "format", operands...` and `errorf`.
fn shader_message(line: &str, id: u32, args: &[Token<'_>]) -> Result<Encoded, ParseError> {
    let Some((format, operands)) = args.split_first() else {
        return Err(ParseError::new(
            line.trim(),
            ParseErrorKind::OperandCount {
                expected: 1,
                found: 0,
            },
        ));
    };
    let text = format
        .text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(|| ParseError::new(format.text, ParseErrorKind::Malformed("expected a quoted format string")))?;
    tracing::debug!(id, "assembling unverified shader message");

    let mut encoded_operands = Encoded::default();
    for operand in operands {
        encode_operand(operand.text, operand.start, false, &mut encoded_operands)?;
    }

    let mut out = Encoded::default();
    out.words.extend([
        customdata_word(CUSTOMDATA_CLASS_SHADER_MESSAGE),
        0,
        id,
        SHADER_MESSAGE_FORMAT_PRINTF,
        text.len() as u32,
        operands.len() as u32,
        encoded_operands.words.len() as u32,
    ]);
    let base = out.words.len();
    out.words.extend(encoded_operands.words);
    out.sites.extend(encoded_operands.sites.into_iter().map(|mut site| {
        site.word += base;
        site
    }));

    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    bytes.resize(bytes.len().next_multiple_of(4), 0);
    out.words.extend(
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])),
    );
    out.words[1] = out.words.len() as u32;
    Ok(out)
}

/// `undecipherable_customdata { 0x..., ... }`: one custom-data block, verbatim.
fn raw_customdata(line: &str, args: &[Token<'_>]) -> Result<Encoded, ParseError> {
    arity(line, args, 1)?;
    let block = &args[0];
    let err = |kind| ParseError::new(block.text, kind);
    let inner = block
        .text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| err(ParseErrorKind::Unbalanced))?;
    let mut out = Encoded::default();
    for (text, _) in split_components(inner, 0) {
        if text.is_empty() {
            continue;
        }
        let token = Token { text, start: 0 };
        out.push(parse_value(&token).map_err(|_| err(ParseErrorKind::InvalidLiteral))?);
    }
    match out.words.as_slice() {
        [op, len, ..] if op & OPCODE_TYPE_MASK == OPCODE_CUSTOMDATA && *len as usize == out.words.len() => Ok(out),
        _ => Err(err(ParseErrorKind::Malformed("not a single custom-data block"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseErrorKind;
    use crate::instruction::encode_statement;
    use pretty_assertions::assert_eq;

    use super::*;

    fn words(line: &str) -> Vec<u32> {
        encode_statement(line).unwrap().words
    }

    fn kind(line: &str) -> ParseErrorKind {
        encode_statement(line).unwrap_err().kind
    }

    #[test]
    fn register_and_count_declarations() {
        assert_eq!(words("dcl_temps 4"), vec![0x0200_0068, 4]);
        assert_eq!(words("dcl_thread_group 8, 8, 1"), vec![0x0400_009b, 8, 8, 1]);
        assert_eq!(words("dcl_indexableTemp x0[8], 4"), vec![0x0400_0069, 0, 8, 4]);
        assert_eq!(words("dcl_maxout 3"), vec![0x0200_005e, 3]);
    }

    #[test]
    fn buffers_and_samplers() {
        assert_eq!(
            words("dcl_constantbuffer cb0[4], immediateIndexed"),
            vec![0x0400_0059, 0x0020_8e46, 0, 4]
        );
        assert_eq!(words("dcl_constantbuffer cb1[2], dynamicIndexed")[0], 0x0400_0859);
        assert_eq!(words("dcl_constantbuffer cb0[4]"), words("dcl_constantbuffer cb0[4], immediateIndexed"));
        assert_eq!(words("dcl_sampler s0, mode_default"), vec![0x0300_005a, 0x0010_6000, 0]);
        assert_eq!(words("dcl_sampler s1, mode_comparison")[0], 0x0300_085a);
    }

    #[test]
    fn typed_resources_pack_dimension_and_return_types() {
        assert_eq!(
            words("dcl_resource_texture2d (float,float,float,float) t0"),
            vec![0x0400_1858, 0x0010_7000, 0, 0x5555]
        );
        assert_eq!(
            words("dcl_resource_texture2dms(4) (uint,uint,uint,uint) t1")[0],
            0x0400_0058 | 4 << 11 | 4 << 16
        );
        assert_eq!(words("dcl_resource_structured t2, 16"), vec![0x0400_00a2, 0x0010_7000, 2, 16]);
        assert_eq!(words("dcl_resource_raw t3"), vec![0x0300_00a1, 0x0010_7000, 3]);
    }

    #[test]
    fn uav_suffixes_and_forms() {
        assert_eq!(
            words("dcl_uav_typed_texture2d_glc (float,float,float,float) u0"),
            vec![0x0401_189c, 0x0011_e000, 0, 0x5555]
        );
        assert_eq!(words("dcl_uav_raw u1"), vec![0x0300_009d, 0x0011_e000, 1]);
        assert_eq!(
            words("dcl_uav_structured_opc u0, 16")[0],
            0x0400_009e | CONTROL_UAV_HAS_ORDER_PRESERVING_COUNTER
        );
        assert_eq!(words("dcl_tgsm_structured g0, 4, 64"), vec![0x0500_00a0, 0x0011_f000, 0, 4, 64]);
        assert_eq!(words("dcl_tgsm_raw g1, 1024"), vec![0x0400_009f, 0x0011_f000, 1, 1024]);
    }

    #[test]
    fn inputs_outputs_and_system_values() {
        assert_eq!(words("dcl_input v0.xyz"), vec![0x0300_005f, 0x0010_1072, 0]);
        assert_eq!(words("dcl_output o0.xyzw"), vec![0x0300_0065, 0x0010_20f2, 0]);
        assert_eq!(
            words("dcl_output_siv o0.xyzw, position"),
            vec![0x0400_0067, 0x0010_20f2, 0, 1]
        );
        assert_eq!(words("dcl_input_sgv v1.x, vertex_id"), vec![0x0400_0060, 0x0010_1012, 1, 6]);
        assert_eq!(words("dcl_input_ps linear v1.xy"), vec![0x0300_1062, 0x0010_1032, 1]);
        assert_eq!(
            words("dcl_input_ps_siv linear noperspective v0.xyzw, position"),
            vec![0x0400_2064, 0x0010_10f2, 0, 1]
        );
        assert_eq!(words("dcl_input_ps_sgv constant v2.x, primitive_id")[0], 0x0400_0863);
        assert_eq!(words("dcl_input vThreadID.xy"), vec![0x0200_005f, 0x0002_0032]);
        assert_eq!(kind("dcl_input_ps centroid linear v1.xy"), ParseErrorKind::UnknownKeyword);
    }

    #[test]
    fn pipeline_state_in_the_control_field() {
        assert_eq!(words("dcl_tessellator_domain domain_tri"), vec![0x0100_1095]);
        assert_eq!(words("dcl_inputprimitive patch3"), vec![0x0100_505d]);
        assert_eq!(words("dcl_inputprimitive triangle"), vec![0x0100_185d]);
        assert_eq!(words("dcl_outputtopology trianglestrip"), vec![0x0100_285c]);
        assert_eq!(words("dcl_output_control_point_count 3"), vec![0x0100_1894]);
        assert_eq!(
            words("dcl_hs_max_tessfactor l(64.000000)"),
            vec![0x0300_0098, 0x0000_4001, 0x4280_0000]
        );
        assert_eq!(kind("dcl_inputprimitive patch33"), ParseErrorKind::UnknownKeyword);
    }

    #[test]
    fn global_flags_accept_separators() {
        assert_eq!(words("dcl_globalFlags refactoringAllowed"), vec![0x0100_086a]);
        let both = words("dcl_globalFlags refactoringAllowed | enableDoublePrecisionFloatOps");
        assert_eq!(both, vec![0x0100_186a]);
        assert_eq!(words("dcl_globalFlags refactoringAllowed|enableDoublePrecisionFloatOps"), both);
        assert_eq!(kind("dcl_globalFlags makeItFast"), ParseErrorKind::UnknownKeyword);

        let flags = GlobalFlags::from_bits_truncate(both[0]);
        assert_eq!(flags.feature_flags(), ShaderFeatureFlags::DOUBLES);
        assert_eq!(
            flags.to_text().as_deref(),
            Some("refactoringAllowed | enableDoublePrecisionFloatOps")
        );
    }

    #[test]
    fn sync_flags_in_any_order() {
        assert_eq!(words("sync_g_t"), vec![0x0100_18be]);
        assert_eq!(words("sync_t_g"), vec![0x0100_18be]);
        assert_eq!(words("sync_uglobal")[0], 0x0100_40be);
        assert_eq!(kind("sync_x"), ParseErrorKind::UnknownMnemonic);
        assert_eq!(
            SyncFlags::from_bits_truncate(0x0100_78be).mnemonic(),
            "sync_uglobal_ugroup_g_t"
        );
    }

    #[test]
    fn immediate_constant_buffer_rows() {
        let line = "dcl_immediateConstantBuffer { { 1.000000, 0, 0, 0},\n  { 0, 1.000000, 0, 0x3f800000} }";
        let encoded = encode_statement(line).unwrap();
        assert_eq!(
            encoded.words,
            vec![0x1835, 10, 0x3f80_0000, 0, 0, 0, 0, 0x3f80_0000, 0, 0x3f80_0000]
        );
        assert_eq!(encoded.sites.len(), 7);
        assert_eq!(encoded.sites[0].word, 2);
        assert_eq!(&line[encoded.sites[0].span.clone()], "1.000000");
        assert_eq!(&line[encoded.sites[5].group.clone()], "{ 0, 1.000000, 0, 0x3f800000}");

        assert_eq!(
            kind("dcl_immediateConstantBuffer { { 1.0, 0, 0 } }"),
            ParseErrorKind::InvalidLiteral
        );
    }

    #[test]
    fn shader_messages_embed_operands_and_padded_string() {
        assert_eq!(
            words(r#"printf "hi %d", r0.x"#),
            vec![
                0x2035,
                11,
                SHADER_MESSAGE_ID_PRINTF,
                1,
                5,
                1,
                2,
                0x0010_000a,
                0,
                u32::from_le_bytes(*b"hi %"),
                u32::from_le_bytes(*b"d\0\0\0")
            ]
        );
        let w = words(r#"errorf "oops""#);
        assert_eq!(&w[..7], &[0x2035, 9, SHADER_MESSAGE_ID_ERRORF, 1, 4, 0, 0]);
        assert_eq!(&w[7..], &[u32::from_le_bytes(*b"oops"), 0]);
    }

    #[test]
    fn raw_custom_data_must_be_one_block() {
        assert_eq!(
            words("undecipherable_customdata { 0x00000035, 3, 0xdeadbeef }"),
            vec![0x35, 3, 0xdead_beef]
        );
        assert!(matches!(
            kind("undecipherable_customdata { 0x00000035, 4, 0xdeadbeef }"),
            ParseErrorKind::Malformed(_)
        ));
        assert!(matches!(
            kind("undecipherable_customdata { 0x00000036, 2 }"),
            ParseErrorKind::Malformed(_)
        ));
    }

    #[test]
    fn declaration_arity_is_exact() {
        assert_eq!(
            kind("dcl_temps 4, 5"),
            ParseErrorKind::OperandCount { expected: 1, found: 2 }
        );
        assert_eq!(
            kind("dcl_sampler s0"),
            ParseErrorKind::OperandCount { expected: 2, found: 1 }
        );
        assert_eq!(kind("dcl_wibble r0"), ParseErrorKind::UnknownMnemonic);
    }
}

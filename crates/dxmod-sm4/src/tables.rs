//! Read-only lookup tables shared by the assembler and the decoder.
//!
//! Everything here is `static` data; nothing is built or mutated at runtime.

use crate::opcode::*;
use crate::token::ComponentCount;

/// Whether an encoding has been checked against compiler output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Verified,
    /// Assembles and decodes consistently but has not been compared with a
    /// compiled shader.
    Unverified,
}

/// Which table an instruction was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrClass {
    Override,
    General,
    /// Accepts `_aoffimmi(u,v,w)` and `_indexable(dim)(types)` groups.
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDef {
    pub name: &'static str,
    pub opcode: u32,
    /// Exact operand count.
    pub operands: u8,
    /// Leading operands encoded as destinations (mask selection).
    pub dsts: u8,
    /// Accepts `_sat`.
    pub sat: bool,
    pub coverage: Coverage,
}

impl InstrDef {
    const fn saturating(self) -> Self {
        Self { sat: true, ..self }
    }
}

const fn op(name: &'static str, opcode: u32, operands: u8, dsts: u8) -> InstrDef {
    InstrDef {
        name,
        opcode,
        operands,
        dsts,
        sat: false,
        coverage: Coverage::Verified,
    }
}

const fn unverified(name: &'static str, opcode: u32, operands: u8, dsts: u8) -> InstrDef {
    InstrDef {
        name,
        opcode,
        operands,
        dsts,
        sat: false,
        coverage: Coverage::Unverified,
    }
}

/// Opcodes that carry a `_z` / `_nz` test.
pub const CONDITIONAL_OPCODES: &[u32] = &[
    OPCODE_IF,
    OPCODE_BREAKC,
    OPCODE_CONTINUEC,
    OPCODE_RETC,
    OPCODE_DISCARD,
    OPCODE_CALLC,
];

/// Spellings older disassemblers produced for the emit-then-cut pair.
pub static OVERRIDES: &[InstrDef] = &[
    unverified("emitthen_cut", OPCODE_EMIT_THEN_CUT, 0, 0),
    unverified("emitthen_cut_stream", OPCODE_EMIT_THEN_CUT_STREAM, 1, 0),
];

pub static INSTRUCTIONS: &[InstrDef] = &[
    op("add", OPCODE_ADD, 3, 1).saturating(),
    op("and", OPCODE_AND, 3, 1),
    op("break", OPCODE_BREAK, 0, 0),
    op("breakc", OPCODE_BREAKC, 1, 0),
    op("call", OPCODE_CALL, 1, 0),
    op("callc", OPCODE_CALLC, 2, 0),
    op("case", OPCODE_CASE, 1, 0),
    op("continue", OPCODE_CONTINUE, 0, 0),
    op("continuec", OPCODE_CONTINUEC, 1, 0),
    op("cut", OPCODE_CUT, 0, 0),
    op("default", OPCODE_DEFAULT, 0, 0),
    op("deriv_rtx", OPCODE_DERIV_RTX, 2, 1).saturating(),
    op("deriv_rty", OPCODE_DERIV_RTY, 2, 1).saturating(),
    op("discard", OPCODE_DISCARD, 1, 0),
    op("div", OPCODE_DIV, 3, 1).saturating(),
    op("dp2", OPCODE_DP2, 3, 1).saturating(),
    op("dp3", OPCODE_DP3, 3, 1).saturating(),
    op("dp4", OPCODE_DP4, 3, 1).saturating(),
    op("else", OPCODE_ELSE, 0, 0),
    op("emit", OPCODE_EMIT, 0, 0),
    op("emit_then_cut", OPCODE_EMIT_THEN_CUT, 0, 0),
    op("endif", OPCODE_ENDIF, 0, 0),
    op("endloop", OPCODE_ENDLOOP, 0, 0),
    op("endswitch", OPCODE_ENDSWITCH, 0, 0),
    op("eq", OPCODE_EQ, 3, 1),
    op("exp", OPCODE_EXP, 2, 1).saturating(),
    op("frc", OPCODE_FRC, 2, 1).saturating(),
    op("ftoi", OPCODE_FTOI, 2, 1),
    op("ftou", OPCODE_FTOU, 2, 1),
    op("ge", OPCODE_GE, 3, 1),
    op("iadd", OPCODE_IADD, 3, 1),
    op("if", OPCODE_IF, 1, 0),
    op("ieq", OPCODE_IEQ, 3, 1),
    op("ige", OPCODE_IGE, 3, 1),
    op("ilt", OPCODE_ILT, 3, 1),
    op("imad", OPCODE_IMAD, 4, 1),
    op("imax", OPCODE_IMAX, 3, 1),
    op("imin", OPCODE_IMIN, 3, 1),
    op("imul", OPCODE_IMUL, 4, 2),
    op("ine", OPCODE_INE, 3, 1),
    op("ineg", OPCODE_INEG, 2, 1),
    op("ishl", OPCODE_ISHL, 3, 1),
    op("ishr", OPCODE_ISHR, 3, 1),
    op("itof", OPCODE_ITOF, 2, 1).saturating(),
    op("label", OPCODE_LABEL, 1, 0),
    op("log", OPCODE_LOG, 2, 1).saturating(),
    op("loop", OPCODE_LOOP, 0, 0),
    op("lt", OPCODE_LT, 3, 1),
    op("mad", OPCODE_MAD, 4, 1).saturating(),
    op("min", OPCODE_MIN, 3, 1).saturating(),
    op("max", OPCODE_MAX, 3, 1).saturating(),
    op("mov", OPCODE_MOV, 2, 1).saturating(),
    op("movc", OPCODE_MOVC, 4, 1).saturating(),
    op("mul", OPCODE_MUL, 3, 1).saturating(),
    op("ne", OPCODE_NE, 3, 1),
    op("nop", OPCODE_NOP, 0, 0),
    op("not", OPCODE_NOT, 2, 1),
    op("or", OPCODE_OR, 3, 1),
    op("ret", OPCODE_RET, 0, 0),
    op("retc", OPCODE_RETC, 1, 0),
    op("round_ne", OPCODE_ROUND_NE, 2, 1).saturating(),
    op("round_ni", OPCODE_ROUND_NI, 2, 1).saturating(),
    op("round_pi", OPCODE_ROUND_PI, 2, 1).saturating(),
    op("round_z", OPCODE_ROUND_Z, 2, 1).saturating(),
    op("rsq", OPCODE_RSQ, 2, 1).saturating(),
    op("sqrt", OPCODE_SQRT, 2, 1).saturating(),
    op("switch", OPCODE_SWITCH, 1, 0),
    op("sincos", OPCODE_SINCOS, 3, 2).saturating(),
    op("udiv", OPCODE_UDIV, 4, 2),
    op("ult", OPCODE_ULT, 3, 1),
    op("uge", OPCODE_UGE, 3, 1),
    op("umul", OPCODE_UMUL, 4, 2),
    op("umad", OPCODE_UMAD, 4, 1),
    op("umax", OPCODE_UMAX, 3, 1),
    op("umin", OPCODE_UMIN, 3, 1),
    op("ushr", OPCODE_USHR, 3, 1),
    op("utof", OPCODE_UTOF, 2, 1).saturating(),
    op("xor", OPCODE_XOR, 3, 1),
    op("hs_decls", OPCODE_HS_DECLS, 0, 0),
    op("hs_control_point_phase", OPCODE_HS_CONTROL_POINT_PHASE, 0, 0),
    op("hs_fork_phase", OPCODE_HS_FORK_PHASE, 0, 0),
    op("hs_join_phase", OPCODE_HS_JOIN_PHASE, 0, 0),
    op("emit_stream", OPCODE_EMIT_STREAM, 1, 0),
    op("cut_stream", OPCODE_CUT_STREAM, 1, 0),
    op("emit_then_cut_stream", OPCODE_EMIT_THEN_CUT_STREAM, 1, 0),
    op("deriv_rtx_coarse", OPCODE_DERIV_RTX_COARSE, 2, 1).saturating(),
    op("deriv_rtx_fine", OPCODE_DERIV_RTX_FINE, 2, 1).saturating(),
    op("deriv_rty_coarse", OPCODE_DERIV_RTY_COARSE, 2, 1).saturating(),
    op("deriv_rty_fine", OPCODE_DERIV_RTY_FINE, 2, 1).saturating(),
    op("rcp", OPCODE_RCP, 2, 1).saturating(),
    op("f32tof16", OPCODE_F32TOF16, 2, 1),
    op("f16tof32", OPCODE_F16TOF32, 2, 1).saturating(),
    op("uaddc", OPCODE_UADDC, 4, 2),
    op("usubb", OPCODE_USUBB, 4, 2),
    op("countbits", OPCODE_COUNTBITS, 2, 1),
    op("firstbit_hi", OPCODE_FIRSTBIT_HI, 2, 1),
    op("firstbit_lo", OPCODE_FIRSTBIT_LO, 2, 1),
    op("firstbit_shi", OPCODE_FIRSTBIT_SHI, 2, 1),
    op("ubfe", OPCODE_UBFE, 4, 1),
    op("ibfe", OPCODE_IBFE, 4, 1),
    op("bfi", OPCODE_BFI, 5, 1),
    op("bfrev", OPCODE_BFREV, 2, 1),
    op("swapc", OPCODE_SWAPC, 5, 2),
    op("store_raw", OPCODE_STORE_RAW, 3, 1),
    op("store_structured", OPCODE_STORE_STRUCTURED, 4, 1),
    unverified("store_uav_typed", OPCODE_STORE_UAV_TYPED, 3, 1),
    unverified("atomic_and", OPCODE_ATOMIC_AND, 3, 1),
    unverified("atomic_or", OPCODE_ATOMIC_OR, 3, 1),
    unverified("atomic_xor", OPCODE_ATOMIC_XOR, 3, 1),
    unverified("atomic_cmp_store", OPCODE_ATOMIC_CMP_STORE, 4, 1),
    unverified("atomic_iadd", OPCODE_ATOMIC_IADD, 3, 1),
    unverified("atomic_imax", OPCODE_ATOMIC_IMAX, 3, 1),
    unverified("atomic_imin", OPCODE_ATOMIC_IMIN, 3, 1),
    unverified("atomic_umax", OPCODE_ATOMIC_UMAX, 3, 1),
    unverified("atomic_umin", OPCODE_ATOMIC_UMIN, 3, 1),
    unverified("imm_atomic_alloc", OPCODE_IMM_ATOMIC_ALLOC, 2, 1),
    unverified("imm_atomic_consume", OPCODE_IMM_ATOMIC_CONSUME, 2, 1),
    unverified("imm_atomic_iadd", OPCODE_IMM_ATOMIC_IADD, 4, 2),
    unverified("imm_atomic_and", OPCODE_IMM_ATOMIC_AND, 4, 2),
    unverified("imm_atomic_or", OPCODE_IMM_ATOMIC_OR, 4, 2),
    unverified("imm_atomic_xor", OPCODE_IMM_ATOMIC_XOR, 4, 2),
    unverified("imm_atomic_exch", OPCODE_IMM_ATOMIC_EXCH, 4, 2),
    unverified("imm_atomic_cmp_exch", OPCODE_IMM_ATOMIC_CMP_EXCH, 5, 2),
    unverified("imm_atomic_imax", OPCODE_IMM_ATOMIC_IMAX, 4, 2),
    unverified("imm_atomic_imin", OPCODE_IMM_ATOMIC_IMIN, 4, 2),
    unverified("imm_atomic_umax", OPCODE_IMM_ATOMIC_UMAX, 4, 2),
    unverified("imm_atomic_umin", OPCODE_IMM_ATOMIC_UMIN, 4, 2),
    op("dadd", OPCODE_DADD, 3, 1).saturating(),
    op("dmax", OPCODE_DMAX, 3, 1).saturating(),
    op("dmin", OPCODE_DMIN, 3, 1).saturating(),
    op("dmul", OPCODE_DMUL, 3, 1).saturating(),
    op("deq", OPCODE_DEQ, 3, 1),
    op("dge", OPCODE_DGE, 3, 1),
    op("dlt", OPCODE_DLT, 3, 1),
    op("dne", OPCODE_DNE, 3, 1),
    op("dmov", OPCODE_DMOV, 2, 1).saturating(),
    op("dmovc", OPCODE_DMOVC, 4, 1).saturating(),
    op("dtof", OPCODE_DTOF, 2, 1).saturating(),
    op("ftod", OPCODE_FTOD, 2, 1),
    unverified("eval_snapped", OPCODE_EVAL_SNAPPED, 3, 1).saturating(),
    unverified("eval_sample_index", OPCODE_EVAL_SAMPLE_INDEX, 3, 1).saturating(),
    unverified("eval_centroid", OPCODE_EVAL_CENTROID, 2, 1).saturating(),
    unverified("abort", OPCODE_ABORT, 0, 0),
    unverified("debug_break", OPCODE_DEBUG_BREAK, 0, 0),
    unverified("ddiv", OPCODE_DDIV, 3, 1).saturating(),
    unverified("dfma", OPCODE_DFMA, 4, 1).saturating(),
    unverified("drcp", OPCODE_DRCP, 2, 1).saturating(),
    unverified("msad", OPCODE_MSAD, 4, 1),
    unverified("dtoi", OPCODE_DTOI, 2, 1),
    unverified("dtou", OPCODE_DTOU, 2, 1),
    unverified("itod", OPCODE_ITOD, 2, 1),
    unverified("utod", OPCODE_UTOD, 2, 1),
];

pub static LOAD_CLASS: &[InstrDef] = &[
    op("ld", OPCODE_LD, 3, 1),
    op("ld_ms", OPCODE_LD_MS, 4, 1),
    op("resinfo", OPCODE_RESINFO, 3, 1),
    op("sample", OPCODE_SAMPLE, 4, 1),
    op("sample_c", OPCODE_SAMPLE_C, 5, 1),
    op("sample_c_lz", OPCODE_SAMPLE_C_LZ, 5, 1),
    op("sample_l", OPCODE_SAMPLE_L, 5, 1),
    op("sample_d", OPCODE_SAMPLE_D, 6, 1),
    op("sample_b", OPCODE_SAMPLE_B, 5, 1),
    op("lod", OPCODE_LOD, 4, 1),
    op("gather4", OPCODE_GATHER4, 4, 1),
    unverified("sample_pos", OPCODE_SAMPLE_POS, 3, 1),
    op("sample_info", OPCODE_SAMPLE_INFO, 2, 1),
    op("bufinfo", OPCODE_BUFINFO, 2, 1),
    op("gather4_c", OPCODE_GATHER4_C, 5, 1),
    op("gather4_po", OPCODE_GATHER4_PO, 5, 1),
    op("gather4_po_c", OPCODE_GATHER4_PO_C, 6, 1),
    unverified("ld_uav_typed", OPCODE_LD_UAV_TYPED, 3, 1),
    op("ld_raw", OPCODE_LD_RAW, 3, 1),
    op("ld_structured", OPCODE_LD_STRUCTURED, 4, 1),
];

/// Looks `name` up in the override, general and load-class tables, in that order.
pub fn lookup_instruction(name: &str) -> Option<(InstrDef, InstrClass)> {
    let find = |table: &'static [InstrDef]| table.iter().find(|def| def.name == name).copied();
    find(OVERRIDES)
        .map(|def| (def, InstrClass::Override))
        .or_else(|| find(INSTRUCTIONS).map(|def| (def, InstrClass::General)))
        .or_else(|| find(LOAD_CLASS).map(|def| (def, InstrClass::Load)))
}

/// Reverse lookup used by the decoder; overrides are never produced.
pub fn instruction_by_opcode(opcode: u32) -> Option<(InstrDef, InstrClass)> {
    INSTRUCTIONS
        .iter()
        .find(|def| def.opcode == opcode)
        .map(|def| (*def, InstrClass::General))
        .or_else(|| {
            LOAD_CLASS
                .iter()
                .find(|def| def.opcode == opcode)
                .map(|def| (*def, InstrClass::Load))
        })
}

/// Mnemonics handled outside the tables whose encodings are unverified.
const UNVERIFIED_SPECIAL: &[&str] = &["printf", "errorf"];

/// True when `mnemonic` (suffixes allowed) names an unverified encoding.
pub fn is_unverified(mnemonic: &str) -> bool {
    let base = mnemonic
        .split(|c: char| c == '(' || c == '[')
        .next()
        .unwrap_or(mnemonic);
    if UNVERIFIED_SPECIAL.contains(&base) {
        return true;
    }
    let mut name = base;
    loop {
        if let Some((def, _)) = lookup_instruction(name) {
            return def.coverage == Coverage::Unverified;
        }
        match name.rfind('_') {
            Some(pos) => name = &name[..pos],
            None => return false,
        }
    }
}

/// A fixed, un-indexed register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialRegister {
    pub name: &'static str,
    pub ty: u32,
    /// Component count used when the operand carries no selection suffix.
    pub components: ComponentCount,
}

const fn special(name: &'static str, ty: u32, components: ComponentCount) -> SpecialRegister {
    SpecialRegister {
        name,
        ty,
        components,
    }
}

pub static SPECIAL_REGISTERS: &[SpecialRegister] = &[
    special("oDepth", OPERAND_TYPE_OUTPUT_DEPTH, ComponentCount::One),
    special("oDepthGE", OPERAND_TYPE_OUTPUT_DEPTH_GREATER_EQUAL, ComponentCount::One),
    special("oDepthLE", OPERAND_TYPE_OUTPUT_DEPTH_LESS_EQUAL, ComponentCount::One),
    special("oMask", OPERAND_TYPE_OUTPUT_COVERAGE_MASK, ComponentCount::One),
    special("oStencilRef", OPERAND_TYPE_OUTPUT_STENCIL_REF, ComponentCount::One),
    special("null", OPERAND_TYPE_NULL, ComponentCount::Zero),
    special("rasterizer", OPERAND_TYPE_RASTERIZER, ComponentCount::Zero),
    special("vPrim", OPERAND_TYPE_INPUT_PRIMITIVEID, ComponentCount::One),
    special("vCoverage", OPERAND_TYPE_INPUT_COVERAGE_MASK, ComponentCount::One),
    special("vInnerCoverage", OPERAND_TYPE_INNER_COVERAGE, ComponentCount::One),
    special("vThreadID", OPERAND_TYPE_INPUT_THREAD_ID, ComponentCount::Zero),
    special("vThreadGroupID", OPERAND_TYPE_INPUT_THREAD_GROUP_ID, ComponentCount::Zero),
    special("vThreadIDInGroup", OPERAND_TYPE_INPUT_THREAD_ID_IN_GROUP, ComponentCount::Zero),
    special(
        "vThreadIDInGroupFlattened",
        OPERAND_TYPE_INPUT_THREAD_ID_IN_GROUP_FLATTENED,
        ComponentCount::One,
    ),
    special("vGSInstanceID", OPERAND_TYPE_INPUT_GS_INSTANCE_ID, ComponentCount::One),
    special("vOutputControlPointID", OPERAND_TYPE_OUTPUT_CONTROL_POINT_ID, ComponentCount::One),
    special("vForkInstanceID", OPERAND_TYPE_INPUT_FORK_INSTANCE_ID, ComponentCount::One),
    special("vJoinInstanceID", OPERAND_TYPE_INPUT_JOIN_INSTANCE_ID, ComponentCount::One),
    special("vDomain", OPERAND_TYPE_INPUT_DOMAIN_POINT, ComponentCount::Zero),
    special("vCycleCounter", OPERAND_TYPE_CYCLE_COUNTER, ComponentCount::Zero),
];

pub fn special_register(name: &str) -> Option<&'static SpecialRegister> {
    SPECIAL_REGISTERS.iter().find(|reg| reg.name == name)
}

pub fn special_register_by_type(ty: u32) -> Option<&'static SpecialRegister> {
    SPECIAL_REGISTERS.iter().find(|reg| reg.ty == ty)
}

/// Keyword ⇄ value table.
pub type Keywords = &'static [(&'static str, u32)];

pub fn keyword_value(table: Keywords, name: &str) -> Option<u32> {
    table.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
}

pub fn keyword_name(table: Keywords, value: u32) -> Option<&'static str> {
    table.iter().find(|(_, v)| *v == value).map(|(k, _)| *k)
}

pub static RESOURCE_DIMENSIONS: Keywords = &[
    ("unknown", RESOURCE_DIMENSION_UNKNOWN),
    ("buffer", RESOURCE_DIMENSION_BUFFER),
    ("texture1d", RESOURCE_DIMENSION_TEXTURE1D),
    ("texture2d", RESOURCE_DIMENSION_TEXTURE2D),
    ("texture2dms", RESOURCE_DIMENSION_TEXTURE2DMS),
    ("texture3d", RESOURCE_DIMENSION_TEXTURE3D),
    ("texturecube", RESOURCE_DIMENSION_TEXTURECUBE),
    ("texture1darray", RESOURCE_DIMENSION_TEXTURE1DARRAY),
    ("texture2darray", RESOURCE_DIMENSION_TEXTURE2DARRAY),
    ("texture2dmsarray", RESOURCE_DIMENSION_TEXTURE2DMSARRAY),
    ("texturecubearray", RESOURCE_DIMENSION_TEXTURECUBEARRAY),
    ("raw_buffer", RESOURCE_DIMENSION_RAW_BUFFER),
    ("structured_buffer", RESOURCE_DIMENSION_STRUCTURED_BUFFER),
];

pub static RETURN_TYPES: Keywords = &[
    ("unorm", 1),
    ("snorm", 2),
    ("sint", 3),
    ("uint", 4),
    ("float", 5),
    ("mixed", 6),
    ("double", 7),
    ("continued", 8),
    ("unused", 9),
];

/// System-value names used by `dcl_*_siv` / `dcl_*_sgv`.
pub static SYSTEM_VALUE_NAMES: Keywords = &[
    ("undefined", 0),
    ("position", 1),
    ("clip_distance", 2),
    ("cull_distance", 3),
    ("rendertarget_array_index", 4),
    ("viewport_array_index", 5),
    ("vertex_id", 6),
    ("primitive_id", 7),
    ("instance_id", 8),
    ("is_front_face", 9),
    ("sampleIndex", 10),
    ("finalQuadUeq0EdgeTessFactor", 11),
    ("finalQuadVeq0EdgeTessFactor", 12),
    ("finalQuadUeq1EdgeTessFactor", 13),
    ("finalQuadVeq1EdgeTessFactor", 14),
    ("finalQuadUInsideTessFactor", 15),
    ("finalQuadVInsideTessFactor", 16),
    ("finalTriUeq0EdgeTessFactor", 17),
    ("finalTriVeq0EdgeTessFactor", 18),
    ("finalTriWeq0EdgeTessFactor", 19),
    ("finalTriInsideTessFactor", 20),
    ("finalLineDetailTessFactor", 21),
    ("finalLineDensityTessFactor", 22),
];

/// Pixel-shader input interpolation modes, keyed by their space-joined words.
pub static INTERPOLATION_MODES: Keywords = &[
    ("constant", 1),
    ("linear", 2),
    ("linear centroid", 3),
    ("linear noperspective", 4),
    ("linear noperspective centroid", 5),
    ("linear sample", 6),
    ("linear noperspective sample", 7),
];

pub static OUTPUT_TOPOLOGIES: Keywords = &[
    ("pointlist", 1),
    ("linelist", 2),
    ("linestrip", 3),
    ("trianglelist", 4),
    ("trianglestrip", 5),
    ("linelist_adj", 10),
    ("linestrip_adj", 11),
    ("trianglelist_adj", 12),
    ("trianglestrip_adj", 13),
];

pub static INPUT_PRIMITIVES: Keywords = &[
    ("point", 1),
    ("line", 2),
    ("triangle", 3),
    ("lineadj", 6),
    ("triangleadj", 7),
];

/// `patchN` input primitives encode as `7 + N`.
pub const INPUT_PRIMITIVE_PATCH_BASE: u32 = 7;

pub static TESS_DOMAINS: Keywords = &[
    ("domain_isoline", 1),
    ("domain_tri", 2),
    ("domain_quad", 3),
];

pub static TESS_PARTITIONINGS: Keywords = &[
    ("partitioning_integer", 1),
    ("partitioning_pow2", 2),
    ("partitioning_fractional_odd", 3),
    ("partitioning_fractional_even", 4),
];

pub static TESS_OUTPUT_PRIMITIVES: Keywords = &[
    ("output_point", 1),
    ("output_line", 2),
    ("output_triangle_cw", 3),
    ("output_triangle_ccw", 4),
];

pub static SAMPLER_MODES: Keywords = &[
    ("mode_default", 0),
    ("mode_comparison", 1),
    ("mode_mono", 2),
];

pub static CONSTANT_BUFFER_ACCESS: Keywords = &[("immediateIndexed", 0), ("dynamicIndexed", 1)];

/// Minimum-precision tags accepted inside `{...}` operand suffixes.
pub static MIN_PRECISIONS: Keywords = &[
    ("def32", MIN_PRECISION_DEFAULT),
    ("min16f", MIN_PRECISION_FLOAT_16),
    ("min2_8f", MIN_PRECISION_FLOAT_2_8),
    ("min16i", MIN_PRECISION_SINT_16),
    ("min16u", MIN_PRECISION_UINT_16),
];

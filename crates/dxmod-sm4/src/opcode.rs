//! SM4/SM5 opcode, operand-type and control-field numeric constants.
//!
//! Canonical IDs from `d3d10tokenizedprogramformat.hpp` / `d3d11tokenizedprogramformat.hpp`.

// ---- Opcodes ----

pub const OPCODE_ADD: u32 = 0;
pub const OPCODE_AND: u32 = 1;
pub const OPCODE_BREAK: u32 = 2;
pub const OPCODE_BREAKC: u32 = 3;
pub const OPCODE_CALL: u32 = 4;
pub const OPCODE_CALLC: u32 = 5;
pub const OPCODE_CASE: u32 = 6;
pub const OPCODE_CONTINUE: u32 = 7;
pub const OPCODE_CONTINUEC: u32 = 8;
pub const OPCODE_CUT: u32 = 9;
pub const OPCODE_DEFAULT: u32 = 10;
pub const OPCODE_DERIV_RTX: u32 = 11;
pub const OPCODE_DERIV_RTY: u32 = 12;
pub const OPCODE_DISCARD: u32 = 13;
pub const OPCODE_DIV: u32 = 14;
pub const OPCODE_DP2: u32 = 15;
pub const OPCODE_DP3: u32 = 16;
pub const OPCODE_DP4: u32 = 17;
pub const OPCODE_ELSE: u32 = 18;
pub const OPCODE_EMIT: u32 = 19;
pub const OPCODE_EMIT_THEN_CUT: u32 = 20;
pub const OPCODE_ENDIF: u32 = 21;
pub const OPCODE_ENDLOOP: u32 = 22;
pub const OPCODE_ENDSWITCH: u32 = 23;
pub const OPCODE_EQ: u32 = 24;
pub const OPCODE_EXP: u32 = 25;
pub const OPCODE_FRC: u32 = 26;
pub const OPCODE_FTOI: u32 = 27;
pub const OPCODE_FTOU: u32 = 28;
pub const OPCODE_GE: u32 = 29;
pub const OPCODE_IADD: u32 = 30;
pub const OPCODE_IF: u32 = 31;
pub const OPCODE_IEQ: u32 = 32;
pub const OPCODE_IGE: u32 = 33;
pub const OPCODE_ILT: u32 = 34;
pub const OPCODE_IMAD: u32 = 35;
pub const OPCODE_IMAX: u32 = 36;
pub const OPCODE_IMIN: u32 = 37;
pub const OPCODE_IMUL: u32 = 38;
pub const OPCODE_INE: u32 = 39;
pub const OPCODE_INEG: u32 = 40;
pub const OPCODE_ISHL: u32 = 41;
pub const OPCODE_ISHR: u32 = 42;
pub const OPCODE_ITOF: u32 = 43;
pub const OPCODE_LABEL: u32 = 44;
pub const OPCODE_LD: u32 = 45;
pub const OPCODE_LD_MS: u32 = 46;
pub const OPCODE_LOG: u32 = 47;
pub const OPCODE_LOOP: u32 = 48;
pub const OPCODE_LT: u32 = 49;
pub const OPCODE_MAD: u32 = 50;
pub const OPCODE_MIN: u32 = 51;
pub const OPCODE_MAX: u32 = 52;
/// Non-executable custom data block; its length lives in the second word.
pub const OPCODE_CUSTOMDATA: u32 = 53;
pub const OPCODE_MOV: u32 = 54;
pub const OPCODE_MOVC: u32 = 55;
pub const OPCODE_MUL: u32 = 56;
pub const OPCODE_NE: u32 = 57;
pub const OPCODE_NOP: u32 = 58;
pub const OPCODE_NOT: u32 = 59;
pub const OPCODE_OR: u32 = 60;
pub const OPCODE_RESINFO: u32 = 61;
pub const OPCODE_RET: u32 = 62;
pub const OPCODE_RETC: u32 = 63;
pub const OPCODE_ROUND_NE: u32 = 64;
pub const OPCODE_ROUND_NI: u32 = 65;
pub const OPCODE_ROUND_PI: u32 = 66;
pub const OPCODE_ROUND_Z: u32 = 67;
pub const OPCODE_RSQ: u32 = 68;
pub const OPCODE_SAMPLE: u32 = 69;
pub const OPCODE_SAMPLE_C: u32 = 70;
pub const OPCODE_SAMPLE_C_LZ: u32 = 71;
pub const OPCODE_SAMPLE_L: u32 = 72;
pub const OPCODE_SAMPLE_D: u32 = 73;
pub const OPCODE_SAMPLE_B: u32 = 74;
pub const OPCODE_SQRT: u32 = 75;
pub const OPCODE_SWITCH: u32 = 76;
pub const OPCODE_SINCOS: u32 = 77;
pub const OPCODE_UDIV: u32 = 78;
pub const OPCODE_ULT: u32 = 79;
pub const OPCODE_UGE: u32 = 80;
pub const OPCODE_UMUL: u32 = 81;
pub const OPCODE_UMAD: u32 = 82;
pub const OPCODE_UMAX: u32 = 83;
pub const OPCODE_UMIN: u32 = 84;
pub const OPCODE_USHR: u32 = 85;
pub const OPCODE_UTOF: u32 = 86;
pub const OPCODE_XOR: u32 = 87;
pub const OPCODE_DCL_RESOURCE: u32 = 88;
pub const OPCODE_DCL_CONSTANT_BUFFER: u32 = 89;
pub const OPCODE_DCL_SAMPLER: u32 = 90;
pub const OPCODE_DCL_INDEX_RANGE: u32 = 91;
pub const OPCODE_DCL_GS_OUTPUT_TOPOLOGY: u32 = 92;
pub const OPCODE_DCL_GS_INPUT_PRIMITIVE: u32 = 93;
pub const OPCODE_DCL_MAX_OUTPUT_VERTEX_COUNT: u32 = 94;
pub const OPCODE_DCL_INPUT: u32 = 95;
pub const OPCODE_DCL_INPUT_SGV: u32 = 96;
pub const OPCODE_DCL_INPUT_SIV: u32 = 97;
pub const OPCODE_DCL_INPUT_PS: u32 = 98;
pub const OPCODE_DCL_INPUT_PS_SGV: u32 = 99;
pub const OPCODE_DCL_INPUT_PS_SIV: u32 = 100;
pub const OPCODE_DCL_OUTPUT: u32 = 101;
pub const OPCODE_DCL_OUTPUT_SGV: u32 = 102;
pub const OPCODE_DCL_OUTPUT_SIV: u32 = 103;
pub const OPCODE_DCL_TEMPS: u32 = 104;
pub const OPCODE_DCL_INDEXABLE_TEMP: u32 = 105;
pub const OPCODE_DCL_GLOBAL_FLAGS: u32 = 106;
pub const OPCODE_LOD: u32 = 108;
pub const OPCODE_GATHER4: u32 = 109;
pub const OPCODE_SAMPLE_POS: u32 = 110;
pub const OPCODE_SAMPLE_INFO: u32 = 111;
pub const OPCODE_HS_DECLS: u32 = 113;
pub const OPCODE_HS_CONTROL_POINT_PHASE: u32 = 114;
pub const OPCODE_HS_FORK_PHASE: u32 = 115;
pub const OPCODE_HS_JOIN_PHASE: u32 = 116;
pub const OPCODE_EMIT_STREAM: u32 = 117;
pub const OPCODE_CUT_STREAM: u32 = 118;
pub const OPCODE_EMIT_THEN_CUT_STREAM: u32 = 119;
pub const OPCODE_BUFINFO: u32 = 121;
pub const OPCODE_DERIV_RTX_COARSE: u32 = 122;
pub const OPCODE_DERIV_RTX_FINE: u32 = 123;
pub const OPCODE_DERIV_RTY_COARSE: u32 = 124;
pub const OPCODE_DERIV_RTY_FINE: u32 = 125;
pub const OPCODE_GATHER4_C: u32 = 126;
pub const OPCODE_GATHER4_PO: u32 = 127;
pub const OPCODE_GATHER4_PO_C: u32 = 128;
pub const OPCODE_RCP: u32 = 129;
pub const OPCODE_F32TOF16: u32 = 130;
pub const OPCODE_F16TOF32: u32 = 131;
pub const OPCODE_UADDC: u32 = 132;
pub const OPCODE_USUBB: u32 = 133;
pub const OPCODE_COUNTBITS: u32 = 134;
pub const OPCODE_FIRSTBIT_HI: u32 = 135;
pub const OPCODE_FIRSTBIT_LO: u32 = 136;
pub const OPCODE_FIRSTBIT_SHI: u32 = 137;
pub const OPCODE_UBFE: u32 = 138;
pub const OPCODE_IBFE: u32 = 139;
pub const OPCODE_BFI: u32 = 140;
pub const OPCODE_BFREV: u32 = 141;
pub const OPCODE_SWAPC: u32 = 142;
pub const OPCODE_DCL_STREAM: u32 = 143;
pub const OPCODE_DCL_INPUT_CONTROL_POINT_COUNT: u32 = 147;
pub const OPCODE_DCL_OUTPUT_CONTROL_POINT_COUNT: u32 = 148;
pub const OPCODE_DCL_TESS_DOMAIN: u32 = 149;
pub const OPCODE_DCL_TESS_PARTITIONING: u32 = 150;
pub const OPCODE_DCL_TESS_OUTPUT_PRIMITIVE: u32 = 151;
pub const OPCODE_DCL_HS_MAX_TESSFACTOR: u32 = 152;
pub const OPCODE_DCL_HS_FORK_PHASE_INSTANCE_COUNT: u32 = 153;
pub const OPCODE_DCL_HS_JOIN_PHASE_INSTANCE_COUNT: u32 = 154;
pub const OPCODE_DCL_THREAD_GROUP: u32 = 155;
pub const OPCODE_DCL_UAV_TYPED: u32 = 156;
pub const OPCODE_DCL_UAV_RAW: u32 = 157;
pub const OPCODE_DCL_UAV_STRUCTURED: u32 = 158;
pub const OPCODE_DCL_TGSM_RAW: u32 = 159;
pub const OPCODE_DCL_TGSM_STRUCTURED: u32 = 160;
pub const OPCODE_DCL_RESOURCE_RAW: u32 = 161;
pub const OPCODE_DCL_RESOURCE_STRUCTURED: u32 = 162;
pub const OPCODE_LD_UAV_TYPED: u32 = 163;
pub const OPCODE_STORE_UAV_TYPED: u32 = 164;
pub const OPCODE_LD_RAW: u32 = 165;
pub const OPCODE_STORE_RAW: u32 = 166;
pub const OPCODE_LD_STRUCTURED: u32 = 167;
pub const OPCODE_STORE_STRUCTURED: u32 = 168;
pub const OPCODE_ATOMIC_AND: u32 = 169;
pub const OPCODE_ATOMIC_OR: u32 = 170;
pub const OPCODE_ATOMIC_XOR: u32 = 171;
pub const OPCODE_ATOMIC_CMP_STORE: u32 = 172;
pub const OPCODE_ATOMIC_IADD: u32 = 173;
pub const OPCODE_ATOMIC_IMAX: u32 = 174;
pub const OPCODE_ATOMIC_IMIN: u32 = 175;
pub const OPCODE_ATOMIC_UMAX: u32 = 176;
pub const OPCODE_ATOMIC_UMIN: u32 = 177;
pub const OPCODE_IMM_ATOMIC_ALLOC: u32 = 178;
pub const OPCODE_IMM_ATOMIC_CONSUME: u32 = 179;
pub const OPCODE_IMM_ATOMIC_IADD: u32 = 180;
pub const OPCODE_IMM_ATOMIC_AND: u32 = 181;
pub const OPCODE_IMM_ATOMIC_OR: u32 = 182;
pub const OPCODE_IMM_ATOMIC_XOR: u32 = 183;
pub const OPCODE_IMM_ATOMIC_EXCH: u32 = 184;
pub const OPCODE_IMM_ATOMIC_CMP_EXCH: u32 = 185;
pub const OPCODE_IMM_ATOMIC_IMAX: u32 = 186;
pub const OPCODE_IMM_ATOMIC_IMIN: u32 = 187;
pub const OPCODE_IMM_ATOMIC_UMAX: u32 = 188;
pub const OPCODE_IMM_ATOMIC_UMIN: u32 = 189;
pub const OPCODE_SYNC: u32 = 190;
pub const OPCODE_DADD: u32 = 191;
pub const OPCODE_DMAX: u32 = 192;
pub const OPCODE_DMIN: u32 = 193;
pub const OPCODE_DMUL: u32 = 194;
pub const OPCODE_DEQ: u32 = 195;
pub const OPCODE_DGE: u32 = 196;
pub const OPCODE_DLT: u32 = 197;
pub const OPCODE_DNE: u32 = 198;
pub const OPCODE_DMOV: u32 = 199;
pub const OPCODE_DMOVC: u32 = 200;
pub const OPCODE_DTOF: u32 = 201;
pub const OPCODE_FTOD: u32 = 202;
pub const OPCODE_EVAL_SNAPPED: u32 = 203;
pub const OPCODE_EVAL_SAMPLE_INDEX: u32 = 204;
pub const OPCODE_EVAL_CENTROID: u32 = 205;
pub const OPCODE_DCL_GS_INSTANCE_COUNT: u32 = 206;
pub const OPCODE_ABORT: u32 = 207;
pub const OPCODE_DEBUG_BREAK: u32 = 208;
pub const OPCODE_DDIV: u32 = 210;
pub const OPCODE_DFMA: u32 = 211;
pub const OPCODE_DRCP: u32 = 212;
pub const OPCODE_MSAD: u32 = 213;
pub const OPCODE_DTOI: u32 = 214;
pub const OPCODE_DTOU: u32 = 215;
pub const OPCODE_ITOD: u32 = 216;
pub const OPCODE_UTOD: u32 = 217;

// ---- Control-field bits (already shifted into the opcode word) ----

pub const CONTROL_SATURATE: u32 = 1 << 13;
/// Set for `_nz`, clear for `_z`.
pub const CONTROL_TEST_NONZERO: u32 = 1 << 18;
pub const CONTROL_PRECISE_SHIFT: u32 = 19;
pub const CONTROL_RESINFO_RCPFLOAT: u32 = 1 << 11;
pub const CONTROL_RESINFO_UINT: u32 = 2 << 11;
pub const CONTROL_SAMPLE_INFO_UINT: u32 = 1 << 11;
pub const CONTROL_CB_DYNAMIC_INDEXED: u32 = 1 << 11;
pub const CONTROL_UAV_GLOBALLY_COHERENT: u32 = 1 << 16;
pub const CONTROL_UAV_RASTERIZER_ORDERED: u32 = 1 << 17;
pub const CONTROL_UAV_HAS_ORDER_PRESERVING_COUNTER: u32 = 1 << 23;
pub const CONTROL_RESOURCE_DIM_SHIFT: u32 = 11;
pub const CONTROL_SAMPLE_COUNT_SHIFT: u32 = 16;
pub const CONTROL_SHIFT: u32 = 11;

// ---- Custom data classes ----

pub const CUSTOMDATA_CLASS_ICB: u32 = 3;
pub const CUSTOMDATA_CLASS_SHADER_MESSAGE: u32 = 4;
pub const SHADER_MESSAGE_ID_PRINTF: u32 = 0x0020_0102;
pub const SHADER_MESSAGE_ID_ERRORF: u32 = 0x0020_0103;
pub const SHADER_MESSAGE_FORMAT_PRINTF: u32 = 1;

// ---- Operand types ----

pub const OPERAND_TYPE_TEMP: u32 = 0;
pub const OPERAND_TYPE_INPUT: u32 = 1;
pub const OPERAND_TYPE_OUTPUT: u32 = 2;
pub const OPERAND_TYPE_INDEXABLE_TEMP: u32 = 3;
pub const OPERAND_TYPE_IMMEDIATE32: u32 = 4;
pub const OPERAND_TYPE_IMMEDIATE64: u32 = 5;
pub const OPERAND_TYPE_SAMPLER: u32 = 6;
pub const OPERAND_TYPE_RESOURCE: u32 = 7;
pub const OPERAND_TYPE_CONSTANT_BUFFER: u32 = 8;
pub const OPERAND_TYPE_IMMEDIATE_CONSTANT_BUFFER: u32 = 9;
pub const OPERAND_TYPE_LABEL: u32 = 10;
pub const OPERAND_TYPE_INPUT_PRIMITIVEID: u32 = 11;
pub const OPERAND_TYPE_OUTPUT_DEPTH: u32 = 12;
pub const OPERAND_TYPE_NULL: u32 = 13;
pub const OPERAND_TYPE_RASTERIZER: u32 = 14;
pub const OPERAND_TYPE_OUTPUT_COVERAGE_MASK: u32 = 15;
pub const OPERAND_TYPE_STREAM: u32 = 16;
pub const OPERAND_TYPE_OUTPUT_CONTROL_POINT_ID: u32 = 22;
pub const OPERAND_TYPE_INPUT_FORK_INSTANCE_ID: u32 = 23;
pub const OPERAND_TYPE_INPUT_JOIN_INSTANCE_ID: u32 = 24;
pub const OPERAND_TYPE_INPUT_CONTROL_POINT: u32 = 25;
pub const OPERAND_TYPE_OUTPUT_CONTROL_POINT: u32 = 26;
pub const OPERAND_TYPE_INPUT_PATCH_CONSTANT: u32 = 27;
pub const OPERAND_TYPE_INPUT_DOMAIN_POINT: u32 = 28;
pub const OPERAND_TYPE_UNORDERED_ACCESS_VIEW: u32 = 30;
pub const OPERAND_TYPE_THREAD_GROUP_SHARED_MEMORY: u32 = 31;
pub const OPERAND_TYPE_INPUT_THREAD_ID: u32 = 32;
pub const OPERAND_TYPE_INPUT_THREAD_GROUP_ID: u32 = 33;
pub const OPERAND_TYPE_INPUT_THREAD_ID_IN_GROUP: u32 = 34;
pub const OPERAND_TYPE_INPUT_COVERAGE_MASK: u32 = 35;
pub const OPERAND_TYPE_INPUT_THREAD_ID_IN_GROUP_FLATTENED: u32 = 36;
pub const OPERAND_TYPE_INPUT_GS_INSTANCE_ID: u32 = 37;
pub const OPERAND_TYPE_OUTPUT_DEPTH_GREATER_EQUAL: u32 = 38;
pub const OPERAND_TYPE_OUTPUT_DEPTH_LESS_EQUAL: u32 = 39;
pub const OPERAND_TYPE_CYCLE_COUNTER: u32 = 40;
pub const OPERAND_TYPE_OUTPUT_STENCIL_REF: u32 = 41;
pub const OPERAND_TYPE_INNER_COVERAGE: u32 = 42;

// ---- Resource dimensions ----

pub const RESOURCE_DIMENSION_UNKNOWN: u32 = 0;
pub const RESOURCE_DIMENSION_BUFFER: u32 = 1;
pub const RESOURCE_DIMENSION_TEXTURE1D: u32 = 2;
pub const RESOURCE_DIMENSION_TEXTURE2D: u32 = 3;
pub const RESOURCE_DIMENSION_TEXTURE2DMS: u32 = 4;
pub const RESOURCE_DIMENSION_TEXTURE3D: u32 = 5;
pub const RESOURCE_DIMENSION_TEXTURECUBE: u32 = 6;
pub const RESOURCE_DIMENSION_TEXTURE1DARRAY: u32 = 7;
pub const RESOURCE_DIMENSION_TEXTURE2DARRAY: u32 = 8;
pub const RESOURCE_DIMENSION_TEXTURE2DMSARRAY: u32 = 9;
pub const RESOURCE_DIMENSION_TEXTURECUBEARRAY: u32 = 10;
pub const RESOURCE_DIMENSION_RAW_BUFFER: u32 = 11;
pub const RESOURCE_DIMENSION_STRUCTURED_BUFFER: u32 = 12;

// ---- Minimum precision ----

pub const MIN_PRECISION_DEFAULT: u32 = 0;
pub const MIN_PRECISION_FLOAT_16: u32 = 1;
pub const MIN_PRECISION_FLOAT_2_8: u32 = 2;
pub const MIN_PRECISION_SINT_16: u32 = 4;
pub const MIN_PRECISION_UINT_16: u32 = 5;

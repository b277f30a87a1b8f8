use dxmod_dxbc::DxbcError;
use thiserror::Error;

/// Failure to encode one operand or instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} in `{text}`")]
pub struct ParseError {
    /// Offending substring of the source line.
    pub text: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unrecognised register")]
    UnknownRegister,
    #[error("unrecognised mnemonic")]
    UnknownMnemonic,
    #[error("expected {expected} operands, found {found}")]
    OperandCount { expected: usize, found: usize },
    #[error("malformed register index")]
    MalformedIndex,
    #[error("more than three register indices")]
    TooManyIndices,
    #[error("invalid component selection")]
    InvalidSelection,
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("unsupported operand modifier")]
    UnsupportedModifier,
    #[error("unbalanced brackets or quotes")]
    Unbalanced,
    #[error("unrecognised keyword")]
    UnknownKeyword,
    #[error("instruction of {0} words exceeds the length field")]
    TooLong(usize),
    #[error("{0}")]
    Malformed(&'static str),
}

impl ParseError {
    pub fn new(text: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// A [`ParseError`] tied to its source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {error}")]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    /// Full text of the logical line.
    pub text: String,
    #[source]
    pub error: ParseError,
}

#[derive(Debug, Error)]
pub enum AsmError {
    #[error(transparent)]
    Dxbc(#[from] DxbcError),
    #[error(transparent)]
    Line(#[from] LineError),
    #[error("assembly text has no shader version line")]
    MissingVersion,
    #[error("program of {0} words does not fit in a code chunk")]
    ProgramTooLarge(usize),
}

/// Structural failures while reconciling a binary with its disassembly.
#[derive(Debug, Error)]
pub enum DisasmError {
    #[error(transparent)]
    Dxbc(#[from] DxbcError),
    #[error("shader bytecode length {len} is not a multiple of 4")]
    MisalignedTokens { len: usize },
    #[error("shader bytecode too short ({dwords} dwords)")]
    TooShort { dwords: usize },
    #[error("shader bytecode declares {declared} dwords but only {available} provided")]
    DeclaredLengthOutOfBounds { declared: usize, available: usize },
    #[error("instruction at dword {at} has zero length")]
    InstructionLengthZero { at: usize },
    #[error("instruction at dword {at} with length {len} overruns program of {available} dwords")]
    InstructionOutOfBounds {
        at: usize,
        len: usize,
        available: usize,
    },
}

/// Failure to turn one binary instruction back into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decode error at word {at}: {kind}")]
pub struct DecodeError {
    /// Word offset within the instruction.
    pub at: usize,
    pub kind: DecodeErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("unexpected end of instruction")]
    UnexpectedEof,
    #[error("no mnemonic for opcode {0}")]
    UnknownOpcode(u32),
    #[error("reserved operand encoding {0:#010x}")]
    InvalidOperand(u32),
    #[error("operand type {0} has no text form")]
    UnsupportedOperandType(u32),
    #[error("unsupported index representation {0}")]
    UnsupportedIndexRepresentation(u32),
    #[error("unsupported extended token {0:#010x}")]
    UnsupportedExtended(u32),
    #[error("no keyword for {what} value {value}")]
    UnknownValue { what: &'static str, value: u32 },
    #[error("{0} words left over")]
    TrailingWords(usize),
    #[error("failed to format instruction text")]
    Format,
}

//! Text assembly for Shader Model 4/5 bytecode.
//!
//! - [`assemble_program`] turns a disassembly listing into a token stream, and
//!   [`assemble`] splices that stream into an existing `DXBC` container.
//! - [`assemble_new_container`] builds a container from a listing alone,
//!   rebuilding the signature chunks from the listing's comment blocks.
//! - [`disassemble`] reconciles a native disassembler listing with its binary,
//!   rewriting float literals whose decimal text does not reproduce the
//!   original bits.
//! - [`render_program`] prints a code chunk without any reference listing.
//!
//! Parse failures are reported per statement ([`LineError`]); callers choose
//! between collecting them and aborting on the first one.

#![forbid(unsafe_code)]

pub mod assemble;
pub mod decl;
pub mod decode;
pub mod error;
pub mod instruction;
pub mod literal;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod reconcile;
pub mod tables;
pub mod token;
pub mod tokenize;
pub mod walk;

pub use crate::assemble::{assemble, assemble_into, assemble_new_container, assemble_program};
pub use crate::decl::{GlobalFlags, SyncFlags};
pub use crate::decode::{decode_instruction, render_program};
pub use crate::error::{
    AsmError, DecodeError, DecodeErrorKind, DisasmError, LineError, ParseError, ParseErrorKind,
};
pub use crate::instruction::encode_statement;
pub use crate::operand::{encode_operand, Encoded, LiteralSite, LiteralWidth};
pub use crate::program::{ShaderModel, ShaderStage, ShaderVersion, Sm4Program};
pub use crate::reconcile::{disassemble, Mismatch, MismatchLog, MismatchSink};
pub use crate::walk::{InstructionSpan, Instructions};

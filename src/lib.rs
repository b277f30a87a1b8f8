//! Round-tripping DirectX SM4/SM5 shader containers through text assembly.
//!
//! [`dxbc`] reads, rebuilds and re-checksums `DXBC` containers; [`sm4`]
//! assembles listings into bytecode and reconciles disassembly with the
//! binary it came from.

#![forbid(unsafe_code)]

pub use dxmod_dxbc as dxbc;
pub use dxmod_sm4 as sm4;

pub use dxmod_sm4::{assemble, assemble_new_container, disassemble, AsmError, DisasmError};

//! Reading and rewriting DirectX shader bytecode containers (`DXBC`).
//!
//! Parsing treats its input as untrusted: every offset and size is validated
//! and malformed containers are reported through [`DxbcError`] instead of
//! panicking.
//!
//! Besides parsing, this crate provides the pieces needed to write containers
//! back out:
//!
//! - [`splice_shader_chunk`] replaces the `SHDR`/`SHEX` payload in place,
//!   relocating every chunk stored after it.
//! - [`dxbc_checksum`] reproduces the digest stamped into the header.
//! - Signature chunks (`ISGN`, `OSGN`, `OSG5`, `ISG1`, ...) can be parsed,
//!   serialized, and rebuilt from the comment blocks of a disassembly listing.
//! - [`build_container`] manufactures a fresh container from a list of chunks.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod build;
mod checksum;
mod dxbc;
mod error;
mod fourcc;
mod le;
/// Binary signature chunks (`ISGN`, `OSGN`, `OSG5`, `PCSG`, `ISG1`, ...).
pub mod signature;
/// Signature comment blocks found at the top of a disassembly listing.
pub mod signature_text;
mod splice;

/// Helpers for building synthetic DXBC blobs in tests.
///
/// This module is only available when compiling this crate's own tests, or when
/// the `test-utils` feature is enabled. It is **not** considered part of the
/// stable API.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::build::{build_container, sfi0_chunk, ShaderFeatureFlags};
pub use crate::checksum::{container_checksum, dxbc_checksum, stamp_checksum};
pub use crate::dxbc::{DxbcChunk, DxbcFile, DxbcHeader, DXBC_HEADER_LEN};
pub use crate::error::DxbcError;
pub use crate::fourcc::FourCC;
pub use crate::le::{read_u32_le, write_u32_le};
pub use crate::signature::{
    parse_signature_chunk, parse_signature_chunk_with_fourcc, write_signature_chunk,
    SignatureChunk, SignatureEntry, SignatureLayout,
};
pub use crate::signature_text::{parse_signature_blocks, SignatureKind, TextSignature};
pub use crate::splice::{locate_shader_chunk, splice_shader_chunk, ChunkLocation, SpliceReport};

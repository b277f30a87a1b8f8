//! Program-level framing: the version token, shader stage and model, and the
//! token stream held in a `SHDR`/`SHEX` chunk.

use core::fmt;

use dxmod_dxbc::{DxbcError, DxbcFile, FourCC};

use crate::error::DisasmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
    Geometry,
    Hull,
    Domain,
    Compute,
    Unknown(u16),
}

impl ShaderStage {
    /// Program-type field of the version token.
    pub fn program_type(self) -> u16 {
        match self {
            ShaderStage::Pixel => 0,
            ShaderStage::Vertex => 1,
            ShaderStage::Geometry => 2,
            ShaderStage::Hull => 3,
            ShaderStage::Domain => 4,
            ShaderStage::Compute => 5,
            ShaderStage::Unknown(ty) => ty,
        }
    }

    pub fn from_program_type(ty: u16) -> Self {
        match ty {
            0 => ShaderStage::Pixel,
            1 => ShaderStage::Vertex,
            2 => ShaderStage::Geometry,
            3 => ShaderStage::Hull,
            4 => ShaderStage::Domain,
            5 => ShaderStage::Compute,
            other => ShaderStage::Unknown(other),
        }
    }

    /// Two-letter prefix of the version line (`ps`, `vs`, ...).
    pub fn prefix(self) -> Option<&'static str> {
        Some(match self {
            ShaderStage::Pixel => "ps",
            ShaderStage::Vertex => "vs",
            ShaderStage::Geometry => "gs",
            ShaderStage::Hull => "hs",
            ShaderStage::Domain => "ds",
            ShaderStage::Compute => "cs",
            ShaderStage::Unknown(_) => return None,
        })
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Some(match prefix {
            "ps" => ShaderStage::Pixel,
            "vs" => ShaderStage::Vertex,
            "gs" => ShaderStage::Geometry,
            "hs" => ShaderStage::Hull,
            "ds" => ShaderStage::Domain,
            "cs" => ShaderStage::Compute,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderModel {
    pub major: u8,
    pub minor: u8,
}

impl ShaderModel {
    /// Models 5.0 and later live in `SHEX`; earlier ones in `SHDR`.
    pub fn code_chunk(self) -> FourCC {
        if self.major < 5 {
            FourCC::SHDR
        } else {
            FourCC::SHEX
        }
    }
}

/// Stage and model named by a version line such as `ps_5_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderVersion {
    pub stage: ShaderStage,
    pub model: ShaderModel,
}

impl ShaderVersion {
    /// Parses `{vs,ps,gs,hs,ds,cs}_{major}_{minor}`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.trim().split('_');
        let stage = ShaderStage::from_prefix(parts.next()?)?;
        let major: u8 = parts.next()?.parse().ok()?;
        let minor: u8 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || major > 0xf || minor > 0xf {
            return None;
        }
        Some(Self {
            stage,
            model: ShaderModel { major, minor },
        })
    }

    pub fn token(self) -> u32 {
        u32::from(self.stage.program_type()) << 16
            | u32::from(self.model.major) << 4
            | u32::from(self.model.minor)
    }
}

impl fmt::Display for ShaderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.stage.prefix().unwrap_or("xs");
        write!(f, "{prefix}_{}_{}", self.model.major, self.model.minor)
    }
}

pub fn decode_version_token(version: u32) -> (ShaderStage, ShaderModel) {
    // bits 0..=3 minor, 4..=7 major, 16..=31 program type
    let minor = (version & 0xF) as u8;
    let major = ((version >> 4) & 0xF) as u8;
    let ty = (version >> 16) as u16;
    (ShaderStage::from_program_type(ty), ShaderModel { major, minor })
}

#[derive(Debug, Clone)]
pub struct Sm4Program {
    pub stage: ShaderStage,
    pub model: ShaderModel,
    /// Full token stream (DWORDs), including version + length.
    pub tokens: Vec<u32>,
}

impl Sm4Program {
    pub fn parse_from_dxbc_bytes(bytes: &[u8]) -> Result<Self, DisasmError> {
        let file = DxbcFile::parse(bytes)?;
        Self::parse_from_dxbc(&file)
    }

    pub fn parse_from_dxbc(dxbc: &DxbcFile<'_>) -> Result<Self, DisasmError> {
        let chunk = dxbc
            .find_first_shader_chunk()
            .ok_or_else(|| DxbcError::missing_chunk("container has no SHDR or SHEX chunk"))?;
        Self::parse_program_tokens(chunk.data)
    }

    pub fn parse_program_tokens(bytes: &[u8]) -> Result<Self, DisasmError> {
        if bytes.len() % 4 != 0 {
            return Err(DisasmError::MisalignedTokens { len: bytes.len() });
        }
        let tokens: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        if tokens.len() < 2 {
            return Err(DisasmError::TooShort { dwords: tokens.len() });
        }

        let declared_len = tokens[1] as usize;
        if declared_len > tokens.len() {
            return Err(DisasmError::DeclaredLengthOutOfBounds {
                declared: declared_len,
                available: tokens.len(),
            });
        }

        let (stage, model) = decode_version_token(tokens[0]);
        Ok(Self {
            stage,
            model,
            tokens,
        })
    }

    pub fn version(&self) -> ShaderVersion {
        ShaderVersion {
            stage: self.stage,
            model: self.model,
        }
    }

    /// Instruction words, excluding the version and length tokens and any
    /// padding past the declared length.
    pub fn body(&self) -> &[u32] {
        let declared = (self.tokens[1] as usize).max(2);
        &self.tokens[2..declared]
    }
}

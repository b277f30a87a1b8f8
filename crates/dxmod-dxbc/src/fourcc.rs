use core::fmt;

/// A four-character chunk tag such as `SHEX` or `ISGN`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Container magic.
    pub const DXBC: FourCC = FourCC(*b"DXBC");
    /// Shader model 4 bytecode.
    pub const SHDR: FourCC = FourCC(*b"SHDR");
    /// Shader model 5 bytecode.
    pub const SHEX: FourCC = FourCC(*b"SHEX");
    /// Input signature.
    pub const ISGN: FourCC = FourCC(*b"ISGN");
    /// Input signature with stream and minimum precision fields.
    pub const ISG1: FourCC = FourCC(*b"ISG1");
    /// Output signature.
    pub const OSGN: FourCC = FourCC(*b"OSGN");
    /// Output signature with a stream field.
    pub const OSG5: FourCC = FourCC(*b"OSG5");
    /// Output signature with stream and minimum precision fields.
    pub const OSG1: FourCC = FourCC(*b"OSG1");
    /// Patch constant signature.
    pub const PCSG: FourCC = FourCC(*b"PCSG");
    /// Patch constant signature with stream and minimum precision fields.
    pub const PSG1: FourCC = FourCC(*b"PSG1");
    /// Shader feature info.
    pub const SFI0: FourCC = FourCC(*b"SFI0");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_escapes_non_printable_bytes() {
        assert_eq!(FourCC(*b"SHEX").to_string(), "SHEX");
        assert_eq!(FourCC([b'A', 0, b'B', 0xff]).to_string(), "A\\x00B\\xff");
    }
}

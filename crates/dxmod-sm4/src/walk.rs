//! Instruction boundaries of a binary token stream.

use crate::error::DisasmError;
use crate::opcode::OPCODE_CUSTOMDATA;
use crate::program::Sm4Program;
use crate::token::{instruction_len, opcode_type};

/// One instruction's words and its dword position in the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSpan<'a> {
    pub at: usize,
    pub words: &'a [u32],
}

impl InstructionSpan<'_> {
    pub fn opcode(&self) -> u32 {
        opcode_type(self.words[0])
    }
}

/// Length of the instruction starting at `toks[at]`.
///
/// Custom-data blocks store their length in the following word; everything
/// else uses the 7-bit length field.
pub fn instruction_len_at(toks: &[u32], at: usize) -> Result<usize, DisasmError> {
    let opcode_token = toks[at];
    let len = if opcode_type(opcode_token) == OPCODE_CUSTOMDATA {
        match toks.get(at + 1) {
            Some(len) => *len as usize,
            None => {
                return Err(DisasmError::InstructionOutOfBounds {
                    at,
                    len: 2,
                    available: toks.len(),
                })
            }
        }
    } else {
        instruction_len(opcode_token)
    };
    if len == 0 {
        return Err(DisasmError::InstructionLengthZero { at });
    }
    if len > toks.len() - at {
        return Err(DisasmError::InstructionOutOfBounds {
            at,
            len,
            available: toks.len(),
        });
    }
    Ok(len)
}

/// Iterator over the instructions of `toks[start..]`.
///
/// Stops after the first structural error.
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    toks: &'a [u32],
    pos: usize,
    failed: bool,
}

impl<'a> Instructions<'a> {
    pub fn new(toks: &'a [u32], start: usize) -> Self {
        Self {
            toks,
            pos: start,
            failed: false,
        }
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<InstructionSpan<'a>, DisasmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.toks.len() {
            return None;
        }
        let at = self.pos;
        match instruction_len_at(self.toks, at) {
            Ok(len) => {
                self.pos += len;
                Some(Ok(InstructionSpan {
                    at,
                    words: &self.toks[at..at + len],
                }))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl Sm4Program {
    /// Instructions within the declared program length.
    pub fn instructions(&self) -> Instructions<'_> {
        let declared = (self.tokens[1] as usize).max(2);
        Instructions::new(&self.tokens[..declared], 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn program(tokens: &[u32]) -> Sm4Program {
        let bytes: Vec<u8> = tokens.iter().flat_map(|t| t.to_le_bytes()).collect();
        Sm4Program::parse_program_tokens(&bytes).unwrap()
    }

    #[test]
    fn walks_ordinary_and_custom_data_blocks() {
        let p = program(&[
            0x50,
            11,
            0x0200_0068,
            2,
            0x1835,
            6,
            0x3f80_0000,
            0,
            0,
            0,
            0x0100_003e,
        ]);
        let spans: Vec<(usize, usize)> = p
            .instructions()
            .map(|s| s.map(|s| (s.at, s.words.len())))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(spans, vec![(2, 2), (4, 6), (10, 1)]);
    }

    #[test]
    fn padding_past_declared_length_is_ignored() {
        let p = program(&[0x50, 3, 0x0100_003e, 0xdead_beef]);
        assert_eq!(p.instructions().count(), 1);
    }

    #[test]
    fn zero_length_and_overrun_are_errors() {
        let p = program(&[0x50, 3, 0x0000_0036]);
        let errors: Vec<_> = p.instructions().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], Err(DisasmError::InstructionLengthZero { at: 2 })));

        let p = program(&[0x50, 4, 0x0500_0036, 0]);
        assert!(matches!(
            p.instructions().next(),
            Some(Err(DisasmError::InstructionOutOfBounds { at: 2, len: 5, available: 4 }))
        ));

        let p = program(&[0x50, 3, 0x1835]);
        assert!(matches!(
            p.instructions().next(),
            Some(Err(DisasmError::InstructionOutOfBounds { at: 2, .. }))
        ));
    }
}

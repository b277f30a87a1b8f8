//! Field accessors for the packed 32-bit instruction and operand words.
//!
//! Every field is an explicit shift and mask over a plain `u32`.

/// Set on an opcode, extended opcode or operand word when another extension word follows.
pub const EXTENDED_BIT: u32 = 0x8000_0000;

// ---- Opcode word ----

pub const OPCODE_TYPE_MASK: u32 = 0x7ff;
pub const OPCODE_CONTROL_SHIFT: u32 = 11;
pub const OPCODE_CONTROL_MASK: u32 = 0x1fff;
pub const OPCODE_LEN_SHIFT: u32 = 24;
pub const OPCODE_LEN_MASK: u32 = 0x7f;

/// Longest instruction the length field can describe.
pub const MAX_INSTRUCTION_LEN: usize = OPCODE_LEN_MASK as usize;

pub fn opcode_type(word: u32) -> u32 {
    word & OPCODE_TYPE_MASK
}

/// Control field, still in place (bits 11..=23).
pub fn opcode_control(word: u32) -> u32 {
    word & (OPCODE_CONTROL_MASK << OPCODE_CONTROL_SHIFT)
}

pub fn instruction_len(word: u32) -> usize {
    ((word >> OPCODE_LEN_SHIFT) & OPCODE_LEN_MASK) as usize
}

pub fn is_extended(word: u32) -> bool {
    word & EXTENDED_BIT != 0
}

/// Builds an opcode word; `control` is already shifted into bits 11..=23.
pub fn opcode_word(opcode: u32, control: u32, len: usize, extended: bool) -> u32 {
    (opcode & OPCODE_TYPE_MASK)
        | (control & (OPCODE_CONTROL_MASK << OPCODE_CONTROL_SHIFT))
        | ((len as u32 & OPCODE_LEN_MASK) << OPCODE_LEN_SHIFT)
        | if extended { EXTENDED_BIT } else { 0 }
}

// ---- Extended opcode word ----

pub const EXT_OPCODE_TYPE_MASK: u32 = 0x3f;
pub const EXT_SAMPLE_CONTROLS: u32 = 1;
pub const EXT_RESOURCE_DIM: u32 = 2;
pub const EXT_RESOURCE_RETURN_TYPE: u32 = 3;

/// Extension word carrying the `aoffimmi(u,v,w)` texel offsets.
pub fn sample_controls_word(offsets: [i8; 3]) -> u32 {
    let mut word = EXT_SAMPLE_CONTROLS;
    for (i, off) in offsets.into_iter().enumerate() {
        word |= ((off as u32) & 0xf) << (9 + 4 * i);
    }
    word
}

/// Decodes the three signed 4-bit offsets of a sample-controls word.
pub fn sample_controls_offsets(word: u32) -> [i8; 3] {
    let mut out = [0i8; 3];
    for (i, off) in out.iter_mut().enumerate() {
        let nibble = ((word >> (9 + 4 * i)) & 0xf) as i8;
        *off = (nibble << 4) >> 4;
    }
    out
}

pub fn resource_dim_word(dim: u32, stride: u32) -> u32 {
    EXT_RESOURCE_DIM | ((dim & 0x1f) << 6) | ((stride & 0xfff) << 11)
}

pub fn resource_return_type_word(types: [u32; 4]) -> u32 {
    let mut word = EXT_RESOURCE_RETURN_TYPE;
    for (i, ty) in types.into_iter().enumerate() {
        word |= (ty & 0xf) << (6 + 4 * i);
    }
    word
}

// ---- Operand word ----

pub const OPERAND_NUM_COMPONENTS_MASK: u32 = 0x3;
pub const OPERAND_SELECTION_MODE_SHIFT: u32 = 2;
pub const OPERAND_SELECTION_SHIFT: u32 = 4;
pub const OPERAND_TYPE_SHIFT: u32 = 12;
pub const OPERAND_TYPE_MASK: u32 = 0xff;
pub const OPERAND_INDEX_DIM_SHIFT: u32 = 20;
pub const OPERAND_INDEX_REP_SHIFT: u32 = 22;

pub const INDEX_IMMEDIATE32: u32 = 0;
pub const INDEX_RELATIVE: u32 = 2;
pub const INDEX_IMMEDIATE32_PLUS_RELATIVE: u32 = 3;

/// How many components an operand carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentCount {
    Zero,
    One,
    Four,
}

/// Component selection of a four-component operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Write/read mask, bit 0 = x.
    Mask(u8),
    /// Four component indices.
    Swizzle([u8; 4]),
    /// Single component index.
    Select1(u8),
}

impl Selection {
    pub const IDENTITY_SWIZZLE: Selection = Selection::Swizzle([0, 1, 2, 3]);
}

/// Decoded form of an operand header word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandHeader {
    pub components: ComponentCount,
    /// Meaningful only when `components` is [`ComponentCount::Four`].
    pub selection: Selection,
    pub ty: u32,
    /// One representation per index; the length is the index dimension.
    pub index_reps: IndexReps,
    pub extended: bool,
}

/// Up to three index representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexReps {
    reps: [u32; 3],
    len: usize,
}

impl IndexReps {
    pub fn push(&mut self, rep: u32) -> bool {
        if self.len == 3 {
            return false;
        }
        self.reps[self.len] = rep;
        self.len += 1;
        true
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.reps[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl OperandHeader {
    pub fn new(ty: u32, components: ComponentCount, selection: Selection) -> Self {
        Self {
            components,
            selection,
            ty,
            index_reps: IndexReps::default(),
            extended: false,
        }
    }

    pub fn encode(&self) -> u32 {
        let mut word = match self.components {
            ComponentCount::Zero => 0,
            ComponentCount::One => 1,
            ComponentCount::Four => 2,
        };
        if self.components == ComponentCount::Four {
            let (mode, bits) = match self.selection {
                Selection::Mask(mask) => (0, u32::from(mask & 0xf)),
                Selection::Swizzle(s) => (
                    1,
                    u32::from(s[0] & 3)
                        | u32::from(s[1] & 3) << 2
                        | u32::from(s[2] & 3) << 4
                        | u32::from(s[3] & 3) << 6,
                ),
                Selection::Select1(c) => (2, u32::from(c & 3)),
            };
            word |= mode << OPERAND_SELECTION_MODE_SHIFT | bits << OPERAND_SELECTION_SHIFT;
        }
        word |= (self.ty & OPERAND_TYPE_MASK) << OPERAND_TYPE_SHIFT;
        word |= (self.index_reps.len() as u32) << OPERAND_INDEX_DIM_SHIFT;
        for (i, rep) in self.index_reps.as_slice().iter().enumerate() {
            word |= (rep & 0x7) << (OPERAND_INDEX_REP_SHIFT + 3 * i as u32);
        }
        if self.extended {
            word |= EXTENDED_BIT;
        }
        word
    }

    /// Decodes a header word; `None` for reserved component counts or selection modes.
    pub fn decode(word: u32) -> Option<Self> {
        let components = match word & OPERAND_NUM_COMPONENTS_MASK {
            0 => ComponentCount::Zero,
            1 => ComponentCount::One,
            2 => ComponentCount::Four,
            _ => return None,
        };
        let bits = (word >> OPERAND_SELECTION_SHIFT) & 0xff;
        let selection = match (word >> OPERAND_SELECTION_MODE_SHIFT) & 0x3 {
            0 => Selection::Mask((bits & 0xf) as u8),
            1 => Selection::Swizzle([
                (bits & 3) as u8,
                ((bits >> 2) & 3) as u8,
                ((bits >> 4) & 3) as u8,
                ((bits >> 6) & 3) as u8,
            ]),
            2 => Selection::Select1((bits & 3) as u8),
            _ => return None,
        };
        let dim = ((word >> OPERAND_INDEX_DIM_SHIFT) & 0x3) as usize;
        let mut index_reps = IndexReps::default();
        for i in 0..dim {
            index_reps.push((word >> (OPERAND_INDEX_REP_SHIFT + 3 * i as u32)) & 0x7);
        }
        Some(Self {
            components,
            selection,
            ty: (word >> OPERAND_TYPE_SHIFT) & OPERAND_TYPE_MASK,
            index_reps,
            extended: is_extended(word),
        })
    }
}

// ---- Extended operand word ----

pub const EXT_OPERAND_MODIFIER: u32 = 1;
pub const OPERAND_MODIFIER_SHIFT: u32 = 6;
pub const OPERAND_MIN_PRECISION_SHIFT: u32 = 14;

pub const MODIFIER_NEG: u32 = 1;
pub const MODIFIER_ABS: u32 = 2;

pub fn operand_modifier_word(modifier: u32, min_precision: u32) -> u32 {
    EXT_OPERAND_MODIFIER
        | (modifier & 0xff) << OPERAND_MODIFIER_SHIFT
        | (min_precision & 0x7) << OPERAND_MIN_PRECISION_SHIFT
}

/// Splits an extended operand word into `(modifier, min_precision)`.
pub fn operand_modifier_fields(word: u32) -> Option<(u32, u32)> {
    if word & 0x3f != EXT_OPERAND_MODIFIER {
        return None;
    }
    Some((
        (word >> OPERAND_MODIFIER_SHIFT) & 0xff,
        (word >> OPERAND_MIN_PRECISION_SHIFT) & 0x7,
    ))
}

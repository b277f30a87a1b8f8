//! Operand codec: one operand's text to its header, extension, index and
//! payload words.

use core::ops::Range;

use crate::error::{ParseError, ParseErrorKind};
use crate::literal::{f64_words, is_hex_literal, parse_f64_literal, parse_u32_literal};
use crate::opcode::*;
use crate::tables::{keyword_value, special_register, MIN_PRECISIONS};
use crate::token::{
    operand_modifier_word, ComponentCount, OperandHeader, Selection, INDEX_IMMEDIATE32,
    INDEX_IMMEDIATE32_PLUS_RELATIVE, INDEX_RELATIVE, MODIFIER_ABS, MODIFIER_NEG,
};

/// Width of a literal payload that decimal text may not reproduce exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralWidth {
    F32,
    /// Two words, low then high.
    F64,
}

/// Where a decimal literal sits both in the statement text and in the words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSite {
    /// Offset of the (first) payload word within the instruction.
    pub word: usize,
    pub width: LiteralWidth,
    /// Byte range of the component text within the statement.
    pub span: Range<usize>,
    /// Byte range of the enclosing `l(...)` / `d(...)` / ICB row.
    pub group: Range<usize>,
}

impl LiteralSite {
    pub fn words(&self) -> Range<usize> {
        match self.width {
            LiteralWidth::F32 => self.word..self.word + 1,
            LiteralWidth::F64 => self.word..self.word + 2,
        }
    }
}

/// Words produced so far for one instruction, plus its literal sites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub words: Vec<u32>,
    pub sites: Vec<LiteralSite>,
}

impl Encoded {
    pub fn push(&mut self, word: u32) {
        self.words.push(word);
    }

    pub(crate) fn push_f32_site(&mut self, span: Range<usize>, group: Range<usize>) {
        self.sites.push(LiteralSite {
            word: self.words.len(),
            width: LiteralWidth::F32,
            span,
            group,
        });
    }
}

/// Encodes one operand.
///
/// `text` starts at byte `offset` of the statement. `special` selects
/// destination/declaration encoding: masks instead of swizzles, and
/// declared constant buffers default to a full `.xyzw` swizzle.
pub fn encode_operand(
    text: &str,
    offset: usize,
    special: bool,
    out: &mut Encoded,
) -> Result<(), ParseError> {
    let err = |kind| ParseError::new(text.trim(), kind);

    // `{min16f}` tags are parsed first so `-` and `|..|` can surround either form.
    let (body, min_precision) = match text.find('{') {
        Some(pos) => {
            let close = text.rfind('}').ok_or_else(|| err(ParseErrorKind::Unbalanced))?;
            let precision = parse_precision_tag(&text[pos + 1..close])
                .ok_or_else(|| err(ParseErrorKind::UnsupportedModifier))?;
            (&text[..pos], precision)
        }
        None => (text, MIN_PRECISION_DEFAULT),
    };

    let lead = body.len() - body.trim_start().len();
    let mut body = body.trim();
    let mut start = offset + lead;
    let mut modifier = 0;
    if let Some(rest) = body.strip_prefix('-') {
        modifier |= MODIFIER_NEG;
        body = rest;
        start += 1;
    }
    if body.len() >= 2 && body.starts_with('|') && body.ends_with('|') {
        modifier |= MODIFIER_ABS;
        body = &body[1..body.len() - 1];
        start += 1;
    }
    if body.is_empty() {
        return Err(err(ParseErrorKind::UnknownRegister));
    }

    let extension = (modifier != 0 || min_precision != MIN_PRECISION_DEFAULT)
        .then(|| operand_modifier_word(modifier, min_precision));

    if let Some(inner) = body.strip_prefix("l(") {
        let inner = inner.strip_suffix(')').ok_or_else(|| err(ParseErrorKind::InvalidLiteral))?;
        return encode_immediate32(inner, start..start + body.len(), start + 2, extension, out)
            .map_err(err);
    }
    if let Some(inner) = body.strip_prefix("d(") {
        let inner = inner.strip_suffix(')').ok_or_else(|| err(ParseErrorKind::InvalidLiteral))?;
        return encode_immediate64(inner, start..start + body.len(), start + 2, extension, out)
            .map_err(err);
    }

    let (register, suffix) = split_selection(body);
    let (mut header, indices) = match special_register(register) {
        Some(reg) => (OperandHeader::new(reg.ty, reg.components, Selection::Mask(0)), Vec::new()),
        None => {
            let (ty, rest) =
                register_file(register).ok_or_else(|| err(ParseErrorKind::UnknownRegister))?;
            let indices = parse_indices(rest).map_err(err)?;
            if indices.is_empty() {
                return Err(err(ParseErrorKind::UnknownRegister));
            }
            (OperandHeader::new(ty, ComponentCount::Zero, Selection::Mask(0)), indices)
        }
    };

    match suffix {
        Some(letters) => {
            let comps = parse_components(letters).ok_or_else(|| err(ParseErrorKind::InvalidSelection))?;
            header.components = ComponentCount::Four;
            header.selection = if special {
                Selection::Mask(comps.iter().fold(0, |mask, c| mask | 1 << c))
            } else {
                match comps.as_slice() {
                    [c] => Selection::Select1(*c),
                    [a, b, c, d] => Selection::Swizzle([*a, *b, *c, *d]),
                    _ => Selection::Mask(comps.iter().fold(0, |mask, c| mask | 1 << c)),
                }
            };
        }
        None if special && header.ty == OPERAND_TYPE_CONSTANT_BUFFER => {
            header.components = ComponentCount::Four;
            header.selection = Selection::IDENTITY_SWIZZLE;
        }
        // Special registers keep their table component count.
        None if indices.is_empty() => {}
        None if COMPONENTLESS_FILES.contains(&header.ty) => {}
        None => return Err(err(ParseErrorKind::InvalidSelection)),
    }

    for index in &indices {
        let rep = match index {
            IndexExpr::Immediate(_) => INDEX_IMMEDIATE32,
            IndexExpr::Relative(_) => INDEX_RELATIVE,
            IndexExpr::RelativePlus(..) => INDEX_IMMEDIATE32_PLUS_RELATIVE,
        };
        header.index_reps.push(rep);
    }
    header.extended = extension.is_some();
    out.push(header.encode());
    out.words.extend(extension);

    for index in indices {
        match index {
            IndexExpr::Immediate(value) => out.push(value),
            IndexExpr::Relative(reg) => encode_operand(reg, 0, false, out)?,
            IndexExpr::RelativePlus(reg, value) => {
                out.push(value);
                encode_operand(reg, 0, false, out)?;
            }
        }
    }
    Ok(())
}

fn parse_precision_tag(tag: &str) -> Option<u32> {
    let mut precision = MIN_PRECISION_DEFAULT;
    for word in tag.split_whitespace().filter(|w| *w != "as") {
        let value = keyword_value(MIN_PRECISIONS, word)?;
        if value != MIN_PRECISION_DEFAULT {
            precision = value;
        }
    }
    Some(precision)
}

/// Splits `cb0[1].xyzw` into `("cb0[1]", Some("xyzw"))`.
fn split_selection(body: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    let mut dot = None;
    for (i, c) in body.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => dot = Some(i),
            _ => {}
        }
    }
    match dot {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    }
}

fn parse_components(letters: &str) -> Option<Vec<u8>> {
    if letters.is_empty() || letters.len() > 4 {
        return None;
    }
    letters
        .chars()
        .map(|c| match c {
            'x' | 'r' => Some(0),
            'y' | 'g' => Some(1),
            'z' | 'b' => Some(2),
            'w' | 'a' => Some(3),
            _ => None,
        })
        .collect()
}

/// Register-file prefixes, longest first.
const REGISTER_FILES: &[(&str, u32)] = &[
    ("vicp", OPERAND_TYPE_INPUT_CONTROL_POINT),
    ("vocp", OPERAND_TYPE_OUTPUT_CONTROL_POINT),
    ("vpc", OPERAND_TYPE_INPUT_PATCH_CONSTANT),
    ("icb", OPERAND_TYPE_IMMEDIATE_CONSTANT_BUFFER),
    ("cb", OPERAND_TYPE_CONSTANT_BUFFER),
    // Declarations print the buffer in upper case.
    ("CB", OPERAND_TYPE_CONSTANT_BUFFER),
    ("r", OPERAND_TYPE_TEMP),
    ("v", OPERAND_TYPE_INPUT),
    ("o", OPERAND_TYPE_OUTPUT),
    ("x", OPERAND_TYPE_INDEXABLE_TEMP),
    ("s", OPERAND_TYPE_SAMPLER),
    ("t", OPERAND_TYPE_RESOURCE),
    ("u", OPERAND_TYPE_UNORDERED_ACCESS_VIEW),
    ("g", OPERAND_TYPE_THREAD_GROUP_SHARED_MEMORY),
    ("m", OPERAND_TYPE_STREAM),
    ("l", OPERAND_TYPE_LABEL),
];

/// Register files written without a component selection.
const COMPONENTLESS_FILES: &[u32] = &[
    OPERAND_TYPE_SAMPLER,
    OPERAND_TYPE_RESOURCE,
    OPERAND_TYPE_UNORDERED_ACCESS_VIEW,
    OPERAND_TYPE_THREAD_GROUP_SHARED_MEMORY,
    OPERAND_TYPE_STREAM,
    OPERAND_TYPE_LABEL,
];

pub fn register_prefix(ty: u32) -> Option<&'static str> {
    REGISTER_FILES.iter().find(|(_, t)| *t == ty).map(|(p, _)| *p)
}

fn register_file(register: &str) -> Option<(u32, &str)> {
    REGISTER_FILES.iter().find_map(|(prefix, ty)| {
        let rest = register.strip_prefix(prefix)?;
        rest.starts_with(|c: char| c.is_ascii_digit() || c == '[')
            .then_some((*ty, rest))
    })
}

enum IndexExpr<'a> {
    Immediate(u32),
    Relative(&'a str),
    RelativePlus(&'a str, u32),
}

/// Parses `0[1]`, `[r0.x + 2]`, `0[r1.x + 0][3]` and friends.
fn parse_indices(mut rest: &str) -> Result<Vec<IndexExpr<'_>>, ParseErrorKind> {
    let mut indices = Vec::new();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let value = rest[..digits].parse().map_err(|_| ParseErrorKind::MalformedIndex)?;
        indices.push(IndexExpr::Immediate(value));
        rest = &rest[digits..];
    }
    while let Some(after) = rest.strip_prefix('[') {
        let close = matching_bracket(after).ok_or(ParseErrorKind::MalformedIndex)?;
        indices.push(parse_index_expr(after[..close].trim())?);
        rest = &after[close + 1..];
    }
    if !rest.is_empty() {
        return Err(ParseErrorKind::MalformedIndex);
    }
    if indices.len() > 3 {
        return Err(ParseErrorKind::TooManyIndices);
    }
    Ok(indices)
}

fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return Some(i),
            ']' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn parse_index_expr(expr: &str) -> Result<IndexExpr<'_>, ParseErrorKind> {
    if expr.is_empty() {
        return Err(ParseErrorKind::MalformedIndex);
    }
    if expr.bytes().all(|b| b.is_ascii_digit()) {
        return expr
            .parse()
            .map(IndexExpr::Immediate)
            .map_err(|_| ParseErrorKind::MalformedIndex);
    }
    match top_level_plus(expr) {
        Some(pos) => {
            let value = expr[pos + 1..]
                .trim()
                .parse()
                .map_err(|_| ParseErrorKind::MalformedIndex)?;
            Ok(IndexExpr::RelativePlus(expr[..pos].trim(), value))
        }
        None => Ok(IndexExpr::Relative(expr)),
    }
}

fn top_level_plus(expr: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;
    for (i, c) in expr.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => found = Some(i),
            _ => {}
        }
    }
    found
}

fn encode_immediate32(
    inner: &str,
    group: Range<usize>,
    inner_start: usize,
    extension: Option<u32>,
    out: &mut Encoded,
) -> Result<(), ParseErrorKind> {
    let parts = split_components(inner, inner_start);
    let components = match parts.len() {
        1 => ComponentCount::One,
        4 => ComponentCount::Four,
        _ => return Err(ParseErrorKind::InvalidLiteral),
    };
    let mut header = OperandHeader::new(OPERAND_TYPE_IMMEDIATE32, components, Selection::Mask(0));
    header.extended = extension.is_some();
    out.push(header.encode());
    out.words.extend(extension);
    for (text, span) in parts {
        let bits = parse_u32_literal(text).ok_or(ParseErrorKind::InvalidLiteral)?;
        if !is_hex_literal(text) {
            out.push_f32_site(span, group.clone());
        }
        out.push(bits);
    }
    Ok(())
}

fn encode_immediate64(
    inner: &str,
    group: Range<usize>,
    inner_start: usize,
    extension: Option<u32>,
    out: &mut Encoded,
) -> Result<(), ParseErrorKind> {
    let parts = split_components(inner, inner_start);
    let hex = parts.iter().any(|(text, _)| is_hex_literal(text));
    // Hex components are raw words, two per double; decimal ones are one double each.
    let doubles = if hex { parts.len() / 2 } else { parts.len() };
    if (hex && parts.len() % 2 != 0) || !(1..=2).contains(&doubles) {
        return Err(ParseErrorKind::InvalidLiteral);
    }
    let components = if doubles == 1 {
        ComponentCount::One
    } else {
        ComponentCount::Four
    };
    let mut header = OperandHeader::new(OPERAND_TYPE_IMMEDIATE64, components, Selection::Mask(0));
    header.extended = extension.is_some();
    out.push(header.encode());
    out.words.extend(extension);

    for (text, span) in parts {
        if hex {
            let word = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .and_then(|h| u32::from_str_radix(h, 16).ok())
                .ok_or(ParseErrorKind::InvalidLiteral)?;
            out.push(word);
        } else {
            let value = parse_f64_literal(text).ok_or(ParseErrorKind::InvalidLiteral)?;
            out.sites.push(LiteralSite {
                word: out.words.len(),
                width: LiteralWidth::F64,
                span,
                group: group.clone(),
            });
            out.words.extend(f64_words(value));
        }
    }
    Ok(())
}

/// Comma-separated components with their absolute byte spans.
pub(crate) fn split_components(inner: &str, inner_start: usize) -> Vec<(&str, Range<usize>)> {
    let mut parts = Vec::new();
    let mut pos = 0;
    for piece in inner.split(',') {
        let lead = piece.len() - piece.trim_start().len();
        let text = piece.trim();
        let start = inner_start + pos + lead;
        parts.push((text, start..start + text.len()));
        pos += piece.len() + 1;
    }
    parts
}

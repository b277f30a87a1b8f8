//! Statement splitting and tokenization.
//!
//! Operands are separated by whitespace and commas, except inside `(...)` and
//! `[...]` groups, quoted strings and `{...}` blocks. A `{min16f}`-style
//! precision tag is glued onto the token before it.

use crate::error::{ParseError, ParseErrorKind};

/// One token of a statement, borrowed from the statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the statement.
    pub start: usize,
}

impl<'a> Token<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// A statement, possibly spanning several physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line.
    pub line: usize,
    /// Raw text, physical lines joined with `\n`.
    pub text: String,
}

/// Groups physical lines into statements.
///
/// Immediate-constant-buffer blocks open on a line containing `{ {` and close
/// on the first line containing `} }`; everything in between is one statement.
pub fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, raw) in source.lines().enumerate() {
        if let Some(block) = pending.as_mut() {
            block.text.push('\n');
            block.text.push_str(raw);
            if raw.contains("} }") {
                out.extend(pending.take());
            }
            continue;
        }
        let line = LogicalLine {
            line: idx + 1,
            text: raw.to_owned(),
        };
        if raw.contains("{ {") && !raw.contains("} }") && !is_comment(raw) {
            pending = Some(line);
        } else {
            out.push(line);
        }
    }
    // An unterminated block is still handed to the assembler, which rejects it.
    out.extend(pending);
    out
}

/// True for blank lines and `//` comment lines.
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with("//")
}

/// Returns `line` without a trailing `//` comment; quoted strings are respected.
pub fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return line[..i].trim_end(),
            _ => {}
        }
        i += 1;
    }
    line.trim_end()
}

fn is_separator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == b','
}

fn is_precision_tag(inner: &str) -> bool {
    let inner = inner.trim();
    inner.starts_with("min") || inner.starts_with("def")
}

/// Splits one statement into tokens.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let unbalanced = || ParseError::new(line.trim(), ParseErrorKind::Unbalanced);
    let bytes = line.as_bytes();
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if is_separator(c) {
            i += 1;
            continue;
        }
        if c == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        if c == b'"' {
            let start = i;
            i += 1;
            loop {
                match bytes.get(i) {
                    None => return Err(unbalanced()),
                    Some(b'\\') => i += 2,
                    Some(b'"') => break,
                    Some(_) => i += 1,
                }
            }
            i += 1;
            tokens.push(Token {
                text: &line[start..i],
                start,
            });
            continue;
        }
        if c == b'{' {
            let start = i;
            let mut depth = 0usize;
            loop {
                match bytes.get(i) {
                    None => return Err(unbalanced()),
                    Some(b'{') => depth += 1,
                    Some(b'}') => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    Some(_) => {}
                }
                i += 1;
            }
            i += 1;
            let block = &line[start..i];
            match tokens.last_mut() {
                Some(prev) if is_precision_tag(&block[1..block.len() - 1]) => {
                    prev.text = &line[prev.start..i];
                }
                _ => tokens.push(Token { text: block, start }),
            }
            continue;
        }

        let start = i;
        let mut depth = 0usize;
        while i < bytes.len() {
            let c = bytes[i];
            match c {
                b'(' | b'[' => depth += 1,
                b')' | b']' => {
                    depth = depth.checked_sub(1).ok_or_else(unbalanced)?;
                }
                _ if depth == 0 && (is_separator(c) || c == b'{' || c == b'"') => break,
                _ => {}
            }
            i += 1;
        }
        if depth != 0 {
            return Err(unbalanced());
        }
        tokens.push(Token {
            text: &line[start..i],
            start,
        });
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(line: &str) -> Vec<&str> {
        tokenize(line).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_on_commas_and_spaces_outside_groups() {
        assert_eq!(
            texts("mad r0.xyzw, cb0[r1.x + 2].xyzw, l(1.000000, 2.000000, 0, 0), -|r2.x|"),
            vec!["mad", "r0.xyzw", "cb0[r1.x + 2].xyzw", "l(1.000000, 2.000000, 0, 0)", "-|r2.x|"]
        );
    }

    #[test]
    fn load_class_groups_stay_with_the_mnemonic() {
        assert_eq!(
            texts("ld_structured_indexable(structured_buffer, stride=16)(mixed,mixed,mixed,mixed) r0.x, l(0), l(0), t0.xxxx"),
            vec![
                "ld_structured_indexable(structured_buffer, stride=16)(mixed,mixed,mixed,mixed)",
                "r0.x",
                "l(0)",
                "l(0)",
                "t0.xxxx"
            ]
        );
    }

    #[test]
    fn precision_tags_attach_to_previous_token() {
        let toks = tokenize("mov r0.xy {min16f}, v0.xyxx {def32 as min16f}").unwrap();
        assert_eq!(toks[1].text, "r0.xy {min16f}");
        assert_eq!(toks[2].text, "v0.xyxx {def32 as min16f}");
        assert_eq!(toks[2].start, 20);
    }

    #[test]
    fn strings_and_brace_blocks_are_single_tokens() {
        assert_eq!(
            texts(r#"printf "a, \"b\" %d", r0.x"#),
            vec!["printf", r#""a, \"b\" %d""#, "r0.x"]
        );
        assert_eq!(
            texts("dcl_immediateConstantBuffer { { 1.0, 0, 0, 0},\n { 0, 1.0, 0, 0} }"),
            vec![
                "dcl_immediateConstantBuffer",
                "{ { 1.0, 0, 0, 0},\n { 0, 1.0, 0, 0} }"
            ]
        );
    }

    #[test]
    fn trailing_comments_are_ignored() {
        assert_eq!(texts("ret // done"), vec!["ret"]);
        assert_eq!(strip_comment(r#"printf "//not", r0.x // yes"#), r#"printf "//not", r0.x"#);
    }

    #[test]
    fn unbalanced_input_is_rejected() {
        for bad in ["mov r0.x, l(1.0", "mov r0.x, cb0[1]].x", "printf \"oops", "x { {"] {
            let err = tokenize(bad).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::Unbalanced, "{bad}");
        }
    }

    #[test]
    fn icb_blocks_join_into_one_logical_line() {
        let src = "ps_4_0\ndcl_immediateConstantBuffer { { 1.0, 0, 0, 0},\n  { 0, 1.0, 0, 0} }\n// c\nret\n";
        let lines = logical_lines(src);
        let numbers: Vec<usize> = lines.iter().map(|l| l.line).collect();
        assert_eq!(numbers, vec![1, 2, 4, 5]);
        assert_eq!(lines[1].text, "dcl_immediateConstantBuffer { { 1.0, 0, 0, 0},\n  { 0, 1.0, 0, 0} }");
        assert!(is_comment(&lines[2].text));
    }
}

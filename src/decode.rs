//! Splitting a line into tokens and classifying each token as an operand.

use std::fmt;

use crate::error::ExplainError;
use crate::register::Register;

/// Kind of a parsed operand, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Register,
    Immediate,
    Memory,
    Label,
}

impl OperandKind {
    pub fn name(self) -> &'static str {
        match self {
            OperandKind::Register => "register",
            OperandKind::Immediate => "immediate",
            OperandKind::Memory => "memory",
            OperandKind::Label => "label",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified operand token.
///
/// Every variant keeps the token exactly as written, explanations quote it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register {
        text: String,
        register: Register,
    },
    /// Anything starting with an integer literal, trailing garbage included.
    Immediate { text: String },
    /// `offset(base)`. The base is a bare word and not necessarily a register.
    Memory {
        text: String,
        offset: String,
        base: String,
    },
    /// Catch-all for every other token.
    Label { text: String },
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Register { .. } => OperandKind::Register,
            Operand::Immediate { .. } => OperandKind::Immediate,
            Operand::Memory { .. } => OperandKind::Memory,
            Operand::Label { .. } => OperandKind::Label,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Operand::Register { text, .. }
            | Operand::Immediate { text }
            | Operand::Memory { text, .. }
            | Operand::Label { text } => text,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Operand::Label { .. })
    }

    /// Value of the leading integer literal of an immediate.
    ///
    /// `None` for other kinds or when the literal does not fit in an `i64`.
    pub fn immediate_value(&self) -> Option<i64> {
        match self {
            Operand::Immediate { text } => integer_literal(text)?.value(),
            _ => None,
        }
    }

    /// `(base, offset)` of a memory reference.
    pub fn memory(&self) -> Option<(&str, &str)> {
        match self {
            Operand::Memory { base, offset, .. } => Some((base.as_str(), offset.as_str())),
            _ => None,
        }
    }
}

/// Splits a line on commas and whitespace, dropping empty tokens.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Classifies a single token.
///
/// Parenthesised tokens must be memory references, anything else always
/// classifies: register names first, then integer literals, then labels.
pub fn parse_operand(token: &str) -> Result<Operand, ExplainError> {
    let token = token.trim();

    if token.contains('(') {
        return parse_memory(token);
    }

    let text = token.to_string();
    if let Some(register) = Register::from_name(token) {
        return Ok(Operand::Register { text, register });
    }
    if integer_literal(token).is_some() {
        return Ok(Operand::Immediate { text });
    }
    Ok(Operand::Label { text })
}

fn parse_memory(token: &str) -> Result<Operand, ExplainError> {
    let invalid = || ExplainError::Parse {
        operand: token.to_string(),
    };

    let (offset, rest) = token.split_once('(').ok_or_else(invalid)?;
    let base = rest.strip_suffix(')').ok_or_else(invalid)?;

    let digits = offset.strip_prefix(&['+', '-'][..]).unwrap_or(offset);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if base.is_empty() || !base.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(invalid());
    }

    if Register::from_name(base).is_none() {
        log::warn!("Memory operand {token} uses unknown base register {base}");
    }

    Ok(Operand::Memory {
        text: token.to_string(),
        offset: offset.to_string(),
        base: base.to_string(),
    })
}

/// The digits of an integer literal found at the start of a token.
struct IntegerLiteral<'a> {
    negative: bool,
    radix: u32,
    digits: &'a str,
}

impl IntegerLiteral<'_> {
    fn value(&self) -> Option<i64> {
        let magnitude = i64::from_str_radix(self.digits, self.radix).ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

/// Finds an integer literal at the start of `token`.
///
/// Accepts an optional sign followed by `0x`, `0b`, `0o` prefixed or plain
/// decimal digits. Scanning stops at the first character that is not a digit
/// of the radix, whatever follows is ignored.
fn integer_literal(token: &str) -> Option<IntegerLiteral<'_>> {
    let (negative, unsigned) = match token.bytes().next()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let prefixed = |prefixes: [&str; 2], radix: u32| {
        let rest = prefixes
            .iter()
            .find_map(|prefix| unsigned.strip_prefix(*prefix))?;
        let digits = leading_digits(rest, radix);
        (!digits.is_empty()).then_some((radix, digits))
    };

    let (radix, digits) = match prefixed(["0x", "0X"], 16) {
        Some(found) => found,
        // A bare `0x` is not a number, unlike a `0b` or `0o` without digits
        // which still starts with the decimal zero.
        None if unsigned.starts_with("0x") || unsigned.starts_with("0X") => return None,
        None => prefixed(["0b", "0B"], 2)
            .or_else(|| prefixed(["0o", "0O"], 8))
            .unwrap_or((10, leading_digits(unsigned, 10))),
    };

    if digits.is_empty() {
        return None;
    }
    Some(IntegerLiteral {
        negative,
        radix,
        digits,
    })
}

fn leading_digits(s: &str, radix: u32) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

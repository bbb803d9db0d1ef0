//! Error types for explaining an instruction line.

use std::fmt;

use crate::decode::OperandKind;

/// What a format rule wanted at a given operand position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Register,
    Immediate,
    Memory,
    /// Branch and jump targets may be either.
    ImmediateOrLabel,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Register => write!(f, "register"),
            Expected::Immediate => write!(f, "immediate"),
            Expected::Memory => write!(f, "memory"),
            Expected::ImmediateOrLabel => write!(f, "immediate or label"),
        }
    }
}

/// Why an operand list does not fit its instruction format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    OperandCount {
        expected: usize,
        found: usize,
    },
    OperandKind {
        /// 0-based position on the line, mnemonic excluded.
        index: usize,
        expected: Expected,
        found: OperandKind,
    },
}

/// Failure while explaining a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplainError {
    /// Mnemonic is not in the instruction table.
    UnknownInstruction { mnemonic: String },
    /// Operand count or kinds do not fit the mnemonic's format.
    Format {
        /// Lowercase mnemonic, uppercased on display.
        mnemonic: String,
        mismatch: Mismatch,
    },
    /// A parenthesised operand is not `offset(register)`.
    Parse { operand: String },
}

impl fmt::Display for ExplainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplainError::UnknownInstruction { mnemonic } => {
                write!(f, "Unknown instruction {mnemonic}")
            }
            ExplainError::Format {
                mnemonic,
                mismatch: Mismatch::OperandCount { expected, found },
            } => write!(
                f,
                "{}: Incorrect number of operands, expected {expected}, got {found}",
                mnemonic.to_uppercase()
            ),
            ExplainError::Format {
                mnemonic,
                mismatch:
                    Mismatch::OperandKind {
                        index,
                        expected,
                        found,
                    },
            } => write!(
                f,
                "{}: Expect {expected} at operand {index}, got {}",
                mnemonic.to_uppercase(),
                found.name()
            ),
            ExplainError::Parse { operand } => write!(f, "Invalid memory operand: {operand}"),
        }
    }
}

impl std::error::Error for ExplainError {}

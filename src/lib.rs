//! Explains single lines of RISC-V assembly in plain English.
//!
//! https://riscv.org/technical/specifications/
//!
//! Covers a small part of the base integer ISA. Every line is handled on its
//! own, labels are never resolved and immediates are never range checked.
//!
//! ```
//! use riscv_explain::explain_instruction;
//!
//! assert_eq!(
//!     explain_instruction("lw t0, 4(sp)"),
//!     "Load word from memory[sp + 4] → t0"
//! );
//! assert!(explain_instruction("foo t0, t1").starts_with("Error in"));
//! ```

pub mod decode;
pub mod error;
pub mod explain;
pub mod register;
pub mod validate;

pub use decode::{parse_operand, tokenize, Operand, OperandKind};
pub use error::{ExplainError, Expected, Mismatch};
pub use explain::{explain, instructions, lookup, Format, InstructionSpec};
pub use register::{Register, REGISTER_NAMES};
pub use validate::{validate_format, Config};

/// Result for a line without any tokens. Not an error.
pub const EMPTY_LINE: &str = "Empty line";

/// Turns lines of assembly into explanations.
///
/// Holds no state besides its [`Config`], explaining the same line twice
/// always gives the same result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explainer {
    config: Config,
}

impl Explainer {
    pub fn new(config: Config) -> Self {
        Explainer { config }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Tokenizes, parses, validates and renders one line.
    ///
    /// Operands are parsed before the mnemonic is looked up, so a malformed
    /// memory operand wins over an unknown instruction.
    pub fn try_explain(&self, line: &str) -> Result<String, ExplainError> {
        let mut tokens = tokenize(line);
        let Some(first) = tokens.next() else {
            return Ok(EMPTY_LINE.to_string());
        };
        let mnemonic = first.to_lowercase();

        let operands = tokens
            .map(parse_operand)
            .collect::<Result<Vec<_>, _>>()?;
        for operand in &operands {
            match operand {
                Operand::Register { text, register } => {
                    log::trace!("{text}: register x{}", register.number())
                }
                _ => log::trace!("{}: {}", operand.text(), operand.kind()),
            }
        }

        let spec = validate_format(&mnemonic, &operands, self.config)?;
        Ok(spec.render(&operands))
    }

    /// Like [`Self::try_explain`], but failures become an
    /// `Error in <line>: <message>` string.
    pub fn explain_line(&self, line: &str) -> String {
        self.try_explain(line).unwrap_or_else(|err| {
            log::debug!("Rejected {line:?}: {err}");
            format!("Error in {line}: {err}")
        })
    }
}

/// Explains one line with the default [`Config`]. Never fails, errors are
/// reported in the returned string.
pub fn explain_instruction(line: &str) -> String {
    Explainer::default().explain_line(line)
}

use crate::decode::{Operand, OperandKind};
use crate::error::{ExplainError, Expected, Mismatch};
use crate::explain::{lookup, Format, InstructionSpec};

/// Knobs for how strictly lines are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Also apply the load/store check to `U` format instructions after
    /// their own check passed.
    ///
    /// Older versions of the tool did this by accident, which rejects every
    /// `lui` and `auipc`. Only useful to reproduce that output.
    pub upper_immediate_fallthrough: bool,
}

impl Config {
    pub fn upper_immediate_fallthrough(mut self, enabled: bool) -> Self {
        self.upper_immediate_fallthrough = enabled;
        self
    }
}

/// Checks the operand count and kinds against the mnemonic's format.
///
/// Returns the table entry so callers don't have to look it up again.
pub fn validate_format(
    mnemonic: &str,
    operands: &[Operand],
    config: Config,
) -> Result<&'static InstructionSpec, ExplainError> {
    let spec = lookup(mnemonic).ok_or_else(|| ExplainError::UnknownInstruction {
        mnemonic: mnemonic.to_string(),
    })?;
    log::trace!("{mnemonic} has format {:?}", spec.format);

    let check = Checker { mnemonic, operands };
    match spec.format {
        Format::R => {
            check.count(3)?;
            check.kind(0, Expected::Register)?;
            check.kind(1, Expected::Register)?;
            check.kind(2, Expected::Register)?;
        }
        Format::I => {
            check.count(3)?;
            check.kind(0, Expected::Register)?;
            check.kind(1, Expected::Register)?;
            check.kind(2, Expected::Immediate)?;
        }
        Format::S => check.register_and_memory()?,
        // `jalr rd, rs1, offset` happens to fit the branch shape. The
        // `jalr rd, offset(rs1)` form is rejected.
        Format::B => {
            check.count(3)?;
            check.kind(0, Expected::Register)?;
            check.kind(1, Expected::Register)?;
            check.kind(2, Expected::ImmediateOrLabel)?;
        }
        Format::J => {
            check.count(2)?;
            check.kind(0, Expected::Register)?;
            check.kind(1, Expected::ImmediateOrLabel)?;
        }
        Format::U => {
            check.count(2)?;
            check.kind(0, Expected::Register)?;
            check.kind(1, Expected::Immediate)?;
            if config.upper_immediate_fallthrough {
                check.register_and_memory()?;
            }
        }
        Format::E => check.count(0)?,
    }

    Ok(spec)
}

struct Checker<'a> {
    mnemonic: &'a str,
    operands: &'a [Operand],
}

impl Checker<'_> {
    fn mismatch(&self, mismatch: Mismatch) -> ExplainError {
        ExplainError::Format {
            mnemonic: self.mnemonic.to_string(),
            mismatch,
        }
    }

    fn count(&self, expected: usize) -> Result<(), ExplainError> {
        if self.operands.len() == expected {
            Ok(())
        } else {
            Err(self.mismatch(Mismatch::OperandCount {
                expected,
                found: self.operands.len(),
            }))
        }
    }

    /// The count must have been checked before.
    fn kind(&self, index: usize, expected: Expected) -> Result<(), ExplainError> {
        let found = self.operands[index].kind();
        let fits = match expected {
            Expected::Register => found == OperandKind::Register,
            Expected::Immediate => found == OperandKind::Immediate,
            Expected::Memory => found == OperandKind::Memory,
            Expected::ImmediateOrLabel => {
                matches!(found, OperandKind::Immediate | OperandKind::Label)
            }
        };
        if fits {
            Ok(())
        } else {
            Err(self.mismatch(Mismatch::OperandKind {
                index,
                expected,
                found,
            }))
        }
    }

    fn register_and_memory(&self) -> Result<(), ExplainError> {
        self.count(2)?;
        self.kind(0, Expected::Register)?;
        self.kind(1, Expected::Memory)
    }
}

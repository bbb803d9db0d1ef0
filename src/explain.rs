use std::fmt;

use crate::decode::Operand;
use crate::error::ExplainError;
use crate::validate::{validate_format, Config};

/// Operand shape of an instruction.
///
/// Loosely named after the RISC-V encoding formats, but classifying how the
/// operands are written rather than how the instruction is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `rd, rs1, rs2`
    R,
    /// `rd, rs1, imm`
    I,
    /// `reg, offset(base)`, loads and stores alike
    S,
    /// `rs1, rs2, target`, also used for `jalr`
    B,
    /// `rd, target`
    J,
    /// `rd, imm`
    U,
    /// No operands
    E,
}

/// Entry of the instruction table.
pub struct InstructionSpec {
    pub mnemonic: &'static str,
    pub format: Format,
    render: fn(&[Operand]) -> String,
}

impl InstructionSpec {
    const fn new(mnemonic: &'static str, format: Format, render: fn(&[Operand]) -> String) -> Self {
        InstructionSpec {
            mnemonic,
            format,
            render,
        }
    }

    /// Renders the explanation. `operands` must already fit [`Self::format`].
    pub(crate) fn render(&self, operands: &[Operand]) -> String {
        (self.render)(operands)
    }
}

impl fmt::Debug for InstructionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionSpec")
            .field("mnemonic", &self.mnemonic)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

static INSTRUCTIONS: &[InstructionSpec] = &[
    // Register operations
    InstructionSpec::new("add", Format::R, explain_add),
    InstructionSpec::new("sub", Format::R, explain_sub),
    InstructionSpec::new("xor", Format::R, explain_xor),
    InstructionSpec::new("or", Format::R, explain_or),
    InstructionSpec::new("and", Format::R, explain_and),
    InstructionSpec::new("sll", Format::R, explain_sll),
    InstructionSpec::new("srl", Format::R, explain_srl),
    // Immediate operations
    InstructionSpec::new("addi", Format::I, explain_add),
    InstructionSpec::new("xori", Format::I, explain_xor),
    InstructionSpec::new("ori", Format::I, explain_or),
    InstructionSpec::new("andi", Format::I, explain_and),
    // Load/Store
    InstructionSpec::new("lw", Format::S, explain_lw),
    InstructionSpec::new("ld", Format::S, explain_ld),
    InstructionSpec::new("sw", Format::S, explain_sw),
    InstructionSpec::new("sd", Format::S, explain_sd),
    // Branches
    InstructionSpec::new("beq", Format::B, explain_beq),
    InstructionSpec::new("bne", Format::B, explain_bne),
    InstructionSpec::new("blt", Format::B, explain_blt),
    InstructionSpec::new("bge", Format::B, explain_bge),
    InstructionSpec::new("jalr", Format::B, explain_jalr),
    // Jumps
    InstructionSpec::new("jal", Format::J, explain_jal),
    // Upper immediates
    InstructionSpec::new("lui", Format::U, explain_lui),
    InstructionSpec::new("auipc", Format::U, explain_auipc),
    // System
    InstructionSpec::new("ecall", Format::E, explain_ecall),
    InstructionSpec::new("ebreak", Format::E, explain_ebreak),
];

/// Looks up a lowercase mnemonic.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionSpec> {
    INSTRUCTIONS.iter().find(|spec| spec.mnemonic == mnemonic)
}

/// Every known instruction, in table order.
pub fn instructions() -> impl Iterator<Item = &'static InstructionSpec> {
    INSTRUCTIONS.iter()
}

/// Explains an already tokenized instruction.
///
/// The operands are validated with the default [`Config`] before rendering.
pub fn explain(mnemonic: &str, operands: &[Operand]) -> Result<String, ExplainError> {
    let spec = validate_format(mnemonic, operands, Config::default())?;
    Ok(spec.render(operands))
}

fn memory_of(op: &Operand) -> (&str, &str) {
    // Only reachable with operands that skipped validation
    op.memory().unwrap_or((op.text(), "0"))
}

fn explain_add(ops: &[Operand]) -> String {
    format!(
        "Add {} to {} and store result in {}",
        ops[2].text(),
        ops[1].text(),
        ops[0].text()
    )
}

fn explain_sub(ops: &[Operand]) -> String {
    format!(
        "Subtract {} from {} and store result in {}",
        ops[2].text(),
        ops[1].text(),
        ops[0].text()
    )
}

fn explain_xor(ops: &[Operand]) -> String {
    format!(
        "XOR {} to {} and store result in {}",
        ops[2].text(),
        ops[1].text(),
        ops[0].text()
    )
}

fn explain_or(ops: &[Operand]) -> String {
    format!(
        "OR {} to {} and store result in {}",
        ops[2].text(),
        ops[1].text(),
        ops[0].text()
    )
}

fn explain_and(ops: &[Operand]) -> String {
    format!(
        "AND {} to {} and store result in {}",
        ops[2].text(),
        ops[1].text(),
        ops[0].text()
    )
}

fn explain_sll(ops: &[Operand]) -> String {
    format!(
        "{} << {} and store result in {}",
        ops[1].text(),
        ops[2].text(),
        ops[0].text()
    )
}

fn explain_srl(ops: &[Operand]) -> String {
    format!(
        "{} >> {} and store result in {}",
        ops[1].text(),
        ops[2].text(),
        ops[0].text()
    )
}

fn explain_lw(ops: &[Operand]) -> String {
    let (base, offset) = memory_of(&ops[1]);
    format!("Load word from memory[{base} + {offset}] → {}", ops[0].text())
}

fn explain_ld(ops: &[Operand]) -> String {
    let (base, offset) = memory_of(&ops[1]);
    format!("Load dword from memory[{base} + {offset}] → {}", ops[0].text())
}

fn explain_sw(ops: &[Operand]) -> String {
    let (base, offset) = memory_of(&ops[1]);
    format!("Store word {} → memory[{base} + {offset}]", ops[0].text())
}

fn explain_sd(ops: &[Operand]) -> String {
    let (base, offset) = memory_of(&ops[1]);
    format!("Store dword {} → memory[{base} + {offset}]", ops[0].text())
}

fn explain_branch(ops: &[Operand], relation: &str) -> String {
    format!(
        "Branch to {} if {} {relation} {}",
        ops[2].text(),
        ops[0].text(),
        ops[1].text()
    )
}

fn explain_beq(ops: &[Operand]) -> String {
    explain_branch(ops, "==")
}

fn explain_bne(ops: &[Operand]) -> String {
    explain_branch(ops, "!=")
}

fn explain_blt(ops: &[Operand]) -> String {
    explain_branch(ops, "<")
}

fn explain_bge(ops: &[Operand]) -> String {
    explain_branch(ops, ">=")
}

/// `jalr rd, base, target`. Whether the target reads as a label decides the wording.
fn explain_jalr(ops: &[Operand]) -> String {
    let target = if ops[2].is_label() { "label" } else { "offset" };
    format!(
        "Jump to {target} {} + {} and store return address in {}",
        ops[1].text(),
        ops[2].text(),
        ops[0].text()
    )
}

fn explain_jal(ops: &[Operand]) -> String {
    let target = if ops[1].is_label() { "label" } else { "offset" };
    format!(
        "Jump to {target} {} and store return address in {}",
        ops[1].text(),
        ops[0].text()
    )
}

fn explain_lui(ops: &[Operand]) -> String {
    format!("Save {} << 12 to {}", ops[1].text(), ops[0].text())
}

/// Relative to the address of the `auipc` itself.
fn explain_auipc(ops: &[Operand]) -> String {
    format!("Save PC + ({} << 12) to {}", ops[1].text(), ops[0].text())
}

fn explain_ecall(_ops: &[Operand]) -> String {
    "Environment call".to_string()
}

fn explain_ebreak(_ops: &[Operand]) -> String {
    "Environment break".to_string()
}

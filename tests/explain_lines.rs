//!
//! End to end checks of whole lines against their expected explanation.
//!
//! Error lines are matched by prefix and keywords, the rest exactly.
//!

use riscv_explain::{explain_instruction, instructions, Config, Explainer, Format};

fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .format_timestamp(None)
        .is_test(true)
        .try_init();
}

macro_rules! line_test {
    ($name:ident, $line:literal => error [$($needle:expr),*]) => {
        #[test]
        fn $name() {
            init_logger();
            let explanation = explain_instruction($line);
            assert!(
                explanation.starts_with(concat!("Error in ", $line, ": ")),
                "{explanation}"
            );
            $(
                assert!(explanation.contains($needle), "{explanation} lacks {}", $needle);
            )*
        }
    };
    ($name:ident, $line:expr => $expected:expr) => {
        #[test]
        fn $name() {
            init_logger();
            assert_eq!(explain_instruction($line), $expected);
        }
    };
}

// Register operations
line_test! { add, "add t0, t1, t2" => "Add t2 to t1 and store result in t0" }
line_test! { add_spaces_only, "add t0 t1 t2" => "Add t2 to t1 and store result in t0" }
line_test! { add_padded, "   add   t0 ,t1,   t2   " => "Add t2 to t1 and store result in t0" }
line_test! { sub, "sub a0, a1, a2" => "Subtract a2 from a1 and store result in a0" }
line_test! { xor, "xor s1, s2, s3" => "XOR s3 to s2 and store result in s1" }
line_test! { or, "or t3, t4, t5" => "OR t5 to t4 and store result in t3" }
line_test! { and, "and a0, a0, zero" => "AND zero to a0 and store result in a0" }
line_test! { sll, "sll t0, t1, t2" => "t1 << t2 and store result in t0" }
line_test! { srl, "srl t0, t1, t2" => "t1 >> t2 and store result in t0" }

// Immediate operations
line_test! { addi, "addi sp, sp, -16" => "Add -16 to sp and store result in sp" }
line_test! { xori, "xori a0, a1, 0xff" => "XOR 0xff to a1 and store result in a0" }
line_test! { ori, "ori a0, a1, 1" => "OR 1 to a1 and store result in a0" }
line_test! { andi, "andi a0, a1, 7" => "AND 7 to a1 and store result in a0" }
line_test! { addi_trailing_garbage, "addi t0, t1, 5abc" => "Add 5abc to t1 and store result in t0" }

// Load/Store
line_test! { lw, "lw t0, 4(sp)" => "Load word from memory[sp + 4] → t0" }
line_test! { ld, "ld ra, 8(sp)" => "Load dword from memory[sp + 8] → ra" }
line_test! { sw, "sw a0, 0(s0)" => "Store word a0 → memory[s0 + 0]" }
line_test! { sd, "sd ra, -8(sp)" => "Store dword ra → memory[sp + -8]" }

// Branches
line_test! { beq, "beq t0, t1, done" => "Branch to done if t0 == t1" }
line_test! { bne, "bne t0, zero, -8" => "Branch to -8 if t0 != zero" }
line_test! { blt, "blt a0, a1, loop" => "Branch to loop if a0 < a1" }
line_test! { bge, "bge a0, a1, 12" => "Branch to 12 if a0 >= a1" }

// Jumps
line_test! { jal_label, "jal ra, loop" => "Jump to label loop and store return address in ra" }
line_test! { jal_offset, "jal ra, 2048" => "Jump to offset 2048 and store return address in ra" }
line_test! { jalr_label, "jalr ra, t0, func" => "Jump to label t0 + func and store return address in ra" }
line_test! { jalr_offset, "jalr ra, t0, 0" => "Jump to offset t0 + 0 and store return address in ra" }

// Upper immediates
line_test! { lui, "lui t0, 5" => "Save 5 << 12 to t0" }
line_test! { auipc, "auipc a0, 0x1000" => "Save PC + (0x1000 << 12) to a0" }

// System
line_test! { ecall, "ecall" => "Environment call" }
line_test! { ebreak, "EBREAK" => "Environment break" }

// Empty
line_test! { empty, "" => "Empty line" }
line_test! { blank, "  \t " => "Empty line" }

// Errors
line_test! { numeric_register_names, "add x1, x2, x3" => error ["ADD", "register", "label"] }
line_test! { unknown, "foo t0, t1" => error ["Unknown instruction foo"] }
line_test! { unknown_pseudo, "li t0, 5" => error ["Unknown instruction li"] }
line_test! { too_few, "add t0, t1" => error ["ADD", "Incorrect number of operands"] }
line_test! { too_many, "jal ra, loop, 4" => error ["JAL", "Incorrect number of operands"] }
line_test! { ecall_with_operand, "ecall a7" => error ["ECALL", "Incorrect number of operands"] }
line_test! { load_without_memory, "lw t0, sp" => error ["LW", "memory", "operand 1"] }
line_test! { malformed_memory, "lw t0, 4(sp" => error ["Invalid memory operand: 4(sp"] }
line_test! { jalr_memory_form, "jalr ra, 0(t0)" => error ["JALR", "Incorrect number of operands"] }
line_test! { immediate_expected, "addi t0, t1, t2" => error ["ADDI", "immediate", "operand 2"] }
line_test! { upper_register, "lui t0, t1" => error ["LUI", "immediate", "register"] }

/// One well formed operand list per format.
fn minimal_line(mnemonic: &str, format: Format) -> String {
    let operands = match format {
        Format::R => " t0, t1, t2",
        Format::I => " t0, t1, 1",
        Format::S => " t0, 0(sp)",
        Format::B => " t0, t1, target",
        Format::J => " ra, target",
        Format::U => " t0, 1",
        Format::E => "",
    };
    format!("{mnemonic}{operands}")
}

#[test]
fn every_instruction_explains() {
    init_logger();
    for spec in instructions() {
        let line = minimal_line(spec.mnemonic, spec.format);
        let explanation = explain_instruction(&line);
        assert!(!explanation.starts_with("Error in"), "{line}: {explanation}");
        assert!(!explanation.is_empty());
    }
}

#[test]
fn legacy_fallthrough_only_breaks_upper_immediates() {
    init_logger();
    let legacy = Explainer::new(Config::default().upper_immediate_fallthrough(true));
    for spec in instructions() {
        let line = minimal_line(spec.mnemonic, spec.format);
        let explanation = legacy.explain_line(&line);
        assert_eq!(
            explanation.starts_with("Error in"),
            spec.format == Format::U,
            "{line}: {explanation}"
        );
    }
}

#[test]
fn repeated_calls_agree() {
    for line in ["add t0, t1, t2", "lw t0, 4(sp)", "foo", "", "lw t0, 4(sp"] {
        assert_eq!(explain_instruction(line), explain_instruction(line));
    }
}

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// ABI names of the integer registers, ordered by architectural number.
pub const REGISTER_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Integer register, numbered as `x0`..`x31`.
///
/// Only the ABI names are recognised in assembly text. `x5` is not `t0`
/// as far as the parser is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Register {
    /// Hardwired zero
    Zero = 0,
    /// Return address
    Ra,
    /// Stack pointer
    Sp,
    /// Global pointer
    Gp,
    /// Thread pointer
    Tp,
    T0,
    T1,
    T2,
    /// Also the frame pointer
    S0,
    S1,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
    S11,
    T3,
    T4,
    T5,
    T6,
}

impl Register {
    /// Looks up an ABI register name. Matching is exact and case sensitive.
    pub fn from_name(name: &str) -> Option<Register> {
        let index = REGISTER_NAMES.iter().position(|&known| known == name)?;
        Register::try_from(index as u8).ok()
    }

    pub fn name(self) -> &'static str {
        REGISTER_NAMES[self.number() as usize]
    }

    /// Architectural number, i.e. the `n` in `xn`.
    pub fn number(self) -> u8 {
        self.into()
    }
}

#[test]
fn names_match_numbers() {
    assert_eq!(Register::from_name("zero"), Some(Register::Zero));
    assert_eq!(Register::from_name("sp").map(Register::number), Some(2));
    assert_eq!(Register::from_name("s2"), Some(Register::S2));
    assert_eq!(Register::T6.number(), 31);
    assert_eq!(Register::S11.name(), "s11");

    for (n, name) in REGISTER_NAMES.iter().enumerate() {
        let reg = Register::from_name(name).expect("every listed name is a register");
        assert_eq!(reg.number() as usize, n);
        assert_eq!(reg.name(), *name);
    }
}

#[test]
fn numeric_names_are_not_registers() {
    assert_eq!(Register::from_name("x1"), None);
    assert_eq!(Register::from_name("fp"), None);
    assert_eq!(Register::from_name("SP"), None);
}

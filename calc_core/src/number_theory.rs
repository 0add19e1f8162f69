//! # Number Theory
//!
//! Integer utilities behind the math-utilities screen: factorial,
//! primality, GCD/LCM, 32-bit bitwise operations and radix conversion,
//! plus square root and power. [`MathUtilityInput`] ties them together the
//! way the screen does, turning two text fields into one display string.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::number_theory::{convert_base, factorial, gcd, is_prime, NumberBase};
//!
//! assert_eq!(factorial(5.0).unwrap(), 120.0);
//! assert!(is_prime(97));
//! assert_eq!(gcd(12, 18), 6);
//! assert_eq!(convert_base("FF", NumberBase::Hexadecimal, NumberBase::Decimal).unwrap(), "255");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::number::{format_number, parse_number, parse_optional};

/// Largest argument whose factorial is finite in `f64`
pub const MAX_FACTORIAL_ARGUMENT: f64 = 170.0;

// ============================================================================
// Core functions
// ============================================================================

/// `n!` for a non-negative integer `n <= 170`.
pub fn factorial(n: f64) -> CalcResult<f64> {
    if n < 0.0 {
        return Err(CalcError::invalid_domain(
            "factorial",
            "Factorial is not defined for negative numbers",
        ));
    }
    if n.fract() != 0.0 {
        return Err(CalcError::invalid_domain("factorial", "Factorial is only defined for integers"));
    }
    if n > MAX_FACTORIAL_ARGUMENT {
        return Err(CalcError::invalid_domain("factorial", "Result is too large to represent"));
    }
    Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
}

/// Trial division by odd candidates up to `√n`.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Greatest common divisor (Euclid); `gcd(a, 0) = a`.
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple; `lcm(0, 0) = 0`.
pub fn lcm(a: u64, b: u64) -> CalcResult<u64> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or_else(|| CalcError::invalid_domain("lcm", "Result is too large to represent"))
}

/// Square root; negative input is a domain error.
pub fn square_root(x: f64) -> CalcResult<f64> {
    if x < 0.0 {
        return Err(CalcError::invalid_domain(
            "square_root",
            "Cannot calculate square root of negative number",
        ));
    }
    Ok(x.sqrt())
}

/// `base ^ exponent`, with the exponent defaulting to 2.
pub fn power(base: f64, exponent: Option<f64>) -> CalcResult<f64> {
    let value = base.powf(exponent.unwrap_or(2.0));
    if !value.is_finite() {
        return Err(CalcError::invalid_domain("power", "Result is not a finite number"));
    }
    Ok(value)
}

// ============================================================================
// Bitwise operations
// ============================================================================

/// Bitwise operation on 32-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinaryOp {
    #[default]
    And,
    Or,
    Xor,
    Not,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [BinaryOp::And, BinaryOp::Or, BinaryOp::Xor, BinaryOp::Not];

    pub fn label(&self) -> &'static str {
        match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Xor => "XOR",
            BinaryOp::Not => "NOT",
        }
    }

    pub fn from_str_flexible(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.label().eq_ignore_ascii_case(s.trim()))
    }

    /// `NOT` is unary; the others need a second operand.
    pub fn is_unary(&self) -> bool {
        matches!(self, BinaryOp::Not)
    }
}

/// Truncate toward zero and wrap into a signed 32-bit integer.
fn to_int32(value: f64) -> i32 {
    value.trunc() as i64 as i32
}

/// Apply a bitwise operation. AND/OR/XOR render in decimal; NOT renders
/// the unsigned 32-bit complement of `a` in base 2 and ignores `b`.
pub fn binary_operation(a: f64, b: f64, op: BinaryOp) -> String {
    let a = to_int32(a);
    let b = to_int32(b);
    match op {
        BinaryOp::And => (a & b).to_string(),
        BinaryOp::Or => (a | b).to_string(),
        BinaryOp::Xor => (a ^ b).to_string(),
        BinaryOp::Not => format!("{:b}", !a as u32),
    }
}

// ============================================================================
// Base conversion
// ============================================================================

/// Radix offered by the base converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum NumberBase {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl NumberBase {
    pub const ALL: [NumberBase; 4] = [
        NumberBase::Binary,
        NumberBase::Octal,
        NumberBase::Decimal,
        NumberBase::Hexadecimal,
    ];

    pub fn radix(&self) -> u32 {
        match self {
            NumberBase::Binary => 2,
            NumberBase::Octal => 8,
            NumberBase::Decimal => 10,
            NumberBase::Hexadecimal => 16,
        }
    }

    pub fn from_radix(radix: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.radix() == radix)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NumberBase::Binary => "Binary (2)",
            NumberBase::Octal => "Octal (8)",
            NumberBase::Decimal => "Decimal (10)",
            NumberBase::Hexadecimal => "Hexadecimal (16)",
        }
    }

    fn render(&self, value: u64) -> String {
        match self {
            NumberBase::Binary => format!("{value:b}"),
            NumberBase::Octal => format!("{value:o}"),
            NumberBase::Decimal => value.to_string(),
            NumberBase::Hexadecimal => format!("{value:X}"),
        }
    }
}

impl TryFrom<u32> for NumberBase {
    type Error = String;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        NumberBase::from_radix(radix).ok_or_else(|| format!("unsupported base {radix}"))
    }
}

impl From<NumberBase> for u32 {
    fn from(base: NumberBase) -> Self {
        base.radix()
    }
}

impl fmt::Display for NumberBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Re-express an integer written in `from` using `to` (upper-case hex digits).
pub fn convert_base(input: &str, from: NumberBase, to: NumberBase) -> CalcResult<String> {
    let text = input.trim();
    let invalid = || CalcError::invalid_domain("base_conversion", "Invalid number for the selected base");

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || digits.starts_with('+') {
        return Err(invalid());
    }
    let magnitude = u64::from_str_radix(digits, from.radix()).map_err(|_| invalid())?;

    let rendered = to.render(magnitude);
    Ok(if negative && magnitude != 0 {
        format!("-{rendered}")
    } else {
        rendered
    })
}

// ============================================================================
// Math utilities screen
// ============================================================================

/// Operation selected on the math-utilities screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MathOperation {
    SquareRoot,
    Power,
    Factorial,
    PrimeCheck,
    Lcm,
    Gcd,
    BinaryOps,
    BaseConverter,
}

impl MathOperation {
    pub const ALL: [MathOperation; 8] = [
        MathOperation::SquareRoot,
        MathOperation::Power,
        MathOperation::Factorial,
        MathOperation::PrimeCheck,
        MathOperation::Lcm,
        MathOperation::Gcd,
        MathOperation::BinaryOps,
        MathOperation::BaseConverter,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MathOperation::SquareRoot => "Square Root",
            MathOperation::Power => "Power",
            MathOperation::Factorial => "Factorial",
            MathOperation::PrimeCheck => "Prime Check",
            MathOperation::Lcm => "LCM",
            MathOperation::Gcd => "GCD",
            MathOperation::BinaryOps => "Binary Operations",
            MathOperation::BaseConverter => "Base Converter",
        }
    }

    /// Parse from `SQUARE_ROOT`, `square-root`, `Square Root`, `sqrt`, ...
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace(['_', '-', ' '], "");
        match key.as_str() {
            "squareroot" | "sqrt" => Some(MathOperation::SquareRoot),
            "power" | "pow" => Some(MathOperation::Power),
            "factorial" | "fact" => Some(MathOperation::Factorial),
            "primecheck" | "prime" | "isprime" => Some(MathOperation::PrimeCheck),
            "lcm" => Some(MathOperation::Lcm),
            "gcd" => Some(MathOperation::Gcd),
            "binaryops" | "binaryoperations" | "bitwise" => Some(MathOperation::BinaryOps),
            "baseconverter" | "base" => Some(MathOperation::BaseConverter),
            _ => None,
        }
    }
}

impl fmt::Display for MathOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn default_from_base() -> NumberBase {
    NumberBase::Decimal
}

fn default_to_base() -> NumberBase {
    NumberBase::Binary
}

/// Text fields and selectors of the math-utilities screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathUtilityInput {
    pub operation: MathOperation,
    /// First input field
    pub input1: String,
    /// Second input field (exponent, second operand)
    #[serde(default)]
    pub input2: Option<String>,
    #[serde(default)]
    pub binary_op: BinaryOp,
    #[serde(default = "default_from_base")]
    pub from_base: NumberBase,
    #[serde(default = "default_to_base")]
    pub to_base: NumberBase,
}

impl MathUtilityInput {
    pub fn new(operation: MathOperation, input1: impl Into<String>) -> Self {
        MathUtilityInput {
            operation,
            input1: input1.into(),
            input2: None,
            binary_op: BinaryOp::default(),
            from_base: default_from_base(),
            to_base: default_to_base(),
        }
    }

    pub fn with_second(mut self, input2: impl Into<String>) -> Self {
        self.input2 = Some(input2.into());
        self
    }

    fn second(&self) -> CalcResult<Option<f64>> {
        match &self.input2 {
            Some(text) => parse_optional("input2", text),
            None => Ok(None),
        }
    }

    fn require_second(&self, what: &str) -> CalcResult<f64> {
        self.second()?
            .ok_or_else(|| CalcError::incomplete_input("input2", format!("Second number is required for {what}")))
    }
}

/// Display string produced by the math-utilities screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathUtilityResult {
    pub operation: MathOperation,
    pub output: String,
}

fn require_integer(operation: MathOperation, value: f64) -> CalcResult<u64> {
    if value.fract() != 0.0 || value.abs() > u64::MAX as f64 {
        return Err(CalcError::invalid_domain(
            operation.display_name(),
            format!("{} is only defined for integers", operation.display_name()),
        ));
    }
    Ok(value.abs() as u64)
}

/// Run the selected operation and format its output.
pub fn calculate(input: &MathUtilityInput) -> CalcResult<MathUtilityResult> {
    let op = input.operation;

    let first = || parse_number("input1", &input.input1);

    let output = match op {
        MathOperation::SquareRoot => format_number(square_root(first()?)?),
        MathOperation::Power => format_number(power(first()?, input.second()?)?),
        MathOperation::Factorial => format_number(factorial(first()?)?),
        MathOperation::PrimeCheck => {
            let a = first()?;
            let prime = a.fract() == 0.0 && is_prime(a as i64);
            if prime { "Prime" } else { "Not Prime" }.to_string()
        }
        MathOperation::Lcm => {
            let a = first()?;
            let b = input.require_second("LCM")?;
            lcm(require_integer(op, a)?, require_integer(op, b)?)?.to_string()
        }
        MathOperation::Gcd => {
            let a = first()?;
            let b = input.require_second("GCD")?;
            gcd(require_integer(op, a)?, require_integer(op, b)?).to_string()
        }
        MathOperation::BinaryOps => {
            let a = first()?;
            let b = if input.binary_op.is_unary() {
                0.0
            } else {
                input.require_second(input.binary_op.label())?
            };
            binary_operation(a, b, input.binary_op)
        }
        MathOperation::BaseConverter => convert_base(&input.input1, input.from_base, input.to_base)?,
    };

    debug!(operation = %op, %output, "math utility calculated");
    Ok(MathUtilityResult { operation: op, output })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(1.0).unwrap(), 1.0);
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert!(factorial(170.0).unwrap().is_finite());
        assert_eq!(factorial(-1.0).unwrap_err().error_code(), "INVALID_DOMAIN");
        assert!(factorial(2.5).is_err());
        assert!(factorial(171.0).is_err());
    }

    #[test]
    fn test_is_prime() {
        assert!(is_prime(2));
        assert!(!is_prime(1));
        assert!(is_prime(97));
        assert!(!is_prime(100));
        assert!(!is_prime(-7));
        assert!(!is_prime(49));
        assert!(is_prime(7919));
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(4, 6).unwrap(), 12);
        assert_eq!(lcm(0, 0).unwrap(), 0);
        assert!(lcm(u64::MAX, u64::MAX - 1).is_err());
    }

    #[test]
    fn test_binary_operations() {
        assert_eq!(binary_operation(12.0, 10.0, BinaryOp::And), "8");
        assert_eq!(binary_operation(12.0, 10.0, BinaryOp::Or), "14");
        assert_eq!(binary_operation(12.0, 10.0, BinaryOp::Xor), "6");
        assert_eq!(binary_operation(5.9, 3.2, BinaryOp::And), "1");
        assert_eq!(binary_operation(0.0, 0.0, BinaryOp::Not), "1".repeat(32));
        assert_eq!(binary_operation(5.0, 0.0, BinaryOp::Not), format!("{}010", "1".repeat(29)));
    }

    #[test]
    fn test_convert_base() {
        use NumberBase::*;
        assert_eq!(convert_base("FF", Hexadecimal, Decimal).unwrap(), "255");
        assert_eq!(convert_base("255", Decimal, Binary).unwrap(), "11111111");
        assert_eq!(convert_base("ff", Hexadecimal, Octal).unwrap(), "377");
        assert_eq!(convert_base("-10", Decimal, Hexadecimal).unwrap(), "-A");
        assert_eq!(convert_base("3054", Decimal, Hexadecimal).unwrap(), "BEE");
        assert_eq!(
            convert_base("102", Binary, Decimal).unwrap_err().error_code(),
            "INVALID_DOMAIN"
        );
        assert!(convert_base("", Decimal, Binary).is_err());
        assert!(convert_base("--5", Decimal, Binary).is_err());
    }

    #[test]
    fn test_number_base_serializes_as_radix() {
        assert_eq!(serde_json::to_string(&NumberBase::Hexadecimal).unwrap(), "16");
        assert!(serde_json::from_str::<NumberBase>("3").is_err());
    }

    #[test]
    fn test_screen_operations() {
        let run = |input: MathUtilityInput| calculate(&input).unwrap().output;

        assert_eq!(run(MathUtilityInput::new(MathOperation::SquareRoot, "16")), "4");
        assert_eq!(run(MathUtilityInput::new(MathOperation::Power, "3")), "9");
        assert_eq!(run(MathUtilityInput::new(MathOperation::Power, "2").with_second("10")), "1024");
        assert_eq!(run(MathUtilityInput::new(MathOperation::Factorial, "6")), "720");
        assert_eq!(run(MathUtilityInput::new(MathOperation::PrimeCheck, "97")), "Prime");
        assert_eq!(run(MathUtilityInput::new(MathOperation::PrimeCheck, "9.5")), "Not Prime");
        assert_eq!(run(MathUtilityInput::new(MathOperation::Gcd, "-12").with_second("18")), "6");
        assert_eq!(run(MathUtilityInput::new(MathOperation::Lcm, "4").with_second("6")), "12");

        let mut not = MathUtilityInput::new(MathOperation::BinaryOps, "0");
        not.binary_op = BinaryOp::Not;
        assert_eq!(run(not), "1".repeat(32));

        let mut base = MathUtilityInput::new(MathOperation::BaseConverter, "FF");
        base.from_base = NumberBase::Hexadecimal;
        base.to_base = NumberBase::Decimal;
        assert_eq!(run(base), "255");
    }

    #[test]
    fn test_screen_errors() {
        let err = calculate(&MathUtilityInput::new(MathOperation::Lcm, "4")).unwrap_err();
        assert_eq!(err.user_message(), "Second number is required for LCM");

        let err = calculate(&MathUtilityInput::new(MathOperation::BinaryOps, "4")).unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_INPUT");

        let err = calculate(&MathUtilityInput::new(MathOperation::SquareRoot, "-4")).unwrap_err();
        assert_eq!(err.user_message(), "Cannot calculate square root of negative number");

        assert!(calculate(&MathUtilityInput::new(MathOperation::Gcd, "4.5").with_second("3")).is_err());
        assert!(calculate(&MathUtilityInput::new(MathOperation::Factorial, "abc")).is_err());
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!(MathOperation::from_str_flexible("SQUARE_ROOT"), Some(MathOperation::SquareRoot));
        assert_eq!(MathOperation::from_str_flexible("prime check"), Some(MathOperation::PrimeCheck));
        assert_eq!(MathOperation::from_str_flexible("base"), Some(MathOperation::BaseConverter));
        assert_eq!(BinaryOp::from_str_flexible("xor"), Some(BinaryOp::Xor));

        let input: MathUtilityInput =
            serde_json::from_str(r#"{"operation": "BASE_CONVERTER", "input1": "777", "from_base": 8}"#).unwrap();
        assert_eq!(input.to_base, NumberBase::Binary);
        assert_eq!(calculate(&input).unwrap().output, "111111111");
    }
}

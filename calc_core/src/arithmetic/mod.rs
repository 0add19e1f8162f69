//! # Arithmetic Engine
//!
//! Evaluation core of the simple and scientific calculators.
//!
//! - [`apply_operator`] folds a pending value with the current operand.
//!   Operators have no precedence: each press folds left to right, so
//!   `2 + 3 × 4` is `(2 + 3) × 4 = 20`.
//! - [`ScientificFunction`] applies immediately to the displayed value.
//! - [`keypad`] is the key-press reducer holding per-screen state.
//! - [`expression`] evaluates a whole textual expression at "=" time.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::arithmetic::{apply_operator, Operator, ScientificFunction};
//!
//! let folded = apply_operator(apply_operator(2.0, 3.0, Operator::Add), 4.0, Operator::Mul);
//! assert_eq!(folded, 20.0);
//!
//! // Division by zero saturates to 0 instead of failing
//! assert_eq!(apply_operator(7.0, 0.0, Operator::Div), 0.0);
//!
//! let half = ScientificFunction::Sin.apply(30.0).unwrap();
//! assert!((half - 0.5).abs() < 1e-12);
//! ```

pub mod expression;
pub mod keypad;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub use expression::{evaluate_expression, evaluate_or_zero, normalize_expression, ExpressionCalculator};
pub use keypad::{CalculatorState, Key};

/// Deferred binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// `x^y`, deferred exactly like the four basic operators
    Pow,
}

impl Operator {
    /// Key label as printed on the calculator
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
            Operator::Pow => "^",
        }
    }

    /// Parse a key label, accepting ASCII stand-ins (`*`, `/`, `x`)
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Operator::Add),
            "-" | "−" => Some(Operator::Sub),
            "×" | "*" | "x" => Some(Operator::Mul),
            "÷" | "/" => Some(Operator::Div),
            "^" | "x^y" => Some(Operator::Pow),
            _ => None,
        }
    }
}

/// Fold `operand` into `accumulator`.
///
/// Never fails: division by zero yields `0`, which callers must treat as a
/// legitimate value rather than a sentinel.
pub fn apply_operator(accumulator: f64, operand: f64, op: Operator) -> f64 {
    match op {
        Operator::Add => accumulator + operand,
        Operator::Sub => accumulator - operand,
        Operator::Mul => accumulator * operand,
        Operator::Div => {
            if operand == 0.0 {
                0.0
            } else {
                accumulator / operand
            }
        }
        Operator::Pow => accumulator.powf(operand),
    }
}

/// Unary scientific function. Trigonometry takes degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    Sqrt,
}

impl ScientificFunction {
    pub const ALL: [ScientificFunction; 6] = [
        ScientificFunction::Sin,
        ScientificFunction::Cos,
        ScientificFunction::Tan,
        ScientificFunction::Log,
        ScientificFunction::Ln,
        ScientificFunction::Sqrt,
    ];

    /// Name as typed in an expression
    pub fn name(&self) -> &'static str {
        match self {
            ScientificFunction::Sin => "sin",
            ScientificFunction::Cos => "cos",
            ScientificFunction::Tan => "tan",
            ScientificFunction::Log => "log",
            ScientificFunction::Ln => "ln",
            ScientificFunction::Sqrt => "sqrt",
        }
    }

    /// Parse a function name or key label (`√` is accepted for sqrt)
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "sin" => Some(ScientificFunction::Sin),
            "cos" => Some(ScientificFunction::Cos),
            "tan" => Some(ScientificFunction::Tan),
            "log" => Some(ScientificFunction::Log),
            "ln" => Some(ScientificFunction::Ln),
            "sqrt" | "√" => Some(ScientificFunction::Sqrt),
            _ => None,
        }
    }

    /// Apply the function, rejecting arguments outside its domain.
    pub fn apply(&self, value: f64) -> CalcResult<f64> {
        let result = match self {
            ScientificFunction::Sin => value.to_radians().sin(),
            ScientificFunction::Cos => value.to_radians().cos(),
            ScientificFunction::Tan => value.to_radians().tan(),
            ScientificFunction::Log | ScientificFunction::Ln => {
                if value <= 0.0 {
                    return Err(CalcError::invalid_domain(
                        self.name(),
                        "Logarithm is only defined for positive numbers",
                    ));
                }
                if *self == ScientificFunction::Log {
                    value.log10()
                } else {
                    value.ln()
                }
            }
            ScientificFunction::Sqrt => {
                if value < 0.0 {
                    return Err(CalcError::invalid_domain(
                        self.name(),
                        "Cannot calculate square root of negative number",
                    ));
                }
                value.sqrt()
            }
        };

        if !result.is_finite() {
            return Err(CalcError::invalid_domain(self.name(), "Result is not a finite number"));
        }
        Ok(result)
    }
}

/// Constant key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operators() {
        assert_eq!(apply_operator(2.0, 3.0, Operator::Add), 5.0);
        assert_eq!(apply_operator(2.0, 3.0, Operator::Sub), -1.0);
        assert_eq!(apply_operator(2.0, 3.0, Operator::Mul), 6.0);
        assert_eq!(apply_operator(3.0, 2.0, Operator::Div), 1.5);
        assert_eq!(apply_operator(2.0, 10.0, Operator::Pow), 1024.0);
    }

    #[test]
    fn test_division_by_zero_saturates() {
        assert_eq!(apply_operator(5.0, 0.0, Operator::Div), 0.0);
        assert_eq!(apply_operator(-5.0, -0.0, Operator::Div), 0.0);
        assert_eq!(apply_operator(0.0, 0.0, Operator::Div), 0.0);
    }

    #[test]
    fn test_left_to_right_folding() {
        let acc = apply_operator(2.0, 3.0, Operator::Add);
        assert_eq!(apply_operator(acc, 4.0, Operator::Mul), 20.0);
    }

    #[test]
    fn test_operator_symbols() {
        for op in [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div, Operator::Pow] {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol("*"), Some(Operator::Mul));
        assert_eq!(Operator::from_symbol("%"), None);
    }

    #[test]
    fn test_trig_in_degrees() {
        assert!((ScientificFunction::Sin.apply(90.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((ScientificFunction::Cos.apply(60.0).unwrap() - 0.5).abs() < 1e-12);
        assert!((ScientificFunction::Tan.apply(45.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_logs_and_sqrt() {
        assert!((ScientificFunction::Log.apply(1000.0).unwrap() - 3.0).abs() < 1e-12);
        assert!((ScientificFunction::Ln.apply(std::f64::consts::E).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(ScientificFunction::Sqrt.apply(144.0).unwrap(), 12.0);
    }

    #[test]
    fn test_domain_errors() {
        let err = ScientificFunction::Sqrt.apply(-4.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DOMAIN");
        assert!(ScientificFunction::Log.apply(0.0).is_err());
        assert!(ScientificFunction::Ln.apply(-1.0).is_err());
    }

    #[test]
    fn test_function_names() {
        for f in ScientificFunction::ALL {
            assert_eq!(ScientificFunction::from_name(f.name()), Some(f));
        }
        assert_eq!(ScientificFunction::from_name("√"), Some(ScientificFunction::Sqrt));
    }
}

//! Expression mode of the scientific calculator.
//!
//! The screen builds a textual expression (`8(9+6)`, `2π`, `√16 + sin(30)`)
//! and evaluates it when "=" is pressed. Evaluation happens in two steps:
//!
//! 1. [`normalize_expression`] tokenizes the input, makes implicit
//!    multiplication explicit, maps key symbols (`×`, `÷`, `π`, `√`) and
//!    scientific function names to evaluator functions, and writes every
//!    number as a float literal so division is never integer division.
//! 2. [`evaluate_expression`] runs the normalized text through `evalexpr`
//!    with the scientific functions registered (trigonometry in degrees).
//!
//! Malformed or non-finite expressions are errors from
//! [`evaluate_expression`]; the display path uses [`evaluate_or_zero`].

use evalexpr::{ContextWithMutableFunctions, EvalexprError, Function, HashMapContext, Value};
use tracing::debug;

use super::{Constant, ScientificFunction};
use crate::errors::{CalcError, CalcResult};
use crate::number::format_number;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Function(ScientificFunction),
    Constant(Constant),
    Operator(char),
    LParen,
    RParen,
}

impl Token {
    /// Token can end an operand (`2`, `)`, `π`)
    fn ends_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::RParen | Token::Constant(_))
    }

    /// Token can start an operand (`2`, `(`, `sin`, `π`)
    fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::LParen | Token::Function(_) | Token::Constant(_)
        )
    }
}

/// Name under which each scientific function is registered with the evaluator
fn evaluator_name(function: ScientificFunction) -> &'static str {
    match function {
        ScientificFunction::Sin => "sind",
        ScientificFunction::Cos => "cosd",
        ScientificFunction::Tan => "tand",
        ScientificFunction::Log => "lg",
        ScientificFunction::Ln => "ln",
        ScientificFunction::Sqrt => "root",
    }
}

fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                if literal.matches('.').count() > 1 || literal == "." {
                    return Err(CalcError::invalid_input("expression", literal, "Malformed number"));
                }
                tokens.push(Token::Number(literal));
            }
            c if c.is_alphabetic() => {
                let start = i;
                // Digits end the name so `sin30` reads as `sin` then `30`
                while i < chars.len() && chars[i].is_alphabetic() {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                let token = match name.as_str() {
                    "pi" => Token::Constant(Constant::Pi),
                    "e" => Token::Constant(Constant::E),
                    other => match ScientificFunction::from_name(other) {
                        Some(f) => Token::Function(f),
                        None => {
                            return Err(CalcError::invalid_input("expression", name, "Unknown function"));
                        }
                    },
                };
                tokens.push(token);
            }
            'π' => {
                tokens.push(Token::Constant(Constant::Pi));
                i += 1;
            }
            '√' => {
                tokens.push(Token::Function(ScientificFunction::Sqrt));
                i += 1;
            }
            '+' | '-' | '−' | '*' | '×' | '/' | '÷' | '^' => {
                let op = match c {
                    '−' => '-',
                    '×' => '*',
                    '÷' => '/',
                    other => other,
                };
                tokens.push(Token::Operator(op));
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            other => {
                return Err(CalcError::invalid_input("expression", other.to_string(), "Unexpected character"));
            }
        }
    }

    Ok(tokens)
}

fn float_literal(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 2);
    if literal.starts_with('.') {
        out.push('0');
    }
    out.push_str(literal);
    if literal.ends_with('.') {
        out.push('0');
    } else if !literal.contains('.') {
        out.push_str(".0");
    }
    out
}

/// Rewrite a calculator expression into evaluator syntax.
///
/// ```rust
/// use calc_core::arithmetic::normalize_expression;
///
/// assert_eq!(normalize_expression("8(9+6)").unwrap(), "8.0*(9.0+6.0)");
/// ```
pub fn normalize_expression(input: &str) -> CalcResult<String> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::incomplete_input("expression", "Expression is empty"));
    }

    let mut out = String::new();
    // One entry per open parenthesis: true when it opened a function call
    let mut open: Vec<bool> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if i > 0 {
            let prev = &tokens[i - 1];
            if matches!(prev, Token::Number(_)) && matches!(token, Token::Number(_)) {
                return Err(CalcError::invalid_input("expression", input, "Missing operator between numbers"));
            }
            if prev.ends_operand() && token.starts_operand() {
                out.push('*');
            }
        }

        match token {
            Token::Number(literal) => out.push_str(&float_literal(literal)),
            Token::Constant(c) => out.push_str(&format!("{:?}", c.value())),
            Token::Operator(op) => out.push(*op),
            Token::LParen => {
                open.push(false);
                out.push('(');
            }
            Token::RParen => {
                match open.pop() {
                    Some(true) => out.push_str("))"),
                    Some(false) => out.push(')'),
                    None => {
                        return Err(CalcError::invalid_input("expression", input, "Unbalanced parentheses"));
                    }
                }
            }
            Token::Function(f) => {
                out.push('(');
                out.push_str(evaluator_name(*f));
                match tokens.get(i + 1) {
                    Some(Token::LParen) => {
                        out.push('(');
                        open.push(true);
                        i += 1;
                    }
                    // `√9`, `sin30`: the argument is the next bare operand
                    Some(Token::Number(literal)) => {
                        out.push('(');
                        out.push_str(&float_literal(literal));
                        out.push_str("))");
                        i += 1;
                    }
                    Some(Token::Constant(c)) => {
                        out.push_str(&format!("({:?}))", c.value()));
                        i += 1;
                    }
                    _ => {
                        return Err(CalcError::invalid_input(
                            "expression",
                            input,
                            format!("{} needs an argument", f.name()),
                        ));
                    }
                }
            }
        }
        i += 1;
    }

    if !open.is_empty() {
        return Err(CalcError::invalid_input("expression", input, "Unbalanced parentheses"));
    }

    Ok(out)
}

fn to_f64(value: &Value) -> Result<f64, EvalexprError> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Int(i) => Ok(*i as f64),
        _ => Err(EvalexprError::expected_number(value.clone())),
    }
}

/// Register the scientific functions under their evaluator names.
///
/// Domain violations evaluate to NaN and are reported once the whole
/// expression has been evaluated.
fn register_scientific_functions(context: &mut HashMapContext) -> CalcResult<()> {
    for function in ScientificFunction::ALL {
        context
            .set_function(
                evaluator_name(function).to_string(),
                Function::new(move |argument| {
                    let x = to_f64(argument)?;
                    Ok(Value::Float(function.apply(x).unwrap_or(f64::NAN)))
                }),
            )
            .map_err(|e| CalcError::Internal {
                message: format!("Failed to register {}: {}", function.name(), e),
            })?;
    }
    Ok(())
}

/// Evaluate a calculator expression.
pub fn evaluate_expression(input: &str) -> CalcResult<f64> {
    let normalized = normalize_expression(input)?;

    let mut context = HashMapContext::new();
    register_scientific_functions(&mut context)?;

    let value = evalexpr::eval_with_context(&normalized, &context)
        .map_err(|e| CalcError::invalid_input("expression", input, e.to_string()))?;

    let result = match value {
        Value::Float(f) => f,
        Value::Int(i) => i as f64,
        _ => {
            return Err(CalcError::invalid_input(
                "expression",
                input,
                "Expression did not evaluate to a number",
            ))
        }
    };

    if !result.is_finite() {
        return Err(CalcError::invalid_domain("expression", "Result is not a finite number"));
    }

    debug!(expression = input, normalized = %normalized, result, "expression evaluated");
    Ok(result)
}

/// Evaluate for display: any invalid expression shows `0`.
pub fn evaluate_or_zero(input: &str) -> f64 {
    match evaluate_expression(input) {
        Ok(value) => value,
        Err(e) => {
            debug!(expression = input, error = %e, "expression rejected");
            0.0
        }
    }
}

/// Text-building state for expression mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionCalculator {
    /// Expression typed so far
    pub expression: String,
    /// Result of the last "=" press
    pub result: Option<f64>,
}

impl ExpressionCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key label (`"7"`, `"("`, `"sin("`, `"π"`, ...)
    pub fn push(&mut self, text: &str) {
        self.expression.push_str(text);
    }

    /// Remove the last character
    pub fn backspace(&mut self) {
        self.expression.pop();
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.result = None;
    }

    /// Evaluate the expression; the result becomes the start of the next one.
    pub fn evaluate(&mut self) -> f64 {
        let value = evaluate_or_zero(&self.expression);
        self.result = Some(value);
        self.expression = format_number(value);
        value
    }
}

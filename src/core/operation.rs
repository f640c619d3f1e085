//! Operation kinds and the registry that dispatches them.
//!
//! Every operation is a pure binary computation over `f64` operands. The
//! registry is a fixed dispatch table built at startup; it holds no state
//! beyond the table itself and is safe to share across calls.

use super::error::ArithmeticError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Fixed ceiling on result magnitude; anything beyond it reports overflow.
pub const OVERFLOW_CEILING: f64 = 1e300;

/// The closed set of built-in operation kinds.
///
/// Extending the set means adding a variant here and registering a
/// computation for it; there is no runtime name-to-class lookup.
///
/// # Example
///
/// ```rust
/// use reckoner::core::OperationKind;
///
/// let kind: OperationKind = "int_divide".parse().unwrap();
/// assert_eq!(kind, OperationKind::IntegerDivide);
/// assert!("cosine".parse::<OperationKind>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Root,
    Modulus,
    IntegerDivide,
    Percent,
    AbsoluteDifference,
}

impl OperationKind {
    /// All built-in kinds, in registration order.
    pub const ALL: [OperationKind; 10] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Root,
        Self::Modulus,
        Self::IntegerDivide,
        Self::Percent,
        Self::AbsoluteDifference,
    ];

    /// The command token this kind answers to on the command surface.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Root => "root",
            Self::Modulus => "modulus",
            Self::IntegerDivide => "int_divide",
            Self::Percent => "percent",
            Self::AbsoluteDifference => "abs_diff",
        }
    }

    /// Infix symbol for display, if the kind has a conventional one.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+"),
            Self::Subtract => Some("-"),
            Self::Multiply => Some("*"),
            Self::Divide => Some("/"),
            Self::Power => Some("^"),
            Self::Modulus => Some("%"),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for OperationKind {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.token() == lowered)
            .ok_or_else(|| ArithmeticError::UnknownOperation(s.to_string()))
    }
}

/// A pure binary computation: no side effects, no captured state.
pub type Computation = fn(f64, f64) -> Result<f64, ArithmeticError>;

fn add(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    Ok(a + b)
}

fn subtract(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a / b)
}

fn power(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    let result = a.powf(b);
    if result.abs() > OVERFLOW_CEILING {
        return Err(ArithmeticError::Overflow);
    }
    Ok(result)
}

fn root(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::InvalidRoot);
    }
    if a < 0.0 {
        let degree_is_integer = b.fract() == 0.0;
        // Even or fractional degrees of a negative base have no real result.
        if !degree_is_integer || (b.abs() % 2.0) == 0.0 {
            return Err(ArithmeticError::InvalidRoot);
        }
        return Ok(-((-a).powf(1.0 / b)));
    }
    Ok(a.powf(1.0 / b))
}

// Floored semantics: the remainder takes the sign of the divisor.
fn modulus(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a - b * (a / b).floor())
}

fn integer_divide(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok((a / b).floor())
}

fn percent(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok((a / b) * 100.0)
}

fn absolute_difference(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    Ok((a - b).abs())
}

/// Round to `precision` decimal places using round-half-to-even, rejecting
/// anything that cannot be represented as a finite number.
fn round_to_precision(value: f64, precision: u32) -> Result<f64, ArithmeticError> {
    if !value.is_finite() {
        return Err(ArithmeticError::Overflow);
    }
    let scale = 10f64.powi(precision as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return Err(ArithmeticError::Overflow);
    }
    Ok(scaled.round_ties_even() / scale)
}

/// Dispatch table from operation kind to its computation.
///
/// Built once at startup; `Default` registers all built-in kinds. New kinds
/// can be registered before the session starts, replacing any previous
/// computation for the same kind.
///
/// # Example
///
/// ```rust
/// use reckoner::core::{OperationKind, OperationRegistry};
///
/// let registry = OperationRegistry::default();
/// assert_eq!(registry.evaluate(OperationKind::Add, 10.0, 5.0, 4), Ok(15.0));
/// assert_eq!(registry.evaluate(OperationKind::Multiply, 3.0, 4.0, 4), Ok(12.0));
/// ```
#[derive(Clone)]
pub struct OperationRegistry {
    table: HashMap<OperationKind, Computation>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(OperationKind::Add, add);
        registry.register(OperationKind::Subtract, subtract);
        registry.register(OperationKind::Multiply, multiply);
        registry.register(OperationKind::Divide, divide);
        registry.register(OperationKind::Power, power);
        registry.register(OperationKind::Root, root);
        registry.register(OperationKind::Modulus, modulus);
        registry.register(OperationKind::IntegerDivide, integer_divide);
        registry.register(OperationKind::Percent, percent);
        registry.register(OperationKind::AbsoluteDifference, absolute_difference);
        registry
    }
}

impl OperationRegistry {
    /// Create a registry with no computations registered.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register a computation for a kind, replacing any existing one.
    pub fn register(&mut self, kind: OperationKind, computation: Computation) {
        self.table.insert(kind, computation);
    }

    /// Look up the computation for a kind.
    pub fn resolve(&self, kind: OperationKind) -> Result<Computation, ArithmeticError> {
        self.table
            .get(&kind)
            .copied()
            .ok_or_else(|| ArithmeticError::UnknownOperation(kind.token().to_string()))
    }

    /// Resolve and run a computation, rounding the result to `precision`
    /// decimal places with round-half-to-even.
    pub fn evaluate(
        &self,
        kind: OperationKind,
        left: f64,
        right: f64,
        precision: u32,
    ) -> Result<f64, ArithmeticError> {
        let computation = self.resolve(kind)?;
        let raw = computation(left, right)?;
        round_to_precision(raw, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(kind: OperationKind, a: f64, b: f64) -> Result<f64, ArithmeticError> {
        OperationRegistry::default().evaluate(kind, a, b, 4)
    }

    #[test]
    fn basic_arithmetic_works() {
        assert_eq!(eval(OperationKind::Add, 10.0, 5.0), Ok(15.0));
        assert_eq!(eval(OperationKind::Subtract, 10.0, 5.0), Ok(5.0));
        assert_eq!(eval(OperationKind::Multiply, 3.0, 4.0), Ok(12.0));
        assert_eq!(eval(OperationKind::Divide, 10.0, 4.0), Ok(2.5));
    }

    #[test]
    fn divide_by_zero_is_rejected() {
        assert_eq!(
            eval(OperationKind::Divide, 5.0, 0.0),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn modulus_and_integer_divide_follow_floored_semantics() {
        assert_eq!(eval(OperationKind::Modulus, 7.0, 3.0), Ok(1.0));
        assert_eq!(eval(OperationKind::Modulus, -7.0, 3.0), Ok(2.0));
        assert_eq!(eval(OperationKind::Modulus, 7.0, -3.0), Ok(-2.0));
        assert_eq!(eval(OperationKind::IntegerDivide, 7.0, 2.0), Ok(3.0));
        assert_eq!(eval(OperationKind::IntegerDivide, -7.0, 2.0), Ok(-4.0));
    }

    #[test]
    fn modulus_and_integer_divide_reject_zero_divisor() {
        assert_eq!(
            eval(OperationKind::Modulus, 7.0, 0.0),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            eval(OperationKind::IntegerDivide, 7.0, 0.0),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn percent_computes_ratio_and_rejects_zero_base() {
        assert_eq!(eval(OperationKind::Percent, 25.0, 200.0), Ok(12.5));
        assert_eq!(
            eval(OperationKind::Percent, 25.0, 0.0),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn absolute_difference_is_symmetric() {
        assert_eq!(eval(OperationKind::AbsoluteDifference, 3.0, 10.0), Ok(7.0));
        assert_eq!(eval(OperationKind::AbsoluteDifference, 10.0, 3.0), Ok(7.0));
    }

    #[test]
    fn power_overflow_is_rejected() {
        assert_eq!(
            eval(OperationKind::Power, 10.0, 1e9),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(eval(OperationKind::Power, 2.0, 10.0), Ok(1024.0));
    }

    #[test]
    fn even_root_of_negative_base_is_rejected() {
        assert_eq!(
            eval(OperationKind::Root, -4.0, 2.0),
            Err(ArithmeticError::InvalidRoot)
        );
    }

    #[test]
    fn odd_root_of_negative_base_is_real() {
        assert_eq!(eval(OperationKind::Root, -8.0, 3.0), Ok(-2.0));
    }

    #[test]
    fn fractional_root_degree_of_negative_base_is_rejected() {
        assert_eq!(
            eval(OperationKind::Root, -8.0, 2.5),
            Err(ArithmeticError::InvalidRoot)
        );
    }

    #[test]
    fn zeroth_root_is_rejected() {
        assert_eq!(
            eval(OperationKind::Root, 9.0, 0.0),
            Err(ArithmeticError::InvalidRoot)
        );
    }

    #[test]
    fn results_round_half_to_even() {
        assert_eq!(eval(OperationKind::Divide, 1.0, 3.0), Ok(0.3333));
        // 0.25 and 0.75 are exact in binary; their scaled halves tie to even.
        assert_eq!(
            OperationRegistry::default().evaluate(OperationKind::Add, 0.25, 0.0, 1),
            Ok(0.2)
        );
        assert_eq!(
            OperationRegistry::default().evaluate(OperationKind::Add, 0.75, 0.0, 1),
            Ok(0.8)
        );
    }

    #[test]
    fn unknown_operation_reported_for_unregistered_kind() {
        let registry = OperationRegistry::empty();
        assert!(matches!(
            registry.evaluate(OperationKind::Add, 1.0, 2.0, 4),
            Err(ArithmeticError::UnknownOperation(_))
        ));
    }

    #[test]
    fn registration_replaces_existing_computation() {
        let mut registry = OperationRegistry::default();
        registry.register(OperationKind::Add, |a, b| Ok(a * b));
        assert_eq!(registry.evaluate(OperationKind::Add, 3.0, 4.0, 4), Ok(12.0));
    }

    #[test]
    fn tokens_round_trip_through_from_str() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.token().parse::<OperationKind>(), Ok(kind));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("ADD".parse::<OperationKind>(), Ok(OperationKind::Add));
        assert_eq!(
            "Abs_Diff".parse::<OperationKind>(),
            Ok(OperationKind::AbsoluteDifference)
        );
    }

    #[test]
    fn kind_serializes_to_snake_case() {
        let json = serde_json::to_string(&OperationKind::IntegerDivide).unwrap();
        assert_eq!(json, "\"integer_divide\"");
        let back: OperationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OperationKind::IntegerDivide);
    }
}

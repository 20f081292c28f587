//! A dimensional-analysis and unit-conversion engine with a small
//! expression language.
//!
//! Expressions combine numbers, named units and built-in functions with the
//! usual arithmetic operators, implicit multiplication ("5 m") and a
//! conversion operator:
//!
//! ```
//! use quantal::{Dimension, InterpreterResult, Unit, UnitRegistry};
//!
//! let mut registry = UnitRegistry::new();
//! registry.add_unit("m", Unit::new("m", Dimension::length(), 1.0))?;
//! registry.add_unit("km", Unit::new("km", Dimension::length(), 1000.0))?;
//!
//! match quantal::evaluate("2 km -> m", &registry)? {
//!     InterpreterResult::Quantity(q) => assert_eq!(q.value().to_f64(), 2000.0),
//!     InterpreterResult::Quantities(_) => unreachable!(),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod arithmetic;
mod ast;
pub mod diagnostic;
mod dimension;
mod functions;
mod interpreter;
mod number;
mod parser;
mod quantity;
mod registry;
mod span;
mod suggestion;
mod tokenizer;
mod unit;

use thiserror::Error;

pub use ast::{BinaryOperator, Expression, UnaryOperator};
pub use dimension::Dimension;
pub use interpreter::{InterpreterResult, RuntimeError};
pub use number::Number;
pub use parser::{parse, ParseError, ParseErrorKind};
pub use quantity::{Quantity, QuantityError};
pub use registry::{RegistryError, UnitRegistry};
pub use span::Span;
pub use tokenizer::{TokenizerError, TokenizerErrorKind};
pub use unit::{Unit, UnitError};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CalcError {
    #[error("{0}")]
    ParseError(ParseError),

    #[error("{0}")]
    RuntimeError(RuntimeError),
}

/// Parse and evaluate a single expression against `registry`.
pub fn evaluate(input: &str, registry: &UnitRegistry) -> Result<InterpreterResult, CalcError> {
    let expr = parse(input).map_err(CalcError::ParseError)?;
    interpreter::evaluate(&expr, registry).map_err(CalcError::RuntimeError)
}

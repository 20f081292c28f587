use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::dimension::Dimension;
use crate::functions;
use crate::quantity::{Quantity, QuantityError};
use crate::registry::{RegistryError, UnitRegistry};
use crate::unit::Unit;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error(transparent)]
    RegistryError(#[from] RegistryError),

    #[error(transparent)]
    QuantityError(#[from] QuantityError),

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Function '{name}' takes {arity} argument(s), got {num_args}")]
    WrongArity {
        name: String,
        arity: usize,
        num_args: usize,
    },

    #[error("Argument to '{name}' must be a scalar, got dimension {dimension}")]
    NonScalarArgument {
        name: &'static str,
        dimension: Dimension,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("A conversion target list can not appear inside a larger expression")]
    NestedMultiConvert,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum InterpreterResult {
    Quantity(Quantity),
    /// One quantity per target of a multi-target conversion, in source
    /// order.
    Quantities(Vec<Quantity>),
}

fn constants() -> &'static HashMap<&'static str, f64> {
    static CONSTANTS: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    CONSTANTS.get_or_init(|| {
        HashMap::from([
            ("pi", std::f64::consts::PI),
            ("e", std::f64::consts::E),
            ("tau", std::f64::consts::TAU),
            ("inf", f64::INFINITY),
            ("infty", f64::INFINITY),
            ("infinity", f64::INFINITY),
            ("nan", f64::NAN),
            ("NaN", f64::NAN),
        ])
    })
}

/// Evaluate a parsed expression against a unit registry.
///
/// A multi-target conversion is only meaningful as the outermost node; it
/// is handled here, and [`evaluate_expression`] rejects it anywhere else.
pub fn evaluate(expr: &Expression, registry: &UnitRegistry) -> Result<InterpreterResult> {
    if let Expression::MultiConvert { value, targets, .. } = expr {
        let value = evaluate_expression(value, registry)?;
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            let target = conversion_target(target, registry)?;
            results.push(value.convert_to(&target)?);
        }
        return Ok(InterpreterResult::Quantities(results));
    }

    Ok(InterpreterResult::Quantity(evaluate_expression(
        expr, registry,
    )?))
}

/// Evaluate a conversion target expression down to a unit.
///
/// A zero-magnitude target would fold a zero factor into the unit and turn
/// every conversion into a division by zero, so it is rejected here.
fn conversion_target(expr: &Expression, registry: &UnitRegistry) -> Result<Unit> {
    let target = evaluate_expression(expr, registry)?.as_unit();
    if target.factor().is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(target)
}

fn evaluate_expression(expr: &Expression, registry: &UnitRegistry) -> Result<Quantity> {
    match expr {
        Expression::Scalar(_, n) => Ok(Quantity::new(*n, Unit::scalar())),
        Expression::Identifier(_, name) => {
            if let Some(value) = constants().get(name.as_str()) {
                return Ok(Quantity::from_scalar(*value));
            }
            Ok(Quantity::from_unit(registry.lookup(name)?.clone()))
        }
        Expression::UnaryOperator {
            op: UnaryOperator::Negate,
            expr,
            ..
        } => Ok(-evaluate_expression(expr, registry)?),
        Expression::BinaryOperator { op, lhs, rhs, .. } => {
            let lhs = evaluate_expression(lhs, registry)?;
            let rhs = evaluate_expression(rhs, registry)?;
            match op {
                BinaryOperator::Add => Ok((&lhs + &rhs)?),
                BinaryOperator::Sub => Ok((&lhs - &rhs)?),
                BinaryOperator::Mul => Ok((lhs * rhs)?),
                BinaryOperator::Div => {
                    if rhs.is_zero() {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    Ok((lhs / rhs)?)
                }
                BinaryOperator::Mod => {
                    if rhs.is_zero() {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    Ok(lhs.modulo(&rhs)?)
                }
                BinaryOperator::Power => Ok(lhs.power(rhs)?),
            }
        }
        Expression::FunctionCall { name, args, .. } => {
            let function = functions::lookup(name)
                .ok_or_else(|| RuntimeError::UnknownFunction(name.clone()))?;
            if args.len() != function.arity {
                return Err(RuntimeError::WrongArity {
                    name: name.clone(),
                    arity: function.arity,
                    num_args: args.len(),
                });
            }

            let args = args
                .iter()
                .map(|arg| evaluate_expression(arg, registry))
                .collect::<Result<Vec<_>>>()?;
            function.call(&args)
        }
        Expression::Convert { value, target, .. } => {
            let value = evaluate_expression(value, registry)?;
            let target = conversion_target(target, registry)?;
            Ok(value.convert_to(&target)?)
        }
        Expression::MultiConvert { .. } => Err(RuntimeError::NestedMultiConvert),
    }
}

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::arithmetic::Rational;
use crate::interpreter::{Result, RuntimeError};
use crate::number::Number;
use crate::quantity::Quantity;

pub(crate) struct BuiltinFunction {
    pub(crate) arity: usize,
    callable: fn(&[Quantity]) -> Result<Quantity>,
}

impl BuiltinFunction {
    /// The caller has already checked the argument count.
    pub(crate) fn call(&self, args: &[Quantity]) -> Result<Quantity> {
        (self.callable)(args)
    }
}

fn scalar_arg(name: &'static str, arg: &Quantity) -> Result<f64> {
    arg.as_scalar()
        .map(Number::to_f64)
        .map_err(|_| RuntimeError::NonScalarArgument {
            name,
            dimension: *arg.unit().dimension(),
        })
}

/// A function over dimensionless arguments, like the trigonometric and
/// logarithmic builtins. Dimensionless units (degree, percent) are folded
/// into the value first.
macro_rules! scalar_function {
    ($fn_name:ident, $op:expr) => {
        fn $fn_name(args: &[Quantity]) -> Result<Quantity> {
            let x = scalar_arg(stringify!($fn_name), &args[0])?;
            Ok(Quantity::from_scalar($op(x)))
        }
    };
}

/// A function that applies to the magnitude and keeps the unit, like the
/// rounding builtins.
macro_rules! polymorphic_function {
    ($fn_name:ident, $op:expr) => {
        fn $fn_name(args: &[Quantity]) -> Result<Quantity> {
            let value = $op(args[0].value().to_f64());
            Ok(Quantity::new_f64(value, args[0].unit().clone()))
        }
    };
}

scalar_function!(sin, f64::sin);
scalar_function!(cos, f64::cos);
scalar_function!(tan, f64::tan);
scalar_function!(asin, f64::asin);
scalar_function!(acos, f64::acos);
scalar_function!(atan, f64::atan);

scalar_function!(sinh, f64::sinh);
scalar_function!(cosh, f64::cosh);
scalar_function!(tanh, f64::tanh);
scalar_function!(asinh, f64::asinh);
scalar_function!(acosh, f64::acosh);
scalar_function!(atanh, f64::atanh);

scalar_function!(exp, f64::exp);
scalar_function!(ln, f64::ln);
scalar_function!(log, f64::ln);
scalar_function!(log2, f64::log2);
scalar_function!(log10, f64::log10);

polymorphic_function!(abs, f64::abs);
polymorphic_function!(round, f64::round);
polymorphic_function!(floor, f64::floor);
polymorphic_function!(ceil, f64::ceil);
polymorphic_function!(trunc, f64::trunc);

fn sqrt(args: &[Quantity]) -> Result<Quantity> {
    Ok(args[0].clone().power_rational(Rational::new(1, 2))?)
}

fn cbrt(args: &[Quantity]) -> Result<Quantity> {
    Ok(args[0].clone().power_rational(Rational::new(1, 3))?)
}

fn pow(args: &[Quantity]) -> Result<Quantity> {
    Ok(args[0].clone().power(args[1].clone())?)
}

fn atan2(args: &[Quantity]) -> Result<Quantity> {
    let y = &args[0];
    let x = args[1].convert_to(y.unit()).map_err(RuntimeError::from)?;
    Ok(Quantity::from_scalar(
        y.value().to_f64().atan2(x.value().to_f64()),
    ))
}

fn functions() -> &'static HashMap<&'static str, BuiltinFunction> {
    static FUNCTIONS: OnceLock<HashMap<&'static str, BuiltinFunction>> = OnceLock::new();
    FUNCTIONS.get_or_init(|| {
        let mut m = HashMap::new();

        macro_rules! insert_function {
            ($fn_name:ident, $arity:expr) => {
                m.insert(
                    stringify!($fn_name),
                    BuiltinFunction {
                        arity: $arity,
                        callable: $fn_name,
                    },
                );
            };
        }

        insert_function!(sin, 1);
        insert_function!(cos, 1);
        insert_function!(tan, 1);
        insert_function!(asin, 1);
        insert_function!(acos, 1);
        insert_function!(atan, 1);
        insert_function!(sinh, 1);
        insert_function!(cosh, 1);
        insert_function!(tanh, 1);
        insert_function!(asinh, 1);
        insert_function!(acosh, 1);
        insert_function!(atanh, 1);
        insert_function!(exp, 1);
        insert_function!(ln, 1);
        insert_function!(log, 1);
        insert_function!(log2, 1);
        insert_function!(log10, 1);
        insert_function!(abs, 1);
        insert_function!(round, 1);
        insert_function!(floor, 1);
        insert_function!(ceil, 1);
        insert_function!(trunc, 1);
        insert_function!(sqrt, 1);
        insert_function!(cbrt, 1);
        insert_function!(pow, 2);
        insert_function!(atan2, 2);

        m
    })
}

pub(crate) fn lookup(name: &str) -> Option<&'static BuiltinFunction> {
    functions().get(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::unit::Unit;
    use approx::assert_relative_eq;

    fn call(name: &str, args: &[Quantity]) -> Quantity {
        lookup(name).expect("unknown function").call(args).unwrap()
    }

    #[test]
    fn scalar_functions_fold_dimensionless_units() {
        let right_angle = Quantity::new_f64(90.0, Unit::degree());
        assert_relative_eq!(
            call("sin", &[right_angle]).value().to_f64(),
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn scalar_functions_reject_dimensioned_arguments() {
        let err = lookup("cos")
            .unwrap()
            .call(&[Quantity::from_unit(Unit::meter())])
            .unwrap_err();
        assert_eq!(
            err,
            RuntimeError::NonScalarArgument {
                name: "cos",
                dimension: Dimension::length(),
            }
        );
    }

    #[test]
    fn polymorphic_functions_keep_the_unit() {
        let result = call("round", &[Quantity::new_f64(2.7, Unit::meter())]);
        assert_relative_eq!(result.value().to_f64(), 3.0);
        assert_eq!(result.unit().symbol(), Some("m"));
    }

    #[test]
    fn sqrt_takes_the_root_of_the_unit() {
        let area = Quantity::new_f64(2.0, Unit::meter())
            .power(Quantity::from_scalar(2.0))
            .unwrap();
        let side = call("sqrt", &[area]);
        assert_relative_eq!(side.value().to_f64(), 2.0, epsilon = 1e-9);
        assert_eq!(*side.unit().dimension(), Dimension::length());
    }

    #[test]
    fn unknown_functions_are_not_in_the_table() {
        assert!(lookup("frobnicate").is_none());
    }
}

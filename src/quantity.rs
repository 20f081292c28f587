use std::fmt::{self, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

use thiserror::Error;

use crate::arithmetic::{rational_from_f64, Exponent};
use crate::dimension::Dimension;
use crate::number::Number;
use crate::unit::{Unit, UnitError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Incompatible dimensions: {0} and {1}")]
    IncompatibleDimensions(Dimension, Dimension),

    #[error(transparent)]
    UnitError(#[from] UnitError),

    #[error("Exponents need to be rational numbers")]
    NonRationalExponent,
}

pub type Result<T> = std::result::Result<T, QuantityError>;

/// A numerical value tagged with its unit.
#[derive(Debug, Clone)]
pub struct Quantity {
    value: Number,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    pub fn new_f64(value: f64, unit: Unit) -> Self {
        Quantity {
            value: Number::from_f64(value),
            unit,
        }
    }

    pub fn from_scalar(value: f64) -> Quantity {
        Quantity::new_f64(value, Unit::scalar())
    }

    pub fn from_unit(unit: Unit) -> Quantity {
        Quantity::new_f64(1.0, unit)
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn value(&self) -> Number {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Express this quantity in `target`.
    ///
    /// Both units map affinely into the base unit of their dimension, so
    /// the new value is `(value * factor + offset - target_offset) /
    /// target_factor`. Converting to the unit the quantity already carries
    /// is the identity, bypassing the (lossy) affine round trip.
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity> {
        if &self.unit == target {
            return Ok(self.clone());
        }

        if self.unit.dimension() != target.dimension() {
            return Err(QuantityError::IncompatibleDimensions(
                *self.unit.dimension(),
                *target.dimension(),
            ));
        }

        let base_value = self.value * self.unit.factor() + self.unit.offset();
        let value = (base_value - target.offset()) / target.factor();
        Ok(Quantity::new(value, target.clone()))
    }

    /// The plain numerical value, for quantities of dimension `Scalar`.
    ///
    /// Dimensionless units like degree or percent are folded in.
    pub fn as_scalar(&self) -> Result<Number> {
        Ok(self.convert_to(&Unit::scalar())?.value)
    }

    /// Reinterpret this quantity as a unit, folding the magnitude into the
    /// conversion factor. A magnitude of one keeps the unit untouched, so
    /// `x -> km` targets the named unit itself.
    pub fn as_unit(self) -> Unit {
        if self.value == Number::from_f64(1.0) {
            return self.unit;
        }

        Unit::derived(
            *self.unit.dimension(),
            self.unit.factor() * self.value,
            self.unit.offset(),
        )
    }

    pub fn power(self, exp: Quantity) -> Result<Quantity> {
        let exponent = exp.as_scalar()?.to_f64();
        let exponent = rational_from_f64(exponent).ok_or(QuantityError::NonRationalExponent)?;
        self.power_rational(exponent)
    }

    pub fn power_rational(self, e: Exponent) -> Result<Quantity> {
        let e_f64 = *e.numer() as f64 / *e.denom() as f64;
        Ok(Quantity::new(
            self.value.pow(&Number::from_f64(e_f64)),
            self.unit.power(e)?,
        ))
    }

    /// Euclidean remainder; the result is never negative and carries the
    /// left operand's unit.
    pub fn modulo(&self, rhs: &Quantity) -> Result<Quantity> {
        let rhs = rhs.convert_to(&self.unit)?;
        let value = self.value.to_f64().rem_euclid(rhs.value.to_f64());
        Ok(Quantity::new_f64(value, self.unit.clone()))
    }
}

impl Add for &Quantity {
    type Output = Result<Quantity>;

    fn add(self, rhs: Self) -> Self::Output {
        let rhs = rhs.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value + rhs.value, self.unit.clone()))
    }
}

impl Sub for &Quantity {
    type Output = Result<Quantity>;

    fn sub(self, rhs: Self) -> Self::Output {
        let rhs = rhs.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value - rhs.value, self.unit.clone()))
    }
}

impl Mul for Quantity {
    type Output = Result<Quantity>;

    fn mul(self, rhs: Self) -> Self::Output {
        // A bare number scales the other operand and keeps its named unit,
        // so "5 m" stays in meters and affine units like °C can carry a
        // magnitude. Only genuine unit-by-unit products compose units.
        if self.unit.is_scalar() {
            return Ok(Quantity::new(self.value * rhs.value, rhs.unit));
        }
        if rhs.unit.is_scalar() {
            return Ok(Quantity::new(self.value * rhs.value, self.unit));
        }

        Ok(Quantity::new(
            self.value * rhs.value,
            self.unit.checked_mul(&rhs.unit)?,
        ))
    }
}

impl Div for Quantity {
    type Output = Result<Quantity>;

    fn div(self, rhs: Self) -> Self::Output {
        if rhs.unit.is_scalar() {
            return Ok(Quantity::new(self.value / rhs.value, self.unit));
        }

        Ok(Quantity::new(
            self.value / rhs.value,
            self.unit.checked_div(&rhs.unit)?,
        ))
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Self::Output {
        Quantity::new(-self.value, self.unit)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        match other.convert_to(&self.unit) {
            Ok(other) => self.value == other.value,
            Err(_) => false,
        }
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let other = other.convert_to(&self.unit).ok()?;
        self.value.partial_cmp(&other.value)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit.to_string();
        if unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::Rational;
    use approx::assert_relative_eq;

    fn q(value: f64, unit: Unit) -> Quantity {
        Quantity::new_f64(value, unit)
    }

    #[test]
    fn conversion() {
        let length = q(2.0, Unit::meter());
        let converted = length.convert_to(&Unit::centimeter()).unwrap();
        assert_relative_eq!(converted.value().to_f64(), 200.0, epsilon = 1e-9);
        assert_eq!(converted.unit().symbol(), Some("cm"));

        assert_eq!(
            q(1.0, Unit::meter()).convert_to(&Unit::second()),
            Err(QuantityError::IncompatibleDimensions(
                Dimension::length(),
                Dimension::time()
            ))
        );
    }

    #[test]
    fn identity_conversion_is_exact() {
        let x = q(0.1, Unit::inch());
        assert_eq!(x.convert_to(&Unit::inch()).unwrap().value().to_f64(), 0.1);
    }

    #[test]
    fn affine_conversion() {
        let freezing = q(0.0, Unit::celsius());
        let kelvin = freezing.convert_to(&Unit::kelvin()).unwrap();
        assert_relative_eq!(kelvin.value().to_f64(), 273.15, epsilon = 1e-9);

        let body = q(98.6, Unit::fahrenheit());
        let celsius = body.convert_to(&Unit::celsius()).unwrap();
        assert_relative_eq!(celsius.value().to_f64(), 37.0, epsilon = 1e-9);
    }

    #[test]
    fn addition_converts_to_the_left_unit() {
        let sum = (&q(1.0, Unit::meter()) + &q(5.0, Unit::centimeter())).unwrap();
        assert_relative_eq!(sum.value().to_f64(), 1.05, epsilon = 1e-9);
        assert_eq!(sum.unit().symbol(), Some("m"));

        assert!((&q(1.0, Unit::meter()) + &q(1.0, Unit::second())).is_err());
    }

    #[test]
    fn multiplication_and_division() {
        let speed = (q(10.0, Unit::meter()) / q(2.0, Unit::second())).unwrap();
        assert_relative_eq!(speed.value().to_f64(), 5.0);
        assert_eq!(
            *speed.unit().dimension(),
            Dimension::length() / Dimension::time()
        );

        let scaled = (q(3.0, Unit::meter()) * Quantity::from_scalar(2.0)).unwrap();
        assert_relative_eq!(scaled.value().to_f64(), 6.0);
    }

    #[test]
    fn scalar_factors_keep_the_named_unit() {
        let length = (Quantity::from_scalar(5.0) * Quantity::from_unit(Unit::meter())).unwrap();
        assert_relative_eq!(length.value().to_f64(), 5.0);
        assert_eq!(length.unit().symbol(), Some("m"));

        // affine units accept a magnitude, they only reject composition
        let freezing =
            (Quantity::from_scalar(0.0) * Quantity::from_unit(Unit::celsius())).unwrap();
        assert_eq!(freezing.unit().symbol(), Some("°C"));
        assert_relative_eq!(
            freezing.convert_to(&Unit::kelvin()).unwrap().value().to_f64(),
            273.15,
            epsilon = 1e-9
        );

        let half = (q(3.0, Unit::meter()) / Quantity::from_scalar(2.0)).unwrap();
        assert_relative_eq!(half.value().to_f64(), 1.5);
        assert_eq!(half.unit().symbol(), Some("m"));
    }

    #[test]
    fn power() {
        let area = q(2.0, Unit::meter()).power(Quantity::from_scalar(2.0)).unwrap();
        assert_relative_eq!(area.value().to_f64(), 4.0);

        let side = area.power_rational(Rational::new(1, 2)).unwrap();
        assert_relative_eq!(side.value().to_f64(), 2.0, epsilon = 1e-9);
        assert_eq!(*side.unit().dimension(), Dimension::length());

        assert_eq!(
            q(2.0, Unit::meter()).power(q(1.0, Unit::second())),
            Err(QuantityError::IncompatibleDimensions(
                Dimension::time(),
                Dimension::none()
            ))
        );
    }

    #[test]
    fn modulo_is_euclidean() {
        let r = q(-7.0, Unit::meter()).modulo(&q(3.0, Unit::meter())).unwrap();
        assert_relative_eq!(r.value().to_f64(), 2.0, epsilon = 1e-9);

        let r = q(1.0, Unit::meter()).modulo(&q(30.0, Unit::centimeter())).unwrap();
        assert_relative_eq!(r.value().to_f64(), 0.1, epsilon = 1e-9);
        assert_eq!(r.unit().symbol(), Some("m"));
    }

    #[test]
    fn comparison_converts() {
        assert_eq!(q(1.0, Unit::kilometer()), q(1000.0, Unit::meter()));
        assert!(q(1.0, Unit::hour()) > q(59.0, Unit::second()));
        assert!(q(1.0, Unit::meter()).partial_cmp(&q(1.0, Unit::second())).is_none());
    }

    #[test]
    fn as_unit_folds_the_magnitude() {
        let target = q(1.0, Unit::kilometer()).as_unit();
        assert_eq!(target.symbol(), Some("km"));

        let double = q(2.0, Unit::meter()).as_unit();
        assert_eq!(double.symbol(), None);
        assert_relative_eq!(double.factor().to_f64(), 2.0);
    }
}

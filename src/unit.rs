use std::fmt::{self, Display};

use compact_str::CompactString;
use num_traits::One;
use thiserror::Error;

use crate::arithmetic::{Exponent, Power};
use crate::dimension::Dimension;
use crate::number::Number;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("Unit '{0}' has an offset and can not be composed with other units")]
    OffsetUnit(Unit),
}

type Result<T> = std::result::Result<T, UnitError>;

/// A unit of measurement.
///
/// Every unit is characterized by its dimension and an affine map into the
/// coherent SI base unit of that dimension:
///
/// ```txt
///     base_value = raw_value * factor + offset
/// ```
///
/// Most units have `offset == 0` and compose freely. Units with a nonzero
/// offset (degree Celsius, degree Fahrenheit) can only be converted into and
/// out of; multiplying, dividing or exponentiating them is rejected with
/// [`UnitError::OffsetUnit`].
///
/// Units built up by arithmetic lose their symbol and display their factor
/// and dimension instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    dimension: Dimension,
    factor: Number,
    offset: Number,
    symbol: Option<CompactString>,
}

impl Unit {
    pub fn new(symbol: &str, dimension: Dimension, factor: f64) -> Self {
        Unit {
            dimension,
            factor: Number::from_f64(factor),
            offset: Number::from_f64(0.0),
            symbol: Some(CompactString::from(symbol)),
        }
    }

    pub fn new_affine(symbol: &str, dimension: Dimension, factor: f64, offset: f64) -> Self {
        Unit {
            dimension,
            factor: Number::from_f64(factor),
            offset: Number::from_f64(offset),
            symbol: Some(CompactString::from(symbol)),
        }
    }

    /// The unit of bare numbers.
    pub fn scalar() -> Self {
        Unit {
            dimension: Dimension::none(),
            factor: Number::from_f64(1.0),
            offset: Number::from_f64(0.0),
            symbol: None,
        }
    }

    pub(crate) fn derived(dimension: Dimension, factor: Number, offset: Number) -> Self {
        Unit {
            dimension,
            factor,
            offset,
            symbol: None,
        }
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn factor(&self) -> Number {
        self.factor
    }

    pub fn offset(&self) -> Number {
        self.offset
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn is_affine(&self) -> bool {
        !self.offset.is_zero()
    }

    pub fn is_scalar(&self) -> bool {
        self.dimension.is_none() && self.factor == Number::from_f64(1.0) && !self.is_affine()
    }

    pub fn checked_mul(&self, rhs: &Unit) -> Result<Unit> {
        if self.is_affine() {
            return Err(UnitError::OffsetUnit(self.clone()));
        }
        if rhs.is_affine() {
            return Err(UnitError::OffsetUnit(rhs.clone()));
        }

        Ok(Unit::derived(
            self.dimension * rhs.dimension,
            self.factor * rhs.factor,
            Number::from_f64(0.0),
        ))
    }

    pub fn checked_div(&self, rhs: &Unit) -> Result<Unit> {
        if rhs.is_affine() {
            return Err(UnitError::OffsetUnit(rhs.clone()));
        }

        self.checked_mul(&Unit::derived(
            rhs.dimension.invert(),
            Number::from_f64(1.0) / rhs.factor,
            Number::from_f64(0.0),
        ))
    }

    pub fn power(&self, e: Exponent) -> Result<Unit> {
        if e.is_one() {
            return Ok(self.clone());
        }

        if self.is_affine() {
            return Err(UnitError::OffsetUnit(self.clone()));
        }

        let e_f64 = *e.numer() as f64 / *e.denom() as f64;
        Ok(Unit::derived(
            self.dimension.power(e),
            self.factor.pow(&Number::from_f64(e_f64)),
            Number::from_f64(0.0),
        ))
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = &self.symbol {
            f.write_str(symbol)
        } else if self.is_scalar() {
            Ok(())
        } else {
            write!(f, "{} {}", self.factor, self.dimension)
        }
    }
}

#[cfg(test)]
impl Unit {
    pub fn meter() -> Self {
        Unit::new("m", Dimension::length(), 1.0)
    }

    pub fn centimeter() -> Self {
        Unit::new("cm", Dimension::length(), 0.01)
    }

    pub fn millimeter() -> Self {
        Unit::new("mm", Dimension::length(), 0.001)
    }

    pub fn kilometer() -> Self {
        Unit::new("km", Dimension::length(), 1000.0)
    }

    pub fn inch() -> Self {
        Unit::new("in", Dimension::length(), 0.0254)
    }

    pub fn second() -> Self {
        Unit::new("s", Dimension::time(), 1.0)
    }

    pub fn hour() -> Self {
        Unit::new("h", Dimension::time(), 3600.0)
    }

    pub fn kilogram() -> Self {
        Unit::new("kg", Dimension::mass(), 1.0)
    }

    pub fn kelvin() -> Self {
        Unit::new("K", Dimension::temperature(), 1.0)
    }

    pub fn celsius() -> Self {
        Unit::new_affine("°C", Dimension::temperature(), 1.0, 273.15)
    }

    pub fn fahrenheit() -> Self {
        Unit::new_affine(
            "°F",
            Dimension::temperature(),
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
        )
    }

    pub fn degree() -> Self {
        Unit::new("°", Dimension::none(), std::f64::consts::PI / 180.0)
    }
}

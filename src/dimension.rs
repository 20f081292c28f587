use std::fmt::{self, Display};
use std::ops::{Div, Mul};

use itertools::Itertools;
use num_rational::Ratio;
use num_traits::Zero;

use crate::arithmetic::{pretty_exponent, Exponent, Power, Rational};

pub const NUM_BASE_DIMENSIONS: usize = 7;

pub const BASE_DIMENSION_NAMES: [&str; NUM_BASE_DIMENSIONS] = [
    "Length",
    "Mass",
    "Time",
    "Current",
    "Temperature",
    "AmountOfSubstance",
    "LuminousIntensity",
];

const ZERO: Rational = Ratio::new_raw(0, 1);
const ONE: Rational = Ratio::new_raw(1, 1);

/// The physical dimension of a unit or quantity.
///
/// A fixed-length vector of rational exponents over the seven SI base
/// dimensions. Multiplying two quantities adds their exponent vectors,
/// dividing subtracts them, and raising to a power scales them, so this
/// type carries the entire dimensional bookkeeping of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension([Exponent; NUM_BASE_DIMENSIONS]);

impl Dimension {
    pub fn none() -> Self {
        Dimension([ZERO; NUM_BASE_DIMENSIONS])
    }

    fn base(index: usize) -> Self {
        let mut exponents = [ZERO; NUM_BASE_DIMENSIONS];
        exponents[index] = ONE;
        Dimension(exponents)
    }

    pub fn length() -> Self {
        Self::base(0)
    }

    pub fn mass() -> Self {
        Self::base(1)
    }

    pub fn time() -> Self {
        Self::base(2)
    }

    pub fn current() -> Self {
        Self::base(3)
    }

    pub fn temperature() -> Self {
        Self::base(4)
    }

    pub fn amount_of_substance() -> Self {
        Self::base(5)
    }

    pub fn luminous_intensity() -> Self {
        Self::base(6)
    }

    /// Whether this is the dimension of a bare number.
    pub fn is_none(&self) -> bool {
        self.0.iter().all(|e| e.is_zero())
    }

    pub fn exponents(&self) -> &[Exponent; NUM_BASE_DIMENSIONS] {
        &self.0
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut exponents = self.0;
        for (e, rhs_e) in exponents.iter_mut().zip(&rhs.0) {
            *e += rhs_e;
        }
        Dimension(exponents)
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.invert()
    }
}

impl Power for Dimension {
    fn power(self, e: Exponent) -> Self {
        let mut exponents = self.0;
        for exponent in &mut exponents {
            *exponent *= e;
        }
        Dimension(exponents)
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("Scalar");
        }

        let factors = self
            .0
            .iter()
            .zip(BASE_DIMENSION_NAMES)
            .filter(|(e, _)| !e.is_zero())
            .map(|(e, name)| format!("{}{}", name, pretty_exponent(e)))
            .join(" × ");
        f.write_str(&factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebra() {
        let area = Dimension::length() * Dimension::length();
        assert_eq!(area, Dimension::length().power(Rational::from_integer(2)));

        let speed = Dimension::length() / Dimension::time();
        assert_eq!(speed * Dimension::time(), Dimension::length());

        assert_eq!(
            Dimension::length() / Dimension::length(),
            Dimension::none()
        );
        assert!((Dimension::mass() / Dimension::mass()).is_none());
    }

    #[test]
    fn power_scales_exponents() {
        let volume = Dimension::length().power(Rational::from_integer(3));
        assert_eq!(
            volume.power(Rational::new(1, 3)),
            Dimension::length()
        );
        assert_eq!(Dimension::time().invert() * Dimension::time(), Dimension::none());
    }

    #[test]
    fn display() {
        assert_eq!(Dimension::none().to_string(), "Scalar");
        assert_eq!(Dimension::length().to_string(), "Length");
        assert_eq!(
            (Dimension::length() / Dimension::time()).to_string(),
            "Length × Time⁻¹"
        );
        assert_eq!(
            Dimension::length().power(Rational::from_integer(2)).to_string(),
            "Length²"
        );
    }
}

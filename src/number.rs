use std::fmt::{self, Debug, Display};

/// A type that acts like an `f64`
///
/// To make this type `Eq`, we actually store a `u64`. To convert to and from
/// `f64` (which is the actual value we care about), we use the
/// [`f64::from_bits`] and [`f64::to_bits`] functions.
///
/// Note that we can't derive PartialEq because some f64 with different bits
/// represent the same value (e.g. `0.0` and `-0.0`).
#[derive(Clone, Copy, Eq)]
pub struct Number(u64);

impl Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Number").field(&self.to_f64()).finish()
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.to_f64() == other.to_f64()
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.to_f64().partial_cmp(&other.to_f64())
    }
}

impl Number {
    pub fn from_f64(n: f64) -> Self {
        Number(n.to_bits())
    }

    pub fn to_f64(self) -> f64 {
        let Number(n) = self;
        f64::from_bits(n)
    }

    pub fn pow(self, other: &Number) -> Self {
        Number::from_f64(self.to_f64().powf(other.to_f64()))
    }

    pub fn abs(self) -> Self {
        Number::from_f64(self.to_f64().abs())
    }

    pub fn is_zero(self) -> bool {
        self.to_f64() == 0.0
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_f64(), f)
    }
}

impl std::ops::Add for Number {
    type Output = Number;

    fn add(self, rhs: Self) -> Self::Output {
        Number::from_f64(self.to_f64() + rhs.to_f64())
    }
}

impl std::ops::Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Self) -> Self::Output {
        Number::from_f64(self.to_f64() - rhs.to_f64())
    }
}

impl std::ops::Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Self) -> Self::Output {
        Number::from_f64(self.to_f64() * rhs.to_f64())
    }
}

impl std::ops::Div for Number {
    type Output = Number;

    fn div(self, rhs: Self) -> Self::Output {
        Number::from_f64(self.to_f64() / rhs.to_f64())
    }
}

impl std::ops::Neg for Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        Number::from_f64(-self.to_f64())
    }
}

#[test]
fn test_abs() {
    assert_eq!(Number::from_f64(0.0).abs(), Number::from_f64(0.0));
    assert_eq!(Number::from_f64(1.0).abs(), Number::from_f64(1.0));
    assert_eq!(Number::from_f64(-1.0).abs(), Number::from_f64(1.0));
}

#[test]
fn test_negative_zero() {
    assert_eq!(Number::from_f64(0.0), Number::from_f64(-0.0));
    assert!(Number::from_f64(-0.0).is_zero());
}

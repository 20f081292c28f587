use compact_str::{format_compact, CompactString};
use num_rational::Ratio;
use num_traits::Signed;

pub type Rational = Ratio<i128>;
pub type Exponent = Rational;

pub trait Power {
    fn power(self, e: Exponent) -> Self;

    fn invert(self) -> Self
    where
        Self: Sized,
    {
        self.power(Exponent::from_integer(-1))
    }
}

/// Recover a rational exponent from a floating point value.
///
/// Integers are taken as-is; everything else goes through a continued
/// fraction approximation, so `0.5` comes back as `1/2` and the closest
/// f64 to one third comes back as `1/3`.
pub fn rational_from_f64(x: f64) -> Option<Rational> {
    if !x.is_finite() {
        return None;
    }

    if x.trunc() == x && x.abs() < i64::MAX as f64 {
        return Some(Rational::from_integer(x as i128));
    }

    Rational::approximate_float(x)
}

pub fn pretty_exponent(e: &Exponent) -> CompactString {
    if e == &Ratio::from_integer(5) {
        CompactString::const_new("⁵")
    } else if e == &Ratio::from_integer(4) {
        CompactString::const_new("⁴")
    } else if e == &Ratio::from_integer(3) {
        CompactString::const_new("³")
    } else if e == &Ratio::from_integer(2) {
        CompactString::const_new("²")
    } else if e == &Ratio::from_integer(1) {
        CompactString::const_new("")
    } else if e == &Ratio::from_integer(-1) {
        CompactString::const_new("⁻¹")
    } else if e == &Ratio::from_integer(-2) {
        CompactString::const_new("⁻²")
    } else if e == &Ratio::from_integer(-3) {
        CompactString::const_new("⁻³")
    } else if e.is_positive() && e.is_integer() {
        format_compact!("^{e}")
    } else {
        format_compact!("^({e})")
    }
}

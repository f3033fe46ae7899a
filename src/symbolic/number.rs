use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Numeric atom: an exact rational over `i64` or a float.
///
/// Rationals are always reduced with a positive denominator. Arithmetic that would overflow
/// `i64` degrades to a float instead of failing.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// `num / den`, reduced, `den > 0`.
    Rational {
        /// Numerator.
        num: i64,
        /// Denominator.
        den: i64,
    },
    /// Inexact value, produced by decimal literals.
    Float(f64),
}

impl Number {
    /// Exact integer.
    pub const fn int(v: i64) -> Self {
        Self::Rational { num: v, den: 1 }
    }

    /// `0`
    pub const fn zero() -> Self {
        Self::int(0)
    }

    /// `1`
    pub const fn one() -> Self {
        Self::int(1)
    }

    /// `-1`
    pub const fn minus_one() -> Self {
        Self::int(-1)
    }

    /// Exact `num / den`; `None` when `den == 0`.
    pub fn rational(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        Some(Self::reduce(i128::from(num), i128::from(den)))
    }

    /// Float value.
    pub fn float(v: f64) -> Self {
        Self::Float(v)
    }

    fn reduce(num: i128, den: i128) -> Self {
        let (mut num, mut den) = (num, den);
        if den < 0 {
            num = -num;
            den = -den;
        }
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i128;
        if g > 1 {
            num /= g;
            den /= g;
        }
        match (i64::try_from(num), i64::try_from(den)) {
            (Ok(num), Ok(den)) => Self::Rational { num, den },
            _ => Self::Float(num as f64 / den as f64),
        }
    }

    /// Value as `f64`.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Rational { num, den } => num as f64 / den as f64,
            Self::Float(v) => v,
        }
    }

    /// `Some(n)` when this is an exact integer.
    pub fn as_integer(self) -> Option<i64> {
        match self {
            Self::Rational { num, den: 1 } => Some(num),
            _ => None,
        }
    }

    /// `Some((num, den))` when exact.
    pub fn as_rational(self) -> Option<(i64, i64)> {
        match self {
            Self::Rational { num, den } => Some((num, den)),
            Self::Float(_) => None,
        }
    }

    /// Exact integer check.
    pub fn is_integer(self) -> bool {
        self.as_integer().is_some()
    }

    /// Exact or float zero.
    pub fn is_zero(self) -> bool {
        match self {
            Self::Rational { num, .. } => num == 0,
            Self::Float(v) => v == 0.0,
        }
    }

    /// Exact one. A float `1.0` is not an identity element.
    pub fn is_one(self) -> bool {
        matches!(self, Self::Rational { num: 1, den: 1 })
    }

    /// Exact minus one.
    pub fn is_minus_one(self) -> bool {
        matches!(self, Self::Rational { num: -1, den: 1 })
    }

    /// Strictly below zero.
    pub fn is_negative(self) -> bool {
        match self {
            Self::Rational { num, .. } => num < 0,
            Self::Float(v) => v < 0.0,
        }
    }

    /// Strictly above zero.
    pub fn is_positive(self) -> bool {
        match self {
            Self::Rational { num, .. } => num > 0,
            Self::Float(v) => v > 0.0,
        }
    }

    /// `-self`
    pub fn neg(self) -> Self {
        match self {
            Self::Rational { num, den } => Self::reduce(-i128::from(num), i128::from(den)),
            Self::Float(v) => Self::Float(-v),
        }
    }

    /// `|self|`
    pub fn abs(self) -> Self {
        if self.is_negative() { self.neg() } else { self }
    }

    /// `self + rhs`
    pub fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Rational { num: a, den: b }, Self::Rational { num: c, den: d }) => {
                let (a, b, c, d) = (i128::from(a), i128::from(b), i128::from(c), i128::from(d));
                Self::reduce(a * d + c * b, b * d)
            }
            (x, y) => Self::Float(x.to_f64() + y.to_f64()),
        }
    }

    /// `self * rhs`
    pub fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Rational { num: a, den: b }, Self::Rational { num: c, den: d }) => {
                let (a, b, c, d) = (i128::from(a), i128::from(b), i128::from(c), i128::from(d));
                Self::reduce(a * c, b * d)
            }
            (x, y) => Self::Float(x.to_f64() * y.to_f64()),
        }
    }

    /// `1 / self`; `None` for exact zero.
    pub fn recip(self) -> Option<Self> {
        match self {
            Self::Rational { num: 0, .. } => None,
            Self::Rational { num, den } => Some(Self::reduce(i128::from(den), i128::from(num))),
            Self::Float(v) => Some(Self::Float(1.0 / v)),
        }
    }

    /// `self ** exp` for an integer exponent; `None` for `0 ** negative`.
    pub fn pow_int(self, exp: i64) -> Option<Self> {
        if exp < 0 {
            return self.recip()?.pow_int(exp.checked_neg()?);
        }
        match self {
            Self::Rational { num, den } => {
                let Ok(e) = u32::try_from(exp) else {
                    return Some(Self::Float(self.to_f64().powf(exp as f64)));
                };
                match (i128::from(num).checked_pow(e), i128::from(den).checked_pow(e)) {
                    (Some(n), Some(d)) => Some(Self::reduce(n, d)),
                    _ => Some(Self::Float(self.to_f64().powf(exp as f64))),
                }
            }
            Self::Float(v) => Some(Self::Float(v.powi(exp.clamp(i32::MIN as i64, i32::MAX as i64) as i32))),
        }
    }

    /// Exact `self ** (1/q)` when it exists, for non-negative rationals.
    pub fn exact_root(self, q: i64) -> Option<Self> {
        let (num, den) = self.as_rational()?;
        if num < 0 || q <= 0 {
            return None;
        }
        let q = u32::try_from(q).ok()?;
        let n = int_root(num.unsigned_abs(), q)?;
        let d = int_root(den.unsigned_abs(), q)?;
        Self::rational(i64::try_from(n).ok()?, i64::try_from(d).ok()?)
    }

    /// Total order used for canonical sorting: by value, exact before float on ties.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.to_f64().total_cmp(&other.to_f64()).then_with(|| {
            let rank = |n: &Self| matches!(n, Self::Float(_)) as u8;
            rank(self).cmp(&rank(other))
        })
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rational { num: a, den: b }, Self::Rational { num: c, den: d }) => {
                a == c && b == d
            }
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational { num, den: 1 } => write!(f, "{num}"),
            Self::Rational { num, den } => write!(f, "{num}/{den}"),
            Self::Float(v) => write!(f, "{v:?}"),
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}

fn int_root(v: u64, q: u32) -> Option<u64> {
    if q == 1 || v < 2 {
        return Some(v);
    }
    let guess = (v as f64).powf(1.0 / f64::from(q)).round() as u64;
    for cand in guess.saturating_sub(1)..=guess.saturating_add(1) {
        if cand.checked_pow(q) == Some(v) {
            return Some(cand);
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/symbolic/number.rs"]
mod tests;

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Fractional digits carried beyond the requested scale while summing the
/// logarithm series.
const GUARD_DIGITS: u32 = 10;

/// How discarded digits affect the last kept digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Away from zero whenever a discarded digit is nonzero.
    Up,
    /// Towards zero.
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// To the nearest neighbour, ties away from zero.
    HalfUp,
}

/// The number `unscaled × 10^-scale`.
///
/// Addition, subtraction and multiplication are exact: the scale of a sum is the
/// larger of the operand scales and the scale of a product is their sum. Division,
/// rescaling and the logarithm round, always with an explicit [`RoundingMode`].
///
/// Interval bounds are decimal rather than binary fractions so that their digits
/// are reproducible; the codeword selector works on those digits.
///
/// Equality and ordering compare values, so `0.5 == 0.50`, while [`fmt::Display`]
/// keeps every fractional digit up to the scale.
#[derive(Clone, Debug)]
pub struct Decimal {
    unscaled: BigInt,
    scale: u32,
}

fn pow10(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exponent as usize)
}

/// Integer division of `numerator` by `denominator`, rounding the quotient by `mode`.
fn round_quotient(numerator: &BigInt, denominator: &BigInt, mode: RoundingMode) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator - &quotient * denominator;
    if remainder.is_zero() {
        return quotient;
    }

    let positive = numerator.is_negative() == denominator.is_negative();
    let away_from_zero = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => positive,
        RoundingMode::HalfUp => remainder.abs() * BigInt::from(2u32) >= denominator.abs(),
    };

    match (away_from_zero, positive) {
        (false, _) => quotient,
        (true, true) => quotient + BigInt::one(),
        (true, false) => quotient - BigInt::one(),
    }
}

impl Decimal {
    pub fn new(unscaled: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    pub fn one() -> Self {
        Self::new(1, 0)
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// The integer whose digits this decimal displays.
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.unscaled.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// The unscaled value at a scale no smaller than the current one.
    fn unscaled_at(&self, scale: u32) -> BigInt {
        debug_assert!(scale >= self.scale);
        &self.unscaled * pow10(u64::from(scale - self.scale))
    }

    /// The same value with exactly `scale` fractional digits.
    pub fn with_scale(&self, scale: u32, mode: RoundingMode) -> Self {
        match scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Self::new(self.unscaled_at(scale), scale),
            Ordering::Less => {
                let divisor = pow10(u64::from(self.scale - scale));
                Self::new(round_quotient(&self.unscaled, &divisor, mode), scale)
            }
        }
    }

    /// `self / divisor` with exactly `scale` fractional digits.
    pub fn checked_div(&self, divisor: &Self, scale: u32, mode: RoundingMode) -> Result<Self> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }

        // a·10^-sa / (b·10^-sb) = (a / b)·10^(sb - sa), wanted as q·10^-scale
        let shift = i64::from(scale) + i64::from(divisor.scale) - i64::from(self.scale);
        let (numerator, denominator) = if shift >= 0 {
            (&self.unscaled * pow10(shift.unsigned_abs()), divisor.unscaled.clone())
        } else {
            (self.unscaled.clone(), &divisor.unscaled * pow10(shift.unsigned_abs()))
        };

        Ok(Self::new(
            round_quotient(&numerator, &denominator, mode),
            scale,
        ))
    }

    /// Exact division by two.
    fn halved(&self) -> Self {
        Self::new(&self.unscaled * BigInt::from(5u32), self.scale + 1)
    }

    /// Natural logarithm, rounded half-up to `scale` fractional digits.
    pub fn ln(&self, scale: u32) -> Result<Self> {
        if !self.is_positive() {
            return Err(Error::NonPositiveLogarithm(self.to_string()));
        }

        let working = scale + GUARD_DIGITS;
        let one = Self::one();
        let two = Self::from(2u32);

        // self = mantissa · 2^exponent, mantissa in [1, 2)
        let mut mantissa = self.clone();
        let mut exponent: i64 = 0;
        while mantissa >= two {
            mantissa = mantissa.halved();
            exponent += 1;
        }
        while mantissa < one {
            mantissa = &mantissa * &two;
            exponent -= 1;
        }

        let mut ln = ln_near_one(&mantissa, working)?;
        if exponent != 0 {
            ln = &ln + &(&ln_near_one(&two, working)? * &Self::from(exponent));
        }

        Ok(ln.with_scale(scale, RoundingMode::HalfUp))
    }

    /// Nearest `f64`, for reporting only.
    pub fn to_f64(&self) -> f64 {
        const MAX_FRACTION_DIGITS: u32 = 17;

        let reduced = self.with_scale(self.scale.min(MAX_FRACTION_DIGITS), RoundingMode::HalfUp);
        let unscaled = reduced.unscaled.to_f64().unwrap_or(f64::NAN);
        unscaled / 10f64.powi(reduced.scale as i32)
    }
}

/// `ln(x) = 2·atanh((x - 1) / (x + 1))` for `x` in `[1, 2]`, where the series
/// ratio is at most 1/9.
fn ln_near_one(x: &Decimal, scale: u32) -> Result<Decimal> {
    let one = Decimal::one();
    let y = (x - &one).checked_div(&(x + &one), scale, RoundingMode::HalfUp)?;
    let y_squared = (&y * &y).with_scale(scale, RoundingMode::HalfUp);

    let mut sum = Decimal::zero();
    let mut power = y;
    let mut denominator = 1u32;
    while !power.is_zero() {
        let term = power.checked_div(&Decimal::from(denominator), scale, RoundingMode::HalfUp)?;
        sum = &sum + &term;
        power = (&power * &y_squared).with_scale(scale, RoundingMode::HalfUp);
        denominator += 2;
    }

    Ok(&sum * &Decimal::from(2u32))
}

macro_rules! impl_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Decimal {
                fn from(value: $int) -> Self {
                    Self::new(value, 0)
                }
            }
        )*
    };
}

impl_from_integer!(u8, u32, u64, usize, i32, i64);

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.unscaled_at(scale).cmp(&other.unscaled_at(scale))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Add<&Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.unscaled_at(scale) + rhs.unscaled_at(scale), scale)
    }
}

impl Sub<&Decimal> for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.unscaled_at(scale) - rhs.unscaled_at(scale), scale)
    }
}

impl Mul<&Decimal> for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::new(&self.unscaled * &rhs.unscaled, self.scale + rhs.scale)
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl $trait for Decimal {
                type Output = Decimal;

                fn $method(self, rhs: Decimal) -> Decimal {
                    (&self).$method(&rhs)
                }
            }
        )*
    };
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul);

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-&self.unscaled, self.scale)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -&self
    }
}

/// Plain notation, never scientific, with all `scale` fractional digits.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        let digits = self.unscaled.magnitude().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let digits = format!("{digits:0>width$}", width = scale + 1);
        let (integer, fraction) = digits.split_at(digits.len() - scale);
        write!(f, "{sign}{integer}.{fraction}")
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(literal: &str) -> Result<Self> {
        let invalid = || Error::InvalidDecimal(literal.to_owned());

        let (negative, body) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (integer, fraction) = match body.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some(parts) => parts,
            None => (body, ""),
        };
        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if integer.is_empty() || !is_digits(integer) || !is_digits(fraction) {
            return Err(invalid());
        }

        let magnitude: BigInt = format!("{integer}{fraction}")
            .parse()
            .map_err(|_| invalid())?;
        let scale = u32::try_from(fraction.len()).map_err(|_| invalid())?;
        Ok(Self::new(if negative { -magnitude } else { magnitude }, scale))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/*!
Arbitrary-precision binary floating point.

A [`BigFloat`] is `(-1)^sign * significand * 2^exponent`, where the significand
is an unbounded [`BigUint`] holding at most `precision` bits. Every arithmetic
result is rounded to the precision of the value being assigned to, using
round-half-to-even (the same rounding MPFR calls `RNDN`). At a precision of 53
bits the results are therefore bit-for-bit those of IEEE-754 `f64` arithmetic,
as long as nothing overflows or goes subnormal.

Values are finite. There is no NaN, no infinity and no negative zero.
*/

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::numeric::ParseNumberError;

/// Decimal exponents beyond this are rejected by [`BigFloat::parse`].
const MAX_DECIMAL_EXPONENT: i64 = 100_000;

#[derive(Clone, Debug)]
pub struct BigFloat {
    precision: u32,
    negative: bool,
    significand: BigUint,
    exponent: i64,
}

impl BigFloat {
    pub fn zero(precision: u32) -> Self {
        assert!(precision >= 1, "precision must be at least one bit");
        Self {
            precision,
            negative: false,
            significand: BigUint::zero(),
            exponent: 0,
        }
    }

    /// Converts `value`, rounding it to `precision` bits.
    ///
    /// Panics if `value` is NaN or infinite.
    pub fn with_f64(precision: u32, value: f64) -> Self {
        assert!(value.is_finite(), "{} has no BigFloat representation", value);

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1 << 52) - 1);
        let (significand, exponent) = if biased_exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | 1 << 52, biased_exponent - 1075)
        };

        Self::rounded(
            precision,
            negative,
            BigUint::from(significand),
            exponent,
            false,
        )
    }

    /**
    Parses a decimal literal such as `-1.768901153038436`, `.5` or `2.5e-3`,
    rounding it once to `precision` bits. Digits past what an `f64` holds are kept.
    */
    pub fn parse(precision: u32, text: &str) -> Result<Self, ParseNumberError> {
        let text = text.trim();
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, decimal_exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(index) => {
                let exponent_text = &unsigned[index + 1..];
                let exponent = exponent_text
                    .parse::<i64>()
                    .ok()
                    .filter(|exponent| {
                        (-MAX_DECIMAL_EXPONENT..=MAX_DECIMAL_EXPONENT).contains(exponent)
                    })
                    .ok_or_else(|| ParseNumberError::InvalidExponent(exponent_text.to_owned()))?;
                (&unsigned[..index], exponent)
            }
            None => (unsigned, 0),
        };

        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if integer.is_empty() && fraction.is_empty() {
            return Err(ParseNumberError::Empty);
        }
        if !integer
            .bytes()
            .chain(fraction.bytes())
            .all(|byte| byte.is_ascii_digit())
        {
            return Err(ParseNumberError::InvalidDigit(text.to_owned()));
        }

        let digits = format!("{}{}", integer, fraction);
        let digits = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| ParseNumberError::InvalidDigit(text.to_owned()))?;
        if digits.is_zero() {
            return Ok(Self::zero(precision));
        }

        let scale = decimal_exponent - fraction.len() as i64;
        if scale >= 0 {
            let significand = digits * BigUint::from(10u32).pow(scale as u32);
            Ok(Self::rounded(precision, negative, significand, 0, false))
        } else {
            let denominator = BigUint::from(10u32).pow((-scale) as u32);
            Ok(Self::divided(
                precision,
                negative,
                &digits,
                0,
                &denominator,
                0,
            ))
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn is_zero(&self) -> bool {
        self.significand.is_zero()
    }

    pub fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Overwrites the value in place, keeping this value's precision.
    pub fn set_f64(&mut self, value: f64) {
        if value == 0.0 {
            self.significand.set_zero();
            self.negative = false;
            self.exponent = 0;
        } else {
            *self = Self::with_f64(self.precision, value);
        }
    }

    /// Nearest `f64`. Values outside the `f64` range saturate to infinity or zero.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }

        let narrowed = Self::rounded(
            53,
            self.negative,
            self.significand.clone(),
            self.exponent,
            false,
        );
        let significand = narrowed.significand.iter_u64_digits().next().unwrap_or(0);
        let magnitude = scale_f64(significand as f64, narrowed.exponent);
        if narrowed.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Exclusive upper bound of the binary order of magnitude: `|self| < 2^top`.
    fn top(&self) -> i64 {
        self.exponent + self.significand.bits() as i64
    }

    /**
    Builds `(-1)^negative * significand * 2^exponent` rounded to `precision` bits.

    `sticky` says that the exact value lies strictly above `significand`
    (some nonzero bits were already cut off), which only matters for breaking
    ties.
    */
    fn rounded(
        precision: u32,
        negative: bool,
        significand: BigUint,
        exponent: i64,
        sticky: bool,
    ) -> Self {
        assert!(precision >= 1, "precision must be at least one bit");

        if significand.is_zero() {
            return Self::zero(precision);
        }

        let limit = u64::from(precision);
        let bits = significand.bits();
        if bits <= limit {
            debug_assert!(!sticky, "inexact value with spare precision");
            return Self {
                precision,
                negative,
                significand,
                exponent,
            };
        }

        let shift = bits - limit;
        let half = significand.bit(shift - 1);
        let beyond_half = sticky
            || significand
                .trailing_zeros()
                .map_or(false, |zeros| zeros < shift - 1);

        let mut significand = significand >> shift;
        let mut exponent = exponent + shift as i64;
        if half && (beyond_half || significand.bit(0)) {
            significand += 1u32;
            if significand.bits() > limit {
                significand >>= 1u32;
                exponent += 1;
            }
        }

        Self {
            precision,
            negative,
            significand,
            exponent,
        }
    }

    /// Correctly rounded `numerator * 2^numerator_exponent / (denominator * 2^denominator_exponent)`.
    fn divided(
        precision: u32,
        negative: bool,
        numerator: &BigUint,
        numerator_exponent: i64,
        denominator: &BigUint,
        denominator_exponent: i64,
    ) -> Self {
        // Two guard bits beyond the precision, the remainder becomes the sticky bit.
        let shift = (u64::from(precision) + 2 + denominator.bits()).saturating_sub(numerator.bits());
        let numerator = numerator << shift;
        let quotient = &numerator / denominator;
        let remainder = numerator - &quotient * denominator;

        Self::rounded(
            precision,
            negative,
            quotient,
            numerator_exponent - denominator_exponent - shift as i64,
            !remainder.is_zero(),
        )
    }

    /// `self + (-1)^rhs_negative * |rhs|`, rounded to `self.precision`.
    fn sum(&self, rhs_negative: bool, rhs: &Self) -> Self {
        let precision = self.precision;
        if rhs.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return Self::rounded(
                precision,
                rhs_negative,
                rhs.significand.clone(),
                rhs.exponent,
                false,
            );
        }

        // An operand less than a quarter ulp of an exactly representable one
        // cannot move the rounded result.
        let gap = i64::from(precision) + 2;
        if rhs.top() + gap <= self.top() {
            return self.clone();
        }
        if self.top() + gap <= rhs.top() && rhs.significand.bits() <= u64::from(precision) {
            return Self {
                precision,
                negative: rhs_negative,
                significand: rhs.significand.clone(),
                exponent: rhs.exponent,
            };
        }

        let exponent = self.exponent.min(rhs.exponent);
        let lhs_aligned = &self.significand << (self.exponent - exponent) as u64;
        let rhs_aligned = &rhs.significand << (rhs.exponent - exponent) as u64;

        let (negative, significand) = if self.negative == rhs_negative {
            (self.negative, lhs_aligned + rhs_aligned)
        } else {
            match lhs_aligned.cmp(&rhs_aligned) {
                Ordering::Greater => (self.negative, lhs_aligned - rhs_aligned),
                Ordering::Less => (rhs_negative, rhs_aligned - lhs_aligned),
                Ordering::Equal => return Self::zero(precision),
            }
        };

        Self::rounded(precision, negative, significand, exponent, false)
    }

    fn product(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero(self.precision);
        }

        Self::rounded(
            self.precision,
            self.negative != rhs.negative,
            &self.significand * &rhs.significand,
            self.exponent + rhs.exponent,
            false,
        )
    }

    fn quotient(&self, rhs: &Self) -> Self {
        assert!(!rhs.is_zero(), "division by zero");
        if self.is_zero() {
            return Self::zero(self.precision);
        }

        Self::divided(
            self.precision,
            self.negative != rhs.negative,
            &self.significand,
            self.exponent,
            &rhs.significand,
            rhs.exponent,
        )
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match self.top().cmp(&other.top()) {
            Ordering::Equal => {}
            ordering => return ordering,
        }

        let exponent = self.exponent.min(other.exponent);
        let lhs = &self.significand << (self.exponent - exponent) as u64;
        let rhs = &other.significand << (other.exponent - exponent) as u64;
        lhs.cmp(&rhs)
    }
}

/// `value * 2^exponent`, in steps that keep the power of two representable.
fn scale_f64(mut value: f64, mut exponent: i64) -> f64 {
    while exponent > 1000 {
        value *= 2f64.powi(1000);
        exponent -= 1000;
    }
    while exponent < -1000 {
        value *= 2f64.powi(-1000);
        exponent += 1000;
    }
    value * 2f64.powi(exponent as i32)
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        })
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Neg for BigFloat {
    type Output = BigFloat;

    fn neg(mut self) -> BigFloat {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
        self
    }
}

impl AddAssign<&BigFloat> for BigFloat {
    fn add_assign(&mut self, rhs: &BigFloat) {
        *self = self.sum(rhs.negative, rhs);
    }
}

impl SubAssign<&BigFloat> for BigFloat {
    fn sub_assign(&mut self, rhs: &BigFloat) {
        *self = self.sum(!rhs.negative, rhs);
    }
}

impl MulAssign<&BigFloat> for BigFloat {
    fn mul_assign(&mut self, rhs: &BigFloat) {
        *self = self.product(rhs);
    }
}

impl DivAssign<&BigFloat> for BigFloat {
    fn div_assign(&mut self, rhs: &BigFloat) {
        *self = self.quotient(rhs);
    }
}

impl Add<&BigFloat> for &BigFloat {
    type Output = BigFloat;

    fn add(self, rhs: &BigFloat) -> BigFloat {
        self.sum(rhs.negative, rhs)
    }
}

impl Sub<&BigFloat> for &BigFloat {
    type Output = BigFloat;

    fn sub(self, rhs: &BigFloat) -> BigFloat {
        self.sum(!rhs.negative, rhs)
    }
}

impl Mul<&BigFloat> for &BigFloat {
    type Output = BigFloat;

    fn mul(self, rhs: &BigFloat) -> BigFloat {
        self.product(rhs)
    }
}

impl Div<&BigFloat> for &BigFloat {
    type Output = BigFloat;

    fn div(self, rhs: &BigFloat) -> BigFloat {
        self.quotient(rhs)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn big(precision: u32, value: f64) -> BigFloat {
        BigFloat::with_f64(precision, value)
    }

    #[test]
    fn f64_values_survive_conversion() {
        for value in [0.0, 1.0, -1.5, 0.1, 640.0, -2.0, 1e-300, 123456.789] {
            assert_eq!(big(128, value).to_f64(), value);
        }
    }

    #[test]
    fn rounds_half_to_even() {
        // 17 = 0b10001 and 19 = 0b10011, both exactly halfway at 4 bits.
        assert_eq!(big(4, 17.0).to_f64(), 16.0);
        assert_eq!(big(4, 19.0).to_f64(), 20.0);
        // 0b10011 + a bit below the halfway point rounds up regardless of parity.
        assert_eq!(big(4, 17.25).to_f64(), 18.0);
    }

    #[test]
    fn rounding_carry_bumps_the_exponent() {
        let seven = big(2, 7.0);
        assert_eq!(seven.to_f64(), 8.0);
        assert!(seven.significand.bits() <= 2);
    }

    #[test]
    fn tiny_addend_only_matters_with_enough_precision() {
        let tiny = big(256, 2f64.powi(-200));

        let mut narrow = big(128, 1.0);
        narrow += &tiny;
        assert_eq!(narrow, big(128, 1.0));

        let mut wide = big(256, 1.0);
        wide += &tiny;
        assert!(wide > big(256, 1.0));
        wide -= &tiny;
        assert_eq!(wide, big(256, 1.0));
    }

    #[test]
    fn subtracting_equal_values_gives_positive_zero() {
        let value = big(128, -2.75);
        let difference = &value - &value;
        assert!(difference.is_zero());
        assert!(!difference.is_sign_negative());
    }

    #[test]
    fn equality_ignores_representation() {
        let a = BigFloat {
            precision: 8,
            negative: false,
            significand: BigUint::from(2u32),
            exponent: 0,
        };
        let b = BigFloat {
            precision: 8,
            negative: false,
            significand: BigUint::from(1u32),
            exponent: 1,
        };
        assert_eq!(a, b);
    }

    #[test]
    fn division_is_correctly_rounded() {
        let third = &big(53, 1.0) / &big(53, 3.0);
        assert_eq!(third.to_f64(), 1.0 / 3.0);

        let mut wide = &big(128, 1.0) / &big(128, 3.0);
        wide *= &big(128, 3.0);
        assert!((wide.to_f64() - 1.0).abs() < 1e-30);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_by_zero_panics() {
        let _ = &big(64, 1.0) / &BigFloat::zero(64);
    }

    #[test]
    fn parses_decimal_literals() {
        assert_eq!(BigFloat::parse(53, "0.1").unwrap().to_f64(), 0.1);
        assert_eq!(BigFloat::parse(53, "-1.5").unwrap().to_f64(), -1.5);
        assert_eq!(BigFloat::parse(53, ".5").unwrap().to_f64(), 0.5);
        assert_eq!(BigFloat::parse(53, "2.5e-3").unwrap().to_f64(), 2.5e-3);
        assert_eq!(BigFloat::parse(53, "+12E2").unwrap().to_f64(), 1200.0);
        assert!(BigFloat::parse(53, "-0.000").unwrap().is_zero());
        assert_eq!(
            BigFloat::parse(53, "-1.768901153038436").unwrap().to_f64(),
            -1.768901153038436
        );
    }

    #[test]
    fn parsing_keeps_digits_beyond_f64() {
        let a = BigFloat::parse(128, "-1.7689011530384361").unwrap();
        let b = BigFloat::parse(128, "-1.7689011530384362").unwrap();
        assert!(a > b);
        assert_ne!(BigFloat::parse(128, "0.1").unwrap(), big(128, 0.1));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(BigFloat::parse(64, ""), Err(ParseNumberError::Empty));
        assert_eq!(BigFloat::parse(64, "-."), Err(ParseNumberError::Empty));
        assert!(matches!(
            BigFloat::parse(64, "1.2.3"),
            Err(ParseNumberError::InvalidDigit(_))
        ));
        assert!(matches!(
            BigFloat::parse(64, "0x10"),
            Err(ParseNumberError::InvalidDigit(_))
        ));
        assert!(matches!(
            BigFloat::parse(64, "1e"),
            Err(ParseNumberError::InvalidExponent(_))
        ));
        assert!(matches!(
            BigFloat::parse(64, "1e999999999"),
            Err(ParseNumberError::InvalidExponent(_))
        ));
        assert!(matches!(
            BigFloat::parse(64, "1e-9223372036854775808"),
            Err(ParseNumberError::InvalidExponent(_))
        ));
    }

    #[test]
    fn set_f64_keeps_precision() {
        let mut value = big(100, 3.0);
        value.set_f64(0.0);
        assert!(value.is_zero());
        value.set_f64(-0.25);
        assert_eq!(value.precision(), 100);
        assert_eq!(value.to_f64(), -0.25);
    }

    proptest! {
        #[test]
        fn matches_f64_arithmetic_at_53_bits(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
            let (x, y) = (big(53, a), big(53, b));
            prop_assert_eq!((&x + &y).to_f64(), a + b);
            prop_assert_eq!((&x - &y).to_f64(), a - b);
            prop_assert_eq!((&x * &y).to_f64(), a * b);
            if b != 0.0 {
                prop_assert_eq!((&x / &y).to_f64(), a / b);
            }
            prop_assert_eq!(x.partial_cmp(&y), a.partial_cmp(&b));
        }

        #[test]
        fn wider_precision_is_exact_on_small_dyadics(a in -4096i32..4096, b in -4096i32..4096) {
            let (a, b) = (f64::from(a) / 64.0, f64::from(b) / 64.0);
            let mut product = big(128, a);
            product *= &big(128, b);
            prop_assert_eq!(product.to_f64(), a * b);
        }
    }
}

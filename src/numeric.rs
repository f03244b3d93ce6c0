//! The arithmetic the escape-time kernel needs from a number type.

use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use thiserror::Error;

use crate::big_float::BigFloat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("cannot parse a number from an empty string")]
    Empty,

    #[error("invalid digit in {0:?}")]
    InvalidDigit(String),

    #[error("invalid exponent {0:?}")]
    InvalidExponent(String),

    #[error("{0:?} is out of range")]
    OutOfRange(String),
}

/**
A real number the coordinate mapper and escape-time iterator can run on.

All arithmetic is in place against a borrowed operand, so an implementation
backed by heap storage can keep reusing the same scratch values from pixel to
pixel.

`precision` is the significand width in bits. Fixed-width types ignore it.
*/
pub trait Scalar:
    Clone
    + PartialOrd
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
{
    /// Short human-readable name, used in banners and log output.
    fn name(precision: u32) -> String;

    fn with_f64(precision: u32, value: f64) -> Self;

    /// Reads a finite decimal literal such as `-1.768901153038436` or `2.5e-3`.
    fn parse(precision: u32, text: &str) -> Result<Self, ParseNumberError>;

    /// Overwrites the value, keeping whatever precision it was created with.
    fn set_f64(&mut self, value: f64);

    fn to_f64(&self) -> f64;
}

impl Scalar for f64 {
    fn name(_precision: u32) -> String {
        "f64".to_owned()
    }

    fn with_f64(_precision: u32, value: f64) -> Self {
        value
    }

    fn parse(_precision: u32, text: &str) -> Result<Self, ParseNumberError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseNumberError::Empty);
        }

        let value: f64 = text
            .parse()
            .map_err(|_| ParseNumberError::InvalidDigit(text.to_owned()))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseNumberError::OutOfRange(text.to_owned()))
        }
    }

    fn set_f64(&mut self, value: f64) {
        *self = value;
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

impl Scalar for BigFloat {
    fn name(precision: u32) -> String {
        format!("BigFloat ({} bits)", precision)
    }

    fn with_f64(precision: u32, value: f64) -> Self {
        BigFloat::with_f64(precision, value)
    }

    fn parse(precision: u32, text: &str) -> Result<Self, ParseNumberError> {
        BigFloat::parse(precision, text)
    }

    fn set_f64(&mut self, value: f64) {
        BigFloat::set_f64(self, value)
    }

    fn to_f64(&self) -> f64 {
        BigFloat::to_f64(self)
    }
}

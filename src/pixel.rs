use crate::numeric::Scalar;

/// A point `real + imaginary * i` of the complex plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Complex<N> {
    pub real: N,
    pub imaginary: N,
}

impl<N: Scalar> Complex<N> {
    pub fn zero(precision: u32) -> Self {
        Self::with_f64(precision, 0.0, 0.0)
    }

    pub fn with_f64(precision: u32, real: f64, imaginary: f64) -> Self {
        Complex {
            real: N::with_f64(precision, real),
            imaginary: N::with_f64(precision, imaginary),
        }
    }

    pub fn to_f64(&self) -> (f64, f64) {
        (self.real.to_f64(), self.imaginary.to_f64())
    }
}

/// A pixel coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
}

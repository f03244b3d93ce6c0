//! Run parameters.

use thiserror::Error;

use crate::{
    big_float::BigFloat,
    numeric::{ParseNumberError, Scalar},
    screen::Size,
};

/// Widest significand [`Config::validate`] accepts.
pub const MAX_PRECISION_BITS: u32 = 1 << 16;

/// The rectangle of the complex plane the pixel grid covers.
///
/// Bounds are decimal literals so that a deep zoom can name a corner with more
/// digits than an `f64` holds. Each number type reads them at its own precision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaneBounds {
    pub x_start: String,
    pub x_end: String,
    pub y_start: String,
    pub y_end: String,
}

impl PlaneBounds {
    pub fn new(x_start: &str, x_end: &str, y_start: &str, y_end: &str) -> Self {
        PlaneBounds {
            x_start: x_start.to_owned(),
            x_end: x_end.to_owned(),
            y_start: y_start.to_owned(),
            y_end: y_end.to_owned(),
        }
    }

    /// The whole set: `[-2, 1] x [-1.5, 1.5]`.
    pub fn full_set() -> Self {
        Self::new("-2", "1", "-1.5", "1.5")
    }

    /// `(name, literal)` for each bound.
    pub fn literals(&self) -> [(&'static str, &str); 4] {
        [
            ("x_start", self.x_start.as_str()),
            ("x_end", self.x_end.as_str()),
            ("y_start", self.y_start.as_str()),
            ("y_end", self.y_end.as_str()),
        ]
    }
}

/// Which update rule the real part follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recurrence {
    /// `x' = x^2 - y^2 + x0`, i.e. `z' = z^2 + c`.
    Mandelbrot,
    /// `x' = x^2 + y^2 + x0`. Not the Mandelbrot set. Only the update formula
    /// of older arbitrary-precision runs; their loop also tested the previous
    /// step's magnitude, so their counts are not reproduced (they give 3 for
    /// `c = 2`, this gives 2).
    MagnitudeSum,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Compute every pixel's intensity and throw it away.
    Benchmark,
    /// Keep iteration counts and intensities in a [`crate::grid::Frame`].
    Materialize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid is empty ({width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("precision must be between 1 and 65536 bits, got {0}")]
    Precision(u32),

    #[error("invalid plane bound {bound}: {source}")]
    Bounds {
        bound: &'static str,
        #[source]
        source: ParseNumberError,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub size: Size,
    pub bounds: PlaneBounds,
    pub max_iterations: u32,
    /// Significand width for arbitrary-precision runs.
    pub precision_bits: u32,
    pub recurrence: Recurrence,
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: Size {
                width: 640,
                height: 640,
            },
            bounds: PlaneBounds::full_set(),
            max_iterations: 1000,
            precision_bits: 128,
            recurrence: Recurrence::Mandelbrot,
            mode: Mode::Benchmark,
        }
    }
}

impl Config {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size { width, height };
        self
    }

    pub fn with_bounds(mut self, bounds: PlaneBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_precision_bits(mut self, precision_bits: u32) -> Self {
        self.precision_bits = precision_bits;
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { width, height } = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if !(1..=MAX_PRECISION_BITS).contains(&self.precision_bits) {
            return Err(ConfigError::Precision(self.precision_bits));
        }
        for (bound, literal) in self.bounds.literals() {
            <f64 as Scalar>::parse(self.precision_bits, literal)
                .and_then(|_| BigFloat::parse(self.precision_bits, literal))
                .map_err(|source| ConfigError::Bounds { bound, source })?;
        }
        Ok(())
    }
}

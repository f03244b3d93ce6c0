//! Runs the mapper, the escape-time iteration and the colouring over every pixel.

use std::hint::black_box;

use log::{debug, trace};

use crate::{
    colour::grayscale,
    config::{Config, ConfigError, Mode},
    escape::{escape_time, Workspace},
    mapper::CoordinateMapper,
    numeric::Scalar,
    pixel::{Complex, Pixel},
    screen::Size,
};

#[derive(Debug)]
pub enum Output {
    /// [`Mode::Benchmark`]: everything was computed, nothing was kept.
    Discarded { pixels: usize },
    Frame(Frame),
}

/// Row-major per-pixel results of a [`Mode::Materialize`] render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    size: Size,
    max_iterations: u32,
    iterations: Vec<u32>,
    intensities: Vec<u8>,
}

impl Frame {
    fn with_capacity(size: Size, max_iterations: u32) -> Self {
        Self {
            size,
            max_iterations,
            iterations: Vec::with_capacity(size.pixel_count()),
            intensities: Vec::with_capacity(size.pixel_count()),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn iterations(&self) -> &[u32] {
        &self.iterations
    }

    pub fn intensities(&self) -> &[u8] {
        &self.intensities
    }

    pub fn iteration_count(&self, pixel: Pixel) -> u32 {
        self.iterations[self.size.index(pixel)]
    }

    pub fn intensity(&self, pixel: Pixel) -> u8 {
        self.intensities[self.size.index(pixel)]
    }

    /// Every pixel with its iteration count, in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (Pixel, u32)> + '_ {
        self.size.pixels().zip(self.iterations.iter().copied())
    }
}

/**
Renders the grid described by `config` with the number type `N`.

Pixels are visited row by row. One [`CoordinateMapper`] and one [`Workspace`]
serve the whole render; both overwrite their scratch values for each pixel.
*/
pub fn render<N: Scalar>(config: &Config) -> Result<Output, ConfigError> {
    config.validate()?;

    let Config {
        size,
        ref bounds,
        max_iterations,
        precision_bits,
        recurrence,
        mode,
    } = *config;

    trace!("begin render");
    debug!(
        "rendering {}x{} over {:?} with {}, {:?} recurrence, at most {} iterations, {:?} mode",
        size.width,
        size.height,
        bounds,
        N::name(precision_bits),
        recurrence,
        max_iterations,
        mode
    );

    let mut mapper = CoordinateMapper::<N>::new(precision_bits, size, bounds)?;
    let mut workspace = Workspace::<N>::new(precision_bits);
    let mut point = Complex::<N>::zero(precision_bits);

    let mut frame = match mode {
        Mode::Benchmark => None,
        Mode::Materialize => Some(Frame::with_capacity(size, max_iterations)),
    };

    for y in 0..size.height {
        trace!("row {}", y);

        for x in 0..size.width {
            mapper.map(Pixel { x, y }, &mut point);
            let iteration = escape_time(&mut workspace, &point, max_iterations, recurrence);
            let intensity = grayscale(iteration, max_iterations);

            match frame.as_mut() {
                Some(frame) => {
                    frame.iterations.push(iteration);
                    frame.intensities.push(intensity);
                }
                None => {
                    black_box(intensity);
                }
            }
        }
    }

    trace!("end render");

    Ok(match frame {
        Some(frame) => Output::Frame(frame),
        None => Output::Discarded {
            pixels: size.pixel_count(),
        },
    })
}

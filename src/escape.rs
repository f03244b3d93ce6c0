//! The escape-time iteration.

use crate::{config::Recurrence, numeric::Scalar, pixel::Complex};

/**
Scratch values for one [`escape_time`] evaluation.

A workspace belongs to one render and is handed to [`escape_time`] for each
pixel in turn. The orbit is reset at the start of every call and every other
field is written before it is read, so the previous pixel's state never leaks
into the next one.
*/
pub struct Workspace<N> {
    x: N,
    y: N,
    x_squared: N,
    y_squared: N,
    magnitude_squared: N,
    x_next: N,
    two: N,
    four: N,
}

impl<N: Scalar> Workspace<N> {
    pub fn new(precision: u32) -> Self {
        let zero = N::with_f64(precision, 0.0);
        Self {
            x: zero.clone(),
            y: zero.clone(),
            x_squared: zero.clone(),
            y_squared: zero.clone(),
            magnitude_squared: zero.clone(),
            x_next: zero,
            two: N::with_f64(precision, 2.0),
            four: N::with_f64(precision, 4.0),
        }
    }

    fn reset(&mut self) {
        self.x.set_f64(0.0);
        self.y.set_f64(0.0);
    }
}

/**
Iterates `z' = z^2 + c` from `z = 0` for `c = point` and returns how many steps
ran before `|z| > 2`, or `max_iterations` if it never got there.

Each step first squares the current iterate and tests `x^2 + y^2 <= 4`, then
reuses the same squares for the update. The result is always in
`0..=max_iterations`.
*/
pub fn escape_time<N: Scalar>(
    workspace: &mut Workspace<N>,
    point: &Complex<N>,
    max_iterations: u32,
    recurrence: Recurrence,
) -> u32 {
    workspace.reset();
    let w = workspace;

    let mut iteration = 0;
    while iteration < max_iterations {
        w.x_squared.clone_from(&w.x);
        w.x_squared *= &w.x;
        w.y_squared.clone_from(&w.y);
        w.y_squared *= &w.y;

        w.magnitude_squared.clone_from(&w.x_squared);
        w.magnitude_squared += &w.y_squared;
        if w.magnitude_squared > w.four {
            break;
        }

        w.x_next.clone_from(&w.x_squared);
        match recurrence {
            Recurrence::Mandelbrot => w.x_next -= &w.y_squared,
            Recurrence::MagnitudeSum => w.x_next += &w.y_squared,
        }
        w.x_next += &point.real;

        w.y *= &w.x;
        w.y *= &w.two;
        w.y += &point.imaginary;

        std::mem::swap(&mut w.x, &mut w.x_next);
        iteration += 1;
    }

    iteration
}

//! Pixel coordinates to points of the complex plane.

use crate::{
    config::{ConfigError, PlaneBounds},
    numeric::Scalar,
    pixel::{Complex, Pixel},
    screen::Size,
};

/**
Maps pixels of a `width x height` grid onto [`PlaneBounds`]:

```text
x0 = x_start + (column / width) * (x_end - x_start)
y0 = y_start + (row / height) * (y_end - y_start)
```

Every step is done in `N` at the mapper's precision, starting from the bounds'
decimal literals. The spans and the grid size are converted once. `ratio` is scratch that [`CoordinateMapper::map`]
overwrites before reading, so nothing carries over from one pixel to the next.
*/
pub struct CoordinateMapper<N> {
    x_start: N,
    y_start: N,
    x_span: N,
    y_span: N,
    width: N,
    height: N,
    ratio: N,
}

impl<N: Scalar> CoordinateMapper<N> {
    pub fn new(precision: u32, size: Size, bounds: &PlaneBounds) -> Result<Self, ConfigError> {
        debug_assert!(size.width > 0 && size.height > 0);

        let parse = |bound: &'static str, literal: &str| {
            N::parse(precision, literal).map_err(|source| ConfigError::Bounds { bound, source })
        };

        let x_start = parse("x_start", bounds.x_start.as_str())?;
        let y_start = parse("y_start", bounds.y_start.as_str())?;

        let mut x_span = parse("x_end", bounds.x_end.as_str())?;
        x_span -= &x_start;
        let mut y_span = parse("y_end", bounds.y_end.as_str())?;
        y_span -= &y_start;

        Ok(Self {
            x_start,
            y_start,
            x_span,
            y_span,
            width: N::with_f64(precision, f64::from(size.width)),
            height: N::with_f64(precision, f64::from(size.height)),
            ratio: N::with_f64(precision, 0.0),
        })
    }

    /// Writes the plane point for `pixel` into `point`, overwriting both parts.
    pub fn map(&mut self, pixel: Pixel, point: &mut Complex<N>) {
        Self::scale(
            &mut self.ratio,
            pixel.x,
            &self.width,
            &self.x_span,
            &self.x_start,
            &mut point.real,
        );
        Self::scale(
            &mut self.ratio,
            pixel.y,
            &self.height,
            &self.y_span,
            &self.y_start,
            &mut point.imaginary,
        );
    }

    fn scale(ratio: &mut N, index: u32, extent: &N, span: &N, start: &N, out: &mut N) {
        ratio.set_f64(f64::from(index));
        *ratio /= extent;

        out.clone_from(ratio);
        *out *= span;
        *out += start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::big_float::BigFloat;

    fn size() -> Size {
        Size {
            width: 640,
            height: 480,
        }
    }

    fn map<N: Scalar>(mapper: &mut CoordinateMapper<N>, x: u32, y: u32) -> (f64, f64) {
        let mut point = Complex::zero(128);
        mapper.map(Pixel { x, y }, &mut point);
        point.to_f64()
    }

    fn check_endpoints<N: Scalar>() {
        let mut mapper = CoordinateMapper::<N>::new(128, size(), &PlaneBounds::full_set()).unwrap();

        assert_eq!(map(&mut mapper, 0, 0), (-2.0, -1.5));

        let (x, y) = map(&mut mapper, 639, 479);
        let x_step = 3.0 / 640.0;
        let y_step = 3.0 / 480.0;
        assert!((1.0 - x - x_step).abs() < 1e-12);
        assert!((1.5 - y - y_step).abs() < 1e-12);
    }

    #[test]
    fn endpoints_f64() {
        check_endpoints::<f64>();
    }

    #[test]
    fn endpoints_big_float() {
        check_endpoints::<BigFloat>();
    }

    #[test]
    fn centre_pixel_maps_to_origin() {
        let bounds = PlaneBounds::new("-2", "2", "-2", "2");
        let size = Size {
            width: 4,
            height: 4,
        };
        let mut mapper = CoordinateMapper::<BigFloat>::new(128, size, &bounds).unwrap();
        let mut point = Complex::with_f64(128, 7.0, 7.0);
        mapper.map(Pixel { x: 2, y: 2 }, &mut point);
        assert!(point.real.is_zero());
        assert!(point.imaginary.is_zero());
    }

    #[test]
    fn previous_pixel_does_not_leak() {
        let bounds = PlaneBounds::full_set();
        let mut reused = CoordinateMapper::<BigFloat>::new(128, size(), &bounds).unwrap();
        let _ = map(&mut reused, 123, 321);
        let mut fresh = CoordinateMapper::<BigFloat>::new(128, size(), &bounds).unwrap();
        assert_eq!(map(&mut reused, 17, 42), map(&mut fresh, 17, 42));
    }

    #[test]
    fn corner_keeps_digits_past_f64() {
        let corner = "-1.76890115303843612345";
        let bounds = PlaneBounds::new(corner, "-1.7689", "0", "1e-3");
        let mut mapper = CoordinateMapper::<BigFloat>::new(128, size(), &bounds).unwrap();
        let mut point = Complex::zero(128);
        mapper.map(Pixel { x: 0, y: 0 }, &mut point);

        assert_eq!(point.real, BigFloat::parse(128, corner).unwrap());
        assert_ne!(
            point.real,
            BigFloat::with_f64(128, corner.parse::<f64>().unwrap())
        );
        assert!(point.imaginary.is_zero());
    }

    #[test]
    fn unreadable_bound_is_an_error() {
        let bounds = PlaneBounds::new("-2", "1", "-1.5", "one");
        assert!(matches!(
            CoordinateMapper::<f64>::new(128, size(), &bounds),
            Err(ConfigError::Bounds { bound: "y_end", .. })
        ));
    }
}

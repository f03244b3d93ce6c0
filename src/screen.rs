use crate::pixel::Pixel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of a pixel.
    ///
    /// Panics if `pixel` is outside the grid. A column past the width would
    /// otherwise land on the next row.
    pub fn index(&self, pixel: Pixel) -> usize {
        assert!(
            pixel.x < self.width && pixel.y < self.height,
            "{:?} is outside the {}x{} grid",
            pixel,
            self.width,
            self.height
        );
        pixel.y as usize * self.width as usize + pixel.x as usize
    }

    /// Every pixel, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> {
        let Size { width, height } = *self;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pixel { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_row_major() {
        let size = Size {
            width: 3,
            height: 2,
        };
        let pixels: Vec<Pixel> = size.pixels().collect();
        assert_eq!(pixels.len(), size.pixel_count());
        assert_eq!(pixels[0], Pixel { x: 0, y: 0 });
        assert_eq!(pixels[1], Pixel { x: 1, y: 0 });
        assert_eq!(pixels[3], Pixel { x: 0, y: 1 });
        for (index, pixel) in pixels.into_iter().enumerate() {
            assert_eq!(size.index(pixel), index);
        }
    }

    #[test]
    #[should_panic(expected = "Pixel { x: 3, y: 0 } is outside the 3x2 grid")]
    fn column_past_the_width_does_not_wrap() {
        let size = Size {
            width: 3,
            height: 2,
        };
        size.index(Pixel { x: 3, y: 0 });
    }
}

use ndarray::{s, Array2};

/// Single-channel binary occupancy mask, shape `(height, width)`.
///
/// Foreground pixels are 255, background 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    pixels: Array2<u8>,
}

impl Mask {
    pub fn from_array(pixels: Array2<u8>) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    /// Counts non-zero pixels in `[y, y+height) x [x, x+width)`.
    ///
    /// The rectangle is clipped to the mask; a rectangle entirely outside
    /// counts as 0.
    pub fn count_nonzero(&self, x: i32, y: i32, width: u32, height: u32) -> usize {
        let cols = self.pixels.ncols() as i64;
        let rows = self.pixels.nrows() as i64;
        let x0 = (x as i64).clamp(0, cols);
        let y0 = (y as i64).clamp(0, rows);
        let x1 = (x as i64 + width as i64).clamp(0, cols);
        let y1 = (y as i64 + height as i64).clamp(0, rows);
        if x1 <= x0 || y1 <= y0 {
            return 0;
        }
        self.pixels
            .slice(s![y0 as usize..y1 as usize, x0 as usize..x1 as usize])
            .iter()
            .filter(|&&v| v != 0)
            .count()
    }

    pub fn is_binary(&self) -> bool {
        self.pixels.iter().all(|&v| v == 0 || v == 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_block(width: usize, height: usize, block: (usize, usize, usize, usize)) -> Mask {
        let mut pixels = Array2::<u8>::zeros((height, width));
        let (x, y, w, h) = block;
        pixels.slice_mut(s![y..y + h, x..x + w]).fill(255);
        Mask::from_array(pixels)
    }

    #[test]
    fn test_dimensions() {
        let mask = Mask::from_array(Array2::zeros((4, 9)));
        assert_eq!(mask.width(), 9);
        assert_eq!(mask.height(), 4);
    }

    #[test]
    fn test_count_inside_rectangle() {
        let mask = mask_with_block(20, 20, (5, 5, 4, 3));
        assert_eq!(mask.count_nonzero(0, 0, 20, 20), 12);
        assert_eq!(mask.count_nonzero(5, 5, 2, 2), 4);
        assert_eq!(mask.count_nonzero(10, 10, 5, 5), 0);
    }

    #[test]
    fn test_count_clips_to_bounds() {
        let mask = Mask::from_array(Array2::from_elem((10, 10), 255));
        assert_eq!(mask.count_nonzero(8, 8, 107, 48), 4);
        assert_eq!(mask.count_nonzero(-2, -2, 4, 4), 4);
    }

    #[test]
    fn test_count_fully_outside_is_zero() {
        let mask = Mask::from_array(Array2::from_elem((10, 10), 255));
        assert_eq!(mask.count_nonzero(50, 50, 5, 5), 0);
        assert_eq!(mask.count_nonzero(-20, 0, 5, 5), 0);
    }

    #[test]
    fn test_is_binary() {
        assert!(mask_with_block(4, 4, (0, 0, 2, 2)).is_binary());
        assert!(!Mask::from_array(Array2::from_elem((2, 2), 7)).is_binary());
    }
}

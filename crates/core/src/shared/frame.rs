use ndarray::{ArrayView3, ArrayViewMut3};

/// A decoded video frame or still image: contiguous bytes in row-major order.
///
/// Readers always produce 3-channel RGB. Pixel format conversion happens at
/// the I/O boundary; everything downstream indexes `data` directly.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Solid-color RGB frame, mostly useful for synthetic inputs.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height, 3, 0)
    }

    pub fn from_rgb_image(img: image::RgbImage, index: usize) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of this frame within its source (0 for stills, reset on rewind).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Expands to tightly packed RGBA, as expected by display toolkits.
    pub fn to_rgba(&self) -> Vec<u8> {
        let channels = self.channels as usize;
        let mut out = Vec::with_capacity((self.width as usize) * (self.height as usize) * 4);
        for px in self.data.chunks_exact(channels) {
            match channels {
                1 => out.extend_from_slice(&[px[0], px[0], px[0], 255]),
                3 => out.extend_from_slice(&[px[0], px[1], px[2], 255]),
                _ => out.extend_from_slice(&px[..4]),
            }
        }
        out
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_filled_repeats_color() {
        let frame = Frame::filled(3, 2, [10, 20, 30]);
        assert_eq!(frame.data().len(), 18);
        assert!(frame.data().chunks(3).all(|px| px == [10, 20, 30]));
        assert_eq!(frame.index(), 0);
    }

    #[test]
    fn test_from_rgb_image_keeps_layout() {
        let mut img = image::RgbImage::new(4, 2);
        img.put_pixel(3, 1, image::Rgb([1, 2, 3]));
        let frame = Frame::from_rgb_image(img, 7);
        assert_eq!((frame.width(), frame.height()), (4, 2));
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.as_ndarray()[[1, 3, 2]], 3);
    }

    #[test]
    fn test_to_rgba_appends_opaque_alpha() {
        let frame = Frame::filled(2, 1, [9, 8, 7]);
        assert_eq!(frame.to_rgba(), vec![9, 8, 7, 255, 9, 8, 7, 255]);
    }

    #[test]
    fn test_to_rgba_expands_gray() {
        let frame = Frame::new(vec![42, 0], 2, 1, 1, 0);
        assert_eq!(frame.to_rgba(), vec![42, 42, 42, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Frame::new(Vec::new(), 0, 5, 3, 0).is_empty());
        assert!(!Frame::filled(1, 1, [0, 0, 0]).is_empty());
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::filled(2, 2, [0, 0, 0]);
        {
            let mut arr = frame.as_ndarray_mut();
            arr[[0, 1, 2]] = 128; // row=0, col=1, B channel
        }
        assert_eq!(frame.data()[5], 128);
    }
}

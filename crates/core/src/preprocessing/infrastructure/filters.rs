//! Single-channel image filters on `(height, width)` arrays.

use ndarray::{s, Array2, ArrayView2, Zip};

/// How out-of-range sample coordinates are mapped back into the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    /// `gfedcb|abcdefgh|gfedcba`
    Reflect101,
    /// `aaaaaa|abcdefgh|hhhhhhh`
    Replicate,
}

impl Border {
    pub fn index(self, i: isize, len: usize) -> usize {
        debug_assert!(len > 0);
        let last = len as isize - 1;
        match self {
            Border::Replicate => i.clamp(0, last) as usize,
            Border::Reflect101 => {
                if last == 0 {
                    return 0;
                }
                let mut i = i;
                loop {
                    if i < 0 {
                        i = -i;
                    } else if i > last {
                        i = 2 * last - i;
                    } else {
                        return i as usize;
                    }
                }
            }
        }
    }
}

/// 1D Gaussian kernel, normalized to sum to one.
///
/// With `sigma <= 0` the sigma is derived from the size as
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`, and sizes up to 7 use the fixed
/// binomial kernels instead.
pub fn gaussian_kernel_1d(size: usize, sigma: f64) -> Vec<f32> {
    debug_assert!(size >= 1 && size % 2 == 1);
    if sigma <= 0.0 {
        match size {
            1 => return vec![1.0],
            3 => return vec![0.25, 0.5, 0.25],
            5 => return vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
            7 => {
                return vec![
                    0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25,
                ]
            }
            _ => {}
        }
    }
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let half = (size / 2) as f64;
    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|&w| (w / sum) as f32).collect()
}

/// BT.601 luma from packed pixels, using 14-bit fixed-point weights.
///
/// `channels` is 1 (copied through), 3 (RGB) or 4 (RGBA, alpha ignored).
pub fn grayscale(data: &[u8], width: usize, height: usize, channels: usize) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        let i = (y * width + x) * channels;
        if channels == 1 {
            return data[i];
        }
        let r = data[i] as u32;
        let g = data[i + 1] as u32;
        let b = data[i + 2] as u32;
        ((r * 4899 + g * 9617 + b * 1868 + (1 << 13)) >> 14) as u8
    })
}

/// Separable convolution with a symmetric 1D kernel applied along both axes.
pub fn separable_blur(src: ArrayView2<'_, u8>, kernel: &[f32], border: Border) -> Array2<u8> {
    let (h, w) = src.dim();
    if h == 0 || w == 0 || kernel.len() <= 1 {
        return src.to_owned();
    }
    let half = (kernel.len() / 2) as isize;

    // Horizontal pass: src → temp
    let temp = Array2::from_shape_fn((h, w), |(y, x)| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, &weight)| {
                let sx = border.index(x as isize + k as isize - half, w);
                src[[y, sx]] as f32 * weight
            })
            .sum::<f32>()
    });

    // Vertical pass: temp → out
    Array2::from_shape_fn((h, w), |(y, x)| {
        let sum: f32 = kernel
            .iter()
            .enumerate()
            .map(|(k, &weight)| {
                let sy = border.index(y as isize + k as isize - half, h);
                temp[[sy, x]] * weight
            })
            .sum();
        sum.round().clamp(0.0, 255.0) as u8
    })
}

/// Inverse adaptive threshold against a Gaussian-weighted local mean.
///
/// A pixel becomes 255 when `pixel - mean <= -constant`, otherwise 0.
pub fn adaptive_threshold_gaussian_inv(
    src: ArrayView2<'_, u8>,
    block_size: usize,
    constant: i32,
) -> Array2<u8> {
    let kernel = gaussian_kernel_1d(block_size, 0.0);
    let mean = separable_blur(src, &kernel, Border::Replicate);
    Zip::from(&src).and(&mean).map_collect(|&pixel, &local_mean| {
        if pixel as i32 - local_mean as i32 <= -constant {
            255
        } else {
            0
        }
    })
}

/// Median filter over a `ksize x ksize` window with replicated borders.
///
/// Uses a per-row sliding histogram, so cost grows linearly with `ksize`.
pub fn median_blur(src: ArrayView2<'_, u8>, ksize: usize) -> Array2<u8> {
    let (h, w) = src.dim();
    if h == 0 || w == 0 || ksize <= 1 {
        return src.to_owned();
    }
    let r = (ksize / 2) as isize;
    let rank = ksize * ksize / 2;
    let mut out = Array2::<u8>::zeros((h, w));
    let mut hist = [0u32; 256];

    for y in 0..h {
        hist.fill(0);
        let rows: Vec<usize> = (-r..=r)
            .map(|dy| Border::Replicate.index(y as isize + dy, h))
            .collect();

        for dx in -r..=r {
            let sx = Border::Replicate.index(dx, w);
            for &sy in &rows {
                hist[src[[sy, sx]] as usize] += 1;
            }
        }

        for x in 0..w {
            out[[y, x]] = histogram_rank(&hist, rank);
            if x + 1 < w {
                let leaving = Border::Replicate.index(x as isize - r, w);
                let entering = Border::Replicate.index(x as isize + r + 1, w);
                for &sy in &rows {
                    hist[src[[sy, leaving]] as usize] -= 1;
                    hist[src[[sy, entering]] as usize] += 1;
                }
            }
        }
    }
    out
}

fn histogram_rank(hist: &[u32; 256], rank: usize) -> u8 {
    let mut seen = 0usize;
    for (value, &count) in hist.iter().enumerate() {
        seen += count as usize;
        if seen > rank {
            return value as u8;
        }
    }
    u8::MAX
}

/// One iteration of dilation with a 3x3 all-ones structuring element.
///
/// Neighbors outside the image are ignored.
pub fn dilate_3x3(src: ArrayView2<'_, u8>) -> Array2<u8> {
    let (h, w) = src.dim();
    Array2::from_shape_fn((h, w), |(y, x)| {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(w - 1);
        src.slice(s![y0..=y1, x0..=x1])
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-1, 1)]
    #[case(-2, 2)]
    #[case(0, 0)]
    #[case(4, 4)]
    #[case(5, 3)]
    #[case(6, 2)]
    fn test_reflect101_index(#[case] i: isize, #[case] expected: usize) {
        assert_eq!(Border::Reflect101.index(i, 5), expected);
    }

    #[test]
    fn test_reflect101_single_pixel() {
        assert_eq!(Border::Reflect101.index(-3, 1), 0);
        assert_eq!(Border::Reflect101.index(2, 1), 0);
    }

    #[rstest]
    #[case(-3, 0)]
    #[case(2, 2)]
    #[case(9, 4)]
    fn test_replicate_index(#[case] i: isize, #[case] expected: usize) {
        assert_eq!(Border::Replicate.index(i, 5), expected);
    }

    #[rstest]
    #[case(3, 1.0)]
    #[case(9, 0.0)]
    #[case(25, 0.0)]
    #[case(51, 0.0)]
    fn test_kernel_sums_to_one(#[case] size: usize, #[case] sigma: f64) {
        let k = gaussian_kernel_1d(size, sigma);
        assert_eq!(k.len(), size);
        assert_relative_eq!(k.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_kernel_3x3_sigma_1() {
        let k = gaussian_kernel_1d(3, 1.0);
        assert_relative_eq!(k[0], 0.274_068_6, epsilon = 1e-5);
        assert_relative_eq!(k[1], 0.451_862_8, epsilon = 1e-5);
        assert_relative_eq!(k[2], k[0]);
    }

    #[test]
    fn test_small_kernels_are_binomial() {
        assert_eq!(
            gaussian_kernel_1d(5, 0.0),
            vec![0.0625, 0.25, 0.375, 0.25, 0.0625]
        );
    }

    #[test]
    fn test_large_kernel_center_is_largest() {
        let k = gaussian_kernel_1d(25, 0.0);
        let center = k[12];
        assert!(k.iter().all(|&v| v <= center));
    }

    #[test]
    fn test_grayscale_weights() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let gray = grayscale(&data, 4, 1, 3);
        assert_eq!(gray.row(0).to_vec(), vec![76, 150, 29, 255]);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let data = [10, 10, 10, 0];
        assert_eq!(grayscale(&data, 1, 1, 4)[[0, 0]], 10);
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let src = Array2::from_elem((10, 12), 128u8);
        let out = separable_blur(src.view(), &gaussian_kernel_1d(3, 1.0), Border::Reflect101);
        assert!(out.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_blur_spreads_single_bright_pixel() {
        let mut src = Array2::<u8>::zeros((7, 7));
        src[[3, 3]] = 255;
        let out = separable_blur(src.view(), &gaussian_kernel_1d(3, 1.0), Border::Reflect101);
        assert!(out[[3, 3]] < 255);
        assert!(out[[3, 4]] > 0);
        assert!(out[[2, 2]] > 0);
        assert_eq!(out[[0, 0]], 0);
    }

    #[test]
    fn test_adaptive_threshold_uniform_is_background() {
        let src = Array2::from_elem((20, 20), 200u8);
        let out = adaptive_threshold_gaussian_inv(src.view(), 5, 16);
        assert!(out.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_adaptive_threshold_zero_constant_marks_uniform_foreground() {
        let src = Array2::from_elem((20, 20), 200u8);
        let out = adaptive_threshold_gaussian_inv(src.view(), 5, 0);
        assert!(out.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_adaptive_threshold_marks_dark_spot() {
        let mut src = Array2::from_elem((21, 21), 200u8);
        src[[10, 10]] = 20;
        let out = adaptive_threshold_gaussian_inv(src.view(), 7, 16);
        assert_eq!(out[[10, 10]], 255);
        assert_eq!(out[[0, 0]], 0);
        assert_eq!(out.iter().filter(|&&v| v == 255).count(), 1);
    }

    #[test]
    fn test_median_removes_salt_noise() {
        let mut src = Array2::<u8>::zeros((9, 9));
        src[[4, 4]] = 255;
        src[[0, 8]] = 255;
        let out = median_blur(src.view(), 3);
        assert!(out.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_median_keeps_solid_block() {
        let mut src = Array2::<u8>::zeros((12, 12));
        src.slice_mut(s![3..9, 3..9]).fill(255);
        let out = median_blur(src.view(), 5);
        assert_eq!(out[[5, 5]], 255);
        assert_eq!(out[[0, 0]], 0);
    }

    #[test]
    fn test_median_matches_brute_force() {
        let src = Array2::from_shape_fn((8, 11), |(y, x)| ((y * 37 + x * 91) % 251) as u8);
        let out = median_blur(src.view(), 3);
        for y in 0..8 {
            for x in 0..11 {
                let mut window = Vec::new();
                for dy in -1isize..=1 {
                    for dx in -1isize..=1 {
                        let sy = Border::Replicate.index(y as isize + dy, 8);
                        let sx = Border::Replicate.index(x as isize + dx, 11);
                        window.push(src[[sy, sx]]);
                    }
                }
                window.sort_unstable();
                assert_eq!(out[[y, x]], window[4], "mismatch at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_dilate_grows_pixel_to_3x3() {
        let mut src = Array2::<u8>::zeros((5, 5));
        src[[2, 2]] = 255;
        let out = dilate_3x3(src.view());
        assert_eq!(out.iter().filter(|&&v| v == 255).count(), 9);
        assert_eq!(out[[1, 1]], 255);
        assert_eq!(out[[0, 0]], 0);
    }

    #[test]
    fn test_dilate_at_corner_stays_in_bounds() {
        let mut src = Array2::<u8>::zeros((3, 3));
        src[[0, 0]] = 255;
        let out = dilate_3x3(src.view());
        assert_eq!(out.iter().filter(|&&v| v == 255).count(), 4);
    }

    #[test]
    fn test_filters_accept_empty_input() {
        let src = Array2::<u8>::zeros((0, 0));
        assert_eq!(median_blur(src.view(), 5).dim(), (0, 0));
        assert_eq!(dilate_3x3(src.view()).dim(), (0, 0));
        assert_eq!(
            separable_blur(src.view(), &[0.25, 0.5, 0.25], Border::Replicate).dim(),
            (0, 0)
        );
    }
}

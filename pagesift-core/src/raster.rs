//! Pixel sampling over rendered pages
//!
//! Brightness estimation is deliberately cheap: at most [`MAX_SAMPLES`]
//! pixels are visited regardless of page resolution, strided evenly across
//! the buffer.

use crate::document::PageGeometry;

/// Upper bound on pixels visited per brightness estimate
pub const MAX_SAMPLES: usize = 1000;

/// An RGBA8 pixel buffer produced by rendering a page
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster initialized to pure white.
    ///
    /// Returns `None` for zero-area targets, which callers must treat as a
    /// render failure.
    pub fn white(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: vec![0xFF; width * height * 4],
        })
    }

    /// Wrap an existing RGBA8 buffer. Returns `None` when the buffer length
    /// does not match the dimensions.
    pub fn from_rgba8(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Mutable access to the underlying RGBA8 bytes, for backends that draw
    /// into a white-initialized target
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Average brightness over a strided pixel sample, in [0, 1].
    ///
    /// Visits at most `MAX_SAMPLES` pixels with stride
    /// `max(1, pixel_count / min(MAX_SAMPLES, pixel_count))`. Brightness of
    /// one pixel is the mean of its R, G, B channels normalized to [0, 1];
    /// alpha is ignored.
    pub fn average_brightness(&self) -> f64 {
        let pixel_count = self.pixel_count();
        let sample_size = MAX_SAMPLES.min(pixel_count);
        let stride = (pixel_count / sample_size).max(1);

        let mut sum = 0.0;
        let mut visited = 0usize;
        for i in (0..pixel_count).step_by(stride) {
            let offset = i * 4;
            let r = self.pixels[offset] as f64;
            let g = self.pixels[offset + 1] as f64;
            let b = self.pixels[offset + 2] as f64;
            sum += (r + g + b) / (3.0 * 255.0);
            visited += 1;
        }

        sum / visited as f64
    }
}

/// Render target dimensions for a page at a scale: floor-scaled in both
/// axes.
pub fn scaled_dimensions(geometry: PageGeometry, scale: f64) -> (usize, usize) {
    let width = (geometry.width * scale).floor().max(0.0) as usize;
    let height = (geometry.height * scale).floor().max(0.0) as usize;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Raster {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width * height * 4)
            .collect();
        Raster::from_rgba8(width, height, pixels).unwrap()
    }

    #[test]
    fn test_white_raster_has_full_brightness() {
        let raster = Raster::white(40, 30).unwrap();
        assert_eq!(raster.average_brightness(), 1.0);
    }

    #[test]
    fn test_black_raster_has_zero_brightness() {
        let raster = solid(40, 30, [0, 0, 0, 255]);
        assert_eq!(raster.average_brightness(), 0.0);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let opaque = solid(10, 10, [128, 128, 128, 255]);
        let transparent = solid(10, 10, [128, 128, 128, 0]);
        assert_eq!(
            opaque.average_brightness(),
            transparent.average_brightness()
        );
    }

    #[test]
    fn test_channel_mean_brightness() {
        // (255 + 0 + 0) / (3 * 255) = 1/3
        let raster = solid(10, 10, [255, 0, 0, 255]);
        let brightness = raster.average_brightness();
        assert!((brightness - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_is_bounded_on_large_buffers() {
        // 2000x2000 = 4M pixels, stride 4000: half the visited pixels dark
        let mut raster = Raster::white(2000, 2000).unwrap();
        let stride = (raster.pixel_count() / MAX_SAMPLES).max(1);
        let mut darkened = 0;
        for (n, i) in (0..raster.pixel_count()).step_by(stride).enumerate() {
            if n % 2 == 0 {
                let offset = i * 4;
                raster.pixels_mut()[offset..offset + 3].fill(0);
                darkened += 1;
            }
        }
        assert_eq!(darkened, MAX_SAMPLES / 2);
        let brightness = raster.average_brightness();
        assert!((brightness - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_small_buffer_visits_every_pixel() {
        // 3 pixels, one black: mean = 2/3
        let pixels = vec![
            255, 255, 255, 255, //
            0, 0, 0, 255, //
            255, 255, 255, 255,
        ];
        let raster = Raster::from_rgba8(3, 1, pixels).unwrap();
        let brightness = raster.average_brightness();
        assert!((brightness - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_area_white_raster_is_none() {
        assert!(Raster::white(0, 100).is_none());
        assert!(Raster::white(100, 0).is_none());
    }

    #[test]
    fn test_from_rgba8_rejects_mismatched_length() {
        assert!(Raster::from_rgba8(2, 2, vec![0u8; 15]).is_none());
    }

    #[test]
    fn test_scaled_dimensions_floor() {
        let geometry = PageGeometry::new(612.0, 792.0);
        assert_eq!(scaled_dimensions(geometry, 0.5), (306, 396));

        let odd = PageGeometry::new(611.5, 791.9);
        assert_eq!(scaled_dimensions(odd, 0.5), (305, 395));
    }

    #[test]
    fn test_scaled_dimensions_can_collapse_to_zero() {
        let tiny = PageGeometry::new(1.0, 1.0);
        assert_eq!(scaled_dimensions(tiny, 0.5), (0, 0));
    }
}

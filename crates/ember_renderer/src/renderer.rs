//! Frame-level rendering: pixel buffer, parallel dispatch, accumulation.
//!
//! Pixels are independent, so a frame is a flat parallel-for over rows.
//! Progressive refinement blends each new frame into a running average,
//! mirroring the previous-frame feedback loop of a swapchain accumulator.

use ember_math::Vec3;
use rayon::prelude::*;

use crate::integrator::Integrator;
use crate::traverse::Traversable;

/// Linear RGB color (alias for readability)
pub type Color = Vec3;

/// A pixel buffer holding linear radiance values.
///
/// Row 0 is the bottom of the image plane, matching the camera's
/// normalized coordinates; `to_rgba` flips to the usual top-down layout.
pub struct Film {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Film {
    /// Create a film filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Blend a newly rendered frame into this running average.
    ///
    /// After blending frame t (zero-based), the film holds the mean of
    /// frames 0..=t: avg' = avg * t/(t+1) + frame * 1/(t+1).
    ///
    /// Panics if `frame` has different dimensions.
    pub fn blend(&mut self, frame: &Film, frame_number: u32) {
        assert_eq!(
            (self.width, self.height),
            (frame.width, frame.height),
            "cannot blend a {}x{} frame into a {}x{} film",
            frame.width,
            frame.height,
            self.width,
            self.height
        );

        let t = frame_number as f32;
        let keep = t / (t + 1.0);
        let take = 1.0 / (t + 1.0);

        for (avg, new) in self.pixels.iter_mut().zip(&frame.pixels) {
            *avg = *avg * keep + *new * take;
        }
    }

    /// Convert to 8-bit RGBA, top row first.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                bytes.extend_from_slice(&color_to_rgba(self.get(col, row)));
            }
        }
        bytes
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b, 255]
}

/// Render one frame of the given resolution.
///
/// Rows are distributed across the rayon pool; each pixel evaluation owns
/// its rays and RNG state, and the frame number is a fixed snapshot for the
/// whole call.
pub fn render_frame<T: Traversable>(
    integrator: &Integrator<'_, T>,
    width: u32,
    height: u32,
    frame_number: u32,
) -> Film {
    let start = std::time::Instant::now();
    let mut film = Film::new(width, height);

    film.pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            // Sample through pixel centers
            let y = (row as f32 + 0.5) / height as f32;
            for (col, pixel) in pixels.iter_mut().enumerate() {
                let x = (col as f32 + 0.5) / width as f32;
                *pixel = integrator.render_pixel(x, y, frame_number);
            }
        });

    log::debug!(
        "frame {} ({}x{}) rendered in {:?}",
        frame_number,
        width,
        height,
        start.elapsed()
    );

    film
}

//! Per-pixel deterministic random stream.
//!
//! A counter-based PCG2D generator: two u32 lanes advanced by a fixed
//! multiply-add / xor-shift mix on every draw. Seeding folds the pixel
//! coordinate and frame number together, so every pixel of every frame gets
//! its own decorrelated stream while staying fully reproducible.

/// Largest f32 strictly below 1.0 after scaling a u32 by 2^-32.
const ONE_MINUS_EPSILON: f32 = 0.999_999_94;

/// 2^-32, the scale from a u32 to [0, 1).
const UINT_TO_UNIT: f32 = 2.328_306_4e-10;

const PCG_MULT: u32 = 1664525;
const PCG_INCR: u32 = 1013904223;

/// A 2-lane counter-based generator producing uniform pairs in [0, 1)².
///
/// State is two u32 words, cheap to construct fresh per pixel per frame.
/// Each instance is owned by the pixel evaluation that seeded it; nothing
/// is shared.
#[derive(Debug, Clone)]
pub struct PixelRng {
    state: [u32; 2],
}

impl PixelRng {
    /// Seed directly from two state words.
    pub fn new(seed: [u32; 2]) -> Self {
        Self { state: seed }
    }

    /// Seed from a pixel's normalized coordinates and the frame number.
    ///
    /// The coordinate bit patterns are distinct per pixel; the frame number
    /// is shifted into the high bits of both lanes so consecutive frames
    /// draw from unrelated streams.
    pub fn from_pixel(x: f32, y: f32, frame_number: u32) -> Self {
        let frame_bits = frame_number.wrapping_shl(16);
        Self::new([x.to_bits() ^ frame_bits, y.to_bits() ^ frame_bits])
    }

    /// Advance the state by one PCG2D round.
    fn advance(&mut self) {
        let [mut vx, mut vy] = self.state;

        vx = vx.wrapping_mul(PCG_MULT).wrapping_add(PCG_INCR);
        vy = vy.wrapping_mul(PCG_MULT).wrapping_add(PCG_INCR);

        vx = vx.wrapping_add(vy.wrapping_mul(PCG_MULT));
        vy = vy.wrapping_add(vx.wrapping_mul(PCG_MULT));

        vx ^= vx >> 16;
        vy ^= vy >> 16;

        vx = vx.wrapping_add(vy.wrapping_mul(PCG_MULT));
        vy = vy.wrapping_add(vx.wrapping_mul(PCG_MULT));

        vx ^= vx >> 16;
        vy ^= vy >> 16;

        self.state = [vx, vy];
    }

    /// Draw the next uniform pair in [0, 1)².
    pub fn next_pair(&mut self) -> [f32; 2] {
        self.advance();
        [
            (self.state[0] as f32 * UINT_TO_UNIT).min(ONE_MINUS_EPSILON),
            (self.state[1] as f32 * UINT_TO_UNIT).min(ONE_MINUS_EPSILON),
        ]
    }
}

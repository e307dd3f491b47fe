//! Procedural textures.
//!
//! Nothing is loaded from disk: each pattern deterministically fills a
//! 256x256 ARGB buffer. Patterns are numbered so the tile streamer can
//! pick one by variant.

pub const TEXTURE_SIZE: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexturePattern {
    Bricks,
    Checker,
    Panels,
    SolidWhite,
    Gradient,
    Grid,
    SolidColor(u32),
}

impl TexturePattern {
    /// Maps a numeric variant (1..=6) to a pattern; out-of-range values
    /// fall back to `Grid`.
    pub fn from_variant(variant: u32) -> Self {
        match variant {
            1 => Self::Bricks,
            2 => Self::Checker,
            3 => Self::Panels,
            4 => Self::SolidWhite,
            5 => Self::Gradient,
            _ => Self::Grid,
        }
    }

    /// Fills the pattern into a row-major ARGB buffer.
    pub fn pixels(&self) -> Vec<u32> {
        let mut pixels = vec![0u32; (TEXTURE_SIZE * TEXTURE_SIZE) as usize];
        for y in 0..TEXTURE_SIZE {
            for x in 0..TEXTURE_SIZE {
                pixels[(y * TEXTURE_SIZE + x) as usize] = self.texel(x, y);
            }
        }
        pixels
    }

    fn texel(&self, x: u32, y: u32) -> u32 {
        match *self {
            // 64x32 bricks with a one-texel mortar line, offset every other
            // row.
            Self::Bricks => {
                let shifted_x = if (y / 32) % 2 == 0 { x } else { x + 32 };
                if y % 32 < 2 || shifted_x % 64 < 2 {
                    0xff60_6060
                } else {
                    0xffb4_4e3c
                }
            }
            Self::Checker => {
                if ((x / 32) + (y / 32)) % 2 == 0 {
                    0xffd0_d0d0
                } else {
                    0xff30_3030
                }
            }
            Self::Panels => {
                if x % 64 < 2 || y % 64 < 2 {
                    0xff20_2020
                } else {
                    0xff90_8878
                }
            }
            Self::SolidWhite => 0xffff_ffff,
            Self::Gradient => {
                let g = y & 0xff;
                0xff00_0000 | (g << 16) | (g << 8) | g
            }
            Self::Grid => {
                if x % 16 == 0 || y % 16 == 0 {
                    0xffff_ffff
                } else {
                    0xff40_4040
                }
            }
            Self::SolidColor(color) => color,
        }
    }
}

//! 8×8 bitmap art: pictures, menu icons, battery gauges and the glyph
//! font.
//!
//! Masks pack the whole matrix into a `u64`, bit `y * 8 + x`; inside a
//! row byte, bit 0 is the leftmost pixel (same convention as the common
//! 8×8 fonts, so glyph tables can be copied row for row). Multicolor art
//! is a stack of `(mask, color)` layers drawn in order.

use crate::render::{wheel, FrameBuffer, GREEN, RED, WHITE};
use smart_leds::RGB8;

pub const YELLOW: RGB8 = RGB8 { r: 255, g: 220, b: 0 };
pub const ORANGE: RGB8 = RGB8 { r: 255, g: 120, b: 0 };
pub const PINK: RGB8 = RGB8 { r: 255, g: 80, b: 120 };
pub const BROWN: RGB8 = RGB8 { r: 140, g: 70, b: 20 };
pub const CYAN: RGB8 = RGB8 { r: 0, g: 200, b: 255 };

/// Hue step per pixel index for rainbow-swept masks.
const RAINBOW_MASK_DENSITY: u8 = 4;

/// Time divisor for rainbow-swept masks (ms per hue step).
const RAINBOW_MASK_STEP_MS: u64 = 20;

/// Packs 8 row bytes into a 64-bit mask.
pub const fn rows(r: [u8; 8]) -> u64 {
    let mut mask = 0u64;
    let mut y = 0;
    while y < 8 {
        mask |= (r[y] as u64) << (y * 8);
        y += 1;
    }
    mask
}

/// Layered multicolor bitmap.
pub struct Art {
    pub layers: &'static [(u64, RGB8)],
}

impl Art {
    pub fn draw(&self, frame: &mut FrameBuffer) {
        for &(mask, color) in self.layers {
            draw_mask(frame, mask, color);
        }
    }
}

/// Draws every set bit of `mask` in a single color.
pub fn draw_mask(frame: &mut FrameBuffer, mask: u64, color: RGB8) {
    for i in 0..64 {
        if mask & (1u64 << i) != 0 {
            frame.set(i, color);
        }
    }
}

/// Draws a mask with a color wheel sweeping across it over time.
pub fn draw_mask_rainbow(frame: &mut FrameBuffer, mask: u64, now: u64) {
    let t = (now / RAINBOW_MASK_STEP_MS) as u8;
    for i in 0..64u8 {
        if mask & (1u64 << i) != 0 {
            frame.set(i as usize, wheel((i.wrapping_mul(RAINBOW_MASK_DENSITY)).wrapping_add(t)));
        }
    }
}

// Pictures

const CAT_FACE: u64 = rows([0x42, 0x66, 0x7E, 0x7E, 0x5A, 0x66, 0x7E, 0x3C]);
const CAT_EYES: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x24, 0x00, 0x00, 0x00]);
const CAT_NOSE: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x00, 0x00]);

pub const CAT: Art = Art {
    layers: &[(CAT_FACE, WHITE), (CAT_EYES, GREEN), (CAT_NOSE, PINK)],
};

const PEACH_BODY: u64 = rows([0x00, 0x00, 0x3C, 0x7E, 0x7E, 0x7E, 0x7E, 0x3C]);
const PEACH_LEAF: u64 = rows([0x30, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);

pub const PEACH: Art = Art {
    layers: &[(PEACH_BODY, PINK), (PEACH_LEAF, GREEN)],
};

pub const HEART_BIG: u64 = rows([0x66, 0xFF, 0xFF, 0xFF, 0x7E, 0x3C, 0x18, 0x00]);
pub const HEART_SMALL: u64 = rows([0x00, 0x66, 0x7E, 0x7E, 0x3C, 0x18, 0x00, 0x00]);

pub const HEART: Art = Art {
    layers: &[(HEART_BIG, RED)],
};

const DUCK_BODY: u64 = rows([0x0C, 0x1E, 0x1C, 0x1C, 0x7C, 0x7E, 0x3C, 0x00]);
const DUCK_BEAK: u64 = rows([0x00, 0x01, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00]);

pub const DUCK: Art = Art {
    layers: &[(DUCK_BODY, YELLOW), (DUCK_BEAK, ORANGE)],
};

const SWORD_BLADE: u64 = rows([0x80, 0x40, 0x20, 0x10, 0x08, 0x00, 0x00, 0x00]);
const SWORD_HILT: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x14, 0x0A, 0x05, 0x02]);

pub const SWORD: Art = Art {
    layers: &[(SWORD_BLADE, WHITE), (SWORD_HILT, BROWN)],
};

const DOG_FACE: u64 = rows([0x81, 0xC3, 0x7E, 0x7E, 0x5A, 0x7E, 0x66, 0x3C]);
const DOG_EYES: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x24, 0x00, 0x00, 0x00]);
const DOG_NOSE: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00]);

pub const DOG: Art = Art {
    layers: &[(DOG_FACE, BROWN), (DOG_EYES, WHITE), (DOG_NOSE, RED)],
};

// Menu icons

const FRAME_BORDER: u64 = rows([0xFF, 0x81, 0x81, 0x81, 0x81, 0x81, 0x81, 0xFF]);
const FRAME_SUN: u64 = rows([0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00]);
const FRAME_HILL: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x08, 0x1C, 0x3E, 0x00]);

/// Picture-mode menu icon: a little framed landscape.
pub const PIC_ICON: Art = Art {
    layers: &[(FRAME_BORDER, WHITE), (FRAME_SUN, YELLOW), (FRAME_HILL, GREEN)],
};

const GAME_SNAKE_COIL: u64 = rows([0x00, 0x3E, 0x02, 0x3E, 0x20, 0x3E, 0x00, 0x00]);
const GAME_APPLE: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00]);

/// Game-mode menu icon: a coiled snake and its food.
pub const GAME_ICON: Art = Art {
    layers: &[(GAME_SNAKE_COIL, GREEN), (GAME_APPLE, RED)],
};

/// Tool-mode menu icon, drawn with the rainbow sweep: a wrench.
pub const TOOL_ICON_MASK: u64 = rows([0x60, 0x90, 0x90, 0x60, 0x30, 0x18, 0x0C, 0x04]);

const LOGO_SPARK: u64 = rows([0x00, 0x18, 0x18, 0x7E, 0x7E, 0x18, 0x18, 0x00]);
const LOGO_STAR: u64 = rows([0x42, 0x24, 0x18, 0xFF, 0xFF, 0x18, 0x24, 0x42]);

/// Animation-mode menu icon, two frames.
pub const LOGO_FRAMES: [Art; 2] = [
    Art {
        layers: &[(LOGO_SPARK, YELLOW)],
    },
    Art {
        layers: &[(LOGO_STAR, CYAN)],
    },
];

const GOL_GLIDER_A: u64 = rows([0x00, 0x08, 0x10, 0x1C, 0x00, 0x00, 0x00, 0x00]);
const GOL_GLIDER_B: u64 = rows([0x00, 0x00, 0x14, 0x18, 0x08, 0x00, 0x00, 0x00]);

/// Game-of-life sub-menu icon: a glider mid-step, two frames.
pub const GOL_ICON_FRAMES: [Art; 2] = [
    Art {
        layers: &[(GOL_GLIDER_A, RED)],
    },
    Art {
        layers: &[(GOL_GLIDER_B, RED)],
    },
];

// Battery gauges (vertical battery, bars fill bottom-up)

const BATTERY_OUTLINE: u64 = rows([0x18, 0x3C, 0x24, 0x24, 0x24, 0x24, 0x24, 0x3C]);
const BARS_5: u64 = rows([0x00, 0x00, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00]);
const BARS_4: u64 = rows([0x00, 0x00, 0x00, 0x18, 0x18, 0x18, 0x18, 0x00]);
const BARS_3: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x18, 0x00]);
const BARS_2: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00]);
const BARS_1: u64 = rows([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x00]);

pub const BATTERY_FULL: Art = Art {
    layers: &[(BATTERY_OUTLINE, WHITE), (BARS_5, GREEN)],
};

pub const BATTERY_HIGH: Art = Art {
    layers: &[(BATTERY_OUTLINE, WHITE), (BARS_4, GREEN)],
};

pub const BATTERY_MEDIUM: Art = Art {
    layers: &[(BATTERY_OUTLINE, WHITE), (BARS_3, YELLOW)],
};

pub const BATTERY_LOW: Art = Art {
    layers: &[(BATTERY_OUTLINE, WHITE), (BARS_2, RED)],
};

/// Bars blink against this while the charger is attached.
pub const BATTERY_OUTLINE_ONLY: Art = Art {
    layers: &[(BATTERY_OUTLINE, WHITE)],
};

/// Empty-battery warning, two frames for the blink.
pub const BATTERY_EMPTY_FRAMES: [Art; 2] = [
    Art {
        layers: &[(BATTERY_OUTLINE, RED), (BARS_1, RED)],
    },
    Art {
        layers: &[(BATTERY_OUTLINE, RED)],
    },
];

/// Brightness-preview icon: staircase bar chart, bars light up to the
/// selected level.
pub fn brightness_mask(level: u8) -> u64 {
    let mut mask = 0u64;
    for bar in 0..=level.min(4) as i32 {
        let x = bar + 1;
        let height = bar + 2;
        for step in 0..height {
            let y = 7 - step;
            mask |= 1u64 << (y * 8 + x);
        }
    }
    mask
}

// Glyph font (A–Z, 0–9), bit 0 = leftmost pixel.

pub const LETTER_GLYPHS: [[u8; 8]; 26] = [
    [0x0C, 0x1E, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x00], // A
    [0x3F, 0x66, 0x66, 0x3E, 0x66, 0x66, 0x3F, 0x00], // B
    [0x3C, 0x66, 0x03, 0x03, 0x03, 0x66, 0x3C, 0x00], // C
    [0x1F, 0x36, 0x66, 0x66, 0x66, 0x36, 0x1F, 0x00], // D
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x46, 0x7F, 0x00], // E
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x06, 0x0F, 0x00], // F
    [0x3C, 0x66, 0x03, 0x03, 0x73, 0x66, 0x7C, 0x00], // G
    [0x33, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x33, 0x00], // H
    [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // I
    [0x78, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E, 0x00], // J
    [0x67, 0x66, 0x36, 0x1E, 0x36, 0x66, 0x67, 0x00], // K
    [0x0F, 0x06, 0x06, 0x06, 0x46, 0x66, 0x7F, 0x00], // L
    [0x63, 0x77, 0x7F, 0x7F, 0x6B, 0x63, 0x63, 0x00], // M
    [0x63, 0x67, 0x6F, 0x7B, 0x73, 0x63, 0x63, 0x00], // N
    [0x1C, 0x36, 0x63, 0x63, 0x63, 0x36, 0x1C, 0x00], // O
    [0x3F, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x0F, 0x00], // P
    [0x1E, 0x33, 0x33, 0x33, 0x3B, 0x1E, 0x38, 0x00], // Q
    [0x3F, 0x66, 0x66, 0x3E, 0x36, 0x66, 0x67, 0x00], // R
    [0x1E, 0x33, 0x07, 0x0E, 0x38, 0x33, 0x1E, 0x00], // S
    [0x3F, 0x2D, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // T
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x33, 0x3F, 0x00], // U
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // V
    [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00], // W
    [0x63, 0x63, 0x36, 0x1C, 0x1C, 0x36, 0x63, 0x00], // X
    [0x33, 0x33, 0x33, 0x1E, 0x0C, 0x0C, 0x1E, 0x00], // Y
    [0x7F, 0x63, 0x31, 0x18, 0x4C, 0x66, 0x7F, 0x00], // Z
];

pub const DIGIT_GLYPHS: [[u8; 8]; 10] = [
    [0x3E, 0x63, 0x73, 0x7B, 0x6F, 0x67, 0x3E, 0x00], // 0
    [0x0C, 0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x3F, 0x00], // 1
    [0x1E, 0x33, 0x30, 0x1C, 0x06, 0x33, 0x3F, 0x00], // 2
    [0x1E, 0x33, 0x30, 0x1C, 0x30, 0x33, 0x1E, 0x00], // 3
    [0x38, 0x3C, 0x36, 0x33, 0x7F, 0x30, 0x78, 0x00], // 4
    [0x3F, 0x03, 0x1F, 0x30, 0x30, 0x33, 0x1E, 0x00], // 5
    [0x1C, 0x06, 0x03, 0x1F, 0x33, 0x33, 0x1E, 0x00], // 6
    [0x3F, 0x33, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x00], // 7
    [0x1E, 0x33, 0x33, 0x1E, 0x33, 0x33, 0x1E, 0x00], // 8
    [0x1E, 0x33, 0x33, 0x3E, 0x30, 0x18, 0x0E, 0x00], // 9
];

/// Letter-mode menu icon mask (the 'A' glyph).
pub fn letter_icon_mask() -> u64 {
    rows(LETTER_GLYPHS[0])
}

/// Number-mode menu icon mask (the '0' glyph).
pub fn number_icon_mask() -> u64 {
    rows(DIGIT_GLYPHS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BLACK;

    #[test]
    fn rows_packs_row_major() {
        let mask = rows([0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]);
        assert_eq!(mask & 1, 1, "row 0 bit 0 is pixel 0");
        assert_eq!(mask >> 63, 1, "row 7 bit 7 is pixel 63");
    }

    #[test]
    fn art_draws_layers_in_order() {
        let mut frame = FrameBuffer::new();
        CAT.draw(&mut frame);
        // Eyes overwrite the face layer.
        assert_eq!(frame.get(4 * 8 + 2), GREEN);
        // Ear tip is face-colored.
        assert_eq!(frame.get(1), WHITE);
        // Background untouched.
        assert_eq!(frame.get(0), BLACK);
    }

    #[test]
    fn brightness_mask_grows_with_level() {
        for level in 0..4u8 {
            let lit = brightness_mask(level).count_ones();
            let next = brightness_mask(level + 1).count_ones();
            assert!(next > lit);
        }
    }

    #[test]
    fn every_glyph_has_pixels() {
        for glyph in LETTER_GLYPHS.iter().chain(DIGIT_GLYPHS.iter()) {
            assert_ne!(rows(*glyph), 0);
        }
    }

    #[test]
    fn rainbow_mask_colors_only_set_bits() {
        let mut frame = FrameBuffer::new();
        draw_mask_rainbow(&mut frame, TOOL_ICON_MASK, 12345);
        for i in 0..64 {
            let lit = TOOL_ICON_MASK & (1u64 << i) != 0;
            assert_eq!(frame.get(i) != BLACK, lit);
        }
    }
}

//! Pixel buffer and the strip sink contract.
//!
//! All content renders into a [`FrameBuffer`] owned by the frame
//! controller; the finished frame is pushed out once per tick through the
//! [`Strip`] trait, which is the only thing the hardware layer has to
//! implement. The control plane never touches wire timing.

use crate::config::{BOARD_HEIGHT, BOARD_WIDTH, PIXEL_COUNT};
use smart_leds::RGB8;

pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Physical strip sink. Implementations scale pixel values by the global
/// brightness at presentation time; the buffer itself stays unscaled.
pub trait Strip {
    fn clear(&mut self);
    fn set_pixel(&mut self, index: usize, color: RGB8);
    fn set_global_brightness(&mut self, value: u8);
    fn present(&mut self);
}

/// 8×8 row-major pixel buffer. `(0, 0)` is the top-left corner.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [RGB8; PIXEL_COUNT],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; PIXEL_COUNT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [BLACK; PIXEL_COUNT];
    }

    pub fn fill(&mut self, color: RGB8) {
        self.pixels = [color; PIXEL_COUNT];
    }

    /// Sets a pixel by flat index. Out-of-range indices are skipped.
    pub fn set(&mut self, index: usize, color: RGB8) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = color;
        }
    }

    /// Sets a pixel by coordinates. Off-grid coordinates are skipped,
    /// so callers can draw entities that wander past the edge.
    pub fn set_xy(&mut self, x: i32, y: i32, color: RGB8) {
        if let Some(index) = pos_to_index(x, y) {
            self.pixels[index] = color;
        }
    }

    pub fn get(&self, index: usize) -> RGB8 {
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    pub fn pixels(&self) -> &[RGB8; PIXEL_COUNT] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps `(x, y)` to the flat row-major LED index, or `None` when the
/// coordinates fall outside the 8×8 grid.
pub fn pos_to_index(x: i32, y: i32) -> Option<usize> {
    if x < 0 || x >= BOARD_WIDTH || y < 0 || y >= BOARD_HEIGHT {
        return None;
    }
    Some((y * BOARD_WIDTH + x) as usize)
}

/// Classic WS2812 color wheel: walks red → green → blue and back as the
/// input goes 0..255.
pub fn wheel(pos: u8) -> RGB8 {
    let pos = 255 - pos;
    if pos < 85 {
        RGB8 {
            r: 255 - pos * 3,
            g: 0,
            b: pos * 3,
        }
    } else if pos < 170 {
        let pos = pos - 85;
        RGB8 {
            r: 0,
            g: pos * 3,
            b: 255 - pos * 3,
        }
    } else {
        let pos = pos - 170;
        RGB8 {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_grid_coordinates_are_skipped() {
        assert_eq!(pos_to_index(-1, 0), None);
        assert_eq!(pos_to_index(8, 0), None);
        assert_eq!(pos_to_index(0, 8), None);
        assert_eq!(pos_to_index(0, 0), Some(0));
        assert_eq!(pos_to_index(7, 7), Some(63));

        let mut frame = FrameBuffer::new();
        frame.set_xy(-1, 3, RED);
        frame.set_xy(3, 9, RED);
        assert!(frame.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn set_and_clear() {
        let mut frame = FrameBuffer::new();
        frame.set_xy(2, 1, GREEN);
        assert_eq!(frame.get(10), GREEN);
        frame.clear();
        assert_eq!(frame.get(10), BLACK);
    }

    #[test]
    fn wheel_endpoints_are_saturated() {
        // Every wheel output has exactly two channels in play.
        for pos in [0u8, 84, 85, 169, 170, 255] {
            let c = wheel(pos);
            let sum = c.r as u16 + c.g as u16 + c.b as u16;
            assert!(sum > 0, "wheel({pos}) produced black");
        }
    }
}

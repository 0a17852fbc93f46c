//! Conway's Game of Life on the 8×8 matrix. Runs on its own and
//! reseeds itself when the world dies out or freezes.

use super::GamePhase;
use crate::config::{BOARD_HEIGHT, BOARD_WIDTH, PIXEL_COUNT};
use crate::render::{FrameBuffer, RED};
use crate::rng::Rng;

const GENERATION_MS: u64 = 200;

/// Roughly 20 % of the matrix.
const SEED_CELLS: u32 = 12;

pub struct Life {
    phase: GamePhase,
    /// One bit per cell, bit `y * 8 + x`.
    world: u64,
    last_step: u64,
}

impl Life {
    pub const fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            world: 0,
            last_step: 0,
        }
    }

    pub fn start(&mut self, now: u64, rng: &mut Rng) {
        self.phase = GamePhase::Running;
        self.world = seed(rng);
        self.last_step = now;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn update_and_render(&mut self, frame: &mut FrameBuffer, rng: &mut Rng, now: u64) {
        if self.phase != GamePhase::Running {
            return;
        }
        if now.wrapping_sub(self.last_step) >= GENERATION_MS {
            self.last_step = now;
            let next = generation(self.world);
            // Extinction and still lifes both reseed; oscillators keep
            // going on their own.
            self.world = if next == 0 || next == self.world {
                seed(rng)
            } else {
                next
            };
        }
        for i in 0..PIXEL_COUNT {
            if self.world & (1u64 << i) != 0 {
                frame.set(i, RED);
            }
        }
    }
}

fn seed(rng: &mut Rng) -> u64 {
    let mut world = 0u64;
    while world.count_ones() < SEED_CELLS {
        world |= 1u64 << rng.range(PIXEL_COUNT as u32);
    }
    world
}

fn generation(world: u64) -> u64 {
    let mut next = 0u64;
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            let alive = world & (1u64 << (y * 8 + x)) != 0;
            let n = neighbors(world, x, y);
            let lives = matches!((alive, n), (true, 2) | (true, 3) | (false, 3));
            if lives {
                next |= 1u64 << (y * 8 + x);
            }
        }
    }
    next
}

fn neighbors(world: u64, x: i32, y: i32) -> u32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (x + dx, y + dy);
            if (0..BOARD_WIDTH).contains(&nx)
                && (0..BOARD_HEIGHT).contains(&ny)
                && world & (1u64 << (ny * 8 + nx)) != 0
            {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::bitmaps::rows;

    #[test]
    fn blinker_oscillates() {
        let horizontal = rows([0x00, 0x00, 0x00, 0x1C, 0x00, 0x00, 0x00, 0x00]);
        let vertical = rows([0x00, 0x00, 0x08, 0x08, 0x08, 0x00, 0x00, 0x00]);
        assert_eq!(generation(horizontal), vertical);
        assert_eq!(generation(vertical), horizontal);
    }

    #[test]
    fn lone_cells_die() {
        let sparse = 1u64 | (1u64 << 63);
        assert_eq!(generation(sparse), 0);
    }

    #[test]
    fn block_is_stable() {
        let block = rows([0x00, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x00]);
        assert_eq!(generation(block), block);
    }

    #[test]
    fn seed_has_the_right_density() {
        let mut rng = Rng::new(5);
        assert_eq!(seed(&mut rng).count_ones(), SEED_CELLS);
    }

    #[test]
    fn stasis_triggers_a_reseed() {
        let mut game = Life::new();
        let mut rng = Rng::new(5);
        let mut frame = FrameBuffer::new();
        game.start(0, &mut rng);
        // A still life would otherwise freeze the display forever.
        game.world = rows([0x00, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x00]);
        game.update_and_render(&mut frame, &mut rng, GENERATION_MS);
        assert_ne!(game.world, rows([0x00, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x00]));
        assert_eq!(game.world.count_ones(), SEED_CELLS);
    }
}

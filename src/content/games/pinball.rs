//! Single-paddle pinball. The ball speeds up on every catch; dropping
//! it past the paddle ends the round.

use super::{GamePhase, GAME_OVER_BLINK_MS};
use crate::config::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::input::ButtonEvent;
use crate::render::{wheel, FrameBuffer, RED, WHITE};

const PADDLE_LEN: i32 = 3;
const START_STEP_MS: u64 = 300;
const MIN_STEP_MS: u64 = 60;

/// Speed-up per successful catch.
const STEP_DECREMENT_MS: u64 = 20;

pub struct Pinball {
    phase: GamePhase,
    ball_x: i32,
    ball_y: i32,
    vel_x: i32,
    vel_y: i32,
    paddle_x: i32,
    step_ms: u64,
    last_step: u64,
    game_over_since: u64,
}

impl Pinball {
    pub const fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            ball_x: 2,
            ball_y: 2,
            vel_x: 1,
            vel_y: 1,
            paddle_x: 2,
            step_ms: START_STEP_MS,
            last_step: 0,
            game_over_since: 0,
        }
    }

    pub fn start(&mut self, now: u64) {
        *self = Self::new();
        self.phase = GamePhase::Running;
        self.last_step = now;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn handle_input(&mut self, event: ButtonEvent, now: u64) {
        if self.phase == GamePhase::GameOver {
            // Any click skips the rest of the flash and restarts.
            if matches!(event, ButtonEvent::LeftClick | ButtonEvent::RightClick) {
                self.start(now);
            }
            return;
        }
        if self.phase != GamePhase::Running {
            return;
        }
        match event {
            ButtonEvent::LeftClick => {
                self.paddle_x = (self.paddle_x - 1).max(0);
            }
            ButtonEvent::RightClick => {
                self.paddle_x = (self.paddle_x + 1).min(BOARD_WIDTH - PADDLE_LEN);
            }
            _ => {}
        }
    }

    pub fn update_and_render(&mut self, frame: &mut FrameBuffer, now: u64) {
        match self.phase {
            GamePhase::Idle => {}
            GamePhase::Running => {
                if now.wrapping_sub(self.last_step) >= self.step_ms {
                    self.last_step = now;
                    self.step(now);
                }
                self.draw(frame, now);
            }
            GamePhase::GameOver => {
                let elapsed = now.wrapping_sub(self.game_over_since);
                if (elapsed / GAME_OVER_BLINK_MS) % 2 == 0 {
                    frame.fill(RED);
                }
            }
        }
    }

    fn step(&mut self, now: u64) {
        self.ball_x += self.vel_x;
        self.ball_y += self.vel_y;

        if self.ball_x < 0 {
            self.ball_x = 0;
            self.vel_x = 1;
        } else if self.ball_x >= BOARD_WIDTH {
            self.ball_x = BOARD_WIDTH - 1;
            self.vel_x = -1;
        }
        if self.ball_y < 0 {
            self.ball_y = 0;
            self.vel_y = 1;
        }

        // The paddle sits on the bottom row, so the catch happens one
        // row above it.
        if self.ball_y >= BOARD_HEIGHT - 2 && self.vel_y > 0 {
            let caught =
                self.ball_x >= self.paddle_x && self.ball_x < self.paddle_x + PADDLE_LEN;
            if caught {
                self.ball_y = BOARD_HEIGHT - 2;
                self.vel_y = -1;
                self.step_ms = self.step_ms.saturating_sub(STEP_DECREMENT_MS).max(MIN_STEP_MS);
            } else if self.ball_y >= BOARD_HEIGHT - 1 {
                self.phase = GamePhase::GameOver;
                self.game_over_since = now;
            }
        }
    }

    fn draw(&self, frame: &mut FrameBuffer, now: u64) {
        for i in 0..PADDLE_LEN {
            frame.set_xy(self.paddle_x + i, BOARD_HEIGHT - 1, WHITE);
        }
        frame.set_xy(self.ball_x, self.ball_y, wheel((now / 10) as u8));
    }
}

/// Self-playing pinball loop shown while the pinball entry is selected
/// in the game sub-menu.
pub struct PinballIcon {
    pos: usize,
    last_step: u64,
}

const ICON_STEP_MS: u64 = 150;

/// Clockwise lap of the matrix border, starting top-left.
const BORDER_LAP: usize = 28;

impl PinballIcon {
    pub const fn new() -> Self {
        Self { pos: 0, last_step: 0 }
    }

    pub fn update_and_render(&mut self, frame: &mut FrameBuffer, now: u64) {
        if now.wrapping_sub(self.last_step) >= ICON_STEP_MS {
            self.last_step = now;
            self.pos = (self.pos + 1) % BORDER_LAP;
        }
        let (x, y) = border_position(self.pos);
        // A held paddle and a chasing ball.
        for i in 0..PADDLE_LEN {
            frame.set_xy(2 + i, BOARD_HEIGHT - 1, WHITE);
        }
        frame.set_xy(x, y, wheel((self.pos as u8).wrapping_mul(9)));
    }
}

/// Maps a border-lap step onto matrix coordinates.
pub(super) fn border_position(step: usize) -> (i32, i32) {
    let step = step % BORDER_LAP;
    match step {
        0..=7 => (step as i32, 0),
        8..=14 => (7, (step - 7) as i32),
        15..=21 => ((21 - step) as i32, 7),
        _ => (0, (28 - step) as i32),
    }
}

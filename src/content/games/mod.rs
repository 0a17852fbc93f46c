//! Game runtimes and their shared lifecycle contract.
//!
//! Every game moves through `Idle -> Running -> GameOver` and is only
//! stepped from `update_and_render`; button events arrive separately so
//! input stays responsive between animation steps.

pub mod life;
pub mod pinball;
pub mod snake;

use crate::input::ButtonEvent;
use crate::render::FrameBuffer;
use crate::rng::Rng;
use crate::state::GameMode;

use life::Life;
use pinball::Pinball;
use snake::Snake;

pub use pinball::PinballIcon;
pub use snake::SnakeIcon;

/// Blink interval of the full-frame game-over flash. The flash runs
/// until a click restarts the game or a long press exits.
pub const GAME_OVER_BLINK_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    Idle,
    Running,
    GameOver,
}

/// All game runtimes, dispatched by the selected [`GameMode`].
pub struct Games {
    pinball: Pinball,
    snake: Snake,
    life: Life,
}

impl Games {
    pub const fn new() -> Self {
        Self {
            pinball: Pinball::new(),
            snake: Snake::new(),
            life: Life::new(),
        }
    }

    pub fn start(&mut self, mode: GameMode, now: u64, rng: &mut Rng) {
        match mode {
            GameMode::Pinball => self.pinball.start(now),
            GameMode::Snake => self.snake.start(now, rng),
            GameMode::GameOfLife => self.life.start(now, rng),
        }
    }

    pub fn handle_input(&mut self, mode: GameMode, event: ButtonEvent, now: u64, rng: &mut Rng) {
        match mode {
            GameMode::Pinball => self.pinball.handle_input(event, now),
            GameMode::Snake => self.snake.handle_input(event, now, rng),
            // Life runs on its own; clicks are ignored.
            GameMode::GameOfLife => {}
        }
    }

    pub fn update_and_render(
        &mut self,
        mode: GameMode,
        frame: &mut FrameBuffer,
        rng: &mut Rng,
        now: u64,
    ) {
        match mode {
            GameMode::Pinball => self.pinball.update_and_render(frame, now),
            GameMode::Snake => self.snake.update_and_render(frame, rng, now),
            GameMode::GameOfLife => self.life.update_and_render(frame, rng, now),
        }
    }

    /// Drops every game back to idle. Called when the player exits a
    /// running game so a later start begins fresh.
    pub fn reset(&mut self) {
        self.pinball.reset();
        self.snake.reset();
        self.life.reset();
    }

    pub fn phase(&self, mode: GameMode) -> GamePhase {
        match mode {
            GameMode::Pinball => self.pinball.phase(),
            GameMode::Snake => self.snake.phase(),
            GameMode::GameOfLife => self.life.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_returns_every_game_to_idle() {
        let mut games = Games::new();
        let mut rng = Rng::new(3);
        games.start(GameMode::Pinball, 0, &mut rng);
        games.start(GameMode::Snake, 0, &mut rng);
        games.start(GameMode::GameOfLife, 0, &mut rng);
        assert_eq!(games.phase(GameMode::Pinball), GamePhase::Running);
        assert_eq!(games.phase(GameMode::Snake), GamePhase::Running);
        assert_eq!(games.phase(GameMode::GameOfLife), GamePhase::Running);

        games.reset();
        assert_eq!(games.phase(GameMode::Pinball), GamePhase::Idle);
        assert_eq!(games.phase(GameMode::Snake), GamePhase::Idle);
        assert_eq!(games.phase(GameMode::GameOfLife), GamePhase::Idle);
    }
}

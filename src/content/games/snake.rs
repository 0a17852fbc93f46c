//! Snake with two-button relative steering: the left button turns the
//! snake one way, the right button the other.

use super::{GamePhase, GAME_OVER_BLINK_MS};
use crate::config::{BOARD_HEIGHT, BOARD_WIDTH, PIXEL_COUNT};
use crate::input::ButtonEvent;
use crate::render::{FrameBuffer, GREEN, RED, WHITE};
use crate::rng::Rng;
use heapless::Vec;

const STEP_MS: u64 = 350;
const FOOD_BLINK_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Right => Direction::Up,
        }
    }

    fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Up,
            Direction::Right => Direction::Down,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

pub struct Snake {
    phase: GamePhase,
    /// Head first.
    body: Vec<(i32, i32), PIXEL_COUNT>,
    direction: Direction,
    food: (i32, i32),
    last_step: u64,
    game_over_since: u64,
}

impl Snake {
    pub const fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            body: Vec::new(),
            direction: Direction::Right,
            food: (0, 0),
            last_step: 0,
            game_over_since: 0,
        }
    }

    pub fn start(&mut self, now: u64, rng: &mut Rng) {
        self.phase = GamePhase::Running;
        self.body.clear();
        for p in [(4, 4), (3, 4), (2, 4)] {
            // Three segments always fit in a 64-cell arena.
            let _ = self.body.push(p);
        }
        self.direction = Direction::Right;
        self.last_step = now;
        self.place_food(rng);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn handle_input(&mut self, event: ButtonEvent, now: u64, rng: &mut Rng) {
        if self.phase == GamePhase::GameOver {
            // Any click skips the rest of the flash and restarts.
            if matches!(event, ButtonEvent::LeftClick | ButtonEvent::RightClick) {
                self.start(now, rng);
            }
            return;
        }
        if self.phase != GamePhase::Running {
            return;
        }
        match event {
            ButtonEvent::LeftClick => self.direction = self.direction.turn_left(),
            ButtonEvent::RightClick => self.direction = self.direction.turn_right(),
            _ => {}
        }
    }

    pub fn update_and_render(&mut self, frame: &mut FrameBuffer, rng: &mut Rng, now: u64) {
        match self.phase {
            GamePhase::Idle => {}
            GamePhase::Running => {
                if now.wrapping_sub(self.last_step) >= STEP_MS {
                    self.last_step = now;
                    self.step(rng, now);
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

    fn step(&mut self, rng: &mut Rng, now: u64) {
        let (dx, dy) = self.direction.delta();
        let head = self.body[0];
        let next = (head.0 + dx, head.1 + dy);

        let hit_wall = !(0..BOARD_WIDTH).contains(&next.0) || !(0..BOARD_HEIGHT).contains(&next.1);
        if hit_wall || self.body.contains(&next) {
            self.phase = GamePhase::GameOver;
            self.game_over_since = now;
            return;
        }

        let ate = next == self.food;
        // Growth is capped at the arena size; at full length eating
        // just moves the snake.
        if !ate || self.body.is_full() {
            self.body.pop();
        }
        // The pop above always leaves a free slot.
        let _ = self.body.insert(0, next);
        if ate {
            self.place_food(rng);
        }
    }

    fn place_food(&mut self, rng: &mut Rng) {
        // Nowhere left to put food once the body fills the arena.
        if self.body.is_full() {
            return;
        }
        loop {
            let candidate = (
                rng.range(BOARD_WIDTH as u32) as i32,
                rng.range(BOARD_HEIGHT as u32) as i32,
            );
            if !self.body.contains(&candidate) {
                self.food = candidate;
                return;
            }
        }
    }

    fn draw(&self, frame: &mut FrameBuffer, now: u64) {
        for (i, &(x, y)) in self.body.iter().enumerate() {
            frame.set_xy(x, y, if i == 0 { WHITE } else { RED });
        }
        if (now / FOOD_BLINK_MS) % 2 == 0 {
            frame.set_xy(self.food.0, self.food.1, GREEN);
        }
    }
}

/// Snake sub-menu icon: a lone snake lapping the border toward a fixed
/// apple.
pub struct SnakeIcon {
    pos: usize,
    last_step: u64,
}

const ICON_STEP_MS: u64 = 150;
const ICON_LEN: usize = 4;
const ICON_APPLE: (i32, i32) = (6, 3);

impl SnakeIcon {
    pub const fn new() -> Self {
        Self { pos: 0, last_step: 0 }
    }

    pub fn update_and_render(&mut self, frame: &mut FrameBuffer, now: u64) {
        if now.wrapping_sub(self.last_step) >= ICON_STEP_MS {
            self.last_step = now;
            self.pos += 1;
        }
        for i in 0..ICON_LEN {
            let (x, y) = super::pinball::border_position(self.pos + i);
            frame.set_xy(x, y, if i == ICON_LEN - 1 { WHITE } else { GREEN });
        }
        frame.set_xy(ICON_APPLE.0, ICON_APPLE.1, RED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stepped(game: &mut Snake, rng: &mut Rng, frame: &mut FrameBuffer, now: &mut u64) {
        *now += STEP_MS;
        frame.clear();
        game.update_and_render(frame, rng, *now);
    }

    #[test]
    fn snake_moves_head_first() {
        let mut game = Snake::new();
        let mut rng = Rng::new(11);
        let mut frame = FrameBuffer::new();
        let mut now = 0u64;
        game.start(now, &mut rng);
        game.food = (0, 0);
        stepped(&mut game, &mut rng, &mut frame, &mut now);
        assert_eq!(game.body[0], (5, 4));
        assert_eq!(game.body.len(), 3);
    }

    #[test]
    fn eating_grows_the_snake() {
        let mut game = Snake::new();
        let mut rng = Rng::new(11);
        let mut frame = FrameBuffer::new();
        let mut now = 0u64;
        game.start(now, &mut rng);
        game.food = (5, 4);
        stepped(&mut game, &mut rng, &mut frame, &mut now);
        assert_eq!(game.body.len(), 4);
        assert_ne!(game.food, (5, 4));
    }

    #[test]
    fn wall_collision_ends_the_game() {
        let mut game = Snake::new();
        let mut rng = Rng::new(11);
        let mut frame = FrameBuffer::new();
        let mut now = 0u64;
        game.start(now, &mut rng);
        game.food = (0, 0);
        for _ in 0..4 {
            stepped(&mut game, &mut rng, &mut frame, &mut now);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn any_click_restarts_from_game_over() {
        let mut game = Snake::new();
        let mut rng = Rng::new(11);
        game.start(0, &mut rng);
        game.phase = GamePhase::GameOver;
        game.game_over_since = 500;
        game.handle_input(ButtonEvent::RightClick, 600, &mut rng);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.body.len(), 3);
    }

    #[test]
    fn game_over_flash_persists_until_a_click() {
        let mut game = Snake::new();
        let mut rng = Rng::new(11);
        let mut frame = FrameBuffer::new();
        game.start(0, &mut rng);
        game.phase = GamePhase::GameOver;
        game.game_over_since = 500;
        game.update_and_render(&mut frame, &mut rng, 500 + 10 * GAME_OVER_BLINK_MS);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(frame.pixels()[0], RED);
    }

    #[test]
    fn turns_are_relative_to_travel() {
        assert_eq!(Direction::Right.turn_left(), Direction::Up);
        assert_eq!(Direction::Right.turn_right(), Direction::Down);
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Left.turn_left(), Direction::Down);
    }

    #[test]
    fn food_placement_terminates_on_a_full_board() {
        let mut game = Snake::new();
        let mut rng = Rng::new(11);
        game.start(0, &mut rng);
        game.body.clear();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let _ = game.body.push((x, y));
            }
        }
        game.food = (5, 5);
        game.place_food(&mut rng);
        // No free cell: food stays put instead of scanning forever.
        assert_eq!(game.food, (5, 5));
    }

    #[test]
    fn growth_stops_at_the_arena_size() {
        let mut game = Snake::new();
        let mut rng = Rng::new(11);
        let mut frame = FrameBuffer::new();
        let mut now = 0u64;
        game.start(now, &mut rng);
        // Hand-built position: every cell but (0,0) occupied, head at
        // (1,0) one move from the last free cell. Only the head and
        // membership matter to the step logic, not segment order.
        game.body.clear();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if (x, y) != (0, 0) {
                    let _ = game.body.push((x, y));
                }
            }
        }
        game.direction = Direction::Left;
        game.food = (0, 0);
        stepped(&mut game, &mut rng, &mut frame, &mut now);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.body.len(), PIXEL_COUNT);
        assert_eq!(game.body[0], (0, 0));

        // Every later move collides, so the run ends here.
        stepped(&mut game, &mut rng, &mut frame, &mut now);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn food_never_spawns_on_the_body() {
        let mut game = Snake::new();
        let mut rng = Rng::new(99);
        game.start(0, &mut rng);
        for _ in 0..100 {
            game.place_food(&mut rng);
            assert!(!game.body.contains(&game.food));
        }
    }
}

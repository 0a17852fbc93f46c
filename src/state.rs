//! Application navigation state: top-level modes, per-family sub-modes and
//! the overlay slot.
//!
//! `AppState` is a plain owned context struct. It is mutated only by the
//! navigator and read by the content dispatcher, so there is exactly one
//! writer and no shared-state story to tell.

use crate::config::DEFAULT_BRIGHTNESS_LEVEL;

/// Number of letter glyphs (A–Z).
pub const LETTER_COUNT: u8 = 26;

/// Number of digit glyphs (0–9).
pub const NUMBER_COUNT: u8 = 10;

/// Top-level menu modes, in menu cycling order.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainMode {
    Animation,
    Picture,
    Game,
    Letter,
    Number,
    Tool,
}

impl MainMode {
    pub fn next(self) -> Self {
        match self {
            MainMode::Animation => MainMode::Picture,
            MainMode::Picture => MainMode::Game,
            MainMode::Game => MainMode::Letter,
            MainMode::Letter => MainMode::Number,
            MainMode::Number => MainMode::Tool,
            MainMode::Tool => MainMode::Animation,
        }
    }

    /// Modes that run full-screen directly from the top menu, with no
    /// sub-menu step in between.
    pub fn runs_directly(self) -> bool {
        matches!(
            self,
            MainMode::Animation | MainMode::Picture | MainMode::Letter | MainMode::Number
        )
    }
}

/// Animation variants.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimMode {
    Flame,
    Rainbow,
    BeatingHeart,
    Meteor,
}

impl AnimMode {
    pub fn next(self) -> Self {
        match self {
            AnimMode::Flame => AnimMode::Rainbow,
            AnimMode::Rainbow => AnimMode::BeatingHeart,
            AnimMode::BeatingHeart => AnimMode::Meteor,
            AnimMode::Meteor => AnimMode::Flame,
        }
    }
}

/// Picture variants.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PicMode {
    Cat,
    Peach,
    Heart,
    Duck,
    Sword,
    Dog,
}

impl PicMode {
    pub fn next(self) -> Self {
        match self {
            PicMode::Cat => PicMode::Peach,
            PicMode::Peach => PicMode::Heart,
            PicMode::Heart => PicMode::Duck,
            PicMode::Duck => PicMode::Sword,
            PicMode::Sword => PicMode::Dog,
            PicMode::Dog => PicMode::Cat,
        }
    }
}

/// Built-in games.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Pinball,
    Snake,
    GameOfLife,
}

impl GameMode {
    pub fn next(self) -> Self {
        match self {
            GameMode::Pinball => GameMode::Snake,
            GameMode::Snake => GameMode::GameOfLife,
            GameMode::GameOfLife => GameMode::Pinball,
        }
    }
}

/// System overlays. At most one of overlay / ordinary content is drawn per
/// frame; brightness applies to whichever was drawn.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayMode {
    None,
    /// Battery snapshot after a chord press; expires on its own.
    BatteryDisplay,
    /// Charger connected; persists until the charger is removed.
    Charging,
    /// Charger connected and battery full; persists likewise.
    ChargeFull,
}

/// The whole navigation state, one instance for the whole device.
#[derive(Clone, Debug)]
pub struct AppState {
    pub main_mode: MainMode,
    pub anim_mode: AnimMode,
    pub pic_mode: PicMode,
    pub game_mode: GameMode,
    /// Letter glyph index, 0 = 'A'.
    pub letter_index: u8,
    /// Digit glyph index, 0 = '0'.
    pub number_index: u8,
    pub overlay_mode: OverlayMode,
    /// Whether the second navigation level is open for the current mode.
    pub in_sub_menu: bool,
    /// Whether full-screen content (vs. a menu icon) is active.
    pub is_running: bool,
    /// Committed brightness level, 0–4.
    pub brightness_level: u8,
}

impl AppState {
    pub fn new(brightness_level: u8) -> Self {
        Self {
            main_mode: MainMode::Animation,
            anim_mode: AnimMode::Flame,
            pic_mode: PicMode::Cat,
            game_mode: GameMode::Pinball,
            letter_index: 0,
            number_index: 0,
            overlay_mode: OverlayMode::None,
            in_sub_menu: false,
            is_running: false,
            brightness_level,
        }
    }

    /// `true` only while an actual game is being played. Animations and
    /// pictures running full-screen do not count.
    pub fn game_active(&self) -> bool {
        self.main_mode == MainMode::Game && self.is_running
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_BRIGHTNESS_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_mode_cycles_through_all_six() {
        let mut mode = MainMode::Animation;
        for _ in 0..6 {
            mode = mode.next();
        }
        assert_eq!(mode, MainMode::Animation);
    }

    #[test]
    fn anim_mode_wraps_after_four() {
        assert_eq!(AnimMode::Meteor.next(), AnimMode::Flame);
    }

    #[test]
    fn game_active_requires_running_game_mode() {
        let mut state = AppState::default();
        state.is_running = true;
        assert!(!state.game_active());
        state.main_mode = MainMode::Game;
        assert!(state.game_active());
    }
}

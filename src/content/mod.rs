//! Everything that can be drawn: overlays, menu icons, running content
//! and the game runtimes, behind one dispatch point.

pub mod animations;
pub mod bitmaps;
pub mod games;

use crate::input::ButtonEvent;
use crate::power::{BatteryLevel, PowerMonitor};
use crate::render::FrameBuffer;
use crate::rng::Rng;
use crate::state::{AnimMode, AppState, MainMode, OverlayMode, PicMode};

use animations::{rainbow_flow, FlameState, MeteorState, TwoFrameAnimator};
use bitmaps::{
    brightness_mask, draw_mask, draw_mask_rainbow, letter_icon_mask, number_icon_mask, rows, Art,
    BATTERY_EMPTY_FRAMES, BATTERY_FULL, BATTERY_HIGH, BATTERY_LOW, BATTERY_MEDIUM,
    BATTERY_OUTLINE_ONLY, CAT, DIGIT_GLYPHS, DOG, DUCK, GAME_ICON, GOL_ICON_FRAMES, HEART,
    HEART_BIG, HEART_SMALL, LETTER_GLYPHS, LOGO_FRAMES, PEACH, PIC_ICON, SWORD, TOOL_ICON_MASK,
    YELLOW,
};
use games::{Games, PinballIcon, SnakeIcon};

const HEART_BEAT_MS: u64 = 250;
const LOGO_FLIP_MS: u64 = 250;
const GOL_ICON_FLIP_MS: u64 = 400;
const BATTERY_EMPTY_BLINK_MS: u64 = 300;
const CHARGING_BLINK_MS: u64 = 500;

/// Owns all drawable state and renders exactly one thing per frame.
pub struct ContentRuntime {
    rng: Rng,
    flame: FlameState,
    meteor: MeteorState,
    heart: TwoFrameAnimator,
    logo: TwoFrameAnimator,
    gol_icon: TwoFrameAnimator,
    pinball_icon: PinballIcon,
    snake_icon: SnakeIcon,
    games: Games,
}

impl ContentRuntime {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed),
            flame: FlameState::new(),
            meteor: MeteorState::new(),
            heart: TwoFrameAnimator::new(HEART_BEAT_MS),
            logo: TwoFrameAnimator::new(LOGO_FLIP_MS),
            gol_icon: TwoFrameAnimator::new(GOL_ICON_FLIP_MS),
            pinball_icon: PinballIcon::new(),
            snake_icon: SnakeIcon::new(),
            games: Games::new(),
        }
    }

    pub fn game_input(&mut self, state: &AppState, event: ButtonEvent, now: u64) {
        self.games.handle_input(state.game_mode, event, now, &mut self.rng);
    }

    pub fn start_game(&mut self, state: &AppState, now: u64) {
        self.games.start(state.game_mode, now, &mut self.rng);
    }

    pub fn reset_games(&mut self) {
        self.games.reset();
    }

    pub fn invalidate_meteor(&mut self) {
        self.meteor.invalidate();
    }

    /// Draws the current frame. Overlays win over running content,
    /// running content wins over menus.
    pub fn render(
        &mut self,
        state: &AppState,
        preview_brightness: u8,
        battery_snapshot: BatteryLevel,
        power: &PowerMonitor,
        now: u64,
        frame: &mut FrameBuffer,
    ) {
        frame.clear();

        match state.overlay_mode {
            OverlayMode::BatteryDisplay => {
                self.draw_battery(frame, battery_snapshot, now);
                return;
            }
            OverlayMode::Charging => {
                self.draw_charging(frame, power.battery_level(), now);
                return;
            }
            OverlayMode::ChargeFull => {
                BATTERY_FULL.draw(frame);
                return;
            }
            OverlayMode::None => {}
        }

        if state.is_running {
            self.draw_running(state, now, frame);
        } else if state.in_sub_menu {
            self.draw_sub_menu(state, preview_brightness, now, frame);
        } else {
            self.draw_main_menu(state, now, frame);
        }
    }

    fn draw_battery(&self, frame: &mut FrameBuffer, level: BatteryLevel, now: u64) {
        let art: &Art = match level {
            BatteryLevel::Full => &BATTERY_FULL,
            BatteryLevel::High => &BATTERY_HIGH,
            BatteryLevel::Medium => &BATTERY_MEDIUM,
            BatteryLevel::Low => &BATTERY_LOW,
            BatteryLevel::Empty => {
                let phase = ((now / BATTERY_EMPTY_BLINK_MS) % 2) as usize;
                &BATTERY_EMPTY_FRAMES[phase]
            }
        };
        art.draw(frame);
    }

    /// Charging gauge on the live level. High, full and empty blink
    /// while charge flows in; medium and low hold steady.
    fn draw_charging(&self, frame: &mut FrameBuffer, level: BatteryLevel, now: u64) {
        let blank = (now / CHARGING_BLINK_MS) % 2 == 1;
        let art: &Art = match level {
            BatteryLevel::Full | BatteryLevel::High if blank => &BATTERY_OUTLINE_ONLY,
            BatteryLevel::Full => &BATTERY_FULL,
            BatteryLevel::High => &BATTERY_HIGH,
            BatteryLevel::Medium => &BATTERY_MEDIUM,
            BatteryLevel::Low => &BATTERY_LOW,
            // An empty pack alternates with the low icon so the gauge
            // never goes fully dark while plugged in.
            BatteryLevel::Empty if blank => &BATTERY_LOW,
            BatteryLevel::Empty => &BATTERY_EMPTY_FRAMES[0],
        };
        art.draw(frame);
    }

    fn draw_running(&mut self, state: &AppState, now: u64, frame: &mut FrameBuffer) {
        match state.main_mode {
            MainMode::Animation => match state.anim_mode {
                AnimMode::Flame => self.flame.update_and_render(frame, &mut self.rng, now),
                AnimMode::Rainbow => rainbow_flow(frame, now),
                AnimMode::BeatingHeart => {
                    let mask = if self.heart.tick(now) == 0 {
                        HEART_BIG
                    } else {
                        HEART_SMALL
                    };
                    draw_mask(frame, mask, crate::render::RED);
                }
                AnimMode::Meteor => self.meteor.update_and_render(frame, &mut self.rng, now),
            },
            MainMode::Picture => pic_art(state.pic_mode).draw(frame),
            MainMode::Letter => {
                let glyph = LETTER_GLYPHS[state.letter_index as usize % LETTER_GLYPHS.len()];
                draw_mask_rainbow(frame, rows(glyph), now);
            }
            MainMode::Number => {
                let glyph = DIGIT_GLYPHS[state.number_index as usize % DIGIT_GLYPHS.len()];
                draw_mask_rainbow(frame, rows(glyph), now);
            }
            MainMode::Game => {
                self.games
                    .update_and_render(state.game_mode, frame, &mut self.rng, now);
            }
            // Tool never runs, it commits straight from its sub-menu.
            MainMode::Tool => {}
        }
    }

    fn draw_sub_menu(
        &mut self,
        state: &AppState,
        preview_brightness: u8,
        now: u64,
        frame: &mut FrameBuffer,
    ) {
        match state.main_mode {
            MainMode::Game => match state.game_mode {
                crate::state::GameMode::Pinball => {
                    self.pinball_icon.update_and_render(frame, now);
                }
                crate::state::GameMode::Snake => {
                    self.snake_icon.update_and_render(frame, now);
                }
                crate::state::GameMode::GameOfLife => {
                    GOL_ICON_FRAMES[self.gol_icon.tick(now)].draw(frame);
                }
            },
            MainMode::Tool => {
                draw_mask(frame, brightness_mask(preview_brightness), YELLOW);
            }
            // Only Game and Tool have sub-menus.
            _ => self.draw_main_menu(state, now, frame),
        }
    }

    fn draw_main_menu(&mut self, state: &AppState, now: u64, frame: &mut FrameBuffer) {
        match state.main_mode {
            MainMode::Animation => LOGO_FRAMES[self.logo.tick(now)].draw(frame),
            MainMode::Picture => PIC_ICON.draw(frame),
            MainMode::Game => GAME_ICON.draw(frame),
            MainMode::Letter => draw_mask_rainbow(frame, letter_icon_mask(), now),
            MainMode::Number => draw_mask_rainbow(frame, number_icon_mask(), now),
            MainMode::Tool => draw_mask_rainbow(frame, TOOL_ICON_MASK, now),
        }
    }
}

fn pic_art(mode: PicMode) -> &'static Art {
    match mode {
        PicMode::Cat => &CAT,
        PicMode::Peach => &PEACH,
        PicMode::Heart => &HEART,
        PicMode::Duck => &DUCK,
        PicMode::Sword => &SWORD,
        PicMode::Dog => &DOG,
    }
}

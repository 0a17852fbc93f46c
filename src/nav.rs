//! Navigation: routes debounced button events through the menu
//! hierarchy and arbitrates the battery/charging overlays.
//!
//! Event priority, highest first: an open battery-display overlay
//! swallows everything, then the both-button chord, then whatever
//! content is running, then the menus.

use crate::config::{BATTERY_OVERLAY_MS, BRIGHTNESS_LEVELS, DEFAULT_BRIGHTNESS_LEVEL};
use crate::content::ContentRuntime;
use crate::input::ButtonEvent;
use crate::power::{BatteryLevel, ChargingState, PowerMonitor};
use crate::settings::{save_brightness, SettingsStore};
use crate::state::{AppState, MainMode, OverlayMode, LETTER_COUNT, NUMBER_COUNT};

pub struct Navigator {
    /// Battery level frozen when the overlay opened, so the gauge does
    /// not flicker between levels while visible.
    battery_snapshot: BatteryLevel,
    overlay_started_at: u64,
    /// Brightness level being previewed in the tool sub-menu. Only
    /// committed to [`AppState`] on confirm.
    preview_brightness: u8,
}

impl Navigator {
    pub const fn new() -> Self {
        Self {
            battery_snapshot: BatteryLevel::Empty,
            overlay_started_at: 0,
            preview_brightness: DEFAULT_BRIGHTNESS_LEVEL,
        }
    }

    pub fn battery_snapshot(&self) -> BatteryLevel {
        self.battery_snapshot
    }

    pub fn preview_brightness(&self) -> u8 {
        self.preview_brightness
    }

    pub fn handle_event<S: SettingsStore>(
        &mut self,
        state: &mut AppState,
        content: &mut ContentRuntime,
        store: &mut S,
        power: &PowerMonitor,
        event: ButtonEvent,
        now: u64,
    ) {
        if event == ButtonEvent::None {
            return;
        }

        // The battery display is modal; input is ignored until it
        // times out on its own.
        if state.overlay_mode == OverlayMode::BatteryDisplay {
            return;
        }

        if event == ButtonEvent::BothPress {
            // A running game keeps both buttons for itself.
            if !state.game_active() {
                state.overlay_mode = OverlayMode::BatteryDisplay;
                self.battery_snapshot = power.battery_level();
                self.overlay_started_at = now;
            }
            return;
        }

        if state.is_running {
            self.handle_running(state, content, event, now);
        } else {
            self.handle_menu(state, content, store, event, now);
        }
    }

    fn handle_running(
        &mut self,
        state: &mut AppState,
        content: &mut ContentRuntime,
        event: ButtonEvent,
        now: u64,
    ) {
        if event == ButtonEvent::RightLongPress {
            state.is_running = false;
            // Always back to the top menu, even out of a game started
            // from its sub-menu.
            state.in_sub_menu = false;
            if state.main_mode == MainMode::Game {
                content.reset_games();
            }
            content.invalidate_meteor();
            return;
        }

        match state.main_mode {
            // Games see every remaining event themselves.
            MainMode::Game => content.game_input(state, event, now),
            _ => {
                if event == ButtonEvent::LeftClick {
                    self.cycle_running(state, content);
                }
            }
        }
    }

    /// Left click while non-game content runs steps to the next entry
    /// of the same mode.
    fn cycle_running(&mut self, state: &mut AppState, content: &mut ContentRuntime) {
        match state.main_mode {
            MainMode::Animation => {
                content.invalidate_meteor();
                state.anim_mode = state.anim_mode.next();
            }
            MainMode::Picture => state.pic_mode = state.pic_mode.next(),
            MainMode::Letter => state.letter_index = (state.letter_index + 1) % LETTER_COUNT,
            MainMode::Number => state.number_index = (state.number_index + 1) % NUMBER_COUNT,
            MainMode::Game | MainMode::Tool => {}
        }
    }

    fn handle_menu<S: SettingsStore>(
        &mut self,
        state: &mut AppState,
        content: &mut ContentRuntime,
        store: &mut S,
        event: ButtonEvent,
        now: u64,
    ) {
        match event {
            ButtonEvent::LeftClick => {
                if state.in_sub_menu {
                    match state.main_mode {
                        MainMode::Game => state.game_mode = state.game_mode.next(),
                        MainMode::Tool => {
                            self.preview_brightness =
                                (self.preview_brightness + 1) % BRIGHTNESS_LEVELS;
                        }
                        _ => {}
                    }
                } else {
                    state.main_mode = state.main_mode.next();
                }
            }
            ButtonEvent::RightClick => {
                if state.in_sub_menu {
                    match state.main_mode {
                        MainMode::Game => {
                            state.is_running = true;
                            content.start_game(state, now);
                        }
                        MainMode::Tool => {
                            state.brightness_level = self.preview_brightness;
                            // Persisting is best effort; the committed
                            // level applies either way.
                            let _ = save_brightness(store, state.brightness_level);
                            state.in_sub_menu = false;
                        }
                        _ => state.in_sub_menu = false,
                    }
                } else if state.main_mode.runs_directly() {
                    state.is_running = true;
                } else {
                    state.in_sub_menu = true;
                    if state.main_mode == MainMode::Tool {
                        self.preview_brightness = state.brightness_level;
                    }
                }
            }
            ButtonEvent::RightLongPress => {
                // Back out of a sub-menu, dropping any preview.
                state.in_sub_menu = false;
            }
            _ => {}
        }
    }

    /// Time-driven overlay changes, run every tick after input.
    pub fn tick_overlays(&mut self, state: &mut AppState, power: &mut PowerMonitor, now: u64) {
        if power.take_charging_event() {
            state.overlay_mode = match power.charging_state() {
                ChargingState::Charging => OverlayMode::Charging,
                ChargingState::ChargeFull => OverlayMode::ChargeFull,
                ChargingState::Discharging => OverlayMode::None,
            };
        }

        match state.overlay_mode {
            OverlayMode::BatteryDisplay => {
                if now.wrapping_sub(self.overlay_started_at) > BATTERY_OVERLAY_MS {
                    state.overlay_mode = OverlayMode::None;
                }
            }
            OverlayMode::Charging | OverlayMode::ChargeFull => {
                // Charger unplugged: drop straight back to content.
                if power.charging_state() == ChargingState::Discharging {
                    state.overlay_mode = OverlayMode::None;
                }
            }
            OverlayMode::None => {}
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

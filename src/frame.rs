//! The frame controller: one `tick` per display refresh, wiring raw
//! samples through input, power, navigation and content into a strip.

use crate::config::PIXEL_COUNT;
use crate::content::ContentRuntime;
use crate::input::Buttons;
use crate::nav::Navigator;
use crate::power::PowerMonitor;
use crate::render::{FrameBuffer, Strip};
use crate::settings::{brightness_pwm, load_brightness, SettingsStore};
use crate::state::{AppState, MainMode};

pub struct FrameController<S: SettingsStore> {
    state: AppState,
    buttons: Buttons,
    nav: Navigator,
    power: PowerMonitor,
    content: ContentRuntime,
    frame: FrameBuffer,
    store: S,
}

impl<S: SettingsStore> FrameController<S> {
    /// Boots the control plane: the committed brightness comes from the
    /// store, the first battery level from the boot-time sample.
    pub fn new(mut store: S, battery_millivolts: u16, seed: u32) -> Self {
        let brightness = load_brightness(&mut store);
        Self {
            state: AppState::new(brightness),
            buttons: Buttons::new(),
            nav: Navigator::new(),
            power: PowerMonitor::new(battery_millivolts),
            content: ContentRuntime::new(seed),
            frame: FrameBuffer::new(),
            store,
        }
    }

    /// Runs one frame: sample, decide, draw, present.
    pub fn tick<T: Strip>(
        &mut self,
        raw_left: bool,
        raw_right: bool,
        battery_millivolts: u16,
        charger_active: bool,
        now: u64,
        strip: &mut T,
    ) {
        self.power.tick(battery_millivolts, charger_active, now);

        let event = self.buttons.poll(raw_left, raw_right, now);
        self.nav.handle_event(
            &mut self.state,
            &mut self.content,
            &mut self.store,
            &self.power,
            event,
            now,
        );
        self.nav.tick_overlays(&mut self.state, &mut self.power, now);

        self.content.render(
            &self.state,
            self.nav.preview_brightness(),
            self.nav.battery_snapshot(),
            &self.power,
            now,
            &mut self.frame,
        );

        // While the tool sub-menu is open the preview level drives the
        // panel, so the user sees the brightness they are choosing.
        let level = if self.state.main_mode == MainMode::Tool && self.state.in_sub_menu {
            self.nav.preview_brightness()
        } else {
            self.state.brightness_level
        };
        strip.set_global_brightness(brightness_pwm(level));

        strip.clear();
        for i in 0..PIXEL_COUNT {
            strip.set_pixel(i, self.frame.get(i));
        }
        strip.present();
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BRIGHTNESS_ADDR, DEFAULT_BRIGHTNESS_LEVEL};
    use crate::settings::MemoryStore;
    use crate::state::OverlayMode;

    struct NullStrip;

    impl Strip for NullStrip {
        fn clear(&mut self) {}
        fn set_pixel(&mut self, _index: usize, _color: smart_leds::RGB8) {}
        fn set_global_brightness(&mut self, _value: u8) {}
        fn present(&mut self) {}
    }

    #[test]
    fn boot_reads_brightness_from_the_store() {
        let mut store = MemoryStore::erased();
        store.bytes[BRIGHTNESS_ADDR as usize] = 4;
        let controller = FrameController::new(store, 3900, 1);
        assert_eq!(controller.state().brightness_level, 4);
    }

    #[test]
    fn boot_falls_back_on_garbage_brightness() {
        let mut store = MemoryStore::erased();
        store.bytes[BRIGHTNESS_ADDR as usize] = 7;
        let controller = FrameController::new(store, 3900, 1);
        assert_eq!(controller.state().brightness_level, DEFAULT_BRIGHTNESS_LEVEL);
    }

    #[test]
    fn idle_ticks_stay_in_the_menu() {
        let mut controller = FrameController::new(MemoryStore::erased(), 3900, 1);
        let mut strip = NullStrip;
        for t in 0..100u64 {
            controller.tick(false, false, 3900, false, t * 5, &mut strip);
        }
        assert!(!controller.state().is_running);
        assert_eq!(controller.state().overlay_mode, OverlayMode::None);
    }
}

//! Battery level and charger-state tracking.
//!
//! The monitor is fed raw samples (battery millivolts and the charger
//! status line) once per frame and downsamples internally: voltage is
//! re-classified every five seconds, the charger line every 200 ms. The
//! only thing it pushes back to the rest of the system is an edge flag
//! that flips when charging starts or the battery tops out, consumed once
//! by the overlay arbiter.

use crate::config::{
    CHARGING_CHECK_INTERVAL_MS, VOLTAGE_CHECK_INTERVAL_MS, VOLTAGE_LEVEL_FULL, VOLTAGE_LEVEL_HIGH,
    VOLTAGE_LEVEL_LOW, VOLTAGE_LEVEL_MEDIUM,
};

/// Coarse battery level derived from the voltage thresholds.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryLevel {
    Empty,
    Low,
    Medium,
    High,
    Full,
}

/// Charger connection state.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargingState {
    Discharging,
    Charging,
    ChargeFull,
}

/// Maps a battery voltage (mV) onto a [`BatteryLevel`].
pub fn classify_voltage(millivolts: u16) -> BatteryLevel {
    if millivolts >= VOLTAGE_LEVEL_FULL {
        BatteryLevel::Full
    } else if millivolts >= VOLTAGE_LEVEL_HIGH {
        BatteryLevel::High
    } else if millivolts >= VOLTAGE_LEVEL_MEDIUM {
        BatteryLevel::Medium
    } else if millivolts >= VOLTAGE_LEVEL_LOW {
        BatteryLevel::Low
    } else {
        BatteryLevel::Empty
    }
}

pub struct PowerMonitor {
    level: BatteryLevel,
    charging: ChargingState,
    /// Set on the discharging→charging edge and again when the battery
    /// reaches full while charging; cleared by
    /// [`take_charging_event`](PowerMonitor::take_charging_event).
    charging_changed: bool,
    last_voltage_check: u64,
    last_charging_check: u64,
}

impl PowerMonitor {
    /// Creates a monitor with an immediate voltage classification, so the
    /// first frame already has a real level to show.
    pub fn new(battery_millivolts: u16) -> Self {
        Self {
            level: classify_voltage(battery_millivolts),
            charging: ChargingState::Discharging,
            charging_changed: false,
            last_voltage_check: 0,
            last_charging_check: 0,
        }
    }

    /// Feeds one frame's raw samples. `charger_active` is the decoded
    /// charger status line (`true` = charger delivering current).
    pub fn tick(&mut self, battery_millivolts: u16, charger_active: bool, now: u64) {
        if now - self.last_voltage_check > VOLTAGE_CHECK_INTERVAL_MS {
            self.last_voltage_check = now;
            self.level = classify_voltage(battery_millivolts);
        }

        if now - self.last_charging_check > CHARGING_CHECK_INTERVAL_MS {
            self.last_charging_check = now;
            self.update_charging(battery_millivolts, charger_active);
        }
    }

    fn update_charging(&mut self, battery_millivolts: u16, charger_active: bool) {
        match (charger_active, self.charging) {
            // Rising edge: charger just connected.
            (true, ChargingState::Discharging) => {
                self.charging = ChargingState::Charging;
                self.charging_changed = true;
            }
            // While charging, full voltage promotes to charge-full.
            (true, ChargingState::Charging) => {
                if battery_millivolts >= VOLTAGE_LEVEL_FULL {
                    self.charging = ChargingState::ChargeFull;
                    self.charging_changed = true;
                }
            }
            (true, ChargingState::ChargeFull) => {}
            // Charger removed; no edge event, the arbiter notices the
            // discharging state on its own.
            (false, ChargingState::Charging) | (false, ChargingState::ChargeFull) => {
                self.charging = ChargingState::Discharging;
            }
            (false, ChargingState::Discharging) => {}
        }
    }

    pub fn battery_level(&self) -> BatteryLevel {
        self.level
    }

    pub fn charging_state(&self) -> ChargingState {
        self.charging
    }

    /// Returns the charging-changed flag and clears it.
    pub fn take_charging_event(&mut self) -> bool {
        core::mem::take(&mut self.charging_changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_thresholds_classify_into_five_levels() {
        assert_eq!(classify_voltage(4200), BatteryLevel::Full);
        assert_eq!(classify_voltage(4000), BatteryLevel::Full);
        assert_eq!(classify_voltage(3999), BatteryLevel::High);
        assert_eq!(classify_voltage(3850), BatteryLevel::High);
        assert_eq!(classify_voltage(3800), BatteryLevel::Medium);
        assert_eq!(classify_voltage(3600), BatteryLevel::Low);
        assert_eq!(classify_voltage(3400), BatteryLevel::Empty);
    }

    #[test]
    fn charger_connect_raises_one_event() {
        let mut pm = PowerMonitor::new(3800);
        pm.tick(3800, false, 300);
        assert!(!pm.take_charging_event());

        pm.tick(3800, true, 600);
        assert_eq!(pm.charging_state(), ChargingState::Charging);
        assert!(pm.take_charging_event());
        // Flag is consumed once.
        assert!(!pm.take_charging_event());

        // Still charging, still below full: no further events.
        pm.tick(3900, true, 900);
        assert!(!pm.take_charging_event());
    }

    #[test]
    fn reaching_full_while_charging_raises_second_event() {
        let mut pm = PowerMonitor::new(3800);
        pm.tick(3800, true, 300);
        assert!(pm.take_charging_event());

        pm.tick(4050, true, 600);
        assert_eq!(pm.charging_state(), ChargingState::ChargeFull);
        assert!(pm.take_charging_event());
    }

    #[test]
    fn charger_removal_is_silent() {
        let mut pm = PowerMonitor::new(3800);
        pm.tick(3800, true, 300);
        let _ = pm.take_charging_event();

        pm.tick(3800, false, 600);
        assert_eq!(pm.charging_state(), ChargingState::Discharging);
        assert!(!pm.take_charging_event());
    }

    #[test]
    fn voltage_is_downsampled() {
        let mut pm = PowerMonitor::new(4100);
        assert_eq!(pm.battery_level(), BatteryLevel::Full);
        // A sag 2 s in is not seen yet; reclassification happens at 5 s.
        pm.tick(3600, false, 2000);
        assert_eq!(pm.battery_level(), BatteryLevel::Full);
        pm.tick(3600, false, 5500);
        assert_eq!(pm.battery_level(), BatteryLevel::Low);
    }
}

//! Persisted brightness setting.
//!
//! The storage contract is a single-byte EEPROM-style seam so the logic
//! can be tested against an in-memory store on the host; the embedded
//! binary backs it with a flash map (see `main.rs`). Only one address is
//! in use today.

use crate::config::{
    BRIGHTNESS_ADDR, BRIGHTNESS_LEVELS, BRIGHTNESS_PWM, BRIGHTNESS_PWM_FALLBACK,
    DEFAULT_BRIGHTNESS_LEVEL,
};

/// Error from the persistent byte store.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    Read,
    Write,
}

/// Single-byte persistent storage.
pub trait SettingsStore {
    fn read_byte(&mut self, addr: u32) -> Result<u8, StoreError>;
    fn write_byte(&mut self, addr: u32, value: u8) -> Result<(), StoreError>;
}

/// Loads the committed brightness level. Anything unreadable or outside
/// 0–4 (erased flash reads 0xFF) falls back to the default mid level,
/// never to the stored value.
pub fn load_brightness<S: SettingsStore>(store: &mut S) -> u8 {
    match store.read_byte(BRIGHTNESS_ADDR) {
        Ok(level) if level < BRIGHTNESS_LEVELS => level,
        _ => DEFAULT_BRIGHTNESS_LEVEL,
    }
}

/// Persists a brightness level, skipping the write when the stored byte
/// already matches to keep erase cycles down.
pub fn save_brightness<S: SettingsStore>(store: &mut S, level: u8) -> Result<(), StoreError> {
    if store.read_byte(BRIGHTNESS_ADDR) == Ok(level) {
        return Ok(());
    }
    store.write_byte(BRIGHTNESS_ADDR, level)
}

/// Maps a brightness level to the PWM value handed to the strip.
pub fn brightness_pwm(level: u8) -> u8 {
    BRIGHTNESS_PWM
        .get(level as usize)
        .copied()
        .unwrap_or(BRIGHTNESS_PWM_FALLBACK)
}

/// In-memory store for host tests and the emulated default build.
#[derive(Default)]
pub struct MemoryStore {
    pub bytes: [u8; 4],
    pub writes: usize,
}

impl MemoryStore {
    /// A store that reads as erased flash (all 0xFF).
    pub fn erased() -> Self {
        Self {
            bytes: [0xFF; 4],
            writes: 0,
        }
    }
}

impl SettingsStore for MemoryStore {
    fn read_byte(&mut self, addr: u32) -> Result<u8, StoreError> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(StoreError::Read)
    }

    fn write_byte(&mut self, addr: u32, value: u8) -> Result<(), StoreError> {
        let slot = self.bytes.get_mut(addr as usize).ok_or(StoreError::Write)?;
        *slot = value;
        self.writes += 1;
        Ok(())
    }
}

//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, voltage thresholds and storage layout constants
//! live here so they can be tuned in one place.

// Matrix geometry

/// Board width in pixels.
pub const BOARD_WIDTH: i32 = 8;

/// Board height in pixels.
pub const BOARD_HEIGHT: i32 = 8;

/// Total number of LEDs on the matrix.
pub const PIXEL_COUNT: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

// Buttons

/// Button debounce time (ms). Level changes shorter than this are noise.
pub const DEBOUNCE_MS: u64 = 20;

/// Minimum hold time (ms) before a press counts as a long press.
pub const LONG_PRESS_MS: u64 = 800;

// Overlays

/// Lifetime of the battery-level overlay after a chord press (ms).
pub const BATTERY_OVERLAY_MS: u64 = 2000;

// Brightness

/// Number of user-selectable brightness levels.
pub const BRIGHTNESS_LEVELS: u8 = 5;

/// Brightness level used when the persisted byte is missing or invalid.
pub const DEFAULT_BRIGHTNESS_LEVEL: u8 = 2;

/// PWM value for each brightness level.
pub const BRIGHTNESS_PWM: [u8; 5] = [30, 60, 90, 160, 255];

/// PWM value used if a level somehow falls outside the table.
pub const BRIGHTNESS_PWM_FALLBACK: u8 = 90;

/// Settings-store address of the persisted brightness byte.
pub const BRIGHTNESS_ADDR: u32 = 0;

// Battery voltage thresholds (mV), measured behind a 1:2 divider.

/// At or above this the battery reads as full.
pub const VOLTAGE_LEVEL_FULL: u16 = 4000; // 4.00 V

/// At or above this the battery reads as high.
pub const VOLTAGE_LEVEL_HIGH: u16 = 3850; // 3.85 V

/// At or above this the battery reads as medium.
pub const VOLTAGE_LEVEL_MEDIUM: u16 = 3700; // 3.70 V

/// At or above this the battery reads as low; below it, empty.
pub const VOLTAGE_LEVEL_LOW: u16 = 3550; // 3.55 V

// Power-monitor sampling cadence (ms)

/// How often the battery voltage is re-classified.
pub const VOLTAGE_CHECK_INTERVAL_MS: u64 = 5000;

/// How often the charger status line is re-examined.
pub const CHARGING_CHECK_INTERVAL_MS: u64 = 200;

// Frame loop

/// Target frame-loop tick period (ms) for the embedded binary.
pub const FRAME_TICK_MS: u64 = 5;

// Settings storage (embedded flash layout, 4 KB pages on nRF52840)

/// Flash page index where the settings region starts.
pub const SETTINGS_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for settings.
pub const SETTINGS_FLASH_PAGE_COUNT: u32 = 4;

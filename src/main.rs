//! Embedded entry point for the nRF52840 badge.
//!
//! Owns the hardware: two active-low buttons, the charger status line,
//! the battery divider on AIN0, the WS2812 chain on SPI3 and the
//! settings region in internal flash. Everything above raw samples is
//! decided by [`ledbadge::frame::FrameController`].

#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use panic_probe as _;

use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_futures::block_on;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Ticker};
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};
use smart_leds::{brightness, SmartLedsWrite, RGB8};
use static_cell::StaticCell;
use ws2812_spi::Ws2812;

use ledbadge::config::{
    FRAME_TICK_MS, PIXEL_COUNT, SETTINGS_FLASH_PAGE_COUNT, SETTINGS_FLASH_PAGE_START,
};
use ledbadge::frame::FrameController;
use ledbadge::render::{Strip, BLACK};
use ledbadge::settings::{SettingsStore, StoreError};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

const FLASH_PAGE_SIZE: u32 = 4096;
const SETTINGS_START: u32 = SETTINGS_FLASH_PAGE_START * FLASH_PAGE_SIZE;
const SETTINGS_END: u32 = (SETTINGS_FLASH_PAGE_START + SETTINGS_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Settings bytes as a key-value map in internal flash, wear-levelled
/// by `sequential-storage`. The store trait is synchronous and flash
/// writes are rare, so the async flash calls are simply blocked on.
struct FlashStore {
    flash: BlockingAsync<Nvmc<'static>>,
}

impl FlashStore {
    fn new(nvmc: Nvmc<'static>) -> Self {
        Self {
            flash: BlockingAsync::new(nvmc),
        }
    }
}

impl SettingsStore for FlashStore {
    fn read_byte(&mut self, addr: u32) -> Result<u8, StoreError> {
        let mut buf = [0u8; 32];
        match block_on(fetch_item::<u8, u8, _>(
            &mut self.flash,
            SETTINGS_START..SETTINGS_END,
            &mut NoCache::new(),
            &mut buf,
            &(addr as u8),
        )) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(StoreError::Read),
            Err(_) => {
                warn!("settings: fetch failed");
                Err(StoreError::Read)
            }
        }
    }

    fn write_byte(&mut self, addr: u32, value: u8) -> Result<(), StoreError> {
        let mut buf = [0u8; 32];
        block_on(store_item(
            &mut self.flash,
            SETTINGS_START..SETTINGS_END,
            &mut NoCache::new(),
            &mut buf,
            &(addr as u8),
            &value,
        ))
        .map_err(|_| {
            warn!("settings: store failed");
            StoreError::Write
        })
    }
}

/// WS2812 chain behind the blocking SPI bus.
struct SpiStrip {
    ws: Ws2812<Spim<'static, peripherals::SPI3>>,
    pixels: [RGB8; PIXEL_COUNT],
    level: u8,
}

impl Strip for SpiStrip {
    fn clear(&mut self) {
        self.pixels = [BLACK; PIXEL_COUNT];
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn set_global_brightness(&mut self, value: u8) {
        self.level = value;
    }

    fn present(&mut self) {
        let scaled = brightness(self.pixels.iter().copied(), self.level);
        if self.ws.write(scaled).is_err() {
            warn!("led: spi write failed");
        }
    }
}

/// One-shot battery read through the 1:2 divider on AIN0.
///
/// Default SAADC config: gain 1/6, internal 0.6 V reference, 12 bit,
/// so full scale is 3.6 V at the pin and twice that at the battery.
async fn read_battery_mv(saadc: &mut Saadc<'_, 1>) -> u16 {
    let mut samples = [0i16; 1];
    saadc.sample(&mut samples).await;
    let raw = samples[0].max(0) as u32;
    (raw * 3600 / 4096 * 2) as u16
}

static CONTROLLER: StaticCell<FrameController<FlashStore>> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let mut p = embassy_nrf::init(Default::default());
    info!("ledbadge boot");

    let left = Input::new(p.P0_11, Pull::Up);
    let right = Input::new(p.P0_12, Pull::Up);
    // Charger STAT is open-drain, low while charge current flows.
    let charger = Input::new(p.P0_13, Pull::Up);

    let saadc_config = saadc::Config::default();
    let channel = ChannelConfig::single_ended(&mut p.P0_02);
    let mut saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel]);
    saadc.calibrate().await;

    let mut spim_config = spim::Config::default();
    // WS2812 bit patterns want the bus close to 3 MHz; 2 MHz is the
    // nearest nRF divider inside the tolerated window.
    spim_config.frequency = spim::Frequency::M2;
    let spim = Spim::new_txonly(p.SPI3, Irqs, p.P0_14, p.P0_15, spim_config);
    let mut strip = SpiStrip {
        ws: Ws2812::new(spim),
        pixels: [BLACK; PIXEL_COUNT],
        level: 0,
    };

    let store = FlashStore::new(Nvmc::new(p.NVMC));

    let boot_mv = read_battery_mv(&mut saadc).await;
    info!("battery: {} mV at boot", boot_mv);
    let seed = (boot_mv as u32) ^ (Instant::now().as_ticks() as u32) | 1;
    let controller = CONTROLLER.init(FrameController::new(store, boot_mv, seed));

    let mut ticker = Ticker::every(Duration::from_millis(FRAME_TICK_MS));
    loop {
        ticker.next().await;
        let now = Instant::now().as_millis();
        let mv = read_battery_mv(&mut saadc).await;
        controller.tick(
            left.is_low(),
            right.is_low(),
            mv,
            charger.is_low(),
            now,
            &mut strip,
        );
    }
}

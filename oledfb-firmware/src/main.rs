//! oledfb demo firmware
//!
//! Drives an SSD1306 panel on I2C0 of an RP2040 board: draws a centered
//! banner, a line of text and a small bitmap, then blinks the bottom line
//! by inverting it once a second.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use oledfb_core::{parse_config, DecodeMode, DisplayConfig, Placement};
use oledfb_drivers::{Font8x8Basic, I2cTransport, Ssd1306};

/// Panel configuration, validated by build.rs
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

/// Blink interval for the inverted line
const BLINK_MS: u64 = 1000;

/// 16x16 XBM smiley, LSB leftmost
const SMILEY: [u8; 32] = [
    0xE0, 0x07, 0x18, 0x18, 0x04, 0x20, 0x02, 0x40, 0x32, 0x4C, 0x31, 0x8C, 0x01, 0x80,
    0x01, 0x80, 0x01, 0x80, 0x09, 0x90, 0x11, 0x88, 0xE2, 0x47, 0x02, 0x40, 0x04, 0x20,
    0x18, 0x18, 0xE0, 0x07,
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("oledfb demo starting...");

    let p = embassy_rp::init(Default::default());

    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("panel.toml rejected ({}), using defaults", e);
            DisplayConfig::default()
        }
    };

    // I2C0: GP4 = SDA, GP5 = SCL
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config.frequency_hz;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut display = match Ssd1306::new(I2cTransport::new(bus), Font8x8Basic, config) {
        Ok(display) => display,
        Err(e) => {
            error!("Unsupported panel: {}", Debug2Format(&e));
            return;
        }
    };

    if let Err(e) = display.init() {
        error!("Failed to initialize display: {}", Debug2Format(&e));
        return;
    }
    info!("Display initialized");

    display.clear();
    display.draw_str("oledfb", true).ok();
    display.newline();
    display.draw_str("SSD1306 demo", false).ok();
    display
        .draw_bitmap(
            &SMILEY,
            16,
            16,
            DecodeMode::Xbm { invert: false },
            Placement::at(0, 24).centered(),
        )
        .ok();

    let last_line = display.geometry().pages() - 1;
    if let Err(e) = display.refresh() {
        warn!("Refresh failed: {}", Debug2Format(&e));
    }

    loop {
        Timer::after(Duration::from_millis(BLINK_MS)).await;
        if let Err(e) = display.invert_line(last_line) {
            warn!("Blink failed: {}", Debug2Format(&e));
        }
    }
}

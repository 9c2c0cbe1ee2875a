//! Pharos - LED Dot-Matrix Greeter Firmware
//!
//! Main firmware binary for RP2040-based boards driving a MAX7219
//! 8x8 LED dot-matrix with four input keys.
//!
//! Named after the Pharos of Alexandria, the lighthouse whose light
//! signals greeted arriving ships.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use pharos_core::buttons::Button;
use pharos_core::dispatch::BacklogPolicy;
use pharos_drivers::matrix::{Max7219, Max7219Config};

mod channels;
mod tasks;

/// SPI clock for the matrix link (the MAX7219 tops out at 10 MHz)
const MATRIX_SPI_HZ: u32 = 1_000_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pharos firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup SPI0 for the matrix link (SCK=GPIO18, MOSI=GPIO19, CS=GPIO17)
    // The MAX7219 never drives MISO, so the bus is transmit-only.
    let mut spi_config = spi::Config::default();
    spi_config.frequency = MATRIX_SPI_HZ;

    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let spi_dev = ExclusiveDevice::new(spi, cs, Delay).unwrap();

    let matrix = Max7219::with_config(spi_dev, Max7219Config::default());
    info!("Matrix SPI initialized");

    // Setup the four keys (active-low momentary switches on GPIO10-13)
    let key0 = Input::new(p.PIN_10, Pull::Up);
    let key1 = Input::new(p.PIN_11, Pull::Up);
    let key2 = Input::new(p.PIN_12, Pull::Up);
    let key3 = Input::new(p.PIN_13, Pull::Up);

    // Spawn tasks
    spawner
        .spawn(tasks::matrix_task(matrix, BacklogPolicy::Queue))
        .unwrap();
    spawner
        .spawn(tasks::button_watch_task(key0, Button::Key0))
        .unwrap();
    spawner
        .spawn(tasks::button_watch_task(key1, Button::Key1))
        .unwrap();
    spawner
        .spawn(tasks::button_watch_task(key2, Button::Key2))
        .unwrap();
    spawner
        .spawn(tasks::button_watch_task(key3, Button::Key3))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

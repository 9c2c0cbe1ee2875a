//! Matrix control loop
//!
//! Owns the MAX7219 driver. Waits for latched key edges, expands them
//! into actions, and runs the actions one at a time. Presses keep
//! latching while an action runs (the greeting takes several seconds);
//! what happens to that backlog is the spawner's choice of
//! [`BacklogPolicy`].

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;

use pharos_core::dispatch::{self, Action, BacklogPolicy};
use pharos_core::glyphs;
use pharos_drivers::matrix::Max7219;

use crate::channels::{CAPTURE, EDGE};

/// The matrix link: SPI0 behind an exclusive-device wrapper.
pub type MatrixSpi = ExclusiveDevice<Spi<'static, SPI0, Async>, Output<'static>, Delay>;

/// Matrix control loop task.
#[embassy_executor::task]
pub async fn matrix_task(mut matrix: Max7219<MatrixSpi>, backlog: BacklogPolicy) {
    info!("Matrix task started");

    // Edges latched before the panel is up would replay stale presses.
    let _ = CAPTURE.take();

    if let Err(e) = matrix.init().await {
        error!("Matrix init failed: {:?}", Debug2Format(&e));
    } else {
        info!("Matrix initialized");
    }

    loop {
        EDGE.wait().await;

        let cause = CAPTURE.take();
        if cause.is_empty() {
            // Signal fired for edges an earlier pass already consumed.
            continue;
        }
        debug!("Captured keys {:?}", cause);

        for (button, action) in dispatch::actions(cause) {
            info!("Hello from {:?}", button);
            let result = match action {
                Action::PlayGreeting => matrix.play_greeting(&mut Delay).await,
                Action::ShowSmiley => matrix.set_rows(&glyphs::SMILEY).await,
                Action::ShowHeart => matrix.set_rows(&glyphs::HEART).await,
                Action::Clear => matrix.clear().await,
            };
            if let Err(e) = result {
                warn!("Matrix write failed: {:?}", Debug2Format(&e));
            }
        }

        if backlog == BacklogPolicy::Drop {
            // Reset before draining: a press racing this window costs a
            // spurious wake, never a latched-but-unsignalled key.
            EDGE.reset();
            let dropped = CAPTURE.take();
            if !dropped.is_empty() {
                debug!("Dropping keys pressed mid-action: {:?}", dropped);
            }
        }
    }
}

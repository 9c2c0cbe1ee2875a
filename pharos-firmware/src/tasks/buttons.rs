//! Button watcher tasks
//!
//! One task instance per key. Each waits for a falling edge (the keys
//! are active-low), latches the press for the control loop, and holds
//! off through the bounce window before re-arming.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use pharos_core::buttons::Button;

use crate::channels::{CAPTURE, EDGE};

/// Hold-off after a detected edge (and again after release)
const DEBOUNCE_MS: u64 = 20;

/// Watch one key for press edges.
///
/// The pool runs one instance per key, so every key stays armed while
/// another is held or bouncing.
#[embassy_executor::task(pool_size = 4)]
pub async fn button_watch_task(mut pin: Input<'static>, button: Button) {
    info!("Button task started for {:?}", button);

    loop {
        pin.wait_for_falling_edge().await;

        CAPTURE.raise(button);
        EDGE.signal(());
        debug!("{:?} pressed", button);

        // Debounce
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;

        // Release bounce would read as extra presses; wait it out
        pin.wait_for_high().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
    }
}

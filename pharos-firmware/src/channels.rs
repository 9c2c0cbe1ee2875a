//! Inter-task communication
//!
//! Static primitives linking the button watchers to the matrix control
//! loop. The capture latch records which keys fired; the signal only
//! wakes the loop. Presses coalesce in the latch while the loop is
//! busy with a long action.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use pharos_core::buttons::CaptureLatch;

/// Latched press edges, coalesced per key until the control loop takes them
pub static CAPTURE: CaptureLatch = CaptureLatch::new();

/// Wakes the control loop after a press edge was latched
pub static EDGE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

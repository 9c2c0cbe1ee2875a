//! Button identifiers and the press edge-capture latch
//!
//! The board has four momentary keys. Press edges are latched into a
//! [`CaptureLatch`] by whatever context observes them (GPIO task, ISR)
//! and consumed by the control loop. The latch coalesces repeat presses
//! of the same key into one set bit, like a hardware edge-capture
//! register, and its [`take`](CaptureLatch::take) clears exactly the
//! bits it returns: an edge arriving mid-handoff is never lost.

use portable_atomic::{AtomicU8, Ordering};

/// One of the four input keys, numbered as wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Key0 = 0,
    Key1 = 1,
    Key2 = 2,
    Key3 = 3,
}

impl Button {
    pub const COUNT: usize = 4;

    /// All keys, lowest index first. Dispatch order follows this.
    pub const ALL: [Button; Button::COUNT] = [
        Button::Key0,
        Button::Key1,
        Button::Key2,
        Button::Key3,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this key in a [`Buttons`] set.
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }

    pub const fn from_index(index: usize) -> Option<Button> {
        match index {
            0 => Some(Button::Key0),
            1 => Some(Button::Key1),
            2 => Some(Button::Key2),
            3 => Some(Button::Key3),
            _ => None,
        }
    }
}

/// A set of keys, one bit per key (bit i = key i).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    pub const EMPTY: Buttons = Buttons(0);
    pub const ALL: Buttons = Buttons(0x0F);

    /// Build a set from a raw mask. Bits above the four keys are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Buttons(bits & Buttons::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    /// This set plus one key.
    pub const fn with(self, button: Button) -> Self {
        Buttons(self.0 | button.mask())
    }

    /// Member keys in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

/// Software edge-capture register.
///
/// Lock-free and safe to share between tasks and interrupt context.
/// Uses portable-atomic so the read-modify-writes work on cores without
/// native atomic RMW (RP2040's thumbv6).
pub struct CaptureLatch {
    bits: AtomicU8,
}

impl CaptureLatch {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Latch a press edge. Already-latched keys are unaffected, so
    /// repeat presses before the next [`take`](Self::take) coalesce.
    pub fn raise(&self, button: Button) {
        self.bits.fetch_or(button.mask(), Ordering::Release);
    }

    /// Read and clear the latched set in one atomic exchange.
    ///
    /// Clearing exactly the returned bits is the load-bearing property:
    /// an edge raised concurrently with this call either shows up in
    /// the returned set or stays latched for the next call. It cannot
    /// be cleared unseen.
    pub fn take(&self) -> Buttons {
        Buttons::from_bits(self.bits.swap(0, Ordering::Acquire))
    }
}

//! Button-to-action dispatch rules
//!
//! A captured key set expands into a fixed list of display actions.
//! The wiring is data ([`DISPATCH`]) rather than control flow so the
//! mapping is testable on its own and the control loop stays a dumb
//! executor.

use crate::buttons::{Button, Buttons};
use heapless::Vec;

/// What a key press makes the board do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Play the letter-by-letter HELLO WORLD greeting.
    PlayGreeting,
    /// Show the smiley picture.
    ShowSmiley,
    /// Show the heart picture.
    ShowHeart,
    /// Blank the display.
    Clear,
}

/// Fixed key-to-action wiring, in dispatch order.
pub const DISPATCH: [(Button, Action); Button::COUNT] = [
    (Button::Key0, Action::PlayGreeting),
    (Button::Key1, Action::ShowSmiley),
    (Button::Key2, Action::ShowHeart),
    (Button::Key3, Action::Clear),
];

/// Expand a captured key set into the actions to run, key 0 first.
///
/// Every asserted key contributes its action, so a capture that
/// coalesced several presses runs the actions back to back in key
/// order. An empty capture expands to nothing.
pub fn actions(cause: Buttons) -> Vec<(Button, Action), 4> {
    let mut out = Vec::new();
    for (button, action) in DISPATCH {
        if cause.contains(button) {
            // sized for every key, push cannot fail
            let _ = out.push((button, action));
        }
    }
    out
}

/// What the control loop does with key edges that latched while it was
/// busy running a long action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklogPolicy {
    /// Keep them latched and run them on the next loop pass.
    #[default]
    Queue,
    /// Discard them; only presses seen while idle start actions.
    Drop,
}

//! Board-agnostic core logic for the Pharos LED-matrix greeter
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - 8x8 bitmap frames and the built-in glyph set
//! - Button identifiers and the edge-capture latch
//! - Button-to-action dispatch rules
//! - The greeting animation script

#![no_std]
#![deny(unsafe_code)]

pub mod bitmap;
pub mod buttons;
pub mod dispatch;
pub mod glyphs;
pub mod greeting;

//! Hardware driver implementations
//!
//! This crate provides concrete drivers for the board peripherals,
//! generic over the embedded-hal-async bus traits so the logic runs in
//! host tests against mock buses:
//!
//! - Dot-matrix display drivers (MAX7219)

#![no_std]
#![deny(unsafe_code)]

pub mod matrix;

//! Control plane for an 8×8 WS2812 badge with two buttons.
//!
//! Everything that decides what the badge shows lives here and is
//! `no_std`: debounced button events, the menu hierarchy, battery and
//! charging overlays, brightness persistence, animations and games.
//! The crate builds for the host by default so the whole control plane
//! runs under `cargo test`; the `embedded` feature adds the nRF52840
//! binary that owns the real pins, ADC and LED strip.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod content;
pub mod frame;
pub mod input;
pub mod nav;
pub mod power;
pub mod render;
pub mod rng;
pub mod settings;
pub mod state;

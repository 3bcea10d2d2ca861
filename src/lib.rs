//! fadebar - a fading custom scroll indicator
//!
//! The geometry and state engine lives in `fadebar_core`. This crate provides
//! the environments it runs in: a DOM environment for the browser (wasm32) and
//! an in-memory simulated page used by the native demo and the tests.

pub mod simulated;

pub use fadebar_core::prelude::*;
pub use fadebar_core::{IndicatorError, ThumbLayout, TrackLayout};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::*;

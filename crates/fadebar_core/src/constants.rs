//! Centralized constants for fadebar_core
//!
//! Opacity levels, timing and configuration defaults live here so the
//! geometry, visibility and drag modules agree on them.

use std::time::Duration;

// =============================================================================
// Visibility
// =============================================================================

/// Opacity of the indicator while resting (no recent activity)
pub const RESTING_OPACITY: f32 = 0.3;

/// Opacity of the indicator while scrolling or hovered
pub const ACTIVE_OPACITY: f32 = 1.0;

/// Idle time after the last scroll before the indicator returns to resting
pub const QUIET_PERIOD: Duration = Duration::from_secs(2);

// =============================================================================
// Configuration defaults
// =============================================================================

/// Default drag velocity multiplier
pub const DEFAULT_VELOCITY: f32 = 1.0;

/// Default quiet period in milliseconds (serialized form of `QUIET_PERIOD`)
pub const DEFAULT_QUIET_PERIOD_MS: u64 = QUIET_PERIOD.as_millis() as u64;


//! Indicator configuration.
//!
//! The configuration is immutable once an indicator is mounted. It can be
//! built in code through the builder methods or parsed from JSON, which is how
//! the web entry point receives its options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::{DEFAULT_QUIET_PERIOD_MS, DEFAULT_VELOCITY};
use crate::error::{IndicatorError, Result};

/// What happens to the indicator's opacity when the pointer leaves the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverLeavePolicy {
    /// Drop to resting opacity at once, even if a scroll just happened
    #[default]
    Immediate,
    /// Wait for the normal quiet period before resting
    Debounced,
}

/// Configuration for a scroll indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorConfig {
    /// Track height as a fraction (0, 1] of the visible region
    pub height_fraction: f32,
    /// Fixed distance from the host's right edge
    #[serde(default)]
    pub right_offset: Option<f32>,
    /// Track background override
    #[serde(default)]
    pub track_color: Option<Color>,
    /// Thumb background override
    #[serde(default)]
    pub thumb_color: Option<Color>,
    /// Multiplier applied to pointer movement while dragging
    #[serde(default = "default_velocity")]
    pub velocity: f32,
    /// Opacity behavior on pointer leave
    #[serde(default)]
    pub hover_leave: HoverLeavePolicy,
    /// Idle time before returning to resting opacity
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
}

fn default_velocity() -> f32 {
    DEFAULT_VELOCITY
}

fn default_quiet_period_ms() -> u64 {
    DEFAULT_QUIET_PERIOD_MS
}

impl IndicatorConfig {
    /// Create a configuration with the given track height fraction and
    /// defaults for everything else.
    pub fn new(height_fraction: f32) -> Self {
        Self {
            height_fraction,
            right_offset: None,
            track_color: None,
            thumb_color: None,
            velocity: DEFAULT_VELOCITY,
            hover_leave: HoverLeavePolicy::default(),
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the fixed right offset.
    pub fn right_offset(mut self, offset: f32) -> Self {
        self.right_offset = Some(offset);
        self
    }

    /// Set the track color.
    pub fn track_color(mut self, color: Color) -> Self {
        self.track_color = Some(color);
        self
    }

    /// Set the thumb color.
    pub fn thumb_color(mut self, color: Color) -> Self {
        self.thumb_color = Some(color);
        self
    }

    /// Set the drag velocity multiplier.
    pub fn velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the hover-leave policy.
    pub fn hover_leave(mut self, policy: HoverLeavePolicy) -> Self {
        self.hover_leave = policy;
        self
    }

    /// Set the quiet period.
    pub fn quiet_period(mut self, period: Duration) -> Self {
        self.quiet_period_ms = period.as_millis() as u64;
        self
    }

    /// The quiet period as a `Duration`.
    pub fn quiet_period_duration(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Check that every value is usable for layout.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.height_fraction;
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(IndicatorError::InvalidHeightFraction(fraction));
        }
        if !self.velocity.is_finite() || self.velocity <= 0.0 {
            return Err(IndicatorError::InvalidVelocity(self.velocity));
        }
        if let Some(offset) = self.right_offset {
            if !offset.is_finite() {
                return Err(IndicatorError::InvalidRightOffset(offset));
            }
        }
        if self.quiet_period_ms == 0 {
            return Err(IndicatorError::InvalidQuietPeriod);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::QUIET_PERIOD;

    #[test]
    fn test_config_defaults() {
        let config = IndicatorConfig::new(0.85);
        assert_eq!(config.velocity, 1.0);
        assert_eq!(config.right_offset, None);
        assert_eq!(config.hover_leave, HoverLeavePolicy::Immediate);
        assert_eq!(config.quiet_period_duration(), QUIET_PERIOD);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = IndicatorConfig::new(0.5)
            .velocity(2.0)
            .right_offset(4.0)
            .thumb_color(Color::WHITE)
            .hover_leave(HoverLeavePolicy::Debounced);
        assert_eq!(config.velocity, 2.0);
        assert_eq!(config.right_offset, Some(4.0));
        assert_eq!(config.thumb_color, Some(Color::WHITE));
        assert_eq!(config.hover_leave, HoverLeavePolicy::Debounced);
    }

    #[test]
    fn test_validate_height_fraction() {
        assert!(IndicatorConfig::new(1.0).validate().is_ok());
        for bad in [0.0, -0.5, 1.5, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                IndicatorConfig::new(bad).validate(),
                Err(IndicatorError::InvalidHeightFraction(_))
            ));
        }
    }

    #[test]
    fn test_validate_velocity_and_offset() {
        assert!(matches!(
            IndicatorConfig::new(0.5).velocity(0.0).validate(),
            Err(IndicatorError::InvalidVelocity(_))
        ));
        assert!(matches!(
            IndicatorConfig::new(0.5).right_offset(f32::NAN).validate(),
            Err(IndicatorError::InvalidRightOffset(_))
        ));
        assert!(matches!(
            IndicatorConfig::new(0.5).quiet_period(Duration::ZERO).validate(),
            Err(IndicatorError::InvalidQuietPeriod)
        ));
    }

    #[test]
    fn test_from_json_minimal() {
        let config = IndicatorConfig::from_json(r#"{ "heightFraction": 0.85 }"#).unwrap();
        assert_eq!(config, IndicatorConfig::new(0.85));
    }

    #[test]
    fn test_from_json_full() {
        let json = r##"{
            "heightFraction": 0.6,
            "rightOffset": 8,
            "trackColor": "#eeeeee",
            "thumbColor": "#333",
            "velocity": 2.5,
            "hoverLeave": "debounced",
            "quietPeriodMs": 1500
        }"##;
        let config = IndicatorConfig::from_json(json).unwrap();
        assert_eq!(config.right_offset, Some(8.0));
        assert_eq!(config.velocity, 2.5);
        assert_eq!(config.hover_leave, HoverLeavePolicy::Debounced);
        assert_eq!(config.quiet_period_duration(), Duration::from_millis(1500));
        assert!(config.track_color.is_some());
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            IndicatorConfig::from_json("{"),
            Err(IndicatorError::Config(_))
        ));
        assert!(matches!(
            IndicatorConfig::from_json(r#"{ "heightFraction": 2.0 }"#),
            Err(IndicatorError::InvalidHeightFraction(_))
        ));
        assert!(matches!(
            IndicatorConfig::from_json(r#"{ "heightFraction": 0.5, "thumbColor": "red" }"#),
            Err(IndicatorError::Config(_))
        ));
    }
}

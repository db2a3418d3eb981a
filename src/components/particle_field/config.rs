//! Tunable parameters for the particle field.
//!
//! Every field has a default, so a page can embed a partial JSON object and the
//! rest is filled in. Values that would break the simulation are replaced by
//! their defaults in [`FieldConfig::sanitized`].

use log::warn;
use serde::Deserialize;

/// Configuration for density, motion, links and colors.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Logical pixels² of surface per particle (`K`).
	pub density: f64,
	/// Smallest particle radius in logical pixels.
	pub radius_min: f64,
	/// Largest particle radius in logical pixels.
	pub radius_max: f64,
	/// Upper bound on each velocity component, in logical pixels per tick.
	pub max_speed: f64,
	/// Distance below which two particles are linked.
	pub link_distance: f64,
	/// Stroke width of connecting lines.
	pub line_width: f64,
	/// Opaque CSS color painted behind the field every frame.
	pub background: String,
	/// Name of the CSS custom property holding the HSL theme color.
	pub color_variable: String,
	/// HSL triple used until the page provides a parseable one.
	pub fallback_color: String,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			density: 25_000.0,
			radius_min: 0.5,
			radius_max: 2.0,
			max_speed: 0.15,
			link_distance: 100.0,
			line_width: 0.3,
			background: "#09090b".to_string(),
			color_variable: "--primary".to_string(),
			fallback_color: "28 92% 56%".to_string(),
		}
	}
}

fn positive(value: f64) -> bool {
	value.is_finite() && value > 0.0
}

impl FieldConfig {
	/// Parse a JSON document, falling back to defaults when it is malformed.
	pub fn from_json(text: &str) -> Self {
		match serde_json::from_str::<FieldConfig>(text) {
			Ok(config) => config.sanitized(),
			Err(e) => {
				warn!("particle-field: ignoring malformed config: {}", e);
				Self::default()
			}
		}
	}

	/// Replace out-of-range values with defaults.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();

		if !positive(self.density) {
			warn!("particle-field: density {} is not positive", self.density);
			self.density = defaults.density;
		}
		if !positive(self.radius_min)
			|| !positive(self.radius_max)
			|| self.radius_min > self.radius_max
		{
			warn!(
				"particle-field: radius range {}..{} is invalid",
				self.radius_min, self.radius_max
			);
			self.radius_min = defaults.radius_min;
			self.radius_max = defaults.radius_max;
		}
		if !self.max_speed.is_finite() || self.max_speed < 0.0 {
			warn!("particle-field: max_speed {} is invalid", self.max_speed);
			self.max_speed = defaults.max_speed;
		}
		if !positive(self.link_distance) {
			warn!(
				"particle-field: link_distance {} is not positive",
				self.link_distance
			);
			self.link_distance = defaults.link_distance;
		}
		if !positive(self.line_width) {
			self.line_width = defaults.line_width;
		}
		if self.background.trim().is_empty() {
			self.background = defaults.background;
		}
		if !self.color_variable.starts_with("--") {
			warn!(
				"particle-field: `{}` is not a custom property name",
				self.color_variable
			);
			self.color_variable = defaults.color_variable;
		}

		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_other_defaults() {
		let config = FieldConfig::from_json(r#"{ "density": 10000, "link_distance": 80 }"#);
		assert_eq!(config.density, 10_000.0);
		assert_eq!(config.link_distance, 80.0);
		assert_eq!(config.radius_min, 0.5);
		assert_eq!(config.color_variable, "--primary");
	}

	#[test]
	fn malformed_json_falls_back_to_defaults() {
		assert_eq!(FieldConfig::from_json("{ density: "), FieldConfig::default());
	}

	#[test]
	fn invalid_values_are_replaced() {
		let config = FieldConfig {
			density: 0.0,
			radius_min: 3.0,
			radius_max: 1.0,
			max_speed: -1.0,
			link_distance: f64::NAN,
			line_width: 0.0,
			background: "  ".to_string(),
			color_variable: "primary".to_string(),
			fallback_color: "28 92% 56%".to_string(),
		}
		.sanitized();

		assert_eq!(config, FieldConfig::default());
	}

	#[test]
	fn zero_speed_is_allowed() {
		let config = FieldConfig {
			max_speed: 0.0,
			..FieldConfig::default()
		}
		.sanitized();
		assert_eq!(config.max_speed, 0.0);
	}
}

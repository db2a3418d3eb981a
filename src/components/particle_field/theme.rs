//! Theme color sourced from a CSS custom property.
//!
//! The page's theme system publishes its primary color as a bare HSL triple
//! (`--primary: 28 92% 56%`), the form Tailwind/shadcn themes use. The field
//! reads it, keeps the last value that parsed, and renders it back to CSS with
//! whatever alpha a particle or link needs.

use log::debug;
use web_sys::Window;

use super::error::FieldError;

/// HSL color with saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColor {
	/// Hue in degrees, normalized to `[0, 360)`.
	pub hue: f64,
	/// Saturation, `0..=100`.
	pub saturation: f64,
	/// Lightness, `0..=100`.
	pub lightness: f64,
}

impl Default for ThemeColor {
	fn default() -> Self {
		Self {
			hue: 28.0,
			saturation: 92.0,
			lightness: 56.0,
		}
	}
}

fn percent(token: &str) -> Option<f64> {
	let value: f64 = token.strip_suffix('%')?.trim().parse().ok()?;
	(value.is_finite() && (0.0..=100.0).contains(&value)).then_some(value)
}

impl ThemeColor {
	/// Parse `H S% L%`. Hue may carry a `deg` suffix; commas are accepted as
	/// separators. Returns `None` for anything else.
	pub fn parse(raw: &str) -> Option<Self> {
		let tokens: Vec<&str> = raw
			.split(|c: char| c.is_whitespace() || c == ',')
			.filter(|t| !t.is_empty())
			.collect();
		let [hue, saturation, lightness] = tokens.as_slice() else {
			return None;
		};

		let hue: f64 = hue.strip_suffix("deg").unwrap_or(hue).parse().ok()?;
		if !hue.is_finite() {
			return None;
		}

		Some(Self {
			hue: hue.rem_euclid(360.0),
			saturation: percent(saturation)?,
			lightness: percent(lightness)?,
		})
	}

	/// CSS color string with the given alpha (clamped to `[0, 1]`).
	pub fn to_css(self, alpha: f64) -> String {
		format!(
			"hsl({} {}% {}% / {})",
			self.hue,
			self.saturation,
			self.lightness,
			alpha.clamp(0.0, 1.0)
		)
	}

	/// Overwrite this color with `raw` if it parses; otherwise keep it.
	///
	/// Returns whether the color changed.
	pub fn refresh(&mut self, raw: Option<&str>) -> bool {
		let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
			debug!("particle-field: theme color unset, keeping {:?}", self);
			return false;
		};
		match Self::parse(raw) {
			Some(color) => {
				let changed = color != *self;
				*self = color;
				changed
			}
			None => {
				debug!("particle-field: unparseable theme color {:?}", raw);
				false
			}
		}
	}
}

/// Read a custom property from the computed style of `<html>`.
pub fn read_root_variable(window: &Window, name: &str) -> Result<String, FieldError> {
	let document = window.document().ok_or(FieldError::NoDocument)?;
	let root = document
		.document_element()
		.ok_or(FieldError::NoDocument)?;
	let style = window
		.get_computed_style(&root)?
		.ok_or_else(|| FieldError::Js("computed style unavailable".to_string()))?;
	Ok(style.get_property_value(name)?.trim().to_string())
}

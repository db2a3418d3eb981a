//! Mapping from document size to drawing-buffer size.
//!
//! # Coordinate Spaces
//!
//! - **Logical pixels**: CSS pixels. All particle math and drawing calls use
//!   these. The field spans the viewport width and the full document scroll
//!   height, not just the visible viewport.
//! - **Physical pixels**: the canvas backing store, `logical × dpr`. The 2D
//!   context carries a `scale(dpr, dpr)` transform so drawing stays logical.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::error::FieldError;

/// Logical size of the surface plus the device pixel ratio it was sized for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
	/// Logical width (viewport width).
	pub width: f64,
	/// Logical height (document scroll height).
	pub height: f64,
	/// Device pixel ratio snapshot.
	pub dpr: f64,
}

impl Default for SurfaceMetrics {
	fn default() -> Self {
		Self {
			width: 0.0,
			height: 0.0,
			dpr: 1.0,
		}
	}
}

fn non_negative(value: f64) -> f64 {
	if value.is_finite() { value.max(0.0) } else { 0.0 }
}

impl SurfaceMetrics {
	/// Build metrics, treating unusable sizes as zero and unusable ratios as 1.
	pub fn new(width: f64, height: f64, dpr: f64) -> Self {
		Self {
			width: non_negative(width),
			height: non_negative(height),
			dpr: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
		}
	}

	/// Read viewport width, document scroll height and pixel ratio.
	pub fn measure(window: &Window) -> Result<Self, FieldError> {
		let width = window.inner_width()?.as_f64().unwrap_or(0.0);
		let body = window
			.document()
			.and_then(|d| d.body())
			.ok_or(FieldError::NoDocument)?;
		Ok(Self::new(
			width,
			body.scroll_height() as f64,
			window.device_pixel_ratio(),
		))
	}

	/// Backing store width in physical pixels.
	pub fn physical_width(&self) -> u32 {
		(self.width * self.dpr).round() as u32
	}

	/// Backing store height in physical pixels.
	pub fn physical_height(&self) -> u32 {
		(self.height * self.dpr).round() as u32
	}

	/// Resize the canvas backing store and CSS box, and reset the context
	/// transform to `scale(dpr, dpr)`.
	///
	/// The transform is set rather than multiplied, so repeated calls never
	/// compound the scale.
	pub fn apply(
		&self,
		canvas: &HtmlCanvasElement,
		ctx: &CanvasRenderingContext2d,
	) -> Result<(), FieldError> {
		canvas.set_width(self.physical_width());
		canvas.set_height(self.physical_height());

		let style = canvas.style();
		style.set_property("width", &format!("{}px", self.width))?;
		style.set_property("height", &format!("{}px", self.height))?;

		ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
		Ok(())
	}
}

//! Frame rendering for the particle field.
//!
//! Each frame is painted in three passes:
//! 1. Opaque background over the whole physical buffer
//! 2. Particles, each advanced then drawn as a disc
//! 3. Proximity links on top

use std::f64::consts::PI;

use log::debug;
use web_sys::CanvasRenderingContext2d;

use super::config::FieldConfig;
use super::links::for_each_link;
use super::particles::ParticleField;
use super::theme::ThemeColor;

/// Drawing operations a frame needs, in logical coordinates.
pub trait Painter {
	/// Cover the entire backing store with an opaque color.
	fn fill_background(&mut self, css: &str);
	/// Filled circle.
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, css: &str);
	/// Straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, css: &str);
}

impl Painter for CanvasRenderingContext2d {
	fn fill_background(&mut self, css: &str) {
		let Some(canvas) = self.canvas() else {
			return;
		};
		// The device-pixel transform is dropped so the fill covers every
		// physical pixel regardless of rounding.
		self.save();
		if let Err(e) = self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
			debug!("particle-field: identity transform rejected: {:?}", e);
		}
		self.set_fill_style_str(css);
		self.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
		self.restore();
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, css: &str) {
		self.set_fill_style_str(css);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, css: &str) {
		self.set_stroke_style_str(css);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Advance the field by one tick and paint the resulting frame.
pub fn render_frame<P: Painter + ?Sized>(
	painter: &mut P,
	field: &mut ParticleField,
	color: ThemeColor,
	config: &FieldConfig,
) {
	painter.fill_background(&config.background);

	let fill = color.to_css(1.0);
	field.step(|p| painter.fill_disc(p.x, p.y, p.radius, &fill));

	for_each_link(&field.particles, config.link_distance, |link| {
		painter.stroke_line(
			link.from,
			link.to,
			config.line_width,
			&color.to_css(link.opacity),
		);
	});
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::particle_field::particles::Particle;

	/// Painter that records calls instead of drawing.
	#[derive(Debug, Default)]
	pub(crate) struct RecordingPainter {
		pub ops: Vec<Op>,
	}

	#[derive(Clone, Debug, PartialEq)]
	pub(crate) enum Op {
		Background(String),
		Disc { x: f64, y: f64, css: String },
		Line { width: f64, css: String },
	}

	impl Painter for RecordingPainter {
		fn fill_background(&mut self, css: &str) {
			self.ops.push(Op::Background(css.to_string()));
		}

		fn fill_disc(&mut self, x: f64, y: f64, _radius: f64, css: &str) {
			self.ops.push(Op::Disc {
				x,
				y,
				css: css.to_string(),
			});
		}

		fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), width: f64, css: &str) {
			self.ops.push(Op::Line {
				width,
				css: css.to_string(),
			});
		}
	}

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 1.0,
		}
	}

	#[test]
	fn frame_order_is_background_discs_links() {
		let mut field = ParticleField::default();
		field.particles = vec![still(10.0, 10.0), still(40.0, 50.0), still(500.0, 500.0)];
		let mut painter = RecordingPainter::default();

		render_frame(&mut painter, &mut field, ThemeColor::default(), &FieldConfig::default());

		let disc = |x, y| Op::Disc {
			x,
			y,
			css: "hsl(28 92% 56% / 1)".to_string(),
		};
		assert_eq!(
			painter.ops,
			vec![
				Op::Background("#09090b".to_string()),
				disc(10.0, 10.0),
				disc(40.0, 50.0),
				disc(500.0, 500.0),
				Op::Line {
					width: 0.3,
					css: "hsl(28 92% 56% / 0.5)".to_string(),
				},
			]
		);
	}

	#[test]
	fn discs_are_drawn_after_advancing() {
		let mut field = ParticleField::default();
		field.particles = vec![Particle {
			vx: 1.5,
			vy: -0.5,
			..still(10.0, 10.0)
		}];
		let mut painter = RecordingPainter::default();

		render_frame(&mut painter, &mut field, ThemeColor::default(), &FieldConfig::default());

		assert!(matches!(
			painter.ops[1],
			Op::Disc { x, y, .. } if x == 11.5 && y == 9.5
		));
	}
}

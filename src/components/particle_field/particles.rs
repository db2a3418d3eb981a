//! The particle batch and its per-tick update rule.

use rand::Rng;

use super::config::FieldConfig;

/// A single drifting point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
}

impl Particle {
	/// Move by one tick's velocity, then mirror any velocity component whose
	/// axis left `[0, width] × [0, height]`.
	///
	/// Position is never clamped, so it may overshoot a wall by at most one
	/// tick's displacement before coming back.
	pub fn advance(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
		}
	}
}

/// Number of particles for a surface: `floor(width * height / density)`.
pub fn particle_count(width: f64, height: f64, density: f64) -> usize {
	let area = width * height;
	if !(area.is_finite() && area > 0.0 && density.is_finite() && density > 0.0) {
		return 0;
	}
	(area / density).floor() as usize
}

/// Uniform sample from `[min, max]`. Falls back to `min` (or 0 if `min` is not
/// finite) when the range is empty or its width overflows.
fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
	if max > min && (max - min).is_finite() {
		rng.gen_range(min..=max)
	} else if min.is_finite() {
		min
	} else {
		0.0
	}
}

/// The live batch together with the bounds it was seeded for.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// Discard the current batch and create a fresh one sized to the area.
	pub fn seed<R: Rng>(&mut self, width: f64, height: f64, config: &FieldConfig, rng: &mut R) {
		let count = particle_count(width, height, config.density);

		self.width = width;
		self.height = height;
		self.particles = (0..count)
			.map(|_| Particle {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				vx: uniform(rng, -config.max_speed, config.max_speed),
				vy: uniform(rng, -config.max_speed, config.max_speed),
				radius: uniform(rng, config.radius_min, config.radius_max),
			})
			.collect();
	}

	/// Advance every particle by one tick, handing each to `each` right after
	/// it moves.
	pub fn step(&mut self, mut each: impl FnMut(&Particle)) {
		for p in &mut self.particles {
			p.advance(self.width, self.height);
			each(p);
		}
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}

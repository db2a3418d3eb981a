//! Proximity links between particles.
//!
//! Every unordered pair is checked each frame, so the cost is quadratic in the
//! particle count. Particle count grows with document height, which makes this
//! the dominant per-frame cost on long pages.

use super::particles::Particle;

/// Stroke alpha for two particles `distance` apart.
///
/// Falls linearly from 1 at distance 0 to 0 at `threshold`, and stays 0 beyond.
pub fn link_opacity(distance: f64, threshold: f64) -> f64 {
	if threshold > 0.0 && distance < threshold {
		(1.0 - distance / threshold).clamp(0.0, 1.0)
	} else {
		0.0
	}
}

/// A segment to draw between two linked particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub opacity: f64,
}

/// Visit every pair `(a, b)` with `a < b` closer than `threshold`.
pub fn for_each_link(particles: &[Particle], threshold: f64, mut f: impl FnMut(Link)) {
	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < threshold {
				f(Link {
					from: (a.x, a.y),
					to: (b.x, b.y),
					opacity: link_opacity(distance, threshold),
				});
			}
		}
	}
}

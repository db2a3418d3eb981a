//! Simulation context and render-loop state machine.
//!
//! One `FieldState` is owned by each mounted background. Event callbacks only
//! flag that the surface changed; the animation loop picks the flag up at the
//! start of its next tick, so a resize never lands in the middle of a frame.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render::{Painter, render_frame};
use super::surface::SurfaceMetrics;
use super::theme::ThemeColor;

/// Lifecycle of the render loop. `Cancelled` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopPhase {
	/// Created but not yet ticking.
	#[default]
	Idle,
	/// Ticking once per animation frame.
	Running,
	/// Torn down; no further ticks are painted or scheduled.
	Cancelled,
}

/// Everything the background needs between frames.
pub struct FieldState {
	pub config: FieldConfig,
	pub metrics: SurfaceMetrics,
	pub field: ParticleField,
	pub color: ThemeColor,
	phase: LoopPhase,
	resize_pending: bool,
	rng: SmallRng,
}

impl FieldState {
	/// Build an idle state. `seed` drives particle placement. Out-of-range
	/// config values are replaced by defaults.
	pub fn new(config: FieldConfig, seed: u64) -> Self {
		let config = config.sanitized();
		let color = ThemeColor::parse(&config.fallback_color).unwrap_or_default();
		Self {
			config,
			metrics: SurfaceMetrics::default(),
			field: ParticleField::default(),
			color,
			phase: LoopPhase::Idle,
			resize_pending: false,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	pub fn phase(&self) -> LoopPhase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == LoopPhase::Running
	}

	/// Store new surface metrics and reseed the whole particle batch.
	pub fn initialize(&mut self, metrics: SurfaceMetrics) {
		self.metrics = metrics;
		self.field
			.seed(metrics.width, metrics.height, &self.config, &mut self.rng);
		self.resize_pending = false;
		debug!(
			"particle-field: {}x{} @{}x, {} particles",
			metrics.width,
			metrics.height,
			metrics.dpr,
			self.field.len()
		);
	}

	/// Update the cached theme color from a raw CSS value, keeping the
	/// current one if it does not parse.
	pub fn refresh_color(&mut self, raw: Option<&str>) {
		self.color.refresh(raw);
	}

	/// Idle → Running. No effect in any other phase.
	pub fn start(&mut self) {
		if self.phase == LoopPhase::Idle {
			self.phase = LoopPhase::Running;
		}
	}

	/// Enter the terminal phase.
	pub fn cancel(&mut self) {
		self.phase = LoopPhase::Cancelled;
		self.resize_pending = false;
	}

	/// Ask for re-measuring and reseeding before the next frame. Ignored once
	/// cancelled.
	pub fn request_resize(&mut self) {
		if self.phase != LoopPhase::Cancelled {
			self.resize_pending = true;
		}
	}

	/// Consume a pending resize request.
	pub fn take_resize_request(&mut self) -> bool {
		std::mem::take(&mut self.resize_pending)
	}

	/// Paint one frame. Returns whether another tick should be scheduled.
	pub fn tick<P: Painter + ?Sized>(&mut self, painter: &mut P) -> bool {
		if !self.is_running() {
			return false;
		}
		render_frame(painter, &mut self.field, self.color, &self.config);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::render::tests::{Op, RecordingPainter};

	fn running(width: f64, height: f64) -> FieldState {
		let mut state = FieldState::new(FieldConfig::default(), 42);
		state.initialize(SurfaceMetrics::new(width, height, 2.0));
		state.start();
		state
	}

	#[test]
	fn phases_only_move_forward() {
		let mut state = FieldState::new(FieldConfig::default(), 1);
		assert_eq!(state.phase(), LoopPhase::Idle);

		state.start();
		assert_eq!(state.phase(), LoopPhase::Running);
		state.start();
		assert_eq!(state.phase(), LoopPhase::Running);

		state.cancel();
		assert_eq!(state.phase(), LoopPhase::Cancelled);
		state.start();
		assert_eq!(state.phase(), LoopPhase::Cancelled);
	}

	#[test]
	fn idle_state_does_not_paint() {
		let mut state = FieldState::new(FieldConfig::default(), 1);
		state.initialize(SurfaceMetrics::new(800.0, 600.0, 1.0));
		let mut painter = RecordingPainter::default();

		assert!(!state.tick(&mut painter));
		assert!(painter.ops.is_empty());
	}

	#[test]
	fn running_tick_paints_and_reschedules() {
		let mut state = running(800.0, 600.0);
		let mut painter = RecordingPainter::default();

		assert!(state.tick(&mut painter));
		assert_eq!(painter.ops[0], Op::Background("#09090b".to_string()));
		let discs = painter
			.ops
			.iter()
			.filter(|op| matches!(op, Op::Disc { .. }))
			.count();
		assert_eq!(discs, 19);
	}

	#[test]
	fn cancelled_tick_paints_nothing() {
		let mut state = running(800.0, 600.0);
		state.cancel();
		let mut painter = RecordingPainter::default();

		assert!(!state.tick(&mut painter));
		assert!(painter.ops.is_empty());
	}

	#[test]
	fn initialize_replaces_batch_and_metrics() {
		let mut state = running(800.0, 600.0);
		let before = state.field.particles.clone();

		state.initialize(SurfaceMetrics::new(1200.0, 5000.0, 1.5));

		assert_eq!(state.metrics.physical_width(), 1800);
		assert_eq!(state.metrics.physical_height(), 7500);
		assert_eq!(state.field.len(), 240);
		assert!(state.field.particles.iter().all(|p| !before.contains(p)));
	}

	#[test]
	fn resize_requests_coalesce_and_stop_after_cancel() {
		let mut state = running(800.0, 600.0);
		state.request_resize();
		state.request_resize();
		assert!(state.take_resize_request());
		assert!(!state.take_resize_request());

		state.request_resize();
		state.cancel();
		assert!(!state.take_resize_request());
		state.request_resize();
		assert!(!state.take_resize_request());
	}

	#[test]
	fn unsanitized_config_is_cleaned_before_seeding() {
		let config = FieldConfig {
			max_speed: f64::INFINITY,
			density: -1.0,
			..FieldConfig::default()
		};
		let mut state = FieldState::new(config, 9);
		assert_eq!(state.config, FieldConfig::default());

		state.initialize(SurfaceMetrics::new(800.0, 600.0, 1.0));
		assert_eq!(state.field.len(), 19);
		assert!(
			state
				.field
				.particles
				.iter()
				.all(|p| p.vx.abs() <= 0.15 && p.vy.abs() <= 0.15)
		);
	}

	#[test]
	fn fallback_color_comes_from_config() {
		let config = FieldConfig {
			fallback_color: "200 10% 20%".to_string(),
			..FieldConfig::default()
		};
		let mut state = FieldState::new(config, 1);
		assert_eq!(state.color, ThemeColor::parse("200 10% 20%").unwrap());

		state.refresh_color(Some("garbage"));
		assert_eq!(state.color, ThemeColor::parse("200 10% 20%").unwrap());

		state.refresh_color(Some("120 50% 50%"));
		assert_eq!(state.color.hue, 120.0);
	}
}

//! Leptos component wrapping the particle field canvas.
//!
//! On mount the component acquires a 2D context, sizes the canvas to the whole
//! document, seeds the particles and starts a `requestAnimationFrame` loop.
//! Window resizes and `class`/`style` changes on `<html>` (theme toggles) mark
//! the surface dirty; the next frame re-measures and reseeds. Unmounting drops
//! the [`FieldHandle`], which stops the loop and detaches both subscriptions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MutationObserver, MutationObserverInit, Window,
};

use super::config::FieldConfig;
use super::error::FieldError;
use super::state::FieldState;
use super::surface::SurfaceMetrics;
use super::theme::read_root_variable;

/// Re-read the theme color and document size, reseed, and resize the canvas.
fn sync_surface(
	window: &Window,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	state: &mut FieldState,
) -> Result<(), FieldError> {
	match read_root_variable(window, &state.config.color_variable) {
		Ok(raw) => state.refresh_color(Some(&raw)),
		Err(e) => debug!("particle-field: theme color unavailable: {}", e),
	}
	let metrics = SurfaceMetrics::measure(window)?;
	state.initialize(metrics);
	metrics.apply(canvas, ctx)
}

/// Window `resize` listener and `<html>` attribute observer, held together.
///
/// Dropping the value releases both, so a failure part-way through
/// [`Subscriptions::acquire`] never leaves a callback attached.
struct Subscriptions {
	window: Window,
	observer: MutationObserver,
	on_resize: Closure<dyn FnMut()>,
	_on_mutation: Closure<dyn FnMut()>,
}

impl Subscriptions {
	fn acquire(window: &Window, state: &Rc<RefCell<FieldState>>) -> Result<Self, FieldError> {
		let root = window
			.document()
			.and_then(|d| d.document_element())
			.ok_or(FieldError::NoDocument)?;

		let state_resize = state.clone();
		let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
			state_resize.borrow_mut().request_resize();
		});
		let state_mutation = state.clone();
		let on_mutation: Closure<dyn FnMut()> = Closure::new(move || {
			state_mutation.borrow_mut().request_resize();
		});
		let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;

		let subscriptions = Self {
			window: window.clone(),
			observer,
			on_resize,
			_on_mutation: on_mutation,
		};

		subscriptions.window.add_event_listener_with_callback(
			"resize",
			subscriptions.on_resize.as_ref().unchecked_ref(),
		)?;

		let options = MutationObserverInit::new();
		options.set_attributes(true);
		options.set_attribute_filter(&js_sys::Array::of2(
			&JsValue::from_str("class"),
			&JsValue::from_str("style"),
		));
		subscriptions.observer.observe_with_options(&root, &options)?;

		Ok(subscriptions)
	}
}

impl Drop for Subscriptions {
	fn drop(&mut self) {
		let _ = self.window.remove_event_listener_with_callback(
			"resize",
			self.on_resize.as_ref().unchecked_ref(),
		);
		self.observer.disconnect();
	}
}

/// A running background. Dropping it cancels the loop and releases every
/// browser resource it holds.
pub struct FieldHandle {
	state: Rc<RefCell<FieldState>>,
	frame: Rc<Cell<Option<i32>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	subscriptions: Option<Subscriptions>,
}

impl FieldHandle {
	/// Size the canvas, seed the field and begin ticking.
	pub fn start(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Self, FieldError> {
		let window = web_sys::window().ok_or(FieldError::NoWindow)?;
		let mut ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(FieldError::ContextUnavailable)?
			.dyn_into()
			.map_err(|_| FieldError::ContextUnavailable)?;

		let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
		let state = Rc::new(RefCell::new(FieldState::new(config, seed)));
		sync_surface(&window, &canvas, &ctx, &mut state.borrow_mut())?;
		let subscriptions = Subscriptions::acquire(&window, &state)?;
		state.borrow_mut().start();

		let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let (state_anim, frame_anim, animate_inner) = (state.clone(), frame.clone(), animate.clone());

		*animate.borrow_mut() = Some(Closure::new(move || {
			frame_anim.set(None);
			let Some(win) = web_sys::window() else {
				return;
			};
			let mut state = state_anim.borrow_mut();
			if state.is_running() && state.take_resize_request() {
				if let Err(e) = sync_surface(&win, &canvas, &ctx, &mut state) {
					warn!("particle-field: resize failed: {}", e);
				}
			}
			if !state.tick(&mut ctx) {
				return;
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => frame_anim.set(Some(id)),
					Err(e) => warn!("particle-field: could not schedule frame: {:?}", e),
				}
			}
		}));

		let handle = Self {
			state,
			frame,
			animate,
			subscriptions: Some(subscriptions),
		};
		let first = handle
			.animate
			.borrow()
			.as_ref()
			.map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
		if let Some(id) = first.transpose()? {
			handle.frame.set(Some(id));
		}

		info!(
			"particle-field: started with {} particles",
			handle.state.borrow().field.len()
		);
		Ok(handle)
	}
}

impl FieldHandle {
	/// Inspect the live simulation context.
	pub fn with_state<R>(&self, f: impl FnOnce(&FieldState) -> R) -> R {
		f(&self.state.borrow())
	}
}

impl Drop for FieldHandle {
	fn drop(&mut self) {
		self.state.borrow_mut().cancel();
		if let Some(id) = self.frame.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		self.subscriptions.take();
		// Breaks the closure's reference to itself.
		self.animate.borrow_mut().take();
		info!("particle-field: stopped");
	}
}

/// Full-page decorative particle background.
///
/// Renders a fixed canvas behind all content that ignores pointer events. If
/// the browser cannot provide a 2D context the component renders an empty
/// canvas and does nothing else.
#[component]
pub fn ParticleBackground(
	/// Field parameters; defaults when omitted.
	#[prop(optional)]
	config: Option<FieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle: Rc<RefCell<Option<FieldHandle>>> = Rc::new(RefCell::new(None));
	let handle_init = handle.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handle_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match FieldHandle::start(canvas, config.clone().unwrap_or_default()) {
			Ok(h) => *handle_init.borrow_mut() = Some(h),
			Err(e) => warn!("particle-field: background disabled: {}", e),
		}
	});

	let handle = SendWrapper::new(handle);
	on_cleanup(move || {
		handle.borrow_mut().take();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -10; max-width: 100%; pointer-events: none; display: block;"
		/>
	}
}

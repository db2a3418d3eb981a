//! particle-field: decorative full-page particle background.
//!
//! This crate provides a WASM canvas component that draws drifting points and
//! proximity links behind page content, following the page's theme color and
//! tracking document resizes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, FieldError, ParticleBackground, ThemeColor};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field configuration from a script element with id="particle-config".
/// Expected format: a JSON object with any subset of [`FieldConfig`] keys.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	let config = FieldConfig::from_json(&json_text);
	info!("particle-field: loaded config {:?}", config);
	Some(config)
}

/// Minimal page shell that mounts the background once behind its content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground config=config />
		<main class="page-content">
			<h1>"Particle Field"</h1>
		</main>
	}
}

//! Failures that stop the field from starting.
//!
//! None of these reach the page: the component logs them and renders nothing.

use std::fmt;

use wasm_bindgen::JsValue;

/// Why the background could not be set up.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
	/// No global `window` (not running in a browser).
	NoWindow,
	/// The window has no document, `<html>` or `<body>`.
	NoDocument,
	/// The browser could not provide a 2D drawing context.
	ContextUnavailable,
	/// A DOM call threw.
	Js(String),
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldError::NoWindow => write!(f, "no window"),
			FieldError::NoDocument => write!(f, "no document"),
			FieldError::ContextUnavailable => write!(f, "2d context unavailable"),
			FieldError::Js(msg) => write!(f, "javascript error: {}", msg),
		}
	}
}

impl std::error::Error for FieldError {}

impl From<JsValue> for FieldError {
	fn from(value: JsValue) -> Self {
		FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_is_short_and_lowercase() {
		let cases = [
			(FieldError::NoWindow, "no window"),
			(FieldError::NoDocument, "no document"),
			(FieldError::ContextUnavailable, "2d context unavailable"),
			(FieldError::Js("boom".to_string()), "javascript error: boom"),
		];
		for (error, text) in cases {
			assert_eq!(error.to_string(), text);
		}
	}
}

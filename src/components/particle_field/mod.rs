//! Decorative particle field background.
//!
//! Renders drifting points on a full-document canvas behind page content, with
//! a line between every pair of points closer than a threshold. The field:
//! - Sizes its backing store to `document × devicePixelRatio`
//! - Scales particle count with document area
//! - Follows the page's `--primary` theme color across theme toggles
//! - Stops cleanly when unmounted
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleBackground};
//!
//! view! {
//!     <ParticleBackground config=FieldConfig { link_distance: 120.0, ..Default::default() } />
//!     <main>"page content"</main>
//! }
//! ```

mod component;
pub mod config;
mod error;
pub mod links;
pub mod particles;
mod render;
mod state;
pub mod surface;
pub mod theme;

pub use component::{FieldHandle, ParticleBackground};
pub use config::FieldConfig;
pub use error::FieldError;
pub use render::{Painter, render_frame};
pub use state::{FieldState, LoopPhase};
pub use theme::ThemeColor;

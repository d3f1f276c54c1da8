//! Host element platforms.
//!
//! An [`ElementPlatform`] is the boundary between generated element classes
//! and the host's custom element registry:
//!
//! - [`memory::MemoryDocument`]: in-memory document with browser registry semantics
//!   (all targets; used for tests and server-side rendering)
//! - [`web::WebPlatform`]: `window.customElements` (WASM only)

use serde::{Deserialize, Serialize};

use crate::class::ElementClass;
use crate::error::PlatformError;

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Options passed to the platform's `define` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineOptions {
	/// Local name of the customized built-in element.
	pub extends: String,
}

/// A host element registry.
pub trait ElementPlatform: Sized + 'static {
	/// Host element handle.
	type Element: Clone + 'static;
	/// Host shadow root handle.
	type ShadowRoot: Clone + 'static;

	/// Defines `class` under its tag name.
	///
	/// `options` is `Some` only for customized built-in elements.
	fn define(
		&mut self,
		class: ElementClass<Self>,
		options: Option<DefineOptions>,
	) -> Result<(), PlatformError>;

	/// Returns `true` if `tag` is already defined on this platform.
	fn is_defined(&self, tag: &str) -> bool;

	/// Attaches an open shadow root to `element`.
	fn attach_shadow(element: &Self::Element) -> Result<Self::ShadowRoot, PlatformError>;
}

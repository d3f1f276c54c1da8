//! The capability every custom element component provides.
//!
//! A construction hook runs once per element instance and returns a
//! [`Hydratable`] value. The generated element class then drives that value
//! through the element lifecycle:
//!
//! | Platform callback | Component method |
//! |-------------------|------------------|
//! | constructor (shadow mode) | [`Hydratable::hydrate`] with [`HydrationRoot::Shadow`] |
//! | first `connectedCallback` (light mode) | [`Hydratable::hydrate`] with [`HydrationRoot::Light`] |
//! | `connectedCallback` | [`Hydratable::on_connected`] |
//! | `attributeChangedCallback` | [`Hydratable::on_attribute_changed`] |
//! | `attributeChangedCallback` (removal) | [`Hydratable::on_attribute_removed`] |
//! | `disconnectedCallback` | [`Hydratable::on_disconnected`] |
//! | `adoptedCallback` | [`Hydratable::on_adopted`] |
//!
//! ## Example
//!
//! ```
//! use reinhardt_elements::{Hydratable, HydrationRoot, MemoryDocument};
//!
//! struct Greeting {
//!     name: String,
//! }
//!
//! impl Hydratable<MemoryDocument> for Greeting {
//!     fn hydrate(&mut self, root: HydrationRoot<'_, MemoryDocument>) {
//!         if let Some(shadow) = root.shadow_root() {
//!             shadow.set_text(format!("Hello, {}!", self.name));
//!         }
//!     }
//!
//!     fn on_attribute_changed(&mut self, name: &str, _old: &str, new: &str) {
//!         if name == "name" {
//!             self.name = new.to_string();
//!         }
//!     }
//! }
//! ```

use std::rc::Rc;

use crate::platform::ElementPlatform;

/// Where a component renders its content.
pub enum HydrationRoot<'a, P: ElementPlatform> {
	/// The open shadow root attached during construction.
	Shadow(&'a P::ShadowRoot),
	/// The element itself (light DOM).
	Light(&'a P::Element),
}

impl<P: ElementPlatform> HydrationRoot<'_, P> {
	/// Returns `true` for shadow-DOM hydration.
	pub fn is_shadow(&self) -> bool {
		matches!(self, Self::Shadow(_))
	}

	/// Returns the shadow root, if hydrating into one.
	pub fn shadow_root(&self) -> Option<&P::ShadowRoot> {
		match self {
			Self::Shadow(root) => Some(root),
			Self::Light(_) => None,
		}
	}

	/// Returns the host element, if hydrating into the light DOM.
	pub fn element(&self) -> Option<&P::Element> {
		match self {
			Self::Shadow(_) => None,
			Self::Light(element) => Some(element),
		}
	}
}

impl<P: ElementPlatform> Clone for HydrationRoot<'_, P> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<P: ElementPlatform> Copy for HydrationRoot<'_, P> {}

/// Lifecycle contract of a custom element component.
///
/// Attribute values are always strings: an absent old value is passed as
/// `""`. A removal is reported through [`Hydratable::on_attribute_removed`],
/// which by default forwards to [`Hydratable::on_attribute_changed`] with a
/// `""` new value.
pub trait Hydratable<P: ElementPlatform> {
	/// Populates the element's content. Called exactly once per instance.
	fn hydrate(&mut self, root: HydrationRoot<'_, P>);

	/// Reacts to a change of an observed attribute.
	fn on_attribute_changed(&mut self, name: &str, old_value: &str, new_value: &str);

	/// Reacts to the removal of an observed attribute.
	///
	/// Override to tell a removal apart from a change to `""`.
	fn on_attribute_removed(&mut self, name: &str, old_value: &str) {
		self.on_attribute_changed(name, old_value, "");
	}

	/// Called on every connection to a document, after any first-connection hydration.
	fn on_connected(&mut self) {}

	/// Called on every disconnection from a document.
	fn on_disconnected(&mut self) {}

	/// Called when the element is moved into a new document.
	fn on_adopted(&mut self) {}
}

/// Construction hook: invoked with the freshly constructed element, returns its component.
pub type ConstructHook<P> =
	Rc<dyn Fn(&<P as ElementPlatform>::Element) -> Box<dyn Hydratable<P>>>;

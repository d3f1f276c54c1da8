//! Reinhardt Elements - Custom Element registration
//!
//! Registers custom element classes with a host element registry and wires
//! their lifecycle callbacks to typed Rust components.
//!
//! ## Architecture
//!
//! - [`registry`]: [`ElementRegistry`], the facade that validates configurations,
//!   rejects duplicate tags and defines generated classes with the platform
//! - [`config`]: [`ElementConfig`], one named-field record per definition
//! - [`class`]: the generated [`ElementClass`] and its per-element [`ElementInstance`]
//! - [`component`]: the [`Hydratable`] contract every construction hook returns
//! - [`platform`]: host registries; [`MemoryDocument`] on every target,
//!   `WebPlatform` in the browser (`wasm32` only)
//! - [`properties`]: attribute-backed component state
//! - [`tag`]: custom element name validation
//!
//! ## Lifecycle
//!
//! For each element of a registered tag:
//!
//! 1. the construction hook runs with the new element and returns its component;
//! 2. with `use_shadow_dom`, an open shadow root is attached and the component
//!    hydrates into it immediately;
//! 3. observed attribute changes are forwarded with `""` for an absent old
//!    value; removals go to [`Hydratable::on_attribute_removed`];
//! 4. without `use_shadow_dom`, the component hydrates into the element itself
//!    on its first connection only.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use reinhardt_elements::{ElementConfig, ElementRegistry, Hydratable, HydrationRoot, MemoryDocument};
//!
//! struct Title {
//!     seen: Rc<RefCell<Vec<String>>>,
//! }
//!
//! impl Hydratable<MemoryDocument> for Title {
//!     fn hydrate(&mut self, _root: HydrationRoot<'_, MemoryDocument>) {}
//!
//!     fn on_attribute_changed(&mut self, name: &str, old: &str, new: &str) {
//!         self.seen.borrow_mut().push(format!("{name}: {old:?} -> {new:?}"));
//!     }
//! }
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let document = MemoryDocument::new();
//! let mut registry = ElementRegistry::new(document.clone());
//!
//! let log = seen.clone();
//! registry
//!     .register(
//!         ElementConfig::<MemoryDocument>::new("page-title", move |_| Title { seen: log.clone() })
//!             .observe(["text"]),
//!     )
//!     .unwrap();
//!
//! let title = document.create_element("page-title").unwrap();
//! document.set_attribute(&title, "text", "Home").unwrap();
//! assert_eq!(*seen.borrow(), vec!["text: \"\" -> \"Home\""]);
//! ```

#![warn(missing_docs)]

// Logging macros must be defined before the modules that use them
#[macro_use]
mod logging;

pub mod class;
pub mod component;
pub mod config;
pub mod error;
pub mod platform;
pub mod properties;
pub mod registry;
pub mod tag;

pub use class::{ElementClass, ElementInstance, InstanceCell, Reaction};
pub use component::{ConstructHook, Hydratable, HydrationRoot};
pub use config::{BaseType, ElementConfig, ElementDescriptor};
pub use error::{PlatformError, RegistrationError};
pub use platform::memory::{
	MemoryDocument, MemoryElement, MemoryInstance, MemoryShadowRoot, ShadowRootMode,
};
pub use platform::{DefineOptions, ElementPlatform};
pub use properties::{ElementProperties, LifecycleState};
pub use registry::ElementRegistry;
pub use tag::TagName;

#[cfg(target_arch = "wasm32")]
pub use platform::web::{WebPlatform, define_element, is_element_defined};

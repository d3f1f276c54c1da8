//! Custom element registry facade.
//!
//! [`ElementRegistry`] owns an [`ElementPlatform`] and is the only place
//! element classes are generated and defined. It records every tag it has
//! defined, so a second registration of a tag fails with
//! [`RegistrationError::AlreadyRegistered`] before the platform is asked.
//! Tags defined on the platform by other code paths are rejected the same way.
//!
//! ## Example
//!
//! ```
//! use reinhardt_elements::{
//!     ElementConfig, ElementRegistry, Hydratable, HydrationRoot, MemoryDocument, RegistrationError,
//! };
//!
//! struct Counter;
//!
//! impl Hydratable<MemoryDocument> for Counter {
//!     fn hydrate(&mut self, _root: HydrationRoot<'_, MemoryDocument>) {}
//!     fn on_attribute_changed(&mut self, _name: &str, _old: &str, _new: &str) {}
//! }
//!
//! let mut registry = ElementRegistry::new(MemoryDocument::new());
//! registry
//!     .register(ElementConfig::<MemoryDocument>::new("click-counter", |_| Counter).observe(["count"]))
//!     .unwrap();
//!
//! let again = registry.register(ElementConfig::<MemoryDocument>::new("click-counter", |_| Counter));
//! assert_eq!(
//!     again,
//!     Err(RegistrationError::AlreadyRegistered("click-counter".to_string()))
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::class::ElementClass;
use crate::config::{ElementConfig, ElementDescriptor};
use crate::error::RegistrationError;
use crate::platform::ElementPlatform;
use crate::tag::TagName;

/// Registers custom element classes with a platform.
pub struct ElementRegistry<P: ElementPlatform> {
	platform: P,
	elements: BTreeMap<TagName, ElementDescriptor>,
}

impl<P: ElementPlatform> ElementRegistry<P> {
	/// Creates a registry over `platform`.
	pub fn new(platform: P) -> Self {
		Self {
			platform,
			elements: BTreeMap::new(),
		}
	}

	/// Generates an element class from `config` and defines it under its tag.
	///
	/// # Errors
	///
	/// - [`RegistrationError::InvalidTagName`] if the tag is not a valid custom element name
	/// - [`RegistrationError::InvalidExtends`] if `extends_tag` does not name a built-in element
	/// - [`RegistrationError::AlreadyRegistered`] if the tag is already defined
	/// - [`RegistrationError::Platform`] if the platform rejects the definition
	pub fn register(&mut self, config: ElementConfig<P>) -> Result<(), RegistrationError> {
		debug_log!(
			"register custom element: tag = {}, base = {}, shadow = {}, observed = {:?}, extends = {:?}",
			config.tag_name,
			config.base_type,
			config.use_shadow_dom,
			config.observed_attributes,
			config.extends_tag
		);

		let class = ElementClass::from_config(config).inspect_err(|err| {
			warn_log!("custom element rejected: {}", err);
		})?;

		let tag = class.tag_name().clone();
		if self.elements.contains_key(&tag) || self.platform.is_defined(tag.as_str()) {
			warn_log!("custom element <{}> is already registered", tag);
			return Err(RegistrationError::AlreadyRegistered(tag.into_string()));
		}

		let descriptor = class.descriptor();
		let options = class.define_options();
		self.platform.define(class, options)?;
		self.elements.insert(tag, descriptor);

		Ok(())
	}

	/// Returns `true` if `tag` was registered through this registry.
	pub fn is_registered(&self, tag: &str) -> bool {
		self.elements.contains_key(tag)
	}

	/// Registered tags, sorted.
	pub fn registered_tags(&self) -> impl Iterator<Item = &str> {
		self.elements.keys().map(TagName::as_str)
	}

	/// Summary of a registered element.
	pub fn descriptor(&self, tag: &str) -> Option<&ElementDescriptor> {
		self.elements.get(tag)
	}

	/// Summaries of all registered elements, sorted by tag.
	pub fn descriptors(&self) -> impl Iterator<Item = &ElementDescriptor> {
		self.elements.values()
	}

	/// Number of registered elements.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Returns `true` if nothing has been registered.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// The underlying platform.
	pub fn platform(&self) -> &P {
		&self.platform
	}

	/// Consumes the registry, returning the platform.
	pub fn into_platform(self) -> P {
		self.platform
	}
}

impl<P: ElementPlatform + Default> Default for ElementRegistry<P> {
	fn default() -> Self {
		Self::new(P::default())
	}
}

impl<P: ElementPlatform> fmt::Debug for ElementRegistry<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementRegistry")
			.field("elements", &self.elements.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

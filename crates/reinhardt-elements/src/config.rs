//! Element configuration.
//!
//! [`ElementConfig`] is the single record passed to
//! [`ElementRegistry::register`](crate::ElementRegistry::register). Every
//! option is a named field with a builder method, so call sites never depend
//! on argument order.
//!
//! ## Example
//!
//! ```
//! use reinhardt_elements::{BaseType, ElementConfig, Hydratable, HydrationRoot, MemoryDocument};
//!
//! struct FancyButton;
//!
//! impl Hydratable<MemoryDocument> for FancyButton {
//!     fn hydrate(&mut self, _root: HydrationRoot<'_, MemoryDocument>) {}
//!     fn on_attribute_changed(&mut self, _name: &str, _old: &str, _new: &str) {}
//! }
//!
//! let config = ElementConfig::<MemoryDocument>::new("fancy-button", |_| FancyButton)
//!     .base_type(BaseType::Builtin("HTMLButtonElement".to_string()))
//!     .extends("button")
//!     .shadow(false)
//!     .observe(["disabled", "label"]);
//!
//! assert_eq!(config.observed_attributes, vec!["disabled", "label"]);
//! ```

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::component::{ConstructHook, Hydratable};
use crate::platform::ElementPlatform;
use crate::tag::TagName;

/// The platform class a generated element class extends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum BaseType {
	/// The generic `HTMLElement` interface (autonomous custom elements).
	#[default]
	HtmlElement,
	/// A built-in element interface, e.g. `HTMLButtonElement`.
	Builtin(String),
	/// A custom element class already defined under the given tag.
	Defined(String),
}

impl fmt::Display for BaseType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::HtmlElement => f.write_str("HTMLElement"),
			Self::Builtin(name) => f.write_str(name),
			Self::Defined(tag) => write!(f, "<{tag}>"),
		}
	}
}

/// Configuration of one custom element definition.
pub struct ElementConfig<P: ElementPlatform> {
	/// Class to extend.
	pub base_type: BaseType,
	/// Custom element name to register.
	pub tag_name: String,
	/// Attach an open shadow root and hydrate into it during construction.
	/// When `false`, hydration happens on first connection, into the element itself.
	pub use_shadow_dom: bool,
	/// Runs once per instance, before shadow attachment and hydration.
	pub on_construct: ConstructHook<P>,
	/// Attributes whose changes are reported, in order.
	pub observed_attributes: Vec<String>,
	/// Local name of the built-in element this definition customizes.
	pub extends_tag: Option<String>,
}

impl<P: ElementPlatform> ElementConfig<P> {
	/// Creates a configuration for an autonomous element with a shadow root
	/// and no observed attributes.
	pub fn new<F, H>(tag_name: impl Into<String>, on_construct: F) -> Self
	where
		F: Fn(&P::Element) -> H + 'static,
		H: Hydratable<P> + 'static,
	{
		Self::from_hook(
			tag_name,
			Rc::new(move |element: &P::Element| -> Box<dyn Hydratable<P>> {
				Box::new(on_construct(element))
			}),
		)
	}

	/// Creates a configuration from an already boxed construction hook.
	pub fn from_hook(tag_name: impl Into<String>, on_construct: ConstructHook<P>) -> Self {
		Self {
			base_type: BaseType::default(),
			tag_name: tag_name.into(),
			use_shadow_dom: true,
			on_construct,
			observed_attributes: Vec::new(),
			extends_tag: None,
		}
	}

	/// Sets the class to extend.
	pub fn base_type(mut self, base_type: BaseType) -> Self {
		self.base_type = base_type;
		self
	}

	/// Selects shadow-DOM (`true`) or light-DOM (`false`) hydration.
	pub fn shadow(mut self, use_shadow_dom: bool) -> Self {
		self.use_shadow_dom = use_shadow_dom;
		self
	}

	/// Appends attribute names to the observed list.
	pub fn observe<I, S>(mut self, attributes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.observed_attributes
			.extend(attributes.into_iter().map(Into::into));
		self
	}

	/// Makes this a customized built-in element extending `tag`.
	pub fn extends(mut self, tag: impl Into<String>) -> Self {
		self.extends_tag = Some(tag.into());
		self
	}
}

impl<P: ElementPlatform> Clone for ElementConfig<P> {
	fn clone(&self) -> Self {
		Self {
			base_type: self.base_type.clone(),
			tag_name: self.tag_name.clone(),
			use_shadow_dom: self.use_shadow_dom,
			on_construct: Rc::clone(&self.on_construct),
			observed_attributes: self.observed_attributes.clone(),
			extends_tag: self.extends_tag.clone(),
		}
	}
}

impl<P: ElementPlatform> fmt::Debug for ElementConfig<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementConfig")
			.field("base_type", &self.base_type)
			.field("tag_name", &self.tag_name)
			.field("use_shadow_dom", &self.use_shadow_dom)
			.field("on_construct", &"<hook>")
			.field("observed_attributes", &self.observed_attributes)
			.field("extends_tag", &self.extends_tag)
			.finish()
	}
}

/// Serializable summary of a registered element class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
	/// Registered tag.
	pub tag_name: TagName,
	/// Extended class.
	pub base_type: BaseType,
	/// Shadow-DOM hydration.
	pub use_shadow_dom: bool,
	/// Observed attributes, in registration order.
	pub observed_attributes: Vec<String>,
	/// Customized built-in local name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extends_tag: Option<String>,
}

//! Generated element classes and their instances.
//!
//! [`ElementClass`] is what a registration produces: the platform keeps it
//! for the lifetime of the registry and calls [`ElementClass::construct`]
//! for every element it creates or upgrades under the class's tag. The
//! resulting [`ElementInstance`] receives the remaining lifecycle callbacks.
//!
//! Hydration runs once per instance, but at different points depending on
//! the shadow flag:
//!
//! - shadow mode: in the constructor, right after the shadow root is attached;
//! - light mode: on the first connection only, gated by [`ElementInstance::has_setup`].

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::component::{ConstructHook, Hydratable, HydrationRoot};
use crate::config::{BaseType, ElementConfig, ElementDescriptor};
use crate::error::{PlatformError, RegistrationError};
use crate::platform::{DefineOptions, ElementPlatform};
use crate::tag::{TagName, is_builtin_local_name};

/// A custom element class generated from an [`ElementConfig`].
pub struct ElementClass<P: ElementPlatform> {
	tag_name: TagName,
	base_type: BaseType,
	use_shadow_dom: bool,
	observed_attributes: Rc<[String]>,
	extends_tag: Option<String>,
	on_construct: ConstructHook<P>,
}

impl<P: ElementPlatform> ElementClass<P> {
	/// Builds a class from `config`, validating the tag and `extends` names.
	pub fn from_config(config: ElementConfig<P>) -> Result<Self, RegistrationError> {
		let tag_name = TagName::parse(&config.tag_name)?;

		if let Some(extends) = &config.extends_tag {
			if !is_builtin_local_name(extends) {
				return Err(RegistrationError::InvalidExtends {
					tag: config.tag_name,
					extends: extends.clone(),
				});
			}
		}

		Ok(Self {
			tag_name,
			base_type: config.base_type,
			use_shadow_dom: config.use_shadow_dom,
			observed_attributes: config.observed_attributes.into(),
			extends_tag: config.extends_tag,
			on_construct: config.on_construct,
		})
	}

	/// Registered tag.
	pub fn tag_name(&self) -> &TagName {
		&self.tag_name
	}

	/// Extended class.
	pub fn base_type(&self) -> &BaseType {
		&self.base_type
	}

	/// Whether instances hydrate into a shadow root.
	pub fn uses_shadow_dom(&self) -> bool {
		self.use_shadow_dom
	}

	/// The static `observedAttributes` list, exactly as configured.
	pub fn observed_attributes(&self) -> &[String] {
		&self.observed_attributes
	}

	/// Returns `true` if changes to `name` are reported to instances.
	pub fn observes(&self, name: &str) -> bool {
		self.observed_attributes.iter().any(|observed| observed == name)
	}

	/// Customized built-in local name.
	pub fn extends_tag(&self) -> Option<&str> {
		self.extends_tag.as_deref()
	}

	/// The local name of elements of this class.
	pub fn local_name(&self) -> &str {
		self.extends_tag
			.as_deref()
			.unwrap_or_else(|| self.tag_name.as_str())
	}

	/// Options for the platform's `define`: `Some` only when extending a built-in.
	pub fn define_options(&self) -> Option<DefineOptions> {
		self.extends_tag.as_ref().map(|extends| DefineOptions {
			extends: extends.clone(),
		})
	}

	/// Serializable summary of this class.
	pub fn descriptor(&self) -> ElementDescriptor {
		ElementDescriptor {
			tag_name: self.tag_name.clone(),
			base_type: self.base_type.clone(),
			use_shadow_dom: self.use_shadow_dom,
			observed_attributes: self.observed_attributes.to_vec(),
			extends_tag: self.extends_tag.clone(),
		}
	}

	/// Runs the class constructor for a base-constructed `element`.
	///
	/// The construction hook runs first; in shadow mode an open shadow root
	/// is then attached and the component hydrates into it.
	pub fn construct(&self, element: &P::Element) -> Result<ElementInstance<P>, PlatformError> {
		let mut component = (self.on_construct)(element);

		let shadow_root = if self.use_shadow_dom {
			let root = P::attach_shadow(element)?;
			component.hydrate(HydrationRoot::Shadow(&root));
			Some(root)
		} else {
			None
		};

		Ok(ElementInstance {
			shadow_root,
			component,
			use_shadow_dom: self.use_shadow_dom,
			has_setup: false,
		})
	}
}

impl<P: ElementPlatform> Clone for ElementClass<P> {
	fn clone(&self) -> Self {
		Self {
			tag_name: self.tag_name.clone(),
			base_type: self.base_type.clone(),
			use_shadow_dom: self.use_shadow_dom,
			observed_attributes: Rc::clone(&self.observed_attributes),
			extends_tag: self.extends_tag.clone(),
			on_construct: Rc::clone(&self.on_construct),
		}
	}
}

impl<P: ElementPlatform> fmt::Debug for ElementClass<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementClass")
			.field("tag_name", &self.tag_name)
			.field("base_type", &self.base_type)
			.field("use_shadow_dom", &self.use_shadow_dom)
			.field("observed_attributes", &self.observed_attributes)
			.field("extends_tag", &self.extends_tag)
			.finish_non_exhaustive()
	}
}

/// One constructed element of a generated class.
///
/// The instance does not keep its host element; platforms pass it to
/// [`ElementInstance::connected`], the only callback that renders into it.
pub struct ElementInstance<P: ElementPlatform> {
	shadow_root: Option<P::ShadowRoot>,
	component: Box<dyn Hydratable<P>>,
	use_shadow_dom: bool,
	has_setup: bool,
}

impl<P: ElementPlatform> ElementInstance<P> {
	/// The shadow root attached during construction, if any.
	pub fn shadow_root(&self) -> Option<&P::ShadowRoot> {
		self.shadow_root.as_ref()
	}

	/// Whether the first connection has happened.
	pub fn has_setup(&self) -> bool {
		self.has_setup
	}

	/// `attributeChangedCallback`. An absent old value is forwarded as `""`;
	/// an absent new value means the attribute was removed.
	pub fn attribute_changed(
		&mut self,
		name: &str,
		old_value: Option<&str>,
		new_value: Option<&str>,
	) {
		let old_value = old_value.unwrap_or_default();
		match new_value {
			Some(new_value) => self.component.on_attribute_changed(name, old_value, new_value),
			None => self.component.on_attribute_removed(name, old_value),
		}
	}

	/// `connectedCallback` for the host `element`.
	pub fn connected(&mut self, element: &P::Element) {
		if !self.has_setup {
			self.has_setup = true;

			if !self.use_shadow_dom {
				self.component.hydrate(HydrationRoot::Light(element));
			}
		}

		self.component.on_connected();
	}

	/// `disconnectedCallback`.
	pub fn disconnected(&mut self) {
		self.component.on_disconnected();
	}

	/// `adoptedCallback`.
	pub fn adopted(&mut self) {
		self.component.on_adopted();
	}
}

/// A lifecycle callback waiting to run against an [`ElementInstance`].
pub type Reaction<P> = Box<dyn FnOnce(&mut ElementInstance<P>)>;

/// An [`ElementInstance`] together with its pending lifecycle reactions.
///
/// A component may cause callbacks on its own element while one of its
/// callbacks is running, for example by setting an observed attribute from
/// `on_connected`. Such a reaction cannot borrow the instance, so it is
/// queued and runs right after the running callback returns, in order.
pub struct InstanceCell<P: ElementPlatform> {
	instance: RefCell<ElementInstance<P>>,
	pending: RefCell<VecDeque<Reaction<P>>>,
}

impl<P: ElementPlatform> InstanceCell<P> {
	/// Wraps a constructed instance.
	pub fn new(instance: ElementInstance<P>) -> Self {
		Self {
			instance: RefCell::new(instance),
			pending: RefCell::new(VecDeque::new()),
		}
	}

	/// Runs `reaction` now, or after the callback currently running on this
	/// instance returns.
	pub fn react<F>(&self, reaction: F)
	where
		F: FnOnce(&mut ElementInstance<P>) + 'static,
	{
		match self.instance.try_borrow_mut() {
			Ok(mut instance) => reaction(&mut instance),
			Err(_) => {
				self.pending.borrow_mut().push_back(Box::new(reaction));
				return;
			}
		}

		// Only the outermost call drains; nested calls queue above.
		loop {
			let Some(next) = self.pending.borrow_mut().pop_front() else {
				break;
			};
			match self.instance.try_borrow_mut() {
				Ok(mut instance) => next(&mut instance),
				Err(_) => {
					self.pending.borrow_mut().push_front(next);
					break;
				}
			}
		}
	}

	/// Number of queued reactions.
	pub fn pending(&self) -> usize {
		self.pending.borrow().len()
	}

	/// Borrows the instance for inspection.
	///
	/// # Panics
	///
	/// Panics if called from inside one of this instance's callbacks.
	pub fn borrow(&self) -> Ref<'_, ElementInstance<P>> {
		self.instance.borrow()
	}
}

impl<P: ElementPlatform> fmt::Debug for InstanceCell<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InstanceCell")
			.field("pending", &self.pending())
			.finish_non_exhaustive()
	}
}

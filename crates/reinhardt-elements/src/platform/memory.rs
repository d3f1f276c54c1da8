//! In-memory element platform.
//!
//! [`MemoryDocument`] behaves like a browser document with its own custom
//! element registry, without a JavaScript engine:
//!
//! - `define` enforces the registry rules (valid name, one definition per
//!   name, `extends` must name a built-in, a `Defined` base must exist)
//! - elements created under a defined name are upgraded immediately; elements
//!   created before their definition are upgraded when it arrives
//! - observed attribute changes, connection, disconnection and adoption are
//!   dispatched to the element instance
//!
//! Handles are reference counted; cloning a [`MemoryDocument`] or a
//! [`MemoryElement`] yields another handle to the same node. The document
//! holds its elements weakly: an upgraded element owns its instance, and
//! both are dropped with the element's last handle.
//!
//! A callback that causes another callback on its own element, such as
//! `on_connected` setting an observed attribute, does not re-enter the
//! component. The nested callback runs as soon as the outer one returns.
//!
//! ## Example
//!
//! ```
//! use reinhardt_elements::{ElementConfig, ElementRegistry, Hydratable, HydrationRoot, MemoryDocument};
//!
//! struct Badge;
//!
//! impl Hydratable<MemoryDocument> for Badge {
//!     fn hydrate(&mut self, root: HydrationRoot<'_, MemoryDocument>) {
//!         if let Some(element) = root.element() {
//!             element.set_text("new");
//!         }
//!     }
//!     fn on_attribute_changed(&mut self, _name: &str, _old: &str, _new: &str) {}
//! }
//!
//! let document = MemoryDocument::new();
//! let mut registry = ElementRegistry::new(document.clone());
//! registry
//!     .register(ElementConfig::<MemoryDocument>::new("status-badge", |_| Badge).shadow(false))
//!     .unwrap();
//!
//! let badge = document.create_element("status-badge").unwrap();
//! assert_eq!(badge.text(), "");
//! document.connect(&badge);
//! assert_eq!(badge.text(), "new");
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::class::{ElementClass, ElementInstance, InstanceCell};
use crate::config::BaseType;
use crate::error::PlatformError;
use crate::platform::{DefineOptions, ElementPlatform};
use crate::tag::is_valid_custom_element_name;

/// Shared handle to an upgraded element's instance.
pub type MemoryInstance = Rc<InstanceCell<MemoryDocument>>;

/// A document with its own custom element registry.
#[derive(Clone, Default)]
pub struct MemoryDocument {
	inner: Rc<DocumentInner>,
}

#[derive(Default)]
struct DocumentInner {
	definitions: RefCell<HashMap<String, ElementClass<MemoryDocument>>>,
	// Elements with a custom element name that had no definition yet.
	pending: RefCell<Vec<Weak<ElementNode>>>,
	next_node_id: Cell<u64>,
}

#[derive(Clone)]
struct Upgraded {
	class: ElementClass<MemoryDocument>,
	instance: MemoryInstance,
}

impl MemoryDocument {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	/// `document.createElement(local_name)`.
	pub fn create_element(&self, local_name: &str) -> Result<MemoryElement, PlatformError> {
		self.create_element_with_attributes(local_name, None, &[])
	}

	/// `document.createElement(local_name, { is })`, for customized built-ins.
	pub fn create_customized(
		&self,
		local_name: &str,
		is: &str,
	) -> Result<MemoryElement, PlatformError> {
		self.create_element_with_attributes(local_name, Some(is), &[])
	}

	/// Creates an element the way the HTML parser does: attributes are set
	/// before the upgrade, so observed ones are reported with an empty old value
	/// right after construction.
	pub fn create_element_with_attributes(
		&self,
		local_name: &str,
		is: Option<&str>,
		attributes: &[(&str, &str)],
	) -> Result<MemoryElement, PlatformError> {
		let id = self.inner.next_node_id.get();
		self.inner.next_node_id.set(id + 1);
		let element = MemoryElement::new(id, local_name, is, attributes);

		match self.lookup(local_name, is) {
			Some(class) => self.upgrade(&element, class)?,
			None => {
				if is_valid_custom_element_name(is.unwrap_or(local_name)) {
					let mut pending = self.inner.pending.borrow_mut();
					pending.retain(|node| node.strong_count() > 0);
					pending.push(Rc::downgrade(&element.node));
				}
			}
		}

		Ok(element)
	}

	/// `element.setAttribute(name, value)`.
	///
	/// # Errors
	///
	/// [`PlatformError::InvalidCharacter`] if `name` is not a valid attribute name.
	pub fn set_attribute(
		&self,
		element: &MemoryElement,
		name: &str,
		value: &str,
	) -> Result<(), PlatformError> {
		if !is_valid_attribute_name(name) {
			return Err(PlatformError::InvalidCharacter(format!(
				"\"{name}\" is not a valid attribute name"
			)));
		}

		let old_value = element.store_attribute(name, value);
		attribute_changed(element, name, old_value, Some(value.to_string()));
		Ok(())
	}

	/// `element.removeAttribute(name)`. Removing an absent attribute reports nothing.
	pub fn remove_attribute(&self, element: &MemoryElement, name: &str) {
		if let Some(old_value) = element.take_attribute(name) {
			attribute_changed(element, name, Some(old_value), None);
		}
	}

	/// Inserts `element` into the document. Connecting a connected element is a no-op.
	pub fn connect(&self, element: &MemoryElement) {
		if element.is_connected() {
			return;
		}
		element.node.connected.set(true);
		let host = element.clone();
		element.react(move |instance| instance.connected(&host));
	}

	/// Removes `element` from the document. Disconnecting a detached element is a no-op.
	pub fn disconnect(&self, element: &MemoryElement) {
		if !element.is_connected() {
			return;
		}
		element.node.connected.set(false);
		element.react(ElementInstance::disconnected);
	}

	/// `document.adoptNode(element)`: detaches the element, then reports the adoption.
	pub fn adopt(&self, element: &MemoryElement) {
		self.disconnect(element);
		element.react(ElementInstance::adopted);
	}

	/// Returns `true` if `element` has been upgraded to a custom element.
	pub fn is_upgraded(&self, element: &MemoryElement) -> bool {
		element.node.upgraded.borrow().is_some()
	}

	/// The instance of an upgraded element.
	pub fn instance(&self, element: &MemoryElement) -> Option<MemoryInstance> {
		element.upgraded().map(|upgraded| upgraded.instance)
	}

	/// Defined names, sorted.
	pub fn defined_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.inner.definitions.borrow().keys().cloned().collect();
		names.sort();
		names
	}

	/// Number of live elements waiting for a definition.
	pub fn pending_upgrades(&self) -> usize {
		self.inner
			.pending
			.borrow()
			.iter()
			.filter(|node| node.strong_count() > 0)
			.count()
	}

	fn lookup(&self, local_name: &str, is: Option<&str>) -> Option<ElementClass<Self>> {
		self.inner
			.definitions
			.borrow()
			.get(is.unwrap_or(local_name))
			.filter(|class| class.local_name() == local_name)
			.cloned()
	}

	fn upgrade(&self, element: &MemoryElement, class: ElementClass<Self>) -> Result<(), PlatformError> {
		debug_log!("upgrading <{}> (node {})", class.tag_name(), element.id());

		let instance: MemoryInstance = Rc::new(InstanceCell::new(class.construct(element)?));
		*element.node.upgraded.borrow_mut() = Some(Upgraded {
			class: class.clone(),
			instance,
		});

		for (name, value) in element.attributes() {
			if class.observes(&name) {
				element.react(move |instance| {
					instance.attribute_changed(&name, None, Some(&value));
				});
			}
		}

		if element.is_connected() {
			let host = element.clone();
			element.react(move |instance| instance.connected(&host));
		}

		Ok(())
	}
}

fn attribute_changed(
	element: &MemoryElement,
	name: &str,
	old_value: Option<String>,
	new_value: Option<String>,
) {
	let Some(upgraded) = element.upgraded() else {
		return;
	};
	if !upgraded.class.observes(name) {
		return;
	}

	let name = name.to_string();
	upgraded.instance.react(move |instance| {
		instance.attribute_changed(&name, old_value.as_deref(), new_value.as_deref());
	});
}

// Attribute names as accepted by `setAttribute`: non-empty, without ASCII
// whitespace, NUL, `/`, `>` or `=`.
fn is_valid_attribute_name(name: &str) -> bool {
	!name.is_empty()
		&& !name
			.chars()
			.any(|c| c.is_ascii_whitespace() || matches!(c, '\0' | '/' | '>' | '='))
}

impl ElementPlatform for MemoryDocument {
	type Element = MemoryElement;
	type ShadowRoot = MemoryShadowRoot;

	fn define(
		&mut self,
		class: ElementClass<Self>,
		options: Option<DefineOptions>,
	) -> Result<(), PlatformError> {
		let name = class.tag_name().to_string();

		if !is_valid_custom_element_name(&name) {
			return Err(PlatformError::Syntax(format!(
				"\"{name}\" is not a valid custom element name"
			)));
		}

		if let Some(DefineOptions { extends }) = &options {
			if is_valid_custom_element_name(extends) {
				return Err(PlatformError::NotSupported(format!(
					"\"{extends}\" is a custom element name and cannot be extended"
				)));
			}
		}

		{
			let mut definitions = self.inner.definitions.borrow_mut();
			if definitions.contains_key(&name) {
				return Err(PlatformError::NotSupported(format!(
					"the name \"{name}\" has already been used with this registry"
				)));
			}
			if let BaseType::Defined(base) = class.base_type() {
				if !definitions.contains_key(base) {
					return Err(PlatformError::InvalidBase(format!(
						"<{base}> is not defined"
					)));
				}
			}
			definitions.insert(name.clone(), class.clone());
		}

		let mut waiting = Vec::new();
		self.inner.pending.borrow_mut().retain(|node| {
			let Some(node) = node.upgrade() else {
				return false;
			};
			let element = MemoryElement { node };
			let matches = element.is_value().unwrap_or(element.local_name()) == name
				&& element.local_name() == class.local_name();
			if matches {
				waiting.push(element);
			}
			!matches
		});

		for element in waiting {
			// An element that fails to upgrade stays undefined; the definition stands.
			if let Err(err) = self.upgrade(&element, class.clone()) {
				warn_log!("failed to upgrade <{}>: {}", name, err);
			}
		}

		Ok(())
	}

	fn is_defined(&self, tag: &str) -> bool {
		self.inner.definitions.borrow().contains_key(tag)
	}

	fn attach_shadow(element: &MemoryElement) -> Result<MemoryShadowRoot, PlatformError> {
		let mut slot = element.node.shadow_root.borrow_mut();
		if slot.is_some() {
			return Err(PlatformError::NotSupported(format!(
				"<{}> already hosts a shadow root",
				element.local_name()
			)));
		}
		let root = MemoryShadowRoot::new(ShadowRootMode::Open);
		*slot = Some(root.clone());
		Ok(root)
	}
}

impl fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryDocument")
			.field("defined", &self.defined_names())
			.field("pending", &self.pending_upgrades())
			.finish()
	}
}

/// An element node of a [`MemoryDocument`].
#[derive(Clone)]
pub struct MemoryElement {
	node: Rc<ElementNode>,
}

struct ElementNode {
	id: u64,
	local_name: String,
	is_value: Option<String>,
	attributes: RefCell<Vec<(String, String)>>,
	children: RefCell<Vec<MemoryElement>>,
	text: RefCell<String>,
	shadow_root: RefCell<Option<MemoryShadowRoot>>,
	upgraded: RefCell<Option<Upgraded>>,
	connected: Cell<bool>,
}

impl MemoryElement {
	fn new(id: u64, local_name: &str, is: Option<&str>, attributes: &[(&str, &str)]) -> Self {
		Self {
			node: Rc::new(ElementNode {
				id,
				local_name: local_name.to_string(),
				is_value: is.map(str::to_string),
				attributes: RefCell::new(
					attributes
						.iter()
						.map(|(name, value)| (name.to_string(), value.to_string()))
						.collect(),
				),
				children: RefCell::new(Vec::new()),
				text: RefCell::new(String::new()),
				shadow_root: RefCell::new(None),
				upgraded: RefCell::new(None),
				connected: Cell::new(false),
			}),
		}
	}

	/// Node id, unique within the creating document.
	pub fn id(&self) -> u64 {
		self.node.id
	}

	/// Local name (`button` for a customized built-in).
	pub fn local_name(&self) -> &str {
		&self.node.local_name
	}

	/// The `is` value given at creation.
	pub fn is_value(&self) -> Option<&str> {
		self.node.is_value.as_deref()
	}

	/// Current value of an attribute.
	pub fn attribute(&self, name: &str) -> Option<String> {
		self.node
			.attributes
			.borrow()
			.iter()
			.find(|(attr, _)| attr == name)
			.map(|(_, value)| value.clone())
	}

	/// All attributes in insertion order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.node.attributes.borrow().clone()
	}

	/// Child elements.
	pub fn children(&self) -> Vec<MemoryElement> {
		self.node.children.borrow().clone()
	}

	/// Appends a child element.
	pub fn append_child(&self, child: &MemoryElement) {
		self.node.children.borrow_mut().push(child.clone());
	}

	/// Text content.
	pub fn text(&self) -> String {
		self.node.text.borrow().clone()
	}

	/// Replaces the text content.
	pub fn set_text(&self, text: impl Into<String>) {
		*self.node.text.borrow_mut() = text.into();
	}

	/// The attached shadow root.
	pub fn shadow_root(&self) -> Option<MemoryShadowRoot> {
		self.node.shadow_root.borrow().clone()
	}

	/// Whether the element is in the document.
	pub fn is_connected(&self) -> bool {
		self.node.connected.get()
	}

	fn upgraded(&self) -> Option<Upgraded> {
		self.node.upgraded.borrow().clone()
	}

	fn react<F>(&self, callback: F)
	where
		F: FnOnce(&mut ElementInstance<MemoryDocument>) + 'static,
	{
		if let Some(upgraded) = self.upgraded() {
			upgraded.instance.react(callback);
		}
	}

	fn store_attribute(&self, name: &str, value: &str) -> Option<String> {
		let mut attributes = self.node.attributes.borrow_mut();
		match attributes.iter_mut().find(|(attr, _)| attr == name) {
			Some((_, current)) => Some(std::mem::replace(current, value.to_string())),
			None => {
				attributes.push((name.to_string(), value.to_string()));
				None
			}
		}
	}

	fn take_attribute(&self, name: &str) -> Option<String> {
		let mut attributes = self.node.attributes.borrow_mut();
		let index = attributes.iter().position(|(attr, _)| attr == name)?;
		Some(attributes.remove(index).1)
	}
}

impl PartialEq for MemoryElement {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.node, &other.node)
	}
}

impl Eq for MemoryElement {}

impl fmt::Debug for MemoryElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryElement")
			.field("id", &self.node.id)
			.field("local_name", &self.node.local_name)
			.field("is", &self.node.is_value)
			.field("attributes", &self.node.attributes.borrow())
			.field("upgraded", &self.node.upgraded.borrow().is_some())
			.field("connected", &self.node.connected.get())
			.finish()
	}
}

/// Encapsulation mode of a shadow root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRootMode {
	/// Reachable from outside through `element.shadowRoot`.
	Open,
	/// Hidden from outside.
	Closed,
}

/// A shadow root of a [`MemoryElement`].
#[derive(Clone)]
pub struct MemoryShadowRoot {
	node: Rc<ShadowNode>,
}

struct ShadowNode {
	mode: ShadowRootMode,
	children: RefCell<Vec<MemoryElement>>,
	text: RefCell<String>,
}

impl MemoryShadowRoot {
	fn new(mode: ShadowRootMode) -> Self {
		Self {
			node: Rc::new(ShadowNode {
				mode,
				children: RefCell::new(Vec::new()),
				text: RefCell::new(String::new()),
			}),
		}
	}

	/// Encapsulation mode.
	pub fn mode(&self) -> ShadowRootMode {
		self.node.mode
	}

	/// Child elements.
	pub fn children(&self) -> Vec<MemoryElement> {
		self.node.children.borrow().clone()
	}

	/// Appends a child element.
	pub fn append_child(&self, child: &MemoryElement) {
		self.node.children.borrow_mut().push(child.clone());
	}

	/// Text content.
	pub fn text(&self) -> String {
		self.node.text.borrow().clone()
	}

	/// Replaces the text content.
	pub fn set_text(&self, text: impl Into<String>) {
		*self.node.text.borrow_mut() = text.into();
	}
}

impl PartialEq for MemoryShadowRoot {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.node, &other.node)
	}
}

impl Eq for MemoryShadowRoot {}

impl fmt::Debug for MemoryShadowRoot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryShadowRoot")
			.field("mode", &self.node.mode)
			.field("children", &self.node.children.borrow().len())
			.finish()
	}
}

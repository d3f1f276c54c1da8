//! Browser element platform (`window.customElements`).
//!
//! A class cannot be extended from Rust, so definition goes through a small
//! JavaScript shim (`define_element.js`). The shim's constructor calls back
//! into Rust, which runs [`ElementClass::construct`] and installs the
//! per-instance lifecycle methods on the new element with `Reflect.set`.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_elements::{ElementConfig, Hydratable, HydrationRoot, WebPlatform, define_element};
//!
//! struct Hello;
//!
//! impl Hydratable<WebPlatform> for Hello {
//!     fn hydrate(&mut self, root: HydrationRoot<'_, WebPlatform>) {
//!         if let Some(shadow) = root.shadow_root() {
//!             shadow.set_inner_html("<p>Hello</p>");
//!         }
//!     }
//!     fn on_attribute_changed(&mut self, _name: &str, _old: &str, _new: &str) {}
//! }
//!
//! define_element(ElementConfig::<WebPlatform>::new("hello-world", |_| Hello))?;
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode};

use crate::class::{ElementClass, ElementInstance, InstanceCell};
use crate::config::{BaseType, ElementConfig};
use crate::error::{PlatformError, RegistrationError};
use crate::platform::{DefineOptions, ElementPlatform};
use crate::registry::ElementRegistry;

type WebInstance = Rc<InstanceCell<WebPlatform>>;

/// The browser's custom element registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPlatform;

impl ElementPlatform for WebPlatform {
	type Element = HtmlElement;
	type ShadowRoot = ShadowRoot;

	fn define(
		&mut self,
		class: ElementClass<Self>,
		options: Option<DefineOptions>,
	) -> Result<(), PlatformError> {
		let superclass = resolve_base(class.base_type())?;
		let observed_attributes = class
			.observed_attributes()
			.iter()
			.map(|name| JsValue::from_str(name))
			.collect::<js_sys::Array>();
		let tag_name = class.tag_name().to_string();

		let construct = Closure::wrap(Box::new(move |this: HtmlElement| -> Result<(), JsValue> {
			let instance = class.construct(&this).map_err(to_js_error)?;
			install_callbacks(&this, Rc::new(InstanceCell::new(instance)))
		}) as Box<dyn FnMut(HtmlElement) -> Result<(), JsValue>>);

		// The class lives as long as the registry, so the closure is handed to JS for good.
		js::define_custom_element(
			&superclass,
			&tag_name,
			&construct.into_js_value(),
			&observed_attributes,
			options.as_ref().map(|options| options.extends.as_str()),
		)
		.map_err(classify)
	}

	fn is_defined(&self, tag: &str) -> bool {
		web_sys::window()
			.map(|window| !window.custom_elements().get(tag).is_undefined())
			.unwrap_or(false)
	}

	fn attach_shadow(element: &HtmlElement) -> Result<ShadowRoot, PlatformError> {
		element
			.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
			.map_err(classify)
	}
}

thread_local! {
	static REGISTRY: RefCell<ElementRegistry<WebPlatform>> =
		RefCell::new(ElementRegistry::new(WebPlatform));
}

/// Registers `config` with the document's global custom element registry.
pub fn define_element(config: ElementConfig<WebPlatform>) -> Result<(), RegistrationError> {
	REGISTRY.with(|registry| {
		// `customElements.define` upgrades existing elements synchronously,
		// so a construction hook may try to define another element from here.
		let mut registry = registry.try_borrow_mut().map_err(|_| {
			PlatformError::Script("define_element called from a construction hook".to_string())
		})?;
		registry.register(config)
	})
}

/// Returns `true` if `tag` was registered through [`define_element`].
pub fn is_element_defined(tag: &str) -> bool {
	REGISTRY.with(|registry| {
		registry
			.try_borrow()
			.map(|registry| registry.is_registered(tag))
			.unwrap_or(false)
	})
}

fn install_callbacks(this: &HtmlElement, instance: WebInstance) -> Result<(), JsValue> {
	set_method(this, "_attributeChangedCallback", {
		let instance = Rc::clone(&instance);
		Closure::wrap(Box::new(
			move |name: String, old_value: Option<String>, new_value: Option<String>| {
				instance.react(move |instance| {
					instance.attribute_changed(&name, old_value.as_deref(), new_value.as_deref());
				});
			},
		) as Box<dyn FnMut(String, Option<String>, Option<String>)>)
		.into_js_value()
	})?;

	// The host is passed back by the shim so the instance never holds it.
	set_method(this, "_connectedCallback", {
		let instance = Rc::clone(&instance);
		Closure::wrap(Box::new(move |host: HtmlElement| {
			instance.react(move |instance| instance.connected(&host));
		}) as Box<dyn FnMut(HtmlElement)>)
		.into_js_value()
	})?;

	set_method(this, "_disconnectedCallback", {
		let instance = Rc::clone(&instance);
		Closure::wrap(Box::new(move || {
			instance.react(ElementInstance::disconnected);
		}) as Box<dyn FnMut()>)
		.into_js_value()
	})?;

	set_method(this, "_adoptedCallback", {
		Closure::wrap(Box::new(move || {
			instance.react(ElementInstance::adopted);
		}) as Box<dyn FnMut()>)
		.into_js_value()
	})
}

fn set_method(this: &HtmlElement, name: &str, method: JsValue) -> Result<(), JsValue> {
	js_sys::Reflect::set(this, &JsValue::from_str(name), &method).map(|_| ())
}

fn resolve_base(base: &BaseType) -> Result<js_sys::Function, PlatformError> {
	let window =
		web_sys::window().ok_or_else(|| PlatformError::Script("window is not available".to_string()))?;

	let constructor = match base {
		BaseType::HtmlElement => js_sys::Reflect::get(&window, &JsValue::from_str("HTMLElement")),
		BaseType::Builtin(name) => js_sys::Reflect::get(&window, &JsValue::from_str(name)),
		BaseType::Defined(tag) => Ok(window.custom_elements().get(tag)),
	}
	.map_err(classify)?;

	constructor
		.dyn_into::<js_sys::Function>()
		.map_err(|_| PlatformError::InvalidBase(base.to_string()))
}

fn classify(error: JsValue) -> PlatformError {
	if let Some(exception) = error.dyn_ref::<web_sys::DomException>() {
		let message = exception.message();
		return match exception.name().as_str() {
			"NotSupportedError" => PlatformError::NotSupported(message),
			"SyntaxError" => PlatformError::Syntax(message),
			"InvalidCharacterError" => PlatformError::InvalidCharacter(message),
			name => PlatformError::Script(format!("{name}: {message}")),
		};
	}

	if let Some(error) = error.dyn_ref::<js_sys::Error>() {
		return PlatformError::Script(String::from(error.message()));
	}

	PlatformError::Script(error.as_string().unwrap_or_else(|| format!("{error:?}")))
}

fn to_js_error(error: PlatformError) -> JsValue {
	js_sys::Error::new(&error.to_string()).into()
}

mod js {
	use super::*;

	// JavaScript shim
	#[wasm_bindgen(module = "/src/platform/define_element.js")]
	extern "C" {
		#[wasm_bindgen(catch)]
		pub fn define_custom_element(
			superclass: &js_sys::Function,
			tag_name: &str,
			construct: &JsValue,
			observed_attributes: &js_sys::Array,
			extends_tag: Option<&str>,
		) -> Result<(), JsValue>;
	}
}

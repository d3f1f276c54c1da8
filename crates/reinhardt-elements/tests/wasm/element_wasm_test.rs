//! Browser tests for the `window.customElements` platform.
//!
//! Run with:
//!   wasm-pack test --chrome --headless

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use reinhardt_elements::{
	ElementConfig, Hydratable, HydrationRoot, RegistrationError, WebPlatform, define_element,
	is_element_defined,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Default)]
struct Trace {
	hydrated: Vec<bool>,
	changes: Vec<(String, String, String)>,
}

struct Probe {
	trace: Rc<RefCell<Trace>>,
}

impl Hydratable<WebPlatform> for Probe {
	fn hydrate(&mut self, root: HydrationRoot<'_, WebPlatform>) {
		self.trace.borrow_mut().hydrated.push(root.is_shadow());
	}

	fn on_attribute_changed(&mut self, name: &str, old_value: &str, new_value: &str) {
		self.trace.borrow_mut().changes.push((
			name.to_string(),
			old_value.to_string(),
			new_value.to_string(),
		));
	}
}

fn probe_config(tag: &str, trace: &Rc<RefCell<Trace>>) -> ElementConfig<WebPlatform> {
	let trace = Rc::clone(trace);
	ElementConfig::<WebPlatform>::new(tag, move |_: &HtmlElement| Probe {
		trace: Rc::clone(&trace),
	})
}

fn create(tag: &str) -> HtmlElement {
	web_sys::window()
		.unwrap()
		.document()
		.unwrap()
		.create_element(tag)
		.unwrap()
		.dyn_into::<HtmlElement>()
		.unwrap()
}

#[wasm_bindgen_test]
fn test_shadow_element_hydrates_on_creation() {
	let trace = Rc::new(RefCell::new(Trace::default()));
	define_element(probe_config("wasm-shadow-probe", &trace)).unwrap();

	let element = create("wasm-shadow-probe");

	assert!(is_element_defined("wasm-shadow-probe"));
	assert!(element.shadow_root().is_some());
	assert_eq!(trace.borrow().hydrated, vec![true]);
}

#[wasm_bindgen_test]
fn test_light_element_hydrates_on_first_connection() {
	let trace = Rc::new(RefCell::new(Trace::default()));
	define_element(probe_config("wasm-light-probe", &trace).shadow(false)).unwrap();

	let element = create("wasm-light-probe");
	assert!(trace.borrow().hydrated.is_empty());

	let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
	body.append_child(&element).unwrap();
	body.remove_child(&element).unwrap();
	body.append_child(&element).unwrap();

	assert_eq!(trace.borrow().hydrated, vec![false]);
	element.remove();
}

#[wasm_bindgen_test]
fn test_attribute_changes_forward_strings() {
	let trace = Rc::new(RefCell::new(Trace::default()));
	define_element(probe_config("wasm-attr-probe", &trace).observe(["value"])).unwrap();

	let element = create("wasm-attr-probe");
	element.set_attribute("value", "v1").unwrap();
	element.set_attribute("value", "v2").unwrap();
	element.set_attribute("other", "x").unwrap();

	assert_eq!(
		trace.borrow().changes,
		vec![
			("value".to_string(), String::new(), "v1".to_string()),
			("value".to_string(), "v1".to_string(), "v2".to_string()),
		]
	);
}

#[wasm_bindgen_test]
fn test_duplicate_definition_is_rejected() {
	let trace = Rc::new(RefCell::new(Trace::default()));
	define_element(probe_config("wasm-dup-probe", &trace)).unwrap();

	let err = define_element(probe_config("wasm-dup-probe", &trace)).unwrap_err();

	assert_eq!(
		err,
		RegistrationError::AlreadyRegistered("wasm-dup-probe".to_string())
	);
}

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use reinhardt_elements::{
	ElementConfig, Hydratable, HydrationRoot, MemoryDocument, MemoryElement,
};

/// One observed lifecycle step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	/// Construction hook ran; records whether a shadow root already existed.
	Constructed { shadow_attached: bool },
	/// `hydrate` ran into a shadow root or into the element.
	Hydrated { shadow: bool },
	AttributeChanged {
		name: String,
		old: String,
		new: String,
	},
	Connected,
	Disconnected,
	Adopted,
}

pub type StepLog = Rc<RefCell<Vec<Step>>>;

pub fn step_log() -> StepLog {
	Rc::new(RefCell::new(Vec::new()))
}

/// Component that records every callback and renders one `<span>`.
pub struct Recorder {
	pub document: MemoryDocument,
	pub log: StepLog,
}

impl Hydratable<MemoryDocument> for Recorder {
	fn hydrate(&mut self, root: HydrationRoot<'_, MemoryDocument>) {
		self.log.borrow_mut().push(Step::Hydrated {
			shadow: root.is_shadow(),
		});

		let Ok(span) = self.document.create_element("span") else {
			return;
		};
		match root {
			HydrationRoot::Shadow(shadow) => shadow.append_child(&span),
			HydrationRoot::Light(element) => element.append_child(&span),
		}
	}

	fn on_attribute_changed(&mut self, name: &str, old_value: &str, new_value: &str) {
		self.log.borrow_mut().push(Step::AttributeChanged {
			name: name.to_string(),
			old: old_value.to_string(),
			new: new_value.to_string(),
		});
	}

	fn on_connected(&mut self) {
		self.log.borrow_mut().push(Step::Connected);
	}

	fn on_disconnected(&mut self) {
		self.log.borrow_mut().push(Step::Disconnected);
	}

	fn on_adopted(&mut self) {
		self.log.borrow_mut().push(Step::Adopted);
	}
}

/// Configuration whose construction hook records itself and returns a [`Recorder`].
pub fn recorder_config(
	tag: &str,
	document: &MemoryDocument,
	log: &StepLog,
) -> ElementConfig<MemoryDocument> {
	let document = document.clone();
	let log = Rc::clone(log);
	ElementConfig::<MemoryDocument>::new(tag, move |element: &MemoryElement| {
		log.borrow_mut().push(Step::Constructed {
			shadow_attached: element.shadow_root().is_some(),
		});
		Recorder {
			document: document.clone(),
			log: Rc::clone(&log),
		}
	})
}

pub fn changed(name: &str, old: &str, new: &str) -> Step {
	Step::AttributeChanged {
		name: name.to_string(),
		old: old.to_string(),
		new: new.to_string(),
	}
}

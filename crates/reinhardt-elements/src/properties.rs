//! Attribute-backed component properties.
//!
//! [`ElementProperties`] is a helper a [`Hydratable`](crate::Hydratable)
//! component can embed to keep the current values of its observed
//! attributes and decide when a re-render is due.
//!
//! Shadow-mode components hydrate inside the constructor, before the
//! platform has reported any attribute. Changes reported between that
//! hydration and the first connection are therefore collected and flushed
//! once on connection:
//!
//! ```text
//! Allocated ──hydrate(shadow)──▶ ShadowHydrated ──attr──▶ ShadowAttributesDirty
//!     │                               │                          │
//!     │                            connect                    connect (re-render)
//!     ▼                               ▼                          ▼
//!  hydrate(light) ─▶ Hydrated ──connect──▶ Connected ◀───────────┘
//!                                              │
//!                                            attr (re-render)
//! ```

use std::collections::BTreeMap;

/// Where an element is in its lifecycle, as seen by its properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
	/// Constructed, not hydrated yet.
	#[default]
	Allocated,
	/// Hydrated into the light DOM.
	Hydrated,
	/// Hydrated into a shadow root during construction.
	ShadowHydrated,
	/// Shadow-hydrated, and attributes changed before the first connection.
	ShadowAttributesDirty,
	/// Connected to a document.
	Connected,
}

/// Current observed-attribute values of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementProperties {
	values: BTreeMap<String, String>,
	state: LifecycleState,
}

impl ElementProperties {
	/// Creates empty properties in the [`LifecycleState::Allocated`] state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current lifecycle state.
	pub fn state(&self) -> LifecycleState {
		self.state
	}

	/// Records an attribute value; `None` removes the attribute. An empty
	/// value is kept, as boolean attributes such as `disabled=""` rely on it.
	///
	/// Returns `true` when the element is connected and should re-render now.
	pub fn apply(&mut self, name: &str, value: Option<&str>) -> bool {
		match value {
			Some(value) => {
				self.values.insert(name.to_string(), value.to_string());
			}
			None => {
				self.values.remove(name);
			}
		}

		match self.state {
			LifecycleState::ShadowHydrated => {
				self.state = LifecycleState::ShadowAttributesDirty;
				false
			}
			LifecycleState::Connected => true,
			_ => false,
		}
	}

	/// Records that the component has hydrated.
	pub fn mark_hydrated(&mut self, shadow: bool) {
		self.state = if shadow {
			LifecycleState::ShadowHydrated
		} else {
			LifecycleState::Hydrated
		};
	}

	/// Records a connection. Returns `true` when changes collected before the
	/// first connection still need to be rendered.
	pub fn mark_connected(&mut self) -> bool {
		let flush = self.state == LifecycleState::ShadowAttributesDirty;
		self.state = LifecycleState::Connected;
		flush
	}

	/// Value of an attribute.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// All values, sorted by attribute name.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Number of attributes with a value.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns `true` if no attribute has a value.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_apply_and_remove() {
		let mut props = ElementProperties::new();
		props.apply("label", Some("Save"));
		props.apply("icon", Some("disk"));
		assert_eq!(props.get("label"), Some("Save"));
		assert_eq!(props.len(), 2);

		props.apply("label", None);
		assert_eq!(props.get("label"), None);
		assert_eq!(props.iter().collect::<Vec<_>>(), vec![("icon", "disk")]);
	}

	#[rstest]
	fn test_empty_value_is_kept() {
		let mut props = ElementProperties::new();
		props.apply("disabled", Some(""));
		assert_eq!(props.get("disabled"), Some(""));
		assert!(!props.is_empty());

		props.apply("disabled", None);
		assert!(props.is_empty());
	}

	#[rstest]
	fn test_shadow_changes_before_connection_are_flushed_once() {
		let mut props = ElementProperties::new();
		props.mark_hydrated(true);
		assert_eq!(props.state(), LifecycleState::ShadowHydrated);

		assert!(!props.apply("count", Some("1")));
		assert_eq!(props.state(), LifecycleState::ShadowAttributesDirty);

		assert!(props.mark_connected());
		assert!(!props.mark_connected());
	}

	#[rstest]
	fn test_shadow_connection_without_changes_needs_no_flush() {
		let mut props = ElementProperties::new();
		props.mark_hydrated(true);
		assert!(!props.mark_connected());
	}

	#[rstest]
	#[case(LifecycleState::Allocated, false)]
	#[case(LifecycleState::Hydrated, false)]
	#[case(LifecycleState::Connected, true)]
	fn test_apply_rerender_decision(#[case] state: LifecycleState, #[case] rerender: bool) {
		let mut props = ElementProperties {
			values: BTreeMap::new(),
			state,
		};
		assert_eq!(props.apply("x", Some("y")), rerender);
		assert_eq!(props.state(), state);
	}
}

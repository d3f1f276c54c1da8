//! Error types for custom element registration.
//!
//! Two layers are distinguished:
//!
//! - [`PlatformError`]: failures reported by the host element registry
//!   (the browser's `customElements`, or [`MemoryDocument`](crate::MemoryDocument)).
//! - [`RegistrationError`]: failures reported by
//!   [`ElementRegistry::register`](crate::ElementRegistry::register), which
//!   validates locally before delegating and wraps platform failures.

use thiserror::Error;

/// A failure reported by the host element platform.
///
/// The variants follow the DOM exception names raised by
/// `CustomElementRegistry.define()`, `Element.attachShadow()` and
/// `Element.setAttribute()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
	/// `NotSupportedError`: duplicate definition, bad `extends`, or a second shadow root.
	#[error("NotSupportedError: {0}")]
	NotSupported(String),
	/// `SyntaxError`: the name is not a valid custom element name.
	#[error("SyntaxError: {0}")]
	Syntax(String),
	/// `InvalidCharacterError`: the name is not a valid attribute name.
	#[error("InvalidCharacterError: {0}")]
	InvalidCharacter(String),
	/// The base type cannot be extended by a custom element.
	#[error("invalid base class: {0}")]
	InvalidBase(String),
	/// Any other host failure, carried as text.
	#[error("platform error: {0}")]
	Script(String),
}

/// A failure of [`ElementRegistry::register`](crate::ElementRegistry::register).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
	/// The tag is already defined, either through this registry or directly on the platform.
	#[error("custom element `{0}` is already registered")]
	AlreadyRegistered(String),
	/// The tag is not a valid custom element name.
	#[error("`{tag}` is not a valid custom element name: {reason}")]
	InvalidTagName {
		/// The rejected tag.
		tag: String,
		/// Which naming rule was violated.
		reason: &'static str,
	},
	/// The `extends` tag does not name a built-in element.
	#[error("custom element `{tag}` cannot extend `{extends}`")]
	InvalidExtends {
		/// The tag being defined.
		tag: String,
		/// The rejected `extends` tag.
		extends: String,
	},
	/// The platform rejected the definition.
	#[error(transparent)]
	Platform(#[from] PlatformError),
}

//! Custom element names.
//!
//! A [`TagName`] can only be built from a *valid custom element name* as
//! defined by the HTML standard: it starts with a lowercase ASCII letter,
//! contains a hyphen, contains no uppercase ASCII letters, uses only
//! `PotentialCustomElementName` characters and is not one of the reserved
//! SVG/MathML names.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistrationError;

/// Hyphenated names already used by SVG and MathML.
const RESERVED_NAMES: [&str; 8] = [
	"annotation-xml",
	"color-profile",
	"font-face",
	"font-face-src",
	"font-face-uri",
	"font-face-format",
	"font-face-name",
	"missing-glyph",
];

/// A validated custom element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
	/// Parses and validates a custom element name.
	///
	/// # Example
	///
	/// ```
	/// use reinhardt_elements::TagName;
	///
	/// assert!(TagName::parse("user-card").is_ok());
	/// assert!(TagName::parse("usercard").is_err());
	/// ```
	pub fn parse(name: &str) -> Result<Self, RegistrationError> {
		validate(name).map_err(|reason| RegistrationError::InvalidTagName {
			tag: name.to_string(),
			reason,
		})?;
		Ok(Self(name.to_string()))
	}

	/// Returns the name as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Consumes the name, returning the inner string.
	pub fn into_string(self) -> String {
		self.0
	}
}

impl fmt::Display for TagName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for TagName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for TagName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl TryFrom<String> for TagName {
	type Error = RegistrationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		match validate(&value) {
			Ok(()) => Ok(Self(value)),
			Err(reason) => Err(RegistrationError::InvalidTagName { tag: value, reason }),
		}
	}
}

impl From<TagName> for String {
	fn from(tag: TagName) -> Self {
		tag.0
	}
}

/// Returns `true` if `name` is a valid custom element name.
pub fn is_valid_custom_element_name(name: &str) -> bool {
	validate(name).is_ok()
}

/// Returns `true` if `name` can be the local name of a built-in element
/// that a customized built-in extends (`button`, `h1`, `ul`, ...).
pub fn is_builtin_local_name(name: &str) -> bool {
	let mut chars = name.chars();
	matches!(chars.next(), Some(first) if first.is_ascii_lowercase())
		&& chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn validate(name: &str) -> Result<(), &'static str> {
	match name.chars().next() {
		None => return Err("must not be empty"),
		Some(first) if !first.is_ascii_lowercase() => {
			return Err("must start with a lowercase ASCII letter");
		}
		Some(_) => {}
	}
	if !name.contains('-') {
		return Err("must contain a hyphen");
	}
	if name.chars().any(|c| c.is_ascii_uppercase()) {
		return Err("must not contain uppercase ASCII letters");
	}
	if !name.chars().all(is_name_char) {
		return Err("contains a character that is not allowed in element names");
	}
	if RESERVED_NAMES.contains(&name) {
		return Err("is reserved by SVG or MathML");
	}
	Ok(())
}

// PCENChar production from the HTML standard.
fn is_name_char(c: char) -> bool {
	matches!(c,
		'-' | '.' | '0'..='9' | '_' | 'a'..='z'
		| '\u{B7}'
		| '\u{C0}'..='\u{D6}'
		| '\u{D8}'..='\u{F6}'
		| '\u{F8}'..='\u{37D}'
		| '\u{37F}'..='\u{1FFF}'
		| '\u{200C}'..='\u{200D}'
		| '\u{203F}'..='\u{2040}'
		| '\u{2070}'..='\u{218F}'
		| '\u{2C00}'..='\u{2FEF}'
		| '\u{3001}'..='\u{D7FF}'
		| '\u{F900}'..='\u{FDCF}'
		| '\u{FDF0}'..='\u{FFFD}'
		| '\u{10000}'..='\u{EFFFF}'
	)
}

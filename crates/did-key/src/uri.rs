//! Generic `did:<method>:<method-specific-id>` syntax, independent of any
//! particular method.

use std::{fmt::Display, str::FromStr};

/// Helper type to access data in the method-specific-id of a [`DidUri`].
pub struct MethodSpecificId<'a>(&'a DidUri);

impl MethodSpecificId<'_> {
	pub fn as_str(&self) -> &str {
		&(self.0.as_str()[self.0.method_specific_id.clone()])
	}

	pub fn as_slice(&self) -> &[u8] {
		self.as_str().as_bytes()
	}
}

#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub struct DidUri {
	/// The string representation of the DID.
	s: String,
	/// The substring for the method name. This is a range index into `s`.
	method: std::ops::Range<usize>,
	/// The substring for method-specific-id. This is a range index into `s`.
	method_specific_id: std::ops::RangeFrom<usize>,
}

impl DidUri {
	pub const SCHEME: &'static str = "did:";

	/// Gets the buffer representing the uri as a str.
	pub fn as_str(&self) -> &str {
		&self.s
	}

	/// Gets the buffer representing the uri as a byte slice.
	pub fn as_slice(&self) -> &[u8] {
		self.s.as_bytes()
	}

	/// The method of the did, such as `key` or `web`.
	pub fn method(&self) -> &str {
		&self.s[self.method.clone()]
	}

	/// Method-specific identity info.
	pub fn method_specific_id(&self) -> MethodSpecificId<'_> {
		MethodSpecificId(self)
	}

	pub fn into_inner(self) -> String {
		self.s
	}
}

/// Splits `s` into the byte ranges of its method and method-specific-id.
fn split(
	s: &str,
) -> Result<(std::ops::Range<usize>, std::ops::RangeFrom<usize>), ParseError> {
	let (method, remaining) = s
		.strip_prefix(DidUri::SCHEME)
		.ok_or(ParseError::InvalidScheme)?
		.split_once(':')
		.ok_or(ParseError::MissingMethod)?;
	if method.is_empty() {
		return Err(ParseError::MissingMethod);
	}
	// did-core restricts method names to lowercase letters and digits.
	if !method
		.bytes()
		.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
	{
		return Err(ParseError::InvalidMethod(method.to_owned()));
	}
	if remaining.is_empty() {
		return Err(ParseError::MissingMethodSpecificId);
	}
	let method_start = DidUri::SCHEME.len();
	let start_idx = s.len() - remaining.len();

	Ok((method_start..method_start + method.len(), start_idx..))
}

impl FromStr for DidUri {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::try_from(s.to_owned())
	}
}

impl TryFrom<String> for DidUri {
	type Error = ParseError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		let (method, method_specific_id) = split(&s)?;

		Ok(DidUri {
			s,
			method,
			method_specific_id,
		})
	}
}

impl Display for DidUri {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ParseError {
	#[error("expected the did: scheme")]
	InvalidScheme,
	#[error("expected did:method, but method was not present")]
	MissingMethod,
	#[error("method name {0:?} may only contain lowercase letters and digits")]
	InvalidMethod(String),
	#[error("expected did:method:id, but the method-specific-id was empty")]
	MissingMethodSpecificId,
}

//! An implementation of the [did:key] method.
//!
//! [did:key]: https://w3c-ccg.github.io/did-method-key/

use std::{fmt::Display, str::FromStr};

use crate::{
	codec::EncodedKey,
	document::DidDocument,
	error::{Error, Result},
	key_algos::KeyType,
	multibase,
	uri::{self, DidUri},
};

/// An implementation of the `did:key` method. See the [module](self) docs for more
/// info.
///
/// A `DidKey` is derived entirely from its public key, so two `DidKey`s are
/// equal exactly when their keys are.
#[derive(Debug, Eq, PartialEq, Hash, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DidKey {
	/// The string representation of the DID.
	s: String,
	/// The decoded multibase portion of the DID.
	decoded: EncodedKey,
}

impl DidKey {
	pub const PREFIX: &'static str = "did:key:";
	pub const METHOD: &'static str = "key";

	/// Builds the `did:key` for a raw public key.
	pub fn from_public_key(key_type: KeyType, public_key: &[u8]) -> Result<Self> {
		let decoded = EncodedKey::encode(key_type, public_key)?;
		let s = format!("{}{}", Self::PREFIX, multibase::encode(decoded.as_slice()));
		Ok(Self { s, decoded })
	}

	/// Gets the buffer representing the did:key uri as a str.
	pub fn as_str(&self) -> &str {
		&self.s
	}

	/// Gets the buffer representing the did:key uri as a byte slice.
	pub fn as_slice(&self) -> &[u8] {
		self.s.as_bytes()
	}

	/// The multibase encoded key, which is everything after `did:key:`.
	pub fn multibase(&self) -> &str {
		&self.s[Self::PREFIX.len()..]
	}

	pub fn key_type(&self) -> KeyType {
		self.decoded.key_type()
	}

	/// The raw public key bytes.
	pub fn public_key(&self) -> &[u8] {
		self.decoded.public_key()
	}

	/// The multicodec prefixed public key.
	pub fn encoded(&self) -> &EncodedKey {
		&self.decoded
	}

	/// The DID document that this `did:key` expands to.
	pub fn document(&self) -> DidDocument {
		DidDocument::build(self)
	}

	pub fn into_string(self) -> String {
		self.s
	}
}

impl TryFrom<DidUri> for DidKey {
	type Error = Error;

	fn try_from(value: DidUri) -> Result<Self, Self::Error> {
		let m = value.method();
		if m != Self::METHOD {
			return Err(MalformedIdentifierError::WrongMethod(m.to_owned()).into());
		}
		debug_assert_eq!(
			value.as_slice().len() - value.method_specific_id().as_slice().len(),
			Self::PREFIX.len(),
			"sanity check that prefix has expected length"
		);

		// Decode and inspect the binary prefix, rather than trusting the text.
		let decoded = multibase::decode(value.method_specific_id().as_str())?;
		let decoded = EncodedKey::decode(decoded)?;

		Ok(Self {
			s: value.into_inner(),
			decoded,
		})
	}
}

impl FromStr for DidKey {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::try_from(DidUri::from_str(s)?)
	}
}

impl TryFrom<String> for DidKey {
	type Error = Error;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		Self::try_from(DidUri::try_from(s)?)
	}
}

impl From<DidKey> for String {
	fn from(value: DidKey) -> Self {
		value.into_string()
	}
}

impl AsRef<str> for DidKey {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}

impl Display for DidKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}

/// The text was not shaped like `did:key:z<base58-btc>`.
#[derive(thiserror::Error, Debug)]
pub enum MalformedIdentifierError {
	#[error("malformed did: {0}")]
	Uri(#[from] uri::ParseError),
	#[error("Expected \"key\" method but got {0:?}")]
	WrongMethod(String),
	#[error(transparent)]
	MultibaseDecode(#[from] multibase::DecodeError),
}

#[cfg(test)]
mod test {
	use super::*;

	use crate::varint::DecodeError;
	use eyre::WrapErr;
	use hex_literal::hex;

	// From: https://w3c-ccg.github.io/did-method-key/#example-5
	fn ed25519_examples() -> &'static [&'static str] {
		&[
			"did:key:z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp",
			"did:key:z6MkjchhfUsD6mmvni8mCdXHw216Xrm9bQe2mBH1P5RDjVJG",
			"did:key:z6MknGc3ocHs3zdPiJbnaaqDi58NGb4pk1Sp9WxWufuXSdxf",
		]
	}

	#[test]
	fn test_try_from_uri() -> eyre::Result<()> {
		for &example in ed25519_examples() {
			let uri = DidUri::from_str(example)
				.wrap_err_with(|| format!("failed to parse DidUri from {example}"))?;
			assert_eq!(example, uri.as_str());
			let key_from_uri = DidKey::try_from(uri.clone())
				.wrap_err_with(|| format!("failed to parse DidKey from {uri}"))?;
			assert_eq!(example, key_from_uri.as_str());
			assert_eq!(key_from_uri.key_type(), KeyType::Ed25519);
			assert_eq!(key_from_uri.public_key().len(), 32);
		}
		Ok(())
	}

	#[test]
	fn test_from_public_key_roundtrips_parse() -> eyre::Result<()> {
		for &example in ed25519_examples() {
			let parsed = DidKey::from_str(example)?;
			let rebuilt = DidKey::from_public_key(parsed.key_type(), parsed.public_key())?;
			assert_eq!(parsed, rebuilt);
			assert_eq!(rebuilt.to_string(), example);
		}
		Ok(())
	}

	#[test]
	fn test_known_secp256k1_key() -> eyre::Result<()> {
		let public_key =
			hex!("02ea6e94e3a2abad1b0ad4a0c8b4d5c2e4d2f58c2a0f9f7bf0a4e7a1b2c3d4e5f6");
		let did = DidKey::from_public_key(KeyType::Secp256k1, &public_key)?;
		assert!(did.as_str().starts_with("did:key:zQ3s"));
		assert_eq!(did.multibase(), &did.as_str()[DidKey::PREFIX.len()..]);

		let parsed: DidKey = did.as_str().parse()?;
		assert_eq!(parsed.key_type(), KeyType::Secp256k1);
		assert_eq!(parsed.public_key(), public_key);
		Ok(())
	}

	#[test]
	fn test_deterministic() -> eyre::Result<()> {
		let key = [42; 32];
		assert_eq!(
			DidKey::from_public_key(KeyType::Ed25519, &key)?,
			DidKey::from_public_key(KeyType::Ed25519, &key)?
		);
		Ok(())
	}

	#[test]
	fn test_malformed() {
		for s in [
			"not-a-did",
			"did:key:",
			"did:key",
			"did:web:example.com",
			"did:key:6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp",
			"did:key:z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp#0",
			"did:key:z",
		] {
			let result = DidKey::from_str(s);
			assert!(
				matches!(result, Err(Error::MalformedIdentifier(_))),
				"expected {s:?} to be malformed, but got {result:?}"
			);
		}
	}

	#[test]
	fn test_unrecognized_prefix() {
		// A lone continuation byte can never be a complete varint.
		let s = format!("{}{}", DidKey::PREFIX, multibase::encode(&[0xed]));
		assert!(matches!(
			DidKey::from_str(&s),
			Err(Error::UnrecognizedIdentifierPrefix(DecodeError::MissingBytes))
		));
	}

	#[test]
	fn test_unsupported_multicodec() {
		// x25519 keys are valid did:keys, but are only used for key agreement.
		let mut bytes = vec![0xec, 0x01];
		bytes.extend_from_slice(&[9; 32]);
		let s = format!("{}{}", DidKey::PREFIX, multibase::encode(&bytes));
		assert!(matches!(
			DidKey::from_str(&s),
			Err(Error::UnsupportedKeyType(_))
		));
	}

	#[test]
	fn test_truncated_key() {
		let did = DidKey::from_public_key(KeyType::Ed25519, &[1; 32]).unwrap();
		let truncated = &did.encoded().as_slice()[..33];
		let s = format!("{}{}", DidKey::PREFIX, multibase::encode(truncated));
		assert!(matches!(
			DidKey::from_str(&s),
			Err(Error::InvalidKeyLength {
				key_type: KeyType::Ed25519,
				expected: 32,
				actual: 31
			})
		));
	}

	#[test]
	fn test_serde_as_string() -> eyre::Result<()> {
		let example = ed25519_examples()[0];
		let did: DidKey = serde_json::from_value(serde_json::json!(example))?;
		assert_eq!(serde_json::to_value(&did)?, serde_json::json!(example));
		assert!(serde_json::from_value::<DidKey>(serde_json::json!("did:key:")).is_err());
		Ok(())
	}
}

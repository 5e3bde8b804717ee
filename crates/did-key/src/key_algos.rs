use std::{fmt::Display, str::FromStr};

use crate::{
	document::VerificationMethodType,
	error::Error,
	varint::{encode_varint, VarintEncoding},
};

/// The public key algorithms that a `did:key` can be built from.
#[derive(
	Debug, Eq, PartialEq, Hash, Clone, Copy, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
	Ed25519,
	Secp256k1,
}

impl KeyType {
	/// Every supported key type, in multicodec lookup order.
	pub const ALL: [Self; 2] = [Self::Ed25519, Self::Secp256k1];

	pub const fn pub_key_len(&self) -> usize {
		match self {
			Self::Ed25519 => Ed25519::PUB_KEY_LEN,
			Self::Secp256k1 => Secp256k1::PUB_KEY_LEN,
		}
	}

	pub const fn priv_key_len(&self) -> usize {
		match self {
			Self::Ed25519 => Ed25519::PRIV_KEY_LEN,
			Self::Secp256k1 => Secp256k1::PRIV_KEY_LEN,
		}
	}

	/// The multicodec table entry for public keys of this type.
	pub const fn multicodec_value(&self) -> u16 {
		match self {
			Self::Ed25519 => Ed25519::MULTICODEC_VALUE,
			Self::Secp256k1 => Secp256k1::MULTICODEC_VALUE,
		}
	}

	/// The varint encoded [`Self::multicodec_value`], which prefixes the raw
	/// public key in a `did:key`.
	pub const fn multicodec_prefix(&self) -> VarintEncoding {
		match self {
			Self::Ed25519 => Ed25519::MULTICODEC_PREFIX,
			Self::Secp256k1 => Secp256k1::MULTICODEC_PREFIX,
		}
	}

	pub const fn verification_method_type(&self) -> VerificationMethodType {
		match self {
			Self::Ed25519 => Ed25519::VERIFICATION_METHOD_TYPE,
			Self::Secp256k1 => Secp256k1::VERIFICATION_METHOD_TYPE,
		}
	}

	pub const fn name(&self) -> &'static str {
		match self {
			Self::Ed25519 => Ed25519::NAME,
			Self::Secp256k1 => Secp256k1::NAME,
		}
	}

	/// Looks up the key type registered under a multicodec value.
	pub fn from_multicodec(value: u16) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|key_type| key_type.multicodec_value() == value)
	}
}

impl FromStr for KeyType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|key_type| key_type.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnsupportedKeyType(s.to_owned()))
	}
}

impl Display for KeyType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.name().fmt(f)
	}
}

// ---- internal code ----

/// A key algorithm that is known statically, at compile time.
pub(crate) trait StaticKeyAlgo {
	const NAME: &'static str;
	const PUB_KEY_LEN: usize;
	const PRIV_KEY_LEN: usize;
	const MULTICODEC_VALUE: u16;
	const MULTICODEC_PREFIX: VarintEncoding = encode_varint(Self::MULTICODEC_VALUE);
	const VERIFICATION_METHOD_TYPE: VerificationMethodType;
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub(crate) struct Ed25519;

impl StaticKeyAlgo for Ed25519 {
	const NAME: &'static str = "ed25519";
	const PUB_KEY_LEN: usize = 32;
	const PRIV_KEY_LEN: usize = 32;
	const MULTICODEC_VALUE: u16 = 0xED;
	const VERIFICATION_METHOD_TYPE: VerificationMethodType =
		VerificationMethodType::Ed25519VerificationKey2020;
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub(crate) struct Secp256k1;

impl StaticKeyAlgo for Secp256k1 {
	const NAME: &'static str = "secp256k1";
	/// SEC1 compressed point.
	const PUB_KEY_LEN: usize = 33;
	const PRIV_KEY_LEN: usize = 32;
	const MULTICODEC_VALUE: u16 = 0xE7;
	const VERIFICATION_METHOD_TYPE: VerificationMethodType =
		VerificationMethodType::EcdsaSecp256k1VerificationKey2019;
}

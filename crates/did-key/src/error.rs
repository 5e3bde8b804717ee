use crate::{
	key_algos::KeyType, methods::key::MalformedIdentifierError, multibase,
	uri, varint,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while encoding, parsing, or deriving a
/// `did:key`. None of these are transient.
#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("unsupported key type: {0}")]
	UnsupportedKeyType(String),
	#[error(
		"invalid key length for {key_type}. Expected {expected} bytes, got {actual}"
	)]
	InvalidKeyLength {
		key_type: KeyType,
		expected: usize,
		actual: usize,
	},
	#[error(transparent)]
	MalformedIdentifier(#[from] MalformedIdentifierError),
	#[error("multibase text does not start with a known multicodec prefix: {0}")]
	UnrecognizedIdentifierPrefix(#[from] varint::DecodeError),
	#[error("the provided bytes are not a valid {0} private key")]
	InvalidPrivateKey(KeyType),
}

impl From<uri::ParseError> for Error {
	fn from(value: uri::ParseError) -> Self {
		Self::MalformedIdentifier(value.into())
	}
}

impl From<multibase::DecodeError> for Error {
	fn from(value: multibase::DecodeError) -> Self {
		Self::MalformedIdentifier(value.into())
	}
}


//! Conversion between raw public keys and their [multicodec] prefixed form.
//!
//! [multicodec]: https://github.com/multiformats/multicodec

use crate::{
	error::{Error, Result},
	key_algos::KeyType,
	varint::decode_varint,
};

/// A public key, prefixed with the varint multicodec value of its [`KeyType`].
///
/// The length of the key that follows the prefix always matches
/// [`KeyType::pub_key_len`].
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub struct EncodedKey {
	key_type: KeyType,
	bytes: Vec<u8>,
}

impl EncodedKey {
	/// Prefixes `raw` with the multicodec value for `key_type`.
	pub fn encode(key_type: KeyType, raw: &[u8]) -> Result<Self> {
		check_key_len(key_type, raw.len())?;
		let prefix = key_type.multicodec_prefix();
		let mut bytes = Vec::with_capacity(prefix.len() + raw.len());
		bytes.extend_from_slice(prefix.as_slice());
		bytes.extend_from_slice(raw);

		Ok(Self { key_type, bytes })
	}

	/// Reads the multicodec prefix of `bytes` and validates the length of the
	/// key that follows it.
	pub fn decode(bytes: Vec<u8>) -> Result<Self> {
		let (key_type, prefix_len) = read_prefix(&bytes)?;
		check_key_len(key_type, bytes.len() - prefix_len)?;

		Ok(Self { key_type, bytes })
	}

	pub fn key_type(&self) -> KeyType {
		self.key_type
	}

	/// The raw public key, without its multicodec prefix.
	pub fn public_key(&self) -> &[u8] {
		&self.bytes[self.key_type.multicodec_prefix().len()..]
	}

	/// The full prefixed buffer.
	pub fn as_slice(&self) -> &[u8] {
		&self.bytes
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.bytes
	}
}

impl AsRef<[u8]> for EncodedKey {
	fn as_ref(&self) -> &[u8] {
		self.as_slice()
	}
}

/// Identifies the [`KeyType`] from the leading bytes of a multicodec prefixed
/// key. Only the prefix needs to be present.
pub fn identify_key_type(encoded: &[u8]) -> Result<KeyType> {
	read_prefix(encoded).map(|(key_type, _)| key_type)
}

fn read_prefix(encoded: &[u8]) -> Result<(KeyType, usize)> {
	let (codec, prefix_len) = decode_varint(encoded)?;
	let key_type = KeyType::from_multicodec(codec).ok_or_else(|| {
		Error::UnsupportedKeyType(format!("multicodec value {codec:#x}"))
	})?;
	Ok((key_type, prefix_len))
}

fn check_key_len(key_type: KeyType, actual: usize) -> Result<()> {
	let expected = key_type.pub_key_len();
	if actual != expected {
		return Err(Error::InvalidKeyLength {
			key_type,
			expected,
			actual,
		});
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;

	use crate::varint::DecodeError;
	use itertools::Itertools as _;

	#[test]
	fn test_encode_prepends_prefix() {
		let raw = [7u8; 32];
		let encoded = EncodedKey::encode(KeyType::Ed25519, &raw).unwrap();
		assert_eq!(&encoded.as_slice()[..2], &[0xed, 0x01]);
		assert_eq!(encoded.public_key(), raw);
		assert_eq!(encoded.as_slice().len(), 34);

		let raw = [2u8; 33];
		let encoded = EncodedKey::encode(KeyType::Secp256k1, &raw).unwrap();
		assert_eq!(&encoded.as_slice()[..2], &[0xe7, 0x01]);
		assert_eq!(encoded.public_key(), raw);
	}

	#[test]
	fn test_encode_rejects_wrong_lengths() {
		let lengths = [0, 1, 31, 32, 33, 34, 64];
		for (key_type, len) in KeyType::ALL.into_iter().cartesian_product(lengths) {
			let result = EncodedKey::encode(key_type, &vec![0; len]);
			if len == key_type.pub_key_len() {
				assert!(result.is_ok(), "{key_type} with {len} bytes should encode");
				continue;
			}
			assert!(
				matches!(
					result,
					Err(Error::InvalidKeyLength { key_type: k, expected, actual })
						if k == key_type && expected == key_type.pub_key_len() && actual == len
				),
				"{key_type} with {len} bytes should be rejected, got {result:?}"
			);
		}
	}

	#[test]
	fn test_decode_roundtrips_encode() {
		for key_type in KeyType::ALL {
			let raw: Vec<u8> = (0..key_type.pub_key_len() as u8).collect();
			let encoded = EncodedKey::encode(key_type, &raw).unwrap();
			let decoded = EncodedKey::decode(encoded.clone().into_inner()).unwrap();
			assert_eq!(decoded, encoded);
			assert_eq!(decoded.key_type(), key_type);
			assert_eq!(decoded.public_key(), raw);
		}
	}

	#[test]
	fn test_decode_rejects_truncated_key() {
		let mut bytes = vec![0xed, 0x01];
		bytes.extend_from_slice(&[0; 31]);
		assert!(matches!(
			EncodedKey::decode(bytes),
			Err(Error::InvalidKeyLength {
				key_type: KeyType::Ed25519,
				expected: 32,
				actual: 31
			})
		));
	}

	#[test]
	fn test_identify_key_type() {
		assert_eq!(identify_key_type(&[0xed, 0x01]).unwrap(), KeyType::Ed25519);
		assert_eq!(
			identify_key_type(&[0xe7, 0x01, 0x02]).unwrap(),
			KeyType::Secp256k1
		);
		assert!(matches!(
			identify_key_type(&[0xec, 0x01]),
			Err(Error::UnsupportedKeyType(_))
		));
		assert!(matches!(
			identify_key_type(&[0xed]),
			Err(Error::UnrecognizedIdentifierPrefix(DecodeError::MissingBytes))
		));
		assert!(matches!(
			identify_key_type(&[]),
			Err(Error::UnrecognizedIdentifierPrefix(DecodeError::MissingBytes))
		));
	}
}

//! Key material for the key types that a `did:key` can hold.
//!
//! The curve arithmetic lives in the `ed25519-dalek` and `k256` crates. This
//! module only adapts them to the raw byte representations that a `did:key`
//! deals in.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
	error::{Error, Result},
	key_algos::KeyType,
};

#[cfg(feature = "ed25519")]
pub mod ed25519;
#[cfg(feature = "secp256k1")]
pub mod secp256k1;

// Re-exports
#[cfg(feature = "random")]
pub use rand_core;

/// Supplies private keys, and derives public keys from them.
///
/// Implementations must be usable from many threads at once, which in
/// practice means the randomness source must be thread safe.
pub trait KeyMaterialProvider: std::fmt::Debug + Send + Sync {
	/// Generates a fresh private key of the given type.
	fn random_private_key(&self, key_type: KeyType) -> Result<PrivateKey>;

	/// Derives the public key for `private_key`, in the form that a `did:key`
	/// encodes (see [`KeyType::pub_key_len`]).
	fn public_key_from_private_key(
		&self,
		key_type: KeyType,
		private_key: &[u8],
	) -> Result<Vec<u8>>;
}

/// A [`KeyMaterialProvider`] backed by the operating system's randomness.
///
/// Key types whose cargo feature is disabled are reported as
/// [`Error::UnsupportedKeyType`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OsKeyMaterial;

impl KeyMaterialProvider for OsKeyMaterial {
	fn random_private_key(&self, key_type: KeyType) -> Result<PrivateKey> {
		match key_type {
			#[cfg(all(feature = "ed25519", feature = "random"))]
			KeyType::Ed25519 => Ok(ed25519::random_private_key()),
			#[cfg(all(feature = "secp256k1", feature = "random"))]
			KeyType::Secp256k1 => Ok(secp256k1::random_private_key()),
			#[allow(unreachable_patterns)]
			unsupported => Err(Error::UnsupportedKeyType(unsupported.to_string())),
		}
	}

	fn public_key_from_private_key(
		&self,
		key_type: KeyType,
		private_key: &[u8],
	) -> Result<Vec<u8>> {
		match key_type {
			#[cfg(feature = "ed25519")]
			KeyType::Ed25519 => ed25519::public_key(private_key),
			#[cfg(feature = "secp256k1")]
			KeyType::Secp256k1 => secp256k1::public_key(private_key),
			#[allow(unreachable_patterns)]
			unsupported => {
				let _ = private_key;
				Err(Error::UnsupportedKeyType(unsupported.to_string()))
			}
		}
	}
}

/// Private key bytes. Zeroed on drop, and never printed.
#[derive(Clone, Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(Vec<u8>);

impl PrivateKey {
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}
}

impl From<Vec<u8>> for PrivateKey {
	fn from(value: Vec<u8>) -> Self {
		Self(value)
	}
}

impl From<&[u8]> for PrivateKey {
	fn from(value: &[u8]) -> Self {
		Self(value.to_vec())
	}
}

impl AsRef<[u8]> for PrivateKey {
	fn as_ref(&self) -> &[u8] {
		self.as_slice()
	}
}

impl std::fmt::Debug for PrivateKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("PrivateKey(<redacted>)")
	}
}

fn _assert_bounds(p: OsKeyMaterial) {
	fn helper(_p: impl KeyMaterialProvider + Clone + 'static) {}
	helper(p)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_private_key_debug_is_redacted() {
		let key = PrivateKey::from(vec![0xab; 32]);
		let printed = format!("{key:?}");
		assert!(!printed.contains("ab"), "{printed}");
		assert!(!printed.contains("171"), "{printed}");
	}

	#[cfg(all(feature = "random", feature = "ed25519", feature = "secp256k1"))]
	#[test]
	fn test_random_keys_derive_public_keys() {
		for key_type in KeyType::ALL {
			let private_key = OsKeyMaterial.random_private_key(key_type).unwrap();
			assert_eq!(private_key.as_slice().len(), key_type.priv_key_len());
			let public_key = OsKeyMaterial
				.public_key_from_private_key(key_type, private_key.as_slice())
				.unwrap();
			assert_eq!(public_key.len(), key_type.pub_key_len());
		}
	}

	#[cfg(all(feature = "random", feature = "ed25519", feature = "secp256k1"))]
	#[test]
	fn test_random_keys_are_distinct() {
		for key_type in KeyType::ALL {
			let a = OsKeyMaterial.random_private_key(key_type).unwrap();
			let b = OsKeyMaterial.random_private_key(key_type).unwrap();
			assert_ne!(a, b);
		}
	}
}

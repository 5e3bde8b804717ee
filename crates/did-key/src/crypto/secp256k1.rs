use k256::{elliptic_curve::sec1::ToEncodedPoint as _, SecretKey};

use crate::{
	error::{Error, Result},
	key_algos::{KeyType, Secp256k1, StaticKeyAlgo as _},
};

#[cfg(feature = "random")]
pub(crate) fn random_private_key() -> super::PrivateKey {
	let secret_key = SecretKey::random(&mut rand_core::OsRng);
	super::PrivateKey::from(&secret_key.to_bytes()[..])
}

/// Derives the SEC1 compressed public key for a 32 byte big-endian scalar.
///
/// Zero, and scalars not less than the curve order, are rejected.
pub fn public_key(private_key: &[u8]) -> Result<Vec<u8>> {
	if private_key.len() != Secp256k1::PRIV_KEY_LEN {
		return Err(Error::InvalidPrivateKey(KeyType::Secp256k1));
	}
	let secret_key = SecretKey::from_slice(private_key)
		.map_err(|_| Error::InvalidPrivateKey(KeyType::Secp256k1))?;
	let encoded = secret_key.public_key().to_encoded_point(true);
	debug_assert_eq!(encoded.len(), Secp256k1::PUB_KEY_LEN);
	Ok(encoded.as_bytes().to_vec())
}

#[cfg(test)]
mod test {
	use super::*;

	use hex_literal::hex;

	#[test]
	fn test_generator_point() {
		// The private key 1 maps to the generator point G.
		let mut one = [0; 32];
		one[31] = 1;
		let expected = hex!(
			"02 79be667ef9dcbbac55a06295ce870b07 029bfcdb2dce28d959f2815b16f81798"
		);
		assert_eq!(public_key(&one).unwrap(), expected);
	}

	#[test]
	fn test_rejects_invalid_scalars() {
		let order = hex!(
			"fffffffffffffffffffffffffffffffe baaedce6af48a03bbfd25e8cd0364141"
		);
		for invalid in [[0; 32], order, [0xff; 32]] {
			assert!(matches!(
				public_key(&invalid),
				Err(Error::InvalidPrivateKey(KeyType::Secp256k1))
			));
		}
		assert!(matches!(
			public_key(&[1; 31]),
			Err(Error::InvalidPrivateKey(KeyType::Secp256k1))
		));
	}
}

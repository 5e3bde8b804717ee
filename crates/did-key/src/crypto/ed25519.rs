use ed25519_dalek::{SigningKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};

use crate::{
	error::{Error, Result},
	key_algos::{Ed25519, KeyType, StaticKeyAlgo as _},
};

const _: () = assert!(Ed25519::PUB_KEY_LEN == PUBLIC_KEY_LENGTH);
const _: () = assert!(Ed25519::PRIV_KEY_LEN == SECRET_KEY_LENGTH);

#[cfg(feature = "random")]
pub(crate) fn random_private_key() -> super::PrivateKey {
	let signing_key = SigningKey::generate(&mut rand_core::OsRng);
	super::PrivateKey::from(signing_key.as_bytes().as_slice())
}

/// Derives the 32 byte compressed edwards y coordinate for a 32 byte seed.
pub fn public_key(private_key: &[u8]) -> Result<Vec<u8>> {
	let seed: &[u8; SECRET_KEY_LENGTH] = private_key
		.try_into()
		.map_err(|_| Error::InvalidPrivateKey(KeyType::Ed25519))?;
	let signing_key = SigningKey::from_bytes(seed);
	Ok(signing_key.verifying_key().as_bytes().to_vec())
}

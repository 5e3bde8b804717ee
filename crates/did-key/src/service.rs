//! The operations that most users of this crate want: generating, resolving,
//! and deriving `did:key`s.

use std::str::FromStr;

use chrono::Utc;
use tracing::{debug, trace};

use crate::{
	crypto::{KeyMaterialProvider, OsKeyMaterial, PrivateKey},
	document::DidDocument,
	error::Result,
	key_algos::KeyType,
	methods::key::DidKey,
	resolution::ResolutionResult,
};

/// A freshly generated key, along with its `did:key`. The caller owns the
/// private key, nothing else keeps a copy.
#[derive(Debug, Clone)]
pub struct KeyPair {
	pub private_key: PrivateKey,
	pub public_key: Vec<u8>,
	pub did: DidKey,
}

/// Holds no state between calls apart from the [`KeyMaterialProvider`], so it
/// can be shared freely between threads.
#[derive(Debug, Default, Clone)]
pub struct IdentityService<P = OsKeyMaterial> {
	provider: P,
}

impl<P: KeyMaterialProvider> IdentityService<P> {
	pub fn new(provider: P) -> Self {
		Self { provider }
	}

	pub fn provider(&self) -> &P {
		&self.provider
	}

	/// Generates a new random key of type `key_type`, and its `did:key`.
	pub fn generate(&self, key_type: KeyType) -> Result<KeyPair> {
		let private_key = self.provider.random_private_key(key_type)?;
		let public_key = self
			.provider
			.public_key_from_private_key(key_type, private_key.as_slice())?;
		let did = DidKey::from_public_key(key_type, &public_key)?;
		debug!(%key_type, %did, "generated did:key");

		Ok(KeyPair {
			private_key,
			public_key,
			did,
		})
	}

	/// Resolves `did` into its document. No network access happens, the document
	/// is expanded from the identifier itself.
	pub fn resolve(&self, did: &str) -> Result<ResolutionResult> {
		let did = DidKey::from_str(did).inspect_err(|err| {
			debug!(%did, %err, "failed to resolve did:key");
		})?;
		trace!(%did, key_type = %did.key_type(), "resolved did:key");

		Ok(ResolutionResult::new(DidDocument::build(&did), Utc::now()))
	}

	/// Builds the document for a raw public key.
	pub fn from_public_key(
		&self,
		public_key: &[u8],
		key_type: KeyType,
	) -> Result<DidDocument> {
		let did = DidKey::from_public_key(key_type, public_key)?;
		trace!(%key_type, %did, "derived did:key from public key");

		Ok(DidDocument::build(&did))
	}

	/// Builds the document for the public key belonging to `private_key`.
	pub fn from_private_key(
		&self,
		private_key: &[u8],
		key_type: KeyType,
	) -> Result<DidDocument> {
		let public_key = self
			.provider
			.public_key_from_private_key(key_type, private_key)?;
		self.from_public_key(&public_key, key_type)
	}
}

/// [`IdentityService::generate`] with [`OsKeyMaterial`].
pub fn generate(key_type: KeyType) -> Result<KeyPair> {
	IdentityService::<OsKeyMaterial>::default().generate(key_type)
}

/// [`IdentityService::resolve`] with [`OsKeyMaterial`].
pub fn resolve(did: &str) -> Result<ResolutionResult> {
	IdentityService::<OsKeyMaterial>::default().resolve(did)
}

/// [`IdentityService::from_public_key`] with [`OsKeyMaterial`].
pub fn from_public_key(public_key: &[u8], key_type: KeyType) -> Result<DidDocument> {
	IdentityService::<OsKeyMaterial>::default().from_public_key(public_key, key_type)
}

/// [`IdentityService::from_private_key`] with [`OsKeyMaterial`].
pub fn from_private_key(
	private_key: &[u8],
	key_type: KeyType,
) -> Result<DidDocument> {
	IdentityService::<OsKeyMaterial>::default().from_private_key(private_key, key_type)
}

#[cfg(all(
	test,
	feature = "random",
	feature = "ed25519",
	feature = "secp256k1"
))]
mod test {
	use super::*;

	use crate::{
		document::VerificationMethodType, error::Error, multibase,
		varint::DecodeError,
	};
	use eyre::Result;

	const SECP256K1_PRIV: [u8; 32] = [
		26, 113, 186, 116, 181, 43, 242, 116, 84, 207, 225, 229, 23, 118, 199, 74,
		154, 39, 167, 26, 231, 17, 245, 91, 138, 72, 109, 212, 159, 105, 46, 214,
	];
	const ED25519_PRIV: [u8; 32] = [
		56, 208, 7, 98, 73, 230, 151, 127, 112, 75, 205, 183, 110, 163, 37, 147,
		113, 1, 24, 94, 176, 137, 38, 190, 201, 106, 114, 15, 209, 240, 58, 129,
	];

	/// Always hands out the same key, for deterministic tests.
	#[derive(Debug)]
	struct FixedKeyMaterial(Vec<u8>);

	impl KeyMaterialProvider for FixedKeyMaterial {
		fn random_private_key(&self, _key_type: KeyType) -> Result<PrivateKey, Error> {
			Ok(PrivateKey::from(self.0.clone()))
		}

		fn public_key_from_private_key(
			&self,
			key_type: KeyType,
			private_key: &[u8],
		) -> Result<Vec<u8>, Error> {
			OsKeyMaterial.public_key_from_private_key(key_type, private_key)
		}
	}

	fn service() -> IdentityService {
		IdentityService::default()
	}

	#[test]
	fn test_from_private_key_secp256k1() -> Result<()> {
		let doc = service().from_private_key(&SECP256K1_PRIV, KeyType::Secp256k1)?;
		assert_eq!(
			doc.id.as_str(),
			"did:key:zQ3shrrqApMHnwgHBagm6XuVpGGuAM7RbRXbf57pmvTLUnQUt"
		);
		assert_eq!(
			doc.verification_method[0].public_key_multibase,
			"zQ3shrrqApMHnwgHBagm6XuVpGGuAM7RbRXbf57pmvTLUnQUt"
		);
		assert_eq!(
			doc.verification_method[0].type_,
			VerificationMethodType::EcdsaSecp256k1VerificationKey2019
		);
		Ok(())
	}

	#[test]
	fn test_from_private_key_ed25519() -> Result<()> {
		let doc = service().from_private_key(&ED25519_PRIV, KeyType::Ed25519)?;
		assert_eq!(
			doc.id.as_str(),
			"did:key:z6MkqKr4zKAKnDP1tWGDayDYe4YkrgUwVwMYSpqoesQ5STKq"
		);
		assert_eq!(
			doc.verification_method[0].public_key_multibase,
			"z6MkqKr4zKAKnDP1tWGDayDYe4YkrgUwVwMYSpqoesQ5STKq"
		);
		assert_eq!(
			doc.verification_method[0].type_,
			VerificationMethodType::Ed25519VerificationKey2020
		);
		Ok(())
	}

	#[test]
	fn test_generate_prefixes() -> Result<()> {
		let ed25519 = service().generate(KeyType::Ed25519)?;
		assert!(ed25519.did.as_str().starts_with("did:key:z6Mk"));
		let secp256k1 = service().generate(KeyType::Secp256k1)?;
		assert!(secp256k1.did.as_str().starts_with("did:key:zQ3s"));
		Ok(())
	}

	#[test]
	fn test_generate_is_random() -> Result<()> {
		for key_type in KeyType::ALL {
			let a = service().generate(key_type)?;
			let b = service().generate(key_type)?;
			assert_ne!(a.did, b.did);
			assert_ne!(a.private_key, b.private_key);
		}
		Ok(())
	}

	#[test]
	fn test_generate_matches_from_private_key() -> Result<()> {
		for key_type in KeyType::ALL {
			let pair = service().generate(key_type)?;
			assert_eq!(pair.public_key, pair.did.public_key());
			let doc = service().from_private_key(pair.private_key.as_slice(), key_type)?;
			assert_eq!(doc.id, pair.did);
		}
		Ok(())
	}

	#[test]
	fn test_generate_with_custom_provider() -> Result<()> {
		let service = IdentityService::new(FixedKeyMaterial(ED25519_PRIV.to_vec()));
		let pair = service.generate(KeyType::Ed25519)?;
		assert_eq!(
			pair.did.as_str(),
			"did:key:z6MkqKr4zKAKnDP1tWGDayDYe4YkrgUwVwMYSpqoesQ5STKq"
		);
		assert_eq!(pair.private_key.as_slice(), ED25519_PRIV);
		Ok(())
	}

	#[test]
	fn test_resolve() -> Result<()> {
		let pair = service().generate(KeyType::Ed25519)?;
		let result = service().resolve(pair.did.as_str())?;
		assert_eq!(result.did_document.id, pair.did);
		assert_eq!(
			result.did_resolution_metadata.content_type,
			"application/did+ld+json"
		);
		assert_eq!(result.did_document, pair.did.document());
		Ok(())
	}

	#[test]
	fn test_resolve_malformed() {
		for s in ["did:key:", "not-a-did"] {
			let result = service().resolve(s);
			assert!(
				matches!(result, Err(Error::MalformedIdentifier(_))),
				"{s:?} gave {result:?}"
			);
		}
		let s = format!("{}{}", DidKey::PREFIX, multibase::encode(&[0xe7]));
		assert!(matches!(
			service().resolve(&s),
			Err(Error::UnrecognizedIdentifierPrefix(DecodeError::MissingBytes))
		));
	}

	#[test]
	fn test_from_public_key_length_validation() {
		for len in [31, 33] {
			assert!(matches!(
				service().from_public_key(&vec![0; len], KeyType::Ed25519),
				Err(Error::InvalidKeyLength { actual, .. }) if actual == len
			));
		}
		assert!(service()
			.from_public_key(&[2; 33], KeyType::Secp256k1)
			.is_ok());
	}

	#[test]
	fn test_roundtrip_random_bytes() -> Result<()> {
		use rand_core::RngCore as _;

		let mut rng = rand_core::OsRng;
		for key_type in KeyType::ALL {
			for _ in 0..16 {
				let mut bytes = vec![0; key_type.pub_key_len()];
				rng.fill_bytes(&mut bytes);
				if key_type == KeyType::Secp256k1 {
					// SEC1 compressed points lead with 0x02 or 0x03.
					bytes[0] = 0x02 | (bytes[0] & 1);
				}
				let did = DidKey::from_public_key(key_type, &bytes)?;
				let parsed: DidKey = did.as_str().parse()?;
				assert_eq!(parsed.key_type(), key_type);
				let expected_prefix = match key_type {
					KeyType::Ed25519 => "z6Mk",
					KeyType::Secp256k1 => "zQ3s",
				};
				assert!(
					did.multibase().starts_with(expected_prefix),
					"{did} should start with {expected_prefix}"
				);
				assert_eq!(
					did.document().verification_method[0].public_key_multibase,
					did.multibase()
				);
			}
		}
		Ok(())
	}

	#[test]
	fn test_free_generate() -> Result<()> {
		let pair = super::generate(KeyType::Secp256k1)?;
		assert!(pair.did.multibase().starts_with("zQ3s"));
		assert_eq!(pair.public_key, pair.did.public_key());
		Ok(())
	}

	#[test]
	fn test_free_resolve() -> Result<()> {
		let did = "did:key:z6MkqKr4zKAKnDP1tWGDayDYe4YkrgUwVwMYSpqoesQ5STKq";
		let result = super::resolve(did)?;
		assert_eq!(result.did_document.id.as_str(), did);
		assert!(matches!(
			super::resolve("not-a-did"),
			Err(Error::MalformedIdentifier(_))
		));
		Ok(())
	}

	#[test]
	fn test_free_from_public_key() -> Result<()> {
		let doc = super::from_public_key(&[2; 33], KeyType::Secp256k1)?;
		assert_eq!(doc, service().from_public_key(&[2; 33], KeyType::Secp256k1)?);
		assert!(matches!(
			super::from_public_key(&[0; 31], KeyType::Ed25519),
			Err(Error::InvalidKeyLength { actual: 31, .. })
		));
		Ok(())
	}

	#[test]
	fn test_free_from_private_key() -> Result<()> {
		let doc = super::from_private_key(&ED25519_PRIV, KeyType::Ed25519)?;
		assert_eq!(
			doc.id.as_str(),
			"did:key:z6MkqKr4zKAKnDP1tWGDayDYe4YkrgUwVwMYSpqoesQ5STKq"
		);
		Ok(())
	}

	#[test]
	fn test_service_is_shareable() {
		fn helper(_s: impl Send + Sync + 'static) {}
		helper(service());
	}
}

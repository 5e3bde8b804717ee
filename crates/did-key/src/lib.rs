//! A Decentralized Identifier (aka [DID][spec]), is a globally unique
//! identifier that provides a general purpose way of looking up public keys
//! associated with the globally unique identifier.
//!
//! The [did:key] method is the simplest possible DID: the identifier *is* the
//! public key, [multicodec] prefixed and [multibase] encoded. There is no
//! registry, no network access, and nothing to update or revoke. Resolving a
//! `did:key` just expands the identifier into a document.
//!
//! ```
//! use did_key::{DidKey, KeyType};
//!
//! let did: DidKey = "did:key:z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp"
//! 	.parse()
//! 	.unwrap();
//! assert_eq!(did.key_type(), KeyType::Ed25519);
//! assert_eq!(did.document().verification_method[0].id, format!("{did}#0"));
//! ```
//!
//! Generating keys goes through an [`IdentityService`], which is parameterized
//! by where its key material comes from (see [`crypto::KeyMaterialProvider`]).
//! The free functions [`generate`], [`resolve`], [`from_public_key`] and
//! [`from_private_key`] use the operating system's randomness.
//!
//! [spec]: https://www.w3.org/TR/did-core/
//! [did:key]: https://w3c-ccg.github.io/did-method-key/
//! [multicodec]: https://github.com/multiformats/multicodec
//! [multibase]: https://github.com/multiformats/multibase

#![forbid(unsafe_code)]

pub mod codec;
pub mod crypto;
pub mod document;
pub mod error;
pub mod key_algos;
pub mod methods;
pub mod multibase;
pub mod resolution;
pub mod service;
pub mod uri;
pub mod varint;

pub use crate::{
	codec::EncodedKey,
	crypto::{KeyMaterialProvider, OsKeyMaterial, PrivateKey},
	document::{DidDocument, VerificationMethod, VerificationMethodType},
	error::{Error, Result},
	key_algos::KeyType,
	methods::key::DidKey,
	resolution::ResolutionResult,
	service::{
		from_private_key, from_public_key, generate, resolve, IdentityService,
		KeyPair,
	},
};

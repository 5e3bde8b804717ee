//! The [DID document] that a `did:key` expands into.
//!
//! [DID document]: https://www.w3.org/TR/did-core/#did-documents

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::methods::key::DidKey;

/// The JSON-LD context of every DID document.
pub const DID_CONTEXT_V1: &str = "https://www.w3.org/ns/did/v1";

/// The fragment identifying the only verification method of a `did:key`.
pub const VERIFICATION_METHOD_FRAGMENT: &str = "0";

/// The suite that a verification method's public key belongs to.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum VerificationMethodType {
	Ed25519VerificationKey2020,
	EcdsaSecp256k1VerificationKey2019,
}

impl VerificationMethodType {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Ed25519VerificationKey2020 => "Ed25519VerificationKey2020",
			Self::EcdsaSecp256k1VerificationKey2019 => {
				"EcdsaSecp256k1VerificationKey2019"
			}
		}
	}
}

impl Display for VerificationMethodType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
	/// Always `<did>#0`.
	pub id: String,
	#[serde(rename = "type")]
	pub type_: VerificationMethodType,
	pub controller: DidKey,
	pub public_key_multibase: String,
}

/// A DID document. For `did:key` this carries no state of its own, it is fully
/// determined by the [`DidKey`] it was built from.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
	#[serde(rename = "@context")]
	pub context: Vec<String>,
	pub id: DidKey,
	pub verification_method: Vec<VerificationMethod>,
	pub authentication: Vec<String>,
	pub assertion_method: Vec<String>,
	pub capability_delegation: Vec<String>,
	pub capability_invocation: Vec<String>,
}

impl DidDocument {
	/// Expands `did` into its document. This cannot fail, since all validation
	/// already happened when the [`DidKey`] was constructed.
	pub fn build(did: &DidKey) -> Self {
		let vm_id = verification_method_id(did);
		let verification_method = VerificationMethod {
			id: vm_id.clone(),
			type_: did.key_type().verification_method_type(),
			controller: did.clone(),
			public_key_multibase: did.multibase().to_owned(),
		};

		Self {
			context: vec![DID_CONTEXT_V1.to_owned()],
			id: did.clone(),
			verification_method: vec![verification_method],
			authentication: vec![vm_id.clone()],
			assertion_method: vec![vm_id.clone()],
			capability_delegation: vec![vm_id.clone()],
			capability_invocation: vec![vm_id],
		}
	}
}

/// The DID url of the verification method of `did`.
pub fn verification_method_id(did: &DidKey) -> String {
	format!("{did}#{VERIFICATION_METHOD_FRAGMENT}")
}

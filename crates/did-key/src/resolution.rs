//! The output of [DID resolution].
//!
//! [DID resolution]: https://w3c-ccg.github.io/did-resolution/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DidDocument;

/// Media type of a resolved DID document.
pub const DID_LD_JSON: &str = "application/did+ld+json";

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
	pub did_resolution_metadata: DidResolutionMetadata,
	pub did_document: DidDocument,
	pub did_document_metadata: DidDocumentMetadata,
}

impl ResolutionResult {
	pub fn new(did_document: DidDocument, retrieved: DateTime<Utc>) -> Self {
		Self {
			did_resolution_metadata: DidResolutionMetadata {
				content_type: DID_LD_JSON.to_owned(),
				retrieved,
			},
			did_document,
			did_document_metadata: DidDocumentMetadata::default(),
		}
	}
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidResolutionMetadata {
	pub content_type: String,
	/// When resolution happened. Informational only.
	pub retrieved: DateTime<Utc>,
}

/// Always empty: a `did:key` document is never updated or deactivated.
#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct DidDocumentMetadata {}

#[cfg(test)]
mod test {
	use super::*;

	use crate::methods::key::DidKey;
	use chrono::TimeZone as _;
	use eyre::Result;

	#[test]
	fn test_json_shape() -> Result<()> {
		let did: DidKey = "did:key:z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp"
			.parse()?;
		let retrieved = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
		let result = ResolutionResult::new(did.document(), retrieved);

		let json = serde_json::to_value(&result)?;
		assert_eq!(
			json["didResolutionMetadata"],
			serde_json::json!({
				"contentType": "application/did+ld+json",
				"retrieved": "2024-05-01T12:30:00Z",
			})
		);
		assert_eq!(json["didDocumentMetadata"], serde_json::json!({}));
		assert_eq!(json["didDocument"], serde_json::to_value(did.document())?);

		assert_eq!(serde_json::from_value::<ResolutionResult>(json)?, result);
		Ok(())
	}
}

//! The subset of [multibase] that `did:key` uses, which is only base58-btc.
//!
//! [multibase]: https://github.com/multiformats/multibase

/// The multibase prefix for base58-btc.
pub const BASE58_BTC: char = 'z';

/// Encodes `bytes` as base58-btc, with the multibase prefix.
pub fn encode(bytes: &[u8]) -> String {
	let encoded = bs58::encode(bytes)
		.with_alphabet(bs58::Alphabet::BITCOIN)
		.into_string();
	let mut out = String::with_capacity(encoded.len() + 1);
	out.push(BASE58_BTC);
	out.push_str(&encoded);
	out
}

/// Decodes multibase text, which must be base58-btc.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
	let mut out_buf = Vec::new();
	decode_onto(s, &mut out_buf)?;
	Ok(out_buf)
}

fn decode_onto(s: &str, out_buf: &mut Vec<u8>) -> Result<(), DecodeError> {
	out_buf.clear();
	let mut chars = s.chars();
	let base = chars.next().ok_or(DecodeError::Empty)?;
	if base != BASE58_BTC {
		return Err(DecodeError::WrongBase(base));
	}
	let payload = chars.as_str();
	if payload.is_empty() {
		return Err(DecodeError::Empty);
	}
	bs58::decode(payload)
		.with_alphabet(bs58::Alphabet::BITCOIN)
		.onto(out_buf)?;
	Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
	#[error("multibase text had no payload")]
	Empty,
	#[error(
		"Expected \"base58-btc\" encoding which should be identified in multibase as ascii 'z' (0x7a) but got {0:?}"
	)]
	WrongBase(char),
	#[error(transparent)]
	Bs58(#[from] bs58::decode::Error),
}

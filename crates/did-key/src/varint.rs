//! Unsigned varints, as used for [multicodec] prefixes.
//!
//! [multicodec]: https://github.com/multiformats/unsigned-varint

/// bitmask for 7 least significant bits
const LSB_7: u8 = u8::MAX / 2;
/// bitmask for most significant bit
const MSB: u8 = !LSB_7;
/// 16 bits of payload never need more than 3 groups of 7.
const MAX_LEN: usize = 3;

#[inline]
const fn msb_is_1(val: u8) -> bool {
	val & MSB == MSB
}

/// A varint encoded `u16`, stored inline.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct VarintEncoding {
	buf: [u8; MAX_LEN],
	len: u8,
}

impl VarintEncoding {
	pub const fn as_slice(&self) -> &[u8] {
		self.buf.split_at(self.len as usize).0
	}

	#[allow(clippy::len_without_is_empty)]
	pub const fn len(&self) -> usize {
		self.len as usize
	}
}

/// Encodes `value` as a minimal length varint, least significant group first.
pub const fn encode_varint(value: u16) -> VarintEncoding {
	let mut buf = [0; MAX_LEN];
	let mut len = 0;
	let mut remaining = value;
	loop {
		let chunk = (remaining as u8) & LSB_7;
		remaining >>= 7;
		if remaining == 0 {
			buf[len] = chunk;
			len += 1;
			break;
		}
		buf[len] = chunk | MSB;
		len += 1;
	}

	VarintEncoding {
		buf,
		len: len as u8,
	}
}

/// Decodes the varint at the start of `encoded`. Trailing bytes are ignored.
///
/// Returns the decoded value along with how many bytes of `encoded` it
/// occupied.
pub const fn decode_varint(encoded: &[u8]) -> Result<(u16, usize), DecodeError> {
	let mut result: u32 = 0;
	let mut idx = 0;
	while idx < encoded.len() {
		if idx == MAX_LEN {
			return Err(DecodeError::WouldOverflow);
		}
		let byte = encoded[idx];
		result |= ((byte & LSB_7) as u32) << (7 * idx);
		if !msb_is_1(byte) {
			if idx > 0 && byte == 0 {
				return Err(DecodeError::NotMinimal);
			}
			if result > u16::MAX as u32 {
				return Err(DecodeError::WouldOverflow);
			}
			return Ok((result as u16, idx + 1));
		}
		idx += 1;
	}
	Err(DecodeError::MissingBytes)
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone, Copy)]
pub enum DecodeError {
	#[error("expected more bytes than what were provided")]
	MissingBytes,
	#[error(
		"the decoded number is too large to fit into the type without overflowing"
	)]
	WouldOverflow,
	#[error("the varint was not minimally encoded")]
	NotMinimal,
}

//! Bit-group transcoding between binary data and text.
//!
//! Every variant maps a fixed number of bits (1 to 6) onto one symbol of a
//! power-of-two alphabet. The RFC 4648 family, MIME and UTF-7 base64,
//! Crockford base32 and hex ship as compile-time [`Codec`] statics in
//! [`variants`]; other alphabets can be built with [`Codec::builder`] or
//! loaded from TOML through a [`VariantRegistry`].
//!
//! Two kinds of failure are kept apart. Malformed text is an ordinary
//! [`DecodeError`] that names the offending position. Writing into a
//! caller-provided buffer that is smaller than the size calculators report
//! is a programming error and panics.
//!
//! # Example
//!
//! ```
//! use base_bits::{decode, encode, variants};
//!
//! let encoded = encode(b"foobar", &variants::BASE32_RFC4648);
//! assert_eq!(encoded, "MZXW6YTBOI======");
//! assert_eq!(decode(&encoded, &variants::BASE32_RFC4648).unwrap(), b"foobar");
//! ```

mod core;
mod encoders;
mod sink;

pub mod prelude;

pub use crate::core::alphabet::{Alphabet, CaseRule, ReverseLookup, SymbolClass};
pub use crate::core::codec::{Codec, CodecBuilder, VariantDef};
pub use crate::core::config::{CodecConfig, LineBreak, ZeroPadPolicy};
pub use crate::core::registry::{LineBreakConfig, VariantConfig, VariantRegistry};
pub use crate::core::variants;
pub use crate::core::variants::{
    BASE32_CROCKFORD, BASE32_HEX, BASE32_RFC4648, BASE64_MIME, BASE64_RFC4648, BASE64_URL,
    BASE64_URL_UNPADDED, BASE64_UTF7, HEX_LOWER, HEX_UPPER,
};
pub use encoders::errors::{ConfigError, DecodeError, VariantNotFoundError, find_closest_variant};
pub use sink::{ByteSink, SliceSink};

/// Encodes binary data with the given codec.
///
/// # Example
///
/// ```
/// use base_bits::{encode, BASE64_RFC4648};
///
/// assert_eq!(encode(b"foob", &BASE64_RFC4648), "Zm9vYg==");
/// ```
pub fn encode(data: &[u8], codec: &Codec) -> String {
    codec.encode(data)
}

/// Decodes text back to binary data.
///
/// # Errors
///
/// Returns [`DecodeError`] if the input contains symbols outside the
/// variant's alphabet, misplaced or missing padding, an impossible length,
/// or non-zero fill bits in the final symbol.
///
/// # Example
///
/// ```
/// use base_bits::{decode, HEX_UPPER};
///
/// assert_eq!(decode("deadBEEF", &HEX_UPPER).unwrap(), b"\xde\xad\xbe\xef");
/// ```
pub fn decode(encoded: impl AsRef<[u8]>, codec: &Codec) -> Result<Vec<u8>, DecodeError> {
    codec.decode(encoded)
}

//! Built-in variants.
//!
//! Each variant is a `static` [`Codec`] evaluated at compile time, so the
//! alphabet, reverse lookup and policy exist before the program starts and
//! are never mutated. Checksum symbols that some alphabets define (Crockford's
//! `*~$=U`) are not part of these tables and decode as invalid symbols.

use super::codec::{Codec, VariantDef};

const BASE64_STANDARD: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64_URL_SAFE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// RFC 4648 §4 base64 with `=` padding.
pub static BASE64_RFC4648: Codec =
    Codec::from_def(VariantDef::new("base64_rfc4648", BASE64_STANDARD).padded(b'='));

/// RFC 4648 §5 URL and filename safe base64 with `=` padding.
pub static BASE64_URL: Codec =
    Codec::from_def(VariantDef::new("base64_url", BASE64_URL_SAFE).padded(b'='));

/// RFC 4648 §5 URL and filename safe base64 without padding.
pub static BASE64_URL_UNPADDED: Codec =
    Codec::from_def(VariantDef::new("base64_url_unpadded", BASE64_URL_SAFE));

/// RFC 2152 modified base64 as used by UTF-7: standard alphabet, never padded.
pub static BASE64_UTF7: Codec = Codec::from_def(VariantDef::new("base64_utf7", BASE64_STANDARD));

/// RFC 2045 MIME base64: padded, wrapped at 76 symbols with CRLF.
pub static BASE64_MIME: Codec = Codec::from_def(
    VariantDef::new("base64_mime", BASE64_STANDARD)
        .padded(b'=')
        .line_break(76, b"\r\n"),
);

/// RFC 4648 §6 base32. Decoding ignores case.
pub static BASE32_RFC4648: Codec = Codec::from_def(
    VariantDef::new("base32_rfc4648", b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567")
        .padded(b'=')
        .case_insensitive(),
);

/// RFC 4648 §7 base32 with the extended hex alphabet. Decoding ignores case.
pub static BASE32_HEX: Codec = Codec::from_def(
    VariantDef::new("base32_hex", b"0123456789ABCDEFGHIJKLMNOPQRSTUV")
        .padded(b'=')
        .case_insensitive(),
);

/// Crockford's base32, unpadded.
///
/// Decoding ignores case, reads `O` as `0` and `I`/`L` as `1`, and skips
/// hyphens. The optional check symbol is not supported.
pub static BASE32_CROCKFORD: Codec = Codec::from_def(
    VariantDef::new("base32_crockford", b"0123456789ABCDEFGHJKMNPQRSTVWXYZ")
        .case_insensitive()
        .aliases(&[(b'O', b'0'), (b'I', b'1'), (b'L', b'1')])
        .ignored(b"-"),
);

/// Lowercase base16. Decoding ignores case.
pub static HEX_LOWER: Codec =
    Codec::from_def(VariantDef::new("hex_lower", b"0123456789abcdef").case_insensitive());

/// Uppercase base16. Decoding ignores case.
pub static HEX_UPPER: Codec =
    Codec::from_def(VariantDef::new("hex_upper", b"0123456789ABCDEF").case_insensitive());

/// Every built-in variant, in a stable order.
pub static BUILTIN: [&Codec; 10] = [
    &BASE64_RFC4648,
    &BASE64_URL,
    &BASE64_URL_UNPADDED,
    &BASE64_UTF7,
    &BASE64_MIME,
    &BASE32_RFC4648,
    &BASE32_HEX,
    &BASE32_CROCKFORD,
    &HEX_LOWER,
    &HEX_UPPER,
];

/// Looks up a built-in variant by its exact name.
pub fn builtin(name: &str) -> Option<&'static Codec> {
    BUILTIN.iter().copied().find(|codec| codec.name() == name)
}

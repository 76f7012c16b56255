//! Property tests over every built-in variant, plus equivalence with the
//! `hex` reference crate.

use base_bits::{BASE64_MIME, BASE64_RFC4648, BASE64_URL_UNPADDED, HEX_LOWER, HEX_UPPER, variants};
use proptest::{collection::vec, prelude::*, string::*};

proptest! {
    /// Decoding the output of encoding gives back the input for every variant
    #[test]
    fn round_trip(bytes in vec(any::<u8>(), 0..256)) {
        for codec in variants::BUILTIN {
            let encoded = codec.encode(&bytes);
            let decoded = codec.decode(&encoded);
            prop_assert_eq!(decoded.as_ref(), Ok(&bytes), "{}", codec.name());
        }
    }

    /// The size calculator predicts the encoded length exactly
    #[test]
    fn encoded_size_is_exact(bytes in vec(any::<u8>(), 0..512)) {
        for codec in variants::BUILTIN {
            let encoded = codec.encode_to_vec(&bytes);
            prop_assert_eq!(encoded.len(), codec.encoded_size(bytes.len()), "{}", codec.name());
        }
    }

    /// Decoded output never exceeds the worst-case bound, and hits it for
    /// variants without padding or line breaks
    #[test]
    fn decoded_max_size_bounds_output(bytes in vec(any::<u8>(), 0..512)) {
        for codec in variants::BUILTIN {
            let encoded = codec.encode_to_vec(&bytes);
            let bound = codec.decoded_max_size(encoded.len());
            prop_assert!(bytes.len() <= bound, "{}", codec.name());

            let config = codec.config();
            if !config.padding_required && config.line_break.is_none() {
                prop_assert_eq!(bytes.len(), bound, "{}", codec.name());
            }

            let mut out = vec![0u8; bound];
            let written = codec.decode_to_slice(&encoded, &mut out).unwrap();
            prop_assert_eq!(&out[..written], &bytes[..]);
        }
    }

    /// Ensure hex output matches the `hex` reference crate
    #[test]
    fn hex_encode_equiv(bytes in vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(HEX_LOWER.encode(&bytes), hex::encode(&bytes));
        prop_assert_eq!(HEX_UPPER.encode(&bytes), hex::encode_upper(&bytes));
    }

    /// Ensure text produced by the `hex` reference crate decodes identically
    #[test]
    fn hex_decode_equiv(bytes in vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(HEX_LOWER.decode(hex::encode_upper(&bytes)), Ok(bytes.clone()));
        prop_assert_eq!(HEX_UPPER.decode(hex::encode(&bytes)), Ok(bytes));
    }

    /// Random text over the alphabet either fails to decode or is the one
    /// canonical encoding of what it decodes to
    #[test]
    fn decode_random_is_canonical(text in string_regex("[A-Za-z0-9_-]{0,128}").unwrap()) {
        if let Ok(decoded) = BASE64_URL_UNPADDED.decode(&text) {
            prop_assert_eq!(BASE64_URL_UNPADDED.encode(&decoded), text);
        }
    }

    /// Random padded text: padding is added to a block boundary before decoding
    #[test]
    fn decode_random_padded(text in string_regex("[A-Za-z0-9+/]{0,128}").unwrap()) {
        let padded = match text.len() % 4 {
            0 => text,
            n => text + &"=".repeat(4 - n),
        };
        if let Ok(decoded) = BASE64_RFC4648.decode(&padded) {
            prop_assert_eq!(BASE64_RFC4648.encode(&decoded), padded);
        }
    }

    /// Wrapped output decodes the same as unwrapped output
    #[test]
    fn mime_unwrapped_decodes(bytes in vec(any::<u8>(), 0..512)) {
        let wrapped = BASE64_MIME.encode(&bytes);
        let unwrapped: String = wrapped.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        prop_assert_eq!(&unwrapped, &BASE64_RFC4648.encode(&bytes));
        prop_assert_eq!(BASE64_MIME.decode(&unwrapped), Ok(bytes));
    }
}

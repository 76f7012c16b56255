//! Exact and worst-case buffer sizes.
//!
//! All calculators split their argument before multiplying, and saturate at
//! `usize::MAX` when the true size is not representable.

use num_integer::lcm;

use crate::core::config::CodecConfig;

/// Number of symbols in one padding block: `lcm(bits, 8) / bits`.
///
/// Base64: LCM(6,8)=24, block=4. Base32: LCM(5,8)=40, block=8.
/// Base16: LCM(4,8)=8, block=2.
pub fn block_size(bits_per_symbol: u8) -> usize {
    let bits = usize::from(bits_per_symbol);
    lcm(bits, 8) / bits
}

/// Number of data symbols needed for `binary_len` bytes, without padding.
pub fn symbol_count(bits_per_symbol: u8, binary_len: usize) -> usize {
    let bits = usize::from(bits_per_symbol);
    (binary_len / bits)
        .saturating_mul(8)
        .saturating_add(((binary_len % bits) * 8).div_ceil(bits))
}

/// Exact encoded length of `binary_len` bytes, padding and line breaks included.
///
/// Returns `usize::MAX` when the encoding could not be addressed.
pub fn encoded_size(bits_per_symbol: u8, config: &CodecConfig, binary_len: usize) -> usize {
    let mut symbols = symbol_count(bits_per_symbol, binary_len);
    if config.padding_required {
        let block = block_size(bits_per_symbol);
        symbols = symbols.div_ceil(block).saturating_mul(block);
    }
    match &config.line_break {
        Some(line_break) => symbols.saturating_add(line_break.inserted_len(symbols)),
        None => symbols,
    }
}

/// Upper bound on the decoded length of `encoded_len` bytes of text.
///
/// Exact for variants without padding or line breaks.
pub fn decoded_max_size(bits_per_symbol: u8, encoded_len: usize) -> usize {
    let bits = usize::from(bits_per_symbol);
    (encoded_len / 8) * bits + (encoded_len % 8) * bits / 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::CaseRule;
    use crate::core::config::{LineBreak, ZeroPadPolicy};
    use std::borrow::Cow;

    fn config(padding_required: bool, line_break: Option<LineBreak>) -> CodecConfig {
        CodecConfig {
            padding: padding_required.then_some(b'='),
            padding_required,
            line_break,
            ignored: Cow::Borrowed(b""),
            case: CaseRule::Sensitive,
            zero_pad: ZeroPadPolicy::Streaming,
        }
    }

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(6), 4);
        assert_eq!(block_size(5), 8);
        assert_eq!(block_size(4), 2);
        assert_eq!(block_size(3), 8);
        assert_eq!(block_size(1), 8);
    }

    #[test]
    fn test_symbol_count() {
        assert_eq!(symbol_count(6, 0), 0);
        assert_eq!(symbol_count(6, 1), 2);
        assert_eq!(symbol_count(6, 2), 3);
        assert_eq!(symbol_count(6, 3), 4);
        assert_eq!(symbol_count(5, 1), 2);
        assert_eq!(symbol_count(5, 4), 7);
        assert_eq!(symbol_count(5, 5), 8);
        assert_eq!(symbol_count(4, 3), 6);
    }

    #[test]
    fn test_encoded_size_padded() {
        let padded = config(true, None);
        assert_eq!(encoded_size(6, &padded, 0), 0);
        assert_eq!(encoded_size(6, &padded, 1), 4);
        assert_eq!(encoded_size(6, &padded, 4), 8);
        assert_eq!(encoded_size(5, &padded, 1), 8);
        assert_eq!(encoded_size(5, &padded, 6), 16);
    }

    #[test]
    fn test_encoded_size_unpadded() {
        let unpadded = config(false, None);
        assert_eq!(encoded_size(6, &unpadded, 20), 27);
        assert_eq!(encoded_size(5, &unpadded, 1), 2);
        assert_eq!(encoded_size(4, &unpadded, 4), 8);
    }

    #[test]
    fn test_encoded_size_with_line_breaks() {
        let mime = config(true, Some(LineBreak::from_static(76, b"\r\n")));
        assert_eq!(encoded_size(6, &mime, 57), 76);
        assert_eq!(encoded_size(6, &mime, 58), 82);
        assert_eq!(encoded_size(6, &mime, 114), 154);
    }

    #[test]
    fn test_decoded_max_size() {
        assert_eq!(decoded_max_size(6, 0), 0);
        assert_eq!(decoded_max_size(6, 4), 3);
        assert_eq!(decoded_max_size(6, 27), 20);
        assert_eq!(decoded_max_size(5, 8), 5);
        assert_eq!(decoded_max_size(5, 7), 4);
        assert_eq!(decoded_max_size(4, 9), 4);
    }

    #[test]
    fn test_sizes_do_not_overflow() {
        let unpadded = config(false, None);
        assert!(encoded_size(6, &unpadded, usize::MAX / 2) > usize::MAX / 2);
        assert!(decoded_max_size(6, usize::MAX) < usize::MAX);
    }

    #[test]
    fn test_sizes_saturate() {
        let unpadded = config(false, None);
        let padded = config(true, None);
        let mime = config(true, Some(LineBreak::from_static(76, b"\r\n")));
        for bits in 1..=6 {
            assert_eq!(encoded_size(bits, &unpadded, usize::MAX), usize::MAX);
            assert_eq!(encoded_size(bits, &padded, usize::MAX), usize::MAX);
            assert_eq!(encoded_size(bits, &mime, usize::MAX), usize::MAX);
            assert!(decoded_max_size(bits, usize::MAX) <= usize::MAX / 8 * 6 + 6);
        }
        assert_eq!(symbol_count(4, usize::MAX), usize::MAX);
        assert_eq!(encoded_size(6, &mime, usize::MAX / 4 * 3), usize::MAX);
    }
}

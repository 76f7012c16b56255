use serde::Deserialize;
use std::borrow::Cow;

use super::alphabet::CaseRule;

/// How the final, partially filled symbol group is aligned.
///
/// Five- and six-bit symbols rarely end on a byte boundary, so the last symbol
/// of an encoding usually carries fewer payload bits than its width. The two
/// policies disagree about which end of that symbol holds the payload.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPadPolicy {
    /// Payload bits sit at the high end and the low end is zero-filled, as if
    /// the bit stream continued with zeros (RFC 4648). Decoding rejects any
    /// nonzero fill bit.
    #[default]
    Streaming,
    /// Payload bits sit at the low end, reading the final group as a
    /// big-endian number. Decoding rejects any nonzero high bit.
    Positional,
}

/// Fixed-interval line wrapping of encoded output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreak {
    /// Number of symbols per line.
    pub interval: usize,
    /// Bytes inserted between lines, e.g. `\r\n`.
    pub sequence: Cow<'static, [u8]>,
}

impl LineBreak {
    pub const fn from_static(interval: usize, sequence: &'static [u8]) -> Self {
        LineBreak {
            interval,
            sequence: Cow::Borrowed(sequence),
        }
    }

    /// Number of line-break bytes inserted into `symbols` emitted symbols.
    pub fn inserted_len(&self, symbols: usize) -> usize {
        if symbols == 0 {
            return 0;
        }
        ((symbols - 1) / self.interval).saturating_mul(self.sequence.len())
    }
}

/// Per-variant policy record shared by the encoder, decoder and size calculators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Symbol appended to fill the last block, if the variant has one.
    pub padding: Option<u8>,
    /// Whether encoding emits padding and decoding insists on it.
    pub padding_required: bool,
    pub line_break: Option<LineBreak>,
    /// Bytes the decoder steps over in addition to line-break bytes.
    pub ignored: Cow<'static, [u8]>,
    pub case: CaseRule,
    pub zero_pad: ZeroPadPolicy,
}

/// Checks the policy fields that do not depend on the alphabet.
pub(crate) const fn validate_policy(
    padding: Option<u8>,
    padding_required: bool,
    line_break: Option<(usize, &[u8])>,
) -> Result<(), &'static str> {
    if padding_required && padding.is_none() {
        return Err("padding is required but no padding symbol is configured");
    }
    if let Some(pad) = padding
        && (!pad.is_ascii() || pad.is_ascii_control())
    {
        return Err("padding symbol must be printable ASCII");
    }
    if let Some((interval, sequence)) = line_break {
        if interval == 0 {
            return Err("line break interval must be greater than zero");
        }
        if sequence.is_empty() {
            return Err("line break sequence must not be empty");
        }
        let mut i = 0;
        while i < sequence.len() {
            if !sequence[i].is_ascii() {
                return Err("line break sequence must be ASCII");
            }
            i += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_break_inserted_len() {
        let crlf = LineBreak::from_static(76, b"\r\n");
        assert_eq!(crlf.inserted_len(0), 0);
        assert_eq!(crlf.inserted_len(1), 0);
        assert_eq!(crlf.inserted_len(76), 0);
        assert_eq!(crlf.inserted_len(77), 2);
        assert_eq!(crlf.inserted_len(152), 2);
        assert_eq!(crlf.inserted_len(153), 4);
    }

    #[test]
    fn test_validate_policy() {
        assert!(validate_policy(Some(b'='), true, None).is_ok());
        assert!(validate_policy(None, false, Some((64, &b"\n"[..]))).is_ok());
        assert!(validate_policy(None, true, None).is_err());
        assert!(validate_policy(Some(b'\t'), false, None).is_err());
        assert!(validate_policy(None, false, Some((0, &b"\n"[..]))).is_err());
        assert!(validate_policy(None, false, Some((64, &b""[..]))).is_err());
    }

    #[test]
    fn test_zero_pad_policy_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            zero_pad: ZeroPadPolicy,
        }
        let holder: Holder = toml::from_str(r#"zero_pad = "positional""#).unwrap();
        assert_eq!(holder.zero_pad, ZeroPadPolicy::Positional);
    }
}

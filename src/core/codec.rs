use std::borrow::Cow;

use super::alphabet::{Alphabet, CaseRule, ReverseLookup, build_lookup};
use super::config::{CodecConfig, LineBreak, ZeroPadPolicy, validate_policy};
use crate::encoders::chunked::{decode_chunked, encode_chunked};
use crate::encoders::errors::{ConfigError, DecodeError};
use crate::encoders::sizing;
use crate::sink::{ByteSink, SliceSink};

/// Compile-time description of a built-in variant.
///
/// Only borrowed and `Copy` data, so [`Codec::from_def`] can validate it and
/// build the reverse lookup during const evaluation.
#[derive(Debug, Clone, Copy)]
pub struct VariantDef {
    pub name: &'static str,
    pub symbols: &'static [u8],
    pub case: CaseRule,
    /// `(alias, canonical)` pairs accepted by the decoder
    pub aliases: &'static [(u8, u8)],
    pub padding: Option<u8>,
    pub padding_required: bool,
    /// `(interval, sequence)`
    pub line_break: Option<(usize, &'static [u8])>,
    pub ignored: &'static [u8],
    pub zero_pad: ZeroPadPolicy,
}

impl VariantDef {
    /// Unpadded, case-sensitive, streaming defaults for `symbols`.
    pub const fn new(name: &'static str, symbols: &'static [u8]) -> Self {
        VariantDef {
            name,
            symbols,
            case: CaseRule::Sensitive,
            aliases: &[],
            padding: None,
            padding_required: false,
            line_break: None,
            ignored: b"",
            zero_pad: ZeroPadPolicy::Streaming,
        }
    }

    pub const fn padded(mut self, symbol: u8) -> Self {
        self.padding = Some(symbol);
        self.padding_required = true;
        self
    }

    pub const fn case_insensitive(mut self) -> Self {
        self.case = CaseRule::Insensitive;
        self
    }

    pub const fn aliases(mut self, aliases: &'static [(u8, u8)]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn line_break(mut self, interval: usize, sequence: &'static [u8]) -> Self {
        self.line_break = Some((interval, sequence));
        self
    }

    pub const fn ignored(mut self, ignored: &'static [u8]) -> Self {
        self.ignored = ignored;
        self
    }
}

/// A complete encoding variant: alphabet, reverse lookup and policy.
///
/// Built-in variants are `static` items built at compile time (see
/// [`crate::variants`]); custom ones come from [`Codec::builder`] or a
/// [`crate::VariantRegistry`]. A codec is immutable and can be shared freely
/// across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    name: Cow<'static, str>,
    alphabet: Alphabet,
    lookup: ReverseLookup,
    config: CodecConfig,
}

impl Codec {
    /// Builds a codec from a static definition, panicking at compile time if
    /// the definition is inconsistent.
    pub const fn from_def(def: VariantDef) -> Self {
        if let Err(reason) = validate_policy(def.padding, def.padding_required, def.line_break) {
            panic!("{}", reason);
        }

        let line_break_bytes: &[u8] = match def.line_break {
            Some((_, sequence)) => sequence,
            None => b"",
        };
        let table = match build_lookup(
            def.symbols,
            def.case,
            def.aliases,
            def.padding,
            &[def.ignored, line_break_bytes],
        ) {
            Ok(table) => table,
            Err(reason) => panic!("{}", reason),
        };
        let alphabet = Alphabet::from_static(def.symbols);

        let line_break = match def.line_break {
            Some((interval, sequence)) => Some(LineBreak::from_static(interval, sequence)),
            None => None,
        };

        Codec {
            name: Cow::Borrowed(def.name),
            alphabet,
            lookup: ReverseLookup::from_table(table),
            config: CodecConfig {
                padding: def.padding,
                padding_required: def.padding_required,
                line_break,
                ignored: Cow::Borrowed(def.ignored),
                case: def.case,
                zero_pad: def.zero_pad,
            },
        }
    }

    /// Starts building a codec at runtime.
    pub fn builder(name: impl Into<String>) -> CodecBuilder {
        CodecBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn lookup(&self) -> &ReverseLookup {
        &self.lookup
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn bits_per_symbol(&self) -> u8 {
        self.alphabet.bits_per_symbol()
    }

    /// Symbols per padding block.
    pub fn block_size(&self) -> usize {
        sizing::block_size(self.bits_per_symbol())
    }

    /// Exact encoded length for `binary_len` input bytes.
    pub fn encoded_size(&self, binary_len: usize) -> usize {
        sizing::encoded_size(self.bits_per_symbol(), &self.config, binary_len)
    }

    /// Upper bound on the decoded length of `encoded_len` bytes of text.
    pub fn decoded_max_size(&self, encoded_len: usize) -> usize {
        sizing::decoded_max_size(self.bits_per_symbol(), encoded_len)
    }

    /// Encodes into a caller-provided buffer and returns the number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`Codec::encoded_size`] of `data`. An
    /// undersized destination is a bug at the call site, not bad input.
    pub fn encode_to_slice(&self, data: &[u8], out: &mut [u8]) -> usize {
        let required = self.encoded_size(data.len());
        assert!(
            out.len() >= required,
            "{}: encode destination holds {} bytes but {} are required",
            self.name,
            out.len(),
            required
        );
        let mut sink = SliceSink::new(out);
        encode_chunked(data, &self.alphabet, &self.config, &mut sink);
        debug_assert_eq!(sink.len(), required);
        sink.len()
    }

    /// Appends the encoding of `data` to `sink` and returns the number of bytes appended.
    pub fn encode_into<S: ByteSink + ?Sized>(&self, data: &[u8], sink: &mut S) -> usize {
        let start = sink.len();
        let required = self.encoded_size(data.len());
        sink.reserve(required);
        encode_chunked(data, &self.alphabet, &self.config, sink);
        let written = sink.len() - start;
        sink.finalize(start + written);
        written
    }

    pub fn encode_to_vec(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(data, &mut out);
        out
    }

    /// Encodes `data` as a string.
    pub fn encode(&self, data: &[u8]) -> String {
        let mut out = String::new();
        self.encode_into(data, &mut out);
        out
    }

    /// Decodes into a caller-provided buffer and returns the number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`Codec::decoded_max_size`] of the input.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is malformed. The contents of
    /// `out` are unspecified in that case.
    pub fn decode_to_slice(
        &self,
        encoded: impl AsRef<[u8]>,
        out: &mut [u8],
    ) -> Result<usize, DecodeError> {
        let encoded = encoded.as_ref();
        let required = self.decoded_max_size(encoded.len());
        assert!(
            out.len() >= required,
            "{}: decode destination holds {} bytes but {} are required",
            self.name,
            out.len(),
            required
        );
        let mut sink = SliceSink::new(out);
        decode_chunked(encoded, &self.alphabet, &self.lookup, &self.config, &mut sink)?;
        Ok(sink.len())
    }

    /// Appends the decoding of `encoded` to `sink` and returns the number of bytes appended.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is malformed; `sink` is restored
    /// to its original length.
    pub fn decode_into<S: ByteSink + ?Sized>(
        &self,
        encoded: impl AsRef<[u8]>,
        sink: &mut S,
    ) -> Result<usize, DecodeError> {
        let encoded = encoded.as_ref();
        let start = sink.len();
        sink.reserve(self.decoded_max_size(encoded.len()));
        match decode_chunked(encoded, &self.alphabet, &self.lookup, &self.config, sink) {
            Ok(()) => {
                let written = sink.len() - start;
                sink.finalize(start + written);
                Ok(written)
            }
            Err(err) => {
                sink.finalize(start);
                Err(err)
            }
        }
    }

    /// Decodes `encoded` into a new vector.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is malformed.
    pub fn decode(&self, encoded: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        self.decode_into(encoded, &mut out)?;
        Ok(out)
    }
}

/// Runtime construction of a [`Codec`] with validation.
///
/// # Example
///
/// ```
/// use base_bits::Codec;
///
/// let dna = Codec::builder("dna")
///     .alphabet("ACGT")
///     .case_insensitive()
///     .build()
///     .unwrap();
/// assert_eq!(dna.encode(b"A"), "CAAC");
/// assert_eq!(dna.decode("caac").unwrap(), b"A");
/// ```
#[derive(Debug, Clone)]
pub struct CodecBuilder {
    name: String,
    symbols: Vec<u8>,
    case: CaseRule,
    aliases: Vec<(u8, u8)>,
    padding: Option<u8>,
    padding_required: bool,
    line_break: Option<(usize, Vec<u8>)>,
    ignored: Vec<u8>,
    zero_pad: ZeroPadPolicy,
}

impl CodecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        CodecBuilder {
            name: name.into(),
            symbols: Vec::new(),
            case: CaseRule::Sensitive,
            aliases: Vec::new(),
            padding: None,
            padding_required: false,
            line_break: None,
            ignored: Vec::new(),
            zero_pad: ZeroPadPolicy::Streaming,
        }
    }

    pub fn alphabet(mut self, symbols: impl AsRef<[u8]>) -> Self {
        self.symbols = symbols.as_ref().to_vec();
        self
    }

    /// Sets the padding symbol; encoding pads and decoding requires it.
    pub fn padding(mut self, symbol: u8) -> Self {
        self.padding = Some(symbol);
        self.padding_required = true;
        self
    }

    /// Sets the padding symbol without requiring it: encoding does not pad,
    /// decoding accepts either no padding or exactly the right amount.
    pub fn optional_padding(mut self, symbol: u8) -> Self {
        self.padding = Some(symbol);
        self.padding_required = false;
        self
    }

    pub fn case(mut self, case: CaseRule) -> Self {
        self.case = case;
        self
    }

    pub fn case_insensitive(self) -> Self {
        self.case(CaseRule::Insensitive)
    }

    pub fn alias(mut self, alias: u8, canonical: u8) -> Self {
        self.aliases.push((alias, canonical));
        self
    }

    pub fn line_break(mut self, interval: usize, sequence: impl AsRef<[u8]>) -> Self {
        self.line_break = Some((interval, sequence.as_ref().to_vec()));
        self
    }

    pub fn ignore(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.ignored.extend_from_slice(bytes.as_ref());
        self
    }

    pub fn zero_pad(mut self, policy: ZeroPadPolicy) -> Self {
        self.zero_pad = policy;
        self
    }

    /// Validates the definition and builds the codec.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVariant`] if the alphabet, padding,
    /// aliases, line break or ignored bytes are inconsistent.
    pub fn build(self) -> Result<Codec, ConfigError> {
        let name = self.name;

        validate_policy(
            self.padding,
            self.padding_required,
            self.line_break
                .as_ref()
                .map(|(interval, sequence)| (*interval, sequence.as_slice())),
        )
        .map_err(|reason| ConfigError::invalid(&name, reason))?;

        let alphabet =
            Alphabet::new(self.symbols).map_err(|reason| ConfigError::invalid(&name, reason))?;

        let line_break_bytes = self
            .line_break
            .as_ref()
            .map_or(&[][..], |(_, sequence)| sequence.as_slice());
        let table = build_lookup(
            alphabet.symbols(),
            self.case,
            &self.aliases,
            self.padding,
            &[self.ignored.as_slice(), line_break_bytes],
        )
        .map_err(|reason| ConfigError::invalid(&name, reason))?;

        Ok(Codec {
            name: Cow::Owned(name),
            alphabet,
            lookup: ReverseLookup::from_table(table),
            config: CodecConfig {
                padding: self.padding,
                padding_required: self.padding_required,
                line_break: self.line_break.map(|(interval, sequence)| LineBreak {
                    interval,
                    sequence: Cow::Owned(sequence),
                }),
                ignored: Cow::Owned(self.ignored),
                case: self.case,
                zero_pad: self.zero_pad,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DNA: Codec = Codec::from_def(VariantDef::new("dna", b"ACGT").case_insensitive());

    #[test]
    fn test_const_codec() {
        assert_eq!(DNA.name(), "dna");
        assert_eq!(DNA.bits_per_symbol(), 2);
        assert_eq!(DNA.block_size(), 4);
        assert_eq!(DNA.encode(b"\x1b"), "ACGT");
        assert_eq!(DNA.decode("acgt").unwrap(), b"\x1b");
    }

    #[test]
    fn test_builder_matches_const_definition() {
        let built = Codec::builder("dna")
            .alphabet("ACGT")
            .case_insensitive()
            .build()
            .unwrap();
        assert_eq!(built.encode(b"hello"), DNA.encode(b"hello"));
        assert_eq!(built.lookup(), DNA.lookup());
    }

    #[test]
    fn test_builder_rejects_bad_alphabet() {
        let err = Codec::builder("broken").alphabet("ABC").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVariant { ref name, .. } if name == "broken"));

        let err = Codec::builder("dup").alphabet("AABC").build().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_builder_rejects_padding_in_alphabet() {
        let err = Codec::builder("hex")
            .alphabet("0123456789abcdef")
            .padding(b'a')
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("padding symbol is also a data symbol"));
    }

    #[test]
    fn test_optional_padding() {
        let b64 = Codec::builder("b64")
            .alphabet("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/")
            .optional_padding(b'=')
            .build()
            .unwrap();
        assert_eq!(b64.encode(b"f"), "Zg");
        assert_eq!(b64.decode("Zg").unwrap(), b"f");
        assert_eq!(b64.decode("Zg==").unwrap(), b"f");
        assert!(b64.decode("Zg=").is_err());
    }

    #[test]
    fn test_encode_to_slice_exact_capacity() {
        let mut out = [0u8; 4];
        assert_eq!(DNA.encode_to_slice(b"\xe4", &mut out), 4);
        assert_eq!(&out, b"TGCA");
    }

    #[test]
    #[should_panic(expected = "encode destination holds 3 bytes but 4 are required")]
    fn test_encode_to_slice_undersized() {
        let mut out = [0u8; 3];
        DNA.encode_to_slice(b"\xe4", &mut out);
    }

    #[test]
    #[should_panic(expected = "decode destination holds 0 bytes but 1 are required")]
    fn test_decode_to_slice_undersized() {
        let mut out = [0u8; 0];
        let _ = DNA.decode_to_slice("TGCA", &mut out);
    }

    #[test]
    fn test_decode_into_rolls_back_on_error() {
        let mut out = b"keep".to_vec();
        assert!(DNA.decode_into("TGCAX", &mut out).is_err());
        assert_eq!(out, b"keep");
        assert_eq!(DNA.decode_into("TGCA", &mut out), Ok(1));
        assert_eq!(out, b"keep\xe4");
    }

    #[test]
    fn test_encode_into_string() {
        let mut out = String::from("dna:");
        assert_eq!(DNA.encode_into(b"\x1b\xe4", &mut out), 8);
        assert_eq!(out, "dna:ACGTTGCA");
    }

    #[test]
    fn test_encode_into_appends() {
        let mut out = b"dna:".to_vec();
        assert_eq!(DNA.encode_into(b"\x1b", &mut out), 4);
        assert_eq!(out, b"dna:ACGT");
    }
}

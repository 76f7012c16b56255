use serde::Deserialize;
use std::borrow::Cow;

/// Lookup entry for bytes that are not part of the encoding.
pub const INVALID: u8 = 0xFF;
/// Lookup entry for bytes the decoder steps over (line breaks, separators).
pub const SKIP: u8 = 0xFE;
/// Lookup entry for the padding symbol.
pub const PADDING: u8 = 0xFD;

/// How the decoder treats letter case.
///
/// Encoding always emits the alphabet's canonical symbols; the rule only
/// widens what the decoder accepts.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseRule {
    /// Only the exact symbols of the alphabet decode.
    #[default]
    Sensitive,
    /// Upper and lower case forms of alphabetic symbols decode to the same value.
    Insensitive,
}

/// Ordered symbol table of an encoding.
///
/// The number of symbols is always a power of two between 2 and 64, which
/// fixes how many bits each symbol carries. Symbols are ASCII so that every
/// encoded output is valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Cow<'static, [u8]>,
    bits: u8,
}

impl Alphabet {
    /// Builds an alphabet from a static symbol list at compile time.
    ///
    /// Panics (during const evaluation) if the list is not a valid alphabet.
    pub const fn from_static(symbols: &'static [u8]) -> Self {
        let bits = match bits_for(symbols) {
            Ok(bits) => bits,
            Err(reason) => panic!("{}", reason),
        };
        Alphabet {
            symbols: Cow::Borrowed(symbols),
            bits,
        }
    }

    /// Builds an alphabet from an owned symbol list.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the list is empty, not a power
    /// of two in length, longer than 64 symbols, contains non-ASCII or
    /// duplicate symbols.
    pub fn new(symbols: Vec<u8>) -> Result<Self, &'static str> {
        let bits = bits_for(&symbols)?;
        Ok(Alphabet {
            symbols: Cow::Owned(symbols),
            bits,
        })
    }

    /// Number of payload bits each symbol represents.
    pub fn bits_per_symbol(&self) -> u8 {
        self.bits
    }

    /// Number of symbols (`2^bits_per_symbol`).
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Maps a value in `0..2^bits` to its canonical symbol.
    #[inline]
    pub fn symbol(&self, value: u8) -> u8 {
        self.symbols[value as usize]
    }
}

/// Inverse of an [`Alphabet`], extended with padding and skipped bytes.
///
/// Every byte maps to a value in `0..2^bits`, [`PADDING`], [`SKIP`] or
/// [`INVALID`]. Built once per variant and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ReverseLookup {
    table: [u8; 256],
}

/// What a single input byte means to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Value(u8),
    Padding,
    Skip,
    Invalid,
}

impl ReverseLookup {
    pub(crate) const fn from_table(table: [u8; 256]) -> Self {
        ReverseLookup { table }
    }

    #[inline]
    pub fn classify(&self, byte: u8) -> SymbolClass {
        match self.table[byte as usize] {
            INVALID => SymbolClass::Invalid,
            SKIP => SymbolClass::Skip,
            PADDING => SymbolClass::Padding,
            value => SymbolClass::Value(value),
        }
    }

    /// Returns the decoded value of `byte`, if it is a data symbol.
    pub fn value(&self, byte: u8) -> Option<u8> {
        match self.classify(byte) {
            SymbolClass::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ReverseLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let accepted = self.table.iter().filter(|&&entry| entry < PADDING).count();
        f.debug_struct("ReverseLookup")
            .field("accepted_symbols", &accepted)
            .finish()
    }
}

/// Validates a symbol list and returns its width in bits.
pub const fn bits_for(symbols: &[u8]) -> Result<u8, &'static str> {
    let bits = match symbols.len() {
        2 => 1,
        4 => 2,
        8 => 3,
        16 => 4,
        32 => 5,
        64 => 6,
        _ => return Err("alphabet length must be a power of two between 2 and 64"),
    };

    let mut i = 0;
    while i < symbols.len() {
        if !symbols[i].is_ascii() || symbols[i].is_ascii_control() {
            return Err("alphabet symbols must be printable ASCII");
        }
        let mut j = i + 1;
        while j < symbols.len() {
            if symbols[i] == symbols[j] {
                return Err("alphabet contains a duplicate symbol");
            }
            j += 1;
        }
        i += 1;
    }

    Ok(bits)
}

/// Builds the 256-entry reverse table for a variant.
///
/// `aliases` are `(alias, canonical)` pairs: the alias decodes to the value of
/// the canonical symbol. Bytes in any of the `skipped` sets are stepped over
/// by the decoder.
pub const fn build_lookup(
    symbols: &[u8],
    case: CaseRule,
    aliases: &[(u8, u8)],
    padding: Option<u8>,
    skipped: &[&[u8]],
) -> Result<[u8; 256], &'static str> {
    let mut table = [INVALID; 256];

    let mut i = 0;
    while i < symbols.len() {
        table[symbols[i] as usize] = i as u8;
        i += 1;
    }

    if let CaseRule::Insensitive = case {
        let mut i = 0;
        while i < symbols.len() {
            let symbol = symbols[i];
            let folded = if symbol.is_ascii_uppercase() {
                symbol.to_ascii_lowercase()
            } else {
                symbol.to_ascii_uppercase()
            };
            if folded != symbol {
                let existing = table[folded as usize];
                if existing != INVALID && existing != i as u8 {
                    return Err("case-insensitive alphabet contains both cases of a letter");
                }
                table[folded as usize] = i as u8;
            }
            i += 1;
        }
    }

    let mut i = 0;
    while i < aliases.len() {
        let (alias, canonical) = aliases[i];
        let value = table[canonical as usize];
        if value == INVALID {
            return Err("alias target is not an alphabet symbol");
        }
        if !alias.is_ascii() {
            return Err("alias must be ASCII");
        }
        if table[alias as usize] != INVALID && table[alias as usize] != value {
            return Err("alias collides with an alphabet symbol");
        }
        table[alias as usize] = value;
        if let CaseRule::Insensitive = case {
            let folded = if alias.is_ascii_uppercase() {
                alias.to_ascii_lowercase()
            } else {
                alias.to_ascii_uppercase()
            };
            if table[folded as usize] != INVALID && table[folded as usize] != value {
                return Err("alias collides with an alphabet symbol");
            }
            table[folded as usize] = value;
        }
        i += 1;
    }

    if let Some(pad) = padding {
        if table[pad as usize] != INVALID {
            return Err("padding symbol is also a data symbol");
        }
        table[pad as usize] = PADDING;
    }

    let mut set = 0;
    while set < skipped.len() {
        let bytes = skipped[set];
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];
            match table[byte as usize] {
                INVALID | SKIP => table[byte as usize] = SKIP,
                _ => return Err("skipped byte is also a data or padding symbol"),
            }
            i += 1;
        }
        set += 1;
    }

    Ok(table)
}

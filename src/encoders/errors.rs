use std::fmt;

use crate::core::config::ZeroPadPolicy;

/// Longest slice of the input quoted in an error message.
const CONTEXT_WIDTH: usize = 60;

/// Errors that can occur while decoding malformed text.
///
/// Every variant carries the byte offset into the encoded input where the
/// problem was detected. Encoding never produces these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contains a byte outside the variant's alphabet
    InvalidSymbol {
        symbol: u8,
        position: usize,
        /// Printable excerpt of the input surrounding the symbol
        context: String,
        /// Offset of the symbol inside `context`
        context_offset: usize,
        valid_symbols: String,
    },
    /// A data symbol follows a padding symbol
    SymbolAfterPadding { symbol: u8, position: usize },
    /// Padding is missing, or there are too few or too many padding symbols
    InvalidPadding {
        position: usize,
        expected: usize,
        actual: usize,
    },
    /// The last symbol group cannot be the encoding of any whole number of bytes
    InvalidLength {
        position: usize,
        data_symbols: usize,
        bits_per_symbol: u8,
    },
    /// Fill bits of the final symbol are not zero
    NonZeroTrailingBits {
        position: usize,
        policy: ZeroPadPolicy,
    },
}

impl DecodeError {
    /// Create an InvalidSymbol error with an excerpt of the input around `position`
    pub fn invalid_symbol(symbol: u8, position: usize, input: &[u8], alphabet: &[u8]) -> Self {
        let start = if input.len() > CONTEXT_WIDTH {
            position.saturating_sub(CONTEXT_WIDTH / 2)
        } else {
            0
        };
        let end = (start + CONTEXT_WIDTH).min(input.len());

        let mut context: String = input[start..end].iter().map(|&b| printable(b)).collect();
        if end < input.len() {
            context.push_str("...");
        }

        DecodeError::InvalidSymbol {
            symbol,
            position,
            context,
            context_offset: position - start,
            valid_symbols: alphabet.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// Byte offset into the encoded input at which decoding failed.
    pub fn position(&self) -> usize {
        match self {
            DecodeError::InvalidSymbol { position, .. }
            | DecodeError::SymbolAfterPadding { position, .. }
            | DecodeError::InvalidPadding { position, .. }
            | DecodeError::InvalidLength { position, .. }
            | DecodeError::NonZeroTrailingBits { position, .. } => *position,
        }
    }

    /// One-line description without position or hints.
    pub fn description(&self) -> String {
        match self {
            DecodeError::InvalidSymbol { symbol, .. } => {
                format!("invalid symbol {}", quoted(*symbol))
            }
            DecodeError::SymbolAfterPadding { symbol, .. } => {
                format!("data symbol {} after padding", quoted(*symbol))
            }
            DecodeError::InvalidPadding {
                expected, actual, ..
            } => format!("expected {expected} padding symbols, found {actual}"),
            DecodeError::InvalidLength {
                data_symbols,
                bits_per_symbol,
                ..
            } => format!(
                "{data_symbols} symbols of {bits_per_symbol} bits do not form a whole number of bytes"
            ),
            DecodeError::NonZeroTrailingBits { .. } => {
                "final symbol has nonzero fill bits".to_string()
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        if use_color {
            write!(f, "\x1b[1;31merror:\x1b[0m ")?;
        } else {
            write!(f, "error: ")?;
        }
        write!(f, "{} at position {}", self.description(), self.position())?;

        let hint = match self {
            DecodeError::InvalidSymbol {
                context,
                context_offset,
                valid_symbols,
                ..
            } => {
                writeln!(f)?;
                writeln!(f)?;
                // Show input with caret pointing at error position
                writeln!(f, "  {}", context)?;
                write!(f, "  {}", " ".repeat(*context_offset))?;
                if use_color {
                    writeln!(f, "\x1b[1;31m^\x1b[0m")?;
                } else {
                    writeln!(f, "^")?;
                }
                format!("valid symbols: {}", valid_symbols)
            }
            DecodeError::SymbolAfterPadding { .. } => {
                writeln!(f)?;
                "padding may only appear at the end of the input".to_string()
            }
            DecodeError::InvalidPadding { .. } => {
                writeln!(f)?;
                "check for missing or extra padding characters at the end of the input".to_string()
            }
            DecodeError::InvalidLength { .. } => {
                writeln!(f)?;
                "the input looks truncated or has a stray symbol".to_string()
            }
            DecodeError::NonZeroTrailingBits { policy, .. } => {
                writeln!(f)?;
                match policy {
                    ZeroPadPolicy::Streaming => {
                        "the low bits of the last symbol must be zero".to_string()
                    }
                    ZeroPadPolicy::Positional => {
                        "the high bits of the last symbol must be zero".to_string()
                    }
                }
            }
        };

        writeln!(f)?;
        if use_color {
            write!(f, "\x1b[1;36mhint:\x1b[0m {}", hint)
        } else {
            write!(f, "hint: {}", hint)
        }
    }
}

impl std::error::Error for DecodeError {}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        char::from(byte)
    } else {
        '.'
    }
}

fn quoted(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", char::from(byte))
    } else {
        format!("0x{byte:02X}")
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Error when a variant name is not known to a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantNotFoundError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl VariantNotFoundError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for VariantNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        if use_color {
            write!(f, "\x1b[1;31merror:\x1b[0m variant '{}' not found", self.name)?;
        } else {
            write!(f, "error: variant '{}' not found", self.name)?;
        }

        if let Some(suggestion) = &self.suggestion {
            writeln!(f)?;
            writeln!(f)?;
            if use_color {
                write!(f, "\x1b[1;36mhint:\x1b[0m did you mean '{}'?", suggestion)?;
            } else {
                write!(f, "hint: did you mean '{}'?", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for VariantNotFoundError {}

/// Errors raised while building a codec from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid variant '{name}': {reason}")]
    InvalidVariant { name: String, reason: String },
    #[error("failed to parse variant definitions: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    NotFound(#[from] VariantNotFoundError),
}

impl ConfigError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidVariant {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest matching variant name
pub fn find_closest_variant<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    // 1-2 character typos for short names, up to 3 for longer names
    let threshold = if name.len() < 5 { 2 } else { 3 };

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for candidate in available {
        let distance = levenshtein_distance(name, candidate);
        if distance < best_distance && distance <= threshold {
            best_distance = distance;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}

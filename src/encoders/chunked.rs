//! Bit-group engine.
//!
//! Regroups a byte stream into symbols of `bits_per_symbol` bits and back.
//! The same driver serves every variant; alphabet, reverse lookup and policy
//! record are the only inputs that differ.

use crate::core::alphabet::{Alphabet, ReverseLookup, SymbolClass};
use crate::core::config::{CodecConfig, LineBreak, ZeroPadPolicy};
use crate::sink::ByteSink;

use super::errors::DecodeError;
use super::sizing;

/// Writes symbols to a sink, inserting the line-break sequence every
/// `interval` symbols. Padding counts like any other symbol.
struct SymbolWriter<'a, S: ByteSink + ?Sized> {
    sink: &'a mut S,
    line_break: Option<&'a LineBreak>,
    emitted: usize,
}

impl<'a, S: ByteSink + ?Sized> SymbolWriter<'a, S> {
    fn new(sink: &'a mut S, line_break: Option<&'a LineBreak>) -> Self {
        SymbolWriter {
            sink,
            line_break,
            emitted: 0,
        }
    }

    #[inline]
    fn push(&mut self, symbol: u8) {
        if let Some(line_break) = self.line_break
            && self.emitted > 0
            && self.emitted % line_break.interval == 0
        {
            self.sink.push_slice(&line_break.sequence);
        }
        self.sink.push_byte(symbol);
        self.emitted += 1;
    }
}

/// Encodes `data` into `sink`. Never fails.
///
/// The sink must already have room for the full encoding; fixed-capacity
/// sinks check that in [`ByteSink::reserve`].
pub fn encode_chunked<S: ByteSink + ?Sized>(
    data: &[u8],
    alphabet: &Alphabet,
    config: &CodecConfig,
    sink: &mut S,
) {
    let bits = u32::from(alphabet.bits_per_symbol());
    let mask = (1u32 << bits) - 1;

    let mut out = SymbolWriter::new(sink, config.line_break.as_ref());

    let mut bit_buffer = 0u32;
    let mut bits_in_buffer = 0u32;

    for &byte in data {
        bit_buffer = (bit_buffer << 8) | u32::from(byte);
        bits_in_buffer += 8;

        while bits_in_buffer >= bits {
            bits_in_buffer -= bits;
            let index = (bit_buffer >> bits_in_buffer) & mask;
            out.push(alphabet.symbol(index as u8));
        }
        bit_buffer &= (1u32 << bits_in_buffer) - 1;
    }

    // Handle remaining bits
    if bits_in_buffer > 0 {
        let index = match config.zero_pad {
            ZeroPadPolicy::Streaming => (bit_buffer << (bits - bits_in_buffer)) & mask,
            ZeroPadPolicy::Positional => bit_buffer,
        };
        out.push(alphabet.symbol(index as u8));
    }

    if config.padding_required
        && let Some(pad_symbol) = config.padding
    {
        let block = sizing::block_size(alphabet.bits_per_symbol());
        while out.emitted % block != 0 {
            out.push(pad_symbol);
        }
    }
}

/// Decoder position within the input grammar.
///
/// Reaching the end of input from either state finishes the decode; any
/// violation ends it with a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    ExpectingData,
    InPadding { first_padding: usize },
}

/// Decodes `encoded` into `sink`.
///
/// On error the sink may hold a partial result; callers roll it back.
pub fn decode_chunked<S: ByteSink + ?Sized>(
    encoded: &[u8],
    alphabet: &Alphabet,
    lookup: &ReverseLookup,
    config: &CodecConfig,
    sink: &mut S,
) -> Result<(), DecodeError> {
    let bits = u32::from(alphabet.bits_per_symbol());

    let mut state = DecodeState::ExpectingData;
    let mut bit_buffer = 0u32;
    let mut bits_in_buffer = 0u32;
    let mut data_symbols = 0usize;
    let mut padding_symbols = 0usize;

    // The most recent data symbol is held back until the next one arrives,
    // because the final symbol is aligned according to the zero-pad policy.
    let mut pending: Option<(u8, usize)> = None;

    for (position, &byte) in encoded.iter().enumerate() {
        match lookup.classify(byte) {
            SymbolClass::Skip => {}
            SymbolClass::Padding => {
                if state == DecodeState::ExpectingData {
                    state = DecodeState::InPadding {
                        first_padding: position,
                    };
                }
                padding_symbols += 1;
            }
            SymbolClass::Value(value) => {
                if let DecodeState::InPadding { .. } = state {
                    return Err(DecodeError::SymbolAfterPadding {
                        symbol: byte,
                        position,
                    });
                }
                if let Some((previous, _)) = pending.replace((value, position)) {
                    bit_buffer = (bit_buffer << bits) | u32::from(previous);
                    bits_in_buffer += bits;

                    while bits_in_buffer >= 8 {
                        bits_in_buffer -= 8;
                        sink.push_byte((bit_buffer >> bits_in_buffer) as u8);
                    }
                    bit_buffer &= (1u32 << bits_in_buffer) - 1;
                }
                data_symbols += 1;
            }
            SymbolClass::Invalid => {
                return Err(DecodeError::invalid_symbol(
                    byte,
                    position,
                    encoded,
                    alphabet.symbols(),
                ));
            }
        }
    }

    let leftover = ((data_symbols % 8) as u32 * bits) % 8;
    if leftover >= bits {
        return Err(DecodeError::InvalidLength {
            position: pending.map_or(encoded.len(), |(_, position)| position),
            data_symbols,
            bits_per_symbol: alphabet.bits_per_symbol(),
        });
    }

    if config.padding_required || padding_symbols > 0 {
        let block = sizing::block_size(alphabet.bits_per_symbol());
        let remainder = data_symbols % block;
        let expected = if remainder == 0 { 0 } else { block - remainder };
        if padding_symbols != expected {
            let position = match state {
                DecodeState::InPadding { first_padding } => first_padding,
                DecodeState::ExpectingData => encoded.len(),
            };
            return Err(DecodeError::InvalidPadding {
                position,
                expected,
                actual: padding_symbols,
            });
        }
    }

    if let Some((value, position)) = pending {
        let value = u32::from(value);
        let payload_bits = bits - leftover;
        let fill_mask = (1u32 << leftover) - 1;

        let payload = match config.zero_pad {
            ZeroPadPolicy::Streaming => {
                if value & fill_mask != 0 {
                    return Err(DecodeError::NonZeroTrailingBits {
                        position,
                        policy: config.zero_pad,
                    });
                }
                value >> leftover
            }
            ZeroPadPolicy::Positional => {
                if value >> payload_bits != 0 {
                    return Err(DecodeError::NonZeroTrailingBits {
                        position,
                        policy: config.zero_pad,
                    });
                }
                value
            }
        };

        bit_buffer = (bit_buffer << payload_bits) | payload;
        bits_in_buffer += payload_bits;
        while bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            sink.push_byte((bit_buffer >> bits_in_buffer) as u8);
        }
    }

    debug_assert_eq!(bits_in_buffer, 0);
    Ok(())
}

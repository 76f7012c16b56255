//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use base_bits::prelude::*;
//!
//! let registry = VariantRegistry::load_default().unwrap();
//! let codec = registry.resolve("base32_z").unwrap();
//! let encoded = encode(b"Hello", &codec);
//! assert_eq!(decode(&encoded, &codec).unwrap(), b"Hello");
//! ```

pub use crate::{
    ByteSink,
    CaseRule,
    Codec,
    CodecBuilder,

    // Errors
    ConfigError,
    DecodeError,
    SliceSink,
    VariantNotFoundError,

    // Configuration
    VariantRegistry,
    ZeroPadPolicy,

    decode,
    encode,
    variants,
};

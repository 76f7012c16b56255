use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::alphabet::CaseRule;
use super::codec::Codec;
use super::config::ZeroPadPolicy;
use super::variants;
use crate::encoders::errors::{ConfigError, VariantNotFoundError, find_closest_variant};

/// Line wrapping as written in a variant definition.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LineBreakConfig {
    pub interval: usize,
    #[serde(default = "default_sequence")]
    pub sequence: String,
}

fn default_sequence() -> String {
    "\r\n".to_string()
}

/// Configuration for a single variant loaded from TOML.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VariantConfig {
    /// The symbols of the alphabet, in value order
    pub alphabet: String,
    /// Optional padding symbol (e.g. "=")
    #[serde(default)]
    pub padding: Option<String>,
    /// Whether padding is emitted and enforced (default: true when `padding` is set)
    #[serde(default)]
    pub padding_required: Option<bool>,
    #[serde(default)]
    pub case: CaseRule,
    /// Extra spellings accepted by the decoder, alias → canonical symbol
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Bytes the decoder skips (e.g. "-")
    #[serde(default)]
    pub ignore: String,
    #[serde(default)]
    pub line_break: Option<LineBreakConfig>,
    #[serde(default)]
    pub zero_pad: ZeroPadPolicy,
}

impl VariantConfig {
    /// Builds a codec named `name` from this definition.
    pub fn build(&self, name: &str) -> Result<Codec, ConfigError> {
        let mut builder = Codec::builder(name)
            .alphabet(&self.alphabet)
            .case(self.case)
            .ignore(&self.ignore)
            .zero_pad(self.zero_pad);

        if let Some(padding) = &self.padding {
            let symbol = single_byte(name, "padding", padding)?;
            builder = if self.padding_required.unwrap_or(true) {
                builder.padding(symbol)
            } else {
                builder.optional_padding(symbol)
            };
        } else if self.padding_required == Some(true) {
            return Err(ConfigError::invalid(
                name,
                "padding_required is set but no padding symbol is configured",
            ));
        }

        for (alias, canonical) in &self.aliases {
            builder = builder.alias(
                single_byte(name, "alias", alias)?,
                single_byte(name, "alias target", canonical)?,
            );
        }

        if let Some(line_break) = &self.line_break {
            builder = builder.line_break(line_break.interval, &line_break.sequence);
        }

        builder.build()
    }
}

fn single_byte(name: &str, field: &str, value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ConfigError::invalid(
            name,
            format!("{field} must be a single ASCII character, got {value:?}"),
        )),
    }
}

/// Collection of custom variant definitions loaded from TOML files.
///
/// Resolution checks custom definitions first and falls back to the
/// built-in variants.
#[derive(Debug, Deserialize, Default)]
pub struct VariantRegistry {
    /// Map of variant names to their configurations
    #[serde(default)]
    pub variants: HashMap<String, VariantConfig>,
}

impl VariantRegistry {
    /// Parses variant definitions from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the variant definitions bundled with the library.
    pub fn load_default() -> Result<Self, ConfigError> {
        let content = include_str!("../../variants.toml");
        Self::from_toml(content)
    }

    /// Loads definitions from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads definitions with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Bundled definitions (from library)
    /// 2. `~/.config/base-bits/variants.toml` (user overrides)
    /// 3. `./variants.toml` (project-local overrides)
    ///
    /// Later files override earlier ones for matching variant names. A file
    /// that fails to load is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, ConfigError> {
        let mut registry = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("base-bits").join("variants.toml");
            registry.merge_file(&user_path);
        }

        registry.merge_file(Path::new("variants.toml"));

        Ok(registry)
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(overrides) => {
                tracing::debug!(
                    path = %path.display(),
                    count = overrides.variants.len(),
                    "loaded variant overrides"
                );
                self.merge(overrides);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load variant overrides");
            }
        }
    }

    /// Merges another registry into this one.
    ///
    /// Variants from `other` replace variants with the same name in `self`.
    pub fn merge(&mut self, other: VariantRegistry) {
        for (name, variant) in other.variants {
            self.variants.insert(name, variant);
        }
    }

    /// Retrieves a custom variant definition by name.
    pub fn get_variant(&self, name: &str) -> Option<&VariantConfig> {
        self.variants.get(name)
    }

    /// Names of every custom and built-in variant, sorted and deduplicated.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .variants
            .keys()
            .map(String::as_str)
            .chain(variants::BUILTIN.iter().map(|codec| codec.name()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Resolves `name` to a codec.
    ///
    /// A custom definition with the same name as a built-in variant takes
    /// precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] (with a spelling suggestion when one
    /// is close) for unknown names and [`ConfigError::InvalidVariant`] for
    /// inconsistent custom definitions.
    pub fn resolve(&self, name: &str) -> Result<Codec, ConfigError> {
        if let Some(config) = self.get_variant(name) {
            if variants::builtin(name).is_some() {
                tracing::debug!(variant = name, "custom definition shadows built-in variant");
            }
            return config.build(name);
        }

        if let Some(codec) = variants::builtin(name) {
            return Ok(codec.clone());
        }

        let suggestion = find_closest_variant(name, self.names());
        Err(VariantNotFoundError::new(name, suggestion).into())
    }
}

//! Start-up configuration read from the environment.

use colorgate_color::LchVariant;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ColorSupport, Converter, Registry};

/// Working color function, `oklch` or `lch`.
pub const COLOR_FN_VAR: &str = "COLORGATE_COLOR_FN";
/// Whether the display covers Display P3.
pub const P3_VAR: &str = "COLORGATE_P3";
/// Whether the display covers Rec.2020.
pub const REC2020_VAR: &str = "COLORGATE_REC2020";

/// Errors raised while reading [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A boolean variable held something other than a recognised flag.
    #[error("`{var}` must be a boolean flag, got `{value}`")]
    InvalidFlag {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
    /// The working color function is neither `oklch` nor `lch`.
    #[error("unknown color function `{0}`, expected `oklch` or `lch`")]
    UnknownColorFunction(String),
}

/// Working space and declared display capability.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Cylindrical space colors are built and clamped in.
    pub color_fn: LchVariant,
    /// Declared display capability.
    pub support: ColorSupport,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable cannot be interpreted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            [COLOR_FN_VAR, P3_VAR, REC2020_VAR]
                .into_iter()
                .filter_map(|key| std::env::var(key).ok().map(|value| (key, value))),
        )
    }

    /// Reads the configuration from `(name, value)` pairs.
    ///
    /// Unknown names are ignored; missing names keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a known variable cannot be interpreted.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value = value.as_ref().trim();
            match key.as_ref() {
                COLOR_FN_VAR => config.color_fn = color_fn(value)?,
                P3_VAR => config.support.p3 = flag(P3_VAR, value)?,
                REC2020_VAR => config.support.rec2020 = flag(REC2020_VAR, value)?,
                _ => {}
            }
        }
        Ok(config)
    }

    /// Converter over every standard mode, working in [`Config::color_fn`].
    #[must_use]
    pub const fn converter(&self) -> Converter {
        Converter::new(Registry::standard(), self.color_fn)
    }
}

fn color_fn(value: &str) -> Result<LchVariant, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "oklch" => Ok(LchVariant::Oklch),
        "lch" => Ok(LchVariant::Lch),
        _ => Err(ConfigError::UnknownColorFunction(value.to_owned())),
    }
}

fn flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_owned(),
        }),
    }
}

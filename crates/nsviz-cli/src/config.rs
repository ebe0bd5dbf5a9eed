//! `nsviz.toml` loading and validation.
//!
//! File values are overridden by command-line flags, then validated once into
//! [`Settings`]. Nothing past this module sees a raw config value.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use strum_macros::{Display, EnumString};

use nsviz_core::{BuildMode, LayoutProfile, StyleSheet};
use nsviz_error::{Error, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "nsviz.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LayoutChoice {
    None,
    #[default]
    Standard,
    Aggregation,
    /// Styles come from the `[styles]` table.
    Custom,
}

/// Raw contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<String>,
    pub group_length: Option<i64>,
    pub layout: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub styles: Option<StyleSheet>,
}

impl FileConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| {
            Error::deserialization_failed(err.message().to_string())
                .with_operation("config::from_toml_str")
                .set_source(err)
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("config::load")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_toml_str(&source).map_err(|err| {
            err.with_operation("config::load")
                .with_context("path", path.display().to_string())
        })
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] from `dir` if it
    /// exists, else an empty config.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!(path = %fallback.display(), "using config from working directory");
            return Self::load(&fallback);
        }
        Ok(Self::default())
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub mode: Option<String>,
    pub group_length: Option<i64>,
    pub layout: Option<String>,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Analysis JSON; `-` reads stdin.
    pub input: PathBuf,
    /// DOT output; stdout when absent.
    pub output: Option<PathBuf>,
    pub mode: BuildMode,
    pub group_length: usize,
    pub layout: StyleSheet,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let input = overrides.input.or(file.input).ok_or_else(|| {
            Error::config_invalid("no analysis input given (set `input` or pass --input)")
                .with_operation("config::resolve")
        })?;

        let mode = match overrides.mode.or(file.mode) {
            Some(mode) => BuildMode::parse(&mode)?,
            None => BuildMode::default(),
        };

        let group_length = match overrides.group_length.or(file.group_length) {
            Some(length) => usize::try_from(length).map_err(|_| {
                Error::config_invalid(format!("group_length must be >= 0, got {length}"))
                    .with_operation("config::resolve")
                    .with_context("group_length", length.to_string())
            })?,
            None => 0,
        };

        let choice = match overrides.layout.or(file.layout) {
            Some(layout) => parse_layout(&layout)?,
            None => LayoutChoice::default(),
        };
        let layout = resolve_layout(choice, file.styles)?;

        Ok(Self {
            input,
            output: overrides.output.or(file.output),
            mode,
            group_length,
            layout,
        })
    }
}

fn parse_layout(value: &str) -> Result<LayoutChoice> {
    LayoutChoice::from_str(value).map_err(|_| {
        Error::config_invalid(format!(
            "unknown layout '{value}', expected 'none', 'standard', 'aggregation' or 'custom'"
        ))
        .with_operation("config::parse_layout")
        .with_context("layout", value)
    })
}

fn resolve_layout(choice: LayoutChoice, styles: Option<StyleSheet>) -> Result<StyleSheet> {
    let profile = match choice {
        LayoutChoice::Custom => return custom_layout(styles),
        LayoutChoice::None => LayoutProfile::None,
        LayoutChoice::Standard => LayoutProfile::Standard,
        LayoutChoice::Aggregation => LayoutProfile::Aggregation,
    };
    if styles.is_some() {
        return Err(
            Error::config_invalid("[styles] is only read with layout = \"custom\"")
                .with_operation("config::resolve_layout")
                .with_context("layout", choice.to_string()),
        );
    }
    Ok(profile.style_sheet())
}

fn custom_layout(styles: Option<StyleSheet>) -> Result<StyleSheet> {
    let styles = styles.ok_or_else(|| {
        Error::config_invalid("layout = \"custom\" needs a [styles] table")
            .with_operation("config::resolve_layout")
    })?;
    let missing = styles.missing_keys();
    if !missing.is_empty() {
        let names = missing
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(
            Error::config_invalid(format!("[styles] is missing {names}"))
                .with_operation("config::resolve_layout")
                .with_context("missing", names),
        );
    }
    Ok(styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsviz_core::{Layout, StyleKey};
    use nsviz_error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn with_input() -> FileConfig {
        FileConfig {
            input: Some(PathBuf::from("analysis.json")),
            ..FileConfig::default()
        }
    }

    #[test]
    fn defaults() {
        let settings = Settings::resolve(with_input(), Overrides::default()).unwrap();
        assert_eq!(settings.mode, BuildMode::Structural);
        assert_eq!(settings.group_length, 0);
        assert_eq!(settings.output, None);
        assert_eq!(settings.layout, StyleSheet::standard());
    }

    #[test]
    fn overrides_win() {
        let file = FileConfig {
            mode: Some("structural".to_string()),
            group_length: Some(1),
            ..with_input()
        };
        let overrides = Overrides {
            mode: Some("call".to_string()),
            group_length: Some(2),
            layout: Some("none".to_string()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(file, overrides).unwrap();
        assert_eq!(settings.mode, BuildMode::Call);
        assert_eq!(settings.group_length, 2);
        assert_eq!(settings.layout.style(StyleKey::Graph).map(|s| s.len()), Some(0));
    }

    #[test]
    fn negative_group_length_is_rejected() {
        let file = FileConfig {
            group_length: Some(-1),
            ..with_input()
        };
        let err = Settings::resolve(file, Overrides::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context_value("group_length"), Some("-1"));
    }

    #[test]
    fn missing_input_is_rejected() {
        let err = Settings::resolve(FileConfig::default(), Overrides::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        let file = FileConfig {
            layout: Some("fancy".to_string()),
            ..with_input()
        };
        let err = Settings::resolve(file, Overrides::default()).unwrap_err();
        assert_eq!(err.context_value("layout"), Some("fancy"));
    }

    #[test]
    fn styles_need_the_custom_layout() {
        let file = FileConfig {
            styles: Some(StyleSheet::empty()),
            ..with_input()
        };
        assert!(Settings::resolve(file, Overrides::default()).is_err());

        let file = FileConfig {
            layout: Some("custom".to_string()),
            styles: Some(StyleSheet::empty()),
            ..with_input()
        };
        assert_eq!(
            Settings::resolve(file, Overrides::default()).unwrap().layout,
            StyleSheet::empty()
        );
    }
}

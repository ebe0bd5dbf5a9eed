//! Name filters applied to collected names before they reach a record.

use regex::Regex;
use serde::{Deserialize, Serialize};

use nsviz_error::{Error, Result};

use crate::name::{Name, Segments};

/// Decides whether a collected name is kept, and in which form.
///
/// Returning `None` drops the name.
pub trait NodeNameFilter {
    fn filter(&self, name: Name) -> Option<Name>;
}

impl<F> NodeNameFilter for F
where
    F: Fn(Name) -> Option<Name>,
{
    fn filter(&self, name: Name) -> Option<Name> {
        self(name)
    }
}

/// Keeps every name unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl NodeNameFilter for PassThrough {
    fn filter(&self, name: Name) -> Option<Name> {
        Some(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NameFilterConfig {
    /// Names under any of these namespaces are dropped.
    pub ignored_namespaces: Vec<String>,
    /// Names whose fully-qualified form matches are dropped.
    pub exclude_pattern: Option<String>,
    /// Leading segments removed from kept names.
    pub slice_offset: usize,
    /// Segments kept after the offset; 0 keeps the rest.
    pub slice_length: usize,
    /// Names with fewer segments are dropped.
    pub min_depth: usize,
}

/// Configurable namespace filter.
///
/// Checks run in order: depth, ignored namespaces, exclude pattern. A name
/// that passes is then sliced; an empty slice drops it.
#[derive(Debug, Clone)]
pub struct NameFilter {
    ignored: Vec<Name>,
    exclude: Option<Regex>,
    slice_offset: usize,
    slice_length: usize,
    min_depth: usize,
}

impl NameFilter {
    pub fn from_config(config: &NameFilterConfig) -> Result<Self> {
        let ignored = config
            .ignored_namespaces
            .iter()
            .map(|namespace| {
                Name::parse(namespace).map_err(|err| {
                    Error::config_invalid(format!("ignored namespace: {}", err.message()))
                        .with_operation("filter::from_config")
                        .with_context("namespace", namespace.as_str())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let exclude = config
            .exclude_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| {
                    Error::config_invalid(format!("exclude pattern: {}", err))
                        .with_operation("filter::from_config")
                        .with_context("pattern", pattern)
                })
            })
            .transpose()?;

        Ok(Self {
            ignored,
            exclude,
            slice_offset: config.slice_offset,
            slice_length: config.slice_length,
            min_depth: config.min_depth,
        })
    }

    fn accepts(&self, name: &Name) -> bool {
        if name.depth() < self.min_depth {
            return false;
        }
        if self.ignored.iter().any(|ignored| name.starts_with(ignored)) {
            return false;
        }
        !self
            .exclude
            .as_ref()
            .is_some_and(|exclude| exclude.is_match(name.fully_qualified()))
    }

    fn slice(&self, name: Name) -> Option<Name> {
        if self.slice_offset == 0 && self.slice_length == 0 {
            return Some(name);
        }

        let rest = name.segments().iter().skip(self.slice_offset);
        let segments: Segments = if self.slice_length == 0 {
            rest.cloned().collect()
        } else {
            rest.take(self.slice_length).cloned().collect()
        };
        if segments.is_empty() {
            return None;
        }
        Some(Name::from_parts(
            segments,
            name.separator(),
            name.attributes().clone(),
        ))
    }
}

impl NodeNameFilter for NameFilter {
    fn filter(&self, name: Name) -> Option<Name> {
        if !self.accepts(&name) {
            tracing::trace!(name = %name, "name filtered out");
            return None;
        }
        self.slice(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsviz_error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn name(fqn: &str) -> Name {
        Name::parse(fqn).unwrap()
    }

    fn filter(config: NameFilterConfig) -> NameFilter {
        NameFilter::from_config(&config).unwrap()
    }

    fn kept(filter: &NameFilter, fqn: &str) -> Option<String> {
        filter
            .filter(name(fqn))
            .map(|name| name.fully_qualified().to_string())
    }

    #[test]
    fn default_config_keeps_everything() {
        let filter = filter(NameFilterConfig::default());
        assert_eq!(kept(&filter, "App\\A"), Some("App\\A".to_string()));
    }

    #[test]
    fn ignored_namespaces_match_whole_segments() {
        let filter = filter(NameFilterConfig {
            ignored_namespaces: vec!["Vendor".to_string()],
            ..NameFilterConfig::default()
        });
        assert_eq!(kept(&filter, "Vendor\\Lib\\X"), None);
        assert_eq!(kept(&filter, "VendorLib\\X"), Some("VendorLib\\X".to_string()));
    }

    #[test]
    fn exclude_pattern_and_depth() {
        let filter = filter(NameFilterConfig {
            exclude_pattern: Some("Test$".to_string()),
            min_depth: 2,
            ..NameFilterConfig::default()
        });
        assert_eq!(kept(&filter, "App\\UserTest"), None);
        assert_eq!(kept(&filter, "Exception"), None);
        assert_eq!(kept(&filter, "App\\User"), Some("App\\User".to_string()));
    }

    #[test]
    fn slicing_keeps_attributes() {
        let filter = filter(NameFilterConfig {
            slice_offset: 1,
            slice_length: 1,
            ..NameFilterConfig::default()
        });
        let mut input = name("App\\Service\\Mailer");
        input.set_attribute("line", "12");

        let sliced = filter.filter(input).unwrap();
        assert_eq!(sliced.fully_qualified(), "Service");
        assert_eq!(sliced.attributes().get("line").map(String::as_str), Some("12"));
        assert_eq!(kept(&filter, "App"), None);
    }

    #[test]
    fn bad_pattern_is_a_config_error() {
        let err = NameFilter::from_config(&NameFilterConfig {
            exclude_pattern: Some("(".to_string()),
            ..NameFilterConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context_value("pattern"), Some("("));
    }

    #[test]
    fn closures_are_filters() {
        let drop_all = |_: Name| None;
        assert!(drop_all.filter(name("App\\A")).is_none());
        assert!(PassThrough.filter(name("App\\A")).is_some());
    }
}

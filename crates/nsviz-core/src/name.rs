use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use nsviz_error::{Error, Result};

/// Namespace separator used when a name is built from segments.
pub const NAMESPACE_SEPARATOR: &str = "\\";

/// Separators recognized when parsing, in priority order.
const SEPARATORS: [&str; 3] = [NAMESPACE_SEPARATOR, "::", "."];

/// Source attributes of the syntax node a name came from (position, raw text, ...).
pub type Attributes = BTreeMap<String, String>;

pub(crate) type Segments = SmallVec<[String; 4]>;

/// A fully-qualified, namespaced identifier and its ordered path segments.
///
/// Equality and hashing only look at the segments: `App\A`, `\App\A` and
/// `App::A` are the same name, and all of them have the fully-qualified form
/// `App\A`. Attributes ride along for diagnostics and never affect identity.
#[derive(Clone, Serialize)]
#[serde(into = "String")]
pub struct Name {
    fully_qualified: String,
    segments: Segments,
    separator: &'static str,
    attributes: Attributes,
}

impl Name {
    /// Parse a fully-qualified name.
    ///
    /// The separator is the first of `\`, `::` and `.` found in the input. A
    /// leading separator is ignored, as are empty segments. The fully-qualified
    /// form is always rejoined with `\`.
    pub fn parse(input: &str) -> Result<Self> {
        let separator = SEPARATORS
            .iter()
            .copied()
            .find(|sep| input.contains(sep))
            .unwrap_or(NAMESPACE_SEPARATOR);

        let segments: Segments = input
            .split(separator)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            return Err(Error::invalid_name(format!("'{}' has no segments", input))
                .with_operation("name::parse")
                .with_context("name", input));
        }

        Ok(Self::from_parts(segments, separator, Attributes::new()))
    }

    /// Build a name from already split segments, joined with `\`.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Segments = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(Error::invalid_name("segments must be non-empty")
                .with_operation("name::from_segments"));
        }
        Ok(Self::from_parts(segments, NAMESPACE_SEPARATOR, Attributes::new()))
    }

    /// A single-segment name for a fixed keyword, e.g. `eval`.
    pub fn keyword(keyword: &'static str, attributes: Attributes) -> Self {
        let mut segments = Segments::new();
        segments.push(keyword.to_string());
        Self::from_parts(segments, NAMESPACE_SEPARATOR, attributes)
    }

    pub(crate) fn from_parts(
        segments: Segments,
        separator: &'static str,
        attributes: Attributes,
    ) -> Self {
        Self {
            fully_qualified: segments.join(NAMESPACE_SEPARATOR),
            segments,
            separator,
            attributes,
        }
    }

    pub fn fully_qualified(&self) -> &str {
        &self.fully_qualified
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Separator the name was written with.
    pub fn separator(&self) -> &'static str {
        self.separator
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The first `n` segments, or all of them when the name is shorter.
    pub fn prefix(&self, n: usize) -> &[String] {
        &self.segments[..n.min(self.segments.len())]
    }

    /// True when `other`'s segments are a leading run of this name's segments.
    pub fn starts_with(&self, other: &Name) -> bool {
        self.segments.starts_with(&other.segments)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attributes.is_empty() {
            write!(f, "Name({})", self.fully_qualified)
        } else {
            write!(f, "Name({}, {:?})", self.fully_qualified, self.attributes)
        }
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Name::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for Name {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Name::parse(&value)
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Name::parse(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.fully_qualified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_splits_on_backslash_and_drops_leading_separator() {
        let name = Name::parse("\\App\\Service\\Mailer").unwrap();
        assert_eq!(name.segments(), ["App", "Service", "Mailer"]);
        assert_eq!(name.fully_qualified(), "App\\Service\\Mailer");
        assert_eq!(name.depth(), 3);
    }

    #[test]
    fn parse_falls_back_to_other_separators() {
        let name = Name::parse("app::service::Mailer").unwrap();
        assert_eq!(name.segments(), ["app", "service", "Mailer"]);
        assert_eq!(name.separator(), "::");
        assert_eq!(name.fully_qualified(), "app\\service\\Mailer");

        let dotted = Name::parse("app.service.Mailer").unwrap();
        assert_eq!(dotted, name);
    }

    #[test]
    fn parse_rejects_empty_names() {
        let err = Name::parse("\\\\").unwrap_err();
        assert_eq!(err.kind(), nsviz_error::ErrorKind::InvalidName);
        assert!(Name::from_segments(Vec::<String>::new()).is_err());
    }

    #[test]
    fn equality_ignores_attributes() {
        let mut attributes = Attributes::new();
        attributes.insert("startLine".into(), "12".into());
        let plain = Name::keyword("eval", Attributes::new());
        let located = Name::keyword("eval", attributes);
        assert_eq!(plain, located);
        assert_eq!(located.attributes().get("startLine").map(String::as_str), Some("12"));
    }

    #[test]
    fn prefix_is_capped_at_depth() {
        let name = Name::parse("App\\A").unwrap();
        assert_eq!(name.prefix(1), ["App"]);
        assert_eq!(name.prefix(5), ["App", "A"]);
        assert!(name.prefix(0).is_empty());
        assert!(name.starts_with(&Name::parse("App").unwrap()));
    }

    #[test]
    fn deserializes_from_plain_string() {
        let name: Name = serde_json::from_str("\"Lib\\\\C\"").unwrap();
        assert_eq!(name.segments(), ["Lib", "C"]);
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Lib\\\\C\"");
    }

    #[test]
    fn nested_collections_deserialize_owned_names() {
        let names: Vec<Name> = serde_json::from_str(r#"["Lib::C", "App.D", "\\App\\E"]"#).unwrap();
        let forms: Vec<&str> = names.iter().map(Name::fully_qualified).collect();
        assert_eq!(forms, ["Lib\\C", "App\\D", "App\\E"]);

        let err = serde_json::from_str::<Name>("\"::\"").unwrap_err();
        assert!(err.to_string().contains("no segments"), "{err}");
    }
}

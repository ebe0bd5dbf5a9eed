use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Vertex style key carrying the vertex's group id.
pub const GROUP_ATTRIBUTE: &str = "group";

/// An open key/value style-attribute dictionary.
///
/// Merging is a shallow last-write-wins union: keys of the later dictionary
/// override keys of the earlier one, nothing is merged structurally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Fold `parts` left to right into one dictionary.
    pub fn merged<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Style>,
    {
        parts.into_iter().fold(Style::new(), |mut acc, part| {
            acc.merge(part);
            acc
        })
    }

    pub fn merge(&mut self, other: &Style) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Style
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_is_last_write_wins() {
        let base = Style::from_iter([("shape", "box"), ("color", "black")]);
        let accent = Style::new().with("color", "red");

        let merged = Style::merged([&base, &accent]);
        assert_eq!(merged.get("shape"), Some("box"));
        assert_eq!(merged.get("color"), Some("red"));

        let reversed = Style::merged([&accent, &base]);
        assert_eq!(reversed.get("color"), Some("black"));
    }

    #[test]
    fn merging_empty_changes_nothing() {
        let mut style = Style::new().with(GROUP_ATTRIBUTE, "3");
        style.merge(&Style::new());
        assert_eq!(style, Style::new().with("group", "3"));
        assert!(Style::merged(Vec::<&Style>::new()).is_empty());
    }
}

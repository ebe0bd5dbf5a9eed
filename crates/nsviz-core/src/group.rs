use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::name::{NAMESPACE_SEPARATOR, Name};

/// Identifier of a namespace group, assigned in order of first discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps names to group ids by their leading `group_length` segments.
///
/// A group length of 0 means "ungrouped": no name gets an id.
#[derive(Debug, Clone, Default)]
pub struct GroupGenerator {
    group_length: usize,
    labels: Vec<String>,
    ids: HashMap<String, GroupId>,
}

impl GroupGenerator {
    pub fn new(group_length: usize) -> Self {
        Self {
            group_length,
            ..Self::default()
        }
    }

    pub fn set_group_length(&mut self, group_length: usize) {
        self.group_length = group_length;
    }

    pub fn group_length(&self) -> usize {
        self.group_length
    }

    /// Group id for `name`, registering its prefix on first sight.
    pub fn get_id_for(&mut self, name: &Name) -> Option<GroupId> {
        if self.group_length == 0 {
            return None;
        }

        let label = name.prefix(self.group_length).join(NAMESPACE_SEPARATOR);
        if let Some(&id) = self.ids.get(&label) {
            return Some(id);
        }

        let id = GroupId(self.labels.len());
        tracing::trace!(group = %label, id = id.0, "new group");
        self.labels.push(label.clone());
        self.ids.insert(label, id);
        Some(id)
    }

    /// Every group discovered so far, ordered by discovery.
    pub fn get_groups(&self) -> BTreeMap<GroupId, String> {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| (GroupId(index), label.clone()))
            .collect()
    }

    pub fn label(&self, id: GroupId) -> Option<&str> {
        self.labels.get(id.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(fqn: &str) -> Name {
        Name::parse(fqn).unwrap()
    }

    #[test]
    fn group_length_one_groups_by_root_namespace() {
        let mut groups = GroupGenerator::new(1);
        let a = groups.get_id_for(&name("App\\A"));
        let b = groups.get_id_for(&name("App\\B"));
        let c = groups.get_id_for(&name("Lib\\C"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(
            groups.get_groups().into_values().collect::<Vec<_>>(),
            ["App", "Lib"]
        );
    }

    #[test]
    fn ids_are_stable_across_calls() {
        let mut groups = GroupGenerator::new(2);
        let first = groups.get_id_for(&name("App\\Service\\Mailer"));
        let again = groups.get_id_for(&name("App\\Service\\Queue"));
        let other = groups.get_id_for(&name("App\\Model\\User"));

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.label(first.unwrap()), Some("App\\Service"));
        assert_eq!(other.map(GroupId::index), Some(1));
    }

    #[test]
    fn zero_length_is_ungrouped() {
        let mut groups = GroupGenerator::default();
        assert_eq!(groups.get_id_for(&name("App\\A")), None);
        assert!(groups.get_groups().is_empty());
    }

    #[test]
    fn short_names_use_all_their_segments() {
        let mut groups = GroupGenerator::new(3);
        let eval = groups.get_id_for(&name("eval"));
        assert_eq!(groups.label(eval.unwrap()), Some("eval"));
    }
}

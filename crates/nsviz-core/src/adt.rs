use serde::{Deserialize, Serialize};

use crate::name::Name;

/// Structural relations of a declared type: implemented interfaces, extended
/// parents and used traits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, rename = "implemented", skip_serializing_if = "Vec::is_empty")]
    implemented_namespaces: Vec<Name>,
    #[serde(default, rename = "extended", skip_serializing_if = "Vec::is_empty")]
    extended_namespaces: Vec<Name>,
    #[serde(default, rename = "traits", skip_serializing_if = "Vec::is_empty")]
    used_trait_namespaces: Vec<Name>,
}

impl Meta {
    pub fn implemented_namespaces(&self) -> &[Name] {
        &self.implemented_namespaces
    }

    pub fn extended_namespaces(&self) -> &[Name] {
        &self.extended_namespaces
    }

    pub fn used_trait_namespaces(&self) -> &[Name] {
        &self.used_trait_namespaces
    }

    pub fn add_implemented_namespace(&mut self, name: Name) {
        self.implemented_namespaces.push(name);
    }

    pub fn add_extended_namespace(&mut self, name: Name) {
        self.extended_namespaces.push(name);
    }

    pub fn add_used_trait_namespace(&mut self, name: Name) {
        self.used_trait_namespaces.push(name);
    }
}

/// Analysis record of one declared type.
///
/// Populated by the extraction layer, and by the unsupported-construct
/// collector appending to `unsupported_stmts`. The graph builder only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adt {
    #[serde(rename = "declared")]
    declared_namespace: Name,
    #[serde(default, rename = "called", skip_serializing_if = "Vec::is_empty")]
    called_namespaces: Vec<Name>,
    #[serde(default, rename = "used", skip_serializing_if = "Vec::is_empty")]
    used_namespaces: Vec<Name>,
    #[serde(default, rename = "unsupported", skip_serializing_if = "Vec::is_empty")]
    unsupported_stmts: Vec<Name>,
    #[serde(default, rename = "strings", skip_serializing_if = "Vec::is_empty")]
    namespaced_strings: Vec<Name>,
    #[serde(flatten)]
    meta: Meta,
}

impl Adt {
    pub fn new(declared_namespace: Name) -> Self {
        Self {
            declared_namespace,
            called_namespaces: Vec::new(),
            used_namespaces: Vec::new(),
            unsupported_stmts: Vec::new(),
            namespaced_strings: Vec::new(),
            meta: Meta::default(),
        }
    }

    pub fn declared_namespace(&self) -> &Name {
        &self.declared_namespace
    }

    pub fn called_namespaces(&self) -> &[Name] {
        &self.called_namespaces
    }

    pub fn implemented_namespaces(&self) -> &[Name] {
        self.meta.implemented_namespaces()
    }

    pub fn extended_namespaces(&self) -> &[Name] {
        self.meta.extended_namespaces()
    }

    pub fn used_trait_namespaces(&self) -> &[Name] {
        self.meta.used_trait_namespaces()
    }

    pub fn used_namespaces(&self) -> &[Name] {
        &self.used_namespaces
    }

    pub fn unsupported_stmts(&self) -> &[Name] {
        &self.unsupported_stmts
    }

    pub fn namespaced_strings(&self) -> &[Name] {
        &self.namespaced_strings
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    pub fn add_called_namespace(&mut self, name: Name) {
        self.called_namespaces.push(name);
    }

    pub fn add_used_namespace(&mut self, name: Name) {
        self.used_namespaces.push(name);
    }

    pub fn add_unsupported_stmt(&mut self, name: Name) {
        self.unsupported_stmts.push(name);
    }

    pub fn add_namespaced_string(&mut self, name: Name) {
        self.namespaced_strings.push(name);
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
    fn structural_getters_read_through_meta() {
        let mut adt = Adt::new(name("App\\A"));
        adt.meta_mut().add_extended_namespace(name("App\\B"));
        adt.meta_mut().add_used_trait_namespace(name("App\\T"));

        assert_eq!(adt.extended_namespaces(), [name("App\\B")]);
        assert_eq!(adt.used_trait_namespaces(), adt.meta().used_trait_namespaces());
        assert!(adt.implemented_namespaces().is_empty());
    }

    #[test]
    fn deserializes_flattened_meta() {
        let json = r#"{
            "declared": "App\\A",
            "extended": ["App\\B"],
            "traits": ["App\\T"],
            "called": ["App\\C", "App\\C"]
        }"#;
        let adt: Adt = serde_json::from_str(json).unwrap();

        assert_eq!(adt.declared_namespace(), &name("App\\A"));
        assert_eq!(adt.extended_namespaces(), [name("App\\B")]);
        assert_eq!(adt.used_trait_namespaces(), [name("App\\T")]);
        assert_eq!(adt.called_namespaces().len(), 2);
        assert!(adt.unsupported_stmts().is_empty());
    }

    #[test]
    fn missing_declared_namespace_is_rejected() {
        let result: std::result::Result<Adt, _> = serde_json::from_str(r#"{"used": ["App\\B"]}"#);
        assert!(result.is_err());
    }
}

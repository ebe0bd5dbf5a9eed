use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

use nsviz_error::{Error, Result};

use crate::adt::Adt;
use crate::layout::StyleKey;
use crate::name::Name;

/// Category of dependency between a declared type and a referenced name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RelationKind {
    /// Plain usage or call.
    Plain,
    Implement,
    Extend,
    TraitUse,
    /// A construct the analysis could not resolve.
    Unsupported,
    /// A string literal that looks like a namespaced name.
    NamespacedString,
}

impl RelationKind {
    /// Extra style merged onto the target vertex, if the kind has one.
    ///
    /// Only blind-spot kinds restyle their targets.
    pub fn vertex_style_key(self) -> Option<StyleKey> {
        match self {
            RelationKind::Unsupported => Some(StyleKey::VertexUnsupported),
            RelationKind::NamespacedString => Some(StyleKey::VertexNamespacedString),
            _ => None,
        }
    }

    pub fn edge_style_key(self) -> StyleKey {
        match self {
            RelationKind::Plain => StyleKey::Edge,
            RelationKind::Implement => StyleKey::EdgeImplement,
            RelationKind::Extend => StyleKey::EdgeExtend,
            RelationKind::TraitUse => StyleKey::EdgeTraitUse,
            RelationKind::Unsupported => StyleKey::EdgeUnsupported,
            RelationKind::NamespacedString => StyleKey::EdgeNamespacedString,
        }
    }
}

/// Reads one dependency list off a record.
pub type Accessor = fn(&Adt) -> &[Name];

fn implemented(adt: &Adt) -> &[Name] {
    adt.meta().implemented_namespaces()
}

fn extended(adt: &Adt) -> &[Name] {
    adt.meta().extended_namespaces()
}

fn used_traits(adt: &Adt) -> &[Name] {
    adt.meta().used_trait_namespaces()
}

const CALL_RELATIONS: [(RelationKind, Accessor); 3] = [
    (RelationKind::Plain, Adt::called_namespaces),
    (RelationKind::Unsupported, Adt::unsupported_stmts),
    (RelationKind::NamespacedString, Adt::namespaced_strings),
];

const STRUCTURAL_RELATIONS: [(RelationKind, Accessor); 6] = [
    (RelationKind::Implement, implemented),
    (RelationKind::Extend, extended),
    (RelationKind::TraitUse, used_traits),
    (RelationKind::Plain, Adt::used_namespaces),
    (RelationKind::Unsupported, Adt::unsupported_stmts),
    (RelationKind::NamespacedString, Adt::namespaced_strings),
];

/// Which relation lists a build traverses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Implements, extends, trait uses and plain uses.
    #[default]
    Structural,
    /// Calls only; structural relations are ignored.
    Call,
}

impl BuildMode {
    pub fn parse(value: &str) -> Result<Self> {
        BuildMode::from_str(value).map_err(|_| {
            Error::config_invalid(format!(
                "unknown mode '{}', expected 'structural' or 'call'",
                value
            ))
            .with_operation("relation::parse_mode")
            .with_context("mode", value)
        })
    }

    /// (kind, accessor) pairs in traversal order.
    pub fn relations(self) -> &'static [(RelationKind, Accessor)] {
        match self {
            BuildMode::Structural => &STRUCTURAL_RELATIONS,
            BuildMode::Call => &CALL_RELATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(mode: BuildMode) -> Vec<RelationKind> {
        mode.relations().iter().map(|(kind, _)| *kind).collect()
    }

    #[test]
    fn call_mode_skips_structural_relations() {
        let call = kinds(BuildMode::Call);
        assert_eq!(
            call,
            [
                RelationKind::Plain,
                RelationKind::Unsupported,
                RelationKind::NamespacedString
            ]
        );
    }

    #[test]
    fn structural_mode_order() {
        let structural = kinds(BuildMode::Structural);
        assert_eq!(structural.len(), 6);
        assert_eq!(structural[0], RelationKind::Implement);
        assert_eq!(structural[3], RelationKind::Plain);
    }

    #[test]
    fn accessors_read_the_matching_lists() {
        let mut adt = Adt::new(Name::parse("App\\A").unwrap());
        adt.add_called_namespace(Name::parse("App\\Called").unwrap());
        adt.add_used_namespace(Name::parse("App\\Used").unwrap());

        let (_, call_plain) = BuildMode::Call.relations()[0];
        let (_, structural_plain) = BuildMode::Structural.relations()[3];
        assert_eq!(call_plain(&adt)[0].fully_qualified(), "App\\Called");
        assert_eq!(structural_plain(&adt)[0].fully_qualified(), "App\\Used");
    }

    #[test]
    fn only_blind_spot_kinds_style_vertices() {
        assert_eq!(RelationKind::Plain.vertex_style_key(), None);
        assert_eq!(RelationKind::Extend.vertex_style_key(), None);
        assert_eq!(
            RelationKind::Unsupported.vertex_style_key(),
            Some(StyleKey::VertexUnsupported)
        );
        assert_eq!(RelationKind::TraitUse.edge_style_key(), StyleKey::EdgeTraitUse);
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!(BuildMode::parse("call").unwrap(), BuildMode::Call);
        assert!(BuildMode::parse("calls").is_err());
    }
}

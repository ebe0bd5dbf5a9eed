//! Collection of constructs the analysis cannot resolve statically.
//!
//! Each recognized construct becomes a keyword [`Name`] (`eval`, `global`,
//! ...) on the owning record's unsupported list, so the builder draws it as a
//! highlighted vertex instead of dropping it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::trace;

use crate::adt::Adt;
use crate::filter::NodeNameFilter;
use crate::name::Name;
use crate::visit::{SyntaxNode, Visitor};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    IntoStaticStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedConstruct {
    /// `eval(...)`
    Eval,
    /// Calls through a runtime callable, e.g. `call_user_func`.
    DynamicCall,
    /// `$$name`
    VariableVariable,
    /// `global $x`
    Global,
}

impl UnsupportedConstruct {
    /// Identifier recorded for the construct.
    pub fn keyword(self) -> &'static str {
        self.into()
    }
}

/// Visitor that appends recognized unsupported constructs to an [`Adt`].
///
/// Nodes are handled on leave. A recognized node is turned into its keyword
/// name, carrying the node's attributes, and handed to the filter; only names
/// the filter returns are recorded.
pub struct UnsupportedCollector<'a, F: NodeNameFilter + ?Sized> {
    adt: &'a mut Adt,
    filter: &'a F,
    constructs: SmallVec<[UnsupportedConstruct; 4]>,
}

impl<'a, F: NodeNameFilter + ?Sized> UnsupportedCollector<'a, F> {
    /// Collector for `eval` only.
    pub fn new(adt: &'a mut Adt, filter: &'a F) -> Self {
        Self::with_constructs(adt, filter, [UnsupportedConstruct::Eval])
    }

    /// Collector for every known construct.
    pub fn all(adt: &'a mut Adt, filter: &'a F) -> Self {
        Self::with_constructs(adt, filter, UnsupportedConstruct::iter())
    }

    pub fn with_constructs<I>(adt: &'a mut Adt, filter: &'a F, constructs: I) -> Self
    where
        I: IntoIterator<Item = UnsupportedConstruct>,
    {
        Self {
            adt,
            filter,
            constructs: constructs.into_iter().collect(),
        }
    }

    pub fn recognizes(&self, construct: UnsupportedConstruct) -> bool {
        self.constructs.contains(&construct)
    }

    pub fn adt(&self) -> &Adt {
        self.adt
    }
}

impl<N, F> Visitor<N> for UnsupportedCollector<'_, F>
where
    N: SyntaxNode,
    F: NodeNameFilter + ?Sized,
{
    fn leave_node(&mut self, node: &N) {
        let Some(construct) = node
            .unsupported_construct()
            .filter(|construct| self.recognizes(*construct))
        else {
            return;
        };

        let name = Name::keyword(construct.keyword(), node.attributes().clone());
        match self.filter.filter(name) {
            Some(name) => {
                trace!(construct = %construct, name = %name, "unsupported construct recorded");
                self.adt.add_unsupported_stmt(name);
            }
            None => trace!(construct = %construct, "unsupported construct filtered out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PassThrough;
    use crate::visit::{Node, traverse};
    use pretty_assertions::assert_eq;

    fn adt() -> Adt {
        Adt::new(Name::parse("App\\A").unwrap())
    }

    #[test]
    fn keywords() {
        assert_eq!(UnsupportedConstruct::Eval.keyword(), "eval");
        assert_eq!(UnsupportedConstruct::VariableVariable.keyword(), "variable_variable");
        assert_eq!(
            "dynamic_call".parse::<UnsupportedConstruct>().unwrap(),
            UnsupportedConstruct::DynamicCall
        );
    }

    #[test]
    fn default_collector_only_records_eval() {
        let tree = Node::new()
            .with_child(Node::construct(UnsupportedConstruct::Eval).with_attribute("line", "3"))
            .with_child(Node::construct(UnsupportedConstruct::Global));

        let mut adt = adt();
        let mut collector = UnsupportedCollector::new(&mut adt, &PassThrough);
        traverse(&tree, &mut [&mut collector]);

        let recorded = adt.unsupported_stmts();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].fully_qualified(), "eval");
        assert_eq!(
            recorded[0].attributes().get("line").map(String::as_str),
            Some("3")
        );
    }

    #[test]
    fn all_records_every_construct_in_leave_order() {
        let tree = Node::construct(UnsupportedConstruct::Global)
            .with_child(Node::construct(UnsupportedConstruct::DynamicCall));

        let mut adt = adt();
        let mut collector = UnsupportedCollector::all(&mut adt, &PassThrough);
        traverse(&tree, &mut [&mut collector]);

        let recorded = adt
            .unsupported_stmts()
            .iter()
            .map(|name| name.fully_qualified())
            .collect::<Vec<_>>();
        assert_eq!(recorded, ["dynamic_call", "global"]);
    }
}

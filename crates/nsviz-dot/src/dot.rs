//! DOT format utilities for graph rendering.

use std::borrow::Cow;
use std::fmt::Write;

use nsviz_core::Style;

/// Sanitize a string to be a valid DOT identifier.
/// Replaces any non-alphanumeric character with underscore.
pub fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape special characters for quoted DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// An attribute key as written in DOT: bare when it is a plain identifier,
/// quoted and escaped otherwise.
pub fn attr_key(key: &str) -> Cow<'_, str> {
    let mut chars = key.chars();
    let plain = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(format!("\"{}\"", escape_label(key)))
    }
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

fn write_attr_list<'a>(output: &mut String, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) {
    output.push('[');
    for (i, (key, value)) in attrs.into_iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        let _ = write!(output, "{}=\"{}\"", attr_key(key), escape_label(value));
    }
    output.push(']');
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new DOT digraph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {} {{", sanitize_id(name));
        Self { output, indent: 1 }
    }

    /// Add a graph (or current cluster) attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", attr_key(key), escape_label(value));
        self
    }

    /// Add every entry of `style` as an attribute.
    pub fn attrs(&mut self, style: &Style) -> &mut Self {
        for (key, value) in style.iter() {
            self.attr(key, value);
        }
        self
    }

    /// Add a blank line for readability.
    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Add a node with full attributes.
    pub fn node_full<'a>(
        &mut self,
        id: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str(id);
        write_attr_list(&mut self.output, attrs);
        self.output.push_str(";\n");
        self
    }

    /// Add an edge with attributes; an empty list writes a bare edge.
    pub fn edge_with_attrs<'a>(
        &mut self,
        from: &str,
        to: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{from} -> {to}");
        let mut attrs = attrs.into_iter().peekable();
        if attrs.peek().is_some() {
            self.output.push(' ');
            write_attr_list(&mut self.output, attrs);
        }
        self.output.push_str(";\n");
        self
    }

    /// Start a subgraph cluster.
    pub fn start_cluster(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph cluster_{} {{", sanitize_id(id));
        self.indent += 1;
        self.attr("label", label)
    }

    /// End the current subgraph cluster.
    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_escape_namespace_separators() {
        assert_eq!(escape_label("App\\A"), "App\\\\A");
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(sanitize_id("App\\Service"), "App_Service");
    }

    #[test]
    fn keys_outside_the_id_alphabet_are_quoted() {
        assert_eq!(attr_key("fontname"), "fontname");
        assert_eq!(attr_key("font name"), "\"font name\"");
        assert_eq!(attr_key("a=b"), "\"a=b\"");
        assert_eq!(attr_key("say \"x\""), "\"say \\\"x\\\"\"");
        assert_eq!(attr_key("2d"), "\"2d\"");
        assert_eq!(attr_key(""), "\"\"");

        let mut dot = DotBuilder::new("G");
        dot.attr("page size", "a4")
            .node_full("v0", [("label", "App\\A"), ("font name", "x")]);
        assert_eq!(
            dot.build(),
            "digraph G {\n  \"page size\"=\"a4\";\n  v0[label=\"App\\\\A\", \"font name\"=\"x\"];\n}\n"
        );
    }

    #[test]
    fn clusters_indent_their_content() {
        let mut dot = DotBuilder::new("G");
        dot.start_cluster("0", "App")
            .node_full("v0", [("label", "App\\A")])
            .end_cluster()
            .edge_with_attrs("v0", "v1", Vec::<(&str, &str)>::new());
        assert_eq!(
            dot.build(),
            "digraph G {\n  subgraph cluster_0 {\n    label=\"App\";\n    v0[label=\"App\\\\A\"];\n  }\n  v0 -> v1;\n}\n"
        );
    }
}

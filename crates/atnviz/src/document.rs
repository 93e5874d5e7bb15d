//! Assembly of complete DOT documents.

use crate::cluster::{write_cluster, write_transition_edges};
use crate::color::{UNOWNED_FILL, color_for_rule};
use crate::dot;
use crate::inter::write_inter_cluster_edges;
use crate::model::Automaton;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// All clusters, trimmed relative to the given focus rule.
    Focused(usize),
    /// Every state and transition, unclustered.
    Full,
    /// The states of one rule only, without colours.
    RuleFlat(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name, derived from the rule name, the rule index, or a fixed literal.
    pub name: String,
    pub kind: DocumentKind,
    pub content: String,
}

pub const FULL_DOCUMENT_NAME: &str = "atn.dot";
pub const DEFAULT_FULL_TITLE: &str = "ATN for the language";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Emit one `clusters_for_<rule>.dot` per rule.
    pub include_focused: bool,
    /// Emit `atn.dot`.
    pub include_full: bool,
    /// Emit one `atn_<index>.dot` per rule.
    pub include_rule_flat: bool,
    /// Caption of `atn.dot`.
    pub full_title: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            include_focused: true,
            include_full: true,
            include_rule_flat: true,
            full_title: DEFAULT_FULL_TITLE.to_string(),
        }
    }
}

pub fn focused_document_name(rule_name: &str) -> String {
    format!("clusters_for_{rule_name}.dot")
}

pub fn rule_flat_document_name(rule: usize) -> String {
    format!("atn_{rule}.dot")
}

/// All rule clusters plus inter-cluster edges, relative to `focus`.
pub fn render_focused(atn: &Automaton, focus: usize) -> Document {
    let rule_name = atn.rule_name(focus);
    let mut out = String::new();
    out.push_str("digraph ATN {\n");
    out.push_str("   remincross =true\n");
    for rule in 0..atn.rule_count() {
        write_cluster(&mut out, atn, rule, Some(focus));
    }
    write_inter_cluster_edges(&mut out, atn, Some(focus));
    dot::write_caption(&mut out, &format!("ATN for rule {rule_name}"));
    out.push_str("}\n");

    Document {
        name: focused_document_name(rule_name),
        kind: DocumentKind::Focused(focus),
        content: out,
    }
}

/// Every state as a filled node and every transition as an uncoloured edge.
pub fn render_full(atn: &Automaton, title: &str) -> Document {
    let mut out = String::new();
    out.push_str("digraph ATN {\n");
    for (idx, state) in atn.states().iter().enumerate() {
        let fill = state.rule.map_or(UNOWNED_FILL, color_for_rule);
        let _ = writeln!(
            out,
            "    {} [shape=rectangle, label=\"{}\", fillcolor=\"{fill}\", style=filled];",
            state.node_id(),
            dot::escape(&atn.state_label(idx)),
        );
    }
    for (idx, state) in atn.states().iter().enumerate() {
        for t in &state.transitions {
            write_transition_edges(&mut out, atn, idx, t, None);
        }
    }
    dot::write_caption(&mut out, title);
    out.push_str("}\n");

    Document {
        name: FULL_DOCUMENT_NAME.to_string(),
        kind: DocumentKind::Full,
        content: out,
    }
}

/// States owned by `rule` (orphans included) and the transitions leaving them.
pub fn render_rule_flat(atn: &Automaton, rule: usize) -> Document {
    let rule_name = atn.rule_name(rule);
    let mut out = String::new();
    let _ = writeln!(out, "digraph {} {{", dot::id(&format!("ATN_for_{rule_name}")));
    for idx in atn.states_of_rule(rule) {
        let _ = writeln!(
            out,
            "    {} [shape=rectangle, label=\"{}\"];",
            atn.state(idx).node_id(),
            dot::escape(&atn.state_label(idx)),
        );
    }
    for idx in atn.states_of_rule(rule) {
        for t in &atn.state(idx).transitions {
            write_transition_edges(&mut out, atn, idx, t, None);
        }
    }
    dot::write_caption(&mut out, &format!("ATN for {rule_name}"));
    out.push_str("}\n");

    Document {
        name: rule_flat_document_name(rule),
        kind: DocumentKind::RuleFlat(rule),
        content: out,
    }
}

/// Renders the enabled document families: focused views, then the full view, then the
/// per-rule flat views, each in rule order.
pub fn generate(atn: &Automaton, options: &GenerateOptions) -> Vec<Document> {
    let mut docs = Vec::new();
    if options.include_focused {
        docs.extend((0..atn.rule_count()).map(|rule| render_focused(atn, rule)));
    }
    if options.include_full {
        docs.push(render_full(atn, &options.full_title));
    }
    if options.include_rule_flat {
        docs.extend((0..atn.rule_count()).map(|rule| render_rule_flat(atn, rule)));
    }
    for doc in &docs {
        tracing::debug!(name = %doc.name, bytes = doc.content.len(), "rendered document");
    }
    docs
}

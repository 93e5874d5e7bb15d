//! Per-rule cluster rendering.
//!
//! A cluster holds the states a rule owns and the transitions that stay inside the rule. When a
//! focus rule is given, the cluster is trimmed to the states and transitions adjacent to the
//! focus rule, and clusters other than the focus rule's own are drawn with a dotted border.

use crate::color::color_for_rule;
use crate::dot::{self, EdgeStyle};
use crate::model::{Automaton, StateIndex, Transition};
use std::fmt::Write as _;

/// Writes the edges of one transition: a single unlabeled edge for epsilon transitions,
/// otherwise one edge per accepted symbol labeled with its display name.
pub(crate) fn write_transition_edges(
    out: &mut String,
    atn: &Automaton,
    from: StateIndex,
    transition: &Transition,
    color: Option<&str>,
) {
    let from_id = atn.state(from).node_id();
    let to_id = atn.state(transition.target).node_id();
    if transition.epsilon {
        dot::write_edge(out, &from_id, &to_id, EdgeStyle { label: None, color });
        return;
    }
    for &symbol in &transition.symbols {
        let name = atn.vocabulary().display_name(symbol);
        dot::write_edge(
            out,
            &from_id,
            &to_id,
            EdgeStyle {
                label: Some(&name),
                color,
            },
        );
    }
}

/// Appends `subgraph cluster_<rule> { .. }` for `rule`.
///
/// Orphan states are never drawn here. Panics when `rule` is not a declared rule index.
pub fn write_cluster(out: &mut String, atn: &Automaton, rule: usize, focus: Option<usize>) {
    let name = atn.rule_name(rule);
    let base = color_for_rule(rule);
    let stroke = base.dark().to_hex();

    let _ = writeln!(out, "subgraph cluster_{rule} {{");
    if focus.is_some_and(|f| f != rule) {
        out.push_str("  style = dotted;\n");
    }

    let fill = base.to_hex();
    for idx in atn.states_of_rule(rule) {
        if atn.is_orphan(idx) {
            continue;
        }
        if focus.is_some_and(|f| !atn.is_state_connected_to_rule(idx, f)) {
            continue;
        }
        let _ = writeln!(
            out,
            "    {} [shape=rectangle, label=\"{}\", fillcolor=\"{fill}\", style=\"filled\"];",
            atn.state(idx).node_id(),
            dot::escape(&atn.state_label(idx)),
        );
    }

    for idx in atn.states_of_rule(rule) {
        for t in &atn.state(idx).transitions {
            if atn.state(t.target).rule != Some(rule) {
                continue;
            }
            if focus.is_some_and(|f| !atn.is_transition_connected_to_rule(t, f)) {
                continue;
            }
            write_transition_edges(out, atn, idx, t, Some(&stroke));
        }
    }

    let _ = writeln!(out, "    label = \"{}\";", dot::escape(name));
    let _ = writeln!(out, "    bgcolor = \"{}\";", base.light().to_hex());
    out.push_str("}\n");
}

/// Renders a single cluster into a fresh string.
pub fn render_cluster(atn: &Automaton, rule: usize, focus: Option<usize>) -> String {
    let mut out = String::new();
    write_cluster(&mut out, atn, rule, focus);
    out
}

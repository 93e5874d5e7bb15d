//! Edges between clusters.

use crate::cluster::write_transition_edges;
use crate::color::{UNOWNED_FILL, color_for_rule};
use crate::model::Automaton;

/// Appends every transition whose source and target belong to different rules, stroked with
/// the target rule's dark colour.
///
/// With a focus rule, an edge is kept when either end is owned by the focus rule. This is
/// broader than the cluster filter, which only looks at the target.
pub fn write_inter_cluster_edges(out: &mut String, atn: &Automaton, focus: Option<usize>) {
    for (idx, state) in atn.states().iter().enumerate() {
        for t in &state.transitions {
            let target_rule = atn.state(t.target).rule;
            if target_rule == state.rule {
                continue;
            }
            if focus
                .is_some_and(|f| !atn.is_transition_connected_to_rule(t, f) && state.rule != Some(f))
            {
                continue;
            }
            let stroke = target_rule
                .map_or(UNOWNED_FILL, color_for_rule)
                .dark()
                .to_hex();
            write_transition_edges(out, atn, idx, t, Some(&stroke));
        }
    }
}

pub fn render_inter_cluster_edges(atn: &Automaton, focus: Option<usize>) -> String {
    let mut out = String::new();
    write_inter_cluster_edges(&mut out, atn, focus);
    out
}
